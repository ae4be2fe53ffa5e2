//! Current/next density buffers for one species.

/// Two same-sized density grids.
///
/// `current` is the authoritative state between steps; `next` is scratch
/// written during a step and promoted by [`DoubleBuffer::swap`].
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBuffer {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl DoubleBuffer {
    pub fn new(initial: Vec<f64>) -> Self {
        Self {
            next: initial.clone(),
            current: initial,
        }
    }

    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn next(&self) -> &[f64] {
        &self.next
    }

    /// Read the snapshot while writing the scratch grid
    pub fn split_mut(&mut self) -> (&[f64], &mut [f64]) {
        (&self.current, &mut self.next)
    }

    /// Promote `next` to `current`
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_copies_into_both() {
        let buffer = DoubleBuffer::new(vec![1.0, 2.0]);
        assert_eq!(buffer.current(), &[1.0, 2.0]);
        assert_eq!(buffer.next(), &[1.0, 2.0]);
    }

    #[test]
    fn test_swap_promotes_next() {
        let mut buffer = DoubleBuffer::new(vec![1.0, 2.0]);
        {
            let (current, next) = buffer.split_mut();
            next[0] = current[1] * 10.0;
        }
        assert_eq!(buffer.current(), &[1.0, 2.0]);
        buffer.swap();
        assert_eq!(buffer.current(), &[20.0, 2.0]);
        assert_eq!(buffer.next(), &[1.0, 2.0]);
    }

    #[test]
    fn test_swap_moves_storage_not_values() {
        let mut buffer = DoubleBuffer::new(vec![0.0; 4]);
        let next_ptr = buffer.next().as_ptr();
        buffer.swap();
        assert_eq!(buffer.current().as_ptr(), next_ptr);
    }
}
