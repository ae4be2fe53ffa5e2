//! Habitat map with an impassable border ring.

use predprey_core::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Orthogonal neighbour offsets (row, col): up, down, left, right
const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A padded 2D habitability map.
///
/// The interior is `height x width`; one extra ring of cells surrounds it and
/// is never habitable. Storage is row-major over the padded `rows x cols`
/// shape, so interior cell `(r, c)` for `r in 1..=height, c in 1..=width`
/// lives at `r * cols + c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitatGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    neighbours: Vec<u8>,
    land: Vec<usize>,
}

impl HabitatGrid {
    /// Build a grid from interior rows (`height` rows of `width` cells each)
    pub fn from_rows(width: usize, height: usize, rows: &[Vec<bool>]) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Parse(format!(
                "Invalid landscape dimensions: {}, {}",
                width, height
            )));
        }
        if rows.len() != height {
            return Err(Error::Parse(format!(
                "Expected {} rows, but found {}",
                height,
                rows.len()
            )));
        }

        let cols = width + 2;
        let mut cells = vec![false; (height + 2) * cols];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::Parse(format!(
                    "Row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            let start = (i + 1) * cols + 1;
            cells[start..start + width].copy_from_slice(row);
        }

        Ok(Self::from_padded(width, height, cells))
    }

    /// Parse the text habitat format: a `"<width> <height>"` header followed
    /// by `height` lines of `width` whitespace-separated 0/1 values.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        let (header, data) = lines
            .split_first()
            .ok_or_else(|| Error::Parse("File is empty".to_string()))?;

        let (width, height) = parse_header(header)?;

        if data.len() != height {
            return Err(Error::Parse(format!(
                "Expected {} lines in file, but found {}",
                height,
                data.len()
            )));
        }

        let rows = data
            .iter()
            .enumerate()
            .map(|(i, line)| parse_row(line, i + 2, width))
            .collect::<Result<Vec<_>>>()?;

        Self::from_rows(width, height, &rows)
    }

    /// Read and parse a habitat file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let grid = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            width = grid.width,
            height = grid.height,
            land_cells = grid.land_cells(),
            "Loaded habitat"
        );
        Ok(grid)
    }

    fn from_padded(width: usize, height: usize, cells: Vec<bool>) -> Self {
        let rows = height + 2;
        let cols = width + 2;

        // Zero padding: anything outside the padded grid counts as uninhabitable
        let mut neighbours = vec![0u8; cells.len()];
        for r in 0..rows {
            for c in 0..cols {
                neighbours[r * cols + c] = NEIGHBOURS
                    .iter()
                    .filter(|(dr, dc)| {
                        match (r.checked_add_signed(*dr), c.checked_add_signed(*dc)) {
                            (Some(nr), Some(nc)) if nr < rows && nc < cols => {
                                cells[nr * cols + nc]
                            }
                            _ => false,
                        }
                    })
                    .count() as u8;
            }
        }

        let land = cells
            .iter()
            .enumerate()
            .filter_map(|(i, &habitable)| habitable.then_some(i))
            .collect();

        Self {
            width,
            height,
            cells,
            neighbours,
            land,
        }
    }

    /// Interior width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Interior height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Padded row count (`height + 2`)
    pub fn rows(&self) -> usize {
        self.height + 2
    }

    /// Padded column count (`width + 2`)
    pub fn cols(&self) -> usize {
        self.width + 2
    }

    /// Padded shape as `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    /// Number of cells in the padded grid
    pub fn padded_len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }

    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.cols(), index % self.cols())
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// Habitability at a padded coordinate; out-of-range reads as `false`
    pub fn is_habitable(&self, row: usize, col: usize) -> bool {
        self.contains(row, col) && self.cells[self.index(row, col)]
    }

    /// Habitable 4-neighbours of a padded coordinate
    pub fn neighbour_count(&self, row: usize, col: usize) -> Result<u8> {
        if !self.contains(row, col) {
            return Err(self.out_of_bounds(row, col));
        }
        Ok(self.neighbours[self.index(row, col)])
    }

    /// Flat row-major habitability over the padded grid
    pub fn habitability(&self) -> &[bool] {
        &self.cells
    }

    /// Flat row-major neighbour counts over the padded grid
    pub fn neighbour_counts(&self) -> &[u8] {
        &self.neighbours
    }

    /// Number of habitable interior cells
    pub fn land_cells(&self) -> usize {
        self.land.len()
    }

    /// Flat indices of habitable cells in row-major order
    pub fn land_indices(&self) -> &[usize] {
        &self.land
    }

    pub(crate) fn out_of_bounds(&self, row: usize, col: usize) -> Error {
        Error::OutOfBounds {
            row,
            col,
            rows: self.rows(),
            cols: self.cols(),
        }
    }
}

fn parse_header(line: &str) -> Result<(usize, usize)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[w, h] = tokens.as_slice() else {
        return Err(Error::Parse(format!(
            "Header must be \"<width> <height>\", got {:?}",
            line
        )));
    };
    let w: i64 = w
        .parse()
        .map_err(|_| Error::Parse(format!("Invalid landscape width: {:?}", w)))?;
    let h: i64 = h
        .parse()
        .map_err(|_| Error::Parse(format!("Invalid landscape height: {:?}", h)))?;
    if w <= 0 || h <= 0 {
        return Err(Error::Parse(format!(
            "Invalid landscape dimensions: {}, {}",
            w, h
        )));
    }
    Ok((w as usize, h as usize))
}

fn parse_row(line: &str, line_no: usize, width: usize) -> Result<Vec<bool>> {
    let row = line
        .split_whitespace()
        .map(|token| match token.parse::<i64>() {
            Ok(0) => Ok(false),
            Ok(1) => Ok(true),
            Ok(other) => Err(Error::Parse(format!(
                "Line {}: cell value {} is not 0 or 1",
                line_no, other
            ))),
            Err(_) => Err(Error::Parse(format!(
                "Line {}: {:?} is not an integer",
                line_no, token
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    if row.len() != width {
        return Err(Error::Parse(format!(
            "Line {} in the file does not have {} integers",
            line_no, width
        )));
    }
    Ok(row)
}
