//! Tracing subscriber setup for the simulation binary.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

const DEFAULT_FILTER: &str = "info,predprey_cli=debug,predprey_world=info";
const FORMAT_VAR: &str = "PREDPREY_LOG_FORMAT";

fn is_json_format(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter; `PREDPREY_LOG_FORMAT=json`
/// switches to newline-delimited JSON records.
pub fn init_telemetry() -> Result<()> {
    let json = is_json_format(std::env::var(FORMAT_VAR).ok().as_deref());

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .try_init()?;

    info!("Telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_switch() {
        assert!(is_json_format(Some("json")));
        assert!(is_json_format(Some("JSON")));
        assert!(is_json_format(Some(" json\n")));
        assert!(!is_json_format(Some("text")));
        assert!(!is_json_format(Some("")));
        assert!(!is_json_format(None));
    }
}
