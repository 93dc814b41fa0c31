use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "bayspar",
    "bayspar_predict",
    "bayspar_select",
    "bayspar_stats",
    "bayspar_store",
];

/// Default filter directive for a CLI verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// `RUST_LOG` env var overrides the CLI flag if set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_by_default() {
        let filter = default_filter(0);
        assert!(filter.starts_with("bayspar=warn,"));
        assert!(filter.contains("bayspar_select=warn"));
    }

    #[test]
    fn verbosity_saturates_at_trace() {
        assert!(default_filter(2).contains("bayspar_predict=debug"));
        assert_eq!(default_filter(3), default_filter(9));
        assert!(default_filter(3).ends_with("bayspar_store=trace"));
    }
}
