use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a configured level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`) to a
/// tracing filter directive. Unknown names map to `info`.
pub fn filter_directive(log_level: &str) -> &'static str {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" | "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    }
}

/// Initialise the global `tracing` subscriber, writing to stderr so stdout
/// carries only the report.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::new(filter_directive(log_level));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_known_levels() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
    }

    #[test]
    fn test_filter_directive_case_insensitive() {
        assert_eq!(filter_directive("warning"), "warn");
        assert_eq!(filter_directive("Debug"), "debug");
    }

    #[test]
    fn test_filter_directive_unknown_falls_back_to_info() {
        assert_eq!(filter_directive("TRACE"), "info");
        assert_eq!(filter_directive("verbose"), "info");
        assert_eq!(filter_directive(""), "info");
    }
}
