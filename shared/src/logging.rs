//! Logging setup shared by the engine and its consumers

use tracing_subscriber::EnvFilter;

fn default_filter(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    format!("analyzer={base_level},shared={base_level},reqwest=warn")
}

/// Initialize the tracing subscriber for the analysis engine.
///
/// Panics if a global subscriber is already installed; call once at
/// application startup.
pub fn init_tracing() {
    init_tracing_with_level(None);
}

/// Initialize the tracing subscriber with an explicit base level
/// ("debug", "info", ...). Noisy transport crates stay at warn.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_filter(log_level)))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Best-effort initialization for tests: ignores an already installed
/// subscriber instead of panicking.
pub fn try_init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(default_filter(Some("debug"))))
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_includes_engine_targets() {
        let filter = default_filter(Some("debug"));
        assert!(filter.contains("analyzer=debug"));
        assert!(filter.contains("reqwest=warn"));
    }
}
