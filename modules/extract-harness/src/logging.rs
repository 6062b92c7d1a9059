use tracing_subscriber::EnvFilter;

/// Route `tracing` output through the test writer so it shows up with
/// `cargo test -- --nocapture` and stays attached to the failing test
/// otherwise. Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("extract_harness=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
