use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STICKER_EDITOR_LOG";
const DEFAULT_FILTER: &str = "info";

/// Installs the fmt subscriber. Safe to call more than once; later calls and
/// hosts that already installed a subscriber are left alone.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
