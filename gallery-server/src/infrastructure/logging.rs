use tracing_subscriber::{EnvFilter, fmt};

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,gallery_server=debug"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init also forwards `log` records (actix Logger) into tracing
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .json()
        .try_init();
}
