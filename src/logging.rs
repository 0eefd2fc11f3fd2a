use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: storage warnings only.
const DEFAULT_FILTER: &str = "salonbook=warn";

/// Initialize stderr logging. Stdout stays reserved for command output.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("salonbook=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
