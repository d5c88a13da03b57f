mod cli;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "orbit_landing=info,wgpu_core=warn,wgpu_hal=warn";

fn init_logging(log_level: Option<&str>) {
    // RUST_LOG wins over the command line.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or(DEFAULT_LOG_FILTER)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.log_level.as_deref());

    tracing::info!("orbit-landing v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = orbit_landing::run(config) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
