use ctfcred::cli;
use ctfcred::core::error::VaultError;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_env("CTFCRED_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        if matches!(e.downcast_ref::<VaultError>(), Some(VaultError::Cancelled)) {
            return;
        }
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
