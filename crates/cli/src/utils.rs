use crate::opts::ShellOpts;
use tracing_subscriber::EnvFilter;

/// Loads a `.env` file from the current directory or its parents, if there is one.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => trace!(path = %path.display(), "loaded .env"),
        Err(err) if err.not_found() => {}
        Err(err) => eprintln!("failed to load .env: {err}"),
    }
}

/// Initializes a tracing Subscriber for logging.
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub fn subscriber(shell: ShellOpts) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(shell.log_directive()));
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Enables colored output only when stdout is a terminal that supports it.
pub fn enable_paint() {
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
}
