mod cli;

use badge_dl::ToExitCode;
use clap::Parser;
use cli::{App, Args};
use tracing_subscriber::EnvFilter;

// One badge per invocation; a single-threaded runtime is enough
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let app = App::new(args);
    if let Err(error) = app.run().await {
        app.print_error(&error);
        std::process::exit(error.exit_code());
    }
}

/// Log to stderr so stdout only carries the result line
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "badge_dl=warn",
        1 => "badge_dl=info",
        _ => "badge_dl=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}
