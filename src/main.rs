//! Binary entrypoint kept minimal. Page and proxy logic live in the library.

mod args;

use clap::Parser;

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    let level = args::determine_log_level(&args);
    let serving = matches!(args.command, args::Command::Serve { .. });
    inplace_translator::logging::init(&level, serving);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "inplace-translator starting");
    if let Err(err) = args::run(args).await {
        tracing::error!(error = %err, "command failed");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    tracing::info!("inplace-translator exited");
}
