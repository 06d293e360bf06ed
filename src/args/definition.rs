//! Command-line argument definition and dispatch.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use inplace_translator::prefs::Theme;

use crate::args::utils::Result;

/// In-place page translator with lossless restore and a translate proxy
#[derive(Parser, Debug)]
#[command(name = "inplace-translator")]
#[command(version)]
#[command(about = "In-place page translator with lossless restore and a translate proxy", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file (default: ~/.config/inplace-translator/settings.conf)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference file (default: ~/.config/inplace-translator/preferences.json)
    #[arg(long, global = true)]
    pub prefs_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the credential-hiding translate proxy
    Serve {
        /// Listen address (overrides HOST)
        #[arg(long)]
        host: Option<IpAddr>,
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the translatable units of an HTML file
    Inventory {
        /// HTML file (`-` for stdin)
        file: PathBuf,
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Translate an HTML file to a language (the source language restores it)
    Translate {
        /// HTML file (`-` for stdin)
        file: PathBuf,
        /// Target language code
        #[arg(long)]
        to: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load an HTML file with the saved preference applied and toggle once
    Toggle {
        /// HTML file (`-` for stdin)
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show or update saved preferences
    Prefs {
        /// Save the displayed language
        #[arg(long)]
        language: Option<String>,
        /// Save the colour theme
        #[arg(long, value_parser = parse_theme)]
        theme: Option<Theme>,
    },
}

/// What: Parse a theme name for clap.
///
/// # Errors
/// - Returns `Err` for anything but `light` or `dark`
fn parse_theme(s: &str) -> std::result::Result<Theme, String> {
    Theme::from_config_key(s).ok_or_else(|| format!("unknown theme {s:?} (expected light or dark)"))
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - `Ok(())` when the command completed.
///
/// # Errors
/// - Returns `Err` when input cannot be read, output cannot be written, or the proxy fails to start.
///
/// Details:
/// - Each page command is one page load: originals live only for this run.
pub async fn run(args: Args) -> Result<()> {
    let Args {
        config,
        prefs_file,
        command,
        ..
    } = args;
    match command {
        Command::Serve { host, port } => crate::args::serve::handle_serve(host, port).await,
        Command::Inventory { file, json } => crate::args::page::handle_inventory(&file, json),
        Command::Translate { file, to, output } => {
            let ctx = crate::args::page::PageContext::load(config.as_deref(), prefs_file);
            crate::args::page::handle_translate(&ctx, &file, &to, output.as_deref()).await
        }
        Command::Toggle { file, output } => {
            let ctx = crate::args::page::PageContext::load(config.as_deref(), prefs_file);
            crate::args::page::handle_toggle(&ctx, &file, output.as_deref()).await
        }
        Command::Prefs { language, theme } => {
            let ctx = crate::args::page::PageContext::load(config.as_deref(), prefs_file);
            crate::args::prefs::handle_prefs(&ctx, language.as_deref(), theme)
        }
    }
}
