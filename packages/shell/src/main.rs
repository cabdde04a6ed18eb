use std::path::PathBuf;

use clap::Parser;
use eekv_shell::config::{Overrides, ShellConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// eekv - EEPROM key-value store shell
#[derive(Parser, Debug)]
#[command(name = "eekv")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EEPROM image file (overrides EEKV_STORE)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Serial device to serve instead of stdin/stdout
    #[arg(long)]
    device: Option<PathBuf>,

    /// Serial bit rate
    #[arg(long)]
    baud: Option<u32>,

    /// Input buffer size in bytes
    #[arg(long)]
    line_capacity: Option<usize>,

    /// Disable ANSI colour in replies
    #[arg(long)]
    no_color: bool,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    // Logs go to stderr so they never mix with the session on stdout.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let overrides = Overrides {
        store: args.store,
        device: args.device,
        baud: args.baud,
        line_capacity: args.line_capacity,
        no_color: args.no_color,
    };

    let result = ShellConfig::resolve(args.config.as_deref(), overrides)
        .and_then(|config| eekv_shell::run(&config));

    if let Err(e) = result {
        tracing::error!(error = %e, "session failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
