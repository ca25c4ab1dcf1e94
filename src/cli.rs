use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
///
/// `--ssid` and `--dictionary` are required unless `--list` is given;
/// that conditional check lives in main so list mode stays a bare
/// `wifi-brute -l`.
#[derive(Parser)]
#[command(name = "wifi-brute")]
#[command(version = "1.0.0")]
#[command(about = "Parallel WiFi dictionary attack - Educational use only", long_about = None)]
pub struct Args {
    /// List available WiFi networks and exit
    #[arg(short, long)]
    pub list: bool,

    /// Target WiFi SSID
    #[arg(short, long)]
    pub ssid: Option<String>,

    /// Path to the password dictionary file, one candidate per line
    #[arg(short, long)]
    pub dictionary: Option<PathBuf>,

    /// Connection timeout in milliseconds
    #[arg(short, long, default_value_t = 5000)]
    pub timeout: u64,

    /// Number of worker threads (1-16)
    #[arg(short = 'c', long, default_value_t = 4)]
    pub threads: usize,

    /// Save the result to this file when a password is found
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
