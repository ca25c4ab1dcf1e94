/*!
 * WiFi dictionary attack CLI
 *
 * Thin shell around the search engine: disclaimer banner, argument
 * handling, network listing, result display and the optional result
 * file. All credential testing happens in the library.
 */

mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;

use cli::Args;
use wifi_brute::{platform, search, SearchOptions, SearchResult, TerminalReporter, Wordlist};

fn print_banner() {
    eprintln!("{}", "====================================".cyan());
    eprintln!("{}", "WiFi Brute Forcer - Educational Research Tool".cyan().bold());
    eprintln!("{}", "====================================".cyan());
    eprintln!("{}", "WARNING: This tool is for educational purposes only.".yellow());
    eprintln!("{}", "Ensure you have proper authorization before use.".yellow());
    eprintln!("{}", "Unauthorized use may violate laws.".yellow());
    eprintln!("{}", "====================================".cyan());
    eprintln!();
}

fn list_networks() -> Result<()> {
    let mut probe = platform::system_probe();
    probe
        .initialize()
        .context("could not initialize WiFi interface")?;
    let networks = probe.list_networks().context("network scan failed")?;

    if networks.is_empty() {
        println!("No available WiFi networks found");
    } else {
        println!("Available WiFi networks:");
        println!("=========================");
        for network in networks {
            println!("- {}", network);
        }
    }
    Ok(())
}

fn save_result(path: &Path, ssid: &str, password: &str) -> Result<()> {
    let body = format!(
        "SSID: {}\nPassword: {}\nFound on: {}\nNOTE: stored in plain text; handle accordingly.\n",
        ssid,
        password,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
    );
    std::fs::write(path, body)
        .with_context(|| format!("failed to write result to {}", path.display()))?;
    println!("Result saved to {}", path.display());
    Ok(())
}

fn print_summary(result: &SearchResult) {
    let elapsed = result.duration.as_secs_f64();
    let rate = if elapsed > 0.0 {
        result.attempts as f64 / elapsed
    } else {
        0.0
    };
    println!();
    println!("📊 Statistics:");
    println!("   Total attempts: {}", result.attempts);
    println!("   Time elapsed: {:.2}s", elapsed);
    println!("   Average rate: {:.1} passwords/second", rate);
}

fn main() -> Result<()> {
    let args = Args::parse();

    print_banner();

    if args.list {
        return list_networks();
    }

    let Some(ssid) = args.ssid else {
        bail!("SSID is required (-s/--ssid)");
    };
    let Some(dictionary) = args.dictionary else {
        bail!("dictionary path is required (-d/--dictionary)");
    };

    let wordlist = Wordlist::from_path(&dictionary)
        .with_context(|| format!("could not load dictionary {}", dictionary.display()))?;

    println!("Loaded {} passwords from dictionary", wordlist.len());
    println!("Target SSID: {}", ssid);
    println!(
        "Starting brute force attack with {} threads...",
        args.threads
    );
    println!("====================================");

    let options = SearchOptions {
        target: ssid.clone(),
        timeout: Duration::from_millis(args.timeout),
        workers: args.threads,
    };

    let reporter = TerminalReporter::new(wordlist.len() as u64);
    let result = search(&options, &wordlist, platform::system_probe, &reporter)?;
    reporter.finish();

    print_summary(&result);
    println!("====================================");

    match &result.credential {
        Some(password) => {
            println!(
                "{} Found password: {}",
                "SUCCESS!".green().bold(),
                password.green()
            );
            if let Some(output) = &args.output {
                save_result(output, &ssid, password)?;
            }
            Ok(())
        }
        None => {
            println!(
                "{} Password not found in dictionary",
                "FAILED!".red().bold()
            );
            std::process::exit(1);
        }
    }
}
