use clap::Parser;
use std::path::PathBuf;
use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "beatlead-runner")]
#[command(about = "Find artist leads through type-beat producers")]
#[command(version)]
struct Cli {
    /// Config file to run
    config: PathBuf,

    /// Run in headless mode (overrides config)
    #[arg(long)]
    headless: bool,

    /// Set a parameter (can be used multiple times)
    #[arg(short = 'P', long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,

    /// Output file (overrides config, supports {timestamp})
    #[arg(short, long)]
    output: Option<String>,

    /// Keep only leads with an Instagram profile
    #[arg(long)]
    require_instagram: bool,

    /// Verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Validate config without running
    #[arg(long)]
    check: bool,

    /// Quiet mode (only errors)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> beatlead_runner::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let params = beatlead_runner::Params::from_args(&cli.params)?;
    let mut config = beatlead_runner::Config::load_with_params(&cli.config, &params)?;

    if cli.headless {
        config.browser.headless = true;
    }
    if cli.require_instagram {
        config.search.require_instagram = true;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    config.validate()?;

    if cli.check {
        println!("Config valid: {}", config.name);
        println!("  Query: {}", config.search.query());
        println!(
            "  Producers: {}, artists per producer: {}",
            config.search.producers, config.search.artists_per_producer
        );
        println!("  Output: {}", config.output.path);
        if !config.params.is_empty() {
            println!("  Parameters: {}", config.params.len());
            for (name, def) in &config.params {
                let req = if def.required { " (required)" } else { "" };
                let desc = def.description.as_deref().unwrap_or("");
                println!("    - {}{}: {}", name, req, desc);
            }
        }
        if let Some(retry) = config.retry() {
            println!("  Retry attempts: {}", retry.attempts);
        }
        return Ok(());
    }

    println!("Running: {}", config.name);

    let mut source = beatlead_runner::BrowserSource::launch(&config).await?;
    let result = beatlead_runner::collect_leads(&mut source, &config.search).await;
    let closed = source.close().await;

    let report = match settle(result, closed) {
        Ok(report) => report,
        Err(e) => {
            println!();
            println!("✗ Failed");
            println!("  Error: {}", e);
            std::process::exit(1);
        }
    };

    let path = beatlead_runner::resolve_output_path(&config.output.path);
    beatlead_runner::write_leads(&path, &report.leads, config.output.pretty)?;

    println!();
    println!("✓ Found {} artists", report.leads.len());
    println!("  Producers: {}", report.producers.join(", "));
    if report.skipped > 0 {
        println!("  Skipped profiles: {}", report.skipped);
    }
    if report.filtered > 0 {
        println!("  Without Instagram: {}", report.filtered);
    }
    println!("  Saved to: {}", path.display());

    Ok(())
}

/// The run's own outcome wins; a failed browser shutdown is only logged.
fn settle<T>(
    result: beatlead_runner::Result<T>,
    closed: beatlead_runner::Result<()>,
) -> beatlead_runner::Result<T> {
    if let Err(e) = closed {
        warn!("Failed to close browser: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatlead_runner::Error;

    #[test]
    fn close_failure_keeps_run_error() {
        let out: beatlead_runner::Result<u32> = settle(
            Err(Error::Page("search failed".into())),
            Err(Error::Page("close failed".into())),
        );
        match out {
            Err(Error::Page(msg)) => assert_eq!(msg, "search failed"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn close_failure_keeps_run_result() {
        let out = settle(Ok(7), Err(Error::Page("close failed".into())));
        assert_eq!(out.unwrap(), 7);
    }
}
