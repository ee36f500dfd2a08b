use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use sawmill::app::run;
use sawmill::cli::Args;
use sawmill::config::Config;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    // RUST_LOG, when set, wins over -v
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("\nStarting the saws... Sawmill is cutting: {}\n", args.path);

    let config = Config::from_args(&args).context("invalid configuration")?;

    if let Some(field) = config.filter_field {
        let pattern = config.filter_pattern.as_ref().map_or("", |p| p.as_str());
        println!("Filtering by {}: {}", field, pattern);
    }

    let outcome = run(&config).context("analysis failed")?;

    if config.print {
        println!("{}", outcome.document);
    }

    println!(
        "Cut {} requests into {}",
        outcome.report.total_requests,
        outcome.saved_to.display()
    );
    println!("\nSawmill finished cutting the log! 🪚");

    Ok(())
}
