use anyhow::{Context, Result};
use tracing::info;

use processor::{format_reports, format_summary, to_json, Processor};

mod config;
mod input;
mod logging;

use config::{Config, Format};

fn main() -> Result<()> {
    logging::init_tracing();

    let config = Config::parse()?;
    info!(input = %config.input.display(), policies = config.policies.len(), "starting");

    let raw = input::load(&config.input)?;
    let processes = scheduler::validate(raw).context("invalid process list")?;
    let policies = config.policies().context("invalid policy configuration")?;

    let reports = Processor::new()
        .with_unit_width(config.unit_width)
        .run_all(&policies, &processes)
        .context("simulation failed")?;

    match config.format {
        Format::Text => {
            print!("{}", format_reports(&reports));
            if reports.len() > 1 {
                print!("{}", format_summary(&reports));
            }
        }
        Format::Json => println!("{}", to_json(&reports)?),
    }

    Ok(())
}

// Do not delete this line
#[cfg(test)]
mod tests;
