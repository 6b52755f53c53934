//! processccd-query
//!
//! Selects the raw images of a tract together with the calibration files valid
//! for each of them, and writes one line per image for the processccd stage.

mod cli_types;
mod error;

use std::path::Path;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use drp_appintg_core::{SelectionCriteria, build_query, reshape};
use drp_appintg_db::CalibDb;
use drp_appintg_output::{OutputType, convert_multiple_files_to_lines, output_lines};

use crate::cli_types::Cli;
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    builder.format_target(false);
    if !cli.verbose {
        builder.format_timestamp(None);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<usize, CliError> {
    // Everything that can be rejected without touching the database goes first.
    let output_type: OutputType = cli.qouttype.parse()?;
    let criteria = cli.criteria()?;
    criteria.validate()?;

    let db = match &cli.des_services {
        Some(services) => CalibDb::connect_with(services, cli.section.as_deref())?,
        None => CalibDb::connect(cli.section.as_deref())?,
    };
    let count = write_query_lines(&db, &criteria, &cli.qoutfile, output_type)?;

    if !cli.quiet {
        println!(
            "{} Wrote {} image(s) to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            count.if_supports_color(Stdout, |t| t.bold()),
            cli.qoutfile
                .display()
                .if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(count)
}

/// Run the query for `criteria` on `db` and write one line per image to `path`.
///
/// Returns the number of lines written. Nothing is written if any step fails.
fn write_query_lines(
    db: &CalibDb,
    criteria: &SelectionCriteria,
    path: &Path,
    output_type: OutputType,
) -> Result<usize, CliError> {
    let spec = build_query(criteria, db)?;
    println!("sql = {}", spec.sql);
    log::debug!("binds = {:?}", spec.binds);

    let rows = db.execute(&spec)?;

    let reshaped = reshape(rows, &criteria.raw_fields, &criteria.calib_fields)?;
    let labels = reshaped.labels.to_vec();
    let lines = convert_multiple_files_to_lines(reshaped.flatten()?, &labels, 1)?;
    output_lines(path, &lines, output_type)?;

    log::info!("File labels: {}", labels.join(", "));
    if lines.is_empty() {
        log::warn!("No images matched tract {}", criteria.tract);
    }
    Ok(lines.len())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
