//! Run the arrears engine over a payment history file
//!
//! Outputs the report as JSON (default) or the combined table rows as CSV

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ley4_arrears::{
    payments::load_input_from_path,
    reference::{load_default_statutory_table, load_statutory_table},
    report::write_rows_csv,
    ArrearsEngine, EngineConfig, Report,
};
use serde_json::json;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "ley4-arrears", version, about = "Retroactive pension arrears under Ley 4 de 1976")]
struct Cli {
    /// Payment history JSON (records of one beneficiary, or a batch)
    #[arg(short = 'r', long = "records")]
    records: PathBuf,

    /// Statutory table CSV (defaults to data/reference/statutory_table.csv,
    /// then to the embedded Colombian table)
    #[arg(long = "reference")]
    reference: Option<PathBuf>,

    /// Engine config JSON
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Last year of the analysis (overrides the config)
    #[arg(long = "end-year")]
    end_year: Option<i32>,

    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    format: OutputFormat,

    /// Output file (stdout when absent)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let table = match &cli.reference {
        Some(path) => load_statutory_table(path)
            .with_context(|| format!("loading reference table {}", path.display()))?,
        None => load_default_statutory_table().context("loading default reference table")?,
    };

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if cli.end_year.is_some() {
        config.end_year = cli.end_year;
    }

    let histories = load_input_from_path(&cli.records)
        .with_context(|| format!("loading payment history {}", cli.records.display()))?
        .into_histories("beneficiary");
    eprintln!("Loaded {} payment histories in {:?}", histories.len(), start.elapsed());

    let engine = ArrearsEngine::new(table, config).context("invalid engine configuration")?;
    let results = engine.generate_batch(&histories);

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|result| match &result.outcome {
                    Ok(report) => json!({
                        "beneficiaryId": result.beneficiary_id,
                        "report": report,
                    }),
                    Err(err) => json!({
                        "beneficiaryId": result.beneficiary_id,
                        "error": err.to_string(),
                    }),
                })
                .collect();
            serde_json::to_writer_pretty(&mut writer, &entries)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let complete: Vec<(&str, &ley4_arrears::ArrearsReport)> = results
                .iter()
                .filter_map(|result| match &result.outcome {
                    Ok(Report::Complete(report)) => Some((result.beneficiary_id.as_str(), report)),
                    _ => None,
                })
                .collect();
            write_rows_csv(&mut writer, &complete)?;
        }
    }
    writer.flush()?;

    // Summary
    eprintln!("\nArrears Summary:");
    for result in &results {
        match &result.outcome {
            Ok(Report::Complete(report)) => eprintln!(
                "  {}: {}-{}, grand total ${:.2}{}",
                result.beneficiary_id,
                report.start_year,
                report.end_year().unwrap_or(report.start_year),
                report.grand_total,
                report
                    .split
                    .as_ref()
                    .map(|s| format!(" (transition {} {})", s.transition.year, s.transition.period_label))
                    .unwrap_or_default(),
            ),
            Ok(Report::NoData { reason }) => {
                eprintln!("  {}: no data ({:?})", result.beneficiary_id, reason)
            }
            Err(err) => eprintln!("  {}: error: {}", result.beneficiary_id, err),
        }
    }
    eprintln!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
