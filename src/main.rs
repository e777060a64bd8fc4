//! FORTRESS Framework Excel to JSON converter
//!
//! Reads `Fortress_Framework_v9.xlsx` from the working directory and writes
//! `fortressframework.json`. Paths are fixed; log verbosity follows `RUST_LOG`.

use std::panic;

use anyhow::Result;
use fortressjson::{ConversionReport, ConvertError, ExtractorBuilder, FrameworkItem};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

const INPUT_PATH: &str = "Fortress_Framework_v9.xlsx";
const OUTPUT_PATH: &str = "fortressframework.json";

/// Index of the second sample shown in the summary
const SECOND_SAMPLE_INDEX: usize = 100;

/// Maximum characters of the finding shown in the summary
const FINDING_PREVIEW_CHARS: usize = 80;

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    println!("FORTRESS Framework Excel to JSON Converter");
    println!("{}", "=".repeat(60));

    match panic::catch_unwind(run) {
        Ok(Ok(report)) => print_summary(&report),
        Ok(Err(e)) => handle_error(e),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            println!("Error: {}", message);
            error!(panic = %message, "conversion aborted by panic");
        }
    }
}

fn run() -> Result<ConversionReport> {
    let extractor = ExtractorBuilder::new().build()?;

    println!("Reading {}...", INPUT_PATH);
    let report = extractor.convert(INPUT_PATH, OUTPUT_PATH)?;
    Ok(report)
}

fn print_summary(report: &ConversionReport) {
    let labels: Vec<&str> = report.header.labels.iter().take(5).map(String::as_str).collect();

    println!("   Sheet: {}", report.sheet.name);
    println!(
        "   Rows: {}, Columns: {}",
        report.sheet.max_row, report.sheet.max_column
    );
    println!("   Header row: {}", report.header.row);
    println!("   Headers: {:?}...", labels);
    println!("   Extracted {} items", report.items.len());
    println!("Success! Created {}", report.output.display());
    println!("   Total items: {}", report.items.len());

    if let Some(first) = report.items.first() {
        println!("\nSample item (first):");
        print_item(first);
        println!("   Tactic: {}", first.tactic);
        println!("   Technique: {}", first.technique);
    }

    if let Some(sample) = report.items.get(SECOND_SAMPLE_INDEX) {
        println!("\nSample item (#{}):", SECOND_SAMPLE_INDEX + 1);
        print_item(sample);
        println!("   Finding: {}", preview(&sample.finding));
    }

    println!("{}", "=".repeat(60));
    println!("Conversion complete! {} items exported.", report.items.len());
    println!("\nOutput file: {}", report.output.display());
}

fn print_item(item: &FrameworkItem) {
    println!("   Item Number: {}", item.item_number);
    println!("   Item Description: {}", item.item_description);
}

/// Truncates by characters so multi-byte text is never split
fn preview(text: &str) -> String {
    if text.chars().count() > FINDING_PREVIEW_CHARS {
        let head: String = text.chars().take(FINDING_PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

fn handle_error(err: anyhow::Error) {
    match err.downcast_ref::<ConvertError>() {
        Some(ConvertError::NotFound(path)) => {
            println!("Error: {} not found", path.display());
            println!("   Make sure the Excel file is in the current directory");
        }
        Some(ConvertError::Load(msg)) => {
            println!("Error: {} could not be read as a workbook: {}", INPUT_PATH, msg);
            error!("{:?}", err);
        }
        Some(e) => {
            println!("Error: {}", e);
            error!("{:?}", err);
        }
        None => {
            println!("Error: {}", err);
            error!("{:?}", err);
        }
    }
}
