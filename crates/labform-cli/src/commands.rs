//! Subcommand implementations.

use anyhow::{Context, Result};
use labform_core::batch::BATCH_SCHEMA_JSON;
use labform_core::{BatchReport, InvestigationBatch, InvestigationValidator, ValidatorConfig};
use tracing::info;

use crate::cli::{OutputFormat, ValidateArgs};

pub fn run_validate(args: &ValidateArgs) -> Result<BatchReport> {
    let mut config = match &args.config {
        Some(path) => ValidatorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ValidatorConfig::default(),
    };
    if args.community {
        config.community = true;
    }

    let mut batch = InvestigationBatch::from_file(&args.file)
        .with_context(|| format!("failed to load batch {}", args.file.display()))?;
    if args.lab_technician {
        batch.lab_technician = true;
    }

    info!(
        records = batch.len(),
        lab_technician = batch.lab_technician,
        community = config.community,
        "validating batch"
    );

    let validator = InvestigationValidator::from_config(&config);
    let report = validator.validate_batch(&mut batch)?;
    Ok(report)
}

pub fn run_schema() {
    println!("{}", BATCH_SCHEMA_JSON.trim_end());
}

pub fn print_report(report: &BatchReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(report).context("failed to render report")?;
            println!("{}", rendered);
        }
        OutputFormat::Text => print!("{}", render_text(report)),
    }
    Ok(())
}

fn render_text(report: &BatchReport) -> String {
    let mut out = String::new();
    for record in &report.records {
        let status = if record.error_flag { "ok  " } else { "FAIL" };
        let id = record.record_id.as_deref().unwrap_or("-");
        out.push_str(&format!("{} {} [{}]", status, record.test_name, id));
        if let Some(message) = &record.error_message {
            out.push_str(&format!(": {}", message));
        }
        out.push('\n');
    }
    let verdict = if report.valid { "VALID" } else { "INVALID" };
    out.push_str(&format!(
        "{} ({} records, {} flagged)\n",
        verdict,
        report.records.len(),
        report.flagged().count()
    ));
    out
}
