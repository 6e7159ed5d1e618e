use crate::infra::{load_reference_table, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use vaccine_checker::config::AppConfig;
use vaccine_checker::error::AppError;
use vaccine_checker::screening::{
    AgeBand, ClassifiedVaccine, ScreeningOutcome, ScreeningReport, StatusType,
};
use vaccine_checker::telemetry;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) birth_date: String,
    /// Reference date for the age calculation (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Vaccine reference table (.json or .csv); overrides APP_VACCINE_TABLE
    #[arg(long)]
    pub(crate) table: Option<PathBuf>,
    /// Print the result as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        birth_date,
        today,
        table,
        json,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(table) = table {
        config.reference_table.path = Some(table);
    }

    telemetry::init(&config.telemetry)?;

    let table = load_reference_table(config.reference_table.path.as_deref())?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = ScreeningOutcome::evaluate(&birth_date, today, &table);

    if json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("Screening payload unavailable: {err}"),
        }
    } else {
        println!("{}", render_outcome(&outcome));
    }

    Ok(())
}

pub(crate) fn run_bands() {
    println!("Age bands");
    for band in AgeBand::ordered() {
        println!("- {}", band.label());
    }
}

pub(crate) fn render_outcome(outcome: &ScreeningOutcome) -> String {
    match outcome {
        ScreeningOutcome::Ready(report) => render_report(report),
        ScreeningOutcome::InvalidDate { message }
        | ScreeningOutcome::BandUnavailable { message } => {
            format!("Exact age: —\nAge band: —\n\n{message}")
        }
    }
}

fn render_report(report: &ScreeningReport) -> String {
    let mut lines = vec![
        format!(
            "Date of birth {} (evaluated {})",
            report.birth_date, report.reference_date
        ),
        format!("Exact age: {}", report.age_display),
        format!("Age band: {}", report.band_label),
        String::new(),
        "Recommended labs".to_string(),
    ];

    match report.labs_note {
        Some(note) => lines.push(format!("- {note}")),
        None => {
            for lab in &report.labs {
                lines.push(format!("- {}: {}", lab.test_name, lab.rationale));
            }
        }
    }

    push_group(
        &mut lines,
        &format!("YES ({})", StatusType::Required.label()),
        &report.vaccines.required,
        Some("No required vaccines in this band."),
    );
    push_group(
        &mut lines,
        &format!("NO ({})", StatusType::NotRequired.label()),
        &report.vaccines.not_required,
        Some("No \u{201c}not required\u{201d} items in this band."),
    );
    push_group(
        &mut lines,
        StatusType::SometimesOrInfo.label(),
        &report.vaccines.other,
        None,
    );

    lines.join("\n")
}

fn push_group(
    lines: &mut Vec<String>,
    heading: &str,
    items: &[ClassifiedVaccine],
    empty_note: Option<&str>,
) {
    if items.is_empty() {
        if let Some(note) = empty_note {
            lines.push(format!("\n{heading} (0)"));
            lines.push(format!("- {note}"));
        }
        return;
    }

    lines.push(format!("\n{heading} ({})", items.len()));
    for item in items {
        let cell = if item.cell_text.trim().is_empty() {
            "—"
        } else {
            item.cell_text.as_str()
        };
        lines.push(format!("- [{}] {}: {}", item.badge(), item.vaccine_name, cell));
    }
}
