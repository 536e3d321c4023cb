//! The `convert` subcommand: CLI args -> conversion options -> report.

use anyhow::{Context, Result};
use tracing::{info, warn};

use riverscope_convert::{ConvertOptions, StepStatus, convert};
use riverscope_frame::IndexOrder;

use crate::cli::ConvertArgs;

pub fn run(args: ConvertArgs) -> Result<()> {
    let options = build_options(&args);

    let report = convert(&args.input, &args.out, &options)
        .with_context(|| format!("failed to convert: {}", args.input.display()))?;

    for outcome in &report.steps {
        match &outcome.status {
            StepStatus::Written { skipped, .. } if !skipped.is_empty() => {
                let names: Vec<&str> = skipped.iter().map(|s| s.name.as_str()).collect();
                info!(step = outcome.step, skipped = ?names, "variables excluded by shape");
            }
            StepStatus::Written { .. } => {}
            StepStatus::Failed { reason } => {
                warn!(step = outcome.step, %reason, "step failed");
            }
        }
    }

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        std::fs::write(report_path, json)
            .with_context(|| format!("failed to write report: {}", report_path.display()))?;
        info!(path = %report_path.display(), "report written");
    }

    println!(
        "{} of {} step(s) written to {}",
        report.n_written(),
        report.steps.len(),
        report.output_dir.display()
    );
    if report.has_failures() {
        anyhow::bail!("{} step(s) failed", report.n_failed());
    }
    Ok(())
}

fn build_options(args: &ConvertArgs) -> ConvertOptions {
    let order = if args.c_order {
        IndexOrder::RowMajor
    } else {
        IndexOrder::ColumnMajor
    };

    ConvertOptions::default()
        .with_case_name(&args.case)
        .with_zone_path(&args.zone)
        .with_vars_keep(parse_vars(&args.vars))
        .with_step_from(args.from_step)
        .with_step_to(args.to_step)
        .with_step_skip(args.skip)
        .with_index_order(order)
}

/// Split the comma-separated `--vars` flag; an empty flag keeps all
/// variables.
fn parse_vars(raw: &str) -> Option<Vec<String>> {
    let vars: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    (!vars.is_empty()).then_some(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vars_flag_keeps_everything() {
        assert_eq!(parse_vars(""), None);
        assert_eq!(parse_vars(" , "), None);
    }

    #[test]
    fn vars_flag_is_split_and_trimmed() {
        assert_eq!(
            parse_vars("ZB, ZS ,HS"),
            Some(vec!["ZB".to_string(), "ZS".to_string(), "HS".to_string()])
        );
    }
}
