use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::info;
use serde::{Deserialize, Serialize};
use sprob_core::{ErrorInfo, SprobError};

use crate::plan::ExperimentPlan;
use crate::runner::{ExperimentReport, StateReport, TierResult};

/// Name of the per-tier summary table inside the output directory.
pub const SUMMARY_FILE: &str = "summary.csv";
/// Name of the run manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Describes the artefacts written for an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentManifest {
    /// Plan that was executed.
    pub plan: ExperimentPlan,
    /// Hash of `plan`.
    pub plan_hash: String,
    /// Whether the estimates can be regenerated bit for bit.
    pub reproducible: bool,
    /// Result files relative to the output directory.
    pub tier_files: Vec<PathBuf>,
    /// Summary table relative to the output directory.
    pub summary_file: PathBuf,
    /// Version of the writing tool.
    pub tool_version: String,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    label: &'a str,
    power: u32,
    sample_count: u64,
    trials: usize,
    mean: f64,
    variance: f64,
    min: f64,
    max: f64,
    reference: Option<f64>,
    mean_abs_error: Option<f64>,
}

/// File name holding the estimates of `label` at tier `power`.
pub fn tier_file_name(power: u32, label: &str) -> String {
    format!("{power}_{label}.out")
}

/// Persists `report` under `out_dir`.
///
/// Writes one `{power}_{label}.out` file per state and tier with one estimate
/// per line, a CSV summary and a JSON manifest.
pub fn write_report(
    out_dir: &Path,
    plan: &ExperimentPlan,
    report: &ExperimentReport,
) -> Result<ExperimentManifest, SprobError> {
    fs::create_dir_all(out_dir).map_err(|err| io_error("output-mkdir", out_dir, err))?;

    let mut tier_files = Vec::new();
    for state in &report.states {
        for tier in &state.tiers {
            let name = PathBuf::from(tier_file_name(tier.power, &state.label));
            write_estimates(&out_dir.join(&name), tier)?;
            tier_files.push(name);
        }
    }
    write_summary(&out_dir.join(SUMMARY_FILE), &report.states)?;

    let manifest = ExperimentManifest {
        plan: plan.clone(),
        plan_hash: report.plan_hash.clone(),
        reproducible: report.reproducible,
        tier_files,
        summary_file: PathBuf::from(SUMMARY_FILE),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let manifest_path = out_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&manifest).map_err(|err| {
        SprobError::Serde(
            ErrorInfo::new("manifest-serialize", err.to_string())
                .with_context("path", manifest_path.display()),
        )
    })?;
    fs::write(&manifest_path, json).map_err(|err| io_error("manifest-write", &manifest_path, err))?;
    info!(
        "wrote {} tier files to {}",
        manifest.tier_files.len(),
        out_dir.display()
    );
    Ok(manifest)
}

fn write_estimates(path: &Path, tier: &TierResult) -> Result<(), SprobError> {
    let file = fs::File::create(path).map_err(|err| io_error("tier-create", path, err))?;
    let mut writer = BufWriter::new(file);
    for estimate in &tier.estimates {
        writeln!(writer, "{estimate}").map_err(|err| io_error("tier-write", path, err))?;
    }
    writer.flush().map_err(|err| io_error("tier-write", path, err))
}

fn write_summary(path: &Path, states: &[StateReport]) -> Result<(), SprobError> {
    let file = fs::File::create(path).map_err(|err| io_error("summary-create", path, err))?;
    let mut writer = WriterBuilder::new().from_writer(BufWriter::new(file));
    for state in states {
        for tier in &state.tiers {
            let stats = &tier.stats;
            writer
                .serialize(SummaryRow {
                    label: &state.label,
                    power: tier.power,
                    sample_count: stats.sample_count,
                    trials: stats.trials,
                    mean: stats.mean,
                    variance: stats.variance,
                    min: stats.min,
                    max: stats.max,
                    reference: stats.reference,
                    mean_abs_error: stats.mean_abs_error,
                })
                .map_err(|err| {
                    SprobError::Serde(
                        ErrorInfo::new("summary-row", err.to_string())
                            .with_context("path", path.display()),
                    )
                })?;
        }
    }
    writer.flush().map_err(|err| io_error("summary-write", path, err))
}

fn io_error(code: &str, path: &Path, err: std::io::Error) -> SprobError {
    SprobError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display()))
}
