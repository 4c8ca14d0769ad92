use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use sprob_core::{Energy, PredicateDef};
use sprob_exp::to_canonical_json_bytes;
use sprob_mc::{EstimateReport, Estimator, SampleRange, SeedSource};

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Predicate definition as inline JSON.
    #[arg(long, conflicts_with = "predicate_file", required_unless_present = "predicate_file")]
    pub predicate: Option<String>,
    /// Predicate definition file (YAML or JSON).
    #[arg(long)]
    pub predicate_file: Option<PathBuf>,
    /// Inclusive lower bound of the sampling range.
    #[arg(long, allow_hyphen_values = true)]
    pub lo: Energy,
    /// Inclusive upper bound of the sampling range.
    #[arg(long, allow_hyphen_values = true)]
    pub hi: Energy,
    /// Number of draws.
    #[arg(long)]
    pub samples: u64,
    /// Generator seed; drawn from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct EstimateOutput {
    lo: Energy,
    hi: Energy,
    seed: u64,
    leaves: usize,
    report: EstimateReport,
}

pub fn run(args: &EstimateArgs) -> Result<(), Box<dyn Error>> {
    let definition = load_definition(args)?;
    let predicate = definition.build()?;
    let seed = match args.seed {
        Some(seed) => seed,
        None => SeedSource::Entropy.sequence().next_seed()?,
    };
    let estimator = Estimator::new(SampleRange::new(args.lo, args.hi)?);
    let report = estimator.estimate_report(&predicate, args.samples, seed)?;
    let output = EstimateOutput {
        lo: args.lo,
        hi: args.hi,
        seed,
        leaves: predicate.leaf_count(),
        report,
    };
    let json = to_canonical_json_bytes(&output)?;
    println!("{}", String::from_utf8(json)?);
    Ok(())
}

fn load_definition(args: &EstimateArgs) -> Result<PredicateDef, Box<dyn Error>> {
    if let Some(inline) = &args.predicate {
        return Ok(serde_json::from_str(inline)?);
    }
    let Some(path) = &args.predicate_file else {
        return Err("either --predicate or --predicate-file is required".into());
    };
    let text = fs::read_to_string(path)?;
    // YAML is a superset of JSON, so one parser covers both formats.
    Ok(serde_yaml::from_str(&text)?)
}
