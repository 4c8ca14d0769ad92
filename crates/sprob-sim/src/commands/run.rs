use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use sprob_exp::{run_experiment, write_report, ExperimentPlan};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML plan; the classic ordered/random experiment when omitted.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Directory receiving the tier files, summary and manifest.
    #[arg(long)]
    pub out: PathBuf,
    /// Override the number of trials per tier.
    #[arg(long)]
    pub trials: Option<usize>,
    /// Override the largest tier exponent.
    #[arg(long)]
    pub max_power: Option<u32>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = match &args.plan {
        Some(path) => ExperimentPlan::load(path)?,
        None => ExperimentPlan::reference(),
    };
    if let Some(trials) = args.trials {
        plan.trials = trials;
    }
    if let Some(max_power) = args.max_power {
        plan.max_power = max_power;
    }
    let report = run_experiment(&plan)?;
    let manifest = write_report(&args.out, &plan, &report)?;
    info!("plan {} finished", manifest.plan_hash);
    println!("{}", args.out.join(sprob_exp::MANIFEST_FILE).display());
    Ok(())
}
