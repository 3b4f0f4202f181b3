use anyhow::Context;
use binary_mlp::{config::ExperimentConfig, experiment};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExperimentConfig::default();
    let report = experiment::run(&config).context("training run failed")?;
    println!("{}", experiment::accuracy_line(report.test_accuracy()?));
    Ok(())
}
