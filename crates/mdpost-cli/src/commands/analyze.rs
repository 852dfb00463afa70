use crate::cli::AnalyzeArgs;
use crate::config::PartialAnalysisConfig;
use crate::error::Result;
use crate::progress::CliProgressHandler;
use mdpost::engine::progress::ProgressReporter;
use mdpost::workflows::analyze::Analyzer;
use std::path::PathBuf;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let partial_config = PartialAnalysisConfig::from_file(&args.config)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let mut trajectory = config.build_trajectory();

    let msd = config.build_msd();
    let outputs: Vec<PathBuf> = msd
        .selected_types()
        .iter()
        .map(|name| msd.output_path(name))
        .collect();

    let mut analyzer = Analyzer::new();
    analyzer.add_compute("msd", Box::new(msd))?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting trajectory analysis...");
    info!("Invoking the analysis workflow...");
    let report = analyzer.run(&mut trajectory, &reporter)?;

    info!(
        "Workflow finished, {} compute(s) evaluated.",
        report.computes_run
    );
    println!(
        "Analyzed {} frame(s) of {} particle(s) across {} type(s).",
        report.frames, report.particles, report.types
    );

    if outputs.is_empty() {
        warn!("No particle types were selected, so no result files were written.");
        println!("Warning: no particle types were selected, so no result files were written.");
    } else {
        for path in &outputs {
            println!("✓ Results written to: {}", path.display());
        }
    }

    Ok(())
}
