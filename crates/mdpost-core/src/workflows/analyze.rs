use crate::core::models::trajectory::Trajectory;
use crate::engine::computes::Compute;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{info, instrument};

/// Summary of a completed analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Number of frames the trajectory supplied.
    pub frames: usize,
    /// Particle count shared by all frames.
    pub particles: usize,
    /// Number of distinct particle types registered during the read.
    pub types: usize,
    /// Number of computes evaluated.
    pub computes_run: usize,
}

/// Drives a set of named computes over one trajectory.
///
/// Computes register under caller-chosen unique names and evaluate in
/// registration order. The analyzer owns its computes but never the
/// trajectory, which is loaned per run; several analyzers may therefore
/// observe the same trajectory in turn.
#[derive(Default)]
pub struct Analyzer {
    computes: Vec<(String, Box<dyn Compute>)>,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a compute under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DuplicateCompute`] if the name is taken.
    pub fn add_compute(
        &mut self,
        name: &str,
        compute: Box<dyn Compute>,
    ) -> Result<(), EngineError> {
        if self.computes.iter().any(|(taken, _)| taken == name) {
            return Err(EngineError::DuplicateCompute {
                name: name.to_string(),
            });
        }
        self.computes.push((name.to_string(), compute));
        Ok(())
    }

    /// Removes and returns the compute registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownCompute`] if no compute has that name.
    pub fn remove_compute(&mut self, name: &str) -> Result<Box<dyn Compute>, EngineError> {
        match self.computes.iter().position(|(taken, _)| taken == name) {
            Some(index) => Ok(self.computes.remove(index).1),
            None => Err(EngineError::UnknownCompute {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the registered compute names in evaluation order.
    pub fn compute_names(&self) -> Vec<&str> {
        self.computes.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Loads the trajectory and evaluates every registered compute over it.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the trajectory read or by a
    /// compute; later computes are not evaluated after a failure.
    #[instrument(skip_all, name = "analysis_workflow")]
    pub fn run(
        &self,
        trajectory: &mut Trajectory,
        reporter: &ProgressReporter,
    ) -> Result<AnalysisReport, EngineError> {
        reporter.report(Progress::PhaseStart {
            name: "Loading trajectory",
        });
        let frames = trajectory.frames()?.len();
        info!(
            frames,
            particles = trajectory.n_particles(),
            types = trajectory.num_types(),
            "Trajectory ready for analysis"
        );
        reporter.report(Progress::PhaseFinish);

        reporter.report(Progress::PhaseStart {
            name: "Evaluating computes",
        });
        for (name, compute) in &self.computes {
            info!(compute = name.as_str(), kind = compute.name(), "Evaluating compute");
            compute.evaluate(trajectory, reporter)?;
        }
        reporter.report(Progress::PhaseFinish);

        let report = AnalysisReport {
            frames,
            particles: trajectory.n_particles(),
            types: trajectory.num_types(),
            computes_run: self.computes.len(),
        };
        info!(computes = report.computes_run, "Analysis complete");
        Ok(report)
    }
}
