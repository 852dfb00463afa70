//! # Computes Module
//!
//! Statistical observables evaluated over a loaded trajectory.
//!
//! Each observable implements the [`Compute`] capability trait: it borrows a
//! trajectory for one evaluation, accumulates its statistic over the frame
//! sequence, and writes one result file per selected particle type. Computes
//! keep no reference to the trajectory between evaluations, so any number of
//! them can observe the same one.

pub mod msd;

use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::models::trajectory::Trajectory;

/// Defines the interface for a trajectory observable.
pub trait Compute {
    /// Returns the short kind label of this observable, for diagnostics.
    fn name(&self) -> &'static str;

    /// Evaluates the observable over the trajectory and writes its result
    /// files.
    ///
    /// The trajectory is borrowed mutably only so the evaluation can trigger
    /// its lazy read; the frame data itself is never modified.
    ///
    /// # Errors
    ///
    /// Returns an error if the trajectory cannot supply the data the
    /// observable needs or a result file cannot be written.
    fn evaluate(
        &self,
        trajectory: &mut Trajectory,
        reporter: &ProgressReporter,
    ) -> Result<(), EngineError>;
}
