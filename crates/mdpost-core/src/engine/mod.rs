//! # Engine Module
//!
//! This module implements the analysis engine of mdpost: the computes that
//! consume a loaded trajectory and turn it into statistical observables.
//!
//! ## Overview
//!
//! A compute walks the frame sequence of a [`Trajectory`](crate::core::models::trajectory::Trajectory),
//! accumulates a per-type observable, and writes one result file per selected
//! particle type. The engine layer owns the compute trait and its concrete
//! implementations, the engine error taxonomy, and the progress-reporting
//! machinery that lets callers surface long evaluations to a user interface.
//!
//! ## Architecture
//!
//! - **Computes** ([`computes`]) - The [`Compute`](computes::Compute) trait and the observables implementing it
//! - **Progress Monitoring** ([`progress`]) - Progress reporting and user feedback mechanisms
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation
//!
//! ## Execution Model
//!
//! Evaluation is single-threaded and synchronous: a compute borrows the
//! trajectory, triggers its lazy read if needed, and runs to completion or
//! fails with a typed error. Computes never write back into the trajectory.

pub mod computes;
pub mod error;
pub mod progress;
