//! # mdpost Core Library
//!
//! A library for post-processing molecular dynamics trajectories: it reads
//! snapshot files produced by simulation engines into an in-memory trajectory
//! and evaluates time-correlation analyses over them.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Trajectory`,
//!   `Frame`, `TriclinicBox`) and the snapshot file readers (`io`).
//!
//! - **[`engine`]: The Logic Core.** This layer hosts the analysis computes that
//!   consume a loaded trajectory, such as the multi-origin mean squared
//!   displacement, together with their error and progress-reporting machinery.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing layer.
//!   It ties the `engine` and `core` together to execute a complete analysis run
//!   over a trajectory. It provides a simple and powerful entry point for end-users
//!   of the library.

pub mod core;
pub mod engine;
pub mod workflows;
