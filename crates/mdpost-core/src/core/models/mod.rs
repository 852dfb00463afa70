//! # Core Models Module
//!
//! This module contains the fundamental data structures used to represent
//! molecular dynamics trajectories in mdpost.
//!
//! ## Overview
//!
//! The models module defines the abstractions for trajectory data as it accumulates
//! over a simulation: periodic simulation cells, per-frame particle records, interned
//! particle type names, and the trajectory container that owns them. These models are
//! designed to:
//!
//! - **Represent time series data** - Chronologically ordered snapshots of particle state
//! - **Tolerate sparse output** - Every per-frame quantity beyond positions is optional
//! - **Maintain stable identity** - Particle slots and type indices never change once assigned
//!
//! ## Key Components
//!
//! - [`cell`] - Triclinic periodic simulation cell geometry
//! - [`frame`] - Single-snapshot particle data with optional fields
//! - [`types`] - Interned registry of particle type names
//! - [`trajectory`] - Lazily loaded container tying sources, frames, and types together

pub mod cell;
pub mod frame;
pub mod trajectory;
pub mod types;
