//! # Core Module
//!
//! This module provides the fundamental building blocks for trajectory
//! post-processing in mdpost, serving as the data foundation of the library.
//!
//! ## Overview
//!
//! The core module implements the data structures and parsers required to turn
//! simulation output files into an analyzable in-memory representation. It
//! deliberately contains no analysis logic; computes live in the `engine` layer
//! and borrow the structures defined here.
//!
//! ## Architecture
//!
//! The module is organized into specialized submodules:
//!
//! - **Trajectory Representation** ([`models`]) - Data structures for frames, simulation cells, particle types, and whole trajectories
//! - **File I/O** ([`io`]) - Snapshot readers for the supported on-disk formats
//!
//! ## Design Principles
//!
//! - **Lazy loading** - Trajectories defer file parsing until frame data is first requested
//! - **Stable identity** - A particle is identified by its slot index, constant across frames
//! - **Fail-fast parsing** - Structural format violations abort a read with a typed error

pub mod io;
pub mod models;
