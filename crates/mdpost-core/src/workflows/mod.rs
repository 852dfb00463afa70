//! # Workflows Module
//!
//! This module provides the high-level entry point that orchestrates a
//! complete trajectory analysis run in mdpost.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of the library. The analysis
//! workflow collects a set of named computes, loads the trajectory once, and
//! evaluates every compute over it in registration order, reporting progress
//! along the way.
//!
//! ## Architecture
//!
//! - **Analysis Workflow** ([`analyze`]) - Named compute registration plus the
//!   load-then-evaluate run loop.

pub mod analyze;
