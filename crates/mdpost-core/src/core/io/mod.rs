//! Provides input functionality for trajectory file formats.
//!
//! This module contains the snapshot parsers for the supported on-disk
//! trajectory formats. Each format implements the [`TrajectoryReader`]
//! capability trait, which turns one opened source into an ordered sequence
//! of [`Frame`]s; a `Trajectory` owns one boxed reader and applies it to
//! every attached source path in order.

pub mod gro;
pub mod xyz;

use super::models::frame::Frame;
use gro::GroError;
use std::io::BufRead;
use thiserror::Error;
use xyz::XyzError;

/// Represents errors that can occur while reading a trajectory source.
///
/// Wraps the per-format parse errors behind one closed type so callers can
/// hold readers of different formats behind a single trait object. I/O
/// failures surface through the format variants, which carry them alongside
/// their parse errors.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The source violated the fixed-column GRO format.
    #[error(transparent)]
    Gro(#[from] GroError),
    /// The source violated the XYZ format.
    #[error(transparent)]
    Xyz(#[from] XyzError),
}

/// Defines the interface for parsing a trajectory file format.
///
/// Implementors parse every concatenated snapshot from one opened source into
/// frames, in file order. Readers are stateless between sources; any format
/// configuration (such as column widths) is fixed at construction.
pub trait TrajectoryReader {
    /// Returns the short name of the format, for diagnostics.
    fn format(&self) -> &'static str;

    /// Parses all snapshots from `input` until end-of-input.
    ///
    /// # Arguments
    ///
    /// * `input` - The buffered source to parse.
    ///
    /// # Return
    ///
    /// Returns the parsed frames in the order they appear in the source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source violates the format or an I/O
    /// operation fails; the whole read is aborted at the first violation.
    fn read_frames(&self, input: &mut dyn BufRead) -> Result<Vec<Frame>, ReadError>;
}
