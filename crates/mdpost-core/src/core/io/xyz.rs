use super::{ReadError, TrajectoryReader};
use crate::core::models::frame::Frame;
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: XyzParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Particle count line is not a non-negative integer (value: '{value}')")]
    InvalidCount { value: String },
    #[error("Snapshot ended before its comment line")]
    MissingComment,
    #[error("Particle line needs at least four whitespace-separated fields (found {found})")]
    TooFewFields { found: usize },
    #[error("Coordinate is not numeric (value: '{value}')")]
    InvalidCoordinate { value: String },
    #[error("Snapshot ended after {read} of {expected} particle lines")]
    MissingParticles { expected: usize, read: usize },
}

/// Reads the whitespace-separated XYZ snapshot format.
///
/// Each snapshot is a particle count line, a free-form comment line, and N
/// lines of `name x y z`. XYZ carries neither a simulation time nor a box,
/// so frames parsed from it leave both unset; velocities stay zero.
#[derive(Debug, Default)]
pub struct XyzReader;

impl XyzReader {
    pub fn new() -> Self {
        Self
    }

    fn read_all(&self, input: &mut dyn BufRead) -> Result<Vec<Frame>, XyzError> {
        let mut frames = Vec::new();
        let mut line_num = 0;
        let mut lines = input.lines();

        loop {
            let count_line = loop {
                match lines.next() {
                    None => return Ok(frames),
                    Some(line) => {
                        let line = line?;
                        line_num += 1;
                        if !line.trim().is_empty() {
                            break line;
                        }
                    }
                }
            };

            // Only the first token is the count; the rest of the line is free.
            let count_token = count_line.split_whitespace().next().unwrap_or("");
            let n: usize = count_token.parse().map_err(|_| XyzError::Parse {
                line: line_num,
                kind: XyzParseErrorKind::InvalidCount {
                    value: count_token.to_string(),
                },
            })?;

            if lines.next().transpose()?.is_none() {
                return Err(XyzError::Parse {
                    line: line_num,
                    kind: XyzParseErrorKind::MissingComment,
                });
            }
            line_num += 1;

            let mut frame = Frame::new(n);
            for i in 0..n {
                let Some(line) = lines.next().transpose()? else {
                    return Err(XyzError::Parse {
                        line: line_num,
                        kind: XyzParseErrorKind::MissingParticles {
                            expected: n,
                            read: i,
                        },
                    });
                };
                line_num += 1;

                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 4 {
                    return Err(XyzError::Parse {
                        line: line_num,
                        kind: XyzParseErrorKind::TooFewFields { found: parts.len() },
                    });
                }

                let mut coords = [0.0; 3];
                for (k, coord) in coords.iter_mut().enumerate() {
                    *coord = parts[k + 1].parse().map_err(|_| XyzError::Parse {
                        line: line_num,
                        kind: XyzParseErrorKind::InvalidCoordinate {
                            value: parts[k + 1].to_string(),
                        },
                    })?;
                }

                if !parts[0].is_empty() {
                    frame.set_name(i, parts[0]);
                }
                frame.set_position(i, Point3::new(coords[0], coords[1], coords[2]));
            }

            frames.push(frame);
        }
    }
}

impl TrajectoryReader for XyzReader {
    fn format(&self) -> &'static str {
        "xyz"
    }

    fn read_frames(&self, input: &mut dyn BufRead) -> Result<Vec<Frame>, ReadError> {
        Ok(self.read_all(input)?)
    }
}
