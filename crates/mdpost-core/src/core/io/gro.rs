use super::{ReadError, TrajectoryReader};
use crate::core::models::cell::TriclinicBox;
use crate::core::models::frame::Frame;
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead, Lines};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GroError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: GroParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum GroParseErrorKind {
    #[error("Comment line must carry the simulation time as 't=<value>'")]
    MissingTime,
    #[error("Time value after 't=' is not numeric (value: '{value}')")]
    InvalidTime { value: String },
    #[error("Particle count line is not a non-negative integer (value: '{value}')")]
    InvalidCount { value: String },
    #[error("Particle line is shorter than the fixed-column minimum of {minimum} chars")]
    LineTooShort { minimum: usize },
    #[error("Particle id {id} is outside 1..={count}")]
    IdOutOfRange { id: i64, count: usize },
    #[error("Snapshot ended after {read} of {expected} particle lines")]
    MissingParticles { expected: usize, read: usize },
    #[error("Box line with at least three numeric fields must follow the particle records")]
    MissingBox,
}

/// Reads the fixed-column GRO snapshot format.
///
/// Each snapshot is a comment line carrying `t=<time>`, a particle count
/// line, exactly N fixed-column particle records, and a box-vector line.
/// A single source may concatenate any number of snapshots. Column widths
/// derive from the coordinate precision the file was written with: each of
/// the six numeric fields spans `precision + 5` characters.
pub struct GroReader {
    digits: usize,
    min_line_len: usize,
}

impl GroReader {
    /// Creates a reader for files written with `precision` decimal places.
    pub fn new(precision: usize) -> Self {
        let digits = precision + 5;
        Self {
            digits,
            min_line_len: 21 + 5 * digits,
        }
    }
}

impl Default for GroReader {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Returns the byte range `[start, start + width)` of `line`, clamped to its
/// length. Records at the minimum legal length may truncate the last field.
fn column(line: &str, start: usize, width: usize) -> &str {
    let end = (start + width).min(line.len());
    line.get(start..end).unwrap_or("")
}

/// Length of the longest leading substring of `s` that parses as a float:
/// optional sign, digits with an optional fractional part, optional exponent.
fn float_prefix_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = bytes[i + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = bytes[j..].iter().take_while(|b| b.is_ascii_digit()).count();
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    Some(i)
}

/// Parses the leading numeric prefix of `s` after whitespace, or `None` if
/// no digits lead it. Mirrors `strtod`: trailing garbage is ignored.
fn leading_f64(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let len = float_prefix_len(s)?;
    s[..len].parse().ok()
}

/// Integer counterpart of [`leading_f64`], mirroring `atoi`.
fn leading_i64(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..i + digits].parse().ok()
}

/// Pulls successive whitespace-separated numeric fields off one line,
/// stopping permanently at the first field that does not start numerically.
struct NumberScanner<'a> {
    rest: &'a str,
}

impl<'a> NumberScanner<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }

    fn next_f64(&mut self) -> Option<f64> {
        let s = self.rest.trim_start();
        let len = float_prefix_len(s)?;
        let value = s[..len].parse().ok()?;
        self.rest = &s[len..];
        Some(value)
    }
}

fn next_line<B: BufRead>(lines: &mut Lines<B>, line_num: &mut usize) -> io::Result<Option<String>> {
    match lines.next() {
        Some(line) => {
            *line_num += 1;
            Ok(Some(line?))
        }
        None => Ok(None),
    }
}

impl GroReader {
    fn read_all(&self, input: &mut dyn BufRead) -> Result<Vec<Frame>, GroError> {
        let mut frames = Vec::new();
        let mut lines = input.lines();
        let mut line_num = 0;

        loop {
            // Skip empty lines between snapshots until a comment line or EOF.
            let comment = loop {
                match next_line(&mut lines, &mut line_num)? {
                    None => return Ok(frames),
                    Some(line) if line.is_empty() => continue,
                    Some(line) => break line,
                }
            };

            let time = self.parse_time(&comment, line_num)?;

            let count_line = next_line(&mut lines, &mut line_num)?.ok_or(GroError::Parse {
                line: line_num + 1,
                kind: GroParseErrorKind::InvalidCount {
                    value: String::new(),
                },
            })?;
            let n = self.parse_count(&count_line, line_num)?;

            let mut frame = Frame::new(n);
            frame.set_time(time);

            // Auto-numbering can only switch on from the first particle; once
            // on, it stays on for the rest of the snapshot.
            let mut auto_number = false;
            let mut read = 0;
            while read < n {
                let Some(line) = next_line(&mut lines, &mut line_num)? else {
                    return Err(GroError::Parse {
                        line: line_num,
                        kind: GroParseErrorKind::MissingParticles {
                            expected: n,
                            read,
                        },
                    });
                };
                self.parse_particle(&line, line_num, read, &mut auto_number, &mut frame)?;
                read += 1;
            }

            let box_line = next_line(&mut lines, &mut line_num)?.ok_or(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::MissingBox,
            })?;
            frame.set_cell(parse_box(&box_line, line_num)?);

            frames.push(frame);
        }
    }

    fn parse_time(&self, comment: &str, line_num: usize) -> Result<f64, GroError> {
        let after_token = comment.find("t=").map(|at| &comment[at + 2..]);
        match after_token {
            Some(rest) if !rest.is_empty() => {
                leading_f64(rest).ok_or_else(|| GroError::Parse {
                    line: line_num,
                    kind: GroParseErrorKind::InvalidTime {
                        value: rest.trim().to_string(),
                    },
                })
            }
            _ => Err(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::MissingTime,
            }),
        }
    }

    fn parse_count(&self, line: &str, line_num: usize) -> Result<usize, GroError> {
        leading_i64(line)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::InvalidCount {
                    value: line.trim().to_string(),
                },
            })
    }

    fn parse_particle(
        &self,
        line: &str,
        line_num: usize,
        read: usize,
        auto_number: &mut bool,
        frame: &mut Frame,
    ) -> Result<(), GroError> {
        if line.len() < self.min_line_len {
            return Err(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::LineTooShort {
                    minimum: self.min_line_len,
                },
            });
        }

        let name = column(line, 10, 5).trim();
        let id = leading_i64(column(line, 15, 5)).unwrap_or(0);

        let mut fields = [0.0; 6];
        for (k, field) in fields.iter_mut().enumerate() {
            *field = leading_f64(column(line, 20 + k * self.digits, self.digits)).unwrap_or(0.0);
        }

        // GRO ids run 1 to N; files without id labels number sequentially.
        let n = frame.num_particles();
        let slot = if !*auto_number && id > 0 && id <= n as i64 {
            (id - 1) as usize
        } else if *auto_number || (read == 0 && id == 0) {
            *auto_number = true;
            read
        } else {
            return Err(GroError::Parse {
                line: line_num,
                kind: GroParseErrorKind::IdOutOfRange { id, count: n },
            });
        };

        if !name.is_empty() {
            frame.set_name(slot, name);
        }
        frame.set_position(slot, Point3::new(fields[0], fields[1], fields[2]));
        frame.set_velocity(slot, Vector3::new(fields[3], fields[4], fields[5]));
        Ok(())
    }
}

fn parse_box(line: &str, line_num: usize) -> Result<TriclinicBox, GroError> {
    let mut scanner = NumberScanner::new(line);

    // Box line ordering: v1.x v2.y v3.z v1.y v1.z v2.x v2.z v3.x v3.z.
    // The three diagonal fields are mandatory; the rest parse greedily until
    // one is absent and default to zero.
    let mut fields = [0.0; 9];
    let mut found = 0;
    for (k, field) in fields.iter_mut().enumerate() {
        match scanner.next_f64() {
            Some(value) => {
                *field = value;
                found = k + 1;
            }
            None => break,
        }
    }
    if found < 3 {
        return Err(GroError::Parse {
            line: line_num,
            kind: GroParseErrorKind::MissingBox,
        });
    }

    let [v1x, v2y, mut v3z, v1y, v1z, v2x, v2z, v3x, last] = fields;
    // A full nine-field line carries its own v3.z; v3.y is never read.
    if found == 9 {
        v3z = last;
    }
    Ok(TriclinicBox::new(
        Vector3::new(v1x, v1y, v1z),
        Vector3::new(v2x, v2y, v2z),
        Vector3::new(v3x, 0.0, v3z),
    ))
}

impl TrajectoryReader for GroReader {
    fn format(&self) -> &'static str {
        "gro"
    }

    fn read_frames(&self, input: &mut dyn BufRead) -> Result<Vec<Frame>, ReadError> {
        Ok(self.read_all(input)?)
    }
}
