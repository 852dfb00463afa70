use super::Compute;
use crate::core::models::trajectory::Trajectory;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Computes the mean squared displacement over multiple time origins.
///
/// Every frame whose index is a multiple of the configured origin spacing
/// (and frame 0) becomes a time origin; each frame then contributes one
/// origin/target sample per earlier origin, filed under the lag between
/// them. Lags are frame-count labels, so results are physically meaningful
/// when frames are evenly time-spaced; the output time column always comes
/// from each frame's own attached time.
///
/// Displacements are raw position differences. No periodic-image correction
/// is applied, so coordinates are expected to be unwrapped.
///
/// Output is one file per selected type name, `<stem>_<name>.dat`, with
/// tab-separated columns for the frame time, the total MSD, and the three
/// per-axis contributions.
pub struct MeanSquaredDisplacement {
    stem: PathBuf,
    origin_spacing: usize,
    selected: Vec<String>,
}

impl MeanSquaredDisplacement {
    /// Creates a compute writing `<stem>_<type>.dat` files, registering a
    /// time origin every `origin_spacing` frames.
    pub fn new(stem: impl Into<PathBuf>, origin_spacing: usize) -> Self {
        Self {
            stem: stem.into(),
            origin_spacing,
            selected: Vec::new(),
        }
    }

    /// Adds a particle type to the output selection. Adding a selected type
    /// again is a no-op; selection order determines output order.
    pub fn add_type(&mut self, name: &str) {
        if !self.selected.iter().any(|selected| selected == name) {
            self.selected.push(name.to_string());
        }
    }

    /// Removes a particle type from the output selection.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownType`] if the type is not currently
    /// selected.
    pub fn remove_type(&mut self, name: &str) -> Result<(), EngineError> {
        match self.selected.iter().position(|selected| selected == name) {
            Some(index) => {
                self.selected.remove(index);
                Ok(())
            }
            None => Err(EngineError::UnknownType {
                name: name.to_string(),
            }),
        }
    }

    /// Returns the selected type names in output order.
    pub fn selected_types(&self) -> &[String] {
        &self.selected
    }

    /// Returns the result file path for one selected type name.
    pub fn output_path(&self, name: &str) -> PathBuf {
        PathBuf::from(format!("{}_{}.dat", self.stem.display(), name))
    }

    fn write_output(
        &self,
        selected: &[(&str, usize)],
        times: &[f64],
        sums: &[Vec<Vector3<f64>>],
        pairs: &[u64],
    ) -> Result<(), EngineError> {
        for &(name, type_id) in selected {
            let path = self.output_path(name);

            let io_result: std::io::Result<()> = (|| {
                let mut out = BufWriter::new(File::create(&path)?);
                writeln!(out, "time msd-total  -x  -y  -z")?;
                for (lag, &time) in times.iter().enumerate() {
                    // An unsampled lag divides by zero and prints non-finite
                    // values rather than failing.
                    let norm = pairs[lag] as f64;
                    let sum = sums[type_id][lag];
                    writeln!(
                        out,
                        "{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
                        time,
                        (sum.x + sum.y + sum.z) / norm,
                        sum.x / norm,
                        sum.y / norm,
                        sum.z / norm,
                    )?;
                }
                out.flush()
            })();
            io_result.map_err(|source| EngineError::Output {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "Wrote mean squared displacement file");
        }
        Ok(())
    }
}

impl Compute for MeanSquaredDisplacement {
    fn name(&self) -> &'static str {
        "mean-squared-displacement"
    }

    #[instrument(skip_all, name = "msd_compute")]
    fn evaluate(
        &self,
        trajectory: &mut Trajectory,
        reporter: &ProgressReporter,
    ) -> Result<(), EngineError> {
        if self.origin_spacing == 0 {
            return Err(EngineError::InvalidOriginSpacing);
        }

        trajectory.frames()?;
        let frames = trajectory.loaded_frames()?;
        let n_frames = frames.len();
        if n_frames == 0 {
            return Err(EngineError::NoFrames);
        }
        if frames[0].time().is_none() {
            return Err(EngineError::MissingTime { frame: 0 });
        }

        // Selected names must resolve before any accumulation or output.
        let selected: Vec<(&str, usize)> = self
            .selected
            .iter()
            .map(|name| {
                trajectory
                    .type_index(name)
                    .map(|type_id| (name.as_str(), type_id))
                    .ok_or_else(|| EngineError::TypeNotInTrajectory { name: name.clone() })
            })
            .collect::<Result<_, _>>()?;

        // The type of each particle slot, resolved once from the first frame.
        let type_ids = frames[0]
            .names()
            .iter()
            .map(|name| {
                trajectory.type_index(name).ok_or_else(|| {
                    EngineError::Internal(format!("type '{}' missing from registry", name))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n_types = trajectory.num_types();
        let mut sums = vec![vec![Vector3::zeros(); n_frames]; n_types];
        let mut pairs = vec![0u64; n_frames];

        reporter.report(Progress::ComputeStart {
            label: self.name().to_string(),
            total_frames: n_frames as u64,
        });

        let mut origins: Vec<usize> = Vec::new();
        for f in 0..n_frames {
            if f == 0 || f % self.origin_spacing == 0 {
                origins.push(f);
            }

            for &origin in &origins {
                let lag = f - origin;
                if lag < n_frames {
                    // One pair per origin/target combination, shared by every
                    // type and axis.
                    pairs[lag] += 1;
                    let target = &frames[f];
                    let start = &frames[origin];
                    for (i, &type_id) in type_ids.iter().enumerate() {
                        let diff = target.position(i) - start.position(i);
                        sums[type_id][lag] += diff.component_mul(&diff);
                    }
                }
            }
            reporter.report(Progress::FrameDone);
        }
        debug!(
            frames = n_frames,
            origins = origins.len(),
            types = n_types,
            "Accumulated mean squared displacement"
        );

        let times = frames
            .iter()
            .enumerate()
            .map(|(frame, f)| f.time().ok_or(EngineError::MissingTime { frame }))
            .collect::<Result<Vec<_>, _>>()?;

        if selected.is_empty() {
            warn!("No particle types selected; no result files written");
        } else {
            self.write_output(&selected, &times, &sums, &pairs)?;
        }

        reporter.report(Progress::ComputeFinish);
        Ok(())
    }
}
