use super::frame::Frame;
use super::types::TypeRegistry;
use crate::core::io::{ReadError, TrajectoryReader};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("No trajectory sources attached")]
    NoSources,
    #[error("Cannot read trajectory file '{}': {source}", path.display())]
    Source { path: PathBuf, source: io::Error },
    #[error("Failed to parse trajectory file '{}': {source}", path.display())]
    Format { path: PathBuf, source: ReadError },
    #[error("Inconsistent data: frame {frame} has {found} particles, expected {expected}")]
    InconsistentFrameSize {
        frame: usize,
        found: usize,
        expected: usize,
    },
    #[error("Trajectory data requested before a successful read")]
    NotLoaded,
}

/// An ordered, lazily materialized collection of simulation frames.
///
/// A trajectory ties together one format reader, the source files it should
/// be read from, and the loaded frame sequence with its particle-type
/// registry. Parsing is deferred: attaching a source (or calling
/// [`Trajectory::invalidate`]) marks the trajectory stale, and the next call
/// to [`Trajectory::frames`] re-parses every attached source in attachment
/// order before returning. Once read, nothing is parsed again until the
/// trajectory is invalidated.
///
/// Every frame must carry the same particle count, and particle slot `i`
/// must refer to the same particle in every frame; the analyses consuming a
/// trajectory rely on that correspondence.
pub struct Trajectory {
    reader: Box<dyn TrajectoryReader>,
    sources: Vec<PathBuf>,
    frames: Vec<Frame>,
    registry: TypeRegistry,
    n_particles: usize,
    must_read: bool,
}

impl Trajectory {
    /// Creates an empty trajectory that will parse its sources with `reader`.
    pub fn new(reader: Box<dyn TrajectoryReader>) -> Self {
        Self {
            reader,
            sources: Vec::new(),
            frames: Vec::new(),
            registry: TypeRegistry::new(),
            n_particles: 0,
            must_read: true,
        }
    }

    /// Attaches a source file and marks the trajectory stale.
    ///
    /// Frames from multiple sources concatenate in attachment order.
    pub fn attach(&mut self, path: impl AsRef<Path>) {
        self.sources.push(path.as_ref().to_path_buf());
        self.must_read = true;
    }

    /// Forces a full re-parse of all attached sources on the next data access.
    pub fn invalidate(&mut self) {
        self.must_read = true;
    }

    /// Returns the frame sequence, re-parsing the attached sources first if
    /// the trajectory is stale.
    ///
    /// # Errors
    ///
    /// Returns an error if no sources are attached, a source cannot be
    /// opened, a source violates its format, or the frames disagree on the
    /// particle count. A failed read leaves the trajectory unusable until a
    /// later read succeeds.
    pub fn frames(&mut self) -> Result<&[Frame], TrajectoryError> {
        if self.must_read {
            self.read()?;
        }
        Ok(&self.frames)
    }

    /// Returns the frame sequence without triggering a read.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::NotLoaded`] if no successful read has
    /// happened or the trajectory has been invalidated since one.
    pub fn loaded_frames(&self) -> Result<&[Frame], TrajectoryError> {
        if self.must_read {
            return Err(TrajectoryError::NotLoaded);
        }
        Ok(&self.frames)
    }

    /// Returns the particle count shared by all frames (zero before a read).
    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    /// Returns the number of distinct particle type names seen so far.
    pub fn num_types(&self) -> usize {
        self.registry.len()
    }

    /// Returns the dense index assigned to a particle type name.
    ///
    /// Indices are assigned in first-seen order (frame order, then particle
    /// order) during the read and never reassigned afterwards.
    pub fn type_index(&self, name: &str) -> Option<usize> {
        self.registry.index_of(name)
    }

    /// Returns the type name registered at `index`, if any.
    pub fn type_name(&self, index: usize) -> Option<&str> {
        self.registry.name_of(index)
    }

    fn read(&mut self) -> Result<(), TrajectoryError> {
        if self.sources.is_empty() {
            return Err(TrajectoryError::NoSources);
        }
        debug!(
            sources = self.sources.len(),
            format = self.reader.format(),
            "Reading trajectory sources"
        );

        // Drop any previously loaded data up front so a failed read cannot
        // leave a mixture of old and new frames behind.
        self.frames.clear();
        self.registry.clear();
        self.n_particles = 0;

        let mut frames = Vec::new();
        for path in &self.sources {
            let file = File::open(path).map_err(|source| TrajectoryError::Source {
                path: path.clone(),
                source,
            })?;
            let mut buffered = BufReader::new(file);
            let parsed = self
                .reader
                .read_frames(&mut buffered)
                .map_err(|source| TrajectoryError::Format {
                    path: path.clone(),
                    source,
                })?;
            frames.extend(parsed);
        }

        let expected = frames.first().map_or(0, Frame::num_particles);
        for (index, frame) in frames.iter().enumerate() {
            if frame.num_particles() != expected {
                return Err(TrajectoryError::InconsistentFrameSize {
                    frame: index,
                    found: frame.num_particles(),
                    expected,
                });
            }
        }

        for frame in &frames {
            for name in frame.names() {
                self.registry.intern(name);
            }
        }

        self.n_particles = expected;
        self.frames = frames;
        self.must_read = false;
        info!(
            frames = self.frames.len(),
            particles = self.n_particles,
            types = self.registry.len(),
            "Trajectory loaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::gro::GroReader;
    use std::cell::Cell;
    use std::io::{BufRead, Write};
    use std::rc::Rc;
    use tempfile::TempDir;

    fn gro_snapshot(time: f64, particles: &[(&str, f64)]) -> String {
        let mut content = format!("t= {}\n{}\n", time, particles.len());
        for (i, (name, x)) in particles.iter().enumerate() {
            content.push_str(&format!("{:>10}{:>5}{:>5}", "1MOL", name, i + 1));
            for value in [*x, 0.0, 0.0, 0.0, 0.0, 0.0] {
                content.push_str(&format!("{:8.3}", value));
            }
            content.push('\n');
        }
        content.push_str("5.0 5.0 5.0\n");
        content
    }

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    struct CountingReader {
        reads: Rc<Cell<usize>>,
    }

    impl TrajectoryReader for CountingReader {
        fn format(&self) -> &'static str {
            "stub"
        }

        fn read_frames(&self, _input: &mut dyn BufRead) -> Result<Vec<Frame>, ReadError> {
            self.reads.set(self.reads.get() + 1);
            Ok(vec![Frame::new(1)])
        }
    }

    #[test]
    fn frames_without_sources_fails() {
        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        assert!(matches!(
            trajectory.frames(),
            Err(TrajectoryError::NoSources)
        ));
    }

    #[test]
    fn reads_attached_sources_in_order() {
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.gro", &gro_snapshot(0.0, &[("Na", 1.0), ("Cl", 2.0)]));
        let second = write_file(&dir, "b.gro", &gro_snapshot(1.0, &[("Na", 3.0), ("Cl", 4.0)]));

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&first);
        trajectory.attach(&second);

        let frames = trajectory.frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].time(), Some(0.0));
        assert_eq!(frames[1].time(), Some(1.0));
        assert_eq!(trajectory.n_particles(), 2);
    }

    #[test]
    fn registers_types_in_first_seen_order() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "t.gro",
            &gro_snapshot(0.0, &[("Na", 0.0), ("Cl", 0.0), ("Na", 0.0)]),
        );

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&path);
        trajectory.frames().unwrap();

        assert_eq!(trajectory.num_types(), 2);
        assert_eq!(trajectory.type_index("Na"), Some(0));
        assert_eq!(trajectory.type_index("Cl"), Some(1));
        assert_eq!(trajectory.type_name(1), Some("Cl"));
        assert_eq!(trajectory.type_index("K"), None);
    }

    #[test]
    fn repeated_access_reads_only_once() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "t.gro", "ignored");
        let reads = Rc::new(Cell::new(0));

        let mut trajectory = Trajectory::new(Box::new(CountingReader {
            reads: Rc::clone(&reads),
        }));
        trajectory.attach(&path);

        trajectory.frames().unwrap();
        trajectory.frames().unwrap();
        assert_eq!(reads.get(), 1);
    }

    #[test]
    fn invalidate_forces_reparse_without_duplicating_frames() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "t.gro", "ignored");
        let reads = Rc::new(Cell::new(0));

        let mut trajectory = Trajectory::new(Box::new(CountingReader {
            reads: Rc::clone(&reads),
        }));
        trajectory.attach(&path);

        assert_eq!(trajectory.frames().unwrap().len(), 1);
        trajectory.invalidate();
        assert_eq!(trajectory.frames().unwrap().len(), 1);
        assert_eq!(reads.get(), 2);
    }

    #[test]
    fn attaching_marks_the_trajectory_stale() {
        let dir = TempDir::new().unwrap();
        let first = write_file(&dir, "a.gro", &gro_snapshot(0.0, &[("Na", 1.0)]));
        let second = write_file(&dir, "b.gro", &gro_snapshot(1.0, &[("Na", 2.0)]));

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&first);
        assert_eq!(trajectory.frames().unwrap().len(), 1);

        trajectory.attach(&second);
        assert_eq!(trajectory.frames().unwrap().len(), 2);
    }

    #[test]
    fn missing_file_error_names_the_path() {
        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach("/definitely/not/here.gro");

        match trajectory.frames() {
            Err(TrajectoryError::Source { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.gro"));
            }
            other => panic!("expected a source error, got {:?}", other.map(|f| f.len())),
        }
    }

    #[test]
    fn format_error_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "bad.gro", "no time token here\n");

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&path);

        match trajectory.frames() {
            Err(TrajectoryError::Format { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a format error, got {:?}", other.map(|f| f.len())),
        }
    }

    #[test]
    fn inconsistent_frame_sizes_are_rejected() {
        let dir = TempDir::new().unwrap();
        let content = format!(
            "{}{}",
            gro_snapshot(0.0, &[("Na", 0.0)]),
            gro_snapshot(1.0, &[("Na", 0.0), ("Cl", 0.0)]),
        );
        let path = write_file(&dir, "t.gro", &content);

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&path);

        assert!(matches!(
            trajectory.frames(),
            Err(TrajectoryError::InconsistentFrameSize {
                frame: 1,
                found: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn loaded_frames_requires_a_successful_read() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "t.gro", &gro_snapshot(0.0, &[("Na", 0.0)]));

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&path);
        assert!(matches!(
            trajectory.loaded_frames(),
            Err(TrajectoryError::NotLoaded)
        ));

        trajectory.frames().unwrap();
        assert_eq!(trajectory.loaded_frames().unwrap().len(), 1);

        trajectory.invalidate();
        assert!(matches!(
            trajectory.loaded_frames(),
            Err(TrajectoryError::NotLoaded)
        ));
    }

    #[test]
    fn failed_read_leaves_the_trajectory_unusable() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "good.gro", &gro_snapshot(0.0, &[("Na", 0.0)]));

        let mut trajectory = Trajectory::new(Box::new(GroReader::default()));
        trajectory.attach(&good);
        trajectory.frames().unwrap();

        trajectory.attach(dir.path().join("missing.gro"));
        assert!(trajectory.frames().is_err());
        assert!(matches!(
            trajectory.loaded_frames(),
            Err(TrajectoryError::NotLoaded)
        ));
        assert_eq!(trajectory.n_particles(), 0);
    }
}
