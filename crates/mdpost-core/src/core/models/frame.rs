use super::cell::TriclinicBox;
use nalgebra::{Point3, Vector3};

/// Represents a single simulation snapshot with per-particle data.
///
/// A frame owns the state of all N particles at one instant: positions
/// (always present), velocities (optional, zero when the source omits them),
/// and particle names (optional, empty when the source omits them), together
/// with the snapshot's simulation time and periodic cell when the source
/// provides them. The particle count is fixed at construction.
///
/// Particle index `i` in `[0, N)` is the identity key correlating data across
/// frames of one trajectory: the same particle occupies the same slot in every
/// frame. Correlation analyses depend on this invariant and do not verify it.
///
/// Frames are fully populated by a reader during parsing and treated as
/// read-only thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    positions: Vec<Point3<f64>>,
    velocities: Vec<Vector3<f64>>,
    names: Vec<String>,
    time: Option<f64>,
    cell: Option<TriclinicBox>,
}

impl Frame {
    /// Creates a new `Frame` holding `n` particles.
    ///
    /// All positions and velocities start at zero, all names empty, and the
    /// time and cell unset.
    pub fn new(n: usize) -> Self {
        Self {
            positions: vec![Point3::origin(); n],
            velocities: vec![Vector3::zeros(); n],
            names: vec![String::new(); n],
            time: None,
            cell: None,
        }
    }

    /// Returns the number of particles in this frame.
    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }

    /// Sets the position of particle `i`. The index must be below the particle count.
    pub fn set_position(&mut self, i: usize, position: Point3<f64>) {
        self.positions[i] = position;
    }

    /// Returns the position of particle `i`. The index must be below the particle count.
    pub fn position(&self, i: usize) -> Point3<f64> {
        self.positions[i]
    }

    /// Sets the velocity of particle `i`. The index must be below the particle count.
    pub fn set_velocity(&mut self, i: usize, velocity: Vector3<f64>) {
        self.velocities[i] = velocity;
    }

    /// Returns the velocity of particle `i`. The index must be below the particle count.
    pub fn velocity(&self, i: usize) -> Vector3<f64> {
        self.velocities[i]
    }

    /// Sets the name of particle `i`. The index must be below the particle count.
    pub fn set_name(&mut self, i: usize, name: &str) {
        self.names[i] = name.to_string();
    }

    /// Returns the name of particle `i`. The index must be below the particle count.
    pub fn name(&self, i: usize) -> &str {
        &self.names[i]
    }

    /// Returns all particle positions in slot order.
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Returns all particle velocities in slot order.
    pub fn velocities(&self) -> &[Vector3<f64>] {
        &self.velocities
    }

    /// Returns all particle names in slot order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Attaches the simulation time of this snapshot.
    pub fn set_time(&mut self, time: f64) {
        self.time = Some(time);
    }

    /// Returns the simulation time, if the source supplied one.
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// Attaches the periodic simulation cell of this snapshot.
    pub fn set_cell(&mut self, cell: TriclinicBox) {
        self.cell = Some(cell);
    }

    /// Returns the periodic simulation cell, if the source supplied one.
    pub fn cell(&self) -> Option<TriclinicBox> {
        self.cell
    }
}
