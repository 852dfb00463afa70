use nalgebra::Vector3;

/// Represents a triclinic periodic simulation cell defined by three lattice vectors.
///
/// This struct stores the cell exactly as simulation engines emit it: three
/// arbitrarily oriented lattice vectors spanning the periodic volume. An
/// orthorhombic cell is the special case where all off-diagonal components
/// are zero. The box is carried as frame metadata; analyses that ignore
/// periodicity simply never consult it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TriclinicBox {
    v1: Vector3<f64>,
    v2: Vector3<f64>,
    v3: Vector3<f64>,
}

impl TriclinicBox {
    /// Creates a new `TriclinicBox` from three arbitrarily oriented lattice vectors.
    ///
    /// # Arguments
    ///
    /// * `v1`, `v2`, `v3` - The lattice vectors spanning the periodic cell.
    pub fn new(v1: Vector3<f64>, v2: Vector3<f64>, v3: Vector3<f64>) -> Self {
        Self { v1, v2, v3 }
    }

    /// Creates an orthorhombic box with the given edge lengths along x, y, and z.
    pub fn from_lengths(lx: f64, ly: f64, lz: f64) -> Self {
        Self {
            v1: Vector3::new(lx, 0.0, 0.0),
            v2: Vector3::new(0.0, ly, 0.0),
            v3: Vector3::new(0.0, 0.0, lz),
        }
    }

    /// Returns the first lattice vector.
    pub fn v1(&self) -> Vector3<f64> {
        self.v1
    }

    /// Returns the second lattice vector.
    pub fn v2(&self) -> Vector3<f64> {
        self.v2
    }

    /// Returns the third lattice vector.
    pub fn v3(&self) -> Vector3<f64> {
        self.v3
    }

    /// Returns the cell volume, the scalar triple product of the lattice vectors.
    ///
    /// A degenerate (zero or coplanar) set of vectors yields a volume of zero.
    pub fn volume(&self) -> f64 {
        self.v1.cross(&self.v2).dot(&self.v3).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_box_is_zero() {
        let cell = TriclinicBox::default();
        assert_eq!(cell.v1(), Vector3::zeros());
        assert_eq!(cell.v2(), Vector3::zeros());
        assert_eq!(cell.v3(), Vector3::zeros());
        assert_eq!(cell.volume(), 0.0);
    }

    #[test]
    fn from_lengths_builds_orthorhombic_cell() {
        let cell = TriclinicBox::from_lengths(2.0, 3.0, 4.0);
        assert_eq!(cell.v1(), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(cell.v2(), Vector3::new(0.0, 3.0, 0.0));
        assert_eq!(cell.v3(), Vector3::new(0.0, 0.0, 4.0));
        assert!((cell.volume() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn volume_handles_tilted_vectors() {
        let cell = TriclinicBox::new(
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(0.5, 2.0, 0.0),
            Vector3::new(0.0, 0.3, 2.0),
        );
        assert!((cell.volume() - 8.0).abs() < 1e-12);
    }
}
