//! Plan constants: clamps, tolerances, grid and screen scale.
//!
//! All lengths are meters unless the name says otherwise.

/// Screen pixels per world meter at zoom level 1.0.
pub const PIXELS_PER_METER: f32 = 50.0;

/// Grid spacing used when grid snap is enabled.
pub const GRID_SIZE: f32 = 0.5;

/// Default distance within which a dragged room snaps to an alignment line.
pub const SNAP_TOLERANCE: f32 = 0.25;

/// Perpendicular distance within which two walls count as colinear.
pub const ADJACENCY_TOLERANCE: f32 = 0.01;

pub mod limits {
    // Hard limits (enforced by clamping, reported as errors by validation)
    pub const MIN_DIMENSION: f32 = 0.1;
    pub const MAX_DIMENSION: f32 = 100.0;
    pub const MIN_HEIGHT: f32 = 1.5;
    pub const MAX_HEIGHT: f32 = 4.0;
    pub const MAX_NAME_LEN: usize = 50;

    // Typical ranges (outside → warning only)
    pub const TYPICAL_MIN_DIMENSION: f32 = 1.0;
    pub const TYPICAL_MAX_DIMENSION: f32 = 30.0;
    pub const TYPICAL_MIN_HEIGHT: f32 = 2.2;
    pub const TYPICAL_MAX_HEIGHT: f32 = 3.5;
    pub const TYPICAL_MAX_NAME_LEN: usize = 30;
}

pub mod defaults {
    pub const ROOM_LENGTH: f32 = 4.0;
    pub const ROOM_WIDTH: f32 = 3.0;
    pub const ROOM_HEIGHT: f32 = 2.7;
}

/// Clamp a length/width into the hard dimension range.
pub fn clamp_dimension(value: f32) -> f32 {
    value.clamp(limits::MIN_DIMENSION, limits::MAX_DIMENSION)
}

/// Clamp a ceiling height into the hard height range.
pub fn clamp_height(value: f32) -> f32 {
    value.clamp(limits::MIN_HEIGHT, limits::MAX_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_dimensions() {
        assert_eq!(clamp_dimension(0.0), limits::MIN_DIMENSION);
        assert_eq!(clamp_dimension(250.0), limits::MAX_DIMENSION);
        assert_eq!(clamp_dimension(4.0), 4.0);
    }

    #[test]
    fn clamps_heights() {
        assert_eq!(clamp_height(1.0), limits::MIN_HEIGHT);
        assert_eq!(clamp_height(9.0), limits::MAX_HEIGHT);
    }

    #[test]
    fn typical_ranges_nest_inside_hard_limits() {
        assert!(limits::TYPICAL_MIN_DIMENSION > limits::MIN_DIMENSION);
        assert!(limits::TYPICAL_MAX_DIMENSION < limits::MAX_DIMENSION);
        assert!(limits::TYPICAL_MIN_HEIGHT > limits::MIN_HEIGHT);
        assert!(limits::TYPICAL_MAX_HEIGHT < limits::MAX_HEIGHT);
        assert!(limits::TYPICAL_MAX_NAME_LEN < limits::MAX_NAME_LEN);
    }
}
