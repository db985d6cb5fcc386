//! Reduction options
//!
//! Every tolerance is relative: position and frame tolerances are fractions
//! of the mesh scale, UV tolerance and snap grid are fractions of the 0..1
//! texture range. See [`crate::tolerance`] for the conversion to absolute units.

use vertexanim_core::{Error, Result};

/// Options for one reduction call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReductionOptions {
    /// Max position drift, as a fraction of mesh scale, for welding two slots
    pub position_tolerance: f32,
    /// Max UV drift (0..1) between matched corners
    pub uv_tolerance: f32,
    /// Max face-normal angle between matched corners; `<= 0` disables the check
    pub normal_angle_tolerance_deg: f32,
    /// Max interpolation error, as a fraction of mesh scale, for dropping a frame
    pub frame_error_tolerance: f32,
    /// Extra frame tolerance per unit of a vertex's largest per-frame motion
    pub motion_error_scale: f32,
    /// UV quantization grid applied before corner comparison; `<= 0` disables snapping
    pub uv_snap_grid: f32,
}

impl Default for ReductionOptions {
    /// Preset tuned for low-memory console targets.
    fn default() -> Self {
        Self {
            position_tolerance: 0.01,
            uv_tolerance: 0.01,
            normal_angle_tolerance_deg: 15.0,
            frame_error_tolerance: 1.0,
            motion_error_scale: 1.0,
            uv_snap_grid: 1.0 / 64.0,
        }
    }
}

impl ReductionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only weld exact duplicates and never drop keyframes.
    pub fn lossless() -> Self {
        Self {
            position_tolerance: 0.0,
            uv_tolerance: 0.0,
            normal_angle_tolerance_deg: 0.0,
            frame_error_tolerance: 0.0,
            motion_error_scale: 0.0,
            uv_snap_grid: 0.0,
        }
    }

    pub fn with_position_tolerance(mut self, tolerance: f32) -> Self {
        self.position_tolerance = tolerance;
        self
    }

    pub fn with_uv_tolerance(mut self, tolerance: f32) -> Self {
        self.uv_tolerance = tolerance;
        self
    }

    pub fn with_normal_angle_tolerance_deg(mut self, degrees: f32) -> Self {
        self.normal_angle_tolerance_deg = degrees;
        self
    }

    pub fn with_frame_error_tolerance(mut self, tolerance: f32) -> Self {
        self.frame_error_tolerance = tolerance;
        self
    }

    pub fn with_motion_error_scale(mut self, scale: f32) -> Self {
        self.motion_error_scale = scale;
        self
    }

    pub fn with_uv_snap_grid(mut self, grid: f32) -> Self {
        self.uv_snap_grid = grid;
        self
    }

    /// Reject NaN and infinite values. Negative values are allowed and disable
    /// the corresponding stage.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("position_tolerance", self.position_tolerance),
            ("uv_tolerance", self.uv_tolerance),
            ("normal_angle_tolerance_deg", self.normal_angle_tolerance_deg),
            ("frame_error_tolerance", self.frame_error_tolerance),
            ("motion_error_scale", self.motion_error_scale),
            ("uv_snap_grid", self.uv_snap_grid),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(Error::InvalidData(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}
