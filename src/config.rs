//! Globe configuration
//!
//! `GlobeConfig` holds every tunable constant of the renderer, with a
//! desktop and a mobile preset. `GlobeOptions` is what the host page
//! passes in (as JSON on the web, from a file in the CLI).

use serde::Deserialize;
use tracing::warn;

use crate::error::GlobeError;

/// Upper bound on a host-supplied point count
pub const MAX_POINT_COUNT: usize = 5_000;

/// Renderer constants for one globe instance
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeConfig {
    /// Number of particles on the sphere
    pub point_count: usize,
    /// Sphere radius in surface pixels
    pub sphere_radius: f32,
    /// Draw radius of a regular point
    pub base_point_size: f32,
    /// Fraction of points drawn as highlights
    pub highlight_ratio: f32,
    /// Highlight size multiplier
    pub highlight_scale: f32,
    /// Perspective focal length
    pub focal_length: f32,
    /// Constant axial tilt around the horizontal axis (radians)
    pub tilt: f32,
    /// Rotation increment per tick (radians)
    pub idle_speed: f32,
    /// Rotation increment per tick while hovered (radians)
    pub hover_speed: f32,
    /// Radius growth per unit of explosion factor
    pub explosion_radius: f32,
    /// Scatter offset per unit of explosion factor
    pub scatter_scale: f32,
    /// Number of decorative network arcs
    pub arc_count: usize,
    /// Freeze rotation (prefers-reduced-motion)
    pub reduced_motion: bool,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl GlobeConfig {
    pub fn desktop() -> Self {
        Self {
            point_count: 600,
            sphere_radius: 220.0,
            base_point_size: 1.0,
            highlight_ratio: 0.1,
            highlight_scale: 2.5,
            focal_length: 800.0,
            tilt: 0.35,
            idle_speed: 0.002,
            hover_speed: 0.008,
            explosion_radius: 200.0,
            scatter_scale: 150.0,
            arc_count: 12,
            reduced_motion: false,
        }
    }

    /// Fewer, larger particles on a smaller sphere
    pub fn mobile() -> Self {
        Self {
            point_count: 300,
            sphere_radius: 140.0,
            base_point_size: 1.5,
            arc_count: 8,
            ..Self::desktop()
        }
    }

    pub fn for_viewport(mobile: bool) -> Self {
        if mobile {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }
}

/// Host-supplied options, all optional in JSON
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlobeOptions {
    /// Read once at start; selects the mobile preset
    pub mobile: bool,
    pub reduced_motion: bool,
    /// Fixed RNG seed for highlight and scatter assignment
    pub seed: Option<u64>,
    /// Overrides the preset point count, capped at `MAX_POINT_COUNT`
    pub point_count: Option<usize>,
}

impl GlobeOptions {
    pub fn from_json(json: &str) -> Result<Self, GlobeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the preset for this viewport and apply overrides
    pub fn config(&self) -> GlobeConfig {
        let mut config = GlobeConfig::for_viewport(self.mobile);
        config.reduced_motion = self.reduced_motion;
        if let Some(count) = self.point_count {
            if count > MAX_POINT_COUNT {
                warn!(requested = count, max = MAX_POINT_COUNT, "Point count override clamped");
            }
            config.point_count = count.min(MAX_POINT_COUNT);
        }
        config
    }
}
