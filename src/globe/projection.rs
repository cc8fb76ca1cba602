//! Per-frame geometry: explosion, dispersion, rotation, perspective
//!
//! The camera sits on the negative z side at distance `focal_length`, so a
//! point's perspective scale is `focal / (focal + z)`. Points closer than
//! `NEAR_PLANE` to the camera are culled before the divide.

use glam::{Mat3, Vec3};

use super::points::{Point, RADIUS_EPSILON};
use crate::config::GlobeConfig;

/// Scroll progress where the explosion starts
pub const EXPLOSION_START: f32 = 0.75;
/// Explosion factor growth per unit of progress past the start
pub const EXPLOSION_RATE: f32 = 8.0;
/// Minimum distance between a point and the camera plane
pub const NEAR_PLANE: f32 = 10.0;
/// Far points fade to this opacity, never to zero
pub const MIN_OPACITY: f32 = 0.15;

/// Zero up to 75% progress, then linear: 1.0 at 0.875, 2.0 at 1.0.
/// Missing or non-finite progress reads as 0.
pub fn explosion_factor(progress: Option<f32>) -> f32 {
    let progress = match progress {
        Some(p) if p.is_finite() => p.clamp(0.0, 1.0),
        _ => 0.0,
    };
    ((progress - EXPLOSION_START) * EXPLOSION_RATE).max(0.0)
}

/// Sphere radius after expansion
pub fn current_radius(config: &GlobeConfig, explosion: f32) -> f32 {
    config.sphere_radius + explosion * config.explosion_radius
}

/// Base position pushed out to `current_radius` plus the scatter offset
pub fn disperse(point: &Point, config: &GlobeConfig, explosion: f32) -> Vec3 {
    if explosion <= 0.0 {
        return point.base_position;
    }
    let radius_scale = current_radius(config, explosion) / config.sphere_radius.max(f32::EPSILON);
    let scatter = point.scatter_velocity * (explosion * config.scatter_scale);
    point.base_position * radius_scale + scatter
}

/// Rotation about the vertical axis followed by the fixed axial tilt
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    orientation: Mat3,
    focal_length: f32,
}

impl Camera {
    pub fn new(rotation: f32, tilt: f32, focal_length: f32) -> Self {
        Self {
            orientation: Mat3::from_rotation_x(tilt) * Mat3::from_rotation_y(rotation),
            focal_length,
        }
    }

    pub fn transform(&self, position: Vec3) -> Vec3 {
        self.orientation * position
    }

    /// Points with z below this are behind or too near the camera
    pub fn cull_threshold(&self) -> f32 {
        -(self.focal_length - NEAR_PLANE)
    }

    pub fn is_culled(&self, z: f32) -> bool {
        !z.is_finite() || z < self.cull_threshold()
    }

    /// `focal / (focal + z)`; callers must cull first
    pub fn perspective_scale(&self, z: f32) -> f32 {
        self.focal_length / (self.focal_length + z).max(NEAR_PLANE)
    }
}

/// One frame's view of a point. Coordinates are relative to the surface centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Camera-facing depth (negated rotated z): larger is nearer the viewer
    pub depth: f32,
    pub radius: f32,
    pub opacity: f32,
    pub highlight: bool,
}

/// Linear in z: 1 at the front of the base sphere, floor at the back
pub fn depth_opacity(z: f32, sphere_radius: f32) -> f32 {
    let span = (2.0 * sphere_radius).max(f32::EPSILON);
    let opacity = (sphere_radius - z) / span;
    if opacity.is_nan() {
        return MIN_OPACITY;
    }
    opacity.clamp(MIN_OPACITY, 1.0)
}

pub fn project_point(
    point: &Point,
    camera: &Camera,
    config: &GlobeConfig,
    explosion: f32,
) -> Option<ProjectedPoint> {
    let rotated = camera.transform(disperse(point, config, explosion));
    if camera.is_culled(rotated.z) {
        return None;
    }

    let scale = camera.perspective_scale(rotated.z);
    Some(ProjectedPoint {
        x: rotated.x * scale,
        y: rotated.y * scale,
        depth: -rotated.z,
        radius: (point.size * scale).max(RADIUS_EPSILON),
        opacity: depth_opacity(rotated.z, config.sphere_radius),
        highlight: point.highlight,
    })
}

/// Survivors of one frame's projection, farthest first
#[derive(Debug, Default)]
pub struct Projection {
    pub points: Vec<ProjectedPoint>,
    pub culled: usize,
}

pub fn project_all(
    points: &[Point],
    camera: &Camera,
    config: &GlobeConfig,
    explosion: f32,
) -> Projection {
    let mut projected = Vec::with_capacity(points.len());
    let mut culled = 0;
    for point in points {
        match project_point(point, camera, config, explosion) {
            Some(p) => projected.push(p),
            None => culled += 1,
        }
    }

    // Painter's order; sort_by is stable
    projected.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    Projection {
        points: projected,
        culled,
    }
}
