//! Particle globe
//!
//! Points on a rotating, tilted sphere that scatter outward once the page
//! scroll passes 75%, drawn back to front with a few network arcs.

mod points;
mod projection;
mod renderer;
mod surface;

pub use points::{build_points, fibonacci_sphere_point, Point, RADIUS_EPSILON};
pub use projection::{
    current_radius, depth_opacity, disperse, explosion_factor, project_all, project_point, Camera,
    ProjectedPoint, Projection, EXPLOSION_RATE, EXPLOSION_START, MIN_OPACITY, NEAR_PLANE,
};
pub use renderer::{arc_fade, arc_pairs, FrameInput, FrameStats, ParticleGlobeRenderer};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
