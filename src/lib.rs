//! Particle globe - decorative 3D particle sphere for the landing page hero
//!
//! Points on a tilted, rotating sphere, projected with a simple perspective
//! camera and painted back to front onto a 2D canvas. Once the page scroll
//! passes 75% the globe scatters outward and its network arcs dissolve.
//!
//! - `globe`: point model, projection and the renderer
//! - `frame_loop`: single-in-flight frame scheduling with pause/teardown
//! - `web` (feature `wasm`): canvas surface and requestAnimationFrame host

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod globe;
pub mod theme;
pub mod time;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use web::{CanvasSurface, ParticleGlobe};

pub use config::{GlobeConfig, GlobeOptions};
pub use error::GlobeError;
pub use frame_loop::{FrameLoop, GlobeDriver, LoopState};
pub use globe::{DrawSurface, FrameInput, FrameStats, ParticleGlobeRenderer, RecordingSurface};
