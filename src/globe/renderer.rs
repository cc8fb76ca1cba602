//! Particle globe renderer
//!
//! Owns the point set and the rotation angle. Each `tick` advances the
//! rotation by a fixed increment, projects every point, and paints arcs then
//! points back to front onto a `DrawSurface`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use super::points::{build_points, Point};
use super::projection::{explosion_factor, project_all, Camera, ProjectedPoint, Projection};
use super::surface::DrawSurface;
use crate::config::{GlobeConfig, GlobeOptions};
use crate::theme::colors;

/// How far an arc's control point is pulled from the chord midpoint
/// toward the surface centre
const ARC_BOW: f32 = 0.35;
const ARC_STRIDE: usize = 17;
const ARC_SPAN: usize = 29;

/// Host-sampled inputs for one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Scroll progress in [0, 1]; `None` reads as 0
    pub scroll_progress: Option<f32>,
    /// Pointer is over the globe
    pub hovered: bool,
}

/// What one tick drew
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub explosion_factor: f32,
    pub rotation: f32,
    pub projected: usize,
    pub culled: usize,
    pub arcs: usize,
    pub highlights: usize,
}

pub struct ParticleGlobeRenderer {
    config: GlobeConfig,
    points: Vec<Point>,
    rotation: f32,
}

impl ParticleGlobeRenderer {
    /// Random highlights and scatter from OS entropy
    pub fn new(config: GlobeConfig) -> Self {
        Self::from_rng(config, &mut StdRng::from_entropy())
    }

    pub fn with_seed(config: GlobeConfig, seed: u64) -> Self {
        Self::from_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn from_options(options: &GlobeOptions) -> Self {
        let config = options.config();
        match options.seed {
            Some(seed) => Self::with_seed(config, seed),
            None => Self::new(config),
        }
    }

    pub fn from_rng<R: Rng>(config: GlobeConfig, rng: &mut R) -> Self {
        let points = build_points(&config, rng);
        debug!(
            points = points.len(),
            reduced_motion = config.reduced_motion,
            "Particle globe initialized"
        );
        Self {
            config,
            points,
            rotation: 0.0,
        }
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Rotation increment for one tick
    pub fn speed(&self, hovered: bool) -> f32 {
        if self.config.reduced_motion {
            0.0
        } else if hovered {
            self.config.hover_speed
        } else {
            self.config.idle_speed
        }
    }

    /// Project at the current rotation without advancing it
    pub fn project(&self, explosion: f32) -> Projection {
        let camera = Camera::new(self.rotation, self.config.tilt, self.config.focal_length);
        project_all(&self.points, &camera, &self.config, explosion)
    }

    /// Advance one frame and draw it
    pub fn tick<S: DrawSurface>(&mut self, surface: &mut S, input: &FrameInput) -> FrameStats {
        let explosion = explosion_factor(input.scroll_progress);
        self.rotation = (self.rotation + self.speed(input.hovered)) % std::f32::consts::TAU;

        let projection = self.project(explosion);

        let (width, height) = surface.size();
        surface.clear_rect(0.0, 0.0, width, height);
        surface.save();
        surface.translate(width / 2.0, height / 2.0);

        let arcs = draw_arcs(surface, &projection.points, self.config.arc_count, explosion);
        let highlights = draw_points(surface, &projection.points);

        surface.restore();

        let stats = FrameStats {
            explosion_factor: explosion,
            rotation: self.rotation,
            projected: projection.points.len(),
            culled: projection.culled,
            arcs,
            highlights,
        };
        trace!(?stats, "Globe frame");
        stats
    }
}

/// Arc stroke alpha multiplier: the network dissolves as the globe explodes
pub fn arc_fade(explosion: f32) -> f32 {
    (1.0 - explosion).max(0.0)
}

/// Fixed index pairs within the nearer half of the depth-sorted list.
/// The end offset lies in [1, half - 1] so no arc starts and ends on the
/// same point.
pub fn arc_pairs(len: usize, count: usize) -> impl Iterator<Item = (usize, usize)> {
    let front = len / 2;
    let half = len - front;
    (0..count).filter(move |_| half >= 2).map(move |i| {
        let offset = ARC_SPAN % (half - 1) + 1;
        let start = (i * ARC_STRIDE) % half;
        (front + start, front + (start + offset) % half)
    })
}

fn draw_arcs<S: DrawSurface>(
    surface: &mut S,
    points: &[ProjectedPoint],
    count: usize,
    explosion: f32,
) -> usize {
    let fade = arc_fade(explosion);
    if fade <= 0.0 {
        return 0;
    }
    let color = colors::ARC.fade(colors::ARC_ALPHA * fade);

    let mut drawn = 0;
    for (a, b) in arc_pairs(points.len(), count) {
        let (from, to) = (&points[a], &points[b]);
        let cx = (from.x + to.x) * 0.5 * (1.0 - ARC_BOW);
        let cy = (from.y + to.y) * 0.5 * (1.0 - ARC_BOW);

        surface.begin_path();
        surface.move_to(from.x as f64, from.y as f64);
        surface.quadratic_curve_to(cx as f64, cy as f64, to.x as f64, to.y as f64);
        surface.stroke(color, colors::ARC_WIDTH);
        drawn += 1;
    }
    drawn
}

fn draw_points<S: DrawSurface>(surface: &mut S, points: &[ProjectedPoint]) -> usize {
    let mut highlights = 0;
    for p in points {
        let (x, y, r) = (p.x as f64, p.y as f64, p.radius as f64);
        if p.highlight {
            surface.set_shadow(colors::GLOW_BLUR, Some(colors::GLOW.fade(p.opacity)));
            surface.fill_circle(x, y, r, colors::ACCENT.fade(p.opacity));
            surface.set_shadow(0.0, None);
            highlights += 1;
        } else {
            surface.fill_circle(x, y, r, colors::NEUTRAL.fade(p.opacity));
        }
    }
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::surface::{DrawCommand, RecordingSurface};

    fn renderer() -> ParticleGlobeRenderer {
        ParticleGlobeRenderer::with_seed(GlobeConfig::desktop(), 7)
    }

    fn strokes(surface: &RecordingSurface) -> usize {
        surface.count(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    #[test]
    fn tick_draws_every_projected_point() {
        let mut globe = renderer();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let stats = globe.tick(&mut surface, &FrameInput::default());

        assert_eq!(stats.projected, 600);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.explosion_factor, 0.0);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Fill(_))), 600);
        assert_eq!(strokes(&surface), stats.arcs);
        assert!(stats.arcs > 0);
    }

    #[test]
    fn frame_is_cleared_and_centred() {
        let mut globe = renderer();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        globe.tick(&mut surface, &FrameInput::default());

        let commands = surface.commands();
        assert_eq!(
            commands[0],
            DrawCommand::ClearRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 }
        );
        assert_eq!(commands[1], DrawCommand::Save);
        assert_eq!(commands[2], DrawCommand::Translate { x: 400.0, y: 300.0 });
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn arcs_fade_and_vanish_at_full_explosion() {
        assert_eq!(arc_fade(0.0), 1.0);
        assert_eq!(arc_fade(0.5), 0.5);
        assert_eq!(arc_fade(explosion_factor(Some(1.0))), 0.0);

        let mut globe = renderer();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let input = FrameInput {
            scroll_progress: Some(1.0),
            hovered: false,
        };
        let stats = globe.tick(&mut surface, &input);
        assert_eq!(stats.explosion_factor, 2.0);
        assert_eq!(stats.arcs, 0);
        assert_eq!(strokes(&surface), 0);
    }

    #[test]
    fn highlights_get_glow_pass() {
        let mut globe = renderer();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let stats = globe.tick(&mut surface, &FrameInput::default());

        let expected = globe.points().iter().filter(|p| p.highlight).count();
        assert_eq!(stats.highlights, expected);
        let glows = surface.count(|c| matches!(c, DrawCommand::Shadow { color: Some(_), .. }));
        let resets = surface.count(|c| matches!(c, DrawCommand::Shadow { color: None, .. }));
        assert_eq!(glows, expected);
        assert_eq!(resets, expected);
    }

    #[test]
    fn rotation_uses_two_speed_tiers() {
        let mut globe = renderer();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let config = globe.config().clone();

        globe.tick(&mut surface, &FrameInput::default());
        assert!((globe.rotation() - config.idle_speed).abs() < 1e-6);

        let hovered = FrameInput {
            scroll_progress: None,
            hovered: true,
        };
        globe.tick(&mut surface, &hovered);
        assert!((globe.rotation() - config.idle_speed - config.hover_speed).abs() < 1e-6);
    }

    #[test]
    fn reduced_motion_freezes_rotation() {
        let options = GlobeOptions {
            reduced_motion: true,
            seed: Some(1),
            ..Default::default()
        };
        let mut globe = ParticleGlobeRenderer::from_options(&options);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        for hovered in [false, true, false] {
            globe.tick(&mut surface, &FrameInput { scroll_progress: None, hovered });
        }
        assert_eq!(globe.rotation(), 0.0);
    }

    #[test]
    fn mobile_options_use_smaller_point_set() {
        let options = GlobeOptions {
            mobile: true,
            seed: Some(1),
            ..Default::default()
        };
        let globe = ParticleGlobeRenderer::from_options(&options);
        assert_eq!(globe.points().len(), GlobeConfig::mobile().point_count);
    }

    #[test]
    fn point_set_is_stable_across_ticks() {
        let mut globe = renderer();
        let before = globe.points().to_vec();
        let mut surface = RecordingSurface::new(800.0, 600.0);
        for i in 0..=10 {
            let input = FrameInput {
                scroll_progress: Some(i as f32 / 10.0),
                hovered: i % 2 == 0,
            };
            globe.tick(&mut surface, &input);
        }
        assert_eq!(globe.points(), &before[..]);
    }

    #[test]
    fn arc_pairs_stay_in_front_half() {
        let pairs: Vec<_> = arc_pairs(600, 12).collect();
        assert_eq!(pairs.len(), 12);
        for (a, b) in pairs {
            assert!(a >= 300 && a < 600);
            assert!(b >= 300 && b < 600);
            assert_ne!(a, b);
        }
        assert_eq!(arc_pairs(1, 12).count(), 0);
        assert_eq!(arc_pairs(3, 12).count(), 12);
        assert_eq!(arc_pairs(0, 12).count(), 0);
    }

    #[test]
    fn every_globe_size_gets_full_arc_count() {
        for len in 3..=700 {
            let pairs: Vec<_> = arc_pairs(len, 12).collect();
            assert_eq!(pairs.len(), 12, "len {}", len);
            for (a, b) in pairs {
                assert_ne!(a, b, "len {}", len);
                assert!((len / 2..len).contains(&a) && (len / 2..len).contains(&b));
            }
        }

        // Front half of exactly ARC_SPAN points
        let mut globe = ParticleGlobeRenderer::with_seed(
            GlobeConfig { point_count: 58, ..GlobeConfig::desktop() },
            2,
        );
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let stats = globe.tick(&mut surface, &FrameInput::default());
        assert_eq!(stats.arcs, 12);
    }

    #[test]
    fn empty_globe_still_clears() {
        let mut config = GlobeConfig::desktop();
        config.point_count = 0;
        let mut globe = ParticleGlobeRenderer::with_seed(config, 1);
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let stats = globe.tick(&mut surface, &FrameInput::default());
        assert_eq!(stats.projected, 0);
        assert_eq!(stats.arcs, 0);
        assert!(matches!(surface.commands()[0], DrawCommand::ClearRect { .. }));
    }
}
