//! Particle data model and sphere distribution
//!
//! Points are laid out on a Fibonacci (golden-angle) spiral so coverage is
//! even without random placement. Only highlight selection and scatter
//! directions are random.

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::config::GlobeConfig;

/// Smallest draw radius a point may ever have
pub const RADIUS_EPSILON: f32 = 0.1;

/// One particle on the globe. Immutable after initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Position on the sphere surface, |base_position| == sphere radius
    pub base_position: Vec3,
    /// Base draw radius (> 0)
    pub size: f32,
    /// Static scatter direction, components in [-1, 1]. Scaled by the
    /// explosion factor each frame, never integrated.
    pub scatter_velocity: Vec3,
    pub highlight: bool,
}

/// Unit vector for point `i` of `n` on a golden-angle spiral
pub fn fibonacci_sphere_point(i: usize, n: usize) -> Vec3 {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());

    let y = 1.0 - 2.0 * (i as f32 + 0.5) / n.max(1) as f32;
    let ring = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f32;

    Vec3::new(theta.cos() * ring, y, theta.sin() * ring)
}

/// Build the full point set for `config`
pub fn build_points<R: Rng>(config: &GlobeConfig, rng: &mut R) -> Vec<Point> {
    let n = config.point_count;
    let highlight_ratio = config.highlight_ratio.clamp(0.0, 1.0) as f64;
    let base_size = config.base_point_size.max(RADIUS_EPSILON);

    let points: Vec<Point> = (0..n)
        .map(|i| {
            let highlight = rng.gen_bool(highlight_ratio);
            let size = if highlight {
                (base_size * config.highlight_scale).max(RADIUS_EPSILON)
            } else {
                base_size
            };
            let scatter_velocity = Vec3::new(
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(-1.0..=1.0),
            );
            Point {
                base_position: fibonacci_sphere_point(i, n) * config.sphere_radius,
                size,
                scatter_velocity,
                highlight,
            }
        })
        .collect();

    debug!(
        points = points.len(),
        highlights = points.iter().filter(|p| p.highlight).count(),
        radius = config.sphere_radius,
        "Globe points built"
    );

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builds_exact_count_on_sphere() {
        let mut config = GlobeConfig::desktop();
        for n in [1, 2, 17, 300, 600] {
            config.point_count = n;
            let points = build_points(&config, &mut StdRng::seed_from_u64(1));
            assert_eq!(points.len(), n);
            for p in &points {
                assert!(p.size > 0.0);
                assert!(
                    (p.base_position.length() - config.sphere_radius).abs() < 1e-3,
                    "point off sphere: {:?}",
                    p.base_position
                );
            }
        }
    }

    #[test]
    fn empty_point_set() {
        let mut config = GlobeConfig::desktop();
        config.point_count = 0;
        assert!(build_points(&config, &mut StdRng::seed_from_u64(1)).is_empty());
    }

    #[test]
    fn placement_is_deterministic() {
        let config = GlobeConfig::desktop();
        let a = build_points(&config, &mut StdRng::seed_from_u64(1));
        let b = build_points(&config, &mut StdRng::seed_from_u64(99));
        // Different seeds only change highlights and scatter
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.base_position, pb.base_position);
        }
    }

    #[test]
    fn spiral_covers_both_poles() {
        let n = 600;
        let ys: Vec<f32> = (0..n).map(|i| fibonacci_sphere_point(i, n).y).collect();
        assert!(ys[0] > 0.99);
        assert!(ys[n - 1] < -0.99);
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn roughly_ten_percent_highlights() {
        let config = GlobeConfig::desktop();
        let points = build_points(&config, &mut StdRng::seed_from_u64(42));
        let highlights: Vec<&Point> = points.iter().filter(|p| p.highlight).collect();
        assert!(highlights.len() > 30 && highlights.len() < 100, "{}", highlights.len());
        for p in highlights {
            assert_eq!(p.size, config.base_point_size * config.highlight_scale);
        }
    }

    #[test]
    fn scatter_components_in_unit_range() {
        let points = build_points(&GlobeConfig::desktop(), &mut StdRng::seed_from_u64(3));
        for p in &points {
            let v = p.scatter_velocity;
            for c in [v.x, v.y, v.z] {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn zero_size_config_is_guarded() {
        let mut config = GlobeConfig::desktop();
        config.base_point_size = 0.0;
        config.highlight_scale = 0.0;
        let points = build_points(&config, &mut StdRng::seed_from_u64(5));
        assert!(points.iter().all(|p| p.size >= RADIUS_EPSILON));
    }
}
