//! Headless CLI for exercising the globe frame loop
//!
//! Sweeps scroll progress from 0 to 1 and logs frame statistics.
//!
//! Run with: cargo run --features cli --bin globe-cli
//! Env: GLOBE_OPTIONS=<options.json>, GLOBE_DURATION_SECS=<seconds>

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use particle_globe::time::FpsCounter;
    use particle_globe::{
        FrameInput, GlobeDriver, GlobeOptions, ParticleGlobeRenderer, RecordingSurface,
    };
    use std::time::{Duration, Instant};
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,particle_globe=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let options = match std::env::var("GLOBE_OPTIONS") {
        Ok(path) => {
            info!(path = %path, "Loading globe options");
            GlobeOptions::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => GlobeOptions::default(),
    };
    let duration = std::env::var("GLOBE_DURATION_SECS")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| *d > 0.0)
        .unwrap_or(6.0);

    let renderer = ParticleGlobeRenderer::from_options(&options);
    let mut driver: GlobeDriver<RecordingSurface, u64> =
        GlobeDriver::new(renderer, RecordingSurface::new(1280.0, 720.0));

    let mut next_request = 0u64;
    if driver.start() {
        let _ = driver.scheduled(next_request);
    }

    let mut refresh = tokio::time::interval(Duration::from_micros(16_667));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(1));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let started = Instant::now();
    let mut fps = FpsCounter::default();
    let mut max_culled = 0usize;
    let mut draw_calls = 0usize;

    info!(duration, mobile = options.mobile, "Sweeping scroll progress");

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                let elapsed = started.elapsed().as_secs_f64();
                let progress = (elapsed / duration).min(1.0);
                // Hover the middle third of the sweep to exercise the fast tier
                let input = FrameInput {
                    scroll_progress: Some(progress as f32),
                    hovered: (0.33..0.66).contains(&progress),
                };

                let reschedule = driver.frame(&input);
                fps.tick();
                draw_calls += driver.surface_mut().take_commands().len();
                if let Some(stats) = driver.last_stats() {
                    max_culled = max_culled.max(stats.culled);
                }

                if progress >= 1.0 || !reschedule {
                    break;
                }
                next_request += 1;
                if let Err(refused) = driver.scheduled(next_request) {
                    warn!(request = refused, "Frame request refused");
                }
            }
            _ = stats_interval.tick() => {
                if let Some(stats) = driver.last_stats() {
                    info!(
                        frame = driver.frame_count(),
                        projected = stats.projected,
                        culled = stats.culled,
                        arcs = stats.arcs,
                        explosion = format!("{:.2}", stats.explosion_factor),
                        fps = format!("{:.1}", fps.fps()),
                        "stats"
                    );
                }
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }

    driver.stop();
    info!(
        frames = driver.frame_count(),
        max_culled,
        draw_calls,
        "Sweep finished"
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
