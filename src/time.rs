//! Platform-agnostic time utilities
//!
//! Provides elapsed seconds since start and a rolling FPS counter for
//! frame-loop diagnostics.

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Rolling window of frame timestamps (seconds)
pub struct FpsCounter {
    frames: Vec<f64>,
    window: usize,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(60)
    }
}

impl FpsCounter {
    pub fn new(window: usize) -> Self {
        Self {
            frames: Vec::with_capacity(window),
            window: window.max(2),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_seconds());
    }

    pub fn record(&mut self, at: f64) {
        self.frames.push(at);
        if self.frames.len() > self.window {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}
