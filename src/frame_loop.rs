//! Frame scheduling contract shared by the web and CLI hosts
//!
//! A host owns the actual scheduling primitive (requestAnimationFrame, a
//! tokio interval) and reports each request's handle here. `FrameLoop`
//! keeps at most one request in flight and hands the pending handle back on
//! pause or stop so the host can cancel it synchronously.

use tracing::{debug, info};

use crate::globe::{DrawSurface, FrameInput, FrameStats, ParticleGlobeRenderer};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

#[derive(Debug)]
pub struct FrameLoop<H> {
    state: LoopState,
    pending: Option<H>,
}

impl<H> Default for FrameLoop<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FrameLoop<H> {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Idle -> Running. Returns true if the host should schedule a frame.
    pub fn start(&mut self) -> bool {
        if self.state != LoopState::Idle {
            return false;
        }
        self.state = LoopState::Running;
        true
    }

    /// Record the host's request handle. A second in-flight request, or one
    /// made while not running, is refused and handed back for cancellation.
    pub fn scheduled(&mut self, handle: H) -> Result<(), H> {
        if self.state != LoopState::Running || self.pending.is_some() {
            return Err(handle);
        }
        self.pending = Some(handle);
        Ok(())
    }

    /// The pending request fired. Returns true if the frame should render.
    pub fn begin_frame(&mut self) -> bool {
        self.pending = None;
        self.state == LoopState::Running
    }

    /// Returns true if the host should schedule the next frame
    pub fn end_frame(&self) -> bool {
        self.state == LoopState::Running && self.pending.is_none()
    }

    /// Running -> Paused. Returns the pending handle to cancel.
    pub fn pause(&mut self) -> Option<H> {
        if self.state != LoopState::Running {
            return None;
        }
        self.state = LoopState::Paused;
        self.pending.take()
    }

    /// Paused -> Running. Returns true if the host should schedule a frame.
    pub fn resume(&mut self) -> bool {
        if self.state != LoopState::Paused {
            return false;
        }
        self.state = LoopState::Running;
        self.pending.is_none()
    }

    /// Terminal. Returns the pending handle to cancel.
    pub fn stop(&mut self) -> Option<H> {
        self.state = LoopState::Stopped;
        self.pending.take()
    }
}

/// Renderer, surface and loop state for one mounted globe
pub struct GlobeDriver<S, H> {
    renderer: Option<ParticleGlobeRenderer>,
    surface: S,
    frames: FrameLoop<H>,
    frame_count: u64,
    last_stats: Option<FrameStats>,
}

impl<S: DrawSurface, H> GlobeDriver<S, H> {
    pub fn new(renderer: ParticleGlobeRenderer, surface: S) -> Self {
        Self {
            renderer: Some(renderer),
            surface,
            frames: FrameLoop::new(),
            frame_count: 0,
            last_stats: None,
        }
    }

    pub fn state(&self) -> LoopState {
        self.frames.state()
    }

    pub fn is_running(&self) -> bool {
        self.frames.state() == LoopState::Running
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> Option<&ParticleGlobeRenderer> {
        self.renderer.as_ref()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    pub fn start(&mut self) -> bool {
        let schedule = self.frames.start();
        if schedule {
            info!("Globe loop started");
        }
        schedule
    }

    pub fn scheduled(&mut self, handle: H) -> Result<(), H> {
        self.frames.scheduled(handle)
    }

    /// Handle one fired frame request. Returns true if the host should
    /// schedule the next one.
    pub fn frame(&mut self, input: &FrameInput) -> bool {
        if !self.frames.begin_frame() {
            return false;
        }
        let Some(renderer) = self.renderer.as_mut() else {
            return false;
        };
        self.last_stats = Some(renderer.tick(&mut self.surface, input));
        self.frame_count += 1;
        self.frames.end_frame()
    }

    pub fn pause(&mut self) -> Option<H> {
        let pending = self.frames.pause();
        debug!(frames = self.frame_count, "Globe loop paused");
        pending
    }

    pub fn resume(&mut self) -> bool {
        let schedule = self.frames.resume();
        if schedule {
            debug!("Globe loop resumed");
        }
        schedule
    }

    /// Tear down: clear the surface once and drop the point set. Returns the
    /// pending handle, which the host must cancel before returning.
    pub fn stop(&mut self) -> Option<H> {
        if self.frames.state() == LoopState::Stopped {
            return None;
        }
        let pending = self.frames.stop();
        if self.renderer.take().is_some() {
            self.surface.clear();
        }
        info!(frames = self.frame_count, "Globe loop stopped");
        pending
    }
}
