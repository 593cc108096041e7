/// Scheduler state.
///
/// Transitions: `Idle → RenderRequested → Rendering → (Idle | RenderRequested)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerState {
    Idle,
    RenderRequested,
    Rendering,
}

/// Request issued back to the host after handling a notification.
#[must_use = "the host must schedule a render callback when asked to"]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Schedule {
    /// Nothing to do; a callback is already outstanding or none is needed.
    Idle,
    /// Call back into the host's render entry point once.
    Render,
}

impl Schedule {
    #[inline]
    pub fn wants_render(self) -> bool {
        self == Schedule::Render
    }

    /// Combines two requests; a render request wins.
    #[inline]
    pub fn or(self, other: Schedule) -> Schedule {
        if self.wants_render() || other.wants_render() {
            Schedule::Render
        } else {
            Schedule::Idle
        }
    }
}

/// Why a render callback did not produce a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// No render was requested; the callback is stale.
    NotRequested,
    /// A frame is already being drawn.
    AlreadyRendering,
    /// Surface hidden, zero-sized, or the context could not be made current.
    SurfaceNotReady,
}

/// Work to perform for one admitted frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FramePlan {
    /// The surface changed size since the previous frame. The host reads the
    /// current size and forwards it to the engine before the draw call.
    pub resize: bool,
}

/// Render-request state machine.
///
/// At most one frame is in flight at a time. Resizes are coalesced but never
/// dropped: the next admitted frame is flagged to resize. Only the flag is
/// kept; the size itself is read from the surface when the frame runs, so the
/// latest geometry always wins.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: SchedulerState,
    animating: bool,
    resize_pending: bool,

    /// A request arrived while `Rendering`; honoured when the frame finishes.
    follow_up: bool,
}

impl FrameScheduler {
    pub fn new(animating: bool) -> Self {
        Self {
            state: SchedulerState::Idle,
            animating,
            resize_pending: false,
            follow_up: false,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Asks for a frame. Only the `Idle → RenderRequested` edge asks the host.
    pub fn request_render(&mut self) -> Schedule {
        match self.state {
            SchedulerState::Idle => {
                self.state = SchedulerState::RenderRequested;
                log::debug!("scheduler: idle -> render requested");
                Schedule::Render
            }
            SchedulerState::RenderRequested => Schedule::Idle,
            SchedulerState::Rendering => {
                self.follow_up = true;
                Schedule::Idle
            }
        }
    }

    /// Marks the surface geometry dirty and requests a frame.
    pub fn resize(&mut self) -> Schedule {
        if std::mem::replace(&mut self.resize_pending, true) {
            log::debug!("scheduler: coalescing resize");
        }
        self.request_render()
    }

    /// Drops a resize that has been delivered by other means.
    pub fn clear_pending_resize(&mut self) {
        self.resize_pending = false;
    }

    /// Enables or disables continuous rendering.
    ///
    /// Disabling never cancels the frame in flight; the loop drains to `Idle`
    /// when that frame finishes.
    pub fn set_animating(&mut self, animating: bool) -> Schedule {
        self.animating = animating;
        if animating {
            self.request_render()
        } else {
            Schedule::Idle
        }
    }

    /// Admits a host render callback.
    ///
    /// `surface_ready` is false when the surface is hidden, zero-sized, or the
    /// context could not be made current; the request is then dropped and the
    /// scheduler returns to `Idle`, keeping any pending resize for later.
    pub fn begin_frame(&mut self, surface_ready: bool) -> Result<FramePlan, SkipReason> {
        match self.state {
            SchedulerState::Idle => Err(SkipReason::NotRequested),
            SchedulerState::Rendering => Err(SkipReason::AlreadyRendering),
            SchedulerState::RenderRequested if !surface_ready => {
                self.state = SchedulerState::Idle;
                self.follow_up = false;
                log::debug!("scheduler: surface not ready, dropping request");
                Err(SkipReason::SurfaceNotReady)
            }
            SchedulerState::RenderRequested => {
                self.state = SchedulerState::Rendering;
                Ok(FramePlan {
                    resize: std::mem::take(&mut self.resize_pending),
                })
            }
        }
    }

    /// Completes the frame in flight.
    ///
    /// Re-enters `RenderRequested` while animating or when a request arrived
    /// mid-frame; otherwise returns to `Idle`.
    pub fn finish_frame(&mut self) -> Schedule {
        if self.state != SchedulerState::Rendering {
            return Schedule::Idle;
        }

        if self.animating || std::mem::take(&mut self.follow_up) {
            self.state = SchedulerState::RenderRequested;
            Schedule::Render
        } else {
            self.state = SchedulerState::Idle;
            Schedule::Idle
        }
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(false)
    }
}
