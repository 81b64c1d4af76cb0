use std::collections::BTreeSet;

/// Identifies one outstanding per-frame callback request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRequestId(pub u64);

/// The host's per-frame callback primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;

    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// In-process scheduler: requests queue up until the driver fires them.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: BTreeSet<FrameRequestId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Removes and returns every outstanding request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        self.pending.remove(&id);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Drives a per-frame callback chain through a [`FrameScheduler`].
///
/// At most one frame request is outstanding. Hiding the page cancels it and
/// showing the page requests a fresh one; `stop` is terminal.
#[derive(Debug)]
pub struct AnimationLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameRequestId>,
    state: LoopState,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            state: LoopState::Idle,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state == LoopState::Stopped
    }

    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Returns `true` when `id` is the live request; the next frame is then
    /// requested before returning.
    pub fn accept(&mut self, id: FrameRequestId) -> bool {
        if self.state != LoopState::Running || self.pending != Some(id) {
            return false;
        }
        self.pending = Some(self.scheduler.request_frame());
        true
    }

    pub fn set_visible(&mut self, visible: bool) {
        match (self.state, visible) {
            (LoopState::Running, false) => {
                self.cancel_pending();
                self.state = LoopState::Paused;
            }
            (LoopState::Paused, true) => {
                self.state = LoopState::Running;
                self.pending = Some(self.scheduler.request_frame());
            }
            _ => {}
        }
    }

    pub fn stop(&mut self) {
        self.cancel_pending();
        self.state = LoopState::Stopped;
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}
