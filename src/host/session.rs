use std::time::Duration;

use crate::{
    draw::surface::Surface,
    field::renderer::{FrameStats, ParticleField},
    foundation::error::FxResult,
    host::{
        page::{HostEvent, PageDom, SessionConfig},
        scheduler::{AnimationLoop, FrameScheduler},
    },
    transcript::{
        player::{TerminalLog, TranscriptPlayer},
        script::Script,
    },
};

struct FieldMount<S: FrameScheduler, D: Surface> {
    field: ParticleField,
    surface: D,
    animation: AnimationLoop<S>,
}

struct TranscriptMount {
    player: TranscriptPlayer,
    log: TerminalLog,
}

/// The effects mounted on one page, from load until teardown.
///
/// Each effect mounts only when its element exists; a missing element leaves
/// that effect inert and every event aimed at it is ignored.
pub struct PageSession<S: FrameScheduler, D: Surface> {
    field: Option<FieldMount<S, D>>,
    transcript: Option<TranscriptMount>,
    torn_down: bool,
}

impl<S: FrameScheduler, D: Surface> PageSession<S, D> {
    #[tracing::instrument(skip_all, fields(canvas = %cfg.canvas_id, terminal = %cfg.terminal_id))]
    pub fn mount(
        page: &PageDom,
        cfg: &SessionConfig,
        scheduler: S,
        make_surface: impl FnOnce(&PageDom) -> FxResult<D>,
    ) -> FxResult<Self> {
        let field = if page.has_element(&cfg.canvas_id) {
            let field = match cfg.seed {
                Some(seed) => ParticleField::with_seed(page.viewport, cfg.field.clone(), seed)?,
                None => ParticleField::new(page.viewport, cfg.field.clone())?,
            };
            let mut animation = AnimationLoop::new(scheduler);
            animation.start();
            tracing::debug!(particles = field.particles().len(), "particle field mounted");
            Some(FieldMount {
                field,
                surface: make_surface(page)?,
                animation,
            })
        } else {
            tracing::debug!("no canvas element; particle field inert");
            None
        };

        let transcript = page.has_element(&cfg.terminal_id).then(|| {
            let script = cfg.script.clone().unwrap_or_else(Script::default_hero);
            TranscriptMount {
                player: TranscriptPlayer::with_initial_delay(
                    script,
                    Duration::from_millis(cfg.transcript_delay_ms),
                ),
                log: TerminalLog::new(),
            }
        });

        Ok(Self {
            field,
            transcript,
            torn_down: false,
        })
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref().map(|m| &m.field)
    }

    pub fn surface(&self) -> Option<&D> {
        self.field.as_ref().map(|m| &m.surface)
    }

    pub fn surface_mut(&mut self) -> Option<&mut D> {
        self.field.as_mut().map(|m| &mut m.surface)
    }

    pub fn scheduler_mut(&mut self) -> Option<&mut S> {
        self.field.as_mut().map(|m| m.animation.scheduler_mut())
    }

    pub fn animation(&self) -> Option<&AnimationLoop<S>> {
        self.field.as_ref().map(|m| &m.animation)
    }

    pub fn terminal_log(&self) -> Option<&TerminalLog> {
        self.transcript.as_ref().map(|t| &t.log)
    }

    pub fn transcript_finished(&self) -> Option<bool> {
        self.transcript.as_ref().map(|t| t.player.is_finished())
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Routes one host event. Returns the stats of the frame drawn, if any.
    pub fn handle(&mut self, event: HostEvent) -> FxResult<Option<FrameStats>> {
        if self.torn_down {
            return Ok(None);
        }

        match event {
            HostEvent::Resize(size) => {
                if let Some(m) = self.field.as_mut() {
                    m.surface.resize(size)?;
                    m.field.resize(size);
                }
                Ok(None)
            }
            HostEvent::PointerMove(pos) => {
                if let Some(m) = self.field.as_mut() {
                    m.field.pointer_moved(pos);
                }
                Ok(None)
            }
            HostEvent::PointerLeave => {
                if let Some(m) = self.field.as_mut() {
                    m.field.pointer_left();
                }
                Ok(None)
            }
            HostEvent::Visibility(visible) => {
                if let Some(m) = self.field.as_mut() {
                    m.animation.set_visible(visible);
                }
                Ok(None)
            }
            HostEvent::Frame { id, now } => {
                self.poll_transcript(now);
                let Some(m) = self.field.as_mut() else {
                    return Ok(None);
                };
                if !m.animation.accept(id) {
                    return Ok(None);
                }
                Ok(Some(m.field.tick(&mut m.surface)))
            }
            HostEvent::Clock { now } => {
                self.poll_transcript(now);
                Ok(None)
            }
            HostEvent::Teardown => {
                if let Some(m) = self.field.as_mut() {
                    m.animation.stop();
                }
                self.torn_down = true;
                tracing::debug!("page session torn down");
                Ok(None)
            }
        }
    }

    fn poll_transcript(&mut self, now: Duration) {
        if let Some(t) = self.transcript.as_mut() {
            t.player.poll(now, &mut t.log);
        }
    }
}
