use std::time::Duration;

use crate::{
    draw::{cpu::CpuSurface, frame::FrameRGBA},
    field::renderer::{FrameStats, ParticleField},
    foundation::{
        core::{FrameIndex, Point, SurfaceSize},
        error::{FxError, FxResult},
    },
    host::{
        page::{HostEvent, PageDom, SessionConfig},
        scheduler::ManualScheduler,
        session::PageSession,
    },
};

/// Runs a page session headless, firing frame callbacks at a fixed rate.
pub struct OfflineDriver {
    session: PageSession<ManualScheduler, CpuSurface>,
    fps: u32,
    frame: u64,
}

impl OfflineDriver {
    pub fn new(cfg: &SessionConfig, viewport: SurfaceSize, fps: u32) -> FxResult<Self> {
        if fps == 0 {
            return Err(FxError::validation("fps must be non-zero"));
        }
        let page = PageDom::new(viewport).with_element(cfg.canvas_id.clone());
        let background = cfg.background;
        let session = PageSession::mount(&page, cfg, ManualScheduler::new(), |p| {
            CpuSurface::new(p.viewport, background)
        })?;
        Ok(Self {
            session,
            fps,
            frame: 0,
        })
    }

    pub fn field(&self) -> FxResult<&ParticleField> {
        self.session
            .field()
            .ok_or_else(|| FxError::render("particle field is not mounted"))
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn now(&self) -> Duration {
        Duration::from_secs_f64(self.frame as f64 / f64::from(self.fps))
    }

    pub fn send(&mut self, event: HostEvent) -> FxResult<Option<FrameStats>> {
        self.session.handle(event)
    }

    pub fn pointer(&mut self, pos: Point) -> FxResult<()> {
        self.send(HostEvent::PointerMove(pos)).map(|_| ())
    }

    /// Fires the pending frame callback.
    pub fn step(&mut self) -> FxResult<FrameStats> {
        let now = self.now();
        let due = self
            .session
            .scheduler_mut()
            .map(ManualScheduler::take_due)
            .unwrap_or_default();

        let mut stats = None;
        for id in due {
            if let Some(s) = self.send(HostEvent::Frame { id, now })? {
                stats = Some(s);
            }
        }
        let stats = stats.ok_or_else(|| FxError::render("no frame was drawn"))?;
        self.frame += 1;
        Ok(stats)
    }

    pub fn readback(&mut self) -> FxResult<FrameRGBA> {
        self.session
            .surface_mut()
            .ok_or_else(|| FxError::render("particle field is not mounted"))?
            .readback()
    }

    /// Draws frames up to and including `index` and returns its pixels.
    pub fn render_to(&mut self, index: FrameIndex) -> FxResult<FrameRGBA> {
        while self.frame <= index.0 {
            self.step()?;
        }
        self.readback()
    }

    /// Digest of each of the next `count` frames.
    pub fn digests(&mut self, count: u64) -> FxResult<Vec<u64>> {
        (0..count)
            .map(|_| {
                self.step()?;
                Ok(self.readback()?.digest())
            })
            .collect()
    }

    pub fn teardown(mut self) -> FxResult<()> {
        self.send(HostEvent::Teardown).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(seed: u64) -> OfflineDriver {
        let cfg = SessionConfig {
            seed: Some(seed),
            ..SessionConfig::default()
        };
        OfflineDriver::new(&cfg, SurfaceSize::new(64.0, 48.0).unwrap(), 60).unwrap()
    }

    #[test]
    fn steps_advance_frames_and_clock() {
        let mut d = driver(1);
        assert_eq!(d.now(), Duration::ZERO);
        let stats = d.step().unwrap();
        assert_eq!(stats.particles, 60);
        assert_eq!(d.frame(), 1);
        assert_eq!(d.field().unwrap().frames(), 1);
        let f = d.render_to(FrameIndex(4)).unwrap();
        assert_eq!(d.frame(), 5);
        assert_eq!((f.width, f.height), (64, 48));
    }

    #[test]
    fn digests_are_reproducible_per_seed() {
        let a = driver(5).digests(3).unwrap();
        let b = driver(5).digests(3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn zero_fps_is_rejected() {
        let cfg = SessionConfig::default();
        assert!(OfflineDriver::new(&cfg, SurfaceSize::new(8.0, 8.0).unwrap(), 0).is_err());
    }
}
