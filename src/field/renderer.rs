use rand::{SeedableRng as _, rngs::StdRng};

use crate::{
    draw::surface::Surface,
    field::{
        config::FieldConfig,
        particle::{self, Particle},
        pointer::PointerState,
    },
    foundation::{
        core::{Point, SurfaceSize},
        error::{FxError, FxResult},
        math::Fnv1a64,
    },
};

/// A proximity connection drawn between two particles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub links: usize,
}

/// Owns the particle population and the pointer it reacts to.
#[derive(Clone, Debug)]
pub struct ParticleField {
    cfg: FieldConfig,
    size: SurfaceSize,
    particles: Vec<Particle>,
    pointer: PointerState,
    frames: u64,
}

impl ParticleField {
    /// Seeds from the OS; use [`ParticleField::with_seed`] for reproducible output.
    pub fn new(size: SurfaceSize, cfg: FieldConfig) -> FxResult<Self> {
        Self::with_rng(size, cfg, &mut rand::rng())
    }

    pub fn with_seed(size: SurfaceSize, cfg: FieldConfig, seed: u64) -> FxResult<Self> {
        Self::with_rng(size, cfg, &mut StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: SurfaceSize, cfg: FieldConfig, rng: &mut impl rand::Rng) -> FxResult<Self> {
        cfg.validate()?;
        let particles = (0..cfg.count)
            .map(|_| particle::spawn(rng, size, &cfg))
            .collect();
        Ok(Self::from_parts(size, cfg, particles))
    }

    /// Builds a field around an explicit population.
    pub fn from_particles(
        size: SurfaceSize,
        cfg: FieldConfig,
        particles: Vec<Particle>,
    ) -> FxResult<Self> {
        cfg.validate()?;
        if particles
            .iter()
            .any(|p| !(p.pos.is_finite() && p.vel.is_finite() && p.radius.is_finite()))
        {
            return Err(FxError::validation("particle state must be finite"));
        }
        Ok(Self::from_parts(size, cfg, particles))
    }

    fn from_parts(size: SurfaceSize, cfg: FieldConfig, particles: Vec<Particle>) -> Self {
        Self {
            cfg,
            size,
            particles,
            pointer: PointerState::default(),
            frames: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.cfg
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer.position()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Existing particles keep their positions.
    pub fn resize(&mut self, size: SurfaceSize) {
        tracing::debug!(width = size.width, height = size.height, "field resized");
        self.size = size;
    }

    pub fn pointer_moved(&mut self, pos: Point) {
        self.pointer.moved(pos);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    /// Every unordered pair closer than the link distance, in index order.
    pub fn links(&self) -> Vec<Link> {
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let distance = a.pos.distance(b.pos);
                if let Some(opacity) = self.cfg.link_opacity(distance) {
                    out.push(Link {
                        a: i,
                        b: j,
                        distance,
                        opacity,
                    });
                }
            }
        }
        out
    }

    /// Advances every particle by one frame without drawing.
    pub fn update(&mut self) {
        let pointer = self.pointer.position();
        for p in &mut self.particles {
            particle::step(p, self.size, pointer, &self.cfg);
        }
        self.frames += 1;
    }

    /// Renders one frame: links at the current positions, then motion, then
    /// particles at their new positions.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> FrameStats {
        surface.clear();

        let links = self.links();
        for link in &links {
            surface.stroke_line(
                self.particles[link.a].pos,
                self.particles[link.b].pos,
                self.cfg.link_width,
                self.cfg.link_color.with_opacity(link.opacity),
            );
        }

        self.update();

        let fill = self
            .cfg
            .particle_color
            .with_opacity(self.cfg.particle_opacity);
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius, fill);
        }

        let stats = FrameStats {
            particles: self.particles.len(),
            links: links.len(),
        };
        tracing::trace!(frame = self.frames, links = stats.links, "field tick");
        stats
    }

    /// Stable hash of the particle state, for golden-output comparisons.
    pub fn state_digest(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(self.particles.len() as u64);
        for p in &self.particles {
            h.write_f64(p.pos.x);
            h.write_f64(p.pos.y);
            h.write_f64(p.vel.x);
            h.write_f64(p.vel.y);
            h.write_f64(p.radius);
        }
        h.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::surface::RecordingSurface, foundation::core::Vec2};

    fn size() -> SurfaceSize {
        SurfaceSize::new(800.0, 600.0).unwrap()
    }

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(Point::new(x, y), Vec2::ZERO, 1.0)
    }

    #[test]
    fn seeded_fields_match() {
        let a = ParticleField::with_seed(size(), FieldConfig::default(), 42).unwrap();
        let b = ParticleField::with_seed(size(), FieldConfig::default(), 42).unwrap();
        let c = ParticleField::with_seed(size(), FieldConfig::default(), 43).unwrap();
        assert_eq!(a.particles().len(), 60);
        assert_eq!(a.state_digest(), b.state_digest());
        assert_ne!(a.state_digest(), c.state_digest());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = FieldConfig {
            radius_min: 5.0,
            radius_max: 1.0,
            ..FieldConfig::default()
        };
        assert!(ParticleField::with_seed(size(), cfg, 1).is_err());
    }

    #[test]
    fn links_respect_threshold() {
        let field = ParticleField::from_particles(
            size(),
            FieldConfig::default(),
            vec![still(0.0, 0.0), still(100.0, 0.0), still(250.0, 0.0)],
        )
        .unwrap();
        let links = field.links();
        // 0-1 at 100 and 1-2 at 150 (not linked), 0-2 at 250.
        assert_eq!(links.len(), 1);
        assert_eq!((links[0].a, links[0].b), (0, 1));
        assert!((links[0].opacity - 0.05).abs() < 1e-12);
    }

    #[test]
    fn tick_draws_links_before_circles() {
        let mut field = ParticleField::from_particles(
            size(),
            FieldConfig::default(),
            vec![still(10.0, 10.0), still(20.0, 10.0)],
        )
        .unwrap();
        let mut surface = RecordingSurface::new(size());
        let stats = field.tick(&mut surface);
        assert_eq!(
            stats,
            FrameStats {
                particles: 2,
                links: 1
            }
        );
        let kinds: Vec<_> = surface
            .cmds()
            .iter()
            .map(|c| match c {
                crate::draw::surface::DrawCmd::Clear => 'c',
                crate::draw::surface::DrawCmd::Line { .. } => 'l',
                crate::draw::surface::DrawCmd::Circle { .. } => 'o',
            })
            .collect();
        assert_eq!(kinds, vec!['c', 'l', 'o', 'o']);
        assert_eq!(field.frames(), 1);
    }

    #[test]
    fn resize_keeps_positions() {
        let mut field = ParticleField::with_seed(size(), FieldConfig::default(), 3).unwrap();
        let before: Vec<_> = field.particles().iter().map(|p| p.pos).collect();
        field.resize(SurfaceSize::new(100.0, 100.0).unwrap());
        let after: Vec<_> = field.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(field.size().width, 100.0);
    }

    #[test]
    fn pointer_left_disables_attraction() {
        let mut field = ParticleField::from_particles(
            size(),
            FieldConfig::default(),
            vec![still(110.0, 100.0)],
        )
        .unwrap();
        field.pointer_moved(Point::new(100.0, 100.0));
        field.pointer_left();
        field.update();
        assert_eq!(field.particles()[0].pos, Point::new(110.0, 100.0));
    }
}
