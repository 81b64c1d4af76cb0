use rand::Rng;

use crate::{
    field::config::FieldConfig,
    foundation::core::{Point, SurfaceSize, Vec2},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Particle {
    pub pos: Point,
    /// Displacement per frame.
    pub vel: Vec2,
    pub radius: f64,
}

impl Particle {
    pub fn new(pos: Point, vel: Vec2, radius: f64) -> Self {
        Self { pos, vel, radius }
    }
}

pub fn spawn(rng: &mut impl Rng, size: SurfaceSize, cfg: &FieldConfig) -> Particle {
    let s = cfg.max_speed;
    Particle {
        pos: Point::new(
            rng.random_range(0.0..=size.width),
            rng.random_range(0.0..=size.height),
        ),
        vel: Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s)),
        radius: rng.random_range(cfg.radius_min..=cfg.radius_max),
    }
}

/// One frame of motion: drift, pointer pull, then edge reflection.
pub fn step(p: &mut Particle, size: SurfaceSize, pointer: Option<Point>, cfg: &FieldConfig) {
    let prev = p.pos;
    p.pos += p.vel;

    if let Some(target) = pointer {
        attract(p, target, cfg.attract_radius, cfg.attract_strength);
    }

    let (x, vx) = reflect(prev.x, p.pos.x, p.vel.x, size.width);
    let (y, vy) = reflect(prev.y, p.pos.y, p.vel.y, size.height);
    p.pos = Point::new(x, y);
    p.vel = Vec2::new(vx, vy);
}

pub fn attract(p: &mut Particle, target: Point, radius: f64, strength: f64) {
    let to_target = target - p.pos;
    if to_target.hypot() < radius {
        p.pos += to_target * strength;
    }
}

/// Confines one axis to `[0, hi]`.
///
/// A particle that was inside and crossed an edge is mirrored back inside with
/// the velocity component flipped. A particle that was already outside (after a
/// shrinking resize) keeps its position; its velocity is pointed back inward so
/// it drifts home.
/// With zero velocity on this axis it has no drift of its own and stays where
/// the resize left it.
fn reflect(prev: f64, pos: f64, vel: f64, hi: f64) -> (f64, f64) {
    let was_inside = (0.0..=hi).contains(&prev);
    if pos < 0.0 {
        let vel = if vel < 0.0 { -vel } else { vel };
        let pos = if was_inside { (-pos).min(hi) } else { pos };
        (pos, vel)
    } else if pos > hi {
        let vel = if vel > 0.0 { -vel } else { vel };
        let pos = if was_inside {
            (2.0 * hi - pos).max(0.0)
        } else {
            pos
        };
        (pos, vel)
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;

    fn size() -> SurfaceSize {
        SurfaceSize::new(100.0, 50.0).unwrap()
    }

    #[test]
    fn spawn_respects_configured_ranges() {
        let cfg = FieldConfig::default();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = spawn(&mut rng, size(), &cfg);
            assert!(size().contains(p.pos));
            assert!(p.vel.x.abs() <= 0.2 && p.vel.y.abs() <= 0.2);
            assert!((0.5..=2.0).contains(&p.radius));
        }
    }

    #[test]
    fn crossing_left_edge_mirrors_and_flips() {
        let cfg = FieldConfig::default();
        let mut p = Particle::new(Point::new(0.1, 25.0), Vec2::new(-0.2, 0.0), 1.0);
        step(&mut p, size(), None, &cfg);
        assert!((p.pos.x - 0.1).abs() < 1e-12);
        assert_eq!(p.vel.x, 0.2);
    }

    #[test]
    fn crossing_bottom_edge_mirrors_and_flips() {
        let cfg = FieldConfig::default();
        let mut p = Particle::new(Point::new(10.0, 49.95), Vec2::new(0.0, 0.15), 1.0);
        step(&mut p, size(), None, &cfg);
        assert!(p.pos.y <= 50.0);
        assert_eq!(p.vel.y, -0.15);
    }

    #[test]
    fn particle_outside_after_shrink_heads_back_without_snapping() {
        let cfg = FieldConfig::default();
        let mut p = Particle::new(Point::new(150.0, 25.0), Vec2::new(0.1, 0.0), 1.0);
        step(&mut p, size(), None, &cfg);
        assert!((p.pos.x - 150.1).abs() < 1e-12);
        assert_eq!(p.vel.x, -0.1);

        for _ in 0..600 {
            step(&mut p, size(), None, &cfg);
        }
        assert!(size().contains(p.pos));
    }

    #[test]
    fn stationary_axis_outside_after_shrink_stays_put() {
        let cfg = FieldConfig::default();
        let mut p = Particle::new(Point::new(150.0, 25.0), Vec2::new(0.0, 0.1), 1.0);
        for _ in 0..10_000 {
            step(&mut p, size(), None, &cfg);
        }
        assert_eq!(p.pos.x, 150.0);
        assert_eq!(p.vel.x, 0.0);
        assert!((0.0..=50.0).contains(&p.pos.y));
        assert!(!size().contains(p.pos));
    }

    #[test]
    fn attraction_only_inside_radius() {
        let mut near = Particle::new(Point::new(10.0, 0.0), Vec2::ZERO, 1.0);
        attract(&mut near, Point::ZERO, 120.0, 0.01);
        assert!((near.pos.x - 9.9).abs() < 1e-12);

        let mut far = Particle::new(Point::new(130.0, 0.0), Vec2::ZERO, 1.0);
        attract(&mut far, Point::ZERO, 120.0, 0.01);
        assert_eq!(far.pos.x, 130.0);
    }
}
