use std::time::Duration;

use crate::motion::ease::Ease;

/// A stat counter that counts up from zero once revealed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountUp {
    pub target: u64,
    pub duration: Duration,
    pub ease: Ease,
}

impl CountUp {
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            ease: Ease::OutCubic,
        }
    }

    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.target;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let v = self.ease.apply(t) * self.target as f64;
        (v.floor() as u64).min(self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_monotonically_to_target() {
        let c = CountUp::new(1200, Duration::from_secs(2));
        assert_eq!(c.value_at(Duration::ZERO), 0);
        let mut last = 0;
        for ms in (0..=2000).step_by(100) {
            let v = c.value_at(Duration::from_millis(ms));
            assert!(v >= last);
            last = v;
        }
        assert_eq!(c.value_at(Duration::from_secs(2)), 1200);
        assert_eq!(c.value_at(Duration::from_secs(9)), 1200);
    }

    #[test]
    fn instant_counter_shows_target() {
        assert_eq!(CountUp::new(7, Duration::ZERO).value_at(Duration::ZERO), 7);
    }
}
