use std::{collections::BTreeMap, time::Duration};

use crate::{
    foundation::error::{FxError, FxResult},
    motion::ease::Ease,
};

/// Document offsets of in-page anchors.
#[derive(Clone, Debug, Default)]
pub struct AnchorMap {
    offsets: BTreeMap<String, f64>,
    /// Height of the fixed header; targets land just below it.
    header_offset: f64,
}

impl AnchorMap {
    pub fn new(header_offset: f64) -> Self {
        Self {
            offsets: BTreeMap::new(),
            header_offset,
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, offset: f64) {
        self.offsets.insert(id.into(), offset);
    }

    /// Resolves `#id` (or a bare `id`) to a scroll position; `None` for an
    /// unknown anchor or a bare `#`.
    pub fn resolve(&self, href: &str) -> Option<f64> {
        let id = href.strip_prefix('#').unwrap_or(href);
        if id.is_empty() {
            return None;
        }
        self.offsets
            .get(id)
            .map(|&top| (top - self.header_offset).max(0.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub ease: Ease,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, duration: Duration, ease: Ease) -> FxResult<Self> {
        if !(from.is_finite() && to.is_finite()) {
            return Err(FxError::validation("scroll endpoints must be finite"));
        }
        Ok(Self {
            from,
            to,
            duration,
            ease,
        })
    }

    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.ease.lerp(self.from, self.to, t)
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}
