use std::{collections::BTreeSet, time::Duration};

use crate::{
    field::config::FieldConfig,
    foundation::core::{Point, Rgba8, SurfaceSize},
    host::scheduler::FrameRequestId,
    transcript::script::Script,
};

pub const DEFAULT_CANVAS_ID: &str = "particles";
pub const DEFAULT_TERMINAL_ID: &str = "terminal-body";

/// What the session can see of the hosting page.
#[derive(Clone, Debug)]
pub struct PageDom {
    pub viewport: SurfaceSize,
    element_ids: BTreeSet<String>,
}

impl PageDom {
    pub fn new(viewport: SurfaceSize) -> Self {
        Self {
            viewport,
            element_ids: BTreeSet::new(),
        }
    }

    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        self.element_ids.insert(id.into());
        self
    }

    pub fn has_element(&self, id: &str) -> bool {
        self.element_ids.contains(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resize(SurfaceSize),
    PointerMove(Point),
    PointerLeave,
    Visibility(bool),
    /// A frame callback fired; `now` is time since the session was mounted.
    Frame { id: FrameRequestId, now: Duration },
    /// A timer fired without a frame (the transcript still advances).
    Clock { now: Duration },
    Teardown,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_id: String,
    pub terminal_id: String,
    pub field: FieldConfig,
    /// Surface clear colour; `None` leaves the canvas transparent.
    pub background: Option<Rgba8>,
    /// Fixed RNG seed for reproducible particle layouts.
    pub seed: Option<u64>,
    pub transcript_delay_ms: u64,
    pub script: Option<Script>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_id: DEFAULT_CANVAS_ID.to_string(),
            terminal_id: DEFAULT_TERMINAL_ID.to_string(),
            field: FieldConfig::default(),
            background: None,
            seed: None,
            transcript_delay_ms: 0,
            script: None,
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> crate::foundation::error::FxResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.field.validate()?;
        if let Some(script) = &cfg.script {
            script.validate()?;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_reports_present_elements_only() {
        let page = PageDom::new(SurfaceSize::new(10.0, 10.0).unwrap()).with_element("particles");
        assert!(page.has_element("particles"));
        assert!(!page.has_element("terminal-body"));
    }

    #[test]
    fn session_config_json_defaults_and_validation() {
        let cfg = SessionConfig::from_json(r#"{ "seed": 9, "field": { "count": 5 } }"#).unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.field.count, 5);
        assert_eq!(cfg.canvas_id, DEFAULT_CANVAS_ID);

        assert!(SessionConfig::from_json(r#"{ "field": { "link_distance": -1 } }"#).is_err());
        assert!(SessionConfig::from_json(r#"{ "script": [] }"#).is_err());
    }
}
