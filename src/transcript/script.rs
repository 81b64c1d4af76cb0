use std::time::Duration;

use crate::foundation::error::{FxError, FxResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Command,
    Output,
    Blank,
}

impl LineKind {
    /// Pause after a line of this kind before the next one appears.
    pub fn delay_after(self) -> Duration {
        match self {
            Self::Command => Duration::from_millis(1200),
            Self::Output => Duration::from_millis(200),
            Self::Blank => Duration::from_millis(600),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    #[serde(default)]
    pub text: String,
}

impl TranscriptLine {
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Command,
            text: text.into(),
        }
    }

    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: LineKind::Output,
            text: text.into(),
        }
    }

    pub fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            text: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    lines: Vec<TranscriptLine>,
}

impl Script {
    pub fn new(lines: Vec<TranscriptLine>) -> FxResult<Self> {
        let script = Self { lines };
        script.validate()?;
        Ok(script)
    }

    pub fn from_json(json: &str) -> FxResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> FxResult<()> {
        if self.lines.is_empty() {
            return Err(FxError::validation("transcript script has no lines"));
        }
        if let Some(idx) = self
            .lines
            .iter()
            .position(|l| l.kind == LineKind::Blank && !l.text.is_empty())
        {
            return Err(FxError::validation(format!(
                "blank transcript line {idx} must not carry text"
            )));
        }
        Ok(())
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The hero section's terminal.
    pub fn default_hero() -> Self {
        use TranscriptLine as L;
        Self {
            lines: vec![
                L::command("$ whoami"),
                L::output("systems engineer / rust / networking"),
                L::blank(),
                L::command("$ cat stack.toml"),
                L::output("languages = [\"rust\", \"go\", \"c\"]"),
                L::output("focus     = [\"protocols\", \"storage\", \"observability\"]"),
                L::blank(),
                L::command("$ cargo build --release"),
                L::output("   Compiling portfolio v1.0.0"),
                L::output("    Finished `release` profile [optimized] target(s)"),
                L::blank(),
                L::command("$ ./portfolio --status"),
                L::output("projects: 12 shipped, 3 in flight"),
                L::output("latency:  p99 < 5ms"),
                L::output("uptime:   99.98%"),
                L::output("ready."),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_script_has_sixteen_lines() {
        let s = Script::default_hero();
        s.validate().unwrap();
        assert_eq!(s.len(), 16);
        assert_eq!(s.lines()[0].kind, LineKind::Command);
    }

    #[test]
    fn json_round_trip_uses_snake_case_kinds() {
        let s = Script::from_json(
            r#"[{"kind":"command","text":"$ ls"},{"kind":"blank"},{"kind":"output","text":"a"}]"#,
        )
        .unwrap();
        assert_eq!(s.lines()[1], TranscriptLine::blank());
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"command\""));
    }

    #[test]
    fn empty_and_malformed_scripts_are_rejected() {
        assert!(Script::new(vec![]).is_err());
        assert!(Script::from_json("[]").is_err());
        assert!(Script::from_json(r#"[{"kind":"blank","text":"x"}]"#).is_err());
        assert!(Script::from_json(r#"[{"kind":"prompt"}]"#).is_err());
    }

    #[test]
    fn delays_follow_line_kind() {
        assert_eq!(LineKind::Command.delay_after(), Duration::from_millis(1200));
        assert_eq!(LineKind::Output.delay_after(), Duration::from_millis(200));
        assert_eq!(LineKind::Blank.delay_after(), Duration::from_millis(600));
    }
}
