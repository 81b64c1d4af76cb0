use std::time::Duration;

use crate::transcript::script::{LineKind, Script, TranscriptLine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: LineKind,
    pub text: String,
    /// Player time at which the line was appended.
    pub at: Duration,
}

/// Append-only terminal output that keeps its view pinned to the last line.
#[derive(Clone, Debug, Default)]
pub struct TerminalLog {
    entries: Vec<LogEntry>,
    scroll_offset: usize,
}

impl TerminalLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.scroll_offset = self.entries.len();
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_scrolled_to_end(&self) -> bool {
        self.scroll_offset == self.entries.len()
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for e in &self.entries {
            out.push_str(&e.text);
            out.push('\n');
        }
        out
    }
}

/// Plays a script one line at a time against a caller-supplied clock.
#[derive(Clone, Debug)]
pub struct TranscriptPlayer {
    script: Script,
    cursor: usize,
    next_due: Duration,
}

impl TranscriptPlayer {
    pub fn new(script: Script) -> Self {
        Self::with_initial_delay(script, Duration::ZERO)
    }

    pub fn with_initial_delay(script: Script, initial_delay: Duration) -> Self {
        Self {
            script,
            cursor: 0,
            next_due: initial_delay,
        }
    }

    /// When the next line becomes due; `None` once the script is exhausted.
    pub fn next_due(&self) -> Option<Duration> {
        (!self.is_finished()).then_some(self.next_due)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.script.len()
    }

    pub fn played(&self) -> usize {
        self.cursor
    }

    /// Appends every line due at or before `now`, in script order.
    pub fn poll(&mut self, now: Duration, log: &mut TerminalLog) -> usize {
        let mut appended = 0;
        while let Some(due) = self.next_due()
            && due <= now
        {
            let TranscriptLine { kind, text } = self.script.lines()[self.cursor].clone();
            log.push(LogEntry {
                kind,
                text,
                at: due,
            });
            self.cursor += 1;
            self.next_due = due + kind.delay_after();
            appended += 1;
        }
        if appended > 0 {
            tracing::trace!(appended, played = self.cursor, "transcript advanced");
            if self.is_finished() {
                tracing::debug!(lines = self.cursor, "transcript finished");
            }
        }
        appended
    }
}
