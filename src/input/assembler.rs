//! Reassembly of records written across several lines.
//!
//! The writer of the log only ever splits a record one way: a line that is exactly `{`, the
//! interior lines, and a line that is exactly `}`. Nothing else is recognized. Nested blocks,
//! records containing a lone `{` line of their own, and any other layout are deliberately
//! left unsupported; such input ends up as (bad) record candidates.

const OPEN: &str = "{";
const CLOSE: &str = "}";

/// What a single line did to the assembler.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The line opened a multi-line record
    Opened,
    /// The line was appended to the open record
    Buffered,
    /// A single line is a record candidate of its own
    Line(String),
    /// The line closed a multi-line record; carries the whole block
    Block(String),
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Idle,
    Accumulating(String),
}

#[derive(Debug, Default)]
pub(crate) struct RecordAssembler {
    state: State,
}

impl RecordAssembler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feeds one line. Trimming is used for sentinel comparison only; emitted text is untrimmed.
    pub(crate) fn push(&mut self, line: String) -> Step {
        match std::mem::take(&mut self.state) {
            State::Idle if line.trim() == OPEN => {
                self.state = State::Accumulating(line);
                Step::Opened
            }
            State::Idle => Step::Line(line),
            State::Accumulating(mut pending) => {
                pending.push_str(&line);
                if line.trim() == CLOSE {
                    Step::Block(pending)
                } else {
                    self.state = State::Accumulating(pending);
                    Step::Buffered
                }
            }
        }
    }

    pub(crate) fn is_accumulating(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Discards an unterminated record, returning its buffered text.
    pub(crate) fn abandon(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            State::Accumulating(text) => Some(text),
            State::Idle => None,
        }
    }
}
