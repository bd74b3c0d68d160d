//! Splitting decoded text into lines.

/// Splits text on `\n`, carrying an unterminated tail over to the next `feed`.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    pending: String,
}

impl LineSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `text` and returns the lines it completed, without their terminator.
    pub(crate) fn feed(&mut self, text: &str) -> Lines {
        // only the new text can hold a terminator, the carried-over tail has none
        let offset = self.pending.len();
        self.pending.push_str(text);
        let complete = match text.rfind('\n') {
            Some(idx) => {
                let tail = self.pending.split_off(offset + idx + 1);
                std::mem::replace(&mut self.pending, tail)
            }
            None => String::new(),
        };
        Lines {
            text: complete,
            pos: 0,
        }
    }

    /// Emits the carried-over tail as a last line, unless it is only whitespace.
    pub(crate) fn finish(&mut self) -> Option<String> {
        let tail = std::mem::take(&mut self.pending);
        (!tail.trim().is_empty()).then_some(tail)
    }
}

/// Lines completed by one [`LineSplitter::feed`] call.
#[derive(Debug)]
pub(crate) struct Lines {
    text: String,
    pos: usize,
}

impl Iterator for Lines {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let end = rest.find('\n')?;
        self.pos += end + 1;
        Some(rest[..end].to_string())
    }
}
