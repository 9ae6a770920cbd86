/// A search input tagged with the sequence number it was issued under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub sequence: u64,
}

impl SearchQuery {
    /// Successor query for a new keystroke.
    pub fn next(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sequence: self.sequence.wrapping_add(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Whether a response issued for `sequence` may still be shown.
    pub fn is_current(&self, sequence: u64) -> bool {
        self.sequence == sequence
    }
}
