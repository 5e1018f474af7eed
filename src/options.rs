//! Configuration options for the text writer.
//!
//! - [`TextOptions`]: Main configuration struct
//! - [`SequenceClose`]: How closing a sequence interacts with the next sibling token
//!
//! ## Examples
//!
//! ```rust
//! use uniform_text::{SequenceClose, TextOptions};
//!
//! let options = TextOptions::new()
//!     .with_sequence_close(SequenceClose::Legacy)
//!     .with_initial_capacity(1024);
//! assert_eq!(options.sequence_close, SequenceClose::Legacy);
//! ```

/// Separator behavior after a sequence or tuple is closed.
///
/// Older writers closed a sequence without recording that a value had just
/// been written, so an empty sequence followed by a sibling came out as
/// `{ }5`. Readers accept both forms because `}` is itself a delimiter.
///
/// # Examples
///
/// ```rust
/// use uniform_text::SequenceClose;
///
/// assert_eq!(SequenceClose::default(), SequenceClose::Separated);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SequenceClose {
    /// A closed sequence counts as a value: the next sibling gets `, `.
    #[default]
    Separated,
    /// Leave the separator state untouched, byte-compatible with old producers.
    Legacy,
}

/// Configuration options for text serialization.
#[derive(Clone, Debug)]
pub struct TextOptions {
    pub sequence_close: SequenceClose,
    pub initial_capacity: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        TextOptions {
            sequence_close: SequenceClose::default(),
            initial_capacity: 256,
        }
    }
}

impl TextOptions {
    /// Creates default options (separated sequence close, 256-byte buffer).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uniform_text::TextOptions;
    ///
    /// let options = TextOptions::new();
    /// assert_eq!(options.initial_capacity, 256);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reproduce the historical writer output byte for byte.
    #[must_use]
    pub fn legacy() -> Self {
        TextOptions {
            sequence_close: SequenceClose::Legacy,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_sequence_close(mut self, sequence_close: SequenceClose) -> Self {
        self.sequence_close = sequence_close;
        self
    }

    /// Sets how many bytes `to_string` reserves up front.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TextOptions::default();
        assert_eq!(options.sequence_close, SequenceClose::Separated);
        assert_eq!(options.initial_capacity, 256);
    }

    #[test]
    fn test_legacy_only_changes_sequence_close() {
        let options = TextOptions::legacy();
        assert_eq!(options.sequence_close, SequenceClose::Legacy);
        assert_eq!(options.initial_capacity, TextOptions::new().initial_capacity);
    }

    #[test]
    fn test_builder_chain() {
        let options = TextOptions::legacy()
            .with_sequence_close(SequenceClose::Separated)
            .with_initial_capacity(0);
        assert_eq!(options.sequence_close, SequenceClose::Separated);
        assert_eq!(options.initial_capacity, 0);
    }
}
