use std::fmt;

/// Capacity of a compiler/linker log, terminator included.
pub const LOG_CAPACITY: usize = 1024;

/// Compiler or linker log bounded to a fixed capacity.
///
/// Invariant: `as_str().len() < capacity`. One byte of the capacity is kept for
/// the terminator a fixed-size driver buffer would need, so at most
/// `capacity - 1` bytes of text survive. Truncation always lands on a UTF-8
/// character boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoLog {
    text: String,
    truncated: bool,
}

impl InfoLog {
    /// Bounds `raw` to [`LOG_CAPACITY`].
    pub fn new(raw: impl Into<String>) -> Self {
        Self::bounded(raw, LOG_CAPACITY)
    }

    /// Bounds `raw` to `capacity` (terminator included).
    pub fn bounded(raw: impl Into<String>, capacity: usize) -> Self {
        let mut text = raw.into();
        let limit = capacity.saturating_sub(1);

        let truncated = text.len() > limit;
        if truncated {
            let mut end = limit;
            while !text.is_char_boundary(end) {
                end -= 1;
            }
            text.truncate(end);
        }

        Self { text, truncated }
    }

    /// Builds a log from what the driver returned after a failed build.
    ///
    /// Some drivers report failure with an empty log; a placeholder keeps the
    /// diagnostic from being blank.
    pub(crate) fn from_driver(raw: String, capacity: usize) -> Self {
        let raw = raw.trim_end_matches('\0');
        if raw.trim().is_empty() {
            Self::bounded("driver returned no info log", capacity)
        } else {
            Self::bounded(raw, capacity)
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the original log did not fit.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for InfoLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_log_is_kept_whole() {
        let log = InfoLog::new("0:1(1): error: syntax error");
        assert_eq!(log.as_str(), "0:1(1): error: syntax error");
        assert!(!log.is_truncated());
    }

    #[test]
    fn log_exactly_at_capacity_loses_one_byte_for_terminator() {
        let raw = "x".repeat(LOG_CAPACITY);
        let log = InfoLog::new(raw);
        assert_eq!(log.len(), LOG_CAPACITY - 1);
        assert!(log.is_truncated());
    }

    #[test]
    fn log_one_below_capacity_fits() {
        let raw = "x".repeat(LOG_CAPACITY - 1);
        let log = InfoLog::new(raw);
        assert_eq!(log.len(), LOG_CAPACITY - 1);
        assert!(!log.is_truncated());
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; a limit of 4 bytes would split the third one.
        let log = InfoLog::bounded("ééé", 5);
        assert_eq!(log.as_str(), "éé");
        assert!(log.is_truncated());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let log = InfoLog::bounded("error", 0);
        assert!(log.is_empty());
    }

    #[test]
    fn empty_driver_log_gets_placeholder() {
        let log = InfoLog::from_driver(String::new(), LOG_CAPACITY);
        assert!(!log.is_empty());
    }

    #[test]
    fn driver_log_drops_trailing_nuls() {
        let log = InfoLog::from_driver("error\0\0".to_owned(), LOG_CAPACITY);
        assert_eq!(log.as_str(), "error");
    }
}
