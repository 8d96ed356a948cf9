use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Trailing "beat", "beats", "type beat" or "type beats", any case.
static BEAT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(type\s*)?beats?\s*$").unwrap());

/// Strip one trailing beat decoration from a channel name and trim the result.
///
/// ```
/// use beatlead_contact::normalize_producer;
///
/// assert_eq!(normalize_producer("Lil Producer Type Beats"), "Lil Producer");
/// assert_eq!(normalize_producer("Beats By Dre"), "Beats By Dre");
/// ```
pub fn normalize_producer(channel_name: &str) -> String {
    BEAT_SUFFIX.replace(channel_name, "").trim().to_string()
}

/// A producer name recovered from a video channel's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProducerName(String);

impl ProducerName {
    pub fn from_channel(channel_name: &str) -> Self {
        Self(normalize_producer(channel_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the whole channel name was decoration.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProducerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
