//! Event records emitted by `rg --json`
//!
//! Each line of ripgrep's JSON output is `{"type": ..., "data": {...}}`. The
//! tag is decoded first and selects the shape of `data`. Tags this crate
//! does not know about decode to [`Event::Unknown`] so newer ripgrep
//! releases never break the stream.

use super::number;
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;

/// Text or raw bytes as ripgrep reports them
///
/// ripgrep uses `{"text": ...}` for valid UTF-8 and `{"bytes": <base64>}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Data {
    Text { text: String },
    Bytes { bytes: String },
}

impl Data {
    /// The UTF-8 text, if ripgrep could provide it
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Bytes { .. } => None,
        }
    }

    /// Text for display; base64 payloads are shown as-is
    #[must_use]
    pub fn to_lossy(&self) -> Cow<'_, str> {
        match self {
            Self::Text { text } => Cow::Borrowed(text),
            Self::Bytes { bytes } => Cow::Owned(format!("<base64:{bytes}>")),
        }
    }
}

/// One matched span inside a line, as byte offsets into the line text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submatch {
    #[serde(rename = "match")]
    pub matched: Data,
    #[serde(deserialize_with = "number::u64")]
    pub start: u64,
    #[serde(deserialize_with = "number::u64")]
    pub end: u64,
}

/// Payload shared by `match` and `context` records
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Match {
    pub path: Data,
    pub lines: Data,
    /// `None` when ripgrep runs without line numbers
    #[serde(default, deserialize_with = "number::option_u64")]
    pub line_number: Option<u64>,
    #[serde(deserialize_with = "number::u64")]
    pub absolute_offset: u64,
    #[serde(default)]
    pub submatches: Vec<Submatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Begin {
    pub path: Data,
}

/// Wall-clock time as ripgrep reports it
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Elapsed {
    #[serde(deserialize_with = "number::u64")]
    pub secs: u64,
    #[serde(deserialize_with = "number::u64")]
    pub nanos: u64,
    #[serde(default)]
    pub human: String,
}

impl Elapsed {
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.secs) + Duration::from_nanos(self.nanos)
    }
}

/// Per-file or whole-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub elapsed: Elapsed,
    #[serde(deserialize_with = "number::u64")]
    pub searches: u64,
    #[serde(deserialize_with = "number::u64")]
    pub searches_with_match: u64,
    #[serde(deserialize_with = "number::u64")]
    pub bytes_searched: u64,
    #[serde(deserialize_with = "number::u64")]
    pub bytes_printed: u64,
    #[serde(deserialize_with = "number::u64")]
    pub matched_lines: u64,
    #[serde(deserialize_with = "number::u64")]
    pub matches: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct End {
    pub path: Data,
    #[serde(default)]
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Summary {
    /// ripgrep leaves this out of the summary record
    #[serde(default)]
    pub path: Option<Data>,
    pub elapsed_total: Elapsed,
    #[serde(default)]
    pub stats: Stats,
}

/// A decoded line of ripgrep output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin(Begin),
    Match(Match),
    /// Same shape as `Match`, but the line only surrounds a match
    Context(Match),
    End(End),
    Summary(Summary),
    /// A tag this crate does not understand; carries the tag
    Unknown(String),
}

/// Wire shape: the tag first, the payload kept opaque until the tag is known
#[derive(Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl Event {
    /// Decode one line of `rg --json` output
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if the line is not JSON, lacks a `type`
    /// tag, or its payload does not fit the shape selected by the tag.
    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        let raw: RawEvent = serde_json::from_str(line)?;
        let event = match raw.kind.as_str() {
            "begin" => Self::Begin(serde_json::from_value(raw.data)?),
            "match" => Self::Match(serde_json::from_value(raw.data)?),
            "context" => Self::Context(serde_json::from_value(raw.data)?),
            "end" => Self::End(serde_json::from_value(raw.data)?),
            "summary" => Self::Summary(serde_json::from_value(raw.data)?),
            _ => Self::Unknown(raw.kind),
        };
        Ok(event)
    }

    /// The wire tag of this event
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Begin(_) => "begin",
            Self::Match(_) => "match",
            Self::Context(_) => "context",
            Self::End(_) => "end",
            Self::Summary(_) => "summary",
            Self::Unknown(kind) => kind,
        }
    }

    /// The line payload of `match` and `context` records that carry at least one submatch
    #[must_use]
    pub fn matched_line(&self) -> Option<&Match> {
        match self {
            Self::Match(data) | Self::Context(data) if !data.submatches.is_empty() => Some(data),
            _ => None,
        }
    }
}
