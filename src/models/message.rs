//! Decoded bulletin (one per transmitted frame)

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Forecast, Part2};

/// Bulletin family, selected by the frame-start marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "KN01")]
    Kn01,
    SafetyNet,
    #[serde(rename = "NAVTEX")]
    Navtex,
}

impl MessageType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MessageType::Kn01 => "KN01",
            MessageType::SafetyNet => "SafetyNet",
            MessageType::Navtex => "NAVTEX",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific part of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MessageKind {
    #[serde(rename = "KN01")]
    Kn01 {
        /// WMO index of the reporting station
        station: String,
    },
    SafetyNet,
    #[serde(rename = "NAVTEX")]
    Navtex {
        /// Transmitter/subject/serial block after ZCZC, e.g. "FA01"
        marker: String,
        /// NAVAREA / METAREA tag when the bulletin names one
        #[serde(default, skip_serializing_if = "Option::is_none")]
        area: Option<String>,
    },
}

impl MessageKind {
    #[must_use]
    pub fn message_type(&self) -> MessageType {
        match self {
            MessageKind::Kn01 { .. } => MessageType::Kn01,
            MessageKind::SafetyNet => MessageType::SafetyNet,
            MessageKind::Navtex { .. } => MessageType::Navtex,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    /// Raw and annotated header lines in arrival order
    pub header: Vec<String>,
    pub part1: Vec<Forecast>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part2: Option<Part2>,
    pub part3: Vec<Forecast>,
}

impl Sections {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.part1.is_empty()
            && self.part2.is_none()
            && self.part3.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherMessage {
    #[serde(flatten)]
    pub kind: MessageKind,
    /// Raw date/time token as transmitted
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub sections: Sections,
}

impl WeatherMessage {
    #[must_use]
    pub fn new(kind: MessageKind) -> Self {
        Self {
            kind,
            date: String::new(),
            source: None,
            sections: Sections::default(),
        }
    }

    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.kind.message_type()
    }

    /// Whether the message carries anything worth committing
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.sections.is_empty()
    }
}
