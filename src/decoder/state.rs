//! Parser states and the `(message type, state)` dispatch table

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::builder::Frame;
use super::{kn01, navtex, safetynet};
use crate::models::MessageType;

/// Position of the parser inside one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Initial,
    Header,
    #[serde(rename = "PART_1")]
    Part1,
    #[serde(rename = "PART_2")]
    Part2,
    #[serde(rename = "PART_3")]
    Part3,
    Synopsis,
    IceReport,
    Forecast,
    End,
}

impl State {
    /// Whether the frame has seen its end marker
    #[must_use]
    pub fn is_closed(self) -> bool {
        matches!(self, State::Initial | State::End)
    }
}

/// Result of handling one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(State),
}

/// One trimmed input line plus its upper-cased form used for keyword tests
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub text: &'a str,
    pub upper: String,
}

impl<'a> Line<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            upper: text.to_uppercase(),
        }
    }
}

pub type Handler = fn(&mut Frame<'_>, &Line<'_>) -> Transition;

/// Look up the handler for a message type in a given state.
#[must_use]
pub fn handler(message_type: MessageType, state: State) -> Handler {
    use MessageType::{Kn01, Navtex, SafetyNet};
    use State::*;

    match (message_type, state) {
        (_, Initial | End) => closed,

        (Kn01, Header | Part1 | Part3 | Forecast) => kn01::groups,
        (Kn01, Part2 | Synopsis | IceReport) => closed,

        (SafetyNet, Header) => safetynet::header,
        (SafetyNet, Part1 | Part3 | Forecast) => safetynet::forecast,
        (SafetyNet, Part2 | Synopsis) => safetynet::synopsis,
        (SafetyNet, IceReport) => safetynet::ice_report,

        (Navtex, Header) => navtex::header,
        (Navtex, Part1 | Part3 | Forecast) => navtex::forecast,
        (Navtex, Part2 | Synopsis) => safetynet::synopsis,
        (Navtex, IceReport) => safetynet::ice_report,
    }
}

fn closed(_frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    trace!("Ignoring line after end of bulletin: {}", line.text);
    Transition::Stay
}
