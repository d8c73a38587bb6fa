//! Line splitting and frame-start detection

use std::sync::LazyLock;

use regex::Regex;

use crate::models::MessageKind;

static NAVTEX_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^ZCZC\s+([A-Z]{2}\d{2})$").expect("static pattern compiles")
});
static KN01_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<station>\d{5})\s+(?P<date>\d{6})(?:\s+(?P<groups>.*))?$")
        .expect("static pattern compiles")
});

/// A line that opens a new frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStart<'a> {
    /// `ZCZC ...` line of a SafetyNet or NAVTEX bulletin
    Bulletin { kind: MessageKind, line: &'a str },
    /// `SSSSS DDDDDD [groups...]` line of a KN01 report
    Kn01 {
        station: &'a str,
        date: &'a str,
        groups: &'a str,
    },
}

/// Trimmed, non-blank lines of `input`, whatever its line endings.
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Classify a line as a frame start.
#[must_use]
pub fn frame_start(line: &str) -> Option<FrameStart<'_>> {
    if line.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("ZCZC")) {
        let kind = match NAVTEX_MARKER.captures(line) {
            Some(caps) => MessageKind::Navtex {
                marker: caps[1].to_uppercase(),
                area: None,
            },
            None => MessageKind::SafetyNet,
        };
        return Some(FrameStart::Bulletin { kind, line });
    }

    let caps = KN01_START.captures(line)?;
    let station = caps.name("station")?.as_str();
    let date = caps.name("date")?.as_str();
    let groups = caps.name("groups").map_or("", |m| m.as_str());
    Some(FrameStart::Kn01 {
        station,
        date,
        groups,
    })
}
