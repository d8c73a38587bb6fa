//! KN01 coastal station reports
//!
//! A report starts with `SSSSS DDDDDD` (station index, day/hour/minute)
//! followed by 5-digit groups. `333` and `555` switch sections, a trailing
//! `=` closes the station record.

use tracing::debug;

use super::builder::{DecodeContext, Frame, Section};
use super::state::{Line, State, Transition};
use super::wmo;
use crate::models::{Forecast, MessageKind};

/// Open a KN01 frame from its station/date line and decode the groups that
/// follow on the same line.
#[must_use]
pub fn start<'a>(ctx: DecodeContext<'a>, station: &str, date: &str, groups: &str) -> Frame<'a> {
    let kind = MessageKind::Kn01 {
        station: station.to_string(),
    };
    let mut frame = Frame::new(ctx, kind, State::Part1);
    frame.set_date(date);

    let name = ctx.stations.name_for(station, ctx.translator);
    frame.push_header(format!("{station}: {name}"));
    frame.set_source(name);
    frame.open_forecast(Forecast::with_station_codes([station]));

    if let Transition::Goto(next) = decode_tokens(&mut frame, groups) {
        frame.enter(next);
    }
    frame
}

/// HEADER, PART_1 and PART_3 of a KN01 frame
pub fn groups(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    if line.upper == "NNNN" {
        return Transition::Goto(State::End);
    }
    if is_station_code(line.text) {
        open_station(frame, line.text);
        return Transition::Stay;
    }
    decode_tokens(frame, line.text)
}

fn is_station_code(token: &str) -> bool {
    token.len() == 5 && token.bytes().all(|b| b.is_ascii_digit())
}

fn open_station(frame: &mut Frame<'_>, code: &str) {
    let ctx = frame.ctx();
    let name = ctx.stations.name_for(code, ctx.translator);
    debug!("Station {} ({})", code, name);
    frame.push_header(format!("{code}: {name}"));
    frame.open_forecast(Forecast::with_station_codes([code]));
}

fn switch_section(frame: &mut Frame<'_>, section: Section) {
    let codes = frame
        .forecast()
        .map(|f| f.station_codes.clone())
        .unwrap_or_default();
    frame.flush_forecast();
    frame.set_section(section);
    frame.open_forecast(Forecast::with_station_codes(codes));
}

fn decode_tokens(frame: &mut Frame<'_>, text: &str) -> Transition {
    let mut next = Transition::Stay;

    for token in text.split_whitespace() {
        let (group, closes) = match token.strip_suffix('=') {
            Some(group) => (group, true),
            None => (token, false),
        };

        match group {
            "" => {}
            "333" => {
                switch_section(frame, Section::Part3);
                next = Transition::Goto(State::Part3);
            }
            "555" => {
                switch_section(frame, Section::Part1);
                next = Transition::Goto(State::Part1);
            }
            _ => {
                if let Some(raw) = wmo::decode_group(group).apply(frame.forecast_mut()) {
                    let note = frame.translate("unrecognized_group", &[("group", raw.as_str())]);
                    frame.push_header(note);
                }
            }
        }

        if closes {
            // groups after `=` without a new station line stay with this station
            frame.continue_forecast();
        }
    }

    next
}
