//! SafetyNet (Inmarsat-C EGC) line handlers
//!
//! These rules are also the fallback for NAVTEX frames, which only add a few
//! of their own in front.

use tracing::trace;

use super::builder::{Frame, Section};
use super::extract::{self, FieldLine};
use super::state::{Line, State, Transition};
use crate::models::{Forecast, IceReport, Wind};
use crate::render;

/// HEADER: everything up to the first forecast, synopsis or warning line.
pub fn header(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    let upper = line.upper.as_str();

    if extract::is_end_marker(upper) {
        return Transition::Goto(State::Initial);
    }
    if extract::is_warning(upper) {
        frame.open_forecast(Forecast::with_warning(line.text));
        apply_wind_and_time(frame, line);
        return Transition::Goto(State::Part1);
    }
    if extract::is_synopsis(upper) {
        frame.open_synopsis(extract::synopsis_time(line.text));
        return Transition::Goto(State::Synopsis);
    }
    if let Some(part) = extract::part_marker(upper) {
        return enter_part(frame, part);
    }
    if extract::is_forecast_heading(upper) && frame.part1_is_empty() {
        frame.open_section(Section::Part3);
        return Transition::Goto(State::Part3);
    }
    if extract::is_wind_line(upper) || extract::is_time_line(upper) {
        frame.open_section(Section::Part1);
        if let Some(range) = extract::time_range(line.text) {
            let mirror = render::time_range_label(frame.ctx().translator, &range);
            frame.push_header(mirror);
        }
        apply_wind_and_time(frame, line);
        return Transition::Goto(State::Part1);
    }
    if extract::is_region_line(upper) && extract::issued_by(line.text).is_none() {
        frame.open_section(Section::Part1);
        frame.open_region(line.text);
        return Transition::Goto(State::Part1);
    }

    if extract::is_utc_date(upper) {
        frame.set_date(line.text);
    } else if let Some(source) = extract::issued_by(line.text).filter(|s| !s.is_empty()) {
        frame.set_source(source);
    }
    frame.push_header(line.text);
    Transition::Stay
}

fn enter_part(frame: &mut Frame<'_>, part: u8) -> Transition {
    match part {
        1 => {
            frame.open_section(Section::Part1);
            Transition::Goto(State::Part1)
        }
        2 => {
            frame.flush_forecast();
            Transition::Goto(State::Part2)
        }
        _ => {
            frame.open_section(Section::Part3);
            Transition::Goto(State::Part3)
        }
    }
}

/// PART_1, PART_3 and FORECAST: accumulate forecast records.
pub fn forecast(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    let upper = line.upper.as_str();

    if extract::is_end_marker(upper) {
        return Transition::Goto(State::Initial);
    }
    if extract::is_warning(upper) {
        frame.open_forecast(Forecast::with_warning(line.text));
        apply_wind_and_time(frame, line);
        return Transition::Stay;
    }
    if extract::is_synopsis(upper) {
        frame.flush_forecast();
        frame.open_synopsis(extract::synopsis_time(line.text));
        return Transition::Goto(State::Synopsis);
    }
    if let Some(part) = extract::part_marker(upper) {
        return enter_part(frame, part);
    }
    if extract::is_forecast_heading(upper) {
        frame.open_section(Section::Part3);
        return Transition::Goto(State::Part3);
    }
    if let Some(codes) = extract::station_codes(line.text) {
        frame.add_station_codes(&codes);
        return Transition::Stay;
    }
    if extract::is_wind_line(upper) || extract::is_time_line(upper) {
        apply_wind_and_time(frame, line);
        return Transition::Stay;
    }
    if let Some((field, value)) = extract::field_line(line.text) {
        if let Some(value) = value {
            let forecast = frame.forecast_mut();
            let slot = match field {
                FieldLine::Seas => &mut forecast.seas,
                FieldLine::Temperature => &mut forecast.temperature,
                FieldLine::Visibility => &mut forecast.visibility,
                FieldLine::IceAccretion => &mut forecast.ice_accretion,
            };
            *slot = Some(value);
        }
        return Transition::Stay;
    }
    if extract::is_region_line(upper) {
        frame.open_region(line.text);
        return Transition::Stay;
    }
    if extract::has_coordinates(line.text) {
        frame.label_region(line.text);
        return Transition::Stay;
    }

    trace!("No forecast rule for line: {}", line.text);
    Transition::Stay
}

/// Wind first: a second wind clause starts a new record, and the time range
/// on the same line belongs to that new record.
pub(crate) fn apply_wind_and_time(frame: &mut Frame<'_>, line: &Line<'_>) {
    if let Some(wind) = extract::wind(line.text) {
        apply_wind(frame, wind);
    }
    if let Some(range) = extract::time_range(line.text) {
        if frame
            .forecast()
            .is_some_and(|f| f.has_readings() && !f.time_range.is_empty())
        {
            frame.continue_forecast();
        }
        frame.forecast_mut().time_range = range;
    }
}

pub(crate) fn apply_wind(frame: &mut Frame<'_>, wind: Wind) {
    if frame.forecast().is_some_and(|f| f.wind.has_reading()) {
        frame.continue_forecast();
    }
    frame.forecast_mut().wind = wind;
}

/// SYNOPSIS and PART_2: pressure centres until ice, forecast or end.
pub fn synopsis(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    let upper = line.upper.as_str();

    if extract::is_end_marker(upper) {
        return Transition::Goto(State::Initial);
    }
    if extract::is_synopsis(upper) {
        frame.open_synopsis(extract::synopsis_time(line.text));
        return Transition::Goto(State::Synopsis);
    }
    if extract::is_warning(upper) {
        frame.commit_synopsis();
        frame.open_forecast(Forecast::with_warning(line.text));
        frame.set_section(Section::Part1);
        apply_wind_and_time(frame, line);
        return Transition::Goto(State::Part1);
    }
    if extract::part_marker(upper) == Some(3) || extract::is_forecast_heading(upper) {
        frame.commit_synopsis();
        frame.open_section(Section::Part3);
        return Transition::Goto(State::Part3);
    }
    if extract::is_ice_heading(upper) {
        frame.commit_synopsis();
        frame.open_ice_report(IceReport::default());
        apply_ice_edge(frame, line);
        return Transition::Goto(State::IceReport);
    }

    frame.synopsis_mut().pressures.push(extract::pressure_center(line.text));
    Transition::Stay
}

/// ICE_REPORT: region tokens, edge directions and coordinate lines.
pub fn ice_report(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    let upper = line.upper.as_str();

    if extract::is_end_marker(upper) {
        return Transition::Goto(State::Initial);
    }
    if extract::part_marker(upper) == Some(3) || extract::is_forecast_heading(upper) {
        frame.commit_ice_report();
        frame.open_section(Section::Part3);
        return Transition::Goto(State::Part3);
    }
    if extract::is_wind_line(upper) {
        frame.commit_ice_report();
        let section = if frame.part3_is_empty() {
            Section::Part1
        } else {
            Section::Part3
        };
        frame.open_section(section);
        apply_wind_and_time(frame, line);
        return Transition::Goto(State::Forecast);
    }
    if apply_ice_edge(frame, line) {
        return Transition::Stay;
    }
    if extract::is_ice_region(upper) {
        if frame.ice_report().is_some_and(|r| !r.coordinates.is_empty()) {
            frame.open_ice_report(IceReport::with_region(line.text));
        } else {
            frame.ice_report_mut().region = line.text.to_string();
        }
        return Transition::Stay;
    }
    if extract::has_coordinates(line.text) {
        frame.ice_report_mut().coordinates.push(line.text.to_string());
        return Transition::Stay;
    }

    trace!("No ice rule for line: {}", line.text);
    Transition::Stay
}

/// `ICE <dir> ...`: a different direction after coordinates starts a new
/// report for the same region.
fn apply_ice_edge(frame: &mut Frame<'_>, line: &Line<'_>) -> bool {
    let Some((direction, position)) = extract::ice_edge(line.text) else {
        return false;
    };
    let starts_new = frame.ice_report().is_some_and(|report| {
        !report.direction.is_empty()
            && report.direction != direction
            && !report.coordinates.is_empty()
    });
    if starts_new {
        let region = frame
            .ice_report()
            .map(|report| report.region.clone())
            .unwrap_or_default();
        frame.open_ice_report(IceReport::with_region(region));
    }

    let report = frame.ice_report_mut();
    report.direction = direction;
    if !position.is_empty() {
        report.coordinates.push(position);
    }
    true
}
