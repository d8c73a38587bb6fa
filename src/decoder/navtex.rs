//! NAVTEX line handlers
//!
//! NAVTEX bulletins give wind in knots (`WIND NORTHEAST 35 KT`), tag the
//! NAVAREA/METAREA they cover and sometimes spell positions as
//! `DD-MMN DDD-MME`. Everything else is phrased like SafetyNet, so each
//! handler falls through to the SafetyNet rule for the same state.

use super::builder::Frame;
use super::extract;
use super::safetynet;
use super::state::{Line, State, Transition};
use crate::models::{Forecast, MessageKind};

fn record_area(frame: &mut Frame<'_>, upper: &str) {
    let Some(tag) = extract::area_tag(upper) else {
        return;
    };
    if let MessageKind::Navtex { area, .. } = frame.kind_mut() {
        if area.is_none() {
            *area = Some(tag);
        }
    }
}

/// A warning line opens its own record; the wind may be given in knots or
/// in the SafetyNet `WINDS .. MS` form.
fn open_warning(frame: &mut Frame<'_>, line: &Line<'_>) {
    frame.open_forecast(Forecast::with_warning(line.text));
    match extract::navtex_wind(line.text) {
        Some(wind) => frame.forecast_mut().wind = wind,
        None => safetynet::apply_wind_and_time(frame, line),
    }
}

pub fn header(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    record_area(frame, &line.upper);

    if extract::is_warning(&line.upper) {
        open_warning(frame, line);
        return Transition::Goto(State::Part1);
    }
    if let Some(wind) = extract::navtex_wind(line.text) {
        frame.open_forecast(Forecast::new());
        frame.forecast_mut().wind = wind;
        return Transition::Goto(State::Part1);
    }

    safetynet::header(frame, line)
}

pub fn forecast(frame: &mut Frame<'_>, line: &Line<'_>) -> Transition {
    record_area(frame, &line.upper);

    if extract::is_warning(&line.upper) {
        open_warning(frame, line);
        return Transition::Stay;
    }
    if let Some(wind) = extract::navtex_wind(line.text) {
        safetynet::apply_wind(frame, wind);
        return Transition::Stay;
    }
    if let Some(label) = extract::coordinates_label(line.text) {
        frame.label_region(&label);
        return Transition::Stay;
    }

    safetynet::forecast(frame, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::builder::DecodeContext;
    use crate::i18n::Catalog;
    use crate::models::WeatherMessage;
    use crate::stations::StationTable;

    fn run(lines: &[&str]) -> WeatherMessage {
        let catalog = Catalog::english();
        let stations = StationTable::default();
        let ctx = DecodeContext {
            translator: &catalog,
            stations: &stations,
        };
        let kind = MessageKind::Navtex {
            marker: "FA01".to_string(),
            area: None,
        };
        let mut frame = Frame::new(ctx, kind, State::Header);
        for line in lines {
            frame.process(line);
        }
        frame.finish().expect("message has content")
    }

    #[test]
    fn test_gale_warning_with_knots() {
        let message = run(&[
            "NAVAREA XIII 123/25",
            "GALE WARNING WIND NORTHEAST 35 TO 40 KT GUSTS 50 KT",
            "COORDINATES 42-30N 131-45E",
            "NNNN",
        ]);
        assert_eq!(
            message.kind,
            MessageKind::Navtex {
                marker: "FA01".to_string(),
                area: Some("NAVAREA XIII".to_string()),
            }
        );
        let forecast = &message.sections.part1[0];
        assert!(forecast.warning.is_some());
        assert_eq!(forecast.wind.direction, "NORTHEAST");
        assert_eq!(forecast.wind.speed, "35 TO 40 KT");
        assert_eq!(forecast.region.as_deref(), Some("42-30N 131-45E"));
    }

    #[test]
    fn test_dashed_coordinates_label_region() {
        let message = run(&["GALE WARNING", "WIND SW 30 KT", "42-30N 131-45E"]);
        assert_eq!(
            message.sections.part1[0].region.as_deref(),
            Some("42-30N 131-45E")
        );
    }

    #[test]
    fn test_warning_with_metre_wind() {
        let message = run(&["STORM WARNING WINDS N 25 MS", "NNNN"]);
        let forecast = &message.sections.part1[0];
        assert_eq!(forecast.wind.direction, "N");
        assert_eq!(forecast.wind.speed, "25 MS");
    }

    #[test]
    fn test_safetynet_phrasing_still_decodes() {
        let message = run(&[
            "GALE WARNING 53",
            "PETER THE GREAT GULF",
            "WINDS NW W GUSTS 15 TO 18 MS",
            "HEIGHT OF WAVES 1 TO 2 M",
            "NNNN",
        ]);
        let forecast = &message.sections.part1[0];
        assert_eq!(forecast.region.as_deref(), Some("PETER THE GREAT GULF"));
        assert_eq!(forecast.seas.as_deref(), Some("1 TO 2 M"));
        assert_eq!(forecast.wind.gusts.as_deref(), Some("15 TO 18 MS"));
    }
}
