//! Per-frame message builder
//!
//! A [`Frame`] holds the message being built plus the open accumulators
//! (forecast, synopsis, ice report). Handlers mutate it line by line; every
//! flush goes through the same predicates so a shell record never reaches
//! the output.

use tracing::{debug, trace};

use super::state::{self, Line, State, Transition};
use crate::i18n::Translator;
use crate::models::{
    Forecast, IceReport, MessageKind, MessageType, Part2, Synopsis, WeatherMessage,
};
use crate::stations::StationTable;

/// Collaborators a frame needs while decoding
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    pub translator: &'a dyn Translator,
    pub stations: &'a StationTable,
}

/// Forecast list that receives flushed records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Part1,
    Part3,
}

pub struct Frame<'a> {
    ctx: DecodeContext<'a>,
    state: State,
    message: WeatherMessage,
    section: Section,
    forecast: Option<Forecast>,
    synopsis: Option<Synopsis>,
    ice_report: Option<IceReport>,
}

impl<'a> Frame<'a> {
    #[must_use]
    pub fn new(ctx: DecodeContext<'a>, kind: MessageKind, state: State) -> Self {
        Self {
            ctx,
            state,
            message: WeatherMessage::new(kind),
            section: Section::Part1,
            forecast: None,
            synopsis: None,
            ice_report: None,
        }
    }

    /// Run one line through the handler for the current state.
    pub fn process(&mut self, text: &str) {
        let line = Line::new(text);
        trace!(state = ?self.state, "Line: {}", line.text);

        let handle = state::handler(self.message_type(), self.state);
        if let Transition::Goto(next) = handle(self, &line) {
            self.enter(next);
        }
    }

    /// Move to `next`, flushing everything when the frame closes.
    pub fn enter(&mut self, next: State) {
        if next != self.state {
            debug!(from = ?self.state, to = ?next, "State change");
        }
        if next.is_closed() {
            self.flush_pending();
        }
        self.state = next;
    }

    /// Flush pending accumulators and hand back the message if it has content.
    #[must_use]
    pub fn finish(mut self) -> Option<WeatherMessage> {
        self.flush_pending();
        if self.message.has_content() {
            Some(self.message)
        } else {
            debug!("Dropping empty {} frame", self.message_type());
            None
        }
    }

    #[must_use]
    pub fn ctx(&self) -> DecodeContext<'a> {
        self.ctx
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn message_type(&self) -> MessageType {
        self.message.message_type()
    }

    #[must_use]
    pub fn message(&self) -> &WeatherMessage {
        &self.message
    }

    pub fn kind_mut(&mut self) -> &mut MessageKind {
        &mut self.message.kind
    }

    pub fn push_header(&mut self, line: impl Into<String>) {
        self.message.sections.header.push(line.into());
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.message.date = date.into();
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.message.source = Some(source.into());
    }

    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.ctx.translator.translate(key, params)
    }

    // -- forecasts --

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn set_section(&mut self, section: Section) {
        self.section = section;
    }

    #[must_use]
    pub fn part1_is_empty(&self) -> bool {
        self.message.sections.part1.is_empty()
    }

    #[must_use]
    pub fn part3_is_empty(&self) -> bool {
        self.message.sections.part3.is_empty()
    }

    #[must_use]
    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    /// The open forecast, opening an empty one if needed
    pub fn forecast_mut(&mut self) -> &mut Forecast {
        self.forecast.get_or_insert_with(Forecast::new)
    }

    /// Commit the open forecast to the current section if it is meaningful.
    pub fn flush_forecast(&mut self) {
        let Some(forecast) = self.forecast.take() else {
            return;
        };
        if !forecast.is_meaningful() {
            trace!("Discarding forecast shell: {:?}", forecast);
            return;
        }
        let target = match self.section {
            Section::Part1 => &mut self.message.sections.part1,
            Section::Part3 => &mut self.message.sections.part3,
        };
        target.push(forecast);
    }

    /// Flush the open forecast and make `forecast` the open one.
    pub fn open_forecast(&mut self, forecast: Forecast) {
        self.flush_forecast();
        self.forecast = Some(forecast);
    }

    /// Flush the open forecast and keep going with a new one for the same
    /// region and stations.
    pub fn continue_forecast(&mut self) {
        let carried = self.forecast.as_ref().map(|open| Forecast {
            region: open.region.clone(),
            station_codes: open.station_codes.clone(),
            ..Forecast::default()
        });
        self.flush_forecast();
        self.forecast = carried;
    }

    /// Flush, switch section and open an empty forecast there.
    pub fn open_section(&mut self, section: Section) {
        self.flush_forecast();
        self.section = section;
        self.forecast = Some(Forecast::new());
    }

    /// Apply a REGION / named-gulf line to the open forecast.
    pub fn open_region(&mut self, region: &str) {
        if let Some(open) = self.forecast.as_mut() {
            if !open.has_readings() && open.region.is_none() {
                open.region = Some(region.to_string());
                return;
            }
        }
        self.open_forecast(Forecast::with_region(region));
    }

    /// Add station codes, starting a new record if the open one is complete.
    pub fn add_station_codes(&mut self, codes: &[String]) {
        if self.forecast.as_ref().is_some_and(Forecast::is_meaningful) {
            self.flush_forecast();
        }
        let forecast = self.forecast_mut();
        for code in codes {
            forecast.add_station_code(code.as_str());
        }
    }

    /// Set a region label, appending when one is already present.
    pub fn label_region(&mut self, label: &str) {
        let forecast = self.forecast_mut();
        forecast.region = Some(match forecast.region.take() {
            Some(region) => format!("{region}, {label}"),
            None => label.to_string(),
        });
    }

    // -- part 2 --

    fn part2_mut(&mut self) -> &mut Part2 {
        self.message.sections.part2.get_or_insert_with(Part2::default)
    }

    pub fn open_synopsis(&mut self, time: impl Into<String>) {
        self.commit_synopsis();
        self.synopsis = Some(Synopsis::new(time));
    }

    /// The open synopsis, opening one without a time if needed
    pub fn synopsis_mut(&mut self) -> &mut Synopsis {
        self.synopsis.get_or_insert_with(Synopsis::default)
    }

    pub fn commit_synopsis(&mut self) {
        let Some(synopsis) = self.synopsis.take() else {
            return;
        };
        if synopsis.is_empty() {
            return;
        }
        let part2 = self.part2_mut();
        match part2.synopsis.as_mut() {
            // a second synopsis block in one bulletin extends the first
            Some(existing) => existing.pressures.extend(synopsis.pressures),
            None => part2.synopsis = Some(synopsis),
        }
    }

    #[must_use]
    pub fn ice_report(&self) -> Option<&IceReport> {
        self.ice_report.as_ref()
    }

    pub fn open_ice_report(&mut self, report: IceReport) {
        self.commit_ice_report();
        self.ice_report = Some(report);
    }

    pub fn ice_report_mut(&mut self) -> &mut IceReport {
        self.ice_report.get_or_insert_with(IceReport::default)
    }

    pub fn commit_ice_report(&mut self) {
        let Some(report) = self.ice_report.take() else {
            return;
        };
        if report.is_empty() {
            return;
        }
        self.part2_mut().ice_reports.push(report);
    }

    /// Flush every accumulator.
    pub fn flush_pending(&mut self) {
        self.flush_forecast();
        self.commit_synopsis();
        self.commit_ice_report();
    }
}
