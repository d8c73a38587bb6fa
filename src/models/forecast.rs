//! Forecast record accumulated from PART 1 / PART 3 of a bulletin

use serde::{Deserialize, Serialize};

/// Validity period of a forecast as written in the bulletin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start phrase, or the whole phrase for "SECOND HALF NIGHT ..." forms
    pub from: String,
    /// End phrase, empty when the bulletin gives none
    pub to: String,
}

impl TimeRange {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from.is_empty() && self.to.is_empty()
    }
}

/// Wind vector as written in the bulletin (or decoded from a KN01 group)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    /// One or more compass tokens, e.g. "NW W"
    pub direction: String,
    /// Speed phrase including unit, e.g. "10 TO 12 MS"
    pub speed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gusts: Option<String>,
}

impl Wind {
    #[must_use]
    pub fn has_reading(&self) -> bool {
        !self.speed.is_empty() || self.gusts.as_deref().is_some_and(|g| !g.is_empty())
    }
}

/// One forecast record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    /// Warning line that opened this record ("GALE WARNING 53")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Station codes in first-seen order, without duplicates
    pub station_codes: Vec<String>,
    pub time_range: TimeRange,
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_accretion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<String>,
}

fn filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.is_empty())
}

impl Forecast {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_warning(warning: impl Into<String>) -> Self {
        Self {
            warning: Some(warning.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: Some(region.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_station_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut forecast = Self::default();
        for code in codes {
            forecast.add_station_code(code);
        }
        forecast
    }

    /// Append a station code unless it is already present.
    pub fn add_station_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        if !self.station_codes.contains(&code) {
            self.station_codes.push(code);
        }
    }

    /// Whether the record carries any observed or forecast value besides its
    /// time range. Region, station codes and the warning title do not count.
    #[must_use]
    pub fn has_readings(&self) -> bool {
        self.wind.has_reading()
            || filled(&self.seas)
            || filled(&self.temperature)
            || filled(&self.visibility)
            || filled(&self.pressure)
            || filled(&self.precipitation)
    }

    /// Whether the record is worth committing to the message.
    ///
    /// A shell holding only a region, station codes or a warning title is
    /// never committed on its own.
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        self.has_readings() || !self.time_range.from.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_shell_is_not_meaningful() {
        let forecast = Forecast::with_region("PETER THE GREAT GULF");
        assert!(!forecast.is_meaningful());

        let forecast = Forecast::with_station_codes(["31960"]);
        assert!(!forecast.is_meaningful());

        let forecast = Forecast::with_warning("GALE WARNING 53");
        assert!(!forecast.is_meaningful());
    }

    #[test]
    fn test_time_stamped_forecast_is_meaningful_without_readings() {
        let mut forecast = Forecast::new();
        forecast.time_range = TimeRange::new("SECOND HALF NIGHT", "");
        assert!(forecast.is_meaningful());
        assert!(!forecast.has_readings());
    }

    #[test]
    fn test_gusts_alone_count_as_reading() {
        let mut forecast = Forecast::new();
        forecast.wind.gusts = Some("15 MS".to_string());
        assert!(forecast.has_readings());
    }

    #[test]
    fn test_ice_accretion_alone_does_not_flush() {
        let mut forecast = Forecast::new();
        forecast.ice_accretion = Some("MODERATE".to_string());
        assert!(!forecast.is_meaningful());
    }

    #[test]
    fn test_station_codes_keep_first_seen_order() {
        let mut forecast = Forecast::with_station_codes(["32150", "31960"]);
        forecast.add_station_code("32150");
        forecast.add_station_code("31735");
        assert_eq!(forecast.station_codes, vec!["32150", "31960", "31735"]);
    }
}
