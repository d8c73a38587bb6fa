//! WMO 5-digit group decoding for KN01 coastal station reports
//!
//! Only the groups a coastal report actually carries are interpreted; every
//! other group comes back as [`GroupValue::Unrecognized`] so the caller can
//! annotate it instead of dropping it.

use crate::models::{Forecast, Wind};

/// Decoded value of one group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValue {
    Wind { direction: String, speed: String },
    Temperature(String),
    Visibility(String),
    Pressure(String),
    Precipitation(String),
    Unrecognized(String),
}

impl GroupValue {
    /// Store the value on a forecast record. Returns the raw group back when
    /// there is nothing to store.
    pub fn apply(self, forecast: &mut Forecast) -> Option<String> {
        match self {
            GroupValue::Wind { direction, speed } => {
                forecast.wind = Wind {
                    direction,
                    speed,
                    gusts: None,
                };
            }
            GroupValue::Temperature(value) => forecast.temperature = Some(value),
            GroupValue::Visibility(value) => forecast.visibility = Some(value),
            GroupValue::Pressure(value) => forecast.pressure = Some(value),
            GroupValue::Precipitation(value) => forecast.precipitation = Some(value),
            GroupValue::Unrecognized(group) => return Some(group),
        }
        None
    }
}

/// Decode one group by its leading digit.
#[must_use]
pub fn decode_group(group: &str) -> GroupValue {
    if group.len() != 5 || !group.bytes().all(|b| b.is_ascii_digit()) {
        return GroupValue::Unrecognized(group.to_string());
    }

    match &group[..1] {
        "1" if group.starts_with("11") || group.starts_with("12") => temperature(group),
        "1" => visibility(group),
        "2" => wind(group),
        "3" => pressure(group),
        "6" => precipitation(group),
        _ => GroupValue::Unrecognized(group.to_string()),
    }
}

// Callers have already checked the group is five ASCII digits.
fn digits(group: &str, range: std::ops::Range<usize>) -> u32 {
    group[range].parse().unwrap_or_default()
}

fn tenths(value: u32) -> String {
    format!("{}.{}", value / 10, value % 10)
}

/// `1sTTT`: s = 1 for negative, TTT in tenths of a degree
fn temperature(group: &str) -> GroupValue {
    let value = digits(group, 2..5);
    let sign = if &group[1..2] == "1" && value != 0 { "-" } else { "" };
    GroupValue::Temperature(format!("{sign}{} °C", tenths(value)))
}

/// `1xxVV`: VV is the WMO visibility code
fn visibility(group: &str) -> GroupValue {
    let label = match digits(group, 3..5) {
        0 => "under 0.1 km".to_string(),
        10 => "1 km".to_string(),
        50 => "50 km".to_string(),
        89 => "70 km or more".to_string(),
        code => format!("{code} km"),
    };
    GroupValue::Visibility(label)
}

/// `2ddff`: dd direction code, ff speed in m/s
fn wind(group: &str) -> GroupValue {
    let code = &group[1..3];
    let direction = compass_point(code).unwrap_or(code).to_string();
    let speed = format!("{} m/s", digits(group, 3..5));
    GroupValue::Wind { direction, speed }
}

/// `3PPPP`: station pressure in tenths above 1000 hPa
fn pressure(group: &str) -> GroupValue {
    let value = 10_000 + digits(group, 1..5);
    GroupValue::Pressure(format!("{} hPa", tenths(value)))
}

/// `6xRRR`: RRR in mm, 990-999 encode tenths of a millimetre
fn precipitation(group: &str) -> GroupValue {
    let amount = digits(group, 2..5);
    let label = if amount >= 990 {
        format!("{} mm", tenths(amount - 990))
    } else {
        format!("{amount} mm")
    };
    GroupValue::Precipitation(label)
}

fn compass_point(code: &str) -> Option<&'static str> {
    let point = match code {
        "00" => "calm",
        "01" => "NNE",
        "05" => "NE",
        "07" => "ENE",
        "10" => "E",
        "12" => "ESE",
        "14" => "SE",
        "16" => "SSE",
        "18" => "S",
        "22" => "SW",
        "26" => "W",
        "32" => "NW",
        "36" => "N",
        _ => return None,
    };
    Some(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("30123", GroupValue::Pressure("1012.3 hPa".to_string()))]
    #[case("39870", GroupValue::Pressure("1987.0 hPa".to_string()))]
    #[case("60995", GroupValue::Precipitation("0.5 mm".to_string()))]
    #[case("60123", GroupValue::Precipitation("123 mm".to_string()))]
    #[case("60990", GroupValue::Precipitation("0.0 mm".to_string()))]
    #[case("11052", GroupValue::Temperature("-5.2 °C".to_string()))]
    #[case("12123", GroupValue::Temperature("12.3 °C".to_string()))]
    #[case("11000", GroupValue::Temperature("0.0 °C".to_string()))]
    #[case("10000", GroupValue::Visibility("under 0.1 km".to_string()))]
    #[case("10010", GroupValue::Visibility("1 km".to_string()))]
    #[case("10050", GroupValue::Visibility("50 km".to_string()))]
    #[case("10089", GroupValue::Visibility("70 km or more".to_string()))]
    #[case("10025", GroupValue::Visibility("25 km".to_string()))]
    fn test_decode_group(#[case] group: &str, #[case] expected: GroupValue) {
        assert_eq!(decode_group(group), expected);
    }

    #[test]
    fn test_wind_group() {
        assert_eq!(
            decode_group("23207"),
            GroupValue::Wind {
                direction: "NW".to_string(),
                speed: "7 m/s".to_string(),
            }
        );
        assert_eq!(
            decode_group("20000"),
            GroupValue::Wind {
                direction: "calm".to_string(),
                speed: "0 m/s".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_direction_code_passes_through() {
        assert_eq!(
            decode_group("22010"),
            GroupValue::Wind {
                direction: "20".to_string(),
                speed: "10 m/s".to_string(),
            }
        );
    }

    #[rstest]
    #[case("40123")]
    #[case("9999")]
    #[case("3A123")]
    #[case("NIL")]
    fn test_unrecognized(#[case] group: &str) {
        assert_eq!(decode_group(group), GroupValue::Unrecognized(group.to_string()));
    }

    #[test]
    fn test_apply_to_forecast() {
        let mut forecast = Forecast::new();
        assert_eq!(decode_group("30123").apply(&mut forecast), None);
        assert_eq!(decode_group("23207").apply(&mut forecast), None);
        assert_eq!(forecast.pressure.as_deref(), Some("1012.3 hPa"));
        assert_eq!(forecast.wind.direction, "NW");
        assert!(forecast.is_meaningful());

        assert_eq!(
            decode_group("40123").apply(&mut forecast),
            Some("40123".to_string())
        );
    }
}
