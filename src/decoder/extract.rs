//! Single-line field extractors
//!
//! Every function here looks at one trimmed bulletin line and either returns
//! the typed value it found or `None`. A miss is never an error.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{PressureCenter, PressureKind, TimeRange, Wind};

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

const MS_SPEED: &str = r"\d+(?:[.,]\d+)?(?:\s*(?:TO|-)\s*\d+(?:[.,]\d+)?)?\s*(?:MS|M/S)";
const KT_SPEED: &str = r"\d+(?:\s*(?:TO|-)\s*\d+)?\s*KTS?";
const NAVTEX_DIRECTION: &str =
    r"(?:(?:NORTH|SOUTH)(?:EAST|WEST)?(?:ERLY)?|EAST(?:ERLY)?|WEST(?:ERLY)?|VARIABLE|[NSEW]{1,3})";

static WINDS: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"(?i)\bWINDS\s+(?P<dir>[NSEW]{{1,2}}\b(?:[\s/-]+[NSEW]{{1,2}}\b)*)(?:\s+(?P<speed>{MS_SPEED}))?(?:\s*,?\s*GUSTS\s+(?P<gusts>{MS_SPEED}))?"
    ))
});
static NAVTEX_WIND: LazyLock<Regex> = LazyLock::new(|| {
    re(&format!(
        r"(?i)\bWIND\s+(?P<dir>{NAVTEX_DIRECTION}\b(?:[\s/-]+{NAVTEX_DIRECTION}\b)*)(?:\s+(?P<speed>{KT_SPEED}))?(?:\s*,?\s*GUSTS?\s+(?P<gusts>{KT_SPEED}))?"
    ))
});
static WINDS_KEYWORD: LazyLock<Regex> = LazyLock::new(|| re(r"\bWINDS\b"));
static WARNING: LazyLock<Regex> = LazyLock::new(|| re(r"\b(?:GALE|STORM|CYCLONE)\s+WARNING\b"));
static SYNOPSIS: LazyLock<Regex> = LazyLock::new(|| re(r"\bSYNOPSIS\b|\bWEATHER\s+SUMMARY\b"));
static SYNOPSIS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^.*?\b(?:SYNOPSIS|WEATHER\s+SUMMARY)\b(?:\s+AT\b)?\s*:?\s*"));
static FORECAST: LazyLock<Regex> = LazyLock::new(|| re(r"\bFORECAST\b"));
static PART: LazyLock<Regex> = LazyLock::new(|| re(r"\bPART\s+(1|2|3|I{1,3})\b"));
static UTC_DATE: LazyLock<Regex> = LazyLock::new(|| re(r"^\d{6}\s+UTC\s+[A-Z]{3}\s+\d{2}$"));
static ISSUED_BY: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bISSUED\s+BY\b\s*(.*)$"));
static FROM_TO: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^FROM\s+(?P<from>.+?)(?:\s+TO\s+(?P<to>.+))?$"));
static HALF_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(?:FIRST|SECOND)\s+HALF\s+(?:OF\s+)?(?:NIGHT|DAY)\b"));
static HALF_PHRASE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\b(?:FIRST|SECOND)\s+HALF\s+(?:OF\s+)?(?:NIGHT|DAY)\b(?:\s+AND\s+(?:FIRST|SECOND)\s+HALF\s+(?:OF\s+)?(?:NIGHT|DAY)\b)*(?:\s+\d{1,2}[/.]\d{1,2}\b)?")
});
static STATION_CODES: LazyLock<Regex> =
    LazyLock::new(|| re(r"^\d{5}(?:\s*[,\s]\s*\d{5})*(?:[\s,=]|$)"));
static FIVE_DIGITS: LazyLock<Regex> = LazyLock::new(|| re(r"\d{5}"));
static REGION: LazyLock<Regex> = LazyLock::new(|| re(r"\bREGION\b|\bGULF\b|\bBAY\b|\bSTRAIT\b"));
static COORDINATE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    re(r"\d{2,4}(?:[.,]\d+)?\s*[NS]\s+\d{3,5}(?:[.,]\d+)?\s*[EW]|\d{2,3}-\d{2}(?:[.,]\d+)?[NS]\s+\d{2,3}-\d{2}(?:[.,]\d+)?[EW]")
});
static COORDINATES_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bCOORDINATES\b\s*:?\s*(.*)$"));
static AREA_TAG: LazyLock<Regex> =
    LazyLock::new(|| re(r"\b(?:NAVAREA|METAREA)\s+(?:[IVXLC]+|\d{1,2})\b"));
static SEAS: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bHEIGHT\s+OF\s+WAVES\b\s*(.*)$"));
static TEMPERATURE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bTEMP(?:ERATURE)?\b(?:\s+OF\b)?\s*(.*)$"));
static VISIBILITY: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bVIS(?:IBILITY)?\b\s*(.*)$"));
static ICE_ACCRETION: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\bICE\s+ACCRETION\b\s*(.*)$"));
static ICE: LazyLock<Regex> = LazyLock::new(|| re(r"\bICE\b"));
static ICE_EDGE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^ICE\s+(?P<dir>[NSEW]{1,2})\b\s*(?:TO\b\s*)?(?P<rest>.*)$")
});
static ICE_REGION: LazyLock<Regex> = LazyLock::new(|| re(r"^[A-Z0-9-]+$"));
static MOVING: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^(?P<pos>.*?)[\s,]*\bMOVING\b\s*(?P<mv>.*)$"));
static HPA: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\b\d{3,4}\s*HPA\b"));
static LOW: LazyLock<Regex> = LazyLock::new(|| re(r"\b(?:LOW|DEPRESSION|CYCLONE)\b"));
static HIGH: LazyLock<Regex> = LazyLock::new(|| re(r"\b(?:HIGH|ANTICYCLONE|RIDGE)\b"));

/// SafetyNet wind clause: `WINDS <dirs> [<speed> MS] [GUSTS <speed> MS]`.
///
/// With no explicit speed the gusts value is used as the speed as well.
#[must_use]
pub fn wind(line: &str) -> Option<Wind> {
    let caps = WINDS.captures(line)?;
    Some(wind_from_parts(
        caps.name("dir").map(|m| m.as_str()),
        caps.name("speed").map(|m| m.as_str()),
        caps.name("gusts").map(|m| m.as_str()),
    ))
}

/// NAVTEX wind clause: `WIND <dirs> [<speed> KT] [GUSTS <speed> KT]`.
///
/// A bare `WIND <word>` without any speed is not a wind clause.
#[must_use]
pub fn navtex_wind(line: &str) -> Option<Wind> {
    let caps = NAVTEX_WIND.captures(line)?;
    let speed = caps.name("speed").map(|m| m.as_str());
    let gusts = caps.name("gusts").map(|m| m.as_str());
    if speed.is_none() && gusts.is_none() {
        return None;
    }
    Some(wind_from_parts(caps.name("dir").map(|m| m.as_str()), speed, gusts))
}

fn wind_from_parts(direction: Option<&str>, speed: Option<&str>, gusts: Option<&str>) -> Wind {
    Wind {
        direction: direction.unwrap_or_default().to_string(),
        speed: speed.or(gusts).unwrap_or_default().to_string(),
        gusts: gusts.map(str::to_string),
    }
}

/// `FROM <t1> TO <t2>`, or a half-day/half-night phrase (with its date)
/// kept verbatim. Other text on the line, such as a wind clause, is left out.
#[must_use]
pub fn time_range(line: &str) -> Option<TimeRange> {
    if let Some(caps) = FROM_TO.captures(line) {
        let from = caps.name("from").map_or("", |m| m.as_str());
        let to = caps.name("to").map_or("", |m| m.as_str());
        return Some(TimeRange::new(from, to));
    }
    HALF_PHRASE_SPAN
        .find(line)
        .map(|phrase| TimeRange::new(phrase.as_str(), ""))
}

/// Leading 5-digit station indexes, comma or space separated
#[must_use]
pub fn station_codes(line: &str) -> Option<Vec<String>> {
    let head = STATION_CODES.find(line)?;
    let codes = FIVE_DIGITS
        .find_iter(head.as_str())
        .map(|m| m.as_str().to_string())
        .collect();
    Some(codes)
}

#[must_use]
pub fn is_end_marker(upper: &str) -> bool {
    upper == "NNNN"
}

#[must_use]
pub fn is_warning(upper: &str) -> bool {
    WARNING.is_match(upper)
}

#[must_use]
pub fn is_synopsis(upper: &str) -> bool {
    SYNOPSIS.is_match(upper)
}

/// Synopsis validity time: the line without its SYNOPSIS keyword
#[must_use]
pub fn synopsis_time(line: &str) -> String {
    SYNOPSIS_PREFIX.replace(line, "").trim().to_string()
}

#[must_use]
pub fn is_forecast_heading(upper: &str) -> bool {
    FORECAST.is_match(upper)
}

/// `PART 1` .. `PART 3` (arabic or roman)
#[must_use]
pub fn part_marker(upper: &str) -> Option<u8> {
    let caps = PART.captures(upper)?;
    match &caps[1] {
        "1" | "I" => Some(1),
        "2" | "II" => Some(2),
        "3" | "III" => Some(3),
        _ => None,
    }
}

#[must_use]
pub fn is_wind_line(upper: &str) -> bool {
    WINDS_KEYWORD.is_match(upper)
}

#[must_use]
pub fn is_time_line(upper: &str) -> bool {
    upper.starts_with("FROM ") || HALF_PHRASE.is_match(upper)
}

#[must_use]
pub fn is_utc_date(upper: &str) -> bool {
    UTC_DATE.is_match(upper)
}

/// Text following `ISSUED BY`
#[must_use]
pub fn issued_by(line: &str) -> Option<String> {
    let caps = ISSUED_BY.captures(line)?;
    Some(caps[1].trim().to_string())
}

/// REGION lines and named gulfs, bays and straits
#[must_use]
pub fn is_region_line(upper: &str) -> bool {
    REGION.is_match(upper)
}

#[must_use]
pub fn has_coordinates(line: &str) -> bool {
    COORDINATE_PAIR.is_match(&line.to_uppercase())
}

/// Text after a `COORDINATES` keyword (whole line when nothing follows)
#[must_use]
pub fn coordinates_label(line: &str) -> Option<String> {
    let caps = COORDINATES_KEYWORD.captures(line)?;
    let rest = caps[1].trim();
    Some(if rest.is_empty() { line } else { rest }.to_string())
}

/// NAVAREA / METAREA tag, e.g. "NAVAREA XIII"
#[must_use]
pub fn area_tag(upper: &str) -> Option<String> {
    AREA_TAG.find(upper).map(|m| m.as_str().to_string())
}

fn remainder(pattern: &Regex, line: &str) -> Option<String> {
    let caps = pattern.captures(line)?;
    let value = caps[1].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Field lines that carry their value after a fixed keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLine {
    Seas,
    Temperature,
    Visibility,
    IceAccretion,
}

/// Classify a simple field line and return its value with the keyword removed
#[must_use]
pub fn field_line(line: &str) -> Option<(FieldLine, Option<String>)> {
    let upper = line.to_uppercase();
    if SEAS.is_match(&upper) {
        return Some((FieldLine::Seas, remainder(&SEAS, line)));
    }
    if ICE_ACCRETION.is_match(&upper) {
        return Some((FieldLine::IceAccretion, remainder(&ICE_ACCRETION, line)));
    }
    if TEMPERATURE.is_match(&upper) {
        return Some((FieldLine::Temperature, remainder(&TEMPERATURE, line)));
    }
    if VISIBILITY.is_match(&upper) {
        return Some((FieldLine::Visibility, remainder(&VISIBILITY, line)));
    }
    None
}

/// A line announcing ice information (but not ice accretion)
#[must_use]
pub fn is_ice_heading(upper: &str) -> bool {
    ICE.is_match(upper) && !ICE_ACCRETION.is_match(upper)
}

/// `ICE <dir> [TO] <position...>` → (direction, position text)
#[must_use]
pub fn ice_edge(line: &str) -> Option<(String, String)> {
    let caps = ICE_EDGE.captures(line)?;
    Some((
        caps["dir"].to_uppercase(),
        caps["rest"].trim().to_string(),
    ))
}

/// A bare ice region token such as "TATAR-STRAIT"
#[must_use]
pub fn is_ice_region(upper: &str) -> bool {
    ICE_REGION.is_match(upper)
}

/// Classify one synopsis line into a pressure centre
#[must_use]
pub fn pressure_center(line: &str) -> PressureCenter {
    let upper = line.to_uppercase();
    let kind = if LOW.is_match(&upper) {
        PressureKind::Low
    } else if HIGH.is_match(&upper) {
        PressureKind::High
    } else {
        PressureKind::Info
    };

    let hpa = HPA.find(line).map(|m| m.as_str().to_string());

    let (position, movement) = match MOVING.captures(line) {
        Some(caps) => {
            let mv = caps["mv"].trim();
            (
                caps["pos"].trim().to_string(),
                (!mv.is_empty()).then(|| mv.to_string()),
            )
        }
        None => (line.to_string(), None),
    };

    PressureCenter {
        kind,
        hpa,
        position,
        movement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_wind_with_speed_and_gusts() {
        let wind = wind("WINDS N 10 TO 12 MS GUSTS 15 MS").unwrap();
        assert_eq!(
            wind,
            Wind {
                direction: "N".to_string(),
                speed: "10 TO 12 MS".to_string(),
                gusts: Some("15 MS".to_string()),
            }
        );
    }

    #[test]
    fn test_wind_gusts_fill_missing_speed() {
        let wind = wind("WINDS NW W GUSTS 15 TO 18 MS").unwrap();
        assert_eq!(
            wind,
            Wind {
                direction: "NW W".to_string(),
                speed: "15 TO 18 MS".to_string(),
                gusts: Some("15 TO 18 MS".to_string()),
            }
        );
    }

    #[test]
    fn test_wind_without_gusts() {
        let wind = wind("WINDS SW 12 TO 17 MS").unwrap();
        assert_eq!(wind.direction, "SW");
        assert_eq!(wind.speed, "12 TO 17 MS");
        assert_eq!(wind.gusts, None);
    }

    #[test]
    fn test_wind_direction_stops_before_words() {
        let wind = wind("WINDS NW STRONG").unwrap();
        assert_eq!(wind.direction, "NW");
        assert_eq!(wind.speed, "");
    }

    #[test]
    fn test_navtex_wind() {
        let wind = navtex_wind("GALE WARNING WIND NORTHEAST 35 TO 40 KT GUSTS 50 KT").unwrap();
        assert_eq!(wind.direction, "NORTHEAST");
        assert_eq!(wind.speed, "35 TO 40 KT");
        assert_eq!(wind.gusts.as_deref(), Some("50 KT"));

        assert!(navtex_wind("WIND FARM CONSTRUCTION").is_none());
        assert!(navtex_wind("WIND NORTH BACKING").is_none());
    }

    #[test]
    fn test_time_range_from_to() {
        assert_eq!(
            time_range("FROM 28/0600 TO 28/1800"),
            Some(TimeRange::new("28/0600", "28/1800"))
        );
        assert_eq!(time_range("FROM 28/0600"), Some(TimeRange::new("28/0600", "")));
    }

    #[test]
    fn test_time_range_half_phrase_is_verbatim() {
        let range = time_range("SECOND HALF NIGHT AND FIRST HALF DAY 28/03").unwrap();
        assert_eq!(range.from, "SECOND HALF NIGHT AND FIRST HALF DAY 28/03");
        assert_eq!(range.to, "");
    }

    #[rstest]
    #[case("WINDS N 10 MS SECOND HALF NIGHT", "SECOND HALF NIGHT")]
    #[case("SECOND HALF OF NIGHT 28/03 WINDS SW 12 MS", "SECOND HALF OF NIGHT 28/03")]
    #[case("FIRST HALF DAY AND SECOND HALF DAY 29.03", "FIRST HALF DAY AND SECOND HALF DAY 29.03")]
    fn test_time_range_keeps_only_the_phrase(#[case] line: &str, #[case] phrase: &str) {
        assert_eq!(time_range(line), Some(TimeRange::new(phrase, "")));
    }

    #[rstest]
    #[case("31960", vec!["31960"])]
    #[case("31960, 32150", vec!["31960", "32150"])]
    #[case("31960 32150 31735", vec!["31960", "32150", "31735"])]
    fn test_station_codes(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(station_codes(line).unwrap(), expected);
    }

    #[rstest]
    #[case("REGION 11440 NORTH OF 42,0 N WEST OF 135,0 E")]
    #[case("123456 UTC")]
    #[case("3196")]
    fn test_not_station_codes(#[case] line: &str) {
        assert!(station_codes(line).is_none());
    }

    #[rstest]
    #[case("HEIGHT OF WAVES 1 TO 2 M", FieldLine::Seas, "1 TO 2 M")]
    #[case("TEMPERATURE OF AIR -5 TO -10", FieldLine::Temperature, "AIR -5 TO -10")]
    #[case("VIS 1-2 KM IN SNOW", FieldLine::Visibility, "1-2 KM IN SNOW")]
    #[case("ICE ACCRETION MODERATE", FieldLine::IceAccretion, "MODERATE")]
    fn test_field_lines(#[case] line: &str, #[case] kind: FieldLine, #[case] value: &str) {
        let (found, found_value) = field_line(line).unwrap();
        assert_eq!(found, kind);
        assert_eq!(found_value.as_deref(), Some(value));
    }

    #[test]
    fn test_region_lines() {
        assert!(is_region_line("PETER THE GREAT GULF"));
        assert!(is_region_line("REGION 11440 NORTH OF 42,0 N WEST OF 135,0 E"));
        assert!(!is_region_line("WINDS NW W GUSTS 15 TO 18 MS"));
    }

    #[test]
    fn test_coordinates() {
        assert!(has_coordinates("4230N 13150E"));
        assert!(has_coordinates("42-30N 131-45E"));
        assert!(!has_coordinates("VLADIVOSTOK RADIO WEATHER"));
        assert_eq!(
            coordinates_label("COORDINATES 42-30N 131-45E").as_deref(),
            Some("42-30N 131-45E")
        );
    }

    #[test]
    fn test_header_markers() {
        assert!(is_utc_date("270829 UTC MAR 25"));
        assert!(!is_utc_date("270829 UTC"));
        assert_eq!(issued_by("ISSUED BY VLADIVOSTOK METEO").as_deref(), Some("VLADIVOSTOK METEO"));
        assert_eq!(part_marker("PART 2"), Some(2));
        assert_eq!(part_marker("PART III"), Some(3));
        assert_eq!(area_tag("NAVAREA XIII WX WARNING").as_deref(), Some("NAVAREA XIII"));
        assert_eq!(synopsis_time("SYNOPSIS AT 0000 UTC"), "0000 UTC");
        assert_eq!(synopsis_time("PART 2 WEATHER SUMMARY 0600 UTC"), "0600 UTC");
    }

    #[test]
    fn test_pressure_center() {
        let center = pressure_center("LOW 995 HPA 45N 140E MOVING NE 30 KMH");
        assert_eq!(center.kind, PressureKind::Low);
        assert_eq!(center.hpa.as_deref(), Some("995 HPA"));
        assert_eq!(center.position, "LOW 995 HPA 45N 140E");
        assert_eq!(center.movement.as_deref(), Some("NE 30 KMH"));

        let center = pressure_center("ANTICYCLONE 1030 HPA OVER SEA OF JAPAN");
        assert_eq!(center.kind, PressureKind::High);
        assert_eq!(center.movement, None);

        let center = pressure_center("FRONT ALONG 40N");
        assert_eq!(center.kind, PressureKind::Info);
    }

    #[test]
    fn test_ice_lines() {
        assert!(is_ice_heading("ICE"));
        assert!(!is_ice_heading("ICE ACCRETION MODERATE"));
        assert_eq!(
            ice_edge("ICE SW TO 4530N 13800E"),
            Some(("SW".to_string(), "4530N 13800E".to_string()))
        );
        assert!(is_ice_region("TATAR-STRAIT"));
        assert!(!is_ice_region("ICE SW TO 4530N"));
    }
}
