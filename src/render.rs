//! Plain-text report rendering
//!
//! Layout: a banner per message, then the header, PART 1, PART 2 and
//! PART 3 blocks, each only when non-empty. Nested lines are indented by
//! two spaces per level. Field order inside a forecast is fixed.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::decoder::extract;
use crate::i18n::Translator;
use crate::models::{Forecast, Part2, TimeRange, WeatherMessage};

const INDENT: &str = "  ";

static HALF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<ord>FIRST|SECOND)\s+HALF\s+(?:OF\s+)?(?P<part>NIGHT|DAY)\b(?P<and>\s+AND\b)?",
    )
    .expect("static pattern compiles")
});

/// Time range text: the localized `From .. to ..` form, or the localized
/// half-day phrase when the bulletin gives no end.
#[must_use]
pub fn time_range_label(translator: &dyn Translator, range: &TimeRange) -> String {
    if range.to.is_empty() {
        half_phrase_label(translator, &range.from)
    } else {
        translator.translate(
            "time_range",
            &[("from", range.from.as_str()), ("to", range.to.as_str())],
        )
    }
}

/// Replace every `FIRST|SECOND HALF [OF] NIGHT|DAY` (and a trailing `AND`)
/// with its catalog label. Text around the phrases, such as a date, is kept.
/// A catalog without the `half_*` keys leaves the phrase as written.
fn half_phrase_label(translator: &dyn Translator, phrase: &str) -> String {
    HALF.replace_all(phrase, |caps: &Captures<'_>| {
        let whole = &caps[0];
        let and = caps.name("and").map_or("", |m| m.as_str());
        let key = format!(
            "half_{}_{}",
            caps["ord"].to_ascii_lowercase(),
            caps["part"].to_ascii_lowercase()
        );
        let mut text = label_or(translator, &key, &whole[..whole.len() - and.len()]);
        if !and.is_empty() {
            text.push(' ');
            text.push_str(&label_or(translator, "half_and", and.trim_start()));
        }
        text
    })
    .into_owned()
}

fn label_or(translator: &dyn Translator, key: &str, literal: &str) -> String {
    let label = translator.label(key);
    if label == key { literal.to_string() } else { label }
}

struct Report<'a> {
    out: String,
    translator: &'a dyn Translator,
}

impl Report<'_> {
    fn line(&mut self, text: &str, level: usize) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn label(&self, key: &str) -> String {
        self.translator.label(key)
    }

    fn banner(&mut self, key: &str) {
        let title = self.label(key);
        self.line(&format!("=== {title} ==="), 0);
    }

    fn field(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            let label = self.label(key);
            self.line(&format!("{label}: {value}"), 1);
        }
    }

    fn message(&mut self, index: usize, message: &WeatherMessage) {
        let title = self
            .translator
            .translate("data_type", &[("type", message.message_type().as_str())]);
        self.line(&format!("=== {title} {} ===", index + 1), 0);

        let sections = &message.sections;
        if !sections.header.is_empty() {
            self.banner("header");
            for line in &sections.header {
                let text = match extract::issued_by(line) {
                    Some(source) => format!("{}: {source}", self.label("issued_by")),
                    None => line.clone(),
                };
                self.line(&text, 1);
            }
        }
        if !sections.part1.is_empty() {
            self.banner("part_1");
            for forecast in &sections.part1 {
                self.forecast(forecast);
            }
        }
        if let Some(part2) = &sections.part2 {
            self.banner("part_2");
            self.part2(part2);
        }
        if !sections.part3.is_empty() {
            self.banner("part_3");
            for forecast in &sections.part3 {
                self.forecast(forecast);
            }
        }
    }

    fn forecast(&mut self, forecast: &Forecast) {
        if let Some(warning) = &forecast.warning {
            self.line(warning, 1);
        }
        if let Some(region) = &forecast.region {
            self.line(region, 1);
        }
        if !forecast.station_codes.is_empty() {
            self.line(&forecast.station_codes.join(", "), 1);
        }
        if !forecast.time_range.is_empty() {
            let text = time_range_label(self.translator, &forecast.time_range);
            self.line(&text, 1);
        }

        let wind = &forecast.wind;
        if !wind.direction.is_empty() || !wind.speed.is_empty() {
            let mut text = self.label("wind");
            text.push(':');
            for part in [&wind.direction, &wind.speed] {
                if !part.is_empty() {
                    text.push(' ');
                    text.push_str(part);
                }
            }
            if let Some(gusts) = wind.gusts.as_deref().filter(|g| !g.is_empty()) {
                text.push_str(&format!(" {} {gusts}", self.label("gusts")));
            }
            self.line(&text, 1);
        }

        self.field("temperature", forecast.temperature.as_deref());
        self.field("visibility", forecast.visibility.as_deref());
        self.field("seas", forecast.seas.as_deref());
        self.field("ice_accretion", forecast.ice_accretion.as_deref());
        self.field("pressure", forecast.pressure.as_deref());
        self.field("precipitation", forecast.precipitation.as_deref());
    }

    fn part2(&mut self, part2: &Part2) {
        if let Some(synopsis) = &part2.synopsis {
            let label = self.label("synopsis");
            let heading = if synopsis.time.is_empty() {
                label
            } else {
                format!("{label} {}", synopsis.time)
            };
            self.line(&heading, 1);

            for center in &synopsis.pressures {
                let mut text = format!("{}: {}", self.label(center.kind.label_key()), center.position);
                if let Some(movement) = &center.movement {
                    text.push_str(&format!(", {} {movement}", self.label("moving")));
                }
                self.line(&text, 2);
            }
        }

        for report in &part2.ice_reports {
            let heading = format!("{} {}", self.label("ice"), report.region);
            self.line(heading.trim_end(), 1);
            let direction = self
                .translator
                .translate("ice_direction", &[("direction", report.direction.as_str())]);
            self.line(&format!("{direction}: {}", report.coordinates.join(", ")), 2);
        }
    }
}

/// Render decoded messages as an indented plain-text report.
#[must_use]
pub fn format_messages(messages: &[WeatherMessage], translator: &dyn Translator) -> String {
    let mut report = Report {
        out: String::new(),
        translator,
    };
    for (index, message) in messages.iter().enumerate() {
        report.message(index, message);
    }
    report.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::models::{
        IceReport, MessageKind, PressureCenter, PressureKind, Synopsis, Wind,
    };

    #[test]
    fn test_empty_report() {
        assert_eq!(format_messages(&[], &Catalog::english()), "");
    }

    #[test]
    fn test_full_message_layout() {
        let mut message = WeatherMessage::new(MessageKind::SafetyNet);
        message.sections.header = vec![
            "ZCZC TEST".to_string(),
            "ISSUED BY VLADIVOSTOK METEO".to_string(),
        ];
        message.sections.part1.push(Forecast {
            warning: Some("GALE WARNING 53".to_string()),
            region: Some("PETER THE GREAT GULF".to_string()),
            time_range: TimeRange::new("SECOND HALF NIGHT", ""),
            wind: Wind {
                direction: "NW W".to_string(),
                speed: "15 TO 18 MS".to_string(),
                gusts: Some("15 TO 18 MS".to_string()),
            },
            seas: Some("1 TO 2 M".to_string()),
            ..Forecast::default()
        });
        message.sections.part2 = Some(Part2 {
            synopsis: Some(Synopsis {
                time: "0000 UTC".to_string(),
                pressures: vec![PressureCenter {
                    kind: PressureKind::Low,
                    hpa: Some("995 HPA".to_string()),
                    position: "LOW 995 HPA 45N 140E".to_string(),
                    movement: Some("NE 30 KMH".to_string()),
                }],
            }),
            ice_reports: vec![IceReport {
                region: "TATAR-STRAIT".to_string(),
                direction: "SW".to_string(),
                coordinates: vec!["4530N 13800E".to_string(), "4600N 13830E".to_string()],
            }],
        });
        message.sections.part3.push(Forecast {
            station_codes: vec!["31960".to_string(), "32150".to_string()],
            time_range: TimeRange::new("28/0600", "28/1800"),
            temperature: Some("AIR -5".to_string()),
            ..Forecast::default()
        });

        let expected = "\
=== SafetyNet bulletin 1 ===
=== Header ===
  ZCZC TEST
  Issued by: VLADIVOSTOK METEO
=== Part 1. Warnings ===
  GALE WARNING 53
  PETER THE GREAT GULF
  second half of night
  Wind: NW W 15 TO 18 MS gusts 15 TO 18 MS
  Seas: 1 TO 2 M
=== Part 2. Synopsis ===
  Synopsis at 0000 UTC
    Low: LOW 995 HPA 45N 140E, moving NE 30 KMH
  Ice TATAR-STRAIT
    Ice edge SW: 4530N 13800E, 4600N 13830E
=== Part 3. Forecast ===
  31960, 32150
  From 28/0600 to 28/1800
  Temperature: AIR -5
";
        assert_eq!(format_messages(&[message], &Catalog::english()), expected);
    }

    #[test]
    fn test_kn01_fields_and_numbering() {
        let mut first = WeatherMessage::new(MessageKind::Kn01 {
            station: "31960".to_string(),
        });
        first.sections.part1.push(Forecast {
            station_codes: vec!["31960".to_string()],
            pressure: Some("1012.3 hPa".to_string()),
            precipitation: Some("0.5 mm".to_string()),
            ..Forecast::default()
        });
        let mut second = WeatherMessage::new(MessageKind::SafetyNet);
        second.sections.header.push("ZCZC TEST".to_string());

        let report = format_messages(&[first, second], &Catalog::english());
        assert!(report.starts_with("=== KN01 bulletin 1 ===\n=== Part 1. Warnings ===\n"));
        assert!(report.contains("  Pressure: 1012.3 hPa\n  Precipitation: 0.5 mm\n"));
        assert!(report.contains("=== SafetyNet bulletin 2 ==="));
        assert!(!report.contains("Part 3"));
    }

    #[test]
    fn test_half_phrase_is_localized() {
        let range = TimeRange::new("SECOND HALF NIGHT AND FIRST HALF DAY 28/03", "");

        let english = time_range_label(&Catalog::english(), &range);
        assert_eq!(english, "second half of night and first half of day 28/03");

        let russian = time_range_label(&Catalog::builtin("ru").unwrap(), &range);
        assert_eq!(russian, "вторая половина ночи и первая половина дня 28/03");
    }

    #[test]
    fn test_half_phrase_without_catalog_keys_is_literal() {
        let bare = Catalog::from_json_str("xx", r#"{"wind": "Vent"}"#).unwrap();
        let range = TimeRange::new("SECOND HALF OF NIGHT AND FIRST HALF DAY 28/03", "");
        assert_eq!(
            time_range_label(&bare, &range),
            "SECOND HALF OF NIGHT AND FIRST HALF DAY 28/03"
        );
    }

    #[test]
    fn test_russian_labels() {
        let mut message = WeatherMessage::new(MessageKind::SafetyNet);
        message.sections.part1.push(Forecast {
            seas: Some("1 M".to_string()),
            ..Forecast::default()
        });
        let catalog = Catalog::builtin("ru").unwrap();
        let report = format_messages(&[message], &catalog);
        assert!(!report.contains("Seas"));
        assert!(report.contains("1 M"));
    }
}
