//! PART 2 records: synopsis pressure centres and ice edge reports

use serde::{Deserialize, Serialize};

/// Classification of a synopsis line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PressureKind {
    Low,
    High,
    Info,
}

impl PressureKind {
    /// Localization key for this kind
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            PressureKind::Low => "pressure_low",
            PressureKind::High => "pressure_high",
            PressureKind::Info => "pressure_info",
        }
    }
}

/// One pressure centre (or free-form remark) of a synopsis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressureCenter {
    #[serde(rename = "type")]
    pub kind: PressureKind,
    /// Central pressure, e.g. "995 HPA"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hpa: Option<String>,
    /// Line text without the "MOVING ..." suffix
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synopsis {
    pub time: String,
    pub pressures: Vec<PressureCenter>,
}

impl Synopsis {
    #[must_use]
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            pressures: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty() && self.pressures.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceReport {
    pub region: String,
    /// Compass token of the ice edge, e.g. "SW"
    pub direction: String,
    pub coordinates: Vec<String>,
}

impl IceReport {
    #[must_use]
    pub fn with_region(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty() && self.direction.is_empty() && self.coordinates.is_empty()
    }
}

/// PART 2 of a bulletin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part2 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<Synopsis>,
    pub ice_reports: Vec<IceReport>,
}
