//! `marine-telex` - maritime radiotelex bulletin decoder
//!
//! This library decodes SafetyNet, NAVTEX and KN01 weather bulletins into
//! structured messages and renders them as localized plain-text reports.
//! It also carries the two small network helpers used alongside the
//! decoder: an ocean-currents JSON fetch and an imagery downloader.

pub mod cache;
pub mod config;
pub mod currents;
pub mod decoder;
pub mod error;
pub mod http;
pub mod i18n;
pub mod imagery;
pub mod logging;
pub mod models;
pub mod render;
pub mod stations;

// Re-export core types for public API
pub use cache::DecodeCache;
pub use config::TelexConfig;
pub use currents::{CurrentsConfig, fetch_currents};
pub use decoder::{Decoder, decode_message};
pub use error::TelexError;
pub use i18n::{Catalog, Translator};
pub use imagery::{DownloadConfig, download_images};
pub use models::{
    Forecast, IceReport, MessageKind, MessageType, Part2, PressureCenter, PressureKind, Sections,
    Synopsis, TimeRange, WeatherMessage, Wind,
};
pub use render::format_messages;
pub use stations::StationTable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TelexError>;

/// Render messages with the shared decoder's (English) labels.
#[must_use]
pub fn format_message(messages: &[WeatherMessage]) -> String {
    format_messages(messages, Decoder::shared().translator())
}
