//! Data models for decoded bulletins
//!
//! This module contains the message model organized by concern:
//! - Message: one decoded frame and its variant-specific tag
//! - Forecast: PART 1 / PART 3 forecast records
//! - Synopsis: PART 2 pressure centres and ice reports

pub mod forecast;
pub mod message;
pub mod synopsis;

// Re-export all public types for convenient access
pub use forecast::{Forecast, TimeRange, Wind};
pub use message::{MessageKind, MessageType, Sections, WeatherMessage};
pub use synopsis::{IceReport, Part2, PressureCenter, PressureKind, Synopsis};
