//! Bulletin decoder
//!
//! This module turns raw radiotelex text into [`WeatherMessage`]s:
//! - splitter: line normalization and frame-start detection
//! - state: parser states and the `(type, state)` dispatch table
//! - builder: per-frame accumulators and flush rules
//! - safetynet / navtex / kn01: line handlers per bulletin family
//! - extract: single-line field extractors
//! - wmo: KN01 5-digit group decoding
//!
//! Decoding never fails. Lines that match no rule are kept in the header or
//! ignored, depending on where they appear.

pub mod builder;
pub mod extract;
pub mod kn01;
pub mod navtex;
pub mod safetynet;
pub mod splitter;
pub mod state;
pub mod wmo;

use std::sync::{Arc, LazyLock};

use tracing::{debug, info, trace};

use crate::cache::DecodeCache;
use crate::i18n::{Catalog, Translator};
use crate::models::WeatherMessage;
use crate::stations::StationTable;
use builder::{DecodeContext, Frame};
use splitter::FrameStart;
use state::State;

static DEFAULT_DECODER: LazyLock<Decoder> =
    LazyLock::new(|| Decoder::new(Arc::new(Catalog::english()), Arc::new(StationTable::builtin())));

/// Decoder bound to a label catalog and station table, with its own cache
pub struct Decoder {
    translator: Arc<dyn Translator>,
    stations: Arc<StationTable>,
    cache: DecodeCache,
}

impl Decoder {
    #[must_use]
    pub fn new(translator: Arc<dyn Translator>, stations: Arc<StationTable>) -> Self {
        Self {
            translator,
            stations,
            cache: DecodeCache::new(),
        }
    }

    /// The process-wide decoder (English labels, built-in station table)
    #[must_use]
    pub fn shared() -> &'static Decoder {
        &DEFAULT_DECODER
    }

    #[must_use]
    pub fn translator(&self) -> &dyn Translator {
        self.translator.as_ref()
    }

    #[must_use]
    pub fn stations(&self) -> &StationTable {
        &self.stations
    }

    /// Decode every frame in `input`, reusing the previous result when the
    /// input is byte-identical to the last one.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = input.len()))]
    pub fn decode(&self, input: &str) -> Vec<WeatherMessage> {
        self.cache
            .get_or_insert_with(input, || self.decode_uncached(input))
    }

    /// Decode without consulting or updating the cache.
    #[must_use]
    pub fn decode_uncached(&self, input: &str) -> Vec<WeatherMessage> {
        let ctx = DecodeContext {
            translator: self.translator.as_ref(),
            stations: &self.stations,
        };
        let mut messages = Vec::new();
        let mut frame: Option<Frame<'_>> = None;

        for line in splitter::lines(input) {
            if let Some(start) = splitter::frame_start(line) {
                if let Some(message) = frame.take().and_then(Frame::finish) {
                    messages.push(message);
                }
                frame = Some(open_frame(ctx, start));
                continue;
            }

            match frame.as_mut() {
                Some(open) => open.process(line),
                None => trace!("Ignoring line outside any frame: {}", line),
            }
        }

        if let Some(message) = frame.and_then(Frame::finish) {
            messages.push(message);
        }

        info!("Decoded {} message(s)", messages.len());
        messages
    }
}

fn open_frame<'a>(ctx: DecodeContext<'a>, start: FrameStart<'_>) -> Frame<'a> {
    match start {
        FrameStart::Bulletin { kind, line } => {
            debug!("New {} frame: {}", kind.message_type(), line);
            let mut frame = Frame::new(ctx, kind, State::Header);
            frame.push_header(line);
            frame
        }
        FrameStart::Kn01 {
            station,
            date,
            groups,
        } => {
            debug!("New KN01 frame for station {}", station);
            kn01::start(ctx, station, date, groups)
        }
    }
}

/// Decode `input` with the shared decoder.
#[must_use]
pub fn decode_message(input: &str) -> Vec<WeatherMessage> {
    Decoder::shared().decode(input)
}
