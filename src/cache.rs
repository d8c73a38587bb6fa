use sha2::{Digest, Sha256};
use std::sync::Mutex;

use crate::models::WeatherMessage;

struct CacheSlot {
    digest: String,
    messages: Vec<WeatherMessage>,
}

/// Single-slot memo of the last decoded input, keyed by its SHA-256 digest.
///
/// Only the most recent input is kept; decoding a different input replaces it.
#[derive(Default)]
pub struct DecodeCache {
    slot: Mutex<Option<CacheSlot>>,
}

/// Hex SHA-256 of the input text
#[must_use]
pub fn digest(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

impl DecodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached messages if `input` is the last decoded input.
    #[tracing::instrument(name = "query_decode_cache", level = "debug", skip_all)]
    pub fn get(&self, input: &str) -> Option<Vec<WeatherMessage>> {
        let key = digest(input);
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        match slot.as_ref() {
            Some(entry) if entry.digest == key => {
                tracing::debug!("Input found in cache");
                Some(entry.messages.clone())
            }
            Some(_) => {
                tracing::debug!("Cache holds a different input");
                None
            }
            None => {
                tracing::debug!("Cache empty");
                None
            }
        }
    }

    /// Stores `messages` as the result for `input`, replacing the slot.
    #[tracing::instrument(name = "put_decode_cache", level = "debug", skip_all)]
    pub fn put(&self, input: &str, messages: Vec<WeatherMessage>) {
        let entry = CacheSlot {
            digest: digest(input),
            messages,
        };
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(entry);
    }

    /// Cached result for `input`, or decode it with `decode` and remember it.
    pub fn get_or_insert_with<F>(&self, input: &str, decode: F) -> Vec<WeatherMessage>
    where
        F: FnOnce() -> Vec<WeatherMessage>,
    {
        if let Some(messages) = self.get(input) {
            return messages;
        }
        let messages = decode();
        self.put(input, messages.clone());
        messages
    }
}
