//! Commentary results and the `message | energy` text format.

use allstar_core::error::CommentaryError;
use serde::{Deserialize, Serialize};

/// Separator between message and energy score.
pub const SEPARATOR: char = '|';

/// Optional label some responses put before the message.
const LABEL: &str = "Commentary:";

/// Energy used when the score is missing or unreadable.
pub const DEFAULT_ENERGY: u8 = 100;

/// A parsed line of commentary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryResult {
    /// The line shown on the banner.
    pub message: String,
    /// Hype score in `[1, 100]`.
    pub energy_level: u8,
}

impl CommentaryResult {
    /// Parses `"Commentary: <message> | <energy>"`.
    ///
    /// The label is optional. An unreadable or zero energy becomes
    /// [`DEFAULT_ENERGY`]; anything above 100 is capped.
    ///
    /// # Errors
    ///
    /// Returns `CommentaryError::MalformedPayload` if the separator is missing
    /// or the message is empty.
    pub fn parse(text: &str) -> Result<Self, CommentaryError> {
        let Some((message, energy)) = text.split_once(SEPARATOR) else {
            return Err(CommentaryError::MalformedPayload(format!(
                "missing '{SEPARATOR}' separator"
            )));
        };

        let message = message.trim();
        let message = message.strip_prefix(LABEL).unwrap_or(message).trim();
        if message.is_empty() {
            return Err(CommentaryError::MalformedPayload("empty message".to_owned()));
        }

        Ok(Self {
            message: message.to_owned(),
            energy_level: parse_energy(energy),
        })
    }
}

/// Reads the leading integer of `raw`, mapping unreadable or zero values to
/// the default and capping at 100.
fn parse_energy(raw: &str) -> u8 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => DEFAULT_ENERGY,
        Ok(value) => u8::try_from(value.min(100)).unwrap_or(DEFAULT_ENERGY),
    }
}
