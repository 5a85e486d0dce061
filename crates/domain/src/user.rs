//! User profile types and nickname rules

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name.
    pub nickname: String,
    /// Account email.
    pub email: String,
    /// Join date as served by the backend.
    pub joined_date: String,
}

/// Server-side nickname availability verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicknameCheck {
    /// Whether the nickname can be taken.
    pub is_available: bool,
    /// Human-readable reason when it cannot.
    pub reason: String,
}

/// Why a nickname was rejected locally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NicknameError {
    /// Too short or too long after trimming.
    #[error("nickname must be between 2 and 9 characters")]
    Length,
    /// Contains anything outside Hangul syllables, ASCII letters, digits.
    #[error("nickname may only contain Korean, English letters, or digits")]
    Charset,
    /// Matches a reserved service name.
    #[error("nickname is reserved")]
    Reserved,
}

/// Minimum nickname length in characters.
pub const MIN_NICKNAME_CHARS: usize = 2;
/// Maximum nickname length in characters.
pub const MAX_NICKNAME_CHARS: usize = 9;

/// Names users may not take.
const RESERVED_NICKNAMES: &[&str] = &["fieldfare", "필드페어"];

#[allow(clippy::unwrap_used)] // pattern is a compile-time constant
static NICKNAME_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9가-힣]+$").unwrap());

/// Checks a nickname against the service rules.
///
/// Leading/trailing whitespace is ignored; interior whitespace and
/// lone Hangul jamo fall under the charset rule (only complete
/// syllables are allowed).
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_nickname(nickname: &str) -> Result<(), NicknameError> {
    let trimmed = nickname.trim();

    let chars = trimmed.chars().count();
    if !(MIN_NICKNAME_CHARS..=MAX_NICKNAME_CHARS).contains(&chars) {
        return Err(NicknameError::Length);
    }

    if !NICKNAME_CHARSET.is_match(trimmed) {
        return Err(NicknameError::Charset);
    }

    if RESERVED_NICKNAMES.contains(&trimmed) {
        return Err(NicknameError::Reserved);
    }

    Ok(())
}
