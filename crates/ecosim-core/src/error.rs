//! Error types for caller misuse and configuration problems.
//!
//! The engine itself has no fatal conditions; these are reported back to the
//! caller and never mutate simulation state.

use thiserror::Error;

use crate::constants::MAX_SPAWN_PER_REQUEST;

/// Rejected spawn request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("spawn count must be at least 1, got {0}")]
    NonPositiveCount(i64),
    #[error("spawn count is not a number: {0:?}")]
    NotANumber(String),
    #[error("unknown organism kind: {0:?}")]
    UnknownKind(String),
}

/// Invalid `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arena must have positive finite dimensions, got {width}x{height}")]
    InvalidArena { width: f64, height: f64 },
    #[error("grid cell size must be positive and finite, got {0}")]
    InvalidCellSize(f64),
    #[error("grid cell size {cell_size} is smaller than query radius {radius}")]
    CellSmallerThanRadius { cell_size: f64, radius: f64 },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Validate a raw spawn count and apply the per-request cap.
pub fn validate_spawn_count(count: i64) -> Result<usize, ValidationError> {
    if count < 1 {
        return Err(ValidationError::NonPositiveCount(count));
    }
    Ok((count as u64).min(MAX_SPAWN_PER_REQUEST as u64) as usize)
}

/// Parse a spawn count typed by a user. Leading integer digits are accepted
/// and anything after them ignored, so `"12abc"` is 12.
pub fn parse_spawn_count(input: &str) -> Result<usize, ValidationError> {
    let trimmed = input.trim();
    let sign_len = usize::from(trimmed.starts_with(['-', '+']));
    let digits_end = trimmed[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |i| i + sign_len);
    if digits_end == sign_len {
        return Err(ValidationError::NotANumber(input.to_string()));
    }
    let value = match trimmed[..digits_end].parse::<i64>() {
        Ok(v) => v,
        // Overflowing positive input is still a valid (capped) request.
        Err(_) if !trimmed.starts_with('-') => i64::MAX,
        Err(_) => i64::MIN,
    };
    validate_spawn_count(value)
}
