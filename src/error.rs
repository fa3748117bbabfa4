//! Error types shared across the crate

use thiserror::Error;

use crate::sim::SessionPhase;

/// Invalid session configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("session duration must be positive, got {0}s")]
    Duration(u32),
    #[error("target radius must be a positive finite number, got {0}px")]
    TargetSize(f32),
    #[error("spawn interval must be positive, got {0}ms")]
    SpawnRate(u32),
    #[error("{field} = {value} is outside the menu range {min}..={max} (step {step})")]
    OutOfMenuRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
        step: f32,
    },
}

/// Rejected session controller request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),
    #[error("cannot {request} while {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        request: &'static str,
    },
}

/// Advice collaborator failure (always recovered into a fallback string)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoachError {
    #[error("no coaching provider is configured")]
    NotConfigured,
    #[error("coaching request failed: {0}")]
    Request(String),
    #[error("coaching provider returned no text")]
    EmptyResponse,
}
