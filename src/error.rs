//! Error type for join-info queries
//!
//! Sprint 2: failure surface
//!
//! The query has exactly three ways to fail: the OS reports a non-zero
//! HRESULT, the OS reports success but hands back no record, or the
//! process is not running on Windows at all.

use thiserror::Error;

use crate::hresult::Hresult;

/// Errors that can occur while reading device join state
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    #[error("device join query failed: {0}")]
    Api(Hresult),

    #[error("device join query succeeded but returned no join information")]
    NoJoinInfo,

    #[error("Entra ID join information is only available on Windows")]
    Unsupported,
}

impl JoinError {
    /// The raw HRESULT behind an `Api` failure, when there is one.
    pub fn hresult(&self) -> Option<Hresult> {
        match self {
            JoinError::Api(hr) => Some(*hr),
            _ => None,
        }
    }
}

/// Result type for join-info operations
pub type Result<T> = std::result::Result<T, JoinError>;
