//! Protocol error definitions.

use odra::prelude::*;

/// Result type for flow and collaborator operations
pub type YieldResult<T> = Result<T, YieldError>;

/// Yield compounder errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum YieldError {
    // Holding errors (1xx)
    InsufficientBalance = 100,

    // Collaborator errors (2xx)
    InvalidTarget = 200,
    InsufficientRewards = 201,

    // Access control errors (4xx)
    Unauthorized = 400,

    // Token errors (5xx)
    TokenTransferFailed = 500,

    // Configuration errors (9xx)
    InvalidConfig = 900,
}

impl YieldError {
    pub const fn message(&self) -> &'static str {
        match self {
            YieldError::InsufficientBalance => "Split amount exceeds holding value",
            YieldError::InvalidTarget => "Unknown or paused pool or market",
            YieldError::InsufficientRewards => "Claim amount exceeds accrued rewards",
            YieldError::Unauthorized => "Unauthorized: caller is not wallet or operator",
            YieldError::TokenTransferFailed => "Token transfer failed",
            YieldError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for YieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<YieldError> for OdraError {
    fn from(error: YieldError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
