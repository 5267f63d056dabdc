// tagloop/src/error.rs

use thiserror::Error;

use crate::flows::Stage;

/// Common error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An exchange or RF operation is still running.
    #[error("operation still in progress")]
    Busy,

    #[error("operation timed out")]
    Timeout,

    #[error("framing error")]
    Framing,

    #[error("protocol error")]
    Protocol,

    #[error("invalid parameter")]
    Param,

    /// The RF layer refused the request in its current state (e.g. an
    /// exchange was started while another one is pending).
    #[error("wrong state for requested operation")]
    WrongState,

    #[error("rf layer initialization failed")]
    InitFailed,

    #[error("invalid discovery config: {0}")]
    InvalidConfig(String),

    #[error("invalid length: expected at most {max}, got {actual}")]
    InvalidLength { max: usize, actual: usize },

    #[error("message too large: {len} bytes exceeds buffer capacity {capacity}")]
    MessageTooLarge { len: usize, capacity: usize },

    #[error("tag is read-only")]
    ReadOnly,

    #[error("no ndef content found")]
    NotNdef,

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A step of a tag flow failed; `stage` names the step.
    #[error("{stage} failed: {source}")]
    Flow {
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the flow stage that produced it.
    pub fn at(self, stage: Stage) -> Self {
        Error::Flow {
            stage,
            source: Box::new(self),
        }
    }

    /// The flow stage of a [`Error::Flow`], if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Flow { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
