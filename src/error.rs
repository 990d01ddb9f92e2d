use hyper::StatusCode;
use thiserror::Error;

/// Failures outside of the Paxos protocol itself.
///
/// Protocol outcomes such as a cancelled proposal are replies, not errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("must supply the acceptor port as the first argument")]
    MissingPort,

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("invalid bind host {0:?}")]
    InvalidHost(String),

    #[error("invalid acceptor address: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),

    /// The acceptor could not be reached or the connection failed mid-call
    #[error("acceptor unreachable: {0}")]
    Unreachable(#[from] hyper::Error),

    #[error("unable to bind acceptor address: {0}")]
    Bind(#[source] hyper::Error),

    #[error("acceptor server failed: {0}")]
    Serve(#[source] hyper::Error),

    #[error("acceptor replied with {0}")]
    Status(StatusCode),

    /// Slot index that the log cannot address or grow to
    #[error("slot {0} is out of range")]
    SlotOutOfRange(u64),

    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl Error {
    /// True when no reply was received. A proposer counts this as a
    /// missing vote rather than a rejection.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Error::Unreachable(_))
    }
}
