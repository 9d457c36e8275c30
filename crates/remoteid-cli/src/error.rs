//! Error taxonomy for the collaborator layer. [`remoteid::error::RemoteIdError`]
//! covers codec and frame failures; this adds the I/O and configuration
//! failures the collaborator adapters can hit, the way the `adsb-index`
//! family wraps a domain error with `thiserror` rather than reaching for a
//! boxed `dyn Error` at every call site.

use remoteid::error::RemoteIdError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("codec error: {0}")]
    Codec(#[from] RemoteIdError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid MAC address {0:?}: {1}")]
    InvalidMac(String, String),
}
