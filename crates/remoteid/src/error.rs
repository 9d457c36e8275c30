use deku::DekuError;

/// Error taxonomy for the Remote-ID codec and frame builder/parser.
///
/// Encoders never fail on an out-of-range value (the [`crate::quantize`]
/// module clamps instead); they only fail when the caller's buffer is too
/// small to hold the structure being built. Decoders prefer to signal over
/// tolerate: a malformed envelope or a message shorter than its declared
/// size is reported rather than guessed at.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum RemoteIdError {
    /// The caller-provided output buffer cannot hold the structure being
    /// built. Buffer contents are undefined on this error.
    #[error("buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// The input byte slice is shorter than required by the structure's
    /// declared size.
    #[error("truncated input: need {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    /// A message-type nibble read from the wire is outside 0..4.
    #[error("unknown message type tag: {0:#x}")]
    UnknownMessageType(u8),

    /// An envelope-level constraint was violated: wrong OUI, wrong service
    /// id, or inconsistent length fields.
    #[error("malformed frame: {0}")]
    MalformedFrame(&'static str),

    /// The envelope discriminators (frame_control, category, action_code)
    /// do not identify a NAN action frame. Not an error to the end user,
    /// a filter outcome: callers typically drop these frames silently.
    #[error("not a Remote-ID NAN action frame")]
    NotOurFrame,
}

impl From<DekuError> for RemoteIdError {
    fn from(err: DekuError) -> Self {
        match err {
            DekuError::Incomplete(_) => RemoteIdError::Truncated {
                needed: 0,
                available: 0,
            },
            other => RemoteIdError::MalformedFrame(deku_error_kind(&other)),
        }
    }
}

fn deku_error_kind(err: &DekuError) -> &'static str {
    match err {
        DekuError::Parse(_) => "deku parse error",
        DekuError::Assertion(_) => "deku assertion failed",
        DekuError::InvalidParam(_) => "deku invalid parameter",
        _ => "deku error",
    }
}

pub type Result<T> = core::result::Result<T, RemoteIdError>;
