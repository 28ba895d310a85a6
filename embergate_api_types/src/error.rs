use thiserror::Error;

/// A recoverable decode failure. The wire codec logs these and drops the
/// offending frame; they never abort the session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame carries an unrecognized opcode {0}")]
    UnknownOpcode(u64),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` did not match the expected schema")]
    SchemaMismatch(&'static str),

    #[error("dispatch frame is missing its sequence number or event name")]
    DispatchMissingEnvelope,

    #[error("non-dispatch frame unexpectedly carries a sequence number or event name")]
    NonDispatchHasEnvelope,

    #[error("payload was not a JSON object")]
    NotAnObject,
}
