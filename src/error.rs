// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    /// A required argument was not supplied by the caller.
    #[error("{0} is NULL")]
    AbsentArgument(&'static str),
    /// The managed runtime refused direct access to a collection.
    #[error("{0} not pinned")]
    AccessFailure(String),
    #[error("slot at offset {offset} (width {width}) exceeds {len} bytes")]
    SlotOutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
    #[error("slots at offsets {first} and {second} overlap")]
    OverlappingSlots { first: usize, second: usize },
    #[error("invalid record size: {0}")]
    InvalidRecordSize(i64),
    #[error("invalid slot offset: {0}")]
    InvalidOffset(i64),
    #[error("buffer of {len} bytes ends in a partial record (record size {record_size})")]
    PartialRecord { len: usize, record_size: usize },
    #[error("pointer width mismatch: expected {expected} bytes, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },
    #[error("unknown string handle: {0:#x}")]
    UnknownHandle(u64),
    #[error("string contains NUL at byte {0}")]
    InteriorNul(usize),
    #[error("string handles exhausted for this pointer width")]
    HandleOverflow,
    #[error("duplicate compound member: {0}")]
    DuplicateMember(SmolStr),
    #[error("unknown compound member: {0}")]
    UnknownMember(SmolStr),
    #[error("compound member {name} has invalid size {size}")]
    InvalidMemberSize { name: SmolStr, size: usize },
    #[error("compound layout exceeds the address space at member {0}")]
    LayoutTooLarge(SmolStr),
    #[error("compound member is not a variable-length string: {0}")]
    NotAStringSlot(SmolStr),
    #[error("config error: {0}")]
    Config(String),
    #[error("CBOR error: {0}")]
    Cbor(String),
}

/// The three failure channels a managed caller distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller logic error; fix the call site.
    AbsentArgument,
    /// The runtime could not grant memory access.
    Fatal,
    /// Everything else, passed through as a library error.
    Library,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::AbsentArgument(_) => ErrorKind::AbsentArgument,
            CodecError::AccessFailure(_) => ErrorKind::Fatal,
            _ => ErrorKind::Library,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Config(e.to_string())
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        assert_eq!(CodecError::AbsentArgument("buf").kind(), ErrorKind::AbsentArgument);
        assert_eq!(CodecError::AccessFailure("buf".into()).kind(), ErrorKind::Fatal);
        assert_eq!(CodecError::UnknownHandle(3).kind(), ErrorKind::Library);
        assert_eq!(CodecError::HandleOverflow.kind(), ErrorKind::Library);
        assert_eq!(CodecError::LayoutTooLarge("a".into()).kind(), ErrorKind::Library);
    }

    #[test]
    fn test_messages_name_the_argument() {
        assert_eq!(CodecError::AbsentArgument("buf").to_string(), "buf is NULL");
        assert_eq!(
            CodecError::AccessFailure("vlIndices".into()).to_string(),
            "vlIndices not pinned"
        );
    }
}
