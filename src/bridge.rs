//! Entry points for a managed-runtime caller.
//!
//! Every argument the managed side may pass as null arrives as an `Option`.
//! Failures are reported through an [`ErrorSink`] and collapse to
//! [`STATUS_FAILURE`] (or `None` for decode). Absent arguments are always
//! checked before any collection is pinned.

use crate::access::{ManagedArray, Pinned};
use crate::codec::VlStrCodec;
use crate::error::{CodecError, ErrorKind, Result};
use crate::record::SlotSchema;
use log::error;

pub const STATUS_OK: i32 = 0;
pub const STATUS_FAILURE: i32 = -1;

/// Managed-side error callbacks. One per failure channel.
pub trait ErrorSink {
    /// A required argument was null.
    fn null_argument(&mut self, msg: &str);
    /// A collection could not be pinned.
    fn fatal_error(&mut self, msg: &str);
    /// Anything else, passed through from the library.
    fn library_error(&mut self, msg: &str);
}

/// Sink that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn null_argument(&mut self, msg: &str) {
        error!("null argument: {msg}");
    }

    fn fatal_error(&mut self, msg: &str) {
        error!("fatal: {msg}");
    }

    fn library_error(&mut self, msg: &str) {
        error!("library: {msg}");
    }
}

/// Sink that keeps every report, in order.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub reports: Vec<(ErrorKind, String)>,
}

impl ErrorSink for CollectingSink {
    fn null_argument(&mut self, msg: &str) {
        self.reports.push((ErrorKind::AbsentArgument, msg.to_owned()));
    }

    fn fatal_error(&mut self, msg: &str) {
        self.reports.push((ErrorKind::Fatal, msg.to_owned()));
    }

    fn library_error(&mut self, msg: &str) {
        self.reports.push((ErrorKind::Library, msg.to_owned()));
    }
}

fn report<S: ErrorSink + ?Sized>(sink: &mut S, function: &str, err: &CodecError) {
    let msg = format!("{function}:  {err}");
    match err.kind() {
        ErrorKind::AbsentArgument => sink.null_argument(&msg),
        ErrorKind::Fatal => sink.fatal_error(&msg),
        ErrorKind::Library => sink.library_error(&msg),
    }
}

fn to_offset(ofs: i32) -> Result<usize> {
    usize::try_from(ofs).map_err(|_| CodecError::InvalidOffset(ofs as i64))
}

// ════════════════════════════════════════════════════════════════════════
// Entry points
// ════════════════════════════════════════════════════════════════════════

/// Size of a string slot in bytes.
pub fn get_pointer_size(codec: &VlStrCodec) -> i32 {
    codec.pointer_width().bytes() as i32
}

/// Copy `text` into a new string and store its handle at `buf_ofs` in `buf`.
pub fn compound_cpy_vl_str<S, B>(
    sink: &mut S,
    codec: &mut VlStrCodec,
    text: Option<&str>,
    buf: Option<&mut B>,
    buf_ofs: i32,
) -> i32
where
    S: ErrorSink + ?Sized,
    B: ManagedArray<Elem = u8> + ?Sized,
{
    match cpy_vl_str(codec, text, buf, buf_ofs) {
        Ok(()) => STATUS_OK,
        Err(e) => {
            report(sink, "compoundCpyVLStr", &e);
            STATUS_FAILURE
        }
    }
}

fn cpy_vl_str<B>(
    codec: &mut VlStrCodec,
    text: Option<&str>,
    buf: Option<&mut B>,
    buf_ofs: i32,
) -> Result<()>
where
    B: ManagedArray<Elem = u8> + ?Sized,
{
    let text = text.ok_or(CodecError::AbsentArgument("str"))?;
    let buf = buf.ok_or(CodecError::AbsentArgument("buf"))?;
    let offset = to_offset(buf_ofs)?;

    let mut pinned =
        Pinned::acquire(buf).ok_or_else(|| CodecError::AccessFailure("buf".into()))?;
    codec.encode(text, &mut pinned, offset)?;
    Ok(())
}

/// Decode the string whose handle sits at `offset` in `buf`.
pub fn create_vl_str_from_compound<S, B>(
    sink: &mut S,
    codec: &VlStrCodec,
    buf: Option<&mut B>,
    offset: i32,
) -> Option<String>
where
    S: ErrorSink + ?Sized,
    B: ManagedArray<Elem = u8> + ?Sized,
{
    match vl_str_from_compound(codec, buf, offset) {
        Ok(text) => text,
        Err(e) => {
            report(sink, "createVLStrFromCompound", &e);
            None
        }
    }
}

fn vl_str_from_compound<B>(
    codec: &VlStrCodec,
    buf: Option<&mut B>,
    offset: i32,
) -> Result<Option<String>>
where
    B: ManagedArray<Elem = u8> + ?Sized,
{
    let buf = buf.ok_or(CodecError::AbsentArgument("buf"))?;
    let offset = to_offset(offset)?;

    let pinned = Pinned::acquire(buf).ok_or_else(|| CodecError::AccessFailure("buf".into()))?;
    codec.decode(&pinned, offset)
}

/// Release every string referenced from `buf`, an array of `record_size`
/// byte records whose string slots sit at `vl_indices`.
pub fn free_compound_vl_str<S, B, I>(
    sink: &mut S,
    codec: &mut VlStrCodec,
    buf: Option<&mut B>,
    record_size: i32,
    vl_indices: Option<&mut I>,
) -> i32
where
    S: ErrorSink + ?Sized,
    B: ManagedArray<Elem = u8> + ?Sized,
    I: ManagedArray<Elem = i32> + ?Sized,
{
    match free_vl_str(codec, buf, record_size, vl_indices) {
        Ok(_) => STATUS_OK,
        Err(e) => {
            report(sink, "freeCompoundVLStr", &e);
            STATUS_FAILURE
        }
    }
}

fn free_vl_str<B, I>(
    codec: &mut VlStrCodec,
    buf: Option<&mut B>,
    record_size: i32,
    vl_indices: Option<&mut I>,
) -> Result<usize>
where
    B: ManagedArray<Elem = u8> + ?Sized,
    I: ManagedArray<Elem = i32> + ?Sized,
{
    let buf = buf.ok_or(CodecError::AbsentArgument("buf"))?;
    let vl_indices = vl_indices.ok_or(CodecError::AbsentArgument("vlIndices"))?;

    // indices first; if the buffer then fails to pin, dropping this guard
    // unpins the indices
    let indices =
        Pinned::acquire(vl_indices).ok_or_else(|| CodecError::AccessFailure("vlIndices".into()))?;
    let mut pinned =
        Pinned::acquire(buf).ok_or_else(|| CodecError::AccessFailure("buf".into()))?;

    let schema = SlotSchema::from_indices(record_size, &indices, codec.pointer_width())?;
    codec.release_all(&mut pinned, &schema)
}
