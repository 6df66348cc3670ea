use super::VlStrCodec;
use crate::config::TailPolicy;
use crate::error::{CodecError, Result};
use crate::record::{SlotReadable, SlotSchema};
use crate::types::Handle;
use log::{debug, warn};

impl VlStrCodec {
    /// Release every string referenced from `buf`.
    ///
    /// `buf` is split into records of `schema.record_size()` bytes. Records are
    /// visited in order, and within each record the schema's offsets in the
    /// order they were given. Null slots are skipped. Returns the number of
    /// allocations released.
    ///
    /// Slot bytes are left holding stale handles unless
    /// `clear_released_slots` is set. A handle unknown to the arena (double
    /// release, garbage) is never freed twice: the pass completes and the
    /// first such handle is returned as `UnknownHandle`.
    pub fn release_all(&mut self, buf: &mut [u8], schema: &SlotSchema) -> Result<usize> {
        self.check_width(schema)?;
        let record_size = schema.record_size();
        let width = schema.width().bytes();
        let len = buf.len();
        let tail = len % record_size;

        let end = if tail == 0 {
            len
        } else {
            match self.config.tail_policy {
                TailPolicy::Reject => {
                    return Err(CodecError::PartialRecord { len, record_size });
                }
                TailPolicy::Ignore => {
                    warn!(
                        "release_all: ignoring {tail} trailing bytes (record size {record_size}, buffer {len})"
                    );
                    len - tail
                }
                TailPolicy::Process => len,
            }
        };

        let clear = self.config.clear_released_slots;
        let mut view = self.view_mut(buf);
        let mut released = 0usize;
        let mut first_unknown: Option<Handle> = None;

        let mut base = 0usize;
        while base < end {
            for &offset in schema.offsets() {
                let at = base + offset;
                // only a processed partial tail can cut a slot short
                if at + width > end {
                    continue;
                }
                let Some(handle) = view.read_handle(at)? else {
                    continue;
                };
                if self.arena.free(handle) {
                    released += 1;
                    if clear {
                        view.clear_slot(at)?;
                    }
                } else {
                    warn!("release_all: unknown handle {:#x} at byte {at}", handle.get());
                    first_unknown.get_or_insert(handle);
                }
            }
            base += record_size;
        }

        debug!(
            "release_all: released {released} strings from {} records, {} live",
            view.record_count(record_size),
            self.arena.live()
        );

        match first_unknown {
            Some(handle) => Err(CodecError::UnknownHandle(handle.get())),
            None => Ok(released),
        }
    }

    /// Release the strings of a single record (no array partitioning).
    pub fn release_record(&mut self, buf: &mut [u8], schema: &SlotSchema) -> Result<usize> {
        let len = buf.len();
        if len < schema.record_size() {
            return Err(CodecError::PartialRecord {
                len,
                record_size: schema.record_size(),
            });
        }
        self.release_all(&mut buf[..schema.record_size()], schema)
    }
}
