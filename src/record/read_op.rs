use crate::error::{CodecError, Result};
use crate::types::{Handle, PointerWidth, SlotByteOrder};
use std::ops::Range;

/// Bounds-checked handle reads shared by the shared and mutable record views.
pub trait SlotReadable {
    fn data_buf(&self) -> &[u8];
    fn width(&self) -> PointerWidth;
    fn byte_order(&self) -> SlotByteOrder;

    /// Byte range of the slot at `offset`, or `SlotOutOfBounds`.
    #[inline]
    fn slot_range(&self, offset: usize) -> Result<Range<usize>> {
        let width = self.width().bytes();
        let len = self.data_buf().len();
        match offset.checked_add(width) {
            Some(end) if end <= len => Ok(offset..end),
            _ => Err(CodecError::SlotOutOfBounds { offset, width, len }),
        }
    }

    /// Raw handle value at `offset`, 0 for the null slot.
    #[inline]
    fn read_raw(&self, offset: usize) -> Result<u64> {
        let range = self.slot_range(offset)?;
        // range is exactly one pointer width, so decode always succeeds
        self.byte_order()
            .decode(&self.data_buf()[range])
            .ok_or(CodecError::SlotOutOfBounds {
                offset,
                width: self.width().bytes(),
                len: self.data_buf().len(),
            })
    }

    /// Handle at `offset`, `None` if the slot holds the null marker.
    #[inline]
    fn read_handle(&self, offset: usize) -> Result<Option<Handle>> {
        Ok(Handle::new(self.read_raw(offset)?))
    }

    /// Number of whole records of `record_size` bytes.
    #[inline]
    fn record_count(&self, record_size: usize) -> usize {
        if record_size == 0 {
            return 0;
        }
        self.data_buf().len() / record_size
    }

    /// Bytes left over after the last whole record.
    #[inline]
    fn tail_len(&self, record_size: usize) -> usize {
        if record_size == 0 {
            return self.data_buf().len();
        }
        self.data_buf().len() % record_size
    }
}
