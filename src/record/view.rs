use super::read_op::SlotReadable;
use crate::error::Result;
use crate::types::{Handle, NULL_HANDLE, PointerWidth, SlotByteOrder};

// ─── Reader ─────────────────────────────────────────────────────────────────
/// Read-only typed view over a record buffer.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuf<'a> {
    pub data_buf: &'a [u8],
    pub width: PointerWidth,
    pub byte_order: SlotByteOrder,
}

impl<'a> RecordBuf<'a> {
    #[inline]
    pub fn new(data_buf: &'a [u8], width: PointerWidth, byte_order: SlotByteOrder) -> Self {
        Self {
            data_buf,
            width,
            byte_order,
        }
    }
}

impl<'a> SlotReadable for RecordBuf<'a> {
    #[inline]
    fn data_buf(&self) -> &[u8] {
        self.data_buf
    }

    #[inline]
    fn width(&self) -> PointerWidth {
        self.width
    }

    #[inline]
    fn byte_order(&self) -> SlotByteOrder {
        self.byte_order
    }
}

// ─── Writer ─────────────────────────────────────────────────────────────────
/// Mutable typed view over a record buffer. The buffer is borrowed, never
/// resized or freed.
#[derive(Debug)]
pub struct RecordBufMut<'a> {
    pub data_buf: &'a mut [u8],
    pub width: PointerWidth,
    pub byte_order: SlotByteOrder,
}

impl<'a> RecordBufMut<'a> {
    #[inline]
    pub fn new(data_buf: &'a mut [u8], width: PointerWidth, byte_order: SlotByteOrder) -> Self {
        Self {
            data_buf,
            width,
            byte_order,
        }
    }

    #[inline]
    pub fn as_record(&self) -> RecordBuf<'_> {
        RecordBuf::new(&*self.data_buf, self.width, self.byte_order)
    }

    /// Store `handle` (or the null marker) at `offset` as one pointer-width
    /// write. Touches no byte outside `[offset, offset + width)`.
    #[inline]
    pub fn write_handle(&mut self, offset: usize, handle: Option<Handle>) -> Result<()> {
        let range = self.slot_range(offset)?;
        let raw = handle.map_or(NULL_HANDLE, Handle::get);
        let image = self.byte_order.encode(raw, self.width);
        self.data_buf[range].copy_from_slice(&image);
        Ok(())
    }

    /// Write the null marker at `offset`.
    #[inline]
    pub fn clear_slot(&mut self, offset: usize) -> Result<()> {
        self.write_handle(offset, None)
    }
}

impl<'a> SlotReadable for RecordBufMut<'a> {
    #[inline]
    fn data_buf(&self) -> &[u8] {
        &*self.data_buf
    }

    #[inline]
    fn width(&self) -> PointerWidth {
        self.width
    }

    #[inline]
    fn byte_order(&self) -> SlotByteOrder {
        self.byte_order
    }
}
