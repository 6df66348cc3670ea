use super::VlStrCodec;
use crate::error::Result;
use crate::record::SlotReadable;
use crate::types::Handle;

impl VlStrCodec {
    /// Copy `text` into a new string allocation and store its handle in the
    /// slot at `slot_offset`.
    ///
    /// The slot is bounds-checked before anything is allocated, so a failed
    /// call leaves `buf` untouched and allocates nothing. Whatever the slot
    /// held before is overwritten, not released.
    pub fn encode(&mut self, text: &str, buf: &mut [u8], slot_offset: usize) -> Result<Handle> {
        let mut view = self.view_mut(buf);
        view.slot_range(slot_offset)?;

        let handle = self.arena.alloc(text)?;
        view.write_handle(slot_offset, Some(handle))?;
        Ok(handle)
    }

    /// Store the null marker at `slot_offset` without touching the arena.
    pub fn encode_null(&mut self, buf: &mut [u8], slot_offset: usize) -> Result<()> {
        self.view_mut(buf).clear_slot(slot_offset)
    }
}
