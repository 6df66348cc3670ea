use super::VlStrCodec;
use crate::error::{CodecError, Result};
use crate::record::SlotReadable;

impl VlStrCodec {
    /// Copy out the string referenced by the slot at `slot_offset`.
    ///
    /// Returns `None` for a null slot. The allocation is left in place.
    ///
    /// # Precondition
    ///
    /// The slot must hold a handle written by [`encode`](Self::encode) on this
    /// codec and not yet released. A slot that was never written, was written
    /// by another codec, or was already released violates this; the lookup
    /// then fails with `UnknownHandle` (or, by chance, finds an unrelated
    /// live string if the garbage equals a live handle).
    pub fn decode(&self, buf: &[u8], slot_offset: usize) -> Result<Option<String>> {
        Ok(self.decode_str(buf, slot_offset)?.map(str::to_owned))
    }

    /// Zero-copy variant of [`decode`](Self::decode), borrowing from the arena.
    pub fn decode_str(&self, buf: &[u8], slot_offset: usize) -> Result<Option<&str>> {
        let Some(handle) = self.view(buf).read_handle(slot_offset)? else {
            return Ok(None);
        };
        self.arena
            .get_str(handle)
            .map(Some)
            .ok_or(CodecError::UnknownHandle(handle.get()))
    }
}
