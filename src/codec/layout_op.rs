use super::VlStrCodec;
use crate::error::{CodecError, Result};
use crate::layout::CompoundLayout;
use crate::types::Handle;
use smol_str::SmolStr;

impl VlStrCodec {
    /// Absolute byte offset of member `name` in record `record` of an array.
    fn member_slot(&self, layout: &CompoundLayout, record: usize, name: &str) -> Result<usize> {
        if layout.width() != self.pointer_width() {
            return Err(CodecError::WidthMismatch {
                expected: self.pointer_width().bytes(),
                actual: layout.width().bytes(),
            });
        }
        let member = layout
            .member(name)
            .ok_or_else(|| CodecError::UnknownMember(SmolStr::new(name)))?;
        if !member.kind().is_vl_string() {
            return Err(CodecError::NotAStringSlot(SmolStr::new(name)));
        }
        record
            .checked_mul(layout.record_size())
            .and_then(|base| base.checked_add(member.offset()))
            .ok_or(CodecError::InvalidOffset(i64::MAX))
    }

    /// [`encode`](Self::encode) addressed by member name and record index.
    pub fn encode_member(
        &mut self,
        layout: &CompoundLayout,
        buf: &mut [u8],
        record: usize,
        name: &str,
        text: &str,
    ) -> Result<Handle> {
        let at = self.member_slot(layout, record, name)?;
        self.encode(text, buf, at)
    }

    /// [`decode`](Self::decode) addressed by member name and record index.
    pub fn decode_member(
        &self,
        layout: &CompoundLayout,
        buf: &[u8],
        record: usize,
        name: &str,
    ) -> Result<Option<String>> {
        let at = self.member_slot(layout, record, name)?;
        self.decode(buf, at)
    }

    /// Release all strings of a buffer of `layout` records.
    pub fn release_layout(&mut self, layout: &CompoundLayout, buf: &mut [u8]) -> Result<usize> {
        let schema = layout.slot_schema()?;
        self.release_all(buf, &schema)
    }
}
