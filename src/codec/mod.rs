mod decode_op;
mod encode_op;
mod layout_op;
mod release_op;

use crate::arena::StringArena;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::record::{RecordBuf, RecordBufMut, SlotSchema};
use crate::types::PointerWidth;

// ─── VlStrCodec ─────────────────────────────────────────────────────────────

/// Copies variable-length strings into and out of the string slots of
/// fixed-size compound records.
///
/// Record buffers are borrowed per call and never resized or freed. The
/// strings themselves live in the codec's [`StringArena`]; a slot holds only
/// the handle. Mutation takes `&mut self`, so two calls cannot race on one
/// codec.
#[derive(Debug)]
pub struct VlStrCodec {
    arena: StringArena,
    config: CodecConfig,
}

impl VlStrCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self {
            arena: StringArena::new(config.pointer_width),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    #[inline]
    pub fn arena(&self) -> &StringArena {
        &self.arena
    }

    #[inline]
    pub fn pointer_width(&self) -> PointerWidth {
        self.config.pointer_width
    }

    #[inline]
    fn view<'b>(&self, buf: &'b [u8]) -> RecordBuf<'b> {
        RecordBuf::new(buf, self.config.pointer_width, self.config.byte_order)
    }

    #[inline]
    fn view_mut<'b>(&self, buf: &'b mut [u8]) -> RecordBufMut<'b> {
        RecordBufMut::new(buf, self.config.pointer_width, self.config.byte_order)
    }

    fn check_width(&self, schema: &SlotSchema) -> Result<()> {
        if schema.width() != self.config.pointer_width {
            return Err(CodecError::WidthMismatch {
                expected: self.config.pointer_width.bytes(),
                actual: schema.width().bytes(),
            });
        }
        Ok(())
    }
}

impl Default for VlStrCodec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}
