use crate::error::Result;
use crate::types::{PointerWidth, SlotByteOrder};
use serde::{Deserialize, Serialize};

/// What `release_all` does with bytes after the last whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TailPolicy {
    /// Stop at the last whole record and log a warning.
    #[default]
    Ignore,
    /// Fail with `PartialRecord` before releasing anything.
    Reject,
    /// Treat the tail as a short record: release its slots that lie fully
    /// inside the buffer.
    Process,
}

/// Configuration for [`VlStrCodec::new`](crate::codec::VlStrCodec::new).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Width of a string slot. Default: the host pointer width.
    pub pointer_width: PointerWidth,
    /// Byte order of handles stored in slots. Default: host order.
    pub byte_order: SlotByteOrder,
    pub tail_policy: TailPolicy,
    /// Zero each slot after its string is released instead of leaving the
    /// stale handle behind.
    pub clear_released_slots: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pointer_width: PointerWidth::native(),
            byte_order: SlotByteOrder::Native,
            tail_policy: TailPolicy::Ignore,
            clear_released_slots: false,
        }
    }
}

impl CodecConfig {
    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
