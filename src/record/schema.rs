use crate::error::{CodecError, Result};
use crate::types::PointerWidth;

// ─── SlotSchema ─────────────────────────────────────────────────────────────

/// Which byte offsets of a record hold string slots.
///
/// Validated once on construction: the record size is positive, every slot
/// lies fully inside one record, and no two slots share a byte. The same
/// schema then drives every record of a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSchema {
    record_size: usize,
    width: PointerWidth,
    /// Kept in caller order; release walks them in this order.
    offsets: Vec<usize>,
}

impl SlotSchema {
    pub fn new(
        record_size: usize,
        width: PointerWidth,
        offsets: impl IntoIterator<Item = usize>,
    ) -> Result<Self> {
        if record_size == 0 {
            return Err(CodecError::InvalidRecordSize(0));
        }
        let offsets: Vec<usize> = offsets.into_iter().collect();
        let w = width.bytes();

        for &offset in &offsets {
            match offset.checked_add(w) {
                Some(end) if end <= record_size => {}
                _ => {
                    return Err(CodecError::SlotOutOfBounds {
                        offset,
                        width: w,
                        len: record_size,
                    });
                }
            }
        }

        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        for pair in sorted.windows(2) {
            if pair[1] - pair[0] < w {
                return Err(CodecError::OverlappingSlots {
                    first: pair[0],
                    second: pair[1],
                });
            }
        }

        Ok(Self {
            record_size,
            width,
            offsets,
        })
    }

    /// Build from the integer arrays a managed caller passes across the bridge.
    pub fn from_indices(record_size: i32, indices: &[i32], width: PointerWidth) -> Result<Self> {
        let record_size = usize::try_from(record_size)
            .map_err(|_| CodecError::InvalidRecordSize(record_size as i64))?;
        let mut offsets = Vec::with_capacity(indices.len());
        for &idx in indices {
            let offset = usize::try_from(idx).map_err(|_| CodecError::InvalidOffset(idx as i64))?;
            offsets.push(offset);
        }
        Self::new(record_size, width, offsets)
    }

    #[inline]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    #[inline]
    pub fn width(&self) -> PointerWidth {
        self.width
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub fn slots_per_record(&self) -> usize {
        self.offsets.len()
    }
}
