use arrayvec::ArrayVec;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use std::num::NonZeroU64;

pub type FastMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FastHashSet<T> = HashSet<T, BuildHasherDefault<FxHasher>>;

// ─── Slot Layout ────────────────────────────────────────────────────────────
//
//  record (record_size bytes)
//  ┌──────────┬────────────────┬──────────┬────────────────┬─────┐
//  │ inline   │ string slot    │ inline   │ string slot    │ ... │
//  │ members  │ handle: W bytes│ members  │ handle: W bytes│     │
//  └──────────┴────────────────┴──────────┴────────────────┴─────┘
//
//  W is the pointer width (4 or 8). A handle of 0 is the null marker.

pub const MAX_POINTER_WIDTH: usize = 8;
pub const NULL_HANDLE: u64 = 0;

/// The byte image of one string slot.
pub type SlotBytes = ArrayVec<u8, MAX_POINTER_WIDTH>;

// ─── PointerWidth ───────────────────────────────────────────────────────────

/// Width of a string slot in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerWidth {
    W32,
    W64,
}

impl PointerWidth {
    /// The width of a pointer on the host.
    pub const fn native() -> Self {
        if std::mem::size_of::<usize>() == 4 {
            PointerWidth::W32
        } else {
            PointerWidth::W64
        }
    }

    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            PointerWidth::W32 => 4,
            PointerWidth::W64 => 8,
        }
    }

    /// Largest handle value a slot of this width can hold.
    #[inline]
    pub const fn max_handle(self) -> u64 {
        match self {
            PointerWidth::W32 => u32::MAX as u64,
            PointerWidth::W64 => u64::MAX,
        }
    }
}

impl Default for PointerWidth {
    fn default() -> Self {
        Self::native()
    }
}

// ─── SlotByteOrder ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl SlotByteOrder {
    /// Encode `raw` into a slot image of `width` bytes.
    /// `raw` must fit the width; callers check against `max_handle`.
    pub fn encode(self, raw: u64, width: PointerWidth) -> SlotBytes {
        let mut out = SlotBytes::new();
        match width {
            PointerWidth::W32 => {
                let v = raw as u32;
                let bytes = match self {
                    SlotByteOrder::Native => v.to_ne_bytes(),
                    SlotByteOrder::Little => v.to_le_bytes(),
                    SlotByteOrder::Big => v.to_be_bytes(),
                };
                out.extend(bytes);
            }
            PointerWidth::W64 => {
                let bytes = match self {
                    SlotByteOrder::Native => raw.to_ne_bytes(),
                    SlotByteOrder::Little => raw.to_le_bytes(),
                    SlotByteOrder::Big => raw.to_be_bytes(),
                };
                out.extend(bytes);
            }
        }
        out
    }

    /// Decode a slot image. `bytes` must be exactly 4 or 8 bytes long.
    pub fn decode(self, bytes: &[u8]) -> Option<u64> {
        match bytes.len() {
            4 => {
                let arr: [u8; 4] = bytes.try_into().ok()?;
                let v = match self {
                    SlotByteOrder::Native => u32::from_ne_bytes(arr),
                    SlotByteOrder::Little => u32::from_le_bytes(arr),
                    SlotByteOrder::Big => u32::from_be_bytes(arr),
                };
                Some(v as u64)
            }
            8 => {
                let arr: [u8; 8] = bytes.try_into().ok()?;
                Some(match self {
                    SlotByteOrder::Native => u64::from_ne_bytes(arr),
                    SlotByteOrder::Little => u64::from_le_bytes(arr),
                    SlotByteOrder::Big => u64::from_be_bytes(arr),
                })
            }
            _ => None,
        }
    }
}

// ─── Handle ─────────────────────────────────────────────────────────────────

/// Identifies one string allocation in a [`StringArena`](crate::arena::StringArena).
/// Never zero, so `Option<Handle>` maps the null slot to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(NonZeroU64);

impl Handle {
    #[inline]
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Handle)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}
