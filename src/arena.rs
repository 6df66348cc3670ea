use crate::error::{CodecError, Result};
use crate::types::{FastMap, Handle, PointerWidth};

// ─── StringArena ────────────────────────────────────────────────────────────

/// Side table owning every string referenced from a string slot.
///
/// A slot stores a [`Handle`] instead of a raw address; the arena maps the
/// handle to a NUL-terminated byte copy of the text. Handles are issued from a
/// monotonically increasing counter and never reused, so a stale handle left
/// in a released slot can never resolve to a newer allocation.
#[derive(Debug)]
pub struct StringArena {
    strings: FastMap<u64, Box<[u8]>>,
    next_handle: u64,
    max_handle: u64,
    live_bytes: usize,
    total_allocated: u64,
}

impl StringArena {
    pub fn new(width: PointerWidth) -> Self {
        Self {
            strings: FastMap::default(),
            next_handle: 1,
            max_handle: width.max_handle(),
            live_bytes: 0,
            total_allocated: 0,
        }
    }

    /// Copy `text` into a new NUL-terminated allocation.
    ///
    /// The allocation is sized by the UTF-8 byte length of `text` plus one
    /// terminator byte, never by its character count.
    pub fn alloc(&mut self, text: &str) -> Result<Handle> {
        if let Some(pos) = text.bytes().position(|b| b == 0) {
            return Err(CodecError::InteriorNul(pos));
        }
        if self.next_handle > self.max_handle {
            return Err(CodecError::HandleOverflow);
        }
        let handle = Handle::new(self.next_handle).ok_or(CodecError::HandleOverflow)?;

        let mut bytes = Vec::with_capacity(text.len() + 1);
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);

        self.live_bytes += bytes.len();
        self.total_allocated += 1;
        self.next_handle += 1;
        self.strings.insert(handle.get(), bytes.into_boxed_slice());
        Ok(handle)
    }

    /// The bytes behind `handle`, without the terminator.
    #[inline]
    pub fn get(&self, handle: Handle) -> Option<&[u8]> {
        self.strings
            .get(&handle.get())
            .map(|bytes| &bytes[..bytes.len() - 1])
    }

    #[inline]
    pub fn get_str(&self, handle: Handle) -> Option<&str> {
        std::str::from_utf8(self.get(handle)?).ok()
    }

    /// Allocated size of `handle`, terminator included.
    pub fn alloc_size(&self, handle: Handle) -> Option<usize> {
        self.strings.get(&handle.get()).map(|bytes| bytes.len())
    }

    /// Release `handle`. Returns false if it was never issued or is already gone.
    pub fn free(&mut self, handle: Handle) -> bool {
        match self.strings.remove(&handle.get()) {
            Some(bytes) => {
                self.live_bytes -= bytes.len();
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.strings.contains_key(&handle.get())
    }

    /// Number of allocations not yet released.
    #[inline]
    pub fn live(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Allocations made over the arena's lifetime.
    #[inline]
    pub fn total_allocated(&self) -> u64 {
        self.total_allocated
    }
}
