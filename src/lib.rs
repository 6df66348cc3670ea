//! Variable-length string slots inside fixed-size compound records.
//!
//! A compound record is a packed struct whose string members are stored as
//! pointer-width slots rather than inline bytes. [`VlStrCodec`] copies text
//! into and out of those slots and releases it again; [`bridge`] exposes the
//! same operations with the status-code conventions of a managed caller.

pub mod access;
pub mod arena;
pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod layout;
pub mod record;
pub mod types;

pub use codec::VlStrCodec;
pub use config::{CodecConfig, TailPolicy};
pub use error::{CodecError, ErrorKind, Result};
pub use layout::{CompoundLayout, LayoutSpec, MemberKind};
pub use record::SlotSchema;
pub use types::{Handle, PointerWidth, SlotByteOrder};
