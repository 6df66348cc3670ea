use crate::error::{CodecError, Result};
use crate::record::SlotSchema;
use crate::types::{FastHashSet, PointerWidth};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use xxhash_rust::xxh64::xxh64;

// ─── MemberKind ─────────────────────────────────────────────────────────────

/// Storage class of one compound member. Sizes are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Bool,
    Int(usize),
    Float(usize),
    /// Inline string of a fixed byte length.
    FixedString(usize),
    /// String slot: one pointer-width handle.
    VlString,
    Opaque(usize),
}

impl MemberKind {
    #[inline]
    pub fn size(self, width: PointerWidth) -> usize {
        match self {
            MemberKind::Bool => 1,
            MemberKind::Int(n)
            | MemberKind::Float(n)
            | MemberKind::FixedString(n)
            | MemberKind::Opaque(n) => n,
            MemberKind::VlString => width.bytes(),
        }
    }

    /// Zero-sized members and float widths other than 2, 4 or 8 have no
    /// storage meaning.
    #[inline]
    pub fn is_valid_size(self, width: PointerWidth) -> bool {
        match self {
            MemberKind::Float(n) => matches!(n, 2 | 4 | 8),
            kind => kind.size(width) > 0,
        }
    }

    #[inline]
    pub fn is_vl_string(self) -> bool {
        matches!(self, MemberKind::VlString)
    }
}

// ─── MemberInfo ─────────────────────────────────────────────────────────────

/// One member of a compound record and where it sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    name: SmolStr,
    kind: MemberKind,
    offset: usize,
}

impl MemberInfo {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Byte offset within the record; 0 for the first member.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl std::fmt::Display for MemberInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:?}@{}", self.name, self.kind, self.offset)
    }
}

// ─── LayoutSpec ─────────────────────────────────────────────────────────────

/// Serializable description of a layout: the width and the ordered members.
/// Offsets are derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub width: PointerWidth,
    pub members: Vec<(SmolStr, MemberKind)>,
}

// ─── CompoundLayout ─────────────────────────────────────────────────────────

/// Packed layout of a compound record: members are placed back to back in
/// declaration order, each at the running sum of the previous sizes.
#[derive(Debug, Clone)]
pub struct CompoundLayout {
    width: PointerWidth,
    members: Vec<MemberInfo>,
    record_size: usize,
    /// (name_hash, member position), sorted by hash.
    index: Vec<(u64, usize)>,
}

impl PartialEq for CompoundLayout {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.members == other.members
    }
}

impl Eq for CompoundLayout {}

impl CompoundLayout {
    pub fn builder(width: PointerWidth) -> LayoutBuilder {
        LayoutBuilder {
            width,
            members: Vec::new(),
        }
    }

    pub fn from_spec(spec: &LayoutSpec) -> Result<Self> {
        spec.members
            .iter()
            .fold(Self::builder(spec.width), |b, (name, kind)| {
                b.member(name.clone(), *kind)
            })
            .build()
    }

    pub fn to_spec(&self) -> LayoutSpec {
        LayoutSpec {
            width: self.width,
            members: self
                .members
                .iter()
                .map(|m| (m.name.clone(), m.kind))
                .collect(),
        }
    }

    #[inline]
    pub fn width(&self) -> PointerWidth {
        self.width
    }

    #[inline]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Members in declaration (offset) order.
    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Members sorted by name; two layouts with the same members in a
    /// different declaration order compare equal in this form.
    pub fn sorted_members(&self) -> Vec<&MemberInfo> {
        let mut sorted: Vec<&MemberInfo> = self.members.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    /// Find a member by name.
    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        let hash = xxh64(name.as_bytes(), 0);
        let start = self.index.partition_point(|&(h, _)| h < hash);
        self.index[start..]
            .iter()
            .take_while(|&&(h, _)| h == hash)
            .map(|&(_, pos)| &self.members[pos])
            .find(|m| m.name.as_str() == name)
    }

    /// Offsets of every `VlString` member, in declaration order.
    pub fn vl_string_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.members
            .iter()
            .filter(|m| m.kind.is_vl_string())
            .map(|m| m.offset)
    }

    /// Slot schema covering every `VlString` member.
    pub fn slot_schema(&self) -> Result<SlotSchema> {
        SlotSchema::new(self.record_size, self.width, self.vl_string_offsets())
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        cbor4ii::serde::to_vec(Vec::new(), &self.to_spec())
            .map_err(|e| CodecError::Cbor(format!("{e:?}")))
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self> {
        let spec: LayoutSpec =
            cbor4ii::serde::from_slice(data).map_err(|e| CodecError::Cbor(format!("{e:?}")))?;
        Self::from_spec(&spec)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let spec: LayoutSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }
}

// ─── LayoutBuilder ──────────────────────────────────────────────────────────

pub struct LayoutBuilder {
    width: PointerWidth,
    members: Vec<(SmolStr, MemberKind)>,
}

impl LayoutBuilder {
    pub fn member(mut self, name: impl Into<SmolStr>, kind: MemberKind) -> Self {
        self.members.push((name.into(), kind));
        self
    }

    pub fn build(self) -> Result<CompoundLayout> {
        let mut seen: FastHashSet<SmolStr> = FastHashSet::default();
        let mut members = Vec::with_capacity(self.members.len());
        let mut offset = 0usize;

        for (name, kind) in self.members {
            if !seen.insert(name.clone()) {
                return Err(CodecError::DuplicateMember(name));
            }
            let size = kind.size(self.width);
            if !kind.is_valid_size(self.width) {
                return Err(CodecError::InvalidMemberSize { name, size });
            }
            let Some(next) = offset.checked_add(size) else {
                return Err(CodecError::LayoutTooLarge(name));
            };
            members.push(MemberInfo { name, kind, offset });
            offset = next;
        }

        if offset == 0 {
            return Err(CodecError::InvalidRecordSize(0));
        }

        let mut index: Vec<(u64, usize)> = members
            .iter()
            .enumerate()
            .map(|(pos, m)| (xxh64(m.name.as_bytes(), 0), pos))
            .collect();
        index.sort_unstable();

        Ok(CompoundLayout {
            width: self.width,
            members,
            record_size: offset,
            index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompoundLayout {
        CompoundLayout::builder(PointerWidth::W64)
            .member("id", MemberKind::Int(4))
            .member("name", MemberKind::VlString)
            .member("flag", MemberKind::Bool)
            .member("code", MemberKind::FixedString(3))
            .member("comment", MemberKind::VlString)
            .build()
            .unwrap()
    }

    #[test]
    fn test_offsets_are_running_sums() {
        let layout = sample();
        let offsets: Vec<usize> = layout.members().iter().map(|m| m.offset()).collect();
        assert_eq!(offsets, vec![0, 4, 12, 13, 16]);
        assert_eq!(layout.record_size(), 24);
    }

    #[test]
    fn test_lookup_by_name() {
        let layout = sample();
        assert_eq!(layout.member("comment").map(|m| m.offset()), Some(16));
        assert_eq!(layout.member("flag").map(|m| m.kind()), Some(MemberKind::Bool));
        assert!(layout.member("missing").is_none());
    }

    #[test]
    fn test_slot_schema_from_vl_members() {
        let schema = sample().slot_schema().unwrap();
        assert_eq!(schema.record_size(), 24);
        assert_eq!(schema.offsets(), &[4, 16]);
    }

    #[test]
    fn test_w32_slots_are_four_bytes() {
        let layout = CompoundLayout::builder(PointerWidth::W32)
            .member("a", MemberKind::VlString)
            .member("b", MemberKind::VlString)
            .build()
            .unwrap();
        assert_eq!(layout.record_size(), 8);
        assert_eq!(layout.slot_schema().unwrap().offsets(), &[0, 4]);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let err = CompoundLayout::builder(PointerWidth::W64)
            .member("a", MemberKind::Bool)
            .member("a", MemberKind::VlString)
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::DuplicateMember(ref n) if n == "a"));
    }

    #[test]
    fn test_empty_layout_rejected() {
        let err = CompoundLayout::builder(PointerWidth::W64).build().unwrap_err();
        assert!(matches!(err, CodecError::InvalidRecordSize(0)));
    }

    #[test]
    fn test_layout_size_overflow_rejected() {
        let err = CompoundLayout::from_json(
            r#"{"width":"w64","members":[["a",{"opaque":18446744073709551615}],["b","vl_string"]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::LayoutTooLarge(ref n) if n == "b"));
    }

    #[test]
    fn test_zero_size_member_rejected() {
        let err = CompoundLayout::builder(PointerWidth::W64)
            .member("a", MemberKind::VlString)
            .member("pad", MemberKind::Opaque(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidMemberSize { ref name, size: 0 } if name == "pad"));

        let err = CompoundLayout::builder(PointerWidth::W64)
            .member("x", MemberKind::Float(3))
            .build()
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidMemberSize { size: 3, .. }));
        assert!(
            CompoundLayout::builder(PointerWidth::W64)
                .member("x", MemberKind::Float(4))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_sorted_members_ignore_declaration_order() {
        let a = CompoundLayout::builder(PointerWidth::W64)
            .member("x", MemberKind::Int(8))
            .member("y", MemberKind::VlString)
            .build()
            .unwrap();
        let b = CompoundLayout::builder(PointerWidth::W64)
            .member("y", MemberKind::VlString)
            .member("x", MemberKind::Int(8))
            .build()
            .unwrap();
        let names_a: Vec<&str> = a.sorted_members().iter().map(|m| m.name()).collect();
        let names_b: Vec<&str> = b.sorted_members().iter().map(|m| m.name()).collect();
        assert_eq!(names_a, names_b);
        assert_ne!(a, b);
    }

    #[test]
    fn test_cbor_roundtrip() {
        let layout = sample();
        let bytes = layout.to_cbor().unwrap();
        let back = CompoundLayout::from_cbor(&bytes).unwrap();
        assert_eq!(back, layout);
        assert_eq!(back.member("name").map(|m| m.offset()), Some(4));
    }

    #[test]
    fn test_from_json() {
        let layout = CompoundLayout::from_json(
            r#"{ "width": "w64", "members": [["id", {"int": 8}], ["label", "vl_string"]] }"#,
        )
        .unwrap();
        assert_eq!(layout.record_size(), 16);
        assert_eq!(layout.member("label").map(|m| m.offset()), Some(8));
    }

    #[test]
    fn test_display() {
        let layout = sample();
        assert_eq!(layout.members()[1].to_string(), "name:VlString@4");
    }
}
