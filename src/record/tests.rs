mod record_tests {
    use crate::error::CodecError;
    use crate::record::{RecordBuf, RecordBufMut, SlotReadable, SlotSchema};
    use crate::types::{Handle, PointerWidth, SlotByteOrder};

    fn h(raw: u64) -> Option<Handle> {
        Handle::new(raw)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Views
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_write_then_read_handle() {
        let mut buf = vec![0u8; 16];
        let mut view = RecordBufMut::new(&mut buf, PointerWidth::W64, SlotByteOrder::Little);
        view.write_handle(8, h(0x1122)).unwrap();
        assert_eq!(view.read_handle(8).unwrap(), h(0x1122));
        assert_eq!(view.read_handle(0).unwrap(), None);
        assert_eq!(&buf[8..10], &[0x22, 0x11]);
    }

    #[test]
    fn test_unaligned_slot() {
        let mut buf = vec![0u8; 13];
        let mut view = RecordBufMut::new(&mut buf, PointerWidth::W64, SlotByteOrder::Native);
        view.write_handle(5, h(7)).unwrap();
        assert_eq!(view.as_record().read_handle(5).unwrap(), h(7));
    }

    #[test]
    fn test_clear_slot_writes_null() {
        let mut buf = vec![0xFFu8; 4];
        let mut view = RecordBufMut::new(&mut buf, PointerWidth::W32, SlotByteOrder::Native);
        view.clear_slot(0).unwrap();
        assert_eq!(buf, vec![0u8; 4]);
    }

    #[test]
    fn test_slot_past_end() {
        let buf = vec![0u8; 8];
        let view = RecordBuf::new(&buf, PointerWidth::W64, SlotByteOrder::Native);
        assert!(view.read_handle(0).is_ok());
        assert!(matches!(
            view.read_handle(1),
            Err(CodecError::SlotOutOfBounds {
                offset: 1,
                width: 8,
                len: 8
            })
        ));
    }

    #[test]
    fn test_record_count_and_tail() {
        let buf = vec![0u8; 44];
        let view = RecordBuf::new(&buf, PointerWidth::W64, SlotByteOrder::Native);
        assert_eq!(view.record_count(16), 2);
        assert_eq!(view.tail_len(16), 12);
        assert_eq!(view.record_count(0), 0);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SlotSchema
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_schema_keeps_caller_order() {
        let s = SlotSchema::new(32, PointerWidth::W64, [16, 0, 24]).unwrap();
        assert_eq!(s.offsets(), &[16, 0, 24]);
        assert_eq!(s.slots_per_record(), 3);
        assert_eq!(s.record_size(), 32);
    }

    #[test]
    fn test_schema_zero_record_size() {
        assert!(matches!(
            SlotSchema::new(0, PointerWidth::W64, []),
            Err(CodecError::InvalidRecordSize(0))
        ));
    }

    #[test]
    fn test_schema_slot_must_fit_record() {
        assert!(SlotSchema::new(16, PointerWidth::W64, [8]).is_ok());
        assert!(matches!(
            SlotSchema::new(16, PointerWidth::W64, [9]),
            Err(CodecError::SlotOutOfBounds {
                offset: 9,
                width: 8,
                len: 16
            })
        ));
    }

    #[test]
    fn test_schema_rejects_overlap_and_duplicates() {
        assert!(matches!(
            SlotSchema::new(32, PointerWidth::W64, [0, 4]),
            Err(CodecError::OverlappingSlots { first: 0, second: 4 })
        ));
        assert!(matches!(
            SlotSchema::new(32, PointerWidth::W64, [8, 8]),
            Err(CodecError::OverlappingSlots { .. })
        ));
        assert!(SlotSchema::new(8, PointerWidth::W32, [0, 4]).is_ok());
    }

    #[test]
    fn test_schema_empty_offsets_is_valid() {
        let s = SlotSchema::new(12, PointerWidth::W64, []).unwrap();
        assert_eq!(s.slots_per_record(), 0);
    }

    #[test]
    fn test_schema_from_indices() {
        let s = SlotSchema::from_indices(24, &[0, 16], PointerWidth::W64).unwrap();
        assert_eq!(s.offsets(), &[0, 16]);
        assert!(matches!(
            SlotSchema::from_indices(24, &[-8], PointerWidth::W64),
            Err(CodecError::InvalidOffset(-8))
        ));
        assert!(matches!(
            SlotSchema::from_indices(-1, &[0], PointerWidth::W64),
            Err(CodecError::InvalidRecordSize(-1))
        ));
    }
}
