mod tests {
    use light_projector::{Coord3D, ParameterStore};

    #[test]
    fn test_declare_then_read_round_trip() {
        let mut store = ParameterStore::<32>::new();
        store.reset();
        store.declare(Coord3D::new(2, 3, 1)).unwrap();
        store.declare(true).unwrap();

        // Repeated begin/read cycles must keep returning the declared
        // values without intervening writes.
        for _ in 0..3 {
            store.begin();
            assert_eq!(store.read::<Coord3D>(), Coord3D::new(2, 3, 1));
            assert_eq!(store.read::<bool>(), true);
        }
    }

    #[test]
    fn test_slot_editing() {
        let mut store = ParameterStore::<32>::new();
        store.reset();
        let factor = store.declare(Coord3D::ONE).unwrap();
        let mirror = store.declare(false).unwrap();

        store.set(factor, Coord3D::new(4, 4, 2));
        store.set(mirror, true);

        store.begin();
        assert_eq!(store.read::<Coord3D>(), Coord3D::new(4, 4, 2));
        assert_eq!(store.read::<bool>(), true);
        assert_eq!(store.get(factor), Coord3D::new(4, 4, 2));
    }

    #[test]
    fn test_write_raw_through_slot_ref() {
        let mut store = ParameterStore::<32>::new();
        store.reset();
        let value = store.declare(0u16).unwrap();

        assert!(store.write_raw(value.raw(), &513u16.to_le_bytes()));
        assert_eq!(store.get(value), 513);

        // Length mismatch writes nothing.
        assert!(!store.write_raw(value.raw(), &[1]));
        assert_eq!(store.get(value), 513);
    }

    #[test]
    fn test_capacity_error() {
        let mut store = ParameterStore::<8>::new();
        store.reset();
        store.declare(0u16).unwrap();
        let err = store.declare(Coord3D::ZERO).unwrap_err();
        assert_eq!(err.requested, 14);
        assert_eq!(err.capacity, 8);
    }

    #[test]
    fn test_reset_clears_layout() {
        let mut store = ParameterStore::<32>::new();
        store.reset();
        store.declare(Coord3D::new(9, 9, 9)).unwrap();
        assert_eq!(store.len(), 12);

        store.reset();
        assert!(store.is_empty());
        let flag = store.declare(true).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(flag), true);
    }

    #[test]
    fn test_persistence_round_trip() {
        let mut store = ParameterStore::<32>::new();
        store.reset();
        store.declare(Coord3D::new(3, 2, 1)).unwrap();
        store.declare(true).unwrap();

        let mut saved = [0u8; 13];
        saved.copy_from_slice(store.as_bytes());

        // A fresh store with the same declare sequence restores the bytes.
        let mut restored = ParameterStore::<32>::new();
        restored.reset();
        let factor2 = restored.declare(Coord3D::ONE).unwrap();
        let mirror2 = restored.declare(false).unwrap();
        assert_eq!(restored.load_bytes(&saved), 13);

        assert_eq!(restored.get(factor2), Coord3D::new(3, 2, 1));
        assert_eq!(restored.get(mirror2), true);
    }
}
