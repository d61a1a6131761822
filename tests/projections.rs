mod tests {
    use embassy_time::Instant;
    use light_projector::projection::{
        GroupingProjection, MirrorProjection, MultiplyProjection, ReverseProjection,
        TransposeProjection,
    };
    use light_projector::{
        ConfigContext, ControlSet, Coord3D, Dimension, MapContext, MotionState, Projection,
        SegmentParams,
    };

    fn map_ctx<'a>(
        params: &'a mut SegmentParams,
        fix_size: Coord3D,
        projection_dimension: Dimension,
        effect_dimension: Dimension,
    ) -> MapContext<'a> {
        MapContext {
            size: Coord3D::ZERO,
            fix_size,
            projection_dimension,
            effect_dimension,
            params,
            motion: MotionState::default(),
            now: Instant::from_millis(0),
        }
    }

    #[test]
    fn test_mirror_fold() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(true).unwrap(); // mirror_x
        params.declare(false).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(10, 1, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D1, Dimension::D1);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(7, 0, 0);
        let mut mid = fix_size / 2;
        MirrorProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel.x, 2);
        assert_eq!(size.x, 5);
    }

    #[test]
    fn test_mirror_identity() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(false).unwrap();
        params.declare(false).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(10, 8, 3);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D3, Dimension::D3);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(7, 5, 2);
        let mut mid = fix_size / 2;
        MirrorProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(size, fix_size);
        assert_eq!(pixel, Coord3D::new(7, 5, 2));
        assert_eq!(mid, fix_size / 2);
    }

    #[test]
    fn test_mirror_gating_ignores_stray_bytes() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(false).unwrap();
        // Stray nonzero bytes for axes a 1D projection does not expose.
        params.declare(true).unwrap();
        params.declare(true).unwrap();

        let fix_size = Coord3D::new(10, 10, 10);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D1, Dimension::D1);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(3, 8, 9);
        let mut mid = fix_size / 2;
        MirrorProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(size, fix_size);
        assert_eq!(pixel, Coord3D::new(3, 8, 9));
    }

    #[test]
    fn test_mirror_controls_gated_by_projection_dimension() {
        let mut params = SegmentParams::new();

        let mut registrar = ControlSet::<8>::new();
        let mut ctx = ConfigContext {
            params: &mut params,
            projection_dimension: Dimension::D1,
            effect_dimension: Dimension::D1,
        };
        MirrorProjection
            .declare_controls(&mut ctx, &mut registrar)
            .unwrap();
        assert_eq!(registrar.len(), 1);
        assert!(registrar.find("mirror_x").is_some());
        assert!(registrar.find("mirror_y").is_none());

        let mut registrar = ControlSet::<8>::new();
        let mut ctx = ConfigContext {
            params: &mut params,
            projection_dimension: Dimension::D3,
            effect_dimension: Dimension::D3,
        };
        MirrorProjection
            .declare_controls(&mut ctx, &mut registrar)
            .unwrap();
        assert_eq!(registrar.len(), 3);
        assert!(registrar.find("mirror_z").is_some());
    }

    #[test]
    fn test_reverse_flips_axes() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(true).unwrap();
        params.declare(true).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(10, 6, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(3, 1, 0);
        let mut mid = fix_size / 2;
        ReverseProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(6, 4, 0));
        assert_eq!(size, fix_size);
    }

    #[test]
    fn test_reverse_controls_gated_by_effect_dimension() {
        let mut params = SegmentParams::new();
        let mut registrar = ControlSet::<8>::new();
        let mut ctx = ConfigContext {
            params: &mut params,
            projection_dimension: Dimension::D3,
            effect_dimension: Dimension::D2,
        };
        ReverseProjection
            .declare_controls(&mut ctx, &mut registrar)
            .unwrap();
        assert_eq!(registrar.len(), 2);
        assert!(registrar.find("reverse_z").is_none());
    }

    #[test]
    fn test_transpose_swaps_xy() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(true).unwrap();
        params.declare(false).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(8, 4, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(5, 2, 0);
        let mut mid = fix_size / 2;
        TransposeProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(2, 5, 0));
    }

    #[test]
    fn test_transpose_xz_needs_3d_effect() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(false).unwrap();
        params.declare(true).unwrap(); // stray xz request
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(8, 4, 2);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D3, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(5, 2, 1);
        let mut mid = fix_size / 2;
        TransposeProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(5, 2, 1));
    }

    #[test]
    fn test_grouping_clusters_pixels() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::new(2, 2, 1)).unwrap();

        let fix_size = Coord3D::new(10, 10, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(5, 7, 0);
        let mut mid = fix_size / 2;
        GroupingProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(2, 3, 0));
        assert_eq!(size, Coord3D::new(5, 5, 1));
    }

    #[test]
    fn test_grouping_identity() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::ONE).unwrap();

        let fix_size = Coord3D::new(10, 10, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(5, 7, 0);
        let mut mid = fix_size / 2;
        GroupingProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(5, 7, 0));
        assert_eq!(size, fix_size);
        assert_eq!(mid, fix_size / 2);
    }

    #[test]
    fn test_grouping_zero_factor_clamped() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::ZERO).unwrap();

        let fix_size = Coord3D::new(10, 10, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(5, 7, 0);
        let mut mid = fix_size / 2;
        // A zero divisor behaves like the identity, never a fault.
        GroupingProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(pixel, Coord3D::new(5, 7, 0));
        assert_eq!(size, fix_size);
    }

    #[test]
    fn test_multiply_identity() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::ONE).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(12, 12, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(11, 3, 0);
        let mut mid = fix_size / 2;
        MultiplyProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(size, fix_size);
        assert_eq!(pixel, Coord3D::new(11, 3, 0));
        assert_eq!(mid, fix_size / 2);
    }

    #[test]
    fn test_multiply_wraps_tiles() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::new(2, 2, 1)).unwrap();
        params.declare(false).unwrap();

        let fix_size = Coord3D::new(12, 12, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D2, Dimension::D2);
        let mut size = fix_size;
        let mut pixel = Coord3D::new(7, 11, 0);
        let mut mid = fix_size / 2;
        MultiplyProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(size, Coord3D::new(6, 6, 1));
        assert_eq!(mid, Coord3D::new(3, 3, 0));
        assert_eq!(pixel, Coord3D::new(1, 5, 0));
    }

    #[test]
    fn test_multiply_mirrored_tiles_alternate() {
        let mut params = SegmentParams::new();
        params.reset();
        params.declare(Coord3D::new(2, 1, 1)).unwrap();
        params.declare(true).unwrap();

        let fix_size = Coord3D::new(12, 1, 1);
        let mut ctx = map_ctx(&mut params, fix_size, Dimension::D1, Dimension::D1);
        let mut size = fix_size;
        // Pixel 7 sits in the second (odd) tile of width 6 and reflects.
        let mut pixel = Coord3D::new(7, 0, 0);
        let mut mid = fix_size / 2;
        MultiplyProjection.adjust_size_and_pixel(&mut ctx, &mut size, &mut pixel, &mut mid);

        assert_eq!(size.x, 6);
        assert_eq!(pixel.x, 4);
    }
}
