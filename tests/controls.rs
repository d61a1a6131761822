mod tests {
    use light_projector::projection::{MultiplyProjection, TiltPanRollProjection};
    use light_projector::{
        ConfigContext, ControlKind, ControlSet, ControlTarget, Dimension, Projection,
        SegmentParams,
    };

    #[test]
    fn test_motion_controls_do_not_trigger_mapping() {
        let mut params = SegmentParams::new();
        let mut registrar = ControlSet::<8>::new();
        let mut ctx = ConfigContext {
            params: &mut params,
            projection_dimension: Dimension::D2,
            effect_dimension: Dimension::D2,
        };
        TiltPanRollProjection
            .declare_controls(&mut ctx, &mut registrar)
            .unwrap();

        assert_eq!(registrar.len(), 3);
        for control in registrar.iter() {
            assert_eq!(control.kind, ControlKind::Slider);
            assert!(!control.triggers_mapping);
            assert!(matches!(
                control.target,
                ControlTarget::TiltSpeed | ControlTarget::PanSpeed | ControlTarget::RollSpeed
            ));
        }
        assert_eq!(
            registrar.find("roll").unwrap().label,
            Some("Roll speed")
        );
    }

    #[test]
    fn test_param_controls_trigger_mapping() {
        let mut params = SegmentParams::new();
        let mut registrar = ControlSet::<8>::new();
        let mut ctx = ConfigContext {
            params: &mut params,
            projection_dimension: Dimension::D2,
            effect_dimension: Dimension::D2,
        };
        MultiplyProjection
            .declare_controls(&mut ctx, &mut registrar)
            .unwrap();

        let multiply = registrar.find("multiply").unwrap();
        assert_eq!(multiply.kind, ControlKind::Coord);
        assert!(multiply.triggers_mapping);
        assert!(matches!(multiply.target, ControlTarget::Param(_)));

        let mirror = registrar.find("mirror").unwrap();
        assert_eq!(mirror.kind, ControlKind::Checkbox);
        assert_eq!((mirror.min, mirror.max), (0, 1));
    }
}
