#[cfg(test)]
mod tests {
    use standoff_core::enums::{ActionKind, AttackForm, AttackSlot, StandAction};
    use standoff_core::error::ConfigError;
    use standoff_core::types::{FrameRange, Vec2};

    use crate::catalog::{parse_definition, ArchetypeCatalog};
    use crate::definition::ArchetypeDef;
    use crate::profiles::{builtin_catalog, BUILTIN_SOURCES, DIO, JOTARO};

    fn jotaro_def() -> ArchetypeDef {
        let (name, text) = BUILTIN_SOURCES[0];
        parse_definition(name, text).unwrap()
    }

    #[test]
    fn test_builtin_roster_loads() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![DIO, JOTARO]);
        assert!(catalog.contains(JOTARO));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_unknown_archetype_lookup() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(
            catalog.get("kakyoin").unwrap_err(),
            ConfigError::UnknownArchetype("kakyoin".into())
        );
    }

    #[test]
    fn test_jotaro_compiles_to_enum_tables() {
        let catalog = builtin_catalog().unwrap();
        let jotaro = catalog.get(JOTARO).unwrap();

        let attack1 = jotaro.clip(ActionKind::Attack1).unwrap();
        assert_eq!(attack1.frames, FrameRange::new(452, 457));
        assert_eq!(attack1.speed, 3);
        assert_eq!(attack1.duration_ticks(), 18);
        assert!(!jotaro.has_action(ActionKind::Hit), "hit reaction is optional");

        let spec = jotaro.attack(AttackForm::Owner, AttackSlot::One);
        assert_eq!(spec.damage, 15);
        assert_eq!(spec.active, FrameRange::new(453, 454));
        assert_eq!(jotaro.crouch_freeze_frame, 31);
        assert_eq!(jotaro.jump_loop, Some(FrameRange::new(94, 95)));
        assert_eq!(jotaro.stand.offset, Vec2::new(-40.0, 0.0));
        assert!(jotaro.stand.clip(StandAction::Block).is_some());
    }

    #[test]
    fn test_dio_defines_hit_reaction() {
        let catalog = builtin_catalog().unwrap();
        let dio = catalog.get(DIO).unwrap();
        assert!(dio.has_action(ActionKind::Hit));
        assert_eq!(
            dio.attack(AttackForm::Stand, AttackSlot::Three).damage,
            30
        );
    }

    #[test]
    fn test_unknown_action_name_rejected() {
        let mut def = jotaro_def();
        def.actions.insert("moonwalk".into(), ((0, 3), 2));
        assert_eq!(
            def.compile().unwrap_err(),
            ConfigError::UnknownAction {
                archetype: "jotaro".into(),
                name: "moonwalk".into()
            }
        );
    }

    #[test]
    fn test_unknown_attack_key_rejected() {
        let mut def = jotaro_def();
        let extra = def.attacks["attack1"].clone();
        def.attacks.insert("attack4".into(), extra);
        assert!(matches!(
            def.compile(),
            Err(ConfigError::UnknownAction { ref name, .. }) if name == "attack4"
        ));
    }

    #[test]
    fn test_missing_required_action_rejected() {
        let mut def = jotaro_def();
        def.actions.remove("crouch");
        assert_eq!(
            def.compile().unwrap_err(),
            ConfigError::MissingAction {
                archetype: "jotaro".into(),
                action: "crouch"
            }
        );

        let mut def = jotaro_def();
        def.stand.actions.remove("summon");
        assert!(matches!(
            def.compile(),
            Err(ConfigError::MissingAction { action: "summon", .. })
        ));
    }

    #[test]
    fn test_missing_stand_attack_rejected() {
        let mut def = jotaro_def();
        def.attacks.remove("stand_attack2");
        assert_eq!(
            def.compile().unwrap_err(),
            ConfigError::MissingAttack {
                archetype: "jotaro".into(),
                form: "stand",
                slot: AttackSlot::Two
            }
        );
    }

    #[test]
    fn test_bad_frame_ranges_rejected() {
        let mut def = jotaro_def();
        def.actions.insert("idle".into(), ((23, 0), 8));
        assert!(matches!(
            def.compile(),
            Err(ConfigError::InvalidFrameRange { start: 23, end: 0, .. })
        ));

        // Active window has to sit inside the attack clip.
        let mut def = jotaro_def();
        if let Some(attack) = def.attacks.get_mut("attack1") {
            attack.active_frames = (450, 454);
        }
        assert!(matches!(
            def.compile(),
            Err(ConfigError::InvalidFrameRange { ref what, .. }) if what == "attack1.active_frames"
        ));

        let mut def = jotaro_def();
        def.jump_loop = Some((10, 12));
        assert!(matches!(
            def.compile(),
            Err(ConfigError::InvalidFrameRange { ref what, .. }) if what == "jump_loop"
        ));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let mut def = jotaro_def();
        def.actions.insert("idle".into(), ((0, 23), 0));
        assert_eq!(
            def.compile().unwrap_err(),
            ConfigError::ZeroSpeed {
                archetype: "jotaro".into(),
                action: "idle".into()
            }
        );
    }

    #[test]
    fn test_crouch_freeze_frame_falls_back_to_midpoint() {
        let mut def = jotaro_def();
        def.crouch_freeze_frame = Some(500);
        assert_eq!(def.compile().unwrap().crouch_freeze_frame, 31);

        def.crouch_freeze_frame = None;
        assert_eq!(def.compile().unwrap().crouch_freeze_frame, 31);
    }

    #[test]
    fn test_invalid_meter_rejected() {
        let mut def = jotaro_def();
        def.meter.summon_cost = 150.0;
        assert!(matches!(
            def.compile(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_archetype_rejected() {
        let mut catalog = builtin_catalog().unwrap();
        let (name, text) = BUILTIN_SOURCES[1];
        assert_eq!(
            catalog.load_str(name, text).unwrap_err(),
            ConfigError::DuplicateArchetype("dio".into())
        );
    }

    #[test]
    fn test_parse_error_names_source() {
        let mut catalog = ArchetypeCatalog::new();
        let err = catalog.load_str("broken.ron", "ArchetypeDef(id: ").unwrap_err();
        assert!(
            matches!(err, ConfigError::Parse { ref source_name, .. } if source_name == "broken.ron"),
            "got {err:?}"
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_optional_fields_accept_implicit_some() {
        let (_, text) = BUILTIN_SOURCES[0];
        let text = text.replace("jump_loop: Some((94, 95))", "jump_loop: (94, 95)");
        let def = parse_definition("inline.ron", &text).unwrap();
        assert_eq!(def.jump_loop, Some((94, 95)));
    }
}
