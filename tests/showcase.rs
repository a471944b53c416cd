use vista::*;

const DT: f32 = 1.0 / 60.0;

fn seeded(picking: bool) -> ShowcaseConfig {
    ShowcaseConfig {
        seed: Some(42),
        picking,
        ..Default::default()
    }
}

/// Window pixel for normalized pointer axes.
fn pixel(viewport: Vec2, axes: Vec2) -> Vec2 {
    Vec2::new(
        (axes.x + 1.0) * 0.5 * viewport.x,
        (1.0 - axes.y) * 0.5 * viewport.y,
    )
}

#[test]
fn held_pointer_settles_look_offset() {
    let viewport = Vec2::new(1280.0, 720.0);
    let hub = PointerHub::new();
    hub.set_viewport(viewport);

    let mut showcase = Showcase::new(seeded(false), &hub).unwrap();
    hub.pointer_moved(pixel(viewport, Vec2::new(0.6, 0.0)));

    for _ in 0..180 {
        showcase.tick(DT);
    }

    let offset = showcase.rig().look_offset().unwrap();
    let expected = 2.0 * (0.6 - 0.15) / (1.0 - 0.15);
    assert!(
        (offset.x - expected).abs() / expected < 0.01,
        "{} vs {}",
        offset.x,
        expected
    );
    assert!(offset.y.abs() < 1e-6);
}

#[test]
fn pointer_inside_dead_zone_leaves_camera_still() {
    let viewport = Vec2::new(800.0, 600.0);
    let hub = PointerHub::new();
    hub.set_viewport(viewport);

    let mut showcase = Showcase::new(seeded(false), &hub).unwrap();
    let start = *showcase.camera();
    hub.pointer_moved(pixel(viewport, Vec2::new(0.1, -0.12)));

    for _ in 0..60 {
        showcase.tick(DT);
    }

    assert_eq!(showcase.rig().look_offset(), Some(Vec2::ZERO));
    assert!((showcase.camera().forward - start.forward).length() < 1e-6);
    assert_eq!(showcase.camera().position, start.position);
}

#[test]
fn resize_renormalizes_pointer() {
    let hub = PointerHub::new();
    hub.set_viewport(Vec2::new(800.0, 600.0));

    let mut showcase = Showcase::new(seeded(false), &hub).unwrap();
    hub.pointer_moved(Vec2::new(400.0, 300.0));
    showcase.tick(DT);
    assert_eq!(showcase.rig().look_offset(), Some(Vec2::ZERO));

    // Same pixel is now near the right edge.
    hub.set_viewport(Vec2::new(420.0, 600.0));
    for _ in 0..30 {
        showcase.tick(DT);
    }
    assert!(showcase.rig().look_offset().unwrap().x > 0.5);
}

#[test]
fn hover_cycle_through_showcase() {
    let hub = PointerHub::new();
    let mut showcase = Showcase::new(seeded(false), &hub).unwrap();
    let wyvern = showcase.hero("wyvern").unwrap();
    let part_y = |showcase: &Showcase| {
        showcase
            .world()
            .get::<&DisplaceablePart>(wyvern)
            .unwrap()
            .local
            .position
            .y
    };

    showcase.tick(DT);
    let base = part_y(&showcase);
    assert_eq!(base, HEROES[0].part_offset.y);
    assert!(showcase.hover_enter(wyvern));
    showcase.tick(0.3);
    let partial = part_y(&showcase);
    assert!(partial > base && partial < base + 0.05);

    // Leaving early falls from wherever the rise got to.
    showcase.hover_leave(wyvern);
    showcase.hover_leave(wyvern);
    let mut last = partial;
    for _ in 0..90 {
        showcase.tick(DT);
        let y = part_y(&showcase);
        assert!(y <= last + 1e-7);
        last = y;
    }
    assert!((last - base).abs() < 1e-6);
}

#[test]
fn particles_stay_in_their_box() {
    let hub = PointerHub::new();
    let mut showcase = Showcase::new(seeded(false), &hub).unwrap();
    assert_eq!(showcase.particles().len(), 240);
    assert!(showcase.particles_mut().take_dirty());

    for _ in 0..600 {
        showcase.tick(DT);
    }

    let field = showcase.particles();
    assert!(field.positions().iter().all(|p| field.bounds().contains(*p)));
    let center = field.bounds().center;
    let expected = showcase.focal_centroid() + Vec3::Y * 4.0;
    assert!((center - expected).length() < 1e-5);
    assert!(showcase.particles_mut().take_dirty());
}

#[test]
fn seed_makes_particles_reproducible() {
    let hub = PointerHub::new();
    let a = Showcase::new(seeded(false), &hub).unwrap();
    let b = Showcase::new(seeded(false), &hub).unwrap();
    assert_eq!(a.particles().positions(), b.particles().positions());
    assert_eq!(hub.listener_count(), 2);

    drop(a);
    assert_eq!(hub.listener_count(), 1);
}

#[test]
fn json_config_drives_the_scene() {
    let config = ShowcaseConfig::from_json_str(
        r#"{
            "rig": { "damping": 6.0, "position_amplitude": [1.5, 0.0] },
            "lift": { "height": 0.2, "rise_ease": "sine.inOut" },
            "drift": { "count": 16 },
            "seed": 3,
            "picking": false
        }"#,
    )
    .unwrap();
    assert_eq!(config.lift.rise_ease, Easing::SineInOut);
    assert_eq!(config.lift.fall_ease, Easing::PowerOut(3));

    let viewport = Vec2::new(800.0, 600.0);
    let hub = PointerHub::new();
    hub.set_viewport(viewport);
    let mut showcase = Showcase::new(config, &hub).unwrap();
    assert_eq!(showcase.particles().len(), 16);

    let base_x = showcase.camera().position.x;
    let base_y = showcase.camera().position.y;
    hub.pointer_moved(pixel(viewport, Vec2::new(1.0, 0.0)));
    for _ in 0..120 {
        showcase.tick(DT);
    }
    assert!((showcase.camera().position.x - (base_x + 1.5)).abs() < 0.01);
    assert_eq!(showcase.camera().position.y, base_y);
}

#[test]
fn bad_json_is_reported() {
    assert!(matches!(
        ShowcaseConfig::from_json_str(r#"{ "lift": { "rise_ease": "bounce.out" } }"#),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ShowcaseConfig::from_json_str(r#"{ "rig": { "dead_zone": 1.0 } }"#),
        Err(ConfigError::DeadZoneOutOfRange(_))
    ));
}

#[test]
fn dispose_releases_pointer_and_freezes_scene() {
    let hub = PointerHub::new();
    let mut showcase = Showcase::new(seeded(true), &hub).unwrap();
    assert_eq!(hub.listener_count(), 1);

    showcase.dispose();
    showcase.dispose();
    assert_eq!(hub.listener_count(), 0);

    let camera = *showcase.camera();
    hub.pointer_moved(Vec2::new(10.0, 10.0));
    showcase.tick(DT);
    assert_eq!(*showcase.camera(), camera);
}
