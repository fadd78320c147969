use shadowbox::composer::{FrameSnapshot, ANGULAR_SPEED, BASE_OFFSET};
use shadowbox::rig::LightRig;
use shadowbox::scenes::create_scene;
use shadowbox::types::MeshInstance;

const DT: f32 = 1.0 / 60.0;

fn cube_of(snapshot: &FrameSnapshot) -> &MeshInstance {
    snapshot
        .meshes
        .iter()
        .find(|m| m.shape == MeshInstance::SHAPE_BOX)
        .expect("every version stages exactly one cube")
}

#[cfg(test)]
mod rotation_tests {
    use super::*;

    #[test]
    fn test_one_second_of_ticks_accumulates_the_fixed_rate() {
        let mut scene = create_scene("accumulative").unwrap();

        let mut elapsed = 0.0;
        for _ in 0..60 {
            scene.composer.tick(elapsed, DT).unwrap();
            elapsed += DT;
        }

        let yaw = scene.composer.yaw();
        assert!(
            (yaw - ANGULAR_SPEED).abs() < 1e-3,
            "One second should accumulate ~{} rad of yaw, got {}",
            ANGULAR_SPEED,
            yaw
        );
    }

    #[test]
    fn test_subdivided_ticks_land_on_the_same_yaw() {
        let mut coarse = create_scene("baked").unwrap();
        let mut fine = create_scene("baked").unwrap();

        coarse.composer.tick(0.5, 0.5).unwrap();

        let step = 0.5 / 30.0;
        let mut elapsed = 0.0;
        for _ in 0..30 {
            fine.composer.tick(elapsed, step).unwrap();
            elapsed += step;
        }

        assert!(
            (coarse.composer.yaw() - fine.composer.yaw()).abs() < 1e-4,
            "30 small ticks should compose to one large tick"
        );
    }

    #[test]
    fn test_yaw_reaches_the_snapshot_quaternion() {
        let mut scene = create_scene("accumulative").unwrap();
        scene.composer.tick(0.0, 1.0).unwrap();

        let snapshot = scene.composer.apply(&scene.params).unwrap();
        let cube = cube_of(&snapshot);

        let half = scene.composer.yaw() / 2.0;
        assert!((cube.rotation[1] - half.sin()).abs() < 1e-6);
        assert!((cube.rotation[3] - half.cos()).abs() < 1e-6);
        assert_eq!(cube.rotation[0], 0.0, "Rotation should stay about Y");
        assert_eq!(cube.rotation[2], 0.0, "Rotation should stay about Y");
    }
}

#[cfg(test)]
mod position_tests {
    use super::*;

    #[test]
    fn test_baked_version_holds_the_authored_offset() {
        let mut scene = create_scene("baked").unwrap();

        let mut elapsed = 0.0;
        for _ in 0..120 {
            scene.composer.tick(elapsed, DT).unwrap();
            elapsed += DT;
        }

        let snapshot = scene.composer.apply(&scene.params).unwrap();
        assert_eq!(
            cube_of(&snapshot).position[0],
            BASE_OFFSET,
            "The baked version rotates in place, it never slides"
        );
    }

    #[test]
    fn test_staged_cube_bobs_with_elapsed_time() {
        let mut scene = create_scene("staged").unwrap();

        scene
            .composer
            .tick(std::f32::consts::FRAC_PI_2, DT)
            .unwrap();
        let snapshot = scene.composer.apply(&scene.params).unwrap();
        let at_peak = cube_of(&snapshot).position[0];
        assert!(
            (at_peak - (BASE_OFFSET + 1.0)).abs() < 1e-5,
            "At elapsed pi/2 the cube should sit at x = {}, got {}",
            BASE_OFFSET + 1.0,
            at_peak
        );

        scene
            .composer
            .tick(3.0 * std::f32::consts::FRAC_PI_2, DT)
            .unwrap();
        let snapshot = scene.composer.apply(&scene.params).unwrap();
        let at_trough = cube_of(&snapshot).position[0];
        assert!(
            (at_trough - (BASE_OFFSET - 1.0)).abs() < 1e-5,
            "At elapsed 3pi/2 the cube should sit at x = {}, got {}",
            BASE_OFFSET - 1.0,
            at_trough
        );
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn test_snapshot_serializes_for_describe_output() {
        let scene = create_scene("accumulative").unwrap();
        let snapshot = scene.composer.apply(&scene.params).unwrap();

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        assert!(json.contains("\"background\""));
        assert!(json.contains("\"meshes\""));
        assert!(json.contains("\"accumulative\""), "Rig tag should name the technique");
    }

    #[test]
    fn test_reset_overrides_do_not_stick_across_applies() {
        let mut scene = create_scene("contact").unwrap();

        scene.params.set_float("blur", 7.0).unwrap();
        let snapshot = scene.composer.apply(&scene.params).unwrap();
        let LightRig::Contact(rig) = &snapshot.rig else {
            panic!("expected the contact rig");
        };
        assert_eq!(rig.blur, 7.0);

        scene.params.reset("blur");
        let snapshot = scene.composer.apply(&scene.params).unwrap();
        let LightRig::Contact(rig) = &snapshot.rig else {
            panic!("expected the contact rig");
        };
        assert_eq!(rig.blur, 2.0, "Reset should restore the authored blur");
    }
}
