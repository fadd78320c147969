use shadowbox::error::SceneError;
use shadowbox::graph::SceneGraph;
use shadowbox::node::{Material, Primitive, SceneNode, Transform};
use shadowbox::rig::{ContactRig, DirectionalRig, LightRig};
use shadowbox::scenes::{create_scene, DEFAULT_SCENE, SCENE_NAMES};
use shadowbox::types::{Color, MeshInstance};

#[cfg(test)]
mod version_tests {
    use super::*;

    #[test]
    fn test_every_version_composes_a_full_stage() {
        for name in SCENE_NAMES {
            let scene = create_scene(name).unwrap();
            let snapshot = scene.composer.apply(&scene.params).unwrap();

            assert_eq!(snapshot.meshes.len(), 3, "'{}' should stage 3 meshes", name);
            assert_eq!(
                snapshot.shadow_casters().count(),
                2,
                "'{}' should have the sphere and cube casting",
                name
            );
            assert!(snapshot.overlay.is_some(), "'{}' should pin a perf overlay", name);
            assert!(snapshot.controls.is_some(), "'{}' should declare orbit controls", name);
            assert_eq!(snapshot.background, Color::IVORY);
            assert_eq!(snapshot.ambient, 1.5);
        }
    }

    #[test]
    fn test_rig_kind_follows_the_version() {
        let expected = [
            ("baked", "directional-map"),
            ("accumulative", "accumulative"),
            ("contact", "contact"),
            ("staged", "staged"),
        ];
        for (version, rig_name) in expected {
            let scene = create_scene(version).unwrap();
            let snapshot = scene.composer.apply(&scene.params).unwrap();
            assert_eq!(snapshot.rig.name(), rig_name);
        }
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        assert_eq!(
            create_scene("volumetric").unwrap_err(),
            SceneError::UnknownScene("volumetric".to_string())
        );
    }

    #[test]
    fn test_default_version_is_listed_and_buildable() {
        assert!(SCENE_NAMES.contains(&DEFAULT_SCENE));
        assert!(create_scene(DEFAULT_SCENE).is_ok());
    }
}

#[cfg(test)]
mod invariant_tests {
    use super::*;

    #[test]
    fn test_ground_sits_below_every_caster() {
        for name in SCENE_NAMES {
            let scene = create_scene(name).unwrap();
            let snapshot = scene.composer.apply(&scene.params).unwrap();

            let floor = snapshot
                .meshes
                .iter()
                .find(|m| m.shape == MeshInstance::SHAPE_PLANE)
                .expect("every version stages a floor plane");
            for caster in snapshot.shadow_casters() {
                assert!(
                    floor.position[1] < caster.position[1],
                    "'{}' floor at y={} should sit below caster at y={}",
                    name,
                    floor.position[1],
                    caster.position[1]
                );
            }
        }
    }

    #[test]
    fn test_catcher_hangs_just_above_the_ground() {
        for name in ["accumulative", "contact"] {
            let scene = create_scene(name).unwrap();
            let snapshot = scene.composer.apply(&scene.params).unwrap();

            let floor_y = snapshot
                .meshes
                .iter()
                .find(|m| m.shape == MeshInstance::SHAPE_PLANE)
                .map(|m| m.position[1])
                .unwrap();
            let catcher = snapshot
                .rig
                .catcher_offset()
                .expect("these rigs carry their own catcher plane");
            assert!(
                catcher > floor_y,
                "'{}' catcher at y={} must clear the floor at y={}",
                name,
                catcher,
                floor_y
            );
        }
    }

    #[test]
    fn test_only_one_rig_may_attach() {
        let mut graph = SceneGraph::new();
        graph
            .attach_rig(LightRig::DirectionalMap(DirectionalRig::default()))
            .unwrap();

        let err = graph
            .attach_rig(LightRig::Contact(ContactRig::default()))
            .unwrap_err();
        assert_eq!(
            err,
            SceneError::RigAlreadyActive {
                active: "directional-map",
                rejected: "contact",
            }
        );
    }
}

#[cfg(test)]
mod budget_tests {
    use super::*;

    #[test]
    fn test_shadow_budget_is_independent_of_scene_content() {
        let mut scene = create_scene("baked").unwrap();
        let before = scene.composer.graph().rig().unwrap().map_size().unwrap();
        assert_eq!(before.texels(), 1024 * 1024);

        // Doubling the casters must not grow the map
        scene.composer.graph_mut().add(
            SceneNode::mesh(
                "extra",
                Primitive::Sphere { radius: 0.5 },
                Material::colored(Color::ORANGE),
            )
            .with_transform(Transform::at(0.0, 1.0, -2.0))
            .casting_shadow(),
        );

        let after = scene.composer.graph().rig().unwrap().map_size().unwrap();
        assert_eq!(
            after.texels(),
            before.texels(),
            "Map budget is fixed per rig, not per mesh"
        );

        let snapshot = scene.composer.apply(&scene.params).unwrap();
        assert_eq!(snapshot.shadow_casters().count(), 3);
        assert_eq!(snapshot.rig.map_size().unwrap(), before);
    }

    #[test]
    fn test_staged_version_allocates_no_shadow_map() {
        let scene = create_scene("staged").unwrap();
        let snapshot = scene.composer.apply(&scene.params).unwrap();
        assert!(
            snapshot.rig.map_size().is_none(),
            "The staged rig lights from the environment, no map"
        );
    }
}
