use glam::Vec3;

use crate::composer::Composer;
use crate::error::SceneResult;
use crate::params::{keys, ParamSet, ParamSpec};
use crate::rig::{DirectionalRig, LightRig, ShadowUpdateMode, SoftShadowFilter};

use super::common::build_stage;
use super::SceneVersion;

/// Directional shadow map rendered once and reused, softened by a
/// percentage-closer filter. The cube keeps rotating; the frozen shadow is
/// the trade this version makes for a free shadow pass.
pub fn create_baked_scene() -> SceneResult<SceneVersion> {
    let stage = build_stage();
    let mut graph = stage.graph;

    graph.attach_rig(LightRig::DirectionalMap(DirectionalRig {
        update: ShadowUpdateMode::Baked,
        soft: Some(SoftShadowFilter::default()),
        ..DirectionalRig::default()
    }))?;

    let params = ParamSet::new().with(ParamSpec::vec3(
        keys::SUN_POSITION,
        Vec3::new(1.0, 2.0, 3.0),
        -10.0,
        10.0,
    ));

    Ok(SceneVersion {
        name: "baked",
        composer: Composer::new(graph, stage.cube, false)?,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MapSize;

    #[test]
    fn baked_scene_uses_a_frozen_directional_map() {
        let scene = create_baked_scene().unwrap();
        let Some(LightRig::DirectionalMap(rig)) = scene.composer.graph().rig() else {
            panic!("expected the directional-map rig");
        };
        assert_eq!(rig.update, ShadowUpdateMode::Baked);
        assert_eq!(rig.map_size, MapSize::square(1024));
        assert_eq!(rig.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(rig.intensity, 4.5);
        assert!(rig.soft.is_some());
    }
}
