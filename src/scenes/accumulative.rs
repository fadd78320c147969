use glam::Vec3;

use crate::composer::Composer;
use crate::error::SceneResult;
use crate::params::{keys, ParamSet, ParamSpec};
use crate::rig::{AccumulativeRig, LightRig};
use crate::types::Color;

use super::common::build_stage;
use super::SceneVersion;

/// Accumulated soft shadows on a catcher plane just above the ground,
/// converging over the running loop. The cube bobs along x as well as
/// rotating, which is exactly what the temporal budget is for.
pub fn create_accumulative_scene() -> SceneResult<SceneVersion> {
    let stage = build_stage();
    let mut graph = stage.graph;

    graph.attach_rig(LightRig::Accumulative(AccumulativeRig::default()))?;

    let params = ParamSet::new()
        .with(ParamSpec::color(keys::SHADOW_COLOR, Color::SHADOW_MOSS))
        .with(ParamSpec::float(keys::SHADOW_OPACITY, 0.8, 0.0, 1.0))
        .with(ParamSpec::vec3(
            keys::SUN_POSITION,
            Vec3::new(1.0, 2.0, 3.0),
            -10.0,
            10.0,
        ));

    Ok(SceneVersion {
        name: "accumulative",
        composer: Composer::new(graph, stage.cube, true)?,
        params,
    })
}
