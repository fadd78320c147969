use crate::composer::Composer;
use crate::error::SceneResult;
use crate::params::{keys, ParamSet, ParamSpec};
use crate::rig::{LightRig, StagedRig};

use super::common::build_stage;
use super::SceneVersion;

/// Environment-map lighting with a sunset preset projected onto a virtual
/// ground. Every material picks up the shared intensity multiplier.
pub fn create_staged_scene() -> SceneResult<SceneVersion> {
    let stage = build_stage();
    let mut graph = stage.graph;

    graph.attach_rig(LightRig::Staged(StagedRig::default()))?;

    let params =
        ParamSet::new().with(ParamSpec::float(keys::ENV_INTENSITY, 1.0, 0.0, 10.0));

    Ok(SceneVersion {
        name: "staged",
        composer: Composer::new(graph, stage.cube, true)?,
        params,
    })
}
