use crate::composer::Composer;
use crate::error::SceneResult;
use crate::params::{keys, ParamSet, ParamSpec};
use crate::rig::{ContactRig, LightRig};
use crate::types::Color;

use super::common::build_stage;
use super::SceneVersion;

/// Planar contact shadows captured from below, no shadow camera to tune.
pub fn create_contact_scene() -> SceneResult<SceneVersion> {
    let stage = build_stage();
    let mut graph = stage.graph;

    graph.attach_rig(LightRig::Contact(ContactRig::default()))?;

    let params = ParamSet::new()
        .with(ParamSpec::color(keys::SHADOW_COLOR, Color::BLACK))
        .with(ParamSpec::float(keys::SHADOW_OPACITY, 0.7, 0.0, 1.0))
        .with(ParamSpec::float(keys::CONTACT_BLUR, 2.0, 0.0, 10.0));

    Ok(SceneVersion {
        name: "contact",
        composer: Composer::new(graph, stage.cube, false)?,
        params,
    })
}
