mod accumulative;
mod baked;
mod common;
mod contact;
mod staged;

pub use accumulative::create_accumulative_scene;
pub use baked::create_baked_scene;
pub use contact::create_contact_scene;
pub use staged::create_staged_scene;

use crate::composer::Composer;
use crate::error::{SceneError, SceneResult};
use crate::params::ParamSet;

pub const SCENE_NAMES: [&str; 4] = ["baked", "accumulative", "contact", "staged"];
pub const DEFAULT_SCENE: &str = "accumulative";

/// A fully assembled version: validated graph with its rig, the animation
/// driver, and the tunables its control panel exposes.
#[derive(Debug)]
pub struct SceneVersion {
    pub name: &'static str,
    pub composer: Composer,
    pub params: ParamSet,
}

/// Looks up a version constructor by name.
pub fn create_scene(name: &str) -> SceneResult<SceneVersion> {
    match name {
        "baked" => create_baked_scene(),
        "accumulative" => create_accumulative_scene(),
        "contact" => create_contact_scene(),
        "staged" => create_staged_scene(),
        other => Err(SceneError::UnknownScene(other.to_string())),
    }
}
