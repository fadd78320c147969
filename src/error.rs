use thiserror::Error;

use crate::graph::NodeId;

/// Error type for scene assembly and validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A second light rig was attached while one is already active.
    #[error("light rig '{active}' is already active, cannot attach '{rejected}'")]
    RigAlreadyActive {
        active: &'static str,
        rejected: &'static str,
    },

    /// Scene was composed without any light rig.
    #[error("scene has no light rig")]
    MissingRig,

    /// Ground plane sits at or above a shadow caster, which z-fights.
    #[error("ground plane at y={ground} must sit strictly below caster '{label}' at y={caster}")]
    GroundNotBelowCaster {
        ground: f32,
        caster: f32,
        label: String,
    },

    /// Rig shadow catcher is coplanar with (or below) the ground plane.
    #[error("shadow catcher at y={catcher} must sit strictly above the ground plane at y={ground}")]
    CatcherCoplanar { catcher: f32, ground: f32 },

    /// Shadow map resolution with a zero dimension.
    #[error("shadow map size must be non-zero, got {width}x{height}")]
    InvalidMapSize { width: u32, height: u32 },

    /// A bounded accumulation budget of zero frames renders nothing.
    #[error("accumulation budget must be at least one frame")]
    EmptyFrameBudget,

    /// A rig field is outside its meaningful range.
    #[error("{field} out of range: {value}")]
    RigFieldOutOfRange { field: &'static str, value: f32 },

    /// Node id does not resolve in this graph.
    #[error("unknown node id {0:?}")]
    UnknownNode(NodeId),

    /// Animated handle must reference a mesh node.
    #[error("animated handle {0:?} does not point at a mesh node")]
    AnimatedHandleNotMesh(NodeId),

    /// Parameter name was never declared for this scene.
    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    #[error("unknown scene '{0}', expected baked, accumulative, contact or staged")]
    UnknownScene(String),

    /// Parameter value has a different kind than its declaration.
    #[error("parameter '{name}' expects a {expected} value")]
    ParamKindMismatch {
        name: String,
        expected: &'static str,
    },
}

/// Result alias for scene assembly and validation.
pub type SceneResult<T> = std::result::Result<T, SceneError>;
