use std::f32::consts::FRAC_PI_2;

use crate::graph::{NodeId, SceneGraph};
use crate::node::{
    AttachPoint, ControlsDecl, Material, NodeKind, OverlayDecl, Primitive, SceneNode, Transform,
};
use crate::types::Color;

pub const GROUND_OFFSET: f32 = -1.0;
pub const SPHERE_OFFSET_X: f32 = -2.0;
pub const CUBE_OFFSET_X: f32 = 2.0;
pub const CUBE_SCALE: f32 = 1.5;
pub const PLANE_SCALE: f32 = 10.0;
pub const AMBIENT_INTENSITY: f32 = 1.5;

/// The stage every version shares, plus the handle of the mesh the
/// composer will animate.
pub struct Stage {
    pub graph: SceneGraph,
    pub cube: NodeId,
}

/// Builds the common arrangement: ivory background on the root, ambient
/// fill, a shadow-casting sphere and cube, the ground plane, orbit controls
/// and the perf overlay. The rig is the one piece each version adds itself.
pub fn build_stage() -> Stage {
    let mut graph = SceneGraph::new();

    graph.add(
        SceneNode::new("background", NodeKind::Background { color: Color::IVORY })
            .attached_to(AttachPoint::Root),
    );
    graph.add(SceneNode::new(
        "ambient",
        NodeKind::AmbientLight {
            intensity: AMBIENT_INTENSITY,
        },
    ));

    graph.add(
        SceneNode::mesh(
            "sphere",
            Primitive::Sphere { radius: 1.0 },
            Material::colored(Color::ORANGE),
        )
        .with_transform(Transform::at(SPHERE_OFFSET_X, 0.0, 0.0))
        .casting_shadow(),
    );

    let cube = graph.add(
        SceneNode::mesh(
            "cube",
            Primitive::Cube,
            Material::colored(Color::MEDIUM_PURPLE),
        )
        .with_transform(Transform::at(CUBE_OFFSET_X, 0.0, 0.0).with_scale(CUBE_SCALE))
        .casting_shadow(),
    );

    graph.add(
        SceneNode::mesh(
            "floor",
            Primitive::Plane,
            Material::colored(Color::GREEN_YELLOW),
        )
        .with_transform(
            Transform::at(0.0, GROUND_OFFSET, 0.0)
                .with_rotation_x(-FRAC_PI_2)
                .with_scale(PLANE_SCALE),
        )
        .receiving_shadow(),
    );

    graph.add(SceneNode::new(
        "controls",
        NodeKind::Controls(ControlsDecl::default()),
    ));
    graph.add(SceneNode::new(
        "perf",
        NodeKind::Overlay(OverlayDecl::default()),
    ));

    Stage { graph, cube }
}
