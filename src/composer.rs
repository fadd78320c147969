use glam::Quat;

use crate::error::{SceneError, SceneResult};
use crate::graph::{NodeId, SceneGraph};
use crate::node::{ControlsDecl, NodeKind, Primitive};
use crate::params::{keys, ParamSet};
use crate::rig::LightRig;
use crate::types::{Color, Corner, MeshInstance};

/// Yaw accumulated per second of delta time.
pub const ANGULAR_SPEED: f32 = 0.2;
/// Resting x offset of the position-animated mesh.
pub const BASE_OFFSET: f32 = 2.0;

/// Drives the animated mesh and turns the graph plus the current parameter
/// overrides into per-frame snapshots.
///
/// Rotation is integrated in a plain yaw angle rather than by composing
/// quaternions, so a single tick advances by exactly `delta * ANGULAR_SPEED`.
#[derive(Debug)]
pub struct Composer {
    graph: SceneGraph,
    animated: NodeId,
    animate_position: bool,
    yaw: f32,
}

impl Composer {
    /// Validates the graph and the animated handle, then wraps them. Every
    /// scene designates exactly one animated mesh.
    pub fn new(
        graph: SceneGraph,
        animated: NodeId,
        animate_position: bool,
    ) -> SceneResult<Self> {
        graph.validate()?;
        let node = graph.node(animated)?;
        if !node.kind.is_mesh() {
            return Err(SceneError::AnimatedHandleNotMesh(animated));
        }
        let yaw = node.transform.yaw();
        Ok(Self {
            graph,
            animated,
            animate_position,
            yaw,
        })
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    pub fn animated(&self) -> NodeId {
        self.animated
    }

    /// Accumulated yaw of the animated mesh.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Per-frame animation step.
    ///
    /// Yaw advances by `delta * ANGULAR_SPEED` regardless of elapsed time;
    /// when position animation is on, the mesh bobs along x following
    /// `BASE_OFFSET + sin(elapsed)`.
    pub fn tick(&mut self, elapsed: f32, delta: f32) -> SceneResult<()> {
        self.yaw += delta * ANGULAR_SPEED;
        let animate_position = self.animate_position;
        let yaw = self.yaw;
        let node = self.graph.node_mut(self.animated)?;
        node.transform.rotation = Quat::from_rotation_y(yaw);
        if animate_position {
            node.transform.position.x = BASE_OFFSET + elapsed.sin();
        }
        Ok(())
    }

    /// Freezes the current graph and parameter overrides into an immutable
    /// snapshot for the renderer. Parameter changes take effect on the next
    /// apply, never mid-frame.
    pub fn apply(&self, params: &ParamSet) -> SceneResult<FrameSnapshot> {
        let rig = self.graph.rig().ok_or(SceneError::MissingRig)?;
        let mut rig = rig.clone();
        apply_overrides(&mut rig, params);
        rig.validate()?;

        let env_intensity = match &rig {
            LightRig::Staged(staged) => staged.intensity,
            _ => 1.0,
        };

        let mut meshes = Vec::new();
        for (id, node) in self.graph.meshes() {
            let NodeKind::Mesh {
                primitive,
                material,
                cast_shadow,
                receive_shadow,
            } = &node.kind
            else {
                continue;
            };
            let position = self.graph.world_position(id)?;
            let (shape, scale) = match primitive {
                Primitive::Sphere { radius } => {
                    (MeshInstance::SHAPE_SPHERE, node.transform.scale * *radius)
                }
                Primitive::Cube => (MeshInstance::SHAPE_BOX, node.transform.scale),
                Primitive::Plane => (MeshInstance::SHAPE_PLANE, node.transform.scale),
            };
            let rotation = node.transform.rotation;
            meshes.push(MeshInstance {
                position: position.to_array(),
                shape,
                rotation: [rotation.x, rotation.y, rotation.z, rotation.w],
                scale: scale.to_array(),
                env_intensity: material.env_intensity * env_intensity,
                color: material.color.to_array(),
                cast_shadow: if *cast_shadow { 1.0 } else { 0.0 },
                receive_shadow: if *receive_shadow { 1.0 } else { 0.0 },
                _pad: [0.0; 3],
            });
        }

        let overlay = self.graph.nodes().find_map(|(_, node)| match node.kind {
            NodeKind::Overlay(decl) => Some(decl.corner),
            _ => None,
        });
        let controls = self.graph.nodes().find_map(|(_, node)| match node.kind {
            NodeKind::Controls(decl) => Some(decl),
            _ => None,
        });

        Ok(FrameSnapshot {
            background: self.graph.background().unwrap_or(Color::BLACK),
            ambient: self.graph.ambient_intensity(),
            rig,
            meshes,
            overlay,
            controls,
        })
    }
}

/// Maps declared well-known parameters onto the rig clone. Parameters a
/// scene never declared leave the rig untouched.
fn apply_overrides(rig: &mut LightRig, params: &ParamSet) {
    let declared = |name: &str| params.specs().iter().any(|s| s.name == name);

    if declared(keys::SUN_POSITION) {
        let position = params.vec3(keys::SUN_POSITION);
        match rig {
            LightRig::DirectionalMap(r) => r.position = position,
            LightRig::Accumulative(r) => r.light.position = position,
            LightRig::Contact(_) | LightRig::Staged(_) => {}
        }
    }
    if declared(keys::SHADOW_OPACITY) {
        let opacity = params.float(keys::SHADOW_OPACITY);
        match rig {
            LightRig::Accumulative(r) => r.opacity = opacity,
            LightRig::Contact(r) => r.opacity = opacity,
            LightRig::DirectionalMap(_) | LightRig::Staged(_) => {}
        }
    }
    if declared(keys::SHADOW_COLOR) {
        let color = params.color(keys::SHADOW_COLOR);
        match rig {
            LightRig::Accumulative(r) => r.color = color,
            LightRig::Contact(r) => r.color = color,
            LightRig::DirectionalMap(_) | LightRig::Staged(_) => {}
        }
    }
    if declared(keys::CONTACT_BLUR) {
        if let LightRig::Contact(r) = rig {
            r.blur = params.float(keys::CONTACT_BLUR);
        }
    }
    if declared(keys::ENV_INTENSITY) {
        if let LightRig::Staged(r) = rig {
            r.intensity = params.float(keys::ENV_INTENSITY);
        }
    }
}

/// Immutable per-frame view of the scene, handed to the renderer.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FrameSnapshot {
    pub background: Color,
    pub ambient: f32,
    pub rig: LightRig,
    pub meshes: Vec<MeshInstance>,
    pub overlay: Option<Corner>,
    pub controls: Option<ControlsDecl>,
}

impl FrameSnapshot {
    pub fn shadow_casters(&self) -> impl Iterator<Item = &MeshInstance> {
        self.meshes.iter().filter(|m| m.cast_shadow > 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{AttachPoint, Material, SceneNode, Transform};
    use crate::params::ParamSpec;
    use crate::rig::{AccumulativeRig, DirectionalRig};

    const DT: f32 = 1.0 / 60.0;

    fn rigged_graph(rig: LightRig) -> (SceneGraph, NodeId) {
        let mut graph = SceneGraph::new();
        graph.add(
            SceneNode::new("background", NodeKind::Background { color: Color::IVORY })
                .attached_to(AttachPoint::Root),
        );
        graph.add(SceneNode::new(
            "ambient",
            NodeKind::AmbientLight { intensity: 1.5 },
        ));
        let cube = graph.add(
            SceneNode::mesh("cube", Primitive::Cube, Material::colored(Color::MEDIUM_PURPLE))
                .with_transform(Transform::at(2.0, 0.0, 0.0).with_scale(1.5))
                .casting_shadow(),
        );
        graph.add(
            SceneNode::mesh("floor", Primitive::Plane, Material::colored(Color::GREEN_YELLOW))
                .with_transform(
                    Transform::at(0.0, -1.0, 0.0)
                        .with_rotation_x(-std::f32::consts::FRAC_PI_2)
                        .with_scale(10.0),
                )
                .receiving_shadow(),
        );
        graph.attach_rig(rig).unwrap();
        (graph, cube)
    }

    #[test]
    fn single_tick_advances_yaw_by_exactly_two_tenths_of_delta() {
        let (graph, cube) = rigged_graph(LightRig::DirectionalMap(DirectionalRig::default()));
        let mut composer = Composer::new(graph, cube, false).unwrap();
        composer.tick(0.0, DT).unwrap();
        assert_eq!(composer.yaw(), ANGULAR_SPEED * DT);
    }

    #[test]
    fn ticks_compose_over_time() {
        let (graph, cube) = rigged_graph(LightRig::DirectionalMap(DirectionalRig::default()));
        let mut composer = Composer::new(graph, cube, false).unwrap();
        let mut elapsed = 0.0;
        for _ in 0..600 {
            composer.tick(elapsed, DT).unwrap();
            elapsed += DT;
        }
        assert!((composer.yaw() - ANGULAR_SPEED * 10.0).abs() < 1e-3);
    }

    #[test]
    fn first_frame_pose_matches_the_contract() {
        let (graph, cube) = rigged_graph(LightRig::Accumulative(AccumulativeRig::default()));
        let mut composer = Composer::new(graph, cube, true).unwrap();
        composer.tick(0.0, DT).unwrap();
        assert!((composer.yaw() - 1.0 / 300.0).abs() < 1e-7);
        let node = composer.graph().node(cube).unwrap();
        assert_eq!(node.transform.position.x, BASE_OFFSET);
    }

    #[test]
    fn position_animation_follows_the_elapsed_sine() {
        let (graph, cube) = rigged_graph(LightRig::Accumulative(AccumulativeRig::default()));
        let mut composer = Composer::new(graph, cube, true).unwrap();
        composer.tick(std::f32::consts::FRAC_PI_2, DT).unwrap();
        let node = composer.graph().node(cube).unwrap();
        assert!((node.transform.position.x - (BASE_OFFSET + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn rotation_only_versions_keep_the_declared_offset() {
        let (graph, cube) = rigged_graph(LightRig::DirectionalMap(DirectionalRig::default()));
        let mut composer = Composer::new(graph, cube, false).unwrap();
        composer.tick(3.0, DT).unwrap();
        let node = composer.graph().node(cube).unwrap();
        assert_eq!(node.transform.position.x, 2.0);
    }

    #[test]
    fn animated_handle_must_be_a_mesh() {
        let mut graph = SceneGraph::new();
        let light = graph.add(SceneNode::new(
            "ambient",
            NodeKind::AmbientLight { intensity: 1.0 },
        ));
        graph.add(
            SceneNode::mesh("sphere", Primitive::Sphere { radius: 1.0 }, Material::default())
                .casting_shadow(),
        );
        graph.add(
            SceneNode::mesh("floor", Primitive::Plane, Material::default())
                .with_transform(Transform::at(0.0, -1.0, 0.0))
                .receiving_shadow(),
        );
        graph
            .attach_rig(LightRig::DirectionalMap(DirectionalRig::default()))
            .unwrap();
        assert_eq!(
            Composer::new(graph, light, false).unwrap_err(),
            SceneError::AnimatedHandleNotMesh(light)
        );
    }

    #[test]
    fn apply_overrides_the_rig_from_declared_params() {
        let (graph, cube) = rigged_graph(LightRig::Accumulative(AccumulativeRig::default()));
        let composer = Composer::new(graph, cube, true).unwrap();
        let mut params = ParamSet::new()
            .with(ParamSpec::float(keys::SHADOW_OPACITY, 0.8, 0.0, 1.0))
            .with(ParamSpec::color(keys::SHADOW_COLOR, Color::SHADOW_MOSS));
        params.set_float(keys::SHADOW_OPACITY, 0.3).unwrap();

        let snapshot = composer.apply(&params).unwrap();
        let LightRig::Accumulative(rig) = &snapshot.rig else {
            panic!("expected the accumulative rig");
        };
        assert_eq!(rig.opacity, 0.3);
        assert_eq!(rig.color, Color::SHADOW_MOSS);
        assert_eq!(snapshot.background, Color::IVORY);
        assert_eq!(snapshot.ambient, 1.5);
        assert_eq!(snapshot.shadow_casters().count(), 1);
    }

    #[test]
    fn undeclared_params_leave_the_rig_as_authored() {
        let (graph, cube) = rigged_graph(LightRig::Accumulative(AccumulativeRig::default()));
        let composer = Composer::new(graph, cube, true).unwrap();
        let snapshot = composer.apply(&ParamSet::new()).unwrap();
        let LightRig::Accumulative(rig) = &snapshot.rig else {
            panic!("expected the accumulative rig");
        };
        assert_eq!(rig.opacity, 0.8);
    }

    #[test]
    fn snapshot_is_detached_from_later_ticks() {
        let (graph, cube) = rigged_graph(LightRig::DirectionalMap(DirectionalRig::default()));
        let mut composer = Composer::new(graph, cube, false).unwrap();
        let before = composer.apply(&ParamSet::new()).unwrap();
        composer.tick(1.0, DT).unwrap();
        let after = composer.apply(&ParamSet::new()).unwrap();
        assert_ne!(before, after);
        assert_eq!(before.meshes[0].rotation, [0.0, 0.0, 0.0, 1.0]);
    }
}
