use glam::Vec3;

use crate::error::{SceneError, SceneResult};
use crate::node::{AttachPoint, NodeKind, SceneNode};
use crate::rig::LightRig;
use crate::types::Color;

/// Opaque handle to a node in a [`SceneGraph`]. Handles are only valid for
/// the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug)]
struct Slot {
    node: SceneNode,
    parent: Option<NodeId>,
}

/// Arena-backed scene description. Nodes are stored flat and addressed by
/// [`NodeId`]; at most one [`LightRig`] can be attached.
#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    rig: Option<LightRig>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root-level node and returns its handle.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        self.insert(node, None)
    }

    /// Adds a node under `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: SceneNode) -> SceneResult<NodeId> {
        self.check(parent)?;
        Ok(self.insert(node, Some(parent)))
    }

    fn insert(&mut self, node: SceneNode, parent: Option<NodeId>) -> NodeId {
        if matches!(node.kind, NodeKind::Background { .. })
            && (node.attach != AttachPoint::Root || parent.is_some())
        {
            log::warn!(
                "background '{}' is not attached to the scene root and will have no effect",
                node.label
            );
        }
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot { node, parent });
        id
    }

    /// Installs the scene's light rig. A second rig is rejected; the variants
    /// are exclusive and swapping requires rebuilding the scene.
    pub fn attach_rig(&mut self, rig: LightRig) -> SceneResult<()> {
        if let Some(active) = &self.rig {
            return Err(SceneError::RigAlreadyActive {
                active: active.name(),
                rejected: rig.name(),
            });
        }
        self.rig = Some(rig);
        Ok(())
    }

    pub fn rig(&self) -> Option<&LightRig> {
        self.rig.as_ref()
    }

    pub fn rig_mut(&mut self) -> Option<&mut LightRig> {
        self.rig.as_mut()
    }

    pub fn node(&self, id: NodeId) -> SceneResult<&SceneNode> {
        self.check(id)?;
        Ok(&self.slots[id.0 as usize].node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> SceneResult<&mut SceneNode> {
        self.check(id)?;
        Ok(&mut self.slots[id.0 as usize].node)
    }

    fn check(&self, id: NodeId) -> SceneResult<()> {
        if (id.0 as usize) < self.slots.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownNode(id))
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (NodeId(i as u32), &slot.node))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes().filter(|(_, node)| node.kind.is_mesh())
    }

    pub fn shadow_casters(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes().filter(|(_, node)| node.kind.casts_shadow())
    }

    /// Clear color of the stage. Only a background node whose direct parent
    /// is the scene root contributes; one hanging anywhere else is inert.
    pub fn background(&self) -> Option<Color> {
        self.slots.iter().find_map(|slot| match slot.node.kind {
            NodeKind::Background { color }
                if slot.node.attach == AttachPoint::Root && slot.parent.is_none() =>
            {
                Some(color)
            }
            _ => None,
        })
    }

    /// Summed intensity of all ambient light nodes.
    pub fn ambient_intensity(&self) -> f32 {
        self.nodes()
            .filter_map(|(_, node)| match node.kind {
                NodeKind::AmbientLight { intensity } => Some(intensity),
                _ => None,
            })
            .sum()
    }

    /// Node position composed through its parent chain.
    pub fn world_position(&self, id: NodeId) -> SceneResult<Vec3> {
        self.check(id)?;
        let slot = &self.slots[id.0 as usize];
        let local = slot.node.transform.position;
        match slot.parent {
            Some(parent) => {
                let base = &self.slots[parent.0 as usize].node.transform;
                Ok(self.world_position(parent)? + base.rotation * (base.scale * local))
            }
            None => Ok(local),
        }
    }

    /// Checks rig presence, rig parameters and vertical layering.
    ///
    /// The ground plane must sit strictly below the declared offset of every
    /// shadow caster, and a rig's catcher plane strictly above the ground,
    /// or coplanar surfaces z-fight.
    pub fn validate(&self) -> SceneResult<()> {
        let rig = self.rig.as_ref().ok_or(SceneError::MissingRig)?;
        rig.validate()?;

        let grounds: Vec<f32> = self
            .meshes()
            .filter(|(_, node)| {
                matches!(
                    node.kind,
                    NodeKind::Mesh {
                        primitive: crate::node::Primitive::Plane,
                        receive_shadow: true,
                        ..
                    }
                )
            })
            .map(|(_, node)| node.transform.position.y)
            .collect();

        for ground_y in grounds {
            for (_, caster) in self.shadow_casters() {
                if ground_y >= caster.transform.position.y {
                    return Err(SceneError::GroundNotBelowCaster {
                        ground: ground_y,
                        caster: caster.transform.position.y,
                        label: caster.label.clone(),
                    });
                }
            }
            if let Some(catcher) = rig.catcher_offset() {
                if catcher <= ground_y {
                    return Err(SceneError::CatcherCoplanar {
                        catcher,
                        ground: ground_y,
                    });
                }
            }
        }
        Ok(())
    }
}
