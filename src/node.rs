use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Built-in mesh shapes. The stage renders analytic primitives; there is no
/// model loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Primitive {
    Sphere { radius: f32 },
    Cube,
    Plane,
}

/// Standard surface appearance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    /// Multiplier on environment-map lighting, 1.0 is neutral.
    pub env_intensity: f32,
}

impl Material {
    pub const fn colored(color: Color) -> Self {
        Self {
            color,
            env_intensity: 1.0,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::colored(Color::WHITE)
    }
}

/// Where a node hangs in the scene. Everything defaults to the stage; the
/// background clear color must attach to the root to take effect at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachPoint {
    #[default]
    Stage,
    Root,
}

/// Orbit-control configuration carried as scene data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlsDecl {
    /// Claim the default-controls slot so other consumers pick these up.
    pub make_default: bool,
    pub damping: bool,
}

impl Default for ControlsDecl {
    fn default() -> Self {
        Self {
            make_default: true,
            damping: true,
        }
    }
}

/// Performance overlay placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverlayDecl {
    pub corner: crate::types::Corner,
}

/// What a scene node is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    Mesh {
        primitive: Primitive,
        material: Material,
        cast_shadow: bool,
        receive_shadow: bool,
    },
    AmbientLight {
        intensity: f32,
    },
    Controls(ControlsDecl),
    Overlay(OverlayDecl),
    Background {
        color: Color,
    },
}

impl NodeKind {
    pub fn is_mesh(&self) -> bool {
        matches!(self, NodeKind::Mesh { .. })
    }

    pub fn casts_shadow(&self) -> bool {
        matches!(
            self,
            NodeKind::Mesh {
                cast_shadow: true,
                ..
            }
        )
    }
}

/// Local position, orientation and scale of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Self::IDENTITY
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn with_rotation_x(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_x(radians);
        self
    }

    /// Yaw around the vertical axis, composed after the existing rotation.
    pub fn rotated_y(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_y(radians) * self.rotation;
        self
    }

    /// Y rotation extracted from the quaternion, for yaw-only transforms.
    pub fn yaw(&self) -> f32 {
        let (axis, angle) = self.rotation.to_axis_angle();
        if axis.y < 0.0 {
            -angle
        } else {
            angle
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One declarative element of the scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub label: String,
    pub transform: Transform,
    pub kind: NodeKind,
    pub attach: AttachPoint,
}

impl SceneNode {
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            transform: Transform::IDENTITY,
            kind,
            attach: AttachPoint::Stage,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn attached_to(mut self, attach: AttachPoint) -> Self {
        self.attach = attach;
        self
    }

    pub fn mesh(
        label: impl Into<String>,
        primitive: Primitive,
        material: Material,
    ) -> Self {
        Self::new(
            label,
            NodeKind::Mesh {
                primitive,
                material,
                cast_shadow: false,
                receive_shadow: false,
            },
        )
    }

    pub fn casting_shadow(mut self) -> Self {
        if let NodeKind::Mesh { cast_shadow, .. } = &mut self.kind {
            *cast_shadow = true;
        }
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        if let NodeKind::Mesh { receive_shadow, .. } = &mut self.kind {
            *receive_shadow = true;
        }
        self
    }
}
