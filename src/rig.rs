use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::types::{Color, MapSize};

/// Orthographic frustum of a shadow camera.
///
/// Extents are chosen to cover the shadow-casting geometry and no more;
/// oversizing wastes map resolution, undersizing clips shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowCamera {
    pub near: f32,
    pub far: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl ShadowCamera {
    /// Frustum with symmetric horizontal/vertical extents.
    pub const fn symmetric(near: f32, far: f32, extent: f32) -> Self {
        Self {
            near,
            far,
            top: extent,
            right: extent,
            bottom: -extent,
            left: -extent,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn depth(&self) -> f32 {
        self.far - self.near
    }

    fn validate(&self) -> SceneResult<()> {
        if self.far <= self.near {
            return Err(SceneError::RigFieldOutOfRange {
                field: "shadow camera far plane",
                value: self.far,
            });
        }
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return Err(SceneError::RigFieldOutOfRange {
                field: "shadow camera extent",
                value: self.width().min(self.height()),
            });
        }
        Ok(())
    }
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self::symmetric(1.0, 10.0, 5.0)
    }
}

/// Whether a technique refreshes its shadows every frame or bakes once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowUpdateMode {
    #[default]
    EveryFrame,
    /// Render the shadow pass once and reuse it; only valid for static geometry.
    Baked,
}

/// Percentage-closer soft-shadow filter layered on a mapped directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoftShadowFilter {
    /// Radius of the softness.
    pub size: f32,
    /// More samples, less noise, worse performance.
    pub samples: u32,
    /// Distance at which the shadow is sharpest.
    pub focus: f32,
}

impl Default for SoftShadowFilter {
    fn default() -> Self {
        Self {
            size: 25.0,
            samples: 10,
            focus: 0.0,
        }
    }
}

/// Directional light with an orthographic shadow camera and a texel map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalRig {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color,
    pub camera: ShadowCamera,
    pub map_size: MapSize,
    /// Depth offset against shadow acne.
    pub bias: f32,
    pub update: ShadowUpdateMode,
    pub soft: Option<SoftShadowFilter>,
    /// Draw the shadow-frustum gizmo.
    pub helper: bool,
}

impl Default for DirectionalRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 2.0, 3.0),
            intensity: 4.5,
            color: Color::WHITE,
            camera: ShadowCamera::default(),
            map_size: MapSize::square(1024),
            bias: 0.0,
            update: ShadowUpdateMode::EveryFrame,
            soft: None,
            helper: false,
        }
    }
}

/// How many frames an accumulator may spend converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameBudget {
    /// Converge within a fixed number of frames, all rendered up front.
    Bounded(u32),
    /// Spread the accumulation over the running render loop. Required on
    /// hosts that abort slow synchronous first renders.
    Temporal,
}

impl FrameBudget {
    pub fn is_temporal(&self) -> bool {
        matches!(self, FrameBudget::Temporal)
    }

    /// Frame count for bounded budgets, `None` when temporal.
    pub fn frames(&self) -> Option<u32> {
        match self {
            FrameBudget::Bounded(n) => Some(*n),
            FrameBudget::Temporal => None,
        }
    }
}

/// Position-jittered shadow light feeding an accumulator.
///
/// `amount` lights are scattered within `radius` of `position` each sample;
/// `ambient` is the fraction of illumination treated as omnidirectional, so
/// only crevices keep shadow at 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JitteredLight {
    pub amount: u32,
    pub radius: f32,
    pub intensity: f32,
    pub ambient: f32,
    pub position: Vec3,
    pub bias: f32,
    pub cast_shadow: bool,
    pub map_size: MapSize,
}

impl Default for JitteredLight {
    fn default() -> Self {
        Self {
            amount: 8,
            radius: 1.0,
            intensity: 3.0,
            ambient: 0.5,
            position: Vec3::new(1.0, 2.0, 3.0),
            bias: 0.001,
            cast_shadow: true,
            map_size: MapSize::square(512),
        }
    }
}

/// Ground-attached accumulator blending jittered light samples into a soft
/// shadow on a catcher plane just above the ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccumulativeRig {
    pub opacity: f32,
    pub color: Color,
    pub scale: f32,
    /// Vertical offset of the catcher plane; kept above the ground plane to
    /// avoid coplanar z-fighting.
    pub catcher_offset: f32,
    /// Shadows blended per refresh window.
    pub blend: u32,
    pub budget: FrameBudget,
    pub light: JitteredLight,
}

impl Default for AccumulativeRig {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            color: Color::SHADOW_MOSS,
            scale: 10.0,
            catcher_offset: -0.99,
            blend: 100,
            budget: FrameBudget::Temporal,
            light: JitteredLight::default(),
        }
    }
}

/// Planar contact-shadow approximation rendered at fixed resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRig {
    pub opacity: f32,
    pub color: Color,
    pub blur: f32,
    pub scale: f32,
    pub catcher_offset: f32,
    pub resolution: MapSize,
    /// Depth extent of the capture volume above the catcher.
    pub far: f32,
    pub update: ShadowUpdateMode,
}

impl Default for ContactRig {
    fn default() -> Self {
        Self {
            opacity: 0.7,
            color: Color::BLACK,
            blur: 2.0,
            scale: 10.0,
            catcher_offset: -0.99,
            resolution: MapSize::square(512),
            far: 5.0,
            update: ShadowUpdateMode::EveryFrame,
        }
    }
}

/// Preset environment maps for staged lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnvironmentPreset {
    #[default]
    Sunset,
    Dawn,
    Night,
    Warehouse,
    Forest,
    Apartment,
    Studio,
    City,
    Park,
    Lobby,
}

impl EnvironmentPreset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sunset => "sunset",
            Self::Dawn => "dawn",
            Self::Night => "night",
            Self::Warehouse => "warehouse",
            Self::Forest => "forest",
            Self::Apartment => "apartment",
            Self::Studio => "studio",
            Self::City => "city",
            Self::Park => "park",
            Self::Lobby => "lobby",
        }
    }
}

/// Projection of the environment map onto a virtual ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundProjection {
    pub height: f32,
    pub radius: f32,
    pub scale: f32,
}

impl Default for GroundProjection {
    fn default() -> Self {
        Self {
            height: 7.0,
            radius: 28.0,
            scale: 100.0,
        }
    }
}

/// Preset environment map with ground projection and a global intensity
/// multiplier applied to every material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedRig {
    pub preset: EnvironmentPreset,
    pub ground: GroundProjection,
    pub intensity: f32,
}

impl Default for StagedRig {
    fn default() -> Self {
        Self {
            preset: EnvironmentPreset::Sunset,
            ground: GroundProjection::default(),
            intensity: 1.0,
        }
    }
}

/// The shadow/lighting strategy of a scene. Exactly one is active; the
/// variants are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightRig {
    DirectionalMap(DirectionalRig),
    Accumulative(AccumulativeRig),
    Contact(ContactRig),
    Staged(StagedRig),
}

impl LightRig {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectionalMap(_) => "directional-map",
            Self::Accumulative(_) => "accumulative",
            Self::Contact(_) => "contact",
            Self::Staged(_) => "staged",
        }
    }

    /// Vertical offset of the rig's own receiver plane, if it has one.
    pub fn catcher_offset(&self) -> Option<f32> {
        match self {
            Self::Accumulative(rig) => Some(rig.catcher_offset),
            Self::Contact(rig) => Some(rig.catcher_offset),
            Self::DirectionalMap(_) | Self::Staged(_) => None,
        }
    }

    /// Shadow buffer resolution the rig allocates, if any.
    pub fn map_size(&self) -> Option<MapSize> {
        match self {
            Self::DirectionalMap(rig) => Some(rig.map_size),
            Self::Accumulative(rig) => Some(rig.light.map_size),
            Self::Contact(rig) => Some(rig.resolution),
            Self::Staged(_) => None,
        }
    }

    pub fn validate(&self) -> SceneResult<()> {
        if let Some(map) = self.map_size() {
            if map.width == 0 || map.height == 0 {
                return Err(SceneError::InvalidMapSize {
                    width: map.width,
                    height: map.height,
                });
            }
            if !map.is_power_of_two() {
                log::warn!(
                    "{} shadow map {}x{} is not power-of-two",
                    self.name(),
                    map.width,
                    map.height
                );
            }
        }

        match self {
            Self::DirectionalMap(rig) => {
                rig.camera.validate()?;
                if rig.intensity < 0.0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "directional intensity",
                        value: rig.intensity,
                    });
                }
            }
            Self::Accumulative(rig) => {
                check_unit_range("accumulative opacity", rig.opacity)?;
                check_unit_range("ambient fraction", rig.light.ambient)?;
                if rig.light.amount == 0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "jittered light amount",
                        value: 0.0,
                    });
                }
                if rig.budget == FrameBudget::Bounded(0) {
                    return Err(SceneError::EmptyFrameBudget);
                }
            }
            Self::Contact(rig) => {
                check_unit_range("contact opacity", rig.opacity)?;
                if rig.far <= 0.0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "contact depth extent",
                        value: rig.far,
                    });
                }
                if rig.blur < 0.0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "contact blur",
                        value: rig.blur,
                    });
                }
            }
            Self::Staged(rig) => {
                if rig.intensity < 0.0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "environment intensity",
                        value: rig.intensity,
                    });
                }
                if rig.ground.radius <= 0.0 {
                    return Err(SceneError::RigFieldOutOfRange {
                        field: "ground projection radius",
                        value: rig.ground.radius,
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_unit_range(field: &'static str, value: f32) -> SceneResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SceneError::RigFieldOutOfRange { field, value });
    }
    Ok(())
}
