use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::types::Color;

/// Parameter names the composer knows how to map onto the active rig.
/// Scene versions declare the subset that applies to their technique.
pub mod keys {
    pub const SUN_POSITION: &str = "sun-position";
    pub const SHADOW_OPACITY: &str = "opacity";
    pub const SHADOW_COLOR: &str = "shadow-color";
    pub const CONTACT_BLUR: &str = "blur";
    pub const ENV_INTENSITY: &str = "env-intensity";
}

/// Kind and bounds of a tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamKind {
    Float { default: f32, min: f32, max: f32 },
    Color { default: Color },
    /// Per-component bounds shared across x, y and z.
    Vec3 { default: Vec3, min: f32, max: f32 },
}

impl ParamKind {
    fn label(&self) -> &'static str {
        match self {
            ParamKind::Float { .. } => "float",
            ParamKind::Color { .. } => "color",
            ParamKind::Vec3 { .. } => "vec3",
        }
    }
}

/// A single declared tunable: name plus kind, default and range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn float(name: impl Into<String>, default: f32, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Float { default, min, max },
        }
    }

    pub fn color(name: impl Into<String>, default: Color) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Color { default },
        }
    }

    pub fn vec3(name: impl Into<String>, default: Vec3, min: f32, max: f32) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Vec3 { default, min, max },
        }
    }
}

/// Current value of a parameter, tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamValue {
    Float(f32),
    Color(Color),
    Vec3(Vec3),
}

/// The declared tunables of a scene version plus any overrides.
///
/// Reads fall back to the declared default when no override is set, so a
/// fresh set always reproduces the scene as authored.
#[derive(Debug, Default)]
pub struct ParamSet {
    specs: Vec<ParamSpec>,
    values: BTreeMap<String, ParamValue>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, spec: ParamSpec) -> Self {
        self.declare(spec);
        self
    }

    pub fn declare(&mut self, spec: ParamSpec) {
        if let Some(existing) = self.specs.iter_mut().find(|s| s.name == spec.name) {
            *existing = spec;
        } else {
            self.specs.push(spec);
        }
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn float(&self, name: &str) -> f32 {
        if let Some(ParamValue::Float(v)) = self.values.get(name) {
            return *v;
        }
        match self.spec(name).map(|s| s.kind) {
            Some(ParamKind::Float { default, .. }) => default,
            _ => {
                log::warn!("undeclared float parameter '{name}', using 0.0");
                0.0
            }
        }
    }

    pub fn color(&self, name: &str) -> Color {
        if let Some(ParamValue::Color(c)) = self.values.get(name) {
            return *c;
        }
        match self.spec(name).map(|s| s.kind) {
            Some(ParamKind::Color { default }) => default,
            _ => {
                log::warn!("undeclared color parameter '{name}', using black");
                Color::BLACK
            }
        }
    }

    pub fn vec3(&self, name: &str) -> Vec3 {
        if let Some(ParamValue::Vec3(v)) = self.values.get(name) {
            return *v;
        }
        match self.spec(name).map(|s| s.kind) {
            Some(ParamKind::Vec3 { default, .. }) => default,
            _ => {
                log::warn!("undeclared vec3 parameter '{name}', using zero");
                Vec3::ZERO
            }
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> SceneResult<()> {
        match self.require(name)?.kind {
            ParamKind::Float { min, max, .. } => {
                self.values
                    .insert(name.to_string(), ParamValue::Float(value.clamp(min, max)));
                Ok(())
            }
            kind => Err(SceneError::ParamKindMismatch {
                name: name.to_string(),
                expected: kind.label(),
            }),
        }
    }

    pub fn set_color(&mut self, name: &str, value: Color) -> SceneResult<()> {
        match self.require(name)?.kind {
            ParamKind::Color { .. } => {
                self.values.insert(name.to_string(), ParamValue::Color(value));
                Ok(())
            }
            kind => Err(SceneError::ParamKindMismatch {
                name: name.to_string(),
                expected: kind.label(),
            }),
        }
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) -> SceneResult<()> {
        match self.require(name)?.kind {
            ParamKind::Vec3 { min, max, .. } => {
                let clamped = value.clamp(Vec3::splat(min), Vec3::splat(max));
                self.values.insert(name.to_string(), ParamValue::Vec3(clamped));
                Ok(())
            }
            kind => Err(SceneError::ParamKindMismatch {
                name: name.to_string(),
                expected: kind.label(),
            }),
        }
    }

    fn require(&self, name: &str) -> SceneResult<&ParamSpec> {
        self.spec(name)
            .ok_or_else(|| SceneError::UnknownParam(name.to_string()))
    }

    /// Drops the override for `name`, restoring the declared default.
    pub fn reset(&mut self, name: &str) {
        self.values.remove(name);
    }

    pub fn reset_all(&mut self) {
        self.values.clear();
    }

    pub fn is_default(&self, name: &str) -> bool {
        !self.values.contains_key(name)
    }

    /// Captures the current overrides as a named preset.
    pub fn export(&self, name: impl Into<String>) -> Preset {
        Preset {
            name: name.into(),
            saved_at: chrono::Utc::now().to_rfc3339(),
            values: self.values.clone(),
        }
    }

    /// Applies a preset's overrides. Entries that do not match a declared
    /// parameter are skipped so presets survive across scene versions.
    pub fn apply_preset(&mut self, preset: &Preset) -> SceneResult<()> {
        for (name, value) in &preset.values {
            let result = match value {
                ParamValue::Float(v) => self.set_float(name, *v),
                ParamValue::Color(c) => self.set_color(name, *c),
                ParamValue::Vec3(v) => self.set_vec3(name, *v),
            };
            match result {
                Ok(()) => {}
                Err(SceneError::UnknownParam(_)) => {
                    log::warn!("preset '{}' has no parameter '{name}' here, skipping", preset.name);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }
}

/// A saved set of parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    /// RFC 3339 capture time.
    pub saved_at: String,
    pub values: BTreeMap<String, ParamValue>,
}

impl Preset {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read preset {}", path.display()))?;
        let preset = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse preset {}", path.display()))?;
        Ok(preset)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self).context("failed to serialize preset")?;
        std::fs::write(path, text)
            .with_context(|| format!("failed to write preset {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParamSet {
        ParamSet::new()
            .with(ParamSpec::float("opacity", 0.8, 0.0, 1.0))
            .with(ParamSpec::color("shadow-color", Color::SHADOW_MOSS))
            .with(ParamSpec::vec3(
                "sun-position",
                Vec3::new(1.0, 2.0, 3.0),
                -10.0,
                10.0,
            ))
    }

    #[test]
    fn reads_fall_back_to_declared_defaults() {
        let params = sample();
        assert_eq!(params.float("opacity"), 0.8);
        assert_eq!(params.color("shadow-color"), Color::SHADOW_MOSS);
        assert_eq!(params.vec3("sun-position"), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn set_clamps_to_declared_range() {
        let mut params = sample();
        params.set_float("opacity", 2.5).unwrap();
        assert_eq!(params.float("opacity"), 1.0);
        params.set_vec3("sun-position", Vec3::new(40.0, 0.0, -40.0)).unwrap();
        assert_eq!(params.vec3("sun-position"), Vec3::new(10.0, 0.0, -10.0));
    }

    #[test]
    fn unknown_and_mismatched_names_are_rejected() {
        let mut params = sample();
        assert_eq!(
            params.set_float("nope", 1.0),
            Err(SceneError::UnknownParam("nope".to_string()))
        );
        assert_eq!(
            params.set_float("shadow-color", 1.0),
            Err(SceneError::ParamKindMismatch {
                name: "shadow-color".to_string(),
                expected: "color",
            })
        );
    }

    #[test]
    fn reset_restores_the_default() {
        let mut params = sample();
        params.set_float("opacity", 0.1).unwrap();
        assert!(!params.is_default("opacity"));
        params.reset("opacity");
        assert!(params.is_default("opacity"));
        assert_eq!(params.float("opacity"), 0.8);
    }

    #[test]
    fn preset_round_trips_overrides_and_skips_unknowns() {
        let mut params = sample();
        params.set_float("opacity", 0.25).unwrap();
        params.set_color("shadow-color", Color::BLACK).unwrap();
        let preset = params.export("dusk");

        let mut other = ParamSet::new().with(ParamSpec::float("opacity", 0.8, 0.0, 1.0));
        other.apply_preset(&preset).unwrap();
        assert_eq!(other.float("opacity"), 0.25);
    }

    #[test]
    fn preset_serializes_as_json() {
        let mut params = sample();
        params.set_float("opacity", 0.5).unwrap();
        let preset = params.export("half");
        let text = serde_json::to_string(&preset).unwrap();
        let back: Preset = serde_json::from_str(&text).unwrap();
        assert_eq!(back, preset);
    }
}
