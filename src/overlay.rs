use std::collections::VecDeque;

use crate::camera::OrbitCamera;
use crate::composer::FrameSnapshot;
use crate::core::Throttled;
use crate::rig::{FrameBudget, LightRig, ShadowUpdateMode};
use crate::types::Corner;

pub const SAMPLE_WINDOW: usize = 120;
pub const REFRESH_INTERVAL: f32 = 0.25;

/// Rolling frame statistics. Display values refresh on an interval so the
/// numbers are readable instead of flickering every frame.
pub struct PerfStats {
    samples: VecDeque<f32>,
    refresh: Throttled,
    fps: f32,
    frame_ms: f32,
    frames: u64,
}

impl PerfStats {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(SAMPLE_WINDOW),
            refresh: Throttled::new(REFRESH_INTERVAL),
            fps: 0.0,
            frame_ms: 0.0,
            frames: 0,
        }
    }

    pub fn record(&mut self, delta: f32) {
        if delta > 0.0 {
            if self.samples.len() == SAMPLE_WINDOW {
                self.samples.pop_front();
            }
            self.samples.push_back(delta);
        }
        self.frames += 1;
        if self.refresh.try_tick(delta) {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        if self.samples.is_empty() {
            return;
        }
        let mean = self.samples.iter().sum::<f32>() / self.samples.len() as f32;
        if mean > 0.0 {
            self.fps = 1.0 / mean;
            self.frame_ms = mean * 1000.0;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for PerfStats {
    fn default() -> Self {
        Self::new()
    }
}

fn corner_anchor(corner: Corner) -> (egui::Align2, egui::Vec2) {
    match corner {
        Corner::TopLeft => (egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0)),
        Corner::TopRight => (egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0)),
        Corner::BottomLeft => (egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0)),
        Corner::BottomRight => (egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0)),
    }
}

fn rig_detail(rig: &LightRig) -> String {
    match rig {
        LightRig::DirectionalMap(r) => match r.update {
            ShadowUpdateMode::Baked => "map baked once".to_string(),
            ShadowUpdateMode::EveryFrame => "map refreshed per frame".to_string(),
        },
        LightRig::Accumulative(r) => match r.budget {
            FrameBudget::Temporal => format!("blend {} (temporal)", r.blend),
            FrameBudget::Bounded(n) => format!("blend {} over {} frames", r.blend, n),
        },
        LightRig::Contact(r) => format!("blur {:.1}", r.blur),
        LightRig::Staged(r) => format!("preset {}", r.preset.name()),
    }
}

/// Draws the perf window pinned to the declared corner.
pub fn show(
    ctx: &egui::Context,
    corner: Corner,
    stats: &PerfStats,
    scene_name: &str,
    snapshot: &FrameSnapshot,
    camera: &OrbitCamera,
    resolution: (u32, u32),
    time: f32,
) {
    let (align, offset) = corner_anchor(corner);

    egui::Window::new("Perf")
        .title_bar(true)
        .resizable(false)
        .anchor(align, offset)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading(
                egui::RichText::new(format!("{:.0} FPS", stats.fps()))
                    .size(32.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.label(
                egui::RichText::new(format!("{:.2} ms", stats.frame_ms()))
                    .size(14.0)
                    .color(egui::Color32::GRAY),
            );

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);

            ui.label(
                egui::RichText::new("Scene")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(200, 150, 100)),
            );
            ui.monospace(format!("Name: {}", scene_name));
            ui.monospace(format!(
                "Meshes: {} ({} casting)",
                snapshot.meshes.len(),
                snapshot.shadow_casters().count()
            ));

            ui.add_space(5.0);
            ui.separator();
            ui.add_space(5.0);

            ui.label(
                egui::RichText::new("Rig")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 200, 100)),
            );
            ui.monospace(format!("Kind: {}", snapshot.rig.name()));
            if let Some(map) = snapshot.rig.map_size() {
                ui.monospace(format!("Map: {}x{}", map.width, map.height));
            }
            ui.monospace(rig_detail(&snapshot.rig));

            ui.add_space(5.0);
            ui.separator();
            ui.add_space(5.0);

            ui.label(
                egui::RichText::new("Camera")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(150, 150, 255)),
            );
            let eye = camera.eye();
            ui.monospace(format!("Eye: ({:.2}, {:.2}, {:.2})", eye.x, eye.y, eye.z));
            ui.monospace(format!(
                "Yaw: {:.1}° Pitch: {:.1}°",
                camera.yaw.to_degrees(),
                camera.pitch.to_degrees()
            ));

            ui.add_space(5.0);
            ui.separator();
            ui.add_space(5.0);

            ui.label(
                egui::RichText::new("Rendering")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(200, 100, 200)),
            );
            ui.monospace(format!("Resolution: {}x{}", resolution.0, resolution.1));
            ui.monospace(format!("Frames: {}", stats.frames()));
            ui.monospace(format!("Time: {:.2}s", time));
        });
}
