use crate::params::{ParamKind, ParamSet, Preset};
use crate::types::Color;

pub const PRESET_PATH: &str = "shadowbox-preset.json";

/// Control panel generated from the declared parameter specs. Widget writes
/// land in the set and are picked up on the next apply, never mid-frame.
pub fn show(ctx: &egui::Context, scene_name: &str, params: &mut ParamSet) {
    egui::Window::new("Controls")
        .title_bar(true)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(scene_name)
                    .size(16.0)
                    .color(egui::Color32::from_rgb(200, 150, 100)),
            );
            ui.add_space(5.0);

            let specs = params.specs().to_vec();
            for spec in &specs {
                match spec.kind {
                    ParamKind::Float { min, max, .. } => {
                        let mut value = params.float(&spec.name);
                        if ui
                            .add(egui::Slider::new(&mut value, min..=max).text(&spec.name))
                            .changed()
                        {
                            if let Err(err) = params.set_float(&spec.name, value) {
                                log::warn!("{err}");
                            }
                        }
                    }
                    ParamKind::Color { .. } => {
                        let mut rgb = params.color(&spec.name).to_array();
                        ui.horizontal(|ui| {
                            if ui.color_edit_button_rgb(&mut rgb).changed() {
                                if let Err(err) =
                                    params.set_color(&spec.name, Color::from_array(rgb))
                                {
                                    log::warn!("{err}");
                                }
                            }
                            ui.label(&spec.name);
                        });
                    }
                    ParamKind::Vec3 { min, max, .. } => {
                        let mut value = params.vec3(&spec.name);
                        let mut changed = false;
                        ui.label(&spec.name);
                        ui.horizontal(|ui| {
                            for component in [&mut value.x, &mut value.y, &mut value.z] {
                                changed |= ui
                                    .add(
                                        egui::DragValue::new(component)
                                            .speed(0.1)
                                            .range(min..=max),
                                    )
                                    .changed();
                            }
                        });
                        if changed {
                            if let Err(err) = params.set_vec3(&spec.name, value) {
                                log::warn!("{err}");
                            }
                        }
                    }
                }
            }

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                if ui.button("Reset").clicked() {
                    params.reset_all();
                }
                if ui.button("Save").clicked() {
                    let preset = params.export(scene_name);
                    match preset.save(PRESET_PATH) {
                        Ok(()) => log::info!("saved preset to {PRESET_PATH}"),
                        Err(err) => log::warn!("preset save failed: {err:#}"),
                    }
                }
                if ui.button("Load").clicked() {
                    match Preset::load(PRESET_PATH) {
                        Ok(preset) => match params.apply_preset(&preset) {
                            Ok(()) => log::info!("loaded preset '{}'", preset.name),
                            Err(err) => log::warn!("preset apply failed: {err}"),
                        },
                        Err(err) => log::warn!("preset load failed: {err:#}"),
                    }
                }
            });
        });
}
