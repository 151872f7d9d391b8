use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::config::*;
use crate::systems::city::{
    CityConfig, CityStatus, DemolishEvent, GenerateEvent, Seed, ShapeKind, fresh_seed,
};
use crate::systems::city::spawn::GeneratedCity;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .add_systems(Update, key_input)
            .add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

// R = new seed, Delete = demolish
fn key_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut regen_events: EventWriter<GenerateEvent>,
    mut demolish_events: EventWriter<DemolishEvent>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        regen_events.write(GenerateEvent { seed: fresh_seed() });
    }
    if keyboard_input.just_pressed(KeyCode::Delete) {
        demolish_events.write(DemolishEvent);
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut config: ResMut<CityConfig>,
    status: Res<CityStatus>,
    cities: Query<(), With<GeneratedCity>>,
    mut regen_events: EventWriter<GenerateEvent>,
    mut demolish_events: EventWriter<DemolishEvent>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("city_panel")
            .default_width(200.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");

                ui.separator();
                ui.label("City Parameters:");

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.label(format!("Current: {}", current_seed.0));
                    if ui.button("Regenerate")
                        .on_hover_text("New city with a fresh seed (R)")
                        .clicked() {
                        regen_events.write(GenerateEvent { seed: fresh_seed() });
                    }
                });

                regenerate |= parameter_form(ui, &mut config);

                ui.separator();

                ui.horizontal(|ui| {
                    if ui.button("Generate City")
                        .on_hover_text("Build a city with the current seed")
                        .clicked() {
                        regen_events.write(GenerateEvent { seed: current_seed.0 });
                    }

                    let demolish_button = egui::Button::new("Demolish City").fill(egui::Color32::from_rgb(130, 22, 22));
                    if ui.add(demolish_button)
                        .on_hover_text("Remove every generated object (Delete)")
                        .clicked() {
                        demolish_events.write(DemolishEvent);
                    }
                });

                // status indicator
                ui.horizontal(|ui| {
                    ui.label("City:");
                    let (status_text, status_color) = match &*status {
                        CityStatus::Empty => ("Nothing built".to_string(), egui::Color32::GRAY),
                        CityStatus::Demolished => ("Demolished".to_string(), egui::Color32::GRAY),
                        CityStatus::Built { stats, .. } => (
                            format!("{} buildings", stats.buildings),
                            egui::Color32::from_rgb(34, 139, 34),
                        ),
                        CityStatus::Rejected(reason) => (reason.clone(), egui::Color32::from_rgb(178, 34, 34)),
                    };
                    ui.label(egui::RichText::new(status_text).color(status_color));
                });

                if let CityStatus::Built { stats, .. } = &*status {
                    ui.label(format!(
                        "{} cubes, {} cylinders, {} cones, {} antennas",
                        stats.cubes, stats.cylinders, stats.cones, stats.antennas
                    ));
                }

                ui.separator();
                ui.label("ESC - Exit");

                // parameter changes rebuild a standing city in place
                if regenerate && status.rebuilds_on_change(!cities.is_empty()) {
                    regen_events.write(GenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

// sliders never reach below a loaded value, egui would clamp it silently
fn reach<T: PartialOrd>(limit: T, current: T) -> T {
    if current > limit { current } else { limit }
}

// footprint, heights, weights and antennas; true when anything changed
fn parameter_form(ui: &mut egui::Ui, config: &mut CityConfig) -> bool {
    let mut changed = false;

    egui::CollapsingHeader::new("City Footprint")
        .default_open(true)
        .show(ui, |ui| {
        let width_max = reach(FOOTPRINT_MAX, config.width_x);
        changed |= ui.add(egui::Slider::new(&mut config.width_x, 1..=width_max)
            .text("X Dimension"))
            .on_hover_text("Width of the ground plane along X.")
            .changed();
        let depth_max = reach(FOOTPRINT_MAX, config.depth_z);
        changed |= ui.add(egui::Slider::new(&mut config.depth_z, 1..=depth_max)
            .text("Z Dimension"))
            .on_hover_text("Depth of the ground plane along Z.")
            .changed();
        let gap_max = reach(BUILDING_GAP_MAX, config.building_gap);
        changed |= ui.add(egui::Slider::new(&mut config.building_gap, 0.0..=gap_max)
            .text("Building Gap"))
            .on_hover_text("Empty space added after every plot.")
            .changed();
    });

    // building heights, max is exclusive so keep one unit between them
    egui::CollapsingHeader::new("Building Heights")
        .default_open(true)
        .show(ui, |ui| {
        let min_limit = config.max_height.saturating_sub(1);
        changed |= ui.add(egui::Slider::new(&mut config.min_height, 0..=min_limit)
            .text("Minimum Height"))
            .on_hover_text("Lowest building height.")
            .changed();

        let max_low = config.min_height + 1;
        let max_high = reach(HEIGHT_SLIDER_MAX.max(max_low), config.max_height);
        changed |= ui.add(egui::Slider::new(&mut config.max_height, max_low..=max_high)
            .text("Maximum Height"))
            .on_hover_text("Buildings stay strictly below this height.")
            .changed();
    });

    egui::CollapsingHeader::new("Shape Weights")
        .default_open(true)
        .show(ui, |ui| {
        for kind in ShapeKind::ALL {
            let weight = config.shape_weights.get_mut(kind);
            let weight_max = reach(WEIGHT_SLIDER_MAX, *weight);
            changed |= ui.add(egui::Slider::new(weight, 0..=weight_max)
                .text(kind.label()))
                .on_hover_text("Relative chance of this shape. Zero disables it.")
                .changed();
        }
        if config.shape_weights.total() == 0 {
            ui.label(egui::RichText::new("All weights are zero")
                .color(egui::Color32::from_rgb(178, 34, 34)));
        }
    });

    egui::CollapsingHeader::new("Rooftop Antennas")
        .default_open(true)
        .show(ui, |ui| {
        changed |= ui.checkbox(&mut config.antenna_enabled, "Antennas")
            .on_hover_text("Cube and cone buildings may get an antenna.")
            .changed();

        let denominator = config.antenna_chance.denominator;
        ui.add_enabled_ui(config.antenna_enabled, |ui| {
            changed |= ui.add(egui::Slider::new(&mut config.antenna_chance.numerator, 0..=denominator)
                .text(format!("Chance (in {denominator})")))
                .changed();
            ui.label(format!("{:.0}% of cube and cone roofs", config.antenna_chance.as_f32() * 100.0));
        });
    });

    changed
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(26.0)
                                .color(egui::Color32::WHITE));
                        }
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::city::ShapeWeights;

    // one frame of the form, as the side panel would draw it
    fn show_form(config: &mut CityConfig) -> bool {
        let ctx = egui::Context::default();
        let mut changed = false;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                changed = parameter_form(ui, config);
            });
        });
        changed
    }

    #[test]
    fn loaded_values_past_the_slider_limits_survive_a_frame() {
        let loaded = CityConfig {
            width_x: 300,
            depth_z: 250,
            min_height: 30,
            max_height: 50,
            building_gap: 2.5,
            shape_weights: ShapeWeights { cube: 40, cylinder: 12, cone: 0 },
            ..CityConfig::default()
        };
        let mut config = loaded.clone();

        let changed = show_form(&mut config);

        assert!(!changed);
        assert_eq!(config, loaded);
    }

    #[test]
    fn default_values_pass_through_unchanged() {
        let mut config = CityConfig::default();
        assert!(!show_form(&mut config));
        assert_eq!(config, CityConfig::default());
    }

    #[test]
    fn reach_keeps_the_larger_bound() {
        assert_eq!(reach(200, 40), 200);
        assert_eq!(reach(200, 300), 300);
        assert_eq!(reach(1.0, 2.5), 2.5);
    }
}
