//! Cascade progress overlay using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::types::{CascadeState, UiLayout};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiLayout>()
            // bevy_egui 0.38+ draws in EguiPrimaryContextPass
            .add_systems(EguiPrimaryContextPass, hud_system);
    }
}

fn hud_system(mut contexts: EguiContexts, state: Res<CascadeState>, layout: Res<UiLayout>) {
    let Ok(ctx) = contexts.ctx_mut() else { return };
    let ui_scale = layout.ui_scale();
    let controller = state.world.controller();

    egui::Window::new("Cascade")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .resizable(false)
        .collapsible(true)
        .default_open(!layout.is_mobile)
        .show(ctx, |ui| {
            ui.label(egui::RichText::new("Click a cube").size(14.0 * ui_scale));
            ui.separator();
            render_counts(
                ui,
                "Triggered",
                controller.triggered_count(),
                controller.len(),
            );
            render_counts(
                ui,
                "Animating",
                controller.animating_count(),
                controller.len(),
            );
            render_counts(ui, "Done", controller.done_count(), controller.len());
            ui.label(
                egui::RichText::new(format!(
                    "{} neighbor links",
                    state.world.graph().edge_count()
                ))
                .small()
                .color(egui::Color32::GRAY),
            );
        });
}

fn render_counts(ui: &mut egui::Ui, label: &str, count: usize, total: usize) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.label(
            egui::RichText::new(format!("{} / {}", count, total))
                .color(egui::Color32::from_rgb(230, 60, 60)),
        );
    });
}
