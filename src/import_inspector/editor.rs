use crate::import_inspector::preview::{
    UiInteractionState, draw_skeleton_system, setup_preview_scene, update_camera_viewport,
};
use crate::import_inspector::state::load_initial_state;
use crate::import_inspector::ui::ui_system;
use anyhow::Context;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

pub fn run() -> anyhow::Result<()> {
    let state = load_initial_state().context("failed to open the import selection")?;
    let window = state.config.window.clone();

    App::new()
        .insert_resource(state)
        .insert_resource(UiInteractionState::default())
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title,
                resolution: (window.width, window.height).into(),
                present_mode: PresentMode::AutoVsync,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_systems(Startup, setup_preview_scene)
        .add_systems(Update, update_camera_viewport)
        .add_systems(Update, draw_skeleton_system)
        .add_systems(EguiPrimaryContextPass, ui_system)
        .run();
    Ok(())
}
