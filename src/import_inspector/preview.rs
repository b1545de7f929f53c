use crate::import_inspector::BONE_MARKER_SIZE;
use crate::import_inspector::settings::BoneOffset;
use crate::import_inspector::state::InspectorState;
use bevy::camera::visibility::RenderLayers;
use bevy::camera::{ClearColorConfig, Viewport};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::PrimaryEguiContext;

#[derive(Component)]
pub struct PreviewCamera;

#[derive(Resource, Default)]
pub struct UiInteractionState {
    pub wants_pointer_input: bool,
    pub side_panel_width: f32,
    pub top_bar_height: f32,
}

// A parent index that is missing or not earlier in the list makes a root.
pub fn joint_positions(bones: &[BoneOffset]) -> Vec<Vec3> {
    let mut world: Vec<Vec3> = Vec::with_capacity(bones.len());
    for (idx, bone) in bones.iter().enumerate() {
        let local = Vec3::from_array(bone.position);
        let base = bone
            .parent
            .filter(|parent| *parent < idx)
            .map_or(Vec3::ZERO, |parent| world[parent]);
        world.push(base + local);
    }
    world
}

pub fn setup_preview_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(2.6, -3.2, 2.0).looking_at(Vec3::new(0.0, 0.0, 1.0), Vec3::Z),
        PreviewCamera,
    ));
    commands.spawn((
        Camera2d,
        Camera {
            order: 1,
            clear_color: ClearColorConfig::None,
            ..default()
        },
        RenderLayers::layer(31),
        PrimaryEguiContext,
    ));
}

pub fn draw_skeleton_system(mut gizmos: Gizmos, state: Res<InspectorState>) {
    let Some(record) = state.session.selection().first() else {
        return;
    };
    let joints = joint_positions(&record.skeleton);

    for (idx, bone) in record.skeleton.iter().enumerate() {
        let joint = joints[idx];
        if let Some(parent) = bone.parent.filter(|parent| *parent < idx) {
            gizmos.line(joints[parent], joint, Color::srgb(0.9, 0.75, 0.3));
        }
        let s = BONE_MARKER_SIZE;
        let marker = Color::srgb(0.95, 0.95, 0.95);
        gizmos.line(joint - Vec3::X * s, joint + Vec3::X * s, marker);
        gizmos.line(joint - Vec3::Y * s, joint + Vec3::Y * s, marker);
        gizmos.line(joint - Vec3::Z * s, joint + Vec3::Z * s, marker);
    }

    gizmos.line(Vec3::ZERO, Vec3::X * 0.5, Color::srgb(0.85, 0.25, 0.25));
    gizmos.line(Vec3::ZERO, Vec3::Y * 0.5, Color::srgb(0.25, 0.85, 0.25));
    gizmos.line(Vec3::ZERO, Vec3::Z * 0.5, Color::srgb(0.25, 0.25, 0.85));
}

pub fn preview_viewport(
    physical_size: UVec2,
    scale_factor: f32,
    side_panel_width: f32,
    top_bar_height: f32,
) -> Option<Viewport> {
    if physical_size.x == 0 || physical_size.y == 0 {
        return None;
    }
    let to_physical = |logical: f32| (logical.max(0.0) * scale_factor) as u32;
    let origin = UVec2::new(
        to_physical(side_panel_width).min(physical_size.x - 1),
        to_physical(top_bar_height).min(physical_size.y - 1),
    );
    Some(Viewport {
        physical_position: origin,
        physical_size: (physical_size - origin).max(UVec2::ONE),
        depth: 0.0..1.0,
    })
}

pub fn update_camera_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    ui_state: Res<UiInteractionState>,
    mut camera_query: Query<&mut Camera, With<PreviewCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(viewport) = preview_viewport(
        window.physical_size(),
        window.scale_factor(),
        ui_state.side_panel_width,
        ui_state.top_bar_height,
    ) else {
        return;
    };
    for mut camera in &mut camera_query {
        camera.viewport = Some(viewport.clone());
    }
}
