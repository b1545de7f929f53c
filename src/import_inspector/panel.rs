use crate::import_inspector::error::{InspectorError, Result};
use crate::import_inspector::field::{FieldKey, FieldType, FieldValue};
use crate::import_inspector::material::material_help;
use crate::import_inspector::present::{ChoicePresenter, HeadlessPresenter, Label};
use crate::import_inspector::session::InspectorSession;
use crate::import_inspector::settings::{
    ImportConfig, MaterialNaming, MaterialSearch, MeshCompression, NormalCalculationMode,
    NormalMode, OptionEnum,
};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const MESHES: &str = "Meshes";
pub const NORMALS_AND_TANGENTS: &str = "Normals & Tangents";
pub const MATERIALS: &str = "Materials";

pub const SCALE_FACTOR: Label = Label::with_tooltip(
    "Scale Factor",
    "How much to scale the models compared to what is in the source file.",
);
pub const USE_FILE_SCALE: Label = Label::with_tooltip("Use File Scale", "Use File Scale when importing.");
pub const FILE_SCALE: Label = Label::with_tooltip(
    "File Scale",
    "Scale defined by source file, or 1 if Use File Scale is disabled. Click Apply to update.",
);
pub const MESH_COMPRESSION: Label = Label::with_tooltip(
    "Mesh Compression",
    "Higher compression ratio means lower mesh precision.",
);
pub const IS_READABLE: Label = Label::with_tooltip(
    "Read/Write Enabled",
    "Allow vertices and indices to be accessed from script.",
);
pub const OPTIMIZE_MESH: Label = Label::with_tooltip(
    "Optimize Mesh",
    "The vertices and indices will be reordered for better GPU performance.",
);
pub const IMPORT_BLEND_SHAPES: Label = Label::new("Import BlendShapes");
pub const GENERATE_COLLIDERS: Label = Label::with_tooltip(
    "Generate Colliders",
    "Generate mesh colliders for all meshes.",
);
pub const KEEP_QUADS: Label = Label::with_tooltip(
    "Keep Quads",
    "If model contains quad faces, they are kept for tessellation.",
);
pub const WELD_VERTICES: Label = Label::with_tooltip(
    "Weld Vertices",
    "Combine vertices that share the same position in space.",
);
pub const SWAP_UVS: Label = Label::with_tooltip(
    "Swap UVs",
    "Swaps the 2 UV channels in meshes. Use if your diffuse texture uses UVs from the lightmap.",
);
pub const GENERATE_LIGHTMAP_UVS: Label =
    Label::with_tooltip("Generate Lightmap UVs", "Generate lightmap UVs into UV2.");
pub const ADVANCED: Label = Label::new("Advanced");
pub const HARD_ANGLE: Label = Label::with_tooltip(
    "Hard Angle",
    "Angle between neighbor triangles that will generate seam.",
);
pub const PACK_MARGIN: Label = Label::with_tooltip(
    "Pack Margin",
    "Measured in pixels, assuming mesh will cover an entire 1024x1024 lightmap.",
);
pub const ANGLE_ERROR: Label = Label::with_tooltip(
    "Angle Error",
    "Measured in percents. Deviation of UV angles from geometry angles.",
);
pub const AREA_ERROR: Label = Label::with_tooltip(
    "Area Error",
    "Measured in percents. Deviation of UV triangle area from uniformly scaled geometry.",
);
pub const SET_DEFAULTS: Label = Label::new("Set Defaults");
pub const NORMALS: Label = Label::new("Normals");
pub const NORMALS_MODE: Label = Label::new("Normals Mode");
pub const SMOOTHING_ANGLE: Label = Label::with_tooltip("Smoothing Angle", "Normal Smoothing Angle");
pub const TANGENTS: Label = Label::new("Tangents");
pub const IMPORT_MATERIALS: Label = Label::new("Import Materials");
pub const MATERIAL_NAMING: Label = Label::new("Material Naming");
pub const MATERIAL_SEARCH: Label = Label::new("Material Search");
pub const REVERT: Label = Label::new("Revert");
pub const APPLY: Label = Label::new("Apply");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderRanges {
    pub smoothing_angle: [f32; 2],
    pub hard_angle: [f32; 2],
    pub pack_margin: [f32; 2],
    pub angle_error: [f32; 2],
    pub area_error: [f32; 2],
}

impl Default for SliderRanges {
    fn default() -> Self {
        Self {
            smoothing_angle: [0.0, 180.0],
            hard_angle: [0.0, 180.0],
            pack_margin: [1.0, 64.0],
            angle_error: [1.0, 75.0],
            area_error: [1.0, 75.0],
        }
    }
}

fn range(bounds: [f32; 2]) -> RangeInclusive<f32> {
    bounds[0].min(bounds[1])..=bounds[0].max(bounds[1])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelAction {
    pub apply: bool,
    pub revert: bool,
}

pub fn draw_panel<P: ChoicePresenter>(
    session: &mut InspectorSession,
    presenter: &mut P,
    ranges: &SliderRanges,
) -> Result<PanelAction> {
    meshes_section(session, presenter, ranges)?;
    normals_and_tangents_section(session, presenter, ranges)?;
    materials_section(session, presenter)?;

    let mut action = PanelAction::default();
    let mut scope = presenter.disabled(!session.is_dirty());
    action.revert = scope.button(REVERT);
    action.apply = scope.button(APPLY);
    Ok(action)
}

pub fn render_panel_text(records: Vec<ImportConfig>, ranges: &SliderRanges) -> Result<String> {
    let mut session = InspectorSession::open(records)?;
    let mut presenter = HeadlessPresenter::default();
    draw_panel(&mut session, &mut presenter, ranges)?;
    Ok(presenter.render_text())
}

fn option_popup<P, E>(
    session: &mut InspectorSession,
    presenter: &mut P,
    label: Label,
    field: FieldKey,
    options: &[E],
) -> Result<()>
where
    P: ChoicePresenter,
    E: OptionEnum + FieldType,
{
    let labels: Vec<&str> = options.iter().map(|option| option.label()).collect();
    let selected = session
        .get::<E>(field)?
        .map(|value| options.iter().position(|option| *option == value));
    if let Some(index) = presenter.popup(label, &labels, selected) {
        session.select_option(field, options, index)?;
    }
    Ok(())
}

fn bool_field<P: ChoicePresenter>(
    session: &mut InspectorSession,
    presenter: &mut P,
    label: Label,
    field: FieldKey,
) -> Result<FieldValue<bool>> {
    let value = session.get::<bool>(field)?;
    if let Some(next) = presenter.toggle(label, value) {
        session.set(field, next)?;
        return Ok(FieldValue::Uniform(next));
    }
    Ok(value)
}

fn meshes_section<P: ChoicePresenter>(
    session: &mut InspectorSession,
    presenter: &mut P,
    ranges: &SliderRanges,
) -> Result<()> {
    presenter.section(MESHES);

    {
        let mut scope = presenter.disabled(session.target_count() > 1);
        let scale = session.get::<f32>(FieldKey::GlobalScale)?;
        if let Some(next) = scope.number(SCALE_FACTOR, scale) {
            session.set(FieldKey::GlobalScale, next)?;
        }
    }

    if bool_field(session, presenter, USE_FILE_SCALE, FieldKey::UseFileScale)?
        == FieldValue::Uniform(true)
    {
        let text = match session.get::<f32>(FieldKey::FileScale)? {
            FieldValue::Uniform(scale) => format!("{scale}"),
            FieldValue::Divergent => "-".to_string(),
        };
        presenter.readout(FILE_SCALE, &text);
    }

    option_popup(
        session,
        presenter,
        MESH_COMPRESSION,
        FieldKey::MeshCompression,
        MeshCompression::ALL,
    )?;

    bool_field(session, presenter, IS_READABLE, FieldKey::IsReadable)?;
    bool_field(session, presenter, OPTIMIZE_MESH, FieldKey::OptimizeMesh)?;
    bool_field(session, presenter, IMPORT_BLEND_SHAPES, FieldKey::ImportBlendShapes)?;
    bool_field(session, presenter, GENERATE_COLLIDERS, FieldKey::AddColliders)?;
    bool_field(session, presenter, KEEP_QUADS, FieldKey::KeepQuads)?;
    bool_field(session, presenter, WELD_VERTICES, FieldKey::WeldVertices)?;
    bool_field(session, presenter, SWAP_UVS, FieldKey::SwapUvChannels)?;

    let generate =
        bool_field(session, presenter, GENERATE_LIGHTMAP_UVS, FieldKey::GenerateSecondaryUv)?;
    if generate == FieldValue::Uniform(true) {
        session.secondary_uv_advanced_open =
            presenter.foldout(ADVANCED, session.secondary_uv_advanced_open);
        if session.secondary_uv_advanced_open {
            let sliders = [
                (HARD_ANGLE, FieldKey::SecondaryUvHardAngle, ranges.hard_angle),
                (PACK_MARGIN, FieldKey::SecondaryUvPackMargin, ranges.pack_margin),
                (ANGLE_ERROR, FieldKey::SecondaryUvAngleDistortion, ranges.angle_error),
                (AREA_ERROR, FieldKey::SecondaryUvAreaDistortion, ranges.area_error),
            ];
            for (label, field, bounds) in sliders {
                let value = session.get::<f32>(field)?;
                if let Some(next) = presenter.slider(label, value, range(bounds)) {
                    session.set_secondary_uv(field, next)?;
                }
            }
            if presenter.button(SET_DEFAULTS) {
                session.reset_secondary_uv()?;
            }
        }
    }
    Ok(())
}

fn normals_and_tangents_section<P: ChoicePresenter>(
    session: &mut InspectorSession,
    presenter: &mut P,
    ranges: &SliderRanges,
) -> Result<()> {
    presenter.section(NORMALS_AND_TANGENTS);

    let normal_labels: Vec<&str> = NormalMode::ALL.iter().map(|mode| mode.label()).collect();
    let normal = session.get::<NormalMode>(FieldKey::NormalMode)?;
    let selected = normal.map(|mode| Some(mode.code() as usize));
    if let Some(index) = presenter.popup(NORMALS, &normal_labels, selected) {
        let mode = NormalMode::ALL
            .get(index)
            .copied()
            .ok_or_else(|| InspectorError::contract(FieldKey::NormalMode, index))?;
        session.set_normal_mode(mode)?;
    }

    // Re-read: the tangent selector must reflect this frame's normal edit.
    let normal = session.get::<NormalMode>(FieldKey::NormalMode)?;
    {
        let mut scope = presenter.disabled(normal != FieldValue::Uniform(NormalMode::Calculate));
        option_popup(
            session,
            &mut *scope,
            NORMALS_MODE,
            FieldKey::NormalCalculationMode,
            NormalCalculationMode::ALL,
        )?;
        let angle = session.get::<f32>(FieldKey::NormalSmoothingAngle)?;
        if let Some(next) = scope.slider(SMOOTHING_ANGLE, angle, range(ranges.smoothing_angle)) {
            session.set_smoothing_angle(next)?;
        }
    }

    let view = session.tangent_view()?;
    let labels = view.choices.labels();
    let mut scope = presenter.disabled(!view.enabled);
    if let Some(index) = scope.popup(TANGENTS, &labels, view.selected) {
        session.select_tangent(index)?;
    }
    Ok(())
}

fn materials_section<P: ChoicePresenter>(
    session: &mut InspectorSession,
    presenter: &mut P,
) -> Result<()> {
    presenter.section(MATERIALS);
    let import = bool_field(session, presenter, IMPORT_MATERIALS, FieldKey::ImportMaterials)?;

    if import == FieldValue::Uniform(true) {
        let naming_options = session.naming_options();
        option_popup(
            session,
            presenter,
            MATERIAL_NAMING,
            FieldKey::MaterialNaming,
            naming_options,
        )?;
        option_popup(
            session,
            presenter,
            MATERIAL_SEARCH,
            FieldKey::MaterialSearch,
            MaterialSearch::ALL,
        )?;
    }

    let help = material_help(
        import,
        session.get::<MaterialNaming>(FieldKey::MaterialNaming)?,
        session.get::<MaterialSearch>(FieldKey::MaterialSearch)?,
    );
    presenter.help(&help);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import_inspector::present::{PresentedRow, ScriptedInput};
    use crate::import_inspector::settings::TangentMode;

    fn fbx(name: &str) -> ImportConfig {
        ImportConfig {
            name: name.to_string(),
            source_path: format!("{name}.fbx"),
            ..ImportConfig::default()
        }
    }

    fn frame(session: &mut InspectorSession, presenter: &mut HeadlessPresenter) -> PanelAction {
        presenter.clear();
        let action = draw_panel(session, presenter, &SliderRanges::default()).unwrap();
        assert_eq!(presenter.enable_stack().depth(), 0);
        action
    }

    fn enabled(presenter: &HeadlessPresenter, caption: &str) -> bool {
        match presenter.row(caption) {
            Some(PresentedRow::Popup { enabled, .. })
            | Some(PresentedRow::Toggle { enabled, .. })
            | Some(PresentedRow::Number { enabled, .. })
            | Some(PresentedRow::Slider { enabled, .. })
            | Some(PresentedRow::Button { enabled, .. }) => *enabled,
            other => panic!("no input row {caption}: {other:?}"),
        }
    }

    #[test]
    fn scale_factor_disabled_for_multi_selection() {
        let mut session = InspectorSession::open(vec![fbx("a"), fbx("b")]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        presenter.script(SCALE_FACTOR.text, ScriptedInput::Number(3.0));
        frame(&mut session, &mut presenter);
        assert!(!enabled(&presenter, SCALE_FACTOR.text));
        assert!(!session.is_dirty());
    }

    #[test]
    fn normals_edit_updates_tangents_in_same_frame() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        presenter.script(NORMALS.text, ScriptedInput::Choose(2));
        frame(&mut session, &mut presenter);

        assert_eq!(
            presenter.row(TANGENTS.text),
            Some(&PresentedRow::Popup {
                label: TANGENTS.text.to_string(),
                choices: vec!["None - (Normals required)".to_string()],
                selected: FieldValue::Uniform(Some(0)),
                enabled: false,
            })
        );
        assert!(!enabled(&presenter, NORMALS_MODE.text));
        assert!(enabled(&presenter, APPLY.text));
    }

    #[test]
    fn calculation_controls_enabled_only_when_calculating() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);
        assert!(!enabled(&presenter, SMOOTHING_ANGLE.text));

        session.set_normal_mode(NormalMode::Calculate).unwrap();
        presenter.script(SMOOTHING_ANGLE.text, ScriptedInput::Number(44.6));
        frame(&mut session, &mut presenter);
        assert!(enabled(&presenter, SMOOTHING_ANGLE.text));
        assert_eq!(
            session.get::<f32>(FieldKey::NormalSmoothingAngle).unwrap(),
            FieldValue::Uniform(45.0)
        );
    }

    #[test]
    fn divergent_normals_show_marker_without_propagation() {
        let mut b = fbx("b");
        b.normal_mode = NormalMode::Calculate;
        b.tangent_mode = TangentMode::CalculateLegacy;
        let mut session = InspectorSession::open(vec![fbx("a"), b]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);

        match presenter.row(NORMALS.text) {
            Some(PresentedRow::Popup { selected, .. }) => {
                assert_eq!(*selected, FieldValue::Divergent)
            }
            other => panic!("unexpected row {other:?}"),
        }
        assert!(!enabled(&presenter, TANGENTS.text));
        assert!(!session.is_dirty());
    }

    #[test]
    fn advanced_uv_controls_follow_foldout() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);
        assert!(presenter.row(ADVANCED.text).is_none());

        session.set(FieldKey::GenerateSecondaryUv, true).unwrap();
        presenter.script(ADVANCED.text, ScriptedInput::Open(true));
        presenter.script(PACK_MARGIN.text, ScriptedInput::Number(6.7));
        frame(&mut session, &mut presenter);
        assert!(session.secondary_uv_advanced_open);
        assert_eq!(
            session.get::<f32>(FieldKey::SecondaryUvPackMargin).unwrap(),
            FieldValue::Uniform(7.0)
        );
    }

    #[test]
    fn buttons_report_actions_only_when_dirty() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        presenter.script(APPLY.text, ScriptedInput::Click);
        assert_eq!(frame(&mut session, &mut presenter), PanelAction::default());

        session.set(FieldKey::KeepQuads, true).unwrap();
        let action = frame(&mut session, &mut presenter);
        assert!(action.apply);
        assert!(!action.revert);
    }

    #[test]
    fn material_rows_hidden_without_import() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        session.set(FieldKey::ImportMaterials, false).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);
        assert!(presenter.row(MATERIAL_NAMING.text).is_none());
        assert!(presenter.rows.iter().any(|row| matches!(
            row,
            PresentedRow::Help(text) if text.starts_with("No new materials")
        )));
    }

    #[test]
    fn file_scale_readout_follows_toggle() {
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        session.set(FieldKey::FileScale, 0.01_f32).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);
        assert_eq!(
            presenter.row(FILE_SCALE.text),
            Some(&PresentedRow::Readout {
                label: FILE_SCALE.text.to_string(),
                text: "0.01".to_string(),
            })
        );

        presenter.script(USE_FILE_SCALE.text, ScriptedInput::Toggle(false));
        frame(&mut session, &mut presenter);
        assert!(presenter.row(FILE_SCALE.text).is_none());
        assert_eq!(
            session.get::<bool>(FieldKey::UseFileScale).unwrap(),
            FieldValue::Uniform(false)
        );
    }

    #[test]
    fn file_scale_readout_marks_mixed_values() {
        let mut b = fbx("b");
        b.file_scale = 100.0;
        let mut session = InspectorSession::open(vec![fbx("a"), b]).unwrap();
        let mut presenter = HeadlessPresenter::default();
        frame(&mut session, &mut presenter);
        match presenter.row(FILE_SCALE.text) {
            Some(PresentedRow::Readout { text, .. }) => assert_eq!(text, "-"),
            other => panic!("unexpected row {other:?}"),
        }

        let mut c = fbx("c");
        c.use_file_scale = false;
        let mut session = InspectorSession::open(vec![fbx("a"), c]).unwrap();
        frame(&mut session, &mut presenter);
        assert!(presenter.row(FILE_SCALE.text).is_none());
    }

    #[test]
    fn reversed_ranges_are_ordered() {
        assert_eq!(range([64.0, 1.0]), 1.0..=64.0);

        let ranges = SliderRanges {
            pack_margin: [64.0, 1.0],
            ..SliderRanges::default()
        };
        let mut session = InspectorSession::open(vec![fbx("a")]).unwrap();
        session.set(FieldKey::GenerateSecondaryUv, true).unwrap();
        session.secondary_uv_advanced_open = true;
        let mut presenter = HeadlessPresenter::default();
        presenter.script(PACK_MARGIN.text, ScriptedInput::Number(90.0));
        draw_panel(&mut session, &mut presenter, &ranges).unwrap();
        assert_eq!(
            session.get::<f32>(FieldKey::SecondaryUvPackMargin).unwrap(),
            FieldValue::Uniform(64.0)
        );
    }

    #[test]
    fn text_dump_shows_stored_stale_tangents() {
        let prop = ImportConfig {
            name: "Prop".to_string(),
            source_path: "p.obj".to_string(),
            normal_mode: NormalMode::Import,
            tangent_mode: TangentMode::Import,
            ..ImportConfig::default()
        };
        let text = render_panel_text(vec![prop], &SliderRanges::default()).unwrap();
        assert!(text.contains("  Tangents: (none chosen)\n"), "{text}");
    }
}
