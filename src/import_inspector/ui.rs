use crate::import_inspector::field::FieldValue;
use crate::import_inspector::panel::draw_panel;
use crate::import_inspector::present::{ChoicePresenter, Label};
use crate::import_inspector::preview::UiInteractionState;
use crate::import_inspector::scope::EnableStack;
use crate::import_inspector::state::InspectorState;
use bevy::prelude::ResMut;
use bevy_egui::{EguiContexts, egui};
use std::ops::RangeInclusive;

const MIXED: &str = "\u{2014}";

pub struct EguiPresenter<'a> {
    ui: &'a mut egui::Ui,
    stack: EnableStack,
}

impl<'a> EguiPresenter<'a> {
    pub fn new(ui: &'a mut egui::Ui) -> Self {
        Self {
            ui,
            stack: EnableStack::default(),
        }
    }
}

fn with_tooltip(response: egui::Response, label: Label) -> egui::Response {
    match label.tooltip {
        Some(tooltip) => response.on_hover_text(tooltip),
        None => response,
    }
}

impl ChoicePresenter for EguiPresenter<'_> {
    fn enable_stack(&self) -> &EnableStack {
        &self.stack
    }

    fn enable_stack_mut(&mut self) -> &mut EnableStack {
        &mut self.stack
    }

    fn section(&mut self, title: &str) {
        self.ui.add_space(6.0);
        self.ui.heading(title);
    }

    fn popup(
        &mut self,
        label: Label,
        choices: &[&str],
        selected: FieldValue<Option<usize>>,
    ) -> Option<usize> {
        let enabled = self.enabled();
        let current = match selected {
            FieldValue::Uniform(current) => current,
            FieldValue::Divergent => None,
        };
        let shown = match selected {
            FieldValue::Divergent => MIXED.to_string(),
            FieldValue::Uniform(None) => String::new(),
            FieldValue::Uniform(Some(idx)) => choices.get(idx).map(|c| c.to_string()).unwrap_or_default(),
        };

        let mut picked = None;
        self.ui.add_enabled_ui(enabled, |ui| {
            let response = egui::ComboBox::from_label(label.text)
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    for (idx, choice) in choices.iter().enumerate() {
                        if ui.selectable_label(current == Some(idx), *choice).clicked() {
                            picked = Some(idx);
                        }
                    }
                })
                .response;
            let _ = with_tooltip(response, label);
        });

        picked.filter(|idx| selected != FieldValue::Uniform(Some(*idx)))
    }

    fn toggle(&mut self, label: Label, value: FieldValue<bool>) -> Option<bool> {
        let enabled = self.enabled();
        let (mut flag, text) = match value {
            FieldValue::Uniform(flag) => (flag, label.text.to_string()),
            FieldValue::Divergent => (false, format!("{} ({MIXED})", label.text)),
        };
        let changed = self
            .ui
            .add_enabled_ui(enabled, |ui| {
                with_tooltip(ui.checkbox(&mut flag, text), label).changed()
            })
            .inner;
        changed.then_some(flag)
    }

    fn number(&mut self, label: Label, value: FieldValue<f32>) -> Option<f32> {
        let enabled = self.enabled();
        let divergent = value.is_divergent();
        let mut number = value.uniform().copied().unwrap_or(0.0);
        let changed = self
            .ui
            .add_enabled_ui(enabled, |ui| {
                ui.horizontal(|ui| {
                    ui.label(label.text);
                    let mut drag = egui::DragValue::new(&mut number).speed(0.01);
                    if divergent {
                        drag = drag.custom_formatter(|_, _| MIXED.to_string());
                    }
                    with_tooltip(ui.add(drag), label).changed()
                })
                .inner
            })
            .inner;
        changed.then_some(number)
    }

    fn slider(
        &mut self,
        label: Label,
        value: FieldValue<f32>,
        range: RangeInclusive<f32>,
    ) -> Option<f32> {
        let enabled = self.enabled();
        let divergent = value.is_divergent();
        let mut number = value.uniform().copied().unwrap_or(*range.start());
        let changed = self
            .ui
            .add_enabled_ui(enabled, |ui| {
                let mut slider = egui::Slider::new(&mut number, range).text(label.text);
                if divergent {
                    slider = slider.custom_formatter(|_, _| MIXED.to_string());
                }
                with_tooltip(ui.add(slider), label).changed()
            })
            .inner;
        changed.then_some(number)
    }

    fn readout(&mut self, label: Label, text: &str) {
        let response = self
            .ui
            .horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(label.text);
                ui.weak(text);
            })
            .response;
        let _ = with_tooltip(response, label);
    }

    fn foldout(&mut self, label: Label, open: bool) -> bool {
        let mut open = open;
        let enabled = self.enabled();
        self.ui.add_enabled_ui(enabled, |ui| {
            let _ = ui.toggle_value(&mut open, label.text);
        });
        open
    }

    fn button(&mut self, label: Label) -> bool {
        let enabled = self.enabled();
        with_tooltip(self.ui.add_enabled(enabled, egui::Button::new(label.text)), label).clicked()
    }

    fn help(&mut self, text: &str) {
        self.ui.group(|ui| {
            ui.small(text);
        });
    }
}

pub fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<InspectorState>,
    mut ui_state: ResMut<UiInteractionState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    let state = &mut *state;

    let top_bar_response = egui::TopBottomPanel::top("import_inspector_top_bar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.heading("Import Settings");
            ui.separator();
            ui.label(state.selection_label())
                .on_hover_text(state.selection_path().display().to_string());
            ui.separator();
            ui.label(format!("Status: {}", state.status));
            if state.session.is_dirty() {
                ui.label("(unapplied changes)");
            }
            ui.separator();
            if ui.button("Reload Selection").clicked() {
                state.reload();
            }
        });
    });

    let side_panel_response = egui::SidePanel::left("import_inspector_controls")
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let mut presenter = EguiPresenter::new(ui);
                let drawn = draw_panel(&mut state.session, &mut presenter, &state.config.ranges);
                match drawn {
                    Ok(action) if action.revert => state.revert(),
                    Ok(action) if action.apply => state.apply(),
                    Ok(_) => {}
                    Err(err) => state.report_error(&err),
                }
            });
        });

    ui_state.wants_pointer_input = ctx.wants_pointer_input();
    ui_state.side_panel_width = side_panel_response.response.rect.width();
    ui_state.top_bar_height = top_bar_response.response.rect.height();
}
