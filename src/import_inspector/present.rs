use crate::import_inspector::field::FieldValue;
use crate::import_inspector::scope::{DisabledScope, EnableStack};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub text: &'static str,
    pub tooltip: Option<&'static str>,
}

impl Label {
    pub const fn new(text: &'static str) -> Self {
        Self {
            text,
            tooltip: None,
        }
    }

    pub const fn with_tooltip(text: &'static str, tooltip: &'static str) -> Self {
        Self {
            text,
            tooltip: Some(tooltip),
        }
    }
}

pub trait ChoicePresenter {
    fn enable_stack(&self) -> &EnableStack;

    fn enable_stack_mut(&mut self) -> &mut EnableStack;

    fn enabled(&self) -> bool {
        self.enable_stack().enabled()
    }

    fn disabled(&mut self, disabled: bool) -> DisabledScope<'_, Self>
    where
        Self: Sized,
    {
        DisabledScope::new(self, disabled)
    }

    fn section(&mut self, title: &str);

    fn popup(
        &mut self,
        label: Label,
        choices: &[&str],
        selected: FieldValue<Option<usize>>,
    ) -> Option<usize>;

    fn toggle(&mut self, label: Label, value: FieldValue<bool>) -> Option<bool>;

    fn number(&mut self, label: Label, value: FieldValue<f32>) -> Option<f32>;

    fn slider(
        &mut self,
        label: Label,
        value: FieldValue<f32>,
        range: RangeInclusive<f32>,
    ) -> Option<f32>;

    fn readout(&mut self, label: Label, text: &str);

    fn foldout(&mut self, label: Label, open: bool) -> bool;

    fn button(&mut self, label: Label) -> bool;

    fn help(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum PresentedRow {
    Section(String),
    Popup {
        label: String,
        choices: Vec<String>,
        selected: FieldValue<Option<usize>>,
        enabled: bool,
    },
    Toggle {
        label: String,
        value: FieldValue<bool>,
        enabled: bool,
    },
    Number {
        label: String,
        value: FieldValue<f32>,
        enabled: bool,
    },
    Slider {
        label: String,
        value: FieldValue<f32>,
        min: f32,
        max: f32,
        enabled: bool,
    },
    Readout {
        label: String,
        text: String,
    },
    Foldout {
        label: String,
        open: bool,
    },
    Button {
        label: String,
        enabled: bool,
    },
    Help(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptedInput {
    Choose(usize),
    Toggle(bool),
    Number(f32),
    Click,
    Open(bool),
}

#[derive(Debug, Default, Clone)]
pub struct HeadlessPresenter {
    stack: EnableStack,
    pub rows: Vec<PresentedRow>,
    script: HashMap<&'static str, ScriptedInput>,
}

impl HeadlessPresenter {
    pub fn script(&mut self, caption: &'static str, input: ScriptedInput) {
        self.script.insert(caption, input);
    }

    pub fn row(&self, caption: &str) -> Option<&PresentedRow> {
        self.rows.iter().find(|row| match row {
            PresentedRow::Section(text) | PresentedRow::Help(text) => text == caption,
            PresentedRow::Popup { label, .. }
            | PresentedRow::Toggle { label, .. }
            | PresentedRow::Number { label, .. }
            | PresentedRow::Slider { label, .. }
            | PresentedRow::Readout { label, .. }
            | PresentedRow::Foldout { label, .. }
            | PresentedRow::Button { label, .. } => label == caption,
        })
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    fn take(&mut self, label: Label) -> Option<ScriptedInput> {
        if !self.enabled() {
            return None;
        }
        self.script.remove(label.text)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = match row {
                PresentedRow::Section(title) => writeln!(out, "[{title}]"),
                PresentedRow::Popup {
                    label,
                    choices,
                    selected,
                    enabled,
                } => {
                    let shown = match selected {
                        FieldValue::Divergent => "(multiple values)".to_string(),
                        FieldValue::Uniform(None) => "(none chosen)".to_string(),
                        FieldValue::Uniform(Some(idx)) => {
                            choices.get(*idx).cloned().unwrap_or_default()
                        }
                    };
                    writeln!(out, "  {label}: {shown}{}", disabled_suffix(*enabled))
                }
                PresentedRow::Toggle {
                    label,
                    value,
                    enabled,
                } => writeln!(
                    out,
                    "  {label}: {}{}",
                    show_value(value),
                    disabled_suffix(*enabled)
                ),
                PresentedRow::Number {
                    label,
                    value,
                    enabled,
                }
                | PresentedRow::Slider {
                    label,
                    value,
                    enabled,
                    ..
                } => writeln!(
                    out,
                    "  {label}: {}{}",
                    show_value(value),
                    disabled_suffix(*enabled)
                ),
                PresentedRow::Readout { label, text } => writeln!(out, "  {label}: {text}"),
                PresentedRow::Foldout { label, open } => {
                    writeln!(out, "  {} {label}", if *open { "v" } else { ">" })
                }
                PresentedRow::Button { label, enabled } => {
                    writeln!(out, "  <{label}>{}", disabled_suffix(*enabled))
                }
                PresentedRow::Help(text) => {
                    let mut res = Ok(());
                    for line in text.lines() {
                        res = writeln!(out, "  | {line}");
                    }
                    res
                }
            };
        }
        out
    }
}

fn disabled_suffix(enabled: bool) -> &'static str {
    if enabled { "" } else { " (disabled)" }
}

fn show_value<T: std::fmt::Display>(value: &FieldValue<T>) -> String {
    match value {
        FieldValue::Uniform(value) => value.to_string(),
        FieldValue::Divergent => "(multiple values)".to_string(),
    }
}

impl ChoicePresenter for HeadlessPresenter {
    fn enable_stack(&self) -> &EnableStack {
        &self.stack
    }

    fn enable_stack_mut(&mut self) -> &mut EnableStack {
        &mut self.stack
    }

    fn section(&mut self, title: &str) {
        self.rows.push(PresentedRow::Section(title.to_string()));
    }

    fn popup(
        &mut self,
        label: Label,
        choices: &[&str],
        selected: FieldValue<Option<usize>>,
    ) -> Option<usize> {
        self.rows.push(PresentedRow::Popup {
            label: label.text.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
            selected,
            enabled: self.enabled(),
        });
        match self.take(label) {
            Some(ScriptedInput::Choose(idx)) if selected != FieldValue::Uniform(Some(idx)) => {
                Some(idx)
            }
            _ => None,
        }
    }

    fn toggle(&mut self, label: Label, value: FieldValue<bool>) -> Option<bool> {
        self.rows.push(PresentedRow::Toggle {
            label: label.text.to_string(),
            value,
            enabled: self.enabled(),
        });
        match self.take(label) {
            Some(ScriptedInput::Toggle(flag)) => Some(flag),
            _ => None,
        }
    }

    fn number(&mut self, label: Label, value: FieldValue<f32>) -> Option<f32> {
        self.rows.push(PresentedRow::Number {
            label: label.text.to_string(),
            value,
            enabled: self.enabled(),
        });
        match self.take(label) {
            Some(ScriptedInput::Number(number)) => Some(number),
            _ => None,
        }
    }

    fn slider(
        &mut self,
        label: Label,
        value: FieldValue<f32>,
        range: RangeInclusive<f32>,
    ) -> Option<f32> {
        self.rows.push(PresentedRow::Slider {
            label: label.text.to_string(),
            value,
            min: *range.start(),
            max: *range.end(),
            enabled: self.enabled(),
        });
        match self.take(label) {
            Some(ScriptedInput::Number(number)) => {
                let (lo, hi) = (range.start().min(*range.end()), range.start().max(*range.end()));
                Some(number.clamp(lo, hi))
            }
            _ => None,
        }
    }

    fn readout(&mut self, label: Label, text: &str) {
        self.rows.push(PresentedRow::Readout {
            label: label.text.to_string(),
            text: text.to_string(),
        });
    }

    fn foldout(&mut self, label: Label, open: bool) -> bool {
        let open = match self.take(label) {
            Some(ScriptedInput::Open(next)) => next,
            _ => open,
        };
        self.rows.push(PresentedRow::Foldout {
            label: label.text.to_string(),
            open,
        });
        open
    }

    fn button(&mut self, label: Label) -> bool {
        self.rows.push(PresentedRow::Button {
            label: label.text.to_string(),
            enabled: self.enabled(),
        });
        matches!(self.take(label), Some(ScriptedInput::Click))
    }

    fn help(&mut self, text: &str) {
        self.rows.push(PresentedRow::Help(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICK: Label = Label::new("Pick");

    #[test]
    fn scripted_choice_is_reported_once() {
        let mut presenter = HeadlessPresenter::default();
        presenter.script("Pick", ScriptedInput::Choose(1));
        let choices = ["a", "b"];
        assert_eq!(
            presenter.popup(PICK, &choices, FieldValue::Uniform(Some(0))),
            Some(1)
        );
        assert_eq!(
            presenter.popup(PICK, &choices, FieldValue::Uniform(Some(0))),
            None
        );
    }

    #[test]
    fn reversed_slider_bounds_still_clamp() {
        let mut presenter = HeadlessPresenter::default();
        presenter.script("Margin", ScriptedInput::Number(5.0));
        let edited = presenter.slider(
            Label::new("Margin"),
            FieldValue::Uniform(4.0),
            64.0..=1.0,
        );
        assert_eq!(edited, Some(5.0));

        presenter.script("Margin", ScriptedInput::Number(-3.0));
        let edited = presenter.slider(
            Label::new("Margin"),
            FieldValue::Uniform(4.0),
            64.0..=1.0,
        );
        assert_eq!(edited, Some(1.0));
    }

    #[test]
    fn disabled_widget_ignores_input() {
        let mut presenter = HeadlessPresenter::default();
        presenter.script("Pick", ScriptedInput::Choose(1));
        {
            let mut scope = presenter.disabled(true);
            assert_eq!(scope.popup(PICK, &["a", "b"], FieldValue::Divergent), None);
        }
        assert_eq!(
            presenter.row("Pick"),
            Some(&PresentedRow::Popup {
                label: "Pick".to_string(),
                choices: vec!["a".to_string(), "b".to_string()],
                selected: FieldValue::Divergent,
                enabled: false,
            })
        );
    }

    #[test]
    fn text_rendering_marks_stale_and_mixed_values() {
        let mut presenter = HeadlessPresenter::default();
        presenter.section("Normals & Tangents");
        presenter.popup(Label::new("Tangents"), &["x"], FieldValue::Uniform(None));
        presenter.toggle(Label::new("Keep Quads"), FieldValue::Divergent);
        assert_eq!(
            presenter.render_text(),
            "[Normals & Tangents]\n  Tangents: (none chosen)\n  Keep Quads: (multiple values)\n"
        );
    }
}
