use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{GarmentCondition, ImageRef, Mode, ModelImage, StyleClass};

/// Per-field result of an event handler. `Unchanged` leaves whatever the page
/// currently shows; `Set` replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum WidgetUpdate<T> {
    Unchanged,
    Set(T),
}

impl<T> Default for WidgetUpdate<T> {
    fn default() -> Self {
        WidgetUpdate::Unchanged
    }
}

impl<T> WidgetUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, WidgetUpdate::Unchanged)
    }

    pub fn apply_to(self, target: &mut T) {
        if let WidgetUpdate::Set(value) = self {
            *target = value;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarmentInputUpdate {
    pub value: WidgetUpdate<Option<ImageRef>>,
    pub interactive: WidgetUpdate<bool>,
    pub style: WidgetUpdate<StyleClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleUpdate {
    pub value: WidgetUpdate<bool>,
    pub label: WidgetUpdate<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButtonUpdate {
    pub label: WidgetUpdate<String>,
}

/// Returned by the toggle handler and both preset handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeUpdate {
    pub garment_input: GarmentInputUpdate,
    pub toggle: ToggleUpdate,
    pub submit_button: SubmitButtonUpdate,
}

/// Returned by the image-change handlers, which never touch the garment widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionUpdate {
    pub toggle: ToggleUpdate,
    pub submit_button: SubmitButtonUpdate,
}

impl CorrectionUpdate {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn is_unchanged(&self) -> bool {
        self.toggle.value.is_unchanged()
            && self.toggle.label.is_unchanged()
            && self.submit_button.label.is_unchanged()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleChangedRequest {
    pub value: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentChangedRequest {
    #[serde(default)]
    pub garment: Option<ImageRef>,
    #[serde(default)]
    pub model: Option<ModelImage>,
    pub toggle: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelChangedRequest {
    #[serde(default)]
    pub model: Option<ModelImage>,
    #[serde(default)]
    pub garment: Option<ImageRef>,
    pub toggle: bool,
}

/// Event log entry, as replayed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DemoEvent {
    ToggleChanged(ToggleChangedRequest),
    GarmentChanged(GarmentChangedRequest),
    ModelChanged(ModelChangedRequest),
    TryOnPreset(TryOnPreset),
    TryOffPreset(TryOffPreset),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnPreset {
    pub garment: ImageRef,
    pub model: ImageRef,
    pub output: ImageRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOffPreset {
    pub model: ImageRef,
    pub output: ImageRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetSelection<P> {
    pub preset: P,
    pub update: ModeUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub model: Option<ModelImage>,
    #[serde(default)]
    pub garment: Option<ImageRef>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub condition: GarmentCondition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub request_id: Uuid,
    pub output: ImageRef,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepCaptions {
    pub mode: String,
    pub condition: String,
    pub model: String,
    pub garment: String,
    pub run: String,
}

/// Static description of the page. Nothing here is computed per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoLayout {
    pub title: String,
    pub steps: StepCaptions,
    pub conditions: Vec<GarmentCondition>,
    pub default_condition: GarmentCondition,
    pub initial_toggle_label: String,
    pub initial_submit_label: String,
    /// Class the page puts on the garment widget while its style is `disabled`.
    pub disabled_class: String,
    pub model_examples: Vec<ImageRef>,
    pub garment_examples: Vec<ImageRef>,
    pub try_on_presets: Vec<TryOnPreset>,
    pub try_off_presets: Vec<TryOffPreset>,
    pub css: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widget_update_wire_shape_is_tagged() {
        let unchanged = serde_json::to_value(WidgetUpdate::<bool>::Unchanged).expect("json");
        assert_eq!(unchanged, serde_json::json!({ "op": "unchanged" }));

        let cleared = serde_json::to_value(WidgetUpdate::<Option<ImageRef>>::Set(None))
            .expect("json");
        assert_eq!(cleared, serde_json::json!({ "op": "set", "value": null }));
    }

    #[test]
    fn apply_to_keeps_value_when_unchanged() {
        let mut label = "Try-on".to_string();
        WidgetUpdate::Unchanged.apply_to(&mut label);
        assert_eq!(label, "Try-on");
        WidgetUpdate::Set("Try-off".to_string()).apply_to(&mut label);
        assert_eq!(label, "Try-off");
    }

    #[test]
    fn submit_request_defaults_mode_and_condition() {
        let req: SubmitRequest =
            serde_json::from_str(r#"{ "model": { "background": "lebron.png" } }"#).expect("json");
        assert_eq!(req.mode, Mode::TryOn);
        assert_eq!(req.condition, GarmentCondition::Upper);
        assert!(req.garment.is_none());
    }
}
