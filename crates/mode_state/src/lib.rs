//! Widget-state transitions for the try-on / try-off page.
//!
//! Every handler is a pure function of the widget values the page sends with
//! the event. Handlers answer with partial updates; fields the handler does
//! not own come back as [`WidgetUpdate::Unchanged`].

use serde::{Deserialize, Serialize};
use shared::{
    domain::{ImageRef, Mode, ModelImage, StyleClass},
    protocol::{
        CorrectionUpdate, DemoEvent, GarmentInputUpdate, ModeUpdate, SubmitButtonUpdate,
        ToggleUpdate, TryOffPreset, TryOnPreset, WidgetUpdate,
    },
};
use tracing::debug;

pub fn on_toggle_changed(toggle: bool) -> ModeUpdate {
    let mode = Mode::from_toggle(toggle);
    debug!(?mode, "toggle changed");

    let garment_input = match mode {
        // Hidden garments are dropped so a stale image never reaches a try-off run.
        Mode::TryOff => GarmentInputUpdate {
            value: WidgetUpdate::Set(None),
            interactive: WidgetUpdate::Set(false),
            style: WidgetUpdate::Set(StyleClass::Disabled),
        },
        Mode::TryOn => GarmentInputUpdate {
            value: WidgetUpdate::Unchanged,
            interactive: WidgetUpdate::Set(true),
            style: WidgetUpdate::Set(StyleClass::Enabled),
        },
    };

    ModeUpdate {
        garment_input,
        toggle: toggle_update(mode),
        submit_button: submit_update(mode),
    }
}

pub fn on_garment_input_changed(
    garment: Option<&ImageRef>,
    model: Option<&ModelImage>,
    toggle: bool,
) -> CorrectionUpdate {
    if garment.is_some() && model.is_some() && toggle {
        debug!("garment added in try-off mode with a model present; switching to try-on");
        return correction(Mode::TryOn);
    }
    CorrectionUpdate::unchanged()
}

pub fn on_model_input_changed(
    model: Option<&ModelImage>,
    garment: Option<&ImageRef>,
    toggle: bool,
) -> CorrectionUpdate {
    match (model.is_some(), garment.is_some(), toggle) {
        (true, true, true) => {
            debug!("model set with a garment in try-off mode; switching to try-on");
            correction(Mode::TryOn)
        }
        (true, false, false) => {
            debug!("model set without a garment in try-on mode; switching to try-off");
            correction(Mode::TryOff)
        }
        // A model cleared while in try-off stays in try-off.
        _ => CorrectionUpdate::unchanged(),
    }
}

/// The preset images only populate the page widgets; the mode is forced.
pub fn select_try_on_preset(preset: &TryOnPreset) -> ModeUpdate {
    debug!(garment = preset.garment.as_str(), model = preset.model.as_str(), "try-on preset");
    on_toggle_changed(false)
}

pub fn select_try_off_preset(preset: &TryOffPreset) -> ModeUpdate {
    debug!(model = preset.model.as_str(), "try-off preset");
    on_toggle_changed(true)
}

fn toggle_update(mode: Mode) -> ToggleUpdate {
    ToggleUpdate {
        value: WidgetUpdate::Set(mode.toggle_value()),
        label: WidgetUpdate::Set(mode.toggle_label().to_string()),
    }
}

fn submit_update(mode: Mode) -> SubmitButtonUpdate {
    SubmitButtonUpdate {
        label: WidgetUpdate::Set(mode.submit_label().to_string()),
    }
}

fn correction(mode: Mode) -> CorrectionUpdate {
    CorrectionUpdate {
        toggle: toggle_update(mode),
        submit_button: submit_update(mode),
    }
}

/// Full snapshot of the widgets a page holds, used to replay event logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoState {
    pub model: Option<ModelImage>,
    pub garment: Option<ImageRef>,
    pub garment_interactive: bool,
    pub garment_style: StyleClass,
    pub output: Option<ImageRef>,
    pub toggle: bool,
    pub toggle_label: String,
    pub submit_label: String,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            model: None,
            garment: None,
            garment_interactive: true,
            garment_style: StyleClass::Enabled,
            output: None,
            toggle: false,
            toggle_label: Mode::TryOn.toggle_label().to_string(),
            submit_label: Mode::TryOn.submit_label().to_string(),
        }
    }
}

impl DemoState {
    pub fn mode(&self) -> Mode {
        Mode::from_toggle(self.toggle)
    }

    pub fn apply_mode(&mut self, update: ModeUpdate) {
        let ModeUpdate {
            garment_input,
            toggle,
            submit_button,
        } = update;
        garment_input.value.apply_to(&mut self.garment);
        garment_input.interactive.apply_to(&mut self.garment_interactive);
        garment_input.style.apply_to(&mut self.garment_style);
        self.apply_toggle(toggle);
        submit_button.label.apply_to(&mut self.submit_label);
    }

    /// Folds a correction in. A correction that flips the toggle value fires
    /// the toggle handler as well, the same way the page reacts to a
    /// programmatic toggle change.
    pub fn apply_correction(&mut self, update: CorrectionUpdate) {
        let before = self.toggle;
        self.apply_toggle(update.toggle);
        update.submit_button.label.apply_to(&mut self.submit_label);
        if self.toggle != before {
            self.apply_mode(on_toggle_changed(self.toggle));
        }
    }

    pub fn apply_event(&mut self, event: DemoEvent) {
        match event {
            DemoEvent::ToggleChanged(req) => {
                self.toggle = req.value;
                self.apply_mode(on_toggle_changed(req.value));
            }
            DemoEvent::GarmentChanged(req) => {
                self.garment = req.garment;
                self.model = req.model;
                self.toggle = req.toggle;
                let update = on_garment_input_changed(
                    self.garment.as_ref(),
                    self.model.as_ref(),
                    self.toggle,
                );
                self.apply_correction(update);
            }
            DemoEvent::ModelChanged(req) => {
                self.model = req.model;
                self.garment = req.garment;
                self.toggle = req.toggle;
                let update =
                    on_model_input_changed(self.model.as_ref(), self.garment.as_ref(), self.toggle);
                self.apply_correction(update);
            }
            DemoEvent::TryOnPreset(preset) => {
                self.garment = Some(preset.garment.clone());
                self.model = Some(ModelImage::new(preset.model.clone()));
                self.output = Some(preset.output.clone());
                self.apply_mode(select_try_on_preset(&preset));
            }
            DemoEvent::TryOffPreset(preset) => {
                self.model = Some(ModelImage::new(preset.model.clone()));
                self.output = Some(preset.output.clone());
                self.apply_mode(select_try_off_preset(&preset));
            }
        }
    }

    fn apply_toggle(&mut self, update: ToggleUpdate) {
        update.value.apply_to(&mut self.toggle);
        update.label.apply_to(&mut self.toggle_label);
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
