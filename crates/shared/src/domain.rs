use serde::{Deserialize, Serialize};

pub const TRY_ON_LABEL: &str = "Try-on";
pub const TRY_OFF_LABEL: &str = "Try-off";
pub const RUN_TRY_ON_LABEL: &str = "Run Try-on";
pub const RUN_TRY_OFF_LABEL: &str = "Run Try-off";

/// CSS class the page applies to the garment input while it is disabled.
pub const DISABLED_IMAGE_CLASS: &str = "disabled-image";

/// Which operation the demo runs. The toggle widget carries this as a bool,
/// `true` meaning try-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    TryOn,
    TryOff,
}

impl Mode {
    pub fn from_toggle(toggle: bool) -> Self {
        if toggle {
            Mode::TryOff
        } else {
            Mode::TryOn
        }
    }

    pub fn toggle_value(self) -> bool {
        self == Mode::TryOff
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Mode::TryOn => TRY_ON_LABEL,
            Mode::TryOff => TRY_OFF_LABEL,
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Mode::TryOn => RUN_TRY_ON_LABEL,
            Mode::TryOff => RUN_TRY_OFF_LABEL,
        }
    }
}

/// Clothing region the model should modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentCondition {
    #[default]
    Upper,
    Lower,
    Full,
}

impl GarmentCondition {
    pub const ALL: [GarmentCondition; 3] = [
        GarmentCondition::Upper,
        GarmentCondition::Lower,
        GarmentCondition::Full,
    ];
}

/// Opaque reference to an image: an example path, a URL or a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Value of the model image editor: the uploaded picture plus any mask
/// layers drawn on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelImage {
    pub background: ImageRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<ImageRef>,
}

impl ModelImage {
    pub fn new(background: impl Into<ImageRef>) -> Self {
        Self {
            background: background.into(),
            layers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleClass {
    #[default]
    Enabled,
    Disabled,
}
