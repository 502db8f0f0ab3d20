use shared::{
    domain::{GarmentCondition, ImageRef, Mode, DISABLED_IMAGE_CLASS},
    protocol::{DemoLayout, StepCaptions, TryOffPreset, TryOnPreset},
};

use crate::config::Settings;

pub const EXAMPLES_ROUTE: &str = "/examples";

const DEMO_CSS: &str = include_str!("../assets/demo.css");

pub const INDEX_HTML: &str = include_str!("../assets/index.html");

const MODEL_EXAMPLES: &[&str] = &["lebron.png"];
const GARMENT_EXAMPLES: &[&str] = &["warriors23.jpg"];

const TRY_ON_PRESETS: &[(&str, &str, &str)] = &[
    ("warriors23.jpg", "lebron.png", "ronaldo.webp"),
    ("warriors23.jpg", "lebron.png", "ronaldo.webp"),
];

const TRY_OFF_PRESETS: &[(&str, &str)] = &[
    ("lebron.png", "lebron.png"),
    ("ronaldo.webp", "lebron.png"),
    ("Caesar-Ronaldo.webp", "lebron.png"),
];

fn example(file: &str) -> ImageRef {
    ImageRef::new(format!("{EXAMPLES_ROUTE}/{file}"))
}

pub fn build_layout(settings: &Settings) -> DemoLayout {
    DemoLayout {
        title: settings.title.clone(),
        steps: StepCaptions {
            mode: "Step 1: Select try-on or try-off mode.".into(),
            condition: "Step 2: Select the garment type you are using.".into(),
            model: "Step 3: Upload model image".into(),
            garment: "Step 4: Upload garment image".into(),
            run: "Step 5: Click the button below to run the model".into(),
        },
        conditions: GarmentCondition::ALL.to_vec(),
        default_condition: GarmentCondition::default(),
        initial_toggle_label: Mode::TryOn.toggle_label().into(),
        initial_submit_label: Mode::TryOn.submit_label().into(),
        disabled_class: DISABLED_IMAGE_CLASS.into(),
        model_examples: MODEL_EXAMPLES.iter().copied().map(example).collect(),
        garment_examples: GARMENT_EXAMPLES.iter().copied().map(example).collect(),
        try_on_presets: TRY_ON_PRESETS
            .iter()
            .map(|(garment, model, output)| TryOnPreset {
                garment: example(garment),
                model: example(model),
                output: example(output),
            })
            .collect(),
        try_off_presets: TRY_OFF_PRESETS
            .iter()
            .map(|(model, output)| TryOffPreset {
                model: example(model),
                output: example(output),
            })
            .collect(),
        css: DEMO_CSS.to_string(),
    }
}
