use serde::{Deserialize, Serialize};

/// Aspect ratio value meaning "use the source image's native ratio".
pub const FREE_ASPECT_RATIO: f64 = 0.0;

/// Grouping shown in the ratio picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectCategory {
    /// Common photo and social formats.
    Standard,
    /// Film formats.
    Cinema,
    /// Paper formats.
    Print,
    /// Everything else.
    Advanced,
}

impl AspectCategory {
    /// Every category in display order.
    pub const ALL: [AspectCategory; 4] = [
        AspectCategory::Standard,
        AspectCategory::Cinema,
        AspectCategory::Print,
        AspectCategory::Advanced,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            AspectCategory::Standard => "Standard",
            AspectCategory::Cinema => "Cinema",
            AspectCategory::Print => "Print",
            AspectCategory::Advanced => "Advanced",
        }
    }
}

/// A named `width / height` ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AspectRatioPreset {
    /// Display label.
    pub label: &'static str,
    /// `width / height`; [`FREE_ASPECT_RATIO`] for "Free".
    pub value: f64,
    /// Picker group.
    pub category: AspectCategory,
}

const fn preset(label: &'static str, value: f64, category: AspectCategory) -> AspectRatioPreset {
    AspectRatioPreset {
        label,
        value,
        category,
    }
}

static ASPECT_PRESETS: [AspectRatioPreset; 14] = [
    preset("Free", FREE_ASPECT_RATIO, AspectCategory::Standard),
    preset("1:1", 1.0, AspectCategory::Standard),
    preset("4:5", 4.0 / 5.0, AspectCategory::Standard),
    preset("16:9", 16.0 / 9.0, AspectCategory::Standard),
    preset("9:16", 9.0 / 16.0, AspectCategory::Standard),
    preset("3:2", 3.0 / 2.0, AspectCategory::Standard),
    preset("4:3", 4.0 / 3.0, AspectCategory::Standard),
    preset("21:9", 21.0 / 9.0, AspectCategory::Cinema),
    preset("2.39:1", 2.39, AspectCategory::Cinema),
    preset("1.85:1", 1.85, AspectCategory::Cinema),
    preset("A-Series", std::f64::consts::FRAC_1_SQRT_2, AspectCategory::Print),
    preset("8:10", 8.0 / 10.0, AspectCategory::Print),
    preset("Golden", 1.618, AspectCategory::Advanced),
    preset("Panorama", 3.0, AspectCategory::Advanced),
];

/// Every preset in display order.
pub fn aspect_presets() -> &'static [AspectRatioPreset] {
    &ASPECT_PRESETS
}

/// Presets belonging to `category`, in display order.
pub fn presets_in(category: AspectCategory) -> impl Iterator<Item = &'static AspectRatioPreset> {
    ASPECT_PRESETS.iter().filter(move |p| p.category == category)
}

/// Look up a preset by label (case-insensitive).
pub fn find_aspect(label: &str) -> Option<&'static AspectRatioPreset> {
    ASPECT_PRESETS
        .iter()
        .find(|p| p.label.eq_ignore_ascii_case(label.trim()))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/presets.rs"]
mod tests;
