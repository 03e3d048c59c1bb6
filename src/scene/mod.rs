//! Editor-facing model: aspect presets and crop state.

/// Named aspect ratios.
pub mod presets;
/// Crop state, shape presets and their mapping to shape descriptors.
pub mod state;
