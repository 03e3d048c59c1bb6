//! Shape descriptors and the clip-path builder.
//!
//! Everything in this module is pure: the same descriptor and frame always produce the same path.

/// Shape-to-path dispatch.
pub mod builder;
/// Declarative shape descriptors.
pub mod descriptor;
/// Seeded organic loop construction.
pub mod organic;
/// Closed clip boundary type.
pub mod path;
/// Defensive SVG path-data parsing.
pub mod path_data;
