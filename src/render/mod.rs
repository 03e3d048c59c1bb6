//! Compositing: cover fit, clip, edge stroke and watermark.

/// CPU compositor backed by `vello_cpu`.
pub mod cpu;
/// Cover-fit placement of a source image inside a frame.
pub mod fit;
/// Watermark model and text shaping.
pub mod watermark;
