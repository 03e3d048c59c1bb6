//! Source image acquisition.

/// Decoding encoded bytes into premultiplied sources.
pub mod decode;
/// Loaded images with stable ids and preview references.
pub mod library;
