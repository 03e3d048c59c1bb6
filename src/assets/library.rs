use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::decode::{SourceImage, decode_image};
use crate::foundation::error::GodcropResult;
use crate::foundation::math::Fnv1a64;

/// Stable identifier of a loaded image, derived from its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u64);

impl ImageId {
    /// Hash a path into an id.
    pub fn for_path(path: &Path) -> Self {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(path.as_os_str().as_encoded_bytes());
        Self(h.finish())
    }
}

/// A decoded image plus the references the editor shows for it.
#[derive(Clone, Debug)]
pub struct ImageEntry {
    id: ImageId,
    path: PathBuf,
    image: SourceImage,
}

impl ImageEntry {
    /// Read and decode an image file.
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> GodcropResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
        let image = decode_image(&bytes)
            .map_err(anyhow::Error::from)
            .with_context(|| format!("decode image '{}'", path.display()))?;
        tracing::debug!(
            width = image.size().width,
            height = image.size().height,
            "image loaded"
        );
        Ok(Self::from_source(path, image))
    }

    /// Wrap an already decoded image.
    pub fn from_source(path: impl Into<PathBuf>, image: SourceImage) -> Self {
        let path = path.into();
        Self {
            id: ImageId::for_path(&path),
            path,
            image,
        }
    }

    /// Stable id.
    pub fn id(&self) -> ImageId {
        self.id
    }

    /// Preview reference: the file the image was loaded from.
    pub fn preview(&self) -> &Path {
        &self.path
    }

    /// Display name (file name component of the path).
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Decoded pixels.
    pub fn image(&self) -> &SourceImage {
        &self.image
    }
}

/// Ordered set of loaded images with at most one selected.
///
/// Adding images selects the first new entry when nothing is selected yet. Re-adding a path that
/// is already present replaces its pixels in place.
#[derive(Clone, Debug, Default)]
pub struct ImageLibrary {
    entries: Vec<ImageEntry>,
    selected: Option<ImageId>,
}

impl ImageLibrary {
    /// Empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry.
    pub fn add(&mut self, entry: ImageEntry) {
        let id = entry.id();
        match self.entries.iter_mut().find(|e| e.id() == id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        if self.selected.is_none() {
            self.selected = Some(id);
        }
    }

    /// Load every path, skipping files that fail to decode.
    ///
    /// Returns the number of images added.
    pub fn load_paths<P: AsRef<Path>>(&mut self, paths: impl IntoIterator<Item = P>) -> usize {
        let mut added = 0;
        for p in paths {
            match ImageEntry::load(p.as_ref()) {
                Ok(entry) => {
                    self.add(entry);
                    added += 1;
                }
                Err(e) => {
                    tracing::warn!(path = %p.as_ref().display(), error = %e, "skipping image")
                }
            }
        }
        added
    }

    /// Select an entry by id. Returns `false` for unknown ids.
    pub fn select(&mut self, id: ImageId) -> bool {
        if self.entries.iter().any(|e| e.id() == id) {
            self.selected = Some(id);
            true
        } else {
            false
        }
    }

    /// Currently selected entry.
    pub fn selected(&self) -> Option<&ImageEntry> {
        let id = self.selected?;
        self.entries.iter().find(|e| e.id() == id)
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Drop every entry and the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/library.rs"]
mod tests;
