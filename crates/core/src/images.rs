//! Image key resolution with a fallback for unknown keys.

use std::collections::BTreeMap;

/// Renderable stand-in for a picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub key: String,
    /// Short label for text-only renderers.
    pub label: String,
    pub glyph: char,
}

pub trait ImageResolver {
    /// Never fails: unknown or empty keys resolve to the fallback image.
    fn resolve(&self, key: &str) -> &ImageSource;
}

#[derive(Debug, Clone)]
pub struct ImageCatalog {
    entries: BTreeMap<String, ImageSource>,
    fallback: ImageSource,
}

impl ImageCatalog {
    pub fn new(fallback: ImageSource) -> Self {
        Self {
            entries: BTreeMap::new(),
            fallback,
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>, glyph: char) {
        let key = key.into();
        self.entries.insert(
            key.clone(),
            ImageSource {
                key,
                label: label.into(),
                glyph,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fallback(&self) -> &ImageSource {
        &self.fallback
    }
}

impl Default for ImageCatalog {
    fn default() -> Self {
        Self::new(ImageSource {
            key: String::new(),
            label: String::from("?"),
            glyph: '▣',
        })
    }
}

impl ImageResolver for ImageCatalog {
    fn resolve(&self, key: &str) -> &ImageSource {
        if key.is_empty() {
            return &self.fallback;
        }
        self.entries.get(key).unwrap_or(&self.fallback)
    }
}
