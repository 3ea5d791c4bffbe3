//! Local, revocable previews of selected images.
//!
//! A [`PreviewId`] plays the part of a browser object URL: it is created when
//! a file is selected and must be revoked when the selection is replaced or
//! discarded. The UI keys its textures by id and frees them once the id is no
//! longer live.

use std::collections::HashMap;
use std::sync::Arc;

use crate::prediction::ImageFile;

/// Longest edge of a decoded preview, in pixels.
pub const MAX_PREVIEW_EDGE: u32 = 1024;

/// Handle to a live preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewId(u64);

impl PreviewId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Decoded RGBA8 pixels, downscaled to fit [`MAX_PREVIEW_EDGE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl PreviewImage {
    /// Decode `bytes`, returning `None` when they are not a supported image.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let decoded = match image::load_from_memory(bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::debug!("Preview decode failed: {err}");
                return None;
            }
        };
        let decoded = if decoded.width() > MAX_PREVIEW_EDGE || decoded.height() > MAX_PREVIEW_EDGE {
            decoded.thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE)
        } else {
            decoded
        };
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Some(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Owner of every live preview of one workflow.
#[derive(Debug, Default)]
pub struct PreviewStore {
    next_id: u64,
    live: HashMap<PreviewId, Option<Arc<PreviewImage>>>,
}

impl PreviewStore {
    /// Register a preview for `file`. Files that fail to decode still get an
    /// id, they just have no pixels.
    pub fn create(&mut self, file: &ImageFile) -> PreviewId {
        let image = PreviewImage::decode(&file.bytes);
        self.register(image)
    }

    /// Register pixels that were decoded elsewhere.
    pub fn insert(&mut self, image: PreviewImage) -> PreviewId {
        self.register(Some(image))
    }

    fn register(&mut self, image: Option<PreviewImage>) -> PreviewId {
        self.next_id += 1;
        let id = PreviewId(self.next_id);
        self.live.insert(id, image.map(Arc::new));
        id
    }

    /// Release a preview. Returns false if it was already revoked.
    pub fn revoke(&mut self, id: PreviewId) -> bool {
        self.live.remove(&id).is_some()
    }

    pub fn revoke_all(&mut self) {
        self.live.clear();
    }

    pub fn image(&self, id: PreviewId) -> Option<Arc<PreviewImage>> {
        self.live.get(&id).cloned().flatten()
    }

    pub fn is_live(&self, id: PreviewId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
