use std::collections::HashMap;

use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};

use crate::workflow::{PreviewId, PreviewStore};

/// GPU textures for live previews, keyed by preview id.
#[derive(Default)]
pub(super) struct PreviewTextures {
    handles: HashMap<PreviewId, TextureHandle>,
}

impl PreviewTextures {
    /// Texture for `id`, uploading it on first use. `None` when the preview
    /// was revoked or has no pixels.
    pub(super) fn texture(
        &mut self,
        ctx: &egui::Context,
        previews: &PreviewStore,
        id: PreviewId,
    ) -> Option<TextureHandle> {
        self.retain_live(previews);
        if let Some(handle) = self.handles.get(&id) {
            return Some(handle.clone());
        }
        let image = previews.image(id)?;
        let pixels = ColorImage::from_rgba_unmultiplied(
            [image.width as usize, image.height as usize],
            &image.rgba,
        );
        let handle = ctx.load_texture(
            format!("preview_{}", id.get()),
            pixels,
            TextureOptions::LINEAR,
        );
        self.handles.insert(id, handle.clone());
        Some(handle)
    }

    /// Drop textures whose preview has been revoked.
    pub(super) fn retain_live(&mut self, previews: &PreviewStore) {
        self.handles.retain(|id, _| previews.is_live(*id));
    }

    pub(super) fn clear(&mut self) {
        self.handles.clear();
    }
}
