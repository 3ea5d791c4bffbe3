//! Getting image files into the workflow: window drops and the file picker.

use std::path::Path;

use eframe::egui;
use rfd::FileDialog;

use super::Session;
use crate::prediction::{ImageFile, media_type_for_path};

/// Extensions offered by the picker dialog.
const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

impl Session {
    /// Track hovering files and hand the first dropped file to the workflow.
    /// Drops only count while the upload card is on screen: on the Analyze
    /// page with no result showing.
    pub(super) fn handle_file_drops(&mut self, ctx: &egui::Context) {
        let Some(workflow) = self
            .workflow
            .as_mut()
            .filter(|workflow| workflow.result().is_none())
        else {
            self.drop_hovered = false;
            return;
        };
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().cloned(),
            )
        });
        self.drop_hovered = hovering;
        let Some(dropped) = dropped else {
            return;
        };
        let media_type = dropped_media_type(&dropped);
        let name = dropped_name(&dropped);
        if !media_type.starts_with("image/") {
            // Rejected before touching the file contents.
            let _ = workflow.drop_file(ImageFile::new(name, media_type, Vec::new()));
            return;
        }
        match dropped_bytes(&dropped) {
            Ok(bytes) => {
                let _ = workflow.drop_file(ImageFile::new(name, media_type, bytes));
            }
            Err(err) => workflow.reject_unreadable(&name, &err),
        }
    }

    /// Open the picker and select whatever the user chose.
    pub(super) fn pick_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .set_title("Choose a food photo")
            .add_filter("Images", PICKER_EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        let Some(workflow) = self.workflow.as_mut() else {
            return;
        };
        match ImageFile::from_path(&path) {
            Ok(file) => workflow.select_file(file),
            Err(err) => workflow.reject_unreadable(&display_name(&path), &err),
        }
    }
}

fn dropped_name(file: &egui::DroppedFile) -> String {
    if !file.name.is_empty() {
        return file.name.clone();
    }
    file.path
        .as_deref()
        .map(display_name)
        .unwrap_or_else(|| "dropped file".to_string())
}

/// Declared media type, falling back to a guess from the file extension.
fn dropped_media_type(file: &egui::DroppedFile) -> String {
    if !file.mime.trim().is_empty() {
        return file.mime.trim().to_string();
    }
    let guessed = match file.path.as_deref() {
        Some(path) => media_type_for_path(path),
        None => media_type_for_path(Path::new(&file.name)),
    };
    guessed.to_string()
}

fn dropped_bytes(file: &egui::DroppedFile) -> std::io::Result<std::sync::Arc<[u8]>> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.clone());
    }
    match &file.path {
        Some(path) => std::fs::read(path).map(Into::into),
        None => Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "dropped file has neither contents nor a path",
        )),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
