use iced::widget::image::Handle;
use std::path::PathBuf;

/// The one active image selection. Replacing the selection drops the old
/// value, which releases its preview handle along with the bytes.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub preview: Handle,
}

pub fn load_image(path: PathBuf) -> Result<SelectedImage, String> {
    log::info!("Loading image file: {}", path.display());
    let bytes = std::fs::read(&path).map_err(|err| {
        let message = format!("{}: failed to read image file ({err})", path.display());
        log::error!("{message}");
        message
    })?;

    // Decode eagerly so an unreadable file is rejected at selection time
    // instead of surfacing later as a blank preview.
    image::load_from_memory(&bytes).map_err(|err| {
        let message = format!("{}: not a readable image ({err})", path.display());
        log::error!("{message}");
        message
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let preview = Handle::from_bytes(bytes.clone());

    Ok(SelectedImage {
        file_name,
        bytes,
        preview,
    })
}
