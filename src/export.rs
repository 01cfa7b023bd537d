use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

use crate::command::Command;
use crate::config::SketchConfig;
use crate::error::SketchError;
use crate::renderer;
use crate::surface::{GlyphSet, RasterSurface, Surface};

/// Errors that can occur while exporting the drawing
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create export surface: {0}")]
    Surface(Box<SketchError>),

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Browser download failed: {0}")]
    Download(String),
}

impl From<SketchError> for ExportError {
    fn from(error: SketchError) -> Self {
        ExportError::Surface(Box::new(error))
    }
}

/// Render `commands` at `scale` times the canvas size. No cursor preview is drawn.
pub fn render_scaled(
    commands: &[Command],
    config: &SketchConfig,
    glyphs: &GlyphSet,
    scale: u32,
) -> Result<RgbaImage, ExportError> {
    let width = config.canvas_width.saturating_mul(scale);
    let height = config.canvas_height.saturating_mul(scale);
    let mut surface = RasterSurface::new(width, height, config.background_color(), glyphs.clone())?;
    surface.scale(scale as f32);
    renderer::render(&mut surface, commands, None);
    Ok(surface.into_image())
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Render at the configured export scale and encode as PNG
pub fn export_png(
    commands: &[Command],
    config: &SketchConfig,
    glyphs: &GlyphSet,
) -> Result<Vec<u8>, ExportError> {
    let image = render_scaled(commands, config, glyphs, config.export_scale)?;
    log::debug!("Rendered export at {}x{}", image.width(), image.height());
    encode_png(&image)
}

/// Write the PNG into the export directory. Returns where it went.
#[cfg(not(target_arch = "wasm32"))]
pub fn deliver_png(png_data: &[u8], config: &SketchConfig) -> Result<String, ExportError> {
    std::fs::create_dir_all(&config.export_dir)?;
    let path = config.export_dir.join(&config.export_file_name);
    std::fs::write(&path, png_data)?;
    log::info!("Exported PNG to: {}", path.display());
    Ok(path.display().to_string())
}

/// Hand the PNG to the browser as a download. Returns the file name.
#[cfg(target_arch = "wasm32")]
pub fn deliver_png(png_data: &[u8], config: &SketchConfig) -> Result<String, ExportError> {
    web::download_binary_file(&config.export_file_name, png_data, "image/png")?;
    log::info!("Downloaded {}", config.export_file_name);
    Ok(config.export_file_name.clone())
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast as _;

    use super::ExportError;

    fn js_error(context: &str) -> impl Fn(wasm_bindgen::JsValue) -> ExportError + '_ {
        move |err| ExportError::Download(format!("{context}: {err:?}"))
    }

    pub fn download_binary_file(filename: &str, data: &[u8], mime_type: &str) -> Result<(), ExportError> {
        let window = web_sys::window().ok_or_else(|| ExportError::Download("No window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| ExportError::Download("No document".to_owned()))?;

        // Create Uint8Array from data
        let uint8_array = js_sys::Uint8Array::from(data);
        let blob_parts = js_sys::Array::new();
        blob_parts.push(&uint8_array);

        let options = web_sys::BlobPropertyBag::new();
        options.set_type(mime_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)
            .map_err(js_error("Failed to create blob"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(js_error("Failed to create URL"))?;

        // Create and click download link
        let anchor = document
            .create_element("a")
            .map_err(js_error("Failed to create element"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| ExportError::Download("Failed to cast to anchor".to_owned()))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).ok();
        Ok(())
    }
}
