use image::RgbaImage;
use std::fs;
use std::path::Path;

/// Decode any format the `image` crate understands into an RGBA raster.
pub fn load_raster(path: impl AsRef<Path>) -> Result<RgbaImage, String> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|e| format!("Failed to decode image {}: {}", path.display(), e))?;
    Ok(decoded.to_rgba8())
}

/// Encode `raster` to `path`, format chosen by extension. Parent directories are created.
pub fn save_raster(path: impl AsRef<Path>, raster: &RgbaImage) -> Result<(), String> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!("Could not create directory {}: {err}", parent.display())
            })?;
        }
    }
    raster
        .save(path)
        .map_err(|e| format!("Failed to save image {}: {}", path.display(), e))
}
