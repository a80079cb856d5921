use crate::surface::PixelSurface;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Write the current surface as a PNG into the user's pictures directory
/// (falling back to home). Returns the written path.
pub fn save_snapshot(surface: &PixelSurface) -> Result<PathBuf, String> {
    if surface.width() == 0 || surface.height() == 0 {
        return Err("Surface has no pixels to export".to_string());
    }

    let dir = dirs::picture_dir()
        .or_else(dirs::home_dir)
        .ok_or("Could not determine an output directory")?;

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("Clock error: {}", e))?
        .as_secs();
    let path = dir.join(format!("ripple-{}.png", stamp));

    let image = image::RgbImage::from_raw(
        surface.width() as u32,
        surface.height() as u32,
        surface.to_rgb_bytes(),
    )
    .ok_or("Surface buffer size mismatch")?;

    image
        .save(&path)
        .map_err(|e| format!("Failed to write snapshot: {}", e))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_surface_is_rejected() {
        let surface = PixelSurface::new(0, 0);
        assert!(save_snapshot(&surface).is_err());
    }
}
