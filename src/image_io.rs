use std::path::Path;

use image::RgbaImage;

use crate::error::{PickerError, Result};

/// 地图选择对话框允许的扩展名
pub const MAP_EXTENSIONS: &[&str] = &["gif", "png", "jpg", "jpeg"];

/// 从磁盘加载地图图片为 RGBA8
/// - png/jpg/jpeg：直接解码
/// - gif：只取首帧，按帧偏移贴到逻辑画布上
pub fn load_map_image(path: &Path) -> Result<RgbaImage> {
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("").to_ascii_lowercase();
    let fail = |reason: String| PickerError::Image { path: path.to_path_buf(), reason };
    match ext.as_str() {
        "png" | "jpg" | "jpeg" => {
            let img = image::open(path).map_err(|e| fail(e.to_string()))?;
            Ok(img.to_rgba8())
        }
        "gif" => {
            let file = std::fs::File::open(path).map_err(|e| PickerError::io(path, e))?;
            let mut options = gif::DecodeOptions::new();
            options.set_color_output(gif::ColorOutput::RGBA);
            let mut decoder = options.read_info(file).map_err(|e| fail(e.to_string()))?;
            let (w, h) = (decoder.width() as u32, decoder.height() as u32);
            let frame = decoder.read_next_frame().map_err(|e| fail(e.to_string()))?
                .ok_or_else(|| fail("GIF has no frames".into()))?;
            let tile = RgbaImage::from_raw(frame.width as u32, frame.height as u32, frame.buffer.to_vec())
                .ok_or_else(|| fail("GIF frame decode failed".into()))?;
            let mut canvas = RgbaImage::new(w, h);
            image::imageops::overlay(&mut canvas, &tile, frame.left as i64, frame.top as i64);
            Ok(canvas)
        }
        _ => Err(fail(format!("unsupported image extension {:?}", ext))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_png_with_its_extent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        RgbaImage::from_pixel(7, 3, image::Rgba([1, 2, 3, 255])).save(&path).unwrap();
        let img = load_map_image(&path).unwrap();
        assert_eq!(img.dimensions(), (7, 3));
    }

    #[test]
    fn rejects_unknown_extension_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_map_image(&dir.path().join("map.bmp")), Err(PickerError::Image { .. })));
        assert!(load_map_image(&dir.path().join("missing.png")).is_err());
        assert!(load_map_image(&dir.path().join("missing.gif")).is_err());
    }
}
