//! 启动阶段：选择地图、可选加载多边形。窗口出现之前完成，失败即终止。

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{error, info};

use crate::config::Config;
use crate::error::Result;
use crate::image_io;
use crate::point_file::{self, PolygonTable};

pub const POLYGONS_FILE: &str = "polygons.txt";

pub struct Startup {
    pub map_path: PathBuf,
    pub image: RgbaImage,
    pub polygons: PolygonTable,
    pub map_folder: Option<PathBuf>,
}

/// `Ok(None)`：操作者没有选择地图
pub fn run(config: &Config) -> Result<Option<Startup>> {
    info!("Select the map");
    let Some(map_path) = pick_file("Select The Map", config.map_folder.as_deref(), "Map", image_io::MAP_EXTENSIONS)
    else { return Ok(None) };
    info!(map = %map_path.display(), "map selected");

    let map_folder = config.map_folder.clone().or_else(|| map_path.parent().map(Path::to_path_buf));
    let polygons = choose_polygons(&map_path, map_folder.as_deref())?;
    let image = image_io::load_map_image(&map_path)?;
    Ok(Some(Startup { map_path, image, polygons, map_folder }))
}

fn choose_polygons(map_path: &Path, map_folder: Option<&Path>) -> Result<PolygonTable> {
    let found = find_polygons_file(map_path, map_folder);
    let use_found = found.as_ref().is_some_and(|_| {
        let answer = MessageDialog::new()
            .set_title("File Suggestion")
            .set_description(
                "A polygons.txt file was found in the map's folder, \
                 do you want to use the file to supply the territories names?",
            )
            .set_level(MessageLevel::Info)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(answer, MessageDialogResult::Yes)
    });
    let path = match found {
        Some(p) if use_found => Some(p),
        _ => pick_file("Select A Polygon File", map_folder, "Text", &["txt"]),
    };
    let Some(path) = path else { return Ok(PolygonTable::default()) };

    match point_file::read_one_to_many_polygons(&path) {
        Ok(table) => {
            info!(path = %path.display(), territories = table.len(), "polygons loaded");
            Ok(table)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Something wrong with your polygons file");
            Err(e)
        }
    }
}

/// 先在地图图片所在目录找，再到地图目录找
pub fn find_polygons_file(map_path: &Path, map_folder: Option<&Path>) -> Option<PathBuf> {
    map_path
        .parent()
        .into_iter()
        .chain(map_folder)
        .map(|dir| dir.join(POLYGONS_FILE))
        .find(|p| p.is_file())
}

pub fn pick_file(title: &str, dir: Option<&Path>, filter: &str, extensions: &[&str]) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title(title).add_filter(filter, extensions);
    if let Some(dir) = dir { dialog = dialog.set_directory(dir); }
    dialog.pick_file()
}

pub fn save_file(title: &str, dir: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new().set_title(title).set_file_name(file_name);
    if let Some(dir) = dir { dialog = dialog.set_directory(dir); }
    dialog.save_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_next_to_image_win() {
        let maps = tempfile::tempdir().unwrap();
        let folder = tempfile::tempdir().unwrap();
        let map = maps.path().join("map.png");
        std::fs::write(maps.path().join(POLYGONS_FILE), "").unwrap();
        std::fs::write(folder.path().join(POLYGONS_FILE), "").unwrap();
        assert_eq!(find_polygons_file(&map, Some(folder.path())), Some(maps.path().join(POLYGONS_FILE)));
    }

    #[test]
    fn falls_back_to_map_folder() {
        let maps = tempfile::tempdir().unwrap();
        let folder = tempfile::tempdir().unwrap();
        let map = maps.path().join("map.png");
        assert_eq!(find_polygons_file(&map, Some(folder.path())), None);
        std::fs::write(folder.path().join(POLYGONS_FILE), "").unwrap();
        assert_eq!(find_polygons_file(&map, Some(folder.path())), Some(folder.path().join(POLYGONS_FILE)));
    }
}
