use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, TextureHandle};

use crate::geometry::{MARKER_SIZE, Point};
use crate::point_file::CenterTable;

pub const MARKER_COLOR: Color32 = Color32::RED;
/// 标签相对存储点的偏移（左下角对齐到文字基线附近）
const LABEL_OFFSET: egui::Vec2 = egui::vec2(17.0, 13.0);

/// 画地图与全部标记，只负责绘制；命中判断由会话处理
pub fn paint(ui: &mut egui::Ui, map: &TextureHandle, centers: &CenterTable) -> (Rect, egui::Response) {
    let (rect, response) = ui.allocate_exact_size(map.size_vec2(), Sense::click());
    let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    let painter = ui.painter_at(rect);
    painter.image(map.id(), rect, uv, Color32::WHITE);

    let radius = MARKER_SIZE as f32 / 2.0;
    for (name, p) in centers {
        let anchor = rect.min + egui::vec2(p.x as f32, p.y as f32);
        painter.circle_filled(anchor + egui::vec2(radius, radius), radius, MARKER_COLOR);
        painter.text(anchor + LABEL_OFFSET, Align2::LEFT_BOTTOM, name, FontId::proportional(13.0), MARKER_COLOR);
    }
    (rect, response)
}

/// 屏幕坐标转地图像素坐标
pub fn to_map_point(rect: Rect, pos: Pos2) -> Point {
    let local = pos - rect.min;
    Point::new(local.x.floor() as i32, local.y.floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_to_map_floors() {
        let rect = Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(640.0, 480.0));
        assert_eq!(to_map_point(rect, egui::pos2(100.0, 50.0)), Point::new(0, 0));
        assert_eq!(to_map_point(rect, egui::pos2(112.9, 72.2)), Point::new(12, 22));
    }
}
