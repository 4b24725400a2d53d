use crate::geometry::Point;
use crate::point_file::PolygonTable;

/// 未命中任何多边形时的默认名称
pub const UNKNOWN_NAME: &str = "unknown";

/// 按表顺序返回第一个包含 `point` 的领地名称
pub fn find_territory_name(point: Point, polygons: &PolygonTable) -> Option<&str> {
    polygons
        .iter()
        .find(|(_, polys)| polys.iter().any(|poly| poly.contains(point)))
        .map(|(name, _)| name)
}

pub fn suggest_name(point: Point, polygons: &PolygonTable) -> String {
    find_territory_name(point, polygons).unwrap_or(UNKNOWN_NAME).to_owned()
}
