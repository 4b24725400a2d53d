/// 地图图片坐标系下的整数点（原点在左上角）
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

/// 有序顶点序列，首尾隐式闭合
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self { Self { points } }

    /// 点是否在多边形内：奇偶射线法，落在边或顶点上也算在内
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        if n == 0 { return false; }
        if n == 1 { return self.points[0] == p; }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[j];
            let b = self.points[i];
            if on_segment(a, b, p) { return true; }
            // 只统计跨越 p.y 水平线的边（半开区间，避免顶点重复计数）
            if (a.y > p.y) != (b.y > p.y) {
                let (ax, ay, bx, by) = (a.x as i128, a.y as i128, b.x as i128, b.y as i128);
                let (px, py) = (p.x as i128, p.y as i128);
                // 交点 x > px  <=>  (bx-ax)*(py-ay) / (by-ay) + ax > px，按 by-ay 的符号整理避免除法
                let lhs = (bx - ax) * (py - ay);
                let rhs = (px - ax) * (by - ay);
                let crosses = if by > ay { lhs > rhs } else { lhs < rhs };
                if crosses { inside = !inside; }
            }
            j = i;
        }
        inside
    }
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    // 坐标差可达 2^32，叉积需要 i128
    let (ax, ay, bx, by) = (a.x as i128, a.y as i128, b.x as i128, b.y as i128);
    let (px, py) = (p.x as i128, p.y as i128);
    let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    if cross != 0 { return false; }
    px >= ax.min(bx) && px <= ax.max(bx) && py >= ay.min(by) && py <= ay.max(by)
}

/// 标记点的命中框边长，同时也是画布上圆点的直径
pub const MARKER_SIZE: i32 = 15;

/// 以存储点为左上角的 MARKER_SIZE × MARKER_SIZE 命中框（半开区间）
pub fn hit_box_contains(anchor: Point, click: Point) -> bool {
    let dx = click.x as i64 - anchor.x as i64;
    let dy = click.y as i64 - anchor.y as i64;
    (0..MARKER_SIZE as i64).contains(&dx) && (0..MARKER_SIZE as i64).contains(&dy)
}

/// 点击处到命中框中心的距离平方（乘 4 以保持整数运算）
pub fn distance_to_box_center_sq4(anchor: Point, click: Point) -> i64 {
    let cx2 = 2 * anchor.x as i64 + MARKER_SIZE as i64;
    let cy2 = 2 * anchor.y as i64 + MARKER_SIZE as i64;
    let dx = 2 * click.x as i64 - cx2;
    let dy = 2 * click.y as i64 - cy2;
    dx * dx + dy * dy
}
