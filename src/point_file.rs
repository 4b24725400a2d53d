//! 点文件读写：`centers.txt`（一名一点）与 `polygons.txt`（一名多多边形）
//!
//! 每行一条记录：
//! - 一对一：`Paris  (10,20)`
//! - 一对多：`France  <  (0,0) (10,0) (10,10)  >  <  (20,20) (30,20) (30,30)  >`
//!
//! 一对一记录的点取最后一个 `(` 起的部分，名称可以含空格和括号，如 `Sea Zone (North)  (10,20)`；
//! 一对多记录的名称为首个 `<` 之前的全部文本。名称都去掉首尾空白。

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{PickerError, Result};
use crate::geometry::{Point, Polygon};

/// 名称 -> 中心点
pub type CenterTable = BTreeMap<String, Point>;

/// 名称 -> 多边形列表，保持文件中的顺序
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolygonTable {
    entries: Vec<(String, Vec<Polygon>)>,
}

impl PolygonTable {
    pub fn new(entries: Vec<(String, Vec<Polygon>)>) -> Self { Self { entries } }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Polygon])> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_slice()))
    }
}

pub fn read_one_to_one(path: &Path) -> Result<CenterTable> {
    let text = std::fs::read_to_string(path).map_err(|e| PickerError::io(path, e))?;
    parse_one_to_one(&text).map_err(|e| e.in_file(path))
}

/// 先校验全部名称再写盘，校验失败时不触碰文件
pub fn write_one_to_one(path: &Path, table: &CenterTable) -> Result<()> {
    for name in table.keys() { check_savable_name(name)?; }
    std::fs::write(path, format_one_to_one(table)).map_err(|e| PickerError::io(path, e))
}

pub fn read_one_to_many_polygons(path: &Path) -> Result<PolygonTable> {
    let text = std::fs::read_to_string(path).map_err(|e| PickerError::io(path, e))?;
    parse_one_to_many_polygons(&text).map_err(|e| e.in_file(path))
}

pub fn parse_one_to_one(text: &str) -> Result<CenterTable> {
    let mut table = CenterTable::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() { continue; }
        let start = line.rfind('(').ok_or_else(|| PickerError::parse(line_no, "missing point data"))?;
        let name = line[..start].trim();
        if name.is_empty() { return Err(PickerError::parse(line_no, "missing name")); }
        let point = match parse_points(&line[start..], line_no)?.as_slice() {
            [p] => *p,
            _ => return Err(PickerError::parse(line_no, "missing point")),
        };
        // `A (1,2) (3,4)`：名称本身以一个点结尾
        if trailing_point(name).is_some() { return Err(PickerError::MultiplePoints { name: name.to_owned() }); }
        if table.insert(name.to_owned(), point).is_some() {
            return Err(PickerError::DuplicateName { name: name.to_owned() });
        }
    }
    Ok(table)
}

pub fn format_one_to_one(table: &CenterTable) -> String {
    let mut out = String::new();
    for (name, p) in table {
        out.push_str(&format!("{}  ({},{})\n", name, p.x, p.y));
    }
    out
}

pub fn parse_one_to_many_polygons(text: &str) -> Result<PolygonTable> {
    let mut entries: Vec<(String, Vec<Polygon>)> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() { continue; }
        let (name, mut rest) = split_name(line, &['<'], line_no)?;
        let mut polygons = Vec::new();
        loop {
            rest = rest.trim_start();
            if rest.is_empty() { break; }
            let body = rest.strip_prefix('<')
                .ok_or_else(|| PickerError::parse(line_no, "expected '<'"))?;
            let end = body.find('>').ok_or_else(|| PickerError::parse(line_no, "unclosed '<'"))?;
            let inner = &body[..end];
            if inner.contains('<') { return Err(PickerError::parse(line_no, "nested '<'")); }
            polygons.push(Polygon::new(parse_points(inner, line_no)?));
            rest = &body[end + 1..];
        }
        if polygons.is_empty() { return Err(PickerError::parse(line_no, "missing polygon")); }
        if entries.iter().any(|(n, _)| n == name) {
            return Err(PickerError::DuplicateName { name: name.to_owned() });
        }
        entries.push((name.to_owned(), polygons));
    }
    Ok(PolygonTable::new(entries))
}

/// 名称末尾的 `(x,y)`：一对一文件无法区分它和记录的点
fn trailing_point(name: &str) -> Option<Point> {
    let start = name.rfind('(')?;
    match parse_points(&name[start..], 0).ok()?.as_slice() {
        [p] => Some(*p),
        _ => None,
    }
}

fn check_savable_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name is blank"
    } else if name.trim() != name {
        "name has leading or trailing whitespace"
    } else if name.contains(['\n', '\r']) {
        "name contains a line break"
    } else if trailing_point(name).is_some() {
        "name ends with a point"
    } else {
        return Ok(());
    };
    Err(PickerError::UnsavableName { name: name.to_owned(), reason })
}

fn split_name<'a>(line: &'a str, openers: &[char], line_no: usize) -> Result<(&'a str, &'a str)> {
    let start = line.find(openers).ok_or_else(|| PickerError::parse(line_no, "missing point data"))?;
    let name = line[..start].trim();
    if name.is_empty() { return Err(PickerError::parse(line_no, "missing name")); }
    Ok((name, &line[start..]))
}

/// 解析若干个 `(x,y)`，以空白分隔
fn parse_points(mut s: &str, line_no: usize) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    loop {
        s = s.trim_start();
        if s.is_empty() { break; }
        let body = s.strip_prefix('(').ok_or_else(|| PickerError::parse(line_no, "expected '('"))?;
        let end = body.find(')').ok_or_else(|| PickerError::parse(line_no, "unclosed '('"))?;
        let (xs, ys) = body[..end].split_once(',')
            .ok_or_else(|| PickerError::parse(line_no, "point must be (x,y)"))?;
        let x = parse_coord(xs, line_no)?;
        let y = parse_coord(ys, line_no)?;
        points.push(Point::new(x, y));
        s = &body[end + 1..];
    }
    Ok(points)
}

fn parse_coord(s: &str, line_no: usize) -> Result<i32> {
    let s = s.trim();
    s.parse::<i32>().map_err(|e| PickerError::parse(line_no, format!("bad coordinate {:?}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_centers() {
        let t = parse_one_to_one("Paris  (10,20)\n\nNew York (0, -3)\r\n").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t["Paris"], Point::new(10, 20));
        assert_eq!(t["New York"], Point::new(0, -3));
    }

    #[test]
    fn centers_reject_bad_lines() {
        assert!(matches!(parse_one_to_one("(1,2)"), Err(PickerError::Parse { line: 1, .. })));
        assert!(matches!(parse_one_to_one("A (1,2)\nB"), Err(PickerError::Parse { line: 2, .. })));
        assert!(matches!(parse_one_to_one("A (1,x)"), Err(PickerError::Parse { .. })));
        assert!(matches!(parse_one_to_one("A (1,2) (3,4)"), Err(PickerError::MultiplePoints { .. })));
        assert!(matches!(parse_one_to_one("A (1,2)\nA (3,4)"), Err(PickerError::DuplicateName { .. })));
    }

    #[test]
    fn parse_polygons_keeps_file_order() {
        let text = "Zeta  <  (0,0) (10,0) (10,10) >\nAlpha  < (1,1) (2,1) (2,2) >  < (5,5) (6,5) (6,6) >\n";
        let t = parse_one_to_many_polygons(text).unwrap();
        let names: Vec<&str> = t.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["Zeta", "Alpha"]);
        let (_, alpha) = t.iter().nth(1).unwrap();
        assert_eq!(alpha.len(), 2);
        assert_eq!(alpha[1].points[2], Point::new(6, 6));
    }

    #[test]
    fn polygons_reject_bad_lines() {
        assert!(parse_one_to_many_polygons("A < (0,0) (1,1)").is_err());
        assert!(parse_one_to_many_polygons("A (0,0)").is_err());
        assert!(parse_one_to_many_polygons("< (0,0) >").is_err());
        assert!(parse_one_to_many_polygons("A < (0,0) > junk").is_err());
        assert!(matches!(
            parse_one_to_many_polygons("A < (0,0) >\nA < (1,1) >"),
            Err(PickerError::DuplicateName { .. })
        ));
    }

    #[test]
    fn save_then_load_empty_and_extreme_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centers.txt");

        let empty = CenterTable::new();
        write_one_to_one(&path, &empty).unwrap();
        assert_eq!(read_one_to_one(&path).unwrap(), empty);

        let mut t = CenterTable::new();
        t.insert("Origin".into(), Point::new(0, 0));
        t.insert("Far East".into(), Point::new(i32::MAX, 123_456_789));
        write_one_to_one(&path, &t).unwrap();
        assert_eq!(read_one_to_one(&path).unwrap(), t);
    }

    #[test]
    fn names_with_parentheses_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centers.txt");
        let mut t = CenterTable::new();
        t.insert("Paris".into(), Point::new(1, 2));
        t.insert("Sea Zone (North)".into(), Point::new(10, 20));
        t.insert("Odd (name".into(), Point::new(3, 4));
        t.insert("a,b) c".into(), Point::new(5, 6));
        write_one_to_one(&path, &t).unwrap();
        assert_eq!(read_one_to_one(&path).unwrap(), t);
    }

    #[test]
    fn unsavable_names_fail_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centers.txt");
        std::fs::write(&path, "Old  (1,1)\n").unwrap();
        for bad in ["Grid (1,2)", " Padded", "Two\nLines", ""] {
            let mut t = CenterTable::new();
            t.insert("Paris".into(), Point::new(1, 2));
            t.insert(bad.into(), Point::new(0, 0));
            let err = write_one_to_one(&path, &t).unwrap_err();
            assert!(matches!(err, PickerError::UnsavableName { .. }), "{bad:?}: {err}");
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Old  (1,1)\n");
    }

    #[test]
    fn parse_errors_carry_the_file_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centers.txt");
        std::fs::write(&path, "Paris (1,2)\nbroken\n").unwrap();
        let err = read_one_to_one(&path).unwrap_err();
        assert!(matches!(&err, PickerError::Parse { path: Some(p), line: 2, .. } if *p == path));
        assert!(err.to_string().contains("centers.txt"));

        let polys = dir.path().join("polygons.txt");
        std::fs::write(&polys, "A < (0,0)\n").unwrap();
        assert!(matches!(
            read_one_to_many_polygons(&polys),
            Err(PickerError::Parse { path: Some(_), line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_one_to_one(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, PickerError::Io { .. }));
    }

    proptest! {
        #[test]
        fn centers_round_trip(entries in prop::collection::btree_map(
            "[A-Za-z][A-Za-z0-9 _.()-]{0,15}[A-Za-z0-9)]",
            (0i32..100_000, 0i32..100_000),
            0..20,
        )) {
            let table: CenterTable = entries.into_iter()
                .map(|(n, (x, y))| (n, Point::new(x, y)))
                .collect();
            prop_assert_eq!(parse_one_to_one(&format_one_to_one(&table)).unwrap(), table);
        }
    }
}
