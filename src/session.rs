//! 编辑会话：持有中心点表与多边形表，响应点击与菜单命令
//!
//! 所有询问（输入名称、覆盖确认、删除确认）都经由 [`Prompter`] 同步完成，
//! GUI 使用对话框实现，测试使用预设答案。

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::geometry::{Point, distance_to_box_center_sq4, hit_box_contains};
use crate::point_file::{self, CenterTable, PolygonTable};
use crate::resolver;

pub trait Prompter {
    /// 以 `suggested` 为初值让操作者输入名称；`None` 表示取消
    fn prompt_name(&mut self, suggested: &str) -> Option<String>;

    /// 是/否确认
    fn confirm(&mut self, message: &str) -> bool;
}

pub const CONFIRM_REPLACE: &str =
    "Another center exists with the same name. Are you sure you want to replace it with this one?";
pub const CONFIRM_REMOVE: &str = "Are you sure you want to remove this center?";

/// 一次点击对表的影响
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Inserted(String),
    Replaced(String),
    Removed(String),
    /// 取消、空名称、拒绝确认或未命中任何标记
    Unchanged,
}

pub struct Session {
    centers: CenterTable,
    polygons: PolygonTable,
    map_folder: Option<PathBuf>,
}

impl Session {
    pub fn new(polygons: PolygonTable, map_folder: Option<PathBuf>) -> Self {
        Self { centers: CenterTable::new(), polygons, map_folder }
    }

    pub fn centers(&self) -> &CenterTable { &self.centers }

    pub fn polygons(&self) -> &PolygonTable { &self.polygons }

    pub fn map_folder(&self) -> Option<&Path> { self.map_folder.as_deref() }

    pub fn suggest_name(&self, point: Point) -> String {
        resolver::suggest_name(point, &self.polygons)
    }

    /// 左键：新建或覆盖一个中心点
    pub fn on_primary_click(&mut self, point: Point, prompter: &mut dyn Prompter) -> ClickOutcome {
        let suggested = self.suggest_name(point);
        let Some(name) = prompter.prompt_name(&suggested) else { return ClickOutcome::Unchanged };
        let name = name.trim();
        if name.is_empty() { return ClickOutcome::Unchanged; }

        if self.centers.contains_key(name) {
            if !prompter.confirm(CONFIRM_REPLACE) { return ClickOutcome::Unchanged; }
            self.centers.insert(name.to_owned(), point);
            info!(name, x = point.x, y = point.y, "center replaced");
            return ClickOutcome::Replaced(name.to_owned());
        }
        self.centers.insert(name.to_owned(), point);
        info!(name, x = point.x, y = point.y, "center added");
        ClickOutcome::Inserted(name.to_owned())
    }

    /// 右键：删除命中框包含点击处的标记
    pub fn on_secondary_click(&mut self, point: Point, prompter: &mut dyn Prompter) -> ClickOutcome {
        let Some(name) = self.center_at(point).map(str::to_owned) else { return ClickOutcome::Unchanged };
        if !prompter.confirm(CONFIRM_REMOVE) { return ClickOutcome::Unchanged; }
        self.centers.remove(&name);
        info!(name = name.as_str(), "center removed");
        ClickOutcome::Removed(name)
    }

    /// 命中的标记；多个命中框重叠时取框中心离点击处最近者，距离相同按名称先后
    pub fn center_at(&self, point: Point) -> Option<&str> {
        self.centers
            .iter()
            .filter(|&(_, anchor)| hit_box_contains(*anchor, point))
            .min_by_key(|&(name, anchor)| (distance_to_box_center_sq4(*anchor, point), name.as_str()))
            .map(|(name, _)| name.as_str())
    }

    /// 用文件内容整体替换当前表；失败时保持原表
    pub fn load_centers(&mut self, path: &Path) -> Result<usize> {
        match point_file::read_one_to_one(path) {
            Ok(table) => {
                let n = table.len();
                self.centers = table;
                info!(path = %path.display(), count = n, "centers loaded");
                Ok(n)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load centers");
                Err(e)
            }
        }
    }

    pub fn save_centers(&self, path: &Path) -> Result<()> {
        match point_file::write_one_to_one(path, &self.centers) {
            Ok(()) => {
                info!(path = %path.display(), count = self.centers.len(), "centers written");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to save centers");
                Err(e)
            }
        }
    }
}

/// 预设答案的询问器
#[cfg(test)]
pub(crate) struct Scripted {
    pub names: std::collections::VecDeque<Option<String>>,
    pub answers: std::collections::VecDeque<bool>,
    pub suggestions: Vec<String>,
    pub confirmations: Vec<String>,
}

#[cfg(test)]
impl Scripted {
    pub fn new() -> Self {
        Self { names: Default::default(), answers: Default::default(), suggestions: Vec::new(), confirmations: Vec::new() }
    }

    pub fn name(mut self, n: Option<&str>) -> Self { self.names.push_back(n.map(str::to_owned)); self }

    pub fn answer(mut self, yes: bool) -> Self { self.answers.push_back(yes); self }
}

#[cfg(test)]
impl Prompter for Scripted {
    fn prompt_name(&mut self, suggested: &str) -> Option<String> {
        self.suggestions.push(suggested.to_owned());
        self.names.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_owned());
        self.answers.pop_front().unwrap_or(false)
    }
}
