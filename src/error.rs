use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, PickerError>;

#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 地图图片无法解码
    #[error("cannot load map image {}: {reason}", .path.display())]
    Image { path: PathBuf, reason: String },

    /// 点文件格式错误（行号从 1 起）
    #[error("{}line {line}: {reason}", file_prefix(.path))]
    Parse { path: Option<PathBuf>, line: usize, reason: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("{name} has more than one point")]
    MultiplePoints { name: String },

    /// 写出后无法再读回的名称
    #[error("cannot save name {name:?}: {reason}")]
    UnsavableName { name: String, reason: &'static str },
}

impl PickerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse { path: None, line, reason: reason.into() }
    }

    /// 给解析错误补上文件路径
    pub(crate) fn in_file(self, file: &Path) -> Self {
        match self {
            Self::Parse { path: None, line, reason } => Self::Parse { path: Some(file.to_path_buf()), line, reason },
            other => other,
        }
    }
}

fn file_prefix(path: &Option<PathBuf>) -> String {
    path.as_ref().map(|p| format!("{}: ", p.display())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_the_file() {
        let err = PickerError::parse(2, "point must be (x,y)").in_file(Path::new("maps/centers.txt"));
        assert_eq!(err.to_string(), "maps/centers.txt: line 2: point must be (x,y)");
        assert_eq!(PickerError::parse(3, "missing name").to_string(), "line 3: missing name");
    }
}
