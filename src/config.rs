use std::ffi::OsString;
use std::path::PathBuf;

/// 预设地图目录的环境变量，用作各文件对话框的起始目录
pub const MAP_FOLDER_ENV: &str = "CENTER_PICKER_MAP_FOLDER";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub map_folder: Option<PathBuf>,
}

impl Config {
    /// 启动时读取一次
    pub fn from_env() -> Self {
        Self::from_value(std::env::var_os(MAP_FOLDER_ENV))
    }

    fn from_value(value: Option<OsString>) -> Self {
        let map_folder = value.filter(|v| !v.is_empty()).map(PathBuf::from);
        Self { map_folder }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_means_unset() {
        assert_eq!(Config::from_value(None).map_folder, None);
        assert_eq!(Config::from_value(Some("".into())).map_folder, None);
        assert_eq!(
            Config::from_value(Some("/maps/world".into())).map_folder,
            Some(PathBuf::from("/maps/world"))
        );
    }
}
