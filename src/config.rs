//! 設定 - 環境変数（.env 含む）から読み込む

use crate::error::ConfigError;
use crate::parser::DateOrder;
use crate::report::Metric;
use crate::selection::EmptySelection;
use std::path::PathBuf;

/// データセットのパス
pub const ENV_DATA: &str = "FRONTLINE_DATA";
/// 月/日が曖昧なときの読み方 (mdy / dmy)
pub const ENV_DATE_ORDER: &str = "FRONTLINE_DATE_ORDER";
/// 選択が空のときの方針 (all / YYYY-MM-DD)
pub const ENV_EMPTY_SELECTION: &str = "FRONTLINE_EMPTY_SELECTION";
/// 表示する指標 (repelled / assaults / other)
pub const ENV_METRIC: &str = "FRONTLINE_METRIC";

/// アプリケーション設定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub data_path: Option<PathBuf>,
    pub date_order: DateOrder,
    pub empty_selection: EmptySelection,
    pub metric: Metric,
}

impl Config {
    /// 環境変数から読み込む（未設定の項目は既定値）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let date_order = match get(ENV_DATE_ORDER) {
            Some(v) => v.parse()?,
            None => DateOrder::default(),
        };

        let empty_selection = match get(ENV_EMPTY_SELECTION) {
            Some(v) => v.parse()?,
            None => EmptySelection::default(),
        };

        let metric = match get(ENV_METRIC) {
            Some(v) => v.parse()?,
            None => Metric::default(),
        };

        Ok(Self {
            data_path: get(ENV_DATA).map(PathBuf::from),
            date_order,
            empty_selection,
            metric,
        })
    }
}
