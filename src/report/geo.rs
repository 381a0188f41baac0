//! 地理階層（州 → 方向 → 集落）

use serde::{Deserialize, Serialize};

/// 州・方向・集落の階層
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geography {
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// 州
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// 地図表示用の中心 [緯度, 経度]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    /// 方向が無い州は州単位の値で集計する
    #[serde(default)]
    pub directions: Vec<Direction>,
}

/// 戦線の方向
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// 集落（地図上の点）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// 値を引くためのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey<'a> {
    /// 州単位の値（方向が無い州のフォールバック）
    Region(&'a str),
    /// 集落単位の値
    Settlement {
        region: &'a str,
        direction: &'a str,
        settlement: &'a str,
    },
}
