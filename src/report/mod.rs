//! 集計モジュール - 選択日付にわたって地理階層ごとの値を合計する

mod geo;

pub use geo::{Direction, EntityKey, Geography, Region, Settlement};

use crate::config::ENV_METRIC;
use crate::error::ConfigError;
use crate::span::CalendarDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 表示する指標
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// 撃退
    #[default]
    Repelled,
    /// 攻撃
    Assaults,
    /// その他
    Other,
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repelled" => Ok(Metric::Repelled),
            "assaults" => Ok(Metric::Assaults),
            "other" => Ok(Metric::Other),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_METRIC,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Repelled => write!(f, "repelled"),
            Metric::Assaults => write!(f, "assaults"),
            Metric::Other => write!(f, "other"),
        }
    }
}

/// 日付・指標・対象ごとの値を提供する
///
/// 値が無い場合は `None` を返し、集計側で0として扱う。
pub trait ValueSource {
    fn value(&self, date: CalendarDate, metric: Metric, key: &EntityKey<'_>) -> Option<u64>;

    /// 値が無ければ0
    fn value_or_zero(&self, date: CalendarDate, metric: Metric, key: &EntityKey<'_>) -> u64 {
        self.value(date, metric, key).unwrap_or(0)
    }

    /// 日付一覧にわたる合計
    fn sum_over(&self, dates: &[CalendarDate], metric: Metric, key: &EntityKey<'_>) -> u64 {
        saturating_sum(dates.iter().map(|d| self.value_or_zero(*d, metric, key)))
    }
}

/// 桁あふれしない合計（上限で止める）
pub fn saturating_sum(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

/// 集落の合計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementTotal {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub total: u64,
}

/// 方向の合計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionTotal {
    pub name: String,
    pub total: u64,
    pub settlements: Vec<SettlementTotal>,
}

/// 州の合計
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotal {
    pub name: String,
    pub total: u64,
    pub directions: Vec<DirectionTotal>,
}

/// 州の日別合計（積み上げグラフ用）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSeries {
    pub region: String,
    pub values: Vec<u64>,
}

/// 地図に置く集落マーカー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub name: String,
    pub region: String,
    pub direction: String,
    pub lat: f64,
    pub lng: f64,
    pub value: u64,
}

/// 日付一覧にわたって各階層の値を合計
pub fn aggregate(
    dates: &[CalendarDate],
    geography: &Geography,
    source: &impl ValueSource,
    metric: Metric,
) -> Vec<RegionTotal> {
    geography
        .regions
        .iter()
        .map(|region| {
            let directions: Vec<DirectionTotal> = region
                .directions
                .iter()
                .map(|direction| {
                    let settlements: Vec<SettlementTotal> = direction
                        .settlements
                        .iter()
                        .map(|settlement| {
                            let key = EntityKey::Settlement {
                                region: &region.name,
                                direction: &direction.name,
                                settlement: &settlement.name,
                            };
                            SettlementTotal {
                                name: settlement.name.clone(),
                                lat: settlement.lat,
                                lng: settlement.lng,
                                total: source.sum_over(dates, metric, &key),
                            }
                        })
                        .collect();
                    DirectionTotal {
                        name: direction.name.clone(),
                        total: saturating_sum(settlements.iter().map(|s| s.total)),
                        settlements,
                    }
                })
                .collect();

            // 方向が無い州は州単位の値を使う
            let total = if directions.is_empty() {
                source.sum_over(dates, metric, &EntityKey::Region(&region.name))
            } else {
                saturating_sum(directions.iter().map(|d| d.total))
            };

            RegionTotal {
                name: region.name.clone(),
                total,
                directions,
            }
        })
        .collect()
}

/// 州ごとの1日分の合計
pub fn region_total_for_date(region: &Region, date: CalendarDate, source: &impl ValueSource, metric: Metric) -> u64 {
    if region.directions.is_empty() {
        return source.value_or_zero(date, metric, &EntityKey::Region(&region.name));
    }

    saturating_sum(
        region
            .directions
            .iter()
            .flat_map(|d| d.settlements.iter().map(move |s| (d, s)))
            .map(|(d, s)| {
                let key = EntityKey::Settlement {
                    region: &region.name,
                    direction: &d.name,
                    settlement: &s.name,
                };
                source.value_or_zero(date, metric, &key)
            }),
    )
}

/// 州ごとの日別系列
pub fn region_series(
    dates: &[CalendarDate],
    geography: &Geography,
    source: &impl ValueSource,
    metric: Metric,
) -> Vec<RegionSeries> {
    geography
        .regions
        .iter()
        .map(|region| RegionSeries {
            region: region.name.clone(),
            values: dates
                .iter()
                .map(|d| region_total_for_date(region, *d, source, metric))
                .collect(),
        })
        .collect()
}

/// 値が正の集落だけをマーカーにする
pub fn markers(totals: &[RegionTotal]) -> Vec<Marker> {
    let mut markers = Vec::new();
    for region in totals {
        for direction in &region.directions {
            for settlement in direction.settlements.iter().filter(|s| s.total > 0) {
                markers.push(Marker {
                    name: settlement.name.clone(),
                    region: region.name.clone(),
                    direction: direction.name.clone(),
                    lat: settlement.lat,
                    lng: settlement.lng,
                    value: settlement.total,
                });
            }
        }
    }
    markers
}

/// 日付一覧の見出し（"Reports on 2026-02-10~2026-02-23"）
pub fn dates_label(dates: &[CalendarDate]) -> Option<String> {
    match dates {
        [] => None,
        [only] => Some(format!("Reports on {}", only)),
        [first, .., last] => Some(format!("Reports on {}~{}", first, last)),
    }
}

/// 地図・グラフ描画側へ渡す集計結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub label: Option<String>,
    pub metric: Metric,
    /// 選択中の範囲（追加順）
    pub chips: Vec<String>,
    pub dates: Vec<CalendarDate>,
    /// 全集落の合計
    pub total: u64,
    pub regions: Vec<RegionTotal>,
    pub markers: Vec<Marker>,
    pub series: Vec<RegionSeries>,
}

impl Report {
    pub fn build(
        chips: Vec<String>,
        dates: Vec<CalendarDate>,
        geography: &Geography,
        source: &impl ValueSource,
        metric: Metric,
    ) -> Self {
        let regions = aggregate(&dates, geography, source, metric);
        let markers = markers(&regions);
        let total = saturating_sum(markers.iter().map(|m| m.value));
        let series = region_series(&dates, geography, source, metric);

        Self {
            label: dates_label(&dates),
            metric,
            chips,
            dates,
            total,
            regions,
            markers,
            series,
        }
    }
}
