//! データセット読み込み - 日付・地点ごとの件数表

use crate::report::{EntityKey, Geography, Metric, ValueSource};
use crate::span::{CalendarDate, DataBounds};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// 1行分の記録
///
/// 方向・集落が無い行は州単位の値（方向の無い州で使う）。
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub date: CalendarDate,
    pub region: String,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub settlement: Option<String>,
    #[serde(default)]
    pub repelled: u64,
    #[serde(default)]
    pub assaults: u64,
    #[serde(default)]
    pub other: u64,
}

impl Record {
    fn count(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Repelled => self.repelled,
            Metric::Assaults => self.assaults,
            Metric::Other => self.other,
        }
    }
}

/// JSONファイルの構造
#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    geography: Geography,
    #[serde(default)]
    records: Vec<Record>,
}

/// 集計キー: (日付, 州, 方向, 集落)
type RowKey = (CalendarDate, String, Option<String>, Option<String>);

/// 地理階層と件数表
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    geography: Geography,
    rows: HashMap<RowKey, [u64; 3]>,
}

impl Dataset {
    /// JSON文字列から作成
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DatasetFile = serde_json::from_str(json).context("データセットのパースに失敗")?;
        Ok(Self::new(file.geography, file.records))
    }

    /// JSONファイルを読み込む
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("データセットの読み込みに失敗: {:?}", path))?;
        let dataset = Self::from_json(&json).with_context(|| format!("不正なデータセット: {:?}", path))?;

        info!(
            "データセット読み込み: {:?} ({} 州, {} 行)",
            path,
            dataset.geography.regions.len(),
            dataset.rows.len()
        );
        Ok(dataset)
    }

    /// 同じキーの記録は合算する（上限で飽和）
    pub fn new(geography: Geography, records: impl IntoIterator<Item = Record>) -> Self {
        let mut rows: HashMap<RowKey, [u64; 3]> = HashMap::new();
        for record in records {
            let counts = [
                record.count(Metric::Repelled),
                record.count(Metric::Assaults),
                record.count(Metric::Other),
            ];
            let key = (record.date, record.region, record.direction, record.settlement);
            let entry = rows.entry(key).or_default();
            for (sum, n) in entry.iter_mut().zip(counts) {
                *sum = sum.saturating_add(n);
            }
        }
        Self { geography, rows }
    }

    pub fn geography(&self) -> &Geography {
        &self.geography
    }

    /// 記録のある日付
    pub fn bounds(&self) -> DataBounds {
        DataBounds::new(self.rows.keys().map(|(date, ..)| *date))
    }
}

impl ValueSource for Dataset {
    fn value(&self, date: CalendarDate, metric: Metric, key: &EntityKey<'_>) -> Option<u64> {
        let row_key = match *key {
            EntityKey::Region(region) => (date, region.to_string(), None, None),
            EntityKey::Settlement {
                region,
                direction,
                settlement,
            } => (
                date,
                region.to_string(),
                Some(direction.to_string()),
                Some(settlement.to_string()),
            ),
        };
        let counts = self.rows.get(&row_key)?;
        Some(match metric {
            Metric::Repelled => counts[0],
            Metric::Assaults => counts[1],
            Metric::Other => counts[2],
        })
    }
}
