//! 表示セッション - 選択一覧を保持し、追加・削除のたびに表示日付を再計算する
//!
//! 状態を持つのはこの構造体だけで、解析や集計は純粋関数に委ねる。
//! 変更は `&mut self` 経由のみなので、複数スレッドから使う場合は呼び出し側で
//! `Mutex` などにより直列化すること。

use crate::config::Config;
use crate::error::SelectionError;
use crate::parser::{parse_selection, DateOrder};
use crate::report::{Geography, Metric, Report, ValueSource};
use crate::selection::{EmptySelection, SelectionSet};
use crate::span::{CalendarDate, DataBounds, DateSpan};
use tracing::{info, warn};

/// ユーザーごとの表示状態
#[derive(Debug, Clone, Default)]
pub struct Session {
    selections: SelectionSet,
    date_order: DateOrder,
    empty_selection: EmptySelection,
    metric: Metric,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            selections: SelectionSet::new(),
            date_order: config.date_order,
            empty_selection: config.empty_selection,
            metric: config.metric,
        }
    }

    /// 初期選択を1日入れた状態で開始
    pub fn with_seed(config: &Config, date: CalendarDate) -> Self {
        Self {
            selections: SelectionSet::seeded(date),
            ..Self::new(config)
        }
    }

    /// 入力を解析して選択に追加
    ///
    /// 失敗しても選択一覧は変わらない（入力欄に戻して再入力させる）。
    pub fn add(&mut self, raw: &str, bounds: &DataBounds) -> Result<DateSpan, SelectionError> {
        match parse_selection(raw, bounds, self.date_order) {
            Ok(span) => {
                info!("選択を追加: {:?} → {}", raw.trim(), span);
                self.selections.push(span);
                Ok(span)
            }
            Err(e) => {
                warn!("選択を追加できません: {}", e);
                Err(e)
            }
        }
    }

    /// 指定位置の選択を削除
    pub fn remove(&mut self, index: usize) -> Option<DateSpan> {
        let removed = self.selections.remove(index);
        match removed {
            Some(span) => info!("選択を削除: #{} {}", index, span),
            None => warn!("削除対象の選択がありません: #{}", index),
        }
        removed
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn set_metric(&mut self, metric: Metric) {
        self.metric = metric;
    }

    /// 表示対象の日付（昇順・重複なし）
    pub fn dates(&self, bounds: &DataBounds) -> Vec<CalendarDate> {
        self.selections.dates(self.empty_selection, bounds)
    }

    /// 現在の選択で集計
    pub fn report(&self, bounds: &DataBounds, geography: &Geography, source: &impl ValueSource) -> Report {
        let chips = self.selections.iter().map(|s| s.to_string()).collect();
        Report::build(chips, self.dates(bounds), geography, source, self.metric)
    }
}
