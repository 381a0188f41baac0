//! 選択中の日付範囲の一覧と日付への展開

use crate::config::ENV_EMPTY_SELECTION;
use crate::error::ConfigError;
use crate::span::{CalendarDate, DataBounds, DateSpan};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// 選択が1つもないときに表示する日付
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptySelection {
    /// データのある全日付
    #[default]
    AllDates,
    /// 固定の1日
    Fixed(CalendarDate),
}

impl FromStr for EmptySelection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(EmptySelection::AllDates);
        }
        s.parse::<CalendarDate>()
            .map(EmptySelection::Fixed)
            .map_err(|_| ConfigError::InvalidValue {
                key: ENV_EMPTY_SELECTION,
                value: s.to_string(),
            })
    }
}

impl fmt::Display for EmptySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptySelection::AllDates => write!(f, "all"),
            EmptySelection::Fixed(date) => write!(f, "{}", date),
        }
    }
}

/// ユーザーが追加した選択範囲（追加順を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    spans: Vec<DateSpan>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期選択として1日だけ入れた状態
    pub fn seeded(date: CalendarDate) -> Self {
        Self {
            spans: vec![DateSpan::single(date)],
        }
    }

    pub fn push(&mut self, span: DateSpan) {
        self.spans.push(span);
    }

    /// 指定位置の選択を削除（範囲外なら何もしない）
    pub fn remove(&mut self, index: usize) -> Option<DateSpan> {
        (index < self.spans.len()).then(|| self.spans.remove(index))
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DateSpan> {
        self.spans.iter()
    }

    pub fn as_slice(&self) -> &[DateSpan] {
        &self.spans
    }

    /// 表示対象の日付一覧
    ///
    /// 選択が空の場合は `empty` の方針に従う。
    pub fn dates(&self, empty: EmptySelection, bounds: &DataBounds) -> Vec<CalendarDate> {
        if !self.spans.is_empty() {
            return flatten(&self.spans);
        }

        match empty {
            EmptySelection::AllDates => bounds.dates().collect(),
            EmptySelection::Fixed(date) => vec![date],
        }
    }
}

/// 1つの選択を日単位に展開（両端を含む）
pub fn expand(span: &DateSpan) -> Vec<CalendarDate> {
    span.days().collect()
}

/// 全選択を展開し、重複を除いて昇順に並べる
pub fn flatten(spans: &[DateSpan]) -> Vec<CalendarDate> {
    spans
        .iter()
        .flat_map(DateSpan::days)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
