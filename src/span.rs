//! 日付範囲とデータ範囲によるクリップ

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// 暦日 (UTC基準、`YYYY-MM-DD`)
pub type CalendarDate = NaiveDate;

/// 単日または両端を含む日付範囲
///
/// `Range` は常に `start <= end` を満たす。`Single(d)` と `Range(d, d)` は等しいものとして扱い、
/// コンストラクタは後者を前者に畳み込む。
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", from = "RawSpan")]
pub enum DateSpan {
    Single { date: CalendarDate },
    Range { start: CalendarDate, end: CalendarDate },
}

/// 読み込み用（逆転した範囲を `between` で並べ直す）
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawSpan {
    Single { date: CalendarDate },
    Range { start: CalendarDate, end: CalendarDate },
}

impl From<RawSpan> for DateSpan {
    fn from(raw: RawSpan) -> Self {
        match raw {
            RawSpan::Single { date } => DateSpan::single(date),
            RawSpan::Range { start, end } => DateSpan::between(start, end),
        }
    }
}

impl DateSpan {
    /// 単日
    pub fn single(date: CalendarDate) -> Self {
        DateSpan::Single { date }
    }

    /// 2つの日付から範囲を作成（順序は問わない、同日なら単日）
    pub fn between(a: CalendarDate, b: CalendarDate) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start == end {
            DateSpan::Single { date: start }
        } else {
            DateSpan::Range { start, end }
        }
    }

    pub fn start(&self) -> CalendarDate {
        match *self {
            DateSpan::Single { date } => date,
            DateSpan::Range { start, .. } => start,
        }
    }

    pub fn end(&self) -> CalendarDate {
        match *self {
            DateSpan::Single { date } => date,
            DateSpan::Range { end, .. } => end,
        }
    }

    /// 両方を覆う最小の範囲（早い方の開始〜遅い方の終了）
    pub fn merge(&self, other: &DateSpan) -> DateSpan {
        DateSpan::between(self.start().min(other.start()), self.end().max(other.end()))
    }

    /// 含まれる日を昇順に列挙
    pub fn days(&self) -> impl Iterator<Item = CalendarDate> + use<> {
        let end = self.end();
        self.start().iter_days().take_while(move |d| *d <= end)
    }
}

impl PartialEq for DateSpan {
    fn eq(&self, other: &Self) -> bool {
        self.start() == other.start() && self.end() == other.end()
    }
}

impl Eq for DateSpan {}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpan::Single { date } => write!(f, "{}", date),
            DateSpan::Range { start, end } if start == end => write!(f, "{}", start),
            DateSpan::Range { start, end } => write!(f, "{}~{}", start, end),
        }
    }
}

/// データが存在する日付の集合
///
/// 外部（データセット）から与えられ、コア側では変更しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataBounds {
    dates: BTreeSet<CalendarDate>,
}

impl DataBounds {
    pub fn new(dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn min(&self) -> Option<CalendarDate> {
        self.dates.first().copied()
    }

    pub fn max(&self) -> Option<CalendarDate> {
        self.dates.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.dates.contains(&date)
    }

    /// 既知の日付（昇順）
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.dates.iter().copied()
    }

    /// 範囲をデータの存在期間 `[min, max]` に切り詰める
    ///
    /// 重ならない場合は `None`。切り詰めた結果が1日なら単日になる。
    pub fn clip(&self, span: &DateSpan) -> Option<DateSpan> {
        let (min, max) = (self.min()?, self.max()?);

        let start = span.start().max(min);
        let end = span.end().min(max);

        // 逆転した場合は完全に範囲外
        if start > end {
            return None;
        }

        Some(DateSpan::between(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn bounds() -> DataBounds {
        DataBounds::new(date("2026-02-10").iter_days().take(14))
    }

    #[test]
    fn between_orders_and_collapses() {
        let a = date("2026-02-12");
        let b = date("2026-02-10");
        assert_eq!(
            DateSpan::between(a, b),
            DateSpan::Range { start: b, end: a }
        );
        assert!(matches!(DateSpan::between(a, a), DateSpan::Single { .. }));
        assert_eq!(DateSpan::Range { start: a, end: a }, DateSpan::single(a));
    }

    #[test]
    fn merge_takes_outer_hull() {
        let year = DateSpan::between(date("2026-01-01"), date("2026-12-31"));
        let day = DateSpan::single(date("2026-02-05"));
        assert_eq!(day.merge(&year), year);

        let feb = DateSpan::between(date("2026-02-01"), date("2026-02-28"));
        let apr = DateSpan::between(date("2026-04-01"), date("2026-04-30"));
        assert_eq!(
            feb.merge(&apr),
            DateSpan::between(date("2026-02-01"), date("2026-04-30"))
        );
    }

    #[test]
    fn bounds_min_max() {
        let b = bounds();
        assert_eq!(b.min(), Some(date("2026-02-10")));
        assert_eq!(b.max(), Some(date("2026-02-23")));
        assert!(b.contains(date("2026-02-18")));
        assert!(!b.contains(date("2026-02-24")));
    }

    #[test]
    fn clip_clamps_both_ends() {
        let span = DateSpan::between(date("2026-01-01"), date("2026-12-31"));
        assert_eq!(
            bounds().clip(&span),
            Some(DateSpan::between(date("2026-02-10"), date("2026-02-23")))
        );
    }

    #[test]
    fn clip_inside_is_unchanged() {
        let span = DateSpan::between(date("2026-02-12"), date("2026-02-14"));
        assert_eq!(bounds().clip(&span), Some(span));
    }

    #[test]
    fn clip_collapses_to_single() {
        let span = DateSpan::between(date("2026-02-01"), date("2026-02-10"));
        let clipped = bounds().clip(&span).unwrap();
        assert!(matches!(clipped, DateSpan::Single { date } if date == self::date("2026-02-10")));
    }

    #[test]
    fn clip_rejects_disjoint() {
        let before = DateSpan::between(date("2026-01-01"), date("2026-02-09"));
        let after = DateSpan::single(date("2030-01-01"));
        assert_eq!(bounds().clip(&before), None);
        assert_eq!(bounds().clip(&after), None);
        assert_eq!(DataBounds::default().clip(&after), None);
    }

    #[test]
    fn clip_is_an_intersection() {
        let b = bounds();
        let starts = ["2026-02-01", "2026-02-10", "2026-02-15", "2026-02-23", "2026-03-01"];
        for s in starts {
            for e in starts {
                let (s, e) = (date(s), date(e));
                if s > e {
                    continue;
                }
                let span = DateSpan::between(s, e);
                let overlaps = s <= b.max().unwrap() && e >= b.min().unwrap();
                match b.clip(&span) {
                    Some(c) => {
                        assert!(overlaps);
                        assert!(span.start() <= c.start() && c.end() <= span.end());
                        assert!(b.min().unwrap() <= c.start() && c.end() <= b.max().unwrap());
                    }
                    None => assert!(!overlaps),
                }
            }
        }
    }

    #[test]
    fn days_are_inclusive() {
        let span = DateSpan::between(date("2024-02-27"), date("2024-03-01"));
        let days: Vec<String> = span.days().map(|d| d.to_string()).collect();
        assert_eq!(days, ["2024-02-27", "2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(DateSpan::single(date("2026-02-18")).days().count(), 1);
    }

    #[test]
    fn display_and_serde() {
        let single = DateSpan::single(date("2026-02-18"));
        let range = DateSpan::between(date("2026-02-10"), date("2026-02-23"));
        assert_eq!(single.to_string(), "2026-02-18");
        assert_eq!(range.to_string(), "2026-02-10~2026-02-23");

        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"type":"range","start":"2026-02-10","end":"2026-02-23"}"#);
        let back: DateSpan = serde_json::from_str(r#"{"type":"single","date":"2026-02-18"}"#).unwrap();
        assert_eq!(back, single);
    }

    #[test]
    fn deserialized_range_is_ordered() {
        let json = r#"{"type":"range","start":"2026-02-23","end":"2026-02-10"}"#;
        let span: DateSpan = serde_json::from_str(json).unwrap();
        assert_eq!(span.start(), date("2026-02-10"));
        assert_eq!(span.end(), date("2026-02-23"));
        assert_eq!(span.days().count(), 14);

        let same = r#"{"type":"range","start":"2026-02-18","end":"2026-02-18"}"#;
        let span: DateSpan = serde_json::from_str(same).unwrap();
        assert!(matches!(span, DateSpan::Single { .. }));
    }
}
