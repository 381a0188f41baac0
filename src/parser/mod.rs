//! 日付入力解析モジュール - 自由入力から日付範囲を作る
//!
//! 正規化 → 範囲区切りの検出 → 両端の抽出・解決 → 結合 → データ範囲でクリップ

mod date;
mod normalize;
mod resolve;

pub use date::{extract_date, DateOrder, PartialDateRef};
pub use normalize::normalize;
pub use resolve::resolve;

use crate::error::SelectionError;
use crate::span::{DataBounds, DateSpan};
use regex::Regex;
use tracing::debug;

/// 範囲区切りの書式（上から順に試す）
const RANGE_PATTERNS: &[&str] = &[
    // A~B（"to" は正規化で ~ になっている、空白は任意）
    r"^(.+?)\s*~\s*(.+)$",
    // A - B（単日の 2026-02-18 と区別するため両側の空白が必須）
    r"^(.+?)\s+-\s+(.+)$",
];

/// 入力文字列を選択範囲に変換
///
/// 範囲入力の各端はそれぞれ期間に展開されうる（例: `2026 ~ 2026-02`）。
/// 両端の和（早い開始〜遅い終了）を取ってからデータ範囲でクリップする。
pub fn parse_selection(raw: &str, bounds: &DataBounds, order: DateOrder) -> Result<DateSpan, SelectionError> {
    let text = normalize(raw);

    let span = match split_range(&text) {
        Some((left, right)) => {
            let a = parse_one(left, order)?;
            let b = parse_one(right, order)?;
            a.merge(&b)
        }
        None => parse_one(&text, order)?,
    };

    bounds.clip(&span).ok_or_else(|| {
        debug!("データ範囲外: {} ({:?}〜{:?})", span, bounds.min(), bounds.max());
        SelectionError::OutOfDataRange(span)
    })
}

/// 範囲区切りで2つに分割
fn split_range(text: &str) -> Option<(&str, &str)> {
    for pattern in RANGE_PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(text) {
                let left = caps.get(1)?.as_str().trim();
                let right = caps.get(2)?.as_str().trim();
                return Some((left, right));
            }
        }
    }

    None
}

/// 単一の日付表現（年・年月・年月日）を解決
fn parse_one(text: &str, order: DateOrder) -> Result<DateSpan, SelectionError> {
    let partial = extract_date(text, order).ok_or_else(|| {
        debug!("解釈できない日付表現: {:?}", text);
        SelectionError::ParseFailure(text.to_string())
    })?;

    resolve(partial).inspect_err(|e| debug!("{}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::CalendarDate;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    /// 2026-02-10 〜 2026-02-23
    fn bounds() -> DataBounds {
        DataBounds::new(date("2026-02-10").iter_days().take(14))
    }

    fn parse(raw: &str) -> Result<DateSpan, SelectionError> {
        parse_selection(raw, &bounds(), DateOrder::Mdy)
    }

    fn range(start: &str, end: &str) -> DateSpan {
        DateSpan::between(date(start), date(end))
    }

    fn single(d: &str) -> DateSpan {
        DateSpan::single(date(d))
    }

    #[test]
    fn single_dates_in_many_formats() {
        for raw in [
            "2026-02-18",
            "2026/2/18",
            "2026.02.18",
            "2026年2月18日",
            "02-18-2026",
            "18-02-2026",
            "Feb 18 2026",
            "Feb 18, 2026",
            "18 February 2026",
            "  2026－02－18  ",
        ] {
            assert_eq!(parse(raw), Ok(single("2026-02-18")), "input: {:?}", raw);
        }
    }

    #[test]
    fn hyphenated_date_is_not_a_range() {
        assert!(matches!(parse("2026-02-18"), Ok(DateSpan::Single { .. })));
    }

    #[test]
    fn explicit_ranges() {
        let expected = Ok(range("2026-02-12", "2026-02-14"));
        assert_eq!(parse("2026-02-12 ~ 2026-02-14"), expected);
        assert_eq!(parse("2026-02-12~2026-02-14"), expected);
        assert_eq!(parse("2026-02-12 to 2026-02-14"), expected);
        assert_eq!(parse("2026-02-12 TO 2026-02-14"), expected);
        assert_eq!(parse("2026-02-12 - 2026-02-14"), expected);
        assert_eq!(parse("2026-02-12 – 2026-02-14"), expected);
        assert_eq!(parse("2026年2月12日至2026年2月14日"), expected);
        assert_eq!(parse("2026年2月12日到2026年2月14日"), expected);
        assert_eq!(parse("Feb 12 2026 to Feb 14 2026"), expected);
    }

    #[test]
    fn reversed_range_is_ordered() {
        assert_eq!(parse("2026-02-14 ~ 2026-02-12"), Ok(range("2026-02-12", "2026-02-14")));
    }

    #[test]
    fn abstract_inputs_clip_to_data() {
        assert_eq!(parse("2026"), Ok(range("2026-02-10", "2026-02-23")));
        assert_eq!(parse("2026-02"), Ok(range("2026-02-10", "2026-02-23")));
        assert_eq!(parse("2026年2月"), Ok(range("2026-02-10", "2026-02-23")));
        assert_eq!(parse("February 2026"), Ok(range("2026-02-10", "2026-02-23")));
        assert_eq!(parse("2/2026"), Ok(range("2026-02-10", "2026-02-23")));
    }

    #[test]
    fn mixed_granularity_range_takes_union() {
        // 2026年全体と2月5日の和 → 全体をデータ範囲で切り詰め
        assert_eq!(parse("2026 ~ 2026-02-05"), Ok(range("2026-02-10", "2026-02-23")));
        assert_eq!(parse("2026-02-05 ~ 2026-02"), Ok(range("2026-02-10", "2026-02-23")));
    }

    #[test]
    fn clipped_range_collapses_to_single() {
        assert_eq!(parse("2026-02-01 ~ 2026-02-10"), Ok(single("2026-02-10")));
        assert!(matches!(parse("2026-02-23 ~ 2026-03"), Ok(DateSpan::Single { .. })));
    }

    #[test]
    fn out_of_range_inputs() {
        assert!(matches!(parse("2030"), Err(SelectionError::OutOfDataRange(_))));
        assert!(matches!(parse("2026-02-09"), Err(SelectionError::OutOfDataRange(_))));
        assert!(matches!(parse("2026-03 ~ 2026-04"), Err(SelectionError::OutOfDataRange(_))));
    }

    #[test]
    fn invalid_calendar_dates() {
        assert_eq!(
            parse("2026-02-30"),
            Err(SelectionError::CalendarInvalid(PartialDateRef::YearMonthDay(2026, 2, 30)))
        );
        assert_eq!(parse("2026-13"), Err(SelectionError::CalendarInvalid(PartialDateRef::YearMonth(2026, 13))));
        assert!(matches!(parse("2026-02-12 ~ 2026-02-30"), Err(SelectionError::CalendarInvalid(_))));
    }

    #[test]
    fn unparseable_inputs() {
        for raw in ["", "   ", "hello", "2026-02-12 ~", "~ 2026", "Foo 12 2026", "2026-02-12 ~ soon"] {
            assert!(
                matches!(parse(raw), Err(SelectionError::ParseFailure(_))),
                "input: {:?}",
                raw
            );
        }
    }

    #[test]
    fn ambiguous_order_follows_setting() {
        let b = bounds();
        assert_eq!(parse_selection("02/12/2026", &b, DateOrder::Mdy), Ok(single("2026-02-12")));
        assert!(parse_selection("02/12/2026", &b, DateOrder::Dmy).is_err());
        assert_eq!(parse_selection("12/02/2026", &b, DateOrder::Dmy), Ok(single("2026-02-12")));
    }

    #[test]
    fn serialized_dates_round_trip() {
        let open = DataBounds::new(date("2024-01-01").iter_days().take(366));
        for d in open.dates() {
            let text = d.to_string();
            assert_eq!(resolve(extract_date(&normalize(&text), DateOrder::Mdy).unwrap()), Ok(DateSpan::single(d)));
            assert_eq!(parse_selection(&text, &open, DateOrder::Dmy), Ok(DateSpan::single(d)));
        }
    }
}
