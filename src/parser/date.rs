//! 日付抽出モジュール - 正規化済みテキストから年/年月/年月日を取り出す

use crate::config::ENV_DATE_ORDER;
use crate::error::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 粒度の異なる日付参照
///
/// 月・日の妥当性はここでは検証しない（`resolve` が判断する）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialDateRef {
    Year(i32),
    YearMonth(i32, u32),
    YearMonthDay(i32, u32, u32),
}

impl fmt::Display for PartialDateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialDateRef::Year(y) => write!(f, "{}年", y),
            PartialDateRef::YearMonth(y, m) => write!(f, "{}年{}月", y, m),
            PartialDateRef::YearMonthDay(y, m, d) => write!(f, "{}年{}月{}日", y, m, d),
        }
    }
}

/// `01-02-2026` のように月と日の両方が12以下の場合の読み方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateOrder {
    /// MM-DD-YYYY（米国式）
    #[default]
    Mdy,
    /// DD-MM-YYYY（欧州式）
    Dmy,
}

impl FromStr for DateOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mdy" | "mm-dd-yyyy" | "us" => Ok(DateOrder::Mdy),
            "dmy" | "dd-mm-yyyy" | "eu" => Ok(DateOrder::Dmy),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_DATE_ORDER,
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DateOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrder::Mdy => write!(f, "mdy"),
            DateOrder::Dmy => write!(f, "dmy"),
        }
    }
}

/// 書式ごとのキャプチャの読み方
#[derive(Clone, Copy)]
enum Layout {
    Kanji,
    Year,
    YearFirst,
    Numeric,
    MonthYear,
    NameDayYear,
    DayNameYear,
    NameYear,
}

/// 書式一覧（上から順に試し、最初に一致したものを採用）
const PATTERNS: &[(&str, Layout)] = &[
    // 2026年2月18日 / 2026年2月 / 2026年
    (r"^(\d{4})\s*年(?:\s*(\d{1,2})\s*月(?:\s*(\d{1,2})\s*日)?)?$", Layout::Kanji),
    // 2026
    (r"^(\d{4})$", Layout::Year),
    // 2026-02-18 / 2026/2/18 / 2026.02
    (r"^(\d{4})[/\-.](\d{1,2})(?:[/\-.](\d{1,2}))?$", Layout::YearFirst),
    // 18-02-2026 / 02/18/2026
    (r"^(\d{1,2})[/\-.](\d{1,2})[/\-.](\d{4})$", Layout::Numeric),
    // 2/2026 / 02-2026
    (r"^(\d{1,2})[/\-.](\d{4})$", Layout::MonthYear),
    // Feb 18 2026
    (r"^([A-Za-z]+)\.?\s+(\d{1,2})\s+(\d{4})$", Layout::NameDayYear),
    // 18 Feb 2026
    (r"^(\d{1,2})\s+([A-Za-z]+)\.?\s+(\d{4})$", Layout::DayNameYear),
    // February 2026
    (r"^([A-Za-z]+)\.?\s+(\d{4})$", Layout::NameYear),
];

/// 正規化済みテキストから日付参照を抽出
/// 優先順位: 漢字形式 > 年のみ > 年先頭の数字形式 > 日/月混在の数字形式 > 月/年 > 英語月名形式
pub fn extract_date(text: &str, order: DateOrder) -> Option<PartialDateRef> {
    for (pattern, layout) in PATTERNS {
        if let Ok(re) = Regex::new(pattern) {
            if let Some(caps) = re.captures(text) {
                let num = |i: usize| -> Option<u32> { caps.get(i)?.as_str().parse().ok() };
                let year = |i: usize| -> Option<i32> { caps.get(i)?.as_str().parse().ok() };

                // 一致した書式で解釈できなければ他の書式は試さない
                return match layout {
                    Layout::Kanji | Layout::YearFirst => {
                        let y = year(1)?;
                        Some(match (num(2), num(3)) {
                            (Some(m), Some(d)) => PartialDateRef::YearMonthDay(y, m, d),
                            (Some(m), None) => PartialDateRef::YearMonth(y, m),
                            _ => PartialDateRef::Year(y),
                        })
                    }
                    Layout::Year => Some(PartialDateRef::Year(year(1)?)),
                    Layout::Numeric => {
                        let (a, b) = (num(1)?, num(2)?);
                        let (m, d) = disambiguate(a, b, order);
                        Some(PartialDateRef::YearMonthDay(year(3)?, m, d))
                    }
                    Layout::MonthYear => Some(PartialDateRef::YearMonth(year(2)?, num(1)?)),
                    Layout::NameDayYear => {
                        let m = month_from_name(caps.get(1)?.as_str())?;
                        Some(PartialDateRef::YearMonthDay(year(3)?, m, num(2)?))
                    }
                    Layout::DayNameYear => {
                        let m = month_from_name(caps.get(2)?.as_str())?;
                        Some(PartialDateRef::YearMonthDay(year(3)?, m, num(1)?))
                    }
                    Layout::NameYear => {
                        let m = month_from_name(caps.get(1)?.as_str())?;
                        Some(PartialDateRef::YearMonth(year(2)?, m))
                    }
                };
            }
        }
    }

    None
}

/// `A-B-YYYY` の (月, 日) を決める
///
/// 12を超える方は日とみなす。どちらも12以下なら設定に従う。
/// どちらも12を超える場合は月先頭として返し、`resolve` で不正な日付になる。
fn disambiguate(a: u32, b: u32, order: DateOrder) -> (u32, u32) {
    match (a > 12, b > 12) {
        (true, false) => (b, a),
        (false, true) => (a, b),
        (false, false) if order == DateOrder::Dmy => (b, a),
        _ => (a, b),
    }
}

/// 英語の月名（略称・正式名、大文字小文字は問わない）を月番号に変換
fn month_from_name(name: &str) -> Option<u32> {
    let month_map: HashMap<&str, u32> = [
        ("JAN", 1), ("JANUARY", 1),
        ("FEB", 2), ("FEBRUARY", 2),
        ("MAR", 3), ("MARCH", 3),
        ("APR", 4), ("APRIL", 4),
        ("MAY", 5),
        ("JUN", 6), ("JUNE", 6),
        ("JUL", 7), ("JULY", 7),
        ("AUG", 8), ("AUGUST", 8),
        ("SEP", 9), ("SEPT", 9), ("SEPTEMBER", 9),
        ("OCT", 10), ("OCTOBER", 10),
        ("NOV", 11), ("NOVEMBER", 11),
        ("DEC", 12), ("DECEMBER", 12),
    ].into_iter().collect();

    month_map.get(name.to_uppercase().as_str()).copied()
}
