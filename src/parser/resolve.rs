//! 日付参照を実際の暦日・期間に変換

use super::date::PartialDateRef;
use crate::error::SelectionError;
use crate::span::{CalendarDate, DateSpan};

/// 日付参照を単日または期間に変換
///
/// - 年月日: 実在する日付のみ（2月30日などは補正せずエラー）
/// - 年月: その月の1日〜末日
/// - 年: 1月1日〜12月31日
pub fn resolve(partial: PartialDateRef) -> Result<DateSpan, SelectionError> {
    let invalid = SelectionError::CalendarInvalid(partial);
    match partial {
        PartialDateRef::YearMonthDay(year, month, day) => CalendarDate::from_ymd_opt(year, month, day)
            .map(DateSpan::single)
            .ok_or(invalid),
        PartialDateRef::YearMonth(year, month) => {
            let first = CalendarDate::from_ymd_opt(year, month, 1).ok_or(invalid.clone())?;
            let last = last_day_of_month(year, month).ok_or(invalid)?;
            Ok(DateSpan::between(first, last))
        }
        PartialDateRef::Year(year) => {
            let first = CalendarDate::from_ymd_opt(year, 1, 1).ok_or(invalid.clone())?;
            let last = CalendarDate::from_ymd_opt(year, 12, 31).ok_or(invalid)?;
            Ok(DateSpan::between(first, last))
        }
    }
}

/// 月末日（翌月1日の前日）
fn last_day_of_month(year: i32, month: u32) -> Option<CalendarDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    CalendarDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
