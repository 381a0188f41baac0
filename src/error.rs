//! エラー定義

use crate::parser::PartialDateRef;
use crate::span::DateSpan;
use thiserror::Error;

/// 選択入力の解析で発生するエラー
///
/// UI側ではどれも「選択なし」として扱うが、テストやログのために区別して保持する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// どの書式にも一致しなかった
    #[error("日付として解釈できません: `{0}`")]
    ParseFailure(String),

    /// 書式は正しいが実在しない日付 (例: 2月30日, 13月)
    ///
    /// 入力された粒度のまま保持する（年月なら日は含まない）。
    #[error("存在しない日付です: {0}")]
    CalendarInvalid(PartialDateRef),

    /// データの存在する期間と重ならない
    #[error("データ範囲外です: {0}")]
    OutOfDataRange(DateSpan),
}

/// 設定値の読み込みエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// 値を解釈できない環境変数
    #[error("環境変数 `{key}` の値が不正です: `{value}`")]
    InvalidValue { key: &'static str, value: String },
}
