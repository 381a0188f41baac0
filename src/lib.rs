//! 前線レポートダッシュボード - 日付入力の解析と地点別集計のコア
//!
//! # 機能
//! - 自由入力（`2026-02-18`, `2026年2月`, `Feb 18 2026`, `2026 ~ 2026-02` など）の解析
//! - 年・月単位の入力を期間に展開し、データのある期間でクリップ
//! - 複数の選択範囲を日付一覧に展開（昇順・重複なし）
//! - 州 → 方向 → 集落ごとの集計（地図マーカー・積み上げグラフ用）

pub mod config;
pub mod dataset;
pub mod error;
pub mod parser;
pub mod report;
pub mod selection;
pub mod session;
pub mod span;

pub use config::Config;
pub use dataset::Dataset;
pub use error::{ConfigError, SelectionError};
pub use parser::{parse_selection, DateOrder};
pub use report::{Metric, Report, ValueSource};
pub use selection::{EmptySelection, SelectionSet};
pub use session::Session;
pub use span::{CalendarDate, DataBounds, DateSpan};
