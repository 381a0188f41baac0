//! 入力文字列の正規化

use regex::Regex;
use std::sync::OnceLock;

/// 範囲の区切りとして扱う文字（全角カンマ、波線、至/到）
const RANGE_CONNECTORS: &[char] = &['，', '~', '～', '〜', '至', '到'];

/// ASCIIハイフンに寄せるダッシュ類
const DASHES: &[char] = &['－', '–', '—', '‐', '‑', '−'];

static TO_WORD: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

/// 区切り文字・空白を正規化する
///
/// - 前後の空白を除去し、連続する空白は1つにまとめる
/// - 範囲の区切り（`，` `～` `至` `到` `to` など）は `~` に統一
/// - ダッシュ類は `-` に統一、ASCIIカンマは空白扱い
///
/// 失敗しない。空文字列もそのまま返す（後段で弾く）。
pub fn normalize(raw: &str) -> String {
    let mut s: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            ',' => ' ',
            c if RANGE_CONNECTORS.contains(&c) => '~',
            c if DASHES.contains(&c) => '-',
            c => c,
        })
        .collect();

    // 英字に隣接しない "to" だけを区切りとみなす（October などを壊さない）
    let to_word = TO_WORD.get_or_init(|| {
        Regex::new(r"(^|[^A-Za-z])(?i:to)([^A-Za-z]|$)").expect("正規表現のコンパイルに失敗")
    });
    // "to to" のように区切り文字を共有する場合は1回では置換しきれない
    while to_word.is_match(&s) {
        s = to_word.replace_all(&s, "${1}~${2}").into_owned();
    }

    let whitespace = WHITESPACE
        .get_or_init(|| Regex::new(r"\s+").expect("正規表現のコンパイルに失敗"));
    whitespace.replace_all(&s, " ").trim().to_string()
}
