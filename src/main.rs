//! 前線レポートダッシュボード - メインエントリポイント
//!
//! 使い方:
//!   frontline_dashboard [--data <path>] [選択 ...]
//!
//! 選択を引数で渡した場合は集計結果を1回出力する。
//! 引数が無い場合は標準入力から1行ずつ読み、`rm <番号>` で削除、それ以外は選択として追加し、
//! 操作のたびに集計結果を出力する。

use anyhow::{Context, Result};
use frontline_dashboard::{Config, Dataset, Session};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

fn main() -> Result<()> {
    // ロギング初期化
    tracing_subscriber::fmt::init();

    // 環境変数の読み込み
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("設定の読み込みに失敗")?;

    // 引数の解釈（--data 以外はすべて選択入力）
    let mut data_path = config.data_path.clone();
    let mut inputs = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--data" {
            let path = args.next().context("--data にパスが指定されていません")?;
            data_path = Some(PathBuf::from(path));
        } else {
            inputs.push(arg);
        }
    }

    let data_path = data_path.context("データセットが指定されていません (--data または FRONTLINE_DATA)")?;
    let dataset = Dataset::load(&data_path)?;
    let bounds = dataset.bounds();
    let mut session = Session::new(&config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !inputs.is_empty() {
        for input in &inputs {
            // 失敗した入力は読み飛ばす（Session::add が warn! で記録済み）
            if session.add(input, &bounds).is_err() {
                continue;
            }
        }
        let report = session.report(&bounds, dataset.geography(), &dataset);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    for line in io::stdin().lock().lines() {
        let line = line.context("標準入力の読み込みに失敗")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(index) = line.strip_prefix("rm ") {
            match index.trim().parse::<usize>() {
                Ok(index) => {
                    session.remove(index);
                }
                Err(_) => {
                    warn!("削除番号が不正です: {:?}", index);
                    continue;
                }
            }
        } else if session.add(line, &bounds).is_err() {
            continue;
        }

        let report = session.report(&bounds, dataset.geography(), &dataset);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        out.flush()?;
    }

    Ok(())
}
