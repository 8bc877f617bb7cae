use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "florascan")]
#[command(about = "植物データセット管理・写真識別ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 保存先ファイル（設定より優先）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSV/JSONファイルからデータセットを取り込む（置き換え）
    Import {
        /// 入力ファイル（.csv ならCSV、それ以外はJSON）
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 標準入力のJSONからデータセットを取り込む
    Paste,

    /// データセットの状態とプレビューを表示
    Show,

    /// データセットを削除
    Clear {
        /// 確認せずに削除
        #[arg(short, long)]
        yes: bool,
    },

    /// サンプルデータセットを書き出す
    Sample {
        /// 出力ファイル（デフォルト: florascan-sample-dataset.json）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 写真または説明文から植物を識別
    Identify {
        /// 写真ファイル
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// 植物の説明
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// 直近の識別結果を表示
    Result,

    /// 設定を表示/編集
    Config {
        /// 識別APIのオリジンを設定
        #[arg(long)]
        set_api_base: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
