mod commands;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use stackflow_core::ChangeRequest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stackflow")]
#[command(about = "Change-Set で CloudFormation スタックを安全に更新する", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// AWS リージョン（設定ファイルより優先）
    #[arg(long, global = true, env = "STACKFLOW_REGION")]
    region: Option<String>,

    /// AWS プロファイル（設定ファイルより優先）
    #[arg(long, global = true, env = "STACKFLOW_PROFILE")]
    profile: Option<String>,

    /// デバッグログを出力
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Change-Set の作成・実行・一覧・削除・詳細表示
    Change(ChangeArgs),
    /// スタックを削除し、完了までイベントを表示
    Terminate {
        /// スタック名
        stack: String,
    },
    /// バージョン情報を表示
    Version,
}

#[derive(Args)]
pub struct ChangeArgs {
    /// 操作: create, execute, list, rm (delete), desc (describe)
    pub request: ChangeRequest,
    /// スタック名
    pub stack: String,
    /// Change-Set 名（list では不要）
    pub change_set: Option<String>,
    /// レンダリング済みテンプレートのパス（create で必須）
    #[arg(short, long)]
    pub template: Option<PathBuf>,
    /// テンプレートをアップロードするバケット（省略時はインライン送信）
    #[arg(short, long)]
    pub bucket: Option<String>,
}

fn init_tracing(debug: bool) {
    // --debug は RUST_LOG より優先
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("stackflow {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings =
        stackflow_config::load_settings().context("設定の読み込みに失敗しました")?;
    tracing::debug!("Loaded settings: {:?}", settings);
    let target = commands::Target {
        region: cli.region.or_else(|| settings.region.clone()),
        profile: cli.profile.or_else(|| settings.profile.clone()),
        settings,
    };

    let result = match cli.command {
        Commands::Change(args) => commands::change::handle(&target, args).await,
        Commands::Terminate { stack } => commands::terminate::handle(&target, &stack).await,
        Commands::Version => Ok(()),
    };

    if let Err(ref e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
