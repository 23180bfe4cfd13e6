use super::Target;
use crate::ChangeArgs;
use anyhow::Context;
use colored::Colorize;
use stackflow_core::{ChangeRequest, Stack};
use std::path::Path;

fn load_stack(name: &str, template: &Path, bucket: Option<&str>) -> anyhow::Result<Stack> {
    let body = std::fs::read_to_string(template).with_context(|| {
        format!(
            "テンプレートファイルを読み込めません: {}",
            template.display()
        )
    })?;

    let stack = Stack::new(name, body);
    Ok(match bucket {
        Some(bucket) => stack.with_bucket(bucket),
        None => stack,
    })
}

/// 引数から対象スタックを組み立てる（create のみテンプレートを読む）
fn resolve_stack(target: &Target, args: &ChangeArgs) -> anyhow::Result<Stack> {
    if args.request != ChangeRequest::Create {
        return Ok(Stack::named(&args.stack));
    }

    let template = args
        .template
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("create には --template の指定が必要です"))?;
    let bucket = args.bucket.as_deref().or(target.settings.bucket.as_deref());
    load_stack(&args.stack, template, bucket)
}

pub async fn handle(target: &Target, args: ChangeArgs) -> anyhow::Result<()> {
    // テンプレート読み込みは AWS 接続より先に行う
    let stack = resolve_stack(target, &args)?;
    let change_set = args.change_set.unwrap_or_default();

    match args.request {
        ChangeRequest::Create => println!(
            "{}",
            format!("Change-Set {} を作成中...", change_set).yellow()
        ),
        ChangeRequest::Execute => println!(
            "{}",
            format!("Change-Set {} を実行中...", change_set).yellow()
        ),
        _ => {}
    }
    println!("スタック: {}", stack.name.cyan());

    let orchestrator = target.connect().await;
    orchestrator
        .change(&stack, args.request, &change_set)
        .await
        .with_context(|| format!("スタック '{}' の Change-Set 操作に失敗しました", stack.name))?;

    Ok(())
}
