use super::Target;
use anyhow::Context;
use colored::Colorize;
use stackflow_core::Stack;

pub async fn handle(target: &Target, stack: &str) -> anyhow::Result<()> {
    println!("{}", format!("スタック {} を削除中...", stack).yellow());

    let orchestrator = target.connect().await;
    orchestrator
        .terminate(&Stack::named(stack))
        .await
        .with_context(|| format!("スタック '{}' の削除に失敗しました", stack))?;

    Ok(())
}
