//! `filechat check-provider`: verify the configured completion provider.

use anyhow::{Context, Result, bail};
use console::style;

use filechat_infra::config::{load_global_config, resolve_data_dir};
use filechat_infra::llm::{resolve_provider, test_provider_connection};

/// Resolve the provider from `config.toml` and send a minimal completion.
pub async fn check_provider() -> Result<()> {
    let data_dir = resolve_data_dir();
    let config = load_global_config(&data_dir).await;

    let Some(provider) = resolve_provider(&config, |name| std::env::var(name).ok())
        .context("failed to build completion provider")?
    else {
        println!();
        println!(
            "  {} No completion provider configured; replies will be \"{}\".",
            style("!").yellow().bold(),
            filechat_types::record::MODEL_NOT_FOUND
        );
        println!(
            "  {}",
            style(format!(
                "Add a [completion] section to {}",
                data_dir.join("config.toml").display()
            ))
            .dim()
        );
        println!();
        return Ok(());
    };

    println!();
    println!(
        "  Testing {} ({})...",
        style(provider.name()).cyan(),
        style(provider.model()).dim()
    );

    match test_provider_connection(&provider).await {
        Ok(()) => {
            println!("  {} Provider responded", style("✓").green());
            println!();
            Ok(())
        }
        Err(e) => {
            println!("  {} {}", style("✗").red(), e);
            println!();
            bail!("provider check failed: {e}")
        }
    }
}
