//! Journal Fixtures CLI
//!
//! 日志条目夹具工具的命令行入口点。

use anyhow::Context;
use clap::Parser;
use journal_fixtures::cli::{Cli, CommandRunner, Commands, GenerateOptions};
use journal_shared::config::AppConfig;
use journal_shared::observability::{self, ObservabilityConfig};
use tracing::info;

const SERVICE_NAME: &str = "journal-fixtures";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("加载配置失败")?;

    // 命令行参数优先于配置文件，RUST_LOG 又优先于两者
    let mut logging = config.observability.clone();
    if let Some(level) = cli.log_level.clone() {
        logging.log_level = level;
    }
    if cli.json_logs {
        logging.json_logs = true;
    }
    observability::init(&ObservabilityConfig::from_settings(SERVICE_NAME, &logging))?;
    info!(environment = %config.environment, "配置已加载");

    let runner = CommandRunner::new(config.generator);

    match cli.command {
        Commands::Generate {
            target,
            count,
            window_seconds,
            seed,
            manifest,
        } => {
            runner.run_generate(GenerateOptions {
                target,
                count,
                window_seconds,
                seed,
                manifest,
            })?;
        }
        Commands::Verify { target } => {
            runner.run_verify(&target)?;
        }
        Commands::Clean { target, manifest } => {
            runner.run_clean(&target, manifest.as_deref())?;
        }
    }

    Ok(())
}
