// src/lib.rs

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod gradient;
pub mod input;
pub mod meta;
pub mod models;
pub mod params;
pub mod process;
pub mod progress;
pub mod qr;
pub mod symbols;
pub mod table;
pub mod ui;
pub mod utils;
pub mod validator;
pub mod workflows;

use crate::{
    cli::Cli,
    config::store::ConfigStore,
    error::AppResult,
    input::InputSource,
    models::bot::BotCommand,
    ui::Console,
    workflows::ConfigureOptions,
};
use colored::*;
use log::{debug, info};
use std::{io::Write, time::Duration};

/// 库的公共入口点，由 `main.rs` 调用
pub fn run_from_cli(args: &Cli) -> AppResult<()> {
    let mut console = Console::stdio();
    run_with_console(args, &mut console)
}

/// 与 [`run_from_cli`] 相同，但输入输出由调用方提供。
pub fn run_with_console<S: InputSource, W: Write>(args: &Cli, console: &mut Console<S, W>) -> AppResult<()> {
    debug!("CLI 参数: {:?}", args);
    if !args.no_banner {
        meta::print_meta(console.out())?;
    }

    if args.config_help {
        return meta::print_helper(console);
    }
    if args.bot_commands {
        let lines: Vec<String> = BotCommand::values()
            .iter()
            .map(BotCommand::with_description)
            .collect();
        let lines: Vec<&str> = lines.iter().flat_map(|l| l.lines()).collect();
        return console.box_message("机器人命令", &lines, |s| s.cyan());
    }
    if args.pay {
        return meta::pay(console.out());
    }
    if let Some(snapshot) = &args.stats {
        return workflows::show_stats(console, snapshot);
    }

    let store = ConfigStore::new(args.config.clone())?;
    if args.show_config {
        return workflows::show_config(console, &store);
    }

    let options = ConfigureOptions {
        reconfigure: args.reconfigure,
        re_config_timeout: Duration::from_secs(args.re_config_timeout),
        strategy: args.input_mode.strategy(),
    };
    debug!("带超时输入的实现方式: {:?}", options.strategy);
    let config = workflows::configure(console, &store, &options)?;
    info!("配置完成: {}", store.path().display());
    let done = format!(
        "配置完成,最大下载任务数:{}。",
        config
            .max_download_task
            .unwrap_or(constants::DEFAULT_MAX_DOWNLOAD_TASK)
    );
    console.println(format!(
        "\n{} {}",
        *symbols::OK,
        gradient::gen_gradient_text(&done, gradient::GREEN2PINK_11)
    ))?;
    Ok(())
}
