// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use log::{error, info, warn};
use std::{env, process};
use trmd::{
    cli::{Cli, LogLevel},
    constants,
    error::AppError,
    run_from_cli, symbols,
};

fn init_logger(level: LogLevel) {
    if level == LogLevel::Off {
        return;
    }

    let app_name = clap::crate_name!();

    // 优先使用用户主目录下的应用目录
    let log_file_path = match dirs::home_dir() {
        Some(home) => home
            .join(constants::CONFIG_DIR_NAME)
            .join(constants::LOG_FILE_NAME),
        None => {
            eprintln!("警告: 无法获取用户主目录，日志将写入临时目录。");
            env::temp_dir().join(app_name).join(constants::LOG_FILE_NAME)
        }
    };

    if let Some(dir) = log_file_path.parent() {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("警告: 无法创建日志目录 {:?}: {}", dir, e);
        }
    }

    let file_appender = match fern::log_file(&log_file_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "警告: 无法打开主日志文件 {:?} : {}。将尝试使用备用日志文件。",
                log_file_path, e
            );
            let fallback_path =
                env::temp_dir().join(format!("{}-{}", app_name, constants::LOG_FALLBACK_FILE_NAME));
            match fern::log_file(&fallback_path) {
                Ok(fb_file) => {
                    warn!("日志将写入备用文件: {:?}", fallback_path);
                    fb_file
                }
                Err(e_fb) => {
                    eprintln!(
                        "错误: 无法创建主日志和备用日志文件 {:?}: {}。日志将不会被记录到文件。",
                        fallback_path, e_fb
                    );
                    return;
                }
            }
        }
    };

    let result = fern::Dispatch::new()
        .level(level.into())
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{:<5}] [{}:{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.line().unwrap_or(0),
                message
            ))
        })
        .chain(file_appender)
        .apply();

    if let Err(e) = result {
        eprintln!("警告: 日志系统初始化失败: {}", e);
    }
}

fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }

    let after_help = format!(
        "示例:\n  # 交互式配置 (已有完整配置时会询问是否重新配置)\n  {bin}\n\n  # 跳过询问直接重新配置\n  {bin} --reconfigure\n\n  # 查看当前配置\n  {bin} --show-config\n\n  # 查看下载统计\n  {bin} --stats stats.json",
        bin = clap::crate_name!()
    );
    let cmd = Cli::command().after_help(after_help);
    let args = Cli::from_arg_matches(&cmd.get_matches()).unwrap_or_else(|e| e.exit());
    init_logger(args.log_level);

    // 行缓冲模式下的 Ctrl+C 由信号处理；原始模式下由按键轮询自行处理
    if let Err(e) = ctrlc::set_handler(|| {
        crossterm::terminal::disable_raw_mode().ok();
        println!("\n{} 用户强制中断程序。", *symbols::WARN);
        warn!("用户通过 Ctrl+C 中断程序。");
        process::exit(130);
    }) {
        error!("无法监听 Ctrl-C 信号: {}", e);
    }

    if let Err(e) = run_from_cli(&args) {
        match e {
            AppError::UserInterrupt => {
                println!("\n{} 用户强制中断程序。", *symbols::WARN);
                warn!("程序被用户中断。");
                process::exit(130);
            }
            _ => {
                error!("程序执行出错: {}", e);
                eprintln!("\n{} {}", *symbols::ERROR, format!("程序执行出错: {}", e).red());
                process::exit(1);
            }
        }
    }
    info!("程序正常退出。");
}
