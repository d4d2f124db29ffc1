// src/cli.rs

use crate::{constants, input::InputStrategy};
use clap::{Parser, ValueEnum, command, crate_version};
use std::path::PathBuf;

/// 定义日志输出级别
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// 带超时输入的实现方式
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// 按平台自动选择
    Auto,
    /// 逐键轮询
    KeyPoll,
    /// 等待输入可读
    Readiness,
}

impl InputMode {
    pub fn strategy(&self) -> InputStrategy {
        match self {
            InputMode::Auto => InputStrategy::detect(),
            InputMode::KeyPoll => InputStrategy::KeyPolling,
            InputMode::Readiness => InputStrategy::Readiness,
        }
    }
}

// command 属性
#[derive(Parser, Debug, Clone)]
#[command(
    version = crate_version!(),
    about,
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("mode")
        .multiple(false)
        .args(&["show_config", "stats", "config_help", "bot_commands", "pay"]),
))]
pub struct Cli {
    // --- 运行模式 (Mode) ---
    /// 只打印当前配置并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub show_config: bool,
    /// 打印下载统计快照中的计数表与链接表并退出
    #[arg(long, value_name = "FILE", help_heading = "Mode")]
    pub stats: Option<PathBuf>,
    /// 显示配置文件中每一项的说明并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub config_help: bool,
    /// 列出机器人支持的命令并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub bot_commands: bool,
    /// 显示赞赏码并退出
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Mode")]
    pub pay: bool,

    // --- 配置选项 (Options) ---
    /// 指定配置文件路径，默认为用户主目录下的配置文件
    #[arg(short, long, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,
    /// 跳过询问，直接重新配置(旧配置会被备份)
    #[arg(short, long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub reconfigure: bool,
    /// 询问是否重新配置时的等待秒数，超时按 n 处理
    #[arg(long, value_name = "SECS", default_value_t = constants::RE_CONFIG_TIMEOUT_SECS, help_heading = "Options")]
    pub re_config_timeout: u64,
    /// 不打印启动横幅
    #[arg(long, action = clap::ArgAction::SetTrue, help_heading = "Options")]
    pub no_banner: bool,

    // --- 通用选项 (General) ---
    /// 显示此帮助信息并退出
    #[arg(short = 'h', long, action = clap::ArgAction::Help, global = true, help_heading = "General")]
    _help: Option<bool>,
    /// 显示版本信息并退出
    #[arg(short = 'V', long, action = clap::ArgAction::Version, global = true, help_heading = "General")]
    _version: Option<bool>,
    /// (隐藏参数) 强制指定带超时输入的实现方式
    #[arg(long, value_enum, default_value_t = InputMode::Auto, hide = true)]
    pub input_mode: InputMode,
    /// (隐藏参数) 设置日志文件的输出级别，用于调试
    #[arg(long, value_enum, default_value_t = LogLevel::Off, global = true, hide = true)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["trmd"]).unwrap();
        assert_eq!(cli.re_config_timeout, constants::RE_CONFIG_TIMEOUT_SECS);
        assert_eq!(cli.input_mode, InputMode::Auto);
        assert_eq!(cli.log_level, LogLevel::Off);
        assert!(!cli.reconfigure);
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(Cli::try_parse_from(["trmd", "--show-config", "--pay"]).is_err());
        let cli = Cli::try_parse_from(["trmd", "--stats", "s.json", "--input-mode", "key-poll"]).unwrap();
        assert_eq!(cli.stats, Some(PathBuf::from("s.json")));
        assert_eq!(cli.input_mode.strategy(), InputStrategy::KeyPolling);
    }
}
