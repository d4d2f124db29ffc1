// src/constants.rs

pub const UI_WIDTH: usize = 88;
pub const SOFTWARE_FULL_NAME: &str = "Telegram Restricted Media Downloader";
pub const COPYRIGHT: &str = "Copyright (C) 2024-2025 Gentlesprite <https://github.com/Gentlesprite>";
pub const LICENSE: &str = "MIT License";
pub const CONFIG_DIR_NAME: &str = concat!(".", clap::crate_name!());
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const BACKUP_DIR_NAME: &str = "backup";
pub const LOG_FILE_NAME: &str = "trmd.log";
pub const LOG_FALLBACK_FILE_NAME: &str = "trmd-fallback.log";
pub const DEFAULT_SAVE_DIR: &str = "downloads";

/// 提示中"上一次的记录"为空时展示的占位符。
pub const UNDEFINED: &str = "无";
pub const API_ID_MAX_LENGTH: usize = 32;
pub const API_HASH_LENGTH: usize = 32;
pub const BOT_TOKEN_SEPARATOR: &str = ":";
pub const LINKS_FILE_SUFFIX: &str = ".txt";
pub const DEFAULT_MAX_DOWNLOAD_TASK: u32 = 5;
pub const DEFAULT_DOWNLOAD_TYPE_CODE: u8 = 3;
pub const PROXY_SCHEMES: [&str; 3] = ["http", "socks4", "socks5"];
pub const HOSTNAME_FORMAT: &str = "x.x.x.x";
pub const PORT_FORMAT: &str = "0~65535";
pub const YES_NO_FORMAT: &str = "y|n";
pub const UNKNOWN: &str = "未知";

pub const RE_CONFIG_TIMEOUT_SECS: u64 = 5;
pub const KEY_POLL_INTERVAL_MS: u64 = 100;
pub const TIMEOUT_NOTICE: &str = "输入超时,已自动设置为默认值。";
pub const TIMEOUT_NOTICE_COLOR: &str = "#FF4689";
pub const ACCOUNT_NOTICE_COLOR: &str = "#FF4689";
pub const CURRENT_TASK_COLOR: &str = "#B1DB74";

pub const FILENAME_BYTE_LIMIT: usize = 230;
pub const TEMP_FILE_SUFFIX: &str = ".temp";
pub const PAY_QR_CONTENT: &str = "wxp://f2f0g8lKGhzEsr0rwtKWTTB2gQzs9Xg9g31aBvlpbILowMTa5SAMMEwn0JH1VEf2TGbS";

pub const BANNER: &str = r#"
     ██████╗ ███████╗███╗   ██╗████████╗██╗     ███████╗███████╗██████╗ ██████╗ ██╗████████╗███████╗    
    ██╔════╝ ██╔════╝████╗  ██║╚══██╔══╝██║     ██╔════╝██╔════╝██╔══██╗██╔══██╗██║╚══██╔══╝██╔════╝    
    ██║  ███╗█████╗  ██╔██╗ ██║   ██║   ██║     █████╗  ███████╗██████╔╝██████╔╝██║   ██║   █████╗      
    ██║   ██║██╔══╝  ██║╚██╗██║   ██║   ██║     ██╔══╝  ╚════██║██╔═══╝ ██╔══██╗██║   ██║   ██╔══╝      
    ╚██████╔╝███████╗██║ ╚████║   ██║   ███████╗███████╗███████║██║     ██║  ██║██║   ██║   ███████╗    
     ╚═════╝ ╚══════╝╚═╝  ╚═══╝   ╚═╝   ╚══════╝╚══════╝╚══════╝╚═╝     ╚═╝  ╚═╝╚═╝   ╚═╝   ╚══════╝           
"#;

pub const HELP_CONFIG_GUIDE: &str = r#"
api_id / api_hash:
   登录 https://my.telegram.org/apps 创建应用后获得。
   api_id 为「纯数字」, api_hash 为「32位」的字符串。
bot_token (可选):
   向 @BotFather 发送 /newbot 创建机器人后获得, 格式为 "数字:字符串"。
links:
   一个以「.txt」结尾的文本文件, 每行一个需要下载的频道或消息链接。
save_directory:
   媒体的保存目录, 不存在时会询问是否创建。
max_download_task:
   同时进行的最大下载任务数, 默认 5, 值过高可能会导致网络相关问题。
download_type:
   1.视频 2.图片 3.视频和图片, 默认 3。
is_shutdown:
   下载完成后是否自动关机。
enable_proxy / proxy:
   是否使用代理。启用时需要填写 scheme(http|socks4|socks5)、
   hostname(仅支持ipv4地址)与 port(0~65535), 账号和密码需要同时填写或同时留空。"#;
