// src/validator.rs

//! 用户输入的格式校验。只做判断和记录日志，重试由调用方负责。

use crate::{error::AppResult, input::InputSource, models::KeyWord, ui::Console};
use log::warn;
use std::{fs, io::Write, net::Ipv4Addr, path::Path};

/// y/n 类问题的三态结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
    Invalid,
}

impl YesNo {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "y" => YesNo::Yes,
            "n" => YesNo::No,
            _ => YesNo::Invalid,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            YesNo::Yes => Some(true),
            YesNo::No => Some(false),
            YesNo::Invalid => None,
        }
    }
}

pub fn is_contain_chinese(text: &str) -> bool {
    let contains = text.chars().any(|c| ('\u{4e00}'..='\u{9fff}').contains(&c));
    if contains {
        warn!("\"{}\"中包含中文,路径中含有中文可能会导致意外的错误。", text);
    }
    contains
}

pub fn is_valid_api_id(api_id: &str, valid_length: usize) -> bool {
    if api_id.chars().count() >= valid_length {
        warn!("api_id 的长度不应超过 {} 位,你输入的可能是 api_hash。", valid_length - 1);
        return false;
    }
    if api_id.is_empty() || !api_id.chars().all(|c| c.is_ascii_digit()) {
        warn!("api_id 应为纯数字,\"{}\"不是一个有效的 api_id。", api_id);
        return false;
    }
    true
}

pub fn is_valid_api_hash(api_hash: &str, valid_length: usize) -> bool {
    api_hash.chars().count() == valid_length
}

pub fn is_valid_bot_token(bot_token: &str, separator: &str) -> bool {
    bot_token.contains(separator)
}

pub fn is_valid_links_file(file_path: &Path, valid_format: &str) -> bool {
    file_path.is_file() && file_path.to_string_lossy().ends_with(valid_format)
}

/// 目录不存在时询问是否创建(直接回车视为创建)，返回最终该路径是否为目录。
pub fn is_valid_save_directory<S: InputSource, W: Write>(
    console: &mut Console<S, W>,
    save_directory: &Path,
) -> AppResult<bool> {
    if !save_directory.exists() {
        loop {
            let question = format!(
                "目录:\"{}\"不存在,是否创建? - 「y|n」(默认y):",
                save_directory.display()
            );
            match console.prompt(&question)?.to_lowercase().as_str() {
                "y" | "" => {
                    match fs::create_dir_all(save_directory) {
                        Ok(()) => console.info(&format!("成功创建目录:\"{}\"", save_directory.display()))?,
                        Err(e) => console.error(&format!(
                            "创建目录:\"{}\"失败,{}:\"{}\"",
                            save_directory.display(),
                            KeyWord::Reason,
                            e
                        ))?,
                    }
                    break;
                }
                "n" => break,
                other => console.warn(&format!("意外的参数:\"{}\",支持的参数 - 「y|n」", other))?,
            }
        }
    }
    Ok(save_directory.is_dir())
}

pub fn is_valid_max_download_task(max_tasks: &str) -> bool {
    max_tasks.trim().parse::<i64>().is_ok_and(|n| n > 0)
}

pub fn is_valid_enable_proxy(enable_proxy: &str) -> YesNo {
    YesNo::parse(enable_proxy)
}

pub fn is_valid_scheme(scheme: &str, valid_format: &[&str]) -> bool {
    valid_format.contains(&scheme)
}

/// 仅支持 IPv4 地址。
pub fn is_valid_hostname(hostname: &str) -> bool {
    hostname.parse::<Ipv4Addr>().is_ok()
}

pub fn is_valid_port(port: &str) -> bool {
    port.trim().parse::<i64>().is_ok_and(|p| 0 < p && p <= 65535)
}

pub fn is_valid_download_type(dtype: &str) -> bool {
    dtype.trim().parse::<i64>().is_ok_and(|code| (1..=3).contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::scripted::ScriptedSource;
    use tempfile::tempdir;

    #[test]
    fn test_is_valid_api_id() {
        assert!(is_valid_api_id("123456", 32));
        assert!(is_valid_api_id(&"9".repeat(31), 32));
        assert!(!is_valid_api_id(&"9".repeat(32), 32));
        assert!(!is_valid_api_id("", 32));
        assert!(!is_valid_api_id("12a4", 32));
        assert!(!is_valid_api_id("-123", 32));
        assert!(!is_valid_api_id("١٢٣", 32));
        assert!(!is_valid_api_id("0123456789abcdef0123456789abcdef", 32));
    }

    #[test]
    fn test_is_valid_port() {
        assert!(is_valid_port("1"));
        assert!(is_valid_port("65535"));
        assert!(!is_valid_port("0"));
        assert!(!is_valid_port("65536"));
        assert!(!is_valid_port("-1"));
        assert!(!is_valid_port("http"));
        assert!(!is_valid_port(""));
    }

    #[test]
    fn test_is_valid_hostname_rejects_ipv6() {
        assert!(is_valid_hostname("127.0.0.1"));
        assert!(!is_valid_hostname("::1"));
        assert!(!is_valid_hostname("localhost"));
        assert!(!is_valid_hostname("256.0.0.1"));
    }

    #[test]
    fn test_is_valid_links_file() {
        let dir = tempdir().unwrap();
        assert!(!is_valid_links_file(&dir.path().join("missing.txt"), ".txt"));

        let links = dir.path().join("links.txt");
        fs::write(&links, "https://t.me/a/1").unwrap();
        assert!(is_valid_links_file(&links, ".txt"));

        let csv = dir.path().join("links.csv");
        fs::write(&csv, "https://t.me/a/1").unwrap();
        assert!(!is_valid_links_file(&csv, ".txt"));
        assert!(!is_valid_links_file(dir.path(), ".txt"));
    }

    #[test]
    fn test_simple_predicates() {
        assert!(is_valid_api_hash("0123456789abcdef0123456789abcdef", 32));
        assert!(!is_valid_api_hash("0123", 32));
        assert!(is_valid_bot_token("123:abc", ":"));
        assert!(!is_valid_bot_token("123abc", ":"));
        assert!(is_valid_max_download_task("3"));
        assert!(!is_valid_max_download_task("0"));
        assert!(!is_valid_max_download_task("three"));
        assert_eq!(is_valid_enable_proxy("Y"), YesNo::Yes);
        assert_eq!(is_valid_enable_proxy("n"), YesNo::No);
        assert_eq!(is_valid_enable_proxy("maybe"), YesNo::Invalid);
        assert!(is_valid_scheme("socks5", &["http", "socks4", "socks5"]));
        assert!(!is_valid_scheme("https", &["http", "socks4", "socks5"]));
        assert!(is_valid_download_type("3"));
        assert!(!is_valid_download_type("4"));
        assert!(is_contain_chinese("/下载/视频"));
        assert!(!is_contain_chinese("/downloads"));
    }

    #[test]
    fn test_is_valid_save_directory_creates_on_request() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("media");
        let mut console = Console::new(ScriptedSource::with_lines(["maybe", "y"]), Vec::new());
        assert!(is_valid_save_directory(&mut console, &target).unwrap());
        assert!(target.is_dir());
        let text = String::from_utf8(console.into_parts().1).unwrap();
        assert!(text.contains("意外的参数:\"maybe\""));
    }

    #[test]
    fn test_is_valid_save_directory_declined() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("media");
        let mut console = Console::new(ScriptedSource::with_lines(["n"]), Vec::new());
        assert!(!is_valid_save_directory(&mut console, &target).unwrap());
        assert!(!target.exists());

        let mut console = Console::new(ScriptedSource::new(), Vec::new());
        assert!(is_valid_save_directory(&mut console, dir.path()).unwrap());
    }
}
