// src/process.rs

use crate::{
    config::ProxyConfig,
    constants,
    error::{AppError, AppResult},
    gradient,
    models::{DownloadType, MediaFlags},
};
use log::warn;

/// 交互配置中的字段，顺序决定提示使用的颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    ApiId,
    ApiHash,
    BotToken,
    Links,
    SaveDirectory,
    MaxDownloadTask,
    DownloadType,
    IsShutdown,
    EnableProxy,
    ConfigProxy,
    Scheme,
    Hostname,
    Port,
    ProxyAuthentication,
}

impl FieldKey {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKey::ApiId => "api_id",
            FieldKey::ApiHash => "api_hash",
            FieldKey::BotToken => "bot_token",
            FieldKey::Links => "links",
            FieldKey::SaveDirectory => "save_directory",
            FieldKey::MaxDownloadTask => "max_download_task",
            FieldKey::DownloadType => "download_type",
            FieldKey::IsShutdown => "is_shutdown",
            FieldKey::EnableProxy => "enable_proxy",
            FieldKey::ConfigProxy => "config_proxy",
            FieldKey::Scheme => "scheme",
            FieldKey::Hostname => "hostname",
            FieldKey::Port => "port",
            FieldKey::ProxyAuthentication => "proxy_authentication",
        }
    }
}

/// 下载类型代码转为媒体类型列表：1.视频 2.图片 3.视频和图片。
pub fn set_dtype(code: i64) -> AppResult<Vec<DownloadType>> {
    match code {
        1 => Ok(vec![DownloadType::Video]),
        2 => Ok(vec![DownloadType::Photo]),
        3 => Ok(vec![DownloadType::Video, DownloadType::Photo]),
        other => Err(AppError::InvalidDownloadTypeCode(other)),
    }
}

/// 获取所需下载文件的类型，文档类型不参与判断；无法识别时返回 `None`。
pub fn get_dtype(download_dtype: &[DownloadType]) -> Option<MediaFlags> {
    let media: Vec<DownloadType> = download_dtype
        .iter()
        .copied()
        .filter(|d| *d != DownloadType::Document)
        .collect();
    match media.as_slice() {
        [DownloadType::Video] => Some(MediaFlags { video: true, photo: false }),
        [DownloadType::Photo] => Some(MediaFlags { video: false, photo: true }),
        [_, _] => Some(MediaFlags { video: true, photo: true }),
        _ => None,
    }
}

/// `set_dtype` 的逆运算，用于把上一次的记录展示为代码。
pub fn dtype_code(download_dtype: &[DownloadType]) -> Option<u8> {
    get_dtype(download_dtype).map(|flags| match (flags.video, flags.photo) {
        (true, false) => 1,
        (false, true) => 2,
        _ => 3,
    })
}

/// 控制用户交互时打印出不同的颜色(渐变)。
pub fn stdio_style(key: FieldKey, palette: Option<&[&'static str]>) -> &'static str {
    let palette = palette.unwrap_or(gradient::ORANGE2YELLOW_15);
    if palette.is_empty() {
        return "#ffffff";
    }
    palette[key as usize % palette.len()]
}

/// 代理配置中缺失的部分。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProxyCheck {
    /// scheme、hostname、port 中至少有一项没有填写。
    pub missing_basic: bool,
    /// 账号和密码只填了其中一项。
    pub missing_auth: bool,
}

impl ProxyCheck {
    pub fn needs_input(&self) -> bool {
        self.missing_basic || self.missing_auth
    }
}

pub fn check_proxy(enable_proxy: Option<bool>, proxy: &ProxyConfig) -> ProxyCheck {
    if enable_proxy == Some(false) {
        return ProxyCheck::default();
    }
    let basic_ready = proxy.scheme.as_deref().is_some_and(|s| !s.is_empty())
        && proxy.hostname.as_deref().is_some_and(|h| !h.is_empty())
        && proxy.port.is_some_and(|p| p != 0);
    let has_username = proxy.username.as_deref().is_some_and(|u| !u.is_empty());
    let has_password = proxy.password.as_deref().is_some_and(|p| !p.is_empty());
    ProxyCheck {
        missing_basic: !basic_ready,
        missing_auth: has_username != has_password,
    }
}

/// 检测代理配置是否需要用户输入。终端提示由 `StdioParams::check_proxy_config` 负责。
pub fn is_proxy_input(enable_proxy: Option<bool>, proxy: &ProxyConfig) -> bool {
    let check = check_proxy(enable_proxy, proxy);
    if check.missing_auth {
        warn!("代理账号或密码未输入!");
    }
    check.needs_input()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyInfo {
    pub scheme: String,
    pub hostname: String,
    pub port: String,
}

pub fn get_proxy_info(proxy: &ProxyConfig) -> ProxyInfo {
    ProxyInfo {
        scheme: proxy.scheme.clone().unwrap_or_else(|| constants::UNKNOWN.to_string()),
        hostname: proxy.hostname.clone().unwrap_or_else(|| constants::UNKNOWN.to_string()),
        port: proxy
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| constants::UNKNOWN.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_roundtrip() {
        let expected = [
            (1, MediaFlags { video: true, photo: false }),
            (2, MediaFlags { video: false, photo: true }),
            (3, MediaFlags { video: true, photo: true }),
        ];
        for (code, flags) in expected {
            let dtype = set_dtype(code).unwrap();
            assert_eq!(get_dtype(&dtype), Some(flags));
            assert_eq!(dtype_code(&dtype), Some(code as u8));
        }
    }

    #[test]
    fn test_set_dtype_rejects_unknown_codes() {
        assert!(matches!(set_dtype(0), Err(AppError::InvalidDownloadTypeCode(0))));
        assert!(matches!(set_dtype(4), Err(AppError::InvalidDownloadTypeCode(4))));
    }

    #[test]
    fn test_get_dtype_strips_document() {
        assert_eq!(
            get_dtype(&[DownloadType::Document, DownloadType::Photo]),
            Some(MediaFlags { video: false, photo: true })
        );
        assert_eq!(get_dtype(&[DownloadType::Document]), None);
        assert_eq!(get_dtype(&[]), None);
    }

    #[test]
    fn test_is_proxy_input() {
        let half = ProxyConfig { scheme: Some("http".into()), ..Default::default() };
        assert!(is_proxy_input(Some(true), &half));
        assert!(!is_proxy_input(Some(false), &half));

        let full = ProxyConfig {
            scheme: Some("socks5".into()),
            hostname: Some("127.0.0.1".into()),
            port: Some(1080),
            ..Default::default()
        };
        assert!(!is_proxy_input(Some(true), &full));

        let only_user = ProxyConfig { username: Some("u".into()), ..full.clone() };
        assert!(is_proxy_input(Some(true), &only_user));

        let both = ProxyConfig { password: Some("p".into()), ..only_user };
        assert!(!is_proxy_input(Some(true), &both));
    }

    #[test]
    fn test_stdio_style_is_deterministic() {
        assert_eq!(stdio_style(FieldKey::ApiId, None), "#f08a5d");
        assert_eq!(stdio_style(FieldKey::ProxyAuthentication, None), "#f8e668");
        assert_eq!(stdio_style(FieldKey::Port, Some(gradient::NEW_LIFE)), "#41ed8f");
    }

    #[test]
    fn test_proxy_fields_follow_config_proxy_colour() {
        let palette = gradient::ORANGE2YELLOW_15;
        assert_eq!(stdio_style(FieldKey::EnableProxy, None), palette[8]);
        assert_eq!(stdio_style(FieldKey::ConfigProxy, None), palette[9]);
        assert_eq!(stdio_style(FieldKey::Scheme, None), palette[10]);
        assert_eq!(stdio_style(FieldKey::Hostname, None), palette[11]);
        assert_eq!(stdio_style(FieldKey::Port, None), palette[12]);
        assert_eq!(stdio_style(FieldKey::ProxyAuthentication, None), palette[13]);
    }

    #[test]
    fn test_check_proxy_reports_missing_parts() {
        let empty = ProxyConfig::default();
        assert_eq!(
            check_proxy(Some(true), &empty),
            ProxyCheck { missing_basic: true, missing_auth: false }
        );
        assert_eq!(check_proxy(Some(false), &empty), ProxyCheck::default());
        let only_password = ProxyConfig {
            scheme: Some("http".into()),
            hostname: Some("10.0.0.1".into()),
            port: Some(8080),
            password: Some("p".into()),
            ..Default::default()
        };
        assert_eq!(
            check_proxy(None, &only_password),
            ProxyCheck { missing_basic: false, missing_auth: true }
        );
    }

    #[test]
    fn test_get_proxy_info_fills_unknown() {
        let info = get_proxy_info(&ProxyConfig { scheme: Some("http".into()), ..Default::default() });
        assert_eq!(info.scheme, "http");
        assert_eq!(info.hostname, "未知");
        assert_eq!(info.port, "未知");
    }
}
