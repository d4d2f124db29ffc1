// src/config.rs

pub mod store;

use crate::{constants, models::DownloadType, process, validator};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub scheme: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyConfig {
    /// 表格中展示的字段(不含账号和密码)。
    pub fn display_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("scheme", self.scheme.clone().unwrap_or_default()),
            ("hostname", self.hostname.clone().unwrap_or_default()),
            ("port", self.port.map(|p| p.to_string()).unwrap_or_default()),
        ]
    }
}

/// 交互式配置的全部字段，对应持久化文件中的内容。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    pub api_id: Option<String>,
    pub api_hash: Option<String>,
    pub bot_token: Option<String>,
    pub links: Option<PathBuf>,
    pub save_directory: Option<PathBuf>,
    pub max_download_task: Option<u32>,
    #[serde(default)]
    pub download_type: Vec<DownloadType>,
    pub is_shutdown: Option<bool>,
    pub enable_proxy: Option<bool>,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

impl UserConfig {
    /// 所有必填字段都已通过校验，可以跳过交互直接使用。
    pub fn is_complete(&self) -> bool {
        let api_id_ok = self
            .api_id
            .as_deref()
            .is_some_and(|id| validator::is_valid_api_id(id, constants::API_ID_MAX_LENGTH));
        let api_hash_ok = self
            .api_hash
            .as_deref()
            .is_some_and(|hash| validator::is_valid_api_hash(hash, constants::API_HASH_LENGTH));
        let bot_token_ok = self
            .bot_token
            .as_deref()
            .is_none_or(|token| validator::is_valid_bot_token(token, constants::BOT_TOKEN_SEPARATOR));
        let links_ok = self
            .links
            .as_deref()
            .is_some_and(|p| validator::is_valid_links_file(p, constants::LINKS_FILE_SUFFIX));
        let save_directory_ok = self.save_directory.as_deref().is_some_and(|p| p.is_dir());
        let max_task_ok = self.max_download_task.is_some_and(|n| n > 0);
        let dtype_ok = process::get_dtype(&self.download_type).is_some();
        let flags_ok = self.is_shutdown.is_some() && self.enable_proxy.is_some();
        let proxy_ok = !process::is_proxy_input(self.enable_proxy, &self.proxy);

        api_id_ok
            && api_hash_ok
            && bot_token_ok
            && links_ok
            && save_directory_ok
            && max_task_ok
            && dtype_ok
            && flags_ok
            && proxy_ok
    }
}
