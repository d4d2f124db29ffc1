// src/params.rs

use crate::{
    config::ProxyConfig,
    constants,
    error::AppResult,
    input::{InputSource, InputStrategy},
    models::{DownloadType, Recorded},
    process::{self, FieldKey},
    ui::Console,
    validator::{self, YesNo},
};
use itertools::Itertools;
use log::{debug, info};
use std::{
    fmt::Display,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

fn last_or_undefined(last_record: Option<impl Display>) -> String {
    last_record
        .map(|v| v.to_string())
        .unwrap_or_else(|| constants::UNDEFINED.to_string())
}

fn yes_no_label(flag: bool) -> &'static str {
    if flag { "y" } else { "n" }
}

fn strip_quotes(path: &str) -> &str {
    path.trim().trim_matches(|c| c == '"' || c == '\'')
}

/// 逐项向用户询问配置。每一项都会循环到输入合法为止，直接回车时使用上一次的记录。
pub struct StdioParams<'a, S, W> {
    console: &'a mut Console<S, W>,
}

impl<'a, S: InputSource, W: Write> StdioParams<'a, S, W> {
    pub fn new(console: &'a mut Console<S, W>) -> Self {
        Self { console }
    }

    pub fn console(&mut self) -> &mut Console<S, W> {
        &mut *self.console
    }

    /// 读取一行，空输入时换成上一次的记录(没有则为空串)。
    fn read_value(&mut self, prompt: &str, last_record: Option<&str>) -> AppResult<String> {
        let input = self.console.prompt(prompt)?;
        if input.is_empty() {
            return Ok(last_record.unwrap_or_default().to_string());
        }
        Ok(input)
    }

    fn accept(&mut self, key: FieldKey, value: impl Display) -> AppResult<()> {
        info!("已设置「{}」为:「{}」", key.name(), value);
        let text = format!("已设置「{}」为:「{}」", key.name(), value);
        self.console.styled(&text, process::stdio_style(key, None))
    }

    fn reject(&mut self, value: &str, reason: &str) -> AppResult<()> {
        self.console
            .warn(&format!("意外的参数:\"{}\",{}请重新输入!", value, reason))
    }

    fn ask_yes_no(&mut self, question: &str, default: bool) -> AppResult<bool> {
        loop {
            let input = self.console.prompt(question)?;
            if input.is_empty() {
                return Ok(default);
            }
            match YesNo::parse(&input).as_bool() {
                Some(flag) => return Ok(flag),
                None => self.reject(&input, &format!("支持的参数 - 「{}」,", constants::YES_NO_FORMAT))?,
            }
        }
    }

    /// 中断配置时询问是否保存已输入的部分。
    pub fn get_is_ki_save_config(&mut self) -> AppResult<Recorded<bool>> {
        let question = format!(
            "\n检测到配置被中断,是否保存已经输入的配置? - 「{}」(默认y):",
            constants::YES_NO_FORMAT
        );
        let flag = self.ask_yes_no(&question, true)?;
        Ok(Recorded::new(flag))
    }

    /// 已有完整配置时询问是否重新配置，超时按 `n` 处理。
    pub fn get_is_re_config(&mut self, timeout: Duration, strategy: InputStrategy) -> AppResult<Recorded<bool>> {
        let prompt = format!(
            "检测到已配置完成的配置文件,是否需要重新配置?(之前的配置文件将为你备份到当前目录下) - 「{}」({}秒后自动设置为默认n):",
            constants::YES_NO_FORMAT,
            timeout.as_secs()
        );
        let error_prompt = format!(
            "检测到已配置完成的配置文件,是否需要重新配置?(之前的配置文件将为你备份到当前目录下) - 「{}」(默认n):",
            constants::YES_NO_FORMAT
        );
        loop {
            let answer = self
                .console
                .read_line_with_timeout(&prompt, Some(&error_prompt), "n", timeout, strategy)?;
            match YesNo::parse(&answer).as_bool() {
                Some(flag) => {
                    debug!("是否重新配置: {}", flag);
                    return Ok(Recorded::new(flag));
                }
                None => self.reject(&answer, &format!("支持的参数 - 「{}」,", constants::YES_NO_FORMAT))?,
            }
        }
    }

    pub fn get_is_change_account(&mut self) -> AppResult<Recorded<bool>> {
        let question = format!("是否需要切换账号? - 「{}」(默认n):", constants::YES_NO_FORMAT);
        let flag = self.ask_yes_no(&question, false)?;
        let notice = if flag {
            "用户需要切换「账号」,请重新输入「api_id」和「api_hash」。"
        } else {
            "用户不需要切换「账号」。"
        };
        self.console.styled(notice, constants::ACCOUNT_NOTICE_COLOR)?;
        Ok(Recorded::new(flag))
    }

    pub fn get_api_id(&mut self, last_record: Option<&str>) -> AppResult<Recorded<String>> {
        loop {
            let prompt = format!(
                "请输入「api_id」上一次的记录是:「{}」:",
                last_or_undefined(last_record)
            );
            let api_id = self.read_value(&prompt, last_record)?;
            if validator::is_valid_api_id(&api_id, constants::API_ID_MAX_LENGTH) {
                self.accept(FieldKey::ApiId, &api_id)?;
                return Ok(Recorded::new(api_id));
            }
            self.reject(
                &api_id,
                &format!("不是「纯数字」或长度超过「{}」位,", constants::API_ID_MAX_LENGTH - 1),
            )?;
        }
    }

    pub fn get_api_hash(&mut self, last_record: Option<&str>) -> AppResult<Recorded<String>> {
        loop {
            let prompt = format!(
                "请输入「api_hash」上一次的记录是:「{}」:",
                last_or_undefined(last_record)
            );
            let api_hash = self.read_value(&prompt, last_record)?.to_lowercase();
            if validator::is_valid_api_hash(&api_hash, constants::API_HASH_LENGTH) {
                self.accept(FieldKey::ApiHash, &api_hash)?;
                return Ok(Recorded::new(api_hash));
            }
            self.reject(
                &api_hash,
                &format!("不是一个「{}位」的值,", constants::API_HASH_LENGTH),
            )?;
        }
    }

    /// 上一次填写过 bot_token 时默认启用。
    pub fn get_enable_bot(&mut self, last_bot_token: Option<&str>) -> AppResult<Recorded<bool>> {
        let default = last_bot_token.is_some_and(|t| !t.is_empty());
        let question = format!(
            "是否启用「机器人」(需要提供bot_token)? - 「{}」(默认{}):",
            constants::YES_NO_FORMAT,
            yes_no_label(default)
        );
        let flag = self.ask_yes_no(&question, default)?;
        let notice = if flag {
            "请配置「bot_token」。"
        } else {
            "已设置为不启用「机器人」。"
        };
        self.console
            .styled(notice, process::stdio_style(FieldKey::BotToken, None))?;
        Ok(Recorded::new(flag))
    }

    pub fn get_bot_token(&mut self, last_record: Option<&str>) -> AppResult<Recorded<String>> {
        loop {
            let prompt = format!(
                "请输入当前账号的「bot_token」上一次的记录是:「{}」:",
                last_or_undefined(last_record)
            );
            let bot_token = self.read_value(&prompt, last_record)?;
            if validator::is_valid_bot_token(&bot_token, constants::BOT_TOKEN_SEPARATOR) {
                self.accept(FieldKey::BotToken, &bot_token)?;
                return Ok(Recorded::new(bot_token));
            }
            self.reject(&bot_token, "不是一个有效的「bot_token」,")?;
        }
    }

    pub fn get_links(&mut self, last_record: Option<&Path>) -> AppResult<Recorded<PathBuf>> {
        let last = last_record.map(|p| p.display().to_string());
        loop {
            let prompt = format!(
                "请输入需要下载的媒体链接文件的「绝对路径」上一次的记录是:「{}」:",
                last_or_undefined(last.as_deref())
            );
            let raw = self.read_value(&prompt, last.as_deref())?;
            let links = strip_quotes(&raw);
            if !links.is_empty()
                && validator::is_valid_links_file(Path::new(links), constants::LINKS_FILE_SUFFIX)
            {
                validator::is_contain_chinese(links);
                self.accept(FieldKey::Links, links)?;
                return Ok(Recorded::new(PathBuf::from(links)));
            }
            self.reject(
                links,
                &format!("文件不存在或不是一个以「{}」结尾的文件,", constants::LINKS_FILE_SUFFIX),
            )?;
        }
    }

    pub fn get_save_directory(&mut self, last_record: Option<&Path>) -> AppResult<Recorded<PathBuf>> {
        let last = last_record.map(|p| p.display().to_string());
        loop {
            let prompt = format!(
                "请输入媒体「保存路径」上一次的记录是:「{}」:",
                last_or_undefined(last.as_deref())
            );
            let raw = self.read_value(&prompt, last.as_deref())?;
            let save_directory = strip_quotes(&raw);
            if !save_directory.is_empty() {
                validator::is_contain_chinese(save_directory);
                if validator::is_valid_save_directory(&mut *self.console, Path::new(save_directory))? {
                    self.accept(FieldKey::SaveDirectory, save_directory)?;
                    return Ok(Recorded::new(PathBuf::from(save_directory)));
                }
            }
            self.reject(save_directory, "指定的路径无效或不是一个目录,")?;
        }
    }

    pub fn get_max_download_task(&mut self, last_record: Option<u32>) -> AppResult<Recorded<u32>> {
        let default = last_record.unwrap_or(constants::DEFAULT_MAX_DOWNLOAD_TASK);
        loop {
            let prompt = format!(
                "请输入「最大下载任务数」,非会员建议默认值。上一次的记录是:「{}」(默认{}):",
                last_or_undefined(last_record),
                constants::DEFAULT_MAX_DOWNLOAD_TASK
            );
            let default_str = default.to_string();
            let value = self.read_value(&prompt, Some(&default_str))?;
            if validator::is_valid_max_download_task(&value) {
                if let Ok(tasks) = value.trim().parse::<u32>() {
                    self.accept(FieldKey::MaxDownloadTask, tasks)?;
                    return Ok(Recorded::new(tasks));
                }
            }
            self.reject(&value, "任务数必须是「大于0的整数」,")?;
        }
    }

    pub fn get_download_type(&mut self, last_record: Option<&[DownloadType]>) -> AppResult<Recorded<Vec<DownloadType>>> {
        let last_code = last_record.and_then(process::dtype_code);
        let default = last_code.unwrap_or(constants::DEFAULT_DOWNLOAD_TYPE_CODE).to_string();
        loop {
            let prompt = format!(
                "请输入需要下载的媒体类型(1.视频 2.图片 3.视频和图片)上一次的记录是:「{}」(默认{}):",
                last_or_undefined(last_code),
                constants::DEFAULT_DOWNLOAD_TYPE_CODE
            );
            let value = self.read_value(&prompt, Some(&default))?;
            if validator::is_valid_download_type(&value) {
                if let Ok(code) = value.trim().parse::<i64>() {
                    let download_type = process::set_dtype(code)?;
                    let labels = download_type.iter().map(DownloadType::label).join(",");
                    self.accept(FieldKey::DownloadType, labels)?;
                    return Ok(Recorded::new(download_type));
                }
            }
            self.reject(&value, "支持的参数 - 「1或2或3」,")?;
        }
    }

    pub fn get_is_shutdown(&mut self, last_record: Option<bool>) -> AppResult<Recorded<bool>> {
        let question = format!(
            "下载完成后是否「自动关机」。上一次的记录是:「{}」 - 「{}」(默认n):",
            last_or_undefined(last_record.map(yes_no_label)),
            constants::YES_NO_FORMAT
        );
        let flag = self.ask_yes_no(&question, last_record.unwrap_or(false))?;
        if flag {
            self.console.styled(
                "已设置「is_shutdown」为:「y」,下载完成后将自动关机!",
                process::stdio_style(FieldKey::IsShutdown, None),
            )?;
        } else {
            self.accept(FieldKey::IsShutdown, "n")?;
        }
        Ok(Recorded::new(flag))
    }

    pub fn get_enable_proxy(&mut self, last_record: Option<bool>) -> AppResult<Recorded<bool>> {
        let last = last_record.map(yes_no_label);
        loop {
            let prompt = format!(
                "是否需要使用「代理」。上一次的记录是:「{}」 - 「{}」(默认n):",
                last_or_undefined(last),
                constants::YES_NO_FORMAT
            );
            let value = self.read_value(&prompt, Some(last.unwrap_or("n")))?;
            match validator::is_valid_enable_proxy(&value) {
                YesNo::Yes => {
                    self.accept(FieldKey::EnableProxy, "y")?;
                    return Ok(Recorded::new(true));
                }
                YesNo::No => {
                    self.accept(FieldKey::EnableProxy, "n")?;
                    return Ok(Recorded::new(false));
                }
                YesNo::Invalid => {
                    self.reject(&value, &format!("支持的参数 - 「{}」,", constants::YES_NO_FORMAT))?
                }
            }
        }
    }

    /// 检查上一次的代理配置，缺少 scheme、hostname 或 port 时提示用户配置。
    pub fn check_proxy_config(&mut self, proxy: &ProxyConfig) -> AppResult<bool> {
        let check = process::check_proxy(Some(true), proxy);
        if check.missing_basic {
            self.console
                .styled("请配置代理!", process::stdio_style(FieldKey::ConfigProxy, None))?;
        }
        Ok(check.needs_input())
    }

    pub fn get_scheme(&mut self, last_record: Option<&str>) -> AppResult<Recorded<String>> {
        let valid_format = constants::PROXY_SCHEMES.join("|");
        loop {
            let prompt = format!(
                "请输入「代理类型」。上一次的记录是:「{}」 - 「{}」:",
                last_or_undefined(last_record),
                valid_format
            );
            let scheme = self.read_value(&prompt, last_record)?.to_lowercase();
            if validator::is_valid_scheme(&scheme, &constants::PROXY_SCHEMES) {
                self.accept(FieldKey::Scheme, &scheme)?;
                return Ok(Recorded::new(scheme));
            }
            self.reject(&scheme, &format!("支持的参数 - 「{}」,", valid_format))?;
        }
    }

    /// 提示中展示已经选定的代理类型，因此必须在 `get_scheme` 之后调用。
    pub fn get_hostname(&mut self, proxy: &ProxyConfig, last_record: Option<&str>) -> AppResult<Recorded<String>> {
        let scheme = process::get_proxy_info(proxy).scheme;
        loop {
            let prompt = format!(
                "请输入代理类型为:\"{}\"的「ip地址」。上一次的记录是:「{}」 - 「{}」:",
                scheme,
                last_or_undefined(last_record),
                constants::HOSTNAME_FORMAT
            );
            let hostname = self.read_value(&prompt, last_record)?;
            if validator::is_valid_hostname(&hostname) {
                self.accept(FieldKey::Hostname, &hostname)?;
                return Ok(Recorded::new(hostname));
            }
            self.reject(
                &hostname,
                &format!("支持的参数 - 「{}」(仅支持ipv4地址),", constants::HOSTNAME_FORMAT),
            )?;
        }
    }

    /// 提示中展示已经选定的代理类型和地址，因此必须在 `get_hostname` 之后调用。
    pub fn get_port(&mut self, proxy: &ProxyConfig, last_record: Option<u16>) -> AppResult<Recorded<u16>> {
        let info = process::get_proxy_info(proxy);
        let last = last_record.map(|p| p.to_string());
        loop {
            let prompt = format!(
                "请输入ip地址为:\"{}\",代理类型为:\"{}\"的「代理端口」。上一次的记录是:「{}」 - 「{}」:",
                info.hostname,
                info.scheme,
                last_or_undefined(last.as_deref()),
                constants::PORT_FORMAT
            );
            let value = self.read_value(&prompt, last.as_deref())?;
            if validator::is_valid_port(&value) {
                if let Ok(port) = value.trim().parse::<u16>() {
                    self.accept(FieldKey::Port, port)?;
                    return Ok(Recorded::new(port));
                }
            }
            self.reject(&value, &format!("支持的参数 - 「{}」,", constants::PORT_FORMAT))?;
        }
    }

    /// 账号和密码要么都填，要么都不填。
    pub fn get_proxy_authentication(&mut self) -> AppResult<Recorded<(Option<String>, Option<String>)>> {
        loop {
            let question = format!("代理是否需要「验证」? - 「{}」(默认n):", constants::YES_NO_FORMAT);
            if !self.ask_yes_no(&question, false)? {
                self.accept(FieldKey::ProxyAuthentication, "n")?;
                return Ok(Recorded::new((None, None)));
            }
            let username = self.console.prompt("请输入代理的「用户名」:")?;
            let password = self.console.prompt_hidden("请输入代理的「密码」:")?;
            if !username.is_empty() && !password.is_empty() {
                let masked = "*".repeat(password.chars().count());
                self.accept(FieldKey::ProxyAuthentication, format!("{}:{}", username, masked))?;
                return Ok(Recorded::new((Some(username), Some(password))));
            }
            self.console.warn("代理的「用户名」和「密码」需要同时填写,请重新输入!")?;
        }
    }
}
