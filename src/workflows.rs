// src/workflows.rs

use crate::{
    config::{UserConfig, store::ConfigStore},
    error::{AppError, AppResult},
    input::{InputSource, InputStrategy},
    models::{KeyWord, stats::StatsSnapshot},
    params::StdioParams,
    symbols,
    table::{LinkTableOutcome, StatisticalTable},
    ui::Console,
};
use anyhow::Context;
use log::{debug, info, warn};
use std::{fs, io::Write, path::Path, time::Duration};

/// 交互式配置流程的参数。
#[derive(Debug, Clone, Copy)]
pub struct ConfigureOptions {
    pub reconfigure: bool,
    pub re_config_timeout: Duration,
    pub strategy: InputStrategy,
}

/// 读取已有配置并按需重新收集，最终保存并打印配置表。
///
/// 收集过程中被中断时，询问是否保存已经输入的部分，然后仍然以 [`AppError::UserInterrupt`] 返回。
pub fn configure<S: InputSource, W: Write>(
    console: &mut Console<S, W>,
    store: &ConfigStore,
    options: &ConfigureOptions,
) -> AppResult<UserConfig> {
    let last = store.load()?;
    let mut params = StdioParams::new(console);

    if last.is_complete() {
        let re_config = options.reconfigure
            || params
                .get_is_re_config(options.re_config_timeout, options.strategy)?
                .value;
        if !re_config {
            info!("沿用已有配置: {}", store.path().display());
            print_config(params.console(), &last);
            return Ok(last);
        }
    }

    let mut draft = UserConfig::default();
    if store.path().is_file() {
        if let Some(backup) = store.backup(false)? {
            params
                .console()
                .info(&format!("之前的配置文件已备份至:\"{}\"", backup.display()))?;
        }
        let has_account = last.api_id.is_some() && last.api_hash.is_some();
        if has_account && !params.get_is_change_account()?.value {
            draft.api_id = last.api_id.clone();
            draft.api_hash = last.api_hash.clone();
        }
    }

    params
        .console()
        .info(&format!("开始配置,按 {} 可随时中断。", *symbols::CTRL_C))?;
    match collect_fields(&mut params, &last, &mut draft) {
        Ok(()) => {}
        Err(AppError::UserInterrupt) => {
            warn!("配置被用户中断。");
            if params.get_is_ki_save_config()?.value {
                store.save(&draft)?;
                params
                    .console()
                    .info(&format!("已保存中断前输入的配置至:\"{}\"", store.path().display()))?;
            }
            return Err(AppError::UserInterrupt);
        }
        Err(e) => return Err(e),
    }

    store.save(&draft)?;
    params
        .console()
        .info(&format!("配置已保存至:\"{}\"", store.path().display()))?;
    print_config(params.console(), &draft);
    Ok(draft)
}

/// 按固定顺序收集每一项，已经收集到的值直接写入 `draft`，中断时不会丢失。
fn collect_fields<S: InputSource, W: Write>(
    params: &mut StdioParams<'_, S, W>,
    last: &UserConfig,
    draft: &mut UserConfig,
) -> AppResult<()> {
    if draft.api_id.is_none() {
        draft.api_id = Some(params.get_api_id(last.api_id.as_deref())?.value);
    }
    if draft.api_hash.is_none() {
        draft.api_hash = Some(params.get_api_hash(last.api_hash.as_deref())?.value);
    }
    draft.bot_token = if params.get_enable_bot(last.bot_token.as_deref())?.value {
        Some(params.get_bot_token(last.bot_token.as_deref())?.value)
    } else {
        None
    };
    draft.links = Some(params.get_links(last.links.as_deref())?.value);
    draft.save_directory = Some(params.get_save_directory(last.save_directory.as_deref())?.value);
    draft.max_download_task = Some(params.get_max_download_task(last.max_download_task)?.value);
    let last_dtype = (!last.download_type.is_empty()).then_some(last.download_type.as_slice());
    draft.download_type = params.get_download_type(last_dtype)?.value;
    draft.is_shutdown = Some(params.get_is_shutdown(last.is_shutdown)?.value);

    let enable_proxy = params.get_enable_proxy(last.enable_proxy)?.value;
    draft.enable_proxy = Some(enable_proxy);
    if !enable_proxy {
        // 未启用时保留上一次的代理，下次启用可以直接回车沿用
        draft.proxy = last.proxy.clone();
        return Ok(());
    }
    params.check_proxy_config(&last.proxy)?;
    draft.proxy.scheme = Some(params.get_scheme(last.proxy.scheme.as_deref())?.value);
    draft.proxy.hostname = Some(
        params
            .get_hostname(&draft.proxy, last.proxy.hostname.as_deref())?
            .value,
    );
    draft.proxy.port = Some(params.get_port(&draft.proxy, last.proxy.port)?.value);
    let (username, password) = params.get_proxy_authentication()?.value;
    draft.proxy.username = username;
    draft.proxy.password = password;
    debug!("代理配置收集完成: {:?}", draft.proxy.display_pairs());
    Ok(())
}

fn print_config<S: InputSource, W: Write>(console: &mut Console<S, W>, config: &UserConfig) {
    StatisticalTable::print_config_table(
        console.out(),
        config.enable_proxy.unwrap_or(false),
        config.links.as_deref(),
        &config.download_type,
        &config.proxy,
    );
}

/// 只打印当前配置，不做任何询问。
pub fn show_config<S: InputSource, W: Write>(console: &mut Console<S, W>, store: &ConfigStore) -> AppResult<()> {
    let config = store.load_strict()?;
    console.print_header(&format!("当前配置:\"{}\"", store.path().display()))?;
    let complete = if config.is_complete() { "完整" } else { "不完整" };
    console.println(format!("配置状态:{}", complete))?;
    print_config(console, &config);
    Ok(())
}

/// 读取下载引擎导出的统计快照并打印计数表与链接表。
pub fn show_stats<S: InputSource, W: Write>(console: &mut Console<S, W>, snapshot_file: &Path) -> AppResult<()> {
    let content = fs::read_to_string(snapshot_file)
        .with_context(|| format!("读取统计文件 '{}' 失败", snapshot_file.display()))?;
    let snapshot: StatsSnapshot = serde_json::from_str(&content)?;
    let table = StatisticalTable::from_snapshot(&snapshot);
    table.print_count_table(console.out(), &snapshot.download_type)?;
    match StatisticalTable::print_link_table(console.out(), &snapshot.links) {
        LinkTableOutcome::Printed => {}
        LinkTableOutcome::Empty => console.info("没有可以统计的下载链接。")?,
        LinkTableOutcome::Failed(reason) => {
            console.error(&format!("无法打印下载链接统计表,{}:\"{}\"", KeyWord::Reason, reason))?
        }
    }
    Ok(())
}
