// src/table.rs

use crate::{
    config::ProxyConfig,
    error::{AppError, AppResult},
    gradient,
    models::{
        DownloadStatus, DownloadType, KeyWord,
        stats::{LinkError, LinkInfo, StatsSnapshot},
    },
    meta, process, ui,
};
use colored::*;
use comfy_table::{
    Attribute, Cell, ContentArrangement, Table,
    presets::{UTF8_FULL, UTF8_FULL_CONDENSED},
};
use itertools::Itertools;
use log::{debug, error};
use std::{
    collections::{BTreeSet, HashSet},
    fs,
    io::{self, Write},
    path::Path,
};

const KIND_STATUS: &str = "种类&状态";
const TOTAL: &str = "合计";

/// 带标题的表格，所有单元格都以文本展示，整体居中输出。
pub struct PanelTable {
    title: String,
    table: Table,
}

impl PanelTable {
    pub fn new(title: &str, header: &[&str], data: Vec<Vec<String>>, show_lines: bool) -> Self {
        let mut table = Table::new();
        table
            .load_preset(if show_lines { UTF8_FULL } else { UTF8_FULL_CONDENSED })
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(ui::terminal_width().min(u16::MAX as usize) as u16)
            .set_header(
                header
                    .iter()
                    .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                    .collect::<Vec<_>>(),
            );
        for row in data {
            table.add_row(row);
        }
        Self {
            title: title.to_string(),
            table,
        }
    }

    pub fn render(&self) -> String {
        let table = self.table.to_string();
        let lines: Vec<&str> = table.lines().collect();
        // 顶部边框只由单列宽的制表符组成，其字符数即表格宽度
        let table_width = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let left = ui::terminal_width().saturating_sub(table_width) / 2;
        let title_left = left + table_width.saturating_sub(ui::display_width(&self.title)) / 2;

        let mut rendered = format!("{}{}\n", " ".repeat(title_left), self.title.white().bold());
        for line in lines {
            rendered.push_str(&" ".repeat(left));
            rendered.push_str(line);
            rendered.push('\n');
        }
        rendered
    }

    pub fn print_meta<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.render())
    }
}

/// 打印链接统计表的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTableOutcome {
    Printed,
    Empty,
    Failed(String),
}

/// `完成数/总数[完成率%]`，完成率保留两位小数，总数为 0 时完成率为 0。
pub fn complete_rate(complete_num: u64, member_num: u64) -> String {
    if member_num == 0 {
        return format!("{}/{}[0%]", complete_num, member_num);
    }
    let rate = meta::round2(complete_num as f64 / member_num as f64 * 100.0);
    let rate = if rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    };
    format!("{}/{}[{}%]", complete_num, member_num, rate)
}

fn error_info(error_msg: Option<&LinkError>) -> String {
    match error_msg {
        None => String::new(),
        Some(e) if e.is_empty() => String::new(),
        Some(LinkError::AllMember { all_member }) => all_member.clone(),
        Some(LinkError::PerFile(map)) => map
            .iter()
            .map(|(file_name, err)| format!("{}: {}", file_name, err))
            .join("\n"),
    }
}

/// 下载引擎的计数：每种媒体各有成功、失败、跳过三个集合。
#[derive(Debug, Clone, Default)]
pub struct StatisticalTable {
    pub skip_video: HashSet<String>,
    pub skip_photo: HashSet<String>,
    pub success_video: HashSet<String>,
    pub success_photo: HashSet<String>,
    pub failure_video: HashSet<String>,
    pub failure_photo: HashSet<String>,
}

impl StatisticalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &StatsSnapshot) -> Self {
        Self {
            skip_video: snapshot.skip_video.clone(),
            skip_photo: snapshot.skip_photo.clone(),
            success_video: snapshot.success_video.clone(),
            success_photo: snapshot.success_photo.clone(),
            failure_video: snapshot.failure_video.clone(),
            failure_photo: snapshot.failure_photo.clone(),
        }
    }

    fn header() -> [&'static str; 5] {
        [
            KIND_STATUS,
            DownloadStatus::Success.label(),
            DownloadStatus::Failure.label(),
            DownloadStatus::Skip.label(),
            TOTAL,
        ]
    }

    fn counts(&self, dtype: DownloadType) -> [usize; 4] {
        let (success, failure, skip) = match dtype {
            DownloadType::Photo => (&self.success_photo, &self.failure_photo, &self.skip_photo),
            _ => (&self.success_video, &self.failure_video, &self.skip_video),
        };
        let total = success.len() + failure.len() + skip.len();
        [success.len(), failure.len(), skip.len(), total]
    }

    fn count_row(label: &str, counts: [usize; 4]) -> Vec<String> {
        std::iter::once(label.to_string())
            .chain(counts.iter().map(|n| n.to_string()))
            .collect()
    }

    /// 按实际记录到的媒体类型生成统计表的标题和数据行，文档类型不参与统计。
    pub fn count_table_rows(&self, record_dtype: &[DownloadType]) -> Option<(&'static str, Vec<Vec<String>>)> {
        let kinds: BTreeSet<DownloadType> = record_dtype
            .iter()
            .copied()
            .filter(|d| *d != DownloadType::Document)
            .collect();
        let kinds: Vec<DownloadType> = kinds.into_iter().collect();
        match kinds.as_slice() {
            [single] => {
                let counts = self.counts(*single);
                let title = if *single == DownloadType::Video {
                    "视频下载统计"
                } else {
                    "图片下载统计"
                };
                Some((
                    title,
                    vec![Self::count_row(single.label(), counts), Self::count_row(TOTAL, counts)],
                ))
            }
            [_, _] => {
                let video = self.counts(DownloadType::Video);
                let photo = self.counts(DownloadType::Photo);
                let total: [usize; 4] = std::array::from_fn(|i| video[i] + photo[i]);
                Some((
                    "媒体下载统计",
                    vec![
                        Self::count_row(DownloadType::Video.label(), video),
                        Self::count_row(DownloadType::Photo.label(), photo),
                        Self::count_row(TOTAL, total),
                    ],
                ))
            }
            _ => None,
        }
    }

    pub fn print_count_table<W: Write>(&self, out: &mut W, record_dtype: &[DownloadType]) -> AppResult<()> {
        match self.count_table_rows(record_dtype) {
            Some((title, rows)) => PanelTable::new(title, &Self::header(), rows, false).print_meta(out)?,
            None => debug!("没有可统计的媒体类型: {:?}", record_dtype),
        }
        Ok(())
    }

    pub fn link_table_rows(link_info: &[LinkInfo]) -> Vec<Vec<String>> {
        link_info
            .iter()
            .enumerate()
            .map(|(index, info)| {
                vec![
                    (index + 1).to_string(),
                    match info.link_type {
                        Some(link_type) => format!("{}\n({})", info.link, link_type.label()),
                        None => info.link.clone(),
                    },
                    info.file_name.join("\n"),
                    complete_rate(info.complete_num, info.member_num),
                    error_info(info.error_msg.as_ref()),
                ]
            })
            .collect()
    }

    pub fn print_link_table<W: Write>(out: &mut W, link_info: &[LinkInfo]) -> LinkTableOutcome {
        let rows = Self::link_table_rows(link_info);
        if rows.is_empty() {
            return LinkTableOutcome::Empty;
        }
        let table = PanelTable::new(
            "下载链接统计",
            &["编号", "链接", "文件名", "完成率", "错误信息"],
            rows,
            true,
        );
        match table.print_meta(out) {
            Ok(()) => LinkTableOutcome::Printed,
            Err(e) => {
                error!("打印下载链接统计表时出错,{}:\"{}\"", KeyWord::Reason, e);
                LinkTableOutcome::Failed(e.to_string())
            }
        }
    }

    /// 打印用户配置。代理、链接内容、下载类型三部分互不影响，任何一部分出错只记录日志。
    pub fn print_config_table<W: Write>(
        out: &mut W,
        enable_proxy: bool,
        links: Option<&Path>,
        download_type: &[DownloadType],
        proxy: &ProxyConfig,
    ) {
        if let Err(e) = Self::print_proxy_section(out, enable_proxy, proxy) {
            error!("打印代理配置表时出错,{}:\"{}\"", KeyWord::Reason, e);
        }
        if let Err(e) = Self::print_links_section(out, links) {
            error!(
                "读取\"{}\"时出错,{}:\"{}\"",
                links.map(|p| p.display().to_string()).unwrap_or_default(),
                KeyWord::Reason,
                e
            );
        }
        if let Err(e) = Self::print_download_type_section(out, download_type) {
            error!("打印下载类型统计表时出错,{}:\"{}\"", KeyWord::Reason, e);
        }
    }

    fn print_proxy_section<W: Write>(out: &mut W, enable_proxy: bool, proxy: &ProxyConfig) -> AppResult<()> {
        if !enable_proxy {
            writeln!(
                out,
                "{}",
                gradient::gen_gradient_text("当前没有使用代理!", gradient::NEW_LIFE)
            )?;
            return Ok(());
        }
        writeln!(
            out,
            "{}",
            gradient::gen_gradient_text("当前正在使用代理!", gradient::GREEN2BLUE_10)
        )?;
        let pairs = proxy.display_pairs();
        let header: Vec<&str> = pairs.iter().map(|(key, _)| *key).collect();
        let row: Vec<String> = pairs.into_iter().map(|(_, value)| value).collect();
        PanelTable::new("代理配置", &header, vec![row], false).print_meta(out)?;
        Ok(())
    }

    fn print_links_section<W: Write>(out: &mut W, links: Option<&Path>) -> AppResult<()> {
        let Some(links) = links else {
            return Err(AppError::Config("未设置链接文件".to_string()));
        };
        let content = fs::read_to_string(links)?;
        let rows: Vec<Vec<String>> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(index, line)| vec![(index + 1).to_string(), line.to_string()])
            .collect();
        if !rows.is_empty() {
            PanelTable::new("链接内容", &["编号", "链接"], rows, false).print_meta(out)?;
        }
        Ok(())
    }

    fn print_download_type_section<W: Write>(out: &mut W, download_type: &[DownloadType]) -> AppResult<()> {
        let flags = process::get_dtype(download_type).ok_or_else(|| {
            AppError::Config(format!("无法识别的下载类型: {:?}", download_type))
        })?;
        let yes_no = |flag: bool| if flag { "是" } else { "否" }.to_string();
        let rows = vec![
            vec![DownloadType::Video.label().to_string(), yes_no(flags.video)],
            vec![DownloadType::Photo.label().to_string(), yes_no(flags.photo)],
        ];
        PanelTable::new("下载类型", &["类型", "是否下载"], rows, false).print_meta(out)?;
        Ok(())
    }
}
