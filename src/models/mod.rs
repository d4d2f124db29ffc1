// src/models/mod.rs

pub mod bot;
pub mod extension;
pub mod stats;

use crate::symbols;
use colored::{ColoredString, Colorize};
use serde::{Deserialize, Serialize};
use std::fmt;

// 1. 媒体类型，顺序固定，不依赖反射
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadType {
    Video,
    Photo,
    Document,
}

impl DownloadType {
    pub const fn values() -> [DownloadType; 3] {
        [DownloadType::Video, DownloadType::Photo, DownloadType::Document]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadType::Video => "video",
            DownloadType::Photo => "photo",
            DownloadType::Document => "document",
        }
    }

    /// 终端中展示的名称
    pub fn label(&self) -> &'static str {
        match self {
            DownloadType::Video => "视频",
            DownloadType::Photo => "图片",
            DownloadType::Document => "文档",
        }
    }
}

impl fmt::Display for DownloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 链接的类型：单条消息、媒体组、评论区、话题。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Single,
    Group,
    Comment,
    Topic,
}

impl LinkType {
    pub const fn values() -> [LinkType; 4] {
        [LinkType::Single, LinkType::Group, LinkType::Comment, LinkType::Topic]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Single => "single",
            LinkType::Group => "group",
            LinkType::Comment => "comment",
            LinkType::Topic => "topic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LinkType::Single => "单文件",
            LinkType::Group => "组",
            LinkType::Comment => "评论",
            LinkType::Topic => "话题",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `get_dtype` 的结果：是否下载视频、图片。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MediaFlags {
    pub video: bool,
    pub photo: bool,
}

// 2. 下载状态
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DownloadStatus {
    Downloading,
    Success,
    Failure,
    Skip,
    Retry,
}

impl DownloadStatus {
    pub fn get_display_info(
        &self,
    ) -> (
        &'static ColoredString,
        fn(ColoredString) -> ColoredString,
        &'static str,
    ) {
        match self {
            DownloadStatus::Downloading => (&symbols::INFO, |s| s.cyan(), "正在下载"),
            DownloadStatus::Success => (&symbols::OK, |s| s.green(), "成功下载"),
            DownloadStatus::Failure => (&symbols::ERROR, |s| s.red(), "失败下载"),
            DownloadStatus::Skip => (&symbols::INFO, |s| s.cyan(), "跳过下载"),
            DownloadStatus::Retry => (&symbols::WARN, |s| s.yellow(), "重新下载"),
        }
    }

    pub fn label(&self) -> &'static str {
        self.get_display_info().2
    }
}

// 3. 日志和表格中使用的关键字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWord {
    Link,
    LinkType,
    Size,
    Status,
    File,
    ErrorSize,
    ActualSize,
    AlreadyExist,
    Channel,
    Type,
    Reload,
    ReloadTimes,
    CurrentTask,
    Reason,
}

impl KeyWord {
    pub fn label(&self) -> &'static str {
        match self {
            KeyWord::Link => "链接",
            KeyWord::LinkType => "链接类型",
            KeyWord::Size => "大小",
            KeyWord::Status => "状态",
            KeyWord::File => "文件",
            KeyWord::ErrorSize => "错误大小",
            KeyWord::ActualSize => "实际大小",
            KeyWord::AlreadyExist => "已存在",
            KeyWord::Channel => "频道",
            KeyWord::Type => "类型",
            KeyWord::Reload => "重新下载",
            KeyWord::ReloadTimes => "重新下载次数",
            KeyWord::CurrentTask => "当前任务数",
            KeyWord::Reason => "原因",
        }
    }
}

impl fmt::Display for KeyWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 一次被校验通过的输入，`record_flag` 表示需要由配置写入方持久化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded<T> {
    pub value: T,
    pub record_flag: bool,
}

impl<T> Recorded<T> {
    pub fn new(value: T) -> Self {
        Self { value, record_flag: true }
    }
}
