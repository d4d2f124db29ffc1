// src/models/stats.rs

use crate::models::{DownloadType, LinkType};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 单个链接的错误信息：要么整组失败，要么逐文件记录。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkError {
    AllMember { all_member: String },
    PerFile(BTreeMap<String, String>),
}

impl LinkError {
    pub fn is_empty(&self) -> bool {
        match self {
            LinkError::AllMember { all_member } => all_member.is_empty(),
            LinkError::PerFile(map) => map.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub link: String,
    #[serde(default)]
    pub link_type: Option<LinkType>,
    pub complete_num: u64,
    pub member_num: u64,
    #[serde(default)]
    pub file_name: Vec<String>,
    #[serde(default)]
    pub error_msg: Option<LinkError>,
}

/// 下载引擎在某一时刻导出的计数快照。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub download_type: Vec<DownloadType>,
    #[serde(default)]
    pub success_video: HashSet<String>,
    #[serde(default)]
    pub failure_video: HashSet<String>,
    #[serde(default)]
    pub skip_video: HashSet<String>,
    #[serde(default)]
    pub success_photo: HashSet<String>,
    #[serde(default)]
    pub failure_photo: HashSet<String>,
    #[serde(default)]
    pub skip_photo: HashSet<String>,
    #[serde(default)]
    pub links: Vec<LinkInfo>,
}
