// src/progress.rs

use crate::{
    error::{AppError, AppResult},
    meta, ui,
};
use anyhow::anyhow;
use indicatif::{MultiProgress, ProgressDrawTarget, ProgressStyle};

/// 进度条宽度为终端宽度的 20%，至少为 1。
pub fn bar_width() -> usize {
    ((ui::terminal_width() as f64 * 0.2) as usize).max(1)
}

/// 多个下载任务共用的进度条组。
pub struct ProgressBar {
    progress: MultiProgress,
    style: ProgressStyle,
}

impl ProgressBar {
    pub fn new() -> AppResult<Self> {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    pub fn with_draw_target(target: ProgressDrawTarget) -> AppResult<Self> {
        let template = format!(
            "{{spinner:.green}} {{prefix:.bold.blue}} [{{bar:{}.cyan/blue}}] {{percent:>3}}% • {{msg:.bold.green}} • {{bytes_per_sec}} • {{eta}}",
            bar_width()
        );
        let style = ProgressStyle::with_template(&template)
            .map_err(|e| AppError::Other(anyhow!("进度条模板无效: {}", e)))?
            .progress_chars("━╸─");
        Ok(Self {
            progress: MultiProgress::with_draw_target(target),
            style,
        })
    }

    pub fn add_task(&self, file_name: &str, total: u64) -> indicatif::ProgressBar {
        let bar = self.progress.add(indicatif::ProgressBar::new(total));
        bar.set_style(self.style.clone());
        bar.set_prefix(file_name.to_string());
        bar
    }

    /// 更新某个任务的进度，附带以合适单位展示的 `已下载/总大小`。
    pub fn download_bar(current: u64, total: u64, task: &indicatif::ProgressBar) {
        task.set_length(total);
        task.set_position(current);
        task.set_message(format!(
            "{}/{}",
            meta::suitable_units_display(current),
            meta::suitable_units_display(total)
        ));
    }
}
