// src/gradient.rs

use crate::error::{AppError, AppResult};
use colored::{ColoredString, Colorize};

// 生成渐变色:https://photokit.com/colors/color-gradient/?lang=zh
pub const BLUE2PURPLE_14: &[&str] = &[
    "#0ebeff", "#21b4f9", "#33abf3", "#46a1ed", "#5898e8", "#6b8ee2", "#7d85dc", "#907bd6",
    "#a272d0", "#b568ca", "#c75fc5", "#da55bf", "#ec4cb9", "#ff42b3",
];
pub const GREEN2PINK_11: &[&str] = &[
    "#00ff40", "#14f54c", "#29eb58", "#3de064", "#52d670", "#66cc7c", "#7ac288", "#8fb894",
    "#a3ada0", "#b8a3ac", "#cc99b8",
];
pub const GREEN2BLUE_10: &[&str] = &[
    "#84fab0", "#85f6b8", "#86f1bf", "#88edc7", "#89e9ce", "#8ae4d6", "#8be0dd", "#8ddce5",
    "#8ed7ec", "#8fd3f4",
];
pub const YELLOW2GREEN_10: &[&str] = &[
    "#d4fc79", "#cdfa7d", "#c6f782", "#bff586", "#b8f28b", "#b2f08f", "#abed94", "#a4eb98",
    "#9de89d", "#96e6a1",
];
pub const ORANGE2YELLOW_15: &[&str] = &[
    "#f08a5d", "#f1915e", "#f1985f", "#f29f60", "#f3a660", "#f3ad61", "#f4b462", "#f5bc63",
    "#f5c364", "#f6ca65", "#f6d166", "#f7d866", "#f8df67", "#f8e668", "#f9ed69",
];
pub const NEW_LIFE: &[&str] = &[
    "#43e97b", "#42eb85", "#41ed8f", "#3fee9a", "#3ef0a4", "#3df2ae", "#3cf4b8", "#3af5c3",
    "#39f7cd", "#38f9d7",
];

/// 将 `#rrggbb` 转换为 RGB 三元组。
pub fn hex_to_rgb(hex_color: &str) -> AppResult<(u8, u8, u8)> {
    let digits = hex_color.trim_start_matches('#');
    let bytes = hex::decode(digits).map_err(|_| AppError::InvalidHexColor(hex_color.to_string()))?;
    match bytes.as_slice() {
        [r, g, b] => Ok((*r, *g, *b)),
        _ => Err(AppError::InvalidHexColor(hex_color.to_string())),
    }
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{}", hex::encode([r, g, b]))
}

/// 整段文字使用同一种颜色，颜色无效时不着色。
pub fn paint(text: &str, hex_color: &str) -> ColoredString {
    match hex_to_rgb(hex_color) {
        Ok((r, g, b)) => text.truecolor(r, g, b),
        Err(_) => text.normal(),
    }
}

/// 根据起始和结束颜色生成颜色渐变列表，`steps` 小于 2 时按 2 处理。
pub fn generate_gradient(start_color: &str, end_color: &str, steps: usize) -> AppResult<Vec<String>> {
    let steps = steps.max(2);
    let (sr, sg, sb) = hex_to_rgb(start_color)?;
    let (er, eg, eb) = hex_to_rgb(end_color)?;
    let lerp = |start: u8, end: u8, i: usize| -> u8 {
        let value = start as f64 + (end as f64 - start as f64) * i as f64 / (steps - 1) as f64;
        value as u8
    };
    Ok((0..steps)
        .map(|i| rgb_to_hex(lerp(sr, er, i), lerp(sg, eg, i), lerp(sb, eb, i)))
        .collect())
}

/// 颜色不够时，先追加去掉末尾的逆序，再追加去掉末尾的正序，直到达到目标长度。
pub fn extend_gradient_colors<S: AsRef<str>>(colors: &[S], target_length: usize) -> Vec<String> {
    let mut extended: Vec<String> = colors.iter().map(|c| c.as_ref().to_string()).collect();
    if colors.len() < 2 {
        let fill = extended.first().cloned().unwrap_or_else(|| "#ffffff".to_string());
        extended.resize(target_length, fill);
        return extended;
    }
    let head = &colors[..colors.len() - 1];
    while extended.len() < target_length {
        extended.extend(head.iter().rev().map(|c| c.as_ref().to_string()));
        if extended.len() < target_length {
            extended.extend(head.iter().map(|c| c.as_ref().to_string()));
        }
    }
    extended.truncate(target_length);
    extended
}

/// 逐字着色，颜色列表短于文字时翻转并扩展当前列表。
pub fn gen_gradient_text<S: AsRef<str>>(text: &str, gradient_color: &[S]) -> String {
    let chars: Vec<char> = text.chars().collect();
    let colors = if chars.len() > gradient_color.len() {
        extend_gradient_colors(gradient_color, chars.len())
    } else {
        gradient_color.iter().map(|c| c.as_ref().to_string()).collect()
    };
    chars
        .iter()
        .zip(colors.iter())
        .map(|(ch, color)| match hex_to_rgb(color) {
            Ok((r, g, b)) => ch.to_string().truecolor(r, g, b).to_string(),
            Err(_) => ch.to_string(),
        })
        .collect()
}
