// src/qr.rs

//! 把二维码的像素矩阵压缩成方块字符。`true` 表示深色模块，深色输出为空白，浅色输出为实心块。

use crate::error::{AppError, AppResult};
use qrcode::{Color, EcLevel, QrCode, Version};

const BLOCKS_2BY1: [char; 4] = ['█', '▀', '▄', ' '];

const BLOCKS_3BY2: [char; 64] = [
    '█', '🬝', '🬬', '🬎', '🬴', '🬕', '🬥', '🬆',
    '🬸', '🬙', '🬨', '🬊', '🬰', '🬒', '🬡', '🬂',
    '🬺', '🬛', '🬪', '🬌', '🬲', '▌', '🬣', '🬄',
    '🬶', '🬗', '🬧', '🬈', '🬮', '🬐', '🬟', '🬀',
    '🬻', '🬜', '🬫', '🬍', '🬳', '🬔', '🬤', '🬅',
    '🬷', '🬘', '▐', '🬉', '🬯', '🬑', '🬠', '🬁',
    '🬹', '🬚', '🬩', '🬋', '🬱', '🬓', '🬢', '🬃',
    '🬵', '🬖', '🬦', '🬇', '🬭', '🬏', '🬞', ' ',
];

/// 每个字符表示上下两个像素，最后一行缺少的下方像素按深色处理。
pub fn render_2by1(qr_map: &[Vec<bool>]) -> String {
    let Some(width) = qr_map.first().map(Vec::len) else {
        return String::new();
    };
    let mut lines = Vec::with_capacity(qr_map.len().div_ceil(2));
    for row in (0..qr_map.len()).step_by(2) {
        let line: String = (0..width)
            .map(|col| {
                let pixel_cur = qr_map[row][col] as usize;
                let pixel_below = qr_map.get(row + 1).map_or(1, |r| r[col] as usize);
                BLOCKS_2BY1[pixel_cur << 1 | pixel_below]
            })
            .collect();
        lines.push(line);
    }
    lines.join("\n")
}

/// 每个字符表示 3 行 2 列共 6 个像素，越界的像素按深色处理。
pub fn render_3by2(qr_map: &[Vec<bool>]) -> String {
    let Some(width) = qr_map.first().map(Vec::len) else {
        return String::new();
    };
    let pixel = |r: usize, c: usize| -> usize {
        if r >= qr_map.len() || c >= width {
            1
        } else {
            qr_map[r][c] as usize
        }
    };
    let mut lines = Vec::with_capacity(qr_map.len().div_ceil(3));
    for row in (0..qr_map.len()).step_by(3) {
        let line: String = (0..width)
            .step_by(2)
            .map(|col| {
                let encode = pixel(row, col) << 5
                    | pixel(row, col + 1) << 4
                    | pixel(row + 1, col) << 3
                    | pixel(row + 1, col + 1) << 2
                    | pixel(row + 2, col) << 1
                    | pixel(row + 2, col + 1);
                BLOCKS_3BY2[encode]
            })
            .collect();
        lines.push(line);
    }
    lines.join("\n")
}

/// 编码 `data` 并在四周补一圈浅色模块。`version` 容纳不下时自动选择更大的版本。
pub fn qr_map(data: &str, version: i16) -> AppResult<Vec<Vec<bool>>> {
    let code = QrCode::with_version(data, Version::Normal(version), EcLevel::M)
        .or_else(|_| QrCode::with_error_correction_level(data, EcLevel::M))
        .map_err(|e| AppError::Qrcode(e.to_string()))?;
    let width = code.width();
    let colors = code.to_colors();
    let mut map = vec![vec![false; width + 2]; width + 2];
    for (index, color) in colors.iter().enumerate() {
        map[index / width + 1][index % width + 1] = *color == Color::Dark;
    }
    Ok(map)
}

pub fn qr_terminal_str(data: &str, version: i16, render: fn(&[Vec<bool>]) -> String) -> AppResult<String> {
    Ok(render(&qr_map(data, version)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_2by1_packs_pairs() {
        let map = vec![vec![true, false], vec![false, true]];
        assert_eq!(render_2by1(&map), "▄▀");
        let odd = vec![vec![true], vec![false], vec![true]];
        assert_eq!(render_2by1(&odd), "▄\n ");
        assert_eq!(render_2by1(&[]), "");
    }

    #[test]
    fn test_render_3by2_uses_full_table() {
        assert_eq!(render_3by2(&[vec![false, false], vec![false, false], vec![false, false]]), "█");
        assert_eq!(render_3by2(&[vec![true, true], vec![true, true], vec![true, true]]), " ");
        // 只有左上角是浅色，其余都越界
        assert_eq!(render_3by2(&[vec![false]]), "🬀");
        assert_eq!(render_3by2(&[vec![true, false], vec![true, false], vec![true, false]]), "▐");
    }

    #[test]
    fn test_qr_map_has_light_border() {
        let map = qr_map("hello", 1).unwrap();
        assert_eq!(map.len(), 21 + 2);
        assert!(map[0].iter().all(|p| !p));
        assert!(map.iter().all(|row| !row[0] && !row[row.len() - 1]));
        // 左上角定位图案
        assert!(map[1][1]);
    }

    #[test]
    fn test_qr_terminal_str_dimensions() {
        let text = qr_terminal_str("wxp://example", 1, render_2by1).unwrap();
        let map = qr_map("wxp://example", 1).unwrap();
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines.len(), map.len().div_ceil(2));
        assert!(lines.iter().all(|l| l.chars().count() == map.len()));
    }
}
