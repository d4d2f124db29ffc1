// src/meta.rs

use crate::{
    constants,
    error::AppResult,
    gradient,
    input::InputSource,
    models::KeyWord,
    qr, ui,
    ui::Console,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use clap::crate_version;
use colored::*;
use std::io::{self, Cursor, IsTerminal, Write};

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// 保留两位小数。按十进制格式化后再解析，恰好落在中间的值与 `{:.2}` 的舍入一致。
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// 数值及其单位。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitValue {
    pub number: f64,
    pub unit: &'static str,
}

/// 换算到合适的单位。指定 `unit` 时按该单位换算并保留两位小数；
/// 否则不断除以 1024 直到小于 1024 或到达 PB。
pub fn determine_suitable_units(number: u64, unit: Option<&str>) -> UnitValue {
    if let Some(index) = unit.and_then(|u| UNITS.iter().position(|x| *x == u)) {
        let value = number as f64 / 1024f64.powi(index as i32);
        return UnitValue {
            number: round2(value),
            unit: UNITS[index],
        };
    }
    let mut value = number as f64;
    let mut index = 0;
    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }
    UnitValue {
        number: value,
        unit: UNITS[index],
    }
}

pub fn suitable_units_display(number: u64) -> String {
    let result = determine_suitable_units(number, None);
    format!("{:.2}{}", result.number, result.unit)
}

/// 把标准 base64 编码的图片等数据解码为可读取的内存缓冲。
pub fn base64_to_binary(base64_string: &str) -> AppResult<Cursor<Vec<u8>>> {
    let data = STANDARD.decode(base64_string.trim())?;
    Ok(Cursor::new(data))
}

/// 是否运行在交互终端中，二维码等内容只在终端中打印。
pub fn check_run_env() -> bool {
    io::stdout().is_terminal()
}

fn center(text: &str, text_width: usize) -> String {
    let left = ui::terminal_width().saturating_sub(text_width) / 2;
    text.lines()
        .map(|line| format!("{}{}", " ".repeat(left), line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_meta<W: Write>(out: &mut W) -> AppResult<()> {
    let colors = gradient::generate_gradient("#fa709a", "#fee140", 10)?;
    writeln!(
        out,
        "{}",
        gradient::gen_gradient_text(constants::BANNER, &colors).bold()
    )?;
    writeln!(
        out,
        "{},\n{}",
        format!("{} v{}", constants::SOFTWARE_FULL_NAME, crate_version!()).bold(),
        constants::COPYRIGHT.italic()
    )?;
    writeln!(out, "Licensed under the terms of the {}.", constants::LICENSE)?;
    writeln!(
        out,
        "{}",
        gradient::gen_gradient_text(
            "\t软件免费使用!并且在GitHub开源,如果你付费那就是被骗了。",
            gradient::BLUE2PURPLE_14
        )
    )?;
    Ok(())
}

/// 赞赏码及感谢语，居中排版。
pub fn pay_text() -> AppResult<String> {
    let code = qr::qr_terminal_str(constants::PAY_QR_CONTENT, 1, qr::render_2by1)?;
    let code_width = code.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let thanks = "微信扫码支持作者,您的支持是我持续更新的动力。";
    Ok(format!(
        "{}\n{}",
        center(&code, code_width),
        center(
            &gradient::gen_gradient_text(thanks, gradient::YELLOW2GREEN_10),
            ui::display_width(thanks)
        )
    ))
}

pub fn pay<W: Write>(out: &mut W) -> AppResult<()> {
    if check_run_env() {
        writeln!(out, "{}", pay_text()?)?;
    }
    Ok(())
}

pub fn print_current_task_num<W: Write>(out: &mut W, num: usize) -> AppResult<()> {
    let text = format!("{}:{}。", KeyWord::CurrentTask, num);
    let left = ui::terminal_width().saturating_sub(ui::display_width(&text));
    writeln!(
        out,
        "{}{}",
        " ".repeat(left),
        gradient::paint(&text, constants::CURRENT_TASK_COLOR)
    )?;
    Ok(())
}

pub fn print_helper<S: InputSource, W: Write>(console: &mut Console<S, W>) -> AppResult<()> {
    let lines: Vec<&str> = constants::HELP_CONFIG_GUIDE.lines().collect();
    console.box_message("配置文件说明", &lines, |s| s.cyan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suitable_units_display() {
        assert_eq!(suitable_units_display(0), "0.00B");
        assert_eq!(suitable_units_display(1023), "1023.00B");
        assert_eq!(suitable_units_display(1024), "1.00KB");
        assert_eq!(suitable_units_display(1536), "1.50KB");
        assert_eq!(suitable_units_display(5 * 1024 * 1024 * 1024), "5.00GB");
        assert_eq!(suitable_units_display(1024u64.pow(6)), "1024.00PB");
    }

    #[test]
    fn test_determine_suitable_units_with_unit() {
        let value = determine_suitable_units(1536 * 1024, Some("KB"));
        assert_eq!(value, UnitValue { number: 1536.0, unit: "KB" });
        let value = determine_suitable_units(1000, Some("KB"));
        assert_eq!(value.number, 0.98);
        assert_eq!(determine_suitable_units(2048, Some("XB")).unit, "KB");
        // 1.125 和 1.375 能被精确表示，舍入到偶数
        assert_eq!(determine_suitable_units(1152, Some("KB")).number, 1.12);
        assert_eq!(determine_suitable_units(1408, Some("KB")).number, 1.38);
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(3.125), 3.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(50.0), 50.0);
    }

    #[test]
    fn test_base64_to_binary() {
        use std::io::Read;

        // PNG 文件头
        let mut reader = base64_to_binary("iVBORw0KGgo=\n").unwrap();
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).unwrap();
        assert_eq!(bytes, [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

        assert!(matches!(base64_to_binary("不是base64"), Err(crate::error::AppError::Base64(_))));
    }

    #[test]
    fn test_print_meta_contains_license() {
        let mut out = Vec::new();
        print_meta(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(constants::LICENSE));
        assert!(text.contains(constants::SOFTWARE_FULL_NAME));
    }

    #[test]
    fn test_pay_text_renders_qr() {
        let text = pay_text().unwrap();
        assert!(text.contains('█'));
    }

    #[test]
    fn test_print_current_task_num() {
        let mut out = Vec::new();
        print_current_task_num(&mut out, 3).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("当前任务数:3。"));
    }
}
