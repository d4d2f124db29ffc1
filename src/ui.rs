// src/ui.rs

use crate::{
    constants,
    error::{AppError, AppResult},
    gradient,
    input::{InputSource, InputStrategy, Key, StdinSource},
    symbols,
};
use colored::*;
use log::{debug, error, warn};
use std::{
    fmt::Display,
    io::{self, Write},
    time::{Duration, Instant},
};

/// 终端宽度，无法获取(例如输出被重定向)时使用默认宽度。
pub fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| cols as usize)
        .ok()
        .filter(|cols| *cols > 0)
        .unwrap_or(constants::UI_WIDTH)
}

/// 估算文字在终端中占用的列数，非 ASCII 字符按两列计算。
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

enum KeyPollOutcome {
    Line(String),
    TimedOut,
    Interrupted,
}

/// 终端交互的入口：所有提示都写入 `out`，所有输入都从 `source` 读取。
pub struct Console<S = StdinSource, W = io::Stdout> {
    source: S,
    out: W,
}

impl Console<StdinSource, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(StdinSource::new(), io::stdout())
    }
}

impl<S: InputSource, W: Write> Console<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Self { source, out }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }

    pub fn println(&mut self, line: impl Display) -> AppResult<()> {
        writeln!(self.out, "{}", line)?;
        Ok(())
    }

    pub fn print_header(&mut self, title: &str) -> AppResult<()> {
        writeln!(self.out, "\n{}", "═".repeat(constants::UI_WIDTH))?;
        writeln!(self.out, " {}", title.cyan().bold())?;
        writeln!(self.out, "{}", "═".repeat(constants::UI_WIDTH))?;
        Ok(())
    }

    pub fn box_message(
        &mut self,
        title: &str,
        content: &[&str],
        color_func: fn(ColoredString) -> ColoredString,
    ) -> AppResult<()> {
        writeln!(self.out, "\n┌{}┐", "─".repeat(constants::UI_WIDTH - 2))?;
        writeln!(self.out, "  {}", color_func(title.bold()))?;
        writeln!(self.out, "├{}┤", "─".repeat(constants::UI_WIDTH - 2))?;
        for line in content {
            writeln!(self.out, "  {}", line)?;
        }
        writeln!(self.out, "└{}┘", "─".repeat(constants::UI_WIDTH - 2))?;
        Ok(())
    }

    pub fn info(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.out, "{} {}", *symbols::INFO, message)?;
        Ok(())
    }

    /// 输入格式错误等可恢复问题：打印到终端并写入日志。
    pub fn warn(&mut self, message: &str) -> AppResult<()> {
        warn!("{}", message);
        writeln!(self.out, "{} {}", *symbols::WARN, message.yellow())?;
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> AppResult<()> {
        error!("{}", message);
        writeln!(self.out, "{} {}", *symbols::ERROR, message.red())?;
        Ok(())
    }

    pub fn styled(&mut self, text: &str, hex_color: &str) -> AppResult<()> {
        writeln!(self.out, "{}", gradient::paint(text, hex_color))?;
        Ok(())
    }

    /// 打印提示并读取一行，返回去掉首尾空白的内容；输入结束视为用户中断。
    pub fn prompt(&mut self, message: &str) -> AppResult<String> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        match self.source.read_line()? {
            Some(line) => Ok(line.trim().to_string()),
            None => {
                writeln!(self.out)?;
                Err(AppError::UserInterrupt)
            }
        }
    }

    pub fn prompt_hidden(&mut self, message: &str) -> AppResult<String> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;
        match self.source.read_hidden() {
            Ok(secret) => Ok(secret.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(AppError::UserInterrupt),
            Err(e) => Err(e.into()),
        }
    }

    /// 最多等待 `timeout` 读取一行。超时返回 `default` 并打印一次超时提示；
    /// 超时前直接回车同样返回 `default`，但不打印提示。
    /// 除用户中断外的任何失败都会退化为不限时的普通输入，此时使用 `error_prompt`(如有)。
    pub fn read_line_with_timeout(
        &mut self,
        prompt: &str,
        error_prompt: Option<&str>,
        default: &str,
        timeout: Duration,
        strategy: InputStrategy,
    ) -> AppResult<String> {
        debug!("带超时的输入: strategy={:?}, timeout={:?}", strategy, timeout);
        let result = match strategy {
            InputStrategy::KeyPolling => self.read_by_key_polling(prompt, default, timeout),
            InputStrategy::Readiness => self.read_by_readiness(prompt, default, timeout),
        };
        match result {
            Ok(value) => Ok(value),
            Err(AppError::UserInterrupt) => Err(AppError::UserInterrupt),
            Err(e) => {
                error!("带超时的输入失败,将使用普通输入,原因:\"{}\"", e);
                writeln!(self.out)?;
                let answer = self.prompt(error_prompt.unwrap_or(prompt))?;
                Ok(if answer.is_empty() { default.to_string() } else { answer })
            }
        }
    }

    fn read_by_readiness(&mut self, prompt: &str, default: &str, timeout: Duration) -> AppResult<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        if self.source.wait_readable(timeout)? {
            let value = self
                .source
                .read_line()?
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .unwrap_or_else(|| default.to_string());
            return Ok(value);
        }
        writeln!(self.out)?;
        self.timeout_notice()?;
        Ok(default.to_string())
    }

    fn read_by_key_polling(&mut self, prompt: &str, default: &str, timeout: Duration) -> AppResult<String> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        self.source.enter_raw()?;
        let outcome = self.poll_keys(timeout);
        // 无论结果如何都先恢复终端模式
        self.source.leave_raw()?;
        writeln!(self.out)?;
        match outcome? {
            KeyPollOutcome::Line(line) if !line.is_empty() => Ok(line),
            KeyPollOutcome::Line(_) => Ok(default.to_string()),
            KeyPollOutcome::TimedOut => {
                self.timeout_notice()?;
                Ok(default.to_string())
            }
            KeyPollOutcome::Interrupted => Err(AppError::UserInterrupt),
        }
    }

    fn poll_keys(&mut self, timeout: Duration) -> AppResult<KeyPollOutcome> {
        let interval = Duration::from_millis(constants::KEY_POLL_INTERVAL_MS);
        let start = Instant::now();
        let mut buffer = String::new();
        loop {
            if let Some(key) = self.source.poll_key(interval)? {
                match key {
                    Key::Enter => return Ok(KeyPollOutcome::Line(buffer.trim().to_string())),
                    Key::CtrlC => return Ok(KeyPollOutcome::Interrupted),
                    Key::Backspace => {
                        if buffer.pop().is_some() {
                            write!(self.out, "\x08 \x08")?;
                        }
                    }
                    Key::Char(c) => {
                        buffer.push(c);
                        write!(self.out, "{}", c)?;
                    }
                }
                self.out.flush()?;
            }
            if start.elapsed() > timeout {
                return Ok(KeyPollOutcome::TimedOut);
            }
        }
    }

    fn timeout_notice(&mut self) -> AppResult<()> {
        self.styled(constants::TIMEOUT_NOTICE, constants::TIMEOUT_NOTICE_COLOR)
    }
}
