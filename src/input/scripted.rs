// src/input/scripted.rs

//! 预先写好的输入，供单元测试和集成测试驱动交互流程。

use super::{InputSource, Key};
use std::{collections::VecDeque, io, thread, time::Duration};

#[derive(Debug, Default)]
pub struct ScriptedSource {
    /// `None` 表示在此处输入结束一次。
    lines: VecDeque<Option<String>>,
    keys: VecDeque<Key>,
    hidden: VecDeque<String>,
    raw: bool,
    last_wait: Option<Duration>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(|l| Some(l.into())).collect(),
            ..Self::default()
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push_back(Some(line.into()));
        self
    }

    pub fn push_eof(&mut self) -> &mut Self {
        self.lines.push_back(None);
        self
    }

    pub fn push_key(&mut self, key: Key) -> &mut Self {
        self.keys.push_back(key);
        self
    }

    /// 把文本拆成按键，`\n` 为回车，`\x08` 为退格。
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            let key = match ch {
                '\n' => Key::Enter,
                '\x08' => Key::Backspace,
                other => Key::Char(other),
            };
            self.keys.push_back(key);
        }
        self
    }

    pub fn push_hidden(&mut self, secret: impl Into<String>) -> &mut Self {
        self.hidden.push_back(secret.into());
        self
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// 最近一次可读等待收到的超时。
    pub fn last_wait(&self) -> Option<Duration> {
        self.last_wait
    }

    pub fn remaining_lines(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.lines.pop_front().flatten())
    }

    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        self.last_wait = Some(timeout);
        if self.lines.is_empty() {
            thread::sleep(timeout);
            return Ok(false);
        }
        Ok(true)
    }

    fn poll_key(&mut self, interval: Duration) -> io::Result<Option<Key>> {
        match self.keys.pop_front() {
            Some(key) => Ok(Some(key)),
            None => {
                thread::sleep(interval);
                Ok(None)
            }
        }
    }

    fn read_hidden(&mut self) -> io::Result<String> {
        self.hidden
            .pop_front()
            .or_else(|| self.lines.pop_front().flatten())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "输入已结束"))
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        self.raw = true;
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        self.raw = false;
        Ok(())
    }
}
