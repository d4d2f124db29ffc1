// src/input/mod.rs

pub mod stdin;
#[cfg(any(test, feature = "testing"))]
pub mod scripted;

use std::{io, time::Duration};

pub use stdin::StdinSource;

/// 按键轮询模式下关心的按键。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
    CtrlC,
}

/// 所有交互输入都经由同一个输入源读取，避免多个读取方争抢标准输入的缓冲区。
pub trait InputSource {
    /// 读取一行(不含换行符)，`None` 表示输入已结束。
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// 等待输入可读，最多等待 `timeout`。
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// 在 `interval` 内检查是否有按键。
    fn poll_key(&mut self, interval: Duration) -> io::Result<Option<Key>>;

    /// 不回显地读取一行，用于密码。
    fn read_hidden(&mut self) -> io::Result<String>;

    fn enter_raw(&mut self) -> io::Result<()>;

    fn leave_raw(&mut self) -> io::Result<()>;
}

/// 带超时输入的实现方式，启动时按终端能力选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStrategy {
    /// 逐键轮询，自行维护行缓冲。
    KeyPolling,
    /// 对输入描述符做一次有超时的可读等待，然后按行读取。
    Readiness,
}

impl InputStrategy {
    pub fn detect() -> Self {
        if cfg!(unix) {
            InputStrategy::Readiness
        } else {
            InputStrategy::KeyPolling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_matches_platform() {
        let expected = if cfg!(unix) {
            InputStrategy::Readiness
        } else {
            InputStrategy::KeyPolling
        };
        assert_eq!(InputStrategy::detect(), expected);
    }
}
