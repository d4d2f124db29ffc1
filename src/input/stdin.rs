// src/input/stdin.rs

use super::{InputSource, Key};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal,
};
use log::{debug, warn};
use std::{
    io::{self, IsTerminal, Read},
    time::Duration,
};

// 大于标准库内部缓冲区，读取时直接越过它，未消费的数据只存在于 `pending` 中
const READ_CHUNK: usize = 64 * 1024;

/// 标准输入。自行维护行缓冲，保证可读等待看到的和按行读取的是同一份数据。
#[derive(Debug, Default)]
pub struct StdinSource {
    pending: Vec<u8>,
    eof: bool,
    raw: bool,
}

impl StdinSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            match io::stdin().lock().read(&mut chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|b| *b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=pos).collect();
        Some(decode_line(&line))
    }
}

/// 单次 `poll(2)` 最多等待 `i32::MAX` 毫秒，更长的超时由调用方分段等待。
#[cfg(unix)]
fn poll_timeout(timeout: Duration) -> nix::poll::PollTimeout {
    nix::poll::PollTimeout::try_from(timeout).unwrap_or(nix::poll::PollTimeout::MAX)
}

fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}

impl InputSource for StdinSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }
            if self.eof {
                if self.pending.is_empty() {
                    // 终端上的 EOF 不是永久的，下一次读取重新询问底层描述符
                    self.eof = false;
                    return Ok(None);
                }
                let rest = std::mem::take(&mut self.pending);
                return Ok(Some(decode_line(&rest)));
            }
            self.fill()?;
        }
    }

    #[cfg(unix)]
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        use nix::poll::{PollFd, PollFlags, poll};
        use std::{os::fd::AsFd, time::Instant};

        if !self.pending.is_empty() || self.eof {
            return Ok(true);
        }
        let stdin = io::stdin();
        // 超时大到无法表示时视为一直等待
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let remaining = deadline.map_or(Duration::MAX, |d| d.saturating_duration_since(Instant::now()));
            let mut poll_fds = [PollFd::new(stdin.as_fd(), PollFlags::POLLIN)];
            match poll(&mut poll_fds, poll_timeout(remaining)) {
                Ok(n) if n > 0 => return Ok(true),
                Ok(_) | Err(nix::errno::Errno::EINTR) => {
                    if remaining.is_zero() || deadline.is_some_and(|d| Instant::now() >= d) {
                        return Ok(false);
                    }
                    debug!("可读等待提前返回，剩余 {:?} 继续等待。", remaining);
                }
                Err(e) => return Err(io::Error::from_raw_os_error(e as i32)),
            }
        }
    }

    #[cfg(not(unix))]
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        if !self.pending.is_empty() || self.eof {
            return Ok(true);
        }
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "当前平台不支持对标准输入做可读等待",
        ))
    }

    fn poll_key(&mut self, interval: Duration) -> io::Result<Option<Key>> {
        if !event::poll(interval)? {
            return Ok(None);
        }
        let key = match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Enter => Some(Key::Enter),
                KeyCode::Backspace => Some(Key::Backspace),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::CtrlC),
                KeyCode::Char(c) => Some(Key::Char(c)),
                _ => None,
            },
            _ => None,
        };
        Ok(key)
    }

    fn read_hidden(&mut self) -> io::Result<String> {
        if io::stdin().is_terminal() {
            return rpassword::read_password();
        }
        debug!("标准输入不是终端，密码将按普通行读取。");
        self.read_line()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "输入已结束"))
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }
}

impl Drop for StdinSource {
    fn drop(&mut self) {
        if let Err(e) = self.leave_raw() {
            warn!("恢复终端模式失败: {}", e);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nix::poll::PollTimeout;

    #[test]
    fn test_poll_timeout_keeps_long_waits() {
        assert_eq!(poll_timeout(Duration::from_secs(120)).as_millis(), Some(120_000));
        assert_eq!(poll_timeout(Duration::from_secs(3600)).as_millis(), Some(3_600_000));
        assert_eq!(poll_timeout(Duration::ZERO), PollTimeout::ZERO);
    }

    #[test]
    fn test_poll_timeout_saturates_at_max() {
        let days = Duration::from_secs(60 * 60 * 24 * 30);
        assert_eq!(poll_timeout(days), PollTimeout::MAX);
    }
}
