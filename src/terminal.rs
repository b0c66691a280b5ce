// stdin is switched to non-canonical, no-echo mode while the game runs and a
// thread forwards every byte read through a channel, so the game loop never blocks
use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

const STDIN_FD: i32 = 0;

/// Keeps the terminal in raw mode until dropped
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    pub fn enable() -> io::Result<RawMode> {
        Self::enable_with(&mut io::stdout())
    }

    fn enable_with(out: &mut impl Write) -> io::Result<RawMode> {
        let original = Termios::from_fd(STDIN_FD)?;
        let mut raw = original;
        raw.c_lflag &= !(ICANON | ECHO); // no echo and canonical mode for stdin
        tcsetattr(STDIN_FD, TCSANOW, &raw)?;
        // from here on an early return must go through drop
        let guard = RawMode { original };
        hide_cursor(out)?;
        log::debug!("Terminal switched to raw mode");
        Ok(guard)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = tcsetattr(STDIN_FD, TCSANOW, &self.original) {
            log::error!("Failed to restore terminal settings: {}", e);
        }
        let _ = show_cursor();
    }
}

/// Reads stdin one byte at a time on a background thread. The channel
/// disconnects when stdin closes.
pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer = [0u8; 1];
        loop {
            if let Err(e) = reader.read_exact(&mut buffer) {
                log::debug!("Stdin reader stopped: {}", e);
                break;
            }
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[1;1H")
}

fn hide_cursor(out: &mut impl Write) -> io::Result<()> {
    write!(out, "\x1b[?25l")?;
    out.flush()
}

fn show_cursor() -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "\x1b[?25h")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn clear_screen_sequence() {
        let mut out = Vec::new();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b[2J\x1b[1;1H");
    }

    #[test]
    fn failed_cursor_write_restores_terminal() {
        // needs stdin to be a terminal, nothing to check otherwise
        let Ok(before) = Termios::from_fd(STDIN_FD) else {
            return;
        };
        assert!(RawMode::enable_with(&mut BrokenPipe).is_err());
        let after = Termios::from_fd(STDIN_FD).unwrap();
        assert_eq!(after.c_lflag & (ICANON | ECHO), before.c_lflag & (ICANON | ECHO));
    }
}
