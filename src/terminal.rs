//! Raw-mode alternate-screen session for the display.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Owns the terminal while the display runs.
///
/// The terminal is put back on [`Session::finish`], or on drop if the
/// session is abandoned through an early return.
pub struct Session<W: Write> {
    out: W,
    restored: bool,
}

impl<W: Write> Session<W> {
    pub fn start(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // Built before the setup writes so a failure there still restores
        let mut session = Self {
            out,
            restored: false,
        };
        execute!(
            session.out,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            EnableMouseCapture
        )?;
        Ok(session)
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        self.restored = true;
        restore(&mut self.out, terminal::disable_raw_mode)
    }
}

impl<W: Write> Drop for Session<W> {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.restore();
        }
    }
}

/// Runs every restore step, even after one fails, and reports the first error.
pub fn restore(
    out: &mut impl Write,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let screen = execute!(out, Show, LeaveAlternateScreen, DisableMouseCapture);
    let flushed = out.flush();
    let raw = disable_raw_mode();
    screen.and(flushed).and(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn raw_mode_is_left_even_when_output_fails() {
        let mut raw_left = false;
        let result = restore(&mut BrokenPipe, || {
            raw_left = true;
            Ok(())
        });

        assert!(raw_left);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn raw_mode_error_is_reported_after_clean_output() {
        let mut out = Vec::new();
        let result = restore(&mut out, || Err(io::Error::other("no tty")));

        assert_eq!(result.unwrap_err().to_string(), "no tty");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[?25h"));
        assert!(text.contains("\x1b[?1049l"));
    }

    #[test]
    fn restore_writes_screen_reset() {
        let mut out = Vec::new();
        restore(&mut out, || Ok(())).unwrap();
        assert!(!out.is_empty());
    }
}
