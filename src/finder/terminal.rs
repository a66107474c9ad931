//! Ownership of the controlling terminal for the length of one search.
//!
//! Raw mode is a scoped acquisition: [`RawModeGuard`] restores the saved
//! termios when dropped, which covers normal returns, `?` returns and
//! unwinding. A [`SignalGuard`] covers SIGINT/SIGTERM/SIGHUP, which would
//! otherwise end the process without running destructors.

use super::FinderError;
use std::io::{self, Read, Write};

/// What the session needs from a terminal: raw reads, a width, and output.
pub trait Terminal: Write {
    /// One blocking read of whatever bytes a single keystroke produced.
    fn read_key(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Current column count, or `None` when it cannot be determined.
    fn width(&self) -> Option<usize>;
}

pub fn stdout_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}

#[cfg(unix)]
pub use unix::{RawModeGuard, SignalGuard, Tty};

#[cfg(unix)]
mod unix {
    use super::*;
    use nix::sys::termios::{
        LocalFlags, SetArg, SpecialCharacterIndices, Termios, tcgetattr, tcsetattr,
    };
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::{Handle, Signals};
    use std::fs::{File, OpenOptions};
    use std::thread::JoinHandle;

    const TTY_PATH: &str = "/dev/tty";

    fn open_tty() -> io::Result<File> {
        OpenOptions::new().read(true).write(true).open(TTY_PATH)
    }

    /// Saves the terminal mode and switches to cbreak without echo: bytes
    /// arrive one keystroke at a time and Ctrl-C arrives as a byte.
    pub struct RawModeGuard {
        original: Termios,
        tty: File,
    }

    impl RawModeGuard {
        pub fn enter() -> Result<Self, FinderError> {
            let tty = open_tty()?;
            let original = tcgetattr(&tty)?;

            let mut raw = original.clone();
            raw.local_flags
                .remove(LocalFlags::ICANON | LocalFlags::ECHO | LocalFlags::ISIG);
            raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
            raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
            tcsetattr(&tty, SetArg::TCSANOW, &raw)?;
            log::debug!("terminal switched to cbreak mode");

            Ok(Self { original, tty })
        }

        pub fn original(&self) -> &Termios {
            &self.original
        }

        pub fn input(&self) -> io::Result<File> {
            self.tty.try_clone()
        }
    }

    impl Drop for RawModeGuard {
        fn drop(&mut self) {
            // Best effort.
            let _ = tcsetattr(&self.tty, SetArg::TCSANOW, &self.original);
            log::debug!("terminal mode restored");
        }
    }

    /// Restores `original` and exits when a termination signal arrives.
    pub struct SignalGuard {
        handle: Handle,
        thread: Option<JoinHandle<()>>,
    }

    impl SignalGuard {
        pub fn new(original: Termios) -> Result<Self, FinderError> {
            let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
            let handle = signals.handle();
            let thread = std::thread::spawn(move || {
                if let Some(signal) = signals.forever().next() {
                    log::warn!("signal {signal} received, restoring terminal");
                    if let Ok(tty) = open_tty() {
                        let _ = tcsetattr(&tty, SetArg::TCSANOW, &original);
                    }
                    let _ = io::stdout().write_all(b"\r\n");
                    let _ = io::stdout().flush();
                    std::process::exit(128 + signal);
                }
            });
            Ok(Self { handle, thread: Some(thread) })
        }
    }

    impl Drop for SignalGuard {
        fn drop(&mut self) {
            self.handle.close();
            if let Some(thread) = self.thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// The real terminal: keystrokes from `/dev/tty`, frames to stdout.
    pub struct Tty {
        // Dropped in declaration order: stop watching signals, then
        // restore the mode.
        _signals: SignalGuard,
        _raw: RawModeGuard,
        input: File,
        out: io::Stdout,
    }

    impl Tty {
        pub fn open() -> Result<Self, FinderError> {
            let raw = RawModeGuard::enter()?;
            let signals = SignalGuard::new(raw.original().clone())?;
            let input = raw.input()?;
            Ok(Self { _signals: signals, _raw: raw, input, out: io::stdout() })
        }
    }

    impl Write for Tty {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.out.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.out.flush()
        }
    }

    impl Terminal for Tty {
        fn read_key(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }

        fn width(&self) -> Option<usize> {
            stdout_width()
        }
    }
}

/// Open the controlling terminal for an interactive search.
pub fn open() -> Result<impl Terminal, FinderError> {
    #[cfg(unix)]
    {
        Tty::open()
    }
    #[cfg(not(unix))]
    {
        Err::<Scripted, _>(FinderError::Unsupported)
    }
}

/// In-memory terminal fed one keystroke per read; used to drive sessions
/// without a real device.
#[derive(Debug, Default)]
pub struct Scripted {
    keys: std::collections::VecDeque<Vec<u8>>,
    width: Option<usize>,
    pub output: Vec<u8>,
}

impl Scripted {
    pub fn new(width: Option<usize>) -> Self {
        Self { width, ..Default::default() }
    }

    pub fn key(mut self, bytes: &[u8]) -> Self {
        self.keys.push_back(bytes.to_vec());
        self
    }

    /// Each character of `text` as its own keystroke.
    pub fn typed(mut self, text: &str) -> Self {
        for b in text.bytes() {
            self.keys.push_back(vec![b]);
        }
        self
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Write for Scripted {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal for Scripted {
    fn read_key(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(key) = self.keys.pop_front() else {
            return Ok(0);
        };
        let n = key.len().min(buf.len());
        buf[..n].copy_from_slice(&key[..n]);
        Ok(n)
    }

    fn width(&self) -> Option<usize> {
        self.width
    }
}
