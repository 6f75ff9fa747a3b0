//! Scripted terminal sessions.
//!
//! A [`TerminalSession`] drives a real shell inside a pseudo-terminal,
//! typing a command sequence at human speed and synchronizing on expected
//! output between commands. It is strictly sequential: one pty, never
//! typing and waiting at the same time. The surrounding terminal recorder
//! captures whatever reaches the [`CaptureSink`].

mod instructions;
mod sink;

pub use instructions::{Expect, Instructions, PROMPT_SENTINEL};
pub use sink::{CaptureSink, MemorySink};

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use rand::Rng;
use tracing::debug;

use crate::cancel::CancelToken;
use crate::config::SessionConfig;
use crate::error::{PipelineError, PipelineResult};

/// How long to let a secret's echo drain while the sink is disabled.
const SECRET_DRAIN: Duration = Duration::from_millis(250);

/// Poll interval while waiting for output.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Whether the just-observed prompt is asking for a secret.
///
/// Matches the historical heuristic: the prompt's first token is the bare
/// word "Password" ("Password: " split on whitespace yields "Password:",
/// which does not match). Kept as the single predicate so a better
/// classifier can replace it without touching the state machine.
pub fn is_secret_prompt(prompt: &str) -> bool {
    prompt.split_whitespace().next() == Some("Password")
}

/// A scripted shell session inside a pty.
pub struct TerminalSession {
    instructions: Instructions,
    config: SessionConfig,
    cancel: CancelToken,
}

/// Byte stream state while the session runs: everything read from the pty,
/// plus a cursor marking how far expectation matching has consumed it.
struct Transcript {
    bytes: Vec<u8>,
    cursor: usize,
    rx: Receiver<Vec<u8>>,
}

impl Transcript {
    fn drain_pending(&mut self) {
        while let Ok(chunk) = self.rx.try_recv() {
            self.bytes.extend_from_slice(&chunk);
        }
    }

    /// Block until `pattern` appears at or after the cursor, then advance
    /// the cursor past the match.
    fn wait_for(
        &mut self,
        pattern: &str,
        timeout: Duration,
        cancel: &CancelToken,
    ) -> PipelineResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(end) = find(&self.bytes[self.cursor..], pattern.as_bytes()) {
                self.cursor += end;
                return Ok(());
            }
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }
            if Instant::now() >= deadline {
                return Err(PipelineError::Timeout {
                    pattern: pattern.to_string(),
                    seconds: timeout.as_secs(),
                });
            }
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(chunk) => self.bytes.extend_from_slice(&chunk),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    // Reader gone means the shell died under us.
                    return Err(PipelineError::Timeout {
                        pattern: pattern.to_string(),
                        seconds: timeout.as_secs(),
                    });
                }
            }
        }
    }
}

/// Find `needle` in `haystack`, returning the index one past the match.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + needle.len())
}

impl TerminalSession {
    pub fn new(instructions: Instructions, config: SessionConfig, cancel: CancelToken) -> Self {
        Self {
            instructions,
            config,
            cancel,
        }
    }

    /// Run the whole session against the given sink.
    ///
    /// INIT: spawn the shell, wait for the first prompt. Then for each
    /// command: type it character by character (the pty echo makes the
    /// typing visible in the capture from the first keystroke), and wait
    /// for its expectation. Finally send end-of-transmission and wait for
    /// the shell to exit.
    pub fn run(&self, sink: CaptureSink) -> PipelineResult<()> {
        let pty_system = native_pty_system();
        let pair = pty_system
            .openpty(PtySize {
                rows: self.config.rows,
                cols: self.config.columns,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| PipelineError::Spawn {
                shell: self.config.shell.clone(),
                message: e.to_string(),
            })?;

        let cmd = CommandBuilder::new(&self.config.shell);
        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| PipelineError::Spawn {
                shell: self.config.shell.clone(),
                message: e.to_string(),
            })?;
        drop(pair.slave);

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| PipelineError::Spawn {
                shell: self.config.shell.clone(),
                message: e.to_string(),
            })?;
        let mut writer = pair.master.take_writer().map_err(|e| PipelineError::Spawn {
            shell: self.config.shell.clone(),
            message: e.to_string(),
        })?;

        let (tx, rx) = mpsc::channel::<Vec<u8>>();
        let reader_sink = sink.clone();
        let reader_thread = thread::spawn(move || {
            let mut buf = [0u8; 4096];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => {
                        reader_sink.write(&buf[..n]);
                        if tx.send(buf[..n].to_vec()).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let mut transcript = Transcript {
            bytes: Vec::new(),
            cursor: 0,
            rx,
        };

        let timeout = Duration::from_secs(self.config.expect_timeout_secs);
        let prompt = self.config.prompt_marker.clone();

        // INIT: the shell signals readiness with its first prompt.
        debug!(shell = %self.config.shell, "waiting for initial prompt");
        transcript.wait_for(&prompt, timeout, &self.cancel)?;

        let mut previous_expect: Option<&Expect> = None;
        for (i, command) in self.instructions.commands.iter().enumerate() {
            if self.secret_follows(previous_expect) {
                debug!(step = i, "secret step, capture disabled");
                self.send_secret(&mut writer, &sink, &mut transcript, command)?;
            } else {
                debug!(step = i, command = %command, "typing");
                self.type_command(&mut writer, command)?;
            }

            let expect = &self.instructions.expect[i];
            match expect {
                Expect::Prompt => transcript.wait_for(&prompt, timeout, &self.cancel)?,
                Expect::Literal(text) => transcript.wait_for(text, timeout, &self.cancel)?,
            }
            previous_expect = Some(expect);
        }

        // DONE: end-of-transmission, then let the shell exit on its own.
        writer.write_all(&[0x04])?;
        writer.flush()?;
        let _ = child.wait();
        drop(writer);
        drop(pair.master);
        let _ = reader_thread.join();

        Ok(())
    }

    /// Secret classification happens against the expectation matched just
    /// before this command; the very first command can never be a secret.
    fn secret_follows(&self, previous: Option<&Expect>) -> bool {
        match previous {
            Some(Expect::Literal(text)) => is_secret_prompt(text),
            _ => false,
        }
    }

    /// Type a command one character at a time with a jittered delay, then
    /// newline. A fixed cadence reads as robotic in the final video, so
    /// each delay varies around the configured base.
    fn type_command(&self, writer: &mut impl Write, command: &str) -> PipelineResult<()> {
        let mut rng = rand::thread_rng();
        let base = self.config.type_delay_ms;
        let mut buf = [0u8; 4];
        for ch in command.chars() {
            writer.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            writer.flush()?;
            let factor: f64 = rng.gen_range(0.6..1.4);
            thread::sleep(Duration::from_millis((base as f64 * factor) as u64));
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Send a secret: capture off, the whole line in one write, capture
    /// back on only after the echo window has drained. The value must not
    /// appear in the transcript under any circumstances.
    fn send_secret(
        &self,
        writer: &mut impl Write,
        sink: &CaptureSink,
        transcript: &mut Transcript,
        secret: &str,
    ) -> PipelineResult<()> {
        sink.set_enabled(false);
        let mut line = secret.as_bytes().to_vec();
        line.push(b'\n');
        let result = writer.write_all(&line).and_then(|_| writer.flush());
        thread::sleep(SECRET_DRAIN);
        transcript.drain_pending();
        sink.set_enabled(true);
        result?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_prompt_matches_first_token_only() {
        assert!(is_secret_prompt("Password"));
        assert!(is_secret_prompt("Password for admin"));
        assert!(!is_secret_prompt("Password:"));
        assert!(!is_secret_prompt("Enter Password"));
        assert!(!is_secret_prompt("passphrase:"));
        assert!(!is_secret_prompt(""));
    }

    #[test]
    fn find_returns_index_past_match() {
        assert_eq!(find(b"hello world", b"world"), Some(11));
        assert_eq!(find(b"hello world", b"hello"), Some(5));
        assert_eq!(find(b"hello", b"x"), None);
        assert_eq!(find(b"ab", b"abc"), None);
    }

    #[test]
    fn secret_never_follows_prompt_expectation() {
        let instructions = Instructions::parse(
            "commands: [ls]\nexpect: [prompt]\n",
        )
        .unwrap();
        let session = TerminalSession::new(
            instructions,
            SessionConfig::default(),
            CancelToken::new(),
        );
        assert!(!session.secret_follows(None));
        assert!(!session.secret_follows(Some(&Expect::Prompt)));
        assert!(session.secret_follows(Some(&Expect::Literal("Password".into()))));
        assert!(!session.secret_follows(Some(&Expect::Literal("Continue?".into()))));
    }
}
