//! Interaction log: append-only conversation file with per-message token counts.
//!
//! One [`InteractionLogger`] is constructed at startup and shared (`Arc`) by every handler. Each
//! record is formatted, written and flushed while holding the file lock, so concurrent handlers
//! never interleave records. The file handle is released when the last `Arc` is dropped.
//!
//! Record format (`asctime - LEVEL - message`):
//!
//! ```text
//! 2024-03-01 10:15:02,117 - INFO - User: when does the library open?
//! Context tokens: 7
//! 2024-03-01 10:15:03,480 - INFO - Generated tokens: 12
//! ```

mod tokenizer;

pub use tokenizer::{TiktokenCounter, TokenCounter};

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::info;

/// Severity written into every record; the log has no level filtering.
pub const RECORD_LEVEL: &str = "INFO";

/// Who produced a logged message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Bot => "Bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Conversation logger bound to one output file and one tokenizer.
pub struct InteractionLogger {
    path: PathBuf,
    counter: Arc<dyn TokenCounter>,
    writer: Mutex<LineWriter<File>>,
}

impl InteractionLogger {
    /// Opens (creating if needed, including parent directories) `path` for appending.
    pub fn open(path: impl AsRef<Path>, counter: Arc<dyn TokenCounter>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!(path = %path.display(), "Interaction log opened");
        Ok(Self {
            path,
            counter,
            writer: Mutex::new(LineWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Token count of `text` under the completion model's tokenizer.
    pub fn count_tokens(&self, text: &str) -> usize {
        self.counter.count(text)
    }

    /// Appends `"{sender}: {text}\nContext tokens: {n}"` and returns `n`.
    pub fn log_message(&self, sender: Sender, text: &str) -> io::Result<usize> {
        let tokens = self.count_tokens(text);
        info!(sender = %sender, tokens, text_len = text.len(), "interaction: message");
        self.append(&format!("{}: {}\nContext tokens: {}", sender, text, tokens))?;
        Ok(tokens)
    }

    /// Appends `"Generated tokens: {count}"`.
    pub fn log_generated_tokens(&self, count: usize) -> io::Result<()> {
        info!(generated_tokens = count, "interaction: generated tokens");
        self.append(&format!("Generated tokens: {}", count))
    }

    /// Logs one exchange: the user text, then (when a reply was sent) the bot text and its
    /// generated-token count. Returns the generated-token count when there was a reply.
    pub fn log_exchange(&self, user_text: &str, reply: Option<&str>) -> io::Result<Option<usize>> {
        self.log_message(Sender::User, user_text)?;
        match reply {
            Some(reply) => {
                let generated = self.count_tokens(reply);
                self.log_message(Sender::Bot, reply)?;
                self.log_generated_tokens(generated)?;
                Ok(Some(generated))
            }
            None => Ok(None),
        }
    }

    fn append(&self, message: &str) -> io::Result<()> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "interaction log lock poisoned"))?;
        writeln!(writer, "{} - {} - {}", timestamp, RECORD_LEVEL, message)?;
        writer.flush()
    }
}

impl fmt::Debug for InteractionLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionLogger")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
