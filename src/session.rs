//! Session recordings: one `FrameInput` per line, JSON encoded.
//!
//! ```text
//! {"timestamp_ms":0,"landmarks":[{"x":0.5,"y":0.6,"z":0.0}, ...]}
//! {"timestamp_ms":33,"gesture":{"label":"Closed_Fist","confidence":0.91}}
//! # comment lines and blank lines are skipped
//! ```
//!
//! Timestamps must not decrease; a recording that runs backwards is
//! rejected at load time rather than fed to the detectors.

use crate::error::SessionError;
use orrery_input::FrameInput;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// An ordered list of frames captured from a landmark source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecording {
    frames: Vec<FrameInput>,
}

impl SessionRecording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: Vec<FrameInput>) -> Self {
        Self { frames }
    }

    pub fn push(&mut self, frame: FrameInput) {
        self.frames.push(frame);
    }

    pub fn frames(&self) -> &[FrameInput] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time between first and last frame.
    pub fn duration_ms(&self) -> u64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SessionError::io(path, e))?;
        let recording = Self::read_from(BufReader::new(file), path)?;
        debug!(path = %path.display(), frames = recording.len(), "recording loaded");
        Ok(recording)
    }

    /// Parse JSON lines. `origin` only labels errors.
    pub fn read_from<R: BufRead>(reader: R, origin: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let origin = origin.into();
        let mut frames: Vec<FrameInput> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| SessionError::io(&origin, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let frame: FrameInput =
                serde_json::from_str(trimmed).map_err(|source| SessionError::Parse {
                    path: origin.clone(),
                    line: line_no,
                    source,
                })?;

            if let Some(prev) = frames.last() {
                if frame.timestamp_ms < prev.timestamp_ms {
                    return Err(SessionError::OutOfOrder {
                        path: origin,
                        line: line_no,
                        at_ms: frame.timestamp_ms,
                        previous_ms: prev.timestamp_ms,
                    });
                }
            }
            frames.push(frame);
        }

        Ok(Self { frames })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| SessionError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush().map_err(|e| SessionError::io(path, e)))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), SessionError> {
        for frame in &self.frames {
            let line = serde_json::to_string(frame)?;
            writeln!(writer, "{line}").map_err(|e| SessionError::io("<writer>", e))?;
        }
        Ok(())
    }
}

impl IntoIterator for SessionRecording {
    type Item = FrameInput;
    type IntoIter = std::vec::IntoIter<FrameInput>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl FromIterator<FrameInput> for SessionRecording {
    fn from_iter<I: IntoIterator<Item = FrameInput>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
