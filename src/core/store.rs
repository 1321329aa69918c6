//! # Note Store
//!
//! Notes persisted as a single JSON file.
//!
//! ```text
//! {
//!   "next_id": 4,
//!   "notes": [ { "id": 1, "title": "...", "body": "...", "created_at": 1700000000 }, ... ]
//! }
//! ```
//!
//! Ids start at 1 and are never reused. Every mutation rewrites the whole file
//! with an atomic rename (write `.tmp`, then `rename()`).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Prefix that turns a note body into a path to import the text from.
pub const FILE_BODY_PREFIX: &str = "file:";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub created_at: i64,
}

#[derive(Serialize, Deserialize, Debug)]
struct StoreData {
    next_id: u32,
    notes: Vec<Note>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            next_id: 1,
            notes: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotFound(u32),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "store parse error: {e}"),
            StoreError::NotFound(id) => write!(f, "note {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e)
    }
}

pub struct NoteStore {
    path: PathBuf,
    data: StoreData,
}

impl NoteStore {
    /// Open the store at `path`, starting empty if the file doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            let json = fs::read_to_string(&path)?;
            serde_json::from_str(&json)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            StoreData::default()
        };
        info!(
            "Opened note store at {} ({} notes)",
            path.display(),
            data.notes.len()
        );
        Ok(Self { path, data })
    }

    pub fn create(&mut self, title: &str, body: &str) -> Result<u32, StoreError> {
        let id = self.data.next_id;
        self.data.notes.push(Note {
            id,
            title: title.to_string(),
            body: body.to_string(),
            created_at: Utc::now().timestamp(),
        });
        self.data.next_id += 1;
        if let Err(e) = self.save() {
            self.data.notes.pop();
            self.data.next_id = id;
            return Err(e);
        }
        info!("Created note {}", id);
        Ok(id)
    }

    pub fn fetch(&self, id: u32) -> Option<&Note> {
        self.data.notes.iter().find(|n| n.id == id)
    }

    pub fn delete(&mut self, id: u32) -> Result<(), StoreError> {
        let pos = self
            .data
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.data.notes.remove(pos);
        if let Err(e) = self.save() {
            self.data.notes.insert(pos, removed);
            return Err(e);
        }
        info!("Deleted note {}", id);
        Ok(())
    }

    /// Notes matching every whitespace-separated term of `query`, best first.
    ///
    /// Matching is case-insensitive over title and body. Score is the number
    /// of occurrences with title hits counted twice; ties go to the lower id.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, &Note)> = self
            .data
            .notes
            .iter()
            .filter_map(|note| {
                let title = note.title.to_lowercase();
                let body = note.body.to_lowercase();
                let mut score = 0;
                for term in &terms {
                    let in_title = title.matches(term.as_str()).count();
                    let in_body = body.matches(term.as_str()).count();
                    if in_title + in_body == 0 {
                        return None;
                    }
                    score += in_title * 2 + in_body;
                }
                Some((score, note))
            })
            .collect();

        hits.sort_by(|(sa, a), (sb, b)| sb.cmp(sa).then(a.id.cmp(&b.id)));
        debug!("Search {:?}: {} hits", query, hits.len());
        hits.into_iter().map(|(_, note)| note).collect()
    }

    /// Every note, ascending by id.
    pub fn list(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.data.notes.iter().collect();
        notes.sort_by_key(|n| n.id);
        notes
    }

    fn save(&self) -> Result<(), StoreError> {
        atomic_write_json(&self.path, &self.data)
    }
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Resolve a body typed at the prompt: `file:<path>` imports that file's text.
pub fn resolve_body(input: &str) -> io::Result<String> {
    match input.strip_prefix(FILE_BODY_PREFIX) {
        Some(path) => {
            let path = path.trim();
            debug!("Importing note body from {}", path);
            fs::read_to_string(path)
        }
        None => Ok(input.to_string()),
    }
}
