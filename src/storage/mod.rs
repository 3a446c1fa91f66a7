use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::Session;

const DATA_DIR: &str = ".zapi";
const SESSION_FILE: &str = "session.json";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to parse `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_session() -> Result<Option<Session>, StorageError> {
    load_session_from(&data_dir())
}

pub fn save_session(session: &Session) -> Result<(), StorageError> {
    save_session_to(&data_dir(), session)
}

pub fn load_session_from(dir: &Path) -> Result<Option<Session>, StorageError> {
    let file = dir.join(SESSION_FILE);
    if !file.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(&file).map_err(|source| StorageError::Io {
        path: file.clone(),
        source,
    })?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Parse { path: file, source })
}

pub fn save_session_to(dir: &Path, session: &Session) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(|source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let file = dir.join(SESSION_FILE);
    let raw = serde_json::to_string_pretty(session).map_err(|source| StorageError::Parse {
        path: file.clone(),
        source,
    })?;
    fs::write(&file, raw).map_err(|source| StorageError::Io { path: file, source })
}

fn data_dir() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(DATA_DIR)
}
