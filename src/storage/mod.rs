//! On-disk form of the vocabulary and the document vector store.
//!
//! Both are written with bincode through buffered file handles. A file
//! that is absent is reported as [`SearchError::MissingIndex`]; one that
//! does not decode, or decodes into an inconsistent structure, as
//! [`SearchError::CorruptIndex`]. Any other I/O failure while opening or
//! reading is a [`SearchError::ReadIndex`].

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{Result, SearchError};
use crate::matrix::DocumentVectors;
use crate::preprocessing::Vocabulary;

pub fn save_vocabulary(vocabulary: &Vocabulary, path: &Path) -> Result<()> {
    save(vocabulary, path)
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    load(path)
}

pub fn save_vectors(vectors: &DocumentVectors, path: &Path) -> Result<()> {
    save(vectors, path)
}

pub fn load_vectors(path: &Path) -> Result<DocumentVectors> {
    load(path)
}

fn save<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    info!("Dumping data to {}...", path.display());
    let start = Instant::now();
    let write_err = |source: io::Error| SearchError::WriteIndex {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    bincode::serialize_into(&mut writer, value).map_err(|e| match *e {
        bincode::ErrorKind::Io(source) => write_err(source),
        other => SearchError::corrupt(path, other),
    })?;
    writer.flush().map_err(write_err)?;

    info!("Saved {} in {:?}", path.display(), start.elapsed());
    Ok(())
}

fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    info!("Loading {}...", path.display());
    let start = Instant::now();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SearchError::MissingIndex {
            path: path.to_path_buf(),
        },
        _ => SearchError::ReadIndex {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let reader = BufReader::with_capacity(1024 * 1024, file);
    // A short read means the file was truncated; any other I/O error is not
    // about the content.
    let value = bincode::deserialize_from(reader).map_err(|e| match *e {
        bincode::ErrorKind::Io(source) if source.kind() != io::ErrorKind::UnexpectedEof => {
            SearchError::ReadIndex {
                path: path.to_path_buf(),
                source,
            }
        }
        other => SearchError::corrupt(path, other),
    })?;

    info!("Loaded {} in {:?}", path.display(), start.elapsed());
    Ok(value)
}
