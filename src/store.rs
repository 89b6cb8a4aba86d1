//! Append-only CSV history of emission records

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::models::EmissionRecord;

pub const HEADER: &str = "Name,Energy Usage,Waste Generated,Business Travel";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed history in {}: {reason}", .path.display())]
    ParseFailed { path: PathBuf, reason: String },
}

/// History file handle; one per process, passed by reference
///
/// Rows are only ever appended. No locking is done, so concurrent writers
/// may interleave rows, but each row goes out in a single write call.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_failed(&self, source: io::Error) -> StoreError {
        StoreError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn read_failed(&self, e: csv::Error) -> StoreError {
        if !e.is_io_error() {
            return StoreError::ParseFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            };
        }
        match e.into_kind() {
            csv::ErrorKind::Io(source) => StoreError::ReadFailed {
                path: self.path.clone(),
                source,
            },
            kind => StoreError::ParseFailed {
                path: self.path.clone(),
                reason: format!("{kind:?}"),
            },
        }
    }

    fn create_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| self.write_failed(e))
            }
            _ => Ok(()),
        }
    }

    /// Create the file with only the header row. Returns false if it already existed.
    pub fn ensure_exists(&self) -> Result<bool, StoreError> {
        self.create_parent_dir()?;
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(self.write_failed(e)),
        };
        file.write_all(format!("{HEADER}\n").as_bytes())
            .map_err(|e| self.write_failed(e))?;
        info!(path = %self.path.display(), "created history file");
        Ok(true)
    }

    /// Append one record, writing the header first if the file is new or empty
    ///
    /// A last line without a terminator is closed off before the row.
    pub fn append(&self, record: &EmissionRecord) -> Result<(), StoreError> {
        self.create_parent_dir()?;
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_failed(e))?;
        let len = file.metadata().map_err(|e| self.write_failed(e))?.len();
        let needs_header = len == 0;

        let mut buf = Vec::new();
        if needs_header {
            buf.extend_from_slice(HEADER.as_bytes());
            buf.push(b'\n');
        } else {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))
                .and_then(|_| file.read_exact(&mut last))
                .map_err(|e| self.write_failed(e))?;
            if last[0] != b'\n' {
                buf.push(b'\n');
            }
        }
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buf);
        writer
            .serialize(record)
            .map_err(|e| self.write_failed(io::Error::from(e)))?;
        writer.flush().map_err(|e| self.write_failed(e))?;
        drop(writer);

        file.write_all(&buf).map_err(|e| self.write_failed(e))?;
        debug!(name = %record.name, header = needs_header, "appended emission record");
        Ok(())
    }

    /// Load every record in file order
    ///
    /// A missing file is created with the header and yields no records.
    /// Any malformed row fails the whole load.
    pub fn load_all(&self) -> Result<Vec<EmissionRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.ensure_exists()?;
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(BufReader::new(file));

        let headers = reader.headers().map_err(|e| self.read_failed(e))?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }
        let missing: Vec<_> = HEADER
            .split(',')
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::ParseFailed {
                path: self.path.clone(),
                reason: format!("missing columns: {}", missing.join(", ")),
            });
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<EmissionRecord>() {
            records.push(row.map_err(|e| self.read_failed(e))?);
        }
        debug!(count = records.len(), path = %self.path.display(), "loaded history");
        Ok(records)
    }
}
