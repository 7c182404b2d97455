//! Reading and writing whole JSON documents on disk.
//!
//! Each store keeps its state in plain JSON files. A missing file is not an
//! error: readers get `None` and decide what an empty document means.
//! Writers replace the file by renaming a fully written temporary file over
//! it, so readers never observe a half-written document.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::Error;

/// Read and parse the JSON document at `path`.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns [Error::StorageUnavailable] if the file exists but cannot be read
/// or does not contain a valid document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => {
            tracing::error!("could not open {}: {error}", path.display());
            return Err(Error::StorageUnavailable(format!(
                "could not open {}: {error}",
                path.display()
            )));
        }
    };

    serde_json::from_reader(BufReader::new(file))
        .map(Some)
        .map_err(|error| {
            tracing::error!("could not parse {}: {error}", path.display());
            Error::StorageUnavailable(format!("could not parse {}: {error}", path.display()))
        })
}

/// Serialize `value` as pretty-printed JSON and atomically replace the file at `path`.
///
/// # Errors
///
/// Returns [Error::StorageUnavailable] if the document cannot be written.
/// The existing file, if any, is left untouched in that case.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    let temp_path = path.with_extension("json.tmp");

    write_to(&temp_path, value)
        .and_then(|()| fs::rename(&temp_path, path))
        .map_err(|error| {
            tracing::error!("could not write {}: {error}", path.display());
            // Best effort, the temporary file is only debris at this point.
            let _ = fs::remove_file(&temp_path);
            Error::StorageUnavailable(format!("could not write {}: {error}", path.display()))
        })
}

fn write_to<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Create `directory` and its parents if they do not exist yet.
///
/// # Errors
///
/// Returns [Error::StorageUnavailable] if the directory cannot be created.
pub fn ensure_directory(directory: &Path) -> Result<(), Error> {
    fs::create_dir_all(directory).map_err(|error| {
        tracing::error!("could not create directory {}: {error}", directory.display());
        Error::StorageUnavailable(format!(
            "could not create directory {}: {error}",
            directory.display()
        ))
    })
}
