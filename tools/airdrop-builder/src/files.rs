use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::BuildError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> BuildError + '_ {
    move |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A document written to its sibling `.tmp` file, not yet moved into place.
#[derive(Debug)]
struct StagedFile {
    temp: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    fn discard(self) {
        let _ = fs::remove_file(&self.temp);
    }
}

fn to_json<T: Serialize>(path: &Path, value: &T) -> Result<String, BuildError> {
    serde_json::to_string_pretty(value).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_temp(temp: &Path, json: &str) -> Result<(), BuildError> {
    let mut file = File::create(temp).map_err(io_error(temp))?;
    file.write_all(json.as_bytes()).map_err(io_error(temp))?;
    file.write_all(b"\n").map_err(io_error(temp))?;
    file.sync_all().map_err(io_error(temp))
}

fn stage(path: &Path, json: &str) -> Result<StagedFile, BuildError> {
    let temp = temp_path(path);
    if let Err(e) = write_temp(&temp, json) {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }
    Ok(StagedFile {
        temp,
        target: path.to_path_buf(),
    })
}

/// Stage every document, then rename them all into place. If any document
/// fails to stage, no target is touched and every `.tmp` file is removed.
fn write_all_staged(documents: &[(&Path, String)]) -> Result<(), BuildError> {
    let mut staged = Vec::with_capacity(documents.len());
    for (path, json) in documents {
        match stage(path, json) {
            Ok(file) => staged.push(file),
            Err(e) => {
                staged.into_iter().for_each(StagedFile::discard);
                return Err(e);
            }
        }
    }

    let mut pending = staged.into_iter();
    while let Some(file) = pending.next() {
        if let Err(source) = fs::rename(&file.temp, &file.target) {
            let err = BuildError::Io {
                path: file.target.clone(),
                source,
            };
            file.discard();
            pending.for_each(StagedFile::discard);
            return Err(err);
        }
    }
    Ok(())
}

/// Write `value` as pretty JSON. The document goes to a sibling `.tmp` file
/// first and is renamed over `path`, so readers never see a partial file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), BuildError> {
    let json = to_json(path, value)?;
    write_all_staged(&[(path, json)])
}

/// Write two JSON documents that belong together. Both are staged before
/// either target is replaced.
pub fn write_json_pair<A: Serialize, B: Serialize>(
    first: (&Path, &A),
    second: (&Path, &B),
) -> Result<(), BuildError> {
    let first_json = to_json(first.0, first.1)?;
    let second_json = to_json(second.0, second.1)?;
    write_all_staged(&[(first.0, first_json), (second.0, second_json)])
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, BuildError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&content).map_err(|source| BuildError::Json {
        path: path.to_path_buf(),
        source,
    })
}
