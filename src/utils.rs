// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::Permissions;
use std::fs::create_dir_all;
use std::fs::metadata;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::Fallible;
use crate::error::fail;

/// Replace the file at `path` with whatever `write` produces.
///
/// The content goes to a temporary file in the same directory, which is
/// synced and then renamed over `path`. Readers see either the old file or
/// the new one. If anything fails the temporary file is removed and `path`
/// is left as it was.
///
/// A replaced file keeps its permissions. A new file is readable by
/// everyone (0644 on Unix), not owner-only like the temporary file.
pub fn write_atomically<F>(path: &Path, write: F) -> Fallible<()>
where
    F: FnOnce(&mut dyn Write) -> Fallible<()>,
{
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return fail(format!("not a file path: {}", path.display()));
    }
    create_dir_all(directory)?;
    let tmp = NamedTempFile::new_in(directory)?;
    if let Some(permissions) = target_permissions(path) {
        tmp.as_file().set_permissions(permissions)?;
    }
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Permissions the file at `path` should end up with.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match metadata(path) {
        Ok(existing) if existing.is_file() => Some(existing.permissions()),
        _ => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

/// Write a value as pretty-printed JSON, atomically.
pub fn write_json_atomically<T: Serialize + ?Sized>(path: &Path, value: &T) -> Fallible<()> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writer.write_all(b"\n")?;
        Ok(())
    })
}
