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

use std::env::current_exe;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::error::fail;

/// Name of the per-user directory holding the progress file.
const APP_DIR_NAME: &str = "IngushLanguage";

const PROGRESS_FILE_NAME: &str = "stats.json";

const DATABASE_FILE_NAME: &str = "ing_base.db";

/// Export sources, relative to the export root, in priority order.
pub const EXPORT_CANDIDATES: &[&str] = &["ing_base.db", "mobile_app/assets/db/ing_base.db"];

/// Seed document location, relative to the export root.
pub const EXPORT_OUTPUT: &str = "mobile_app/assets/db/seed.json";

/// The progress file lives in the user's configuration directory: the
/// roaming AppData folder on Windows, `~/Library/Application Support` on
/// macOS and `~/.config` elsewhere.
pub fn default_progress_path() -> Fallible<PathBuf> {
    match dirs::config_dir() {
        Some(base) => Ok(base.join(APP_DIR_NAME).join(PROGRESS_FILE_NAME)),
        None => fail("could not determine the user configuration directory"),
    }
}

/// The word database ships next to the executable.
pub fn default_database_path() -> Fallible<PathBuf> {
    let exe = current_exe()?;
    match exe.parent() {
        Some(dir) => Ok(dir.join(DATABASE_FILE_NAME)),
        None => Ok(PathBuf::from(DATABASE_FILE_NAME)),
    }
}

pub fn resolve_progress_path(path: Option<String>) -> Fallible<PathBuf> {
    match path {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_progress_path(),
    }
}

pub fn resolve_database_path(path: Option<String>) -> Fallible<PathBuf> {
    match path {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_database_path(),
    }
}
