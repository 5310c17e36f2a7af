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

pub mod drill;
pub mod export;
pub mod settings;
pub mod stats;

use ingush_trainer_core::TrainingSession;

use crate::db::WordStore;
use crate::error::Fallible;
use crate::paths::resolve_database_path;
use crate::paths::resolve_progress_path;
use crate::progress::JsonProgressStore;

/// Load the word list once and resume the stored progress.
pub fn open_session(
    database: Option<String>,
    progress: Option<String>,
) -> Fallible<TrainingSession<JsonProgressStore>> {
    let words = WordStore::new(resolve_database_path(database)?);
    let store = JsonProgressStore::new(resolve_progress_path(progress)?);
    log::debug!(
        "Using database {} and progress file {}",
        words.path().display(),
        store.path().display()
    );
    Ok(TrainingSession::open(words.load_all()?, store))
}
