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

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use ingush_trainer_core::ProgressState;
use ingush_trainer_core::ProgressStore;
use ingush_trainer_core::types::progress::clamp_text_scale;

use crate::error::Fallible;
use crate::utils::write_json_atomically;

/// Read progress from `path`. A missing, unreadable or malformed file yields
/// the default state. An out-of-range text scale is clamped.
pub fn load_progress(path: &Path) -> ProgressState {
    let text = match read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No progress file at {}", path.display());
            return ProgressState::default();
        }
        Err(e) => {
            log::warn!("Could not read progress from {}: {e}", path.display());
            return ProgressState::default();
        }
    };
    match ProgressState::from_json(&text) {
        Ok(mut state) => {
            state.preferred_text_scale = clamp_text_scale(state.preferred_text_scale);
            state
        }
        Err(e) => {
            log::warn!("Ignoring corrupt progress file {}: {e}", path.display());
            ProgressState::default()
        }
    }
}

/// Write progress to `path`, replacing the previous file atomically.
pub fn save_progress(path: &Path, state: &ProgressState) -> Fallible<()> {
    log::debug!(
        "Saving progress to {} (position {})",
        path.display(),
        state.position
    );
    write_json_atomically(path, state)
}

/// Progress kept in a JSON file.
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> ProgressState {
        load_progress(&self.path)
    }

    fn save(&mut self, state: &ProgressState) -> ingush_trainer_core::Fallible<()> {
        Ok(save_progress(&self.path, state)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir;
    use std::fs::read;
    use std::fs::write;

    use ingush_trainer_core::Example;
    use ingush_trainer_core::TrainingSession;
    use ingush_trainer_core::Word;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn sample() -> ProgressState {
        ProgressState {
            position: 12,
            known_count: 9,
            unknown_count: 4,
            display_name: "Магомед".to_string(),
            preferred_text_scale: 19,
        }
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        save_progress(&path, &sample())?;
        assert_eq!(load_progress(&path), sample());
        Ok(())
    }

    #[test]
    fn test_round_trip_default() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        save_progress(&path, &ProgressState::default())?;
        assert_eq!(load_progress(&path), ProgressState::default());
        Ok(())
    }

    #[test]
    fn test_file_is_human_readable() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        save_progress(&path, &sample())?;
        let text = read_to_string(&path)?;
        assert!(text.starts_with("{\n  \"position\": 12,\n"));
        assert!(text.contains("Магомед"));
        Ok(())
    }

    #[test]
    fn test_missing_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert_eq!(
            load_progress(&dir.join("nope.json")),
            ProgressState::default()
        );
        Ok(())
    }

    #[test]
    fn test_corrupt_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        write(&path, b"{\"position\": 3, \"known_co")?;
        assert_eq!(load_progress(&path), ProgressState::default());
        Ok(())
    }

    #[test]
    fn test_unreadable_path() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert_eq!(load_progress(&dir), ProgressState::default());
        Ok(())
    }

    #[test]
    fn test_legacy_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        write(
            &path,
            r#"{"current_index": 2, "known_count": 1, "unknown_count": 1, "user_name": "Гость"}"#,
        )?;
        let state = load_progress(&path);
        assert_eq!(state.position, 2);
        assert_eq!(state.display_name, "Гость");
        assert_eq!(state.preferred_text_scale, 16);
        Ok(())
    }

    #[test]
    fn test_text_scale_is_clamped_on_load() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        write(&path, r#"{"example_font_size": 99}"#)?;
        assert_eq!(load_progress(&path).preferred_text_scale, 30);
        write(&path, r#"{"preferred_text_scale": 2}"#)?;
        assert_eq!(load_progress(&path).preferred_text_scale, 10);
        Ok(())
    }

    #[test]
    fn test_failed_save_is_reported() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("stats.json");
        save_progress(&path, &sample())?;
        let before = read(&path)?;
        // The parent "directory" is a regular file, so no temporary file can
        // be created next to the target.
        let blocked = path.join("stats.json");
        assert!(save_progress(&blocked, &ProgressState::default()).is_err());
        assert_eq!(read(&path)?, before);
        Ok(())
    }

    #[test]
    fn test_session_resumes_from_disk() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("profile").join("stats.json");
        let words: Vec<Word> = (1..=3)
            .map(|id| Word {
                id,
                headword: format!("w{id}"),
                translation: format!("t{id}"),
                transcription: String::new(),
                examples: vec![Example {
                    source_text: "s".to_string(),
                    target_text: "t".to_string(),
                }],
            })
            .collect();

        let store = JsonProgressStore::new(path.clone());
        let mut session = TrainingSession::open(words.clone(), store);
        session.mark_known()?;
        session.mark_unknown()?;
        drop(session);

        let session = TrainingSession::open(words, JsonProgressStore::new(path.clone()));
        assert_eq!(session.position(), 1);
        assert_eq!(session.known_count(), 1);
        assert_eq!(session.unknown_count(), 1);
        // The lock does not survive a restart: the word is presented afresh.
        assert!(!session.is_complete());
        assert_eq!(session.revealed_examples(), None);
        assert_eq!(session.store().path(), path.as_path());
        Ok(())
    }

    #[test]
    fn test_session_reports_save_failure() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let occupied = dir.join("stats.json");
        create_dir(&occupied)?;
        write(occupied.join("keep"), b"x")?;
        let words = vec![Word {
            id: 1,
            headword: "да".to_string(),
            translation: "отец".to_string(),
            transcription: String::new(),
            examples: Vec::new(),
        }];
        let mut session = TrainingSession::open(words, JsonProgressStore::new(occupied));
        assert!(session.mark_known().is_err());
        Ok(())
    }
}
