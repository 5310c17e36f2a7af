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

//! The training session state machine.
//!
//! A session walks a fixed word list in order. Every state-changing command
//! pushes a full snapshot of the progress to the [`ProgressStore`] before
//! returning, so at most one action can ever be lost.

use crate::error::Fallible;
use crate::types::progress::ProgressState;
use crate::types::progress::clamp_text_scale;
use crate::types::word::Example;
use crate::types::word::Word;

/// Durable storage for a session's progress.
pub trait ProgressStore {
    /// Read the stored progress. Never fails: absent or unreadable progress
    /// yields [`ProgressState::default`].
    fn load(&self) -> ProgressState;

    /// Replace the stored progress. On error the previously stored progress
    /// must remain intact.
    fn save(&mut self, state: &ProgressState) -> Fallible<()>;
}

/// Where the learner is within the word list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A word is presented and may be judged.
    Active { position: usize },
    /// The learner said they don't know the word. Its examples are shown and
    /// no further judgment is possible until they navigate away.
    AwaitingJudgment { position: usize },
    /// The position is past the last word, or there are no words at all.
    Complete,
}

/// Whether a command changed the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The command is not available in the current phase.
    Ignored,
}

/// What a status display should say. An empty word list and an exhausted
/// one share [`Phase::Complete`] but are shown differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    NoData,
    InProgress,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    /// Judgments made, including repeated judgments of revisited words.
    pub done: u64,
    pub remaining: u64,
    pub known: u64,
    pub unknown: u64,
}

pub struct TrainingSession<S: ProgressStore> {
    words: Vec<Word>,
    phase: Phase,
    progress: ProgressState,
    store: S,
}

impl<S: ProgressStore> TrainingSession<S> {
    /// Start a session over `words`, resuming from whatever the store holds.
    /// The restored position is clamped to the word list.
    pub fn open(words: Vec<Word>, store: S) -> Self {
        let mut progress = store.load();
        if progress.position > words.len() {
            log::debug!(
                "Stored position {} is past the end of {} words",
                progress.position,
                words.len()
            );
            progress.position = words.len();
        }
        let phase = phase_at(progress.position, words.len());
        Self {
            words,
            phase,
            progress,
            store,
        }
    }

    /// The learner knows the current word: count it and move on.
    pub fn mark_known(&mut self) -> Fallible<Outcome> {
        match self.phase {
            Phase::Active { position } => {
                self.progress.known_count += 1;
                self.move_to(position + 1);
                self.persist()
            }
            _ => self.ignore("mark_known"),
        }
    }

    /// The learner doesn't know the current word: count it and reveal its
    /// examples. The position stays put.
    pub fn mark_unknown(&mut self) -> Fallible<Outcome> {
        match self.phase {
            Phase::Active { position } => {
                self.progress.unknown_count += 1;
                self.phase = Phase::AwaitingJudgment { position };
                self.persist()
            }
            _ => self.ignore("mark_unknown"),
        }
    }

    /// Skip ahead one word, judged or not.
    pub fn next(&mut self) -> Fallible<Outcome> {
        match self.phase {
            Phase::Active { position } | Phase::AwaitingJudgment { position } => {
                self.move_to(position + 1);
                self.persist()
            }
            Phase::Complete => self.ignore("next"),
        }
    }

    /// Go back one word. Tallies are left alone.
    pub fn previous(&mut self) -> Fallible<Outcome> {
        match self.phase {
            Phase::Active { position } | Phase::AwaitingJudgment { position } => {
                self.move_to(position.saturating_sub(1));
                self.persist()
            }
            Phase::Complete => self.ignore("previous"),
        }
    }

    /// Start over from the first word with zeroed tallies. The display name
    /// and text scale are kept. Available in every phase.
    pub fn reset(&mut self) -> Fallible<Outcome> {
        log::info!("Resetting progress");
        self.progress.known_count = 0;
        self.progress.unknown_count = 0;
        self.move_to(0);
        self.persist()
    }

    pub fn set_text_scale(&mut self, value: u32) -> Fallible<Outcome> {
        self.progress.preferred_text_scale = clamp_text_scale(value);
        self.persist()
    }

    /// Surrounding whitespace is dropped. A blank name, or the name already
    /// in use, changes nothing.
    pub fn set_display_name(&mut self, name: &str) -> Fallible<Outcome> {
        let name = name.trim();
        if name.is_empty() || name == self.progress.display_name {
            return self.ignore("set_display_name");
        }
        self.progress.display_name = name.to_string();
        self.persist()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_word(&self) -> Option<&Word> {
        match self.phase {
            Phase::Active { position } | Phase::AwaitingJudgment { position } => {
                self.words.get(position)
            }
            Phase::Complete => None,
        }
    }

    /// Examples of the current word, once the learner has said they don't
    /// know it.
    pub fn revealed_examples(&self) -> Option<&[Example]> {
        match self.phase {
            Phase::AwaitingJudgment { position } => {
                self.words.get(position).map(|word| word.examples.as_slice())
            }
            _ => None,
        }
    }

    pub fn position(&self) -> usize {
        self.progress.position
    }

    pub fn known_count(&self) -> u64 {
        self.progress.known_count
    }

    pub fn unknown_count(&self) -> u64 {
        self.progress.unknown_count
    }

    pub fn display_name(&self) -> &str {
        &self.progress.display_name
    }

    pub fn text_scale(&self) -> u32 {
        self.progress.preferred_text_scale
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn status(&self) -> SessionStatus {
        if self.words.is_empty() {
            SessionStatus::NoData
        } else if self.is_complete() {
            SessionStatus::Finished
        } else {
            SessionStatus::InProgress
        }
    }

    pub fn summary(&self) -> Summary {
        let known = self.progress.known_count;
        let unknown = self.progress.unknown_count;
        let done = known + unknown;
        Summary {
            total: self.words.len(),
            done,
            remaining: (self.words.len() as u64).saturating_sub(done),
            known,
            unknown,
        }
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn move_to(&mut self, position: usize) {
        let position = position.min(self.words.len());
        self.progress.position = position;
        self.phase = phase_at(position, self.words.len());
    }

    fn persist(&mut self) -> Fallible<Outcome> {
        self.store.save(&self.progress)?;
        Ok(Outcome::Applied)
    }

    fn ignore(&self, command: &str) -> Fallible<Outcome> {
        log::debug!("Ignoring {command} in phase {:?}", self.phase);
        Ok(Outcome::Ignored)
    }
}

fn phase_at(position: usize, length: usize) -> Phase {
    if position >= length {
        Phase::Complete
    } else {
        Phase::Active { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fail;

    #[derive(Default)]
    struct MemoryStore {
        initial: ProgressState,
        saved: Vec<ProgressState>,
        broken: bool,
    }

    impl MemoryStore {
        fn with(initial: ProgressState) -> Self {
            Self {
                initial,
                ..Self::default()
            }
        }

        fn last(&self) -> Option<&ProgressState> {
            self.saved.last()
        }
    }

    impl ProgressStore for MemoryStore {
        fn load(&self) -> ProgressState {
            self.initial.clone()
        }

        fn save(&mut self, state: &ProgressState) -> Fallible<()> {
            if self.broken {
                return fail("disk full");
            }
            self.saved.push(state.clone());
            Ok(())
        }
    }

    fn word(id: i64, examples: usize) -> Word {
        Word {
            id,
            headword: format!("word{id}"),
            translation: format!("слово{id}"),
            transcription: String::new(),
            examples: (0..examples)
                .map(|i| Example {
                    source_text: format!("ing {id}.{i}"),
                    target_text: format!("rus {id}.{i}"),
                })
                .collect(),
        }
    }

    fn words(n: i64) -> Vec<Word> {
        (1..=n).map(|id| word(id, 2)).collect()
    }

    fn session(n: i64) -> TrainingSession<MemoryStore> {
        TrainingSession::open(words(n), MemoryStore::default())
    }

    #[test]
    fn test_walkthrough() -> Fallible<()> {
        let mut s = session(3);
        assert_eq!(s.phase(), Phase::Active { position: 0 });
        assert_eq!(s.current_word().map(|w| w.id), Some(1));

        assert_eq!(s.mark_known()?, Outcome::Applied);
        assert_eq!(s.position(), 1);
        assert_eq!(s.known_count(), 1);

        assert_eq!(s.mark_unknown()?, Outcome::Applied);
        assert_eq!(s.position(), 1);
        assert_eq!(s.unknown_count(), 1);
        assert_eq!(s.revealed_examples().map(|e| e.len()), Some(2));
        assert_eq!(s.mark_known()?, Outcome::Ignored);
        assert_eq!(s.known_count(), 1);

        s.next()?;
        assert_eq!(s.position(), 2);
        assert_eq!(s.phase(), Phase::Active { position: 2 });
        s.next()?;
        assert_eq!(s.position(), 3);
        assert!(s.is_complete());
        assert_eq!(s.status(), SessionStatus::Finished);
        assert_eq!(s.current_word(), None);
        Ok(())
    }

    #[test]
    fn test_every_mutation_is_persisted() -> Fallible<()> {
        let mut s = session(3);
        s.mark_known()?;
        s.mark_unknown()?;
        s.next()?;
        s.previous()?;
        s.set_text_scale(20)?;
        assert_eq!(s.store().saved.len(), 5);
        assert_eq!(s.store().last(), Some(s.progress()));
        Ok(())
    }

    #[test]
    fn test_ignored_commands_are_not_persisted() -> Fallible<()> {
        let mut s = session(2);
        s.mark_unknown()?;
        assert_eq!(s.mark_known()?, Outcome::Ignored);
        assert_eq!(s.mark_unknown()?, Outcome::Ignored);
        assert_eq!(s.store().saved.len(), 1);
        Ok(())
    }

    #[test]
    fn test_double_mark_known_counts_once_per_presentation() -> Fallible<()> {
        let mut s = session(1);
        s.mark_known()?;
        assert_eq!(s.mark_known()?, Outcome::Ignored);
        assert_eq!(s.known_count(), 1);
        Ok(())
    }

    #[test]
    fn test_mark_unknown_then_navigate_unlocks() -> Fallible<()> {
        let mut s = session(3);
        s.mark_unknown()?;
        s.previous()?;
        assert_eq!(s.phase(), Phase::Active { position: 0 });
        assert_eq!(s.revealed_examples(), None);
        s.mark_unknown()?;
        s.next()?;
        assert_eq!(s.phase(), Phase::Active { position: 1 });
        // Revisiting a word and judging it again counts again.
        assert_eq!(s.unknown_count(), 2);
        Ok(())
    }

    #[test]
    fn test_previous_floors_at_zero() -> Fallible<()> {
        let mut s = session(3);
        assert_eq!(s.previous()?, Outcome::Applied);
        assert_eq!(s.position(), 0);
        assert_eq!(s.phase(), Phase::Active { position: 0 });
        Ok(())
    }

    #[test]
    fn test_previous_keeps_tallies() -> Fallible<()> {
        let mut s = session(3);
        s.mark_known()?;
        s.mark_known()?;
        s.previous()?;
        s.previous()?;
        assert_eq!(s.position(), 0);
        assert_eq!(s.known_count(), 2);
        Ok(())
    }

    #[test]
    fn test_complete_disables_everything_but_reset() -> Fallible<()> {
        let mut s = session(1);
        s.mark_known()?;
        assert!(s.is_complete());
        assert_eq!(s.mark_known()?, Outcome::Ignored);
        assert_eq!(s.mark_unknown()?, Outcome::Ignored);
        assert_eq!(s.next()?, Outcome::Ignored);
        assert_eq!(s.previous()?, Outcome::Ignored);
        assert_eq!(s.position(), 1);

        assert_eq!(s.reset()?, Outcome::Applied);
        assert_eq!(s.phase(), Phase::Active { position: 0 });
        assert_eq!(s.known_count(), 0);
        assert_eq!(s.unknown_count(), 0);
        Ok(())
    }

    #[test]
    fn test_reset_keeps_preferences() -> Fallible<()> {
        let initial = ProgressState {
            position: 2,
            known_count: 5,
            unknown_count: 3,
            display_name: "Зейнап".to_string(),
            preferred_text_scale: 24,
        };
        let mut s = TrainingSession::open(words(3), MemoryStore::with(initial));
        s.reset()?;
        let saved = s.store().last().cloned();
        assert_eq!(
            saved,
            Some(ProgressState {
                position: 0,
                known_count: 0,
                unknown_count: 0,
                display_name: "Зейнап".to_string(),
                preferred_text_scale: 24,
            })
        );
        Ok(())
    }

    #[test]
    fn test_resume_from_store() {
        let initial = ProgressState {
            position: 2,
            known_count: 1,
            unknown_count: 1,
            ..ProgressState::default()
        };
        let s = TrainingSession::open(words(3), MemoryStore::with(initial));
        assert_eq!(s.phase(), Phase::Active { position: 2 });
        assert_eq!(s.current_word().map(|w| w.id), Some(3));
        assert_eq!(s.known_count(), 1);
    }

    #[test]
    fn test_resume_clamps_position() {
        let initial = ProgressState {
            position: 40,
            ..ProgressState::default()
        };
        let s = TrainingSession::open(words(3), MemoryStore::with(initial));
        assert_eq!(s.position(), 3);
        assert!(s.is_complete());
        assert_eq!(s.status(), SessionStatus::Finished);
    }

    #[test]
    fn test_empty_word_list() -> Fallible<()> {
        let initial = ProgressState {
            position: 5,
            ..ProgressState::default()
        };
        let mut s = TrainingSession::open(Vec::new(), MemoryStore::with(initial));
        assert!(s.is_complete());
        assert_eq!(s.position(), 0);
        assert_eq!(s.status(), SessionStatus::NoData);
        assert_eq!(s.next()?, Outcome::Ignored);
        s.reset()?;
        assert!(s.is_complete());
        assert_eq!(s.position(), 0);
        assert_eq!(s.status(), SessionStatus::NoData);
        Ok(())
    }

    #[test]
    fn test_text_scale_is_clamped() -> Fallible<()> {
        let mut s = session(1);
        s.set_text_scale(4)?;
        assert_eq!(s.text_scale(), 10);
        s.set_text_scale(31)?;
        assert_eq!(s.text_scale(), 30);
        s.set_text_scale(18)?;
        assert_eq!(s.text_scale(), 18);
        assert_eq!(s.position(), 0);
        Ok(())
    }

    #[test]
    fn test_text_scale_allowed_when_complete() -> Fallible<()> {
        let mut s = session(0);
        assert_eq!(s.set_text_scale(12)?, Outcome::Applied);
        assert_eq!(s.store().saved.len(), 1);
        Ok(())
    }

    #[test]
    fn test_display_name() -> Fallible<()> {
        let mut s = session(1);
        assert_eq!(s.set_display_name("  Ахмед ")?, Outcome::Applied);
        assert_eq!(s.display_name(), "Ахмед");
        assert_eq!(s.set_display_name("Ахмед")?, Outcome::Ignored);
        assert_eq!(s.set_display_name("   ")?, Outcome::Ignored);
        assert_eq!(s.display_name(), "Ахмед");
        assert_eq!(s.store().saved.len(), 1);
        Ok(())
    }

    #[test]
    fn test_save_failure_is_reported() {
        let store = MemoryStore {
            broken: true,
            ..MemoryStore::default()
        };
        let mut s = TrainingSession::open(words(2), store);
        let result = s.mark_known();
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: disk full".to_string())
        );
        // The in-memory step stands; the next successful save catches up.
        assert_eq!(s.position(), 1);
    }

    #[test]
    fn test_summary() -> Fallible<()> {
        let mut s = session(3);
        s.mark_known()?;
        s.mark_unknown()?;
        assert_eq!(
            s.summary(),
            Summary {
                total: 3,
                done: 2,
                remaining: 1,
                known: 1,
                unknown: 1,
            }
        );
        s.previous()?;
        s.previous()?;
        s.mark_unknown()?;
        s.next()?;
        s.mark_unknown()?;
        s.next()?;
        s.mark_known()?;
        // More judgments than words: remaining saturates.
        assert_eq!(s.summary().done, 5);
        assert_eq!(s.summary().remaining, 0);
        Ok(())
    }

    /// Run every command sequence of a fixed length against word lists of
    /// several sizes and check the position never leaves `[0, length]`.
    #[test]
    fn test_position_stays_in_bounds() -> Fallible<()> {
        const STEPS: u32 = 6;
        const COMMANDS: u32 = 4;
        for length in 0..4 {
            for mut code in 0..COMMANDS.pow(STEPS) {
                let mut s = session(length);
                for _ in 0..STEPS {
                    match code % COMMANDS {
                        0 => s.mark_known()?,
                        1 => s.mark_unknown()?,
                        2 => s.next()?,
                        _ => s.previous()?,
                    };
                    code /= COMMANDS;
                    assert!(s.position() <= s.len());
                    assert_eq!(s.is_complete(), s.position() == s.len());
                    match s.phase() {
                        Phase::Active { position } | Phase::AwaitingJudgment { position } => {
                            assert_eq!(position, s.position())
                        }
                        Phase::Complete => {}
                    }
                }
            }
        }
        Ok(())
    }
}
