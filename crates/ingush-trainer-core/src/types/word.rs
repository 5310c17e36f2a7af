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

use serde::Deserialize;
use serde::Serialize;

/// A usage example attached to a word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The sentence in Ingush.
    pub source_text: String,
    /// Its Russian translation.
    pub target_text: String,
}

/// A vocabulary entry. Words are immutable for the life of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: i64,
    pub headword: String,
    pub translation: String,
    /// Empty when the database has no transcription for this word.
    pub transcription: String,
    pub examples: Vec<Example>,
}

impl Word {
    pub fn has_transcription(&self) -> bool {
        !self.transcription.trim().is_empty()
    }
}
