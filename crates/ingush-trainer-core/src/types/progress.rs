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

use crate::error::Fallible;

/// Text scale used when no preference has been stored.
pub const DEFAULT_TEXT_SCALE: u32 = 16;

/// Smallest accepted text scale.
pub const MIN_TEXT_SCALE: u32 = 10;

/// Largest accepted text scale.
pub const MAX_TEXT_SCALE: u32 = 30;

/// The durable part of a training session: where the learner is, how they
/// have done so far, and their preferences.
///
/// Every field defaults independently when absent from the document, and
/// unknown fields are ignored. Older progress files used `current_index`,
/// `user_name` and `example_font_size`; those names are still accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressState {
    /// Index into the word list. Equal to the word count when finished.
    #[serde(alias = "current_index")]
    pub position: usize,
    pub known_count: u64,
    pub unknown_count: u64,
    #[serde(alias = "user_name")]
    pub display_name: String,
    #[serde(alias = "example_font_size")]
    pub preferred_text_scale: u32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            position: 0,
            known_count: 0,
            unknown_count: 0,
            display_name: String::new(),
            preferred_text_scale: DEFAULT_TEXT_SCALE,
        }
    }
}

impl ProgressState {
    pub fn from_json(text: &str) -> Fallible<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

pub fn clamp_text_scale(value: u32) -> u32 {
    value.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE)
}
