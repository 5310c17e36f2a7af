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

use serde::Serialize;
use serde_json::Value;

/// One entry of the seed document: a word flattened together with at most
/// one of its examples.
///
/// A field is `None` when the source database has no column for it, and is
/// then left out of the output entirely. A column that exists but holds
/// NULL is `Some(Value::Null)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExportRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<ExportExample>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExportExample {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ing: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rus: Option<Value>,
}

impl ExportExample {
    pub fn is_empty(&self) -> bool {
        self.ing.is_none() && self.rus.is_none()
    }
}
