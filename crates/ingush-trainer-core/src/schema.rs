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

//! Column alias resolution.
//!
//! Word databases in the wild do not agree on column names. Each logical
//! field has an ordered list of accepted column names; the first one present
//! in the table wins. Resolution happens once per table, against the column
//! list reported by the database, so it can be tested without one.

/// Logical columns of the `words` relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordField {
    Id,
    Headword,
    Translation,
    Transcription,
}

/// Logical columns of the `examples` relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExampleField {
    WordId,
    Source,
    Target,
}

pub type AliasTable<F> = &'static [(F, &'static [&'static str])];

pub const WORD_ALIASES: AliasTable<WordField> = &[
    (WordField::Id, &["id", "word_id", "wordId"]),
    (WordField::Headword, &["ingush", "word", "ing"]),
    (WordField::Translation, &["russian", "translation", "rus"]),
    (WordField::Transcription, &["transcription"]),
];

/// Aliases used by the exporter, which also accepts a bare `id` column as
/// the foreign key.
pub const EXPORT_EXAMPLE_ALIASES: AliasTable<ExampleField> = &[
    (ExampleField::WordId, &["word_id", "wordId", "wordid", "id"]),
    (ExampleField::Source, &["ing", "ingush", "example"]),
    (ExampleField::Target, &["rus", "russian", "translation"]),
];

/// Aliases used when loading words for training. Here `id` is the example's
/// own key and never a reference to a word.
pub const EXAMPLE_ALIASES: AliasTable<ExampleField> = &[
    (ExampleField::WordId, &["word_id", "wordId", "wordid"]),
    (ExampleField::Source, &["ing", "ingush", "example"]),
    (ExampleField::Target, &["rus", "russian", "translation"]),
];

/// Return the first candidate that appears in `columns`.
pub fn pick_first<'a>(columns: &[String], candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .find(|candidate| columns.iter().any(|column| column == *candidate))
        .copied()
}

/// The result of resolving an alias table against a concrete column list.
///
/// Resolved columns keep the order of the alias table, which is also the
/// order of the select list built from them.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMap<F> {
    resolved: Vec<(F, &'static str)>,
}

impl<F: Copy + PartialEq> ColumnMap<F> {
    pub fn resolve(columns: &[String], aliases: AliasTable<F>) -> Self {
        let resolved = aliases
            .iter()
            .filter_map(|(field, candidates)| {
                pick_first(columns, candidates).map(|column| (*field, column))
            })
            .collect();
        Self { resolved }
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// The column name a field resolved to.
    pub fn column(&self, field: F) -> Option<&'static str> {
        self.resolved
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, column)| *column)
    }

    /// Index of the field's column in [`ColumnMap::columns`].
    pub fn index(&self, field: F) -> Option<usize> {
        self.resolved.iter().position(|(f, _)| *f == field)
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.resolved.iter().map(|(_, column)| *column).collect()
    }
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
