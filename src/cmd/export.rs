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

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use ingush_trainer_core::ExportExample;
use ingush_trainer_core::ExportRecord;
use ingush_trainer_core::schema::ColumnMap;
use ingush_trainer_core::schema::EXPORT_EXAMPLE_ALIASES;
use ingush_trainer_core::schema::ExampleField;
use ingush_trainer_core::schema::WORD_ALIASES;
use ingush_trainer_core::schema::WordField;
use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::types::ValueRef;
use serde_json::Number;
use serde_json::Value;

use crate::db::open_read_only;
use crate::db::select_sql;
use crate::db::table_columns;
use crate::db::table_exists;
use crate::error::Fallible;
use crate::paths::EXPORT_CANDIDATES;
use crate::paths::EXPORT_OUTPUT;
use crate::utils::write_json_atomically;

/// Regenerate the seed document under `directory` (default: the current
/// directory) from the first candidate database that exists.
pub fn export_seed(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let root = PathBuf::from(directory.unwrap_or_else(|| ".".to_string()));
    let candidates: Vec<PathBuf> = EXPORT_CANDIDATES.iter().map(|c| root.join(c)).collect();
    let output: PathBuf = match output {
        Some(path) => PathBuf::from(path),
        None => root.join(EXPORT_OUTPUT),
    };
    let records = export(&candidates)?;
    write_json_atomically(&output, &records)?;
    log::info!("Wrote {} records to {}", records.len(), output.display());
    Ok(())
}

/// Flatten the first existing database in `candidates` into export records.
///
/// No existing candidate yields an empty list. Records come out in the
/// order the database returns the `words` rows.
pub fn export(candidates: &[PathBuf]) -> Fallible<Vec<ExportRecord>> {
    let Some(path) = select_source(candidates) else {
        log::warn!("None of the candidate databases exist");
        return Ok(Vec::new());
    };
    log::info!("Exporting from {}", path.display());
    let conn = open_read_only(path)?;
    let mut records = export_words(&conn)?;
    let examples = export_examples(&conn)?;
    for record in records.iter_mut() {
        let key = record.id.as_ref().and_then(JoinKey::from_value);
        if let Some(example) = key.and_then(|key| examples.get(&key)) {
            record.example = Some(example.clone());
        }
    }
    Ok(records)
}

fn select_source(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .map(PathBuf::as_path)
}

fn export_words(conn: &Connection) -> Fallible<Vec<ExportRecord>> {
    let columns = table_columns(conn, "words")?;
    let map = ColumnMap::resolve(&columns, WORD_ALIASES);
    if map.is_empty() {
        log::warn!("No recognisable columns in the words table");
        return Ok(Vec::new());
    }
    let mut stmt = conn.prepare(&select_sql(&map.columns(), "words"))?;
    let records = stmt
        .query_map([], |row| {
            Ok(ExportRecord {
                id: value_at(row, map.index(WordField::Id))?,
                word: value_at(row, map.index(WordField::Headword))?,
                translation: value_at(row, map.index(WordField::Translation))?,
                transcription: value_at(row, map.index(WordField::Transcription))?,
                example: None,
            })
        })?
        .collect::<Result<Vec<ExportRecord>, _>>()?;
    Ok(records)
}

/// Map each referenced word to its first example. Later examples of the
/// same word are dropped.
fn export_examples(conn: &Connection) -> Fallible<HashMap<JoinKey, ExportExample>> {
    let mut examples: HashMap<JoinKey, ExportExample> = HashMap::new();
    if !table_exists(conn, "examples")? {
        return Ok(examples);
    }
    let columns = table_columns(conn, "examples")?;
    let map = ColumnMap::resolve(&columns, EXPORT_EXAMPLE_ALIASES);
    let Some(key_index) = map.index(ExampleField::WordId) else {
        return Ok(examples);
    };
    let mut stmt = conn.prepare(&select_sql(&map.columns(), "examples"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let Some(key) = JoinKey::from_sql(row.get_ref(key_index)?) else {
            continue;
        };
        if examples.contains_key(&key) {
            continue;
        }
        let example = ExportExample {
            ing: value_at(row, map.index(ExampleField::Source))?,
            rus: value_at(row, map.index(ExampleField::Target))?,
        };
        if !example.is_empty() {
            examples.insert(key, example);
        }
    }
    log::debug!("Collected examples for {} words", examples.len());
    Ok(examples)
}

fn value_at(row: &Row, index: Option<usize>) -> rusqlite::Result<Option<Value>> {
    match index {
        Some(index) => Ok(Some(to_json(row.get_ref(index)?))),
        None => Ok(None),
    }
}

fn to_json(value: ValueRef) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => Value::from(bytes.to_vec()),
    }
}

/// A word identifier as used to join examples to words. Values only match
/// within the same storage class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum JoinKey {
    Integer(i64),
    Real(u64),
    Text(String),
    Blob(Vec<u8>),
}

impl JoinKey {
    fn from_sql(value: ValueRef) -> Option<Self> {
        match value {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(JoinKey::Integer(i)),
            ValueRef::Real(f) => Some(JoinKey::Real(f.to_bits())),
            ValueRef::Text(bytes) => Some(JoinKey::Text(
                String::from_utf8_lossy(bytes).into_owned(),
            )),
            ValueRef::Blob(bytes) => Some(JoinKey::Blob(bytes.to_vec())),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(JoinKey::Integer(i)),
                None => n.as_f64().map(|f| JoinKey::Real(f.to_bits())),
            },
            Value::String(s) => Some(JoinKey::Text(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>()
                .map(JoinKey::Blob),
            _ => None,
        }
    }
}
