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

use ingush_trainer_core::Example;
use ingush_trainer_core::Word;
use ingush_trainer_core::schema::ColumnMap;
use ingush_trainer_core::schema::EXAMPLE_ALIASES;
use ingush_trainer_core::schema::ExampleField;
use ingush_trainer_core::schema::WORD_ALIASES;
use ingush_trainer_core::schema::WordField;
use ingush_trainer_core::schema::quote_identifier;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::Row;
use rusqlite::types::ValueRef;

use crate::error::Fallible;
use crate::error::fail;

/// Read-only access to the word database.
pub struct WordStore {
    path: PathBuf,
}

impl WordStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every word, ordered by identifier, with its examples attached.
    ///
    /// A missing database file yields an empty list. Each call opens its own
    /// connection and closes it before returning.
    pub fn load_all(&self) -> Fallible<Vec<Word>> {
        if !self.path.exists() {
            log::warn!("Word database {} does not exist", self.path.display());
            return Ok(Vec::new());
        }
        let conn = open_read_only(&self.path)?;
        let mut words = read_words(&conn)?;
        let mut examples = read_examples(&conn)?;
        for word in words.iter_mut() {
            if let Some(list) = examples.remove(&word.id) {
                word.examples = list;
            }
        }
        log::info!(
            "Loaded {} words from {}",
            words.len(),
            self.path.display()
        );
        Ok(words)
    }
}

pub fn open_read_only(path: &Path) -> Fallible<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(path, flags)?)
}

pub fn table_exists(conn: &Connection, table: &str) -> Fallible<bool> {
    let mut stmt = conn.prepare("select 1 from sqlite_master where type = 'table' and name = ?")?;
    Ok(stmt.exists([table])?)
}

/// Column names of `table`, in declaration order. Empty when the table does
/// not exist.
pub fn table_columns(conn: &Connection, table: &str) -> Fallible<Vec<String>> {
    let sql = format!("pragma table_info({})", quote_identifier(table));
    let mut stmt = conn.prepare(&sql)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(names)
}

/// Build `select <columns> from <table>`.
pub fn select_sql(columns: &[&str], table: &str) -> String {
    let columns: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();
    format!(
        "select {} from {}",
        columns.join(", "),
        quote_identifier(table)
    )
}

fn read_words(conn: &Connection) -> Fallible<Vec<Word>> {
    let columns = table_columns(conn, "words")?;
    if columns.is_empty() {
        log::warn!("Word database has no words table");
        return Ok(Vec::new());
    }
    let map = ColumnMap::resolve(&columns, WORD_ALIASES);
    let required = [
        (WordField::Id, "identifier"),
        (WordField::Headword, "headword"),
        (WordField::Translation, "translation"),
    ];
    for (field, name) in required {
        if map.column(field).is_none() {
            return fail(format!("words table has no {name} column"));
        }
    }
    let mut sql = select_sql(&map.columns(), "words");
    if let Some(id) = map.column(WordField::Id) {
        sql.push_str(&format!(" order by {}", quote_identifier(id)));
    }
    let mut stmt = conn.prepare(&sql)?;
    let words = stmt
        .query_map([], |row| {
            Ok(Word {
                id: row.get(index_of(&map, WordField::Id))?,
                headword: text_at(row, map.index(WordField::Headword))?,
                translation: text_at(row, map.index(WordField::Translation))?,
                transcription: text_at(row, map.index(WordField::Transcription))?,
                examples: Vec::new(),
            })
        })?
        .collect::<Result<Vec<Word>, _>>()?;
    Ok(words)
}

fn read_examples(conn: &Connection) -> Fallible<HashMap<i64, Vec<Example>>> {
    let mut examples: HashMap<i64, Vec<Example>> = HashMap::new();
    if !table_exists(conn, "examples")? {
        log::debug!("Word database has no examples table");
        return Ok(examples);
    }
    let columns = table_columns(conn, "examples")?;
    let map = ColumnMap::resolve(&columns, EXAMPLE_ALIASES);
    if map.column(ExampleField::WordId).is_none() {
        log::warn!("Examples table has no word reference column, ignoring it");
        return Ok(examples);
    }
    let sql = format!("{} order by rowid", select_sql(&map.columns(), "examples"));
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let word_id = match row.get_ref(index_of(&map, ExampleField::WordId))? {
            ValueRef::Integer(id) => id,
            ValueRef::Null => continue,
            other => {
                log::warn!("Skipping example with non-integer word reference {other:?}");
                continue;
            }
        };
        let example = Example {
            source_text: text_at(row, map.index(ExampleField::Source))?,
            target_text: text_at(row, map.index(ExampleField::Target))?,
        };
        examples.entry(word_id).or_default().push(example);
    }
    Ok(examples)
}

fn index_of<F: Copy + PartialEq>(map: &ColumnMap<F>, field: F) -> usize {
    // Callers check that required fields resolved before querying.
    map.index(field).unwrap_or(0)
}

/// Read a column as display text. Absent columns and NULL read as the
/// empty string; numbers are formatted.
fn text_at(row: &Row, index: Option<usize>) -> rusqlite::Result<String> {
    let Some(index) = index else {
        return Ok(String::new());
    };
    let text = match row.get_ref(index)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            String::from_utf8_lossy(bytes).into_owned()
        }
    };
    Ok(text)
}
