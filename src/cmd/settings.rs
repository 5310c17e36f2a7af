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

use ingush_trainer_core::Outcome;

use crate::cmd::open_session;
use crate::error::Fallible;

/// Zero the tallies and go back to the first word.
pub fn reset_progress(database: Option<String>, progress: Option<String>) -> Fallible<()> {
    let mut session = open_session(database, progress)?;
    session.reset()?;
    println!("Progress reset.");
    Ok(())
}

/// Change the learner's display name.
pub fn rename(name: String, database: Option<String>, progress: Option<String>) -> Fallible<()> {
    let mut session = open_session(database, progress)?;
    match session.set_display_name(&name)? {
        Outcome::Applied => println!("User: {}", session.display_name()),
        Outcome::Ignored => println!("Name unchanged."),
    }
    Ok(())
}
