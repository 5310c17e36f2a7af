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

use std::io::BufRead;
use std::io::Write;
use std::io::stderr;
use std::io::stdin;
use std::io::stdout;

use ingush_trainer_core::Fallible as CoreFallible;
use ingush_trainer_core::Outcome;
use ingush_trainer_core::ProgressStore;
use ingush_trainer_core::SessionStatus;
use ingush_trainer_core::TrainingSession;

use crate::cmd::open_session;
use crate::error::Fallible;

/// Stored when a first-time learner doesn't give a name.
const GUEST_NAME: &str = "Guest";

const HELP: &str = "Commands: k = I know it, u = I don't know it, n = next, p = previous, \
s N = text scale, h = help, q = quit";

/// Drill words in the terminal.
pub fn drill(database: Option<String>, progress: Option<String>) -> Fallible<()> {
    let mut session = open_session(database, progress)?;
    let input = stdin().lock();
    let output = stdout().lock();
    let errors = stderr().lock();
    run_drill(&mut session, input, output, errors)
}

/// A line-oriented driver over a training session. Each line of `input` is
/// one command; the session is rendered to `output` after every command.
/// Failed saves are reported on `errors`.
pub fn run_drill<S, R, W, E>(
    session: &mut TrainingSession<S>,
    input: R,
    mut output: W,
    mut errors: E,
) -> Fallible<()>
where
    S: ProgressStore,
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut lines = input.lines();
    if session.display_name().is_empty() {
        write!(output, "Welcome! What is your name? ")?;
        output.flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => String::new(),
        };
        let name = if answer.trim().is_empty() {
            GUEST_NAME
        } else {
            answer.trim()
        };
        report(&mut output, &mut errors, session.set_display_name(name))?;
    }
    writeln!(output, "User: {}", session.display_name())?;
    writeln!(output, "{HELP}")?;
    render(session, &mut output)?;
    for line in lines {
        let line = line?;
        let mut parts = line.split_whitespace();
        let result = match (parts.next(), parts.next()) {
            (None, _) => continue,
            (Some("q"), _) => break,
            (Some("k"), _) => session.mark_known(),
            (Some("u"), _) => session.mark_unknown(),
            (Some("n"), _) => session.next(),
            (Some("p"), _) => session.previous(),
            (Some("s"), Some(value)) => match value.parse::<u32>() {
                Ok(value) => session.set_text_scale(value),
                Err(_) => {
                    writeln!(output, "Not a number: {value}")?;
                    continue;
                }
            },
            _ => {
                writeln!(output, "{HELP}")?;
                continue;
            }
        };
        report(&mut output, &mut errors, result)?;
        render(session, &mut output)?;
    }
    Ok(())
}

/// Tell the learner about ignored commands and failed saves. A failed save
/// does not end the drill.
fn report<W, E>(output: &mut W, errors: &mut E, result: CoreFallible<Outcome>) -> Fallible<()>
where
    W: Write,
    E: Write,
{
    match result {
        Ok(Outcome::Applied) => {}
        Ok(Outcome::Ignored) => writeln!(output, "(not available now)")?,
        Err(e) => {
            log::error!("Failed to save progress: {e}");
            writeln!(errors, "Could not save progress: {}", e.message())?;
            errors.flush()?;
        }
    }
    Ok(())
}

fn render<S, W>(session: &TrainingSession<S>, output: &mut W) -> Fallible<()>
where
    S: ProgressStore,
    W: Write,
{
    writeln!(output)?;
    match session.status() {
        SessionStatus::NoData => writeln!(output, "No data")?,
        SessionStatus::Finished => {
            writeln!(output, "The end")?;
            writeln!(
                output,
                "Known: {} | Unknown: {}",
                session.known_count(),
                session.unknown_count()
            )?;
            return Ok(());
        }
        SessionStatus::InProgress => {
            if let Some(word) = session.current_word() {
                writeln!(output, "{}", word.headword)?;
                writeln!(output, "{}", word.translation)?;
                if word.has_transcription() {
                    writeln!(output, "[ {} ]", word.transcription)?;
                }
            }
            if let Some(examples) = session.revealed_examples() {
                if examples.is_empty() {
                    writeln!(output, "No examples")?;
                } else {
                    writeln!(output, "Write these down and memorise the translation:")?;
                    for example in examples {
                        writeln!(output, "  {}", example.source_text)?;
                        writeln!(output, "    {}", example.target_text)?;
                    }
                }
            }
        }
    }
    let summary = session.summary();
    writeln!(
        output,
        "Total: {} | Remaining: {} | Done: {} | Known: {} | Unknown: {} | Text scale: {}",
        summary.total,
        summary.remaining,
        summary.done,
        summary.known,
        summary.unknown,
        session.text_scale()
    )?;
    Ok(())
}
