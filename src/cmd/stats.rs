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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use ingush_trainer_core::ProgressStore;
use ingush_trainer_core::SessionStatus;
use ingush_trainer_core::TrainingSession;
use serde::Serialize;

use crate::cmd::open_session;
use crate::error::Fallible;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct Stats {
    user: String,
    status: &'static str,
    position: usize,
    total: usize,
    remaining: u64,
    done: u64,
    known: u64,
    unknown: u64,
}

pub fn print_stats(
    database: Option<String>,
    progress: Option<String>,
    format: StatsFormat,
) -> Fallible<()> {
    let session = open_session(database, progress)?;
    let stats = get_stats(&session);
    match format {
        StatsFormat::Text => {
            println!("User: {}", stats.user);
            println!("Status: {}", stats.status);
            println!("Position: {} of {}", stats.position, stats.total);
            println!(
                "Remaining: {} | Done: {} | Known: {} | Unknown: {}",
                stats.remaining, stats.done, stats.known, stats.unknown
            );
        }
        StatsFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

fn get_stats<S: ProgressStore>(session: &TrainingSession<S>) -> Stats {
    let summary = session.summary();
    let status = match session.status() {
        SessionStatus::NoData => "no data",
        SessionStatus::InProgress => "in progress",
        SessionStatus::Finished => "finished",
    };
    Stats {
        user: session.display_name().to_string(),
        status,
        position: session.position(),
        total: summary.total,
        remaining: summary.remaining,
        done: summary.done,
        known: summary.known,
        unknown: summary.unknown,
    }
}
