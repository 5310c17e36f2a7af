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

use clap::Parser;

use crate::cmd::drill::drill;
use crate::cmd::export::export_seed;
use crate::cmd::settings::rename;
use crate::cmd::settings::reset_progress;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill words in the terminal, resuming where you left off.
    Drill {
        /// Path to the word database. By default, `ing_base.db` next to the executable.
        #[arg(long)]
        database: Option<String>,
        /// Path to the progress file. By default, `IngushLanguage/stats.json` in the user configuration directory.
        #[arg(long)]
        progress: Option<String>,
    },
    /// Print progress statistics.
    Stats {
        /// Path to the word database. By default, `ing_base.db` next to the executable.
        #[arg(long)]
        database: Option<String>,
        /// Path to the progress file. By default, `IngushLanguage/stats.json` in the user configuration directory.
        #[arg(long)]
        progress: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Reset progress: zero the tallies and go back to the first word.
    Reset {
        /// Path to the word database. By default, `ing_base.db` next to the executable.
        #[arg(long)]
        database: Option<String>,
        /// Path to the progress file. By default, `IngushLanguage/stats.json` in the user configuration directory.
        #[arg(long)]
        progress: Option<String>,
    },
    /// Change the name shown for the learner.
    Rename {
        /// The new name.
        name: String,
        /// Path to the word database. By default, `ing_base.db` next to the executable.
        #[arg(long)]
        database: Option<String>,
        /// Path to the progress file. By default, `IngushLanguage/stats.json` in the user configuration directory.
        #[arg(long)]
        progress: Option<String>,
    },
    /// Export the word database as a JSON seed document.
    Export {
        /// Directory holding the candidate databases. By default, the current working directory is used.
        directory: Option<String>,
        /// Path to the output file. By default, `mobile_app/assets/db/seed.json` under the directory.
        #[arg(long)]
        output: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill { database, progress } => drill(database, progress),
        Command::Stats {
            database,
            progress,
            format,
        } => print_stats(database, progress, format),
        Command::Reset { database, progress } => reset_progress(database, progress),
        Command::Rename {
            name,
            database,
            progress,
        } => rename(name, database, progress),
        Command::Export { directory, output } => export_seed(directory, output),
    }
}
