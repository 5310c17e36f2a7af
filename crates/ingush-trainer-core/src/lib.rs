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

//! ingush-trainer-core: Core library for the Ingush vocabulary trainer.
//!
//! This library has no I/O of its own. It provides:
//! - Vocabulary and progress types
//! - The training session state machine
//! - Column alias resolution for exporting heterogeneous word databases

pub mod error;
pub mod schema;
pub mod session;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use session::{Outcome, Phase, ProgressStore, SessionStatus, Summary, TrainingSession};
pub use types::export::{ExportExample, ExportRecord};
pub use types::progress::ProgressState;
pub use types::word::{Example, Word};
