//! Command-line side of the tax engine: CSV input, batch runs, rule table
//! files, report rendering and logging.

pub mod batch;
pub mod config;
pub mod income_loader;
pub mod logging;
pub mod money;
pub mod report;

pub use batch::{BatchEntry, BatchOutcome};
pub use config::{RulesLoadError, load_rules};
pub use income_loader::{IncomeLoadError, LabelledInput};
pub use money::{ParseNairaError, format_naira, parse_naira};
