//! Rule table selection: the built-in 2026 table or a TOML file on disk.

use std::path::{Path, PathBuf};

use taxready_core::{ConfigurationError, RuleTable};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum RulesLoadError {
    #[error("cannot read rule table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rule table: {0}")]
    Invalid(#[from] ConfigurationError),
}

/// Loads the rule table at `path`, or the built-in 2026 table when `None`.
pub fn load_rules(path: Option<&Path>) -> Result<RuleTable, RulesLoadError> {
    let rules = match path {
        Some(path) => {
            let document = std::fs::read_to_string(path).map_err(|source| RulesLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            RuleTable::from_toml_str(&document)?
        }
        None => RuleTable::nigeria_2026()?,
    };

    info!(tax_year = rules.tax_year(), name = rules.name(), "rule table loaded");
    Ok(rules)
}
