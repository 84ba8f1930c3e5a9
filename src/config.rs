use anyhow::{bail, Context, Result};

use crate::TABLE_NAME_ENV;

/// Deployment-wide settings read from the Lambda environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let table_name = std::env::var(TABLE_NAME_ENV)
            .with_context(|| format!("{} must be set", TABLE_NAME_ENV))?;
        Self::new(table_name)
    }

    pub fn new(table_name: impl Into<String>) -> Result<Self> {
        let table_name = table_name.into();
        if table_name.trim().is_empty() {
            bail!("{} must not be empty", TABLE_NAME_ENV);
        }
        Ok(Self { table_name })
    }
}
