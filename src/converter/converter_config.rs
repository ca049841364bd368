use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::AbcError;

/// Locations of the external converters and how long they may run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub abcm2ps: PathBuf,
    pub abc2midi: PathBuf,
    pub abc2abc: PathBuf,
    pub timeout_secs: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        // resolved through $PATH
        Self {
            abcm2ps: PathBuf::from("abcm2ps"),
            abc2midi: PathBuf::from("abc2midi"),
            abc2abc: PathBuf::from("abc2abc"),
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ConverterConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read a JSON configuration, missing keys take their default value.
    pub fn read_config(path: impl AsRef<Path>) -> Result<Self, AbcError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let config: Self = serde_json::from_reader(reader).map_err(|err| {
            AbcError::ConfigError(format!("Could not read converter configuration {err:}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AbcError> {
        if self.timeout_secs == 0 {
            return Err(AbcError::ConfigError(
                "converter timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
