// ABOUTME: Configuration collaborator for per-container environment variables.
// ABOUTME: EnvSource trait, a static map implementation, and KEY=VALUE parsing.

use std::collections::HashMap;
use thiserror::Error;

/// Source of environment variables for a container. Empty by default;
/// container kinds with configuration override this.
pub trait EnvSource: Send + Sync {
    fn environment(&self) -> HashMap<String, String> {
        HashMap::new()
    }
}

/// No configuration: an empty environment.
#[derive(Debug, Default)]
pub struct EmptyEnv;

impl EnvSource for EmptyEnv {}

/// A fixed set of environment variables, as collected from CLI flags.
#[derive(Debug, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Build from `KEY=VALUE` strings.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, EnvVarError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vars = HashMap::new();
        for pair in pairs {
            let (key, value) = parse_env_pair(pair)?;
            vars.insert(key, value);
        }
        Ok(Self { vars })
    }
}

impl EnvSource for StaticEnv {
    fn environment(&self) -> HashMap<String, String> {
        self.vars.clone()
    }
}

/// Malformed `KEY=VALUE` input.
#[derive(Debug, Error)]
#[error("invalid environment variable (expected KEY=VALUE): {0}")]
pub struct EnvVarError(String);

/// Split a `KEY=VALUE` string. The value may contain further `=` signs;
/// the key may not be empty.
pub fn parse_env_pair(pair: &str) -> Result<(String, String), EnvVarError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(EnvVarError(pair.to_string())),
    }
}
