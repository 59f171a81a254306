//! Alias policy: pattern, length bounds, reserved names and random generation.

use std::collections::HashSet;

use crate::config::{AliasConfig, DEFAULT_ALPHABET};
use crate::errors::{RegistryError, Result};

/// Top-level path segments the HTTP API routes itself.
pub const RESERVED_ROUTES: &[&str] = &["shorten", "urls", "health"];

#[inline]
fn is_alias_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[derive(Debug, Clone)]
pub struct AliasPolicy {
    min_length: usize,
    max_length: usize,
    generated_length: usize,
    alphabet: Vec<char>,
    max_retries: u32,
    /// Lowercased
    reserved: HashSet<String>,
}

impl Default for AliasPolicy {
    fn default() -> Self {
        let defaults = AliasConfig::default();
        Self {
            min_length: defaults.min_length,
            max_length: defaults.max_length,
            generated_length: defaults.generated_length,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            max_retries: defaults.max_retries,
            reserved: reserved_set(&[]),
        }
    }
}

fn reserved_set(extra: &[String]) -> HashSet<String> {
    RESERVED_ROUTES
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().map(|s| s.trim().to_ascii_lowercase()))
        .filter(|s| !s.is_empty())
        .collect()
}

impl AliasPolicy {
    /// Build a policy, rejecting configurations that could produce aliases
    /// the policy itself would refuse.
    pub fn from_config(cfg: &AliasConfig) -> Result<Self> {
        if cfg.min_length == 0 {
            return Err(RegistryError::config("alias.min_length must be at least 1"));
        }
        if cfg.min_length > cfg.max_length {
            return Err(RegistryError::config(format!(
                "alias.min_length ({}) exceeds alias.max_length ({})",
                cfg.min_length, cfg.max_length
            )));
        }
        if !(cfg.min_length..=cfg.max_length).contains(&cfg.generated_length) {
            return Err(RegistryError::config(format!(
                "alias.generated_length ({}) must be within {}..={}",
                cfg.generated_length, cfg.min_length, cfg.max_length
            )));
        }
        if cfg.max_retries == 0 {
            return Err(RegistryError::config("alias.max_retries must be at least 1"));
        }

        let alphabet: Vec<char> = cfg.alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(RegistryError::config("alias.alphabet must not be empty"));
        }
        if let Some(bad) = alphabet.iter().find(|c| !is_alias_char(**c)) {
            return Err(RegistryError::config(format!(
                "alias.alphabet contains '{}'; only letters, digits, '-' and '_' are allowed",
                bad
            )));
        }
        let unique: HashSet<char> = alphabet.iter().copied().collect();
        if unique.len() != alphabet.len() {
            return Err(RegistryError::config(
                "alias.alphabet contains duplicate characters",
            ));
        }

        Ok(Self {
            min_length: cfg.min_length,
            max_length: cfg.max_length,
            generated_length: cfg.generated_length,
            alphabet,
            max_retries: cfg.max_retries,
            reserved: reserved_set(&cfg.reserved),
        })
    }

    pub fn generated_length(&self) -> usize {
        self.generated_length
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Number of distinct aliases the generator can produce, saturating.
    pub fn space_size(&self) -> u128 {
        (self.alphabet.len() as u128).saturating_pow(self.generated_length as u32)
    }

    /// Character class and length bounds only.
    pub fn matches_pattern(&self, alias: &str) -> bool {
        // ASCII-only, so byte length equals char count
        (self.min_length..=self.max_length).contains(&alias.len()) && alias.chars().all(is_alias_char)
    }

    /// Character class only. Used on lookups so aliases stored under older
    /// length bounds stay reachable.
    pub fn is_well_formed(&self, alias: &str) -> bool {
        !alias.is_empty() && alias.chars().all(is_alias_char)
    }

    pub fn is_reserved(&self, alias: &str) -> bool {
        self.reserved.contains(&alias.to_ascii_lowercase())
    }

    /// Check a caller-supplied alias (already trimmed).
    pub fn validate_custom(&self, alias: &str) -> Result<()> {
        if !self.matches_pattern(alias) {
            return Err(RegistryError::invalid_alias_format(format!(
                "Alias must be {}-{} characters of letters, digits, '-' or '_'",
                self.min_length, self.max_length
            )));
        }
        if self.is_reserved(alias) {
            return Err(RegistryError::reserved_alias(format!(
                "Alias '{}' collides with a reserved route",
                alias
            )));
        }
        Ok(())
    }

    /// Draw a fresh candidate. May be reserved or taken; the caller retries.
    pub fn generate(&self) -> String {
        std::iter::repeat_with(|| self.alphabet[rand::random_range(0..self.alphabet.len())])
            .take(self.generated_length)
            .collect()
    }
}
