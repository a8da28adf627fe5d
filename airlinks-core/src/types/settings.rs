//! Connection settings supplied by the host.
//!
//! Settings are read-only input to resolution. The host owns persistence; this
//! module only offers the JSON file and environment loaders a host or the CLI
//! needs, plus validated setters for pasted identifiers.

use std::path::Path;

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{ENV_ACCESS_TOKEN, ENV_BASE_ID, ENV_LINKS_TABLE_ID, ENV_LISTS_TABLE_ID};
use crate::error::{AirlinksError, Result};
use crate::validate::{is_valid_base_id, is_valid_table_id};

/// Personal access token. Zeroized on drop and never printed.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Exposes the token for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if no token is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "AccessToken(<unset>)")
        } else {
            write!(f, "AccessToken([REDACTED])")
        }
    }
}

/// Remote store settings.
///
/// Serialized with the key names the host stores (`accessToken`, `baseID`,
/// `linksTableID`, `listsTableID`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bearer token sent on every remote call
    #[serde(rename = "accessToken")]
    pub access_token: AccessToken,
    /// Base holding both tables
    #[serde(rename = "baseID")]
    pub base_id: String,
    /// Table holding link records
    #[serde(rename = "linksTableID")]
    pub links_table_id: String,
    /// Table holding list records
    #[serde(rename = "listsTableID")]
    pub lists_table_id: String,
}

impl Settings {
    /// Creates settings from explicit values without validation.
    pub fn new(
        access_token: impl Into<String>,
        base_id: impl Into<String>,
        links_table_id: impl Into<String>,
        lists_table_id: impl Into<String>,
    ) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            base_id: base_id.into(),
            links_table_id: links_table_id.into(),
            lists_table_id: lists_table_id.into(),
        }
    }

    /// Loads settings from a JSON file, merged over the defaults.
    ///
    /// A missing file yields the defaults. Unknown keys are ignored.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reads settings from the environment (and a `.env` file, if present).
    ///
    /// Unset variables leave the matching field empty.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            access_token: AccessToken::new(var(ENV_ACCESS_TOKEN)),
            base_id: var(ENV_BASE_ID),
            links_table_id: var(ENV_LINKS_TABLE_ID),
            lists_table_id: var(ENV_LISTS_TABLE_ID),
        }
    }

    /// Fills empty fields from `other`.
    pub fn or(mut self, other: Settings) -> Self {
        if self.access_token.is_empty() {
            self.access_token = other.access_token.clone();
        }
        if self.base_id.is_empty() {
            self.base_id = other.base_id.clone();
        }
        if self.links_table_id.is_empty() {
            self.links_table_id = other.links_table_id.clone();
        }
        if self.lists_table_id.is_empty() {
            self.lists_table_id = other.lists_table_id.clone();
        }
        self
    }

    /// Replaces the access token.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = AccessToken::new(token);
    }

    /// Sets the base identifier from pasted input.
    ///
    /// Invalid input is rejected and the previous value kept.
    pub fn set_base_id(&mut self, input: &str) -> Result<()> {
        self.base_id = normalize_input(input, is_valid_base_id, "Base ID")?;
        Ok(())
    }

    /// Sets the links table identifier from pasted input.
    pub fn set_links_table_id(&mut self, input: &str) -> Result<()> {
        self.links_table_id = normalize_input(input, is_valid_table_id, "Links Table ID")?;
        Ok(())
    }

    /// Sets the lists table identifier from pasted input.
    pub fn set_lists_table_id(&mut self, input: &str) -> Result<()> {
        self.lists_table_id = normalize_input(input, is_valid_table_id, "Lists Table ID")?;
        Ok(())
    }

    /// Checks that every field is present and well formed.
    pub fn validate(&self) -> Result<()> {
        if self.access_token.is_empty() {
            return Err(AirlinksError::Config("access token is not set".into()));
        }
        if !is_valid_base_id(&self.base_id) {
            return Err(AirlinksError::Config(format!(
                "invalid base ID: '{}'",
                self.base_id
            )));
        }
        if !is_valid_table_id(&self.lists_table_id) {
            return Err(AirlinksError::Config(format!(
                "invalid lists table ID: '{}'",
                self.lists_table_id
            )));
        }
        if !is_valid_table_id(&self.links_table_id) {
            return Err(AirlinksError::Config(format!(
                "invalid links table ID: '{}'",
                self.links_table_id
            )));
        }
        Ok(())
    }

    /// Returns true if both settings address the same base and tables.
    pub fn same_scope(&self, other: &Settings) -> bool {
        self.base_id == other.base_id
            && self.links_table_id == other.links_table_id
            && self.lists_table_id == other.lists_table_id
    }
}

/// Strips a pasted query string and validates what is left.
fn normalize_input(input: &str, is_valid: fn(&str) -> bool, label: &str) -> Result<String> {
    let value = input.split('?').next().unwrap_or_default().trim();
    if is_valid(value) {
        Ok(value.to_string())
    } else {
        Err(AirlinksError::InvalidIdentifier(format!(
            "Invalid {}: '{}'",
            label, value
        )))
    }
}
