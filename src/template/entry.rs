//! Template identifiers and metadata entries

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RegistrationError;
use crate::style::PresentationStyle;

/// Suffix appended to an identifier to name its generated script
pub const SCRIPT_SUFFIX: &str = ".json";

/// Identifier shared by the metadata, prompt and thumbnail stores.
///
/// Only ASCII letters, digits and `_` are accepted, so the identifier can be
/// used to derive a filename without escaping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TemplateId(String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Result<Self, RegistrationError> {
        let id = id.into();
        if is_safe_identifier(&id) {
            Ok(Self(id))
        } else {
            Err(RegistrationError::InvalidIdentifier { id })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional script filename for this template
    pub fn script_name(&self) -> String {
        format!("{}{}", self.0, SCRIPT_SUFFIX)
    }
}

fn is_safe_identifier(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TemplateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TemplateId {
    type Error = RegistrationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TemplateId> for String {
    fn from(id: TemplateId) -> Self {
        id.0
    }
}

/// A registered template: display metadata, generator instructions and the
/// style the renderer consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    /// Join key across all stores
    pub filename: TemplateId,
    pub title: String,
    pub description: String,
    /// Where a generated script for this template is persisted
    pub script_name: String,
    pub system_prompt: String,
    pub presentation_style: PresentationStyle,
}

impl TemplateEntry {
    /// Create an entry whose script name follows the `<filename>.json` convention
    pub fn new(
        filename: TemplateId,
        title: impl Into<String>,
        description: impl Into<String>,
        system_prompt: impl Into<String>,
        presentation_style: PresentationStyle,
    ) -> Self {
        Self {
            script_name: filename.script_name(),
            filename,
            title: title.into(),
            description: description.into(),
            system_prompt: system_prompt.into(),
            presentation_style,
        }
    }

    /// Override the script name
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    pub fn id(&self) -> &TemplateId {
        &self.filename
    }

    /// Check required fields and style ranges
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("scriptName", &self.script_name),
            ("systemPrompt", &self.system_prompt),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(self.incomplete(format!("{} must not be empty", field)));
            }
        }
        self.presentation_style
            .validate()
            .map_err(|reason| self.incomplete(reason))
    }

    fn incomplete(&self, reason: String) -> RegistrationError {
        RegistrationError::IncompleteEntry {
            id: self.filename.to_string(),
            reason,
        }
    }
}
