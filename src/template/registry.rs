//! Template registry: a single-writer builder that freezes into a read-only
//! registry

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::{debug, info, warn};

use super::entry::{TemplateEntry, TemplateId};
use super::lint::{self, IntegrityWarning};
use super::thumbnail::ImageResource;
use crate::config::RegistryConfig;
use crate::error::{BuildError, LookupError, RegistrationError};

/// The auxiliary stores joined to the metadata store by identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Store {
    Prompt,
    Thumbnail,
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Store::Prompt => write!(f, "prompt"),
            Store::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

/// Collects templates, prompts and thumbnails before the registry is frozen.
///
/// Every registration either fully succeeds or leaves all three stores
/// untouched.
#[derive(Debug)]
pub struct RegistryBuilder {
    entries: Vec<TemplateEntry>,
    index: HashMap<TemplateId, usize>,
    prompts: BTreeMap<TemplateId, String>,
    thumbnails: BTreeMap<TemplateId, ImageResource>,
    config: RegistryConfig,
}

impl RegistryBuilder {
    /// Create an empty, non-strict builder with default limits
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty builder governed by `config`: its thumbnail limit
    /// applies to every registration and its strict flag to [`build`](Self::build)
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            prompts: BTreeMap::new(),
            thumbnails: BTreeMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a template together with its optional prompt and thumbnail
    pub fn register(
        &mut self,
        entry: TemplateEntry,
        prompt: Option<String>,
        thumbnail: Option<ImageResource>,
    ) -> Result<(), RegistrationError> {
        let id = entry.filename.clone();
        if self.index.contains_key(&id) {
            return Err(RegistrationError::DuplicateTemplate { id: id.to_string() });
        }
        entry.validate()?;
        if prompt.is_some() {
            self.check_prompt_slot(&id)?;
        }
        if let Some(image) = &thumbnail {
            self.check_thumbnail_slot(&id, image)?;
        }

        debug!(
            template = %id,
            has_prompt = prompt.is_some(),
            has_thumbnail = thumbnail.is_some(),
            "registered template"
        );
        if let Some(text) = prompt {
            self.prompts.insert(id.clone(), text);
        }
        if let Some(image) = thumbnail {
            self.thumbnails.insert(id.clone(), image);
        }
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Register a prompt on its own; the template may be registered later or
    /// never (the lint pass reports the latter)
    pub fn register_prompt(
        &mut self,
        id: TemplateId,
        prompt: impl Into<String>,
    ) -> Result<(), RegistrationError> {
        self.check_prompt_slot(&id)?;
        debug!(template = %id, "registered prompt");
        self.prompts.insert(id, prompt.into());
        Ok(())
    }

    /// Register a thumbnail on its own
    pub fn register_thumbnail(
        &mut self,
        id: TemplateId,
        image: ImageResource,
    ) -> Result<(), RegistrationError> {
        self.check_thumbnail_slot(&id, &image)?;
        debug!(template = %id, bytes = image.encoded_len(), "registered thumbnail");
        self.thumbnails.insert(id, image);
        Ok(())
    }

    /// Number of templates registered so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the builder.
    ///
    /// Integrity warnings are always logged. They only fail the build when the
    /// builder's config is strict.
    pub fn build(self) -> Result<TemplateRegistry, BuildError> {
        let strict = self.config.strict;
        let registry = self.freeze();
        let warnings = registry.validate_consistency();
        for warning in &warnings {
            warn!(template = %warning.id, kind = %warning.kind, "{}", warning.message);
        }
        if strict && !warnings.is_empty() {
            return Err(BuildError::Inconsistent(warnings));
        }
        Ok(registry)
    }

    fn freeze(self) -> TemplateRegistry {
        info!(
            templates = self.entries.len(),
            prompts = self.prompts.len(),
            thumbnails = self.thumbnails.len(),
            "template registry frozen"
        );
        TemplateRegistry {
            entries: self.entries,
            index: self.index,
            prompts: self.prompts,
            thumbnails: self.thumbnails,
        }
    }

    fn check_prompt_slot(&self, id: &TemplateId) -> Result<(), RegistrationError> {
        if self.prompts.contains_key(id) {
            return Err(RegistrationError::DuplicateAsset {
                id: id.to_string(),
                store: Store::Prompt,
            });
        }
        Ok(())
    }

    fn check_thumbnail_slot(
        &self,
        id: &TemplateId,
        image: &ImageResource,
    ) -> Result<(), RegistrationError> {
        if self.thumbnails.contains_key(id) {
            return Err(RegistrationError::DuplicateAsset {
                id: id.to_string(),
                store: Store::Thumbnail,
            });
        }
        let limit = self.config.max_thumbnail_bytes;
        if image.encoded_len() > limit {
            return Err(RegistrationError::ThumbnailTooLarge {
                id: id.to_string(),
                size: image.encoded_len(),
                limit,
            });
        }
        Ok(())
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Frozen, read-only registry of templates.
///
/// All accessors borrow immutably, so a registry can be shared across
/// threads (e.g. behind an `Arc`) without locking.
#[derive(Debug)]
pub struct TemplateRegistry {
    entries: Vec<TemplateEntry>,
    index: HashMap<TemplateId, usize>,
    prompts: BTreeMap<TemplateId, String>,
    thumbnails: BTreeMap<TemplateId, ImageResource>,
}

impl TemplateRegistry {
    /// Start building a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Templates in registration order
    pub fn list(&self) -> &[TemplateEntry] {
        &self.entries
    }

    /// Get a template by identifier
    pub fn get(&self, id: &str) -> Result<&TemplateEntry, LookupError> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| LookupError::NotFound { id: id.to_string() })
    }

    /// Check if a template exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Prompt-store entry for `id`, if one was registered
    pub fn get_prompt(&self, id: &str) -> Option<&str> {
        self.prompts.get(id).map(|s| s.as_str())
    }

    /// Thumbnail for `id`, if one was registered
    pub fn get_thumbnail(&self, id: &str) -> Option<&ImageResource> {
        self.thumbnails.get(id)
    }

    /// Thumbnail for `id`, or the shared placeholder
    pub fn thumbnail_or_placeholder(&self, id: &str) -> ImageResource {
        self.get_thumbnail(id)
            .cloned()
            .unwrap_or_else(ImageResource::placeholder)
    }

    /// Instruction text for the generator: the template's system prompt,
    /// followed by its prompt-store entry when one exists
    pub fn generation_prompt(&self, id: &str) -> Result<String, LookupError> {
        let entry = self.get(id)?;
        Ok(match self.get_prompt(id) {
            Some(prompt) => format!("{}\n\n{}", entry.system_prompt, prompt.trim()),
            None => entry.system_prompt.clone(),
        })
    }

    /// Run the consistency lint; never fails
    pub fn validate_consistency(&self) -> Vec<IntegrityWarning> {
        lint::check(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get all template identifiers in registration order
    pub fn ids(&self) -> impl Iterator<Item = &TemplateId> {
        self.entries.iter().map(|e| &e.filename)
    }

    pub(crate) fn prompt_keys(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(|k| k.as_str())
    }

    pub(crate) fn thumbnail_keys(&self) -> impl Iterator<Item = &str> {
        self.thumbnails.keys().map(|k| k.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{CanvasSize, PresentationStyle};
    use pretty_assertions::assert_eq;

    fn make_entry(id: &str) -> TemplateEntry {
        TemplateEntry::new(
            TemplateId::new(id).unwrap(),
            format!("{} title", id),
            "A template",
            "Write a short script.",
            PresentationStyle::default(),
        )
    }

    fn make_id(id: &str) -> TemplateId {
        TemplateId::new(id).unwrap()
    }

    #[test]
    fn test_registry_register_and_get() {
        let mut builder = TemplateRegistry::builder();
        builder.register(make_entry("box"), None, None).expect("Should register");
        let registry = builder.build().unwrap();

        assert!(registry.contains("box"));
        assert_eq!(registry.get("box").unwrap().title, "box title");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_duplicate_error_keeps_first() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(make_entry("box"), Some("first".into()), None)
            .expect("First register should succeed");

        let mut second = make_entry("box");
        second.title = "replacement".to_string();
        let result = builder.register(second, Some("second".into()), None);
        assert!(matches!(result, Err(RegistrationError::DuplicateTemplate { .. })));
        assert_eq!(builder.len(), 1);

        let registry = builder.build().unwrap();
        assert_eq!(registry.get("box").unwrap().title, "box title");
        assert_eq!(registry.get_prompt("box"), Some("first"));
    }

    #[test]
    fn test_failed_registration_touches_no_store() {
        let mut builder = RegistryBuilder::new();
        builder.register_prompt(make_id("taken"), "forward").unwrap();

        let result = builder.register(
            make_entry("taken"),
            Some("again".into()),
            Some(ImageResource::placeholder()),
        );
        assert_eq!(
            result,
            Err(RegistrationError::DuplicateAsset {
                id: "taken".to_string(),
                store: Store::Prompt,
            })
        );

        let registry = builder.build().unwrap();
        assert!(!registry.contains("taken"));
        assert_eq!(registry.get_thumbnail("taken"), None);
        assert_eq!(registry.get_prompt("taken"), Some("forward"));
    }

    #[test]
    fn test_forward_declared_prompt_joins_later_template() {
        let mut builder = RegistryBuilder::new();
        builder.register_prompt(make_id("later"), "schema").unwrap();
        builder.register(make_entry("later"), None, None).unwrap();

        let registry = builder.build().unwrap();
        assert_eq!(registry.get_prompt("later"), Some("schema"));
        assert!(registry.validate_consistency().is_empty());
    }

    #[test]
    fn test_incomplete_entry_rejected() {
        let mut entry = make_entry("wide");
        entry.presentation_style = PresentationStyle::new(CanvasSize {
            width: 0,
            height: 1080,
        });
        let mut builder = RegistryBuilder::new();
        assert!(matches!(
            builder.register(entry, None, None),
            Err(RegistrationError::IncompleteEntry { .. })
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_thumbnail_size_limit() {
        let config = RegistryConfig::new().with_max_thumbnail_bytes(16);
        let mut builder = RegistryBuilder::with_config(config);
        let result = builder.register(make_entry("big"), None, Some(ImageResource::placeholder()));
        assert!(matches!(
            result,
            Err(RegistrationError::ThumbnailTooLarge { limit: 16, .. })
        ));
        assert!(builder.is_empty());
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let registry = RegistryBuilder::new().build().unwrap();
        assert_eq!(
            registry.get("nope").unwrap_err(),
            LookupError::NotFound {
                id: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_generation_prompt_combines_stores() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(make_entry("with"), Some("\nUse this JSON.\n".into()), None)
            .unwrap();
        builder.register(make_entry("without"), None, None).unwrap();
        let registry = builder.build().unwrap();

        assert_eq!(
            registry.generation_prompt("with").unwrap(),
            "Write a short script.\n\nUse this JSON."
        );
        assert_eq!(
            registry.generation_prompt("without").unwrap(),
            "Write a short script."
        );
        assert!(registry.generation_prompt("missing").is_err());
    }

    #[test]
    fn test_strict_build_fails_on_orphans() {
        let strict = RegistryConfig::new().with_strict(true);

        let mut builder = RegistryBuilder::with_config(strict);
        builder.register_prompt(make_id("ghost"), "boo").unwrap();
        match builder.build() {
            Err(BuildError::Inconsistent(warnings)) => assert_eq!(warnings.len(), 1),
            other => panic!("strict build should reject orphan prompt, got {:?}", other),
        }

        let mut builder = RegistryBuilder::new();
        builder.register_prompt(make_id("ghost"), "boo").unwrap();
        let registry = builder.build().expect("advisory build always succeeds");
        assert_eq!(registry.validate_consistency().len(), 1);
    }

    #[test]
    fn test_builder_keeps_its_config() {
        let config = RegistryConfig::new()
            .with_strict(true)
            .with_max_thumbnail_bytes(16);
        let builder = RegistryBuilder::with_config(config.clone());
        assert_eq!(builder.config(), &config);
        assert_eq!(RegistryBuilder::new().config(), &RegistryConfig::default());
    }
}
