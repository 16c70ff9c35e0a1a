//! Presentation Templates - a named registry of presentation templates
//!
//! Each template bundles a presentation style for the renderer, a system
//! prompt for the script generator, and optionally a long-form generation
//! prompt and an inline thumbnail. Registration happens once through a
//! [`RegistryBuilder`]; the resulting [`TemplateRegistry`] is read-only.
//!
//! # Example
//!
//! ```rust
//! use presentation_templates::builtin_registry;
//!
//! let registry = builtin_registry().unwrap();
//! for entry in registry.list() {
//!     let preview = registry.thumbnail_or_placeholder(entry.filename.as_str());
//!     assert!(preview.as_data_url().starts_with("data:image/"));
//! }
//! assert!(registry.validate_consistency().is_empty());
//! ```

pub mod builtin;
pub mod config;
pub mod error;
pub mod style;
pub mod template;

pub use builtin::builtin_registry;
pub use config::RegistryConfig;
pub use error::{BuildError, ConfigError, ImageError, LookupError, RegistrationError};
pub use style::{
    AudioParams, CanvasSize, ImageParams, MovieParams, PresentationStyle, SchemaTag,
    SoundEffectParams, Speaker, SpeechParams,
};
pub use template::{
    ImageResource, IntegrityWarning, RegistryBuilder, Store, TemplateEntry, TemplateId,
    TemplateRegistry, WarningKind,
};
