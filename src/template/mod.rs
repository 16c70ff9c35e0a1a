//! Template registry for presentation templates
//!
//! A template is addressed by one identifier across three independently
//! populated stores:
//!
//! - metadata: title, description, generator system prompt and the
//!   presentation style handed to the renderer
//! - prompts: long-form generation prompts with an embedded script schema
//! - thumbnails: inline preview images
//!
//! Only the metadata store is mandatory. Prompts and thumbnails may lag
//! behind (or run ahead of) their templates; [`TemplateRegistry::validate_consistency`]
//! reports the gaps without failing.
//!
//! # Example
//!
//! ```rust
//! use presentation_templates::{PresentationStyle, TemplateEntry, TemplateId, TemplateRegistry};
//!
//! let mut builder = TemplateRegistry::builder();
//! let id = TemplateId::new("news_digest").unwrap();
//! let entry = TemplateEntry::new(
//!     id,
//!     "News Digest",
//!     "Summarize the day's headlines",
//!     "Keep every beat under two sentences.",
//!     PresentationStyle::default(),
//! );
//! builder.register(entry, None, None).unwrap();
//!
//! let registry = builder.build().unwrap();
//! assert_eq!(registry.get("news_digest").unwrap().script_name, "news_digest.json");
//! assert!(registry.get_thumbnail("news_digest").is_none());
//! ```

mod entry;
mod lint;
mod registry;
mod thumbnail;

pub use entry::{TemplateEntry, TemplateId, SCRIPT_SUFFIX};
pub use lint::{IntegrityWarning, WarningKind};
pub use registry::{RegistryBuilder, Store, TemplateRegistry};
pub use thumbnail::{ImageResource, PayloadEncoding, DEFAULT_MAX_THUMBNAIL_BYTES};
