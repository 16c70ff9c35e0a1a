//! Consistency lint across the metadata, prompt and thumbnail stores.
//!
//! Runs on a frozen registry and never fails: it reports keys that point at
//! nothing and speakers the renderer could not voice. Callers decide whether
//! warnings block a build.

use std::fmt;

use super::registry::{Store, TemplateRegistry};

/// A diagnostic about cross-store integrity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityWarning {
    pub kind: WarningKind,
    /// Template identifier the warning is about
    pub id: String,
    pub message: String,
}

/// Category of integrity defect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// Prompt or thumbnail registered for an identifier with no template
    OrphanKey { store: Store },
    /// Speaker without a voice or without any display name
    MalformedSpeaker { role: String },
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::OrphanKey { .. } => write!(f, "orphan-key"),
            WarningKind::MalformedSpeaker { .. } => write!(f, "malformed-speaker"),
        }
    }
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.id, self.message)
    }
}

impl IntegrityWarning {
    fn orphan(store: Store, id: &str) -> Self {
        Self {
            kind: WarningKind::OrphanKey { store },
            id: id.to_string(),
            message: format!("{} has no matching template", store),
        }
    }

    fn malformed_speaker(id: &str, role: &str, problem: &str) -> Self {
        Self {
            kind: WarningKind::MalformedSpeaker {
                role: role.to_string(),
            },
            id: id.to_string(),
            message: format!("speaker \"{}\" {}", role, problem),
        }
    }

    pub fn is_orphan(&self) -> bool {
        matches!(self.kind, WarningKind::OrphanKey { .. })
    }
}

/// Run all consistency checks.
///
/// Orphans come first, grouped by store and sorted by key, followed by
/// speaker problems in registration order.
pub fn check(registry: &TemplateRegistry) -> Vec<IntegrityWarning> {
    let mut warnings = Vec::new();
    check_orphans(registry, &mut warnings);
    check_speakers(registry, &mut warnings);
    warnings
}

fn check_orphans(registry: &TemplateRegistry, warnings: &mut Vec<IntegrityWarning>) {
    for id in registry.prompt_keys() {
        if !registry.contains(id) {
            warnings.push(IntegrityWarning::orphan(Store::Prompt, id));
        }
    }
    for id in registry.thumbnail_keys() {
        if !registry.contains(id) {
            warnings.push(IntegrityWarning::orphan(Store::Thumbnail, id));
        }
    }
}

fn check_speakers(registry: &TemplateRegistry, warnings: &mut Vec<IntegrityWarning>) {
    for entry in registry.list() {
        for (role, speaker) in entry.presentation_style.speakers() {
            if speaker.is_well_formed() {
                continue;
            }
            let problem = if speaker.voice_id.trim().is_empty() {
                "has an empty voiceId"
            } else {
                "has no display name"
            };
            warnings.push(IntegrityWarning::malformed_speaker(
                entry.filename.as_str(),
                role,
                problem,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{PresentationStyle, Speaker};
    use crate::template::{RegistryBuilder, TemplateEntry, TemplateId};

    fn entry(id: &str, style: PresentationStyle) -> TemplateEntry {
        TemplateEntry::new(TemplateId::new(id).unwrap(), "T", "D", "P", style)
    }

    #[test]
    fn test_clean_registry_has_no_warnings() {
        let mut builder = RegistryBuilder::new();
        builder
            .register(entry("a", PresentationStyle::default()), Some("prompt".into()), None)
            .unwrap();
        assert!(check(&builder.build().unwrap()).is_empty());
    }

    #[test]
    fn test_malformed_speakers_reported_per_role() {
        let style = PresentationStyle::default()
            .with_speaker("Good", Speaker::new("onyx").with_display_name("en", "Good"))
            .with_speaker("NoVoice", Speaker::new("").with_display_name("en", "Mute"))
            .with_speaker("NoName", Speaker::new("alloy"));
        let mut builder = RegistryBuilder::new();
        builder.register(entry("cast", style), None, None).unwrap();

        let warnings = check(&builder.build().unwrap());
        let roles: Vec<_> = warnings
            .iter()
            .map(|w| match &w.kind {
                WarningKind::MalformedSpeaker { role } => role.as_str(),
                other => panic!("unexpected warning kind {:?}", other),
            })
            .collect();
        assert_eq!(roles, vec!["NoName", "NoVoice"]);
        assert_eq!(warnings[0].message, "speaker \"NoName\" has no display name");
        assert_eq!(warnings[1].message, "speaker \"NoVoice\" has an empty voiceId");
    }

    #[test]
    fn test_orphans_sorted_by_store_then_key() {
        let mut builder = RegistryBuilder::new();
        builder.register_prompt(TemplateId::new("zeta").unwrap(), "z").unwrap();
        builder.register_prompt(TemplateId::new("alpha").unwrap(), "a").unwrap();
        builder
            .register_thumbnail(TemplateId::new("beta").unwrap(), crate::ImageResource::placeholder())
            .unwrap();

        let warnings = check(&builder.build().unwrap());
        let described: Vec<String> = warnings.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            described,
            vec![
                "[orphan-key] alpha: prompt has no matching template",
                "[orphan-key] zeta: prompt has no matching template",
                "[orphan-key] beta: thumbnail has no matching template",
            ]
        );
        assert!(warnings.iter().all(IntegrityWarning::is_orphan));
    }
}
