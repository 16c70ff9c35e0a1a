//! Presentation style consumed by the downstream renderer
//!
//! The registry treats these values as opaque configuration: it checks that
//! they are structurally valid (positive canvas, volumes in range) but never
//! interprets providers, models or voice identifiers. Field names serialize
//! in camelCase so a style can be handed to the renderer verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema tag the renderer uses to pick a parser version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaTag {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
}

impl Default for SchemaTag {
    fn default() -> Self {
        Self {
            version: "1.1".to_string(),
            credit: None,
        }
    }
}

/// Output canvas in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const LANDSCAPE_1080P: CanvasSize = CanvasSize {
        width: 1920,
        height: 1080,
    };
}

/// Volume levels are in `[0, 1]`, paddings are seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioParams {
    pub audio_volume: f64,
    pub bgm_volume: f64,
    pub padding: f64,
    pub intro_padding: f64,
    pub outro_padding: f64,
    pub closing_padding: f64,
    #[serde(default)]
    pub suppress_speech: bool,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self {
            audio_volume: 1.0,
            bgm_volume: 0.2,
            padding: 0.3,
            intro_padding: 1.0,
            outro_padding: 1.0,
            closing_padding: 0.8,
            suppress_speech: false,
        }
    }
}

impl AudioParams {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("audioVolume", self.audio_volume),
            ("bgmVolume", self.bgm_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("audioParams.{} must be within [0, 1], got {}", name, value));
            }
        }
        for (name, value) in [
            ("padding", self.padding),
            ("introPadding", self.intro_padding),
            ("outroPadding", self.outro_padding),
            ("closingPadding", self.closing_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("audioParams.{} must be a non-negative number of seconds, got {}", name, value));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageParams {
    /// Free-form style descriptor appended to every image prompt
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieParams {
    pub provider: String,
    pub model: String,
}

/// A voice assigned to a speaker role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Speaker {
    pub voice_id: String,
    /// Language code -> localized display name
    #[serde(default)]
    pub display_name: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl Speaker {
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            display_name: BTreeMap::new(),
            provider: None,
        }
    }

    /// Add a localized display name
    pub fn with_display_name(mut self, lang: impl Into<String>, name: impl Into<String>) -> Self {
        self.display_name.insert(lang.into(), name.into());
        self
    }

    /// A speaker is usable when it names a voice and has at least one non-empty display name
    pub fn is_well_formed(&self) -> bool {
        !self.voice_id.trim().is_empty()
            && self.display_name.values().any(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeechParams {
    /// Speaker role -> voice; ordered so serialized output is stable
    pub speakers: BTreeMap<String, Speaker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEffectParams {
    pub provider: String,
}

/// Structured configuration handed verbatim to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationStyle {
    #[serde(rename = "$mulmocast")]
    pub schema: SchemaTag,
    pub canvas_size: CanvasSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_params: Option<AudioParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_params: Option<ImageParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_params: Option<MovieParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_params: Option<SpeechParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_effect_params: Option<SoundEffectParams>,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        Self::new(CanvasSize::LANDSCAPE_1080P)
    }
}

impl PresentationStyle {
    /// Create a style with only the required blocks set
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            schema: SchemaTag::default(),
            canvas_size,
            audio_params: None,
            image_params: None,
            movie_params: None,
            speech_params: None,
            sound_effect_params: None,
        }
    }

    pub fn with_schema(mut self, schema: SchemaTag) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_audio(mut self, audio: AudioParams) -> Self {
        self.audio_params = Some(audio);
        self
    }

    pub fn with_image_style(mut self, style: impl Into<String>) -> Self {
        self.image_params = Some(ImageParams { style: style.into() });
        self
    }

    pub fn with_movie(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.movie_params = Some(MovieParams {
            provider: provider.into(),
            model: model.into(),
        });
        self
    }

    /// Add a speaker, creating the speech block if needed
    pub fn with_speaker(mut self, role: impl Into<String>, speaker: Speaker) -> Self {
        self.speech_params
            .get_or_insert_with(SpeechParams::default)
            .speakers
            .insert(role.into(), speaker);
        self
    }

    pub fn with_sound_effects(mut self, provider: impl Into<String>) -> Self {
        self.sound_effect_params = Some(SoundEffectParams {
            provider: provider.into(),
        });
        self
    }

    /// Speakers declared by this style, empty when there is no speech block
    pub fn speakers(&self) -> impl Iterator<Item = (&str, &Speaker)> {
        self.speech_params
            .iter()
            .flat_map(|p| p.speakers.iter().map(|(role, s)| (role.as_str(), s)))
    }

    /// Check the structural constraints the renderer relies on.
    ///
    /// Returns a description of the first violation found. Speakers are not
    /// checked here; a malformed speaker is a lint warning, not a rejection.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema.version.trim().is_empty() {
            return Err("$mulmocast.version must not be empty".to_string());
        }
        if self.canvas_size.width == 0 || self.canvas_size.height == 0 {
            return Err(format!(
                "canvasSize must be positive, got {}x{}",
                self.canvas_size.width, self.canvas_size.height
            ));
        }
        if let Some(audio) = &self.audio_params {
            audio.validate()?;
        }
        Ok(())
    }

    /// Serialize to the JSON shape the renderer reads
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
