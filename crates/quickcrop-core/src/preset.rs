//! Output presets: a fixed aspect ratio paired with a target pixel size.
//!
//! The set of presets is supplied once when a session starts and is fixed for
//! the session's lifetime. Only the output size of an existing preset may
//! change afterwards (see [`crate::CropSession::set_output_size`]).

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum allowed difference between `outputSize` and `aspectRatio` ratios.
const ASPECT_TOLERANCE: f64 = 0.01;

/// Opaque preset identifier (e.g. `"headshot"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(String);

impl PresetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PresetId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Configuration for a single crop preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetConfig {
    pub id: PresetId,
    /// Aspect ratio terms `[width, height]`, e.g. `[4, 5]`.
    pub aspect_ratio: [u32; 2],
    /// Target output size in pixels `[width, height]`.
    pub output_size: [u32; 2],
    /// Tab label shown by the UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PresetConfig {
    pub fn new(id: impl Into<String>, aspect_ratio: [u32; 2], output_size: [u32; 2]) -> Self {
        Self {
            id: PresetId::new(id),
            aspect_ratio,
            output_size,
            name: None,
            description: None,
        }
    }

    /// Attach a display name and description.
    pub fn with_label(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.description = Some(description.into());
        self
    }

    /// Display name, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    /// Aspect ratio as `width / height`.
    pub fn aspect(&self) -> f64 {
        f64::from(self.aspect_ratio[0]) / f64::from(self.aspect_ratio[1])
    }

    pub fn output_width(&self) -> u32 {
        self.output_size[0]
    }

    pub fn output_height(&self) -> u32 {
        self.output_size[1]
    }

    /// Validate the preset configuration.
    ///
    /// Rejects an empty id, zero aspect terms, a zero output size, and an
    /// output size whose ratio does not match the aspect ratio.
    pub fn validate(&self) -> Result<(), SessionError> {
        let invalid = |reason: &str| SessionError::InvalidPreset {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.as_str().is_empty() {
            return Err(invalid("empty id"));
        }
        if self.aspect_ratio.contains(&0) {
            return Err(invalid("aspect ratio terms must be positive"));
        }
        if self.output_size.contains(&0) {
            return Err(invalid("output size must be positive"));
        }
        let output_ratio = f64::from(self.output_size[0]) / f64::from(self.output_size[1]);
        if (output_ratio - self.aspect()).abs() > ASPECT_TOLERANCE {
            return Err(invalid("output size does not match aspect ratio"));
        }
        Ok(())
    }

    /// The standard QuickCrop catalogue.
    pub fn defaults() -> Vec<PresetConfig> {
        vec![
            PresetConfig::new("headshot", [1, 1], [2000, 2000]).with_label(
                "Headshot",
                "Square crop with face-centered framing for professional headshots",
            ),
            PresetConfig::new("avatar", [1, 1], [300, 300]).with_label(
                "Avatar",
                "Small square crop for profile pictures and avatars",
            ),
            PresetConfig::new("thumbnail", [1, 1], [500, 500]).with_label(
                "Thumbnail",
                "Medium square crop for internal directories and thumbnails",
            ),
            PresetConfig::new("website", [4, 5], [1600, 2000]).with_label(
                "Website Photo",
                "Portrait crop with upper-body framing for website headers",
            ),
            PresetConfig::new("full_body", [17, 20], [3400, 4000]).with_label(
                "Full Body",
                "Portrait crop with full-figure framing for professional photos",
            ),
        ]
    }

    /// Find the preset whose output size matches exactly.
    pub fn by_output_size(presets: &[PresetConfig], width: u32, height: u32) -> Option<&PresetConfig> {
        presets
            .iter()
            .find(|p| p.output_size == [width, height])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let presets = PresetConfig::defaults();
        assert_eq!(presets.len(), 5);
        for preset in &presets {
            assert!(preset.validate().is_ok(), "{} should validate", preset.id);
        }
    }

    #[test]
    fn test_default_aspects() {
        let presets = PresetConfig::defaults();
        let website = presets.iter().find(|p| p.id.as_str() == "website").unwrap();
        assert!((website.aspect() - 0.8).abs() < 1e-9);
        let full_body = presets.iter().find(|p| p.id.as_str() == "full_body").unwrap();
        assert!((full_body.aspect() - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_validate_rejects_zero_output() {
        let preset = PresetConfig::new("broken", [1, 1], [0, 100]);
        assert!(matches!(
            preset.validate(),
            Err(SessionError::InvalidPreset { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_aspect() {
        let preset = PresetConfig::new("broken", [0, 1], [100, 100]);
        assert!(preset.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_mismatched_ratio() {
        let preset = PresetConfig::new("broken", [1, 1], [1600, 2000]);
        let err = preset.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid preset broken: output size does not match aspect ratio"
        );
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let preset = PresetConfig::new("", [1, 1], [100, 100]);
        assert!(preset.validate().is_err());
    }

    #[test]
    fn test_by_output_size() {
        let presets = PresetConfig::defaults();
        let found = PresetConfig::by_output_size(&presets, 300, 300).unwrap();
        assert_eq!(found.id.as_str(), "avatar");
        assert!(PresetConfig::by_output_size(&presets, 123, 456).is_none());
    }

    #[test]
    fn test_serde_camel_case() {
        let json = r#"{"id":"website","aspectRatio":[4,5],"outputSize":[1600,2000]}"#;
        let preset: PresetConfig = serde_json::from_str(json).unwrap();
        assert_eq!(preset, PresetConfig::new("website", [4, 5], [1600, 2000]));

        let back = serde_json::to_string(&preset).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_catalogue_labels() {
        let presets = PresetConfig::defaults();
        let website = presets.iter().find(|p| p.id.as_str() == "website").unwrap();
        assert_eq!(website.display_name(), "Website Photo");
        assert!(website
            .description
            .as_deref()
            .is_some_and(|d| d.contains("upper-body")));
        assert!(presets.iter().all(|p| p.name.is_some() && p.description.is_some()));

        let json = serde_json::to_string(website).unwrap();
        assert!(json.contains(r#""name":"Website Photo""#));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let custom = PresetConfig::new("poster", [2, 3], [2000, 3000]);
        assert_eq!(custom.display_name(), "poster");
    }
}
