//! Admin-saved content overrides
//!
//! The page's admin editor writes a JSON blob to LocalStorage. It is read once
//! at startup and turned into element patches. This code never writes it back.

use serde::Deserialize;
use thiserror::Error;

/// Element receiving the hero image
pub const HERO_PHOTO_ID: &str = "hero-photo";
/// Element mirroring the hero image in the about section
pub const ABOUT_PHOTO_ID: &str = "about-photo";
pub const ABOUT_TEXT_ID: &str = "about-text";
pub const NAME_ID: &str = "ai-name";

#[derive(Debug, Error)]
pub enum OverridesError {
    #[error("overrides blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("overrides blob is not a JSON object")]
    NotAnObject,
}

/// Key names as written by the admin editor, plus the canonical names.
/// Canonical keys win when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOverrides {
    hero_image: Option<String>,
    hero_photo: Option<String>,
    about_text: Option<String>,
    display_name: Option<String>,
    name: Option<String>,
}

/// Persisted display overrides. `None` means "leave the page default alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub hero_image: Option<String>,
    pub about_text: Option<String>,
    pub display_name: Option<String>,
}

/// A single change to apply to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Set `src` on an image element
    ImageSrc { id: &'static str, src: String },
    /// Replace an element's markup
    InnerHtml { id: &'static str, html: String },
    /// Replace an element's text
    TextContent { id: &'static str, text: String },
}

impl Patch {
    /// Id of the element this patch targets
    pub fn target(&self) -> &'static str {
        match *self {
            Patch::ImageSrc { id, .. }
            | Patch::InnerHtml { id, .. }
            | Patch::TextContent { id, .. } => id,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl Overrides {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "portfolio_data";

    /// Parse a stored blob. Unknown keys are ignored, empty strings count as unset.
    pub fn from_json(json: &str) -> Result<Self, OverridesError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(OverridesError::NotAnObject);
        }
        let raw: RawOverrides = serde_json::from_value(value)?;
        Ok(Self {
            hero_image: non_empty(raw.hero_image).or_else(|| non_empty(raw.hero_photo)),
            about_text: non_empty(raw.about_text),
            display_name: non_empty(raw.display_name).or_else(|| non_empty(raw.name)),
        })
    }

    /// True when nothing would be changed
    pub fn is_empty(&self) -> bool {
        self.hero_image.is_none() && self.about_text.is_none() && self.display_name.is_none()
    }

    /// Element patches for every field that is set
    pub fn patches(&self) -> Vec<Patch> {
        let mut patches = Vec::new();
        if let Some(src) = &self.hero_image {
            for id in [HERO_PHOTO_ID, ABOUT_PHOTO_ID] {
                patches.push(Patch::ImageSrc {
                    id,
                    src: src.clone(),
                });
            }
        }
        if let Some(html) = &self.about_text {
            patches.push(Patch::InnerHtml {
                id: ABOUT_TEXT_ID,
                html: html.clone(),
            });
        }
        if let Some(text) = &self.display_name {
            patches.push(Patch::TextContent {
                id: NAME_ID,
                text: text.clone(),
            });
        }
        patches
    }

    /// Load overrides from LocalStorage (WASM only)
    ///
    /// Returns `None` when storage is unavailable, the slot is empty or the
    /// blob can't be parsed. Failures are logged, never raised.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("LocalStorage unavailable, using page defaults");
            return None;
        };

        let json = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No saved overrides, using page defaults");
                return None;
            }
            Err(err) => {
                log::warn!("Overrides read failed: {:?}", err);
                return None;
            }
        };

        match Self::from_json(&json) {
            Ok(overrides) => {
                log::info!("Loaded overrides from LocalStorage");
                Some(overrides)
            }
            Err(err) => {
                log::warn!("Overrides load failed: {}", err);
                None
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Option<Self> {
        None
    }

    /// Apply every patch whose target exists. Returns how many were applied.
    #[cfg(target_arch = "wasm32")]
    pub fn apply(&self, page: &crate::page::Page) -> usize {
        let mut applied = 0;
        for patch in self.patches() {
            let Some(el) = page.element(patch.target()) else {
                continue;
            };
            match &patch {
                Patch::ImageSrc { src, .. } => {
                    if let Err(err) = el.set_attribute("src", src) {
                        log::warn!("Failed to set #{} src: {:?}", patch.target(), err);
                        continue;
                    }
                }
                Patch::InnerHtml { html, .. } => el.set_inner_html(html),
                Patch::TextContent { text, .. } => el.set_text_content(Some(text)),
            }
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_blob_patches_every_target() {
        let overrides = Overrides::from_json(
            r#"{"heroImage":"me.png","aboutText":"<b>hi</b>","displayName":"Sid"}"#,
        )
        .unwrap();
        let targets: Vec<_> = overrides.patches().iter().map(Patch::target).collect();
        assert_eq!(targets, vec![HERO_PHOTO_ID, ABOUT_PHOTO_ID, ABOUT_TEXT_ID, NAME_ID]);
    }

    #[test]
    fn test_missing_fields_leave_elements_alone() {
        let overrides = Overrides::from_json(r#"{"aboutText":"Hello"}"#).unwrap();
        assert_eq!(
            overrides.patches(),
            vec![Patch::InnerHtml {
                id: ABOUT_TEXT_ID,
                html: "Hello".to_string()
            }]
        );
    }

    #[test]
    fn test_editor_key_names_accepted() {
        let overrides = Overrides::from_json(r#"{"heroPhoto":"a.jpg","name":"Sid"}"#).unwrap();
        assert_eq!(overrides.hero_image.as_deref(), Some("a.jpg"));
        assert_eq!(overrides.display_name.as_deref(), Some("Sid"));
    }

    #[test]
    fn test_canonical_key_wins() {
        let overrides =
            Overrides::from_json(r#"{"heroPhoto":"old.jpg","heroImage":"new.jpg"}"#).unwrap();
        assert_eq!(overrides.hero_image.as_deref(), Some("new.jpg"));
    }

    #[test]
    fn test_empty_strings_are_unset() {
        let overrides = Overrides::from_json(r#"{"heroImage":"","name":""}"#).unwrap();
        assert!(overrides.is_empty());
        assert!(overrides.patches().is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let overrides = Overrides::from_json(r#"{"theme":"dark","skills":[1,2]}"#).unwrap();
        assert!(overrides.is_empty());
    }

    #[test]
    fn test_invalid_blob_is_error() {
        assert!(matches!(
            Overrides::from_json("{not json"),
            Err(OverridesError::Json(_))
        ));
        assert!(matches!(
            Overrides::from_json("null"),
            Err(OverridesError::NotAnObject)
        ));
        assert!(matches!(
            Overrides::from_json("[1, 2]"),
            Err(OverridesError::NotAnObject)
        ));
    }

    #[test]
    fn test_wrong_field_type_is_error() {
        assert!(Overrides::from_json(r#"{"aboutText": 42}"#).is_err());
    }

    #[test]
    fn test_native_load_is_none() {
        assert!(Overrides::load().is_none());
    }
}
