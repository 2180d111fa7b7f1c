use crate::error::OptionsError;
use crate::geometry::AnnulusBounds;
use crate::resolver::SectorOffset;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl MenuItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Input that requests the pointer lock while held.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKey {
    #[default]
    Tab,
    Space,
    #[strum(serialize = "Alt", serialize = "option")]
    Alt,
    #[strum(serialize = "Control", serialize = "ctrl")]
    Control,
    Shift,
    #[strum(serialize = "Super", serialize = "meta", serialize = "win")]
    Super,
}

fn default_inner() -> f64 {
    500.0
}

fn default_outer() -> f64 {
    800.0
}

fn default_scaled() -> f64 {
    10000.0
}

fn default_gap() -> f64 {
    20.0
}

fn default_sector_template_id() -> String {
    "sayu_sector_template".to_string()
}

fn default_scaled_template_id() -> String {
    "sayu_sector_scaled_template".to_string()
}

fn default_true() -> bool {
    true
}

/// Menu configuration. Sizes are diameters in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOptions {
    #[serde(default)]
    pub items: Vec<MenuItem>,
    /// Inner circle (`r`).
    #[serde(default = "default_inner")]
    pub inner: f64,
    /// Outer circle (`R`).
    #[serde(default = "default_outer")]
    pub outer: f64,
    /// Draw the coarse preview ring, which also lifts the outer hit bound.
    #[serde(default = "default_true")]
    pub sector_scaled: bool,
    /// Preview ring (`sR`). Forced to zero without `sector_scaled`.
    #[serde(default = "default_scaled")]
    pub scaled: f64,
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Widens the inner dead zone inward.
    #[serde(default)]
    pub trigger_offset: f64,
    #[serde(default)]
    pub sector_offset: SectorOffset,
    /// Clip-path ids used when the wedges are exported as SVG.
    #[serde(default = "default_sector_template_id")]
    pub sector_template_id: String,
    #[serde(default = "default_scaled_template_id")]
    pub sector_scaled_template_id: String,
    #[serde(default = "default_true")]
    pub use_custom_cursor: bool,
    #[serde(default)]
    pub trigger_key: TriggerKey,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            inner: default_inner(),
            outer: default_outer(),
            sector_scaled: true,
            scaled: default_scaled(),
            gap: default_gap(),
            trigger_offset: 0.0,
            sector_offset: SectorOffset::default(),
            sector_template_id: default_sector_template_id(),
            sector_scaled_template_id: default_scaled_template_id(),
            use_custom_cursor: true,
            trigger_key: TriggerKey::default(),
        }
    }
}

impl MenuOptions {
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Checks the options and applies the derived defaults.
    pub fn normalize(mut self) -> Result<Self, OptionsError> {
        if self.items.is_empty() {
            return Err(OptionsError::NoItems);
        }
        if !(self.inner >= 0.0 && self.outer > self.inner) {
            return Err(OptionsError::InvalidRadii {
                inner: self.inner,
                outer: self.outer,
            });
        }
        if !self.sector_scaled {
            self.scaled = 0.0;
        }
        Ok(self)
    }

    /// Ring in which pointer activity selects a sector.
    pub fn bounds(&self) -> AnnulusBounds {
        AnnulusBounds::new(self.inner / 2.0 - self.trigger_offset, self.outer / 2.0)
    }

    /// Full sectors reject points past the outer circle; the preview ring does not.
    pub fn include_outer_bound(&self) -> bool {
        !self.sector_scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_key_deserialization() {
        let cases = vec![
            ("\"tab\"", TriggerKey::Tab),
            ("\"TAB\"", TriggerKey::Tab),
            ("\"ctrl\"", TriggerKey::Control),
            ("\"Control\"", TriggerKey::Control),
            ("\"meta\"", TriggerKey::Super),
            ("\"option\"", TriggerKey::Alt),
        ];

        for (json, expected) in cases {
            let deserialized: TriggerKey = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let options: MenuOptions =
            serde_json::from_str(r#"{ "items": [{ "title": "Account" }] }"#).unwrap();
        assert_eq!(options.inner, 500.0);
        assert_eq!(options.outer, 800.0);
        assert!(options.sector_scaled);
        assert_eq!(options.trigger_key, TriggerKey::Tab);
        assert_eq!(options.items[0].content, "");
    }

    #[test]
    fn test_sector_offset_deserialization() {
        let options: MenuOptions =
            serde_json::from_str(r#"{ "sector_offset": { "fixed": 15.0 } }"#).unwrap();
        assert!(matches!(options.sector_offset, SectorOffset::Fixed(d) if d == 15.0));

        let options: MenuOptions = serde_json::from_str(r#"{ "sector_offset": "up" }"#).unwrap();
        assert!(matches!(options.sector_offset, SectorOffset::Up));
    }

    #[test]
    fn test_normalize_rejects_bad_options() {
        assert!(matches!(
            MenuOptions::default().normalize(),
            Err(OptionsError::NoItems)
        ));

        let mut options = MenuOptions::with_items(vec![MenuItem::new("a", "")]);
        options.outer = 100.0;
        options.inner = 200.0;
        assert!(matches!(
            options.normalize(),
            Err(OptionsError::InvalidRadii { .. })
        ));
    }

    #[test]
    fn test_normalize_drops_preview_ring() {
        let mut options = MenuOptions::with_items(vec![MenuItem::new("a", "")]);
        options.sector_scaled = false;
        let options = options.normalize().unwrap();
        assert_eq!(options.scaled, 0.0);
        assert!(options.include_outer_bound());
    }

    #[test]
    fn test_bounds_include_trigger_offset() {
        let mut options = MenuOptions::with_items(vec![MenuItem::new("a", "")]);
        options.inner = 600.0;
        options.outer = 900.0;
        options.trigger_offset = 100.0;
        let bounds = options.bounds();
        assert_eq!(bounds.inner_radius, 200.0);
        assert_eq!(bounds.outer_radius, 450.0);
    }
}
