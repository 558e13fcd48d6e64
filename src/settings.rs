//! Backdrop settings
//!
//! Every field is optional on the wire; the page passes a JSON object with
//! camelCase keys (`{ "cellSize": 10, "speed": 150 }`). Without one, the
//! browser host falls back to overrides stored in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::grid::Viewport;

/// How a fresh grid is populated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SeedStyle {
    /// Inward-heading gliders along the four edges
    #[default]
    EdgeGliders,
    /// Edge gliders plus blocks and beehives in the interior
    EdgeGlidersWithStillLifes,
    /// Independent random fill
    Soup,
}

impl SeedStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedStyle::EdgeGliders => "edgeGliders",
            SeedStyle::EdgeGlidersWithStillLifes => "edgeGlidersWithStillLifes",
            SeedStyle::Soup => "soup",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "edgegliders" | "gliders" => Some(SeedStyle::EdgeGliders),
            "edgegliderswithstilllifes" | "stilllifes" => Some(SeedStyle::EdgeGlidersWithStillLifes),
            "soup" | "random" => Some(SeedStyle::Soup),
            _ => None,
        }
    }
}

/// Backdrop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Initial viewport width in pixels (replaced by the measured one on mount)
    pub width: u32,
    /// Initial viewport height in pixels
    pub height: u32,
    /// Pixels per grid cell
    pub cell_size: u32,
    /// Base fill alpha (0.0 - 1.0)
    pub opacity: f32,
    /// Minimum milliseconds between generations
    pub speed: f64,
    /// Extra CSS classes for the canvas
    pub class_name: String,
    /// Inject fresh gliders every N generations (0 disables)
    pub reseed_interval: u64,
    /// Initial population
    pub seed_style: SeedStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            opacity: DEFAULT_OPACITY,
            speed: DEFAULT_SPEED_MS,
            class_name: String::new(),
            reseed_interval: RESEED_INTERVAL,
            seed_style: SeedStyle::EdgeGliders,
        }
    }
}

impl Settings {
    /// Parse from a JSON object; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.cell_size = self.cell_size.max(1);
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_OPACITY
        };
        self.speed = if self.speed.is_finite() {
            self.speed.max(0.0)
        } else {
            DEFAULT_SPEED_MS
        };
        self
    }

    /// Viewport from the configured width/height
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "life_backdrop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded backdrop settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored backdrop settings: {}", e),
                }
            }
        }

        log::info!("Using default backdrop settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_ok() {
                        log::info!("Backdrop settings saved");
                    } else {
                        log::warn!("LocalStorage rejected backdrop settings");
                    }
                }
                Err(e) => log::warn!("Could not serialize backdrop settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.cell_size, 8);
        assert!((s.opacity - 0.1).abs() < f32::EPSILON);
        assert_eq!(s.reseed_interval, 100);
        assert_eq!(s.seed_style, SeedStyle::EdgeGliders);
        assert!(s.class_name.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "cellSize": 12, "speed": 200, "seedStyle": "soup" }"#).unwrap();
        assert_eq!(s.cell_size, 12);
        assert_eq!(s.speed, 200.0);
        assert_eq!(s.seed_style, SeedStyle::Soup);
        assert_eq!(s.width, DEFAULT_WIDTH);
        assert_eq!(s.reseed_interval, RESEED_INTERVAL);
    }

    #[test]
    fn test_sanitize_clamps() {
        let s = Settings::from_json(r#"{ "cellSize": 0, "opacity": 3.5, "speed": -20 }"#).unwrap();
        assert_eq!(s.cell_size, 1);
        assert_eq!(s.opacity, 1.0);
        assert_eq!(s.speed, 0.0);
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(Settings::from_json("{ cellSize: 8").is_err());
        assert!(Settings::from_json(r#"{ "seedStyle": "spiral" }"#).is_err());
    }

    #[test]
    fn test_stored_form_reads_back() {
        let s = Settings {
            width: 1280,
            height: 720,
            cell_size: 6,
            opacity: 0.25,
            speed: 75.0,
            class_name: "fade-in blur".to_string(),
            reseed_interval: 40,
            seed_style: SeedStyle::EdgeGlidersWithStillLifes,
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"cellSize\":6"));
        assert!(json.contains("\"seedStyle\":\"edgeGlidersWithStillLifes\""));
        assert_eq!(Settings::from_json(&json).unwrap(), s);

        // Native save leaves nothing behind to load
        s.save();
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_seed_style_names() {
        for style in [
            SeedStyle::EdgeGliders,
            SeedStyle::EdgeGlidersWithStillLifes,
            SeedStyle::Soup,
        ] {
            assert_eq!(SeedStyle::from_str(style.as_str()), Some(style));
        }
        assert_eq!(SeedStyle::from_str("RANDOM"), Some(SeedStyle::Soup));
        assert_eq!(SeedStyle::from_str("spiral"), None);
    }
}
