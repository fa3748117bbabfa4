//! Session settings
//!
//! Chosen on the menu, frozen once a session starts, and persisted
//! separately from scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Durations offered by the menu (seconds)
pub const DURATION_CHOICES: [u32; 4] = [30, 60, 90, 120];

/// Target radius slider bounds (px)
pub const TARGET_SIZE_MIN: f32 = 15.0;
pub const TARGET_SIZE_MAX: f32 = 60.0;
pub const TARGET_SIZE_STEP: f32 = 5.0;

/// Difficulty level - controls how long each target stays clickable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Target lifetime in milliseconds
    pub fn lifetime_ms(&self) -> f64 {
        match self {
            Difficulty::Easy => 3000.0,
            Difficulty::Medium => 2000.0,
            Difficulty::Hard => 1500.0,
        }
    }
}

/// Configuration for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Session length in seconds
    pub duration: u32,
    pub difficulty: Difficulty,
    /// Fully grown target radius (px)
    pub target_size: f32,
    /// Minimum interval between spawns (ms)
    pub spawn_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            duration: 60,
            difficulty: Difficulty::Medium,
            // Small enough to leave room on phone screens
            target_size: 30.0,
            spawn_rate: 600,
        }
    }
}

impl Settings {
    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.duration == 0 {
            return Err(SettingsError::Duration(self.duration));
        }
        if !self.target_size.is_finite() || self.target_size <= 0.0 {
            return Err(SettingsError::TargetSize(self.target_size));
        }
        if self.spawn_rate == 0 {
            return Err(SettingsError::SpawnRate(self.spawn_rate));
        }
        Ok(())
    }

    /// Stricter check: only values the menu can produce
    pub fn validate_menu_ranges(&self) -> Result<(), SettingsError> {
        self.validate()?;
        if !DURATION_CHOICES.contains(&self.duration) {
            return Err(SettingsError::OutOfMenuRange {
                field: "duration",
                value: self.duration as f32,
                min: DURATION_CHOICES[0] as f32,
                max: DURATION_CHOICES[DURATION_CHOICES.len() - 1] as f32,
                step: 30.0,
            });
        }
        let steps = (self.target_size - TARGET_SIZE_MIN) / TARGET_SIZE_STEP;
        if !(TARGET_SIZE_MIN..=TARGET_SIZE_MAX).contains(&self.target_size)
            || steps.fract().abs() > f32::EPSILON
        {
            return Err(SettingsError::OutOfMenuRange {
                field: "targetSize",
                value: self.target_size,
                min: TARGET_SIZE_MIN,
                max: TARGET_SIZE_MAX,
                step: TARGET_SIZE_STEP,
            });
        }
        Ok(())
    }

    /// Advance to the next menu duration, wrapping around
    pub fn cycle_duration(&mut self) {
        let next = DURATION_CHOICES
            .iter()
            .position(|&d| d == self.duration)
            .map(|i| (i + 1) % DURATION_CHOICES.len())
            .unwrap_or(0);
        self.duration = DURATION_CHOICES[next];
    }

    /// Move the target size slider by `steps`, snapping to the slider grid
    pub fn adjust_target_size(&mut self, steps: i32) {
        let snapped = ((self.target_size - TARGET_SIZE_MIN) / TARGET_SIZE_STEP).round();
        let size = TARGET_SIZE_MIN + (snapped + steps as f32) * TARGET_SIZE_STEP;
        self.target_size = size.clamp(TARGET_SIZE_MIN, TARGET_SIZE_MAX);
    }

    /// Target lifetime for the chosen difficulty (ms)
    pub fn target_lifetime_ms(&self) -> f64 {
        self.difficulty.lifetime_ms()
    }

    /// Session length in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration as f64 * 1000.0
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "aim_trainer_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str::<Settings>(&json) {
                    Ok(settings) if settings.validate().is_ok() => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Ok(_) => log::warn!("Stored settings are invalid, ignoring"),
                    Err(e) => log::warn!("Failed to parse stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
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
