//! Configuration for the gravity search page

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Top-level page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Storage key the search history is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Ids of the search controls
    #[serde(default)]
    pub controls: ControlIds,

    /// Ids of the elements handed to the physics overlay
    #[serde(default)]
    pub tracked: TrackedIds,

    /// Physics tuning
    #[serde(default)]
    pub physics: PhysicsConfig,
}

/// Ids of the elements the history manager is wired to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlIds {
    #[serde(default = "default_search_input")]
    pub search_input: String,

    #[serde(default = "default_search_button")]
    pub search_button: String,

    #[serde(default = "default_history_list")]
    pub history_list: String,

    #[serde(default = "default_clear_button")]
    pub clear_button: String,
}

/// Ids of the three page regions that fall under gravity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedIds {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_search_bar")]
    pub search_bar: String,

    #[serde(default = "default_history_section")]
    pub history_section: String,
}

impl TrackedIds {
    /// Ids in body creation order
    pub fn ids(&self) -> [&str; 3] {
        [&self.title, &self.search_bar, &self.history_section]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s²
    #[serde(default = "default_gravity")]
    pub gravity: f32,

    #[serde(default = "default_restitution")]
    pub restitution: f32,

    #[serde(default = "default_friction")]
    pub friction: f32,

    /// Fraction of the grab error corrected per step while dragging
    #[serde(default = "default_drag_stiffness")]
    pub drag_stiffness: f32,

    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f32,

    #[serde(default = "default_damping")]
    pub linear_damping: f32,

    #[serde(default = "default_damping")]
    pub angular_damping: f32,

    /// Fixed simulation rate
    #[serde(default = "default_step_hz")]
    pub step_hz: f32,

    /// Upper bound on simulation steps run for one animation frame
    #[serde(default = "default_max_substeps")]
    pub max_substeps: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            controls: ControlIds::default(),
            tracked: TrackedIds::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl Default for ControlIds {
    fn default() -> Self {
        Self {
            search_input: default_search_input(),
            search_button: default_search_button(),
            history_list: default_history_list(),
            clear_button: default_clear_button(),
        }
    }
}

impl Default for TrackedIds {
    fn default() -> Self {
        Self {
            title: default_title(),
            search_bar: default_search_bar(),
            history_section: default_history_section(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            restitution: default_restitution(),
            friction: default_friction(),
            drag_stiffness: default_drag_stiffness(),
            wall_thickness: default_wall_thickness(),
            linear_damping: default_damping(),
            angular_damping: default_damping(),
            step_hz: default_step_hz(),
            max_substeps: default_max_substeps(),
        }
    }
}

fn default_storage_key() -> String { "searchHistory".to_string() }
fn default_search_input() -> String { "searchInput".to_string() }
fn default_search_button() -> String { "searchBtn".to_string() }
fn default_history_list() -> String { "searchHistory".to_string() }
fn default_clear_button() -> String { "clearHistoryBtn".to_string() }
fn default_title() -> String { "title".to_string() }
fn default_search_bar() -> String { "searchBar".to_string() }
fn default_history_section() -> String { "historySection".to_string() }
fn default_gravity() -> f32 { 1000.0 }
fn default_restitution() -> f32 { 0.9 }
fn default_friction() -> f32 { 0.05 }
fn default_drag_stiffness() -> f32 { 0.2 }
fn default_wall_thickness() -> f32 { 10.0 }
fn default_damping() -> f32 { 0.6 }
fn default_step_hz() -> f32 { 60.0 }
fn default_max_substeps() -> u32 { 4 }

impl PageConfig {
    /// Parse a JSON configuration; absent fields take their defaults
    pub fn from_json(source: &str) -> Result<Self> {
        let config: PageConfig =
            serde_json::from_str(source).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the page cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(Error::Config("storage_key must not be empty".to_string()));
        }

        let ids = [
            &self.controls.search_input,
            &self.controls.search_button,
            &self.controls.history_list,
            &self.controls.clear_button,
        ];
        if ids.iter().any(|id| id.is_empty()) || self.tracked.ids().iter().any(|id| id.is_empty()) {
            return Err(Error::Config("element ids must not be empty".to_string()));
        }

        let physics = &self.physics;
        if !physics.gravity.is_finite() {
            return Err(Error::Config(format!("gravity must be finite, got {}", physics.gravity)));
        }
        let coefficients = [
            ("restitution", physics.restitution),
            ("friction", physics.friction),
            ("linear_damping", physics.linear_damping),
            ("angular_damping", physics.angular_damping),
        ];
        for (name, value) in coefficients {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !(physics.step_hz > 0.0) {
            return Err(Error::Config(format!("step_hz must be positive, got {}", physics.step_hz)));
        }
        if physics.max_substeps == 0 {
            return Err(Error::Config("max_substeps must be at least 1".to_string()));
        }
        if !(physics.wall_thickness > 0.0) {
            return Err(Error::Config(format!(
                "wall_thickness must be positive, got {}",
                physics.wall_thickness
            )));
        }
        if !(physics.drag_stiffness > 0.0 && physics.drag_stiffness <= 1.0) {
            return Err(Error::Config(format!(
                "drag_stiffness must be in (0, 1], got {}",
                physics.drag_stiffness
            )));
        }
        Ok(())
    }
}
