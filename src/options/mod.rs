//! Runtime options with TOML preset support.
//!
//! Every value the frame loop reads (crystal size, shading modes, scene
//! toggles, camera distance, playback start state, geometry constants and
//! key bindings) lives here as typed fields. Options serialize to/from TOML
//! so a viewer can ship presets.

mod camera;
mod display;
mod geometry;
mod lattice;
mod playback;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use geometry::GeometryOptions;
pub use lattice::LatticeOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LatticeError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lattice]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Crystal size and shading modes.
    pub lattice: LatticeOptions,
    /// Scene visibility toggles.
    pub display: DisplayOptions,
    /// Projection and viewing distance.
    pub camera: CameraOptions,
    /// World-clock start state.
    pub playback: PlaybackOptions,
    /// Unit-cell geometry parameters.
    pub geometry: GeometryOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::Io`] if the file cannot be read and
    /// [`LatticeError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, LatticeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, LatticeError> {
        toml::from_str(content)
            .map_err(|e| LatticeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::OptionsParse`] if serialization fails and
    /// [`LatticeError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LatticeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LatticeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ViewerCommand;
    use crate::renderer::impostor::{CutMode, ImpostorMode};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[lattice]
cells_per_dimension = 9
cut_mode = "cut2"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.lattice.cells_per_dimension, 9);
        assert_eq!(opts.lattice.cut_mode, CutMode::Cut2);
        // Everything else should be default
        assert_eq!(opts.lattice.crystal_side_length, 16.0);
        assert_eq!(opts.lattice.impostor_mode, ImpostorMode::RayTraced);
        assert_eq!(opts.camera.render_distance, 60.0);
        assert!(opts.display.floor_enabled);
        assert_eq!(opts.geometry.atom_radius, 0.3);
    }

    #[test]
    fn cells_per_dimension_is_clamped_on_load() {
        let big = Options::from_toml("[lattice]\ncells_per_dimension = 2000")
            .unwrap();
        assert_eq!(big.lattice.cells_per_dimension, 255);
        assert_eq!(big.lattice.instance_count(), 255 * 255 * 255);

        let zero = Options::from_toml("[lattice]\ncells_per_dimension = 0")
            .unwrap();
        assert_eq!(zero.lattice.cells_per_dimension, 1);
        assert_eq!(zero.lattice.instance_count(), 1);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Options::from_toml("[lattice]\ncells_per_dimension = \"x\"")
            .unwrap_err();
        assert!(matches!(err, LatticeError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("diamond-lattice-options-{}", std::process::id()));
        let path = dir.join("preset.toml");

        let mut opts = Options::default();
        opts.lattice.cells_per_dimension = 3;
        opts.display.floor_enabled = false;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err =
            Options::load(Path::new("/nonexistent/preset.toml")).unwrap_err();
        assert!(matches!(err, LatticeError::Io(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("Space"),
            Some(ViewerCommand::ToggleFreeze)
        );
        assert_eq!(
            opts.keybindings.lookup("Shift+BracketRight"),
            Some(ViewerCommand::AddCells)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("lattice"));
        assert!(props.contains_key("display"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("playback"));
        assert!(props.contains_key("geometry"));
        assert!(!props.contains_key("keybindings"));

        let camera = &props["camera"]["properties"];
        assert!(camera.get("render_distance").is_some());
        assert!(camera.get("near").is_none());
    }
}
