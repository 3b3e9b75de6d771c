//! Process constants.
//!
//! All dimensions are nanometers. The defaults describe the standard
//! 500 nm × 220 nm strip cross-section; a user configuration file can
//! override them via [`Tech::from_toml_str`].

use serde::Deserialize;

/// Technology constants for the EBeam process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Tech {
    /// Default strip waveguide width.
    pub wg_width: i64,
    /// Default bend radius.
    pub bend_radius: i64,
    /// Minimum spacing between adjacent waveguides.
    pub wg_spacing: i64,
    /// Margin of the DevRec box beyond drawn geometry.
    pub devrec_margin: i64,
    /// Depth of port pin markers, drawn inward from the port plane.
    pub pin_depth: i64,
    /// Fiber array pitch.
    pub fiber_pitch: i64,
}

impl Default for Tech {
    fn default() -> Self {
        Self {
            wg_width: 500,
            bend_radius: 10_000,
            wg_spacing: 2_000,
            devrec_margin: 1_000,
            pin_depth: 100,
            fiber_pitch: 127_000,
        }
    }
}

impl Tech {
    /// Parses technology constants from a TOML document.
    ///
    /// Missing keys keep their default values.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_keep_defaults_for_missing_keys() {
        let tech = Tech::from_toml_str("bend_radius = 5000\nwg_width = 450\n").unwrap();
        assert_eq!(tech.bend_radius, 5_000);
        assert_eq!(tech.wg_width, 450);
        assert_eq!(tech.fiber_pitch, Tech::default().fiber_pitch);
    }

    #[test]
    fn unknown_keys_are_rejected_gracefully() {
        // serde's default behavior is to ignore unknown keys; a config
        // written for a newer PDK still loads.
        let tech = Tech::from_toml_str("not_a_knob = 1\n").unwrap();
        assert_eq!(tech, Tech::default());
    }
}
