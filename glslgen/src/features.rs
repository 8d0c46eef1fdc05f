//! Vertex shader feature flags
//!
//! A vertex preset is selected by a `u8` bitmask. Presence of a bit alone
//! drives emission; there is no interaction between flags beyond union, and
//! the bitmask representation makes the flag set unordered by construction.

use crate::error::ShaderGenError;

/// Vertex feature flag: take normals from `layout (location = 2)` and pass them through
pub const FEATURE_NORMALS: u8 = 1;
/// Vertex feature flag: use camera `view` and `proj` matrix uniforms
pub const FEATURE_CAMERA: u8 = 2;
/// Vertex feature flag: use a model `transform` matrix uniform
pub const FEATURE_MODEL_TRANSFORM: u8 = 4;
/// All vertex feature flags combined
pub const FEATURE_ALL: u8 = FEATURE_NORMALS | FEATURE_CAMERA | FEATURE_MODEL_TRANSFORM;

/// Rejects bitmasks with bits outside [`FEATURE_ALL`]
pub fn validate_features(features: u8) -> Result<(), ShaderGenError> {
    if features & !FEATURE_ALL != 0 {
        return Err(ShaderGenError::InvalidConfiguration {
            value: features,
            expected: "vertex feature bitmask",
        });
    }
    Ok(())
}

/// All valid feature bitmasks, for exhaustive iteration in tests and tooling
pub fn valid_feature_sets() -> Vec<u8> {
    (0..=FEATURE_ALL).collect()
}

/// Human-readable names of the set feature flags
pub fn feature_names(features: u8) -> Vec<&'static str> {
    let mut names = Vec::new();
    if features & FEATURE_NORMALS != 0 {
        names.push("normals");
    }
    if features & FEATURE_CAMERA != 0 {
        names.push("camera");
    }
    if features & FEATURE_MODEL_TRANSFORM != 0 {
        names.push("model-transform");
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subset_of_feature_all_is_valid() {
        for features in valid_feature_sets() {
            assert!(validate_features(features).is_ok());
        }
        assert_eq!(valid_feature_sets().len(), 8);
    }

    #[test]
    fn unknown_bits_are_rejected() {
        for features in [8u8, 16, 0x80, 0xFF, FEATURE_ALL | 8] {
            assert_eq!(
                validate_features(features),
                Err(ShaderGenError::InvalidConfiguration {
                    value: features,
                    expected: "vertex feature bitmask",
                })
            );
        }
    }

    #[test]
    fn feature_names_reflect_set_bits() {
        assert!(feature_names(0).is_empty());
        assert_eq!(feature_names(FEATURE_CAMERA), vec!["camera"]);
        assert_eq!(
            feature_names(FEATURE_ALL),
            vec!["normals", "camera", "model-transform"]
        );
    }
}
