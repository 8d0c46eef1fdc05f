//! Fragment shader kinds
//!
//! The closed set of fragment presets, with the derived lighting predicates
//! the generator branches on. Predicates are pure functions of the kind and
//! are never stored separately.

use crate::error::ShaderGenError;

/// Closed set of fragment shader presets
///
/// Raw values are stable (1 through 5) so hosts can select a kind from
/// configuration data; [`ShaderKind::from_raw`] rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    /// Plain diffuse texture sample, no lighting (binds `tex`)
    SimpleTextured = 1,
    /// Diffuse texture with ambient and directional diffuse lighting
    SimpleDirectional = 2,
    /// Diffuse texture with directional and attenuated point lights
    SimpleWorld = 3,
    /// Material (diffuse/specular/shininess) with directional Phong lighting
    SpecularDirectional = 4,
    /// Material with directional and attenuated point Phong lighting
    SpecularWorld = 5,
}

impl ShaderKind {
    /// Every kind, in raw-value order
    pub const ALL: [ShaderKind; 5] = [
        ShaderKind::SimpleTextured,
        ShaderKind::SimpleDirectional,
        ShaderKind::SimpleWorld,
        ShaderKind::SpecularDirectional,
        ShaderKind::SpecularWorld,
    ];

    /// Selects a kind from its stable raw value
    pub fn from_raw(raw: u8) -> Result<Self, ShaderGenError> {
        match raw {
            1 => Ok(ShaderKind::SimpleTextured),
            2 => Ok(ShaderKind::SimpleDirectional),
            3 => Ok(ShaderKind::SimpleWorld),
            4 => Ok(ShaderKind::SpecularDirectional),
            5 => Ok(ShaderKind::SpecularWorld),
            _ => Err(ShaderGenError::InvalidConfiguration {
                value: raw,
                expected: "shader kind",
            }),
        }
    }

    /// Stable raw value of this kind
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Short stable name, usable as a file stem
    pub const fn name(self) -> &'static str {
        match self {
            ShaderKind::SimpleTextured => "simple_textured",
            ShaderKind::SimpleDirectional => "simple_directional",
            ShaderKind::SimpleWorld => "simple_world",
            ShaderKind::SpecularDirectional => "specular_directional",
            ShaderKind::SpecularWorld => "specular_world",
        }
    }

    /// Diffuse-only lighting against a plain texture binding
    pub const fn simple_light(self) -> bool {
        matches!(self, ShaderKind::SimpleDirectional | ShaderKind::SimpleWorld)
    }

    /// Phong lighting against a material binding
    pub const fn specular_light(self) -> bool {
        matches!(
            self,
            ShaderKind::SpecularDirectional | ShaderKind::SpecularWorld
        )
    }

    /// Any lighting at all
    pub const fn any_light(self) -> bool {
        self.simple_light() || self.specular_light()
    }

    /// Attenuated point lights in addition to the directional light
    pub const fn world_light(self) -> bool {
        matches!(self, ShaderKind::SimpleWorld | ShaderKind::SpecularWorld)
    }
}
