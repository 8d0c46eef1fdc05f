//! GLSL shader source generation
//!
//! A small code-generation engine that assembles GLSL source text with
//! correct scoping and indentation, plus preset generators that produce
//! complete vertex and fragment shader sources for textured,
//! directionally-lit, specularly-lit, and multi-point-lit surfaces.
//!
//! # Modules
//!
//! - [`emitter`] - low-level text emitter with scope tracking
//! - [`features`] - vertex shader feature flags
//! - [`kind`] - closed fragment shader kind enumeration
//! - [`vertex`] - vertex shader preset generator
//! - [`fragment`] - fragment shader preset generator
//!
//! Shader compilation and linking belong to the host graphics binding; this
//! crate only produces source strings. Generated shaders expose a fixed
//! uniform-name contract (`transform`, `view`, `proj`, `camPos`, `tex`,
//! `material.*`, `directionalLight.*`, `ambientLight`, `pointLight[i].*`,
//! `pointLightsUsed`) so light/material/camera collaborators can bind by a
//! single stable name set regardless of which preset was generated.

pub mod emitter;
pub mod error;
pub mod features;
pub mod fragment;
pub mod kind;
pub mod vertex;

pub use emitter::{GlslProfile, ScopeKind, ShaderEmitter};
pub use error::ShaderGenError;
pub use features::{
    FEATURE_ALL, FEATURE_CAMERA, FEATURE_MODEL_TRANSFORM, FEATURE_NORMALS, feature_names,
    valid_feature_sets,
};
pub use fragment::{POINT_LIGHT_CAPACITY, generate_fragment_shader};
pub use kind::ShaderKind;
pub use vertex::generate_vertex_shader;

/// GLSL version emitted by the preset generators
pub const GLSL_VERSION: u32 = 330;

#[cfg(test)]
mod tests;
