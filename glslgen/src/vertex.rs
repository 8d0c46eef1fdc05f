//! Vertex shader preset generator
//!
//! Produces one complete vertex shader from a feature bitmask. Emission is
//! driven by an ordered table of steps; each step declares the feature
//! predicate it applies under, so individual steps can be unit tested without
//! generating a whole shader.

use tracing::debug;

use crate::GLSL_VERSION;
use crate::emitter::{GlslProfile, ShaderEmitter};
use crate::error::ShaderGenError;
use crate::features::{FEATURE_CAMERA, FEATURE_MODEL_TRANSFORM, FEATURE_NORMALS, validate_features};

/// One entry of the vertex emission table
struct VertexStep {
    applies: fn(u8) -> bool,
    emit: fn(&mut ShaderEmitter, u8) -> Result<(), ShaderGenError>,
}

/// Ordered emission steps; generation runs the applicable ones front to back
const VERTEX_STEPS: &[VertexStep] = &[
    VertexStep {
        applies: always,
        emit: emit_position_io,
    },
    VertexStep {
        applies: always,
        emit: emit_texcoord_io,
    },
    VertexStep {
        applies: has_normals,
        emit: emit_normal_io,
    },
    VertexStep {
        applies: has_model_transform,
        emit: emit_model_uniform,
    },
    VertexStep {
        applies: has_camera,
        emit: emit_camera_uniforms,
    },
    VertexStep {
        applies: always,
        emit: emit_main,
    },
];

fn always(_features: u8) -> bool {
    true
}

fn has_normals(features: u8) -> bool {
    features & FEATURE_NORMALS != 0
}

fn has_camera(features: u8) -> bool {
    features & FEATURE_CAMERA != 0
}

fn has_model_transform(features: u8) -> bool {
    features & FEATURE_MODEL_TRANSFORM != 0
}

fn emit_position_io(glsl: &mut ShaderEmitter, _features: u8) -> Result<(), ShaderGenError> {
    glsl.declare_layout(0, "in", "vec3", "vPos");
    glsl.declare_qualified("out", "vec4", "worldPos");
    glsl.blank_line();
    Ok(())
}

fn emit_texcoord_io(glsl: &mut ShaderEmitter, _features: u8) -> Result<(), ShaderGenError> {
    glsl.declare_layout(1, "in", "vec2", "vTexCoords");
    glsl.declare_qualified("out", "vec2", "texCoords");
    glsl.blank_line();
    Ok(())
}

fn emit_normal_io(glsl: &mut ShaderEmitter, _features: u8) -> Result<(), ShaderGenError> {
    glsl.declare_layout(2, "in", "vec3", "vNormal");
    glsl.declare_qualified("out", "vec3", "normal");
    glsl.blank_line();
    Ok(())
}

fn emit_model_uniform(glsl: &mut ShaderEmitter, _features: u8) -> Result<(), ShaderGenError> {
    glsl.declare_qualified("uniform", "mat4", "transform");
    Ok(())
}

fn emit_camera_uniforms(glsl: &mut ShaderEmitter, _features: u8) -> Result<(), ShaderGenError> {
    glsl.declare_qualified("uniform", "mat4", "view");
    glsl.declare_qualified("uniform", "mat4", "proj");
    Ok(())
}

fn emit_main(glsl: &mut ShaderEmitter, features: u8) -> Result<(), ShaderGenError> {
    glsl.blank_line();
    glsl.open_main();

    let world = if has_model_transform(features) {
        "transform * vec4(vPos, 1.0)"
    } else {
        "vec4(vPos, 1.0)"
    };
    glsl.add_code(&format!("worldPos = {world};"));

    let clip = if has_camera(features) {
        "proj * view * worldPos"
    } else {
        "worldPos"
    };
    glsl.add_code(&format!("gl_Position = {clip};"));

    glsl.add_code("texCoords = vTexCoords;");
    if has_normals(features) {
        glsl.add_code("normal = vNormal;");
    }
    glsl.close_scope()
}

/// Generates one complete vertex shader for the given feature bitmask
///
/// # Errors
///
/// Returns [`ShaderGenError::InvalidConfiguration`] if `features` has bits
/// outside [`FEATURE_ALL`](crate::features::FEATURE_ALL); nothing is emitted
/// in that case.
pub fn generate_vertex_shader(features: u8) -> Result<String, ShaderGenError> {
    validate_features(features)?;

    let mut glsl = ShaderEmitter::with_version(GLSL_VERSION, GlslProfile::Core);
    for step in VERTEX_STEPS {
        if (step.applies)(features) {
            (step.emit)(&mut glsl, features)?;
        }
    }
    debug_assert_eq!(glsl.depth(), 0);

    debug!(features, "generated vertex shader");
    Ok(glsl.build())
}
