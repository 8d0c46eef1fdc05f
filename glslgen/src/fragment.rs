//! Fragment shader preset generator
//!
//! Produces one complete fragment shader for a [`ShaderKind`]: struct
//! declarations, uniforms, lighting functions, and the main body. Emission is
//! driven by an ordered table of steps gated on the kind's derived lighting
//! predicates, so each step can be unit tested in isolation.
//!
//! The lighting model is fixed:
//! - a diffuse sample with exactly-zero alpha discards the fragment before
//!   any shading, letting texture alpha define silhouette cut-outs
//! - directional diffuse factor `max(dot(-normalize(dir), normal), 0.0)`
//! - Phong specular factor `pow(max(dot(viewDir, reflect), 0.0), shininess)`
//!   for the specular kinds
//! - point-light falloff `1 / (1 + linear*d + quadratic*d*d)` applied to
//!   every color contribution of that light, accumulated over
//!   `min(NUM_POINT_LIGHTS, pointLightsUsed)` lights

use tracing::debug;

use crate::GLSL_VERSION;
use crate::emitter::{GlslProfile, ShaderEmitter};
use crate::error::ShaderGenError;
use crate::kind::ShaderKind;

/// Fixed capacity of the point-light uniform array
pub const POINT_LIGHT_CAPACITY: u32 = 12;

/// One entry of the fragment emission table
struct FragmentStep {
    applies: fn(ShaderKind) -> bool,
    emit: fn(&mut ShaderEmitter, ShaderKind) -> Result<(), ShaderGenError>,
}

/// Ordered emission steps; generation runs the applicable ones front to back
const FRAGMENT_STEPS: &[FragmentStep] = &[
    FragmentStep {
        applies: world_light,
        emit: emit_point_light_capacity,
    },
    FragmentStep {
        applies: always,
        emit: emit_header_break,
    },
    FragmentStep {
        applies: specular_light,
        emit: emit_material_struct,
    },
    FragmentStep {
        applies: any_light,
        emit: emit_directional_light_struct,
    },
    FragmentStep {
        applies: world_light,
        emit: emit_point_light_struct,
    },
    FragmentStep {
        applies: always,
        emit: emit_interface,
    },
    FragmentStep {
        applies: always,
        emit: emit_uniforms,
    },
    FragmentStep {
        applies: simple_light,
        emit: emit_simple_directional_fn,
    },
    FragmentStep {
        applies: simple_world,
        emit: emit_simple_point_fns,
    },
    FragmentStep {
        applies: specular_light,
        emit: emit_specular_directional_fn,
    },
    FragmentStep {
        applies: specular_world,
        emit: emit_specular_point_fns,
    },
    FragmentStep {
        applies: always,
        emit: emit_main,
    },
];

fn always(_kind: ShaderKind) -> bool {
    true
}

fn any_light(kind: ShaderKind) -> bool {
    kind.any_light()
}

fn simple_light(kind: ShaderKind) -> bool {
    kind.simple_light()
}

fn specular_light(kind: ShaderKind) -> bool {
    kind.specular_light()
}

fn world_light(kind: ShaderKind) -> bool {
    kind.world_light()
}

fn simple_world(kind: ShaderKind) -> bool {
    kind.simple_light() && kind.world_light()
}

fn specular_world(kind: ShaderKind) -> bool {
    kind.specular_light() && kind.world_light()
}

// ============================================================================
// Declarations
// ============================================================================

fn emit_point_light_capacity(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.add_directive(&format!("define NUM_POINT_LIGHTS {POINT_LIGHT_CAPACITY}"));
    Ok(())
}

fn emit_header_break(glsl: &mut ShaderEmitter, _kind: ShaderKind) -> Result<(), ShaderGenError> {
    glsl.blank_line();
    Ok(())
}

fn emit_material_struct(glsl: &mut ShaderEmitter, _kind: ShaderKind) -> Result<(), ShaderGenError> {
    glsl.open_struct("Material");
    glsl.declare_var("sampler2D", "diffuse");
    glsl.declare_var("sampler2D", "specular");
    glsl.declare_var("int", "shininess");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_directional_light_struct(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.open_struct("DirectionalLight");
    glsl.declare_var("vec3", "direction");
    glsl.declare_var("vec4", "color");
    glsl.declare_var("float", "intensity");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_point_light_struct(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.open_struct("PointLight");
    glsl.declare_var("vec3", "position");
    glsl.declare_var("vec4", "color");
    glsl.declare_var("float", "intensity");
    glsl.declare_var("float", "falloffLinear");
    glsl.declare_var("float", "falloffQuadratic");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_interface(glsl: &mut ShaderEmitter, kind: ShaderKind) -> Result<(), ShaderGenError> {
    glsl.declare_qualified("in", "vec4", "worldPos");
    glsl.declare_qualified("in", "vec2", "texCoords");
    if kind.any_light() {
        glsl.declare_qualified("in", "vec3", "normal");
    }
    glsl.blank_line();
    glsl.declare_qualified("out", "vec4", "FragColor");
    glsl.blank_line();
    Ok(())
}

fn emit_uniforms(glsl: &mut ShaderEmitter, kind: ShaderKind) -> Result<(), ShaderGenError> {
    if kind.specular_light() {
        glsl.declare_qualified("uniform", "Material", "material");
    } else {
        glsl.declare_qualified("uniform", "sampler2D", "tex");
    }
    if kind.any_light() {
        glsl.declare_qualified("uniform", "DirectionalLight", "directionalLight");
        glsl.declare_qualified("uniform", "vec4", "ambientLight");
    }
    if kind.world_light() {
        glsl.declare_qualified("uniform", "PointLight", "pointLight[NUM_POINT_LIGHTS]");
        glsl.declare_qualified("uniform", "int", "pointLightsUsed");
    }
    glsl.declare_qualified("uniform", "vec3", "camPos");
    glsl.blank_line();
    Ok(())
}

// ============================================================================
// Lighting functions
// ============================================================================

/// Sample the diffuse texture into `diffuseTexture` and discard on exact-zero
/// alpha, before any shading contribution
fn emit_alpha_cutoff(glsl: &mut ShaderEmitter, sampler: &str) -> Result<(), ShaderGenError> {
    glsl.comment("Exact-zero alpha cuts the silhouette out, skip all shading");
    glsl.declare_init("vec4", "diffuseTexture", &format!("texture({sampler}, uv)"));
    glsl.open_if("diffuseTexture.a == 0.0");
    glsl.statement("discard");
    glsl.close_if(false)
}

fn emit_simple_directional_fn(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.comment("Ambient plus directional diffuse against the diffuse texture");
    glsl.open_function(
        "vec4",
        "calculateDirectionalLight",
        "DirectionalLight dirLight, vec4 ambient, sampler2D diffuseTex, vec2 uv, vec3 normal",
    );
    emit_alpha_cutoff(glsl, "diffuseTex")?;
    glsl.blank_line();
    glsl.comment("Diffuse factor, zero for back-facing surfaces");
    glsl.declare_init("vec3", "nLightDir", "normalize(dirLight.direction)");
    glsl.declare_init("float", "diffuseValue", "max(dot(-nLightDir, normal), 0.0)");
    glsl.blank_line();
    glsl.declare_init("vec4", "ambientColor", "ambient * diffuseTexture");
    glsl.declare_init(
        "vec4",
        "directionalColor",
        "dirLight.color * diffuseValue * diffuseTexture",
    );
    glsl.statement_with("return", "ambientColor + directionalColor");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_simple_point_fns(glsl: &mut ShaderEmitter, _kind: ShaderKind) -> Result<(), ShaderGenError> {
    glsl.comment("Point light contribution with distance falloff");
    glsl.open_function(
        "vec4",
        "calculatePointLight",
        "PointLight light, sampler2D diffuseTex, vec2 uv, vec4 pos, vec3 normal",
    );
    emit_alpha_cutoff(glsl, "diffuseTex")?;
    glsl.blank_line();
    glsl.declare_init("vec3", "lightDir", "normalize(pos.xyz - light.position)");
    glsl.declare_init("float", "diffuseValue", "max(dot(-lightDir, normal), 0.0)");
    glsl.blank_line();
    emit_falloff(glsl)?;
    glsl.blank_line();
    glsl.declare_init("vec4", "ambientColor", "light.color * diffuseTexture * falloff");
    glsl.declare_init(
        "vec4",
        "diffuseColor",
        "light.color * diffuseValue * diffuseTexture * falloff",
    );
    glsl.statement_with("return", "ambientColor + diffuseColor");
    glsl.close_scope()?;
    glsl.blank_line();

    glsl.comment("Directional light plus every active point light");
    glsl.open_function(
        "vec4",
        "calculateLight",
        "DirectionalLight dirLight, PointLight lights[NUM_POINT_LIGHTS], vec4 ambient, \
         sampler2D diffuseTex, vec2 uv, vec4 pos, vec3 normal",
    );
    glsl.declare_init(
        "vec4",
        "color",
        "calculateDirectionalLight(dirLight, ambient, diffuseTex, uv, normal)",
    );
    glsl.open_for("int i = 0; i < min(NUM_POINT_LIGHTS, pointLightsUsed); i++");
    glsl.add_code("color += calculatePointLight(lights[i], diffuseTex, uv, pos, normal);");
    glsl.close_scope()?;
    glsl.statement_with("return", "color");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_specular_directional_fn(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.comment("Ambient plus directional diffuse and Phong specular against the material");
    glsl.open_function(
        "vec4",
        "calculateDirectionalLight",
        "DirectionalLight dirLight, vec4 ambient, Material material, vec2 uv, vec3 normal, \
         vec3 viewDir",
    );
    emit_alpha_cutoff(glsl, "material.diffuse")?;
    glsl.declare_init("vec4", "specularTexture", "texture(material.specular, uv)");
    glsl.blank_line();
    glsl.comment("Diffuse factor, zero for back-facing surfaces");
    glsl.declare_init("vec3", "nLightDir", "normalize(dirLight.direction)");
    glsl.declare_init("float", "diffuseValue", "max(dot(-nLightDir, normal), 0.0)");
    glsl.comment("Phong specular factor");
    glsl.declare_init("vec3", "reflectDir", "reflect(nLightDir, normal)");
    glsl.declare_init(
        "float",
        "specularValue",
        "pow(max(dot(viewDir, reflectDir), 0.0), material.shininess)",
    );
    glsl.blank_line();
    glsl.declare_init("vec4", "ambientColor", "ambient * diffuseTexture");
    glsl.declare_init(
        "vec4",
        "directionalColor",
        "dirLight.color * diffuseValue * diffuseTexture",
    );
    glsl.declare_init(
        "vec4",
        "specularColor",
        "dirLight.color * specularValue * specularTexture",
    );
    glsl.statement_with("return", "ambientColor + directionalColor + specularColor");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

fn emit_specular_point_fns(
    glsl: &mut ShaderEmitter,
    _kind: ShaderKind,
) -> Result<(), ShaderGenError> {
    glsl.comment("Point light contribution with distance falloff and Phong specular");
    glsl.open_function(
        "vec4",
        "calculatePointLight",
        "PointLight light, Material material, vec2 uv, vec4 pos, vec3 normal, vec3 viewDir",
    );
    emit_alpha_cutoff(glsl, "material.diffuse")?;
    glsl.declare_init("vec4", "specularTexture", "texture(material.specular, uv)");
    glsl.blank_line();
    glsl.declare_init("vec3", "lightDir", "normalize(pos.xyz - light.position)");
    glsl.declare_init("float", "diffuseValue", "max(dot(-lightDir, normal), 0.0)");
    glsl.declare_init("vec3", "reflectDir", "reflect(lightDir, normal)");
    glsl.declare_init(
        "float",
        "specularValue",
        "pow(max(dot(viewDir, reflectDir), 0.0), material.shininess)",
    );
    glsl.blank_line();
    emit_falloff(glsl)?;
    glsl.blank_line();
    glsl.declare_init("vec4", "ambientColor", "light.color * diffuseTexture * falloff");
    glsl.declare_init(
        "vec4",
        "diffuseColor",
        "light.color * diffuseValue * diffuseTexture * falloff",
    );
    glsl.declare_init(
        "vec4",
        "specularColor",
        "light.color * specularValue * specularTexture * falloff",
    );
    glsl.statement_with("return", "ambientColor + diffuseColor + specularColor");
    glsl.close_scope()?;
    glsl.blank_line();

    glsl.comment("Directional light plus every active point light");
    glsl.open_function(
        "vec4",
        "calculateLight",
        "DirectionalLight dirLight, PointLight lights[NUM_POINT_LIGHTS], vec4 ambient, \
         Material material, vec2 uv, vec4 pos, vec3 normal, vec3 viewDir",
    );
    glsl.declare_init(
        "vec4",
        "color",
        "calculateDirectionalLight(dirLight, ambient, material, uv, normal, viewDir)",
    );
    glsl.open_for("int i = 0; i < min(NUM_POINT_LIGHTS, pointLightsUsed); i++");
    glsl.add_code("color += calculatePointLight(lights[i], material, uv, pos, normal, viewDir);");
    glsl.close_scope()?;
    glsl.statement_with("return", "color");
    glsl.close_scope()?;
    glsl.blank_line();
    Ok(())
}

/// Distance falloff shared by every point-light contribution
fn emit_falloff(glsl: &mut ShaderEmitter) -> Result<(), ShaderGenError> {
    glsl.comment("Attenuation over distance");
    glsl.declare_init("float", "distance", "length(light.position - pos.xyz)");
    glsl.declare_init(
        "float",
        "falloff",
        "1.0 / (1.0 + light.falloffLinear * distance + light.falloffQuadratic * (distance * distance))",
    );
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn emit_main(glsl: &mut ShaderEmitter, kind: ShaderKind) -> Result<(), ShaderGenError> {
    glsl.open_main();

    if kind.simple_light() {
        let call = if kind.world_light() {
            "calculateLight(directionalLight, pointLight, ambientLight, tex, texCoords, \
             worldPos, normalize(normal))"
        } else {
            "calculateDirectionalLight(directionalLight, ambientLight, tex, texCoords, \
             normalize(normal))"
        };
        glsl.declare_init("vec4", "fCol", call);
    } else if kind.specular_light() {
        let call = if kind.world_light() {
            "calculateLight(directionalLight, pointLight, ambientLight, material, texCoords, \
             worldPos, normalize(normal), normalize(camPos - worldPos.xyz))"
        } else {
            "calculateDirectionalLight(directionalLight, ambientLight, material, texCoords, \
             normalize(normal), normalize(camPos - worldPos.xyz))"
        };
        glsl.declare_init("vec4", "fCol", call);
    } else {
        glsl.declare_init("vec4", "fCol", "texture(tex, texCoords)");
        glsl.open_if("fCol.a == 0.0");
        glsl.statement("discard");
        glsl.close_if(false)?;
    }

    glsl.add_code("FragColor = fCol;");
    glsl.close_scope()
}

/// Generates one complete fragment shader for the given kind
pub fn generate_fragment_shader(kind: ShaderKind) -> Result<String, ShaderGenError> {
    let mut glsl = ShaderEmitter::with_version(GLSL_VERSION, GlslProfile::Core);
    for step in FRAGMENT_STEPS {
        if (step.applies)(kind) {
            (step.emit)(&mut glsl, kind)?;
        }
    }
    debug_assert_eq!(glsl.depth(), 0);

    debug!(kind = kind.name(), "generated fragment shader");
    Ok(glsl.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_struct_step_output() {
        let mut glsl = ShaderEmitter::new();
        emit_material_struct(&mut glsl, ShaderKind::SpecularDirectional).unwrap();
        assert_eq!(
            glsl.build(),
            "struct Material {\n\tsampler2D diffuse;\n\tsampler2D specular;\n\tint shininess;\n};\n\n"
        );
    }

    #[test]
    fn alpha_cutoff_discards_before_shading() {
        let mut glsl = ShaderEmitter::new();
        emit_alpha_cutoff(&mut glsl, "diffuseTex").unwrap();
        let source = glsl.build();
        let sample = source.find("texture(diffuseTex, uv)").unwrap();
        let discard = source.find("discard;").unwrap();
        assert!(sample < discard);
        assert!(source.contains("if (diffuseTexture.a == 0.0) {"));
    }

    #[test]
    fn falloff_formula_is_fixed() {
        let mut glsl = ShaderEmitter::new();
        emit_falloff(&mut glsl).unwrap();
        assert!(glsl.build().contains(
            "float falloff = 1.0 / (1.0 + light.falloffLinear * distance + \
             light.falloffQuadratic * (distance * distance));"
        ));
    }

    #[test]
    fn directional_diffuse_factor_is_fixed() {
        for kind in [ShaderKind::SimpleDirectional, ShaderKind::SpecularDirectional] {
            let source = generate_fragment_shader(kind).unwrap();
            assert!(source.contains("vec3 nLightDir = normalize(dirLight.direction);"));
            assert!(source.contains("float diffuseValue = max(dot(-nLightDir, normal), 0.0);"));
        }
    }

    #[test]
    fn specular_factor_uses_phong_reflection() {
        for kind in [ShaderKind::SpecularDirectional, ShaderKind::SpecularWorld] {
            let source = generate_fragment_shader(kind).unwrap();
            assert!(
                source
                    .contains("pow(max(dot(viewDir, reflectDir), 0.0), material.shininess)")
            );
        }
    }

    #[test]
    fn lit_kinds_pass_the_ambient_uniform() {
        for kind in ShaderKind::ALL {
            let source = generate_fragment_shader(kind).unwrap();
            if kind.any_light() {
                assert!(source.contains("uniform vec4 ambientLight;"));
                assert!(source.contains("ambientLight,"), "{kind:?}");
            } else {
                assert!(!source.contains("ambientLight"));
            }
        }
    }

    #[test]
    fn world_kinds_loop_over_active_point_lights() {
        for kind in [ShaderKind::SimpleWorld, ShaderKind::SpecularWorld] {
            let source = generate_fragment_shader(kind).unwrap();
            assert!(
                source
                    .contains("for (int i = 0; i < min(NUM_POINT_LIGHTS, pointLightsUsed); i++)")
            );
            // Never an unconditional full-capacity loop
            assert!(!source.contains("i < NUM_POINT_LIGHTS;"));
        }
    }

    #[test]
    fn specular_kinds_bind_a_material_instead_of_a_plain_sampler() {
        for kind in ShaderKind::ALL {
            let source = generate_fragment_shader(kind).unwrap();
            if kind.specular_light() {
                assert!(source.contains("uniform Material material;"));
                assert!(!source.contains("uniform sampler2D tex;"));
            } else {
                assert!(source.contains("uniform sampler2D tex;"));
                assert!(!source.contains("uniform Material material;"));
            }
        }
    }

    #[test]
    fn every_kind_writes_frag_color_and_cam_pos() {
        for kind in ShaderKind::ALL {
            let source = generate_fragment_shader(kind).unwrap();
            assert!(source.contains("out vec4 FragColor;"));
            assert!(source.contains("FragColor = fCol;"));
            assert!(source.contains("uniform vec3 camPos;"));
        }
    }
}
