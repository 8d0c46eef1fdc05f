//! Crate-level properties of the generated shaders

use crate::features::valid_feature_sets;
use crate::fragment::generate_fragment_shader;
use crate::kind::ShaderKind;
use crate::vertex::generate_vertex_shader;

fn assert_brace_balanced(source: &str) {
    let opens = source.matches('{').count();
    let closes = source.matches('}').count();
    assert_eq!(opens, closes, "unbalanced braces in:\n{source}");
}

/// Parse generated GLSL with naga's GLSL front end
///
/// naga's GLSL parser rejects `#version 330`, so the version line is bumped
/// to 450 for parsing only; everything after the directive is unchanged.
fn parse_glsl(source: &str, stage: naga::ShaderStage) {
    let source = source.replacen("#version 330 core", "#version 450 core", 1);
    assert!(source.starts_with("#version 450 core\n"));
    let mut frontend = naga::front::glsl::Frontend::default();
    let options = naga::front::glsl::Options::from(stage);
    frontend
        .parse(&options, &source)
        .unwrap_or_else(|e| panic!("GLSL parse error: {e:?}\nin:\n{source}"));
}

#[test]
fn every_vertex_preset_is_brace_balanced() {
    for features in valid_feature_sets() {
        assert_brace_balanced(&generate_vertex_shader(features).unwrap());
    }
}

#[test]
fn every_fragment_preset_is_brace_balanced() {
    for kind in ShaderKind::ALL {
        assert_brace_balanced(&generate_fragment_shader(kind).unwrap());
    }
}

#[test]
fn generation_is_deterministic() {
    for features in valid_feature_sets() {
        assert_eq!(
            generate_vertex_shader(features).unwrap(),
            generate_vertex_shader(features).unwrap()
        );
    }
    for kind in ShaderKind::ALL {
        assert_eq!(
            generate_fragment_shader(kind).unwrap(),
            generate_fragment_shader(kind).unwrap()
        );
    }
}

#[test]
fn every_preset_opens_with_the_version_directive() {
    for features in valid_feature_sets() {
        assert!(
            generate_vertex_shader(features)
                .unwrap()
                .starts_with("#version 330 core\n")
        );
    }
    for kind in ShaderKind::ALL {
        let source = generate_fragment_shader(kind).unwrap();
        if kind.world_light() {
            // The point-light capacity directive follows the version line
            assert!(source.starts_with("#version 330 core\n#define NUM_POINT_LIGHTS 12\n"));
        } else {
            assert!(source.starts_with("#version 330 core\n"));
        }
    }
}

#[test]
fn struct_sets_match_the_kind_table() {
    for kind in ShaderKind::ALL {
        let source = generate_fragment_shader(kind).unwrap();
        assert_eq!(
            source.contains("struct Material {"),
            kind.specular_light(),
            "{kind:?}"
        );
        assert_eq!(
            source.contains("struct DirectionalLight {"),
            kind.any_light(),
            "{kind:?}"
        );
        assert_eq!(
            source.contains("struct PointLight {"),
            kind.world_light(),
            "{kind:?}"
        );
        assert_eq!(
            source.contains("#define NUM_POINT_LIGHTS 12"),
            kind.world_light(),
            "{kind:?}"
        );
        assert_eq!(
            source.contains("uniform PointLight pointLight[NUM_POINT_LIGHTS];"),
            kind.world_light(),
            "{kind:?}"
        );
        assert_eq!(
            source.contains("uniform int pointLightsUsed;"),
            kind.world_light(),
            "{kind:?}"
        );
    }
}

#[test]
fn simple_textured_discards_on_exact_zero_alpha() {
    let source = generate_fragment_shader(ShaderKind::SimpleTextured).unwrap();
    assert!(source.contains("vec4 fCol = texture(tex, texCoords);"));
    assert!(source.contains("if (fCol.a == 0.0) {"));
    assert!(source.contains("discard;"));
    // No lighting machinery at all
    assert!(!source.contains("struct"));
    assert!(!source.contains("calculate"));
}

#[test]
fn uniform_name_contract_is_stable() {
    let specular_world = generate_fragment_shader(ShaderKind::SpecularWorld).unwrap();
    for needle in [
        "uniform Material material;",
        "uniform DirectionalLight directionalLight;",
        "uniform vec4 ambientLight;",
        "uniform PointLight pointLight[NUM_POINT_LIGHTS];",
        "uniform int pointLightsUsed;",
        "uniform vec3 camPos;",
        "material.diffuse",
        "material.specular",
        "material.shininess",
        "falloffLinear",
        "falloffQuadratic",
    ] {
        assert!(specular_world.contains(needle), "missing {needle}");
    }

    let vertex = generate_vertex_shader(crate::FEATURE_ALL).unwrap();
    for needle in [
        "uniform mat4 transform;",
        "uniform mat4 view;",
        "uniform mat4 proj;",
    ] {
        assert!(vertex.contains(needle), "missing {needle}");
    }
}

#[test]
fn every_vertex_preset_parses_under_naga() {
    for features in valid_feature_sets() {
        let source = generate_vertex_shader(features).unwrap();
        parse_glsl(&source, naga::ShaderStage::Vertex);
    }
}

#[test]
fn simple_textured_fragment_parses_under_naga() {
    let source = generate_fragment_shader(ShaderKind::SimpleTextured).unwrap();
    parse_glsl(&source, naga::ShaderStage::Fragment);
}
