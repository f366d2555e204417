/// Vertex shader for foliage point sprites
pub const FOLIAGE_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in float a_size;
layout(location = 2) in float a_alpha;
layout(location = 3) in vec3 a_color;

uniform mat4 u_world;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;

out float v_alpha;
out vec3 v_color;

void main() {
    // Gentle shimmer so the cloud never looks frozen
    float shimmer = sin(u_time * 2.0 + a_position.x * 8.0 + a_position.y * 5.0) * 0.15 + 0.85;
    v_alpha = a_alpha * shimmer;
    v_color = a_color;

    vec4 view_pos = u_view * u_world * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = a_size * (100.0 / -view_pos.z);
}
"#;

/// Fragment shader for foliage point sprites
pub const FOLIAGE_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in float v_alpha;
in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    float dist = length(coord);

    if (dist > 0.5) {
        discard;
    }

    float alpha = v_alpha * (1.0 - dist * 2.0);
    alpha = alpha * alpha;

    // Warm gold rim where the sprite fades out
    vec3 rim = vec3(1.0, 0.84, 0.0) * smoothstep(0.25, 0.5, dist) * 0.3;
    vec3 color = v_color + rim;

    fragColor = vec4(color * (1.0 + alpha), alpha);
}
"#;

/// Vertex shader for instanced ornaments. The model matrix and color
/// arrive as per-instance attributes.
pub const DECOR_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;
layout(location = 3) in vec3 a_color;
layout(location = 4) in vec4 a_model_0;
layout(location = 5) in vec4 a_model_1;
layout(location = 6) in vec4 a_model_2;
layout(location = 7) in vec4 a_model_3;

uniform mat4 u_world;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;
out vec3 v_color;

void main() {
    mat4 model = mat4(a_model_0, a_model_1, a_model_2, a_model_3);
    vec4 world_pos = u_world * model * vec4(a_position, 1.0);

    v_world_position = world_pos.xyz;
    v_normal = mat3(model) * a_normal;
    v_color = a_color;

    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for instanced ornaments: gold key light, rose fill,
/// emerald ambient. Emissive layers add their color after the tone map
/// so the bloom pass can catch them.
pub const DECOR_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;
in vec3 v_color;

uniform vec3 u_camera_pos;
uniform float u_emissive;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    vec3 key_dir = normalize(vec3(5.0, 10.0, 7.0));
    vec3 key_color = vec3(1.0, 0.85, 0.6);
    float key = max(dot(normal, key_dir), 0.0);

    vec3 fill_dir = normalize(vec3(-4.0, 2.0, -6.0));
    vec3 fill_color = vec3(0.72, 0.43, 0.47);
    float fill = max(dot(normal, fill_dir), 0.0);

    vec3 ambient = vec3(0.05, 0.15, 0.10);

    vec3 half_dir = normalize(key_dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), 32.0);

    vec3 lit = v_color * (ambient + key_color * key + fill_color * fill * 0.5)
        + key_color * spec * 0.4;
    lit = lit / (lit + vec3(1.0));

    vec3 color = lit + v_color * u_emissive;

    fragColor = vec4(color, 1.0);
}
"#;

/// Vertex shader for polaroid cards, drawn one at a time
pub const CARD_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in vec2 a_uv;

uniform mat4 u_model;
uniform mat4 u_world;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_normal;
out vec3 v_world_position;

void main() {
    vec4 world_pos = u_world * u_model * vec4(a_position, 1.0);
    v_world_position = world_pos.xyz;
    v_normal = mat3(u_model) * a_normal;
    gl_Position = u_projection * u_view * world_pos;
}
"#;

/// Fragment shader for polaroid cards: flat color under the same
/// three lights, shaded on both faces since cards tumble freely.
pub const CARD_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world_position;

uniform vec3 u_color;

out vec4 fragColor;

void main() {
    vec3 normal = normalize(v_normal);
    if (!gl_FrontFacing) {
        normal = -normal;
    }

    vec3 key_dir = normalize(vec3(5.0, 10.0, 7.0));
    float key = max(dot(normal, key_dir), 0.0);

    vec3 fill_dir = normalize(vec3(-4.0, 2.0, -6.0));
    float fill = max(dot(normal, fill_dir), 0.0);

    vec3 ambient = vec3(0.10, 0.12, 0.10);

    vec3 lit = u_color * (ambient + vec3(1.0, 0.85, 0.6) * key + vec3(0.72, 0.43, 0.47) * fill * 0.4);
    lit = lit / (lit + vec3(1.0));

    fragColor = vec4(lit, 1.0);
}
"#;

/// Fullscreen quad vertex shader for post-processing
pub const FULLSCREEN_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

out vec2 v_uv;

void main() {
    // Fullscreen triangle
    float x = float((gl_VertexID & 1) << 2);
    float y = float((gl_VertexID & 2) << 1);
    v_uv = vec2(x * 0.5, y * 0.5);
    gl_Position = vec4(x - 1.0, y - 1.0, 0.0, 1.0);
}
"#;

/// Bloom extraction shader with a soft knee above the threshold
pub const BLOOM_EXTRACT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform float u_threshold;

out vec4 fragColor;

void main() {
    vec3 color = texture(u_texture, v_uv).rgb;
    float brightness = dot(color, vec3(0.2126, 0.7152, 0.0722));
    float knee = smoothstep(u_threshold, u_threshold + 0.5, brightness);
    fragColor = vec4(color * knee, 1.0);
}
"#;

/// Gaussian blur shader
pub const BLUR_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_texture;
uniform vec2 u_direction;

out vec4 fragColor;

void main() {
    vec2 tex_size = vec2(textureSize(u_texture, 0));
    vec2 texel = 1.0 / tex_size;

    // 9-tap Gaussian blur
    float weights[5] = float[](0.227027, 0.1945946, 0.1216216, 0.054054, 0.016216);

    vec3 result = texture(u_texture, v_uv).rgb * weights[0];

    for (int i = 1; i < 5; i++) {
        vec2 offset = u_direction * texel * float(i) * 2.0;
        result += texture(u_texture, v_uv + offset).rgb * weights[i];
        result += texture(u_texture, v_uv - offset).rgb * weights[i];
    }

    fragColor = vec4(result, 1.0);
}
"#;

/// Final composite shader: bloom, vignette, and a warm-gold grade over
/// deep-green shadows
pub const COMPOSITE_SHADER: &str = r#"#version 300 es
precision highp float;

in vec2 v_uv;

uniform sampler2D u_scene;
uniform sampler2D u_bloom;
uniform float u_bloom_strength;
uniform float u_vignette_strength;

out vec4 fragColor;

void main() {
    vec3 scene = texture(u_scene, v_uv).rgb;
    vec3 bloom = texture(u_bloom, v_uv).rgb;

    vec3 color = scene + bloom * u_bloom_strength;

    vec2 uv = v_uv - 0.5;
    float vignette = 1.0 - dot(uv, uv) * u_vignette_strength;
    color *= vignette;

    // Deep green shadows, warm gold highlights
    vec3 shadows = vec3(0.0, 0.04, 0.02);
    vec3 highlights = vec3(0.08, 0.05, 0.0);
    float luma = dot(color, vec3(0.299, 0.587, 0.114));
    color += mix(shadows, highlights, luma) * 0.5;

    color = pow(color, vec3(1.0 / 2.2));

    fragColor = vec4(color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaders_not_empty() {
        assert!(!FOLIAGE_VERTEX_SHADER.is_empty());
        assert!(!FOLIAGE_FRAGMENT_SHADER.is_empty());
        assert!(!DECOR_VERTEX_SHADER.is_empty());
        assert!(!DECOR_FRAGMENT_SHADER.is_empty());
        assert!(!CARD_VERTEX_SHADER.is_empty());
        assert!(!CARD_FRAGMENT_SHADER.is_empty());
    }

    #[test]
    fn test_shader_version() {
        for src in [
            FOLIAGE_VERTEX_SHADER,
            DECOR_VERTEX_SHADER,
            CARD_VERTEX_SHADER,
            FULLSCREEN_VERTEX_SHADER,
            BLOOM_EXTRACT_SHADER,
            BLUR_SHADER,
            COMPOSITE_SHADER,
        ] {
            assert!(src.starts_with("#version 300 es"));
        }
    }

    #[test]
    fn test_instanced_attributes_present() {
        assert!(DECOR_VERTEX_SHADER.contains("a_model_0"));
        assert!(DECOR_VERTEX_SHADER.contains("a_model_3"));
        assert!(DECOR_VERTEX_SHADER.contains("location = 7"));
    }
}
