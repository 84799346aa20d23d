use gallery::{Dialect, ShaderEntry};

/// Shared vertex stage: passes the quad corners straight through.
pub const VERTEX_SOURCE: &str = r"#version 450

layout(location = 0) in vec2 a_position;

void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

/// Produces the complete fragment text for `entry` under `dialect`.
pub fn synthesize(entry: &ShaderEntry, dialect: Dialect) -> String {
    synthesize_fragment(entry.source(), dialect)
}

/// Wraps raw source text with the preamble and epilogue of `dialect`.
///
/// The source is embedded verbatim; nothing is stripped or rewritten.
pub fn synthesize_fragment(source: &str, dialect: Dialect) -> String {
    let (preamble, epilogue) = match dialect {
        Dialect::Legacy => (LEGACY_PREAMBLE, ""),
        Dialect::StandardInterface => (STANDARD_PREAMBLE, STANDARD_EPILOGUE),
    };

    let mut text = String::with_capacity(preamble.len() + source.len() + epilogue.len() + 2);
    text.push_str(preamble);
    text.push_str(source);
    if !source.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(epilogue);
    text
}

/// Standard-dialect prologue.
///
/// Both naming conventions live in one std140 block at set 0, binding 0 so
/// either style of source can read them by bare name. `FC` is flipped to a
/// bottom-left origin.
const STANDARD_PREAMBLE: &str = r"#version 450

layout(location = 0) out vec4 gallery_FragColor;

layout(std140, set = 0, binding = 0) uniform GalleryUniforms {
    float iTime;
    vec2 iResolution;
    vec4 iMouse;
    int iFrame;
    float t;
    vec2 r;
};

#define FC vec4(gl_FragCoord.x, iResolution.y - gl_FragCoord.y, gl_FragCoord.z, gl_FragCoord.w)
#define o fragColor

";

/// Calls `mainImage` with the flipped pixel coordinate.
const STANDARD_EPILOGUE: &str = r"
void main() {
    vec4 fragColor = vec4(0.0);
    mainImage(fragColor, FC.xy);
    gallery_FragColor = fragColor;
}
";

/// Legacy-dialect prologue; the source supplies `main` and writes `o`.
const LEGACY_PREAMBLE: &str = r"#version 450

layout(location = 0) out vec4 gallery_FragColor;

layout(std140, set = 0, binding = 0) uniform GalleryUniforms {
    float t;
    vec2 r;
};

#define FC vec4(gl_FragCoord.x, r.y - gl_FragCoord.y, gl_FragCoord.z, gl_FragCoord.w)
#define o gallery_FragColor

vec3 hsv(float h, float s, float v) {
    vec4 K = vec4(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    vec3 p = abs(fract(vec3(h) + K.xyz) * 6.0 - K.www);
    return v * mix(K.xxx, clamp(p - K.xxx, 0.0, 1.0), s);
}

";
