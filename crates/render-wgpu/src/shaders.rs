use towerclimb_render::ShaderSources;

/// WGSL vertex shader: positions transformed by the model-view uniform.
pub const VERTEX_SHADER: &str = r#"
struct Uniforms {
    model_view: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.model_view * vec4<f32>(position, 1.0);
}
"#;

/// WGSL fragment shader: solid red.
pub const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.0, 0.0, 1.0);
}
"#;

/// Entry points the pipeline expects in the vertex and fragment modules.
pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

pub fn default_shaders() -> ShaderSources {
    ShaderSources::new(VERTEX_SHADER, FRAGMENT_SHADER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shaders_expose_entry_points() {
        let shaders = default_shaders();
        assert!(shaders.vertex.contains(&format!("fn {VERTEX_ENTRY}")));
        assert!(shaders.fragment.contains(&format!("fn {FRAGMENT_ENTRY}")));
        assert!(shaders.vertex.contains("@binding(0)"));
    }
}
