use pixl_graphics_hal::shader::ShaderSource;

/// Textured quads in pixel coordinates, origin at the top-left corner of the
/// frame buffer. Expects the `screen_size` uniform in pixels.
pub const SPRITE: ShaderSource<'static> = ShaderSource {
    vertex: r#"
        #version 120

        uniform vec2 screen_size;

        attribute vec2 position;
        attribute vec2 tex_position;

        varying vec2 v_tex_position;

        void main() {
            v_tex_position = tex_position;
            vec2 ndc = vec2(
                position.x / screen_size.x * 2.0 - 1.0,
                1.0 - position.y / screen_size.y * 2.0
            );
            gl_Position = vec4(ndc, 0.0, 1.0);
        }
    "#,
    fragment: r#"
        #version 120

        uniform sampler2D tex;

        varying vec2 v_tex_position;

        void main() {
            gl_FragColor = texture2D(tex, v_tex_position);
        }
    "#,
};

pub const SPRITE_SAMPLER: &str = "tex";

/// Full screen passes take positions in NDC. The texture coordinate is also
/// written to `gl_TexCoord[0]` for fragment shaders written against it.
const POST_PROCESS_VERTEX: &str = r#"
    #version 120

    attribute vec2 position;
    attribute vec2 tex_position;

    varying vec2 v_tex_position;

    void main() {
        v_tex_position = tex_position;
        gl_TexCoord[0] = vec4(tex_position, 0.0, 1.0);
        gl_Position = vec4(position, 0.0, 1.0);
    }
"#;

/// Copies the source texture unchanged.
pub const COPY_FRAGMENT: &str = r#"
    #version 120

    uniform sampler2D sampler0;

    varying vec2 v_tex_position;

    void main() {
        gl_FragColor = texture2D(sampler0, v_tex_position);
    }
"#;

/// Post process passes bind the source texture to `sampler0` and set the
/// float uniforms `w` and `h` to the screen size.
pub const POST_PROCESS_SAMPLER: &str = "sampler0";

pub fn post_process(fragment: &str) -> ShaderSource<'_> {
    ShaderSource {
        vertex: POST_PROCESS_VERTEX,
        fragment,
    }
}
