use thiserror::Error;

use crate::Graphics;

#[derive(Debug, Clone, Copy)]
pub struct ShaderSource<'a> {
    pub vertex: &'a str,
    pub fragment: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("unable to create a {0:?} shader: {1}")]
    Create(ShaderStage, String),
    #[error("{stage:?} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link:\n{0}")]
    Link(String),
}

/// A compiled and linked shader program.
pub trait Shader<G: Graphics>: Sized {
    fn new(renderer: G, source: &ShaderSource) -> Result<Self, ShaderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_carries_the_log() {
        let error = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: 'foo' : undeclared identifier".to_owned(),
        };

        let message = error.to_string();
        assert!(message.starts_with("Fragment shader failed to compile"));
        assert!(message.contains("undeclared identifier"));
    }
}
