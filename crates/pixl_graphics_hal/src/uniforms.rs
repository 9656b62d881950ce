use derive_more::{Constructor, From};

/// A value for a named shader uniform.
#[derive(From, Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

/// A uniform set by name before a draw. Uniforms the program does not
/// declare are skipped.
#[derive(Constructor, Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    pub name: &'static str,
    pub value: UniformValue,
}

impl Uniform {
    pub fn float(name: &'static str, value: f32) -> Self {
        Self::new(name, value.into())
    }

    pub fn vec2(name: &'static str, value: [f32; 2]) -> Self {
        Self::new(name, value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_convert_from_plain_types() {
        assert_eq!(UniformValue::from(3), UniformValue::Int(3));
        assert_eq!(UniformValue::from(0.5), UniformValue::Float(0.5));
        assert_eq!(
            Uniform::vec2("screen_size", [640., 480.]).value,
            UniformValue::Vec2([640., 480.])
        );
    }
}
