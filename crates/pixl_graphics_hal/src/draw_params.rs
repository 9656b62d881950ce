use smart_default::SmartDefault;

use crate::Rect;

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendingFactor {
    Zero,
    #[default]
    One,
    SourceAlpha,
    OneMinusSourceAlpha,
    DestinationAlpha,
    OneMinusDestinationAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Blend {
    pub source: BlendingFactor,
    pub destination: BlendingFactor,
}

impl Default for Blend {
    fn default() -> Self {
        Self {
            source: BlendingFactor::One,
            destination: BlendingFactor::Zero,
        }
    }
}

impl Blend {
    /// Classic non-premultiplied alpha blending.
    pub const fn alpha() -> Self {
        Self {
            source: BlendingFactor::SourceAlpha,
            destination: BlendingFactor::OneMinusSourceAlpha,
        }
    }
}

#[derive(SmartDefault, Clone, Debug, PartialEq)]
pub struct DrawParameters {
    /// Disabled when `None`.
    #[default(Some(Blend::alpha()))]
    pub blend: Option<Blend>,
    /// Whole frame buffer when `None`.
    pub viewport: Option<Rect<u32>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_blend_alpha() {
        let params = DrawParameters::default();

        assert_eq!(params.blend, Some(Blend::alpha()));
        assert_eq!(params.viewport, None);
    }

    #[test]
    fn default_blend_replaces_destination() {
        let blend = Blend::default();

        assert_eq!(blend.source, BlendingFactor::One);
        assert_eq!(blend.destination, BlendingFactor::Zero);
    }
}
