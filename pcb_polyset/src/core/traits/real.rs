use super::FuzzyEq;

/// Trait representing a real number (e.g. 1.1, -3.5, etc.) used for millimetre values and angles.
pub trait Real:
    num_traits::Float + FuzzyEq + std::default::Default + std::fmt::Debug + 'static
{
    #[inline]
    fn pi() -> Self {
        num_traits::cast(std::f64::consts::PI).unwrap_or_else(Self::nan)
    }

    #[inline]
    fn tau() -> Self {
        num_traits::cast(std::f64::consts::TAU).unwrap_or_else(Self::nan)
    }
}

impl Real for f32 {
    #[inline]
    fn pi() -> Self {
        std::f32::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f32::consts::TAU
    }
}

impl Real for f64 {
    #[inline]
    fn pi() -> Self {
        std::f64::consts::PI
    }

    #[inline]
    fn tau() -> Self {
        std::f64::consts::TAU
    }
}
