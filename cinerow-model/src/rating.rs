use crate::error::ModelError;

/// Audience rating on a 0–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f32", into = "f32"))]
pub struct Rating(f32);

impl Rating {
    pub const MAX: f32 = 10.0;

    pub fn new(value: f32) -> Result<Self, ModelError> {
        if value.is_finite() && (0.0..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ModelError::InvalidRating(value))
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    /// Rating folded onto the five-star scale used by row cards, rounded
    /// to one decimal.
    pub fn out_of_five(&self) -> f32 {
        (self.0 * 5.0).round() / 10.0
    }
}

impl TryFrom<f32> for Rating {
    type Error = ModelError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
