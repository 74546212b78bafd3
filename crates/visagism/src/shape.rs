use serde::{Deserialize, Serialize};

use barbermatch_core::DomainError;

/// Face-shape classification used to tag hairstyles.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Diamond,
    Triangle,
}

impl FaceShape {
    pub const ALL: [FaceShape; 6] = [
        FaceShape::Oval,
        FaceShape::Round,
        FaceShape::Square,
        FaceShape::Heart,
        FaceShape::Diamond,
        FaceShape::Triangle,
    ];

    /// The tag stored in `Hairstyle::recommended_face_shapes`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaceShape::Oval => "oval",
            FaceShape::Round => "round",
            FaceShape::Square => "square",
            FaceShape::Heart => "heart",
            FaceShape::Diamond => "diamond",
            FaceShape::Triangle => "triangle",
        }
    }
}

impl core::fmt::Display for FaceShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for FaceShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaceShape::ALL
            .into_iter()
            .find(|shape| shape.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown face shape '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back() {
        for shape in FaceShape::ALL {
            assert_eq!(shape.as_str().parse::<FaceShape>().unwrap(), shape);
        }
        assert!("Oval".parse::<FaceShape>().is_err());
    }
}
