use serde::{Deserialize, Serialize};
use validator::Validate;

use barbermatch_core::{Entity, HairstyleId};

/// Catalog entry tagged with the face shapes it suits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hairstyle {
    pub id: HairstyleId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub recommended_face_shapes: Vec<String>,
}

impl Hairstyle {
    /// Exact, case-sensitive tag membership.
    pub fn recommends(&self, face_shape: &str) -> bool {
        self.recommended_face_shapes.iter().any(|tag| tag == face_shape)
    }
}

impl Entity for Hairstyle {
    type Id = HairstyleId;

    fn id(&self) -> HairstyleId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewHairstyle {
    #[validate(
        length(min = 1, message = "name must not be empty"),
        custom(function = "barbermatch_core::validation::not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub recommended_face_shapes: Vec<String>,
}

impl NewHairstyle {
    pub fn into_hairstyle(self) -> Hairstyle {
        Hairstyle {
            id: HairstyleId::new(),
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            recommended_face_shapes: self.recommended_face_shapes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommends_is_exact_and_case_sensitive() {
        let style = NewHairstyle {
            name: "Pompadour".into(),
            description: None,
            image_url: None,
            recommended_face_shapes: vec!["oval".into(), "square".into()],
        }
        .into_hairstyle();
        assert!(style.recommends("oval"));
        assert!(!style.recommends("Oval"));
        assert!(!style.recommends("ova"));
        assert!(!style.recommends("round"));
    }

    #[test]
    fn hairstyle_needs_a_name() {
        let style = NewHairstyle {
            name: " ".into(),
            description: Some("short".into()),
            image_url: None,
            recommended_face_shapes: vec![],
        };
        let err = barbermatch_core::DomainError::from(style.validate().unwrap_err());
        assert_eq!(err, barbermatch_core::DomainError::Validation("name must not be empty".into()));
    }
}
