//! Barbershops and the barbers they employ.

use serde::{Deserialize, Serialize};
use validator::Validate;

use barbermatch_core::{BarberId, BarbershopId, Entity};

use crate::Appointment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barbershop {
    pub id: BarbershopId,
    pub name: String,
    pub address: String,
    /// Free-text opening hours, e.g. "Mon-Sat 9:00-19:00".
    pub schedule: Option<String>,
}

impl Entity for Barbershop {
    type Id = BarbershopId;

    fn id(&self) -> BarbershopId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBarbershop {
    #[validate(
        length(min = 1, message = "name must not be empty"),
        custom(function = "barbermatch_core::validation::not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, message = "address must not be empty"),
        custom(function = "barbermatch_core::validation::not_blank")
    )]
    pub address: String,
    #[serde(default)]
    pub schedule: Option<String>,
}

impl NewBarbershop {
    pub fn into_barbershop(self) -> Barbershop {
        Barbershop {
            id: BarbershopId::new(),
            name: self.name,
            address: self.address,
            schedule: self.schedule,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Barber {
    pub id: BarberId,
    pub name: String,
    pub specialties: Vec<String>,
    pub barbershop_id: BarbershopId,
}

impl Entity for Barber {
    type Id = BarberId;

    fn id(&self) -> BarberId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBarber {
    #[validate(
        length(min = 1, message = "name must not be empty"),
        custom(function = "barbermatch_core::validation::not_blank")
    )]
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl NewBarber {
    pub fn into_barber(self, barbershop_id: BarbershopId) -> Barber {
        Barber {
            id: BarberId::new(),
            name: self.name,
            specialties: self.specialties,
            barbershop_id,
        }
    }
}

/// Barbershop with its barbers and appointments attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarbershopDirectory {
    #[serde(flatten)]
    pub barbershop: Barbershop,
    pub barbers: Vec<Barber>,
    pub appointments: Vec<Appointment>,
}

#[cfg(test)]
mod tests {
    use barbermatch_core::DomainError;

    use super::*;

    fn rejection(input: &impl Validate) -> DomainError {
        DomainError::from(input.validate().unwrap_err())
    }

    #[test]
    fn blank_name_or_address_is_rejected() {
        let shop = NewBarbershop {
            name: "  ".into(),
            address: "Calle 1".into(),
            schedule: None,
        };
        assert_eq!(rejection(&shop), DomainError::Validation("name must not be empty".into()));

        let shop = NewBarbershop {
            name: "Fade Factory".into(),
            address: "".into(),
            schedule: None,
        };
        assert_eq!(rejection(&shop), DomainError::Validation("address must not be empty".into()));
    }

    #[test]
    fn barber_specialties_default_to_empty() {
        let barber: NewBarber = serde_json::from_str(r#"{"name":"Leo"}"#).unwrap();
        assert!(barber.specialties.is_empty());
        assert!(barber.validate().is_ok());
    }

    #[test]
    fn blank_barber_name_is_rejected() {
        let barber = NewBarber {
            name: "\t".into(),
            specialties: vec![],
        };
        assert_eq!(rejection(&barber), DomainError::Validation("name must not be empty".into()));
    }

    #[test]
    fn directory_flattens_shop_fields() {
        let shop = NewBarbershop {
            name: "Fade Factory".into(),
            address: "Calle 1".into(),
            schedule: Some("Mon-Fri".into()),
        }
        .into_barbershop();
        let dir = BarbershopDirectory {
            barbershop: shop.clone(),
            barbers: vec![],
            appointments: vec![],
        };
        let json = serde_json::to_value(dir).unwrap();
        assert_eq!(json["name"], "Fade Factory");
        assert_eq!(json["id"], shop.id.to_string());
        assert!(json["barbers"].as_array().unwrap().is_empty());
    }
}
