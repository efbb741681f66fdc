//! Lifecycle status of a car record.
//!
//! A status travels as its human-readable label both in JSON and in the
//! `status` column; numeric ordinals never leave the process.

use std::fmt;
use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Status {
    #[default]
    #[sea_orm(string_value = "on the way")]
    OnTheWay,
    #[sea_orm(string_value = "in stock")]
    InStock,
    #[sea_orm(string_value = "sold")]
    Sold,
    #[sea_orm(string_value = "withdrawn from sale")]
    WithdrawnFromSale,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::OnTheWay,
        Status::InStock,
        Status::Sold,
        Status::WithdrawnFromSale,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Status::OnTheWay => "on the way",
            Status::InStock => "in stock",
            Status::Sold => "sold",
            Status::WithdrawnFromSale => "withdrawn from sale",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = ModelError;

    /// Unknown labels are rejected rather than mapped to a default variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.label().parse::<Status>(), Ok(status));
            assert_eq!(status.to_string(), status.label());
        }
    }

    #[test]
    fn store_value_matches_label() {
        for status in Status::ALL {
            assert_eq!(status.to_value(), status.label());
            assert_eq!(Status::try_from_value(&status.label().to_string()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(
            "lost".parse::<Status>(),
            Err(ModelError::UnknownStatus("lost".into()))
        );
        assert!(Status::try_from_value(&"lost".to_string()).is_err());
        assert!(serde_json::from_str::<Status>("\"On The Way\"").is_err());
        assert!(serde_json::from_str::<Status>("0").is_err());
    }

    #[test]
    fn json_uses_label() {
        let json = serde_json::to_string(&Status::WithdrawnFromSale).unwrap();
        assert_eq!(json, "\"withdrawn from sale\"");
        let back: Status = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Status::WithdrawnFromSale);
    }

    #[test]
    fn zero_variant_is_default() {
        assert_eq!(Status::default(), Status::OnTheWay);
    }
}
