use models::{car_model, Status};
use serde::{Deserialize, Serialize};

use crate::errors::CarError;

pub type CarId = i32;

/// One car inventory entry as seen by callers of the storage contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarModel {
    pub id: CarId,
    pub brand: String,
    pub model: String,
    pub price: i64,
    pub status: Status,
    pub mileage: i64,
}

/// Mutable fields of a record, used by create and update.
///
/// Missing JSON fields take their zero value; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarInput {
    pub brand: String,
    pub model: String,
    pub price: i64,
    pub status: Status,
    pub mileage: i64,
}

impl CarInput {
    /// Price is checked before mileage.
    pub fn validate(&self) -> Result<(), CarError> {
        if self.price < 0 {
            return Err(CarError::BadPrice);
        }
        if self.mileage < 0 {
            return Err(CarError::BadMileage);
        }
        Ok(())
    }

    pub fn into_car(self, id: CarId) -> CarModel {
        CarModel {
            id,
            brand: self.brand,
            model: self.model,
            price: self.price,
            status: self.status,
            mileage: self.mileage,
        }
    }
}

impl From<car_model::Model> for CarModel {
    fn from(m: car_model::Model) -> Self {
        Self {
            id: m.id,
            brand: m.brand,
            model: m.model,
            price: m.price,
            status: m.status,
            mileage: m.mileage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(price: i64, mileage: i64) -> CarInput {
        CarInput { brand: "Volvo".into(), model: "XC90".into(), price, status: Status::Sold, mileage }
    }

    #[test]
    fn non_negative_values_pass() {
        assert_eq!(input(0, 0).validate(), Ok(()));
        assert_eq!(input(i64::MAX, 1).validate(), Ok(()));
    }

    #[test]
    fn price_checked_before_mileage() {
        assert_eq!(input(-1, 10).validate(), Err(CarError::BadPrice));
        assert_eq!(input(10, -1).validate(), Err(CarError::BadMileage));
        assert_eq!(input(-1, -1).validate(), Err(CarError::BadPrice));
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let parsed: CarInput = serde_json::from_str(r#"{"brand":"Kia","extra":true}"#).unwrap();
        assert_eq!(parsed.brand, "Kia");
        assert_eq!(parsed.model, "");
        assert_eq!(parsed.price, 0);
        assert_eq!(parsed.status, Status::OnTheWay);
        assert_eq!(parsed.mileage, 0);
    }

    #[test]
    fn record_json_round_trip() {
        let car = input(123_456, 654_321).into_car(42);
        let json = serde_json::to_value(&car).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 42, "brand": "Volvo", "model": "XC90",
                "price": 123_456, "status": "sold", "mileage": 654_321
            })
        );
        let back: CarModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, car);
    }
}
