use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default, skip_deserializing)]
    pub id: Option<i64>,
    pub reservation_name: String,
}

impl Reservation {
    /// A transient reservation, it gains an id once saved.
    pub fn new(reservation_name: impl Into<String>) -> Self {
        Self {
            id: None,
            reservation_name: reservation_name.into(),
        }
    }
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Reservation{{id={}, reservationName='{}'}}", id, self.reservation_name),
            None => write!(f, "Reservation{{id=null, reservationName='{}'}}", self.reservation_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_matches_diagnostic_format() {
        let mut reservation = Reservation::new("Josh");
        assert_eq!(reservation.to_string(), "Reservation{id=null, reservationName='Josh'}");

        reservation.id = Some(7);
        assert_eq!(reservation.to_string(), "Reservation{id=7, reservationName='Josh'}");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let reservation = Reservation {
            id: Some(3),
            reservation_name: "Onsi".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&reservation).unwrap(),
            json!({"id": 3, "reservationName": "Onsi"})
        );
    }

    #[test]
    fn ignores_client_supplied_id() {
        let reservation: Reservation =
            serde_json::from_value(json!({"id": 42, "reservationName": "Phil"})).unwrap();
        assert_eq!(reservation, Reservation::new("Phil"));
    }
}
