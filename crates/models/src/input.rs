use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::marker::{LatLng, MarkerRecord};

pub const INVALID_INPUT_MESSAGE: &str = "Please enter valid coordinates and title";

/// A coordinate as typed by a user: either a JSON number or free text.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Parse to a finite value; `None` for non-numeric or non-finite input.
    pub fn parse(&self) -> Option<f64> {
        let value = match self {
            Coordinate::Number(v) => *v,
            Coordinate::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Raw marker form input, validated before anything is stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MarkerInput {
    pub title: String,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl MarkerInput {
    /// Reject empty titles and coordinates that do not parse to finite numbers,
    /// then build the record through [`LatLng::new`].
    pub fn validate(&self) -> Result<MarkerRecord, ModelError> {
        let latitude = self.latitude.parse();
        let longitude = self.longitude.parse();
        match (latitude, longitude) {
            (Some(lat), Some(lng)) if !self.title.is_empty() => {
                Ok(MarkerRecord::new(self.title.clone(), LatLng::new(lat, lng)))
            }
            _ => Err(ModelError::Validation(INVALID_INPUT_MESSAGE.into())),
        }
    }
}
