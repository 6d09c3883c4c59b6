use std::{collections::HashMap, sync::LazyLock};

use serde::Serialize;

use crate::error::GatewayError;

/// A supported city and the coordinates sent to the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityCoordinate {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

static CITIES: [CityCoordinate; 8] = [
    city("Karachi", 24.8607, 67.0011),
    city("Lahore", 31.5204, 74.3587),
    city("Islamabad", 33.6844, 73.0479),
    city("Peshawar", 34.0150, 71.5249),
    city("Quetta", 30.1798, 66.9749),
    city("Multan", 30.1575, 71.5249),
    city("Faisalabad", 31.4169, 73.0892),
    city("Hyderabad", 25.3969, 68.3778),
];

const fn city(name: &'static str, latitude: f64, longitude: f64) -> CityCoordinate {
    CityCoordinate { name, latitude, longitude }
}

static BY_NAME: LazyLock<HashMap<&'static str, &'static CityCoordinate>> =
    LazyLock::new(|| CITIES.iter().map(|c| (c.name, c)).collect());

/// The full table, in display order.
pub fn all() -> &'static [CityCoordinate] {
    &CITIES
}

/// Names of every supported city, in display order.
pub fn available_cities() -> Vec<&'static str> {
    CITIES.iter().map(|c| c.name).collect()
}

/// Look up a city by exact, case-sensitive name.
pub fn resolve(name: &str) -> Result<&'static CityCoordinate, GatewayError> {
    BY_NAME.get(name).copied().ok_or_else(|| GatewayError::CityNotFound {
        city: name.to_string(),
        available: available_cities(),
    })
}
