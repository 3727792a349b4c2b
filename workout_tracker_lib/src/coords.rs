use serde::{Deserialize, Serialize};

/// Latitude / longitude pair. Serialized as a two element array `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords(pub f64, pub f64);

impl Coords {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_array() {
        let json = serde_json::to_string(&Coords::new(56.17, 10.19)).unwrap();
        assert_eq!(json, "[56.17,10.19]");
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!Coords::new(f64::NAN, 10.0).is_finite());
        assert!(Coords::new(-33.9, 151.2).is_finite());
    }
}
