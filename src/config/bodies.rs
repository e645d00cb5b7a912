//! Static body table
//!
//! The table is a recursive tree: the root is the star, its satellites are the
//! planets and theirs are the moons. Values are tuned for the visualization,
//! not for orbital accuracy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::ConfigError;
use crate::orbital::body::degrees_per_step;

/// Flat ring band drawn around a body (Saturn, Uranus).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub inner_radius: f32,
    pub outer_radius: f32,
    /// RGBA, alpha blended
    pub color: [f32; 4],
    /// Tilt about the X axis in degrees
    #[serde(default)]
    pub tilt_degrees: f32,
}

/// Configuration of one body and, recursively, its satellites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    /// Orbit radius around the parent, scene units
    pub distance: f32,
    /// Time units per revolution; zero or negative keeps the body still
    pub orbital_period: f64,
    /// Time units per self-rotation; zero or negative disables spin
    pub rotation_period: f64,
    pub radius: f32,
    pub color: [f32; 3],
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub rings: Vec<RingConfig>,
    #[serde(default)]
    pub satellites: Vec<BodyConfig>,
}

impl BodyConfig {
    pub fn new(
        name: &str,
        distance: f32,
        orbital_period: f64,
        rotation_period: f64,
        radius: f32,
        color: [f32; 3],
    ) -> Self {
        Self {
            name: name.to_string(),
            distance,
            orbital_period,
            rotation_period,
            radius,
            color,
            texture: None,
            rings: Vec::new(),
            satellites: Vec::new(),
        }
    }

    pub fn with_satellites(mut self, satellites: Vec<BodyConfig>) -> Self {
        self.satellites = satellites;
        self
    }

    pub fn with_rings(mut self, rings: Vec<RingConfig>) -> Self {
        self.rings = rings;
        self
    }

    /// Validate this table as the root of a system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.distance != 0.0 {
            return Err(ConfigError::RootNotCentered {
                body: self.name.clone(),
                distance: self.distance,
            });
        }
        let mut seen = HashSet::new();
        self.validate_subtree(&mut seen)
    }

    // Names are compared case-insensitively, as lookup by name is.
    fn validate_subtree(&self, seen: &mut HashSet<String>) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !seen.insert(self.name.to_ascii_lowercase()) {
            return Err(ConfigError::DuplicateName(self.name.clone()));
        }

        let numbers = [
            ("distance", self.distance as f64),
            ("orbital_period", self.orbital_period),
            ("rotation_period", self.rotation_period),
            ("radius", self.radius as f64),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite {
                    body: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        let periods = [
            ("orbital_period", self.orbital_period),
            ("rotation_period", self.rotation_period),
        ];
        for (field, period) in periods {
            if degrees_per_step(period).is_some_and(|rate| !rate.is_finite()) {
                return Err(ConfigError::PeriodTooShort {
                    body: self.name.clone(),
                    field,
                    period,
                });
            }
        }
        if self.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius {
                body: self.name.clone(),
                radius: self.radius,
            });
        }
        if self.distance < 0.0 {
            return Err(ConfigError::NegativeDistance {
                body: self.name.clone(),
                distance: self.distance,
            });
        }
        for ring in &self.rings {
            let ordered = ring.inner_radius >= 0.0 && ring.inner_radius < ring.outer_radius;
            if !ordered || !ring.outer_radius.is_finite() || !ring.tilt_degrees.is_finite() {
                return Err(ConfigError::InvalidRing {
                    body: self.name.clone(),
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
        }

        for satellite in &self.satellites {
            satellite.validate_subtree(seen)?;
        }
        Ok(())
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        default_system()
    }
}

fn ring(inner_radius: f32, outer_radius: f32, color: [f32; 4], tilt_degrees: f32) -> RingConfig {
    RingConfig {
        inner_radius,
        outer_radius,
        color,
        tilt_degrees,
    }
}

/// The built-in sun, nine planets and their major moons.
pub fn default_system() -> BodyConfig {
    let gray = [0.6, 0.6, 0.6];

    let earth = BodyConfig::new("Earth", 10.0, 365.0, 4.0, 0.6, [0.2, 0.2, 1.0])
        .with_satellites(vec![BodyConfig::new(
            "Moon",
            1.5,
            7.3,
            27.3,
            0.15,
            [0.8, 0.8, 0.8],
        )]);

    let mars = BodyConfig::new("Mars", 15.0, 687.0, 3.0, 0.5, [0.8, 0.4, 0.1]).with_satellites(
        vec![
            BodyConfig::new("Phobos", 0.8, 3.319, 3.319, 0.05, gray),
            BodyConfig::new("Deimos", 1.2, 5.262, 5.262, 0.03, gray),
        ],
    );

    let jupiter = BodyConfig::new("Jupiter", 20.0, 433.0, 3.0, 1.2, [0.8, 0.6, 0.4])
        .with_satellites(vec![
            BodyConfig::new("Io", 1.5, 1.769, 1.769, 0.1, [0.9, 0.8, 0.5]),
            BodyConfig::new("Europa", 2.0, 3.551, 3.551, 0.08, [0.8, 0.8, 0.9]),
            BodyConfig::new("Ganymede", 2.5, 7.155, 7.155, 0.12, [0.7, 0.7, 0.8]),
            BodyConfig::new("Callisto", 3.0, 16.689, 16.689, 0.11, [0.6, 0.6, 0.7]),
        ]);

    let saturn = BodyConfig::new("Saturn", 25.0, 10759.0, 3.0, 1.0, [0.9, 0.8, 0.6])
        .with_rings(vec![
            ring(1.5, 1.8, [0.9, 0.85, 0.7, 0.8], -26.7),
            // Cassini division
            ring(1.8, 1.9, [0.1, 0.1, 0.1, 1.0], -26.7),
            ring(1.9, 2.2, [0.9, 0.85, 0.7, 0.8], -26.7),
            ring(2.2, 2.8, [0.7, 0.65, 0.6, 0.7], -26.7),
        ])
        .with_satellites(vec![
            BodyConfig::new("Titan", 2.2, 15.945, 15.945, 0.15, [0.8, 0.7, 0.5]),
            BodyConfig::new("Rhea", 1.5, 4.518, 4.518, 0.08, [0.8, 0.8, 0.8]),
            BodyConfig::new("Iapetus", 3.0, 79.33, 79.33, 0.07, gray),
        ]);

    let uranus = BodyConfig::new("Uranus", 28.0, 30687.0, 3.0, 0.7, [0.5, 0.8, 0.9])
        .with_rings(vec![
            ring(1.1, 1.3, [0.4, 0.4, 0.5, 0.6], 98.0),
            ring(1.4, 1.6, [0.3, 0.3, 0.4, 0.5], 98.0),
            ring(1.7, 1.9, [0.2, 0.2, 0.3, 0.4], 98.0),
        ])
        .with_satellites(vec![
            BodyConfig::new("Titania", 0.9, 8.706, 8.706, 0.08, [0.8, 0.8, 0.8]),
            BodyConfig::new("Oberon", 1.1, 13.463, 13.463, 0.07, [0.7, 0.7, 0.7]),
        ]);

    let neptune = BodyConfig::new("Neptune", 30.0, 60190.0, 3.0, 0.7, [0.2, 0.3, 0.9])
        .with_satellites(vec![BodyConfig::new(
            "Triton",
            1.2,
            5.877,
            5.877,
            0.1,
            [0.7, 0.8, 0.9],
        )]);

    let pluto = BodyConfig::new("Pluto", 35.0, 90560.0, 6.39, 0.2, [0.8, 0.6, 0.4])
        .with_satellites(vec![BodyConfig::new(
            "Charon",
            0.4,
            6.387,
            6.387,
            0.1,
            [0.7, 0.7, 0.7],
        )]);

    BodyConfig::new("Sun", 0.0, 0.0, 25.0, 2.0, [1.0, 0.8, 0.0]).with_satellites(vec![
        BodyConfig::new("Mercury", 4.0, 10.0, 70.0, 0.4, [0.7, 0.7, 0.7]),
        BodyConfig::new("Venus", 7.0, 120.0, 243.0, 0.6, [0.9, 0.7, 0.2]),
        earth,
        mars,
        jupiter,
        saturn,
        uranus,
        neptune,
        pluto,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_system_is_valid() {
        let system = default_system();
        assert_eq!(system.validate(), Ok(()));
        assert_eq!(system.name, "Sun");
        assert_eq!(system.satellites.len(), 9);
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let mut system = default_system();
        system.satellites[0].radius = -0.4;
        assert_eq!(
            system.validate(),
            Err(ConfigError::NonPositiveRadius {
                body: "Mercury".to_string(),
                radius: -0.4
            })
        );
    }

    #[test]
    fn test_rejects_duplicate_names_across_levels() {
        let mut system = default_system();
        system.satellites[2].satellites[0].name = "Mars".to_string();
        assert_eq!(
            system.validate(),
            Err(ConfigError::DuplicateName("Mars".to_string()))
        );
    }

    #[test]
    fn test_rejects_off_center_root() {
        let mut system = default_system();
        system.distance = 3.0;
        assert!(matches!(
            system.validate(),
            Err(ConfigError::RootNotCentered { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_period_and_bad_rings() {
        let mut system = default_system();
        system.satellites[1].orbital_period = f64::NAN;
        assert!(matches!(
            system.validate(),
            Err(ConfigError::NonFinite {
                field: "orbital_period",
                ..
            })
        ));

        let mut system = default_system();
        system.satellites[5].rings[0].inner_radius = 3.0;
        assert!(matches!(
            system.validate(),
            Err(ConfigError::InvalidRing { .. })
        ));
    }

    #[test]
    fn test_duplicate_names_ignore_case() {
        let mut system = default_system();
        system.satellites[2].satellites[0].name = "moon".to_string();
        system.satellites[2].satellites.push(BodyConfig::new(
            "Moon", 2.0, 9.0, 9.0, 0.1, [0.5; 3],
        ));
        assert_eq!(
            system.validate(),
            Err(ConfigError::DuplicateName("Moon".to_string()))
        );
    }

    #[test]
    fn test_rejects_period_with_unbounded_rate() {
        let mut system = default_system();
        system
            .satellites
            .push(BodyConfig::new("Tiny", 40.0, 1e-310, 1.0, 0.1, [0.5; 3]));
        assert_eq!(
            system.validate(),
            Err(ConfigError::PeriodTooShort {
                body: "Tiny".to_string(),
                field: "orbital_period",
                period: 1e-310,
            })
        );

        let mut system = default_system();
        system.satellites[0].rotation_period = f64::MIN_POSITIVE;
        assert!(matches!(
            system.validate(),
            Err(ConfigError::PeriodTooShort {
                field: "rotation_period",
                ..
            })
        ));
    }

    #[test]
    fn test_default_ring_bands_do_not_overlap() {
        fn check(body: &BodyConfig) {
            let mut bands: Vec<_> = body
                .rings
                .iter()
                .map(|r| (r.inner_radius, r.outer_radius))
                .collect();
            bands.sort_by(|a, b| a.0.total_cmp(&b.0));
            for pair in bands.windows(2) {
                assert!(pair[0].1 <= pair[1].0, "{}: {:?}", body.name, pair);
            }
            body.satellites.iter().for_each(check);
        }
        check(&default_system());
    }

    #[test]
    fn test_negative_periods_are_accepted() {
        // Locked or static bodies use non-positive periods on purpose.
        let mut system = default_system();
        system.satellites[0].orbital_period = -1.0;
        system.satellites[0].rotation_period = 0.0;
        assert_eq!(system.validate(), Ok(()));
    }
}
