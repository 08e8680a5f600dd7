//! Celestial bodies and the focus ring they form.

use crate::detail::DetailLevel;
use serde::{Deserialize, Serialize};

/// A focusable body and the moons that orbit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub name: String,
    #[serde(default)]
    pub moons: Vec<String>,
    /// One description per detail rung, lowest first.
    #[serde(default)]
    pub descriptions: [String; 3],
}

impl Body {
    pub fn new(name: &str, moons: &[&str], descriptions: [&str; 3]) -> Self {
        Self {
            name: name.to_string(),
            moons: moons.iter().map(|m| m.to_string()).collect(),
            descriptions: descriptions.map(str::to_string),
        }
    }

    /// Text shown at the given detail level.
    pub fn describe(&self, level: DetailLevel) -> &str {
        &self.descriptions[level.rung() as usize]
    }
}

/// Ordered ring of bodies. Focus wraps in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyCatalog {
    bodies: Vec<Body>,
}

impl BodyCatalog {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies }
    }

    /// The Sun and the eight planets, innermost first.
    pub fn solar_system() -> Self {
        Self::new(vec![
            Body::new(
                "Sun",
                &[],
                [
                    "The star at the centre of the Solar System.",
                    "G-type main-sequence star, 1.39 million km across, 99.86% of the system's mass.",
                    "Fuses 600 million tonnes of hydrogen per second; its corona reaches over a million kelvin.",
                ],
            ),
            Body::new(
                "Mercury",
                &[],
                [
                    "The smallest planet and the closest to the Sun.",
                    "4,879 km across; an 88-day year and no substantial atmosphere.",
                    "A huge iron core fills about 85% of its radius; surface swings from -180 to 430 C.",
                ],
            ),
            Body::new(
                "Venus",
                &[],
                [
                    "The hottest planet, wrapped in thick clouds.",
                    "12,104 km across; rotates backwards, a day longer than its year.",
                    "CO2 atmosphere at 92 bar drives a runaway greenhouse near 465 C.",
                ],
            ),
            Body::new(
                "Earth",
                &["Moon"],
                [
                    "Our home, the only known world with life.",
                    "12,742 km across; 71% of the surface is ocean.",
                    "A magnetic field from the molten outer core shields the surface from the solar wind.",
                ],
            ),
            Body::new(
                "Mars",
                &["Phobos", "Deimos"],
                [
                    "The red planet.",
                    "6,779 km across; home to Olympus Mons, the tallest volcano known.",
                    "Ancient river valleys and polar ice point to a wetter past.",
                ],
            ),
            Body::new(
                "Jupiter",
                &["Io", "Europa", "Ganymede", "Callisto"],
                [
                    "The largest planet, a gas giant.",
                    "139,820 km across; the Great Red Spot is a storm older than 350 years.",
                    "Metallic hydrogen deep inside powers the strongest planetary magnetic field.",
                ],
            ),
            Body::new(
                "Saturn",
                &["Titan", "Enceladus"],
                [
                    "The ringed gas giant.",
                    "116,460 km across; less dense than water.",
                    "Its rings are mostly water ice, some pieces as large as mountains.",
                ],
            ),
            Body::new(
                "Uranus",
                &["Titania", "Oberon"],
                [
                    "The ice giant tipped on its side.",
                    "50,724 km across; axial tilt of 98 degrees.",
                    "Methane in the upper atmosphere absorbs red light, giving its cyan tint.",
                ],
            ),
            Body::new(
                "Neptune",
                &["Triton"],
                [
                    "The outermost planet.",
                    "49,244 km across; winds reach 2,100 km/h.",
                    "Triton orbits backwards and is probably a captured Kuiper belt object.",
                ],
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Index after `index`, wrapping to 0.
    pub fn next_index(&self, index: usize) -> usize {
        if self.bodies.is_empty() {
            return 0;
        }
        (index + 1) % self.bodies.len()
    }

    /// Index before `index`, wrapping to the last body.
    pub fn prev_index(&self, index: usize) -> usize {
        if self.bodies.is_empty() {
            return 0;
        }
        (index + self.bodies.len() - 1) % self.bodies.len()
    }
}
