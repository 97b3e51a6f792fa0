//! Shape geometry
//!
//! Three fixed archetypes, each with a canonical size, plus the factory that
//! turns a type selector into a colored [`Shape`].

use std::str::FromStr;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Shape, ShapeId};
use crate::error::SimError;

/// Shape archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeometryType {
    Triangle,
    Rect,
    Circle,
}

impl GeometryType {
    pub const ALL: [GeometryType; 3] = [
        GeometryType::Triangle,
        GeometryType::Rect,
        GeometryType::Circle,
    ];

    /// Canonical (width, height) of the shape's bounding box
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            GeometryType::Triangle => (160, 80),
            GeometryType::Rect => (100, 100),
            // radius 60
            GeometryType::Circle => (120, 120),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Triangle => "TRIANGLE",
            GeometryType::Rect => "RECT",
            GeometryType::Circle => "CIRCLE",
        }
    }

    /// Uniform pick over [`GeometryType::ALL`]
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

impl FromStr for GeometryType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRIANGLE" => Ok(GeometryType::Triangle),
            "RECT" => Ok(GeometryType::Rect),
            "CIRCLE" => Ok(GeometryType::Circle),
            _ => {
                log::warn!("Rejected unsupported geometry type {s:?}");
                Err(SimError::UnsupportedGeometryType(s.to_string()))
            }
        }
    }
}

/// 24-bit RGB color packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const MAX: u32 = 0xFF_FFFF;

    pub fn random(rng: &mut impl Rng) -> Self {
        Rgb(rng.random_range(0..=Self::MAX))
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }

    /// Float components for vertex colors
    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [
            self.r() as f32 / 255.0,
            self.g() as f32 / 255.0,
            self.b() as f32 / 255.0,
            alpha,
        ]
    }
}

/// Build a shape of the given type at `position` with two fresh random colors.
///
/// Does not touch the simulation state; the caller allocates `id` and inserts
/// the result.
pub fn create_shape(
    id: ShapeId,
    position: Vec2,
    geometry_type: GeometryType,
    rng: &mut impl Rng,
) -> Shape {
    let (width, height) = geometry_type.dimensions();
    let fill_color = Rgb::random(rng);
    let border_color = Rgb::random(rng);

    Shape {
        id,
        geometry_type,
        position,
        fill_color,
        border_color,
        width,
        height,
    }
}
