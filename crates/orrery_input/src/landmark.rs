//! Hand landmarks as produced by the landmark detector.
//!
//! Indices follow the 21-point hand model: 0 is the wrist, then four
//! joints per finger from thumb to pinky, ending at each fingertip.

use serde::{Deserialize, Serialize};

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
/// Middle-finger base, used as the palm centre.
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

/// Fingertips, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Joint each fingertip is compared against by the fist test.
///
/// The thumb uses its IP joint; the other fingers their MCP knuckle.
pub const CLOSURE_JOINTS: [usize; 5] = [THUMB_IP, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// One tracked point: x/y normalized to the frame, z relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn flat(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Planar distance, ignoring depth.
    pub fn distance(&self, other: &Landmark) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A complete, finite 21-point hand.
///
/// Only constructible from input that passed validation, so detectors
/// never see partial hands.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    /// Validate raw detector output.
    ///
    /// Returns `None` for fewer than 21 points or any non-finite
    /// coordinate; extra trailing points are ignored.
    pub fn from_points(points: &[Landmark]) -> Option<Self> {
        let head = points.get(..LANDMARK_COUNT)?;
        if !head.iter().all(Landmark::is_finite) {
            return None;
        }
        let mut frame = [Landmark::default(); LANDMARK_COUNT];
        frame.copy_from_slice(head);
        Some(Self { points: frame })
    }

    /// Landmark by index. Panics past [`LANDMARK_COUNT`]; pass one of the
    /// named index constants.
    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    pub fn palm_center(&self) -> Landmark {
        self.points[MIDDLE_MCP]
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.points[THUMB_TIP]
    }

    /// The five fingertips, thumb first.
    pub fn fingertips(&self) -> [Landmark; 5] {
        FINGERTIPS.map(|i| self.points[i])
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

/// Planar centroid of a set of points.
pub fn centroid(points: &[Landmark]) -> Option<Landmark> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Landmark::flat(sx / n, sy / n))
}

/// Synthetic hands for tests, shared with downstream crates through the
/// `test-support` feature.
#[cfg(any(test, feature = "test-support"))]
pub mod fixtures {
    use super::*;

    /// An open hand, fingers pointing up, palm centre at `(cx, cy)`.
    pub fn open_hand(cx: f32, cy: f32) -> Vec<Landmark> {
        let mut pts = vec![Landmark::flat(cx, cy); LANDMARK_COUNT];
        pts[WRIST] = Landmark::flat(cx, cy + 0.15);
        // Thumb sticks out sideways, well beyond the fist tolerance.
        pts[THUMB_IP] = Landmark::flat(cx - 0.08, cy + 0.02);
        pts[THUMB_TIP] = Landmark::new(cx - 0.14, cy - 0.02, -0.04);
        for (mcp, tip, dx) in [
            (INDEX_MCP, INDEX_TIP, -0.04),
            (MIDDLE_MCP, MIDDLE_TIP, 0.0),
            (RING_MCP, RING_TIP, 0.04),
            (PINKY_MCP, PINKY_TIP, 0.08),
        ] {
            pts[mcp] = Landmark::flat(cx + dx, cy);
            pts[tip] = Landmark::flat(cx + dx, cy - 0.12);
        }
        pts
    }

    /// A closed fist: tips curled below their knuckles, thumb tucked.
    pub fn fist(cx: f32, cy: f32) -> Vec<Landmark> {
        let mut pts = open_hand(cx, cy);
        pts[THUMB_TIP] = Landmark::new(cx - 0.07, cy + 0.03, -0.02);
        for (mcp, tip) in [
            (INDEX_MCP, INDEX_TIP),
            (MIDDLE_MCP, MIDDLE_TIP),
            (RING_MCP, RING_TIP),
            (PINKY_MCP, PINKY_TIP),
        ] {
            pts[tip] = Landmark::flat(pts[mcp].x, pts[mcp].y + 0.03);
        }
        pts
    }

    /// Fingertips spread on a circle of `radius` centred 0.2 above the palm
    /// centre `(cx, cy)`, thumb at angle `theta`, the others following at
    /// 72 degree steps. Every tip stays above its knuckle, so the pose never
    /// reads as a fist.
    pub fn dial(cx: f32, cy: f32, radius: f32, theta: f32) -> Vec<Landmark> {
        let mut pts = open_hand(cx, cy);
        let oy = cy - 0.2;
        for (k, tip) in FINGERTIPS.iter().enumerate() {
            let a = theta + k as f32 * std::f32::consts::TAU / 5.0;
            pts[*tip] = Landmark::flat(cx + radius * a.cos(), oy + radius * a.sin());
        }
        pts
    }
}
