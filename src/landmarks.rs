//! Hand landmark topology, as produced by the landmark detector.
//!
//! A hand is always exactly 21 points, indexed by anatomical position. The
//! indices below are an external contract with the detector and must not
//! change.

use serde::{Deserialize, Serialize};

use crate::Point2D;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_MCP: usize = 5;
pub const INDEX_FINGER_PIP: usize = 6;
pub const INDEX_FINGER_DIP: usize = 7;
pub const INDEX_FINGER_TIP: usize = 8;
pub const MIDDLE_FINGER_MCP: usize = 9;
pub const MIDDLE_FINGER_PIP: usize = 10;
pub const MIDDLE_FINGER_DIP: usize = 11;
pub const MIDDLE_FINGER_TIP: usize = 12;
pub const RING_FINGER_MCP: usize = 13;
pub const RING_FINGER_PIP: usize = 14;
pub const RING_FINGER_DIP: usize = 15;
pub const RING_FINGER_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// The middle finger knuckle, used as a stand-in for the palm centroid
pub const PALM_CENTRE: usize = MIDDLE_FINGER_MCP;

/// Bones of the hand skeleton, as pairs of landmark indices
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Thumb
    (WRIST, THUMB_CMC),
    (THUMB_CMC, THUMB_MCP),
    (THUMB_MCP, THUMB_IP),
    (THUMB_IP, THUMB_TIP),
    // Index
    (WRIST, INDEX_FINGER_MCP),
    (INDEX_FINGER_MCP, INDEX_FINGER_PIP),
    (INDEX_FINGER_PIP, INDEX_FINGER_DIP),
    (INDEX_FINGER_DIP, INDEX_FINGER_TIP),
    // Middle
    (INDEX_FINGER_MCP, MIDDLE_FINGER_MCP),
    (MIDDLE_FINGER_MCP, MIDDLE_FINGER_PIP),
    (MIDDLE_FINGER_PIP, MIDDLE_FINGER_DIP),
    (MIDDLE_FINGER_DIP, MIDDLE_FINGER_TIP),
    // Ring
    (MIDDLE_FINGER_MCP, RING_FINGER_MCP),
    (RING_FINGER_MCP, RING_FINGER_PIP),
    (RING_FINGER_PIP, RING_FINGER_DIP),
    (RING_FINGER_DIP, RING_FINGER_TIP),
    // Pinky, and back to the wrist
    (RING_FINGER_MCP, PINKY_MCP),
    (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP),
    (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// Fingertip landmarks with the names shown next to them
pub const FINGERTIPS: [(usize, &str); 5] = [
    (THUMB_TIP, "Thumb"),
    (INDEX_FINGER_TIP, "Index"),
    (MIDDLE_FINGER_TIP, "Middle"),
    (RING_FINGER_TIP, "Ring"),
    (PINKY_TIP, "Pinky"),
];

/// One normalised hand keypoint. `x` and `y` are in the range [0;1] relative
/// to the frame dimensions; smaller `z` is closer to the camera.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }

    /// Projection onto the image plane; depth is dropped
    pub fn xy(&self) -> Point2D {
        (self.x, self.y)
    }
}

/// A single detected hand: exactly [`LANDMARK_COUNT`] landmarks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "Vec<Landmark>", into = "Vec<Landmark>")]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        HandLandmarks { points }
    }

    pub fn get(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.points.iter()
    }

    /// Smallest and largest depth across the whole hand
    pub fn depth_range(&self) -> (f32, f32) {
        self.points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
                (min.min(p.z), max.max(p.z))
            })
    }
}

impl TryFrom<Vec<Landmark>> for HandLandmarks {
    type Error = String;

    fn try_from(points: Vec<Landmark>) -> Result<Self, Self::Error> {
        let count = points.len();
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| format!("expected {} landmarks per hand, got {}", LANDMARK_COUNT, count))?;
        Ok(HandLandmarks { points })
    }
}

impl From<HandLandmarks> for Vec<Landmark> {
    fn from(hand: HandLandmarks) -> Self {
        hand.points.to_vec()
    }
}

/// Everything the detector found in one video frame, in detector order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HandLandmarkerResult {
    pub hands: Vec<HandLandmarks>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_landmark_count() {
        let too_few = vec![Landmark::default(); 20];
        assert!(HandLandmarks::try_from(too_few).is_err());

        let exact = vec![Landmark::default(); LANDMARK_COUNT];
        assert!(HandLandmarks::try_from(exact).is_ok());
    }

    #[test]
    fn test_parse_hand_from_json() {
        let points: Vec<String> = (0..LANDMARK_COUNT)
            .map(|i| format!("{{\"x\":{},\"y\":0.5,\"z\":-0.01}}", i as f32 / 100.))
            .collect();
        let json = format!("{{\"hands\":[[{}]]}}", points.join(","));
        let result: HandLandmarkerResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.hands.len(), 1);
        assert_eq!(result.hands[0].get(PINKY_TIP).x, 0.2);
    }

    #[test]
    fn test_depth_range() {
        let mut points = [Landmark::new(0.5, 0.5, 0.); LANDMARK_COUNT];
        points[THUMB_TIP].z = -0.2;
        points[PINKY_TIP].z = 0.1;
        let hand = HandLandmarks::new(points);
        assert_eq!(hand.depth_range(), (-0.2, 0.1));
    }

    #[test]
    fn test_connections_stay_within_topology() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < LANDMARK_COUNT && b < LANDMARK_COUNT);
        }
    }
}
