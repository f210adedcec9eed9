use log::debug;

use crate::{
    geometry_utils::landmark_distance,
    landmarks::{
        HandLandmarks, INDEX_FINGER_MCP, INDEX_FINGER_TIP, MIDDLE_FINGER_TIP, PALM_CENTRE,
        PINKY_MCP, PINKY_TIP, RING_FINGER_TIP,
    },
};

/// Hands whose knuckle span (index to pinky) is below this, in normalised
/// units, are too small or too partial to classify.
pub const MIN_HAND_SIZE: f32 = 0.05;

/// Fingertip-to-palm distances, each divided by the hand size so that the
/// same pose gives the same values at any distance from the camera.
///
/// The thumb is left out on purpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSet {
    pub index: f32,
    pub middle: f32,
    pub ring: f32,
    pub pinky: f32,
}

impl FeatureSet {
    pub fn new(index: f32, middle: f32, ring: f32, pinky: f32) -> Self {
        FeatureSet {
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn all(&self, predicate: impl Fn(f32) -> bool) -> bool {
        [self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .all(predicate)
    }
}

/// Distance between the index and pinky knuckles
pub fn hand_size(hand: &HandLandmarks) -> f32 {
    landmark_distance(hand.get(INDEX_FINGER_MCP), hand.get(PINKY_MCP))
}

/// Returns None when the hand is degenerate (see [`MIN_HAND_SIZE`]).
pub fn extract_features(hand: &HandLandmarks) -> Option<FeatureSet> {
    let size = hand_size(hand);
    if size < MIN_HAND_SIZE {
        debug!("Hand size {:.3} below minimum; skipping features", size);
        return None;
    }

    let palm = hand.get(PALM_CENTRE);
    let normalised = |tip: usize| landmark_distance(hand.get(tip), palm) / size;

    Some(FeatureSet {
        index: normalised(INDEX_FINGER_TIP),
        middle: normalised(MIDDLE_FINGER_TIP),
        ring: normalised(RING_FINGER_TIP),
        pinky: normalised(PINKY_TIP),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::landmarks::{Landmark, LANDMARK_COUNT, MIDDLE_FINGER_MCP};

    /// A hand with knuckles 0.1 apart and the given fingertip distances from
    /// the palm centre, so that feature values equal the given distances * 10.
    pub(crate) fn synthetic_hand(index: f32, middle: f32, ring: f32, pinky: f32) -> HandLandmarks {
        let mut points = [Landmark::new(0.5, 0.6, 0.); LANDMARK_COUNT];
        points[INDEX_FINGER_MCP] = Landmark::new(0.45, 0.5, 0.);
        points[PINKY_MCP] = Landmark::new(0.55, 0.5, 0.);
        points[MIDDLE_FINGER_MCP] = Landmark::new(0.5, 0.5, 0.);
        points[INDEX_FINGER_TIP] = Landmark::new(0.5, 0.5 - index, 0.);
        points[MIDDLE_FINGER_TIP] = Landmark::new(0.5, 0.5 - middle, 0.);
        points[RING_FINGER_TIP] = Landmark::new(0.5 + ring, 0.5, 0.);
        points[PINKY_TIP] = Landmark::new(0.5, 0.5 + pinky, 0.2);
        HandLandmarks::new(points)
    }

    #[test]
    fn test_features_are_scaled_by_hand_size() {
        let hand = synthetic_hand(0.07, 0.03, 0.03, 0.04);
        let features = extract_features(&hand).unwrap();
        assert_relative_eq!(hand_size(&hand), 0.1, epsilon = 1e-6);
        assert_relative_eq!(features.index, 0.7, epsilon = 1e-5);
        assert_relative_eq!(features.middle, 0.3, epsilon = 1e-5);
        assert_relative_eq!(features.ring, 0.3, epsilon = 1e-5);
        assert_relative_eq!(features.pinky, 0.4, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_hand_has_no_features() {
        let mut points = [Landmark::new(0.5, 0.5, 0.); LANDMARK_COUNT];
        points[INDEX_FINGER_MCP] = Landmark::new(0.49, 0.5, 0.);
        points[PINKY_MCP] = Landmark::new(0.51, 0.5, 0.);
        points[INDEX_FINGER_TIP] = Landmark::new(0.5, 0.1, 0.);
        let hand = HandLandmarks::new(points);
        assert!(extract_features(&hand).is_none());
    }

    #[test]
    fn test_depth_does_not_change_features() {
        let flat = synthetic_hand(0.07, 0.07, 0.07, 0.07);
        let mut points = *flat.points();
        for p in points.iter_mut() {
            p.z = -0.3;
        }
        points[INDEX_FINGER_TIP].z = 0.5;
        let deep = HandLandmarks::new(points);
        assert_eq!(extract_features(&flat), extract_features(&deep));
    }
}
