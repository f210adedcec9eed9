use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    features::{extract_features, FeatureSet},
    landmarks::HandLandmarks,
};

/// Above this (normalised) distance from the palm, a finger counts as extended
pub const EXTENDED_THRESHOLD: f32 = 0.6;

/// Below this, a finger counts as curled while pointing
pub const CURLED_THRESHOLD: f32 = 0.4;

/// The pinky never curls as far as the others in a natural pointing pose
pub const PINKY_CURLED_THRESHOLD: f32 = 0.45;

/// Below this, every finger counts as closed into a fist
pub const FIST_THRESHOLD: f32 = 0.35;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureLabel {
    Pointing,
    OpenPalm,
    Fist,
    #[default]
    None,
}

impl GestureLabel {
    pub fn is_none(&self) -> bool {
        matches!(self, GestureLabel::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Pointing => "Pointing",
            GestureLabel::OpenPalm => "Open Palm",
            GestureLabel::Fist => "Fist",
            GestureLabel::None => "None",
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map one hand's features to a gesture.
///
/// The rules overlap, so the order of the checks matters: most specific first.
pub fn classify(features: &FeatureSet) -> GestureLabel {
    let FeatureSet {
        index,
        middle,
        ring,
        pinky,
    } = *features;

    if index > EXTENDED_THRESHOLD
        && middle < CURLED_THRESHOLD
        && ring < CURLED_THRESHOLD
        && pinky < PINKY_CURLED_THRESHOLD
    {
        GestureLabel::Pointing
    } else if features.all(|d| d > EXTENDED_THRESHOLD) {
        GestureLabel::OpenPalm
    } else if features.all(|d| d < FIST_THRESHOLD) {
        GestureLabel::Fist
    } else {
        GestureLabel::None
    }
}

/// Degenerate hands (too small to measure) are always [`GestureLabel::None`]
pub fn classify_hand(hand: &HandLandmarks) -> GestureLabel {
    extract_features(hand)
        .map(|features| classify(&features))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tests::synthetic_hand;
    use crate::landmarks::{Landmark, INDEX_FINGER_MCP, LANDMARK_COUNT, PINKY_MCP};

    #[test]
    fn test_open_palm() {
        assert_eq!(classify(&FeatureSet::new(0.61, 0.7, 0.9, 1.5)), GestureLabel::OpenPalm);
        assert_eq!(classify(&FeatureSet::new(2., 2., 2., 2.)), GestureLabel::OpenPalm);
    }

    #[test]
    fn test_fist() {
        assert_eq!(classify(&FeatureSet::new(0.34, 0.1, 0.2, 0.3)), GestureLabel::Fist);
        assert_eq!(classify(&FeatureSet::new(0., 0., 0., 0.)), GestureLabel::Fist);
    }

    #[test]
    fn test_pointing_wins_over_other_rules() {
        assert_eq!(classify(&FeatureSet::new(0.7, 0.3, 0.3, 0.4)), GestureLabel::Pointing);
    }

    #[test]
    fn test_pinky_threshold_is_looser() {
        assert_eq!(classify(&FeatureSet::new(0.7, 0.3, 0.3, 0.44)), GestureLabel::Pointing);
        assert_eq!(classify(&FeatureSet::new(0.7, 0.3, 0.3, 0.46)), GestureLabel::None);
        assert_eq!(classify(&FeatureSet::new(0.7, 0.3, 0.41, 0.3)), GestureLabel::None);
    }

    #[test]
    fn test_no_rule_matches() {
        assert_eq!(classify(&FeatureSet::new(0.5, 0.5, 0.5, 0.5)), GestureLabel::None);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(classify(&FeatureSet::new(0.6, 0.7, 0.7, 0.7)), GestureLabel::None);
        assert_eq!(classify(&FeatureSet::new(0.35, 0.1, 0.1, 0.1)), GestureLabel::None);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let features = FeatureSet::new(0.65, 0.39, 0.1, 0.44);
        let first = classify(&features);
        for _ in 0..10 {
            assert_eq!(classify(&features), first);
        }
    }

    #[test]
    fn test_classify_hand() {
        assert_eq!(
            classify_hand(&synthetic_hand(0.07, 0.03, 0.03, 0.04)),
            GestureLabel::Pointing
        );
        assert_eq!(
            classify_hand(&synthetic_hand(0.08, 0.09, 0.08, 0.07)),
            GestureLabel::OpenPalm
        );
        assert_eq!(
            classify_hand(&synthetic_hand(0.02, 0.02, 0.01, 0.03)),
            GestureLabel::Fist
        );
    }

    #[test]
    fn test_tiny_hand_is_none_whatever_the_fingers() {
        // Fingertips far from the palm would be an open palm at any usable hand size
        let mut points = [Landmark::new(0.5, 0.5, 0.); LANDMARK_COUNT];
        points[INDEX_FINGER_MCP] = Landmark::new(0.48, 0.5, 0.);
        points[PINKY_MCP] = Landmark::new(0.52, 0.5, 0.);
        for tip in [8, 12, 16, 20] {
            points[tip] = Landmark::new(0.5, 0.1, 0.);
        }
        assert_eq!(classify_hand(&HandLandmarks::new(points)), GestureLabel::None);
    }
}
