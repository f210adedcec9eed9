use indexmap::IndexMap;
use serde::Serialize;

use crate::classifier::GestureLabel;

/// Current gesture for each hand slot, in the order the detector reported
/// the hands. Slot numbers are only meaningful within a single frame.
///
/// There is no smoothing: every frame replaces the whole mapping, so a hand
/// near a threshold can flicker between labels from one frame to the next.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PerHandState {
    gestures: IndexMap<usize, GestureLabel>,
}

/// A slot whose label differs from the previous frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureChange {
    pub slot: usize,
    pub previous: Option<GestureLabel>,
    pub current: Option<GestureLabel>,
}

impl PerHandState {
    pub fn new() -> Self {
        PerHandState::default()
    }

    /// Discard everything and take on the labels for the current frame
    pub fn replace_all(&mut self, labels: impl IntoIterator<Item = GestureLabel>) {
        self.gestures = labels.into_iter().enumerate().collect();
    }

    pub fn clear(&mut self) {
        self.gestures.clear();
    }

    pub fn get(&self, slot: usize) -> Option<GestureLabel> {
        self.gestures.get(&slot).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, GestureLabel)> + '_ {
        self.gestures.iter().map(|(slot, label)| (*slot, *label))
    }

    pub fn labels(&self) -> Vec<GestureLabel> {
        self.gestures.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Slots that appeared, disappeared or changed label since `previous`
    pub fn changes_from(&self, previous: &PerHandState) -> Vec<GestureChange> {
        let slots = self.len().max(previous.len());
        (0..slots)
            .filter_map(|slot| {
                let (before, now) = (previous.get(slot), self.get(slot));
                if before != now {
                    Some(GestureChange {
                        slot,
                        previous: before,
                        current: now,
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}
