//! Group-against-group overlap tests producing kill-sets
//!
//! Nothing here mutates a collection. The scans return index sets, and the
//! caller removes the doomed entities afterwards with [`take_indices`].

use super::bounds::Rect;
use super::entities::Body;

/// Kill-set from a group-against-group pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupHits {
    /// Indices into the first group, in scan order
    pub first: Vec<usize>,
    /// Indices into the second group, in match order
    pub second: Vec<usize>,
}

impl GroupHits {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }
}

/// Match every member of `first` against the members of `second` that are
/// still unclaimed.
///
/// A first-group member that touches at least one unclaimed second-group
/// member is doomed together with everything it touched. When `claim_second`
/// is false the second group is left intact (a shield that stops several
/// bombs).
pub fn group_collide<A: Body, B: Body>(first: &[A], second: &[B], claim_second: bool) -> GroupHits {
    let mut hits = GroupHits::default();
    let mut claimed = vec![false; second.len()];

    for (i, a) in first.iter().enumerate() {
        let mut touched = false;
        for (j, b) in second.iter().enumerate() {
            if claimed[j] || !a.rect().overlaps(b.rect()) {
                continue;
            }
            touched = true;
            if claim_second {
                claimed[j] = true;
                hits.second.push(j);
            }
        }
        if touched {
            hits.first.push(i);
        }
    }

    hits
}

/// Indices of the group members touching `target`
pub fn touching<B: Body>(target: &Rect, group: &[B]) -> Vec<usize> {
    group
        .iter()
        .enumerate()
        .filter(|(_, b)| target.overlaps(b.rect()))
        .map(|(i, _)| i)
        .collect()
}

/// Remove the members at `indices`, returning them in collection order.
/// Out-of-range and duplicate indices are ignored.
pub fn take_indices<T>(items: &mut Vec<T>, indices: &[usize]) -> Vec<T> {
    if indices.is_empty() {
        return Vec::new();
    }
    let mut doomed = vec![false; items.len()];
    for &i in indices {
        if let Some(slot) = doomed.get_mut(i) {
            *slot = true;
        }
    }

    let mut taken = Vec::with_capacity(indices.len());
    let mut kept = Vec::with_capacity(items.len());
    for (item, dead) in items.drain(..).zip(doomed) {
        if dead {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    taken
}
