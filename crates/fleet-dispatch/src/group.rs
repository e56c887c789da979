//! Spatial grouping around a seed order.

use crate::Candidate;

/// Claim a group from `ranked` for one robot.
///
/// The seed is the first unclaimed candidate.  The remaining unclaimed
/// candidates are then scanned in priority order and pulled in while their
/// squared distance to the seed is at most `radius_sq`, until the group holds
/// `limit` orders.  Every index returned is marked in `claimed`, so later
/// robots in the same cycle skip it.
///
/// Returns indices into `ranked`, seed first.  Empty if nothing is left to
/// claim or `limit` is zero.
pub fn form_group(
    ranked:    &[Candidate],
    claimed:   &mut [bool],
    radius_sq: i64,
    limit:     usize,
) -> Vec<usize> {
    debug_assert_eq!(ranked.len(), claimed.len());
    if limit == 0 {
        return Vec::new();
    }
    let Some(seed) = claimed.iter().position(|c| !c) else {
        return Vec::new();
    };
    claimed[seed] = true;
    let mut group = vec![seed];
    let origin = ranked[seed].location;

    for i in seed + 1..ranked.len() {
        if group.len() == limit {
            break;
        }
        if !claimed[i] && ranked[i].location.distance_sq(origin) <= radius_sq {
            claimed[i] = true;
            group.push(i);
        }
    }
    group
}
