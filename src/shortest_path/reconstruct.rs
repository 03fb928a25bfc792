use crate::errors::ShortestPathError;
use super::{PredecessorMatrix, PredecessorVector};


/// Rebuild the vertex sequence source..=target from a single-source
/// predecessor vector.
///
/// Returns `[source]` when source and target coincide and an empty path when
/// the target was never reached. A predecessor chain that cycles or breaks
/// before arriving at the source is a data-integrity bug, reported as
/// [`ShortestPathError::InconsistentPredecessors`].
pub fn reconstruct_path(
    predecessors: &PredecessorVector,
    source: usize,
    target: usize,
) -> Result<Vec<usize>, ShortestPathError> {
    walk_back(predecessors.len(), source, target, |vertex| {
        predecessors[vertex]
    })
}

/// Rebuild the vertex sequence source..=target from an all-pairs
/// predecessor matrix.
///
/// The walk only ever indexes the fixed source row; mixing rows would break
/// the convention that an improved pair inherits its predecessor from the
/// intermediate vertex's row.
pub fn reconstruct_path_all_pairs(
    predecessors: &PredecessorMatrix,
    source: usize,
    target: usize,
) -> Result<Vec<usize>, ShortestPathError> {
    walk_back(predecessors.len(), source, target, |vertex| {
        predecessors[source][vertex]
    })
}

/// Backward walk from target to source over predecessor links, bounded to
/// order steps so corrupt data cannot loop forever.
fn walk_back(
    order: usize,
    source: usize,
    target: usize,
    predecessor_of: impl Fn(usize) -> Option<usize>,
) -> Result<Vec<usize>, ShortestPathError> {
    if source == target {
        return Ok(vec![source]);
    }

    // An unreached target is a valid outcome, not an error
    if predecessor_of(target).is_none() {
        return Ok(Vec::new());
    }

    let mut path = vec![target];
    let mut current = target;
    let mut steps = 0;

    while current != source {
        current = match predecessor_of(current) {
            Some(previous) => previous,
            // target had a predecessor, so a hole further up is corruption
            None => {
                return Err(ShortestPathError::InconsistentPredecessors {
                    target,
                    max_steps: order,
                });
            }
        };
        path.push(current);

        steps += 1;
        if steps > order {
            return Err(ShortestPathError::InconsistentPredecessors {
                target,
                max_steps: order,
            });
        }
    }

    path.reverse();
    Ok(path)
}
