//! Topological evaluation order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Order `count` vertices so every edge `(from, to)` has `from` before `to`.
///
/// Kahn's algorithm; among ready vertices the lowest index goes first, so the
/// result is deterministic and follows insertion order where the wiring
/// leaves a choice. Parallel edges are fine.
///
/// On a cycle, returns the vertices that could not be ordered (every vertex
/// on or downstream of a cycle), ascending.
pub fn topological_order(count: usize, edges: &[(usize, usize)]) -> Result<Vec<usize>, Vec<usize>> {
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut in_degree = vec![0_usize; count];

    for &(from, to) in edges {
        adj[from].push(to);
        in_degree[to] += 1;
    }

    let mut ready: BinaryHeap<Reverse<usize>> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, deg)| **deg == 0)
        .map(|(v, _)| Reverse(v))
        .collect();

    let mut order = Vec::with_capacity(count);
    while let Some(Reverse(v)) = ready.pop() {
        order.push(v);
        for &next in &adj[v] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    if order.len() == count {
        Ok(order)
    } else {
        Err((0..count).filter(|v| in_degree[*v] > 0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_graph() {
        assert_eq!(topological_order(0, &[]), Ok(vec![]));
    }

    #[test]
    fn chain_is_reordered() {
        // 3 -> 1 -> 2 -> 0
        let order = topological_order(4, &[(3, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn ties_follow_index() {
        let order = topological_order(3, &[]).unwrap();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn parallel_edges_counted() {
        let order = topological_order(2, &[(1, 0), (1, 0)]).unwrap();
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn cycle_reports_members() {
        // 0 -> 1 -> 2 -> 1, 3 free
        let err = topological_order(4, &[(0, 1), (1, 2), (2, 1)]).unwrap_err();
        assert_eq!(err, vec![1, 2]);
    }

    #[test]
    fn self_loop_is_cycle() {
        assert_eq!(topological_order(1, &[(0, 0)]), Err(vec![0]));
    }

    proptest! {
        #[test]
        fn forward_edges_always_sort(count in 1_usize..12, raw in prop::collection::vec((0_usize..12, 0_usize..12), 0..30)) {
            // Only keep edges low -> high so the graph is acyclic.
            let edges: Vec<(usize, usize)> = raw
                .into_iter()
                .map(|(a, b)| (a % count, b % count))
                .filter(|(a, b)| a < b)
                .collect();
            let order = topological_order(count, &edges).unwrap();
            prop_assert_eq!(order.len(), count);
            let pos: Vec<usize> = {
                let mut p = vec![0; count];
                for (i, v) in order.iter().enumerate() {
                    p[*v] = i;
                }
                p
            };
            for (a, b) in edges {
                prop_assert!(pos[a] < pos[b]);
            }
        }
    }
}
