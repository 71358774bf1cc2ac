//! コラッツ木（後続グラフ）
//!
//! 根から幅優先で写像を適用し、各値からその後続値への辺を張る。
//! 後続は常に1つなので、結果は軌道と同じ頂点集合を持つ一本道になる。

use std::collections::{HashMap, VecDeque};

use num_bigint::BigUint;
use num_traits::One;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::error::{CollatzError, Result};
use crate::sequence::{collatz_next, ensure_positive};

#[derive(Debug, Clone)]
pub struct CollatzTree {
    graph: DiGraph<BigUint, ()>,
    /// 値 → NodeIndex
    index: HashMap<BigUint, NodeIndex>,
    root: BigUint,
}

impl CollatzTree {
    pub(crate) fn with_root(root: &BigUint) -> Self {
        let mut tree = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: root.clone(),
        };
        tree.add_node(root);
        tree
    }

    fn add_node(&mut self, v: &BigUint) -> NodeIndex {
        if let Some(&idx) = self.index.get(v) {
            return idx;
        }
        let idx = self.graph.add_node(v.clone());
        self.index.insert(v.clone(), idx);
        idx
    }

    /// 既に同じ辺があれば何もしない
    pub(crate) fn add_edge(&mut self, from: &BigUint, to: &BigUint) {
        let a = self.add_node(from);
        let b = self.add_node(to);
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, ());
        }
    }

    pub fn root(&self) -> &BigUint {
        &self.root
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, v: &BigUint) -> bool {
        self.index.contains_key(v)
    }

    /// 頂点（追加順）
    pub fn nodes(&self) -> impl Iterator<Item = &BigUint> + '_ {
        self.graph.node_weights()
    }

    /// 辺 (from, to)（追加順）
    pub fn edges(&self) -> impl Iterator<Item = (&BigUint, &BigUint)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(move |e| (&self.graph[e.source()], &self.graph[e.target()]))
    }

    /// v の出辺の行き先（辺の追加順）。v が無ければ空。
    pub fn successors(&self, v: &BigUint) -> Vec<&BigUint> {
        let Some(&idx) = self.index.get(v) else {
            return Vec::new();
        };
        // petgraph の neighbors は新しい辺から返すので反転する
        let mut out: Vec<&BigUint> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| &self.graph[n])
            .collect();
        out.reverse();
        out
    }

    pub fn graph(&self) -> &DiGraph<BigUint, ()> {
        &self.graph
    }
}

/// n を根とするコラッツ木を構築する。
pub fn collatz_tree(n: &BigUint) -> Result<CollatzTree> {
    build(n, None)
}

/// ステップ数上限付き版
pub fn collatz_tree_bounded(n: &BigUint, max_steps: u64) -> Result<CollatzTree> {
    build(n, Some(max_steps))
}

fn build(n: &BigUint, max_steps: Option<u64>) -> Result<CollatzTree> {
    ensure_positive(n)?;
    let mut tree = CollatzTree::with_root(n);
    let mut pending: VecDeque<BigUint> = VecDeque::from([n.clone()]);
    let mut steps = 0u64;

    while let Some(current) = pending.pop_front() {
        if current.is_one() {
            continue;
        }
        if let Some(limit) = max_steps {
            if steps >= limit {
                return Err(CollatzError::StepLimitExceeded {
                    start: n.clone(),
                    max_steps: limit,
                });
            }
        }
        let next = collatz_next(&current);
        tree.add_edge(&current, &next);
        pending.push_back(next);
        steps += 1;
    }

    tracing::debug!(
        root = %n,
        nodes = tree.node_count(),
        edges = tree.edge_count(),
        "collatz tree built"
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn test_tree_1() {
        let t = collatz_tree(&big(1)).unwrap();
        assert_eq!(t.node_count(), 1);
        assert_eq!(t.edge_count(), 0);
        assert!(t.successors(&big(1)).is_empty());
    }

    #[test]
    fn test_tree_6_edges() {
        let t = collatz_tree(&big(6)).unwrap();
        let edges: Vec<(u64, u64)> = t
            .edges()
            .map(|(a, b)| (a.to_u64_digits()[0], b.to_u64_digits()[0]))
            .collect();
        assert_eq!(
            edges,
            vec![(6, 3), (3, 10), (10, 5), (5, 16), (16, 8), (8, 4), (4, 2), (2, 1)]
        );
        assert_eq!(t.root(), &big(6));
        assert_eq!(t.successors(&big(10)), vec![&big(5)]);
        assert!(t.successors(&big(7)).is_empty());
    }

    #[test]
    fn test_zero_rejected() {
        assert!(matches!(
            collatz_tree(&BigUint::zero()),
            Err(CollatzError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_bounded() {
        assert_eq!(collatz_tree_bounded(&big(6), 8).unwrap().edge_count(), 8);
        assert!(matches!(
            collatz_tree_bounded(&big(6), 7),
            Err(CollatzError::StepLimitExceeded { max_steps: 7, .. })
        ));
    }

    #[test]
    fn test_duplicate_edge_ignored() {
        let mut t = CollatzTree::with_root(&big(2));
        t.add_edge(&big(2), &big(1));
        t.add_edge(&big(2), &big(1));
        assert_eq!(t.edge_count(), 1);
        assert_eq!(t.node_count(), 2);
    }
}
