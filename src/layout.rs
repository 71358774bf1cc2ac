//! 階層レイアウト
//!
//! 根をレベル 0 に置き、各レベルの後続を連結したものを次のレベルとする。
//! レベル L の i 番目の頂点は座標 (i, -L) に置かれる。

use std::collections::HashMap;

use num_bigint::BigUint;

use crate::error::{CollatzError, Result};
use crate::tree::CollatzTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutPos {
    /// レベル内の並び順
    pub column: usize,
    /// 根からの幅優先深さ
    pub level: usize,
}

impl LayoutPos {
    /// 描画座標 (i, -L)
    pub fn coords(&self) -> (f64, f64) {
        (self.column as f64, -(self.level as f64))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutMap {
    /// 割り当て順
    entries: Vec<(BigUint, LayoutPos)>,
    lookup: HashMap<BigUint, usize>,
}

impl LayoutMap {
    pub fn get(&self, v: &BigUint) -> Option<LayoutPos> {
        self.lookup.get(v).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BigUint, LayoutPos)> + '_ {
        self.entries.iter().map(|(v, p)| (v, *p))
    }

    /// レベル数
    pub fn depth(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.level + 1).max().unwrap_or(0)
    }

    /// 最も広いレベルの頂点数
    pub fn width(&self) -> usize {
        self.entries.iter().map(|(_, p)| p.column + 1).max().unwrap_or(0)
    }

    fn insert(&mut self, v: &BigUint, pos: LayoutPos) {
        self.lookup.insert(v.clone(), self.entries.len());
        self.entries.push((v.clone(), pos));
    }
}

/// tree の各頂点に root からの階層座標を割り当てる。
/// 既に配置済みの頂点は再配置もキューへの再投入もしない。
pub fn hierarchical_layout(tree: &CollatzTree, root: &BigUint) -> Result<LayoutMap> {
    if !tree.contains(root) {
        return Err(CollatzError::UnknownRoot { root: root.clone() });
    }

    let mut layout = LayoutMap::default();
    let mut level = 0usize;
    let mut next_level: Vec<&BigUint> = vec![root];

    while !next_level.is_empty() {
        let current_level = std::mem::take(&mut next_level);
        let mut column = 0usize;
        for node in current_level {
            if layout.get(node).is_some() {
                continue;
            }
            layout.insert(node, LayoutPos { column, level });
            column += 1;
            next_level.extend(tree.successors(node));
        }
        level += 1;
    }

    Ok(layout)
}
