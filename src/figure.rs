//! 描画用の図データ
//!
//! 描画のたびに図を新しく組み立てて呼び出し側が所有する。共有の描画先は持たない。
//! GUI (egui_plot) と CLI (テキスト) の双方がここから描く。

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::fmt::Write as _;

use crate::error::Result;
use crate::layout::{hierarchical_layout, LayoutPos};
use crate::sequence::{collatz_sequence_bounded, SequenceSummary};
use crate::tree::collatz_tree_bounded;

/// 図の大きさ（インチ相当の比率）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width: f32,
    pub height: f32,
}

pub const SEQUENCE_FIGURE_SIZE: FigureSize = FigureSize { width: 10.0, height: 6.0 };
pub const TREE_FIGURE_SIZE: FigureSize = FigureSize { width: 12.0, height: 8.0 };

/// lightblue
pub const NODE_COLOR: [u8; 3] = [173, 216, 230];
pub const NODE_SIZE: f32 = 500.0;
pub const NODE_FONT_SIZE: f32 = 10.0;
pub const ARROW_SIZE: f32 = 20.0;

/// 軌道の折れ線グラフ（横軸 step、縦軸 値）
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceChart {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub values: Vec<BigUint>,
    /// 横軸の目盛りは整数のみ
    pub x_ticks: Vec<usize>,
    pub grid: bool,
    pub markers: bool,
    /// 最大値が f64 に収まらないとき縦軸を log2 にする
    pub log_scale: bool,
    pub size: FigureSize,
}

impl SequenceChart {
    pub fn new(n: &BigUint, max_steps: u64) -> Result<Self> {
        let values = collatz_sequence_bounded(n, max_steps)?;
        let log_scale = values
            .iter()
            .max()
            .and_then(|p| p.to_f64())
            .map_or(true, |p| !p.is_finite());
        tracing::debug!(start = %n, len = values.len(), log_scale, "sequence chart built");
        Ok(Self {
            title: format!("Collatz Conjecture Sequence for {}", n),
            x_label: "Step",
            y_label: if log_scale { "log2(Value)" } else { "Value" },
            x_ticks: (0..values.len()).collect(),
            values,
            grid: true,
            markers: true,
            log_scale,
            size: SEQUENCE_FIGURE_SIZE,
        })
    }

    /// 縦軸の座標。log_scale なら log2(v)
    fn y_of(&self, v: &BigUint) -> f64 {
        if self.log_scale {
            log2_approx(v)
        } else {
            v.to_f64().unwrap_or(f64::MAX)
        }
    }

    /// (step, y) の点列
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64, self.y_of(v)])
            .collect()
    }

    pub fn summary(&self) -> Option<SequenceSummary> {
        SequenceSummary::from_sequence(&self.values)
    }

    /// テキスト版の横棒グラフ。bar_width は最大値の棒の長さ。
    pub fn render_text(&self, bar_width: usize) -> String {
        let mut out = String::new();
        writeln!(out, "{}", self.title).ok();
        writeln!(out, "  {:>6}  {:>20}", self.x_label, self.y_label).ok();

        let peak = self
            .values
            .iter()
            .max()
            .map(|p| self.y_of(p))
            .unwrap_or(1.0)
            .max(1.0);
        for (step, v) in self.values.iter().enumerate() {
            let ratio = self.y_of(v) / peak;
            let len = ((ratio * bar_width as f64).round() as usize).max(1);
            writeln!(out, "  {:>6}  {:>20}  {}", step, format_value(v), "#".repeat(len)).ok();
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub value: BigUint,
    pub label: String,
    pub pos: LayoutPos,
}

impl DiagramNode {
    pub fn coords(&self) -> (f64, f64) {
        self.pos.coords()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagramEdge {
    pub from: LayoutPos,
    pub to: LayoutPos,
}

/// 木の頂点・辺図。根がレベル 0 で最上段。
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDiagram {
    pub title: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub node_size: f32,
    pub node_color: [u8; 3],
    pub font_size: f32,
    pub bold_labels: bool,
    pub arrow_size: f32,
    pub size: FigureSize,
}

impl TreeDiagram {
    pub fn new(n: &BigUint, max_steps: u64) -> Result<Self> {
        let tree = collatz_tree_bounded(n, max_steps)?;
        let layout = hierarchical_layout(&tree, tree.root())?;

        let nodes: Vec<DiagramNode> = layout
            .iter()
            .map(|(v, pos)| DiagramNode {
                value: v.clone(),
                label: v.to_string(),
                pos,
            })
            .collect();
        let edges: Vec<DiagramEdge> = tree
            .edges()
            .filter_map(|(a, b)| {
                Some(DiagramEdge {
                    from: layout.get(a)?,
                    to: layout.get(b)?,
                })
            })
            .collect();
        tracing::debug!(
            root = %n,
            nodes = nodes.len(),
            edges = edges.len(),
            levels = layout.depth(),
            "tree diagram built"
        );

        Ok(Self {
            title: format!("Collatz Conjecture Tree for {}", n),
            nodes,
            edges,
            node_size: NODE_SIZE,
            node_color: NODE_COLOR,
            font_size: NODE_FONT_SIZE,
            bold_labels: true,
            arrow_size: ARROW_SIZE,
            size: TREE_FIGURE_SIZE,
        })
    }

    /// レベルごとに1行、レベル間を矢印でつなぐ
    pub fn render_text(&self) -> String {
        let mut levels: Vec<Vec<&DiagramNode>> = Vec::new();
        for node in &self.nodes {
            let l = node.pos.level;
            if levels.len() <= l {
                levels.resize_with(l + 1, Vec::new);
            }
            levels[l].push(node);
        }

        let mut out = String::new();
        writeln!(out, "{}", self.title).ok();
        for (i, level) in levels.iter().enumerate() {
            if i > 0 {
                writeln!(out, "  {:>4}  ↓", "").ok();
            }
            let mut row = level.clone();
            row.sort_by_key(|n| n.pos.column);
            let labels: Vec<&str> = row.iter().map(|n| n.label.as_str()).collect();
            writeln!(out, "  L{:<3}  {}", i, labels.join("   ")).ok();
        }
        out
    }
}

/// log2(v) の近似。上位 64 ビットだけを f64 に変換するので桁あふれしない。
pub fn log2_approx(v: &BigUint) -> f64 {
    let shift = v.bits().saturating_sub(64);
    let top = (v >> shift).to_f64().unwrap_or(0.0);
    top.log2() + shift as f64
}

/// 長すぎる値は先頭と末尾だけ表示する
pub fn format_value(v: &BigUint) -> String {
    let s = v.to_string();
    if s.len() <= 20 {
        s
    } else {
        format!("{}...{} ({}桁)", &s[..6], &s[s.len() - 6..], s.len())
    }
}
