//! コラッツ予想の軌道・木の可視化
//!
//! 開始値 n から 1 までの軌道、その後続グラフ（木）、木の階層レイアウトを計算し、
//! 折れ線グラフ / 頂点・辺図として描画するための図データを組み立てる。
//! 整数は全て BigUint で扱う。

pub mod config;
pub mod error;
pub mod figure;
pub mod layout;
pub mod scan;
pub mod sequence;
pub mod tree;

pub use config::Config;
pub use error::{CollatzError, Result};
pub use figure::{DiagramEdge, DiagramNode, FigureSize, SequenceChart, TreeDiagram};
pub use layout::{hierarchical_layout, LayoutMap, LayoutPos};
pub use scan::{scan_range, scan_range_parallel, trajectory_stats, ScanResult};
pub use sequence::{collatz_next, collatz_sequence, collatz_sequence_bounded, parse_start, CollatzIter, SequenceSummary};
pub use tree::{collatz_tree, collatz_tree_bounded, CollatzTree};
