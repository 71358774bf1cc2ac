//! 範囲走査
//!
//! 区間内の全開始値について軌道長と最大値を求める。並列版は rayon でチャンク分割する。

use num_bigint::BigUint;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::error::{CollatzError, Result};
use crate::sequence::CollatzIter;

/// 範囲走査の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// 走査した開始値の総数
    pub total_checked: u64,
    /// 全て max_steps 以内に 1 へ到達したか
    pub all_reached_one: bool,
    /// 最長軌道: (開始値, ステップ数)。同数なら小さい開始値
    pub longest: Option<(u64, u64)>,
    /// 最大到達値: (開始値, 最大値)。同値なら小さい開始値
    pub highest_peak: Option<(u64, BigUint)>,
    /// max_steps 以内に 1 へ届かなかった開始値（昇順）
    pub failures: Vec<u64>,
}

impl ScanResult {
    fn empty() -> Self {
        ScanResult {
            total_checked: 0,
            all_reached_one: true,
            longest: None,
            highest_peak: None,
            failures: Vec::new(),
        }
    }

    fn record(&mut self, n: u64, outcome: Option<(u64, BigUint)>) {
        self.total_checked += 1;
        match outcome {
            Some((steps, peak)) => {
                self.merge_longest(Some((n, steps)));
                self.merge_peak(Some((n, peak)));
            }
            None => {
                self.all_reached_one = false;
                self.failures.push(n);
            }
        }
    }

    fn merge_longest(&mut self, other: Option<(u64, u64)>) {
        self.longest = match (self.longest, other) {
            (Some(a), Some(b)) => Some(if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a }),
            (a, b) => a.or(b),
        };
    }

    fn merge_peak(&mut self, other: Option<(u64, BigUint)>) {
        self.highest_peak = match (self.highest_peak.take(), other) {
            (Some(a), Some(b)) => Some(if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) { b } else { a }),
            (a, b) => a.or(b),
        };
    }

    fn merge(mut self, other: ScanResult) -> ScanResult {
        self.total_checked += other.total_checked;
        self.all_reached_one &= other.all_reached_one;
        self.merge_longest(other.longest);
        self.merge_peak(other.highest_peak);
        self.failures.extend(other.failures);
        self
    }
}

/// 1 までのステップ数と最大値。max_steps を超えたら None。
pub fn trajectory_stats(n: &BigUint, max_steps: u64) -> Option<(u64, BigUint)> {
    let mut peak = n.clone();
    let mut steps = 0u64;
    for v in CollatzIter::new(n).ok()?.skip(1) {
        steps += 1;
        if steps > max_steps {
            return None;
        }
        if v > peak {
            peak = v;
        }
    }
    Some((steps, peak))
}

/// [start, end] の全整数を走査する（シングルスレッド版）。
pub fn scan_range(start: u64, end: u64, config: &Config) -> Result<ScanResult> {
    if start == 0 {
        return Err(CollatzError::invalid_input(start));
    }
    let mut result = ScanResult::empty();
    for n in start..=end {
        result.record(n, trajectory_stats(&BigUint::from(n), config.max_steps));
    }
    Ok(result)
}

/// [start, end] の全整数を走査する（並列版）。
/// Rayon でチャンク分割して並列処理し、チャンクごとの結果を畳み込む。
/// progress_callback: (完了数, 総数) をチャンク完了ごとに呼ぶ（スレッドセーフ）。
pub fn scan_range_parallel(
    start: u64,
    end: u64,
    config: &Config,
    progress_callback: impl Fn(u64, u64) + Sync,
) -> Result<ScanResult> {
    if start == 0 {
        return Err(CollatzError::invalid_input(start));
    }
    if start > end {
        return Ok(ScanResult::empty());
    }

    let total = end - start + 1;
    let chunk_size = config.scan_chunk_size.max(1);
    let num_chunks = total.div_ceil(chunk_size);
    let done = AtomicU64::new(0);

    let mut result = (0..num_chunks)
        .into_par_iter()
        .map(|chunk_idx| {
            let chunk_start = start + chunk_idx * chunk_size;
            let chunk_end = chunk_start.saturating_add(chunk_size - 1).min(end);
            let mut local = ScanResult::empty();
            for n in chunk_start..=chunk_end {
                local.record(n, trajectory_stats(&BigUint::from(n), config.max_steps));
            }
            let count = chunk_end - chunk_start + 1;
            let finished = done.fetch_add(count, Ordering::Relaxed) + count;
            progress_callback(finished, total);
            local
        })
        .reduce(ScanResult::empty, ScanResult::merge);

    result.failures.sort_unstable();
    tracing::info!(
        start,
        end,
        checked = result.total_checked,
        failures = result.failures.len(),
        "range scan finished"
    );
    Ok(result)
}
