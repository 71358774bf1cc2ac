//! コラッツ写像と軌道
//!
//! 開始値から 1 までの軌道を生成する。整数は BigUint。

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::str::FromStr;

use crate::error::{CollatzError, Result};

/// コラッツ写像 f(x) = x/2 (x 偶数), 3x+1 (x 奇数)
#[inline]
pub fn collatz_next(x: &BigUint) -> BigUint {
    if x.is_even() {
        x >> 1u32
    } else {
        x * 3u32 + 1u32
    }
}

/// 文字列を開始値として解釈する。正の整数以外は InvalidInput。
/// 受け付けるのは 10 進数字のみ（前後の空白と先頭の 0 は可、符号や `_` は不可）。
pub fn parse_start(s: &str) -> Result<BigUint> {
    let digits = s.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CollatzError::invalid_input(digits));
    }
    let n = BigUint::from_str(digits).map_err(|_| CollatzError::invalid_input(digits))?;
    ensure_positive(&n)?;
    Ok(n)
}

pub(crate) fn ensure_positive(n: &BigUint) -> Result<()> {
    if n.is_zero() {
        return Err(CollatzError::invalid_input(n));
    }
    Ok(())
}

/// n から 1 までを順に返すイテレータ。1 を返した時点で終了する。
#[derive(Debug, Clone)]
pub struct CollatzIter {
    next: Option<BigUint>,
}

impl CollatzIter {
    pub fn new(start: &BigUint) -> Result<Self> {
        ensure_positive(start)?;
        Ok(Self {
            next: Some(start.clone()),
        })
    }
}

impl Iterator for CollatzIter {
    type Item = BigUint;

    fn next(&mut self) -> Option<BigUint> {
        let cur = self.next.take()?;
        if !cur.is_one() {
            self.next = Some(collatz_next(&cur));
        }
        Some(cur)
    }
}

/// 軌道 [n, f(n), f(f(n)), ..., 1] を生成する。
/// n = 1 のときは [1]。1 は末尾に1回だけ含まれ、4→2→1 の周期には入らない。
pub fn collatz_sequence(n: &BigUint) -> Result<Vec<BigUint>> {
    Ok(CollatzIter::new(n)?.collect())
}

/// ステップ数上限付き版。max_steps 回の写像で 1 に届かなければエラー。
pub fn collatz_sequence_bounded(n: &BigUint, max_steps: u64) -> Result<Vec<BigUint>> {
    let mut seq = Vec::new();
    for (step, v) in CollatzIter::new(n)?.enumerate() {
        if step as u64 > max_steps {
            return Err(CollatzError::StepLimitExceeded {
                start: n.clone(),
                max_steps,
            });
        }
        seq.push(v);
    }
    Ok(seq)
}

/// 軌道の要約統計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSummary {
    /// 開始値
    pub start: BigUint,
    /// 1 に到達するまでの写像回数 (= 長さ - 1)
    pub total_steps: u64,
    /// 最大値
    pub peak: BigUint,
    /// 最大値が最初に現れたステップ
    pub peak_step: usize,
    /// 奇数から 3x+1 を適用した回数
    pub odd_steps: u64,
    /// 偶数から x/2 を適用した回数
    pub even_steps: u64,
}

impl SequenceSummary {
    pub fn from_sequence(seq: &[BigUint]) -> Option<Self> {
        let start = seq.first()?.clone();
        let mut peak = start.clone();
        let mut peak_step = 0;
        for (i, v) in seq.iter().enumerate().skip(1) {
            if *v > peak {
                peak = v.clone();
                peak_step = i;
            }
        }
        let transitions = &seq[..seq.len() - 1];
        let odd_steps = transitions.iter().filter(|v| v.is_odd()).count() as u64;
        Some(Self {
            start,
            total_steps: transitions.len() as u64,
            peak,
            peak_step,
            odd_steps,
            even_steps: transitions.len() as u64 - odd_steps,
        })
    }
}
