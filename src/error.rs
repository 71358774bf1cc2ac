//! エラー型

use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollatzError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollatzError {
    /// 正の整数でない入力（0、負数、非整数文字列）
    #[error("invalid input: {value} (positive integer required)")]
    InvalidInput { value: String },

    /// max_steps 以内に 1 へ到達しなかった
    #[error("no convergence from {start} within {max_steps} steps")]
    StepLimitExceeded { start: BigUint, max_steps: u64 },

    /// レイアウトの根がグラフに存在しない
    #[error("root {root} is not a node of the tree")]
    UnknownRoot { root: BigUint },
}

impl CollatzError {
    pub fn invalid_input(value: impl ToString) -> Self {
        Self::InvalidInput {
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = CollatzError::invalid_input(0);
        assert_eq!(e.to_string(), "invalid input: 0 (positive integer required)");

        let e = CollatzError::StepLimitExceeded {
            start: BigUint::from(27u64),
            max_steps: 10,
        };
        assert_eq!(e.to_string(), "no convergence from 27 within 10 steps");

        let e = CollatzError::UnknownRoot {
            root: BigUint::from(5u64),
        };
        assert_eq!(e.to_string(), "root 5 is not a node of the tree");
    }
}
