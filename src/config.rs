//! 実行時パラメータ

/// 1 系列あたりの最大ステップ数（これを超えたら打ち切り）
pub const DEFAULT_MAX_STEPS: u64 = 100_000;

/// 入力欄の初期値
pub const DEFAULT_START: u64 = 1;

/// 範囲走査のチャンクサイズ（各チャンクを1タスクとして並列化）
pub const DEFAULT_SCAN_CHUNK_SIZE: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_steps: u64,
    pub default_start: u64,
    pub scan_chunk_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            default_start: DEFAULT_START,
            scan_chunk_size: DEFAULT_SCAN_CHUNK_SIZE,
        }
    }
}

impl Config {
    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// 0 は 1 に切り上げる
    pub fn with_scan_chunk_size(mut self, size: u64) -> Self {
        self.scan_chunk_size = size.max(1);
        self
    }
}
