use clap::{Parser, Subcommand};
use collatz_visualizer::*;
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// コラッツ予想の軌道・木を表示する
#[derive(Parser, Debug)]
#[command(name = "collatz-visualizer", about = "Collatz conjecture sequence / tree visualizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 1 系列あたりの最大ステップ数
    #[arg(long, global = true, default_value_t = config::DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// ログフィルタ (例: debug, collatz_visualizer=trace)。未指定なら RUST_LOG
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 軌道を表示 (折れ線グラフのテキスト版)
    Sequence {
        n: String,
        /// 棒グラフの最大幅
        #[arg(long, default_value_t = 40)]
        width: usize,
    },
    /// 木を階層レイアウトで表示
    Tree { n: String },
    /// 範囲内の全開始値を並列走査
    Scan {
        start: u64,
        end: u64,
        /// チャンクサイズ
        #[arg(long, default_value_t = config::DEFAULT_SCAN_CHUNK_SIZE)]
        chunk: u64,
    },
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());
    let config = Config::default().with_max_steps(cli.max_steps);

    let outcome = match cli.command {
        Command::Sequence { n, width } => cmd_sequence(&n, width, &config),
        Command::Tree { n } => cmd_tree(&n, &config),
        Command::Scan { start, end, chunk } => {
            cmd_scan(start, end, &config.with_scan_chunk_size(chunk))
        }
    };

    if let Err(e) = outcome {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

fn cmd_sequence(input: &str, width: usize, config: &Config) -> Result<()> {
    let n = parse_start(input)?;
    let timer = Instant::now();
    let chart = SequenceChart::new(&n, config.max_steps)?;
    let elapsed = timer.elapsed();

    print!("{}", chart.render_text(width));

    if let Some(s) = chart.summary() {
        println!();
        println!("--- 統計 ---");
        println!("総ステップ数       = {}", s.total_steps);
        println!("  奇数 (3x+1)      = {}", s.odd_steps);
        println!("  偶数 (x/2)       = {}", s.even_steps);
        println!("最大値             = {} (step {})", figure::format_value(&s.peak), s.peak_step);
        println!("最大値の桁数       = {}", s.peak.to_string().len());
    }
    println!("計算時間           = {:?}", elapsed);
    Ok(())
}

fn cmd_tree(input: &str, config: &Config) -> Result<()> {
    let n = parse_start(input)?;
    let timer = Instant::now();
    let diagram = TreeDiagram::new(&n, config.max_steps)?;
    let elapsed = timer.elapsed();

    print!("{}", diagram.render_text());
    println!();
    println!("--- 構造 ---");
    println!("頂点数   = {}", diagram.nodes.len());
    println!("辺数     = {}", diagram.edges.len());
    println!("計算時間 = {:?}", elapsed);
    Ok(())
}

fn cmd_scan(start: u64, end: u64, config: &Config) -> Result<()> {
    let num_threads = rayon::current_num_threads();
    println!("範囲走査: [{}, {}]", start, end);
    println!("(最大 {} ステップ/数、{}スレッド並列)", config.max_steps, num_threads);
    println!();

    let timer = Instant::now();
    let last_print = Mutex::new(Instant::now());
    let result = scan_range_parallel(start, end, config, |done, total| {
        let now = Instant::now();
        if let Ok(mut lp) = last_print.try_lock() {
            if now.duration_since(*lp).as_millis() >= 500 || done == total {
                let pct = done as f64 / total as f64 * 100.0;
                eprint!(
                    "\x1b[2K\r  [{:.1}s] {}/{} ({:.1}%)",
                    timer.elapsed().as_secs_f64(), done, total, pct
                );
                *lp = now;
            }
        }
    })?;
    let elapsed = timer.elapsed();
    eprintln!();

    println!("--- 結果 ---");
    println!("走査した数     = {}", result.total_checked);
    println!("全て 1 に到達  = {}", if result.all_reached_one { "はい" } else { "いいえ" });
    if let Some((n, steps)) = result.longest {
        println!("最長軌道       = {} ステップ (n={})", steps, n);
    }
    if let Some((n, ref peak)) = result.highest_peak {
        println!("最大到達値     = {} (n={})", figure::format_value(peak), n);
    }
    if !result.failures.is_empty() {
        println!("打ち切った数   = {} 個", result.failures.len());
        for f in &result.failures[..result.failures.len().min(10)] {
            println!("  {}", f);
        }
    }
    println!("計算時間       = {:?}", elapsed);
    Ok(())
}
