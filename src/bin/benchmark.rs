//! Compares State-Extended SPFA and Two-Distance Dijkstra on dense, sparse,
//! grid and dataset graphs
//!
//! Usage: `benchmark [--quick] [--config <file.json>] [--dataset <dir>] [--parallel]`

use std::env;
use std::path::PathBuf;
use std::process;

use second_shortest::benchmark::{compare, run_benchmark, summarize, Comparison};
use second_shortest::config::BenchmarkConfig;
use second_shortest::dataset::load_all_datasets;
use second_shortest::graph::generators::{dense_graph, grid_graph, sparse_graph, GraphCase};

fn parse_args() -> Result<BenchmarkConfig, String> {
    let mut args = env::args().skip(1);
    let mut config = BenchmarkConfig::default();
    let mut parallel = false;
    let mut dataset_dir: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--quick" => config = BenchmarkConfig::quick(),
            "--config" => {
                let path = args.next().ok_or("--config needs a file path")?;
                config = BenchmarkConfig::from_json_file(&path).map_err(|e| e.to_string())?;
            }
            "--dataset" => {
                dataset_dir = Some(args.next().ok_or("--dataset needs a directory")?.into());
            }
            "--parallel" => parallel = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    config.parallel |= parallel;
    if dataset_dir.is_some() {
        config.dataset_dir = dataset_dir;
    }
    Ok(config)
}

fn build_cases(config: &BenchmarkConfig) -> second_shortest::Result<Vec<GraphCase>> {
    let (lo, hi) = config.weight_range;
    let (grid_lo, grid_hi) = config.grid_weight_range;
    let mut cases = Vec::new();

    for (i, &n) in config.dense_sizes.iter().enumerate() {
        let seed = config.seed.map(|s| s.wrapping_add(i as u64));
        cases.push(dense_graph(n, lo..=hi, seed)?);
    }
    for (i, &n) in config.sparse_sizes.iter().enumerate() {
        let seed = config.seed.map(|s| s.wrapping_add(100 + i as u64));
        cases.push(sparse_graph(n, lo..=hi, seed)?);
    }
    for (i, &(h, w)) in config.grid_dimensions.iter().enumerate() {
        let seed = config.seed.map(|s| s.wrapping_add(200 + i as u64));
        cases.push(grid_graph(h, w, grid_lo..=grid_hi, seed)?);
    }
    if let Some(dir) = &config.dataset_dir {
        cases.extend(load_all_datasets(dir));
    }
    Ok(cases)
}

fn print_comparison(comparison: &Comparison) {
    let d = &comparison.dijkstra;
    let s = &comparison.spfa;
    println!(
        "{:<24} | {:>8} | {:>10.2} | {:>10.2} | {:>10} | {:>10} | {:>7.2}x | {:>7.2}x | {}",
        d.case,
        d.nodes,
        d.elapsed_ms,
        s.elapsed_ms,
        d.statistics.enqueue_count,
        s.statistics.enqueue_count,
        comparison.push_ratio,
        comparison.speedup,
        if comparison.agree { "ok" } else { "MISMATCH" }
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    let cases = match build_cases(&config) {
        Ok(cases) => cases,
        Err(e) => {
            eprintln!("error: failed to generate graphs: {}", e);
            process::exit(1);
        }
    };

    println!("=====================================================");
    println!("Benchmark: Two-Distance Dijkstra vs State-Extended SPFA");
    println!("{} cases, {} iteration(s) each", cases.len(), config.iterations);
    println!("=====================================================");
    println!(
        "{:<24} | {:>8} | {:>10} | {:>10} | {:>10} | {:>10} | {:>8} | {:>8} | agree",
        "Case", "Nodes", "Dijk (ms)", "SPFA (ms)", "Dijk push", "SPFA push", "Push x", "Time x"
    );

    let mut mismatches = 0;
    for case in &cases {
        match compare(case, config.iterations) {
            Ok(comparison) => {
                if !comparison.agree {
                    mismatches += 1;
                }
                print_comparison(&comparison);
            }
            Err(e) => log::error!("Comparison failed on {}: {}", case.name, e),
        }
    }

    let records = run_benchmark(&config.algorithms, &cases, config.iterations, config.parallel);

    println!("\n=====================================================");
    println!("Timing summary");
    println!("=====================================================");
    println!(
        "{:<22} | {:>5} | {:>9} | {:>9} | {:>9} | {:>9} | {:>9} | {:>12}",
        "Algorithm", "Runs", "Mean", "Median", "P95", "P99", "Std", "Relaxations"
    );
    for summary in summarize(&records) {
        println!(
            "{:<22} | {:>5} | {:>9.3} | {:>9.3} | {:>9.3} | {:>9.3} | {:>9.3} | {:>12.0}",
            summary.algorithm.name(),
            summary.runs,
            summary.mean_ms,
            summary.median_ms,
            summary.p95_ms,
            summary.p99_ms,
            summary.std_ms,
            summary.mean_edge_relaxations
        );
    }

    let wrong = records.iter().filter(|r| r.correct == Some(false)).count();
    if mismatches > 0 || wrong > 0 {
        eprintln!(
            "{} engine disagreement(s), {} wrong answer(s) against expected values",
            mismatches, wrong
        );
        process::exit(1);
    }
}
