//! Shows how grid graphs make the label-correcting engine re-queue states far
//! more often than the label-setting one.

use colored::*;
use second_shortest::benchmark::compare;
use second_shortest::graph::generators::{grid_graph, sparse_graph, GRID_WEIGHT_RANGE};

fn main() -> second_shortest::Result<()> {
    env_logger::init();

    println!("{}", "Second-shortest path: grid stress test".bold().cyan());
    println!(
        "{}",
        "corner-to-corner queries on 4-neighbour grids, weights 1..=10".dimmed()
    );
    println!();
    println!(
        "{:<14} {:>8} {:>12} {:>12} {:>9} {:>9}",
        "graph", "nodes", "dijk push", "spfa push", "push x", "time x"
    );

    let mut cases = Vec::new();
    for side in [20, 50, 100, 150] {
        cases.push(grid_graph(side, side, GRID_WEIGHT_RANGE, Some(7))?);
    }
    cases.push(sparse_graph(10_000, 1..=100, Some(7))?);

    for case in &cases {
        let comparison = compare(case, 1)?;
        let ratio = format!("{:.2}", comparison.push_ratio);
        let ratio = if comparison.push_ratio >= 3.0 {
            ratio.red().bold()
        } else if comparison.push_ratio >= 1.5 {
            ratio.yellow()
        } else {
            ratio.green()
        };

        println!(
            "{:<14} {:>8} {:>12} {:>12} {:>9} {:>8.2}x",
            case.name,
            comparison.dijkstra.nodes,
            comparison.dijkstra.statistics.enqueue_count,
            comparison.spfa.statistics.enqueue_count,
            ratio,
            comparison.speedup
        );

        if !comparison.agree {
            println!(
                "  {} dijkstra={:?}/{:?} spfa={:?}/{:?}",
                "MISMATCH".on_red().white().bold(),
                comparison.dijkstra.shortest,
                comparison.dijkstra.second_shortest,
                comparison.spfa.shortest,
                comparison.spfa.second_shortest
            );
        }
    }

    println!();
    println!("{}", "push x = SPFA queue pushes / Dijkstra heap pushes".dimmed());
    Ok(())
}
