use second_shortest::{
    Graph, GraphBuilder, SecondShortestPath, StateExtendedSpfa, TwoDistanceDijkstra,
};

fn main() -> second_shortest::Result<()> {
    // A small road network with named junctions
    let mut builder = GraphBuilder::new();
    builder
        .add_undirected_edge("depot", "north", 4)
        .add_undirected_edge("depot", "east", 2)
        .add_undirected_edge("east", "north", 1)
        .add_undirected_edge("north", "market", 5)
        .add_undirected_edge("east", "market", 8)
        .add_undirected_edge("market", "harbour", 3);
    let graph = builder.build();

    println!("--- Second-shortest routes on a small graph ---");
    println!(
        "Graph has {} nodes and {} arcs",
        graph.node_count(),
        graph.edge_count()
    );

    let mut dijkstra = TwoDistanceDijkstra::new(&graph)?;
    let mut spfa = StateExtendedSpfa::new(&graph)?;

    for target in ["north", "market", "harbour"] {
        let d = dijkstra.find_second_shortest(&"depot", &target)?;
        let s = spfa.find_second_shortest(&"depot", &target)?;
        println!("\ndepot -> {}", target);
        println!("  {:<22} {}", dijkstra.name(), d);
        println!("  {:<22} {}", spfa.name(), s);
        if let (Some(ds), Some(ss)) = (dijkstra.statistics(), spfa.statistics()) {
            println!(
                "  queue pushes: dijkstra={}, spfa={}",
                ds.enqueue_count, ss.enqueue_count
            );
        }
        assert_eq!(d, s, "engines disagree");
    }

    // Unknown nodes are reported, not panicked on
    match dijkstra.find_second_shortest(&"depot", &"airport") {
        Ok(result) => println!("\nUnexpected result: {}", result),
        Err(e) => println!("\nQuerying a missing node: {}", e),
    }

    Ok(())
}
