use second_shortest::algorithm::{Algorithm, LabelUpdate};
use second_shortest::graph::AdjacencyGraph;
use second_shortest::{
    Error, GraphBuilder, SecondShortestPath, SecondShortestResult, StateExtendedSpfa,
    TwoDistanceDijkstra,
};

// Runs both engines and checks they agree before returning the pair
fn query_both<N>(
    graph: &AdjacencyGraph<N, i64>,
    source: N,
    target: N,
) -> (Option<i64>, Option<i64>)
where
    N: second_shortest::graph::NodeId,
{
    let mut dijkstra = TwoDistanceDijkstra::new(graph).unwrap();
    let mut spfa = StateExtendedSpfa::new(graph).unwrap();

    let d = dijkstra.find_second_shortest(&source, &target).unwrap();
    let s = spfa.find_second_shortest(&source, &target).unwrap();
    assert_eq!(d, s, "engines disagree on {:?} -> {:?}", source, target);
    d.as_pair()
}

fn undirected_triangle() -> AdjacencyGraph<usize, i64> {
    let mut builder = GraphBuilder::new();
    builder
        .add_undirected_edge(0, 1, 1)
        .add_undirected_edge(1, 2, 1)
        .add_undirected_edge(0, 2, 3);
    builder.build()
}

#[test]
fn test_triangle_second_path_is_the_direct_edge() {
    let graph = undirected_triangle();
    assert_eq!(query_both(&graph, 0, 2), (Some(2), Some(3)));
}

#[test]
fn test_equal_length_paths_do_not_count_as_second() {
    // 0->2 and 0->1->2 both have length 2 and there is no cycle
    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 1, 1).add_edge(0, 2, 2).add_edge(1, 2, 1);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 2), (Some(2), None));
}

#[test]
fn test_diamond_with_long_bypass() {
    let mut builder = GraphBuilder::new();
    builder
        .add_edge(0, 1, 1)
        .add_edge(0, 2, 1)
        .add_edge(1, 3, 1)
        .add_edge(2, 3, 1)
        .add_edge(0, 3, 5);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 3), (Some(2), Some(5)));
}

#[test]
fn test_undirected_unit_chain() {
    for n in [2usize, 3, 10, 57] {
        let edges: Vec<(usize, usize)> = (1..n).map(|v| (v - 1, v)).collect();
        let graph = AdjacencyGraph::<usize, i64>::from_edge_list(n, &edges, None, false).unwrap();

        let expected_first = (n - 1) as i64;
        // One back-and-forth step adds exactly 2
        assert_eq!(
            query_both(&graph, 0, n - 1),
            (Some(expected_first), Some(expected_first + 2)),
            "chain of {} nodes",
            n
        );
    }
}

#[test]
fn test_directed_chain_has_no_second_path() {
    let edges: Vec<(usize, usize)> = (1..6).map(|v| (v - 1, v)).collect();
    let graph = AdjacencyGraph::<usize, i64>::from_edge_list(6, &edges, None, true).unwrap();

    assert_eq!(query_both(&graph, 0, 5), (Some(5), None));
}

#[test]
fn test_unreachable_target() {
    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 1, 4).add_edge(2, 3, 1);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 3), (None, None));
    // Reverse direction of a directed arc
    assert_eq!(query_both(&graph, 1, 0), (None, None));
}

#[test]
fn test_isolated_node_query() {
    let mut builder: GraphBuilder<usize, i64> = GraphBuilder::new();
    builder.add_node(7);
    builder.add_edge(0, 1, 1);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 7, 7), (Some(0), None));
    assert_eq!(query_both(&graph, 0, 7), (None, None));
}

#[test]
fn test_source_equals_target() {
    // The second distance is the shortest closed walk of positive length
    let mut builder = GraphBuilder::new();
    builder.add_undirected_edge(0, 1, 3).add_undirected_edge(1, 2, 1);
    let graph = builder.build();
    assert_eq!(query_both(&graph, 0, 0), (Some(0), Some(6)));
    assert_eq!(query_both(&graph, 1, 1), (Some(0), Some(2)));

    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 1, 3);
    let acyclic = builder.build();
    assert_eq!(query_both(&acyclic, 0, 0), (Some(0), None));
}

#[test]
fn test_zero_weight_cycle_terminates() {
    let mut builder = GraphBuilder::new();
    builder
        .add_edge(0, 1, 0)
        .add_edge(1, 0, 0)
        .add_edge(1, 2, 2);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 1), (Some(0), None));
    assert_eq!(query_both(&graph, 0, 2), (Some(2), None));
}

#[test]
fn test_parallel_arcs_and_self_loops() {
    let mut builder = GraphBuilder::new();
    builder
        .add_edge(0, 1, 4)
        .add_edge(0, 1, 7)
        .add_edge(1, 1, 10);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 1), (Some(4), Some(7)));
}

#[test]
fn test_overflowing_path_is_unreachable() {
    let big = i64::MAX - 1;
    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 1, big).add_edge(1, 2, 5);
    let graph = builder.build();

    assert_eq!(query_both(&graph, 0, 1), (Some(big), None));
    assert_eq!(query_both(&graph, 0, 2), (None, None));
}

#[test]
fn test_string_node_identifiers() {
    let mut builder = GraphBuilder::new();
    builder
        .add_undirected_edge("a".to_string(), "b".to_string(), 2)
        .add_undirected_edge("b".to_string(), "c".to_string(), 2)
        .add_undirected_edge("a".to_string(), "c".to_string(), 5);
    let graph = builder.build();

    assert_eq!(
        query_both(&graph, "a".to_string(), "c".to_string()),
        (Some(4), Some(5))
    );
}

#[test]
fn test_superseded_pending_item_still_propagates() {
    // Node 1 is first queued at 10, then improved to 2 while still queued.
    // The improvement must reach node 3.
    let mut builder = GraphBuilder::new();
    builder
        .add_edge(0, 2, 1)
        .add_edge(0, 1, 10)
        .add_edge(2, 1, 1)
        .add_edge(1, 3, 1);
    let graph = builder.build();

    let mut spfa = StateExtendedSpfa::new(&graph).unwrap();
    let result = spfa.find_second_shortest(&0, &3).unwrap();
    assert_eq!(result, SecondShortestResult::new(Some(3), Some(11)));
    assert!(spfa.statistics().unwrap().stale_items >= 1);

    let mut dijkstra = TwoDistanceDijkstra::new(&graph).unwrap();
    assert_eq!(dijkstra.find_second_shortest(&0, &3).unwrap(), result);
}

#[test]
fn test_unknown_node_is_an_error() {
    let graph = undirected_triangle();
    let mut dijkstra = TwoDistanceDijkstra::new(&graph).unwrap();
    let mut spfa = StateExtendedSpfa::new(&graph).unwrap();

    assert!(matches!(
        dijkstra.find_second_shortest(&0, &42),
        Err(Error::UnknownNode(_))
    ));
    assert!(matches!(
        spfa.find_second_shortest(&42, &0),
        Err(Error::UnknownNode(_))
    ));
    // A failed query leaves no statistics behind
    assert!(dijkstra.statistics().is_none());
    assert!(spfa.statistics().is_none());
}

#[test]
fn test_negative_weight_rejected_at_construction() {
    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 1, 2).add_edge(1, 2, -1);
    let graph = builder.build();

    assert!(matches!(
        TwoDistanceDijkstra::new(&graph),
        Err(Error::InvalidGraph { .. })
    ));
    assert!(matches!(
        StateExtendedSpfa::new(&graph),
        Err(Error::InvalidGraph { .. })
    ));
    assert!(matches!(
        Algorithm::Spfa.run(&graph, &0, &2),
        Err(Error::InvalidGraph { .. })
    ));
}

#[test]
fn test_statistics_lifecycle() {
    let graph = undirected_triangle();
    let mut spfa = StateExtendedSpfa::new(&graph).unwrap();
    let mut dijkstra = TwoDistanceDijkstra::new(&graph).unwrap();
    assert!(spfa.statistics().is_none());
    assert!(dijkstra.statistics().is_none());

    spfa.find_second_shortest(&0, &2).unwrap();
    dijkstra.find_second_shortest(&0, &2).unwrap();

    let s = *spfa.statistics().unwrap();
    assert!(s.enqueue_count >= 1);
    // The FIFO queue always drains
    assert_eq!(s.enqueue_count, s.dequeue_count);
    assert_eq!(s.iterations, s.dequeue_count);
    assert!(s.edge_relaxations >= s.first_updates);

    let d = *dijkstra.statistics().unwrap();
    assert!(d.enqueue_count >= d.dequeue_count);
    assert!(d.first_updates >= 2);
    assert_eq!(d.queue_operations(), d.enqueue_count + d.dequeue_count);
}

#[test]
fn test_repeated_queries_are_identical() {
    let graph = undirected_triangle();
    let mut spfa = StateExtendedSpfa::new(&graph).unwrap();

    let first = spfa.find_second_shortest(&0, &2).unwrap();
    let first_stats = *spfa.statistics().unwrap();
    // A different query in between must not leak into the next one
    spfa.find_second_shortest(&1, &0).unwrap();
    let again = spfa.find_second_shortest(&0, &2).unwrap();

    assert_eq!(first, again);
    assert_eq!(&first_stats, spfa.statistics().unwrap());
}

#[test]
fn test_labels_never_increase() {
    let mut builder = GraphBuilder::new();
    builder
        .add_edge(0, 2, 1)
        .add_edge(0, 1, 10)
        .add_edge(2, 1, 1)
        .add_edge(1, 3, 1)
        .add_undirected_edge(3, 4, 2)
        .add_undirected_edge(2, 4, 9)
        .add_edge(4, 0, 3);
    let graph = builder.build();

    let check = |updates: &[LabelUpdate<i64>]| {
        let mut last: Vec<(i64, i64)> = vec![(i64::MAX, i64::MAX); 5];
        for update in updates {
            let first = update.first.unwrap_or(i64::MAX);
            let second = update.second.unwrap_or(i64::MAX);
            let (old_first, old_second) = last[update.node];
            assert!(first <= old_first, "first label increased: {:?}", update);
            assert!(second <= old_second, "second label increased: {:?}", update);
            if update.second.is_some() {
                assert!(first < second, "labels out of order: {:?}", update);
            }
            last[update.node] = (first, second);
        }
    };

    let mut spfa_updates = Vec::new();
    StateExtendedSpfa::new(&graph)
        .unwrap()
        .find_second_shortest_observed(&0, &3, |u| spfa_updates.push(u))
        .unwrap();
    assert!(!spfa_updates.is_empty());
    check(&spfa_updates);

    let mut dijkstra_updates = Vec::new();
    TwoDistanceDijkstra::new(&graph)
        .unwrap()
        .find_second_shortest_observed(&0, &3, |u| dijkstra_updates.push(u))
        .unwrap();
    assert!(!dijkstra_updates.is_empty());
    check(&dijkstra_updates);
}

#[test]
fn test_algorithm_selector_matches_engines() {
    let graph = undirected_triangle();
    let spfa = Algorithm::Spfa.run(&graph, &0, &2).unwrap();
    let dijkstra = Algorithm::Dijkstra.run(&graph, &0, &2).unwrap();

    assert_eq!(spfa.result, dijkstra.result);
    assert_eq!(spfa.result.as_pair(), (Some(2), Some(3)));
    assert!(spfa.statistics.enqueue_count > 0);
}

#[test]
fn test_result_display() {
    let result = SecondShortestResult::new(Some(2i64), None);
    assert_eq!(result.to_string(), "shortest=2, second=unreachable");
    assert!(result.is_reachable());
    assert!(!SecondShortestResult::<i64>::unreachable().is_reachable());
}

#[test]
fn test_dijkstra_stops_once_target_second_is_settled() {
    // 0 -> 1 twice (weights 1 and 2), then a long tail hanging off the target
    let mut builder = GraphBuilder::new();
    builder.add_edge(0usize, 1usize, 1i64).add_edge(0, 1, 2);
    for v in 1..60 {
        builder.add_edge(v, v + 1, 1);
    }
    let graph = builder.build();

    let mut dijkstra = TwoDistanceDijkstra::new(&graph).unwrap();
    let result = dijkstra.find_second_shortest(&0, &1).unwrap();
    assert_eq!(result.as_pair(), (Some(1), Some(2)));

    // Pops: origin, (1, first), then (1, second) ends the search, ahead of
    // the tied (2, first) entry. Only the arcs of 0 and 1 were examined.
    let stats = *dijkstra.statistics().unwrap();
    assert_eq!(stats.edge_relaxations, 3);
    assert_eq!(stats.dequeue_count, 3);
    assert_eq!(stats.enqueue_count, 4);

    // The queue engine has no such exit and walks the whole tail
    let mut spfa = StateExtendedSpfa::new(&graph).unwrap();
    assert_eq!(spfa.find_second_shortest(&0, &1).unwrap(), result);
    assert!(spfa.statistics().unwrap().edge_relaxations >= 60);
}
