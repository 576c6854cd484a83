use std::fs;
use std::path::PathBuf;

use second_shortest::benchmark::run_single_test;
use second_shortest::dataset::{
    convert_leetcode_case, load_all_datasets, load_graph_file, load_leetcode_file,
    save_graph_case, LeetCodeCase,
};
use second_shortest::graph::generators::{grid_graph, GraphKind};
use second_shortest::graph::Graph;
use second_shortest::{Algorithm, Error, SecondShortestPath, TwoDistanceDijkstra};

// Fresh directory under the system temp dir, removed on drop
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("second_shortest_{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn leetcode_case(n: usize, edges: Vec<[usize; 2]>, time: Option<i64>) -> LeetCodeCase {
    LeetCodeCase {
        id: None,
        n,
        edges,
        source: None,
        target: None,
        time,
        change: None,
        expected: None,
        expected_shortest: None,
        expected_second_shortest: None,
    }
}

// Unit-weight 5-cycle 1-2-3-4-5-1 with labelled endpoints and oracle
const CYCLE_CASE: &str = r#"{
    "id": 3,
    "n": 5,
    "edges": [[1, 2], [2, 3], [3, 4], [4, 5], [1, 5]],
    "source": 1,
    "target": 3,
    "expected_shortest": 2,
    "expected_second_shortest": 3
}"#;

#[test]
fn test_convert_one_based_case() {
    // Nodes 1..=3; mentioning node 3 == n marks the labels as 1-based
    let case = leetcode_case(3, vec![[1, 2], [2, 3], [1, 3]], Some(3));
    let converted = convert_leetcode_case(&case, "triangle").unwrap();

    assert_eq!(converted.kind, GraphKind::Dataset);
    assert_eq!(converted.graph.node_count(), 3);
    assert_eq!(converted.graph.edge_count(), 6);
    assert_eq!((converted.source, converted.target), (0, 2));

    let mut engine = TwoDistanceDijkstra::new(&converted.graph).unwrap();
    let result = engine.find_second_shortest(&0, &2).unwrap();
    // Direct edge = 3; any other walk uses at least two more edges
    assert_eq!(result.as_pair(), (Some(3), Some(6)));
}

#[test]
fn test_convert_zero_based_case_defaults_to_unit_weights() {
    let case = leetcode_case(3, vec![[0, 1], [1, 2]], None);
    let converted = convert_leetcode_case(&case, "path").unwrap();

    assert!(converted.graph.arcs().all(|(_, _, w)| w == 1));
    assert_eq!(converted.graph.edge_count(), 4);
}

#[test]
fn test_convert_rejects_bad_cases() {
    let empty = leetcode_case(0, vec![], None);
    assert!(matches!(
        convert_leetcode_case(&empty, "empty"),
        Err(Error::InvalidInput(_))
    ));

    let out_of_range = leetcode_case(3, vec![[0, 7]], None);
    assert!(matches!(
        convert_leetcode_case(&out_of_range, "bad"),
        Err(Error::InvalidEdge(0, 7))
    ));
}

#[test]
fn test_load_leetcode_file() {
    let dir = TempDir::new();
    let path = dir.0.join("problem.json");
    fs::write(
        &path,
        r#"{
            "problem_id": 2045,
            "problem_name": "Second Minimum Time",
            "test_cases": [
                {"id": 1, "n": 5, "edges": [[1,2],[1,3],[1,4],[3,4],[4,5]], "time": 3, "change": 5, "expected": 13},
                {"n": 2, "edges": [[1,2]]}
            ]
        }"#,
    )
    .unwrap();

    let file = load_leetcode_file(&path).unwrap();
    assert_eq!(file.problem_id, Some(2045));
    assert_eq!(file.test_cases.len(), 2);
    assert_eq!(file.test_cases[0].expected, Some(13));
    assert_eq!(file.test_cases[1].time, None);
}

#[test]
fn test_save_and_reload_graph_case() {
    let dir = TempDir::new();
    let path = dir.0.join("nested").join("grid.json");

    let original = grid_graph(4, 5, 1..=10, Some(12)).unwrap().with_expected(Some(42));
    save_graph_case(&original, &path).unwrap();
    let reloaded = load_graph_file(&path).unwrap();

    assert_eq!(reloaded.name, original.name);
    assert_eq!(reloaded.expected, Some(42));
    assert_eq!((reloaded.source, reloaded.target), (original.source, original.target));
    assert_eq!(
        reloaded.graph.arcs().collect::<Vec<_>>(),
        original.graph.arcs().collect::<Vec<_>>()
    );
}

#[test]
fn test_graph_file_with_mixed_edge_records() {
    let dir = TempDir::new();
    let path = dir.0.join("mixed.json");
    fs::write(&path, r#"{"n": 3, "edges": [[0, 1, 4], [1, 2]], "directed": true}"#).unwrap();

    let case = load_graph_file(&path).unwrap();
    assert_eq!(case.name, "mixed");
    assert_eq!(case.graph.neighbors(0), &[(1, 4)]);
    assert_eq!(case.graph.neighbors(1), &[(2, 1)]);
    assert!(case.graph.neighbors(2).is_empty());
    assert_eq!(case.target, 2);
}

#[test]
fn test_load_all_datasets_skips_broken_files() {
    let dir = TempDir::new();
    let leetcode = dir.0.join("leetcode");
    let generated = dir.0.join("generated");
    fs::create_dir_all(&leetcode).unwrap();
    fs::create_dir_all(&generated).unwrap();

    fs::write(
        leetcode.join("cases.json"),
        r#"{"test_cases": [{"id": 7, "n": 2, "edges": [[1, 2]]}, {"n": 0, "edges": []}]}"#,
    )
    .unwrap();
    fs::write(leetcode.join("broken.json"), "not json").unwrap();
    fs::write(leetcode.join("notes.txt"), "ignored").unwrap();
    fs::write(generated.join("tiny.json"), r#"{"n": 2, "edges": [[0, 1, 9]]}"#).unwrap();

    let cases = load_all_datasets(&dir.0);
    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["cases_7", "tiny"]);
}

#[test]
fn test_load_all_datasets_from_missing_directory() {
    let dir = TempDir::new();
    assert!(load_all_datasets(dir.0.join("absent")).is_empty());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new();
    assert!(matches!(
        load_graph_file(dir.0.join("nope.json")),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_case_fields_for_endpoints_and_oracle_are_read() {
    let case: LeetCodeCase = serde_json::from_str(CYCLE_CASE).unwrap();
    assert_eq!((case.source, case.target), (Some(1), Some(3)));
    assert_eq!(case.expected_shortest, Some(2));
    assert_eq!(case.expected_second_shortest, Some(3));
    assert_eq!(case.expected, None);
}

#[test]
fn test_query_endpoints_follow_the_case() {
    let case: LeetCodeCase = serde_json::from_str(CYCLE_CASE).unwrap();
    let converted = convert_leetcode_case(&case, "cycle").unwrap();
    // 1-based labels shifted down like the edges
    assert_eq!((converted.source, converted.target), (0, 2));

    let record = run_single_test(Algorithm::Spfa, &converted).unwrap();
    assert_eq!((record.shortest, record.second_shortest), (Some(2), Some(3)));

    // Zero-based labels stay as given
    let mut zero_based = leetcode_case(4, vec![[0, 1], [1, 2], [2, 3]], None);
    zero_based.source = Some(1);
    zero_based.target = Some(2);
    let converted = convert_leetcode_case(&zero_based, "path").unwrap();
    assert_eq!((converted.source, converted.target), (1, 2));

    let mut outside = leetcode_case(3, vec![[0, 1]], None);
    outside.target = Some(7);
    assert!(matches!(
        convert_leetcode_case(&outside, "outside"),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_both_expected_components_are_checked() {
    let case: LeetCodeCase = serde_json::from_str(CYCLE_CASE).unwrap();
    let converted = convert_leetcode_case(&case, "cycle").unwrap();
    assert_eq!(converted.expected_shortest, Some(2));
    assert_eq!(converted.expected, Some(3));
    let record = run_single_test(Algorithm::Dijkstra, &converted).unwrap();
    assert_eq!(record.correct, Some(true));

    // A wrong shortest component fails the case even with the right second
    let mut wrong_shortest = case.clone();
    wrong_shortest.expected_shortest = Some(1);
    let converted = convert_leetcode_case(&wrong_shortest, "cycle").unwrap();
    let record = run_single_test(Algorithm::Dijkstra, &converted).unwrap();
    assert_eq!(record.correct, Some(false));
}

#[test]
fn test_travel_time_with_signals_is_not_a_distance() {
    // LeetCode 2045 example 1: the answer 13 includes waiting at signals
    let signals: LeetCodeCase = serde_json::from_str(
        r#"{"n": 5, "edges": [[1,2],[1,3],[1,4],[3,4],[4,5]], "time": 3, "change": 5, "expected": 13}"#,
    )
    .unwrap();
    let converted = convert_leetcode_case(&signals, "signals").unwrap();
    assert_eq!(converted.expected, None);

    let record = run_single_test(Algorithm::Spfa, &converted).unwrap();
    assert_eq!((record.shortest, record.second_shortest), (Some(6), Some(9)));
    assert_eq!(record.correct, None);

    // Without a signal change the travel time is the second distance
    let mut plain = leetcode_case(2, vec![[1, 2]], Some(3));
    plain.expected = Some(9);
    let converted = convert_leetcode_case(&plain, "plain").unwrap();
    assert_eq!(converted.expected, Some(9));
    let record = run_single_test(Algorithm::Dijkstra, &converted).unwrap();
    assert_eq!(record.correct, Some(true));
}
