use crate::algorithm::{Algorithm, SecondShortestPath};
use crate::graph::generators::BenchGraph;
use crate::graph::GraphBuilder;
use crate::{StateExtendedSpfa, TwoDistanceDijkstra};
use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

fn to_py_err(err: crate::Error) -> PyErr {
    match err {
        crate::Error::UnknownNode(_) => PyKeyError::new_err(err.to_string()),
        crate::Error::InvalidGraph { .. }
        | crate::Error::InvalidEdge(..)
        | crate::Error::InvalidInput(_) => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

#[pyclass]
pub struct PyGraph {
    builder: GraphBuilder<usize, i64>,
}

impl PyGraph {
    fn build(&self) -> BenchGraph {
        self.builder.clone().build()
    }
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new() -> Self {
        PyGraph {
            builder: GraphBuilder::new(),
        }
    }

    fn add_node(&mut self, node: usize) -> usize {
        self.builder.add_node(node)
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: i64) {
        self.builder.add_edge(from, to, weight);
    }

    fn add_undirected_edge(&mut self, a: usize, b: usize, weight: i64) {
        self.builder.add_undirected_edge(a, b, weight);
    }

    fn node_count(&self) -> usize {
        self.builder.node_count()
    }

    /// Returns `(shortest, second_shortest)`; `None` marks an absent distance
    #[pyo3(signature = (source, target, algorithm = "dijkstra"))]
    fn second_shortest(
        &self,
        source: usize,
        target: usize,
        algorithm: &str,
    ) -> PyResult<(Option<i64>, Option<i64>)> {
        let algorithm: Algorithm = algorithm.parse().map_err(to_py_err)?;
        let graph = self.build();
        let outcome = algorithm.run(&graph, &source, &target).map_err(to_py_err)?;
        Ok(outcome.result.as_pair())
    }

    /// Runs both engines and returns both pairs, Dijkstra first
    fn compare(
        &self,
        source: usize,
        target: usize,
    ) -> PyResult<((Option<i64>, Option<i64>), (Option<i64>, Option<i64>))> {
        let graph = self.build();
        let dijkstra = TwoDistanceDijkstra::new(&graph)
            .and_then(|mut engine| engine.find_second_shortest(&source, &target))
            .map_err(to_py_err)?;
        let spfa = StateExtendedSpfa::new(&graph)
            .and_then(|mut engine| engine.find_second_shortest(&source, &target))
            .map_err(to_py_err)?;
        Ok((dijkstra.as_pair(), spfa.as_pair()))
    }
}

#[pymodule]
fn second_shortest_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    Ok(())
}
