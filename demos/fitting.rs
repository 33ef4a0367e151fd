//! Example: fitting a short read into a longer reference.
//!
//! Run with:
//! `cargo run --example fitting`
//!
//! Scores the graph with a simple match/mismatch/gap scheme, then walks it
//! once in row-major order to find the best-scoring fit.

use std::collections::BTreeMap;

use fitting_align::{
    factory::{create_vec_and_assign, VecFittingGraph},
    Edge, NodeData, Result, SimpleScorer,
};

fn main() {
    let reference = b"TTCAGGATTACAGG";
    let read = b"GATCACA";

    let scorer = SimpleScorer::new(2, -3, -2);
    let mut g: VecFittingGraph<i32> = match create_vec_and_assign(reference, read, &scorer) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("failed to build graph: {err}");
            return;
        }
    };

    println!(
        "Graph: {} x {} nodes, {} edges",
        g.down_node_count(),
        g.right_node_count(),
        g.edge_count()
    );

    let (score, path) = match backtrack(&mut g) {
        Ok(found) => found,
        Err(err) => {
            eprintln!("failed to backtrack: {err}");
            return;
        }
    };
    println!("Fitting score: {score}");

    let (aln_ref, aln_read) = materialize_alignment(reference, read, &path);
    println!("ref:  {aln_ref}");
    println!("read: {aln_read}");
}

/// Fill every node's backtracking fields, then follow them back from the sink.
fn backtrack(g: &mut VecFittingGraph<i32>) -> Result<(i32, Vec<Edge>)> {
    let mut incoming: BTreeMap<(usize, usize), Vec<Edge>> = BTreeMap::new();
    for e in g.edges() {
        incoming.entry(e.to_node()).or_default().push(e);
    }

    let nodes: Vec<_> = g.nodes().iter().collect();
    for node in nodes {
        let mut best = NodeData::default();
        for &e in incoming.get(&node).into_iter().flatten() {
            let cand = g.node_data(e.from_node())?.backtracking_weight + *g.edge_data(e)?;
            if best.backtracking_edge.is_none() || cand > best.backtracking_weight {
                best = NodeData {
                    backtracking_edge: Some(e),
                    backtracking_weight: cand,
                };
            }
        }
        g.update_node_data(node, best)?;
    }

    let sink = g.sink();
    let score = g.node_data(sink)?.backtracking_weight;
    let mut path = Vec::new();
    let mut at = sink;
    while let Some(e) = g.node_data(at)?.backtracking_edge {
        path.push(e);
        at = e.from_node();
    }
    path.reverse();
    Ok((score, path))
}

/// Render the aligned part of `reference` above `read`. Free rides skip
/// reference letters without printing them.
fn materialize_alignment(reference: &[u8], read: &[u8], path: &[Edge]) -> (String, String) {
    let mut out_ref = String::new();
    let mut out_read = String::new();
    for e in path {
        let Edge::Normal(((fi, fj), (ti, tj))) = *e else {
            continue;
        };
        out_ref.push(if ti > fi { reference[fi] as char } else { '-' });
        out_read.push(if tj > fj { read[fj] as char } else { '-' });
    }
    (out_ref, out_read)
}
