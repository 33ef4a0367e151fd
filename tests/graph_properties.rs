use std::collections::BTreeSet;

use fitting_align::{
    factory::{create_vec, VecFittingGraph},
    utils::{fitting_edge_count, grid_edge_count},
    Edge,
};
use proptest::prelude::*;

fn graph(down: usize, right: usize) -> VecFittingGraph<i32> {
    create_vec(down, right).unwrap()
}

proptest! {
    #[test]
    fn listing_matches_closed_form(down in 1usize..9, right in 1usize..9) {
        let g = graph(down, right);
        let edges: Vec<Edge> = g.edges().collect();
        prop_assert_eq!(Some(edges.len()), fitting_edge_count(down, right));
        prop_assert_eq!(g.edge_count(), edges.len());
        prop_assert_eq!(
            Some(edges.iter().filter(|e| !e.is_free_ride()).count()),
            grid_edge_count(down, right)
        );
        prop_assert_eq!(g.nodes().iter().count(), down * right);
    }

    #[test]
    fn every_listed_edge_exists(down in 1usize..9, right in 1usize..9) {
        let g = graph(down, right);
        for e in g.edges() {
            prop_assert!(g.has_edge(e), "{:?}", e);
            prop_assert!(g.has_node(e.from_node()));
            prop_assert!(g.has_node(e.to_node()));
            prop_assert_eq!(g.edge_from(e).unwrap(), e.from_node());
            prop_assert_eq!(g.edge_to(e).unwrap(), e.to_node());
        }
    }

    #[test]
    fn listing_has_no_duplicates(down in 1usize..9, right in 2usize..9) {
        let g = graph(down, right);
        let unique: BTreeSet<Edge> = g.edges().collect();
        prop_assert_eq!(unique.len(), g.edge_count());
    }

    #[test]
    fn listing_walks_backwards(down in 1usize..7, right in 1usize..7) {
        let g = graph(down, right);
        let mut forward: Vec<Edge> = g.edges().collect();
        let backward: Vec<Edge> = g.edges().rev().collect();
        forward.reverse();
        prop_assert_eq!(forward, backward);

        let mut nodes: Vec<_> = g.nodes().iter().collect();
        nodes.reverse();
        prop_assert_eq!(nodes, g.nodes().iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn free_rides_touch_the_borders(down in 1usize..9, right in 1usize..9) {
        let g = graph(down, right);
        let sink = g.sink();
        for e in g.edges().filter(Edge::is_free_ride) {
            let entry = e.from_node() == (0, 0) && e.to_node().1 == 0;
            let exit = e.to_node() == sink && e.from_node().1 == right - 1;
            prop_assert!(entry || exit, "{:?}", e);
        }
    }

    #[test]
    fn grid_neighbors_agree_with_listing(down in 1usize..7, right in 1usize..7) {
        let g = graph(down, right);
        let grid: Vec<Edge> = g.edges().filter(|e| !e.is_free_ride()).collect();
        for node in g.nodes() {
            let out: BTreeSet<Edge> = g
                .outputs(node)
                .unwrap()
                .into_iter()
                .filter(|e| !e.is_free_ride())
                .collect();
            let listed: BTreeSet<Edge> =
                grid.iter().copied().filter(|e| e.from_node() == node).collect();
            prop_assert_eq!(out, listed);

            let inp: BTreeSet<Edge> = g
                .inputs(node)
                .unwrap()
                .into_iter()
                .filter(|e| !e.is_free_ride())
                .collect();
            let listed: BTreeSet<Edge> =
                grid.iter().copied().filter(|e| e.to_node() == node).collect();
            prop_assert_eq!(inp, listed);

            prop_assert_eq!(g.out_degree(node).unwrap(), g.outputs(node).unwrap().len());
            prop_assert_eq!(g.in_degree(node).unwrap(), g.inputs(node).unwrap().len());
        }
    }

    #[test]
    fn one_free_ride_per_neighbor_listing(down in 1usize..8, right in 1usize..8) {
        let mut g = graph(down, right);
        let (source, sink) = (g.source(), g.sink());
        let nodes: Vec<_> = g.nodes().iter().collect();
        for node in nodes {
            let rides_out = g.outputs(node).unwrap().iter().filter(|e| e.is_free_ride()).count();
            let rides_in = g.inputs(node).unwrap().iter().filter(|e| e.is_free_ride()).count();
            prop_assert_eq!(rides_out, usize::from(node != sink));
            prop_assert_eq!(rides_in, usize::from(node != source));

            let full_out: Vec<Edge> = g
                .outputs_full(node)
                .unwrap()
                .iter()
                .filter(|slot| slot.edge.is_free_ride())
                .map(|slot| slot.edge)
                .collect();
            prop_assert_eq!(full_out.len(), rides_out);
            if let Some(ride) = full_out.first() {
                prop_assert_eq!(*ride, Edge::FreeRide { from: node, to: sink });
            }

            let full_in: Vec<Edge> = g
                .inputs_full(node)
                .unwrap()
                .iter()
                .filter(|slot| slot.edge.is_free_ride())
                .map(|slot| slot.edge)
                .collect();
            prop_assert_eq!(full_in.len(), rides_in);
            if let Some(ride) = full_in.first() {
                prop_assert_eq!(*ride, Edge::FreeRide { from: source, to: node });
            }
        }
    }

    #[test]
    fn out_of_range_nodes_are_absent(down in 1usize..6, right in 1usize..6, extra in 0usize..3) {
        let g = graph(down, right);
        prop_assert!(!g.has_node((down + extra, 0)));
        prop_assert!(!g.has_node((0, right + extra)));
        prop_assert!(g.node_data((down + extra, right + extra)).is_err());
    }
}

#[test]
fn single_column_lists_the_same_shape_twice() {
    // With one column the entry ride to the bottom row and the exit ride from
    // the top row are the same coordinate pair.
    let g = graph(3, 1);
    let shared = Edge::FreeRide {
        from: (0, 0),
        to: (2, 0),
    };
    assert_eq!(g.edges().filter(|e| *e == shared).count(), 2);
    assert_eq!(g.edge_count(), 2 + 4);
}
