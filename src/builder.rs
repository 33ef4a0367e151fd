use num_traits::Zero;

use crate::check::CheckPolicy;
use crate::edge::NodeData;
use crate::error::Result;
use crate::fitting::FittingGraph;
use crate::grid::EdgeDataSet;
use crate::storage::ContainerCreator;

/// Configures the initial weights of a [`FittingGraph`] before building it
/// with a pair of storage creators.
pub struct FittingGraphBuilder<W> {
    down_node_cnt: usize,
    right_node_cnt: usize,
    indel_weight: W,
    free_ride_weight: W,
}

impl<W: Copy + Zero> FittingGraphBuilder<W> {
    pub fn new(down_node_cnt: usize, right_node_cnt: usize) -> Self {
        Self {
            down_node_cnt,
            right_node_cnt,
            indel_weight: W::zero(),
            free_ride_weight: W::zero(),
        }
    }

    /// Dimensions for aligning sequences of `v_len` (down) and `w_len`
    /// (right) elements.
    pub fn for_sequences(v_len: usize, w_len: usize) -> Self {
        Self::new(v_len.saturating_add(1), w_len.saturating_add(1))
    }

    /// Initial weight of every grid edge.
    pub fn with_indel_weight(mut self, weight: W) -> Self {
        self.indel_weight = weight;
        self
    }

    /// Initial weight shared by all free rides.
    pub fn with_free_ride_weight(mut self, weight: W) -> Self {
        self.free_ride_weight = weight;
        self
    }

    pub fn build<NS, ES, P, NC, EC>(
        self,
        node_creator: &NC,
        edge_creator: &EC,
    ) -> Result<FittingGraph<W, NS, ES, P>>
    where
        NS: AsRef<[NodeData<W>]> + AsMut<[NodeData<W>]>,
        ES: AsRef<[EdgeDataSet<W>]> + AsMut<[EdgeDataSet<W>]>,
        P: CheckPolicy,
        NC: ContainerCreator<NodeData<W>, Container = NS>,
        EC: ContainerCreator<EdgeDataSet<W>, Container = ES>,
    {
        FittingGraph::new(
            self.down_node_cnt,
            self.right_node_cnt,
            node_creator,
            edge_creator,
            self.indel_weight,
            self.free_ride_weight,
        )
    }
}
