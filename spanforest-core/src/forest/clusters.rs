//! Cluster partition used by the union-find strategy.
//!
//! Every node belongs to exactly one cluster. Clusters start as singletons
//! labelled after their node and merge irreversibly: the absorbed cluster's
//! members move into the survivor, which keeps its identity and label.

use std::sync::Arc;

use crate::graph::{Graph, NodeId};

use super::ClusterId;

/// A set of nodes already connected by accepted edges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cluster {
    label: Arc<str>,
    members: Vec<NodeId>,
}

impl Cluster {
    /// Returns the representative label (the label of the founding node).
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the member nodes, founding node first.
    #[rustfmt::skip]
    #[must_use]
    pub fn members(&self) -> &[NodeId] { &self.members }
}

/// Partition of the node set into clusters.
///
/// # Examples
/// ```
/// use spanforest_core::{ClusterSet, Graph};
///
/// let mut graph = Graph::new();
/// let a = graph.add_node("A")?;
/// let b = graph.add_node("B")?;
/// let mut clusters = ClusterSet::singletons(&graph);
/// assert_eq!(clusters.live_count(), 2);
///
/// let left = clusters.cluster_of(a).expect("A has a cluster");
/// let right = clusters.cluster_of(b).expect("B has a cluster");
/// let survivor = clusters.merge(left, right);
/// assert_eq!(survivor, left);
/// assert_eq!(clusters.cluster_of(b), Some(left));
/// assert_eq!(clusters.live_count(), 1);
/// # Ok::<(), spanforest_core::EngineError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClusterSet {
    clusters: Vec<Option<Cluster>>,
    membership: Vec<ClusterId>,
    live: usize,
}

impl ClusterSet {
    /// Creates one singleton cluster per node of `graph`.
    #[must_use]
    pub fn singletons(graph: &Graph) -> Self {
        let clusters: Vec<Option<Cluster>> = graph
            .nodes()
            .map(|(id, node)| {
                Some(Cluster {
                    label: Arc::from(node.label()),
                    members: vec![id],
                })
            })
            .collect();
        let membership = (0..clusters.len()).map(ClusterId).collect();
        Self {
            live: clusters.len(),
            clusters,
            membership,
        }
    }

    /// Returns the cluster `node` currently belongs to.
    #[must_use]
    pub fn cluster_of(&self, node: NodeId) -> Option<ClusterId> {
        self.membership.get(node.index()).copied()
    }

    /// Returns a live cluster.
    #[must_use]
    pub fn cluster(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0).and_then(Option::as_ref)
    }

    /// Returns the number of clusters that have not been absorbed.
    #[rustfmt::skip]
    #[must_use]
    pub fn live_count(&self) -> usize { self.live }

    /// Iterates the live clusters in founding order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> + '_ {
        self.clusters
            .iter()
            .enumerate()
            .filter_map(|(index, cluster)| cluster.as_ref().map(|c| (ClusterId(index), c)))
    }

    /// Moves every member of `absorbed` into `survivor` and returns the
    /// surviving identifier.
    ///
    /// Merging a cluster with itself, or with a cluster that is no longer
    /// live, leaves the partition unchanged.
    pub fn merge(&mut self, survivor: ClusterId, absorbed: ClusterId) -> ClusterId {
        if survivor == absorbed || self.cluster(survivor).is_none() {
            return survivor;
        }
        let Some(taken) = self.clusters.get_mut(absorbed.0).and_then(Option::take) else {
            return survivor;
        };
        for member in &taken.members {
            if let Some(slot) = self.membership.get_mut(member.index()) {
                *slot = survivor;
            }
        }
        if let Some(Some(target)) = self.clusters.get_mut(survivor.0) {
            target.members.extend(taken.members);
        }
        self.live = self.live.saturating_sub(1);
        survivor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(labels: &[&str]) -> Graph {
        let mut graph = Graph::new();
        for label in labels {
            graph.add_node(label).expect("labels are unique");
        }
        graph
    }

    #[test]
    fn singletons_are_labelled_after_their_node() {
        let graph = graph_with(&["A", "B", "C"]);
        let clusters = ClusterSet::singletons(&graph);
        let labels: Vec<&str> = clusters.iter().map(|(_, c)| c.label()).collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_eq!(clusters.live_count(), 3);
    }

    #[test]
    fn merged_members_take_the_survivor_identity() {
        let graph = graph_with(&["A", "B", "C", "D"]);
        let mut clusters = ClusterSet::singletons(&graph);
        let [a, b, c, d] = [0, 1, 2, 3].map(NodeId::new);

        let ab = clusters.merge(ClusterId(1), ClusterId(0));
        let cd = clusters.merge(ClusterId(3), ClusterId(2));
        let all = clusters.merge(cd, ab);

        assert_eq!(all, ClusterId(3));
        for node in [a, b, c, d] {
            assert_eq!(clusters.cluster_of(node), Some(all));
        }
        let survivor = clusters.cluster(all).expect("survivor is live");
        assert_eq!(survivor.label(), "D");
        assert_eq!(survivor.members(), &[d, c, b, a]);
        assert_eq!(clusters.live_count(), 1);
        assert!(clusters.cluster(ClusterId(0)).is_none());
    }

    #[test]
    fn merging_dead_or_identical_clusters_is_a_no_op() {
        let graph = graph_with(&["A", "B"]);
        let mut clusters = ClusterSet::singletons(&graph);
        clusters.merge(ClusterId(0), ClusterId(0));
        clusters.merge(ClusterId(0), ClusterId(1));
        clusters.merge(ClusterId(0), ClusterId(1));
        clusters.merge(ClusterId(1), ClusterId(0));
        assert_eq!(clusters.live_count(), 1);
        assert_eq!(clusters.cluster_of(NodeId::new(1)), Some(ClusterId(0)));
    }
}
