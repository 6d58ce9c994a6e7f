//! Lowest-latency routing over the ISL mesh.
//!
//! Classic Dijkstra with a min-heap and lazy deletion: stale heap entries
//! (whose latency exceeds the recorded best for that node) are skipped on
//! pop instead of being removed eagerly. Unreachable satellites are a
//! normal outcome, not an error; they are simply absent from the latency
//! table, and [`route`](super::IslMesh::route) reports them as an infinite
//! [`Route`].

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use qtty::{Quantity, Unit};

use super::{IslMesh, MeshError};
use crate::Id;

/// A total-order key for `f64` latencies using IEEE-754 total order
/// (`total_cmp`), so tentative latencies can drive the binary heap.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LatencyKey(f64);

impl Eq for LatencyKey {}

impl Ord for LatencyKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for LatencyKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ── Route ─────────────────────────────────────────────────────────────

/// The result of a routing query: total latency plus the hop sequence
/// from source to target inclusive.
///
/// An unreachable target yields `latency == +∞` and empty `hops`; use
/// [`is_reachable`](Self::is_reachable) to discriminate.
#[derive(Debug, Clone, PartialEq)]
pub struct Route<U: Unit> {
    latency: Quantity<U>,
    hops: Vec<Id>,
}

impl<U: Unit> Route<U> {
    pub(crate) fn unreachable() -> Self {
        Self {
            latency: Quantity::new(f64::INFINITY),
            hops: Vec::new(),
        }
    }

    pub fn latency(&self) -> Quantity<U> {
        self.latency
    }

    pub fn hops(&self) -> &[Id] {
        &self.hops
    }

    pub fn is_reachable(&self) -> bool {
        !self.hops.is_empty()
    }

    /// Number of links traversed (one less than the hop count).
    pub fn link_count(&self) -> usize {
        self.hops.len().saturating_sub(1)
    }
}

impl<U: Unit> std::fmt::Display for Route<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_reachable() {
            return write!(f, "unreachable");
        }
        write!(f, "{} ({:.3})", self.hops.join(" -> "), self.latency.value())
    }
}

// ── Routing entry points ──────────────────────────────────────────────

impl<U: Unit> IslMesh<U> {
    /// Computes the lowest total latency from `source` to every reachable
    /// satellite. The table maps satellite id to latency, with `source`
    /// itself at 0; unreachable satellites are omitted (absence is
    /// distinguishable from a latency of 0).
    ///
    /// Fails if any link carries a negative latency or if `source` is not
    /// part of the mesh.
    pub fn latencies_from(&self, source: &str) -> Result<HashMap<Id, Quantity<U>>, MeshError> {
        self.ensure_latencies_valid()?;
        let source = self
            .node_of(source)
            .ok_or_else(|| MeshError::SatelliteNotFound(source.to_owned()))?;

        let best = self.relax_from(source, None).0;

        Ok(best
            .into_iter()
            .map(|(node, latency)| (self.id_of(node).clone(), Quantity::new(latency)))
            .collect())
    }

    /// Computes one lowest-latency route from `source` to `target`.
    ///
    /// Ties between equally good routes are broken arbitrarily. An
    /// unreachable `target` is a normal result: infinite latency, no hops.
    pub fn route(&self, source: &str, target: &str) -> Result<Route<U>, MeshError> {
        self.ensure_latencies_valid()?;
        let source_node = self
            .node_of(source)
            .ok_or_else(|| MeshError::SatelliteNotFound(source.to_owned()))?;
        let target_node = self
            .node_of(target)
            .ok_or_else(|| MeshError::SatelliteNotFound(target.to_owned()))?;

        let (best, prev) = self.relax_from(source_node, Some(target_node));

        let Some(&latency) = best.get(&target_node) else {
            return Ok(Route::unreachable());
        };

        // Walk the predecessor chain back from the target.
        let mut hops = vec![self.id_of(target_node).clone()];
        let mut cursor = target_node;
        while let Some(&parent) = prev.get(&cursor) {
            hops.push(self.id_of(parent).clone());
            cursor = parent;
        }
        hops.reverse();

        Ok(Route {
            latency: Quantity::new(latency),
            hops,
        })
    }

    /// Shared relaxation loop. When `target` is given the search stops as
    /// soon as that node is finalized; the latency table is then partial,
    /// which is fine for path reconstruction.
    fn relax_from(
        &self,
        source: NodeIndex,
        target: Option<NodeIndex>,
    ) -> (HashMap<NodeIndex, f64>, HashMap<NodeIndex, NodeIndex>) {
        let mut best: HashMap<NodeIndex, f64> = HashMap::new();
        let mut prev: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut heap: BinaryHeap<Reverse<(LatencyKey, NodeIndex)>> = BinaryHeap::new();

        best.insert(source, 0.0);
        heap.push(Reverse((LatencyKey(0.0), source)));

        while let Some(Reverse((LatencyKey(latency), node))) = heap.pop() {
            // Skip stale heap entries.
            if latency > best.get(&node).copied().unwrap_or(f64::INFINITY) {
                continue;
            }
            // The popped node is final; once it is the target we are done.
            if target == Some(node) {
                break;
            }

            for edge in self.graph().edges(node) {
                let neighbor = edge.target();
                let candidate = latency + edge.weight().value();
                if candidate < best.get(&neighbor).copied().unwrap_or(f64::INFINITY) {
                    best.insert(neighbor, candidate);
                    prev.insert(neighbor, node);
                    heap.push(Reverse((LatencyKey(candidate), neighbor)));
                }
            }
        }

        (best, prev)
    }
}

// =============================================================================
// Route Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Route<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Route", 2)?;
        s.serialize_field("latency", &self.latency.value())?;
        s.serialize_field("hops", &self.hops)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Route<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            latency: f64,
            hops: Vec<Id>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self {
            latency: Quantity::new(raw.latency),
            hops: raw.hops,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Second;

    fn q(v: f64) -> Quantity<Second> {
        Quantity::new(v)
    }

    /// Six-satellite reference mesh; every link is bidirectional. Lowest
    /// latency from 1 to 6 is 28 via 1-2-5-6.
    fn reference_mesh() -> IslMesh<Second> {
        let mut mesh = IslMesh::new();
        mesh.add_duplex_isl("1", "2", q(10.0));
        mesh.add_duplex_isl("1", "3", q(15.0));
        mesh.add_duplex_isl("2", "4", q(20.0));
        mesh.add_duplex_isl("2", "5", q(8.0));
        mesh.add_duplex_isl("3", "5", q(12.0));
        mesh.add_duplex_isl("4", "6", q(5.0));
        mesh.add_duplex_isl("5", "6", q(10.0));
        mesh
    }

    #[test]
    fn latencies_reference_scenario() {
        let mesh = reference_mesh();
        let table = mesh.latencies_from("1").unwrap();
        let expected = [
            ("1", 0.0),
            ("2", 10.0),
            ("3", 15.0),
            ("4", 30.0),
            ("5", 18.0),
            ("6", 28.0),
        ];
        assert_eq!(table.len(), expected.len());
        for (id, latency) in expected {
            assert_eq!(table[id].value(), latency, "satellite {id}");
        }
    }

    #[test]
    fn source_latency_is_zero() {
        let table = reference_mesh().latencies_from("3").unwrap();
        assert_eq!(table["3"].value(), 0.0);
    }

    #[test]
    fn table_satisfies_triangle_inequality() {
        let mesh = reference_mesh();
        let table = mesh.latencies_from("1").unwrap();
        for from in mesh.satellites() {
            let Some(&from_latency) = table.get(from) else {
                continue;
            };
            for to in mesh.satellites() {
                if let Some(link) = mesh.link_latency(from, to) {
                    assert!(
                        table[to].value() <= from_latency.value() + link.value() + 1e-9,
                        "edge {from} -> {to} not relaxed"
                    );
                }
            }
        }
    }

    #[test]
    fn route_reference_scenario() {
        let mesh = reference_mesh();
        let route = mesh.route("1", "6").unwrap();
        assert!(route.is_reachable());
        assert_eq!(route.latency().value(), 28.0);

        // Any optimal hop sequence is acceptable; check it is a real path
        // of the claimed total latency.
        assert_eq!(route.hops().first().map(String::as_str), Some("1"));
        assert_eq!(route.hops().last().map(String::as_str), Some("6"));
        let mut total = 0.0;
        for pair in route.hops().windows(2) {
            total += mesh
                .link_latency(&pair[0], &pair[1])
                .expect("consecutive hops must be linked")
                .value();
        }
        assert_eq!(total, 28.0);
    }

    #[test]
    fn route_latency_matches_table() {
        let mesh = reference_mesh();
        let table = mesh.latencies_from("1").unwrap();
        for target in ["2", "3", "4", "5", "6"] {
            let route = mesh.route("1", target).unwrap();
            assert_eq!(route.latency().value(), table[target].value());
        }
    }

    #[test]
    fn route_to_self_is_trivial() {
        let mesh = reference_mesh();
        let route = mesh.route("4", "4").unwrap();
        assert_eq!(route.latency().value(), 0.0);
        assert_eq!(route.hops(), ["4".to_string()]);
        assert_eq!(route.link_count(), 0);
    }

    #[test]
    fn unreachable_target_is_infinite_not_error() {
        let mut mesh = reference_mesh();
        mesh.add_satellite("ISOLATED");
        let route = mesh.route("1", "ISOLATED").unwrap();
        assert!(!route.is_reachable());
        assert!(route.latency().value().is_infinite());
        assert!(route.hops().is_empty());

        let table = mesh.latencies_from("1").unwrap();
        assert!(!table.contains_key("ISOLATED"));
    }

    #[test]
    fn directed_leaf_is_reachable_but_dead_ended() {
        let mut mesh = IslMesh::<Second>::new();
        mesh.add_isl("A", "LEAF", q(3.0));
        let table = mesh.latencies_from("A").unwrap();
        assert_eq!(table["LEAF"].value(), 3.0);

        // From the leaf, nothing else is reachable.
        let table = mesh.latencies_from("LEAF").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table["LEAF"].value(), 0.0);
    }

    #[test]
    fn negative_latency_is_rejected() {
        let mut mesh = reference_mesh();
        mesh.add_isl("2", "3", q(-1.0));
        assert!(matches!(
            mesh.latencies_from("1"),
            Err(MeshError::NegativeLatency { .. })
        ));
        assert!(matches!(
            mesh.route("1", "6"),
            Err(MeshError::NegativeLatency { .. })
        ));
    }

    #[test]
    fn unknown_source_or_target_is_rejected() {
        let mesh = reference_mesh();
        assert_eq!(
            mesh.latencies_from("99").unwrap_err(),
            MeshError::SatelliteNotFound("99".to_string())
        );
        assert_eq!(
            mesh.route("1", "99").unwrap_err(),
            MeshError::SatelliteNotFound("99".to_string())
        );
    }

    #[test]
    fn asymmetric_latencies_are_respected() {
        let mut mesh = IslMesh::<Second>::new();
        mesh.add_isl("A", "B", q(5.0));
        mesh.add_isl("B", "A", q(50.0));
        assert_eq!(mesh.route("A", "B").unwrap().latency().value(), 5.0);
        assert_eq!(mesh.route("B", "A").unwrap().latency().value(), 50.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn route_serde_round_trip() {
        let mesh = reference_mesh();
        let route = mesh.route("1", "6").unwrap();
        let json = serde_json::to_string(&route).unwrap();
        let back: Route<Second> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, route);
    }
}
