use super::{Connection, GraphData, GraphEdge};
use crate::error::Result;

/// Presentation edge for a heuristic connection (strength on a 0-10 scale).
pub fn connection_to_edge(connection: &Connection) -> GraphEdge {
    GraphEdge {
        source: connection.source.to_string(),
        target: connection.target.to_string(),
        relationship_type: connection.connection_type.as_str().to_string(),
        strength: (connection.similarity * 10.0).round() as i64,
        description: format!(
            "Papers connected through {}",
            connection.connection_type
        ),
        shared_entities: connection.shared_keywords.clone(),
    }
}

/// Combine the extractor's graph with heuristic connections.
///
/// External edges come first, then heuristic ones; nothing is deduplicated
/// across sources. A failed extraction degrades to the empty graph plus the
/// heuristic edges.
pub fn merge_graph(external: Result<GraphData>, connections: &[Connection]) -> GraphData {
    let mut graph = match external {
        Ok(graph) => graph,
        Err(e) => {
            log::warn!("Relationship extraction failed, using heuristic edges only: {}", e);
            GraphData::empty()
        }
    };

    graph.edges.extend(connections.iter().map(connection_to_edge));
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PapergraphError;
    use crate::graph::ConnectionType;
    use serde_json::json;

    fn connection(source: u32, target: u32, similarity: f64) -> Connection {
        Connection {
            source,
            target,
            similarity,
            connection_type: ConnectionType::ModerateSimilarity,
            shared_keywords: vec!["gnn".to_string()],
            venue_connection: false,
        }
    }

    fn llm_edge() -> GraphEdge {
        GraphEdge {
            source: "1".to_string(),
            target: "2".to_string(),
            relationship_type: "Builds_Upon".to_string(),
            strength: 4,
            description: "extends".to_string(),
            shared_entities: Vec::new(),
        }
    }

    #[test]
    fn test_connection_to_edge() {
        let edge = connection_to_edge(&connection(3, 7, 0.56));
        assert_eq!(edge.source, "3");
        assert_eq!(edge.target, "7");
        assert_eq!(edge.relationship_type, "Moderate_Similarity");
        assert_eq!(edge.strength, 6);
        assert_eq!(edge.description, "Papers connected through Moderate_Similarity");
        assert_eq!(edge.shared_entities, vec!["gnn"]);
    }

    #[test]
    fn test_external_edges_come_first() {
        let external = GraphData {
            nodes: vec![json!({"id": "1"})],
            edges: vec![llm_edge()],
            entity_clusters: vec![json!({"name": "cluster"})],
        };
        let merged = merge_graph(Ok(external), &[connection(1, 2, 0.4)]);
        assert_eq!(merged.edges.len(), 2);
        assert_eq!(merged.edges[0].relationship_type, "Builds_Upon");
        assert_eq!(merged.edges[1].relationship_type, "Moderate_Similarity");
        assert_eq!(merged.nodes.len(), 1);
        assert_eq!(merged.entity_clusters.len(), 1);
    }

    #[test]
    fn test_extractor_error_keeps_heuristic_edges_only() {
        let connections = [connection(1, 2, 0.4), connection(2, 3, 0.8)];
        let merged = merge_graph(
            Err(PapergraphError::Analyzer("quota exceeded".to_string())),
            &connections,
        );
        let expected: Vec<_> = connections.iter().map(connection_to_edge).collect();
        assert_eq!(merged.edges, expected);
        assert!(merged.nodes.is_empty());
        assert!(merged.entity_clusters.is_empty());
    }

    #[test]
    fn test_no_connections_passes_external_through() {
        let external = GraphData {
            edges: vec![llm_edge()],
            ..GraphData::default()
        };
        let merged = merge_graph(Ok(external.clone()), &[]);
        assert_eq!(merged, external);
    }
}
