//! Core data types shared by the ingestion and query pipelines.
//!
//! The index service's wire format is normalized into these types immediately
//! after each remote call, so the rest of the system never sees the raw
//! response shape.

use serde::{Deserialize, Serialize};

/// Metadata stored alongside each vector in the index.
///
/// Holds the original chunk text, needed later to reconstruct the context
/// block during retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub text: String,
}

/// A vector record written to the index during ingestion.
///
/// `id` is freshly generated per chunk; once upserted the record is owned
/// exclusively by the index.
#[derive(Debug, Clone, Serialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: RecordMetadata,
}

/// A nearest-neighbor match returned by an index query.
#[derive(Debug, Clone, Deserialize)]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<RecordMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_record_serializes_with_nested_metadata() {
        let record = VectorRecord {
            id: "abc".to_string(),
            values: vec![0.1, 0.2],
            metadata: RecordMetadata {
                text: "We the People".to_string(),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["metadata"]["text"], "We the People");
        assert_eq!(json["values"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn match_tolerates_missing_metadata() {
        let m: Match = serde_json::from_value(serde_json::json!({
            "id": "1", "score": 0.9
        }))
        .unwrap();
        assert!(m.metadata.is_none());
    }
}
