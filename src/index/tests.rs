use super::*;
use crate::ingest::FileType;

#[test]
fn content_id_is_lowercase_md5() {
    assert_eq!(content_id("hello"), "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(content_id("same text"), content_id("same text"));
    assert_ne!(content_id("same text"), content_id("other text"));
}

#[test]
fn chunk_metadata_flattens_document_fields() {
    let metadata = ChunkMetadata {
        document: DocumentMetadata {
            rows: Some(12),
            ..DocumentMetadata::new("data/defects.csv", FileType::Csv)
        },
        chunk_index: 1,
        total_chunks: 3,
    };

    let json = serde_json::to_value(&metadata).expect("serializes");
    assert_eq!(json["source"], "data/defects.csv");
    assert_eq!(json["file_type"], "csv");
    assert_eq!(json["rows"], 12);
    assert_eq!(json["chunk_index"], 1);
    assert!(json.get("page").is_none());

    let back: ChunkMetadata = serde_json::from_value(json).expect("deserializes");
    assert_eq!(back, metadata);
}

#[test]
fn document_metadata_becomes_single_chunk() {
    let metadata = ChunkMetadata::from(DocumentMetadata::new("manual", FileType::Inline));
    assert_eq!(metadata.chunk_index, 0);
    assert_eq!(metadata.total_chunks, 1);
}

#[test]
fn chunk_converts_to_record_without_id() {
    let chunk = Chunk {
        text: "Pareto charts".to_string(),
        metadata: ChunkMetadata::default(),
    };
    let record = NewRecord::from(chunk);
    assert_eq!(record.text, "Pareto charts");
    assert_eq!(record.id, None);
}
