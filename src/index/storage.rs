use anyhow::{Context, Result, anyhow};
use arrow::array::{Array, FixedSizeListArray, Float32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

pub const VECTORS_FILE: &str = "vectors.arrow";
pub const METADATA_FILE: &str = "metadata.json";
pub const CONFIG_FILE: &str = "index_config.json";

const VECTOR_COLUMN: &str = "vector";

/// Contents of `index_config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexManifest {
    pub embedding_model: String,
    pub dimension: usize,
    pub document_count: usize,
    pub saved_at: DateTime<Utc>,
}

fn vector_schema(dimension: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![Field::new(
        VECTOR_COLUMN,
        DataType::FixedSizeList(
            Arc::new(Field::new("item", DataType::Float32, false)),
            dimension as i32,
        ),
        false,
    )]))
}

/// Write all vectors as a single-column Arrow IPC file
pub fn write_vectors(path: &Path, vectors: &[Vec<f32>], dimension: usize) -> Result<()> {
    let schema = vector_schema(dimension);

    let mut flat_values = Vec::with_capacity(vectors.len() * dimension);
    for vector in vectors {
        if vector.len() != dimension {
            return Err(anyhow!(
                "Vector has {} dimensions, expected {}",
                vector.len(),
                dimension
            ));
        }
        flat_values.extend_from_slice(vector);
    }

    let field = Arc::new(Field::new("item", DataType::Float32, false));
    let vector_array = FixedSizeListArray::try_new(
        field,
        dimension as i32,
        Arc::new(Float32Array::from(flat_values)),
        None,
    )
    .context("Failed to create vector array")?;

    let batch = RecordBatch::try_new(schema.clone(), vec![Arc::new(vector_array)])
        .context("Failed to create record batch")?;

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = FileWriter::try_new(file, &schema).context("Failed to open Arrow writer")?;
    writer.write(&batch).context("Failed to write vectors")?;
    writer.finish().context("Failed to finish Arrow file")?;

    Ok(())
}

/// Read vectors back, returning them with the dimension recorded in the file schema
pub fn read_vectors(path: &Path) -> Result<(Vec<Vec<f32>>, usize)> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = FileReader::try_new(file, None).context("Failed to open Arrow reader")?;

    let dimension = match reader
        .schema()
        .field_with_name(VECTOR_COLUMN)
        .context("Vector column missing from index file")?
        .data_type()
    {
        DataType::FixedSizeList(_, size) => *size as usize,
        other => return Err(anyhow!("Unexpected vector column type: {other}")),
    };

    let mut vectors = Vec::new();
    for batch in reader {
        let batch = batch.context("Failed to read record batch")?;
        let column = batch
            .column_by_name(VECTOR_COLUMN)
            .context("Vector column missing from record batch")?;
        let list = column
            .as_any()
            .downcast_ref::<FixedSizeListArray>()
            .context("Vector column is not a fixed-size list")?;

        for row in 0..list.len() {
            let values = list.value(row);
            let floats = values
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("Vector values are not Float32")?;
            vectors.push(floats.values().to_vec());
        }
    }

    Ok((vectors, dimension))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize index data")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Whether every artifact of a saved index is present in `dir`
pub fn artifacts_present(dir: &Path) -> bool {
    [VECTORS_FILE, METADATA_FILE, CONFIG_FILE]
        .iter()
        .all(|name| dir.join(name).is_file())
}

/// Delete whichever artifacts exist in `dir`
pub fn remove_artifacts(dir: &Path) -> Result<()> {
    for name in [VECTORS_FILE, METADATA_FILE, CONFIG_FILE] {
        let path = dir.join(name);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}
