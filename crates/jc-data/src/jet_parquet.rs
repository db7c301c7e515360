//! Parquet I/O for jet-constituent tables.
//!
//! Defines the **jet table schema v1** and read/write functions bridging
//! Arrow [`RecordBatch`] ↔ [`JetStore`].
//!
//! # Schema: `jetcorr_jets_v1`
//!
//! | Column      | Arrow Type      | Description                          |
//! |-------------|-----------------|--------------------------------------|
//! | `const_pt`  | `List<Float64>` | Constituent transverse momenta       |
//! | `const_rap` | `List<Float64>` | Constituent rapidities               |
//! | `const_phi` | `List<Float64>` | Constituent azimuthal angles         |
//! | `const_pdg` | `List<Float64>` | Constituent particle-type codes      |
//! | `jet_pt`    | `Float64`       | Jet transverse momentum              |
//! | `jet_eta`   | `Float64`       | Jet pseudorapidity                   |
//!
//! One row per jet; the four list columns are index-aligned per row. The
//! schema version is recorded in Parquet key-value metadata under
//! `jetcorr.schema_version`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Float64Builder, ListArray, ListBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use jc_core::{Error, Result};

use crate::jagged::JaggedCol;
use crate::store::JetStore;

/// Schema version string embedded in Parquet key-value metadata.
pub const JET_SCHEMA_V1: &str = "jetcorr_jets_v1";

/// Parquet metadata key for the schema version.
pub const META_KEY_SCHEMA_VERSION: &str = "jetcorr.schema_version";

/// Constituent transverse-momentum column.
pub const COL_CONST_PT: &str = "const_pt";
/// Constituent rapidity column.
pub const COL_CONST_RAP: &str = "const_rap";
/// Constituent azimuthal-angle column.
pub const COL_CONST_PHI: &str = "const_phi";
/// Constituent particle-type-code column.
pub const COL_CONST_PDG: &str = "const_pdg";
/// Jet transverse-momentum column.
pub const COL_JET_PT: &str = "jet_pt";
/// Jet pseudorapidity column.
pub const COL_JET_ETA: &str = "jet_eta";

// ---------------------------------------------------------------------------
// Write: JetStore → Arrow RecordBatch (→ Parquet)
// ---------------------------------------------------------------------------

fn list_array(col: &JaggedCol) -> ListArray {
    let mut builder = ListBuilder::new(Float64Builder::new());
    for entry in col.entries() {
        builder.values().append_slice(entry);
        builder.append(true);
    }
    builder.finish()
}

/// Build an Arrow [`RecordBatch`] from a [`JetStore`].
pub fn jet_store_to_record_batch(store: &JetStore) -> Result<RecordBatch> {
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(list_array(store.particle_pt())),
        Arc::new(list_array(store.rapidity())),
        Arc::new(list_array(store.phi())),
        Arc::new(list_array(store.pdg())),
        Arc::new(Float64Array::from(store.jet_pt().to_vec())),
        Arc::new(Float64Array::from(store.jet_eta().to_vec())),
    ];

    let names = [COL_CONST_PT, COL_CONST_RAP, COL_CONST_PHI, COL_CONST_PDG, COL_JET_PT,
        COL_JET_ETA];
    // Take data types from the built arrays so list field nullability matches.
    let fields: Vec<Field> = names
        .iter()
        .zip(&arrays)
        .map(|(name, arr)| Field::new(*name, arr.data_type().clone(), false))
        .collect();

    let metadata =
        HashMap::from([(META_KEY_SCHEMA_VERSION.to_string(), JET_SCHEMA_V1.to_string())]);
    let schema = Arc::new(Schema::new(fields).with_metadata(metadata));

    RecordBatch::try_new(schema, arrays)
        .map_err(|e| Error::Validation(format!("failed to build RecordBatch: {e}")))
}

/// Write a [`JetStore`] to a Parquet file.
pub fn write_jet_parquet(store: &JetStore, path: &Path) -> Result<()> {
    let bytes = write_jet_parquet_bytes(store)?;
    std::fs::write(path, bytes)
        .map_err(|e| Error::Validation(format!("failed to write {}: {e}", path.display())))?;
    Ok(())
}

/// Write a [`JetStore`] to Parquet bytes in memory.
pub fn write_jet_parquet_bytes(store: &JetStore) -> Result<Vec<u8>> {
    let batch = jet_store_to_record_batch(store)?;
    let props = parquet::file::properties::WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();

    let mut buf = Vec::new();
    let mut writer = parquet::arrow::ArrowWriter::try_new(&mut buf, batch.schema(), Some(props))
        .map_err(|e| Error::Validation(format!("failed to create Parquet writer: {e}")))?;
    writer.write(&batch).map_err(|e| Error::Validation(format!("failed to write Parquet: {e}")))?;
    writer
        .close()
        .map_err(|e| Error::Validation(format!("failed to close Parquet writer: {e}")))?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Read: Parquet / Arrow RecordBatch → JetStore
// ---------------------------------------------------------------------------

/// Build a [`JetStore`] from an Arrow [`RecordBatch`].
pub fn jet_store_from_record_batch(batch: &RecordBatch) -> Result<JetStore> {
    check_schema_version(&batch.schema())?;
    let particle_pt = jagged_column(batch, COL_CONST_PT)?;
    let rapidity = jagged_column(batch, COL_CONST_RAP)?;
    let phi = jagged_column(batch, COL_CONST_PHI)?;
    let pdg = jagged_column(batch, COL_CONST_PDG)?;
    let jet_pt = scalar_column(batch, COL_JET_PT)?;
    let jet_eta = scalar_column(batch, COL_JET_ETA)?;
    JetStore::new(particle_pt, rapidity, phi, pdg, jet_pt, jet_eta)
}

/// Read a Parquet file into a [`JetStore`].
pub fn read_jet_parquet(path: &Path) -> Result<JetStore> {
    let file = std::fs::File::open(path)
        .map_err(|e| Error::Validation(format!("failed to open {}: {e}", path.display())))?;
    let builder = parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| Error::Validation(format!("failed to read Parquet: {e}")))?;
    read_from_builder(builder)
}

/// Read a [`JetStore`] from in-memory Parquet bytes.
pub fn read_jet_parquet_bytes(data: &[u8]) -> Result<JetStore> {
    let buf = bytes::Bytes::copy_from_slice(data);
    let builder = parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder::try_new(buf)
        .map_err(|e| Error::Validation(format!("failed to read Parquet bytes: {e}")))?;
    read_from_builder(builder)
}

fn read_from_builder<T: parquet::file::reader::ChunkReader + 'static>(
    builder: parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder<T>,
) -> Result<JetStore> {
    // Capture the Arrow schema (with key-value metadata) before building the reader.
    let full_schema = builder.schema().clone();
    check_schema_version(&full_schema)?;

    let reader = builder
        .build()
        .map_err(|e| Error::Validation(format!("failed to build Parquet reader: {e}")))?;

    let batches: std::result::Result<Vec<_>, _> = reader.collect();
    let batches =
        batches.map_err(|e| Error::Validation(format!("failed to read Parquet batches: {e}")))?;

    if batches.is_empty() {
        // A zero-jet file is a legitimate degenerate input.
        return JetStore::new(
            JaggedCol::empty(),
            JaggedCol::empty(),
            JaggedCol::empty(),
            JaggedCol::empty(),
            Vec::new(),
            Vec::new(),
        );
    }

    let merged = arrow::compute::concat_batches(&full_schema, &batches)
        .map_err(|e| Error::Validation(format!("failed to concat Parquet batches: {e}")))?;
    jet_store_from_record_batch(&merged)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn check_schema_version(schema: &Schema) -> Result<()> {
    if let Some(version) = schema.metadata().get(META_KEY_SCHEMA_VERSION) {
        if version != JET_SCHEMA_V1 {
            return Err(Error::Validation(format!(
                "unsupported jet table schema '{version}', expected '{JET_SCHEMA_V1}'"
            )));
        }
    }
    // Files without the metadata key are accepted as long as the columns match.
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| Error::Validation(format!("missing column '{name}' in jet table")))?;
    Ok(batch.column(idx))
}

fn jagged_column(batch: &RecordBatch, name: &str) -> Result<JaggedCol> {
    let arr = column(batch, name)?;
    let list = arr.as_any().downcast_ref::<ListArray>().ok_or_else(|| {
        Error::Validation(format!(
            "column '{name}' has type {:?}, expected List<Float64>",
            arr.data_type()
        ))
    })?;
    if list.null_count() > 0 {
        return Err(Error::Validation(format!("column '{name}' must not contain null lists")));
    }
    let values = list.values();
    if values.data_type() != &DataType::Float64 {
        return Err(Error::Validation(format!(
            "column '{name}' has list item type {:?}, expected Float64",
            values.data_type()
        )));
    }
    let values = values.as_any().downcast_ref::<Float64Array>().ok_or_else(|| {
        Error::Validation(format!("column '{name}' list items are not Float64"))
    })?;
    if values.null_count() > 0 {
        return Err(Error::Validation(format!("column '{name}' must not contain null values")));
    }

    // Rebase offsets so the flat buffer starts at zero even for sliced arrays.
    let raw: Vec<usize> = list.offsets().iter().map(|&o| o as usize).collect();
    let base = raw[0];
    let end = *raw.last().unwrap();
    let offsets: Vec<usize> = raw.iter().map(|o| o - base).collect();
    let flat = values.values()[base..end].to_vec();
    JaggedCol::new(flat, offsets)
}

fn scalar_column(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let arr = column(batch, name)?;
    let f64_arr = arr.as_any().downcast_ref::<Float64Array>().ok_or_else(|| {
        Error::Validation(format!(
            "column '{name}' has type {:?}, expected Float64",
            arr.data_type()
        ))
    })?;
    if f64_arr.null_count() > 0 {
        return Err(Error::Validation(format!("column '{name}' must not contain nulls")));
    }
    Ok(f64_arr.values().to_vec())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
