// src/export/parquet.rs
use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema as ArrowSchema},
    record_batch::RecordBatch,
};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{fs, fs::File, path::Path, sync::Arc};
use tracing::{info, warn};

use crate::query::RecordSet;

/// Three non-null text columns, one per record field.
pub fn records_schema() -> ArrowSchema {
    ArrowSchema::new(vec![
        Field::new("identifier", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("measurement", DataType::Utf8, false),
    ])
}

/// Pack the record set into a single batch.
pub fn to_record_batch(records: &RecordSet) -> Result<RecordBatch> {
    let identifiers: StringArray = records.iter().map(|r| Some(r.identifier.as_str())).collect();
    let regions: StringArray = records.iter().map(|r| Some(r.region.as_str())).collect();
    let measurements: StringArray = records.iter().map(|r| Some(r.measurement.as_str())).collect();

    let cols: Vec<ArrayRef> = vec![
        Arc::new(identifiers),
        Arc::new(regions),
        Arc::new(measurements),
    ];
    RecordBatch::try_new(Arc::new(records_schema()), cols).map_err(Into::into)
}

/// Write the records to `out_path`, going through a temp file so a reader never
/// sees a half-written file.
pub fn write_parquet<P: AsRef<Path>>(records: &RecordSet, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let temp_path = out_path.with_extension("tmp");
    let batch = to_record_batch(records)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .set_dictionary_enabled(true)
        .build();

    let file = File::create(&temp_path)
        .with_context(|| format!("creating {:?}", temp_path))?;

    let written = write_batch(file, &batch, props).and_then(|()| {
        fs::rename(&temp_path, out_path)
            .with_context(|| format!("renaming {:?} -> {:?}", temp_path, out_path))
    });
    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(&temp_path) {
            warn!(temp_path = %temp_path.display(), "failed to remove temp file: {}", rm);
        }
        return Err(e);
    }

    info!(path = %out_path.display(), rows = records.len(), "wrote parquet");
    Ok(())
}

fn write_batch(file: File, batch: &RecordBatch, props: WriterProperties) -> Result<()> {
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("opening parquet writer")?;
    writer.write(batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
