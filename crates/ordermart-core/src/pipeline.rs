use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::extract::{self, ExtractSummary, FileReport};
use crate::sink::{self, LoadSummary, PgSink};
use crate::tables::TableCount;
use crate::transform;

/// Everything one run did, in a shape fit for logging or printing.
#[derive(Debug, Serialize)]
pub struct RunReceipt {
    pub files: Vec<FileReport>,
    pub extract: ExtractSummary,
    pub tables: Vec<TableCount>,
    pub load: Option<LoadSummary>,
}

/// Run extract and transform over `data_dir`; when a sink is given, load the
/// resulting tables as well. Single-file extract failures and per-table load
/// failures are absorbed into the receipt; an unusable input directory is
/// the one fatal path.
pub async fn execute_run(data_dir: &Path, sink: Option<&PgSink>) -> Result<RunReceipt> {
    let batch = extract::read_order_files(data_dir)?;
    let summary = batch.summary();
    info!(
        files = summary.files,
        parsed = summary.parsed,
        failed = summary.failed,
        records = summary.records,
        "extraction finished"
    );

    let tables = transform::run_transform(&batch.records);
    info!(rows = tables.total_rows(), "transform finished");

    let load = match sink {
        Some(sink) => {
            let load = sink::load_tables(sink, &tables).await;
            info!(
                rows = load.loaded_rows(),
                failures = load.failures(),
                schema = sink.schema(),
                "load finished"
            );
            Some(load)
        }
        None => None,
    };

    Ok(RunReceipt {
        files: batch.reports,
        extract: summary,
        tables: tables.row_counts(),
        load,
    })
}
