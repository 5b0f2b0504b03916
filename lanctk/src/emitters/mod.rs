use color_eyre::Result;

use crate::error::Error;
use crate::fb_table::{ChromosomeCheck, FbTable, MarkerDosage};

/// PLINK 2 style dosage store with .psam and .pvar companions
pub mod dosage_store;

/// In-memory variants x samples array with coordinate labels
pub mod labeled_array;

pub use dosage_store::{DosagePaths, DosageStore};
pub use labeled_array::{read_labeled_array, LabeledArray, LabeledArraySink};

/// A consumer of the dosage stream, one marker row at a time
pub trait DosageSink {
    fn push(&mut self, marker: &MarkerDosage) -> Result<()>;

    /// Called once after the last marker row with the chromosome of the table and the marker
    /// positions in row order
    fn finish(self, chrom: &str, positions: &[u64]) -> Result<()>;
}

/// Accumulated while streaming
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamSummary {
    pub chromosome: ChromosomeCheck,
    pub positions: Vec<u64>,
}

/// Drive a sink with the dosages of the population at the 1-based `population_index`
pub fn stream_dosages<S: DosageSink>(
    table: &FbTable,
    population_index: usize,
    mut sink: S,
) -> Result<StreamSummary> {
    let summary = table.markers(population_index)?.try_fold(
        StreamSummary::default(),
        |mut summary, marker| -> Result<StreamSummary> {
            let marker = marker?;
            summary.chromosome.check(&marker.chrom, marker.row)?;
            sink.push(&marker)?;
            summary.positions.push(marker.pos);
            Ok(summary)
        },
    )?;

    if summary.positions.len() != table.n_markers() {
        return Err(Error::MarkerCount {
            expected: table.n_markers(),
            found: summary.positions.len(),
        })?;
    }

    let chrom = summary.chromosome.chrom().ok_or_else(|| Error::EmptyFile {
        path: table.path().to_path_buf(),
    })?;

    tracing::info!("Read {} markers on chromosome {chrom}", summary.positions.len());

    sink.finish(chrom, &summary.positions)?;

    Ok(summary)
}
