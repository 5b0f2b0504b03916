use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::DosageSink;
use crate::error::Error;
use crate::fb_table::MarkerDosage;
use crate::io::get_output;
use crate::structs::variant_id;

pub const VARIANT_DIM: &str = "variants";
pub const SAMPLE_DIM: &str = "samples";

const PROGRESS_INTERVAL: usize = 100;

/// Labels of the array axes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Along `variants`
    pub pos: Vec<u64>,
    /// Along `variants`, `chrom:pos`
    pub variant_id: Vec<String>,
    /// Along `samples`
    pub sample_id: Vec<String>,
}

/// Dosages of one ancestry with `variants` x `samples` dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledArray {
    pub dims: [String; 2],
    pub population: String,
    pub coords: Coordinates,
    pub data: Array2<f64>,
}

impl LabeledArray {
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn dosage(&self, variant_id: &str, sample_id: &str) -> Option<f64> {
        let row = self.coords.variant_id.iter().position(|v| v == variant_id)?;
        let col = self.coords.sample_id.iter().position(|s| s == sample_id)?;
        self.data.get((row, col)).copied()
    }
}

pub fn write_labeled_array(array: &LabeledArray, path: &Path) -> Result<()> {
    tracing::info!("Array output: {path:?}");
    let now = std::time::Instant::now();
    let mut output = get_output(Some(path.to_path_buf()))?;

    let mut writer = bgzip::BGZFWriter::new(&mut output, bgzip::Compression::default());

    serde_json::to_writer(&mut writer, array)?;

    writer.close()?;

    tracing::info!("Wrote a {:?} array in {:?}", array.shape(), now.elapsed());
    Ok(())
}

pub fn read_labeled_array(path: &Path) -> Result<LabeledArray> {
    let file = std::fs::File::open(path).wrap_err(Error::Io {
        path: path.to_path_buf(),
    })?;
    let reader = bgzip::BGZFReader::new(file)?;
    let array: LabeledArray = serde_json::from_reader(reader)?;

    Ok(array)
}

/// Fills a preallocated variants x samples array one marker row at a time and writes it to
/// `path` once every row has been filled
pub struct LabeledArraySink {
    path: PathBuf,
    population: String,
    samples: Vec<String>,
    data: Array2<f64>,
    filled: usize,
}

impl LabeledArraySink {
    pub fn new(path: PathBuf, population: &str, samples: &[String], n_markers: usize) -> Self {
        tracing::debug!(
            "Allocating a {n_markers} x {} dosage array for {population}",
            samples.len()
        );

        Self {
            path,
            population: population.to_string(),
            samples: samples.to_vec(),
            data: Array2::from_elem((n_markers, samples.len()), f64::NAN),
            filled: 0,
        }
    }
}

impl DosageSink for LabeledArraySink {
    fn push(&mut self, marker: &MarkerDosage) -> Result<()> {
        let (n_markers, n_samples) = self.data.dim();

        if marker.row >= n_markers {
            return Err(Error::MarkerCount {
                expected: n_markers,
                found: marker.row + 1,
            })?;
        }
        if marker.dosages.len() != n_samples {
            return Err(eyre!(
                "Marker {} has {} dosages for {n_samples} samples",
                marker.row,
                marker.dosages.len()
            ));
        }

        self.data
            .row_mut(marker.row)
            .iter_mut()
            .zip(&marker.dosages)
            .for_each(|(cell, dosage)| *cell = *dosage);
        self.filled += 1;

        if self.filled % PROGRESS_INTERVAL == 0 {
            tracing::info!("Processed {}/{n_markers} markers", self.filled);
        }

        Ok(())
    }

    fn finish(self, chrom: &str, positions: &[u64]) -> Result<()> {
        let (n_markers, _) = self.data.dim();

        if self.filled != n_markers || positions.len() != n_markers {
            return Err(Error::IncompleteArray {
                written: self.filled,
                expected: n_markers,
            })?;
        }

        let array = LabeledArray {
            dims: [VARIANT_DIM.to_string(), SAMPLE_DIM.to_string()],
            population: self.population,
            coords: Coordinates {
                pos: positions.to_vec(),
                variant_id: positions.iter().map(|&pos| variant_id(chrom, pos)).collect(),
                sample_id: self.samples,
            },
            data: self.data,
        };

        write_labeled_array(&array, &self.path)
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;
    use crate::io::create_output_dir;

    fn marker(row: usize, pos: u64, dosages: Vec<f64>) -> MarkerDosage {
        MarkerDosage { row, chrom: "1".to_string(), pos, dosages }
    }

    fn samples() -> Vec<String> {
        vec!["S2".to_string(), "S1".to_string()]
    }

    #[test]
    fn test_sink_starts_with_nan() {
        let sink = LabeledArraySink::new(PathBuf::from("unused"), "AFR", &samples(), 3);
        assert_eq!(sink.data.dim(), (3, 2));
        assert!(sink.data.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_write_and_read_labeled_array() {
        let outdir = PathBuf::from("tests/results");
        create_output_dir(&outdir).unwrap();
        let path = outdir.join("unit_labeled_array.xarr.gz");

        let mut sink = LabeledArraySink::new(path.clone(), "AFR", &samples(), 2);
        sink.push(&marker(0, 1000, vec![1.25, 2.0])).unwrap();
        sink.push(&marker(1, 2000, vec![0.25, 1.5])).unwrap();
        sink.finish("1", &[1000, 2000]).unwrap();

        let array = read_labeled_array(&path).unwrap();
        assert_eq!(array.dims, ["variants", "samples"]);
        assert_eq!(array.population, "AFR");
        assert_eq!(array.coords.pos, vec![1000, 2000]);
        assert_eq!(array.coords.variant_id, vec!["1:1000", "1:2000"]);
        assert_eq!(array.coords.sample_id, vec!["S2", "S1"]);
        assert_eq!(array.data, ndarray::array![[1.25, 2.0], [0.25, 1.5]]);
        assert_eq!(array.dosage("1:2000", "S1"), Some(1.5));
        assert_eq!(array.dosage("1:3000", "S1"), None);
    }

    #[test]
    fn test_incomplete_array() {
        let path = PathBuf::from("tests/results/unit_incomplete.xarr.gz");
        let mut sink = LabeledArraySink::new(path.clone(), "AFR", &samples(), 3);
        sink.push(&marker(0, 1000, vec![1.0, 1.0])).unwrap();

        let err = sink.finish("1", &[1000]).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::IncompleteArray { written: 1, expected: 3 })));
        assert!(!path.exists());
    }

    #[test]
    fn test_row_out_of_range() {
        let mut sink = LabeledArraySink::new(PathBuf::from("unused"), "AFR", &samples(), 1);
        assert!(sink.push(&marker(1, 1000, vec![1.0, 1.0])).is_err());
        assert!(sink.push(&marker(0, 1000, vec![1.0])).is_err());
    }
}
