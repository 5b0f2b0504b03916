//! Streaming dosage store.
//!
//! Dosages are written row by row into a BGZF compressed, tab-delimited table laid out like
//! the input of PLINK 2 `--import-dosage format=1`: variant id, ALT, REF and one dosage per
//! sample. The `.psam` and `.pvar` companions are written after the last marker, as the
//! chromosome and positions are known only then. An interrupted run leaves an incomplete
//! dosage store and no `.pvar`.

use std::io;
use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use csv::Writer;

use super::DosageSink;
use crate::fb_table::MarkerDosage;
use crate::io::{get_output, get_strict_tsv_writer, open_strict_tsv_writer, push_to_output};
use crate::structs::{
    variant_id, SampleRecord, VariantRecord, PLACEHOLDER_ALT, PLACEHOLDER_REF, PSAM_HEADER,
    PVAR_HEADER,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DosagePaths {
    pub dosages: PathBuf,
    pub psam: PathBuf,
    pub pvar: PathBuf,
}

impl DosagePaths {
    pub fn new(output: &Path, prefix: &Option<String>, default_name: &str) -> Self {
        let path = |suffix: &str| {
            let mut path = output.to_path_buf();
            push_to_output(prefix, default_name, &mut path, suffix);
            path
        };

        Self {
            dosages: path("dosage.gz"),
            psam: path("psam"),
            pvar: path("pvar"),
        }
    }
}

type BgzfWriter = bgzip::BGZFWriter<Box<dyn io::Write>>;

pub struct DosageStore {
    paths: DosagePaths,
    samples: Vec<String>,
    writer: Writer<BgzfWriter>,
    n_written: usize,
}

impl DosageStore {
    pub fn create(paths: DosagePaths, samples: &[String]) -> Result<Self> {
        let output = get_output(Some(paths.dosages.clone()))?;
        let mut writer = get_strict_tsv_writer(bgzip::BGZFWriter::new(
            output,
            bgzip::Compression::default(),
        ));

        writer.write_record(
            ["ID", "ALT", "REF"]
                .into_iter()
                .chain(samples.iter().map(String::as_str)),
        )?;

        tracing::info!("Dosage output: {:?}", paths.dosages);

        Ok(Self {
            paths,
            samples: samples.to_vec(),
            writer,
            n_written: 0,
        })
    }
}

fn write_psam(path: &Path, samples: &[String]) -> Result<()> {
    let mut writer = open_strict_tsv_writer(path.to_path_buf())?;
    writer.write_record(PSAM_HEADER)?;
    for sample in samples {
        writer.write_record(SampleRecord::new(sample).to_record())?;
    }
    writer.flush()?;

    tracing::info!("Finished writing {path:?}");
    Ok(())
}

fn write_pvar(path: &Path, chrom: &str, positions: &[u64]) -> Result<()> {
    let mut writer = open_strict_tsv_writer(path.to_path_buf())?;
    writer.write_record(PVAR_HEADER)?;
    for pos in positions {
        writer.write_record(VariantRecord::new(chrom, *pos).to_record())?;
    }
    writer.flush()?;

    tracing::info!("Finished writing {path:?}");
    Ok(())
}

impl DosageSink for DosageStore {
    fn push(&mut self, marker: &MarkerDosage) -> Result<()> {
        if marker.dosages.len() != self.samples.len() {
            return Err(eyre!(
                "Marker {} has {} dosages for {} samples",
                marker.row,
                marker.dosages.len(),
                self.samples.len()
            ));
        }

        let mut record = Vec::with_capacity(3 + self.samples.len());
        record.push(variant_id(&marker.chrom, marker.pos));
        record.push(PLACEHOLDER_ALT.to_string());
        record.push(PLACEHOLDER_REF.to_string());
        record.extend(marker.dosages.iter().map(f64::to_string));

        self.writer.write_record(&record)?;
        self.n_written += 1;

        Ok(())
    }

    fn finish(self, chrom: &str, positions: &[u64]) -> Result<()> {
        let Self {
            paths,
            samples,
            mut writer,
            n_written,
        } = self;

        if positions.len() != n_written {
            return Err(eyre!(
                "{} positions were given for {n_written} written markers",
                positions.len()
            ));
        }

        writer.flush()?;
        let bgzf = writer
            .into_inner()
            .map_err(|e| eyre!("Failed to flush {:?}: {}", paths.dosages, e.error()))?;
        bgzf.close()?;
        tracing::info!("Finished writing {:?}", paths.dosages);

        write_psam(&paths.psam, &samples)?;
        write_pvar(&paths.pvar, chrom, positions)?;

        Ok(())
    }
}
