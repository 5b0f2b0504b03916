use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;

use crate::error::Error;
use crate::genetic_map::GeneticMap;
use crate::io::{get_input, get_output, get_strict_tsv_writer, get_tsv_reader};
use crate::structs::BimRecord;

pub fn read_bim(path: &Path) -> Result<Vec<BimRecord>> {
    let mut rdr = get_tsv_reader(get_input(Some(path.to_path_buf()))?, false);

    let records = rdr
        .deserialize()
        .enumerate()
        .map(|(i, record)| {
            record.wrap_err_with(|| eyre!("Invalid .bim record on line {} of {path:?}", i + 1))
        })
        .collect::<Result<Vec<BimRecord>>>()?;

    if records.is_empty() {
        return Err(Error::EmptyFile {
            path: path.to_path_buf(),
        })?;
    }

    Ok(records)
}

/// Replace the genetic position of every record with its interpolated value.
///
/// All records must be on the chromosome of the first record.
pub fn annotate_bim(mut records: Vec<BimRecord>, map: &GeneticMap) -> Result<Vec<BimRecord>> {
    let Some(first) = records.first() else {
        return Err(eyre!("No .bim records to annotate"));
    };
    let chrom = first.chrom.clone();
    let chrom_map = map.chromosome(&chrom)?;

    for (row, record) in records.iter_mut().enumerate() {
        if record.chrom != chrom {
            return Err(Error::MixedChromosome {
                row,
                expected: chrom,
                found: record.chrom.clone(),
            })?;
        }
        record.cm = chrom_map.interpolate(record.pos);
    }

    Ok(records)
}

pub fn run(bim: PathBuf, cm_map: PathBuf, output: PathBuf) -> Result<()> {
    let records = read_bim(&bim)?;
    let map = GeneticMap::from_path(&cm_map)?;

    let records = annotate_bim(records, &map)?;
    tracing::info!("Annotated {} variants of {bim:?}", records.len());

    let mut writer = get_strict_tsv_writer(get_output(Some(output))?);
    for record in &records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}
