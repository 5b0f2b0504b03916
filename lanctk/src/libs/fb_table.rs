//! Reader for the forward-backward output of RFMix (`.fb.tsv`).
//!
//! The table starts with two header lines:
//!
//! ```text
//! #reference_panel_population:  AFR  EUR
//! chromosome  physical_position  genetic_position  S1:::hap1:::AFR  S1:::hap1:::EUR  S1:::hap2:::AFR  S1:::hap2:::EUR  S2:::hap1:::AFR ...
//! ```
//!
//! Every following line is a marker row with three metadata fields and `2 * P` ancestry
//! probabilities per sample: the P population probabilities of haplotype 1 followed by
//! the P population probabilities of haplotype 2.
//!
//! The population and haplotype blocks are interleaved per sample, so a mismatch between the
//! header and the row width would silently shift every sample. All rows are checked against
//! the width implied by the header.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use indexmap::IndexSet;

use crate::error::Error;
use crate::io::{count_lines, get_input};

/// Chromosome, start position and end position
pub const METADATA_FIELDS: usize = 3;

pub const HAPLOTYPES: usize = 2;

/// Separates the sample id from the haplotype tag in the sample header labels
pub const LABEL_SEPARATOR: &str = ":::";

/// 0-based index of a probability field in a marker row.
///
/// `population_index` is 1-based (see [`TableHeader::population_index`]), `haplotype` is 0
/// or 1 and `sample` is the 0-based sample index.
///
/// Taking every `2 * n_populations`-th field starting from the offset of sample 0 yields the
/// same haplotype of every sample.
pub fn field_offset(
    n_populations: usize,
    population_index: usize,
    haplotype: usize,
    sample: usize,
) -> usize {
    debug_assert!((1..=n_populations).contains(&population_index));
    debug_assert!(haplotype < HAPLOTYPES);

    METADATA_FIELDS
        + (population_index - 1)
        + haplotype * n_populations
        + sample * HAPLOTYPES * n_populations
}

pub fn expected_row_width(n_populations: usize, n_samples: usize) -> usize {
    METADATA_FIELDS + HAPLOTYPES * n_samples * n_populations
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    populations: Vec<String>,
    samples: Vec<String>,
}

impl TableHeader {
    pub fn parse(population_line: &str, sample_line: &str) -> Result<Self, Error> {
        let populations = parse_populations(population_line)?;
        let samples = parse_samples(sample_line, populations.len())?;

        Ok(Self {
            populations,
            samples,
        })
    }

    pub fn populations(&self) -> &[String] {
        &self.populations
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn n_populations(&self) -> usize {
        self.populations.len()
    }

    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// 1-based index of a population in the header
    pub fn population_index(&self, population: &str) -> Result<usize, Error> {
        self.populations
            .iter()
            .position(|p| p == population)
            .map(|idx| idx + 1)
            .ok_or_else(|| Error::UnknownPopulation {
                population: population.to_string(),
                valid: self.populations.clone(),
            })
    }
}

fn parse_populations(line: &str) -> Result<Vec<String>, Error> {
    let mut fields = line.trim().split('\t');

    match fields.next() {
        Some(first) if first.starts_with('#') => (),
        _ => tracing::warn!("The first line of the table does not start with '#'. Reading it as the population line anyway."),
    }

    let populations = fields
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect::<Vec<String>>();

    if populations.is_empty() {
        return Err(Error::MalformedHeader {
            reason: String::from("no populations found on the first line"),
        });
    }

    let unique = populations.iter().collect::<IndexSet<_>>();
    if unique.len() != populations.len() {
        return Err(Error::MalformedHeader {
            reason: format!("duplicate populations: {}", populations.join(", ")),
        });
    }

    Ok(populations)
}

/// Sample ids in the order they first appear in the header.
///
/// Every sample owns a block of `2 * n_populations` labels and all labels of a block must carry
/// the same sample id.
fn parse_samples(line: &str, n_populations: usize) -> Result<Vec<String>, Error> {
    let labels = line
        .trim()
        .split('\t')
        .skip(METADATA_FIELDS)
        .collect::<Vec<&str>>();

    let block = HAPLOTYPES * n_populations;

    if labels.is_empty() || labels.len() % block != 0 {
        return Err(Error::MalformedHeader {
            reason: format!(
                "found {} haplotype labels, which is not a multiple of 2 x {n_populations} populations",
                labels.len()
            ),
        });
    }

    let mut samples = IndexSet::new();

    for chunk in labels.chunks(block) {
        let id = sample_id(chunk[0]);

        if let Some(label) = chunk.iter().find(|label| sample_id(label) != id) {
            return Err(Error::MalformedHeader {
                reason: format!("label {label:?} is inside the haplotype block of sample {id:?}"),
            });
        }

        if !samples.insert(id.to_string()) {
            return Err(Error::MalformedHeader {
                reason: format!("sample {id:?} owns more than one haplotype block"),
            });
        }
    }

    Ok(samples.into_iter().collect())
}

fn sample_id(label: &str) -> &str {
    label.split(LABEL_SEPARATOR).next().unwrap_or(label)
}

/// Dosages of one ancestry at one marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDosage {
    /// 0-based marker row index
    pub row: usize,
    pub chrom: String,
    pub pos: u64,
    pub dosages: Vec<f64>,
}

fn parse_probability(field: &str, row: usize, offset: usize) -> Result<f64, Error> {
    let value = field.trim().parse::<f64>().map_err(|_| Error::MalformedRow {
        row,
        reason: format!("field {} is not a number: {field:?}", offset + 1),
    })?;

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::MalformedRow {
            row,
            reason: format!("field {} is not a probability: {value}", offset + 1),
        });
    }

    Ok(value)
}

/// Dosage of the population at `population_index` for every sample of a marker row: the sum
/// of the haplotype 1 and haplotype 2 probabilities.
pub fn extract_dosages(
    fields: &[&str],
    n_populations: usize,
    n_samples: usize,
    population_index: usize,
    row: usize,
) -> Result<Vec<f64>, Error> {
    let expected = expected_row_width(n_populations, n_samples);
    if fields.len() != expected {
        return Err(Error::MalformedRow {
            row,
            reason: format!(
                "expected {expected} fields ({METADATA_FIELDS} + 2 x {n_samples} samples x {n_populations} populations), found {}",
                fields.len()
            ),
        });
    }

    (0..n_samples)
        .map(|sample| {
            let hap1 = field_offset(n_populations, population_index, 0, sample);
            let hap2 = field_offset(n_populations, population_index, 1, sample);

            Ok(parse_probability(fields[hap1], row, hap1)?
                + parse_probability(fields[hap2], row, hap2)?)
        })
        .collect()
}

/// Captures the chromosome of the first marker row and requires all later rows to match it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromosomeCheck {
    chrom: Option<String>,
}

impl ChromosomeCheck {
    pub fn check(&mut self, chrom: &str, row: usize) -> Result<(), Error> {
        match &self.chrom {
            None => {
                self.chrom = Some(chrom.to_string());
                Ok(())
            }
            Some(expected) if expected == chrom => Ok(()),
            Some(expected) => Err(Error::MixedChromosome {
                row,
                expected: expected.clone(),
                found: chrom.to_string(),
            }),
        }
    }

    pub fn chrom(&self) -> Option<&str> {
        self.chrom.as_deref()
    }
}

/// Streams the marker rows of a table, holding one row in memory at a time
pub struct Markers<R: BufRead> {
    lines: io::Lines<R>,
    n_populations: usize,
    n_samples: usize,
    population_index: usize,
    row: usize,
}

impl<R: BufRead> Markers<R> {
    /// `reader` must be positioned at the first marker row
    pub fn new(reader: R, header: &TableHeader, population_index: usize) -> Self {
        Self {
            lines: reader.lines(),
            n_populations: header.n_populations(),
            n_samples: header.n_samples(),
            population_index,
            row: 0,
        }
    }

    fn parse_row(&self, line: &str) -> Result<MarkerDosage, Error> {
        let fields = line.trim().split('\t').collect::<Vec<&str>>();

        let dosages = extract_dosages(
            &fields,
            self.n_populations,
            self.n_samples,
            self.population_index,
            self.row,
        )?;

        let pos = fields[1].trim().parse::<u64>().map_err(|_| Error::MalformedRow {
            row: self.row,
            reason: format!("position {:?} is not an integer", fields[1]),
        })?;

        Ok(MarkerDosage {
            row: self.row,
            chrom: fields[0].trim().to_string(),
            pos,
            dosages,
        })
    }
}

impl<R: BufRead> Iterator for Markers<R> {
    type Item = Result<MarkerDosage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };

            if line.trim().is_empty() {
                continue;
            }

            let marker = self.parse_row(&line).map_err(Into::into);
            self.row += 1;
            return Some(marker);
        }
    }
}

/// A forward-backward table on disk.
///
/// Opening the table reads the file once to count the marker rows and once more for the
/// header lines. Marker rows are streamed with [`FbTable::markers`].
#[derive(Debug, Clone, PartialEq)]
pub struct FbTable {
    path: PathBuf,
    header: TableHeader,
    n_markers: usize,
}

impl FbTable {
    pub fn open(path: &Path) -> Result<Self> {
        if path.to_str() == Some("-") {
            return Err(eyre!(
                "Reading the table from stdin is not supported, the table is read twice"
            ));
        }

        let n_lines = count_lines(path)?;
        if n_lines < 2 {
            return Err(Error::MalformedHeader {
                reason: format!("expected a population line and a sample line, found {n_lines} lines"),
            })
            .wrap_err(eyre!("Failed to read {path:?}"));
        }

        let mut reader = io::BufReader::new(get_input(Some(path.to_path_buf()))?);
        let population_line = next_nonempty_line(&mut reader)?;
        let sample_line = next_nonempty_line(&mut reader)?;

        let header = TableHeader::parse(&population_line, &sample_line)
            .wrap_err(eyre!("Failed to read the header of {path:?}"))?;

        Ok(Self {
            path: path.to_path_buf(),
            header,
            n_markers: n_lines - 2,
        })
    }

    /// Stream marker rows for the population at the 1-based `population_index`
    pub fn markers(
        &self,
        population_index: usize,
    ) -> Result<Markers<io::BufReader<Box<dyn io::Read>>>> {
        if !(1..=self.n_populations()).contains(&population_index) {
            return Err(Error::InvalidParameter {
                name: String::from("population_index"),
                value: population_index.to_string(),
            })?;
        }

        let mut reader = io::BufReader::new(get_input(Some(self.path.clone()))?);

        // Skip the header lines
        next_nonempty_line(&mut reader)?;
        next_nonempty_line(&mut reader)?;

        Ok(Markers::new(reader, &self.header, population_index))
    }

    pub fn population_index(&self, population: &str) -> Result<usize, Error> {
        self.header.population_index(population)
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn populations(&self) -> &[String] {
        self.header.populations()
    }

    pub fn samples(&self) -> &[String] {
        self.header.samples()
    }

    pub fn n_populations(&self) -> usize {
        self.header.n_populations()
    }

    pub fn n_samples(&self) -> usize {
        self.header.n_samples()
    }

    pub fn n_markers(&self) -> usize {
        self.n_markers
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn next_nonempty_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::MalformedHeader {
                reason: String::from("the table ended before the header lines"),
            })?;
        }
        if !line.trim().is_empty() {
            return Ok(line);
        }
    }
}
