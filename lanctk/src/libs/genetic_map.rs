use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use indexmap::IndexMap;

use crate::error::Error;
use crate::io::{get_input, get_tsv_reader};
use crate::utils::same_chromosome;

#[derive(Debug, Clone, serde::Deserialize)]
struct GeneticMapRow<'a> {
    chrom: &'a str,
    pos: u64,
    cm: f64,
}

/// Piecewise-linear interpolation of `pos` over the map points (`positions`, `cms`).
///
/// Queries outside the map are clamped to the cM value of the nearest end point. A query at a
/// map position returns exactly the cM value of that position. The map must be non-empty and
/// sorted by position.
pub fn interpolate(positions: &[u64], cms: &[f64], pos: u64) -> f64 {
    debug_assert!(!positions.is_empty() && positions.len() == cms.len());

    let idx = positions.partition_point(|&p| p <= pos);

    if idx == 0 {
        return cms[0];
    }
    if idx == positions.len() {
        return cms[idx - 1];
    }

    let (lo, hi) = (idx - 1, idx);
    if positions[lo] == pos {
        return cms[lo];
    }

    let fraction = (pos - positions[lo]) as f64 / (positions[hi] - positions[lo]) as f64;
    cms[lo] + (cms[hi] - cms[lo]) * fraction
}

/// The genetic map of a single chromosome
#[derive(Debug, Clone, PartialEq)]
pub struct ChromosomeMap {
    chrom: String,
    positions: Vec<u64>,
    cms: Vec<f64>,
}

impl ChromosomeMap {
    pub fn new(chrom: &str, positions: Vec<u64>, cms: Vec<f64>) -> Result<Self, Error> {
        if positions.is_empty() || positions.len() != cms.len() {
            return Err(Error::InvalidMap {
                chrom: chrom.to_string(),
            });
        }

        for (i, window) in positions.windows(2).enumerate() {
            let (prev_cm, cm) = (cms[i], cms[i + 1]);
            if window[0] >= window[1] || prev_cm > cm {
                return Err(Error::UnsortedMap {
                    chrom: chrom.to_string(),
                    prev_pos: window[0],
                    prev_cm,
                    pos: window[1],
                    cm,
                });
            }
        }

        Ok(Self {
            chrom: chrom.to_string(),
            positions,
            cms,
        })
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn start(&self) -> u64 {
        self.positions[0]
    }

    pub fn end(&self) -> u64 {
        self.positions[self.positions.len() - 1]
    }

    pub fn interpolate(&self, pos: u64) -> f64 {
        interpolate(&self.positions, &self.cms, pos)
    }

    pub fn interpolate_all(&self, positions: &[u64]) -> Vec<f64> {
        let clamped = positions
            .iter()
            .filter(|&&p| p < self.start() || p > self.end())
            .count();
        if clamped > 0 {
            tracing::debug!(
                "{clamped} positions are outside of the genetic map range {}-{} on {}. Their cM values are clamped to the closest end of the map.",
                self.start(),
                self.end(),
                self.chrom
            );
        }

        positions.iter().map(|&p| self.interpolate(p)).collect()
    }
}

/// Genetic maps of one or more chromosomes in the order of the input file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneticMap {
    chromosomes: IndexMap<String, ChromosomeMap>,
}

impl GeneticMap {
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut rdr = get_tsv_reader(get_input(Some(path.to_path_buf()))?, false);

        let mut records = vec![];
        for line in rdr.records() {
            let record = line?;
            let row: GeneticMapRow = record.deserialize(None).wrap_err_with(|| {
                eyre!(
                    "Invalid genetic map row {:?} in {path:?}. Make sure no headers are present and that the columns are in order chr,pos,cm.",
                    record.iter().collect::<Vec<_>>()
                )
            })?;
            records.push((row.chrom.to_string(), row.pos, row.cm));
        }

        if records.is_empty() {
            return Err(Error::EmptyFile {
                path: path.to_path_buf(),
            })?;
        }

        let map = Self::from_records(records).wrap_err(eyre!("Failed to load {path:?}"))?;

        tracing::info!(
            "Read genetic map {path:?} with {} chromosomes: {}",
            map.chromosomes.len(),
            itertools::join(map.chromosomes.keys(), ",")
        );

        Ok(map)
    }

    pub fn from_records<I>(records: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, u64, f64)>,
    {
        let mut grouped: IndexMap<String, (Vec<u64>, Vec<f64>)> = IndexMap::new();
        for (chrom, pos, cm) in records {
            let (positions, cms) = grouped.entry(chrom).or_default();
            positions.push(pos);
            cms.push(cm);
        }

        let chromosomes = grouped
            .into_iter()
            .map(|(chrom, (positions, cms))| {
                let map = ChromosomeMap::new(&chrom, positions, cms)?;
                Ok((chrom, map))
            })
            .collect::<Result<IndexMap<String, ChromosomeMap>, Error>>()?;

        Ok(Self { chromosomes })
    }

    pub fn chromosome(&self, chrom: &str) -> Result<&ChromosomeMap, Error> {
        if let Some(map) = self.chromosomes.get(chrom) {
            return Ok(map);
        }

        self.chromosomes
            .values()
            .find(|map| same_chromosome(map.chrom(), chrom))
            .ok_or_else(|| Error::InvalidMap {
                chrom: chrom.to_string(),
            })
    }

    pub fn first_chromosome(&self) -> Result<&ChromosomeMap, Error> {
        self.chromosomes
            .values()
            .next()
            .ok_or_else(|| Error::InvalidMap {
                chrom: String::from("<empty map>"),
            })
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &str> {
        self.chromosomes.keys().map(String::as_str)
    }

    pub fn n_chromosomes(&self) -> usize {
        self.chromosomes.len()
    }
}
