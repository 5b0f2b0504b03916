use std::path::PathBuf;

use thiserror::Error as ThisError;

#[rustfmt::skip]
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("Failed to open file: {path:?}")]
    Io { path: PathBuf },

    #[error("File contains zero rows: {path:?}")]
    EmptyFile { path: PathBuf },

    #[error("The genetic map has no records for chromosome {chrom}")]
    InvalidMap { chrom: String },

    #[error("The genetic map is not sorted on chromosome {chrom}: {prev_pos} ({prev_cm} cM) is followed by {pos} ({cm} cM)")]
    UnsortedMap { chrom: String, prev_pos: u64, prev_cm: f64, pos: u64, cm: f64 },

    #[error("Population {population:?} is not present in the table header. Valid choices are: {}", .valid.join(", "))]
    UnknownPopulation { population: String, valid: Vec<String> },

    #[error("Malformed table header: {reason}")]
    MalformedHeader { reason: String },

    #[error("Malformed marker row {row} (line {}): {reason}", .row + 3)]
    MalformedRow { row: usize, reason: String },

    #[error("Marker row {row} is on chromosome {found} but the first marker row is on chromosome {expected}. Split the input by chromosome.")]
    MixedChromosome { row: usize, expected: String, found: String },

    #[error("Expected {expected} marker rows based on the line count, but {found} marker rows were read")]
    MarkerCount { expected: usize, found: usize },

    #[error("Only {written} of {expected} marker rows were written to the array")]
    IncompleteArray { written: usize, expected: usize },

    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: String, value: String },
}
