#![allow(dead_code)]
use std::path::PathBuf;

use lanctk::args::{LadArgs, TableArgs};

pub const TEST_TABLE: &str = "tests/data/scenario_a.fb.tsv";
pub const TEST_TABLE_GZ: &str = "tests/data/scenario_a.fb.tsv.gz";
pub const MIXED_CHROMOSOME_TABLE: &str = "tests/data/mixed_chromosome.fb.tsv";
pub const BAD_WIDTH_TABLE: &str = "tests/data/bad_width.fb.tsv";
pub const BAD_PROBABILITY_TABLE: &str = "tests/data/bad_probability.fb.tsv";
pub const GENETIC_MAP: &str = "tests/data/genetic_map.tsv";
pub const TARGETS: &str = "tests/data/targets.txt";
pub const TARGETS_FLOAT: &str = "tests/data/targets_float.txt";
pub const TARGETS_SINGLE: &str = "tests/data/targets_single.txt";
pub const TEST_BIM: &str = "tests/data/test.bim";
pub const MIXED_CHROMOSOME_BIM: &str = "tests/data/mixed_chromosome.bim";
pub const OUTDIR: &str = "tests/results";

pub fn table_args(file: &str, population: &str, prefix: &str) -> TableArgs {
    TableArgs {
        file: PathBuf::from(file),
        population: String::from(population),
        output: PathBuf::from(OUTDIR),
        prefix: Some(String::from(prefix)),
    }
}

pub fn lad_args(generations: f64, prefix: &str) -> LadArgs {
    LadArgs {
        cm_map: PathBuf::from(GENETIC_MAP),
        extract: PathBuf::from(TARGETS),
        generations,
        output: PathBuf::from(OUTDIR),
        prefix: Some(String::from(prefix)),
        ..Default::default()
    }
}

pub fn result_path(name: &str) -> PathBuf {
    PathBuf::from(OUTDIR).join(name)
}

#[cfg(feature = "clap")]
pub fn silent_verbosity() -> lanctk::clap::LogAndVerbosity {
    lanctk::clap::LogAndVerbosity {
        verbosity: 1,
        log_file: None,
        silent: false,
    }
}
