mod common;

use std::path::PathBuf;

use lanctk::subcommands::list_table::{read_populations, read_samples};

use crate::common::{TEST_TABLE, TEST_TABLE_GZ};

#[test]
fn populations() {
    let populations = read_populations(PathBuf::from(TEST_TABLE)).unwrap();
    assert_eq!(populations, vec!["AFR", "EUR"]);
}

#[test]
fn samples_keep_table_order() {
    let samples = read_samples(PathBuf::from(TEST_TABLE)).unwrap();
    assert_eq!(samples, vec!["S2", "S1"]);

    let samples = read_samples(PathBuf::from(TEST_TABLE_GZ)).unwrap();
    assert_eq!(samples, vec!["S2", "S1"]);
}

#[test]
#[cfg(feature = "clap")]
fn listing_subcommands() {
    let cmd = lanctk::clap::SubCommand::Populations {
        file: PathBuf::from(TEST_TABLE),
        log_and_verbosity: crate::common::silent_verbosity(),
    };
    lanctk::clap::run_cmd(cmd).unwrap();

    let cmd = lanctk::clap::SubCommand::Samples {
        file: PathBuf::from(TEST_TABLE),
        log_and_verbosity: crate::common::silent_verbosity(),
    };
    lanctk::clap::run_cmd(cmd).unwrap();
}
