mod common;
use common::{lad_args, result_path, GENETIC_MAP, TARGETS, TARGETS_FLOAT, TARGETS_SINGLE};

use std::path::PathBuf;

use ndarray::Array2;

use lanctk::error::Error;
use lanctk::subcommands::lad_matrix::{self, read_target_positions};

#[test]
fn lad_matrix_scenario_b() {
    lad_matrix::run(lad_args(100.0, "lad_scenario_b")).unwrap();

    let map = std::fs::read_to_string(result_path("lad_scenario_b.map")).unwrap();
    insta::assert_snapshot!("lad_map", map.trim_end());

    let matrix: Array2<f64> = ndarray_npy::read_npy(result_path("lad_scenario_b.npy")).unwrap();
    assert_eq!(matrix.dim(), (2, 2));
    assert!((matrix[[0, 0]] - 1.0).abs() < 1e-12);
    assert!((matrix[[1, 1]] - 1.0).abs() < 1e-12);
    assert!((matrix[[0, 1]] - (-1.0f64).exp()).abs() < 1e-12);
    assert_eq!(matrix[[0, 1]], matrix[[1, 0]]);
}

#[test]
fn lad_matrix_without_decay() {
    let mut args = lad_args(0.0, "lad_no_decay");
    args.baseline = 0.5;
    args.scale = 2.0;
    lad_matrix::run(args).unwrap();

    let matrix: Array2<f64> = ndarray_npy::read_npy(result_path("lad_no_decay.npy")).unwrap();
    assert!(matrix.iter().all(|&v| v == 2.5));
}

#[test]
fn lad_matrix_selected_chromosome() {
    let mut args = lad_args(100.0, "lad_chr2");
    args.chrom = Some(String::from("chr2"));
    lad_matrix::run(args).unwrap();

    let map = std::fs::read_to_string(result_path("lad_chr2.map")).unwrap();
    assert_eq!(map, "2\t500\t1.000000\n2\t1500\t3.000000\n");

    let mut args = lad_args(100.0, "lad_chr3");
    args.chrom = Some(String::from("3"));
    let err = lad_matrix::run(args).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::InvalidMap { .. })));
}

#[test]
fn lad_matrix_negative_generations() {
    let err = lad_matrix::run(lad_args(-1.0, "lad_negative")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidParameter { .. })
    ));
    assert!(!result_path("lad_negative.npy").exists());
}

#[test]
fn target_positions() {
    assert_eq!(read_target_positions(&PathBuf::from(TARGETS)).unwrap(), vec![1500, 500]);
    assert_eq!(read_target_positions(&PathBuf::from(TARGETS_FLOAT)).unwrap(), vec![1500, 500]);

    // Not a list of positions
    assert!(read_target_positions(&PathBuf::from(GENETIC_MAP)).is_err());
}

#[test]
fn lad_matrix_single_target() {
    assert_eq!(read_target_positions(&PathBuf::from(TARGETS_SINGLE)).unwrap(), vec![500]);

    let mut args = lad_args(100.0, "lad_single");
    args.extract = PathBuf::from(TARGETS_SINGLE);
    lad_matrix::run(args).unwrap();

    let map = std::fs::read_to_string(result_path("lad_single.map")).unwrap();
    assert_eq!(map, "1\t500\t0.500000\n");

    let matrix: Array2<f64> = ndarray_npy::read_npy(result_path("lad_single.npy")).unwrap();
    assert_eq!(matrix.dim(), (1, 1));
    assert!((matrix[[0, 0]] - 1.0).abs() < 1e-12);
}

#[test]
#[cfg(feature = "clap")]
fn lad_matrix_subcommand() {
    let cmd = lanctk::clap::SubCommand::LadMatrix {
        args: lad_args(8.0, "lad_cmd"),
        log_and_verbosity: common::silent_verbosity(),
    };
    lanctk::clap::run_cmd(cmd).unwrap();
    assert!(result_path("lad_cmd.npy").exists());
    assert!(result_path("lad_cmd.map").exists());
}
