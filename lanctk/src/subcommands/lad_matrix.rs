use std::path::Path;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use ndarray::Array2;

use crate::args::LadArgs;
use crate::error::Error;
use crate::genetic_map::{ChromosomeMap, GeneticMap};
use crate::io::{create_output_dir, open_strict_tsv_writer, push_to_output, read_input_lines};
use crate::structs::InterpolatedMarker;

pub const DEFAULT_PREFIX: &str = "lad";

/// Per-cM, per-generation decay rate of the exponential (1 cM = 0.01 Morgans)
const MORGANS_PER_CM: f64 = 0.01;

/// Parameters of `L = baseline + scale * exp(-0.01 * generations * |cM_i - cM_j|)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadParams {
    pub generations: f64,
    pub baseline: f64,
    pub scale: f64,
}

impl Default for LadParams {
    fn default() -> Self {
        Self {
            generations: 0.0,
            baseline: 0.0,
            scale: 1.0,
        }
    }
}

impl LadParams {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.generations.is_finite() || self.generations < 0.0 {
            return Err(Error::InvalidParameter {
                name: String::from("generations"),
                value: self.generations.to_string(),
            });
        }

        for (name, value) in [("baseline", self.baseline), ("scale", self.scale)] {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn decay(&self, distance_cm: f64) -> f64 {
        self.baseline + self.scale * (-MORGANS_PER_CM * self.generations * distance_cm).exp()
    }
}

/// One physical position per non-empty line. Floats such as `1.5e6` are truncated.
pub fn read_target_positions(path: &Path) -> Result<Vec<u64>> {
    let mut positions = vec![];

    for (i, line) in read_input_lines(path)?.enumerate() {
        let line = line?;
        let value = line.trim();
        if value.is_empty() {
            continue;
        }

        let pos = match value.parse::<u64>() {
            Ok(pos) => pos,
            Err(_) => match value.parse::<f64>() {
                Ok(pos) if pos.is_finite() && pos >= 0.0 => pos as u64,
                _ => {
                    return Err(eyre!(
                        "Invalid position {value:?} on line {} of {path:?}",
                        i + 1
                    ))
                }
            },
        };
        positions.push(pos);
    }

    if positions.is_empty() {
        return Err(Error::EmptyFile {
            path: path.to_path_buf(),
        })?;
    }

    Ok(positions)
}

/// Pairwise decay over genetic distances
pub fn lad_matrix(cms: &[f64], params: &LadParams) -> Array2<f64> {
    let n = cms.len();
    Array2::from_shape_fn((n, n), |(i, j)| params.decay((cms[i] - cms[j]).abs()))
}

/// Sort the targets, place them on the map and compute the decay matrix.
///
/// Duplicate positions are kept. The diagonal is `baseline + scale` and is not normalized.
pub fn build_lad_matrix(
    map: &ChromosomeMap,
    positions: &[u64],
    params: &LadParams,
) -> (Vec<InterpolatedMarker>, Array2<f64>) {
    let mut positions = positions.to_vec();
    positions.sort_unstable();

    let cms = map.interpolate_all(&positions);
    let matrix = lad_matrix(&cms, params);

    let markers = positions
        .into_iter()
        .zip(cms)
        .map(|(pos, cm)| InterpolatedMarker {
            chrom: map.chrom().to_string(),
            pos,
            cm,
        })
        .collect();

    (markers, matrix)
}

pub fn write_interpolated_map(markers: &[InterpolatedMarker], path: &Path) -> Result<()> {
    let mut writer = open_strict_tsv_writer(path.to_path_buf())?;
    for marker in markers {
        writer.write_record(marker.to_record())?;
    }
    writer.flush()?;

    tracing::info!("Finished writing {path:?}");
    Ok(())
}

pub fn write_npy(matrix: &Array2<f64>, path: &Path) -> Result<()> {
    ndarray_npy::write_npy(path, matrix).wrap_err_with(|| eyre!("Failed to write {path:?}"))?;

    tracing::info!("Finished writing a {:?} matrix to {path:?}", matrix.dim());
    Ok(())
}

fn select_chromosome<'a>(map: &'a GeneticMap, chrom: &Option<String>) -> Result<&'a ChromosomeMap> {
    match chrom {
        Some(chrom) => Ok(map.chromosome(chrom)?),
        None => {
            let first = map.first_chromosome()?;
            if map.n_chromosomes() > 1 {
                tracing::warn!(
                    "The genetic map has {} chromosomes ({}) and no chromosome was selected. Using chromosome {}.",
                    map.n_chromosomes(),
                    itertools::join(map.chromosomes(), ","),
                    first.chrom()
                );
            }
            Ok(first)
        }
    }
}

pub fn run(args: LadArgs) -> Result<()> {
    let params = args.params();
    params.validate()?;

    create_output_dir(&args.output)?;

    let map = GeneticMap::from_path(&args.cm_map)?;
    let chrom_map = select_chromosome(&map, &args.chrom)?;

    let positions = read_target_positions(&args.extract)?;
    tracing::info!(
        "Computing LAD for {} positions on chromosome {} over {} generations",
        positions.len(),
        chrom_map.chrom(),
        params.generations
    );

    let (markers, matrix) = build_lad_matrix(chrom_map, &positions, &params);

    let mut map_path = args.output.clone();
    push_to_output(&args.prefix, DEFAULT_PREFIX, &mut map_path, "map");
    write_interpolated_map(&markers, &map_path)?;

    let mut npy_path = args.output.clone();
    push_to_output(&args.prefix, DEFAULT_PREFIX, &mut npy_path, "npy");
    write_npy(&matrix, &npy_path)?;

    Ok(())
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    fn chr1() -> ChromosomeMap {
        ChromosomeMap::new("1", vec![0, 1000, 2000], vec![0.0, 1.0, 2.0]).unwrap()
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_lad_matrix_scenario_b() {
        let params = LadParams { generations: 100.0, ..Default::default() };
        let (markers, matrix) = build_lad_matrix(&chr1(), &[1500, 500], &params);

        assert_eq!(markers.iter().map(|m| m.pos).collect::<Vec<_>>(), vec![500, 1500]);
        assert_eq!(markers.iter().map(|m| m.cm).collect::<Vec<_>>(), vec![0.5, 1.5]);
        assert_eq!(matrix.dim(), (2, 2));
        assert!(approx_eq(matrix[[0, 0]], 1.0));
        assert!(approx_eq(matrix[[1, 1]], 1.0));
        assert!(approx_eq(matrix[[0, 1]], (-1.0f64).exp()));
        assert_eq!(matrix[[0, 1]], matrix[[1, 0]]);
    }

    #[test]
    fn test_zero_generations() {
        let params = LadParams { generations: 0.0, baseline: 0.25, scale: 0.5 };
        let (_, matrix) = build_lad_matrix(&chr1(), &[100, 900, 1999], &params);
        assert!(matrix.iter().all(|&v| v == 0.75));
    }

    #[test]
    fn test_duplicate_positions_are_kept() {
        let params = LadParams { generations: 10.0, ..Default::default() };
        let (markers, matrix) = build_lad_matrix(&chr1(), &[1000, 1000], &params);
        assert_eq!(markers.len(), 2);
        assert!(matrix.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_validate_params() {
        assert!(LadParams::default().validate().is_ok());

        let res = LadParams { generations: -1.0, ..Default::default() }.validate();
        assert!(matches!(res, Err(Error::InvalidParameter { name, .. }) if name == "generations"));

        let res = LadParams { generations: f64::NAN, ..Default::default() }.validate();
        assert!(res.is_err());

        let res = LadParams { scale: f64::INFINITY, ..Default::default() }.validate();
        assert!(matches!(res, Err(Error::InvalidParameter { name, .. }) if name == "scale"));
    }

    #[test]
    fn test_select_chromosome() {
        let map = GeneticMap::from_records(vec![
            ("1".to_string(), 0, 0.0),
            ("2".to_string(), 0, 0.0),
        ]).unwrap();

        assert_eq!(select_chromosome(&map, &None).unwrap().chrom(), "1");
        assert_eq!(select_chromosome(&map, &Some("2".to_string())).unwrap().chrom(), "2");
        assert!(select_chromosome(&map, &Some("3".to_string())).is_err());
    }
}
