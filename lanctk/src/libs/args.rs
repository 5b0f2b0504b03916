use std::path::PathBuf;

use crate::subcommands::lad_matrix::LadParams;

#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct TableArgs {
    /// RFMix forward-backward output (.fb.tsv, optionally compressed)
    pub file: PathBuf,

    /// The ancestry to output, must match a population in the first line of the table
    #[cfg_attr(feature = "clap", arg(short = 'P', long = "pop"))]
    pub population: String,

    /// Output directory
    #[cfg_attr(feature = "clap", arg(short = 'o', long="outdir", default_value_os_t = PathBuf::from("./"), value_hint = clap::ValueHint::DirPath))]
    pub output: PathBuf,

    /// Output filename prefix
    #[cfg_attr(feature = "clap", arg(short = 'p', long))]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct LadArgs {
    /// Genetic map (chromosome, position, cM), tab-delimited without a header
    #[cfg_attr(feature = "clap", arg(short = 'm', long = "cm-map"))]
    pub cm_map: PathBuf,

    /// List of coordinates to include (one position per row)
    #[cfg_attr(feature = "clap", arg(short = 'e', long))]
    pub extract: PathBuf,

    /// Number of generations since admixture
    #[cfg_attr(feature = "clap", arg(short = 'g', long))]
    pub generations: f64,

    /// Constant added to every entry of the matrix
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 0.0, allow_hyphen_values = true))]
    pub baseline: f64,

    /// Multiplier of the exponential decay
    #[cfg_attr(feature = "clap", arg(long, default_value_t = 1.0, allow_hyphen_values = true))]
    pub scale: f64,

    /// Chromosome of the coordinates, defaults to the first chromosome of the map
    #[cfg_attr(feature = "clap", arg(short = 'c', long))]
    pub chrom: Option<String>,

    /// Output directory
    #[cfg_attr(feature = "clap", arg(short = 'o', long="outdir", default_value_os_t = PathBuf::from("./"), value_hint = clap::ValueHint::DirPath))]
    pub output: PathBuf,

    /// Output filename prefix
    #[cfg_attr(feature = "clap", arg(short = 'p', long))]
    pub prefix: Option<String>,
}

impl Default for LadArgs {
    fn default() -> Self {
        Self {
            cm_map: PathBuf::new(),
            extract: PathBuf::new(),
            generations: 0.0,
            baseline: 0.0,
            scale: 1.0,
            chrom: None,
            output: PathBuf::from("./"),
            prefix: None,
        }
    }
}

impl LadArgs {
    pub fn params(&self) -> LadParams {
        LadParams {
            generations: self.generations,
            baseline: self.baseline,
            scale: self.scale,
        }
    }
}
