use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::time::OffsetTime;

use crate::args::{LadArgs, TableArgs};
use crate::subcommands::{annotate_bim, lad_matrix, list_table, to_array, to_dosage};

#[derive(Parser, Debug)]
#[command(author, version, about, styles=get_styles())]
pub struct Arguments {
    #[command(subcommand)]
    cmd: SubCommand,
}

#[derive(Args, Debug, Clone)]
pub struct LogAndVerbosity {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, default_value_t = 3)]
    pub verbosity: u8,

    /// A file path to save logs to
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Silence all warning and info messages
    #[arg(long)]
    pub silent: bool,
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    /// Convert the local ancestry of one population into a PLINK 2 importable dosage store
    ToDosage {
        #[command(flatten)]
        args: TableArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Convert the local ancestry of one population into a labeled variants x samples array
    ToArray {
        #[command(flatten)]
        args: TableArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Compute the local ancestry disequilibrium decay matrix for a list of positions
    LadMatrix {
        #[command(flatten)]
        args: LadArgs,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Fill the genetic position column of a PLINK .bim file from a genetic map
    AnnotateBim {
        bim: PathBuf,

        /// Genetic map (chromosome, position, cM), tab-delimited without a header
        #[arg(short = 'm', long = "cm-map")]
        cm_map: PathBuf,

        /// Output .bim file
        #[arg(short = 'o', long, default_value_os_t = PathBuf::from("-"))]
        output: PathBuf,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Output the reference populations of a table
    Populations {
        file: PathBuf,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },

    /// Output the sample names of a table
    Samples {
        file: PathBuf,

        #[command(flatten)]
        log_and_verbosity: LogAndVerbosity,
    },
}

impl SubCommand {
    #[rustfmt::skip]
    pub fn log_and_verbosity(&self) -> (u8, &Option<PathBuf>, bool) {
        match self {
            SubCommand::ToDosage { log_and_verbosity, .. }
            | SubCommand::ToArray { log_and_verbosity, .. }
            | SubCommand::LadMatrix { log_and_verbosity, .. }
            | SubCommand::AnnotateBim { log_and_verbosity, .. }
            | SubCommand::Populations { log_and_verbosity, .. }
            | SubCommand::Samples { log_and_verbosity, .. }
            => (log_and_verbosity.verbosity, &log_and_verbosity.log_file, log_and_verbosity.silent),
        }
    }
}

pub fn run_args(args: Arguments) -> Result<()> {
    let (verbosity, log_file, is_silent) = args.cmd.log_and_verbosity();

    let (level, wrtr, _guard) = init_tracing(verbosity, log_file, is_silent)?;

    let timer = time::format_description::parse("[hour]:[minute]:[second].[subsecond digits:3]")?;
    let time_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = OffsetTime::new(time_offset, timer);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(wrtr)
        .with_timer(timer)
        .init();

    run_cmd(args.cmd)?;

    Ok(())
}

#[rustfmt::skip]
pub fn run_cmd(cmd: SubCommand) -> Result<()> {
    match cmd {
        SubCommand::ToDosage { args, .. } => { to_dosage::run(args)?; }
        SubCommand::ToArray { args, .. } => { to_array::run(args)?; }
        SubCommand::LadMatrix { args, .. } => lad_matrix::run(args)?,
        SubCommand::AnnotateBim { bim, cm_map, output, .. } => annotate_bim::run(bim, cm_map, output)?,
        SubCommand::Populations { file, .. } => list_table::run_populations(file)?,
        SubCommand::Samples { file, .. } => list_table::run_samples(file)?,
    };
    Ok(())
}

pub fn init_tracing(
    verbosity: u8,
    log_file: &Option<PathBuf>,
    is_silent: bool,
) -> Result<(Level, NonBlocking, WorkerGuard)> {
    let level = if is_silent {
        Level::ERROR
    } else {
        match verbosity {
            0 | 1 => Level::ERROR,
            2 => Level::WARN,
            3 => Level::INFO,
            4 => Level::DEBUG,
            5..=u8::MAX => Level::TRACE,
        }
    };

    // Write logs to stderr or file
    let (wrtr, _guard) = match log_file {
        Some(path) => {
            let file = std::fs::File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    Ok((level, wrtr, _guard))
}

pub fn get_styles() -> clap::builder::Styles {
    clap::builder::Styles::styled()
        .usage(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .header(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
        )
        .literal(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .invalid(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .error(
            anstyle::Style::new()
                .bold()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
        )
        .valid(
            anstyle::Style::new()
                .bold()
                .underline()
                .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
        )
        .placeholder(
            anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_and_verbosity(verbosity: u8) -> LogAndVerbosity {
        LogAndVerbosity {
            verbosity,
            log_file: None,
            silent: false,
        }
    }

    #[test]
    fn test_init_tracing() {
        let (level, _, _) = init_tracing(1, &None, false).unwrap();
        assert_eq!(Level::ERROR, level);
        let (level, _, _) = init_tracing(2, &None, false).unwrap();
        assert_eq!(Level::WARN, level);
        let (level, _, _) = init_tracing(3, &None, false).unwrap();
        assert_eq!(Level::INFO, level);
        let (level, _, _) = init_tracing(4, &None, false).unwrap();
        assert_eq!(Level::DEBUG, level);
        let (level, _, _) = init_tracing(5, &None, false).unwrap();
        assert_eq!(Level::TRACE, level);
        let (level, _, _) = init_tracing(5, &None, true).unwrap();
        assert_eq!(Level::ERROR, level);
    }

    #[test]
    fn test_log_and_verbosity() {
        let subcommand = SubCommand::Samples {
            file: PathBuf::new(),
            log_and_verbosity: log_and_verbosity(4),
        };
        assert_eq!((4, &None, false), subcommand.log_and_verbosity());

        let subcommand = SubCommand::LadMatrix {
            args: LadArgs::default(),
            log_and_verbosity: LogAndVerbosity {
                verbosity: 2,
                log_file: Some(PathBuf::from("lad.log")),
                silent: true,
            },
        };
        let (verbosity, log_file, silent) = subcommand.log_and_verbosity();
        assert_eq!(verbosity, 2);
        assert_eq!(log_file, &Some(PathBuf::from("lad.log")));
        assert!(silent);
    }

    #[test]
    fn test_parse_arguments() {
        let args = Arguments::try_parse_from([
            "lanctk", "to-dosage", "chr22.fb.tsv", "--pop", "AFR", "-o", "out", "-p", "chr22",
        ])
        .unwrap();

        match args.cmd {
            SubCommand::ToDosage { args, log_and_verbosity } => {
                assert_eq!(args.file, PathBuf::from("chr22.fb.tsv"));
                assert_eq!(args.population, "AFR");
                assert_eq!(args.output, PathBuf::from("out"));
                assert_eq!(args.prefix, Some(String::from("chr22")));
                assert_eq!(log_and_verbosity.verbosity, 3);
            }
            _ => panic!("expected to-dosage"),
        }

        let args = Arguments::try_parse_from([
            "lanctk", "lad-matrix", "--cm-map", "map.tsv", "--extract", "targets.txt", "-g", "10", "--baseline", "-0.5",
        ])
        .unwrap();

        match args.cmd {
            SubCommand::LadMatrix { args, .. } => {
                assert_eq!(args.generations, 10.0);
                assert_eq!(args.baseline, -0.5);
                assert_eq!(args.scale, 1.0);
                assert_eq!(args.chrom, None);
                assert_eq!(args.output, PathBuf::from("./"));
            }
            _ => panic!("expected lad-matrix"),
        }

        assert!(Arguments::try_parse_from(["lanctk", "to-array", "chr22.fb.tsv"]).is_err());
    }
}
