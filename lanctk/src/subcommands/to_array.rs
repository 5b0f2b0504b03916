use color_eyre::Result;

use crate::args::TableArgs;
use crate::emitters::{stream_dosages, LabeledArraySink, StreamSummary};
use crate::io::{create_output_dir, push_to_output};
use crate::subcommands::to_dosage::{open_table, DEFAULT_PREFIX};

pub fn run(args: TableArgs) -> Result<StreamSummary> {
    create_output_dir(&args.output)?;
    let (table, population_index) = open_table(&args)?;

    let mut path = args.output.clone();
    push_to_output(&args.prefix, DEFAULT_PREFIX, &mut path, "xarr.gz");

    let sink = LabeledArraySink::new(path, &args.population, table.samples(), table.n_markers());

    let now = std::time::Instant::now();
    let summary = stream_dosages(&table, population_index, sink)?;
    tracing::info!("Finished in {:?}", now.elapsed());

    Ok(summary)
}
