use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::args::TableArgs;
use crate::emitters::{stream_dosages, DosagePaths, DosageStore, StreamSummary};
use crate::fb_table::FbTable;
use crate::io::create_output_dir;

pub const DEFAULT_PREFIX: &str = "lanc";

/// Open the table and resolve the 1-based index of the requested population
pub fn open_table(args: &TableArgs) -> Result<(FbTable, usize)> {
    let table = FbTable::open(&args.file)?;
    let population_index = table
        .population_index(&args.population)
        .wrap_err_with(|| format!("Failed to read {:?}", args.file))?;

    tracing::info!(
        "Found {} individuals and {} variants in {} populations: {}",
        table.n_samples(),
        table.n_markers(),
        table.n_populations(),
        table.populations().join(", ")
    );
    tracing::info!("Local ancestry for {} will be output", args.population);

    Ok((table, population_index))
}

pub fn run(args: TableArgs) -> Result<StreamSummary> {
    create_output_dir(&args.output)?;
    let (table, population_index) = open_table(&args)?;

    let paths = DosagePaths::new(&args.output, &args.prefix, DEFAULT_PREFIX);
    let store = DosageStore::create(paths, table.samples())?;

    let now = std::time::Instant::now();
    let summary = stream_dosages(&table, population_index, store)?;
    tracing::info!("Finished in {:?}", now.elapsed());

    Ok(summary)
}
