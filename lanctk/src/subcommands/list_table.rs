use std::path::PathBuf;

use color_eyre::Result;

use crate::fb_table::FbTable;

pub fn read_populations(path: PathBuf) -> Result<Vec<String>> {
    Ok(FbTable::open(&path)?.populations().to_vec())
}

pub fn read_samples(path: PathBuf) -> Result<Vec<String>> {
    Ok(FbTable::open(&path)?.samples().to_vec())
}

#[doc(hidden)]
pub fn run_populations(path: PathBuf) -> Result<()> {
    for population in read_populations(path)? {
        println!("{population}");
    }
    Ok(())
}

#[doc(hidden)]
pub fn run_samples(path: PathBuf) -> Result<()> {
    for id in read_samples(path)? {
        println!("{id}");
    }
    Ok(())
}
