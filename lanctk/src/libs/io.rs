use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use csv::{QuoteStyle, Reader, ReaderBuilder, Writer, WriterBuilder};

use crate::utils::strip_prefix;

/// Line reader over a possibly compressed file
pub fn read_input_lines(path: &Path) -> Result<io::Lines<BufReader<Box<dyn io::Read>>>> {
    let input = get_input(Some(path.to_path_buf()))?;
    Ok(BufReader::new(input).lines())
}

// Blank lines are not counted
pub fn count_lines(path: &Path) -> Result<usize> {
    let mut n = 0;
    for line in read_input_lines(path)? {
        if !line?.trim().is_empty() {
            n += 1;
        }
    }
    Ok(n)
}

pub fn push_to_output(prefix: &Option<String>, default_name: &str, output: &mut PathBuf, suffix: &str) {
    match &strip_prefix(prefix.clone()) {
        Some(prefix) => output.push(format!("{prefix}.{suffix}")),
        None => output.push(format!("{default_name}.{suffix}")),
    }
}

pub fn create_output_dir(output: &Path) -> Result<()> {
    if let Err(e) = std::fs::create_dir_all(output) {
        match e.kind() {
            std::io::ErrorKind::AlreadyExists => (),
            _ => return Err(eyre!("Error creating directory {output:?}: {e}")),
        }
    }
    Ok(())
}

pub fn get_tsv_reader<R: io::Read>(input: R, has_headers: bool) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(false)
        .from_reader(input)
}

pub fn get_strict_tsv_writer<W: io::Write>(output: W) -> Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(output)
}

pub fn get_input(filename: Option<PathBuf>) -> Result<Box<dyn io::Read>> {
    let input: Box<dyn io::Read> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdin()),
            Some(name) => {
                let r: Box<dyn io::Read> = match niffler::from_path(name) {
                    Ok(x) => x.0,
                    // Too short to carry a compression magic number, so read it as plain text
                    Err(niffler::Error::FileTooShort) => match std::fs::File::open(name) {
                        Ok(file) => Box::new(file),
                        Err(err) => return Err(eyre!("failed to open \"{name}\": {err}"))?,
                    },
                    Err(err) => {
                        let msg = format!("failed to open \"{name}\": {err}");
                        return Err(eyre!(msg))?;
                    }
                };
                r
            }
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdin()),
    };
    Ok(input)
}

pub fn get_output(filename: Option<PathBuf>) -> Result<Box<dyn io::Write>> {
    let output: Box<dyn io::Write> = match filename {
        Some(name) => match name.to_str() {
            Some("-") => Box::new(io::stdout()),
            Some(name) => Box::new(
                match std::fs::File::options()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(name)
                {
                    Ok(x) => io::BufWriter::new(x),
                    Err(err) => return Err(eyre!("failed to open \"{name}\": {err}"))?,
                },
            ),
            None => return Err(eyre!("Unknown I/O error")),
        },
        None => Box::new(io::stdout()),
    };
    Ok(output)
}

pub fn open_strict_tsv_writer(name: PathBuf) -> Result<Writer<Box<dyn io::Write>>> {
    Ok(get_strict_tsv_writer(get_output(Some(name))?))
}
