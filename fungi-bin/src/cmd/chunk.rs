use std::path::PathBuf;

use fungi::Stream;

use crate::util::{self, Config};
use crate::Error;

pub fn run(config: &Config, matches: &clap::ArgMatches) -> Result<(), Error> {
    Args::new(matches).and_then(|args| args.run(config))
}

#[derive(Debug)]
struct Args {
    input: Vec<PathBuf>,
    size: usize,
    delimiter: u8,
}

impl Args {
    fn new(m: &clap::ArgMatches) -> Result<Args, Error> {
        let delimiter = m.value_of_lossy("delimiter").unwrap();
        if delimiter.len() != 1 {
            anyhow::bail!(
                "delimiter must be exactly one byte, got {:?}",
                delimiter
            );
        }
        Ok(Args {
            input: m
                .values_of_os("input")
                .unwrap()
                .map(PathBuf::from)
                .collect(),
            size: m.value_of_lossy("size").unwrap().parse()?,
            delimiter: delimiter.as_bytes()[0],
        })
    }

    fn run(&self, config: &Config) -> Result<(), Error> {
        let wtr = util::get_buf_writer(config.output.as_ref())?;
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .has_headers(false)
            .from_writer(wtr);
        let mut batches = 0u64;
        util::lines(config, &self.input).chunk(self.size)?.try_for_each(
            |batch| {
                batches += 1;
                wtr.write_record(&batch)?;
                Ok::<(), Error>(())
            },
        )?;
        wtr.flush()?;
        tracing::info!(batches, size = self.size, "chunk finished");
        Ok(())
    }
}
