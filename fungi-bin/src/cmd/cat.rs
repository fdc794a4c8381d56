use std::io::Write;
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
}

impl Args {
    fn new(m: &clap::ArgMatches) -> Result<Args, Error> {
        Ok(Args {
            input: m
                .values_of_os("input")
                .unwrap()
                .map(PathBuf::from)
                .collect(),
        })
    }

    fn run(&self, config: &Config) -> Result<(), Error> {
        let mut wtr = util::get_buf_writer(config.output.as_ref())?;
        let mut count = 0u64;
        util::lines(config, &self.input).try_for_each(|line| {
            count += 1;
            wtr.write_all(&line)?;
            wtr.write_all(b"\n")?;
            Ok::<(), Error>(())
        })?;
        wtr.flush()?;
        tracing::info!(lines = count, "cat finished");
        Ok(())
    }
}
