use std::io::Write;
use std::path::PathBuf;

use bstr::{BString, ByteSlice};
use fungi::Stream;

use crate::util::{self, Config};
use crate::Error;

pub fn run(config: &Config, matches: &clap::ArgMatches) -> Result<(), Error> {
    Args::new(matches).and_then(|args| args.run(config))
}

#[derive(Debug)]
struct Args {
    input: Vec<PathBuf>,
    ignore_case: bool,
}

impl Args {
    fn new(m: &clap::ArgMatches) -> Result<Args, Error> {
        Ok(Args {
            input: m
                .values_of_os("input")
                .unwrap()
                .map(PathBuf::from)
                .collect(),
            ignore_case: m.is_present("ignore-case"),
        })
    }

    fn run(&self, config: &Config) -> Result<(), Error> {
        let mut wtr = util::get_buf_writer(config.output.as_ref())?;
        let mut count = 0u64;
        let mut write = |line: BString| {
            count += 1;
            wtr.write_all(&line)?;
            wtr.write_all(b"\n")?;
            Ok::<(), Error>(())
        };
        let lines = util::lines(config, &self.input);
        if self.ignore_case {
            lines
                .unique_by(|line: &BString| line.to_lowercase())
                .try_for_each(&mut write)?;
        } else {
            lines.unique().try_for_each(&mut write)?;
        }
        wtr.flush()?;
        tracing::info!(distinct = count, "uniq finished");
        Ok(())
    }
}
