use std::process;

use tracing_subscriber::EnvFilter;

mod app;
mod cmd;
mod util;

pub type Error = anyhow::Error;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("FUNGI_LOG")
                .unwrap_or_else(|_| EnvFilter::new("fungi=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    if let Err(err) = try_main() {
        eprintln!("{:?}", err);
        process::exit(1);
    }
}

fn try_main() -> Result<(), Error> {
    let matches = app::app().get_matches();
    let config = util::Config::new(&matches)?;
    match matches.subcommand() {
        ("cat", Some(m)) => cmd::cat::run(&config, m),
        ("chunk", Some(m)) => cmd::chunk::run(&config, m),
        ("uniq", Some(m)) => cmd::uniq::run(&config, m),
        (unknown, _) => {
            Err(anyhow::anyhow!("unrecognized command: {}", unknown))
        }
    }
}
