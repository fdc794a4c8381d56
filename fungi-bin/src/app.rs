const ABOUT: &str = "\
A command line tool for streaming lines through lazy stream adapters.

Every command reads lines from one or more inputs, in the order given. An
input of '-' means stdin. Each set of inputs is read on a background thread
and handed to the command through a bounded channel.

Set the FUNGI_LOG environment variable (e.g., FUNGI_LOG=debug) to print log
messages to stderr.
";

const ABOUT_CAT: &str = "\
Concatenates the lines of all inputs.

Line terminators are normalized to '\\n'.
";

const ABOUT_CHUNK: &str = "\
Groups lines into fixed size batches and prints each batch as a CSV record.

Every record has exactly --size fields, except possibly the last one, which
holds whatever lines were left over.

If reading an input fails, the partially filled batch is not printed.
";

const ABOUT_UNIQ: &str = "\
Prints the first occurrence of every distinct line.

Unlike the standard 'uniq' tool, duplicates do not need to be adjacent. Every
distinct line is kept in memory.
";

pub fn app() -> clap::App<'static, 'static> {
    let cmd = |name, about| {
        clap::SubCommand::with_name(name)
            .author(clap::crate_authors!())
            .version(clap::crate_version!())
            .about(about)
    };
    let pos = |name| clap::Arg::with_name(name);
    let flag = |name| clap::Arg::with_name(name).long(name);
    let inputs = pos("input")
        .required(true)
        .multiple(true)
        .help("One or more files containing a line per item, or '-'.");

    let cat = cmd("cat", ABOUT_CAT).arg(inputs.clone());

    let chunk = cmd("chunk", ABOUT_CHUNK)
        .arg(inputs.clone())
        .arg(
            flag("size")
                .short("n")
                .default_value("10")
                .help("The number of lines in each batch. Must be positive."),
        )
        .arg(flag("delimiter").short("d").default_value(",").help(
            "The field delimiter to use in CSV output. It must be a single \
             byte.",
        ));

    let uniq = cmd("uniq", ABOUT_UNIQ).arg(inputs).arg(
        flag("ignore-case")
            .short("i")
            .help("Compare lines case insensitively. Output is unchanged."),
    );

    clap::App::new("fungi")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(ABOUT)
        .max_term_width(100)
        .setting(clap::AppSettings::UnifiedHelpMessage)
        .setting(clap::AppSettings::SubcommandRequiredElseHelp)
        .arg(flag("timeout").short("t").takes_value(true).help(
            "Stop reading after this many milliseconds. Output produced so \
             far is kept and the command exits successfully.",
        ))
        .arg(flag("output").short("o").takes_value(true).help(
            "Write output to this file instead of stdout. '-' means stdout.",
        ))
        .arg(flag("buffer").default_value("1024").help(
            "The number of lines to buffer between the reader thread and \
             the command.",
        ))
        .subcommand(cat)
        .subcommand(chunk)
        .subcommand(uniq)
}
