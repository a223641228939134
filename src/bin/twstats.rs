use clap::{Parser, Subcommand};
use itertools::Itertools;
use std::str::FromStr;
use tweet_stats::config::Config;
use tweet_stats::operation::{handle, handle_with};
use tweet_stats::profile::Timed;
use tweet_stats::source::{InMemory, LineSource, Location};
use tweet_stats::{cli, Aggregation, Operation, Ranking, Request};

type Void = Result<(), Box<dyn std::error::Error>>;

fn main() -> Void {
    let opts: Opts = Opts::parse();
    let _ = cli::init_logging(opts.verbose);

    let config = match &opts.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    match opts.command {
        SubCommand::Run {
            operation,
            location,
            format,
            profile,
        } => {
            let operation = match operation.parse::<Operation>() {
                Ok(operation) => operation,
                Err(error) => {
                    println!("{}", error);
                    return Ok(());
                }
            };

            let source: Box<dyn LineSource> = if location == "-" {
                Box::new(InMemory::new("stdin", cli::read_stdin()?))
            } else {
                Location::parse(&location, &config).into_source(&config)
            };

            let ranking = if profile {
                Timed::new(operation).run(source.as_ref())
            } else {
                operation.run(source.as_ref())
            };

            print_ranking(&ranking, format)?;
        }
        SubCommand::Request { profile } => {
            let request = serde_json::from_slice::<Request>(&cli::read_stdin()?)?;

            let response = if profile {
                handle_with(&request, &config, |operation, source| {
                    Timed::new(*operation).run(source)
                })
            } else {
                handle(&request, &config)
            };

            println!("{}", serde_json::to_string(&response)?);
        }
        SubCommand::List => {
            println!("{}", Operation::names().join("\n"));
        }
    }

    Ok(())
}

fn print_ranking(ranking: &Ranking, format: Format) -> Void {
    match format {
        Format::Json => println!("{}", serde_json::to_string(ranking)?),
        Format::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());

            for row in ranking.rows() {
                writer.write_record(&row)?;
            }

            writer.flush()?;
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum Format {
    Json,
    Csv,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Format::Json),
            "csv" => Ok(Format::Csv),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[derive(Parser)]
#[clap(name = "twstats", version, author)]
struct Opts {
    /// Level of verbosity
    #[clap(short, long, parse(from_occurrences))]
    verbose: i32,
    /// Configuration file (TOML)
    #[clap(short, long)]
    config: Option<String>,
    #[clap(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand)]
enum SubCommand {
    /// Run one operation on a corpus
    Run {
        /// Operation name (see `list`)
        operation: String,
        /// Local path, gs://bucket/key, object key, or - for standard input
        location: String,
        /// Output format (json or csv)
        #[clap(short, long, default_value = "json")]
        format: Format,
        /// Log the running time of the operation
        #[clap(long)]
        profile: bool,
    },
    /// Read a JSON request ({"message": ..., "file_path": ...}) from standard input
    Request {
        /// Log the running time of the operation
        #[clap(long)]
        profile: bool,
    },
    /// List the supported operations
    List,
}
