use clap::Parser as ClapParser;
use clap::error::ErrorKind;
use sq_lang::cli::{self, RunOptions};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "sq")]
#[command(about = "sq - query system information and print the results as JSON")]
#[command(version)]
struct Cli {
    /// The SQ query to run
    query: String,

    /// Pretty-print the output
    #[arg(short, long)]
    pretty: bool,

    /// Only validate syntax, don't run the query
    #[arg(long)]
    syntax_only: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.verbose);

    let options = RunOptions {
        query: cli.query,
        pretty: cli.pretty,
        syntax_only: cli.syntax_only,
    };

    match cli::execute(&options) {
        Ok(result) => println!("{}", result.render(options.pretty)),
        Err(e) => {
            tracing::debug!(error = ?e, "query failed");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
