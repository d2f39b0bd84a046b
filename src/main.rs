use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use evaldate::cli::resolve;
use evaldate::{EvalDateConfig, FixedClock, LocalClock, StoreKind};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "evaldate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and persist the evaluation date for today's batch jobs")]
#[command(
    long_about = "Without flags, looks up today's date in the persisted date_map and stores \
the mapped value as evaluation_date. Values are persisted for future shells; the current \
environment is not changed."
)]
struct Cli {
    /// Replace date_map with the pairs in a JSON file ({"YYYYMMDD": "YYYYMMDD", ...})
    #[arg(long, value_name = "PATH", conflicts_with = "date")]
    update_date_map: Option<PathBuf>,

    /// Force evaluation_date to a literal YYYYMMDD value
    #[arg(long, value_name = "YYYYMMDD")]
    date: Option<String>,

    /// Config file (default: <config dir>/evaldate/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Store backend, overrides the config file
    #[arg(long, value_enum)]
    store: Option<StoreKind>,

    /// Pretend today is this date
    #[arg(long, value_name = "YYYYMMDD", hide = true, value_parser = parse_today)]
    today: Option<FixedClock>,

    /// Only print warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, exclusive = true)]
    completions: Option<Shell>,
}

fn parse_today(value: &str) -> Result<FixedClock, String> {
    FixedClock::parse(value).map_err(|e| format!("expected a YYYYMMDD calendar date: {}", e))
}

fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "evaldate", &mut io::stdout());
        return;
    }

    let config = match EvalDateConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&format!("{:#}", e), 1),
    };

    let mut store = match resolve::open_store(&config, cli.store) {
        Ok(store) => store,
        Err(e) => fail(&format!("{:#}", e), 1),
    };

    let mode = resolve::build_mode(cli.update_date_map, cli.date);

    let result = match &cli.today {
        Some(clock) => resolve::run(&mode, store.as_mut(), clock, &config.variables, cli.quiet),
        None => resolve::run(&mode, store.as_mut(), &LocalClock, &config.variables, cli.quiet),
    };

    if let Err(e) = result {
        fail(&e.to_string(), e.exit_code());
    }
}

fn fail(message: &str, code: i32) -> ! {
    eprintln!("{}", format!("Error: {}", message).red());
    std::process::exit(code);
}
