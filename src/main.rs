#[macro_use]
extern crate prettytable;

use std::process;
use std::time::Duration;

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::LevelFilter;
use prettytable::{format, Table};
use separator::Separatable;

use searchclient::config::{ActionSet, Config, HeuristicKind, Strategy};
use searchclient::scenarios;
use searchclient::solver::{Outcome, Stats};
use searchclient::Solve;

fn main() {
    let matches = App::new("searchclient")
        .author("martin-t")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plans for multi-agent box-pushing levels using graph search")
        .arg(
            Arg::with_name("strategy")
                .short("s")
                .long("strategy")
                .takes_value(true)
                .default_value("bfs")
                .help("bfs, dfs, astar, wastar or greedy"),
        )
        .arg(
            Arg::with_name("weight")
                .short("w")
                .long("weight")
                .takes_value(true)
                .help("weight of the estimate for wastar (default 5)"),
        )
        .arg(
            Arg::with_name("heuristic")
                .long("heuristic")
                .takes_value(true)
                .possible_values(&["goal-count", "goal-distance"])
                .default_value("goal-distance")
                .help("estimate used by the informed strategies"),
        )
        .arg(
            Arg::with_name("max-states")
                .long("max-states")
                .takes_value(true)
                .help("give up after holding this many states (0 = no limit)"),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .takes_value(true)
                .help("give up after this many seconds"),
        )
        .arg(
            Arg::with_name("corner-turns")
                .long("corner-turns")
                .help("also allow pushes and pulls that turn a box around a corner"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("log more to stderr (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::with_name("scenario")
                .required(true)
                .possible_values(&scenarios::NAMES),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let config = parse_config(&matches).unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });

    let name = matches.value_of("scenario").unwrap_or_default();
    let level = match scenarios::scenario(name) {
        Some(Ok(level)) => level,
        Some(Err(err)) => {
            eprintln!("Invalid level {}: {}", name, err);
            process::exit(1);
        }
        None => {
            eprintln!("Unknown scenario: {}", name);
            process::exit(1);
        }
    };

    let solution = level.solve(&config).unwrap_or_else(|err| {
        eprintln!("Search failed: {}", err);
        process::exit(1);
    });

    match &solution.outcome {
        Outcome::Solved(plan) => {
            println!("Found solution of length {} using {}:", plan.len(), solution.strategy);
            print!("{}", plan);
        }
        Outcome::Unsolvable => println!("No solution"),
        Outcome::Stopped(limit) => println!("Search stopped: {}", limit),
    }
    println!();
    print!("{}", solution.stats);
    stats_table(&solution.stats).printstd();

    if let Outcome::Stopped(_) = solution.outcome {
        process::exit(2);
    }
}

fn init_logging(verbosity: u64) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    match verbosity {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn parse_config(matches: &ArgMatches<'_>) -> Result<Config, String> {
    let mut strategy: Strategy = matches
        .value_of("strategy")
        .unwrap_or("bfs")
        .parse()
        .map_err(|err| format!("{}", err))?;
    if let Some(weight) = matches.value_of("weight") {
        let weight = weight
            .parse()
            .map_err(|_| format!("Invalid weight: {}", weight))?;
        match strategy {
            Strategy::WeightedAStar(_) => strategy = Strategy::WeightedAStar(weight),
            _ => return Err("--weight only applies to wastar".to_string()),
        }
    }

    let mut config = Config::new(strategy);
    if let Some(heuristic) = matches.value_of("heuristic") {
        config.heuristic = heuristic.parse::<HeuristicKind>()?;
    }
    if let Some(max) = matches.value_of("max-states") {
        let max: usize = max
            .parse()
            .map_err(|_| format!("Invalid state limit: {}", max))?;
        config.max_states = if max == 0 { None } else { Some(max) };
    }
    if let Some(timeout) = matches.value_of("timeout") {
        let secs: f64 = timeout
            .parse()
            .map_err(|_| format!("Invalid timeout: {}", timeout))?;
        let timeout = Duration::try_from_secs_f64(secs)
            .map_err(|_| format!("Invalid timeout: {}", timeout))?;
        config.timeout = Some(timeout);
    }
    if matches.is_present("corner-turns") {
        config.actions = ActionSet::WithCornerTurns;
    }
    Ok(config)
}

fn stats_table(stats: &Stats) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(row!["Depth", "Created", "Duplicates", "Expanded"]);
    for (depth, created, duplicates, expanded) in stats.by_depth() {
        table.add_row(row![
            depth,
            created.separated_string(),
            duplicates.separated_string(),
            expanded.separated_string()
        ]);
    }
    table
}
