use std::io;

use chrono::{Local, Utc};
use clap::{CommandFactory, Parser};
use colored::Colorize;

use habitgrid::cli::args::{Cli, Commands};
use habitgrid::cli::{commands, prompt};
use habitgrid::config::{Config, Paths};
use habitgrid::core::parse_day;
use habitgrid::error::HabitError;
use habitgrid::habits::WeekReference;
use habitgrid::logging::init_logging;
use habitgrid::session::Tracker;
use habitgrid::storage::SqliteRepository;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), HabitError> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Week);

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "habitgrid", &mut io::stdout());
        return Ok(());
    }

    let paths = Paths::resolve(cli.home)?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    config.general.color.apply();
    let _logger = init_logging(&config.logging.level, &paths.logs)?;
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = if let Commands::Config(args) = &command {
        commands::config(&paths, &config, &args.command, format)?
    } else {
        let today = Local::now().date_naive();
        let anchor = match cli.week.as_deref() {
            Some(expr) => parse_day(expr, today)?,
            None => today,
        };
        let week = WeekReference::containing(anchor, config.tracker.week_starts_on);

        let repository = SqliteRepository::open_at(&paths.database)?;
        let mut tracker = Tracker::open(repository, today, week);
        print_warnings(tracker.take_warnings());
        let result = commands::execute(&mut tracker, command, Utc::now(), format, prompt::confirm);
        print_warnings(tracker.take_warnings());
        result?
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn print_warnings(warnings: Vec<String>) {
    for warning in warnings {
        eprintln!("{}: {}", "warning".yellow().bold(), warning);
    }
}
