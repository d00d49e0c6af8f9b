//! Replays table interactions against an in-memory URL.
//!
//! Useful for checking what a list screen writes into the address bar for a
//! given sequence of clicks and keystrokes.

mod cli;
mod error;
mod script;

use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use backoffice_table::TableController;
use backoffice_table::TableOptions;
use backoffice_table::navigation::MemoryHistory;
use backoffice_table::request::ListRequest;
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::Cli;
use crate::error::CliError;
use crate::script::Step;

const LOG_FILE: &str = "backoffice-cli.log";

async fn run(cli: &Cli, out: &mut impl Write) -> Result<(), CliError> {
    let history = MemoryHistory::new(&cli.query);
    let mut options = TableOptions::default().with_history_mode(cli.history_mode());
    if let Some(debounce) = cli.debounce() {
        options = options.with_debounce(debounce);
    }
    let table = TableController::new(history.clone(), options);
    log::info!("Replaying {} steps from ?{}", cli.steps.len(), cli.query);

    writeln!(out, "start       ?{}", history.location())?;
    for step in &cli.steps {
        step.apply(&table).await;
        writeln!(out, "{:<11} ?{}", step_label(step), history.location())?;
    }

    let state = table.state();
    writeln!(out)?;
    writeln!(out, "page        {}", state.page)?;
    writeln!(out, "per page    {}", state.per_page)?;
    writeln!(
        out,
        "sorting     {}",
        serde_json::to_string(&state.sorting).unwrap_or_default()
    )?;
    writeln!(
        out,
        "filters     {}",
        serde_json::to_string(&state.column_filters).unwrap_or_default()
    )?;
    writeln!(out, "selected    {:?}", state.selected_row_keys())?;
    writeln!(out, "history     {} entries", history.len())?;
    writeln!(
        out,
        "request     ?{}",
        ListRequest::from_state(&state).to_search_params()
    )?;
    if table.has_pending_reset() {
        writeln!(out, "pending     page reset (add wait=MS to let it fire)")?;
    }
    Ok(())
}

fn step_label(step: &Step) -> &'static str {
    match step {
        Step::Page(_) => "page",
        Step::PerPage(_) => "per-page",
        Step::Sort(_) => "sort",
        Step::Paginate(_) => "paginate",
        Step::Filter(..) => "filter",
        Step::ToggleColumn(_) => "hide",
        Step::ToggleRow(_) => "select",
        Step::Wait(_) => "wait",
        Step::Unmount => "unmount",
    }
}

fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let log_file = File::create(LOG_FILE)?;
    // A logger may already be installed when embedded; keep going without ours.
    let _ = WriteLogger::init(level, Config::default(), log_file);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(cli.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli, &mut io::stdout().lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
