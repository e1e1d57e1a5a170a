/*!
 * rr-sim - Command Line Entry Point
 *
 * Runs a scenario file, or reads session commands from stdin.
 * The event log goes to stdout; diagnostics go to stderr.
 */

use clap::{value_parser, Arg, ArgAction, Command};
use miette::{IntoDiagnostic, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use rr_sim::{
    init_tracing, CommandOutcome, EventSink, Scenario, Scheduler, Session, SimulationReport,
    SimulatorConfig, TimeQuantum, WriterSink,
};

fn cli() -> Command {
    Command::new("rr-sim")
        .version(clap::crate_version!())
        .about("Round-Robin CPU scheduling simulator")
        .arg(
            Arg::new("quantum")
                .short('q')
                .long("quantum")
                .value_name("MS")
                .help("Time quantum in milliseconds")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("scenario")
                .short('s')
                .long("scenario")
                .value_name("FILE")
                .help("Run the processes described in a JSON scenario file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print each simulation report as JSON after its log")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("echo")
                .long("echo")
                .help("Echo each command read from stdin")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let requested = matches
        .get_one::<u64>("quantum")
        .map(|&ticks| TimeQuantum::new(ticks))
        .transpose()?;

    let mut config = SimulatorConfig::from_env()?;
    if let Some(quantum) = requested {
        config = config.with_quantum(quantum);
    }
    if matches.get_flag("echo") {
        config = config.with_echo_commands(true);
    }
    init_tracing(&config);

    let json = matches.get_flag("json");
    let sink = WriterSink::new(io::stdout().lock());

    let mut sink = match matches.get_one::<PathBuf>("scenario") {
        Some(path) => run_scenario(path, requested, &config, sink, json)?,
        None => run_session(config, sink, json)?,
    };

    sink.flush().into_diagnostic()?;
    if let Some(e) = sink.take_error() {
        return Err(e).into_diagnostic();
    }
    Ok(())
}

fn run_scenario<W: Write>(
    path: &Path,
    requested: Option<TimeQuantum>,
    config: &SimulatorConfig,
    sink: WriterSink<W>,
    json: bool,
) -> Result<WriterSink<W>> {
    let scenario = Scenario::from_path(path)?;
    let quantum = scenario.quantum_or(requested, config.default_quantum);
    info!(path = %path.display(), %quantum, "Running scenario");

    let mut scheduler = Scheduler::new(sink);
    scenario.apply(&mut scheduler)?;
    let report = scheduler.run_simulation(quantum)?;

    let mut sink = scheduler.into_sink();
    if json {
        print_report(&mut sink, &report)?;
    }
    Ok(sink)
}

fn run_session<W: Write>(
    config: SimulatorConfig,
    sink: WriterSink<W>,
    json: bool,
) -> Result<WriterSink<W>> {
    let echo = config.echo_commands;
    let mut session = Session::new(sink, config);

    for line in io::stdin().lock().lines() {
        let line = line.into_diagnostic()?;
        if echo {
            session.sink_mut().append_line(&format!("> {}", line));
        }

        match session.execute(&line) {
            CommandOutcome::Continue => {}
            CommandOutcome::Ran(report) => {
                if json {
                    print_report(session.sink_mut(), &report)?;
                }
            }
            CommandOutcome::Quit => {
                debug!("Quit requested");
                break;
            }
        }
        session.sink_mut().flush().into_diagnostic()?;
    }

    Ok(session.into_sink())
}

fn print_report<W: Write>(sink: &mut WriterSink<W>, report: &SimulationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).into_diagnostic()?;
    for line in json.lines() {
        sink.append_line(line);
    }
    Ok(())
}
