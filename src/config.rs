use crate::{
    error::{Result, SchedError},
    scheduler::{Policy, DEFAULT_QUANTUM},
};
use clap::{value_t, App, Arg, ArgMatches};
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Stdin,
    File(PathBuf),
    Sample,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub policies: Vec<Policy>,
    pub source: Source,
    pub interactive: bool,
    pub verbosity: u64,
}

impl Config {
    pub fn app() -> App<'static, 'static> {
        App::new("schedsim")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Simulates classic CPU scheduling policies over a fixed set of processes")
            .arg(
                Arg::with_name("policy")
                    .short("p")
                    .long("policy")
                    .takes_value(true)
                    .default_value("all")
                    .possible_values(&["fcfs", "sjf", "rr", "round-robin", "priority", "all"])
                    .case_insensitive(true)
                    .help("Scheduling policy to simulate"),
            )
            .arg(
                Arg::with_name("quantum")
                    .short("q")
                    .long("quantum")
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .validator(valid_quantum)
                    .help("Round robin time quantum [default: 4]"),
            )
            .arg(
                Arg::with_name("input")
                    .short("i")
                    .long("input")
                    .takes_value(true)
                    .help("Process list file (id, arrival, burst, priority per line), stdin if absent"),
            )
            .arg(
                Arg::with_name("sample")
                    .long("sample")
                    .conflicts_with("input")
                    .help("Use the built-in five process sample"),
            )
            .arg(
                Arg::with_name("tui")
                    .long("tui")
                    .help("Browse the results in an interactive terminal view"),
            )
            .arg(
                Arg::with_name("verbose")
                    .short("v")
                    .multiple(true)
                    .help("Log more (-v info, -vv debug, -vvv trace)"),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let quantum = if matches.is_present("quantum") {
            value_t!(matches, "quantum", i64).unwrap_or_else(|err| err.exit())
        } else {
            DEFAULT_QUANTUM as i64
        };

        let policy = matches.value_of("policy").unwrap_or("all");
        let policies = if policy.eq_ignore_ascii_case("all") {
            if quantum <= 0 {
                return Err(SchedError::NonPositiveQuantum(quantum));
            }
            Policy::all(quantum as u64).to_vec()
        } else {
            vec![Policy::parse(policy, quantum)?]
        };

        let source = if matches.is_present("sample") {
            Source::Sample
        } else {
            match matches.value_of("input") {
                Some(path) => Source::File(PathBuf::from(path)),
                None => Source::Stdin,
            }
        };

        Ok(Self {
            policies,
            source,
            interactive: matches.is_present("tui"),
            verbosity: matches.occurrences_of("verbose"),
        })
    }
}

fn valid_quantum(value: String) -> std::result::Result<(), String> {
    match value.parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("Invalid quantum: {value}. Must be an integer")),
    }
}
