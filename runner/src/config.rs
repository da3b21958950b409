use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use scheduler::{Policy, PolicyKind};

/// How the reports are printed on stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Runner settings, from the command line and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The process list file.
    pub input: PathBuf,

    /// Policies to run, in order, without duplicates.
    pub policies: Vec<PolicyKind>,

    /// Round robin quantum, passed to the scheduler unchanged.
    pub quantum: i64,

    pub format: Format,

    /// Characters per time unit in the Gantt chart.
    pub unit_width: usize,
}

impl Config {
    pub fn command() -> Command {
        Command::new("runner")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Simulates CPU scheduling policies over a list of processes")
            .arg(
                Arg::new("input")
                    .required(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Process list: `id arrival burst [priority]` per line, or a .json array"),
            )
            .arg(
                Arg::new("policy")
                    .short('p')
                    .long("policy")
                    .action(ArgAction::Append)
                    .default_value("all")
                    .help("fcfs, sjf, srtf, priority, priority-preemptive, rr or all"),
            )
            .arg(
                Arg::new("quantum")
                    .short('q')
                    .long("quantum")
                    .env("QUANTUM")
                    .default_value("3")
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(i64))
                    .help("Round robin time quantum"),
            )
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_parser(["text", "json"])
                    .default_value("text"),
            )
            .arg(
                Arg::new("unit-width")
                    .short('w')
                    .long("unit-width")
                    .env("GANTT_UNIT_WIDTH")
                    .default_value("2")
                    .value_parser(value_parser!(usize))
                    .help("Gantt chart characters per time unit"),
            )
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let mut policies = Vec::new();
        for name in matches.get_many::<String>("policy").into_iter().flatten() {
            let kinds = if name.eq_ignore_ascii_case("all") {
                PolicyKind::ALL.to_vec()
            } else {
                vec![name.parse::<PolicyKind>().map_err(|e| anyhow!(e))?]
            };
            for kind in kinds {
                if !policies.contains(&kind) {
                    policies.push(kind);
                }
            }
        }

        let format = match matches.get_one::<String>("format").map(String::as_str) {
            Some("json") => Format::Json,
            _ => Format::Text,
        };

        Ok(Config {
            input: matches
                .get_one::<PathBuf>("input")
                .cloned()
                .ok_or_else(|| anyhow!("missing input file"))?,
            policies,
            quantum: matches.get_one::<i64>("quantum").copied().unwrap_or(3),
            format,
            unit_width: matches.get_one::<usize>("unit-width").copied().unwrap_or(2),
        })
    }

    /// Parses the process arguments, exiting with usage on a command line error.
    pub fn parse() -> Result<Config> {
        Config::from_matches(&Config::command().get_matches())
    }

    /// Attaches the quantum to the requested policies.
    ///
    /// The scheduler rejects a quantum below 1 when round robin is requested.
    pub fn policies(&self) -> scheduler::Result<Vec<Policy>> {
        self.policies
            .iter()
            .map(|kind| kind.with_quantum(self.quantum))
            .collect()
    }
}
