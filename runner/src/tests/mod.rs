use scheduler::{validate, PolicyKind, ProcessSet};

use std::env;
use std::fs;

use processor::{format_reports, format_summary, Processor, Report};

mod scenarios;

fn write_output(folder: &str, name: &str, output: &str) {
    let (quantum, unit_width) = arguments();
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{folder}/{name}___{quantum}_{unit_width}.log"),
        output,
    )
    .unwrap();
}

fn read_output(folder: &str, name: &str) -> String {
    let (quantum, unit_width) = arguments();
    fs::read_to_string(format!(
        "../outputs/{folder}/{name}___{quantum}_{unit_width}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, reports: &[Report]) {
    let output = format_reports(reports) + &format_summary(reports);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_output(folder, name, &output);
    } else {
        let reference = read_output(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn arguments() -> (i64, usize) {
    let quantum = env::var("QUANTUM")
        .unwrap_or("2".to_string())
        .parse::<i64>()
        .unwrap();
    let unit_width = env::var("UNIT_WIDTH")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .unwrap();
    (quantum, unit_width)
}

/// Runs every policy over `raw` with the quantum and unit width from the environment.
fn simulate(raw: &[(&str, i64, i64, i64)]) -> Vec<Report> {
    let (quantum, unit_width) = arguments();
    let processes: ProcessSet = validate(raw.iter().copied()).unwrap();
    let policies: Vec<_> = PolicyKind::ALL
        .iter()
        .map(|kind| kind.with_quantum(quantum).unwrap())
        .collect();

    Processor::new()
        .with_unit_width(unit_width)
        .run_all(&policies, &processes)
        .unwrap()
}
