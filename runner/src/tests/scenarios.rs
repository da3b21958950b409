use core::module_path;
use function_name::named;

use super::{run, simulate};

#[test]
#[named]
pub fn arrival_order() {
    let reports = simulate(&[("P1", 0, 5, 3), ("P2", 1, 3, 1), ("P3", 2, 8, 2)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &reports,
    );
}

#[test]
#[named]
pub fn shortest_job() {
    let reports = simulate(&[
        ("P1", 0, 7, 2),
        ("P2", 2, 4, 1),
        ("P3", 4, 1, 4),
        ("P4", 5, 4, 3),
    ]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &reports,
    );
}

#[test]
#[named]
pub fn preemption() {
    let reports = simulate(&[("P1", 0, 8, 2), ("P2", 1, 4, 1)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &reports,
    );
}

#[test]
#[named]
pub fn idle_gaps() {
    let reports = simulate(&[("P1", 2, 3, 1), ("P2", 9, 2, 1), ("P3", 10, 1, 0)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &reports,
    );
}

#[test]
#[named]
pub fn round_robin_arrivals() {
    let reports = simulate(&[("P1", 0, 5, 2), ("P2", 1, 3, 3), ("P3", 2, 1, 1)]);

    run(
        module_path!().split("::").last().unwrap(),
        function_name!(),
        &reports,
    );
}
