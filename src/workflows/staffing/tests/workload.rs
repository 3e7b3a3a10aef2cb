use super::common::*;
use crate::config::EngineConfig;
use crate::workflows::staffing::domain::{AssignmentRow, EmployeeId, ProjectId};
use crate::workflows::staffing::workload::WorkloadSnapshot;

fn row(employee_id: i64, project_id: i64, status: &str, ends_on: Option<(i32, u32, u32)>) -> AssignmentRow {
    AssignmentRow {
        employee_id: EmployeeId(employee_id),
        project_id: ProjectId(project_id),
        project_status: status.to_string(),
        ends_on: ends_on
            .map(|(y, m, d)| chrono::NaiveDate::from_ymd_opt(y, m, d).expect("valid date")),
    }
}

#[test]
fn only_active_statuses_count_toward_workload() {
    let rows = vec![
        row(1, 10, "In Progress", None),
        row(1, 11, "Not Started", None),
        row(1, 12, "Completed", None),
        row(1, 13, "Cancelled", None),
    ];

    let snapshot = WorkloadSnapshot::compute(&rows, today(), &engine_config());
    assert_eq!(snapshot.active_count(EmployeeId(1)), 2);
}

#[test]
fn ended_projects_do_not_count() {
    let rows = vec![
        row(2, 10, "In Progress", Some((2026, 8, 24))),
        row(2, 11, "In Progress", Some((2026, 8, 25))),
        row(2, 12, "In Progress", Some((2027, 1, 1))),
    ];

    let snapshot = WorkloadSnapshot::compute(&rows, today(), &engine_config());
    // ended yesterday drops out; ending today and later both still count
    assert_eq!(snapshot.active_count(EmployeeId(2)), 2);
}

#[test]
fn capacity_flag_fires_at_the_cap_not_only_beyond_it() {
    let rows = vec![
        row(3, 10, "In Progress", None),
        row(3, 11, "In Progress", None),
        row(3, 12, "In Progress", None),
    ];

    let snapshot = WorkloadSnapshot::compute(&rows, today(), &engine_config());
    assert_eq!(snapshot.active_count(EmployeeId(3)), 3);
    assert!(snapshot.at_capacity(EmployeeId(3)));
    assert!(!snapshot.at_capacity(EmployeeId(4)), "unknown people have zero workload");
}

#[test]
fn cap_is_configurable() {
    let config = EngineConfig {
        max_active_assignments: 1,
        ..engine_config()
    };
    let rows = vec![row(5, 10, "In Progress", None)];

    let snapshot = WorkloadSnapshot::compute(&rows, today(), &config);
    assert!(snapshot.at_capacity(EmployeeId(5)));
}

#[test]
fn overallocated_reports_offenders_in_input_order() {
    let rows = vec![
        row(1, 10, "In Progress", None),
        row(1, 11, "In Progress", None),
        row(1, 12, "In Progress", None),
        row(2, 13, "In Progress", None),
        row(3, 14, "In Progress", None),
        row(3, 15, "In Progress", None),
        row(3, 16, "In Progress", None),
    ];

    let snapshot = WorkloadSnapshot::compute(&rows, today(), &engine_config());
    let over = snapshot.overallocated(&[EmployeeId(3), EmployeeId(2), EmployeeId(1)]);
    assert_eq!(over, vec![EmployeeId(3), EmployeeId(1)]);
}
