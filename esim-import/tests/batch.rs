use std::cell::RefCell;

use esim_catalog::*;
use esim_db::*;
use esim_import::*;

const SHEET: &str = "\
Plan Name,Price,Days,GBs,Country Codes,Plan Category,PlanId,Slug,SMS,Reloadable,Operators
Test Plan,9.99,7,1,US,,,,,,
,abc,7,1,US,,,,,,
";

const CATEGORIZED: &str = "\
Plan Name,Price,Days,GBs,Country Codes,Plan Category,PlanId,Slug,SMS,Reloadable,Operators
Europe 5GB,10,30,5,\"FR,DE\",Regional,EU-5,europe-5gb,No,Yes,Orange
Europe 10GB,18,30,10,\"FR,DE\",Regional,EU-10,europe-10gb,No,Yes,Orange
World 1GB,25,7,1,US,Global,,world-1gb,,maybe,
";

/// Records every callback so tests can assert on ordering.
#[derive(Default)]
struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl ImportProgress for RecordingProgress {
    fn on_row(&self, current: usize, total: usize, row: &CsvRow, _outcome: UpsertOutcome) {
        self.events
            .borrow_mut()
            .push(format!("ok {current}/{total} {}", row.plan_name));
    }

    fn on_row_failed(&self, failure: &RowFailure) {
        self.events
            .borrow_mut()
            .push(format!("fail {}", failure.row_number));
    }

    fn on_phase(&self, message: &str) {
        self.events.borrow_mut().push(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.events.borrow_mut().push(message.to_string());
    }
}

fn never_opened() -> Result<&'static Connection, ImportError> {
    panic!("store opened without a commit")
}

fn counts(conn: &Connection) -> (i64, i64) {
    let stats = catalog_stats(conn).unwrap();
    (stats.plans, stats.categories)
}

fn run(
    conn: &Connection,
    sheet: &str,
    commit: bool,
    progress: Option<&dyn ImportProgress>,
) -> BatchOutcome {
    let rows = parse_plan_csv(sheet).unwrap();
    let report = validate_rows(&rows);
    run_batch(&rows, &report, commit, "sheet.csv", || Ok(conn), progress).unwrap()
}

#[test]
fn dry_run_reports_errors_and_warnings() {
    let rows = parse_plan_csv(SHEET).unwrap();
    let report = validate_rows(&rows);

    assert_eq!(report.rows, 2);
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.warning_count(), 0);
    let messages: Vec<String> = report.errors().map(|i| i.to_string()).collect();
    assert_eq!(
        messages,
        vec!["Row 3: Missing Plan Name", "Row 3: Invalid Price: 'abc'"]
    );
}

#[test]
fn errors_without_commit_block_and_never_open_the_store() {
    let rows = parse_plan_csv(SHEET).unwrap();
    let report = validate_rows(&rows);
    let outcome = run_batch(
        &rows,
        &report,
        false,
        "sheet.csv",
        never_opened,
        None,
    )
    .unwrap();
    assert!(matches!(outcome, BatchOutcome::Blocked { errors: 2 }));
}

#[test]
fn clean_sheet_without_commit_is_a_dry_run() {
    let rows = parse_plan_csv(CATEGORIZED).unwrap();
    let report = validate_rows(&rows);
    let outcome = run_batch(
        &rows,
        &report,
        false,
        "sheet.csv",
        never_opened,
        None,
    )
    .unwrap();
    assert!(matches!(outcome, BatchOutcome::DryRun));
}

#[test]
fn dry_run_leaves_store_unchanged() {
    let conn = open_memory().unwrap();
    run(&conn, CATEGORIZED, true, None);
    let before = counts(&conn);

    let edited = CATEGORIZED.replace("Regional", "Brand New");
    let outcome = run(&conn, &edited, false, None);
    assert!(matches!(outcome, BatchOutcome::DryRun));
    assert_eq!(counts(&conn), before);

    let outcome = run(&conn, SHEET, false, None);
    assert!(matches!(outcome, BatchOutcome::Blocked { .. }));
    assert_eq!(counts(&conn), before);
}

#[test]
fn commit_with_errors_imports_valid_rows_only() {
    let conn = open_memory().unwrap();
    let outcome = run(&conn, SHEET, true, None);

    let BatchOutcome::Completed(stats) = outcome else {
        panic!("expected a completed run");
    };
    assert_eq!(stats.plans_created, 1);
    assert_eq!(stats.skipped_invalid, 1);
    assert_eq!(stats.summary(), "Import complete: 1 successful, 1 failed");
    assert_eq!(stats.failures[0].row_number, 3);
    assert_eq!(counts(&conn).0, 1);

    let plans = list_plans(&conn, None, None).unwrap();
    assert_eq!(plans[0].plan_name, "Test Plan");
    assert_eq!(plans[0].price, "9.99");
}

#[test]
fn reimport_updates_instead_of_duplicating() {
    let conn = open_memory().unwrap();
    let BatchOutcome::Completed(first) = run(&conn, CATEGORIZED, true, None) else {
        panic!("expected a completed run");
    };
    assert_eq!(first.plans_created, 3);
    assert_eq!(first.categories_created, 2);

    let BatchOutcome::Completed(second) = run(&conn, CATEGORIZED, true, None) else {
        panic!("expected a completed run");
    };
    assert_eq!(second.plans_created, 0);
    assert_eq!(second.plans_updated, 3);
    assert_eq!(second.categories_created, 0);
    assert_eq!(counts(&conn), (3, 2));
}

#[test]
fn shared_category_is_created_once_and_linked_to_both() {
    let conn = open_memory().unwrap();
    run(&conn, CATEGORIZED, true, None);

    let regional = find_category_by_name(&conn, "Regional").unwrap();
    assert!(regional.is_some());
    let plans = list_plans(&conn, Some("Regional"), None).unwrap();
    assert_eq!(plans.len(), 2);
    assert!(plans.iter().all(|p| p.category_id == regional));
    assert_eq!(plans[0].plan_category.as_deref(), Some("Regional"));
}

#[test]
fn imported_plan_carries_synthesized_fields() {
    let conn = open_memory().unwrap();
    run(&conn, CATEGORIZED, true, None);

    let id = find_plan_by_slug(&conn, "world-1gb").unwrap().unwrap();
    let plan = get_plan(&conn, id).unwrap().unwrap();
    assert_eq!(plan.plan_id, None);
    assert_eq!(plan.reloadable, None);
    assert_eq!(
        plan.features,
        vec!["SMS: N/A", "Reloadable: maybe", "Operators: N/A"]
    );
}

#[test]
fn store_failure_on_one_row_does_not_stop_the_batch() {
    let conn = open_memory().unwrap();
    // Second row reuses the first row's slug under a different PlanId
    let sheet = "\
Plan Name,Price,Days,GBs,Country Codes,Plan Category,PlanId,Slug
A,1,1,1,US,Clash,A-1,shared
B,1,1,1,US,Fresh,B-1,other
C,1,1,1,US,Clash,C-1,other
D,1,1,1,US,,D-1,d
";
    let progress = RecordingProgress::default();
    let BatchOutcome::Completed(stats) = run(&conn, sheet, true, Some(&progress)) else {
        panic!("expected a completed run");
    };

    // Row C matches B by slug and becomes an update; nothing fails yet
    assert_eq!(stats.plans_created, 3);
    assert_eq!(stats.plans_updated, 1);
    assert!(stats.failures.is_empty());

    // Now force a unique-constraint failure: E's PlanId matches A but its slug belongs to D
    let clash = "\
Plan Name,Price,Days,GBs,Country Codes,Plan Category,PlanId,Slug
E,1,1,1,US,Rolled Back,A-1,d
F,2,2,2,US,,F-1,f
";
    let BatchOutcome::Completed(stats) = run(&conn, clash, true, Some(&progress)) else {
        panic!("expected a completed run");
    };
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.failures[0].row_number, 2);
    assert_eq!(stats.failures[0].plan_id, "A-1");
    assert_eq!(stats.plans_created, 1);
    // The failed row's category write was rolled back with it
    assert_eq!(find_category_by_name(&conn, "Rolled Back").unwrap(), None);

    let events = progress.events.borrow();
    assert_eq!(events.last().unwrap(), "Import complete: 1 successful, 1 failed");
    assert!(events.contains(&"fail 2".to_string()));
    assert!(events.contains(&"ok 2/2 F".to_string()));
}

#[test]
fn completed_runs_are_logged() {
    let conn = open_memory().unwrap();
    run(&conn, SHEET, true, None);

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "sheet.csv");
    assert_eq!(logs[0].rows_total, 2);
    assert_eq!(logs[0].plans_created, 1);
    assert_eq!(logs[0].rows_failed, 1);
}

#[test]
fn store_open_failure_is_fatal() {
    let rows = parse_plan_csv(CATEGORIZED).unwrap();
    let report = validate_rows(&rows);
    let result = run_batch(
        &rows,
        &report,
        true,
        "sheet.csv",
        || -> Result<Connection, ImportError> {
            Err(ImportError::FileNotFound {
                tried: vec!["catalog.db".into()],
            })
        },
        None,
    );
    assert!(result.is_err());
}

#[test]
fn missing_reporter_falls_back_to_log_reporter() {
    let unreported = open_memory().unwrap();
    let logged = open_memory().unwrap();

    let BatchOutcome::Completed(default) = run(&unreported, SHEET, true, None) else {
        panic!("expected a completed import");
    };
    let BatchOutcome::Completed(explicit) = run(&logged, SHEET, true, Some(&LogProgress)) else {
        panic!("expected a completed import");
    };

    assert_eq!(default.summary(), "Import complete: 1 successful, 1 failed");
    assert_eq!(default.summary(), explicit.summary());
    assert_eq!(default.failures, explicit.failures);
    assert_eq!(counts(&unreported), counts(&logged));
}
