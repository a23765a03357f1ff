use esim_catalog::*;
use esim_db::*;

fn fields(name: &str, plan_id: &str) -> PlanFields {
    PlanFields::from_row(&CsvRow {
        plan_name: name.to_string(),
        price: "5".to_string(),
        days: "7".to_string(),
        country_codes: "US".to_string(),
        plan_id: plan_id.to_string(),
        ..Default::default()
    })
}

fn setup_db() -> Connection {
    let conn = open_memory().unwrap();
    insert_category(&conn, "Americas").unwrap();
    let americas = find_category_by_name(&conn, "Americas").unwrap();
    insert_plan(&conn, &fields("USA 3GB", "US-3"), americas).unwrap();
    insert_plan(&conn, &fields("Canada 1GB", "CA-1"), americas).unwrap();
    insert_plan(&conn, &fields("Global 1GB", "GL-1"), None).unwrap();
    conn
}

#[test]
fn list_plans_sorted_by_name() {
    let conn = setup_db();
    let plans = list_plans(&conn, None, None).unwrap();
    let names: Vec<&str> = plans.iter().map(|p| p.plan_name.as_str()).collect();
    assert_eq!(names, vec!["Canada 1GB", "Global 1GB", "USA 3GB"]);
}

#[test]
fn list_plans_by_category() {
    let conn = setup_db();
    let plans = list_plans(&conn, Some("Americas"), None).unwrap();
    assert_eq!(plans.len(), 2);

    let none = list_plans(&conn, Some("Europe"), None).unwrap();
    assert!(none.is_empty());
}

#[test]
fn list_plans_respects_limit() {
    let conn = setup_db();
    assert_eq!(list_plans(&conn, None, Some(1)).unwrap().len(), 1);
}

#[test]
fn stats_count_everything() {
    let conn = setup_db();
    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(
        stats,
        CatalogStats {
            plans: 3,
            active_plans: 3,
            uncategorized_plans: 1,
            categories: 1,
            imports: 0,
        }
    );
}

#[test]
fn get_missing_plan_is_none() {
    let conn = setup_db();
    assert!(get_plan(&conn, 999).unwrap().is_none());
}
