use std::io::Cursor;

use super::common::build_service;
use crate::market::domain::{Level, ValidationError};
use crate::market::import::{import_observations, ImportError};
use crate::market::query::{PageRequest, RecordFilter};
use crate::market::repository::MarketRepository;
use crate::market::service::MarketError;

const OBSERVATIONS: &str = "\
company,role,level,city,state,base_salary,bonus,stock_options,years_of_experience,years_at_company,source
Google India,Software Engineer (L3),entry,Bangalore,Karnataka,1800000,300000,500000,0,0,market_survey
Google India,Staff Software Engineer,senior,Bangalore,Karnataka,8500000,1300000,4200000,10,4,market_survey
TCS,Assistant Consultant,senior,Bangalore,Karnataka,1600000,220000,0,9,5,market_survey
";

#[test]
fn import_creates_entities_lazily_and_derives_totals() {
    let (service, repository) = build_service();

    let summary =
        import_observations(&service, Cursor::new(OBSERVATIONS)).expect("import succeeds");

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.records, 3);
    assert_eq!(summary.companies, 2);
    assert_eq!(summary.roles, 3);
    assert_eq!(summary.locations, 1);

    let records = repository.records().expect("records readable");
    for record in &records {
        assert_eq!(
            record.total_compensation,
            record.base_salary + record.bonus + record.stock_options
        );
        assert_eq!(record.source, "market_survey");
    }
}

#[test]
fn reimport_reuses_existing_entities() {
    let (service, repository) = build_service();

    import_observations(&service, Cursor::new(OBSERVATIONS)).expect("first import");
    let second =
        import_observations(&service, Cursor::new(OBSERVATIONS)).expect("second import");

    assert_eq!(second.companies, 0);
    assert_eq!(second.roles, 0);
    assert_eq!(second.locations, 0);
    assert_eq!(second.records, 3);

    assert_eq!(repository.companies().expect("companies readable").len(), 2);
    assert_eq!(repository.records().expect("records readable").len(), 6);
}

#[test]
fn imported_rows_are_searchable_through_the_query_path() {
    let (service, _) = build_service();
    import_observations(&service, Cursor::new(OBSERVATIONS)).expect("import succeeds");

    let filter = RecordFilter {
        company: Some("google".to_string()),
        ..RecordFilter::default()
    };
    let results = service
        .search(&filter, PageRequest::default())
        .expect("search succeeds");

    assert_eq!(results.total, 2);
    assert!(results
        .results
        .iter()
        .all(|view| view.company == "Google India"));
}

#[test]
fn explicit_level_column_wins_over_title_markers() {
    let (service, repository) = build_service();

    // "Assistant Consultant" carries no senior marker; the column decides.
    import_observations(&service, Cursor::new(OBSERVATIONS)).expect("import succeeds");

    let roles = repository.roles().expect("roles readable");
    let consultant = roles
        .iter()
        .find(|role| role.title == "Assistant Consultant")
        .expect("role created");
    assert_eq!(consultant.level, Level::Senior);
}

#[test]
fn unknown_level_value_fails_validation() {
    let (service, repository) = build_service();

    let bad = "\
company,role,level,city,state,base_salary,bonus,stock_options,years_of_experience
Acme,Engineer,guru,Pune,Maharashtra,500000,0,0,2
";
    match import_observations(&service, Cursor::new(bad)) {
        Err(ImportError::Market(MarketError::Validation(ValidationError::UnknownLevel {
            value,
        }))) => assert_eq!(value, "guru"),
        other => panic!("expected unknown level error, got {other:?}"),
    }

    assert!(repository.records().expect("records readable").is_empty());
}

#[test]
fn missing_level_column_classifies_from_title() {
    let (service, repository) = build_service();

    let rows = "\
company,role,city,state,base_salary,bonus,stock_options,years_of_experience
Acme,Senior Reliability Engineer,Pune,Maharashtra,3000000,300000,0,9
";
    import_observations(&service, Cursor::new(rows)).expect("import succeeds");

    let roles = repository.roles().expect("roles readable");
    assert_eq!(roles[0].level, Level::Senior);
}
