//! End-to-end specifications for the offline data pipeline: seed the entity
//! catalog, generate synthetic observations, then read them back through the
//! public query and aggregation surface.

use std::sync::Arc;

use techsalary::market::{
    GeneratorConfig, InMemoryMarketRepository, MarketError, MarketRepository, MarketService,
    PageRequest, RecordFilter, SeedCatalog, TierTable,
};

fn build_service() -> (
    MarketService<InMemoryMarketRepository>,
    Arc<InMemoryMarketRepository>,
) {
    let repository = Arc::new(InMemoryMarketRepository::new());
    let service = MarketService::new(
        repository.clone(),
        TierTable::indian_tech_2024(),
        GeneratorConfig {
            batch_size: 20,
            ..GeneratorConfig::default()
        },
    );
    (service, repository)
}

#[test]
fn seeded_generation_feeds_search_and_aggregation() {
    let (service, repository) = build_service();
    let catalog = SeedCatalog::indian_tech();

    let seeded = service.seed(&catalog).expect("catalog seeds");
    assert_eq!(seeded.companies, catalog.companies.len());

    let summary = service.generate(80).expect("generation succeeds");
    assert_eq!(summary.inserted, 80);
    assert_eq!(summary.batches, 4);

    // Every generated record must satisfy the pay identity and the
    // experience ordering, whatever the sampled employer.
    for record in repository.records().expect("records readable") {
        assert_eq!(
            record.total_compensation,
            record.base_salary + record.bonus + record.stock_options
        );
        if let Some(tenure) = record.years_at_company {
            assert!(tenure <= record.years_of_experience);
        }
    }

    let everything = service
        .search(&RecordFilter::default(), PageRequest::new(100, 0).expect("valid page"))
        .expect("search succeeds");
    assert_eq!(everything.total, 80);
    assert_eq!(everything.results.len(), 80);

    let stats = service
        .aggregate(&RecordFilter::default())
        .expect("aggregation succeeds");
    assert_eq!(stats.count, 80);
    assert!(stats.min <= stats.median && stats.median <= stats.max);
    assert!(stats.mean >= stats.min as f64 && stats.mean <= stats.max as f64);
}

#[test]
fn filtered_search_and_stats_agree_on_the_same_population() {
    let (service, _) = build_service();
    service.seed(&SeedCatalog::indian_tech()).expect("catalog seeds");
    service.generate(60).expect("generation succeeds");

    let filter = RecordFilter {
        company: Some("india".to_string()),
        ..RecordFilter::default()
    };

    let search = service
        .search(&filter, PageRequest::new(100, 0).expect("valid page"))
        .expect("search succeeds");

    match service.aggregate(&filter) {
        Ok(stats) => assert_eq!(stats.count, search.total),
        Err(MarketError::NoDataAvailable) => assert_eq!(search.total, 0),
        Err(other) => panic!("unexpected aggregation error: {other:?}"),
    }
}

#[test]
fn pagination_is_stable_across_repeated_reads() {
    let (service, _) = build_service();
    service.seed(&SeedCatalog::indian_tech()).expect("catalog seeds");
    service.generate(30).expect("generation succeeds");

    let filter = RecordFilter::default();
    let page = PageRequest::new(10, 10).expect("valid page");

    let first_read = service.search(&filter, page).expect("first read");
    let second_read = service.search(&filter, page).expect("second read");

    let first_ids: Vec<_> = first_read.results.iter().map(|view| view.id).collect();
    let second_ids: Vec<_> = second_read.results.iter().map(|view| view.id).collect();
    assert_eq!(first_ids, second_ids);
}

#[test]
fn reset_clears_records_for_a_reseed() {
    let (service, repository) = build_service();
    service.seed(&SeedCatalog::indian_tech()).expect("catalog seeds");
    service.generate(10).expect("generation succeeds");

    let removed = service.reset_records().expect("reset succeeds");
    assert_eq!(removed, 10);

    match service.aggregate(&RecordFilter::default()) {
        Err(MarketError::NoDataAvailable) => {}
        other => panic!("expected no data after reset, got {other:?}"),
    }

    // Entities survive a record reset; a fresh generation can reuse them.
    assert!(!repository.companies().expect("companies readable").is_empty());
    service.generate(5).expect("regeneration succeeds");
}
