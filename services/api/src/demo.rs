use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use techsalary::error::AppError;
use techsalary::market::{
    import_observations, GeneratorConfig, InMemoryMarketRepository, MarketError, MarketService,
    PageRequest, RecordFilter, SeedCatalog, TierTable,
};

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Number of synthetic records to generate
    #[arg(long, default_value_t = 100)]
    pub(crate) count: usize,
    /// Optional CSV of observed rows to import before generating
    #[arg(long)]
    pub(crate) observations: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of synthetic records backing the demo queries
    #[arg(long, default_value_t = 25)]
    pub(crate) records: usize,
}

fn offline_service() -> MarketService<InMemoryMarketRepository> {
    MarketService::new(
        Arc::new(InMemoryMarketRepository::new()),
        TierTable::indian_tech_2024(),
        GeneratorConfig::default(),
    )
}

fn print_population(service: &MarketService<InMemoryMarketRepository>) -> Result<(), AppError> {
    let counts = service.population()?;
    println!("Population:");
    println!("  companies: {}", counts.companies);
    println!("  roles:     {}", counts.roles);
    println!("  locations: {}", counts.locations);
    println!("  records:   {}", counts.records);
    Ok(())
}

pub(crate) fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let service = offline_service();

    let seeded = service.seed(&SeedCatalog::indian_tech())?;
    println!(
        "Seeded {} companies, {} roles, {} locations",
        seeded.companies, seeded.roles, seeded.locations
    );

    if let Some(path) = args.observations {
        let file = File::open(&path)?;
        let imported = import_observations(&service, file)?;
        println!(
            "Imported {} observed records from {} ({} new companies, {} new roles, {} new locations)",
            imported.records,
            path.display(),
            imported.companies,
            imported.roles,
            imported.locations
        );
    }

    let summary = service.generate(args.count)?;
    println!(
        "Generated {} records in {} batches",
        summary.inserted, summary.batches
    );

    print_population(&service)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = offline_service();

    service.seed(&SeedCatalog::indian_tech())?;
    service.generate(args.records)?;
    print_population(&service)?;

    let page = service.search(
        &RecordFilter::default(),
        PageRequest::new(5, 0).map_err(MarketError::InvalidQuery)?,
    )?;
    println!("\nSample of {} matching records (total {}):", page.results.len(), page.total);
    for view in &page.results {
        println!(
            "  #{} {} - {} [{}] {} - total {} {}",
            view.id,
            view.company,
            view.role,
            view.level_label,
            view.location,
            view.total_compensation,
            view.currency
        );
    }

    let stats = service.aggregate(&RecordFilter::default())?;
    println!("\nTotal compensation across {} records:", stats.count);
    println!("  min:    {}", stats.min);
    println!("  max:    {}", stats.max);
    println!("  mean:   {:.0}", stats.mean);
    println!("  median: {}", stats.median);

    if let Ok(average) = service.location_average("Bangalore") {
        println!(
            "\n{} averages {:.0} INR across {} records",
            average.location, average.average, average.count
        );
    }

    Ok(())
}
