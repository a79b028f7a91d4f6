use crate::market::domain::Level;

/// One employer the seeding pass should ensure exists.
#[derive(Debug, Clone)]
pub struct CompanySeed {
    pub name: &'static str,
    pub industry: &'static str,
    pub size: &'static str,
    pub headquarters: &'static str,
}

/// One city the seeding pass should ensure exists.
#[derive(Debug, Clone)]
pub struct CitySeed {
    pub city: &'static str,
    pub state: &'static str,
}

/// One role the seeding pass should ensure exists.
#[derive(Debug, Clone)]
pub struct RoleSeed {
    pub title: &'static str,
    pub category: &'static str,
    pub level: Level,
}

/// Base entity populations handed to the seeding pass as data, so a catalog
/// version can be swapped per deployment or per test.
#[derive(Debug, Clone, Default)]
pub struct SeedCatalog {
    pub companies: Vec<CompanySeed>,
    pub cities: Vec<CitySeed>,
    pub roles: Vec<RoleSeed>,
}

impl SeedCatalog {
    /// The Indian tech-market catalog the canonical tier table covers.
    pub fn indian_tech() -> Self {
        let companies = vec![
            company("TCS", "IT Services", "10000+", "Mumbai"),
            company("Infosys", "IT Services", "10000+", "Bangalore"),
            company("Wipro", "IT Services", "10000+", "Bangalore"),
            company("HCL Technologies", "IT Services", "10000+", "Noida"),
            company("Tech Mahindra", "IT Services", "10000+", "Pune"),
            company("Capgemini", "IT Services", "10000+", "Mumbai"),
            company("Cognizant", "IT Services", "10000+", "Chennai"),
            company("Accenture India", "IT Services", "10000+", "Bangalore"),
            company("LTI Mindtree", "IT Services", "5000+", "Mumbai"),
            company("Flipkart", "E-commerce", "5000+", "Bangalore"),
            company("Swiggy", "Food Delivery", "5000+", "Bangalore"),
            company("Zomato", "Food Delivery", "5000+", "Gurgaon"),
            company("PhonePe", "Fintech", "5000+", "Bangalore"),
            company("Razorpay", "Fintech", "1000+", "Bangalore"),
            company("CRED", "Fintech", "1000+", "Bangalore"),
            company("Paytm", "Fintech", "5000+", "Noida"),
            company("Ola", "Mobility", "5000+", "Bangalore"),
            company("Google India", "Technology", "5000+", "Bangalore"),
            company("Amazon India", "Technology", "10000+", "Hyderabad"),
            company("Microsoft India", "Technology", "5000+", "Hyderabad"),
            company("Meta India", "Technology", "1000+", "Gurgaon"),
            company("Apple India", "Technology", "1000+", "Bangalore"),
            company("Adobe India", "Technology", "5000+", "Noida"),
            company("Salesforce India", "Technology", "5000+", "Hyderabad"),
        ];

        let cities = vec![
            city("Bangalore", "Karnataka"),
            city("Hyderabad", "Telangana"),
            city("Pune", "Maharashtra"),
            city("Mumbai", "Maharashtra"),
            city("Delhi", "Delhi"),
            city("Gurgaon", "Haryana"),
            city("Noida", "Uttar Pradesh"),
            city("Chennai", "Tamil Nadu"),
            city("Kolkata", "West Bengal"),
            city("Ahmedabad", "Gujarat"),
        ];

        let roles = vec![
            role("Graduate Engineer Trainee", Level::Entry),
            role("Junior Software Engineer", Level::Entry),
            role("Software Engineer", Level::Mid),
            role("DevOps Engineer", Level::Mid),
            role("QA Engineer", Level::Mid),
            role("Data Engineer", Level::Mid),
            role("Frontend Developer", Level::Mid),
            role("Backend Developer", Level::Mid),
            role("Full Stack Developer", Level::Mid),
            role("Senior Software Engineer", Level::Senior),
            role("Lead Engineer", Level::Senior),
        ];

        Self {
            companies,
            cities,
            roles,
        }
    }
}

fn company(
    name: &'static str,
    industry: &'static str,
    size: &'static str,
    headquarters: &'static str,
) -> CompanySeed {
    CompanySeed {
        name,
        industry,
        size,
        headquarters,
    }
}

fn city(city: &'static str, state: &'static str) -> CitySeed {
    CitySeed { city, state }
}

fn role(title: &'static str, level: Level) -> RoleSeed {
    RoleSeed {
        title,
        category: "Engineering",
        level,
    }
}
