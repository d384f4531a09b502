//! Built-in demo dataset used by the dashboard demo and the CLI default

use chrono::NaiveDate;

use super::models::{Dataset, Manufacturer, Material, MaterialUsage, Project, ProjectStatus};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn area(material: &str, locations: &[&str], area: f64) -> MaterialUsage {
    MaterialUsage {
        material: material.to_string(),
        locations: locations.iter().map(|l| l.to_string()).collect(),
        area: Some(area),
        quantity: None,
    }
}

fn units(material: &str, locations: &[&str], quantity: u32) -> MaterialUsage {
    MaterialUsage {
        material: material.to_string(),
        locations: locations.iter().map(|l| l.to_string()).collect(),
        area: None,
        quantity: Some(quantity),
    }
}

fn material(
    id: u32,
    name: &str,
    category: &str,
    manufacturer: &str,
    price: f64,
    discontinued: bool,
) -> Material {
    Material {
        id,
        name: name.to_string(),
        category: category.to_string(),
        manufacturer: manufacturer.to_string(),
        price_per_unit: Some(price),
        discontinued,
    }
}

fn manufacturer(id: u32, name: &str, reliability: &str, lead_time: &str) -> Manufacturer {
    Manufacturer {
        id,
        name: name.to_string(),
        reliability: reliability.to_string(),
        lead_time: lead_time.to_string(),
    }
}

/// The demo studio: four projects, six materials, five manufacturers
pub fn demo_dataset() -> Dataset {
    let projects = vec![
        Project {
            id: 1,
            name: "Coastal Villa Renovation".to_string(),
            client: "Davidson Family".to_string(),
            project_type: "Residential".to_string(),
            status: ProjectStatus::Active,
            started_on: date(2023, 3, 14),
            materials: vec![
                area(
                    "Oak Hardwood Flooring",
                    &["Living Room", "Master Bedroom", "Hallway"],
                    1200.0,
                ),
                area("Matte White Wall Paint", &["All Rooms"], 2500.0),
                area("Carrara Marble Countertop", &["Kitchen", "Master Bath"], 100.0),
                units("Brass Cabinet Hardware", &["Kitchen", "Bathrooms"], 48),
            ],
        },
        Project {
            id: 2,
            name: "Downtown Office Tower".to_string(),
            client: "Apex Investments".to_string(),
            project_type: "Commercial".to_string(),
            status: ProjectStatus::Completed,
            started_on: date(2021, 6, 1),
            materials: vec![
                area("Polished Concrete Floor", &["Lobby", "Common Areas"], 3000.0),
                area(
                    "Carrara Marble Countertop",
                    &["Reception", "Executive Kitchen"],
                    150.0,
                ),
                area("XStone Marble", &["Executive Bathrooms"], 80.0),
            ],
        },
        Project {
            id: 3,
            name: "Urban Apartment Complex".to_string(),
            client: "Metro Living".to_string(),
            project_type: "Residential".to_string(),
            status: ProjectStatus::Active,
            started_on: date(2024, 1, 22),
            materials: vec![
                area("Matte White Wall Paint", &["Living Areas", "Bedrooms"], 1800.0),
                units("Brass Cabinet Hardware", &["All Units"], 240),
                area("Polished Concrete Floor", &["Parking", "Storage"], 5000.0),
            ],
        },
        Project {
            id: 4,
            name: "Mountain Lodge".to_string(),
            client: "Alpine Resorts".to_string(),
            project_type: "Hospitality".to_string(),
            status: ProjectStatus::Completed,
            started_on: date(2019, 9, 10),
            materials: vec![
                area("Oak Hardwood Flooring", &["Living Room", "Bedrooms"], 800.0),
                area("XStone Marble", &["Spa"], 60.0),
            ],
        },
    ];

    let materials = vec![
        material(1, "Oak Hardwood Flooring", "Flooring", "WoodCo", 85.0, false),
        material(2, "Matte White Wall Paint", "Paint", "ColorMax", 12.5, false),
        material(3, "Carrara Marble Countertop", "Stone", "StoneWorks", 420.0, false),
        material(4, "Brass Cabinet Hardware", "Hardware", "MetalCraft", 35.0, false),
        material(5, "Polished Concrete Floor", "Flooring", "ConcreteWorks", 65.0, false),
        material(6, "XStone Marble", "Stone", "StoneWorks", 310.0, true),
    ];

    let manufacturers = vec![
        manufacturer(1, "WoodCo", "High", "2-3 weeks"),
        manufacturer(2, "ColorMax", "High", "1 week"),
        manufacturer(3, "StoneWorks", "Medium", "4-6 weeks"),
        manufacturer(4, "MetalCraft", "High", "2 weeks"),
        manufacturer(5, "ConcreteWorks", "Medium", "3 weeks"),
    ];

    Dataset {
        projects,
        materials,
        manufacturers,
    }
}
