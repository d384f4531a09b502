//! Keyword assistant answering simple questions about the dataset
//!
//! Matching is a case-insensitive substring lookup; the first rule that
//! matches produces the answer.

use crate::data::{Dataset, MaterialUsage, Project};

const HELP: &str = "I can help you find information about materials, projects, and manufacturers. Try asking:\n\
• What materials were used in [project name]?\n\
• Tell me about [material name]\n\
• Which projects use [material name]?\n\
• What's the most used material?";

fn describe_usage(usage: &MaterialUsage) -> String {
    let mut detail = usage.locations.join(", ");
    if let Some(area) = usage.area {
        detail.push_str(&format!(", {} m²", area));
    }
    if let Some(quantity) = usage.quantity {
        detail.push_str(&format!(", {} units", quantity));
    }
    format!("{} ({})", usage.material, detail)
}

/// "Project (Kitchen, Bath)" lines for every project using `material`
fn projects_list(dataset: &Dataset, material: &str) -> String {
    dataset
        .projects_using(material)
        .map(|p| {
            let locations: Vec<&str> = p
                .materials
                .iter()
                .filter(|u| u.material == material)
                .flat_map(|u| u.locations.iter().map(String::as_str))
                .collect();
            format!("{} ({})", p.name, locations.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n• ")
}

fn find_project<'a>(dataset: &'a Dataset, query: &str) -> Option<&'a Project> {
    dataset
        .projects
        .iter()
        .find(|p| query.contains(&p.name.to_lowercase()))
}

/// Answer a free-text question about projects, materials and manufacturers
pub fn answer(query: &str, dataset: &Dataset) -> String {
    let q = query.to_lowercase();

    if q.contains("list projects") {
        return dataset
            .projects
            .iter()
            .map(|p| {
                format!(
                    "{}\n• Client: {}\n• Type: {}\n• Status: {}\n• Materials: {}",
                    p.name,
                    p.client,
                    p.project_type,
                    p.status,
                    p.materials.len()
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
    }

    let project = find_project(dataset, &q);
    if let Some(project) = project {
        if q.contains("materials") || q.contains("used in") {
            let materials: Vec<String> = project.materials.iter().map(describe_usage).collect();
            return format!(
                "Materials used in {}:\n• {}",
                project.name,
                materials.join("\n• ")
            );
        }
    }

    if q.contains("most used") || q.contains("popular") {
        let mut best: Option<(&str, usize)> = None;
        for material in &dataset.materials {
            let count = dataset.projects_using(&material.name).count();
            if best.map_or(true, |(_, n)| count > n) {
                best = Some((material.name.as_str(), count));
            }
        }
        if let Some((name, count)) = best {
            return format!(
                "The most frequently used material is {} (used in {} projects).\n\nProjects using this material:\n• {}",
                name,
                count,
                projects_list(dataset, name)
            );
        }
    }

    if let Some(material) = dataset
        .materials
        .iter()
        .find(|m| q.contains(&m.name.to_lowercase()))
    {
        return format!(
            "{} is supplied by {} and has been used in {} projects.\n\nProjects using this material:\n• {}",
            material.name,
            material.manufacturer,
            dataset.projects_using(&material.name).count(),
            projects_list(dataset, &material.name)
        );
    }

    if let Some(project) = project {
        return format!(
            "{} is a {} project for {}, currently {}. It uses {} materials.\n\nAsk about the materials used in this project!",
            project.name,
            project.project_type,
            project.client,
            project.status,
            project.materials.len()
        );
    }

    if let Some(manufacturer) = dataset
        .manufacturers
        .iter()
        .find(|m| q.contains(&m.name.to_lowercase()))
    {
        let supplied: Vec<&str> = dataset
            .materials
            .iter()
            .filter(|m| m.manufacturer == manufacturer.name)
            .map(|m| m.name.as_str())
            .collect();
        return format!(
            "{} supplies {}. They have {} reliability with typical lead times of {}.",
            manufacturer.name,
            supplied.join(", "),
            manufacturer.reliability,
            manufacturer.lead_time
        );
    }

    HELP.to_string()
}
