//! Report data builder: filters + dataset -> ReportDocument

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, Local, NaiveDate};

use super::models::{
    Categories, DiscontinuedMaterial, ManufacturerShare, Manufacturers, MaterialRanking, Overview,
    Pricing, ReportDocument, ReportKind, Section, TopMaterials,
};
use crate::data::{Dataset, Material, MaterialUsage, Project};
use crate::filters::FilterSelection;
use crate::{Error, Result};

/// Maximum rows in the "most specified" ranking
pub const MOST_SPECIFIED_LIMIT: usize = 10;

/// Number of manufacturers in the share ranking
pub const TOP_MANUFACTURERS: usize = 5;

/// A usage that survived filtering, joined with its project and catalog entry
struct Counted<'a> {
    project: &'a Project,
    usage: &'a MaterialUsage,
    material: &'a Material,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 * 100.0 / whole as f64)
    }
}

/// Build a report dated today
pub fn build_report_document(
    kind: ReportKind,
    filters: &FilterSelection,
    dataset: &Dataset,
) -> Result<ReportDocument> {
    build_report_document_as_of(kind, filters, dataset, Local::now().date_naive())
}

/// Build a report with an explicit report date
pub fn build_report_document_as_of(
    kind: ReportKind,
    filters: &FilterSelection,
    dataset: &Dataset,
    generated_on: NaiveDate,
) -> Result<ReportDocument> {
    let (projects, counted) = select(filters, dataset)?;

    let overview = overview(&projects, &counted);
    let top_materials = TopMaterials {
        most_specified: most_specified(&counted),
        discontinued: discontinued(&counted),
    };
    let categories = categories(&projects, &counted);
    let manufacturers = manufacturers(&counted);
    let pricing = match kind {
        ReportKind::Internal => Some(pricing(&counted)),
        ReportKind::Client => None,
    };

    let mut sections = vec![Section::Overview];
    if !overview.included_projects.is_empty() {
        sections.push(Section::IncludedProjects);
    }
    if !top_materials.most_specified.is_empty() {
        sections.push(Section::MostUsedMaterials);
    }
    if !top_materials.discontinued.is_empty() {
        sections.push(Section::DiscontinuedMaterials);
    }
    if !categories.by_type.is_empty() {
        sections.push(Section::Categories);
    }
    if pricing.is_some() {
        sections.push(Section::Pricing);
    }

    tracing::debug!(
        "Built {} report: {} projects, {} usages, sections {:?}",
        kind,
        projects.len(),
        counted.len(),
        sections
    );

    Ok(ReportDocument {
        kind,
        filters: filters.clone(),
        generated_on,
        overview,
        top_materials,
        categories,
        manufacturers,
        pricing,
        sections,
    })
}

/// Apply the filter selection. Material-level filters drop projects left
/// without any matching usage.
fn select<'a>(
    filters: &FilterSelection,
    dataset: &'a Dataset,
) -> Result<(Vec<&'a Project>, Vec<Counted<'a>>)> {
    let mut projects = Vec::new();
    let mut counted = Vec::new();

    for project in dataset
        .projects
        .iter()
        .filter(|p| filters.matches_project(p))
    {
        let mut matched = Vec::new();
        for usage in &project.materials {
            let material = dataset.material(&usage.material).ok_or_else(|| {
                Error::DataSource(format!(
                    "project '{}' references unknown material '{}'",
                    project.name, usage.material
                ))
            })?;
            if filters.matches_material(material) {
                matched.push(Counted {
                    project,
                    usage,
                    material,
                });
            }
        }

        if matched.is_empty() && filters.filters_materials() {
            continue;
        }
        projects.push(project);
        counted.extend(matched);
    }

    Ok((projects, counted))
}

fn overview(projects: &[&Project], counted: &[Counted<'_>]) -> Overview {
    let distinct: HashSet<&str> = counted.iter().map(|c| c.material.name.as_str()).collect();
    let total_area: f64 = counted.iter().filter_map(|c| c.usage.area).sum();
    let avg = if projects.is_empty() {
        0.0
    } else {
        round1(counted.len() as f64 / projects.len() as f64)
    };

    Overview {
        total_materials: distinct.len() as u32,
        total_area: round2(total_area),
        avg_materials_per_project: avg,
        included_projects: projects.iter().map(|p| p.name.clone()).collect(),
    }
}

/// Rank by distinct project count; ties keep first-appearance order
fn most_specified(counted: &[Counted<'_>]) -> Vec<MaterialRanking> {
    let mut rankings: Vec<MaterialRanking> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<(&str, &str)> = HashSet::new();

    for c in counted {
        let i = *index.entry(c.material.name.as_str()).or_insert_with(|| {
            rankings.push(MaterialRanking {
                name: c.material.name.clone(),
                manufacturer: c.material.manufacturer.clone(),
                project_count: 0,
                total_area: 0.0,
            });
            rankings.len() - 1
        });
        let Some(entry) = rankings.get_mut(i) else {
            continue;
        };
        if seen.insert((c.material.name.as_str(), c.project.name.as_str())) {
            entry.project_count += 1;
        }
        entry.total_area = round2(entry.total_area + c.usage.area.unwrap_or(0.0));
    }

    rankings.sort_by(|a, b| b.project_count.cmp(&a.project_count));
    rankings.truncate(MOST_SPECIFIED_LIMIT);
    rankings
}

fn discontinued(counted: &[Counted<'_>]) -> Vec<DiscontinuedMaterial> {
    // name -> (projects, first year, last year), in first-appearance order
    let mut order: Vec<&str> = Vec::new();
    let mut spans: HashMap<&str, (HashSet<&str>, i32, i32)> = HashMap::new();

    for c in counted.iter().filter(|c| c.material.discontinued) {
        let year = c.project.started_on.year();
        let span = spans.entry(c.material.name.as_str()).or_insert_with(|| {
            order.push(c.material.name.as_str());
            (HashSet::new(), year, year)
        });
        span.0.insert(c.project.name.as_str());
        span.1 = span.1.min(year);
        span.2 = span.2.max(year);
    }

    order
        .into_iter()
        .filter_map(|name| {
            let (projects, first, last) = spans.get(name)?;
            let active_date_range = if first == last {
                first.to_string()
            } else {
                format!("{}-{}", first, last)
            };
            Some(DiscontinuedMaterial {
                name: name.to_string(),
                used_in_count: projects.len() as u32,
                active_date_range,
            })
        })
        .collect()
}

fn categories(projects: &[&Project], counted: &[Counted<'_>]) -> Categories {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    for c in counted {
        *by_type.entry(c.material.category.clone()).or_default() += 1;
    }

    let mut by_project_type: BTreeMap<String, usize> = BTreeMap::new();
    for project in projects {
        *by_project_type
            .entry(project.project_type.clone())
            .or_default() += 1;
    }

    Categories {
        by_type: by_type
            .into_iter()
            .map(|(label, n)| (label, percentage(n, counted.len())))
            .collect(),
        by_project_type: by_project_type
            .into_iter()
            .map(|(label, n)| (label, percentage(n, projects.len())))
            .collect(),
    }
}

fn manufacturers(counted: &[Counted<'_>]) -> Manufacturers {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for c in counted {
        let name = c.material.manufacturer.as_str();
        let n = counts.entry(name).or_insert_with(|| {
            order.push(name);
            0
        });
        *n += 1;
    }

    let mut top5: Vec<ManufacturerShare> = order
        .into_iter()
        .map(|name| ManufacturerShare {
            name: name.to_string(),
            percentage_share: percentage(counts.get(name).copied().unwrap_or(0), counted.len()),
        })
        .collect();
    top5.sort_by(|a, b| b.percentage_share.total_cmp(&a.percentage_share));
    top5.truncate(TOP_MANUFACTURERS);

    Manufacturers { top5 }
}

fn pricing(counted: &[Counted<'_>]) -> Pricing {
    let mut total_cost = 0.0;
    let mut area_cost = 0.0;
    let mut priced_area = 0.0;
    let mut most_expensive: Option<(&str, f64)> = None;

    for c in counted {
        let Some(price) = c.material.price_per_unit else {
            continue;
        };
        if let Some(amount) = c.usage.billable_amount() {
            total_cost += price * amount;
        }
        if let Some(area) = c.usage.area {
            area_cost += price * area;
            priced_area += area;
        }
        if most_expensive.map_or(true, |(_, best)| price > best) {
            most_expensive = Some((c.material.name.as_str(), price));
        }
    }

    Pricing {
        avg_price_per_unit_area: if priced_area > 0.0 {
            round2(area_cost / priced_area)
        } else {
            0.0
        },
        most_expensive_material: most_expensive.map(|(name, _)| name.to_string()),
        total_cost: round2(total_cost),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::data::{demo_dataset, ProjectStatus};
    use crate::filters::FilterDimension;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn build(kind: ReportKind, filters: &FilterSelection) -> ReportDocument {
        build_report_document_as_of(kind, filters, &demo_dataset(), today()).unwrap()
    }

    #[test]
    fn test_unfiltered_includes_every_project() {
        let doc = build(ReportKind::Internal, &FilterSelection::all());
        let expected: Vec<String> = demo_dataset()
            .projects
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(doc.overview.included_projects, expected);
        assert_eq!(doc.overview.total_materials, 6);
        // 4 + 3 + 3 + 2 usages over 4 projects
        assert_eq!(doc.overview.avg_materials_per_project, 3.0);
        assert_eq!(doc.overview.total_area, 14690.0);
    }

    #[test]
    fn test_most_specified_ranking_is_stable() {
        let doc = build(ReportKind::Client, &FilterSelection::all());
        let ranked: Vec<(&str, u32)> = doc
            .top_materials
            .most_specified
            .iter()
            .map(|m| (m.name.as_str(), m.project_count))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Oak Hardwood Flooring", 2),
                ("Matte White Wall Paint", 2),
                ("Carrara Marble Countertop", 2),
                ("Brass Cabinet Hardware", 2),
                ("Polished Concrete Floor", 2),
                ("XStone Marble", 2),
            ]
        );
        assert_eq!(doc.top_materials.most_specified[0].total_area, 2000.0);
    }

    #[test]
    fn test_discontinued_date_range() {
        let doc = build(ReportKind::Internal, &FilterSelection::all());
        assert_eq!(doc.top_materials.discontinued.len(), 1);
        let xstone = &doc.top_materials.discontinued[0];
        assert_eq!(xstone.name, "XStone Marble");
        assert_eq!(xstone.used_in_count, 2);
        assert_eq!(xstone.active_date_range, "2019-2021");
    }

    #[test]
    fn test_pricing_only_for_internal() {
        let internal = build(ReportKind::Internal, &FilterSelection::all());
        let client = build(ReportKind::Client, &FilterSelection::all());

        let pricing = internal.pricing.as_ref().unwrap();
        assert_eq!(
            pricing.most_expensive_material.as_deref(),
            Some("Carrara Marble Countertop")
        );
        assert!(pricing.total_cost > 0.0);
        assert!(internal.has_section(Section::Pricing));

        assert!(client.pricing.is_none());
        assert!(!client.has_section(Section::Pricing));
    }

    #[test]
    fn test_pricing_figures() {
        let filters = FilterSelection::all().with(FilterDimension::Projects, ["Mountain Lodge"]);
        let doc = build(ReportKind::Internal, &filters);
        let pricing = doc.pricing.unwrap();
        // 800 m² at 85 + 60 m² at 310
        assert_eq!(pricing.total_cost, 86600.0);
        assert_eq!(pricing.avg_price_per_unit_area, 100.7);
        assert_eq!(pricing.most_expensive_material.as_deref(), Some("XStone Marble"));
    }

    #[test]
    fn test_material_filter_drops_projects_without_matches() {
        let filters = FilterSelection::all().with(FilterDimension::MaterialTypes, ["Hardware"]);
        let doc = build(ReportKind::Client, &filters);
        assert_eq!(
            doc.overview.included_projects,
            vec!["Coastal Villa Renovation", "Urban Apartment Complex"]
        );
        assert_eq!(doc.overview.total_materials, 1);
        assert_eq!(doc.overview.total_area, 0.0);
        assert_eq!(doc.categories.by_type.get("Hardware"), Some(&100.0));
    }

    #[test]
    fn test_no_matching_projects_gives_empty_document() {
        let filters = FilterSelection::all().with(FilterDimension::Clients, ["Nobody Ltd"]);
        let doc = build(ReportKind::Internal, &filters);

        assert_eq!(doc.overview.total_materials, 0);
        assert_eq!(doc.overview.avg_materials_per_project, 0.0);
        assert!(doc.overview.included_projects.is_empty());
        assert!(doc.top_materials.most_specified.is_empty());
        assert!(doc.categories.by_type.is_empty());
        assert_eq!(doc.sections, vec![Section::Overview, Section::Pricing]);

        let pricing = doc.pricing.unwrap();
        assert_eq!(pricing.total_cost, 0.0);
        assert!(pricing.most_expensive_material.is_none());
    }

    #[test]
    fn test_category_breakdowns_are_independent() {
        let doc = build(ReportKind::Client, &FilterSelection::all());
        assert_eq!(doc.categories.by_project_type.get("Residential"), Some(&50.0));
        assert_eq!(doc.categories.by_project_type.get("Commercial"), Some(&25.0));
        // 4 flooring usages out of 12
        assert_eq!(doc.categories.by_type.get("Flooring"), Some(&33.3));
    }

    #[test]
    fn test_top_manufacturers() {
        let doc = build(ReportKind::Client, &FilterSelection::all());
        let top = &doc.manufacturers.top5;
        assert_eq!(top.len(), 5);
        // StoneWorks supplies both marbles: 4 of 12 usages
        assert_eq!(top[0].name, "StoneWorks");
        assert_eq!(top[0].percentage_share, 33.3);
    }

    #[test]
    fn test_build_is_idempotent() {
        let filters = FilterSelection::all().with(FilterDimension::Manufacturers, ["WoodCo"]);
        assert_eq!(
            build(ReportKind::Internal, &filters),
            build(ReportKind::Internal, &filters)
        );
    }

    #[test]
    fn test_distinct_projects_counted_by_name_not_id() {
        let mut dataset = demo_dataset();
        for project in &mut dataset.projects {
            project.id = 1;
        }

        let doc = build_report_document_as_of(
            ReportKind::Internal,
            &FilterSelection::all(),
            &dataset,
            today(),
        )
        .unwrap();
        assert_eq!(doc.top_materials.most_specified[0].name, "Oak Hardwood Flooring");
        assert_eq!(doc.top_materials.most_specified[0].project_count, 2);
        assert_eq!(doc.top_materials.discontinued[0].used_in_count, 2);
        assert_eq!(doc.top_materials.discontinued[0].active_date_range, "2019-2021");
    }

    #[test]
    fn test_unknown_material_is_data_source_error() {
        let mut dataset = demo_dataset();
        dataset.projects.push(Project {
            id: 99,
            name: "Broken".to_string(),
            client: "Nobody".to_string(),
            project_type: "Residential".to_string(),
            status: ProjectStatus::Active,
            started_on: today(),
            materials: vec![MaterialUsage {
                material: "Unobtainium".to_string(),
                locations: Vec::new(),
                area: None,
                quantity: None,
            }],
        });

        let err = build_report_document_as_of(
            ReportKind::Client,
            &FilterSelection::all(),
            &dataset,
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DataSource(_)));
    }
}
