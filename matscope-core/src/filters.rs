//! Filter selection narrowing which records feed a report

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::{Material, Project};
use crate::Error;

/// Name-set dimensions of a filter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDimension {
    Projects,
    Clients,
    MaterialTypes,
    Manufacturers,
}

impl std::fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterDimension::Projects => write!(f, "projects"),
            FilterDimension::Clients => write!(f, "clients"),
            FilterDimension::MaterialTypes => write!(f, "material types"),
            FilterDimension::Manufacturers => write!(f, "manufacturers"),
        }
    }
}

/// Inclusive date range; an open bound matches everything on that side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Parse a `YYYY-MM-DD` date as used by filter inputs
pub fn parse_date(value: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidFilter(format!("invalid date '{}': {}", value, e)))
}

/// User-chosen constraints. `None` on a dimension means "match all".
///
/// A dimension never holds an empty set: deselecting the last value
/// collapses it back to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clients: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_types: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturers: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

fn matches(selection: &Option<BTreeSet<String>>, value: &str) -> bool {
    selection.as_ref().map_or(true, |set| set.contains(value))
}

impl FilterSelection {
    /// A selection with no constraints
    pub fn all() -> Self {
        Self::default()
    }

    /// Builder-style helper selecting a list of values on one dimension
    pub fn with<I, S>(mut self, dimension: FilterDimension, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        *self.slot_mut(dimension) = if set.is_empty() { None } else { Some(set) };
        self
    }

    pub fn selected(&self, dimension: FilterDimension) -> Option<&BTreeSet<String>> {
        match dimension {
            FilterDimension::Projects => self.projects.as_ref(),
            FilterDimension::Clients => self.clients.as_ref(),
            FilterDimension::MaterialTypes => self.material_types.as_ref(),
            FilterDimension::Manufacturers => self.manufacturers.as_ref(),
        }
    }

    fn slot_mut(&mut self, dimension: FilterDimension) -> &mut Option<BTreeSet<String>> {
        match dimension {
            FilterDimension::Projects => &mut self.projects,
            FilterDimension::Clients => &mut self.clients,
            FilterDimension::MaterialTypes => &mut self.material_types,
            FilterDimension::Manufacturers => &mut self.manufacturers,
        }
    }

    /// Select or deselect a single value
    pub fn toggle(&mut self, dimension: FilterDimension, value: &str) {
        let slot = self.slot_mut(dimension);
        let set = slot.get_or_insert_with(BTreeSet::new);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
        if set.is_empty() {
            *slot = None;
        }
    }

    /// "Select all": selects every available value, or clears the dimension
    /// when every available value is already selected
    pub fn toggle_all(&mut self, dimension: FilterDimension, available: &[String]) {
        let slot = self.slot_mut(dimension);
        let all_selected = slot
            .as_ref()
            .is_some_and(|set| available.iter().all(|v| set.contains(v)));
        *slot = if all_selected || available.is_empty() {
            None
        } else {
            Some(available.iter().cloned().collect())
        };
    }

    pub fn set_date_start(&mut self, start: Option<NaiveDate>) {
        let range = self.date_range.get_or_insert_with(DateRange::default);
        range.start = start;
        if range.is_open() {
            self.date_range = None;
        }
    }

    pub fn set_date_end(&mut self, end: Option<NaiveDate>) {
        let range = self.date_range.get_or_insert_with(DateRange::default);
        range.end = end;
        if range.is_open() {
            self.date_range = None;
        }
    }

    /// True when no dimension constrains anything
    pub fn is_unfiltered(&self) -> bool {
        self.projects.is_none()
            && self.clients.is_none()
            && !self.filters_materials()
            && self.date_range.is_none()
    }

    /// True when material-level dimensions are active
    pub fn filters_materials(&self) -> bool {
        self.material_types.is_some() || self.manufacturers.is_some()
    }

    /// Project-level match: name, client and start date
    pub fn matches_project(&self, project: &Project) -> bool {
        matches(&self.projects, &project.name)
            && matches(&self.clients, &project.client)
            && self
                .date_range
                .map_or(true, |range| range.contains(project.started_on))
    }

    /// Material-level match: type and manufacturer
    pub fn matches_material(&self, material: &Material) -> bool {
        matches(&self.material_types, &material.category)
            && matches(&self.manufacturers, &material.manufacturer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::data::demo_dataset;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_default_matches_everything() {
        let filters = FilterSelection::all();
        let dataset = demo_dataset();
        assert!(filters.is_unfiltered());
        assert!(dataset.projects.iter().all(|p| filters.matches_project(p)));
        assert!(dataset.materials.iter().all(|m| filters.matches_material(m)));
    }

    #[test]
    fn test_toggle_adds_and_collapses() {
        let mut filters = FilterSelection::all();
        filters.toggle(FilterDimension::Clients, "Metro Living");
        assert_eq!(
            filters.selected(FilterDimension::Clients).unwrap().len(),
            1
        );

        filters.toggle(FilterDimension::Clients, "Metro Living");
        assert!(filters.clients.is_none());
    }

    #[test]
    fn test_toggle_all_selects_then_clears() {
        let available = names(&["Wood", "Stone", "Paint"]);
        let mut filters = FilterSelection::all();

        filters.toggle_all(FilterDimension::MaterialTypes, &available);
        assert_eq!(filters.material_types.as_ref().unwrap().len(), 3);

        filters.toggle_all(FilterDimension::MaterialTypes, &available);
        assert!(filters.material_types.is_none());
    }

    #[test]
    fn test_toggle_all_completes_partial_selection() {
        let available = names(&["WoodCo", "ColorMax"]);
        let mut filters = FilterSelection::all();
        filters.toggle(FilterDimension::Manufacturers, "WoodCo");

        filters.toggle_all(FilterDimension::Manufacturers, &available);
        assert_eq!(filters.manufacturers.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange {
            start: Some(parse_date("2022-01-01").unwrap()),
            end: None,
        };
        assert!(range.contains(parse_date("2024-05-05").unwrap()));
        assert!(!range.contains(parse_date("2021-12-31").unwrap()));
    }

    #[test]
    fn test_clearing_both_bounds_removes_range() {
        let mut filters = FilterSelection::all();
        filters.set_date_start(Some(parse_date("2023-01-01").unwrap()));
        assert!(filters.date_range.is_some());
        filters.set_date_start(None);
        assert!(filters.date_range.is_none());
    }

    #[test]
    fn test_project_filter_by_client_and_date() {
        let dataset = demo_dataset();
        let mut filters =
            FilterSelection::all().with(FilterDimension::Clients, ["Davidson Family"]);
        filters.set_date_end(Some(parse_date("2020-01-01").unwrap()));

        assert!(!dataset.projects.iter().any(|p| filters.matches_project(p)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(
            parse_date("19/10/2026"),
            Err(Error::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_with_empty_values_is_unset() {
        let filters = FilterSelection::all().with(FilterDimension::Projects, Vec::<String>::new());
        assert!(filters.projects.is_none());
    }
}
