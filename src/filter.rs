//! Filter engine: distinct picker values and the two-axis feature filter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::{FeatureKey, Region};

/// Picker value meaning "every value on this axis". Never a literal category.
pub const ALL: &str = "ALL";

/// Display text of the [`ALL`] picker option.
pub const ALL_LABEL: &str = "PILIH SEMUA";

/// Sorted, de-duplicated category values present in the dataset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistinctValues {
    pub areas: Vec<String>,
    pub commodities: Vec<String>,
}

/// Selected values on the two filter axes. An empty axis places no restriction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub areas: Vec<String>,
    pub commodities: Vec<String>,
}

/// One checkbox in a category picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

/// Picker contents for both axes, each led by the [`ALL`] option.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub areas: Vec<PickerOption>,
    pub commodities: Vec<PickerOption>,
}

/// Collect the non-empty area names and commodity labels, sorted ascending.
pub fn distinct_values(regions: &[Region]) -> DistinctValues {
    let mut areas = BTreeSet::new();
    let mut commodities = BTreeSet::new();

    for region in regions {
        if let Some(area) = &region.area { areas.insert(area.clone()); }
        if let Some(commodity) = &region.commodity { commodities.insert(commodity.clone()); }
    }

    DistinctValues {
        areas: areas.into_iter().collect(),
        commodities: commodities.into_iter().collect(),
    }
}

impl FilterSelection {
    pub fn new<A, C>(areas: A, commodities: C) -> Self
    where
        A: IntoIterator, A::Item: Into<String>,
        C: IntoIterator, C::Item: Into<String>,
    {
        Self {
            areas: areas.into_iter().map(Into::into).collect(),
            commodities: commodities.into_iter().map(Into::into).collect(),
        }
    }

    /// Normalize the selection: an axis containing [`ALL`] becomes unrestricted,
    /// duplicates are dropped.
    pub fn normalized(&self) -> Self {
        let normalize = |values: &[String]| -> Vec<String> {
            if values.iter().any(|v| v == ALL) { return Vec::new() }
            let mut seen = BTreeSet::new();
            values.iter().filter(|v| seen.insert(v.as_str())).cloned().collect()
        };
        Self { areas: normalize(&self.areas), commodities: normalize(&self.commodities) }
    }

    /// True when either axis restricts the result (after normalization).
    pub fn is_active(&self) -> bool {
        let n = self.normalized();
        !n.areas.is_empty() || !n.commodities.is_empty()
    }

    /// Whether a region passes both axes. Assumes a normalized selection.
    fn matches(&self, region: &Region) -> bool {
        let passes = |selected: &[String], value: &Option<String>| {
            selected.is_empty() || value.as_ref().is_some_and(|v| selected.contains(v))
        };
        passes(&self.areas, &region.area) && passes(&self.commodities, &region.commodity)
    }
}

/// Keys of the regions passing the selection, in dataset order.
/// AND across axes, membership within an axis.
pub fn apply_filter(regions: &[Region], selection: &FilterSelection) -> Vec<FeatureKey> {
    let selection = selection.normalized();
    regions.iter().enumerate()
        .filter(|(_, region)| selection.matches(region))
        .map(|(key, _)| key)
        .collect()
}

impl FilterOptions {
    pub fn from_distinct(values: &DistinctValues) -> Self {
        let options = |values: &[String]| {
            std::iter::once(PickerOption { value: ALL.into(), label: ALL_LABEL.into() })
                .chain(values.iter().map(|v| PickerOption { value: v.clone(), label: v.clone() }))
                .collect()
        };
        Self { areas: options(&values.areas), commodities: options(&values.commodities) }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{apply_filter, distinct_values, FilterOptions, FilterSelection, ALL};
    use crate::{config::FieldNames, data::Region};

    fn regions() -> Vec<Region> {
        [("Alpha", Some("PADI"), 0), ("Beta", Some("KARET"), 2), ("Beta", Some("KARET"), 0), ("Alpha", None, 1)]
            .into_iter()
            .map(|(area, commodity, poi)| {
                let mut props = json!({ "Kabupaten": area, "jumlah_poi": poi });
                if let Some(c) = commodity { props["Prediksi"] = json!(c); }
                Region::from_properties(props.as_object().unwrap().clone(), None, &FieldNames::default())
            })
            .collect()
    }

    #[test]
    fn distinct_values_are_sorted_and_non_empty() {
        let values = distinct_values(&regions());
        assert_eq!(values.areas, ["Alpha", "Beta"]);
        assert_eq!(values.commodities, ["KARET", "PADI"]);
    }

    #[test]
    fn empty_selection_keeps_everything_in_order() {
        assert_eq!(apply_filter(&regions(), &FilterSelection::default()), [0, 1, 2, 3]);
    }

    #[test]
    fn axes_combine_with_and() {
        let regions = regions();
        assert_eq!(apply_filter(&regions, &FilterSelection::new(["Alpha"], Vec::<String>::new())), [0, 3]);
        assert_eq!(apply_filter(&regions, &FilterSelection::new(["Alpha", "Beta"], ["KARET"])), [1, 2]);
        assert_eq!(apply_filter(&regions, &FilterSelection::new(["Alpha"], ["KARET"])), Vec::<usize>::new());
    }

    #[test]
    fn missing_commodity_fails_commodity_filter() {
        let keys = apply_filter(&regions(), &FilterSelection::new(Vec::<String>::new(), ["PADI", "KARET"]));
        assert_eq!(keys, [0, 1, 2]);
    }

    #[test]
    fn all_sentinel_equals_no_selection() {
        let regions = regions();
        let with_all = FilterSelection::new([ALL, "Alpha"], [ALL]);
        assert_eq!(apply_filter(&regions, &with_all), apply_filter(&regions, &FilterSelection::default()));
        assert!(!with_all.is_active());
        assert!(FilterSelection::new(["Alpha"], Vec::<String>::new()).is_active());
    }

    #[test]
    fn options_lead_with_all() {
        let options = FilterOptions::from_distinct(&distinct_values(&regions()));
        let values: Vec<_> = options.areas.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, [ALL, "Alpha", "Beta"]);
        assert_eq!(options.commodities.len(), 3);
    }
}
