//! # Filter Projection
//!
//! A derived, read-only view of a collection under a text predicate and an inclusive
//! numeric range. [`project`] is a pure function; [`Projection`] caches its output and
//! recomputes whenever the store publishes a new revision or the criteria change, which
//! makes it cheap to drive from every keystroke.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use crate::store::Snapshot;
use tokio::sync::watch;

/// What a record exposes to the filter.
pub trait Filterable {
    /// The designated text field (title, name, …).
    fn search_text(&self) -> &str;

    /// The price-like field, if this kind has one.
    fn range_value(&self) -> Option<f64>;
}

/// Text substring (case-insensitive) plus an inclusive `[min, max]` range.
///
/// An empty `text` matches everything; an absent bound is unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub text: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl FilterCriteria {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Whether a single record passes.
    ///
    /// Kinds without a price-like field (`range_value() == None`) are only filtered by text.
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        self.matches_text(record.search_text()) && self.matches_range(record.range_value())
    }

    fn matches_text(&self, haystack: &str) -> bool {
        self.text.is_empty() || haystack.to_lowercase().contains(&self.text.to_lowercase())
    }

    fn matches_range(&self, value: Option<f64>) -> bool {
        let Some(value) = value else {
            return true;
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Filters `records` by `criteria`, preserving their relative order.
pub fn project<T: Filterable + Clone>(records: &[T], criteria: &FilterCriteria) -> Vec<T> {
    records
        .iter()
        .filter(|record| criteria.matches(*record))
        .cloned()
        .collect()
}

/// A cached projection bound to a store subscription.
pub struct Projection<T: StoreEntity + Filterable> {
    source: watch::Receiver<Snapshot<T>>,
    criteria: FilterCriteria,
    view: Vec<T>,
    seen_revision: Option<u64>,
}

impl<T: StoreEntity + Filterable> Projection<T> {
    pub fn new(source: watch::Receiver<Snapshot<T>>) -> Self {
        let mut projection = Self {
            source,
            criteria: FilterCriteria::default(),
            view: Vec::new(),
            seen_revision: None,
        };
        projection.refresh();
        projection
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replaces the criteria and recomputes.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> &[T] {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.seen_revision = None;
        }
        self.refresh();
        &self.view
    }

    /// The current view, recomputed first if the store moved on.
    pub fn view(&mut self) -> &[T] {
        self.refresh();
        &self.view
    }

    /// Waits for the next store publication, then returns the refreshed view.
    pub async fn changed(&mut self) -> Result<&[T], StoreError> {
        self.source
            .changed()
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        Ok(self.view())
    }

    fn refresh(&mut self) {
        let snapshot = self.source.borrow_and_update();
        if self.seen_revision == Some(snapshot.revision) {
            return;
        }
        self.view = project(&snapshot.records, &self.criteria);
        self.seen_revision = Some(snapshot.revision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        title: String,
        price: Option<f64>,
    }

    impl Filterable for Item {
        fn search_text(&self) -> &str {
            &self.title
        }

        fn range_value(&self) -> Option<f64> {
            self.price
        }
    }

    fn item(id: u32, title: &str, price: f64) -> Item {
        Item {
            id,
            title: title.to_string(),
            price: Some(price),
        }
    }

    #[test]
    fn text_and_range_scenario() {
        let records = vec![item(1, "Red Shoe", 30.0), item(2, "Blue Hat", 80.0)];
        let criteria = FilterCriteria::text("sh").with_min(0.0).with_max(50.0);

        let view = project(&records, &criteria);
        assert_eq!(view, vec![item(1, "Red Shoe", 30.0)]);
    }

    #[test]
    fn text_match_ignores_case() {
        let records = vec![item(1, "Red Shoe", 30.0)];
        assert_eq!(project(&records, &FilterCriteria::text("SHOE")).len(), 1);
        assert_eq!(project(&records, &FilterCriteria::text("boot")).len(), 0);
    }

    #[test]
    fn bounds_are_inclusive_and_optional() {
        let records = vec![item(1, "a", 10.0), item(2, "b", 20.0), item(3, "c", 30.0)];

        let only_min = project(&records, &FilterCriteria::default().with_min(20.0));
        assert_eq!(only_min.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 3]);

        let only_max = project(&records, &FilterCriteria::default().with_max(20.0));
        assert_eq!(only_max.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);

        assert_eq!(project(&records, &FilterCriteria::default()).len(), 3);
    }

    #[test]
    fn projection_is_idempotent_and_order_stable() {
        let records = vec![
            item(4, "shirt", 12.0),
            item(1, "hat", 5.0),
            item(9, "shorts", 15.0),
            item(2, "Shoes", 40.0),
        ];
        let criteria = FilterCriteria::text("sh");

        let first = project(&records, &criteria);
        let second = project(&records, &criteria);
        assert_eq!(first, second);
        assert_eq!(first.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 9, 2]);
    }

    #[test]
    fn records_without_range_value_pass_range_checks() {
        let records = vec![Item {
            id: 1,
            title: "Alice".into(),
            price: None,
        }];
        let criteria = FilterCriteria::text("ali").with_min(10.0).with_max(20.0);
        assert_eq!(project(&records, &criteria).len(), 1);
    }
}
