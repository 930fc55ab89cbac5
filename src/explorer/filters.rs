use crate::models::{Listing, StoredListing};
use std::collections::BTreeSet;

/// Filter control bounds, derived from the loaded data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBounds {
    /// Distinct bus types present, sorted.
    pub bus_types: Vec<String>,
    /// Observed price range, widened to whole units for the slider.
    pub price: (i64, i64),
    /// Observed rating range.
    pub rating: (f64, f64),
}

impl FilterBounds {
    /// `None` when there are no rows: min/max over an empty table is
    /// meaningless, and the UI shows an empty state instead of controls.
    pub fn from_rows(rows: &[StoredListing]) -> Option<Self> {
        let first = &rows.first()?.listing;

        let mut bus_types = BTreeSet::new();
        let mut price = (first.price, first.price);
        let mut rating = (first.star_rating, first.star_rating);

        for row in rows {
            let l = &row.listing;
            bus_types.insert(l.bus_type.clone());
            price.0 = price.0.min(l.price);
            price.1 = price.1.max(l.price);
            rating.0 = rating.0.min(l.star_rating);
            rating.1 = rating.1.max(l.star_rating);
        }

        Some(Self {
            bus_types: bus_types.into_iter().collect(),
            price: (price.0.floor() as i64, price.1.ceil() as i64),
            rating,
        })
    }
}

/// Current filter selections.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    /// Selected bus types; empty imposes no type restriction.
    pub bus_types: BTreeSet<String>,
    /// Inclusive price range.
    pub price: (i64, i64),
    /// Minimum star rating, inclusive.
    pub min_rating: f64,
}

impl Filters {
    /// Widest selection the bounds allow, i.e. every row passes.
    pub fn from_bounds(bounds: &FilterBounds) -> Self {
        Self {
            bus_types: BTreeSet::new(),
            price: bounds.price,
            min_rating: bounds.rating.0,
        }
    }

    /// All three criteria must hold; range bounds are inclusive.
    pub fn matches(&self, listing: &Listing) -> bool {
        let type_ok = self.bus_types.is_empty() || self.bus_types.contains(&listing.bus_type);
        let price_ok =
            listing.price >= self.price.0 as f64 && listing.price <= self.price.1 as f64;
        let rating_ok = listing.star_rating >= self.min_rating;
        type_ok && price_ok && rating_ok
    }
}

/// Rows passing every filter, in their stored order.
pub fn apply<'a>(rows: &'a [StoredListing], filters: &Filters) -> Vec<&'a StoredListing> {
    rows.iter().filter(|r| filters.matches(&r.listing)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Listing;

    fn stored(id: i64, bus_type: &str, price: f64, rating: f64) -> StoredListing {
        StoredListing {
            id,
            listing: Listing {
                route_name: format!("route-{id}"),
                route_link: format!("https://example.com/{id}"),
                bus_operator_name: "Op".to_string(),
                bus_type: bus_type.to_string(),
                departure_time: "21:30".to_string(),
                duration: "08h".to_string(),
                arrival_time: "05:30".to_string(),
                star_rating: rating,
                price,
                seats_available: 10,
            },
        }
    }

    fn sample_rows() -> Vec<StoredListing> {
        vec![
            stored(1, "AC Sleeper", 100.0, 3.0),
            stored(2, "Non-AC Seater", 250.0, 4.2),
            stored(3, "AC Sleeper", 400.0, 4.8),
        ]
    }

    #[test]
    fn bounds_come_from_the_data() {
        let bounds = FilterBounds::from_rows(&sample_rows()).unwrap();
        assert_eq!(bounds.bus_types, ["AC Sleeper", "Non-AC Seater"]);
        assert_eq!(bounds.price, (100, 400));
        assert_eq!(bounds.rating, (3.0, 4.8));
    }

    #[test]
    fn fractional_prices_widen_to_whole_units() {
        let rows = vec![stored(1, "Seater", 99.5, 4.0), stored(2, "Seater", 400.2, 4.0)];
        let bounds = FilterBounds::from_rows(&rows).unwrap();
        assert_eq!(bounds.price, (99, 401));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        assert_eq!(FilterBounds::from_rows(&[]), None);
    }

    #[test]
    fn default_filters_pass_everything() {
        let rows = sample_rows();
        let bounds = FilterBounds::from_rows(&rows).unwrap();
        let filters = Filters::from_bounds(&bounds);
        assert_eq!(apply(&rows, &filters).len(), rows.len());
    }

    #[test]
    fn empty_type_selection_imposes_no_restriction() {
        let rows = sample_rows();
        let bounds = FilterBounds::from_rows(&rows).unwrap();
        let mut filters = Filters::from_bounds(&bounds);

        assert_eq!(apply(&rows, &filters).len(), 3);

        filters.bus_types.insert("Non-AC Seater".to_string());
        let filtered = apply(&rows, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let rows = sample_rows();
        let mut filters = Filters::from_bounds(&FilterBounds::from_rows(&rows).unwrap());

        // A listing priced exactly at a selected bound is included.
        filters.price = (100, 250);
        let filtered = apply(&rows, &filters);
        assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), [1, 2]);

        // A listing rated exactly at the minimum is included.
        filters.price = (100, 400);
        filters.min_rating = 4.2;
        let filtered = apply(&rows, &filters);
        assert_eq!(filtered.iter().map(|r| r.id).collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn criteria_combine_conjunctively() {
        let rows = sample_rows();
        let mut filters = Filters::from_bounds(&FilterBounds::from_rows(&rows).unwrap());

        // Price [100, 250] and rating >= 4.0 leaves only the 250 / 4.2 row.
        filters.price = (100, 250);
        filters.min_rating = 4.0;
        let filtered = apply(&rows, &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
        assert_eq!(filtered[0].listing.price, 250.0);
        assert_eq!(filtered[0].listing.star_rating, 4.2);
    }

    #[test]
    fn filtered_result_keeps_stored_order() {
        let rows = sample_rows();
        let mut filters = Filters::from_bounds(&FilterBounds::from_rows(&rows).unwrap());
        filters.bus_types.insert("AC Sleeper".to_string());
        let ids: Vec<i64> = apply(&rows, &filters).iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 3]);
    }
}
