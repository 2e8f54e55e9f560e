use super::model::{Record, YearRange};

// ---------------------------------------------------------------------------
// Year-range filter
// ---------------------------------------------------------------------------

/// Select the records reported between `start_year` and `end_year`,
/// inclusive, by reference. An inverted range selects nothing.
pub fn filter(records: &[Record], start_year: i32, end_year: i32) -> Vec<&Record> {
    filter_range(records, YearRange::new(start_year, end_year))
}

/// [`filter`] taking a [`YearRange`].
pub fn filter_range(records: &[Record], range: YearRange) -> Vec<&Record> {
    if range.is_empty() {
        return Vec::new();
    }
    records.iter().filter(|r| range.contains(r.year)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn sample() -> Vec<Record> {
        (1999..=2010)
            .enumerate()
            .flat_map(|(i, year)| {
                let id = i as u64 * 2;
                [record(id, year, 1, "CA", 1.0), record(id + 1, year, 2, "NY", 1.0)]
            })
            .collect()
    }

    #[test]
    fn selection_is_sound_and_complete() {
        let records = sample();
        for (lo, hi) in [(1999, 2010), (2003, 2005), (1990, 2000), (2010, 2020)] {
            let selected = filter(&records, lo, hi);
            assert!(selected.iter().all(|r| lo <= r.year && r.year <= hi));
            let expected = records.iter().filter(|r| lo <= r.year && r.year <= hi).count();
            assert_eq!(selected.len(), expected, "range {lo}-{hi}");
        }
    }

    #[test]
    fn single_year_selects_exactly_that_year() {
        let records = sample();
        let selected = filter(&records, 2004, 2004);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|r| r.year == 2004));
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let records = sample();
        assert!(filter(&records, 2005, 2004).is_empty());
        assert!(filter_range(&records, YearRange::new(2005, 2004)).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let records = sample();
        let once: Vec<Record> = filter(&records, 2002, 2006).into_iter().cloned().collect();
        let twice = filter(&once, 2002, 2006);
        assert_eq!(twice.len(), once.len());
        assert!(twice.iter().zip(&once).all(|(a, b)| *a == b));
    }

    #[test]
    fn range_and_bounds_forms_agree() {
        let records = sample();
        let by_range = filter_range(&records, YearRange::new(2000, 2001));
        let by_bounds = filter(&records, 2000, 2001);
        assert_eq!(by_range, by_bounds);
        assert_eq!(by_range.len(), 4);
    }
}
