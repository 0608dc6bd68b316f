//! Per-record filer classification by prefix-group value density.
//!
//! Each record is assigned to the filer category whose column-prefix
//! group carries the most non-missing values. The assignment happens
//! once, at conversion time, and is a pure function of the record.

use crate::models::FilerType;

/// Header column indices for each prefix group, computed once per file.
///
/// Column membership is header-driven: the variable set differs across
/// reporting eras, but prefix-group membership never does.
#[derive(Debug, Clone, Default)]
pub struct PrefixColumns {
    groups: [Vec<usize>; 3],
}

impl PrefixColumns {
    /// Scan an uppercased header and bucket column indices by prefix.
    pub fn from_header(header: &[String]) -> Self {
        let mut groups: [Vec<usize>; 3] = Default::default();
        for (idx, column) in header.iter().enumerate() {
            for filer in FilerType::ALL {
                if column.starts_with(filer.prefix()) {
                    groups[filer.index()].push(idx);
                    break;
                }
            }
        }
        Self { groups }
    }

    /// Column indices belonging to one category, in header order.
    pub fn indices(&self, filer: FilerType) -> &[usize] {
        &self.groups[filer.index()]
    }

    /// Non-missing value count per group for one header-aligned record.
    pub fn counts(&self, fields: &[Option<String>]) -> [usize; 3] {
        let mut counts = [0usize; 3];
        for filer in FilerType::ALL {
            counts[filer.index()] = self.groups[filer.index()]
                .iter()
                .filter(|&&idx| fields.get(idx).is_some_and(Option::is_some))
                .count();
        }
        counts
    }
}

/// Classify one record, or `None` when every prefix group is empty.
///
/// The group with the strictly highest non-missing count wins. Ties at
/// a positive maximum resolve to the earlier category in
/// [`FilerType::ALL`]: Y-9C over Y-9LP over Y-9SP. This is a fixed
/// rule, not an artifact of container ordering.
pub fn classify_record(fields: &[Option<String>], columns: &PrefixColumns) -> Option<FilerType> {
    let counts = columns.counts(fields);
    let max = counts.into_iter().max().unwrap_or(0);
    if max == 0 {
        return None;
    }
    FilerType::ALL
        .into_iter()
        .find(|filer| counts[filer.index()] == max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    fn row(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_prefix_columns_from_header() {
        let cols = PrefixColumns::from_header(&header(&[
            "RSSD9001", "BHCK1234", "BHCP5678", "BHSP9999", "BHCK0001", "TEXT4087",
        ]));
        assert_eq!(cols.indices(FilerType::Y9c), &[1, 4]);
        assert_eq!(cols.indices(FilerType::Y9lp), &[2]);
        assert_eq!(cols.indices(FilerType::Y9sp), &[3]);
    }

    #[test]
    fn test_single_populated_group_always_wins() {
        let cols =
            PrefixColumns::from_header(&header(&["RSSD9001", "BHCK1234", "BHCP5678", "BHSP9999"]));

        let y9c = row(&[Some("12345"), Some("100"), None, None]);
        assert_eq!(classify_record(&y9c, &cols), Some(FilerType::Y9c));

        let y9lp = row(&[Some("12345"), None, Some("7"), None]);
        assert_eq!(classify_record(&y9lp, &cols), Some(FilerType::Y9lp));

        let y9sp = row(&[Some("12345"), None, None, Some("-3")]);
        assert_eq!(classify_record(&y9sp, &cols), Some(FilerType::Y9sp));
    }

    #[test]
    fn test_highest_density_wins() {
        let cols = PrefixColumns::from_header(&header(&[
            "RSSD9001", "BHCK0001", "BHCK0002", "BHSP0001", "BHSP0002", "BHSP0003",
        ]));
        let record = row(&[
            Some("1"),
            Some("10"),
            None,
            Some("1"),
            Some("2"),
            Some("3"),
        ]);
        assert_eq!(classify_record(&record, &cols), Some(FilerType::Y9sp));
    }

    #[test]
    fn test_tie_prefers_y9c_over_y9lp() {
        let cols =
            PrefixColumns::from_header(&header(&["RSSD9001", "BHCK1234", "BHCP5678"]));
        let record = row(&[Some("1"), Some("100"), Some("200")]);
        assert_eq!(classify_record(&record, &cols), Some(FilerType::Y9c));
    }

    #[test]
    fn test_tie_prefers_y9lp_over_y9sp() {
        let cols =
            PrefixColumns::from_header(&header(&["RSSD9001", "BHCP5678", "BHSP9999"]));
        let record = row(&[Some("1"), Some("100"), Some("200")]);
        assert_eq!(classify_record(&record, &cols), Some(FilerType::Y9lp));
    }

    #[test]
    fn test_three_way_tie_prefers_y9c() {
        let cols = PrefixColumns::from_header(&header(&[
            "RSSD9001", "BHCK1234", "BHCP5678", "BHSP9999",
        ]));
        let record = row(&[Some("1"), Some("a"), Some("b"), Some("c")]);
        assert_eq!(classify_record(&record, &cols), Some(FilerType::Y9c));
    }

    #[test]
    fn test_all_empty_is_unclassifiable() {
        let cols = PrefixColumns::from_header(&header(&[
            "RSSD9001", "BHCK1234", "BHCP5678", "BHSP9999",
        ]));
        let record = row(&[Some("12345"), None, None, None]);
        assert_eq!(classify_record(&record, &cols), None);
    }

    #[test]
    fn test_values_outside_prefix_groups_do_not_count() {
        let cols = PrefixColumns::from_header(&header(&["RSSD9001", "TEXT4087", "BHCK1234"]));
        let record = row(&[Some("12345"), Some("note"), None]);
        assert_eq!(classify_record(&record, &cols), None);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let cols = PrefixColumns::from_header(&header(&[
            "RSSD9001", "BHCK1234", "BHCP5678", "BHSP9999",
        ]));
        let record = row(&[Some("1"), Some("x"), Some("y"), None]);
        let first = classify_record(&record, &cols);
        let second = classify_record(&record, &cols);
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_record_counts_missing_tail() {
        let cols = PrefixColumns::from_header(&header(&["RSSD9001", "BHCK1234", "BHCP5678"]));
        // Flexible parsing can yield rows shorter than the header.
        let record = row(&[Some("1"), Some("9")]);
        assert_eq!(classify_record(&record, &cols), Some(FilerType::Y9c));
    }
}
