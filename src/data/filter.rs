use super::model::{BookRecord, RecordStore};

// ---------------------------------------------------------------------------
// Search predicate: case-insensitive substring per field
// ---------------------------------------------------------------------------

/// Title / category substrings to search for.
///
/// A field whose filter is `None` or empty is unconstrained. Provided filters
/// combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub category: Option<String>,
}

impl SearchFilter {
    pub fn new(title: Option<&str>, category: Option<&str>) -> Self {
        SearchFilter {
            title: title.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    /// Whether at least one field is constrained.
    pub fn is_active(&self) -> bool {
        active(&self.title).is_some() || active(&self.category).is_some()
    }

    /// Lowercased needles, computed once per search rather than per record.
    fn needles(&self) -> (Option<String>, Option<String>) {
        (
            active(&self.title).map(str::to_lowercase),
            active(&self.category).map(str::to_lowercase),
        )
    }
}

fn active(filter: &Option<String>) -> Option<&str> {
    filter.as_deref().filter(|f| !f.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Return indices of records that pass every active filter.
///
/// A record passes a field filter when:
/// * The filter is absent or empty → passes (no constraint)
/// * The field contains the filter text, ignoring case → passes
/// * The category is absent and a category filter is active → fails
pub fn filtered_indices(store: &RecordStore, filter: &SearchFilter) -> Vec<usize> {
    let (title, category) = filter.needles();
    store
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, title.as_deref(), category.as_deref()))
        .map(|(i, _)| i)
        .collect()
}

fn matches(rec: &BookRecord, title: Option<&str>, category: Option<&str>) -> bool {
    if let Some(needle) = title {
        if !contains_ci(&rec.title, needle) {
            return false;
        }
    }
    if let Some(needle) = category {
        match &rec.category {
            Some(cat) => {
                if !contains_ci(cat, needle) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, category: Option<&str>) -> BookRecord {
        BookRecord {
            title: title.to_string(),
            price: "£10.00".to_string(),
            availability: "In stock".to_string(),
            rating: "Three".to_string(),
            category: category.map(str::to_string),
            image: String::new(),
        }
    }

    #[test]
    fn empty_strings_are_inactive() {
        assert!(!SearchFilter::default().is_active());
        assert!(!SearchFilter::new(Some(""), Some("")).is_active());
        assert!(SearchFilter::new(Some("x"), None).is_active());
    }

    #[test]
    fn missing_category_never_matches_category_filter() {
        let store = RecordStore::from_records(vec![
            book("Dune", None),
            book("Dune Messiah", Some("Science Fiction")),
        ]);
        let filter = SearchFilter::new(Some("dune"), Some("fiction"));
        assert_eq!(filtered_indices(&store, &filter), vec![1]);
    }
}
