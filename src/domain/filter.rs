use serde::{Deserialize, Serialize};

use crate::domain::report::ReportType;

/// Feed sort order, serialized the way the listing API spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ordering {
    #[serde(rename = "date_time")]
    OldestFirst,
    #[serde(rename = "-date_time")]
    NewestFirst,
}

impl Ordering {
    pub fn as_param(&self) -> &'static str {
        match self {
            Ordering::OldestFirst => "date_time",
            Ordering::NewestFirst => "-date_time",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "date_time" => Some(Ordering::OldestFirst),
            "-date_time" => Some(Ordering::NewestFirst),
            _ => None,
        }
    }
}

/// The active feed query. Immutable: edits produce a new value via
/// [`Filter::apply_patch`], and consumers compare filters structurally to
/// detect a real change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub report_type: Option<ReportType>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub ordering: Option<Ordering>,
}

/// A partial edit coming from filter widgets. Fields carry the raw widget
/// string; an empty string or the sentinel `"all"` clears the constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub report_type: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub ordering: Option<String>,
}

impl FilterPatch {
    pub fn report_type(value: impl Into<String>) -> Self {
        Self {
            report_type: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self {
            category: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn ordering(value: impl Into<String>) -> Self {
        Self {
            ordering: Some(value.into()),
            ..Default::default()
        }
    }

    /// Folds a later edit into this one; fields the later edit names win.
    pub fn merge(&mut self, later: FilterPatch) {
        if later.report_type.is_some() {
            self.report_type = later.report_type;
        }
        if later.search.is_some() {
            self.search = later.search;
        }
        if later.category.is_some() {
            self.category = later.category;
        }
        if later.ordering.is_some() {
            self.ordering = later.ordering;
        }
    }
}

fn normalize(value: &str) -> Option<&str> {
    if value.is_empty() || value == "all" {
        None
    } else {
        Some(value)
    }
}

impl Filter {
    pub fn lost() -> Self {
        Self {
            report_type: Some(ReportType::Lost),
            ordering: Some(Ordering::NewestFirst),
            ..Default::default()
        }
    }

    pub fn found() -> Self {
        Self {
            report_type: Some(ReportType::Found),
            ordering: Some(Ordering::NewestFirst),
            ..Default::default()
        }
    }

    /// Merges `patch` over `self`, dropping any constraint whose new value
    /// normalizes to "absent" (empty string, `"all"`, or an unrecognized
    /// enum spelling). Pure; `self` is untouched.
    pub fn apply_patch(&self, patch: &FilterPatch) -> Filter {
        let mut next = self.clone();
        if let Some(value) = &patch.report_type {
            next.report_type = normalize(value).and_then(ReportType::parse);
        }
        if let Some(value) = &patch.search {
            next.search = normalize(value).map(str::to_string);
        }
        if let Some(value) = &patch.category {
            next.category = normalize(value).map(str::to_string);
        }
        if let Some(value) = &patch.ordering {
            next.ordering = normalize(value).and_then(Ordering::parse);
        }
        next
    }

    /// Active constraints as listing-endpoint query parameters.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(report_type) = self.report_type {
            params.push(("type", report_type.as_str().to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(ordering) = self.ordering {
            params.push(("ordering", ordering.as_param().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_apply_patch_merges_over_current() {
        let current = Filter::lost();
        let next = current.apply_patch(&FilterPatch::search("backpack"));

        assert_eq!(next.report_type, Some(ReportType::Lost));
        assert_eq!(next.search.as_deref(), Some("backpack"));
        assert_eq!(next.ordering, Some(Ordering::NewestFirst));
        // current untouched
        assert_eq!(current.search, None);
    }

    #[rstest]
    #[case("")]
    #[case("all")]
    fn test_sentinel_values_clear_the_constraint(#[case] sentinel: &str) {
        let current = Filter {
            category: Some("electronics".to_string()),
            ..Filter::lost()
        };
        let next = current.apply_patch(&FilterPatch::category(sentinel));
        assert_eq!(next.category, None);
    }

    #[test]
    fn test_unrecognized_enum_spellings_clear_the_constraint() {
        let current = Filter::lost();
        let next = current.apply_patch(&FilterPatch::report_type("stolen"));
        assert_eq!(next.report_type, None);

        let next = current.apply_patch(&FilterPatch::ordering("name"));
        assert_eq!(next.ordering, None);
    }

    #[test]
    fn test_structural_equality_detects_rebuilt_filters() {
        let a = Filter::lost().apply_patch(&FilterPatch::search("keys"));
        let b = Filter::lost().apply_patch(&FilterPatch::search("keys"));
        assert_eq!(a, b);

        let c = b.apply_patch(&FilterPatch::search("key"));
        assert_ne!(a, c);
    }

    #[test]
    fn test_patch_merge_keeps_the_latest_edit() {
        let mut pending = FilterPatch::search("back");
        pending.merge(FilterPatch::search("backpack"));
        pending.merge(FilterPatch::category("bags"));

        assert_eq!(pending.search.as_deref(), Some("backpack"));
        assert_eq!(pending.category.as_deref(), Some("bags"));
        assert_eq!(pending.report_type, None);
    }

    #[test]
    fn test_query_params_skip_absent_fields() {
        let filter = Filter {
            report_type: Some(ReportType::Found),
            search: None,
            category: Some("documents".to_string()),
            ordering: Some(Ordering::NewestFirst),
        };

        let params = filter.query_params();
        assert_eq!(
            params,
            vec![
                ("type", "found".to_string()),
                ("category", "documents".to_string()),
                ("ordering", "-date_time".to_string()),
            ]
        );

        assert!(Filter::default().query_params().is_empty());
    }
}
