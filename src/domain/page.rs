use serde::{Deserialize, Serialize};

/// One page of a paginated listing. `next` is an opaque continuation URL
/// handed back verbatim on the follow-up request; `None` marks the terminal
/// page. `count` and `previous` come along from the server but the feed
/// only consumes `results` and `next`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> Page<T> {
    pub fn terminal(results: Vec<T>) -> Self {
        Self {
            results,
            next: None,
            previous: None,
            count: None,
        }
    }

    pub fn with_next(results: Vec<T>, next: impl Into<String>) -> Self {
        Self {
            results,
            next: Some(next.into()),
            previous: None,
            count: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing_envelope() {
        let json = r#"{
            "count": 12,
            "next": "https://api.example.edu/api/reports/?page=2&type=lost",
            "previous": null,
            "results": [1, 2, 3]
        }"#;

        let page: Page<i64> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results, vec![1, 2, 3]);
        assert_eq!(page.count, Some(12));
        assert!(!page.is_terminal());
    }

    #[test]
    fn test_missing_next_is_terminal() {
        let page: Page<i64> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(page.is_terminal());
    }
}
