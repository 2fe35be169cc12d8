use crate::dataset::Dataset;
use std::collections::BTreeSet;

/// Normalize raw keywords: trim, lowercase, drop blanks and duplicates.
pub fn normalize_keywords<S: AsRef<str>>(keywords: &[S]) -> Vec<String> {
    let set: BTreeSet<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    set.into_iter().collect()
}

impl Dataset {
    /// Find the category labels that contain any keyword (case-insensitive).
    ///
    /// Pure substring containment, no stemming or tokenization. The result
    /// is sorted ascending and free of duplicates; it is empty when no
    /// keyword survives normalization.
    pub fn match_categories<S: AsRef<str>>(&self, keywords: &[S]) -> Vec<String> {
        let keywords = normalize_keywords(keywords);
        if keywords.is_empty() {
            return Vec::new();
        }

        // categories() is already distinct and sorted
        let matched: Vec<String> = self
            .categories()
            .iter()
            .filter(|category| {
                let lower = category.to_lowercase();
                keywords.iter().any(|kw| lower.contains(kw.as_str()))
            })
            .cloned()
            .collect();

        tracing::debug!(
            keywords = keywords.len(),
            matched = matched.len(),
            "matched categories"
        );
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContractNotice;

    fn notice(id: &str, category: &str) -> ContractNotice {
        ContractNotice {
            id: id.into(),
            agency: "Agency A".into(),
            supplier: "Acme".into(),
            category: category.into(),
            value: None,
            publish_date: None,
            end_date: None,
            description: String::new(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_notices(vec![
            notice("1", "Information technology consultation services"),
            notice("2", "Computer services"),
            notice("3", "Cleaning services"),
            notice("4", "Computer services"),
            notice("5", "Security surveillance and detection"),
        ])
    }

    #[test]
    fn test_normalize_keywords() {
        let kw = normalize_keywords(&["  Cloud ", "cloud", "", "   ", "CYBER"]);
        assert_eq!(kw, vec!["cloud", "cyber"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let ds = dataset();
        assert_eq!(ds.match_categories(&["COMPUTER"]), vec!["Computer services"]);
    }

    #[test]
    fn test_any_keyword_matches() {
        let ds = dataset();
        let matched = ds.match_categories(&["technology", "security"]);
        assert_eq!(
            matched,
            vec![
                "Information technology consultation services",
                "Security surveillance and detection",
            ]
        );
    }

    #[test]
    fn test_result_sorted_without_duplicates() {
        let ds = dataset();
        let matched = ds.match_categories(&["services", "computer", "Services"]);
        assert_eq!(
            matched,
            vec![
                "Cleaning services",
                "Computer services",
                "Information technology consultation services",
            ]
        );
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        let ds = dataset();
        let none: [&str; 0] = [];
        assert!(ds.match_categories(&none).is_empty());
        assert!(ds.match_categories(&["", "   "]).is_empty());
    }

    #[test]
    fn test_unknown_keyword_matches_nothing() {
        let ds = dataset();
        assert!(ds.match_categories(&["zzz_no_such_substring"]).is_empty());
    }

    #[test]
    fn test_no_categories_in_dataset() {
        let ds = Dataset::from_notices(vec![notice("1", "")]);
        assert!(ds.match_categories(&["services"]).is_empty());
    }
}
