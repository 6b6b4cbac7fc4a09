//! Keyword-count classification.

use crate::models::{Classification, DocumentMetadata, DocumentRule};
use crate::rules::RuleStore;

use super::{ClassifyError, DocumentClassifier};

/// Type assigned to documents with no text at all.
pub const EMPTY_DOCUMENT_TYPE: &str = "Empty Document";
const EMPTY_DOCUMENT_MARKERS: &[&str] = &["empty"];

/// Type assigned when no rule matched a single keyword.
pub const OTHER_TYPE: &str = "Other";
const OTHER_MARKERS: &[&str] = &["document", "text"];

/// Lower-case, trim, and collapse whitespace runs to a single space.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentinel(doc_type: &str, markers: &[&str]) -> Classification {
    Classification::new(doc_type, markers.iter().map(|m| m.to_string()).collect())
}

/// Classify text against an ordered rule list.
///
/// Each rule scores the number of its keywords found in the normalized text.
/// The first rule with the strictly highest score wins, so on a tie the rule
/// listed earlier is chosen. Matched keywords keep their original casing and
/// rule order, capped at five.
pub fn classify_text(text: &str, rules: &[DocumentRule]) -> Classification {
    if text.is_empty() {
        return sentinel(EMPTY_DOCUMENT_TYPE, EMPTY_DOCUMENT_MARKERS);
    }

    let normalized = normalize_text(text);

    let mut best: Option<(&DocumentRule, Vec<String>)> = None;
    let mut best_count = 0;

    for rule in rules {
        let matched: Vec<String> = rule
            .keywords
            .iter()
            .filter(|keyword| {
                let needle = normalize_text(keyword);
                !needle.is_empty() && normalized.contains(&needle)
            })
            .cloned()
            .collect();

        // Strictly greater: earlier rules keep ties.
        if matched.len() > best_count {
            best_count = matched.len();
            best = Some((rule, matched));
        }
    }

    match best {
        Some((rule, matched)) => Classification::new(rule.doc_type.clone(), matched),
        None => sentinel(OTHER_TYPE, OTHER_MARKERS),
    }
}

/// Rule-based classifier over the rules held in a [`RuleStore`].
pub struct KeywordClassifier {
    store: RuleStore,
}

impl KeywordClassifier {
    pub fn new(store: RuleStore) -> Self {
        Self { store }
    }

    /// Classify raw text with the store's current rules.
    pub fn execute(&self, text: &str) -> Classification {
        classify_text(text, self.store.rules())
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RuleStore {
        &mut self.store
    }
}

impl DocumentClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "Keyword Classifier"
    }

    fn classify(&self, mut document: DocumentMetadata) -> Result<DocumentMetadata, ClassifyError> {
        let classification = self.execute(&document.text);
        tracing::debug!(
            "Classified {} as {} ({})",
            document.filename,
            classification.document_type,
            classification.matched_keywords.join(", ")
        );
        document.classification = Some(classification);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_MATCHED_KEYWORDS;

    fn invoice_receipt() -> Vec<DocumentRule> {
        vec![
            DocumentRule::new("Invoice", ["invoice", "total due"]),
            DocumentRule::new("Receipt", ["receipt", "paid"]),
        ]
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(
            normalize_text("  Total\tDUE:\n\n  $50  "),
            "total due: $50"
        );
        assert_eq!(normalize_text(" \n "), "");
    }

    #[test]
    fn test_invoice_example() {
        let result = classify_text("This is an invoice. Total due: $50.", &invoice_receipt());
        assert_eq!(result.document_type, "Invoice");
        assert_eq!(result.matched_keywords, ["invoice", "total due"]);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_keeps_keyword_casing() {
        let rules = vec![DocumentRule::new("Report", ["Quarterly Results"])];
        let result = classify_text("QUARTERLY   results for Q3", &rules);
        assert_eq!(result.document_type, "Report");
        assert_eq!(result.matched_keywords, ["Quarterly Results"]);
    }

    #[test]
    fn test_keyword_whitespace_is_normalized() {
        let rules = vec![DocumentRule::new("Invoice", ["total   due"])];
        let result = classify_text("Total due now", &rules);
        assert_eq!(result.document_type, "Invoice");
    }

    #[test]
    fn test_empty_text_is_empty_document() {
        let result = classify_text("", &invoice_receipt());
        assert_eq!(result.document_type, EMPTY_DOCUMENT_TYPE);
        assert_eq!(result.matched_keywords, ["empty"]);

        let no_rules = classify_text("", &[]);
        assert_eq!(no_rules.document_type, EMPTY_DOCUMENT_TYPE);
    }

    #[test]
    fn test_whitespace_only_text_is_other() {
        let result = classify_text("   \n\t ", &invoice_receipt());
        assert_eq!(result.document_type, OTHER_TYPE);
    }

    #[test]
    fn test_no_match_is_other() {
        let result = classify_text("Minutes of the weekly meeting", &invoice_receipt());
        assert_eq!(result.document_type, OTHER_TYPE);
        assert_eq!(result.matched_keywords, ["document", "text"]);

        let no_rules = classify_text("anything", &[]);
        assert_eq!(no_rules.document_type, OTHER_TYPE);
    }

    #[test]
    fn test_tie_goes_to_earlier_rule() {
        let rules = vec![
            DocumentRule::new("First", ["alpha", "beta"]),
            DocumentRule::new("Second", ["gamma", "delta"]),
        ];
        let text = "alpha beta gamma delta";
        assert_eq!(classify_text(text, &rules).document_type, "First");

        let reversed: Vec<_> = rules.into_iter().rev().collect();
        assert_eq!(classify_text(text, &reversed).document_type, "Second");
    }

    #[test]
    fn test_later_rule_wins_only_when_strictly_greater() {
        let rules = vec![
            DocumentRule::new("Receipt", ["paid"]),
            DocumentRule::new("Invoice", ["invoice", "paid", "total due"]),
        ];
        let result = classify_text("Invoice paid, total due zero", &rules);
        assert_eq!(result.document_type, "Invoice");
        assert_eq!(result.matched_keywords, ["invoice", "paid", "total due"]);
    }

    #[test]
    fn test_rule_without_keywords_never_matches() {
        let rules = vec![
            DocumentRule::new("Nothing", Vec::<String>::new()),
            DocumentRule::new("Blank", [" "]),
        ];
        assert_eq!(classify_text("some text", &rules).document_type, OTHER_TYPE);
    }

    #[test]
    fn test_matched_keywords_capped_in_rule_order() {
        let keywords = ["k1", "k2", "k3", "k4", "k5", "k6", "k7"];
        let rules = vec![DocumentRule::new("Many", keywords)];
        let result = classify_text("k7 k6 k5 k4 k3 k2 k1", &rules);
        assert_eq!(result.matched_keywords.len(), MAX_MATCHED_KEYWORDS);
        assert_eq!(result.matched_keywords, ["k1", "k2", "k3", "k4", "k5"]);
    }

    #[test]
    fn test_winner_is_deterministic() {
        let rules = crate::models::default_rules();
        let text = "Invoice number 12. Bill to ACME. Subtotal, VAT and total amount due.";
        let first = classify_text(text, &rules);
        for _ in 0..10 {
            assert_eq!(classify_text(text, &rules), first);
        }
        assert_eq!(first.document_type, "Invoice");
    }

    #[test]
    fn test_classifier_fills_classification() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = RuleStore::open(dir.path().join("rules.json")).unwrap();
        store.set_rules(invoice_receipt()).unwrap();
        let classifier = KeywordClassifier::new(store);

        let doc = DocumentMetadata::new("r.txt", "Receipt: paid in cash");
        let doc = classifier.classify(doc).unwrap();
        assert_eq!(doc.document_type(), Some("Receipt"));
        assert_eq!(classifier.name(), "Keyword Classifier");
    }
}
