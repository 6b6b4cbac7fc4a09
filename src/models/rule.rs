//! Classification rules.

use serde::{Deserialize, Serialize};

/// A document type paired with the keywords that identify it.
///
/// Keywords are matched case-insensitively as substrings of the normalized
/// document text. A rule with no keywords never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRule {
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DocumentRule {
    pub fn new<I, S>(doc_type: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            doc_type: doc_type.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }
}

/// Built-in rule set written to a fresh rules file.
pub fn default_rules() -> Vec<DocumentRule> {
    vec![
        DocumentRule::new(
            "Contract",
            [
                "contract",
                "clause",
                "parties",
                "termination",
                "agreement",
                "contractor",
                "contracting party",
                "obligations",
                "term of",
                "in witness whereof",
                "hereby",
                "signature",
                "governing law",
                "jurisdiction",
                "deadline",
                "payment",
                "penalties",
                "conditions",
                "confidentiality",
            ],
        ),
        DocumentRule::new(
            "Invoice",
            [
                "invoice",
                "invoice number",
                "tax id",
                "bill to",
                "issue date",
                "taxes",
                "total amount",
                "amount due",
                "total due",
                "description",
                "quantity",
                "unit price",
                "subtotal",
                "vat",
                "sales tax",
                "tax rate",
                "payment terms",
                "due date",
                "recipient",
                "issuer",
            ],
        ),
        DocumentRule::new(
            "Receipt",
            [
                "receipt",
                "received from",
                "amount",
                "sum of",
                "payment",
                "regarding",
                "paid",
                "signature",
                "payee",
                "payer",
                "proof of payment",
                "paid in full",
                "payment date",
                "thank you for your purchase",
            ],
        ),
        DocumentRule::new(
            "Report",
            [
                "report",
                "analysis",
                "conclusion",
                "assessment",
                "results",
                "period",
                "data",
                "research",
                "methodology",
                "introduction",
                "objective",
                "summary",
                "statistics",
                "charts",
                "findings",
            ],
        ),
        DocumentRule::new(
            "Resume",
            [
                "resume",
                "curriculum",
                "vitae",
                "experience",
                "education",
                "professional",
                "skills",
                "degree",
                "languages",
                "qualifications",
                "certifications",
                "knowledge",
                "career objective",
                "references",
                "contact",
                "phone",
                "email",
                "linkedin",
            ],
        ),
    ]
}
