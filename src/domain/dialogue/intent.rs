//! Intent vocabulary and classifier-reply parsing.
//!
//! The classifier is asked for a closed label set but replies in free text,
//! and label spellings drift between model versions ("여행 추천 요청",
//! "여행지 추천", ...). Matching is therefore fuzzy: raw labels are
//! normalized and matched against a substring alias table instead of
//! compared for exact equality.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Marker line prefix for the classified label.
const INTENT_MARKER: &str = "intent:";
/// Marker line prefix for the extracted keyword list.
const KEYWORD_MARKER: &str = "keywords:";

/// The classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The user wants a travel destination recommendation.
    TravelRecommendation,
    /// The user is searching for information.
    InformationSearch,
    /// A general question outside the travel flow.
    GeneralQuestion,
    /// The user asks for help with the service itself.
    HelpRequest,
    /// A greeting.
    Greeting,
    /// A farewell / session end.
    Farewell,
    /// Recognized label outside the above set.
    Other,
    /// The classifier reply carried no recognizable intent marker or label.
    Undetermined,
    /// The classification service failed; intent could not be determined.
    Unknown,
}

impl Intent {
    /// Canonical user-visible label for this intent.
    pub fn canonical_label(&self) -> &'static str {
        match self {
            Intent::TravelRecommendation => "여행 추천 요청",
            Intent::InformationSearch => "정보 검색",
            Intent::GeneralQuestion => "일반 질문",
            Intent::HelpRequest => "도움 요청",
            Intent::Greeting => "인사",
            Intent::Farewell => "종료",
            Intent::Other => "기타",
            Intent::Undetermined => "미확인",
            Intent::Unknown => "알 수 없음",
        }
    }

    /// Whether this intent asks for a travel recommendation.
    pub fn is_travel_recommendation(&self) -> bool {
        matches!(self, Intent::TravelRecommendation)
    }
}

/// Substring aliases per intent, checked against the normalized label.
static LABEL_ALIASES: Lazy<Vec<(Intent, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            Intent::InformationSearch,
            vec!["정보 검색", "information search", "information_search"],
        ),
        (
            Intent::GeneralQuestion,
            vec!["일반 질문", "general question", "general_question"],
        ),
        (Intent::HelpRequest, vec!["도움 요청", "help request", "help_request"]),
        (Intent::Greeting, vec!["인사", "greeting"]),
        (Intent::Farewell, vec!["종료", "farewell", "goodbye"]),
        (Intent::Other, vec!["기타", "other"]),
    ]
});

/// Matches a raw classifier label against the intent vocabulary.
///
/// Returns `None` when the label matches nothing; callers decide how loudly
/// to flag that.
pub fn match_label(label: &str) -> Option<Intent> {
    let normalized = normalize_label(label);
    if normalized.is_empty() {
        return None;
    }

    // Travel requests show the widest spelling drift, so any label that
    // mentions both travel and recommendation counts.
    if (normalized.contains("여행") && normalized.contains("추천"))
        || (normalized.contains("travel") && normalized.contains("recommend"))
    {
        return Some(Intent::TravelRecommendation);
    }

    LABEL_ALIASES.iter().find_map(|(intent, aliases)| {
        aliases
            .iter()
            .any(|alias| normalized.contains(alias))
            .then_some(*intent)
    })
}

/// Lower-cases, trims, and strips bracket decoration from a raw label.
fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .replace(['[', ']'], " ")
        .trim()
        .to_string()
}

/// Classification result: intent, the label as returned, and any keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedIntent {
    pub intent: Intent,
    /// Raw label from the classifier, or the canonical label when degraded.
    pub label: String,
    /// Ordered keywords, possibly empty; repeats are kept as returned.
    pub keywords: Vec<String>,
}

impl ClassifiedIntent {
    /// Result used when the classification service itself failed.
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            label: Intent::Unknown.canonical_label().to_string(),
            keywords: Vec::new(),
        }
    }

    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// Parses the classifier's free-text reply.
///
/// Scans lines for the `intent:` and `keywords:` markers. A missing intent
/// marker yields [`Intent::Undetermined`]; a missing keyword marker yields an
/// empty keyword list. Never fails.
pub fn parse_classifier_reply(reply: &str) -> ClassifiedIntent {
    let mut label: Option<String> = None;
    let mut keywords: Vec<String> = Vec::new();

    for line in reply.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if label.is_none() && lower.starts_with(INTENT_MARKER) {
            label = Some(trimmed[INTENT_MARKER.len()..].trim().to_lowercase());
        } else if lower.starts_with(KEYWORD_MARKER) {
            keywords = trimmed[KEYWORD_MARKER.len()..]
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();
        }
    }

    match label {
        Some(raw) => {
            let intent = match_label(&raw).unwrap_or(Intent::Undetermined);
            ClassifiedIntent {
                intent,
                label: if raw.is_empty() {
                    Intent::Undetermined.canonical_label().to_string()
                } else {
                    raw
                },
                keywords,
            }
        }
        None => ClassifiedIntent {
            intent: Intent::Undetermined,
            label: Intent::Undetermined.canonical_label().to_string(),
            keywords,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_intent_and_keywords() {
        let reply = "intent: 여행 추천 요청\nkeywords: 바다, 맛집, 휴양";
        let result = parse_classifier_reply(reply);

        assert_eq!(result.intent, Intent::TravelRecommendation);
        assert_eq!(result.label, "여행 추천 요청");
        assert_eq!(result.keywords, vec!["바다", "맛집", "휴양"]);
    }

    #[test]
    fn missing_intent_marker_is_undetermined_not_a_fault() {
        let result = parse_classifier_reply("여행 추천 요청");
        assert_eq!(result.intent, Intent::Undetermined);

        let result = parse_classifier_reply("");
        assert_eq!(result.intent, Intent::Undetermined);
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn missing_keyword_marker_yields_empty_keywords() {
        let result = parse_classifier_reply("intent: 인사");
        assert_eq!(result.intent, Intent::Greeting);
        assert!(result.keywords.is_empty());
    }

    #[test]
    fn keywords_are_trimmed_and_blanks_dropped() {
        let result = parse_classifier_reply("intent: 여행 추천 요청\nkeywords:  바다 ,, 맛집 ,");
        assert_eq!(result.keywords, vec!["바다", "맛집"]);
    }

    #[test]
    fn repeated_keywords_are_kept() {
        let result = parse_classifier_reply("intent: 여행 추천 요청\nkeywords: 바다, 바다");
        assert_eq!(result.keywords, vec!["바다", "바다"]);
    }

    #[test]
    fn marker_matching_is_case_insensitive() {
        let result = parse_classifier_reply("Intent: 인사\nKeywords: a, b");
        assert_eq!(result.intent, Intent::Greeting);
        assert_eq!(result.keywords, vec!["a", "b"]);
    }

    #[test]
    fn label_matching_tolerates_spelling_variants() {
        assert_eq!(match_label("여행 추천 요청"), Some(Intent::TravelRecommendation));
        assert_eq!(match_label("여행지 추천"), Some(Intent::TravelRecommendation));
        assert_eq!(match_label("[여행 추천 요청]"), Some(Intent::TravelRecommendation));
        assert_eq!(match_label("Travel Recommendation Request"), Some(Intent::TravelRecommendation));
    }

    #[test]
    fn label_matching_covers_the_closed_set() {
        assert_eq!(match_label("정보 검색"), Some(Intent::InformationSearch));
        assert_eq!(match_label("일반 질문"), Some(Intent::GeneralQuestion));
        assert_eq!(match_label("도움 요청"), Some(Intent::HelpRequest));
        assert_eq!(match_label("인사"), Some(Intent::Greeting));
        assert_eq!(match_label("종료"), Some(Intent::Farewell));
        assert_eq!(match_label("기타"), Some(Intent::Other));
    }

    #[test]
    fn unmatched_label_is_none() {
        assert_eq!(match_label("주문 취소"), None);
        assert_eq!(match_label(""), None);
    }

    #[test]
    fn unmatched_label_classifies_as_undetermined_with_raw_label_kept() {
        let result = parse_classifier_reply("intent: 주문 취소");
        assert_eq!(result.intent, Intent::Undetermined);
        assert_eq!(result.label, "주문 취소");
    }

    #[test]
    fn unknown_carries_canonical_label() {
        let result = ClassifiedIntent::unknown();
        assert_eq!(result.intent, Intent::Unknown);
        assert_eq!(result.label, "알 수 없음");
        assert!(!result.has_keywords());
    }

    #[test]
    fn intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::TravelRecommendation).unwrap();
        assert_eq!(json, "\"travel_recommendation\"");
    }
}
