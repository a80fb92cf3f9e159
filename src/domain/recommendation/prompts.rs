//! Instruction prompts for the completion service.
//!
//! Prompt wording keeps the service's output machine-checkable: the
//! classifier must answer with `intent:` / `keywords:` marker lines, and the
//! recommender must emit the four bracketed sections the parser knows.

use super::parser::{COUNTRY_HEADER, DESTINATION_HEADER, LANDMARKS_HEADER, SEASON_HEADER};

/// System prompt for intent classification.
pub const CLASSIFY_SYSTEM_PROMPT: &str = "You are an assistant that classifies user intents in \
    Korean. Identify the user's intent and categorize it into one of the predefined intent \
    labels: 여행 추천 요청, 정보 검색, 일반 질문, 도움 요청, 인사, 종료, 기타.";

/// Classification request randomness: deterministic labels.
pub const CLASSIFY_TEMPERATURE: f32 = 0.0;
/// Classification reply budget.
pub const CLASSIFY_MAX_TOKENS: u32 = 100;

/// User prompt for intent classification.
pub fn classify_prompt(user_input: &str) -> String {
    format!(
        "{user_input}\n\nClassify the intent into one of: [여행 추천 요청], [정보 검색], \
         [일반 질문], [도움 요청], [인사], [종료], [기타].\n\
         Answer with exactly these lines and nothing else:\n\
         intent: <label>\n\
         keywords: <comma-separated travel style keywords from the input, empty if none>"
    )
}

/// System prompt for recommendation generation.
pub const RECOMMEND_SYSTEM_PROMPT: &str = "You are an assistant that provides travel \
    recommendations in Korean. Suggest overseas travel destinations based on the user's \
    preferences, with key attractions, activities, food, and best visiting seasons.";

/// Recommendation request randomness: varied, interesting suggestions.
pub const RECOMMEND_TEMPERATURE: f32 = 0.7;
/// Structured recommendation reply budget.
pub const RECOMMEND_MAX_TOKENS: u32 = 1000;
/// Single-city reply budget.
pub const CITY_MAX_TOKENS: u32 = 50;

/// User prompt for the single-city path: exactly one representative city.
pub fn city_prompt(keywords: &[String]) -> String {
    format!(
        "다음 키워드에 어울리는 해외 여행지 도시를 한 곳만 추천해줘: {}.\n\
         도시 이름 하나만 출력하고 다른 설명은 붙이지 마.",
        keywords.join(", ")
    )
}

/// User prompt for the structured path: four labeled sections.
pub fn structured_prompt(user_input: &str) -> String {
    format!(
        "{user_input}\n\nBased on the input, recommend an overseas travel destination. \
         Organize the output into the following sections: [{DESTINATION_HEADER}], \
         [{LANDMARKS_HEADER}], [{SEASON_HEADER}], [{COUNTRY_HEADER}](나라 이름만 출력해줘). \
         Provide detailed and relevant recommendations for the user's preferences."
    )
}
