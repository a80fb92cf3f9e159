//! Sectioned-text parsing for recommendation replies.
//!
//! The recommendation prompt asks the model for four labeled sections. The
//! raw reply is split once into a header → body map (headers are `[...]`
//! tokens at line start, in any order), then each field runs its own pure
//! extractor over its block. Parsing is total: missing sections yield empty
//! fields, never errors.

use std::collections::HashMap;

use super::record::RecommendationRecord;

/// Section header carrying the destination plus the reasoning.
pub const DESTINATION_HEADER: &str = "추천 여행지";
/// Section header carrying the landmark list.
pub const LANDMARKS_HEADER: &str = "주요 명소";
/// Section header carrying the recommended season.
pub const SEASON_HEADER: &str = "추천 계절";
/// Section header carrying the bare country/city name.
pub const COUNTRY_HEADER: &str = "나라 이름";

/// Phrase that closes the "X is recommended" sentence in the destination
/// block; everything before the first comma before it is the city name.
const RECOMMEND_BOUNDARY: &str = "을 추천드립니다.";

/// Parses a raw recommendation reply into a structured record.
pub fn parse(raw: &str) -> RecommendationRecord {
    let sections = split_sections(raw);

    let destination_block = section(&sections, DESTINATION_HEADER);
    let (mut destination_city, reason) = split_destination(destination_block);

    let landmarks = extract_landmarks(section(&sections, LANDMARKS_HEADER));
    let season = section(&sections, SEASON_HEADER).trim().to_string();

    // The bare-name section is emitted by the prompt as "name only" and
    // wins over whatever the destination sentence yielded.
    let country = section(&sections, COUNTRY_HEADER).trim();
    if !country.is_empty() {
        destination_city = country.to_string();
    }

    RecommendationRecord {
        destination_city,
        reason,
        landmarks,
        season,
    }
}

fn section<'a>(sections: &'a HashMap<String, String>, header: &str) -> &'a str {
    sections.get(header).map(String::as_str).unwrap_or("")
}

/// One pass over the raw text: each `[header]` line starts a section whose
/// body runs to the next header or end of text. Only the first occurrence of
/// a header is kept.
fn split_sections(raw: &str) -> HashMap<String, String> {
    let mut sections: HashMap<String, String> = HashMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in raw.lines() {
        if let Some((name, rest)) = header_line(line) {
            if let Some((prev, body)) = current.take() {
                sections
                    .entry(prev)
                    .or_insert_with(|| body.join("\n").trim().to_string());
            }
            let body = if rest.trim().is_empty() {
                Vec::new()
            } else {
                vec![rest]
            };
            current = Some((name.to_string(), body));
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }

    if let Some((prev, body)) = current {
        sections
            .entry(prev)
            .or_insert_with(|| body.join("\n").trim().to_string());
    }

    sections
}

/// Recognizes a `[name]` header at the start of a line; returns the header
/// name and whatever trails the closing bracket on the same line.
fn header_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('[')?;
    let (name, trailing) = rest.split_once(']')?;
    Some((name.trim(), trailing))
}

/// Splits the destination block into (city, reason).
///
/// With the boundary phrase present, the city is the text before the first
/// comma before the boundary and the reason is the text from the start
/// through the boundary. Without it, the whole block is the reason and the
/// city is left for the bare-name section.
fn split_destination(block: &str) -> (String, String) {
    match block.find(RECOMMEND_BOUNDARY) {
        Some(idx) => {
            let before = &block[..idx];
            let city = before
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            let reason = block[..idx + RECOMMEND_BOUNDARY.len()].trim().to_string();
            (city, reason)
        }
        None => (String::new(), block.trim().to_string()),
    }
}

/// One landmark per non-blank line; header-like leftovers are dropped.
fn extract_landmarks(block: &str) -> Vec<String> {
    block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('['))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const FULL_REPLY: &str = "\
[추천 여행지]
오사카, 일본을 추천드립니다. 미식과 휴양을 한 번에 즐길 수 있는 도시입니다.

[주요 명소]
오사카성
도톤보리
유니버설 스튜디오 재팬

[추천 계절]
봄과 가을

[나라 이름]
일본";

    #[test]
    fn parses_full_reply() {
        let record = parse(FULL_REPLY);

        assert_eq!(record.destination_city, "일본");
        assert_eq!(
            record.reason,
            "오사카, 일본을 추천드립니다."
        );
        assert_eq!(
            record.landmarks,
            vec!["오사카성", "도톤보리", "유니버설 스튜디오 재팬"]
        );
        assert_eq!(record.season, "봄과 가을");
    }

    #[test]
    fn empty_input_yields_all_empty_fields() {
        let record = parse("");
        assert!(record.is_empty());
        assert_eq!(record, RecommendationRecord::default());
    }

    #[test]
    fn sections_parse_in_any_order() {
        let shuffled = "\
[추천 계절]
여름

[나라 이름]
그리스

[주요 명소]
아크로폴리스

[추천 여행지]
아테네, 그리스을 추천드립니다.";

        let record = parse(shuffled);
        assert_eq!(record.destination_city, "그리스");
        assert_eq!(record.season, "여름");
        assert_eq!(record.landmarks, vec!["아크로폴리스"]);
        assert_eq!(record.reason, "아테네, 그리스을 추천드립니다.");
    }

    #[test]
    fn city_comes_from_sentence_when_country_section_missing() {
        let raw = "\
[추천 여행지]
방콕, 태국을 추천드립니다. 길거리 음식이 유명합니다.";

        let record = parse(raw);
        assert_eq!(record.destination_city, "방콕");
        assert_eq!(record.reason, "방콕, 태국을 추천드립니다.");
    }

    #[test]
    fn missing_boundary_makes_whole_block_the_reason() {
        let raw = "\
[추천 여행지]
제주도는 사계절 내내 아름답습니다.

[나라 이름]
대한민국";

        let record = parse(raw);
        assert_eq!(record.destination_city, "대한민국");
        assert_eq!(record.reason, "제주도는 사계절 내내 아름답습니다.");
    }

    #[test]
    fn missing_boundary_and_country_leaves_city_empty() {
        let raw = "[추천 여행지]\n어디든 좋습니다.";
        let record = parse(raw);
        assert_eq!(record.destination_city, "");
        assert_eq!(record.reason, "어디든 좋습니다.");
    }

    #[test]
    fn landmarks_drop_blank_and_header_like_lines() {
        let raw = "\
[주요 명소]
에펠탑

[비고 없음
루브르 박물관
";

        let record = parse(raw);
        assert_eq!(record.landmarks, vec!["에펠탑", "루브르 박물관"]);
    }

    #[test]
    fn landmarks_stray_closed_header_starts_new_section() {
        // A well-formed stray header cuts the landmarks body, exactly like
        // the lookahead in the original line-oriented scan.
        let raw = "\
[주요 명소]
에펠탑

[메모]
루브르 박물관";

        let record = parse(raw);
        assert_eq!(record.landmarks, vec!["에펠탑"]);
    }

    #[test]
    fn landmark_filter_drops_unclosed_bracket_lines() {
        assert_eq!(
            extract_landmarks("에펠탑\n\n  \n[각주\n개선문"),
            vec!["에펠탑", "개선문"]
        );
    }

    #[test]
    fn duplicate_headers_keep_the_first_body() {
        let raw = "\
[추천 계절]
겨울

[추천 계절]
여름";

        let record = parse(raw);
        assert_eq!(record.season, "겨울");
    }

    #[test]
    fn header_with_trailing_text_keeps_same_line_body() {
        let record = parse("[추천 계절] 초가을");
        assert_eq!(record.season, "초가을");
    }

    #[test]
    fn unknown_sections_are_ignored() {
        let raw = "\
[예산]
100만원

[추천 계절]
봄";

        let record = parse(raw);
        assert_eq!(record.season, "봄");
        assert_eq!(record.destination_city, "");
    }

    proptest! {
        #[test]
        fn parse_never_panics(raw in ".*") {
            let record = parse(&raw);
            // All fields are always materialized.
            let _ = (
                record.destination_city,
                record.reason,
                record.landmarks,
                record.season,
            );
        }
    }
}
