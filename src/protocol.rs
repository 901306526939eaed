use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One leaderboard row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub initials: String,
    pub score: u32,
}

/// Form body for `POST /scores/new/`.
#[derive(Debug)]
pub struct ScoreSubmission<'a> {
    pub initials: &'a str,
    pub score: u32,
    pub difficulty: &'a str,
}

impl ScoreSubmission<'_> {
    /// `application/x-www-form-urlencoded` body, encoded by the browser.
    #[cfg(target_arch = "wasm32")]
    pub fn to_form(&self) -> String {
        match web_sys::UrlSearchParams::new() {
            Ok(params) => {
                params.append("initials", self.initials);
                params.append("score", &self.score.to_string());
                params.append("difficulty", self.difficulty);
                String::from(params.to_string())
            }
            Err(_) => self.plain_form(),
        }
    }

    /// Host builds have no `URLSearchParams`. Initials are ASCII
    /// alphanumerics and difficulties lowercase words, so nothing needs
    /// escaping.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn to_form(&self) -> String {
        self.plain_form()
    }

    fn plain_form(&self) -> String {
        format!("initials={}&score={}&difficulty={}", self.initials, self.score, self.difficulty)
    }
}

/// The service answers with a JSON list, sometimes wrapped once more as a
/// JSON string. Rows missing either field are skipped; anything that is not
/// a list reads as an empty board.
pub fn parse_scores(body: &str) -> Vec<ScoreRecord> {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };
    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner).unwrap_or(Value::Null),
        other => other,
    };
    match value {
        Value::Array(rows) => rows
            .into_iter()
            .filter_map(|row| serde_json::from_value::<ScoreRecord>(row).ok())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_list() {
        let rows = parse_scores(r#"[{"initials":"ABC","score":120},{"initials":"ZZ","score":5}]"#);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ScoreRecord { initials: "ABC".into(), score: 120 });
    }

    #[test]
    fn parses_double_encoded_list() {
        let body = r#""[{\"initials\":\"XYZ\",\"score\":900}]""#;
        assert_eq!(parse_scores(body), vec![ScoreRecord { initials: "XYZ".into(), score: 900 }]);
    }

    #[test]
    fn skips_bad_rows() {
        let body = r#"[{"initials":"OK","score":1},{"score":2},{"initials":"NO","score":"x"}]"#;
        let rows = parse_scores(body);
        assert_eq!(rows, vec![ScoreRecord { initials: "OK".into(), score: 1 }]);
    }

    #[test]
    fn junk_is_empty_board() {
        assert!(parse_scores("not json").is_empty());
        assert!(parse_scores(r#"{"initials":"A","score":1}"#).is_empty());
        assert!(parse_scores(r#""still not a list""#).is_empty());
        assert!(parse_scores("null").is_empty());
    }

    #[test]
    fn form_body() {
        let sub = ScoreSubmission { initials: "AB7", score: 75, difficulty: "normal" };
        assert_eq!(sub.to_form(), "initials=AB7&score=75&difficulty=normal");
    }
}
