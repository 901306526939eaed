use crate::constants::HIGH_SCORE_KEY;

/// Durable client-side high score.
pub trait HighScoreStore {
    fn high_score(&self) -> u32;
    fn set_high_score(&mut self, score: u32);
}

/// `window.localStorage`. A missing or garbled entry reads as zero.
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            crate::console::warn("localStorage unavailable, high score will not persist");
        }
        Self { storage }
    }
}

impl HighScoreStore for LocalStorage {
    fn high_score(&self) -> u32 {
        self.storage
            .as_ref()
            .and_then(|s| s.get_item(HIGH_SCORE_KEY).ok().flatten())
            .map(|v| parse_high_score(&v))
            .unwrap_or(0)
    }

    fn set_high_score(&mut self, score: u32) {
        if let Some(storage) = &self.storage {
            let _ = storage.set_item(HIGH_SCORE_KEY, &score.to_string());
        }
    }
}

fn parse_high_score(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}


#[cfg(test)]
mod tests {
    use super::parse_high_score;

    #[test]
    fn garbage_reads_as_zero() {
        assert_eq!(parse_high_score("120"), 120);
        assert_eq!(parse_high_score(" 45 "), 45);
        assert_eq!(parse_high_score("NaN"), 0);
        assert_eq!(parse_high_score("-3"), 0);
        assert_eq!(parse_high_score(""), 0);
    }
}
