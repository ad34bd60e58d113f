use crate::model::SatisfactionLevel;

/// Maps a satisfaction level to its numeric score.
///
/// | Level               | Score |
/// |---------------------|-------|
/// | Highly Satisfied    | 5     |
/// | Satisfied           | 4     |
/// | Neutral             | 3     |
/// | Dissatisfied        | 2     |
/// | Highly Dissatisfied | 1     |
/// | absent              | 0     |
pub fn score(level: Option<SatisfactionLevel>) -> u8 {
    level.map_or(0, SatisfactionLevel::score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(score(Some(SatisfactionLevel::HighlySatisfied)), 5);
        assert_eq!(score(Some(SatisfactionLevel::Satisfied)), 4);
        assert_eq!(score(Some(SatisfactionLevel::Neutral)), 3);
        assert_eq!(score(Some(SatisfactionLevel::Dissatisfied)), 2);
        assert_eq!(score(Some(SatisfactionLevel::HighlyDissatisfied)), 1);
        assert_eq!(score(None), 0);
        assert_eq!(score("Excellent".parse::<SatisfactionLevel>().ok()), 0);
    }
}
