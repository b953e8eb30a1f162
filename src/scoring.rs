//! Round scoring.
//!
//! Points are based on percentage closeness to the true answer.

/// Maximum points for a single round.
pub const MAX_POINTS: u32 = 1000;

/// Score a guess against the true answer.
///
/// Returns `round(1000 * (1 - |guess - answer| / |answer|))`, floored at 0.
/// An exact guess always scores 1000. When the answer is 0 the relative
/// error is undefined, so only an exact 0 scores; everything else gets 0.
///
/// Rounding is `f64::round`, i.e. half away from zero, so a raw value of
/// 727.5 becomes 728.
pub fn score(guess: f64, answer: f64) -> u32 {
    if answer == 0.0 {
        return if guess == 0.0 { MAX_POINTS } else { 0 };
    }
    let ratio = (guess - answer).abs() / answer.abs();
    let raw = (f64::from(MAX_POINTS) * (1.0 - ratio)).round();
    if raw <= 0.0 { 0 } else { raw as u32 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_guess_scores_max() {
        assert_eq!(score(206.0, 206.0), 1000);
        assert_eq!(score(-50.0, -50.0), 1000);
        assert_eq!(score(0.25, 0.25), 1000);
    }

    #[test]
    fn zero_answer_requires_exact_match() {
        assert_eq!(score(0.0, 0.0), 1000);
        assert_eq!(score(0.001, 0.0), 0);
        assert_eq!(score(-3.0, 0.0), 0);
    }

    #[test]
    fn far_off_guesses_never_go_negative() {
        assert_eq!(score(1_000_000.0, 206.0), 0);
        assert_eq!(score(-1_000_000.0, 206.0), 0);
        assert_eq!(score(500.0, 4.0), 0);
    }

    #[test]
    fn result_is_always_within_bounds() {
        let answers = [1.0, 4.0, 206.0, 12742.0, 14_000_000.0];
        let guesses = [0.0, 1.0, 100.0, 206.0, 1e9, -1e9];
        for a in answers {
            for g in guesses {
                let pts = score(g, a);
                assert!(pts <= MAX_POINTS, "score({g}, {a}) = {pts}");
            }
        }
    }

    #[test]
    fn monotone_in_absolute_error() {
        let answer = 206.0;
        let mut last = u32::MAX;
        for delta in [0.0, 1.0, 10.0, 56.0, 94.0, 150.0, 206.0, 1000.0] {
            let pts = score(answer + delta, answer);
            assert!(pts <= last, "score not non-increasing at delta {delta}");
            last = pts;
        }
    }

    #[test]
    fn bones_question_scenario() {
        // answer = 206: host guesses exactly, A is 56 off, B is 94 off.
        assert_eq!(score(206.0, 206.0), 1000);
        assert_eq!(score(150.0, 206.0), 728);
        assert_eq!(score(300.0, 206.0), 544);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // ratio 3/16 is exact in binary, so the raw value is exactly 812.5;
        // half away from zero gives 813 (banker's rounding would give 812).
        assert_eq!(score(19.0, 16.0), 813);
    }
}
