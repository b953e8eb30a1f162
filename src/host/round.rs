//! The lifecycle of a single round.
//!
//! A round is `Open` from creation until it is closed, either because the
//! deadline elapsed or because every expected participant submitted. Once
//! closed it is immutable; the next round replaces it.

use std::time::Duration;

use uuid::Uuid;

use crate::models::Question;

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Recorded as this participant's guess for the round.
    Accepted,
    /// The participant already submitted; the first guess stands.
    Duplicate,
    /// The round is no longer accepting submissions.
    Closed,
}

/// One question-answer-score cycle.
#[derive(Debug)]
pub struct Round {
    index: usize,
    question: Question,
    deadline: Duration,
    // Submission order, which also makes answered_ids deterministic.
    submissions: Vec<(Uuid, f64)>,
    closed: bool,
}

impl Round {
    /// Open a new round.
    pub fn new(index: usize, question: Question, deadline: Duration) -> Self {
        Self {
            index,
            question,
            deadline,
            submissions: Vec::new(),
            closed: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Record a guess. First submission wins; later attempts are reported,
    /// not errors, and never overwrite the recorded value.
    pub fn submit(&mut self, id: Uuid, guess: f64) -> SubmitOutcome {
        if self.closed {
            return SubmitOutcome::Closed;
        }
        if self.has_submitted(id) {
            return SubmitOutcome::Duplicate;
        }
        self.submissions.push((id, guess));
        SubmitOutcome::Accepted
    }

    pub fn has_submitted(&self, id: Uuid) -> bool {
        self.submissions.iter().any(|(sid, _)| *sid == id)
    }

    /// The recorded guess for a participant, if any.
    pub fn guess_for(&self, id: Uuid) -> Option<f64> {
        self.submissions
            .iter()
            .find(|(sid, _)| *sid == id)
            .map(|(_, g)| *g)
    }

    /// Ids that have submitted, in submission order.
    pub fn answered_ids(&self) -> Vec<Uuid> {
        self.submissions.iter().map(|(id, _)| *id).collect()
    }

    /// True iff every id in `expected` has a recorded submission.
    pub fn all_submitted(&self, expected: &[Uuid]) -> bool {
        expected.iter().all(|id| self.has_submitted(*id))
    }

    /// Transition to `Closed`. Returns whether this call performed the
    /// transition; closing an already-closed round is a no-op.
    pub fn close(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            prompt: "How many bones are in the adult human body?".to_string(),
            answer: 206.0,
            unit: "bones".to_string(),
        }
    }

    fn round() -> Round {
        Round::new(0, question(), Duration::from_secs(30))
    }

    #[test]
    fn first_submission_wins() {
        let mut r = round();
        let id = Uuid::new_v4();

        assert_eq!(r.submit(id, 150.0), SubmitOutcome::Accepted);
        assert_eq!(r.submit(id, 999.0), SubmitOutcome::Duplicate);
        assert_eq!(r.guess_for(id), Some(150.0));
    }

    #[test]
    fn closed_round_rejects_submissions() {
        let mut r = round();
        let id = Uuid::new_v4();

        assert!(r.close());
        assert_eq!(r.submit(id, 150.0), SubmitOutcome::Closed);
        assert!(!r.has_submitted(id));
    }

    #[test]
    fn close_is_idempotent() {
        let mut r = round();
        assert!(r.close());
        assert!(!r.close());
        assert!(r.is_closed());
    }

    #[test]
    fn all_submitted_tracks_the_expected_roster() {
        let mut r = round();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(!r.all_submitted(&[a, b]));
        r.submit(a, 100.0);
        assert!(!r.all_submitted(&[a, b]));
        r.submit(b, 250.0);
        assert!(r.all_submitted(&[a, b]));

        // A shrunk roster is judged against the remaining ids only.
        assert!(r.all_submitted(&[a]));
    }

    #[test]
    fn answered_ids_preserve_submission_order() {
        let mut r = round();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        r.submit(b, 1.0);
        r.submit(a, 2.0);
        assert_eq!(r.answered_ids(), vec![b, a]);
    }
}
