//! Client-side state: a read-only projection of the host's session.
//!
//! Game truth only ever flows host -> client. Every broadcast carries the
//! complete value of the fields it describes, so applying one replaces the
//! corresponding local field wholesale. The single exception is the
//! optimistic self-mark after a local submission, which is kept until the
//! host's answered set confirms it.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::protocol::{
    parse_guess, validate_display_name, PlayerEntry, RoundResultEntry, ServerMessage,
};

/// What the client is currently showing.
#[derive(Debug)]
pub enum ClientPhase {
    /// Waiting for the WebSocket handshake and the host's name request.
    Connecting,
    /// Entering a display name.
    NameEntry {
        input: String,
        error: Option<String>,
    },
    /// Named and waiting for the host to start.
    Lobby,
    /// A round is open.
    InRound(RoundView),
    /// A round has been scored.
    RoundResults(ResultsView),
    /// Final standings.
    GameOver { standings: Vec<PlayerEntry> },
    /// The channel is gone; terminal.
    Disconnected { message: String },
}

/// Display data for the open round.
#[derive(Debug)]
pub struct RoundView {
    pub prompt: String,
    pub unit: String,
    pub round_index: usize,
    pub total_rounds: usize,
    pub deadline_at: Instant,
    pub input: String,
    pub error: Option<String>,
    /// Set once this client has sent its answer for the round.
    pub submitted: bool,
}

/// Display data for a scored round.
#[derive(Debug)]
pub struct ResultsView {
    pub correct_answer: f64,
    pub unit: String,
    pub results: Vec<RoundResultEntry>,
    pub round_index: usize,
    pub total_rounds: usize,
    pub is_last_round: bool,
}

/// Client application state.
pub struct ClientApp {
    pub phase: ClientPhase,
    /// The room code this client joined with.
    pub code: String,
    /// Assigned by the host on admission.
    pub my_id: Option<Uuid>,
    /// Roster cache, replaced wholesale by each `player-list`.
    pub players: Vec<PlayerEntry>,
    /// Who has answered the open round, replaced wholesale by each
    /// `answer-status`.
    pub answered: HashSet<Uuid>,
    pub should_quit: bool,
}

impl ClientApp {
    pub fn new(code: String) -> Self {
        Self {
            phase: ClientPhase::Connecting,
            code,
            my_id: None,
            players: Vec::new(),
            answered: HashSet::new(),
            should_quit: false,
        }
    }

    /// Apply a host broadcast to the local projection.
    pub fn apply(&mut self, msg: ServerMessage) {
        match msg {
            ServerMessage::RequestName { id } => {
                self.my_id = Some(id);
                self.phase = ClientPhase::NameEntry {
                    input: String::new(),
                    error: None,
                };
            }
            ServerMessage::PlayerList { players } => {
                self.players = players;
            }
            ServerMessage::GameStart { total_rounds: _ } => {
                // The first question follows immediately; nothing to show yet.
            }
            ServerMessage::Question {
                prompt,
                unit,
                round_index,
                total_rounds,
                deadline_secs,
            } => {
                self.answered.clear();
                self.phase = ClientPhase::InRound(RoundView {
                    prompt,
                    unit,
                    round_index,
                    total_rounds,
                    deadline_at: Instant::now() + Duration::from_secs(deadline_secs),
                    input: String::new(),
                    error: None,
                    submitted: false,
                });
            }
            ServerMessage::AnswerStatus { answered_ids } => {
                self.answered = answered_ids.into_iter().collect();
                // Keep the optimistic self-mark until the host's set
                // includes it.
                if let (Some(me), ClientPhase::InRound(view)) = (self.my_id, &self.phase) {
                    if view.submitted {
                        self.answered.insert(me);
                    }
                }
            }
            ServerMessage::RoundResults {
                correct_answer,
                unit,
                results,
                round_index,
                total_rounds,
                is_last_round,
            } => {
                self.answered.clear();
                self.phase = ClientPhase::RoundResults(ResultsView {
                    correct_answer,
                    unit,
                    results,
                    round_index,
                    total_rounds,
                    is_last_round,
                });
            }
            ServerMessage::GameOver { standings } => {
                self.phase = ClientPhase::GameOver { standings };
            }
            ServerMessage::Error { message } => {
                self.phase = ClientPhase::Disconnected { message };
            }
        }
    }

    /// Validate the typed name. On success the phase moves to the lobby and
    /// the name to send is returned.
    pub fn submit_name(&mut self) -> Option<String> {
        let ClientPhase::NameEntry { input, error } = &mut self.phase else {
            return None;
        };
        match validate_display_name(input) {
            Ok(name) => {
                let name = name.to_string();
                self.phase = ClientPhase::Lobby;
                Some(name)
            }
            Err(reason) => {
                *error = Some(reason.to_string());
                None
            }
        }
    }

    /// Validate the typed guess. On success the guess to send is returned,
    /// exactly once per round: the round is marked submitted and this
    /// client is optimistically shown as answered.
    pub fn submit_answer(&mut self) -> Option<f64> {
        let me = self.my_id?;
        let ClientPhase::InRound(view) = &mut self.phase else {
            return None;
        };
        if view.submitted {
            return None;
        }
        match parse_guess(&view.input) {
            Ok(value) => {
                view.submitted = true;
                view.error = None;
                self.answered.insert(me);
                Some(value)
            }
            Err(e) => {
                view.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn input_push(&mut self, c: char) {
        match &mut self.phase {
            ClientPhase::NameEntry { input, error } => {
                *error = None;
                input.push(c);
            }
            ClientPhase::InRound(view) if !view.submitted => {
                view.error = None;
                view.input.push(c);
            }
            _ => {}
        }
    }

    pub fn input_pop(&mut self) {
        match &mut self.phase {
            ClientPhase::NameEntry { input, .. } => {
                input.pop();
            }
            ClientPhase::InRound(view) if !view.submitted => {
                view.input.pop();
            }
            _ => {}
        }
    }

    /// The channel closed or failed.
    pub fn disconnect(&mut self, message: String) {
        self.phase = ClientPhase::Disconnected { message };
    }

    pub fn has_answered(&self, id: Uuid) -> bool {
        self.answered.contains(&id)
    }

    pub fn is_me(&self, id: Uuid) -> bool {
        self.my_id == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u32, is_host: bool) -> PlayerEntry {
        PlayerEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
            score,
            is_host,
        }
    }

    fn question_msg() -> ServerMessage {
        ServerMessage::Question {
            prompt: "How many bones are in the adult human body?".to_string(),
            unit: "bones".to_string(),
            round_index: 0,
            total_rounds: 10,
            deadline_secs: 30,
        }
    }

    fn app_in_round() -> ClientApp {
        let mut app = ClientApp::new("KRPX".to_string());
        app.apply(ServerMessage::RequestName { id: Uuid::new_v4() });
        app.submit_name_with("Alice");
        app.apply(ServerMessage::GameStart { total_rounds: 10 });
        app.apply(question_msg());
        app
    }

    impl ClientApp {
        fn submit_name_with(&mut self, name: &str) {
            for c in name.chars() {
                self.input_push(c);
            }
            assert!(self.submit_name().is_some());
        }
    }

    #[test]
    fn request_name_assigns_id_and_prompts_for_name() {
        let mut app = ClientApp::new("KRPX".to_string());
        let id = Uuid::new_v4();
        app.apply(ServerMessage::RequestName { id });

        assert_eq!(app.my_id, Some(id));
        assert!(matches!(app.phase, ClientPhase::NameEntry { .. }));
    }

    #[test]
    fn player_list_replaces_the_roster_wholesale() {
        let mut app = ClientApp::new("KRPX".to_string());
        app.apply(ServerMessage::PlayerList {
            players: vec![entry("Host", 0, true), entry("Alice", 0, false)],
        });
        app.apply(ServerMessage::PlayerList {
            players: vec![entry("Host", 1000, true)],
        });

        assert_eq!(app.players.len(), 1);
        assert_eq!(app.players[0].score, 1000);
    }

    #[test]
    fn a_question_opens_a_fresh_round_view() {
        let app = app_in_round();
        let ClientPhase::InRound(view) = &app.phase else {
            panic!("not in round");
        };
        assert_eq!(view.round_index, 0);
        assert!(!view.submitted);
        assert!(app.answered.is_empty());
    }

    #[test]
    fn answer_status_replaces_the_answered_set_wholesale() {
        let mut app = app_in_round();
        let other = Uuid::new_v4();
        app.apply(ServerMessage::AnswerStatus {
            answered_ids: vec![other],
        });
        let second = Uuid::new_v4();
        app.apply(ServerMessage::AnswerStatus {
            answered_ids: vec![second],
        });

        assert!(!app.has_answered(other));
        assert!(app.has_answered(second));
    }

    #[test]
    fn at_most_one_answer_is_sent_per_round() {
        let mut app = app_in_round();
        for c in "206".chars() {
            app.input_push(c);
        }

        assert_eq!(app.submit_answer(), Some(206.0));
        // A second attempt is rejected before it reaches the wire.
        assert_eq!(app.submit_answer(), None);
    }

    #[test]
    fn submission_optimistically_marks_self_answered() {
        let mut app = app_in_round();
        let me = app.my_id.unwrap();
        for c in "206".chars() {
            app.input_push(c);
        }
        app.submit_answer().unwrap();

        assert!(app.has_answered(me));

        // An interleaved status without us does not contradict the
        // optimistic mark...
        let other = Uuid::new_v4();
        app.apply(ServerMessage::AnswerStatus {
            answered_ids: vec![other],
        });
        assert!(app.has_answered(me));
        assert!(app.has_answered(other));

        // ...and the host's set eventually confirms it.
        app.apply(ServerMessage::AnswerStatus {
            answered_ids: vec![other, me],
        });
        assert!(app.has_answered(me));
    }

    #[test]
    fn invalid_guess_is_rejected_locally() {
        let mut app = app_in_round();
        for c in "many".chars() {
            app.input_push(c);
        }

        assert_eq!(app.submit_answer(), None);
        let ClientPhase::InRound(view) = &app.phase else {
            panic!("not in round");
        };
        assert!(view.error.is_some());
        assert!(!view.submitted);
    }

    #[test]
    fn typing_is_locked_after_submitting() {
        let mut app = app_in_round();
        for c in "206".chars() {
            app.input_push(c);
        }
        app.submit_answer().unwrap();
        app.input_push('9');

        let ClientPhase::InRound(view) = &app.phase else {
            panic!("not in round");
        };
        assert_eq!(view.input, "206");
    }

    #[test]
    fn round_results_supersede_the_round_view() {
        let mut app = app_in_round();
        app.apply(ServerMessage::RoundResults {
            correct_answer: 206.0,
            unit: "bones".to_string(),
            results: Vec::new(),
            round_index: 0,
            total_rounds: 10,
            is_last_round: false,
        });

        assert!(matches!(app.phase, ClientPhase::RoundResults(_)));
        assert!(app.answered.is_empty());
    }

    #[test]
    fn game_over_and_error_are_terminal_views() {
        let mut app = app_in_round();
        app.apply(ServerMessage::GameOver {
            standings: vec![entry("Host", 9000, true)],
        });
        assert!(matches!(app.phase, ClientPhase::GameOver { .. }));

        let mut app = ClientApp::new("KRPX".to_string());
        app.apply(ServerMessage::Error {
            message: "game is full (max 8 players)".to_string(),
        });
        assert!(matches!(app.phase, ClientPhase::Disconnected { .. }));
    }

    #[test]
    fn name_entry_validates_before_sending() {
        let mut app = ClientApp::new("KRPX".to_string());
        app.apply(ServerMessage::RequestName { id: Uuid::new_v4() });

        assert_eq!(app.submit_name(), None);
        let ClientPhase::NameEntry { error, .. } = &app.phase else {
            panic!("not in name entry");
        };
        assert!(error.is_some());

        for c in "Alice".chars() {
            app.input_push(c);
        }
        assert_eq!(app.submit_name(), Some("Alice".to_string()));
        assert!(matches!(app.phase, ClientPhase::Lobby));
    }
}
