//! Host-side session state.
//!
//! The session is the single source of truth for the game: the roster, the
//! current round, and all scores live here, and every broadcast a client
//! sees is derived from this state. All mutation goes through `&mut self`
//! behind the host's shared lock, so message handlers from different peer
//! channels never interleave inside a state transition.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::GameError;
use crate::models::Question;
use crate::protocol::{PlayerEntry, RoundResultEntry, ServerMessage};
use crate::scoring;

use super::round::{Round, SubmitOutcome};

/// Questions per playthrough.
pub const ROUNDS_PER_GAME: usize = 10;

/// Seconds each round stays open.
pub const ROUND_SECS: u64 = 30;

/// Maximum clients, excluding the host.
pub const MAX_CLIENTS: usize = 7;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for players to join and name themselves.
    Lobby,
    /// A round is open.
    InRound,
    /// The last round has been scored; waiting for the host to advance.
    RoundResults,
    /// Final standings have been broadcast.
    Finished,
}

/// One participant, host included.
pub struct Participant {
    pub id: Uuid,
    /// `None` until the participant supplies a name; unnamed participants
    /// are tracked but not part of the playable roster.
    pub name: Option<String>,
    pub score: u32,
    pub is_host: bool,
    /// Set when the channel closed mid-round after a submission; the
    /// participant still scores that round, then drops from the roster.
    departed: bool,
    /// Outbound channel. `None` for the host, which reads state directly.
    sender: Option<mpsc::UnboundedSender<ServerMessage>>,
}

impl Participant {
    fn send(&self, msg: ServerMessage) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(msg);
        }
    }

    /// Named, still-connected participants count toward round gating.
    fn is_playing(&self) -> bool {
        self.name.is_some() && !self.departed
    }
}

/// Outcome of a connection attempt.
#[derive(Debug)]
pub enum AdmitOutcome {
    Admitted(Uuid),
    /// The roster already holds `MAX_CLIENTS` clients.
    RoomFull,
    /// Late joins are unsupported once the game has started.
    GameStarted,
}

/// A round has opened; the caller arms the deadline timer.
#[derive(Debug, Clone, Copy)]
pub struct RoundStarted {
    pub index: usize,
    pub deadline: Duration,
}

/// Outcome of `advance`.
#[derive(Debug)]
pub enum AdvanceOutcome {
    NextRound(RoundStarted),
    Finished,
}

/// A scored round, kept for the host's results screen.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub correct_answer: f64,
    pub unit: String,
    pub results: Vec<RoundResultEntry>,
    pub round_index: usize,
    pub is_last_round: bool,
}

/// Authoritative session state, exclusively owned by the host.
pub struct Session {
    code: String,
    phase: Phase,
    /// Host first, then clients in join order. This order is the tie order
    /// for every results sort.
    roster: Vec<Participant>,
    pool: Vec<Question>,
    game_questions: Vec<Question>,
    round: Option<Round>,
    round_deadline_at: Option<Instant>,
    deadline_timer: Option<JoinHandle<()>>,
    last_outcome: Option<RoundOutcome>,
    host_id: Uuid,
}

impl Session {
    /// Create a session for a freshly claimed room code.
    pub fn new(code: String, pool: Vec<Question>) -> Self {
        let host_id = Uuid::new_v4();
        let host = Participant {
            id: host_id,
            name: None,
            score: 0,
            is_host: true,
            departed: false,
            sender: None,
        };
        Self {
            code,
            phase: Phase::Lobby,
            roster: vec![host],
            pool,
            game_questions: Vec::new(),
            round: None,
            round_deadline_at: None,
            deadline_timer: None,
            last_outcome: None,
            host_id,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn host_id(&self) -> Uuid {
        self.host_id
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// When the current round's deadline fires, for countdown display.
    pub fn round_deadline_at(&self) -> Option<Instant> {
        self.round_deadline_at
    }

    /// The most recently scored round.
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn total_rounds(&self) -> usize {
        self.game_questions.len()
    }

    fn client_count(&self) -> usize {
        self.roster.iter().filter(|p| !p.is_host).count()
    }

    /// Ids expected to submit in the current round.
    fn playing_ids(&self) -> Vec<Uuid> {
        self.roster
            .iter()
            .filter(|p| p.is_playing())
            .map(|p| p.id)
            .collect()
    }

    /// Complete roster view: named, still-connected participants.
    pub fn player_entries(&self) -> Vec<PlayerEntry> {
        self.roster
            .iter()
            .filter(|p| p.is_playing())
            .map(|p| PlayerEntry {
                id: p.id,
                name: p.name.clone().unwrap_or_default(),
                score: p.score,
                is_host: p.is_host,
            })
            .collect()
    }

    /// Final standings: cumulative score descending, roster order on ties.
    pub fn final_standings(&self) -> Vec<PlayerEntry> {
        let mut standings = self.player_entries();
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings
    }

    fn broadcast(&self, msg: ServerMessage) {
        for participant in &self.roster {
            participant.send(msg.clone());
        }
    }

    fn broadcast_player_list(&self) {
        self.broadcast(ServerMessage::PlayerList {
            players: self.player_entries(),
        });
    }

    /// Handle a new channel. Accepted channels are asked for a name; the
    /// caller notifies and closes rejected ones.
    pub fn admit(&mut self, sender: mpsc::UnboundedSender<ServerMessage>) -> AdmitOutcome {
        if self.phase != Phase::Lobby {
            return AdmitOutcome::GameStarted;
        }
        if self.client_count() >= MAX_CLIENTS {
            return AdmitOutcome::RoomFull;
        }

        let id = Uuid::new_v4();
        let participant = Participant {
            id,
            name: None,
            score: 0,
            is_host: false,
            departed: false,
            sender: Some(sender),
        };
        participant.send(ServerMessage::RequestName { id });
        self.roster.push(participant);
        info!(%id, "participant admitted");
        AdmitOutcome::Admitted(id)
    }

    /// Bind a display name, making the participant part of the playable
    /// roster.
    pub fn set_name(&mut self, id: Uuid, name: String) {
        let Some(participant) = self.roster.iter_mut().find(|p| p.id == id) else {
            return;
        };
        info!(%id, %name, "participant named");
        participant.name = Some(name);
        self.broadcast_player_list();
    }

    /// Start the game: pick this playthrough's questions, reset scores, and
    /// open round 0. The caller arms the deadline timer.
    pub fn begin_game(&mut self) -> Result<RoundStarted, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::Phase {
                reason: "game already started",
            });
        }
        if self.playing_ids().is_empty() {
            return Err(GameError::Phase {
                reason: "no named players yet",
            });
        }

        let mut questions = self.pool.clone();
        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(ROUNDS_PER_GAME);
        self.game_questions = questions;

        for participant in &mut self.roster {
            participant.score = 0;
        }
        self.last_outcome = None;

        info!(rounds = self.game_questions.len(), "game starting");
        self.broadcast(ServerMessage::GameStart {
            total_rounds: self.game_questions.len(),
        });
        Ok(self.start_round(0))
    }

    fn start_round(&mut self, index: usize) -> RoundStarted {
        // Participants who departed during the previous round are dropped
        // before the new roster snapshot is taken.
        self.roster.retain(|p| !p.departed);

        let question = self.game_questions[index].clone();
        let deadline = Duration::from_secs(ROUND_SECS);
        info!(round = index, prompt = %question.prompt, "round started");

        self.broadcast(ServerMessage::Question {
            prompt: question.prompt.clone(),
            unit: question.unit.clone(),
            round_index: index,
            total_rounds: self.game_questions.len(),
            deadline_secs: ROUND_SECS,
        });

        self.round = Some(Round::new(index, question, deadline));
        self.round_deadline_at = Some(Instant::now() + deadline);
        self.phase = Phase::InRound;
        RoundStarted { index, deadline }
    }

    /// Record a participant's guess for the current round.
    pub fn receive_answer(&mut self, id: Uuid, value: f64) {
        if self.phase != Phase::InRound {
            debug!(%id, "answer outside a round, ignored");
            return;
        }
        if !self.roster.iter().any(|p| p.id == id && p.is_playing()) {
            debug!(%id, "answer from non-playing participant, ignored");
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };

        match round.submit(id, value) {
            SubmitOutcome::Accepted => {
                debug!(%id, value, "answer recorded");
                self.broadcast(ServerMessage::AnswerStatus {
                    answered_ids: self.round.as_ref().map(Round::answered_ids).unwrap_or_default(),
                });
                self.check_all_answered();
            }
            SubmitOutcome::Duplicate => {
                debug!(%id, "duplicate answer, first submission stands");
            }
            SubmitOutcome::Closed => {
                debug!(%id, "answer after round close, ignored");
            }
        }
    }

    fn check_all_answered(&mut self) {
        let expected = self.playing_ids();
        let all_in = self
            .round
            .as_ref()
            .is_some_and(|r| !r.is_closed() && r.all_submitted(&expected));
        if all_in {
            info!("all participants answered, closing round early");
            self.close_current_round();
        }
    }

    /// The deadline timer fired for round `index`. A stale fire (round
    /// already advanced or closed) is a no-op.
    pub fn deadline_elapsed(&mut self, index: usize) {
        let current = self
            .round
            .as_ref()
            .is_some_and(|r| r.index() == index && !r.is_closed());
        if self.phase == Phase::InRound && current {
            info!(round = index, "deadline elapsed, closing round");
            self.close_current_round();
        }
    }

    fn close_current_round(&mut self) {
        self.cancel_deadline_timer();
        self.round_deadline_at = None;

        let Some(round) = self.round.as_mut() else {
            return;
        };
        if !round.close() {
            return;
        }

        let correct_answer = round.question().answer;
        let unit = round.question().unit.clone();
        let round_index = round.index();
        let guesses: Vec<(Uuid, Option<f64>)> = self
            .roster
            .iter()
            .filter(|p| p.name.is_some())
            .map(|p| (p.id, round.guess_for(p.id)))
            .collect();

        // Score every named participant in roster order, including any who
        // departed after submitting.
        let mut results = Vec::new();
        for participant in self.roster.iter_mut().filter(|p| p.name.is_some()) {
            let guess = guesses
                .iter()
                .find(|(gid, _)| *gid == participant.id)
                .and_then(|(_, g)| *g);
            let points = guess.map(|g| scoring::score(g, correct_answer)).unwrap_or(0);
            participant.score += points;
            results.push(RoundResultEntry {
                id: participant.id,
                name: participant.name.clone().unwrap_or_default(),
                guess,
                points,
                total_score: participant.score,
            });
        }
        // Stable sort: equal points keep roster order.
        results.sort_by(|a, b| b.points.cmp(&a.points));

        let is_last_round = round_index + 1 >= self.game_questions.len();
        self.broadcast(ServerMessage::RoundResults {
            correct_answer,
            unit: unit.clone(),
            results: results.clone(),
            round_index,
            total_rounds: self.game_questions.len(),
            is_last_round,
        });
        // Clients rebuild their roster view with the new totals.
        self.broadcast_player_list();

        self.last_outcome = Some(RoundOutcome {
            correct_answer,
            unit,
            results,
            round_index,
            is_last_round,
        });
        self.phase = Phase::RoundResults;
        info!(round = round_index, "round scored");
    }

    /// Move on from a results screen: next round, or final standings.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, GameError> {
        if self.phase != Phase::RoundResults {
            return Err(GameError::Phase {
                reason: "no round results to advance from",
            });
        }
        let next = self.round.as_ref().map(|r| r.index() + 1).unwrap_or(0);
        if next < self.game_questions.len() {
            Ok(AdvanceOutcome::NextRound(self.start_round(next)))
        } else {
            self.roster.retain(|p| !p.departed);
            self.phase = Phase::Finished;
            info!("game over");
            self.broadcast(ServerMessage::GameOver {
                standings: self.final_standings(),
            });
            Ok(AdvanceOutcome::Finished)
        }
    }

    /// A channel closed. Already-scored rounds are untouched; an in-flight
    /// round keeps the participant's submission (if any) and stops waiting
    /// for them otherwise.
    pub fn participant_left(&mut self, id: Uuid) {
        let submitted_this_round = self.phase == Phase::InRound
            && self
                .round
                .as_ref()
                .is_some_and(|r| !r.is_closed() && r.has_submitted(id));

        if submitted_this_round {
            if let Some(participant) = self.roster.iter_mut().find(|p| p.id == id) {
                info!(%id, "participant left mid-round after submitting");
                participant.departed = true;
                participant.sender = None;
            }
        } else {
            info!(%id, "participant left");
            self.roster.retain(|p| p.id != id);
        }

        self.broadcast_player_list();
        if self.phase == Phase::InRound {
            self.check_all_answered();
        }
    }

    /// Store the deadline timer for the round just started.
    pub fn set_deadline_timer(&mut self, handle: JoinHandle<()>) {
        self.deadline_timer = Some(handle);
    }

    fn cancel_deadline_timer(&mut self) {
        // take() guarantees the timer is aborted at most once.
        if let Some(handle) = self.deadline_timer.take() {
            handle.abort();
        }
    }

    /// Whether a deadline timer is armed, for the host UI.
    pub fn deadline_timer_armed(&self) -> bool {
        self.deadline_timer.is_some()
    }
}
