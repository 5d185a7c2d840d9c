//! Game orchestrator: one session of human-versus-random-opponent chess.
//! Owns the rules game, the board render model, and the capture trays, and
//! advances a small state machine on every UI event. Completely widget-free
//! so the whole flow is testable without a window.

use tracing::{debug, info, warn};

use rules::game::Game;
use rules::types::{Kind, Move, Piece, Side, Square};

use crate::ai;
use crate::board::{BoardMap, Marker};

/// The human always plays Light and moves first.
const HUMAN: Side = Side::Light;

/// What the application shell must do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Schedule a delayed opponent reply carrying this generation.
    ScheduleReply(u64),
}

#[derive(Debug, Clone)]
pub enum SessionState {
    /// Human's turn, nothing selected.
    Idle,
    /// Human's turn with an own piece selected and its fresh legal moves.
    PieceSelected { from: Square, moves: Vec<Move> },
    /// A promoting move is pending until a kind is chosen or dismissed.
    AwaitingPromotion { from: Square, to: Square },
    /// The automated side is to move; a reply timer is in flight.
    OpponentThinking,
    /// The game ended. Only a new game leaves this state.
    Terminal,
}

pub struct Session {
    game: Game,
    board: BoardMap,
    state: SessionState,
    lost_light: Vec<Piece>,
    lost_dark: Vec<Piece>,
    last_move: Option<(Square, Square)>,
    generation: u64,
}

impl Session {
    pub fn new() -> Session {
        let (session, _) = Session::with_game(Game::new());
        session
    }

    /// Starts a session over an arbitrary game, picking the matching state.
    /// When the automated side is already to move, the returned effect
    /// schedules its reply; a timer must be in flight whenever the state is
    /// [`SessionState::OpponentThinking`].
    pub fn with_game(game: Game) -> (Session, Effect) {
        let state = if game.is_game_over() {
            SessionState::Terminal
        } else if game.turn() == HUMAN {
            SessionState::Idle
        } else {
            SessionState::OpponentThinking
        };
        let session = Session {
            game,
            board: BoardMap::new(),
            state,
            lost_light: Vec::new(),
            lost_dark: Vec::new(),
            last_move: None,
            generation: 0,
        };
        let effect = match session.state {
            SessionState::OpponentThinking => Effect::ScheduleReply(session.generation),
            _ => Effect::None,
        };
        (session, effect)
    }

    // --- Accessors for the view and tests ---

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Pieces of `side` that have been captured, in capture order.
    pub fn lost_pieces(&self, side: Side) -> &[Piece] {
        match side {
            Side::Light => &self.lost_light,
            Side::Dark => &self.lost_dark,
        }
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // --- Event entry points ---

    /// A board square was clicked.
    pub fn click(&mut self, square: Square) -> Effect {
        match &self.state {
            SessionState::Terminal | SessionState::OpponentThinking => {
                debug!(%square, "click ignored");
                Effect::None
            }
            SessionState::AwaitingPromotion { .. } => {
                // Clicking anywhere outside the choice panel abandons the
                // pending move.
                debug!(%square, "promotion dismissed");
                self.deselect();
                Effect::None
            }
            SessionState::Idle => {
                if self.own_piece_at(square) {
                    self.select(square);
                }
                Effect::None
            }
            SessionState::PieceSelected { from, moves } => {
                let (from, moves) = (*from, moves.clone());
                if square == from {
                    self.deselect();
                    return Effect::None;
                }
                if self.own_piece_at(square) {
                    self.select(square);
                    return Effect::None;
                }
                if let Some(chosen) = moves.iter().find(|m| m.to == square) {
                    if chosen.is_promotion() {
                        self.state = SessionState::AwaitingPromotion { from, to: square };
                        return Effect::None;
                    }
                    return self.execute(from, square, None);
                }
                self.deselect();
                Effect::None
            }
        }
    }

    /// A kind was picked from the promotion panel.
    pub fn choose_promotion(&mut self, kind: Kind) -> Effect {
        let (from, to) = match self.state {
            SessionState::AwaitingPromotion { from, to } => (from, to),
            _ => {
                debug!(?kind, "promotion choice ignored");
                return Effect::None;
            }
        };
        self.execute(from, to, Some(kind))
    }

    /// The delayed reply timer fired. Replies scheduled for an earlier
    /// generation, or arriving in any other state, are dropped: the game
    /// they belonged to was reset or has ended.
    pub fn opponent_reply(&mut self, generation: u64) -> Effect {
        if generation != self.generation || !matches!(self.state, SessionState::OpponentThinking) {
            debug!(generation, "stale opponent reply dropped");
            return Effect::None;
        }
        let moves = self.game.legal_moves();
        let Some(chosen) = ai::pick(&moves) else {
            warn!("opponent has no legal move outside a terminal state");
            return Effect::None;
        };
        self.execute(chosen.from, chosen.to, chosen.promotion)
    }

    /// Resets everything. Any reply timer still in flight becomes stale.
    pub fn new_game(&mut self) -> Effect {
        self.game = Game::new();
        self.board = BoardMap::new();
        self.lost_light.clear();
        self.lost_dark.clear();
        self.last_move = None;
        self.state = SessionState::Idle;
        self.generation += 1;
        info!(generation = self.generation, "new game");
        Effect::None
    }

    // --- Internals ---

    fn own_piece_at(&self, square: Square) -> bool {
        matches!(self.game.piece_at(square), Some(p) if p.side == HUMAN)
    }

    fn select(&mut self, square: Square) {
        let moves = self.game.legal_moves_from(square);
        self.board.clear_selection_only();
        self.board.highlight(square, Marker::Selected);
        for m in &moves {
            let marker = if m.is_capture() {
                Marker::ReachableCapture
            } else {
                Marker::ReachableQuiet
            };
            self.board.highlight(m.to, marker);
        }
        debug!(%square, targets = moves.len(), "piece selected");
        self.state = SessionState::PieceSelected { from: square, moves };
    }

    fn deselect(&mut self) {
        self.board.clear_selection_only();
        self.state = SessionState::Idle;
    }

    fn execute(&mut self, from: Square, to: Square, promotion: Option<Kind>) -> Effect {
        let Some(record) = self.game.play(from, to, promotion) else {
            debug!(%from, %to, "move rejected by the rules engine");
            self.deselect();
            return Effect::None;
        };

        if let Some(kind) = record.captured {
            let side = record.side.opponent();
            let pool = match side {
                Side::Light => &mut self.lost_light,
                Side::Dark => &mut self.lost_dark,
            };
            pool.push(Piece { kind, side });
        }

        self.board.clear_all();
        self.board.highlight(from, Marker::LastMove);
        self.board.highlight(to, Marker::LastMove);
        self.last_move = Some((from, to));
        debug!(%from, %to, side = record.side.label(), "move executed");

        if self.game.is_game_over() {
            info!(
                checkmate = self.game.is_checkmate(),
                stalemate = self.game.is_stalemate(),
                "game over"
            );
            self.state = SessionState::Terminal;
            return Effect::None;
        }
        if self.game.turn() != HUMAN {
            self.state = SessionState::OpponentThinking;
            return Effect::ScheduleReply(self.generation);
        }
        self.state = SessionState::Idle;
        Effect::None
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn session_from(fen: &str) -> Session {
        let (session, _) = Session::with_game(Game::from_fen(fen).unwrap());
        session
    }

    fn assert_no_selection_markers(session: &Session) {
        for (square, cell) in session.board().iter() {
            assert!(!cell.has(Marker::Selected), "selected marker left on {square}");
            assert!(!cell.has(Marker::ReachableQuiet), "quiet marker left on {square}");
            assert!(!cell.has(Marker::ReachableCapture), "capture marker left on {square}");
        }
    }

    #[test]
    fn test_click_on_empty_square_stays_idle() {
        let mut session = Session::new();
        assert_eq!(session.click(sq("e4")), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_no_selection_markers(&session);
    }

    #[test]
    fn test_click_on_opponent_piece_stays_idle() {
        let mut session = Session::new();
        session.click(sq("e7"));
        assert!(matches!(session.state(), SessionState::Idle));
        assert_no_selection_markers(&session);
    }

    #[test]
    fn test_selecting_own_piece_marks_targets() {
        let mut session = Session::new();
        session.click(sq("e2"));

        match session.state() {
            SessionState::PieceSelected { from, moves } => {
                assert_eq!(*from, sq("e2"));
                assert_eq!(moves.len(), 2);
            }
            other => panic!("unexpected state {other:?}"),
        }
        assert!(session.board().cell(sq("e2")).has(Marker::Selected));
        assert!(session.board().cell(sq("e3")).has(Marker::ReachableQuiet));
        assert!(session.board().cell(sq("e4")).has(Marker::ReachableQuiet));
    }

    #[test]
    fn test_clicking_selected_square_deselects() {
        let mut session = Session::new();
        session.click(sq("e2"));
        session.click(sq("e2"));
        assert!(matches!(session.state(), SessionState::Idle));
        assert_no_selection_markers(&session);
    }

    #[test]
    fn test_clicking_other_own_piece_reselects() {
        let mut session = Session::new();
        session.click(sq("e2"));
        session.click(sq("g1"));

        match session.state() {
            SessionState::PieceSelected { from, .. } => assert_eq!(*from, sq("g1")),
            other => panic!("unexpected state {other:?}"),
        }
        assert!(session.board().cell(sq("g1")).has(Marker::Selected));
        assert!(!session.board().cell(sq("e2")).has(Marker::Selected));
    }

    #[test]
    fn test_clicking_unreachable_square_deselects() {
        let mut session = Session::new();
        session.click(sq("e2"));
        assert_eq!(session.click(sq("h5")), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_no_selection_markers(&session);
    }

    // A piece that cannot move still selects, with zero reachable markers.
    #[test]
    fn test_blocked_piece_selects_without_targets() {
        let mut session = session_from("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        session.click(sq("e4"));

        match session.state() {
            SessionState::PieceSelected { moves, .. } => assert!(moves.is_empty()),
            other => panic!("unexpected state {other:?}"),
        }
        assert!(session.board().cell(sq("e4")).has(Marker::Selected));
        for (_, cell) in session.board().iter() {
            assert!(!cell.has(Marker::ReachableQuiet));
            assert!(!cell.has(Marker::ReachableCapture));
        }
    }

    #[test]
    fn test_opening_move_schedules_reply_and_marks_last_move() {
        let mut session = Session::new();
        session.click(sq("e2"));
        let effect = session.click(sq("e4"));

        assert_eq!(effect, Effect::ScheduleReply(session.generation()));
        assert!(matches!(session.state(), SessionState::OpponentThinking));
        assert_eq!(session.last_move(), Some((sq("e2"), sq("e4"))));
        assert!(session.board().cell(sq("e2")).has(Marker::LastMove));
        assert!(session.board().cell(sq("e4")).has(Marker::LastMove));
        assert_no_selection_markers(&session);
        assert_eq!(session.game().piece_at(sq("e2")), None);
        assert_eq!(
            session.game().piece_at(sq("e4")),
            Some(Piece { kind: Kind::Pawn, side: Side::Light })
        );
    }

    #[test]
    fn test_clicks_are_ignored_while_opponent_thinks() {
        let mut session = Session::new();
        session.click(sq("e2"));
        session.click(sq("e4"));
        session.click(sq("d2"));
        assert!(matches!(session.state(), SessionState::OpponentThinking));
        assert_no_selection_markers(&session);
    }

    #[test]
    fn test_opponent_reply_executes_some_legal_move() {
        let mut session = Session::new();
        session.click(sq("e2"));
        session.click(sq("e4"));

        let effect = session.opponent_reply(session.generation());
        assert_eq!(effect, Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().turn(), Side::Light);

        // The reply came from the far side of the board.
        let (from, to) = session.last_move().unwrap();
        assert!(from.rank() >= 6);
        assert!(session.board().cell(from).has(Marker::LastMove));
        assert!(session.board().cell(to).has(Marker::LastMove));
    }

    #[test]
    fn test_stale_reply_after_new_game_is_dropped() {
        let mut session = Session::new();
        session.click(sq("e2"));
        let effect = session.click(sq("e4"));
        let scheduled = match effect {
            Effect::ScheduleReply(generation) => generation,
            other => panic!("unexpected effect {other:?}"),
        };

        session.new_game();
        assert_eq!(session.opponent_reply(scheduled), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().turn(), Side::Light);
        assert_eq!(session.game().legal_moves().len(), 20);
    }

    #[test]
    fn test_reply_in_wrong_state_is_dropped() {
        let mut session = Session::new();
        assert_eq!(session.opponent_reply(session.generation()), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().turn(), Side::Light);
    }

    #[test]
    fn test_session_started_on_the_opponents_turn_schedules_the_reply() {
        let (mut session, effect) =
            Session::with_game(Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1").unwrap());

        assert!(matches!(session.state(), SessionState::OpponentThinking));
        assert_eq!(effect, Effect::ScheduleReply(session.generation()));

        session.opponent_reply(session.generation());
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().turn(), Side::Light);
        let (from, _) = session.last_move().unwrap();
        assert_eq!(from, sq("e8"));
    }

    #[test]
    fn test_capture_lands_in_the_tray() {
        let mut session = session_from("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
        session.click(sq("e4"));
        assert!(session.board().cell(sq("d5")).has(Marker::ReachableCapture));

        session.click(sq("d5"));
        assert_eq!(
            session.lost_pieces(Side::Dark),
            &[Piece { kind: Kind::Pawn, side: Side::Dark }]
        );
        assert!(session.lost_pieces(Side::Light).is_empty());
        assert!(matches!(session.state(), SessionState::OpponentThinking));
    }

    #[test]
    fn test_captures_append_in_capture_order() {
        let mut session = session_from("1n4rk/7p/8/8/8/8/Q7/1R5K w - - 0 1");
        session.click(sq("a2"));
        let effect = session.click(sq("g8"));
        let scheduled = match effect {
            Effect::ScheduleReply(generation) => generation,
            other => panic!("unexpected effect {other:?}"),
        };

        // Only Kxg8 answers the check, so the reply recaptures the queen.
        session.opponent_reply(scheduled);
        session.click(sq("b1"));
        session.click(sq("b8"));

        assert_eq!(
            session.lost_pieces(Side::Dark),
            &[
                Piece { kind: Kind::Rook, side: Side::Dark },
                Piece { kind: Kind::Knight, side: Side::Dark },
            ]
        );
        assert_eq!(
            session.lost_pieces(Side::Light),
            &[Piece { kind: Kind::Queen, side: Side::Light }]
        );
    }

    #[test]
    fn test_promotion_goes_through_the_choice_state() {
        let mut session = session_from("8/P7/8/8/8/8/8/k6K w - - 0 1");
        session.click(sq("a7"));
        session.click(sq("a8"));

        // No move has been executed yet.
        assert!(matches!(
            session.state(),
            SessionState::AwaitingPromotion { .. }
        ));
        assert_eq!(
            session.game().piece_at(sq("a7")),
            Some(Piece { kind: Kind::Pawn, side: Side::Light })
        );
        assert_eq!(session.game().piece_at(sq("a8")), None);

        let effect = session.choose_promotion(Kind::Queen);
        assert_eq!(
            session.game().piece_at(sq("a8")),
            Some(Piece { kind: Kind::Queen, side: Side::Light })
        );
        assert_eq!(effect, Effect::ScheduleReply(session.generation()));
        assert!(matches!(session.state(), SessionState::OpponentThinking));
    }

    #[test]
    fn test_board_click_dismisses_pending_promotion() {
        let mut session = session_from("8/P7/8/8/8/8/8/k6K w - - 0 1");
        session.click(sq("a7"));
        session.click(sq("a8"));
        session.click(sq("e4"));

        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(
            session.game().piece_at(sq("a7")),
            Some(Piece { kind: Kind::Pawn, side: Side::Light })
        );
        assert_no_selection_markers(&session);

        // The pawn is selectable again afterwards.
        session.click(sq("a7"));
        assert!(matches!(session.state(), SessionState::PieceSelected { .. }));
    }

    #[test]
    fn test_promotion_choice_outside_the_state_is_ignored() {
        let mut session = Session::new();
        assert_eq!(session.choose_promotion(Kind::Queen), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().legal_moves().len(), 20);
    }

    #[test]
    fn test_checkmate_freezes_the_session() {
        let mut session = session_from("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        session.click(sq("h1"));
        let effect = session.click(sq("h8"));

        assert_eq!(effect, Effect::None);
        assert!(matches!(session.state(), SessionState::Terminal));
        assert!(session.game().is_checkmate());

        session.click(sq("b6"));
        assert!(matches!(session.state(), SessionState::Terminal));
    }

    #[test]
    fn test_new_game_mid_promotion_resets_cleanly() {
        let mut session = session_from("8/P7/8/8/8/8/8/k6K w - - 0 1");
        session.click(sq("a7"));
        session.click(sq("a8"));
        let old_generation = session.generation();

        session.new_game();
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.generation(), old_generation + 1);
        assert_eq!(session.game().legal_moves().len(), 20);
        assert!(session.lost_pieces(Side::Light).is_empty());
        assert!(session.lost_pieces(Side::Dark).is_empty());
        assert_eq!(session.last_move(), None);
        assert_no_selection_markers(&session);

        // A reply scheduled before the reset stays dead.
        assert_eq!(session.opponent_reply(old_generation), Effect::None);
        assert!(matches!(session.state(), SessionState::Idle));
    }

    #[test]
    fn test_new_game_after_terminal_restarts() {
        let mut session = session_from("k7/8/1K6/8/8/8/8/7R w - - 0 1");
        session.click(sq("h1"));
        session.click(sq("h8"));
        assert!(matches!(session.state(), SessionState::Terminal));

        session.new_game();
        assert!(matches!(session.state(), SessionState::Idle));
        assert_eq!(session.game().legal_moves().len(), 20);
        assert_eq!(session.last_move(), None);
    }
}
