//! Status line derivation. A pure function of the rules game, evaluated at
//! render time; terminal conditions take priority over check, check over
//! the plain turn indicator.

use rules::game::Game;
use rules::types::Side;

/// How the status line should be colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Check,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

fn line(text: impl Into<String>, tone: Tone) -> StatusLine {
    StatusLine { text: text.into(), tone }
}

pub fn derive(game: &Game) -> StatusLine {
    let turn_name = match game.turn() {
        Side::Light => "Your",
        Side::Dark => "AI's",
    };

    if game.is_checkmate() {
        let winner = match game.turn() {
            Side::Light => "AI (Dark)",
            Side::Dark => "You (Light)",
        };
        line(format!("Checkmate! {winner} wins!"), Tone::GameOver)
    } else if game.is_stalemate() {
        line("Stalemate — Draw!", Tone::GameOver)
    } else if game.is_threefold_repetition() {
        line("Threefold repetition — Draw!", Tone::GameOver)
    } else if game.is_insufficient_material() {
        line("Insufficient material — Draw!", Tone::GameOver)
    } else if game.is_fifty_move_draw() {
        line("Draw!", Tone::GameOver)
    } else if game.is_check() {
        line(format!("{turn_name} turn — Check!"), Tone::Check)
    } else {
        line(format!("{turn_name} turn"), Tone::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::types::Square;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_turn_indicator() {
        let mut game = Game::new();
        assert_eq!(derive(&game), StatusLine { text: "Your turn".into(), tone: Tone::Normal });

        game.play(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(derive(&game), StatusLine { text: "AI's turn".into(), tone: Tone::Normal });
    }

    #[test]
    fn test_check_for_the_human() {
        let game =
            Game::from_fen("rnb1kbnr/pppp1ppp/8/4p3/4PP1q/8/PPPP2PP/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let status = derive(&game);
        assert_eq!(status.text, "Your turn — Check!");
        assert_eq!(status.tone, Tone::Check);
    }

    #[test]
    fn test_check_for_the_opponent() {
        let game = Game::from_fen("4k3/4R3/4K3/8/8/8/8/8 b - - 0 1").unwrap();
        let status = derive(&game);
        assert_eq!(status.text, "AI's turn — Check!");
        assert_eq!(status.tone, Tone::Check);
    }

    #[test]
    fn test_checkmate_announces_the_winner() {
        let mut game = Game::from_fen("k7/8/1K6/8/8/8/8/7R w - - 0 1").unwrap();
        game.play(sq("h1"), sq("h8"), None).unwrap();
        let status = derive(&game);
        assert_eq!(status.text, "Checkmate! You (Light) wins!");
        assert_eq!(status.tone, Tone::GameOver);

        let mut game = Game::new();
        game.play(sq("f2"), sq("f3"), None).unwrap();
        game.play(sq("e7"), sq("e5"), None).unwrap();
        game.play(sq("g2"), sq("g4"), None).unwrap();
        game.play(sq("d8"), sq("h4"), None).unwrap();
        assert_eq!(derive(&game).text, "Checkmate! AI (Dark) wins!");
    }

    #[test]
    fn test_draw_announcements() {
        let game = Game::from_fen("k7/8/1Q6/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(derive(&game), StatusLine { text: "Stalemate — Draw!".into(), tone: Tone::GameOver });

        let game = Game::from_fen("4k3/8/8/8/8/8/8/4KB2 w - - 0 1").unwrap();
        assert_eq!(
            derive(&game),
            StatusLine { text: "Insufficient material — Draw!".into(), tone: Tone::GameOver }
        );

        let mut game = Game::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 60").unwrap();
        game.play(sq("h1"), sq("h2"), None).unwrap();
        assert_eq!(derive(&game), StatusLine { text: "Draw!".into(), tone: Tone::GameOver });
    }

    #[test]
    fn test_threefold_announcement() {
        let mut game = Game::new();
        for _ in 0..2 {
            game.play(sq("g1"), sq("f3"), None).unwrap();
            game.play(sq("g8"), sq("f6"), None).unwrap();
            game.play(sq("f3"), sq("g1"), None).unwrap();
            game.play(sq("f6"), sq("g8"), None).unwrap();
        }
        assert_eq!(
            derive(&game),
            StatusLine { text: "Threefold repetition — Draw!".into(), tone: Tone::GameOver }
        );
    }
}
