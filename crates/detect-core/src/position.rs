//! Position encoding: recognized board state to canonical FEN records.

use shakmaty::fen::Fen;
use shakmaty::{Board, CastlingMode, Chess, Color, Setup};

/// A board as the recognizer saw it: piece placement plus whose turn it
/// is. Castling rights, the en-passant square and the move counters are
/// not observable from a photograph and stay at their empty defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedBoard {
    board: Board,
    turn: Color,
}

impl ObservedBoard {
    pub fn new(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    fn setup(&self) -> Setup {
        let mut setup = Setup::empty();
        setup.board = self.board.clone();
        setup.turn = self.turn;
        setup
    }

    /// Piece-placement segment only (the first FEN field).
    pub fn board_fen(&self) -> String {
        self.board.board_fen().to_string()
    }

    /// Full FEN: placement, side to move, and the default remaining
    /// fields (`- - 0 1`). Always starts with [`Self::board_fen`].
    pub fn fen(&self) -> String {
        // Infallible: the setup carries no castling rights and no
        // en-passant square, so there is nothing for Fen to reject.
        Fen::try_from_setup(self.setup())
            .map(|fen| fen.to_string())
            .unwrap_or_default()
    }

    /// Whether the placement is a structurally valid chess position:
    /// exactly one king per side, no pawns on the back ranks, the side
    /// not to move is not in check, and so on.
    pub fn is_valid(&self) -> bool {
        Fen::try_from_setup(self.setup())
            .map(|fen| fen.into_position::<Chess>(CastlingMode::Standard).is_ok())
            .unwrap_or(false)
    }
}

/// Canonical position record derived from one recognized board.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub fen: String,
    pub board_fen: String,
    pub is_valid: bool,
}

/// Derive the position record. Pure: the same board always yields the
/// same record, and no legality fixes are invented along the way.
pub fn encode(board: &ObservedBoard) -> PositionRecord {
    PositionRecord {
        fen: board.fen(),
        board_fen: board.board_fen(),
        is_valid: board.is_valid(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_BOARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    fn board_from(board_fen: &str) -> Board {
        let fen: Fen = format!("{board_fen} w - - 0 1").parse().unwrap();
        fen.into_setup().board
    }

    #[test]
    fn test_start_position_record() {
        let observed = ObservedBoard::new(Board::default(), Color::White);
        let record = encode(&observed);

        assert_eq!(record.board_fen, START_BOARD_FEN);
        assert_eq!(record.fen, format!("{START_BOARD_FEN} w - - 0 1"));
        assert!(record.is_valid);
    }

    #[test]
    fn test_fen_embeds_board_fen_and_turn() {
        let observed = ObservedBoard::new(Board::default(), Color::Black);
        let record = encode(&observed);

        assert!(record.fen.starts_with(&record.board_fen));
        assert!(record.fen.contains(" b "));
    }

    #[test]
    fn test_two_kings_is_invalid_but_still_encodes() {
        let board = board_from("rnbqkbnr/pppppppp/8/8/4K3/8/PPPPPPPP/RNBQKBNR");
        let record = encode(&ObservedBoard::new(board, Color::White));

        assert!(!record.is_valid);
        assert_eq!(
            record.board_fen,
            "rnbqkbnr/pppppppp/8/8/4K3/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_pawn_on_back_rank_is_invalid() {
        let board = board_from("P3k3/8/8/8/8/8/8/4K3");
        assert!(!ObservedBoard::new(board, Color::White).is_valid());
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let observed = ObservedBoard::new(Board::default(), Color::White);
        assert_eq!(encode(&observed), encode(&observed));
    }
}
