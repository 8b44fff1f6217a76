use std::io::{self, Write};

use sweeper_core::{CellState, Game, GameState};

pub fn symbol(state: CellState) -> char {
    match state {
        CellState::Hidden => '#',
        CellState::Revealed(0) => '.',
        CellState::Revealed(count) => char::from(b'0' + count),
        CellState::Bomb => '*',
        CellState::OutOfBounds => ' ',
    }
}

/// Prints the board with column and row numbers, followed by a status line.
pub fn board(out: &mut impl Write, game: &Game) -> io::Result<()> {
    let snapshot = game.snapshot();

    write!(out, "   ")?;
    for x in 0..game.width() {
        write!(out, "{:>3}", x)?;
    }
    writeln!(out)?;

    for (y, row) in snapshot.rows().into_iter().enumerate() {
        write!(out, "{:>3}", y)?;
        for &state in row {
            write!(out, "{:>3}", symbol(state))?;
        }
        writeln!(out)?;
    }

    let status = match game.state() {
        GameState::Active => "playing",
        GameState::Won => "won",
        GameState::Lost => "lost",
    };
    writeln!(
        out,
        "lives {}/{}  safe cells left {}  {}",
        game.lives_remaining(),
        game.max_lives(),
        game.safe_cells_remaining(),
        status
    )
}

#[cfg(test)]
mod tests {
    use sweeper_core::Settings;

    use super::*;

    #[test]
    fn symbols_cover_every_state() {
        assert_eq!(symbol(CellState::Hidden), '#');
        assert_eq!(symbol(CellState::Revealed(0)), '.');
        assert_eq!(symbol(CellState::Revealed(3)), '3');
        assert_eq!(symbol(CellState::Revealed(8)), '8');
        assert_eq!(symbol(CellState::Bomb), '*');
    }

    #[test]
    fn board_prints_rows_and_status() {
        let mut game = Game::from_layout(Settings::new(3, 3, 0.0, 2), &[(2, 2)]).unwrap();
        game.reveal_cell(0, 0);

        let mut out = Vec::new();
        board(&mut out, &game).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "     0  1  2");
        assert_eq!(lines[1], "  0  .  .  .");
        assert_eq!(lines[2], "  1  .  1  1");
        assert_eq!(lines[3], "  2  .  1  #");
        assert_eq!(lines[4], "lives 2/2  safe cells left 0  won");
    }
}
