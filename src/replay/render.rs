//! ASCII renderer for terminal viewing.

use std::fmt::Write;

use crate::field::{CellItems, Coord, FieldState, Outcome, Side, UnitKey, FIELD_HEIGHT, FIELD_WIDTH, MAX_TURN};

/// Render the field to plain ASCII.
///
/// Output format:
/// ```text
/// Turn 12/100
/// ┌───────────────────┐
/// │ # . b . * . . . # │
/// │ . . . . % . . . . │
/// ...
/// └───────────────────┘
///
/// Legend: .=Empty  #=Brick  %=Steel  *=Base  b/B=Blue 0/1  r/R=Red 0/1  @=Stacked
///
/// blue: base standing  unit 0 (2, 0)  unit 1 dead
/// red:  base standing  unit 0 (6, 8)  unit 1 (2, 8)
/// Result: in progress
/// ```
#[must_use]
pub fn render_ascii(state: &FieldState) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Turn {}/{MAX_TURN}", state.turn());

    render_board(&mut output, state);

    output.push_str(
        "\nLegend: .=Empty  #=Brick  %=Steel  *=Base  b/B=Blue 0/1  r/R=Red 0/1  @=Stacked\n\n",
    );

    for side in Side::ALL {
        render_side(&mut output, state, side);
    }

    let result = match state.outcome() {
        Outcome::NotFinished => "in progress".to_owned(),
        Outcome::Draw => "draw".to_owned(),
        Outcome::Win(side) => format!("{side} wins"),
    };
    let _ = writeln!(output, "Result: {result}");
    output
}

fn render_board(output: &mut String, state: &FieldState) {
    let inner = usize::from(FIELD_WIDTH) * 2 + 1;
    let _ = writeln!(output, "┌{}┐", "─".repeat(inner));
    for y in 0..FIELD_HEIGHT {
        output.push_str("│ ");
        for x in 0..FIELD_WIDTH {
            output.push(cell_symbol(state.board().get(Coord::new(x, y))));
            output.push(' ');
        }
        output.push_str("│\n");
    }
    let _ = writeln!(output, "└{}┘", "─".repeat(inner));
}

/// Symbol for one cell.
fn cell_symbol(items: CellItems) -> char {
    if items.has_stacked_units() {
        return '@';
    }
    if let Some(unit) = items.units().next() {
        return match (unit.side, unit.id) {
            (Side::Blue, 0) => 'b',
            (Side::Blue, _) => 'B',
            (Side::Red, 0) => 'r',
            (Side::Red, _) => 'R',
        };
    }
    if items.has_base() {
        '*'
    } else if items.has_steel() {
        '%'
    } else if items.has_brick() {
        '#'
    } else {
        '.'
    }
}

fn render_side(output: &mut String, state: &FieldState, side: Side) {
    let base = if state.base_alive(side) {
        "standing"
    } else {
        "destroyed"
    };
    let label = format!("{side}:");
    let _ = write!(output, "{label:<5} base {base}");
    for unit in UnitKey::of_side(side) {
        match state.position(unit) {
            Some(pos) => {
                let _ = write!(output, "  unit {} {pos}", unit.id);
            }
            None => {
                let _ = write!(output, "  unit {} dead", unit.id);
            }
        }
    }
    output.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_initial_field() {
        let state = FieldState::new([0; 3]);
        let output = render_ascii(&state);

        assert!(output.contains("Turn 1/100"));
        assert!(output.contains("│ . . b . * . B . . │"));
        assert!(output.contains("│ . . . . % . . . . │"));
        assert!(output.contains("│ . . R . * . r . . │"));
        assert!(output.contains("blue: base standing  unit 0 (2, 0)  unit 1 (6, 0)"));
        assert!(output.contains("Result: in progress"));
    }

    #[test]
    fn test_cell_symbols() {
        assert_eq!(cell_symbol(CellItems::empty()), '.');
        assert_eq!(cell_symbol(CellItems::BRICK), '#');
        assert_eq!(cell_symbol(CellItems::STEEL), '%');
        assert_eq!(cell_symbol(CellItems::BASE), '*');
        assert_eq!(cell_symbol(CellItems::RED1), 'R');
        assert_eq!(cell_symbol(CellItems::BLUE0 | CellItems::RED0), '@');
    }
}
