//! Key matrix layout for the integrated-keypad keyboard.
//!
//! The keypad and arrow keys are electrically part of the same 10×8 matrix as the
//! main key cluster, so several column bits are shared between main-cluster and
//! keypad rows; the keyboard distinguishes them by which row is being driven.
//! Keypad and arrow keys are reported to the host with an extended scan code
//! prefix, and four of the keypad operator keys are reported as if Shift were
//! held. Both of those behaviors belong to the scan-code translation layer; the
//! table here is the raw electrical layout it works from.

pub const MATRIX_ROWS: usize = 10;
pub const MATRIX_COLUMNS: usize = 8;

/// A physical key position in the matrix. Named for the U.S. key cap; variants
/// only differ in labeling on the international versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Grave,
    Minus,
    Equals,
    OpenBracket,
    CloseBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,
    Space,
    Tab,
    Return,
    Backspace,
    Left,
    Right,
    Up,
    Down,
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDecimal,
    KpEnter,
    KpClear,
    KpPlus,
    KpMinus,
    KpMultiply,
    KpDivide,
    KpEquals,
}

impl Key {
    /// Whether the keyboard reports this key as if Shift were held down.
    ///
    /// True for the keypad `=` `/` `*` `+` keys only. The matrix state itself is
    /// unaffected; the scan-code translation layer synthesizes the Shift state.
    #[must_use]
    pub fn reports_shifted(self) -> bool {
        matches!(self, Self::KpEquals | Self::KpDivide | Self::KpMultiply | Self::KpPlus)
    }
}

/// Matrix layout indexed as `MATRIX_LAYOUT[row][column]`. Rows correspond to the
/// row drive lines, columns to the column read bits; both active low. `None`
/// positions have no switch wired.
pub const MATRIX_LAYOUT: [[Option<Key>; MATRIX_COLUMNS]; MATRIX_ROWS] = [
    [
        None,
        Some(Key::KpMultiply),
        Some(Key::Kp8),
        Some(Key::P),
        Some(Key::D),
        Some(Key::W),
        Some(Key::Digit2),
        Some(Key::V),
    ],
    [
        Some(Key::Backslash),
        Some(Key::KpDivide),
        Some(Key::Kp9),
        Some(Key::OpenBracket),
        Some(Key::F),
        Some(Key::E),
        Some(Key::Digit3),
        Some(Key::B),
    ],
    [
        Some(Key::Left),
        Some(Key::KpEquals),
        Some(Key::KpMinus),
        Some(Key::CloseBracket),
        Some(Key::G),
        Some(Key::R),
        Some(Key::Digit4),
        Some(Key::N),
    ],
    [
        Some(Key::Right),
        Some(Key::KpClear),
        Some(Key::Up),
        Some(Key::Quote),
        Some(Key::H),
        Some(Key::T),
        Some(Key::Digit5),
        Some(Key::M),
    ],
    [
        Some(Key::Down),
        Some(Key::Backspace),
        Some(Key::Kp1),
        Some(Key::Return),
        Some(Key::J),
        Some(Key::Y),
        Some(Key::Digit6),
        Some(Key::Comma),
    ],
    [
        Some(Key::Kp0),
        Some(Key::Equals),
        Some(Key::Kp2),
        Some(Key::Kp4),
        Some(Key::K),
        Some(Key::U),
        Some(Key::Digit7),
        Some(Key::Period),
    ],
    [
        Some(Key::KpDecimal),
        Some(Key::Minus),
        Some(Key::Kp3),
        Some(Key::Kp5),
        Some(Key::L),
        Some(Key::I),
        Some(Key::Digit8),
        Some(Key::Slash),
    ],
    [
        Some(Key::KpEnter),
        Some(Key::Digit0),
        Some(Key::KpPlus),
        Some(Key::Kp6),
        Some(Key::Semicolon),
        Some(Key::O),
        Some(Key::Digit9),
        None,
    ],
    [
        None,
        Some(Key::Z),
        None,
        Some(Key::Space),
        Some(Key::A),
        Some(Key::Tab),
        Some(Key::Grave),
        Some(Key::X),
    ],
    [
        None,
        None,
        Some(Key::Kp7),
        None,
        Some(Key::S),
        Some(Key::Q),
        Some(Key::Digit1),
        Some(Key::C),
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_key_appears_exactly_once() {
        let mut seen = HashSet::new();
        let mut count = 0;
        for row in &MATRIX_LAYOUT {
            for key in row.iter().flatten() {
                assert!(seen.insert(*key), "{key:?} wired to two matrix positions");
                count += 1;
            }
        }
        assert_eq!(count, 73);
    }

    #[test]
    fn unused_positions_match_documented_layout() {
        let unused: Vec<(usize, usize)> = (0..MATRIX_ROWS)
            .flat_map(|row| (0..MATRIX_COLUMNS).map(move |column| (row, column)))
            .filter(|&(row, column)| MATRIX_LAYOUT[row][column].is_none())
            .collect();

        assert_eq!(unused, vec![(0, 0), (7, 7), (8, 0), (8, 2), (9, 0), (9, 1), (9, 3)]);
    }

    #[test]
    fn documented_positions_spot_check() {
        assert_eq!(MATRIX_LAYOUT[0][3], Some(Key::P));
        assert_eq!(MATRIX_LAYOUT[1][0], Some(Key::Backslash));
        assert_eq!(MATRIX_LAYOUT[4][3], Some(Key::Return));
        assert_eq!(MATRIX_LAYOUT[8][3], Some(Key::Space));
        assert_eq!(MATRIX_LAYOUT[9][2], Some(Key::Kp7));
        assert_eq!(MATRIX_LAYOUT[7][0], Some(Key::KpEnter));
    }

    #[test]
    fn keypad_and_main_cluster_share_columns() {
        // Column 1 carries keypad operators in the low rows and main-cluster keys
        // in the same bit position of other rows
        assert_eq!(MATRIX_LAYOUT[0][1], Some(Key::KpMultiply));
        assert_eq!(MATRIX_LAYOUT[5][1], Some(Key::Equals));
        assert_eq!(MATRIX_LAYOUT[6][1], Some(Key::Minus));
    }

    #[test]
    fn shift_is_synthesized_for_keypad_operators_only() {
        let shifted: Vec<Key> = MATRIX_LAYOUT
            .iter()
            .flatten()
            .flatten()
            .copied()
            .filter(|key| key.reports_shifted())
            .collect();

        assert_eq!(shifted.len(), 4);
        for key in [Key::KpEquals, Key::KpDivide, Key::KpMultiply, Key::KpPlus] {
            assert!(shifted.contains(&key));
        }
    }
}
