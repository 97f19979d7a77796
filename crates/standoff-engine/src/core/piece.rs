use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// The kind of a chess piece.
///
/// Only the five kinds that have an attack pattern independent of colour and
/// direction of play are supported. Kinds order as king, queen, bishop, knight,
/// rook.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    #[display("king")]
    King = 0,
    #[display("queen")]
    Queen = 1,
    #[display("bishop")]
    Bishop = 2,
    #[display("knight")]
    Knight = 3,
    #[display("rook")]
    Rook = 4,
}

impl PieceKind {
    /// Number of piece kinds (5).
    pub const LEN: usize = 5;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Returns the ASCII letter used in algebraic notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use standoff_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::King.as_char(), 'K');
    /// assert_eq!(PieceKind::Knight.as_char(), 'N');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Rook => 'R',
        }
    }

    /// Returns the Unicode chess glyph (white pieces).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::King => '♔',
            PieceKind::Queen => '♕',
            PieceKind::Bishop => '♗',
            PieceKind::Knight => '♘',
            PieceKind::Rook => '♖',
        }
    }

    /// Parses a piece kind from its ASCII letter (either case) or Unicode glyph.
    ///
    /// # Examples
    ///
    /// ```
    /// use standoff_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Q'), Some(PieceKind::Queen));
    /// assert_eq!(PieceKind::from_char('♘'), Some(PieceKind::Knight));
    /// assert_eq!(PieceKind::from_char('P'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'K' | 'k' | '♔' | '♚' => Some(PieceKind::King),
            'Q' | 'q' | '♕' | '♛' => Some(PieceKind::Queen),
            'B' | 'b' | '♗' | '♝' => Some(PieceKind::Bishop),
            'N' | 'n' | '♘' | '♞' => Some(PieceKind::Knight),
            'R' | 'r' | '♖' | '♜' => Some(PieceKind::Rook),
            _ => None,
        }
    }
}

impl FromStr for PieceKind {
    type Err = InputError;

    /// Accepts a single letter or glyph, or an English name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(kind) = PieceKind::from_char(c)
        {
            return Ok(kind);
        }
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputError::InvalidPieceKind {
                symbol: s.to_owned(),
            })
    }
}

/// Parses a string of piece symbols such as `"KKR"` or `"♔♔♖"`.
///
/// Whitespace is ignored. The order of the returned sequence follows the input.
///
/// # Examples
///
/// ```
/// use standoff_engine::{PieceKind, parse_pieces};
///
/// let pieces = parse_pieces("K K ♖").unwrap();
/// assert_eq!(pieces, [PieceKind::King, PieceKind::King, PieceKind::Rook]);
/// assert!(parse_pieces("KPR").is_err());
/// ```
pub fn parse_pieces(s: &str) -> Result<Vec<PieceKind>, InputError> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            PieceKind::from_char(c).ok_or_else(|| InputError::InvalidPieceKind {
                symbol: c.to_string(),
            })
        })
        .collect()
}

/// Formats a piece sequence as a string of glyphs, e.g. `"♔♔♖"`.
#[must_use]
pub fn pieces_to_symbols(pieces: &[PieceKind]) -> String {
    pieces.iter().map(|kind| kind.symbol()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(PieceKind::from_char(kind.symbol()), Some(kind));
            assert_eq!(
                PieceKind::from_char(kind.as_char().to_ascii_lowercase()),
                Some(kind)
            );
        }
        assert_eq!(PieceKind::from_char('P'), None);
        assert_eq!(PieceKind::from_char('♙'), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("R".parse::<PieceKind>(), Ok(PieceKind::Rook));
        assert_eq!("♗".parse::<PieceKind>(), Ok(PieceKind::Bishop));
        assert_eq!("Knight".parse::<PieceKind>(), Ok(PieceKind::Knight));
        assert_eq!(" queen ".parse::<PieceKind>(), Ok(PieceKind::Queen));
        assert_eq!(
            "pawn".parse::<PieceKind>(),
            Err(InputError::InvalidPieceKind {
                symbol: "pawn".to_owned()
            })
        );
        assert!("".parse::<PieceKind>().is_err());
    }

    #[test]
    fn test_parse_pieces() {
        assert_eq!(parse_pieces(""), Ok(vec![]));
        assert_eq!(
            parse_pieces("♕nb"),
            Ok(vec![PieceKind::Queen, PieceKind::Knight, PieceKind::Bishop])
        );
        assert_eq!(
            parse_pieces("KX"),
            Err(InputError::InvalidPieceKind {
                symbol: "X".to_owned()
            })
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(pieces_to_symbols(&PieceKind::ALL), "♔♕♗♘♖");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PieceKind::Knight).unwrap();
        assert_eq!(json, "\"knight\"");
        let kind: PieceKind = serde_json::from_str("\"rook\"").unwrap();
        assert_eq!(kind, PieceKind::Rook);
    }
}
