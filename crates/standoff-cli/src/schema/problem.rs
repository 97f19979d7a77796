use serde::Deserialize;
use standoff_engine::{BoardSize, InputError, PieceCounts, Problem};

/// Problem description read with `--problem`.
///
/// ```json
/// { "width": 3, "height": 3, "pieces": { "kings": 2, "rooks": 1 } }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProblemFile {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub pieces: PieceCounts,
}

impl ProblemFile {
    pub(crate) fn to_problem(&self) -> Result<Problem, InputError> {
        let board = BoardSize::new(self.width, self.height)?;
        Problem::from_counts(board, &self.pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_problem_file() {
        let json = r#"{ "width": 3, "height": 3, "pieces": { "kings": 2, "rooks": 1 } }"#;
        let file: ProblemFile = serde_json::from_str(json).unwrap();
        let problem = file.to_problem().unwrap();
        assert_eq!(problem.board().area(), 9);
        assert_eq!(problem.counts().kings, 2);
        assert_eq!(problem.counts().rooks, 1);
    }

    #[test]
    fn test_problem_file_without_pieces() {
        let file: ProblemFile = serde_json::from_str(r#"{ "width": 2, "height": 5 }"#).unwrap();
        assert!(file.to_problem().unwrap().pieces().is_empty());
    }

    #[test]
    fn test_invalid_problem_file() {
        assert!(serde_json::from_str::<ProblemFile>(r#"{ "width": 2 }"#).is_err());
        assert!(
            serde_json::from_str::<ProblemFile>(r#"{ "width": 2, "height": 2, "depth": 2 }"#)
                .is_err()
        );

        let file: ProblemFile =
            serde_json::from_str(r#"{ "width": 0, "height": 2, "pieces": { "queens": 1 } }"#)
                .unwrap();
        assert!(matches!(
            file.to_problem(),
            Err(InputError::InvalidDimensions { .. })
        ));

        let file: ProblemFile =
            serde_json::from_str(r#"{ "width": 1, "height": 2, "pieces": { "queens": 3 } }"#)
                .unwrap();
        assert!(matches!(
            file.to_problem(),
            Err(InputError::TooManyPieces { .. })
        ));
    }
}
