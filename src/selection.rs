// src/selection.rs
//! Menu input: a 1-based item number, `all`, or `q`.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    All,
    /// Zero-based index into pages followed by databases.
    Item(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a number between 1 and {total}")]
    OutOfRange { total: usize },

    #[error("Please enter a valid number, 'all', or 'q' to quit")]
    NotANumber,
}

/// Interprets one line of menu input against `total` listed items.
pub fn parse_selection(input: &str, total: usize) -> Result<Selection, SelectionError> {
    let choice = input.trim();

    if choice.eq_ignore_ascii_case("q") {
        return Ok(Selection::Quit);
    }
    if choice.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    let number: i64 = choice.parse().map_err(|_| SelectionError::NotANumber)?;
    if number >= 1 && (number as usize) <= total {
        Ok(Selection::Item(number as usize - 1))
    } else {
        Err(SelectionError::OutOfRange { total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case_and_whitespace() {
        assert_eq!(parse_selection(" Q ", 3), Ok(Selection::Quit));
        assert_eq!(parse_selection("ALL", 3), Ok(Selection::All));
    }

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_selection("1", 3), Ok(Selection::Item(0)));
        assert_eq!(parse_selection("3", 3), Ok(Selection::Item(2)));
    }

    #[test]
    fn out_of_range_numbers_name_the_bounds() {
        for input in ["0", "4", "-2"] {
            let err = parse_selection(input, 3).unwrap_err();
            assert_eq!(err.to_string(), "Please enter a number between 1 and 3");
        }
    }

    #[test]
    fn anything_else_is_rejected() {
        for input in ["", "two", "1.5"] {
            assert_eq!(
                parse_selection(input, 3),
                Err(SelectionError::NotANumber)
            );
        }
        assert_eq!(
            SelectionError::NotANumber.to_string(),
            "Please enter a valid number, 'all', or 'q' to quit"
        );
    }
}
