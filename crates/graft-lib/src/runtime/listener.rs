use super::exception::RecognitionException;
use super::token::Token;

/// Receives every syntax error the parser reports.
///
/// `e` is the causing exception, absent for errors found during inline
/// recovery (extraneous and missing tokens).
pub trait ErrorListener {
    fn syntax_error(
        &mut self,
        offending: &Token,
        line: u32,
        column: u32,
        msg: &str,
        e: Option<&RecognitionException>,
    );
}
