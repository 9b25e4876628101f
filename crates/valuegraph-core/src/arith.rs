//! Arithmetic evaluation of fully-substituted expression text.
//!
//! A small recursive-descent parser over the documented grammar: f64
//! literals, parentheses, unary minus, and `+ - * /` with conventional
//! precedence and left associativity. The evaluator never delegates to a
//! general-purpose interpreter and never lets NaN or infinity escape --
//! division by zero and non-finite results are reported as
//! [`EvalError::MalformedExpression`].

use crate::error::EvalError;

/// Evaluates an expression string to a finite number.
///
/// # Errors
///
/// Returns [`EvalError::MalformedExpression`] on syntax errors, trailing
/// input, division by zero, or a non-finite result.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let mut parser = Parser::new(expression);
    let value = parser.expr()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(malformed(format!(
            "unexpected trailing input at byte {}",
            parser.pos
        )));
    }
    if !value.is_finite() {
        return Err(malformed("non-finite result"));
    }
    Ok(value)
}

fn malformed(detail: impl Into<String>) -> EvalError {
    EvalError::MalformedExpression {
        detail: detail.into(),
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser { src, pos: 0 }
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'+') => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Some(b'-') => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    /// term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, EvalError> {
        let mut acc = self.factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b'*') => {
                    self.pos += 1;
                    acc *= self.factor()?;
                }
                Some(b'/') => {
                    self.pos += 1;
                    let rhs = self.factor()?;
                    if rhs == 0.0 {
                        return Err(malformed("division by zero"));
                    }
                    acc /= rhs;
                }
                _ => return Ok(acc),
            }
        }
    }

    /// factor := '-' factor | '(' expr ')' | number
    fn factor(&mut self) -> Result<f64, EvalError> {
        self.skip_ws();
        match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(b'(') => {
                self.pos += 1;
                let inner = self.expr()?;
                self.skip_ws();
                if self.peek() != Some(b')') {
                    return Err(malformed(format!(
                        "expected ')' at byte {}",
                        self.pos
                    )));
                }
                self.pos += 1;
                Ok(inner)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(b) => Err(malformed(format!(
                "unexpected character '{}' at byte {}",
                b as char, self.pos
            ))),
            None => Err(malformed("unexpected end of expression")),
        }
    }

    /// number := digits ['.' digits] [('e'|'E') ['+'|'-'] digits]
    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        let text = &self.src[start..self.pos];
        text.parse::<f64>()
            .map_err(|_| malformed(format!("invalid number '{}'", text)))
    }
}
