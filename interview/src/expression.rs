//! The restricted expression language used by `show_if` conditions and computed fields.
//!
//! An expression is exactly one binary term: a variable name, an operator and a
//! literal, e.g. `age >= 18`, `name === 'Bob'` or `price * 1.2`. There are no
//! parentheses, no `&&`/`||`, no unary operators and no nesting.
//!
//! Scanning is forgiving in the same way a regular-expression search is: the
//! first identifier that is followed by an operator and a non-empty operand
//! wins, and anything before it is skipped. `(age > 5)` therefore parses as
//! `age > "5)"`, which compares against `NaN`.
//!
//! Evaluation failures are asymmetric on purpose: a condition that cannot be
//! parsed evaluates to `true` (the question stays visible), while a value that
//! cannot be parsed evaluates to null.

use std::fmt;
use std::str::FromStr;

use interview_types::{AnswerValue, Answers, format_number};

use crate::coerce::{self, Primitive};

/// Error type for expression parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// The source does not contain `<identifier> <operator> <operand>`.
    #[error("Could not parse expression: {0:?}")]
    NoOperator(String),
}

/// How the result of an expression is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// A visibility condition: parse failures yield `true`.
    Boolean,
    /// A computed value: parse failures yield null.
    Value,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    StrictEq,
    StrictNe,
    LooseEq,
    LooseNe,
    Ge,
    Le,
    Gt,
    Lt,
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Operators in matching order: longer tokens before their prefixes.
    const MATCH_ORDER: [Operator; 12] = [
        Self::StrictEq,
        Self::StrictNe,
        Self::Ge,
        Self::Le,
        Self::LooseEq,
        Self::LooseNe,
        Self::Gt,
        Self::Lt,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
    ];

    /// The source token of this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::StrictEq => "===",
            Self::StrictNe => "!==",
            Self::LooseEq => "==",
            Self::LooseNe => "!=",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The right-hand operand of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
    /// A bare identifier: the value of that answer if it exists, else the text itself.
    Name(String),
}

impl Literal {
    /// Interpret an operand token.
    ///
    /// `true`/`false` are booleans, quoted text is a string with the quotes
    /// stripped, numeric text is a number, an identifier is a [`Literal::Name`]
    /// and anything else is the raw text.
    pub fn parse(token: &str) -> Self {
        let trimmed = coerce::trim(token);
        match trimmed {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        let is_quote = |c: char| c == '\'' || c == '"';
        let mut chars = trimmed.chars();
        if let (Some(first), Some(last)) = (chars.next(), chars.next_back())
            && is_quote(first)
            && is_quote(last)
        {
            return Self::String(trimmed[1..trimmed.len() - 1].to_string());
        }

        let number = coerce::string_to_number(trimmed);
        if !number.is_nan() {
            Self::Number(number)
        } else if is_identifier(trimmed) {
            Self::Name(trimmed.to_string())
        } else {
            Self::String(trimmed.to_string())
        }
    }

    fn to_primitive(&self, answers: &Answers) -> Primitive {
        match self {
            Self::Bool(b) => Primitive::Bool(*b),
            Self::Number(n) => Primitive::Number(*n),
            Self::String(s) => Primitive::String(s.clone()),
            Self::Name(name) => match answers.get(name) {
                Some(value) => Primitive::from_answer(Some(value)),
                None => Primitive::String(name.clone()),
            },
        }
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => write!(f, "'{s}'"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A parsed single-operator expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    variable: String,
    operator: Operator,
    operand: Literal,
}

impl Expression {
    /// Parse an expression.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        let bytes = source.as_bytes();
        let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';

        let mut pos = 0;
        while pos < bytes.len() {
            if !is_word(bytes[pos]) {
                pos += 1;
                continue;
            }
            let start = pos;
            while pos < bytes.len() && is_word(bytes[pos]) {
                pos += 1;
            }
            if let Some((operator, operand)) = scan_tail(&source[pos..]) {
                return Ok(Self {
                    variable: source[start..pos].to_string(),
                    operator,
                    operand: Literal::parse(operand),
                });
            }
        }

        Err(ExpressionError::NoOperator(source.to_string()))
    }

    /// The variable read from the answer map.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The literal operand.
    pub fn operand(&self) -> &Literal {
        &self.operand
    }

    /// Evaluate against the answer map. Missing variables are undefined.
    ///
    /// A bare identifier on the right reads the answer of that name when one
    /// exists, so `total = a + b` adds two answers; otherwise it is plain text.
    ///
    /// Comparison operators return a boolean, arithmetic operators a number.
    /// Ordering and arithmetic coerce both sides to numbers; comparisons
    /// involving `NaN` are false and arithmetic propagates it.
    pub fn evaluate(&self, answers: &Answers) -> AnswerValue {
        let current = answers.get(&self.variable);
        let left = Primitive::from_answer(current);
        let right = self.operand.to_primitive(answers);

        match self.operator {
            Operator::StrictEq => AnswerValue::Bool(coerce::strict_equals(current, &right)),
            Operator::StrictNe => AnswerValue::Bool(!coerce::strict_equals(current, &right)),
            Operator::LooseEq => AnswerValue::Bool(coerce::loose_equals(&left, &right)),
            Operator::LooseNe => AnswerValue::Bool(!coerce::loose_equals(&left, &right)),
            op => {
                let (l, r) = (left.to_number(), right.to_number());
                match op {
                    Operator::Gt => AnswerValue::Bool(l > r),
                    Operator::Lt => AnswerValue::Bool(l < r),
                    Operator::Ge => AnswerValue::Bool(l >= r),
                    Operator::Le => AnswerValue::Bool(l <= r),
                    Operator::Add => AnswerValue::Number(l + r),
                    Operator::Sub => AnswerValue::Number(l - r),
                    Operator::Mul => AnswerValue::Number(l * r),
                    _ => AnswerValue::Number(l / r),
                }
            }
        }
    }
}

/// Match `\s* <operator> \s* <operand>` at the start of `tail`.
///
/// Operators are tried in [`Operator::MATCH_ORDER`]; an operator only matches
/// if a non-empty operand follows it on the same line.
fn scan_tail(tail: &str) -> Option<(Operator, &str)> {
    let rest = tail.trim_start_matches(coerce::is_space);
    Operator::MATCH_ORDER.iter().find_map(|op| {
        rest.strip_prefix(op.symbol())
            .and_then(operand_text)
            .map(|operand| (*op, operand))
    })
}

/// The operand is everything up to the end of the line. Leading whitespace is
/// skipped, unless that would leave nothing, in which case the whitespace
/// itself is the operand.
fn operand_text(after_operator: &str) -> Option<&str> {
    let mut starts: Vec<usize> = after_operator
        .char_indices()
        .take_while(|(_, c)| coerce::is_space(*c))
        .map(|(i, _)| i)
        .collect();
    let skipped = after_operator.len() - after_operator.trim_start_matches(coerce::is_space).len();
    starts.push(skipped);

    starts.into_iter().rev().find_map(|start| {
        let line = &after_operator[start..];
        let end = line.find(coerce::is_line_terminator).unwrap_or(line.len());
        (end > 0).then(|| &line[..end])
    })
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.operator, self.operand)
    }
}

/// Parse and evaluate `expression` against `answers`.
///
/// Unparseable expressions never error: in [`EvalMode::Boolean`] they yield
/// `true` and log a warning, in [`EvalMode::Value`] they yield null.
pub fn evaluate(expression: &str, answers: &Answers, mode: EvalMode) -> AnswerValue {
    match Expression::parse(expression) {
        Ok(parsed) => parsed.evaluate(answers),
        Err(err) => match mode {
            EvalMode::Boolean => {
                log::warn!("{err}; treating condition as true");
                AnswerValue::Bool(true)
            }
            EvalMode::Value => {
                log::debug!("{err}; value is null");
                AnswerValue::Null
            }
        },
    }
}

/// Evaluate a visibility condition to a boolean (truthiness of the result).
pub fn evaluate_condition(expression: &str, answers: &Answers) -> bool {
    evaluate(expression, answers, EvalMode::Boolean).is_truthy()
}
