//! Protocol parameters `(n, n', t, t')` and their strict textual form.
//!
//! A [`Parameters`] value can only be obtained through validation, so every
//! model generator downstream may assume the invariants hold:
//!
//! - `n > t` (the threshold is strictly below the number of signers)
//! - `n >= n'` and `t >= t'`
//! - `n' >= t'`
//! - `t + t' > 0` (`combine` needs at least one argument)
//!
//! [`Parameters::structural`] relaxes `n > t` to `n >= t` for the degenerate
//! "every signer must sign" models. The protocol itself requires a strict
//! threshold, so the command line and batch sweep never use it.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors raised while parsing or validating a parameter tuple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// The text is not a parenthesised tuple of four unsigned integers.
    #[error("invalid parameters {input:?}: {reason}")]
    InvalidParameters {
        /// Text supplied by the caller.
        input: String,
        /// Why the text was rejected.
        reason: &'static str,
    },
    /// The tuple parses but violates one of the protocol invariants.
    #[error("parameters ({n},{n_consentful},{t},{t_consentful}) violate {relation}")]
    Invariant {
        /// Total signers.
        n: usize,
        /// Consentful signers.
        n_consentful: usize,
        /// Signing threshold.
        t: usize,
        /// Consentful signing threshold.
        t_consentful: usize,
        /// The relation that does not hold.
        relation: &'static str,
    },
}

/// A validated `(n, n', t, t')` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameters {
    n: usize,
    n_consentful: usize,
    t: usize,
    t_consentful: usize,
}

/// Return the first invariant broken by the tuple, if any.
const fn broken_relation(
    n: usize,
    np: usize,
    t: usize,
    tp: usize,
    strict: bool,
) -> Option<&'static str> {
    if strict && n <= t {
        Some("n > t")
    } else if n < t {
        Some("n >= t")
    } else if n < np {
        Some("n >= n'")
    } else if t < tp {
        Some("t >= t'")
    } else if np < tp {
        Some("n' >= t'")
    } else if t == 0 && tp == 0 {
        Some("t + t' > 0")
    } else {
        None
    }
}

impl Parameters {
    /// Validate and build a parameter tuple.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Invariant`] naming the first relation that does
    /// not hold.
    pub const fn new(
        n: usize,
        n_consentful: usize,
        t: usize,
        t_consentful: usize,
    ) -> Result<Self, ParamsError> {
        Self::checked(n, n_consentful, t, t_consentful, true)
    }

    /// Build a tuple that may have `n = t`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Invariant`] for every other broken relation.
    pub const fn structural(
        n: usize,
        n_consentful: usize,
        t: usize,
        t_consentful: usize,
    ) -> Result<Self, ParamsError> {
        Self::checked(n, n_consentful, t, t_consentful, false)
    }

    const fn checked(
        n: usize,
        n_consentful: usize,
        t: usize,
        t_consentful: usize,
        strict: bool,
    ) -> Result<Self, ParamsError> {
        match broken_relation(n, n_consentful, t, t_consentful, strict) {
            Some(relation) => Err(ParamsError::Invariant {
                n,
                n_consentful,
                t,
                t_consentful,
                relation,
            }),
            None => Ok(Self {
                n,
                n_consentful,
                t,
                t_consentful,
            }),
        }
    }

    /// Total number of signers.
    #[must_use]
    pub const fn n(&self) -> usize { self.n }

    /// Number of consentful signers.
    #[must_use]
    pub const fn n_consentful(&self) -> usize { self.n_consentful }

    /// Number of regular signatures required.
    #[must_use]
    pub const fn t(&self) -> usize { self.t }

    /// Number of consentful signatures required.
    #[must_use]
    pub const fn t_consentful(&self) -> usize { self.t_consentful }

    /// Arity of `combine`: one argument per partial signature.
    #[must_use]
    pub const fn combine_arity(&self) -> usize { self.t + self.t_consentful }

    /// Underscore-joined tuple, e.g. `5_2_3_1`.
    #[must_use]
    pub fn tag(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.n, self.n_consentful, self.t, self.t_consentful
        )
    }

    /// Stem shared by model files, e.g. `symbolon_5_2_3_1`.
    #[must_use]
    pub fn file_stem(&self) -> String { format!("symbolon_{}", self.tag()) }

    /// Default file name for the generated model.
    #[must_use]
    pub fn default_model_file(&self) -> String { format!("{}.pv", self.file_stem()) }

    /// Name of the verifier log written by the driver script.
    #[must_use]
    pub fn log_file_name(&self) -> String { format!("out_{}", self.tag()) }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{})",
            self.n, self.n_consentful, self.t, self.t_consentful
        )
    }
}

fn reject(input: &str, reason: &'static str) -> ParamsError {
    ParamsError::InvalidParameters {
        input: input.to_owned(),
        reason,
    }
}

fn parse_count(input: &str, field: &str) -> Result<usize, ParamsError> {
    let digits = field.trim_matches(|c: char| c.is_ascii_whitespace());
    if digits.is_empty() {
        return Err(reject(input, "empty tuple element"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(reject(input, "tuple elements must be unsigned decimal integers"));
    }
    digits
        .parse()
        .map_err(|_| reject(input, "tuple element out of range"))
}

impl FromStr for Parameters {
    type Err = ParamsError;

    /// Parse `(n,n',t,t')`. Only ASCII whitespace and decimal digits are
    /// accepted between the parentheses.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let body = input
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| reject(input, "expected a parenthesised tuple"))?;

        let fields: Vec<&str> = body.split(',').collect();
        let [n, np, t, tp] = fields.as_slice() else {
            return Err(reject(input, "expected exactly four elements"));
        };
        Self::new(
            parse_count(input, n)?,
            parse_count(input, np)?,
            parse_count(input, t)?,
            parse_count(input, tp)?,
        )
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test assertions")]

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("(5,2,3,1)", (5, 2, 3, 1))]
    #[case(" ( 3 , 1 , 2 , 1 ) ", (3, 1, 2, 1))]
    #[case("(2,0,1,0)", (2, 0, 1, 0))]
    fn parses_tuples(#[case] input: &str, #[case] expected: (usize, usize, usize, usize)) {
        let params = input.parse::<Parameters>().expect("valid tuple");
        assert_eq!(
            (params.n(), params.n_consentful(), params.t(), params.t_consentful()),
            expected
        );
    }

    #[rstest]
    fn well_formed_but_invalid_tuple_is_an_invariant_error() {
        let err = "(1,1,0,0)".parse::<Parameters>().expect_err("t + t' = 0");
        assert!(matches!(err, ParamsError::Invariant { .. }));
    }

    #[rstest]
    #[case("5,2,3,1")]
    #[case("(5,2,3)")]
    #[case("(5,2,3,1,0)")]
    #[case("(5,2,,1)")]
    #[case("(5,-2,3,1)")]
    #[case("(5,2,3,1.0)")]
    #[case("(5,2,3,0x1)")]
    #[case("(5,2,3,1); import os")]
    #[case("__import__('os').system('true')")]
    #[case("(5,2,3,+1)")]
    #[case("")]
    #[case("(99999999999999999999999,1,1,1)")]
    fn rejects_anything_but_four_integers(#[case] input: &str) {
        let err = input.parse::<Parameters>().expect_err("must reject");
        assert!(matches!(err, ParamsError::InvalidParameters { .. }), "{err}");
    }

    #[rstest]
    #[case(3, 1, 3, 1, "n > t")]
    #[case(3, 4, 2, 1, "n >= n'")]
    #[case(4, 2, 1, 2, "t >= t'")]
    #[case(4, 1, 3, 2, "n' >= t'")]
    #[case(4, 2, 0, 0, "t + t' > 0")]
    fn reports_broken_relation(
        #[case] n: usize,
        #[case] np: usize,
        #[case] t: usize,
        #[case] tp: usize,
        #[case] relation: &str,
    ) {
        let err = Parameters::new(n, np, t, tp).expect_err("invalid");
        assert!(err.to_string().ends_with(relation), "{err}");
    }

    #[rstest]
    fn structural_allows_full_threshold_only() {
        let params = Parameters::structural(1, 1, 1, 1).expect("degenerate tuple");
        assert_eq!(params.combine_arity(), 2);
        assert!(Parameters::new(1, 1, 1, 1).is_err());
        let err = Parameters::structural(2, 1, 3, 1).expect_err("t above n");
        assert!(err.to_string().ends_with("n >= t"), "{err}");
    }

    #[rstest]
    fn zero_consentful_threshold_is_valid() {
        let params = Parameters::new(3, 0, 2, 0).expect("valid");
        assert_eq!(params.combine_arity(), 2);
    }

    #[rstest]
    fn names_follow_the_tuple() {
        let params = Parameters::new(5, 2, 3, 1).expect("valid");
        assert_eq!(params.default_model_file(), "symbolon_5_2_3_1.pv");
        assert_eq!(params.log_file_name(), "out_5_2_3_1");
        assert_eq!(params.to_string(), "(5,2,3,1)");
        assert_eq!(params.to_string().parse::<Parameters>(), Ok(params));
    }
}
