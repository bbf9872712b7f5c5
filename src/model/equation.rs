//! The `reduc` statement defining signature verification.
//!
//! `verify(pk(sk), m, combine(...))` reduces to `true` for exactly the
//! combinations a relying party must accept: `t` regular signatures from
//! distinct signers followed by `t'` consentful signatures from distinct
//! consentful signers. One clause is emitted per pair of subsets, so the
//! statement has `C(n, t) * C(n', t')` clauses. Regular subsets form the outer
//! loop and consentful subsets the inner loop, both in lexicographic order.

use std::fmt;

use super::{
    ModelError,
    bounded_terms,
    declarations::{consentful_key_share, key_share},
};
use crate::{
    combinations::{Combinations, binomial},
    params::Parameters,
};

/// Universally quantified prefix shared by every clause.
const CLAUSE_BINDER: &str = "forall sk:secretkey, m:bitstring;";

/// A single accepted signer combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EquationClause {
    /// Regular signers contributing a signature, ascending.
    pub signers: Vec<usize>,
    /// Consentful signers contributing a consent signature, ascending.
    pub consentful: Vec<usize>,
}

impl EquationClause {
    /// Number of arguments passed to `combine`.
    #[must_use]
    pub fn arity(&self) -> usize { self.signers.len() + self.consentful.len() }
}

impl fmt::Display for EquationClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .signers
            .iter()
            .map(|&i| format!("sign({}(sk), m)", key_share(i)))
            .chain(
                self.consentful
                    .iter()
                    .map(|&i| format!("csign({}(sk), m)", consentful_key_share(i))),
            )
            .collect();
        write!(
            f,
            "{CLAUSE_BINDER} verify(pk(sk), m, combine({})) = true",
            terms.join(", ")
        )
    }
}

/// Every accepted combination in canonical order.
///
/// # Errors
///
/// Returns [`ModelError::EmptyCombination`] when `t + t' = 0`, or
/// [`ModelError::TooManyTerms`] when there would be more than
/// [`MAX_TERMS`](super::MAX_TERMS) clauses.
pub fn clauses(params: &Parameters) -> Result<Vec<EquationClause>, ModelError> {
    if params.combine_arity() == 0 {
        return Err(ModelError::EmptyCombination);
    }
    let count = binomial(params.n(), params.t())
        .zip(binomial(params.n_consentful(), params.t_consentful()))
        .and_then(|(regular, consentful)| regular.checked_mul(consentful));
    let mut out = Vec::with_capacity(bounded_terms("verify equation", count)?);
    for signers in Combinations::new(params.n(), params.t()) {
        for consent in Combinations::new(params.n_consentful(), params.t_consentful()) {
            out.push(EquationClause {
                signers: signers.clone(),
                consentful: consent,
            });
        }
    }
    Ok(out)
}

/// Render the `reduc` statement. Clauses are separated by `;` and the last
/// one is terminated by `.`.
///
/// # Errors
///
/// Returns [`ModelError::EmptyCombination`] when `t + t' = 0`,
/// [`ModelError::TooManyTerms`] for oversized tuples, or
/// [`ModelError::NoThresholdSubsets`] if no clause could be produced.
pub fn equation(params: &Parameters) -> Result<String, ModelError> {
    let clauses = clauses(params)?;
    if clauses.is_empty() {
        return Err(ModelError::NoThresholdSubsets {
            event: "verify",
            total: params.n(),
            threshold: params.t(),
        });
    }
    let body: Vec<String> = clauses.iter().map(ToString::to_string).collect();
    Ok(format!("reduc\n{}.\n\n", body.join(";\n")))
}
