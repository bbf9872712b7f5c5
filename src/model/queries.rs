//! Security properties checked by the verifier.
//!
//! Both threshold queries share one shape: whenever `authorised(chal)` is
//! reached, some subset of the required size must each have raised their
//! signing event for the same challenge. The consequent is a disjunction with
//! one conjunction per subset. Regular and consentful signers use disjoint
//! index spaces, so the two queries are generated independently.

use super::{
    ModelError,
    bounded_terms,
    declarations::{consentful_channel, signer_channel},
};
use crate::{
    combinations::{Combinations, binomial},
    params::Parameters,
};

/// Antecedent shared by every query.
const AUTHORISED_PREMISE: &str = "query chal:bitstring; event(authorised(chal))";

/// Which signer population a threshold query is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerClass {
    /// Ordinary key-share holders, event `signed`.
    Regular,
    /// Consent key-share holders, event `csigned`.
    Consentful,
}

impl SignerClass {
    /// Event raised by signers of this class.
    #[must_use]
    pub const fn event(self) -> &'static str {
        match self {
            Self::Regular => "signed",
            Self::Consentful => "csigned",
        }
    }

    const fn query_name(self) -> &'static str {
        match self {
            Self::Regular => "regular threshold query",
            Self::Consentful => "consentful threshold query",
        }
    }

    fn channel(self, i: usize) -> String {
        match self {
            Self::Regular => signer_channel(i),
            Self::Consentful => consentful_channel(i),
        }
    }
}

/// "If authorised, then some `threshold` of `total` signers signed."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdQuery {
    class: SignerClass,
    total: usize,
    threshold: usize,
    disjuncts: Vec<Vec<usize>>,
}

impl ThresholdQuery {
    /// Query over the `n` regular signers with threshold `t`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoThresholdSubsets`] if there is no `t`-subset,
    /// or [`ModelError::TooManyTerms`] if there are too many.
    pub fn regular(params: &Parameters) -> Result<Self, ModelError> {
        Self::new(SignerClass::Regular, params.n(), params.t())
    }

    /// Query over the `n'` consentful signers with threshold `t'`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoThresholdSubsets`] if there is no `t'`-subset,
    /// or [`ModelError::TooManyTerms`] if there are too many.
    pub fn consentful(params: &Parameters) -> Result<Self, ModelError> {
        Self::new(
            SignerClass::Consentful,
            params.n_consentful(),
            params.t_consentful(),
        )
    }

    fn new(class: SignerClass, total: usize, threshold: usize) -> Result<Self, ModelError> {
        let capacity = bounded_terms(class.query_name(), binomial(total, threshold))?;
        let mut disjuncts = Vec::with_capacity(capacity);
        disjuncts.extend(Combinations::new(total, threshold));
        if disjuncts.is_empty() {
            return Err(ModelError::NoThresholdSubsets {
                event: class.event(),
                total,
                threshold,
            });
        }
        Ok(Self {
            class,
            total,
            threshold,
            disjuncts,
        })
    }

    /// Subsets in the consequent, in canonical order.
    #[must_use]
    pub fn disjuncts(&self) -> &[Vec<usize>] { &self.disjuncts }

    /// True when the only subset is empty, i.e. no signature is required.
    #[must_use]
    pub fn is_trivial(&self) -> bool { self.threshold == 0 }

    fn conjunction(&self, subset: &[usize]) -> String {
        let events: Vec<String> = subset
            .iter()
            .map(|&i| format!("event({}({}, chal))", self.class.event(), self.class.channel(i)))
            .collect();
        format!(" ({})", events.join(" && "))
    }

    /// Comment line introducing the query.
    fn preamble(&self) -> String {
        match self.class {
            SignerClass::Regular => format!(
                "(* If an access has been authorised, then some {} of the {} regular signers \
                 must have signed it *)\n\n",
                self.threshold, self.total
            ),
            SignerClass::Consentful => format!(
                "(* If an access has been authorised, then {} of the {} consentful signers \
                 must have signed it *)\n\n",
                self.threshold, self.total
            ),
        }
    }

    /// Render the query with its leading comment.
    ///
    /// An empty conjunction has no ProVerif syntax, so a zero threshold is
    /// rendered as a comment instead of a query.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.preamble();
        if self.is_trivial() {
            out.push_str(&format!(
                "(* No {} event is required, so there is nothing to check *)\n\n",
                self.class.event()
            ));
            return out;
        }
        let body: Vec<String> = self
            .disjuncts
            .iter()
            .map(|subset| self.conjunction(subset))
            .collect();
        out.push_str(&format!(
            "{AUTHORISED_PREMISE} ==> (\n{}).\n\n",
            body.join(" ||\n")
        ));
        out
    }
}

/// Heading placed before the threshold queries.
#[must_use]
pub fn properties_heading() -> String {
    "\n\n(* Properties to be checked\n=========================== *)\n\n".to_owned()
}

/// Plain reachability of `authorised`, guarding against a vacuous model.
#[must_use]
pub fn reachability() -> String {
    format!("(* Reachability check *)\n{AUTHORISED_PREMISE}.\n\n\n")
}
