//! ProVerif model assembly for the Symbolon authentication protocol.
//!
//! A model is built top to bottom as an ordered list of text sections. The
//! emitters in the submodules each produce one or more sections; the
//! [`ModelBuilder`] collects them and [`ModelBuilder::build`] freezes the
//! result into a [`ModelArtifact`]. Nothing here touches the filesystem, so
//! two builds from the same parameters always render to the same bytes.

pub mod declarations;
pub mod equation;
pub mod queries;
pub mod roles;

use std::fmt;

use thiserror::Error;

/// Largest number of clauses or disjuncts a single statement may hold.
///
/// The verifier does not terminate on models anywhere near this size.
pub const MAX_TERMS: usize = 1 << 20;

/// Errors raised while generating a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// `combine` would take no arguments (`t + t' = 0`).
    #[error("combine must take at least one signature (t + t' = 0)")]
    EmptyCombination,
    /// A threshold query would be an empty, vacuously false disjunction.
    #[error("no {threshold}-subsets of {total} signers for the {event} query")]
    NoThresholdSubsets {
        /// Event the query is about.
        event: &'static str,
        /// Size of the index set.
        total: usize,
        /// Requested subset size.
        threshold: usize,
    },
    /// A statement would hold more than [`MAX_TERMS`] terms.
    #[error("the {statement} would exceed {limit} terms")]
    TooManyTerms {
        /// Statement being generated.
        statement: &'static str,
        /// The enforced limit.
        limit: usize,
    },
    /// Formatting a section failed.
    #[error("failed to format model text: {0}")]
    Format(#[from] fmt::Error),
}

/// Check a term count against [`MAX_TERMS`]. `None` means the count
/// overflowed.
fn bounded_terms(statement: &'static str, count: Option<usize>) -> Result<usize, ModelError> {
    count
        .filter(|&terms| terms <= MAX_TERMS)
        .ok_or(ModelError::TooManyTerms {
            statement,
            limit: MAX_TERMS,
        })
}

/// Identifies a section of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Leading comment block.
    Header,
    /// Channels, free names, events, types and functions.
    Declarations,
    /// The `reduc` statement defining `verify`.
    Equation,
    /// Query over the regular signers.
    RegularQuery,
    /// Query over the consentful signers.
    ConsentfulQuery,
    /// Plain reachability of `authorised`.
    Reachability,
    /// Role process definitions.
    Roles,
    /// Top-level process composition.
    Process,
}

impl SectionKind {
    /// Every section kind in emission order.
    pub const ALL: [Self; 8] = [
        Self::Header,
        Self::Declarations,
        Self::Equation,
        Self::RegularQuery,
        Self::ConsentfulQuery,
        Self::Reachability,
        Self::Roles,
        Self::Process,
    ];
}

/// One block of script text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    text: String,
}

impl Section {
    /// Kind of this section.
    #[must_use]
    pub const fn kind(&self) -> SectionKind { self.kind }

    /// Script text of this section.
    #[must_use]
    pub fn text(&self) -> &str { &self.text }
}

/// Accumulates sections in emission order.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    sections: Vec<Section>,
}

impl ModelBuilder {
    /// Start an empty model.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Append a section.
    #[must_use]
    pub fn section(mut self, kind: SectionKind, text: String) -> Self {
        tracing::debug!(?kind, bytes = text.len(), "appending model section");
        self.sections.push(Section { kind, text });
        self
    }

    /// Freeze the accumulated sections.
    #[must_use]
    pub fn build(self) -> ModelArtifact {
        ModelArtifact {
            sections: self.sections,
        }
    }
}

/// A complete, immutable model script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelArtifact {
    sections: Vec<Section>,
}

impl ModelArtifact {
    /// Sections in emission order.
    #[must_use]
    pub fn sections(&self) -> &[Section] { &self.sections }

    /// First section of the given kind.
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Concatenated script text.
    #[must_use]
    pub fn render(&self) -> String { self.to_string() }
}

impl fmt::Display for ModelArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            f.write_str(&section.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn artifact_keeps_section_order() {
        let artifact = ModelBuilder::new()
            .section(SectionKind::Header, "a\n".to_owned())
            .section(SectionKind::Equation, "b\n".to_owned())
            .build();
        let kinds: Vec<_> = artifact.sections().iter().map(Section::kind).collect();
        assert_eq!(kinds, vec![SectionKind::Header, SectionKind::Equation]);
        assert_eq!(artifact.render(), "a\nb\n");
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(MAX_TERMS))]
    fn term_counts_up_to_the_limit_pass(#[case] count: Option<usize>) {
        assert_eq!(bounded_terms("test", count).ok(), count);
    }

    #[rstest]
    #[case(Some(MAX_TERMS + 1))]
    #[case(None)]
    fn oversized_term_counts_fail(#[case] count: Option<usize>) {
        assert!(matches!(
            bounded_terms("test", count),
            Err(ModelError::TooManyTerms { limit: MAX_TERMS, .. })
        ));
    }

    #[rstest]
    fn missing_section_is_none() {
        let artifact = ModelBuilder::new().build();
        assert!(artifact.section(SectionKind::Roles).is_none());
        assert_eq!(artifact.render(), "");
    }
}
