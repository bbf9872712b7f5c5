//! Generator for ProVerif models of the Symbolon authentication system.
//!
//! Symbolon splits a user's signing key over `n` devices, `n'` of which also
//! hold a consent key share. Authentication needs `t` ordinary and `t'`
//! consentful partial signatures. Given `(n, n', t, t')` this crate emits a
//! ProVerif script encoding the protocol roles, the verification equation for
//! every acceptable signer combination, and the threshold properties the
//! verifier should prove. It does not run the verifier itself.

pub mod app;
pub mod batch;
pub mod combinations;
pub mod model;
pub mod params;
pub mod synth;
