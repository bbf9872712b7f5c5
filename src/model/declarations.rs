//! Header comment and global declarations.
//!
//! Everything here scales linearly with `n` and `n'`: one private channel,
//! activation token and key-share function per signer.

use std::fmt::Write as _;

use super::ModelError;
use crate::params::Parameters;

/// Private channel from the dealer to regular signer `i`.
#[must_use]
pub fn signer_channel(i: usize) -> String { format!("pc{i}") }

/// Private channel from the dealer to consentful signer `i`.
#[must_use]
pub fn consentful_channel(i: usize) -> String { format!("pcc{i}") }

/// Attacker-known name that activates regular signer `i`.
#[must_use]
pub fn signer_token(i: usize) -> String { format!("name{i}") }

/// Attacker-known name that activates consentful signer `i`.
#[must_use]
pub fn consentful_token(i: usize) -> String { format!("name_c{i}") }

/// Function deriving the key share of regular signer `i`.
#[must_use]
pub fn key_share(i: usize) -> String { format!("ksh{i}") }

/// Function deriving the consent key share of consentful signer `i`.
#[must_use]
pub fn consentful_key_share(i: usize) -> String { format!("cksh{i}") }

/// Parameter list of `combine`: `arity` bitstrings.
#[must_use]
pub fn combine_signature(arity: usize) -> String {
    let mut args = "bitstring, ".repeat(arity.saturating_sub(1));
    args.push_str("bitstring");
    format!("fun combine({args}): bitstring.")
}

/// Opening comment block.
#[must_use]
pub fn header() -> String {
    concat!(
        "\n\n(*\n",
        "ProVerif script to verify authentication properties of Symbolon\n",
        "\n",
        "For a description of the protocol, see our paper\n",
        "Symbolon: Privacy-preserving and Flexible Multi-device-based User Authentication\n",
        "*)\n\n\n",
    )
    .to_owned()
}

fn channels(out: &mut String, params: &Parameters) -> Result<(), ModelError> {
    writeln!(out, "(* public channel *)")?;
    writeln!(out, "free c: channel.")?;
    writeln!(out)?;
    writeln!(
        out,
        "(* private channels for sending secrets from the dealer to the n and the n' of them \
         that are consentful authenticators *)"
    )?;
    for i in 0..params.n() {
        writeln!(out, "free {}: channel [private].", signer_channel(i))?;
    }
    for i in 0..params.n_consentful() {
        writeln!(out, "free {}: channel [private].", consentful_channel(i))?;
    }
    writeln!(out)?;
    writeln!(out, "(* channel for communicating the public key to the relying party *)")?;
    writeln!(out, "free pcRP: channel [private].")?;
    writeln!(out)?;
    writeln!(out, "(* some free names available to the attacker *)")?;
    for i in 0..params.n() {
        writeln!(out, "free {}: bitstring.", signer_token(i))?;
    }
    for i in 0..params.n_consentful() {
        writeln!(out, "free {}: bitstring.", consentful_token(i))?;
    }
    writeln!(out)?;
    Ok(())
}

fn events(out: &mut String) -> Result<(), ModelError> {
    writeln!(
        out,
        "event authorised(bitstring). (* the bitstring challenge has been authorised, i.e. \
         signed by the required cohort of signers *)"
    )?;
    writeln!(
        out,
        "event signed(channel, bitstring). (* the bitstring challenge has been signed by a \
         regular signer denoted by the private channel pc *)"
    )?;
    writeln!(
        out,
        "event csigned(channel, bitstring). (* the bitstring challenge has been signed by a \
         consentful signer denoted by the private channel pc *)"
    )?;
    writeln!(out)?;
    Ok(())
}

fn functions(out: &mut String, params: &Parameters) -> Result<(), ModelError> {
    let (n, np, t, tp) = (
        params.n(),
        params.n_consentful(),
        params.t(),
        params.t_consentful(),
    );
    writeln!(out, "(*")?;
    writeln!(out, "There are {n} regular key shares.")?;
    writeln!(out, "There are {np} 'consentful' key shares.")?;
    writeln!(out, "A valid signature is made using:")?;
    writeln!(out, "- {t} of the {n} key regular shares, and also")?;
    writeln!(out, "- {tp} of the {np} consent key shares")?;
    writeln!(out, "*)")?;
    writeln!(out)?;
    writeln!(out, "type secretkey. (* secret key for authentication *)")?;
    writeln!(out, "type publickey. (* public key corresponding to secret key *)")?;
    writeln!(out, "type kshare.    (* share of secret key *)")?;
    writeln!(out, "type ckshare.   (* consentful share of secret key *)")?;
    writeln!(out)?;
    writeln!(out, "fun pk(secretkey): publickey.  (* derive public key from a secret key *)")?;
    for i in 0..n {
        writeln!(
            out,
            "fun {}(secretkey): kshare.  (* derive the key shares from the secret key *)",
            key_share(i)
        )?;
    }
    for i in 0..np {
        writeln!(
            out,
            "fun {}(secretkey): ckshare.  (* derive the consentful key shares from the secret \
             key *)",
            consentful_key_share(i)
        )?;
    }
    writeln!(out)?;
    writeln!(out)?;
    writeln!(
        out,
        "(* combine is the function that makes a single signature out of partial signatures *)"
    )?;
    writeln!(out, "(* combine has arity {} *)", params.combine_arity())?;
    writeln!(out, "{}", combine_signature(params.combine_arity()))?;
    writeln!(out)?;
    writeln!(out, "(* sign with a key share, and with a consentful key share *)")?;
    writeln!(out, "fun sign(kshare, bitstring): bitstring.")?;
    writeln!(out, "fun csign(ckshare, bitstring): bitstring.")?;
    writeln!(out)?;
    writeln!(out, "(* a valid combination of signatures made with shares can be verified.")?;
    writeln!(out, "'Valid' means {tp} consentful signature(s) and {t} ordinary ones *)")?;
    Ok(())
}

/// Channels, free names, events, types and function symbols.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if writing the text fails.
pub fn declarations(params: &Parameters) -> Result<String, ModelError> {
    let mut out = String::new();
    channels(&mut out, params)?;
    events(&mut out)?;
    functions(&mut out, params)?;
    Ok(out)
}
