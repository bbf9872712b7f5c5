//! Protocol participants and the top-level process.
//!
//! The dealer hands each key share out on a private channel, but only after
//! the attacker presents that signer's activation token on the public
//! channel. This lets the attacker choose which signers are available.

use std::fmt::Write as _;

use super::{
    ModelError,
    declarations::{
        consentful_channel,
        consentful_key_share,
        consentful_token,
        key_share,
        signer_channel,
        signer_token,
    },
};
use crate::params::Parameters;

fn dealer(out: &mut String, params: &Parameters) -> Result<(), ModelError> {
    writeln!(out, "let Dealer =")?;
    writeln!(out, "     new sk: secretkey;")?;
    writeln!(out, "     out(c, pk(sk));")?;
    writeln!(out, "     (* out(c, {}(sk)); *)", key_share(1))?;
    writeln!(out, "     (* uncomment line above to see an attack *)")?;
    writeln!(out, "     (  out(pcRP, pk(sk)) |")?;
    writeln!(out, "        (* let the attacker control whether a signer is enabled or not *)")?;
    for i in 0..params.n() {
        writeln!(
            out,
            "        ( in(c, ={}); out({}, {}(sk)) )|",
            signer_token(i),
            signer_channel(i),
            key_share(i)
        )?;
    }
    for i in 0..params.n_consentful() {
        writeln!(
            out,
            "        ( in(c, ={}); out({}, {}(sk)) )|",
            consentful_token(i),
            consentful_channel(i),
            consentful_key_share(i)
        )?;
    }
    writeln!(out, "        0 ).")?;
    writeln!(out)?;
    Ok(())
}

const SIGNER: &str = "\
(* a regular signer has a regular key share *)
let Signer(pc: channel) =
     in(pc, k: kshare);
     in(c, mess: bitstring);
     let s = sign(k, mess) in
     event signed(pc, mess);
     out(c, s).

";

const CONSENTFUL_SIGNER: &str = "\
(* a consentful signer has both a regular key share and a consentful key share *)
let ConsentfulSigner(pc: channel, pcc: channel) =
     in(pc, k: kshare);
     in(pcc, kc: ckshare);
     in(c, mess: bitstring);
     let s = sign(k, mess) in
     let sc = csign(kc, mess) in
     event signed(pc, mess);
     event csigned(pcc, mess);
     out(c, s);
     out(c, sc).


";

const RELYING_PARTY: &str = "\
let RelyingParty =
     in(pcRP, pubkey: publickey);
     new challenge: bitstring;
     out(c, challenge);
     in(c, s: bitstring);
     if verify(pubkey, challenge, s) = true then
     event authorised(challenge).


";

/// Dealer, Signer, `ConsentfulSigner` and `RelyingParty` definitions.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if writing the text fails.
pub fn roles(params: &Parameters) -> Result<String, ModelError> {
    let mut out = String::from("(* Definition of the protocol participants *)\n\n");
    dealer(&mut out, params)?;
    out.push_str(SIGNER);
    out.push_str(CONSENTFUL_SIGNER);
    out.push_str(RELYING_PARTY);
    Ok(out)
}

/// Replicated composition of one dealer, one relying party and `n` signers.
/// The first `n'` signers also hold a consent share.
///
/// # Errors
///
/// Returns [`ModelError::Format`] if writing the text fails.
pub fn process(params: &Parameters) -> Result<String, ModelError> {
    let mut out = String::new();
    writeln!(out, "process")?;
    writeln!(out, "     (!Dealer) | (!RelyingParty) |")?;
    writeln!(
        out,
        "     (* There are {} consentful signers, and {} ordinary signers *)",
        params.n_consentful(),
        params.n() - params.n_consentful()
    )?;
    for i in 0..params.n() {
        if i < params.n_consentful() {
            writeln!(
                out,
                "     (!ConsentfulSigner({}, {})) |",
                signer_channel(i),
                consentful_channel(i)
            )?;
        } else {
            writeln!(out, "     (!Signer({})) |", signer_channel(i))?;
        }
    }
    writeln!(out, "     0")?;
    writeln!(out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "test assertions")]

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn dealer_gates_every_share_behind_a_token() {
        let params = Parameters::new(3, 1, 2, 1).expect("valid");
        let text = roles(&params).expect("roles");
        assert!(text.contains("( in(c, =name2); out(pc2, ksh2(sk)) )|"));
        assert!(text.contains("( in(c, =name_c0); out(pcc0, cksh0(sk)) )|"));
        assert!(!text.contains("name_c1"));
        for role in ["let Dealer =", "let Signer(", "let ConsentfulSigner(", "let RelyingParty ="] {
            assert_eq!(text.matches(role).count(), 1, "{role}");
        }
    }

    #[rstest]
    fn first_signers_are_consentful() {
        let params = Parameters::new(4, 2, 2, 1).expect("valid");
        let text = process(&params).expect("process");
        let instances: Vec<&str> = text
            .lines()
            .filter(|l| l.contains("Signer("))
            .map(str::trim)
            .collect();
        assert_eq!(
            instances,
            vec![
                "(!ConsentfulSigner(pc0, pcc0)) |",
                "(!ConsentfulSigner(pc1, pcc1)) |",
                "(!Signer(pc2)) |",
                "(!Signer(pc3)) |",
            ]
        );
        assert!(text.contains("2 consentful signers, and 2 ordinary signers"));
    }
}
