use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{instrument} is restricted to signed-in clinicians; rerun with --authorized")]
    Unauthorized { instrument: String },
}

/// Decides whether the current user may score an instrument.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    protected: BTreeSet<String>,
}

impl AuthGate {
    pub fn new<I, S>(protected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protected: protected.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_protected(&self, instrument_id: &str) -> bool {
        self.protected.contains(instrument_id)
    }

    pub fn check(&self, instrument_id: &str, authorized: bool) -> Result<(), AuthError> {
        if authorized || !self.is_protected(instrument_id) {
            return Ok(());
        }
        tracing::warn!(instrument = instrument_id, "refused unauthorized access");
        Err(AuthError::Unauthorized {
            instrument: instrument_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_instrument_requires_authorization() {
        let gate = AuthGate::new(["wechsler", "diva5"]);
        assert_eq!(
            gate.check("wechsler", false),
            Err(AuthError::Unauthorized {
                instrument: "wechsler".to_string()
            })
        );
        assert!(gate.check("wechsler", true).is_ok());
    }

    #[test]
    fn open_instrument_passes_without_authorization() {
        let gate = AuthGate::new(["wechsler"]);
        assert!(gate.check("cat_q", false).is_ok());
        assert!(!gate.is_protected("cat_q"));
    }

    #[test]
    fn empty_gate_protects_nothing() {
        let gate = AuthGate::default();
        assert!(gate.check("wechsler", false).is_ok());
    }
}
