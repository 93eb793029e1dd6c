//! Option kind (call or put).

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Right conveyed by the option.
///
/// Every formula branches on the kind. Parsing accepts `Call`/`Put` in any
/// case, so the `type` column of record files maps directly onto it.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionKind;
///
/// let kind: OptionKind = "call".parse().unwrap();
/// assert_eq!(kind, OptionKind::Call);
/// assert_eq!(kind.opposite(), OptionKind::Put);
/// assert_eq!(kind.to_string(), "Call");
/// assert!("Straddle".parse::<OptionKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionKind {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionKind {
    /// Returns the other kind.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            OptionKind::Call => OptionKind::Put,
            OptionKind::Put => OptionKind::Call,
        }
    }

    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionKind::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(self) -> bool {
        matches!(self, OptionKind::Put)
    }

    /// Returns the canonical name (`Call` or `Put`).
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::Call => "Call",
            OptionKind::Put => "Put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("call") {
            Ok(OptionKind::Call)
        } else if trimmed.eq_ignore_ascii_case("put") {
            Ok(OptionKind::Put)
        } else {
            Err(PricingError::InvalidOptionKind(s.to_string()))
        }
    }
}
