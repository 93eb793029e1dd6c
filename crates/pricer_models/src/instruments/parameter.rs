//! Named option parameters and option families.
//!
//! Sweeps and record files address fields by a fixed set of symbols
//! (`T, K, S, r, sigma, b`). Each family supports a subset of them: the
//! perpetual American family has no expiry.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{PricingError, PricingResult};

/// A named option input.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionParameter;
///
/// let p: OptionParameter = "sigma".parse().unwrap();
/// assert_eq!(p, OptionParameter::Volatility);
/// assert_eq!(p.symbol(), "sigma");
/// assert!("vol".parse::<OptionParameter>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionParameter {
    /// Time to expiry in years (`T`)
    #[cfg_attr(feature = "serde", serde(rename = "T"))]
    Expiry,
    /// Strike (`K`)
    #[cfg_attr(feature = "serde", serde(rename = "K"))]
    Strike,
    /// Spot (`S`)
    #[cfg_attr(feature = "serde", serde(rename = "S"))]
    Spot,
    /// Risk-free rate (`r`)
    #[cfg_attr(feature = "serde", serde(rename = "r"))]
    Rate,
    /// Volatility (`sigma`)
    #[cfg_attr(feature = "serde", serde(rename = "sigma"))]
    Volatility,
    /// Cost of carry (`b`)
    #[cfg_attr(feature = "serde", serde(rename = "b"))]
    Carry,
}

impl OptionParameter {
    /// All parameters in record column order.
    pub const ALL: [OptionParameter; 6] = [
        OptionParameter::Expiry,
        OptionParameter::Strike,
        OptionParameter::Spot,
        OptionParameter::Rate,
        OptionParameter::Volatility,
        OptionParameter::Carry,
    ];

    /// Column symbol used in record files and sweep requests.
    pub fn symbol(self) -> &'static str {
        match self {
            OptionParameter::Expiry => "T",
            OptionParameter::Strike => "K",
            OptionParameter::Spot => "S",
            OptionParameter::Rate => "r",
            OptionParameter::Volatility => "sigma",
            OptionParameter::Carry => "b",
        }
    }
}

impl fmt::Display for OptionParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for OptionParameter {
    type Err = PricingError;

    /// Parses a parameter symbol. Symbols are case-sensitive since `S` and
    /// `r` follow the usual notation.
    ///
    /// # Errors
    /// `PricingError::ParameterNotApplicable` for a name that no family
    /// recognises.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionParameter::ALL
            .into_iter()
            .find(|p| p.symbol() == s.trim())
            .ok_or_else(|| PricingError::parameter_not_applicable(s, "European or AmericanPerpetual"))
    }
}

/// Closed-form family an option record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionFamily {
    /// European exercise with finite expiry
    European,
    /// American exercise without expiry
    AmericanPerpetual,
}

const EUROPEAN_PARAMETERS: [OptionParameter; 6] = OptionParameter::ALL;

const PERPETUAL_PARAMETERS: [OptionParameter; 5] = [
    OptionParameter::Strike,
    OptionParameter::Spot,
    OptionParameter::Rate,
    OptionParameter::Volatility,
    OptionParameter::Carry,
];

impl OptionFamily {
    /// Family name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            OptionFamily::European => "European",
            OptionFamily::AmericanPerpetual => "AmericanPerpetual",
        }
    }

    /// Parameters carried by records of this family, in column order.
    pub fn parameters(self) -> &'static [OptionParameter] {
        match self {
            OptionFamily::European => &EUROPEAN_PARAMETERS,
            OptionFamily::AmericanPerpetual => &PERPETUAL_PARAMETERS,
        }
    }

    /// Returns whether records of this family carry `parameter`.
    pub fn supports(self, parameter: OptionParameter) -> bool {
        self.parameters().contains(&parameter)
    }

    /// Fails with `ParameterNotApplicable` unless the family carries `parameter`.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::instruments::{OptionFamily, OptionParameter};
    ///
    /// assert!(OptionFamily::European.ensure_supports(OptionParameter::Expiry).is_ok());
    /// assert!(OptionFamily::AmericanPerpetual.ensure_supports(OptionParameter::Expiry).is_err());
    /// ```
    pub fn ensure_supports(self, parameter: OptionParameter) -> PricingResult<()> {
        if self.supports(parameter) {
            Ok(())
        } else {
            Err(PricingError::parameter_not_applicable(
                parameter.symbol(),
                self.name(),
            ))
        }
    }

    /// Leading columns of every batch row: `Option, Type` then the parameters.
    pub fn identity_header(self) -> Vec<&'static str> {
        ["Option", "Type"]
            .into_iter()
            .chain(self.parameters().iter().map(|p| p.symbol()))
            .collect()
    }
}

impl fmt::Display for OptionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_symbols() {
        for p in OptionParameter::ALL {
            assert_eq!(p.symbol().parse::<OptionParameter>().unwrap(), p);
        }
    }

    #[test]
    fn test_parse_unknown_is_not_applicable() {
        let err = "q".parse::<OptionParameter>().unwrap_err();
        assert!(matches!(err, PricingError::ParameterNotApplicable { .. }));
        assert!("s".parse::<OptionParameter>().is_err());
    }

    #[test]
    fn test_perpetual_has_no_expiry() {
        assert!(OptionFamily::European.supports(OptionParameter::Expiry));
        assert!(!OptionFamily::AmericanPerpetual.supports(OptionParameter::Expiry));

        match OptionFamily::AmericanPerpetual.ensure_supports(OptionParameter::Expiry) {
            Err(PricingError::ParameterNotApplicable { parameter, family }) => {
                assert_eq!(parameter, "T");
                assert_eq!(family, "AmericanPerpetual");
            }
            other => panic!("Expected ParameterNotApplicable, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_headers() {
        assert_eq!(
            OptionFamily::European.identity_header(),
            vec!["Option", "Type", "T", "K", "S", "r", "sigma", "b"]
        );
        assert_eq!(
            OptionFamily::AmericanPerpetual.identity_header(),
            vec!["Option", "Type", "K", "S", "r", "sigma", "b"]
        );
    }
}
