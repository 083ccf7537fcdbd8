//! Model catalogue.

use std::fmt;
use std::str::FromStr;

use carport_errors::ProfileError;
use serde::{Deserialize, Serialize};

/// Supported vehicle models.
///
/// The `*NoAcc` variants are trims without a factory adaptive cruise
/// controller; the interface drives them alone. [`CarModel::Unknown`] is the
/// baseline fallback and is never listed as supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CarModel {
    Volt,
    VoltNoAcc,
    Malibu,
    MalibuNoAcc,
    HoldenAstra,
    Acadia,
    AcadiaNoAcc,
    BuickRegal,
    CadillacAts,
    BoltNoAcc,
    EquinoxNoAcc,
    TahoeNoAcc,
    Escalade,
    Unknown,
}

impl CarModel {
    /// Every supported model, in catalogue order.
    pub const SUPPORTED: [CarModel; 13] = [
        CarModel::Volt,
        CarModel::VoltNoAcc,
        CarModel::Malibu,
        CarModel::MalibuNoAcc,
        CarModel::HoldenAstra,
        CarModel::Acadia,
        CarModel::AcadiaNoAcc,
        CarModel::BuickRegal,
        CarModel::CadillacAts,
        CarModel::BoltNoAcc,
        CarModel::EquinoxNoAcc,
        CarModel::TahoeNoAcc,
        CarModel::Escalade,
    ];

    /// Canonical model identifier, as reported by the fingerprinting stage.
    pub fn id(self) -> &'static str {
        match self {
            Self::Volt => "CHEVROLET VOLT PREMIUM 2017",
            Self::VoltNoAcc => "CHEVROLET VOLT NO ACC",
            Self::Malibu => "CHEVROLET MALIBU PREMIER 2017",
            Self::MalibuNoAcc => "CHEVROLET MALIBU NO ACC",
            Self::HoldenAstra => "HOLDEN ASTRA RS-V BK 2017",
            Self::Acadia => "GMC ACADIA DENALI 2018",
            Self::AcadiaNoAcc => "GMC ACADIA NO ACC",
            Self::BuickRegal => "BUICK REGAL ESSENCE 2018",
            Self::CadillacAts => "CADILLAC ATS Premium Performance 2018",
            Self::BoltNoAcc => "CHEVROLET BOLT EV NO ACC",
            Self::EquinoxNoAcc => "CHEVROLET EQUINOX NO ACC",
            Self::TahoeNoAcc => "CHEVROLET TAHOE NO ACC",
            Self::Escalade => "CADILLAC ESCALADE 2017",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// True for trims without a factory adaptive cruise controller.
    pub fn is_no_factory_controller(self) -> bool {
        matches!(
            self,
            Self::VoltNoAcc
                | Self::MalibuNoAcc
                | Self::AcadiaNoAcc
                | Self::BoltNoAcc
                | Self::EquinoxNoAcc
                | Self::TahoeNoAcc
        )
    }

    pub fn is_supported(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for CarModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CarModel {
    type Err = ProfileError;

    /// Accepts the canonical id or the variant name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::SUPPORTED
            .iter()
            .copied()
            .find(|model| {
                model.id().eq_ignore_ascii_case(needle)
                    || format!("{model:?}").eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ProfileError::unsupported_model(needle))
    }
}

/// Safety policy the panda-side firmware must run for this brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyModel {
    Gm,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = CarModel::SUPPORTED.iter().map(|m| m.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CarModel::SUPPORTED.len());
    }

    #[test]
    fn test_parse_canonical_id() -> Result<(), Box<dyn std::error::Error>> {
        for model in CarModel::SUPPORTED {
            assert_eq!(model.id().parse::<CarModel>()?, model);
        }
        Ok(())
    }

    #[test]
    fn test_parse_variant_name() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("boltnoacc".parse::<CarModel>()?, CarModel::BoltNoAcc);
        assert_eq!(" Escalade ".parse::<CarModel>()?, CarModel::Escalade);
        Ok(())
    }

    #[test]
    fn test_unknown_is_not_parsed() {
        assert!("UNKNOWN".parse::<CarModel>().is_err());
        assert!("Unknown".parse::<CarModel>().is_err());
        assert!("TOYOTA PRIUS 2017".parse::<CarModel>().is_err());
    }

    #[test]
    fn test_no_factory_controller_set() {
        let no_acc: Vec<CarModel> = CarModel::SUPPORTED
            .into_iter()
            .filter(|m| m.is_no_factory_controller())
            .collect();
        assert_eq!(
            no_acc,
            vec![
                CarModel::VoltNoAcc,
                CarModel::MalibuNoAcc,
                CarModel::AcadiaNoAcc,
                CarModel::BoltNoAcc,
                CarModel::EquinoxNoAcc,
                CarModel::TahoeNoAcc,
            ]
        );
        assert!(!CarModel::Unknown.is_no_factory_controller());
    }
}
