//! Model → profile resolution.

use carport_tuning::units::{lb, mph};
use carport_tuning::{LateralPid, STD_CARGO_KG};
use tracing::{debug, warn};

use crate::fingerprint::{Fingerprint, GAS_INTERCEPTOR, SignalAddress};
use crate::model::CarModel;
use crate::profile::{ProfileDraft, ProfileField, VehicleProfile};

/// Resolves profiles for the supported catalogue.
///
/// Holds only the address used to detect a pedal interceptor, so resolution
/// is a pure function of `(model, fingerprint)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleProfileRegistry {
    interceptor: SignalAddress,
}

impl Default for VehicleProfileRegistry {
    fn default() -> Self {
        Self::new(GAS_INTERCEPTOR)
    }
}

impl VehicleProfileRegistry {
    pub fn new(interceptor: SignalAddress) -> Self {
        Self { interceptor }
    }

    pub fn interceptor(&self) -> SignalAddress {
        self.interceptor
    }

    pub fn supported_models(&self) -> &'static [CarModel] {
        &CarModel::SUPPORTED
    }

    /// Resolve the profile for `model` given the session fingerprint.
    pub fn resolve(&self, model: CarModel, fingerprint: &Fingerprint) -> VehicleProfile {
        let has_gas_interceptor = fingerprint.contains(self.interceptor);
        let mut draft = ProfileDraft::baseline(model, has_gas_interceptor);
        apply_model(&mut draft);

        let profile = draft.finalize();
        debug!(
            model = %model,
            has_gas_interceptor,
            no_factory_controller = profile.is_no_factory_controller(),
            min_enable_speed = profile.min_enable_speed(),
            "Resolved vehicle profile"
        );
        profile
    }

    /// Resolve by model id. Ids outside the catalogue get the baseline profile.
    pub fn resolve_id(&self, model_id: &str, fingerprint: &Fingerprint) -> VehicleProfile {
        let model = model_id.parse::<CarModel>().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to baseline profile");
            CarModel::Unknown
        });
        self.resolve(model, fingerprint)
    }
}

/// Resolve with the default interceptor address.
pub fn resolve(model: CarModel, fingerprint: &Fingerprint) -> VehicleProfile {
    VehicleProfileRegistry::default().resolve(model, fingerprint)
}

/// Resolve by model id with the default interceptor address.
pub fn resolve_id(model_id: &str, fingerprint: &Fingerprint) -> VehicleProfile {
    VehicleProfileRegistry::default().resolve_id(model_id, fingerprint)
}

fn apply_model(draft: &mut ProfileDraft) {
    use ProfileField::{
        CenterToFront, LateralTuning, Mass, MinEnableSpeed, SteerRatio, SteerRatioRear,
        TireStiffnessFactor, Wheelbase,
    };

    let g = &mut draft.geometry;
    let t = &mut draft.thresholds;

    match draft.model {
        CarModel::Volt | CarModel::VoltNoAcc => {
            t.min_enable_speed = mph(18.0);
            g.mass = 1607.0 + STD_CARGO_KG;
            g.wheelbase = 2.69;
            g.steer_ratio = 15.7;
            g.center_to_front = g.wheelbase * 0.4;
            draft.estimated.insert(CenterToFront);
        }
        CarModel::Malibu | CarModel::MalibuNoAcc => {
            t.min_enable_speed = mph(18.0);
            g.mass = 1496.0 + STD_CARGO_KG;
            g.wheelbase = 2.83;
            g.steer_ratio = 15.8;
            g.center_to_front = g.wheelbase * 0.4;
            draft.estimated.insert(CenterToFront);
        }
        CarModel::HoldenAstra => {
            // Geometry aside, copied from the Volt.
            g.mass = 1363.0 + STD_CARGO_KG;
            g.wheelbase = 2.662;
            g.center_to_front = g.wheelbase * 0.4;
            t.min_enable_speed = mph(18.0);
            g.steer_ratio = 15.7;
            draft
                .estimated
                .extend(&[CenterToFront, SteerRatio, MinEnableSpeed]);
        }
        CarModel::Acadia | CarModel::AcadiaNoAcc => {
            t.min_enable_speed = -1.0;
            g.mass = lb(3956.0) + STD_CARGO_KG;
            g.wheelbase = 2.86;
            g.steer_ratio = 16.5;
            g.center_to_front = g.wheelbase * 0.4;
            draft.lateral = LateralPid::constant(0.5, 0.1, 0.00004);
            draft.estimated.extend(&[SteerRatio, LateralTuning]);
        }
        CarModel::BuickRegal => {
            t.min_enable_speed = mph(18.0);
            g.mass = lb(3779.0) + STD_CARGO_KG;
            g.wheelbase = 2.83;
            g.steer_ratio = 14.4;
            g.center_to_front = g.wheelbase * 0.4;
            draft.estimated.extend(&[SteerRatio, CenterToFront]);
        }
        CarModel::CadillacAts => {
            t.min_enable_speed = mph(18.0);
            g.mass = 1601.0 + STD_CARGO_KG;
            g.wheelbase = 2.78;
            g.steer_ratio = 15.3;
            g.center_to_front = g.wheelbase * 0.49;
        }
        CarModel::BoltNoAcc => {
            t.min_enable_speed = if draft.features.has_gas_interceptor {
                mph(5.0)
            } else {
                mph(25.0)
            };
            g.mass = 1616.0 + STD_CARGO_KG;
            g.wheelbase = 2.60096;
            g.steer_ratio = 16.8;
            g.center_to_front = 2.0828;
            g.tire_stiffness_factor = 1.0;
            draft.estimated.remove(TireStiffnessFactor);
            draft.estimated.insert(CenterToFront);
        }
        CarModel::EquinoxNoAcc => {
            t.min_enable_speed = mph(18.0);
            g.mass = lb(3500.0) + STD_CARGO_KG;
            g.wheelbase = 2.72;
            g.steer_ratio = 14.4;
            g.center_to_front = g.wheelbase * 0.4;
            draft
                .estimated
                .extend(&[SteerRatio, SteerRatioRear, CenterToFront]);
        }
        CarModel::TahoeNoAcc => {
            t.min_enable_speed = mph(18.0);
            g.mass = lb(5602.0) + STD_CARGO_KG;
            g.wheelbase = 2.95;
            g.steer_ratio = 17.3;
            g.center_to_front = 2.59;
            draft
                .estimated
                .extend(&[SteerRatio, SteerRatioRear, CenterToFront]);
        }
        CarModel::Escalade => {
            t.min_enable_speed = mph(18.0);
            g.mass = 2645.0 + STD_CARGO_KG;
            g.wheelbase = 3.30;
            g.steer_ratio = 17.3;
            g.center_to_front = g.wheelbase * 0.4;
            draft.estimated.insert(CenterToFront);
        }
        CarModel::Unknown => {
            draft
                .estimated
                .extend(&[Mass, Wheelbase, CenterToFront, SteerRatio, MinEnableSpeed]);
        }
    }
    g.steer_ratio_rear = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bolt_min_enable_depends_on_interceptor() {
        let plain = resolve(CarModel::BoltNoAcc, &Fingerprint::new());
        let pedal = resolve(
            CarModel::BoltNoAcc,
            &Fingerprint::new().with_message(0, 0x201, 6),
        );
        assert_relative_eq!(plain.min_enable_speed(), mph(25.0));
        assert_relative_eq!(pedal.min_enable_speed(), mph(5.0));
        assert!(pedal.min_enable_speed() < plain.min_enable_speed());
    }

    #[test]
    fn test_custom_interceptor_address() {
        let registry = VehicleProfileRegistry::new(SignalAddress {
            bus: 1,
            address: 0x300,
        });
        let fp = Fingerprint::new().with_message(1, 0x300, 6);
        assert!(registry.resolve(CarModel::Volt, &fp).has_gas_interceptor());
        assert!(!resolve(CarModel::Volt, &fp).has_gas_interceptor());
    }

    #[test]
    fn test_unknown_id_falls_back_to_baseline() {
        let fp = Fingerprint::new();
        let profile = resolve_id("TOYOTA PRIUS 2017", &fp);
        assert_eq!(profile.model(), CarModel::Unknown);
        assert_eq!(profile, resolve(CarModel::Unknown, &fp));
        assert!(profile.estimated().contains(ProfileField::Mass));
    }

    #[test]
    fn test_acadia_has_no_enable_limit() {
        let profile = resolve(CarModel::AcadiaNoAcc, &Fingerprint::new());
        assert!(profile.min_enable_speed() < 0.0);
        assert_relative_eq!(profile.lateral().kp.eval(20.0), 0.5);
        assert_relative_eq!(profile.lateral().ki.eval(20.0), 0.1);
    }
}
