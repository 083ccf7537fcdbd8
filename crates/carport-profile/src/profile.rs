//! The immutable vehicle profile and the draft it is built from.
//!
//! A [`ProfileDraft`] carries the editable inputs (geometry, tuning,
//! thresholds, feature flags). [`ProfileDraft::finalize`] derives rotational
//! inertia and tire stiffness from the final geometry and freezes the result
//! into a [`VehicleProfile`]. Derived quantities therefore always reflect the
//! overrides applied before them.

use std::fmt;

use carport_errors::ValidationError;
use carport_errors::validate;
use carport_tuning::{
    LateralPid, LongitudinalPid, TireStiffness, TuningCurve, scale_rot_inertia,
    scale_tire_stiffness,
};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::CAR_NAME;
use crate::model::{CarModel, SafetyModel};

/// Profile fields whose values are guesses or copied from a sibling model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Mass,
    Wheelbase,
    CenterToFront,
    SteerRatio,
    SteerRatioRear,
    TireStiffnessFactor,
    RotationalInertia,
    SteerActuatorDelay,
    MinEnableSpeed,
    LateralTuning,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Mass,
        ProfileField::Wheelbase,
        ProfileField::CenterToFront,
        ProfileField::SteerRatio,
        ProfileField::SteerRatioRear,
        ProfileField::TireStiffnessFactor,
        ProfileField::RotationalInertia,
        ProfileField::SteerActuatorDelay,
        ProfileField::MinEnableSpeed,
        ProfileField::LateralTuning,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mass => "mass",
            Self::Wheelbase => "wheelbase",
            Self::CenterToFront => "center_to_front",
            Self::SteerRatio => "steer_ratio",
            Self::SteerRatioRear => "steer_ratio_rear",
            Self::TireStiffnessFactor => "tire_stiffness_factor",
            Self::RotationalInertia => "rotational_inertia",
            Self::SteerActuatorDelay => "steer_actuator_delay",
            Self::MinEnableSpeed => "min_enable_speed",
            Self::LateralTuning => "lateral_tuning",
        };
        f.write_str(name)
    }
}

/// Set of low-confidence profile fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EstimatedFields(u16);

impl EstimatedFields {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn of(fields: &[ProfileField]) -> Self {
        let mut set = Self::empty();
        set.extend(fields);
        set
    }

    pub fn insert(&mut self, field: ProfileField) {
        self.0 |= field.bit();
    }

    pub fn remove(&mut self, field: ProfileField) {
        self.0 &= !field.bit();
    }

    pub fn extend(&mut self, fields: &[ProfileField]) {
        for &field in fields {
            self.insert(field);
        }
    }

    pub fn contains(self, field: ProfileField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = ProfileField> {
        ProfileField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl Serialize for EstimatedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for field in self.iter() {
            seq.serialize_element(&field)?;
        }
        seq.end()
    }
}

/// Chassis geometry. Lengths in metres, mass in kg including standard cargo.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Geometry {
    pub mass: f64,
    pub wheelbase: f64,
    pub center_to_front: f64,
    pub steer_ratio: f64,
    pub steer_ratio_rear: f64,
    pub tire_stiffness_factor: f64,
}

/// Quantities derived from [`Geometry`] at finalization.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Dynamics {
    pub rotational_inertia: f64,
    pub tire_stiffness: TireStiffness,
}

impl Dynamics {
    fn derive(geometry: &Geometry) -> Self {
        Self {
            rotational_inertia: scale_rot_inertia(geometry.mass, geometry.wheelbase),
            tire_stiffness: scale_tire_stiffness(
                geometry.mass,
                geometry.wheelbase,
                geometry.center_to_front,
                geometry.tire_stiffness_factor,
            ),
        }
    }
}

/// Speeds in m/s, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Thresholds {
    /// Below this speed engagement is refused. Negative means no limit.
    pub min_enable_speed: f64,
    /// Below this speed steering is unavailable.
    pub min_steer_speed: f64,
    pub steer_actuator_delay: f64,
    pub steer_rate_cost: f64,
    pub steer_limit_timer: f64,
    pub radar_time_step: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Features {
    pub has_gas_interceptor: bool,
    pub no_factory_controller: bool,
    /// The interface owns longitudinal control.
    pub longitudinal_control: bool,
    /// The factory cruise is not consulted for engagement.
    pub stock_cruise_disabled: bool,
    pub community_feature: bool,
}

/// Editable profile inputs for a model, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub model: CarModel,
    pub geometry: Geometry,
    pub lateral: LateralPid,
    pub longitudinal: LongitudinalPid,
    pub start_accel: f64,
    pub thresholds: Thresholds,
    pub features: Features,
    pub estimated: EstimatedFields,
}

impl ProfileDraft {
    /// Brand-wide defaults shared by every model.
    pub fn baseline(model: CarModel, has_gas_interceptor: bool) -> Self {
        let wheelbase = 2.69;
        Self {
            model,
            geometry: Geometry {
                mass: 1607.0 + carport_tuning::STD_CARGO_KG,
                wheelbase,
                center_to_front: wheelbase * 0.4,
                steer_ratio: 15.7,
                steer_ratio_rear: 0.0,
                tire_stiffness_factor: 0.444,
            },
            lateral: LateralPid::constant(0.2, 0.0, 0.00004),
            longitudinal: LongitudinalPid {
                kp: TuningCurve::from_points([(5.0, 2.4), (35.0, 1.5)]),
                ki: TuningCurve::constant(0.36),
            },
            start_accel: 0.8,
            thresholds: Thresholds {
                min_enable_speed: carport_tuning::units::mph(18.0),
                min_steer_speed: carport_tuning::units::mph(7.0),
                steer_actuator_delay: 0.1,
                steer_rate_cost: 1.0,
                steer_limit_timer: 0.4,
                radar_time_step: 0.0667,
            },
            features: Features {
                has_gas_interceptor,
                no_factory_controller: model.is_no_factory_controller(),
                longitudinal_control: true,
                stock_cruise_disabled: true,
                community_feature: true,
            },
            estimated: EstimatedFields::of(&[
                ProfileField::TireStiffnessFactor,
                ProfileField::RotationalInertia,
                ProfileField::SteerActuatorDelay,
            ]),
        }
    }

    /// Derive dynamics from the final geometry and freeze the profile.
    pub fn finalize(self) -> VehicleProfile {
        let dynamics = Dynamics::derive(&self.geometry);
        VehicleProfile {
            model: self.model,
            car_name: CAR_NAME,
            safety_model: SafetyModel::Gm,
            geometry: self.geometry,
            dynamics,
            lateral: self.lateral,
            longitudinal: self.longitudinal,
            start_accel: self.start_accel,
            thresholds: self.thresholds,
            features: self.features,
            estimated: self.estimated,
        }
    }
}

/// Resolved, read-only vehicle profile.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct VehicleProfile {
    model: CarModel,
    car_name: &'static str,
    safety_model: SafetyModel,
    geometry: Geometry,
    dynamics: Dynamics,
    lateral: LateralPid,
    longitudinal: LongitudinalPid,
    start_accel: f64,
    thresholds: Thresholds,
    features: Features,
    estimated: EstimatedFields,
}

impl VehicleProfile {
    pub fn model(&self) -> CarModel {
        self.model
    }

    pub fn car_name(&self) -> &'static str {
        self.car_name
    }

    pub fn safety_model(&self) -> SafetyModel {
        self.safety_model
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn dynamics(&self) -> &Dynamics {
        &self.dynamics
    }

    pub fn lateral(&self) -> &LateralPid {
        &self.lateral
    }

    pub fn longitudinal(&self) -> &LongitudinalPid {
        &self.longitudinal
    }

    pub fn start_accel(&self) -> f64 {
        self.start_accel
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn estimated(&self) -> EstimatedFields {
        self.estimated
    }

    #[inline]
    pub fn min_enable_speed(&self) -> f64 {
        self.thresholds.min_enable_speed
    }

    #[inline]
    pub fn min_steer_speed(&self) -> f64 {
        self.thresholds.min_steer_speed
    }

    #[inline]
    pub fn has_gas_interceptor(&self) -> bool {
        self.features.has_gas_interceptor
    }

    #[inline]
    pub fn is_no_factory_controller(&self) -> bool {
        self.features.no_factory_controller
    }

    /// Check physical plausibility of the resolved values.
    ///
    /// Every catalogue entry passes; this guards hand-built drafts.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> carport_errors::Result<()> {
        let g = &self.geometry;
        for (name, value) in [
            ("mass", g.mass),
            ("wheelbase", g.wheelbase),
            ("center_to_front", g.center_to_front),
            ("steer_ratio", g.steer_ratio),
            ("steer_ratio_rear", g.steer_ratio_rear),
            ("tire_stiffness_factor", g.tire_stiffness_factor),
            ("min_enable_speed", self.thresholds.min_enable_speed),
            ("min_steer_speed", self.thresholds.min_steer_speed),
        ] {
            validate!(value.is_finite(), ValidationError::not_finite(name));
        }
        validate!(g.mass > 0.0, ValidationError::not_positive("mass", g.mass));
        validate!(
            g.wheelbase > 0.0,
            ValidationError::not_positive("wheelbase", g.wheelbase)
        );
        validate!(
            g.center_to_front > 0.0 && g.center_to_front < g.wheelbase,
            ValidationError::out_of_range("center_to_front", g.center_to_front, 0.0, g.wheelbase)
        );
        validate!(
            g.steer_ratio > 0.0,
            ValidationError::not_positive("steer_ratio", g.steer_ratio)
        );
        validate!(
            g.tire_stiffness_factor > 0.0,
            ValidationError::not_positive("tire_stiffness_factor", g.tire_stiffness_factor)
        );
        self.lateral.kp.validate("lateral.kp")?;
        self.lateral.ki.validate("lateral.ki")?;
        self.longitudinal.kp.validate("longitudinal.kp")?;
        self.longitudinal.ki.validate("longitudinal.ki")?;
        Ok(())
    }
}
