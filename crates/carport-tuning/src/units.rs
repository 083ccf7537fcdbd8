//! Unit conversions used by the vehicle tables.

/// Miles per hour to metres per second.
pub const MPH_TO_MS: f64 = 0.44704;
/// Metres per second to miles per hour.
pub const MS_TO_MPH: f64 = 1.0 / MPH_TO_MS;
/// Kilometres per hour to metres per second.
pub const KPH_TO_MS: f64 = 1.0 / 3.6;
/// Metres per second to kilometres per hour.
pub const MS_TO_KPH: f64 = 3.6;
/// Pounds to kilograms.
pub const LB_TO_KG: f64 = 0.453592;

/// Speed in mph expressed in m/s.
#[inline]
pub fn mph(value: f64) -> f64 {
    value * MPH_TO_MS
}

/// Weight in lb expressed in kg.
#[inline]
pub fn lb(value: f64) -> f64 {
    value * LB_TO_KG
}
