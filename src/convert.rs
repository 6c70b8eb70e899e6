use thiserror::Error;

/// Kilometers in one mile.
pub const MILE_IN_KM: f64 = 1.60934;

/// Feet in one meter.
pub const FEET_PER_METER: f64 = 3.28084;

/// Error from a pace/speed conversion with no defined result.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConvertError {
    /// The harmonic pace/speed relation divides by the input, so it is
    /// undefined for zero and negative values.
    #[error("conversion undefined for non-positive value {0}")]
    UndefinedConversion(f64),
}

/// Convert miles to kilometers. Callers pass non-negative input.
pub fn miles_to_kilometers(miles: f64) -> f64 {
    miles * MILE_IN_KM
}

/// Convert kilometers to miles.
pub fn kilometers_to_miles(kilometers: f64) -> f64 {
    kilometers / MILE_IN_KM
}

/// Convert meters to feet.
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Convert feet to meters.
pub fn feet_to_meters(feet: f64) -> f64 {
    feet / FEET_PER_METER
}

/// Convert miles per hour to kilometers per hour.
pub fn mph_to_kmh(mph: f64) -> f64 {
    mph * MILE_IN_KM
}

/// Convert kilometers per hour to miles per hour.
pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh / MILE_IN_KM
}

/// Convert pace (min/mile) to speed (mph).
pub fn pace_to_speed_mph(min_per_mile: f64) -> Result<f64, ConvertError> {
    if min_per_mile <= 0.0 {
        return Err(ConvertError::UndefinedConversion(min_per_mile));
    }
    Ok(60.0 / min_per_mile)
}

/// Convert speed (mph) to pace (min/mile).
pub fn speed_to_pace_min_per_mile(mph: f64) -> Result<f64, ConvertError> {
    if mph <= 0.0 {
        return Err(ConvertError::UndefinedConversion(mph));
    }
    Ok(60.0 / mph)
}

/// Convert speed (km/h) to pace (min/km).
pub fn kmh_to_pace_min_per_km(kmh: f64) -> Result<f64, ConvertError> {
    if kmh <= 0.0 {
        return Err(ConvertError::UndefinedConversion(kmh));
    }
    Ok(60.0 / kmh)
}

/// Convert pace (min/km) to speed (km/h).
pub fn pace_min_per_km_to_kmh(min_per_km: f64) -> Result<f64, ConvertError> {
    if min_per_km <= 0.0 {
        return Err(ConvertError::UndefinedConversion(min_per_km));
    }
    Ok(60.0 / min_per_km)
}

/// Convert pace from minutes per mile to minutes per kilometer.
pub fn min_per_mile_to_min_per_km(min_per_mile: f64) -> f64 {
    min_per_mile / MILE_IN_KM
}

/// Convert pace from minutes per kilometer to minutes per mile.
pub fn min_per_km_to_min_per_mile(min_per_km: f64) -> f64 {
    min_per_km * MILE_IN_KM
}
