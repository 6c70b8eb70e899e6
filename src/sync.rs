//! Field synchronization: pure reducers that keep a `FieldSnapshot`
//! consistent as one field at a time is edited.
//!
//! The edited field is the single authoritative value for the pass. Every
//! other field in its conversion group is derived from it exactly once, and
//! derived writes never trigger further derivation, so a group of four
//! mutually derivable fields cannot feed back into itself.

use crate::convert::{self, ConvertError};
use crate::models::{FieldSnapshot, FieldValue, Quantity};
use crate::pace;

/// Apply one edit and return the updated snapshot.
///
/// Parse outcomes:
/// - a non-negative value: the edited field keeps the text as typed and every
///   other field in its group is recomputed from the value;
/// - empty text: explicit clear, emptied across the whole group;
/// - malformed text: no-op on all other fields, so mid-keystroke input
///   (e.g. "8:" on the way to "8:30") never flashes stale derivations.
pub fn edit_field(snapshot: &FieldSnapshot, field: Quantity, raw_text: &str) -> FieldSnapshot {
    let mut next = snapshot.clone();
    match parse_field(field, raw_text) {
        Ok(Some(value)) => {
            *next.field_mut(field) = FieldValue::with_value(value, raw_text.to_string());
            for &target in field.group().members() {
                if target == field {
                    continue;
                }
                *next.field_mut(target) = match derive(field, value, target) {
                    Ok(derived) => FieldValue::with_value(derived, render(target, derived)),
                    // Undefined derivation (pace/speed of zero) leaves only
                    // that dependent field unset.
                    Err(ConvertError::UndefinedConversion(_)) => FieldValue::empty(),
                };
            }
        }
        Ok(None) => {
            for &member in field.group().members() {
                *next.field_mut(member) = FieldValue::empty();
            }
        }
        Err(()) => {
            *next.field_mut(field) = FieldValue::text_only(raw_text.to_string());
        }
    }
    next
}

/// Exchange two fields' texts, then re-derive from the value that landed in
/// `field_a`. The swapped-in value becomes authoritative instead of the
/// snapshot silently holding two inconsistent numbers.
pub fn swap_fields(
    snapshot: &FieldSnapshot,
    field_a: Quantity,
    field_b: Quantity,
) -> FieldSnapshot {
    let mut swapped = snapshot.clone();
    let previous_a = swapped.field(field_a).clone();
    let swapped_in = swapped.field(field_b).clone();
    *swapped.field_mut(field_a) = swapped_in.clone();
    *swapped.field_mut(field_b) = previous_a;
    edit_field(&swapped, field_a, &swapped_in.text)
}

/// Parse a field's raw text. `Ok(None)` is the explicit clear signal,
/// `Err(())` is malformed non-empty input.
fn parse_field(field: Quantity, raw_text: &str) -> Result<Option<f64>, ()> {
    if field.is_pace() {
        return pace::parse_pace(raw_text).map_err(|_| ());
    }
    let trimmed = raw_text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.is_finite() => Ok(Some(value)),
        _ => Err(()),
    }
}

/// Render a derived value in the target field's display format: M:SS for
/// pace fields, two decimal places for everything else.
fn render(target: Quantity, value: f64) -> String {
    if target.is_pace() {
        pace::format_pace(value)
    } else {
        format!("{value:.2}")
    }
}

/// Derive `target` from the active field's value. Only called for pairs in
/// the same conversion group.
fn derive(active: Quantity, value: f64, target: Quantity) -> Result<f64, ConvertError> {
    use Quantity::*;
    Ok(match (active, target) {
        (Miles, Kilometers) => convert::miles_to_kilometers(value),
        (Kilometers, Miles) => convert::kilometers_to_miles(value),
        (Meters, Feet) => convert::meters_to_feet(value),
        (Feet, Meters) => convert::feet_to_meters(value),

        (MilesPerHour, KilometersPerHour) => convert::mph_to_kmh(value),
        (MilesPerHour, MinutesPerMile) => convert::speed_to_pace_min_per_mile(value)?,
        (MilesPerHour, MinutesPerKilometer) => {
            convert::min_per_mile_to_min_per_km(convert::speed_to_pace_min_per_mile(value)?)
        }

        (KilometersPerHour, MilesPerHour) => convert::kmh_to_mph(value),
        (KilometersPerHour, MinutesPerKilometer) => convert::kmh_to_pace_min_per_km(value)?,
        (KilometersPerHour, MinutesPerMile) => {
            convert::min_per_km_to_min_per_mile(convert::kmh_to_pace_min_per_km(value)?)
        }

        (MinutesPerMile, MinutesPerKilometer) => convert::min_per_mile_to_min_per_km(value),
        (MinutesPerMile, MilesPerHour) => convert::pace_to_speed_mph(value)?,
        (MinutesPerMile, KilometersPerHour) => {
            convert::mph_to_kmh(convert::pace_to_speed_mph(value)?)
        }

        (MinutesPerKilometer, MinutesPerMile) => convert::min_per_km_to_min_per_mile(value),
        (MinutesPerKilometer, KilometersPerHour) => convert::pace_min_per_km_to_kmh(value)?,
        (MinutesPerKilometer, MilesPerHour) => {
            convert::kmh_to_mph(convert::pace_min_per_km_to_kmh(value)?)
        }

        // active == target: the edited field is never derived from itself.
        _ => value,
    })
}
