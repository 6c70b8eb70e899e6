use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One editable quantity on the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Miles,
    Kilometers,
    Meters,
    Feet,
    MilesPerHour,
    KilometersPerHour,
    MinutesPerMile,
    MinutesPerKilometer,
}

/// A set of quantities that are all derivable from one another.
/// Quantities in different groups never cross-convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionGroup {
    /// Miles and kilometers (run distances).
    Distance,
    /// Meters and feet (elevation and short distances).
    Elevation,
    /// mph, km/h, min/mile, and min/km (all four mutually derivable).
    SpeedPace,
}

impl ConversionGroup {
    /// Section title for display.
    pub fn title(self) -> &'static str {
        match self {
            ConversionGroup::Distance => "Distance",
            ConversionGroup::Elevation => "Elevation",
            ConversionGroup::SpeedPace => "Speed & Pace",
        }
    }

    /// All quantities belonging to this group.
    pub fn members(self) -> &'static [Quantity] {
        match self {
            ConversionGroup::Distance => &[Quantity::Miles, Quantity::Kilometers],
            ConversionGroup::Elevation => &[Quantity::Meters, Quantity::Feet],
            ConversionGroup::SpeedPace => &[
                Quantity::MilesPerHour,
                Quantity::KilometersPerHour,
                Quantity::MinutesPerMile,
                Quantity::MinutesPerKilometer,
            ],
        }
    }
}

impl Quantity {
    /// The conversion group this quantity belongs to.
    pub fn group(self) -> ConversionGroup {
        match self {
            Quantity::Miles | Quantity::Kilometers => ConversionGroup::Distance,
            Quantity::Meters | Quantity::Feet => ConversionGroup::Elevation,
            Quantity::MilesPerHour
            | Quantity::KilometersPerHour
            | Quantity::MinutesPerMile
            | Quantity::MinutesPerKilometer => ConversionGroup::SpeedPace,
        }
    }

    /// Pace quantities use the M:SS codec; everything else is a plain decimal.
    pub fn is_pace(self) -> bool {
        matches!(
            self,
            Quantity::MinutesPerMile | Quantity::MinutesPerKilometer
        )
    }

    /// Short unit label for display.
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Miles => "miles",
            Quantity::Kilometers => "kilometers",
            Quantity::Meters => "meters",
            Quantity::Feet => "feet",
            Quantity::MilesPerHour => "mph",
            Quantity::KilometersPerHour => "km/h",
            Quantity::MinutesPerMile => "min/mile",
            Quantity::MinutesPerKilometer => "min/km",
        }
    }
}

/// The state of one editable field: an optional non-negative value plus the
/// text last shown for it. Re-parsing the text reproduces the value within
/// formatting tolerance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub text: String,
}

impl FieldValue {
    /// A field holding a parsed value and its rendered text.
    pub fn with_value(value: f64, text: String) -> Self {
        Self {
            value: Some(value),
            text,
        }
    }

    /// Raw text with no usable value (mid-keystroke or malformed input).
    pub fn text_only(text: String) -> Self {
        Self { value: None, text }
    }

    /// Empty field (cleared / not yet entered).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.value.is_none()
    }
}

/// Snapshot of all eight converter fields. Owned by the caller and only
/// transformed through the reducers in `sync`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSnapshot {
    pub miles: FieldValue,
    pub kilometers: FieldValue,
    pub meters: FieldValue,
    pub feet: FieldValue,
    pub miles_per_hour: FieldValue,
    pub kilometers_per_hour: FieldValue,
    pub minutes_per_mile: FieldValue,
    pub minutes_per_kilometer: FieldValue,
}

impl FieldSnapshot {
    pub fn field(&self, quantity: Quantity) -> &FieldValue {
        match quantity {
            Quantity::Miles => &self.miles,
            Quantity::Kilometers => &self.kilometers,
            Quantity::Meters => &self.meters,
            Quantity::Feet => &self.feet,
            Quantity::MilesPerHour => &self.miles_per_hour,
            Quantity::KilometersPerHour => &self.kilometers_per_hour,
            Quantity::MinutesPerMile => &self.minutes_per_mile,
            Quantity::MinutesPerKilometer => &self.minutes_per_kilometer,
        }
    }

    pub fn field_mut(&mut self, quantity: Quantity) -> &mut FieldValue {
        match quantity {
            Quantity::Miles => &mut self.miles,
            Quantity::Kilometers => &mut self.kilometers,
            Quantity::Meters => &mut self.meters,
            Quantity::Feet => &mut self.feet,
            Quantity::MilesPerHour => &mut self.miles_per_hour,
            Quantity::KilometersPerHour => &mut self.kilometers_per_hour,
            Quantity::MinutesPerMile => &mut self.minutes_per_mile,
            Quantity::MinutesPerKilometer => &mut self.minutes_per_kilometer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_membership() {
        assert_eq!(Quantity::Miles.group(), ConversionGroup::Distance);
        assert_eq!(Quantity::Kilometers.group(), ConversionGroup::Distance);
        assert_eq!(Quantity::Meters.group(), ConversionGroup::Elevation);
        assert_eq!(Quantity::Feet.group(), ConversionGroup::Elevation);
        assert_eq!(Quantity::MilesPerHour.group(), ConversionGroup::SpeedPace);
        assert_eq!(
            Quantity::MinutesPerKilometer.group(),
            ConversionGroup::SpeedPace
        );

        // Every quantity appears in exactly its own group's member list
        for group in [
            ConversionGroup::Distance,
            ConversionGroup::Elevation,
            ConversionGroup::SpeedPace,
        ] {
            for &quantity in group.members() {
                assert_eq!(quantity.group(), group);
            }
        }
    }

    #[test]
    fn test_pace_quantities() {
        assert!(Quantity::MinutesPerMile.is_pace());
        assert!(Quantity::MinutesPerKilometer.is_pace());
        assert!(!Quantity::MilesPerHour.is_pace());
        assert!(!Quantity::Miles.is_pace());
    }

    #[test]
    fn test_quantity_serde_names() {
        // Tool parameters deserialize quantities from snake_case strings
        let quantity: Quantity = serde_json::from_str("\"miles_per_hour\"").unwrap();
        assert_eq!(quantity, Quantity::MilesPerHour);
        assert_eq!(
            serde_json::to_string(&Quantity::MinutesPerKilometer).unwrap(),
            "\"minutes_per_kilometer\""
        );
    }

    #[test]
    fn test_field_value_states() {
        assert!(FieldValue::empty().is_empty());
        assert!(!FieldValue::with_value(5.0, "5.00".to_string()).is_empty());
        assert!(!FieldValue::text_only("5.".to_string()).is_empty());
    }

    #[test]
    fn test_snapshot_field_access() {
        let mut snapshot = FieldSnapshot::default();
        snapshot.field_mut(Quantity::Feet).text = "328.08".to_string();
        assert_eq!(snapshot.feet.text, "328.08");
        assert_eq!(snapshot.field(Quantity::Feet).text, "328.08");
        // Untouched fields start empty
        assert!(snapshot.field(Quantity::Miles).is_empty());
    }
}
