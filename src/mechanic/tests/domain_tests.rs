//! Coordinate validation, distance and mechanic type set tests.

use crate::mechanic::domain::{
    Coordinates, GeoDomainError, MechanicType, MechanicTypeSet, round_to_hundredths,
};
use rstest::rstest;

#[rstest]
fn reference_points_are_about_seven_kilometres_apart() {
    let origin = Coordinates::new(28.70, 77.10).expect("valid origin");
    let nearby = Coordinates::new(28.75, 77.15).expect("valid point");

    let distance = origin.distance_km(nearby);

    assert!((6.5..7.5).contains(&distance), "got {distance}");
    assert!((origin.distance_km(nearby) - nearby.distance_km(origin)).abs() < 1e-9);
}

#[rstest]
fn distance_to_self_is_zero() {
    let point = Coordinates::new(-33.86, 151.21).expect("valid point");
    assert!(point.distance_km(point).abs() < 1e-9);
}

#[rstest]
#[case(90.5, 0.0, GeoDomainError::LatitudeOutOfRange(90.5))]
#[case(-91.0, 0.0, GeoDomainError::LatitudeOutOfRange(-91.0))]
#[case(0.0, 180.5, GeoDomainError::LongitudeOutOfRange(180.5))]
#[case(0.0, -200.0, GeoDomainError::LongitudeOutOfRange(-200.0))]
#[case(f64::NAN, 0.0, GeoDomainError::NonFiniteCoordinate)]
#[case(0.0, f64::INFINITY, GeoDomainError::NonFiniteCoordinate)]
fn out_of_range_coordinates_are_rejected(
    #[case] latitude: f64,
    #[case] longitude: f64,
    #[case] expected: GeoDomainError,
) {
    assert_eq!(Coordinates::new(latitude, longitude), Err(expected));
}

#[rstest]
#[case(90.0, 180.0)]
#[case(-90.0, -180.0)]
fn boundary_coordinates_are_accepted(#[case] latitude: f64, #[case] longitude: f64) {
    assert!(Coordinates::new(latitude, longitude).is_ok());
}

#[rstest]
fn half_present_coordinates_are_rejected() {
    assert_eq!(
        Coordinates::from_optional(Some(10.0), None),
        Err(GeoDomainError::IncompleteCoordinates)
    );
    assert_eq!(Coordinates::from_optional(None, None), Ok(None));
}

#[rstest]
#[case(6.93456, 6.93)]
#[case(0.0, 0.0)]
fn distances_round_to_two_decimals(#[case] raw: f64, #[case] expected: f64) {
    assert!((round_to_hundredths(raw) - expected).abs() < 1e-9);
}

#[rstest]
fn legacy_encoding_parses_into_exact_membership() {
    let types = MechanicTypeSet::parse_legacy("two_wheeler, automotive,").expect("valid tokens");

    assert!(types.contains(MechanicType::TwoWheeler));
    assert!(types.contains(MechanicType::Automotive));
    assert!(!types.contains(MechanicType::HeavyVehicle));
}

#[rstest]
#[case("automotive_plus")]
#[case("heavy_vehicle,bicycle")]
fn unknown_legacy_tokens_are_rejected(#[case] encoded: &str) {
    assert!(MechanicTypeSet::parse_legacy(encoded).is_err());
}

#[rstest]
fn storage_values_are_canonical_and_deduplicated() {
    let types = MechanicTypeSet::new([
        MechanicType::HeavyVehicle,
        MechanicType::TwoWheeler,
        MechanicType::HeavyVehicle,
    ]);
    assert_eq!(types.to_storage_values(), vec!["two_wheeler", "heavy_vehicle"]);
}

#[rstest]
#[case(MechanicType::TwoWheeler, "two_wheeler")]
#[case(MechanicType::Automotive, "automotive")]
#[case(MechanicType::HeavyVehicle, "heavy_vehicle")]
fn mechanic_type_parses_its_storage_form(#[case] mechanic_type: MechanicType, #[case] text: &str) {
    assert_eq!(MechanicType::try_from(text), Ok(mechanic_type));
    assert_eq!(mechanic_type.as_str(), text);
}
