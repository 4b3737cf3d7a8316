use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, from_value, json, to_string, to_value};
use medfind_core::models::{booking::Booking, center::Center};

fn sample_center() -> Center {
    from_value(json!({
        "Hospital Name": "CEDARS-SINAI MEDICAL CENTER",
        "Address": "8700 BEVERLY BLVD",
        "City": "LOS ANGELES",
        "State": "CA",
        "ZIP Code": "90048",
        "Hospital overall rating": "4",
        "County Name": "LOS ANGELES",
        "Hospital Type": "Acute Care Hospitals"
    }))
    .expect("Failed to deserialize center")
}

#[test]
fn test_center_from_directory_json() {
    let center = sample_center();

    assert_eq!(center.hospital_name, "CEDARS-SINAI MEDICAL CENTER");
    assert_eq!(center.address, "8700 BEVERLY BLVD");
    assert_eq!(center.city, "LOS ANGELES");
    assert_eq!(center.state, "CA");
    assert_eq!(center.zip_code, "90048");
    assert_eq!(center.overall_rating.as_deref(), Some("4"));
    assert_eq!(center.extra.len(), 2);
    assert_eq!(center.extra["Hospital Type"], json!("Acute Care Hospitals"));
}

#[test]
fn test_center_keeps_unknown_fields_on_serialize() {
    let center = sample_center();
    let value = to_value(&center).expect("Failed to serialize center");

    assert_eq!(value["County Name"], json!("LOS ANGELES"));
    assert_eq!(value["Hospital Name"], json!("CEDARS-SINAI MEDICAL CENTER"));

    let back: Center = from_value(value).expect("Failed to deserialize center");
    assert_eq!(back, center);
}

#[rstest]
#[case(json!(35233), "35233")]
#[case(json!("35233"), "35233")]
#[case(json!(null), "")]
fn test_zip_code_normalized(#[case] zip: serde_json::Value, #[case] expected: &str) {
    let center: Center = from_value(json!({
        "Hospital Name": "SOUTHEAST HEALTH MEDICAL CENTER",
        "ZIP Code": zip,
    }))
    .expect("Failed to deserialize center");

    assert_eq!(center.zip_code, expected);
}

#[rstest]
#[case(json!(3), Some("3"))]
#[case(json!("Not Available"), Some("Not Available"))]
#[case(json!(null), None)]
fn test_rating_normalized(#[case] rating: serde_json::Value, #[case] expected: Option<&str>) {
    let center: Center = from_value(json!({
        "Hospital Name": "MARSHALL MEDICAL CENTERS",
        "Hospital overall rating": rating,
    }))
    .expect("Failed to deserialize center");

    assert_eq!(center.overall_rating.as_deref(), expected);
}

#[test]
fn test_center_display_helpers() {
    let center = sample_center();
    assert_eq!(
        center.display_address(),
        "8700 BEVERLY BLVD, LOS ANGELES, CA 90048"
    );
    assert_eq!(center.rating_label(), "4");

    let unrated = Center {
        hospital_name: "UNRATED".to_string(),
        ..Default::default()
    };
    assert_eq!(unrated.rating_label(), "N/A");
}

#[test]
fn test_booking_serialization() {
    let booking = Booking {
        id: 1_760_620_800_123,
        center: sample_center(),
        date: "2026-10-16T07:00:00.000Z".to_string(),
        time: "10:00".to_string(),
        formatted_date: "Fri, Oct 16, 2026".to_string(),
    };

    let json = to_string(&booking).expect("Failed to serialize booking");
    assert!(json.contains("\"formattedDate\""));
    assert!(json.contains("\"center\""));

    let deserialized: Booking = from_str(&json).expect("Failed to deserialize booking");
    assert_eq!(deserialized, booking);
}

#[test]
fn test_null_text_fields_read_as_empty() {
    let centers: Vec<Center> = from_value(json!([
        {
            "Hospital Name": "GOOD SAMARITAN HOSPITAL",
            "Address": null,
            "City": null,
            "State": "CA",
            "ZIP Code": 90017
        },
        {
            "Hospital Name": "CEDARS-SINAI MEDICAL CENTER",
            "Address": "8700 BEVERLY BLVD",
            "City": "LOS ANGELES",
            "State": "CA",
            "ZIP Code": "90048"
        }
    ]))
    .expect("Failed to deserialize centers");

    assert_eq!(centers.len(), 2);
    assert_eq!(centers[0].hospital_name, "GOOD SAMARITAN HOSPITAL");
    assert_eq!(centers[0].address, "");
    assert_eq!(centers[0].city, "");
    assert_eq!(centers[1].address, "8700 BEVERLY BLVD");
}
