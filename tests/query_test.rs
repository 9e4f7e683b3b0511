use chrono::NaiveDate;
use constellation::error::DealError;
use constellation::query::{parse_date, BoardType, CabinClass, SearchParams, TripType};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn make_valid_params() -> SearchParams {
    SearchParams::starting_from(today())
}

#[test]
fn defaults_match_form() {
    let p = make_valid_params();
    assert_eq!(p.departure_date, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    assert_eq!(p.adults, 2);
    assert_eq!(p.children, 0);
    assert_eq!(p.trip, TripType::RoundTrip);
    assert_eq!(p.cabin, CabinClass::Economy);
    assert_eq!(p.budget_per_person, 700);
    assert!(p.include_hotel);
    assert!(p.board.is_none());
    assert_eq!(p.currency, "GBP");
}

#[test]
fn valid_params_pass() {
    assert!(make_valid_params().validate().is_ok());
}

#[test]
fn return_date_adds_nights() {
    let mut p = make_valid_params();
    p.nights = 4;
    assert_eq!(p.return_date(), NaiveDate::from_ymd_opt(2026, 4, 4));
    p.trip = TripType::OneWay;
    assert_eq!(p.return_date(), None);
}

#[test]
fn rejects_lowercase_airport() {
    let mut p = make_valid_params();
    p.origin = "ema".into();
    assert!(matches!(p.validate(), Err(DealError::InvalidAirport(_))));
}

#[test]
fn rejects_too_long_airport() {
    let mut p = make_valid_params();
    p.destination = "ALCX".into();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_same_origin_and_destination() {
    let mut p = make_valid_params();
    p.destination = p.origin.clone();
    assert!(p.validate().is_err());
}

#[test]
fn rejects_zero_adults() {
    let mut p = make_valid_params();
    p.adults = 0;
    assert!(p.validate().is_err());
}

#[test]
fn rejects_more_than_nine_passengers() {
    let mut p = make_valid_params();
    p.adults = 6;
    p.children = 4;
    assert!(p.validate().is_err());
    p.children = 3;
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_stars_out_of_range() {
    let mut p = make_valid_params();
    p.min_stars = 0;
    assert!(p.validate().is_err());
    p.min_stars = 6;
    assert!(p.validate().is_err());
    p.min_stars = 5;
    assert!(p.validate().is_ok());
}

#[test]
fn rejects_zero_budget() {
    let mut p = make_valid_params();
    p.budget_per_person = 0;
    assert!(p.validate().is_err());
}

#[test]
fn rejects_zero_nights_round_trip() {
    let mut p = make_valid_params();
    p.nights = 0;
    assert!(p.validate().is_err());
    p.trip = TripType::OneWay;
    assert!(p.validate().is_ok());
}

#[test]
fn search_body_leaves_out_route() {
    let body = serde_json::to_value(make_valid_params().to_search_body()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "budgetPerPerson": 700,
            "minStars": 3,
            "departureDate": "2026-03-31",
        })
    );
}

#[test]
fn realtime_query_carries_route() {
    let q = make_valid_params().to_realtime_query();
    assert_eq!(q.origin, "EMA");
    assert_eq!(q.destination, "ALC");
    assert_eq!(q.adults, 2);
    assert!(q.validate().is_ok());
}

#[test]
fn parse_date_formats() {
    assert_eq!(parse_date("2026-02-28").unwrap(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    assert!(matches!(parse_date("2026-02-30"), Err(DealError::InvalidDate(_))));
    assert!(parse_date("03-01-2026").is_err());
    assert!(parse_date("tomorrow").is_err());
}

#[test]
fn enum_parsing() {
    assert_eq!(CabinClass::from_str_loose("premium-economy").unwrap(), CabinClass::PremiumEconomy);
    assert!(CabinClass::from_str_loose("steerage").is_err());
    assert_eq!(TripType::from_str_loose("one-way").unwrap(), TripType::OneWay);
    assert!(TripType::from_str_loose("multi-city").is_err());
    assert_eq!(BoardType::from_str_loose("HB").unwrap().code(), "HB");
    assert_eq!(BoardType::from_str_loose("all-inclusive").unwrap(), BoardType::AllInclusive);
    assert!(BoardType::from_str_loose("XX").is_err());
}

#[test]
fn summary_describes_trip() {
    let mut p = make_valid_params();
    p.board = Some(BoardType::HalfBoard);
    assert_eq!(
        p.summary(),
        "EMA → ALC, 2026-03-31 to 2026-04-07, 2 adults, 3★+ HB, budget 700 GBP"
    );

    p.trip = TripType::OneWay;
    p.children = 1;
    p.board = None;
    let line = p.summary();
    assert!(line.contains("2026-03-31 one way"));
    assert!(line.contains("2 adults, 1 children"));
    assert!(line.contains("any board"));
}
