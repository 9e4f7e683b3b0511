//! Hand-authored sample payloads, substituted when neither the live backend
//! nor a results snapshot can be reached.

use crate::model::{Deal, FlightDeal, HotelDeal, RealtimeFlight, Results};
use crate::query::RealtimeQuery;

pub const SAMPLE_SOURCE: &str = "sample";

const SAMPLE_TIMESTAMP: &str = "2025-09-01T08:00:00";

pub fn sample_flights() -> Vec<FlightDeal> {
    vec![
        FlightDeal {
            carrier: Some("Ryanair FR 4818".into()),
            origin: Some("EMA".into()),
            destination: Some("ALC".into()),
            departure: Some("2025-09-15T06:30:00".into()),
            arrival: Some("2025-09-15T09:15:00".into()),
            price: Some(189.0),
            stops: Some(0),
            airline_code: Some("FR".into()),
            ..Default::default()
        },
        FlightDeal {
            carrier: Some("Jet2 LS 641".into()),
            origin: Some("EMA".into()),
            destination: Some("ALC".into()),
            departure: Some("2025-09-15T14:20:00".into()),
            arrival: Some("2025-09-15T17:05:00".into()),
            price: Some(245.0),
            stops: Some(0),
            airline_code: Some("LS".into()),
            ..Default::default()
        },
    ]
}

pub fn sample_hotels() -> Vec<HotelDeal> {
    vec![
        HotelDeal {
            name: Some("Hotel Marina Delfin".into()),
            location: Some("Alicante".into()),
            stars: Some(4),
            board: Some("RO".into()),
            price: Some(420.0),
            check_in: Some("2025-09-15".into()),
            check_out: Some("2025-09-22".into()),
            ..Default::default()
        },
        HotelDeal {
            name: Some("Hotel Costa Blanca".into()),
            location: Some("Alicante".into()),
            stars: Some(3),
            board: Some("BB".into()),
            price: Some(360.0),
            check_in: Some("2025-09-15".into()),
            check_out: Some("2025-09-22".into()),
            ..Default::default()
        },
    ]
}

/// Three deals: a flight only, a hotel stay, and a flight + hotel package.
pub fn sample_results() -> Results {
    let flights = sample_flights();
    let hotels = sample_hotels();

    let deals = vec![
        Deal {
            timestamp: Some(SAMPLE_TIMESTAMP.into()),
            per_person: Some(189.0),
            total: Some(189.0),
            flight: flights[0].clone(),
            hotel: None,
            ..Default::default()
        },
        Deal {
            timestamp: Some(SAMPLE_TIMESTAMP.into()),
            per_person: Some(210.0),
            total: Some(420.0),
            flight: FlightDeal {
                carrier: Some("Hotel only".into()),
                origin: Some("EMA".into()),
                destination: Some("ALC".into()),
                ..Default::default()
            },
            hotel: Some(hotels[0].clone()),
            ..Default::default()
        },
        Deal {
            timestamp: Some(SAMPLE_TIMESTAMP.into()),
            per_person: Some(304.0),
            total: Some(609.0),
            flight: flights[1].clone(),
            hotel: Some(hotels[1].clone()),
            ..Default::default()
        },
    ];

    Results {
        count: Some(deals.len()),
        deals,
        queried_at: Some(SAMPLE_TIMESTAMP.into()),
        source: Some(SAMPLE_SOURCE.into()),
    }
}

/// Two flights on the requested route, priced per adult.
pub fn sample_realtime_flights(query: &RealtimeQuery) -> Vec<RealtimeFlight> {
    let adults = f64::from(query.adults.max(1));
    let date = query.date.format("%Y-%m-%d").to_string();
    let leg = |n: u32, dep: &str, arr: &str, price: f64, airline: &str, aircraft: &str| {
        RealtimeFlight {
            id: Some(format!("sample{n}_{}_{}", query.origin, query.destination)),
            origin: Some(query.origin.clone()),
            destination: Some(query.destination.clone()),
            date: Some(date.clone()),
            departure_time: Some(dep.into()),
            arrival_time: Some(arr.into()),
            duration: Some("2h 45m".into()),
            price: Some(price * adults),
            currency: Some(query.currency.clone()),
            airline: airline.into(),
            stops: Some(0),
            aircraft: Some(aircraft.into()),
            ..Default::default()
        }
    };

    vec![
        leg(1, "06:30", "09:15", 189.0, "Ryanair", "Boeing 737"),
        leg(2, "14:20", "17:05", 245.0, "Jet2", "Airbus A321"),
    ]
}
