use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fields the backend sends that this client does not interpret. Kept so
/// JSON output passes deals through untouched.
pub type Extra = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingLink {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightDeal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_code: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub booking_links: Vec<BookingLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_date_valid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_error: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelDeal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub booking_links: Vec<BookingLink>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_person: Option<f64>,
    #[serde(default, alias = "totalPrice", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    #[serde(default)]
    pub flight: FlightDeal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<HotelDeal>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Deal {
    /// Only an explicit `isDateValid: false` counts; a missing marker does not.
    pub fn has_invalid_dates(&self) -> bool {
        self.flight.is_date_valid == Some(false)
    }

    pub fn booking_links(&self) -> impl Iterator<Item = &BookingLink> {
        self.flight.booking_links.iter().chain(
            self.hotel
                .iter()
                .flat_map(|hotel| hotel.booking_links.iter()),
        )
    }
}

/// A resolved deal listing. Accepts both the snapshot shape
/// (`count`/`queriedAt`) and the API shape (`total`/`timestamp`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default, alias = "total", skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, alias = "timestamp", skip_serializing_if = "Option::is_none")]
    pub queried_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Results {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deals.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeFlight {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub airline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stops: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealtimeResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<RealtimeFlight>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
