use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use crate::airports;
use crate::error::DealError;

pub const DEFAULT_ORIGIN: &str = "EMA";
pub const DEFAULT_DESTINATION: &str = "ALC";
pub const DEFAULT_CURRENCY: &str = "GBP";
pub const DEFAULT_BUDGET_PER_PERSON: u32 = 700;
pub const DEFAULT_LEAD_DAYS: u64 = 30;
pub const MAX_PASSENGERS: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub fn from_str_loose(s: &str) -> Result<Self, DealError> {
        match s.to_ascii_lowercase().as_str() {
            "economy" => Ok(Self::Economy),
            "premium-economy" | "premium_economy" => Ok(Self::PremiumEconomy),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(DealError::Validation(format!("invalid cabin class: {s}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripType {
    RoundTrip,
    OneWay,
}

impl TripType {
    pub fn from_str_loose(s: &str) -> Result<Self, DealError> {
        match s.to_ascii_lowercase().as_str() {
            "round-trip" | "return" => Ok(Self::RoundTrip),
            "one-way" => Ok(Self::OneWay),
            _ => Err(DealError::Validation(format!("invalid trip type: {s}"))),
        }
    }
}

/// Hotel meal plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardType {
    RoomOnly,
    BedAndBreakfast,
    HalfBoard,
    FullBoard,
    AllInclusive,
}

impl BoardType {
    pub fn from_str_loose(s: &str) -> Result<Self, DealError> {
        match s.to_ascii_lowercase().as_str() {
            "ro" | "room-only" => Ok(Self::RoomOnly),
            "bb" | "bed-and-breakfast" => Ok(Self::BedAndBreakfast),
            "hb" | "half-board" => Ok(Self::HalfBoard),
            "fb" | "full-board" => Ok(Self::FullBoard),
            "ai" | "all-inclusive" => Ok(Self::AllInclusive),
            _ => Err(DealError::Validation(format!(
                "invalid board type: {s} (expected RO, BB, HB, FB or AI)"
            ))),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::RoomOnly => "RO",
            Self::BedAndBreakfast => "BB",
            Self::HalfBoard => "HB",
            Self::FullBoard => "FB",
            Self::AllInclusive => "AI",
        }
    }
}

/// The user's current query intent. Lives only on the client; the backend
/// only ever sees the subset in [`SearchBody`].
#[derive(Debug, Clone)]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub nights: u32,
    pub adults: u32,
    pub children: u32,
    pub cabin: CabinClass,
    pub trip: TripType,
    pub include_hotel: bool,
    pub min_stars: u8,
    pub board: Option<BoardType>,
    pub budget_per_person: u32,
    pub currency: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::starting_from(Local::now().date_naive())
    }
}

impl SearchParams {
    /// Form defaults relative to `today`.
    pub fn starting_from(today: NaiveDate) -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            destination: DEFAULT_DESTINATION.to_string(),
            departure_date: today
                .checked_add_days(Days::new(DEFAULT_LEAD_DAYS))
                .unwrap_or(today),
            nights: 7,
            adults: 2,
            children: 0,
            cabin: CabinClass::Economy,
            trip: TripType::RoundTrip,
            include_hotel: true,
            min_stars: 3,
            board: None,
            budget_per_person: DEFAULT_BUDGET_PER_PERSON,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn return_date(&self) -> Option<NaiveDate> {
        match self.trip {
            TripType::RoundTrip => self
                .departure_date
                .checked_add_days(Days::new(u64::from(self.nights))),
            TripType::OneWay => None,
        }
    }

    /// One line describing the query, e.g.
    /// `EMA → ALC, 2025-09-15 to 2025-09-22, 2 adults, 3★+ BB, budget 700 GBP`.
    pub fn summary(&self) -> String {
        let dates = match self.return_date() {
            Some(back) => format!("{} to {}", self.departure_date, back),
            None => format!("{} one way", self.departure_date),
        };
        let mut travellers = format!("{} adults", self.adults);
        if self.children > 0 {
            travellers.push_str(&format!(", {} children", self.children));
        }
        let board = self.board.map(BoardType::code).unwrap_or("any board");
        format!(
            "{} → {}, {dates}, {travellers}, {}★+ {board}, budget {} {}",
            self.origin, self.destination, self.min_stars, self.budget_per_person, self.currency
        )
    }

    pub fn validate(&self) -> Result<(), DealError> {
        validate_airport(&self.origin)?;
        validate_airport(&self.destination)?;

        if self.origin == self.destination {
            return Err(DealError::Validation(
                "origin and destination must differ".into(),
            ));
        }

        if self.adults == 0 {
            return Err(DealError::Validation(
                "at least one adult required".into(),
            ));
        }

        let total = self.adults + self.children;
        if total > MAX_PASSENGERS {
            return Err(DealError::Validation(format!(
                "total passengers ({total}) exceeds maximum of {MAX_PASSENGERS}"
            )));
        }

        if self.trip == TripType::RoundTrip && self.nights == 0 {
            return Err(DealError::Validation(
                "round trips need at least one night".into(),
            ));
        }

        if !(1..=5).contains(&self.min_stars) {
            return Err(DealError::Validation(format!(
                "minimum stars must be between 1 and 5, got {}",
                self.min_stars
            )));
        }

        if self.budget_per_person == 0 {
            return Err(DealError::Validation(
                "budget per person must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Origin and destination are deliberately absent: the backend does not
    /// filter on them.
    pub fn to_search_body(&self) -> SearchBody {
        SearchBody {
            budget_per_person: self.budget_per_person,
            min_stars: self.min_stars,
            departure_date: self.departure_date,
        }
    }

    pub fn to_realtime_query(&self) -> RealtimeQuery {
        RealtimeQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            date: self.departure_date,
            adults: self.adults,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    pub budget_per_person: u32,
    pub min_stars: u8,
    pub departure_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeQuery {
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub adults: u32,
    pub currency: String,
}

impl RealtimeQuery {
    pub fn validate(&self) -> Result<(), DealError> {
        validate_airport(&self.origin)?;
        validate_airport(&self.destination)?;
        if self.adults == 0 || self.adults > MAX_PASSENGERS {
            return Err(DealError::Validation(format!(
                "adults must be between 1 and {MAX_PASSENGERS}"
            )));
        }
        Ok(())
    }
}

pub fn validate_airport(code: &str) -> Result<(), DealError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DealError::InvalidAirport(code.to_string()));
    }
    if airports::lookup(code).is_none() {
        tracing::debug!(code, "airport not in directory, passing through");
    }
    Ok(())
}

pub fn parse_date(date: &str) -> Result<NaiveDate, DealError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| DealError::InvalidDate(date.to_string()))
}
