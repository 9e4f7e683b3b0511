use chrono::NaiveDateTime;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::airports::Airport;
use crate::board::ViewState;
use crate::model::{Deal, FlightDeal, HotelDeal, RealtimeFlight, Results};
use crate::resolve::{Resolved, Source};

pub const MAX_DISPLAYED_DEALS: usize = 20;

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_MESSAGE: &str = "No deals available.";
pub const SAMPLE_BANNER: &str =
    "Showing sample data — the deals backend could not be reached.";
pub const DATES_UNVERIFIED: &str = "⚠ dates unverified";

pub fn format_price(price: Option<f64>, currency: &str) -> String {
    let p = match price {
        Some(p) => p.round() as i64,
        None => return "—".to_string(),
    };
    match currency {
        "USD" => format!("${p}"),
        "EUR" => format!("€{p}"),
        "GBP" => format!("£{p}"),
        "JPY" | "CNY" => format!("¥{p}"),
        "INR" => format!("₹{p}"),
        _ => format!("{p} {currency}"),
    }
}

/// ISO timestamps become `YYYY-MM-DD HH:MM`; anything else is shown as sent.
fn format_when(raw: &str) -> String {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn stops_label(stops: Option<u32>) -> String {
    match stops {
        None => "—".to_string(),
        Some(0) => "Nonstop".to_string(),
        Some(1) => "1 stop".to_string(),
        Some(n) => format!("{n} stops"),
    }
}

pub fn flight_summary(flight: &FlightDeal) -> String {
    let mut lines = Vec::new();

    let carrier = flight.carrier.as_deref().unwrap_or("Unknown carrier");
    match (flight.origin.as_deref(), flight.destination.as_deref()) {
        (Some(from), Some(to)) => lines.push(format!("{carrier} {from} → {to}")),
        _ => lines.push(carrier.to_string()),
    }

    if let (Some(dep), Some(arr)) = (flight.departure.as_deref(), flight.arrival.as_deref()) {
        lines.push(format!("{} → {}", format_when(dep), format_when(arr)));
    }

    if flight.stops.is_some() {
        lines.push(stops_label(flight.stops));
    }

    lines.join("\n")
}

pub fn hotel_summary(hotel: &HotelDeal) -> String {
    let name = hotel.name.as_deref().unwrap_or("Hotel");
    let stars = hotel
        .stars
        .map(|s| format!(" {s}★"))
        .unwrap_or_default();
    let board = hotel
        .board
        .as_deref()
        .map(|b| format!(" {b}"))
        .unwrap_or_default();
    format!("{name}{stars}{board}")
}

fn links_cell(deal: &Deal) -> String {
    deal.booking_links()
        .map(|link| format!("{}: {}", link.kind, link.url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn price_cell(deal: &Deal, currency: &str) -> String {
    let per_person = format_price(deal.per_person, currency);
    let mut cell = match deal.total {
        Some(_) => format!("{per_person} pp\n{} total", format_price(deal.total, currency)),
        None => format!("{per_person} pp"),
    };
    if let Some(flag) = date_flag(deal) {
        cell.push('\n');
        cell.push_str(&flag);
    }
    cell
}

/// The unverified-dates marker, followed by the backend's reasons when it
/// gave any.
fn date_flag(deal: &Deal) -> Option<String> {
    if !deal.has_invalid_dates() {
        return None;
    }
    let reasons: Vec<&str> = [&deal.flight.departure_error, &deal.flight.arrival_error]
        .into_iter()
        .filter_map(|e| e.as_deref())
        .collect();
    if reasons.is_empty() {
        Some(DATES_UNVERIFIED.to_string())
    } else {
        Some(format!("{DATES_UNVERIFIED}: {}", reasons.join("; ")))
    }
}

fn displayed(results: &Results) -> &[Deal] {
    let n = results.deals.len().min(MAX_DISPLAYED_DEALS);
    &results.deals[..n]
}

pub fn render_deals(results: &Results, currency: &str) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Price", "Flight", "Hotel", "Book"]);

    for (idx, deal) in displayed(results).iter().enumerate() {
        let hotel = deal
            .hotel
            .as_ref()
            .map(hotel_summary)
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            (idx + 1).to_string(),
            price_cell(deal, currency),
            flight_summary(&deal.flight),
            hotel,
            links_cell(deal),
        ]);
    }

    table.to_string()
}

pub fn render_compact(results: &Results, currency: &str) -> String {
    displayed(results)
        .iter()
        .map(|deal| {
            let price = format_price(deal.per_person, currency);
            let flight = flight_summary(&deal.flight).replace('\n', " | ");
            let hotel = deal
                .hotel
                .as_ref()
                .map(hotel_summary)
                .unwrap_or_else(|| "no hotel".to_string());
            let flag = date_flag(deal)
                .map(|f| format!(" | {f}"))
                .unwrap_or_default();
            format!("{price} pp | {flight} | {hotel}{flag}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn banner(source: Source) -> Option<&'static str> {
    source.is_sample().then_some(SAMPLE_BANNER)
}

fn render_resolved(resolved: &Resolved, currency: &str, compact: bool) -> String {
    let body = if compact {
        render_compact(&resolved.results, currency)
    } else {
        render_deals(&resolved.results, currency)
    };
    match banner(resolved.source) {
        Some(text) => format!("{text}\n{body}"),
        None => body,
    }
}

pub fn render_view(view: &ViewState, currency: &str, compact: bool) -> String {
    match view {
        ViewState::Idle => String::new(),
        ViewState::Loading => LOADING_MESSAGE.to_string(),
        ViewState::Empty => EMPTY_MESSAGE.to_string(),
        ViewState::Populated(resolved) => render_resolved(resolved, currency, compact),
    }
}

pub fn render_airports(airports: &[&Airport]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Code", "Airport", "City", "Country"]);

    for airport in airports {
        table.add_row(vec![airport.code, airport.name, airport.city, airport.country]);
    }

    table.to_string()
}

pub fn render_flights(flights: &[RealtimeFlight], currency: &str) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Airline", "Route", "Date", "Depart", "Arrive", "Duration", "Stops", "Aircraft",
            "Price",
        ]);

    for flight in flights {
        let route = match (flight.origin.as_deref(), flight.destination.as_deref()) {
            (Some(from), Some(to)) => format!("{from} → {to}"),
            _ => "—".to_string(),
        };
        let dash = || "—".to_string();
        let price_currency = flight.currency.as_deref().unwrap_or(currency);

        table.add_row(vec![
            flight.airline.clone(),
            route,
            flight.date.clone().unwrap_or_else(dash),
            flight.departure_time.clone().unwrap_or_else(dash),
            flight.arrival_time.clone().unwrap_or_else(dash),
            flight.duration.clone().unwrap_or_else(dash),
            stops_label(flight.stops),
            flight.aircraft.clone().unwrap_or_default(),
            format_price(flight.price, price_currency),
        ]);
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_formats_iso() {
        assert_eq!(format_when("2025-09-15T06:30:00"), "2025-09-15 06:30");
        assert_eq!(format_when("25-08-2025 06:30"), "25-08-2025 06:30");
    }

    #[test]
    fn stops_labels() {
        assert_eq!(stops_label(Some(0)), "Nonstop");
        assert_eq!(stops_label(Some(2)), "2 stops");
        assert_eq!(stops_label(None), "—");
    }
}
