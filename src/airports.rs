use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Airport {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
}

impl Airport {
    const fn new(
        code: &'static str,
        name: &'static str,
        city: &'static str,
        country: &'static str,
    ) -> Self {
        Self {
            code,
            name,
            city,
            country,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        [self.code, self.name, self.city, self.country]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

static AIRPORTS: &[Airport] = &[
    Airport::new("EMA", "East Midlands", "East Midlands", "United Kingdom"),
    Airport::new("BHX", "Birmingham", "Birmingham", "United Kingdom"),
    Airport::new("MAN", "Manchester", "Manchester", "United Kingdom"),
    Airport::new("LHR", "Heathrow", "London", "United Kingdom"),
    Airport::new("LGW", "Gatwick", "London", "United Kingdom"),
    Airport::new("STN", "Stansted", "London", "United Kingdom"),
    Airport::new("LTN", "Luton", "London", "United Kingdom"),
    Airport::new("LPL", "Liverpool", "Liverpool", "United Kingdom"),
    Airport::new("BRS", "Bristol", "Bristol", "United Kingdom"),
    Airport::new("EDI", "Edinburgh", "Edinburgh", "United Kingdom"),
    Airport::new("GLA", "Glasgow", "Glasgow", "United Kingdom"),
    Airport::new("NCL", "Newcastle", "Newcastle", "United Kingdom"),
    Airport::new("CWL", "Cardiff", "Cardiff", "United Kingdom"),
    Airport::new("ALC", "Alicante", "Alicante", "Spain"),
    Airport::new("BCN", "Barcelona", "Barcelona", "Spain"),
    Airport::new("MAD", "Madrid", "Madrid", "Spain"),
    Airport::new("PMI", "Palma de Mallorca", "Palma", "Spain"),
    Airport::new("AGP", "Malaga", "Malaga", "Spain"),
    Airport::new("IBZ", "Ibiza", "Ibiza", "Spain"),
    Airport::new("VLC", "Valencia", "Valencia", "Spain"),
    Airport::new("SVQ", "Seville", "Seville", "Spain"),
    Airport::new("CDG", "Charles de Gaulle", "Paris", "France"),
    Airport::new("ORY", "Orly", "Paris", "France"),
    Airport::new("NCE", "Nice", "Nice", "France"),
    Airport::new("MRS", "Marseille", "Marseille", "France"),
    Airport::new("TLS", "Toulouse", "Toulouse", "France"),
    Airport::new("LYS", "Lyon", "Lyon", "France"),
    Airport::new("FCO", "Fiumicino", "Rome", "Italy"),
    Airport::new("MXP", "Malpensa", "Milan", "Italy"),
    Airport::new("VCE", "Marco Polo", "Venice", "Italy"),
    Airport::new("FLR", "Florence", "Florence", "Italy"),
    Airport::new("NAP", "Naples", "Naples", "Italy"),
    Airport::new("PSA", "Pisa", "Pisa", "Italy"),
    Airport::new("FRA", "Frankfurt", "Frankfurt", "Germany"),
    Airport::new("MUC", "Munich", "Munich", "Germany"),
    Airport::new("BER", "Berlin Brandenburg", "Berlin", "Germany"),
    Airport::new("DUS", "Dusseldorf", "Dusseldorf", "Germany"),
    Airport::new("CGN", "Cologne", "Cologne", "Germany"),
    Airport::new("AMS", "Schiphol", "Amsterdam", "Netherlands"),
    Airport::new("BRU", "Brussels", "Brussels", "Belgium"),
    Airport::new("ZRH", "Zurich", "Zurich", "Switzerland"),
    Airport::new("GVA", "Geneva", "Geneva", "Switzerland"),
    Airport::new("VIE", "Vienna", "Vienna", "Austria"),
    Airport::new("LIS", "Lisbon", "Lisbon", "Portugal"),
    Airport::new("OPO", "Porto", "Porto", "Portugal"),
    Airport::new("FAO", "Faro", "Faro", "Portugal"),
    Airport::new("ATH", "Athens", "Athens", "Greece"),
    Airport::new("HER", "Heraklion", "Heraklion", "Greece"),
    Airport::new("RHO", "Rhodes", "Rhodes", "Greece"),
    Airport::new("DBV", "Dubrovnik", "Dubrovnik", "Croatia"),
    Airport::new("SPU", "Split", "Split", "Croatia"),
    Airport::new("ZAG", "Zagreb", "Zagreb", "Croatia"),
    Airport::new("WAW", "Warsaw", "Warsaw", "Poland"),
    Airport::new("KRK", "Krakow", "Krakow", "Poland"),
    Airport::new("PRG", "Prague", "Prague", "Czech Republic"),
    Airport::new("BUD", "Budapest", "Budapest", "Hungary"),
    Airport::new("DUB", "Dublin", "Dublin", "Ireland"),
    Airport::new("SNN", "Shannon", "Shannon", "Ireland"),
    Airport::new("OSL", "Oslo", "Oslo", "Norway"),
    Airport::new("ARN", "Arlanda", "Stockholm", "Sweden"),
    Airport::new("CPH", "Copenhagen", "Copenhagen", "Denmark"),
    Airport::new("HEL", "Helsinki", "Helsinki", "Finland"),
];

static BY_CODE: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    AIRPORTS
        .iter()
        .enumerate()
        .map(|(idx, airport)| (airport.code, idx))
        .collect()
});

pub fn all() -> &'static [Airport] {
    AIRPORTS
}

/// Exact, case-sensitive match on the IATA code. Callers uppercase user input.
pub fn lookup(code: &str) -> Option<&'static Airport> {
    BY_CODE.get(code).map(|&idx| &AIRPORTS[idx])
}

/// Case-insensitive substring search over code, name, city and country.
///
/// Results keep table order. A blank or whitespace-only query returns every
/// airport; any other query is matched as given, surrounding spaces included.
pub fn search(query: &str) -> Vec<&'static Airport> {
    if query.trim().is_empty() {
        return AIRPORTS.iter().collect();
    }
    let needle = query.to_lowercase();
    AIRPORTS.iter().filter(|a| a.matches(&needle)).collect()
}
