use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::Deserialize;

use crate::airports;
use crate::board::DealBoard;
use crate::error::DealError;
use crate::query::{self, BoardType, SearchParams, TripType};
use crate::resolve::{Resolved, Resolver};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DealsLatestArgs {
    #[schemars(description = "Use the enhanced listing with booking links and date checks. Default: false")]
    enhanced: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DealsSearchArgs {
    #[schemars(
        description = "Departure airport IATA code. Accepted but not filtered on by the backend. Default: EMA"
    )]
    origin: Option<String>,
    #[schemars(
        description = "Arrival airport IATA code. Accepted but not filtered on by the backend. Default: ALC"
    )]
    destination: Option<String>,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Default: 30 days from today")]
    date: Option<String>,
    #[schemars(description = "Trip length in nights. Default: 7")]
    nights: Option<u32>,
    #[schemars(description = "Adult passengers. Default: 2")]
    adults: Option<u32>,
    #[schemars(description = "Child passengers. Default: 0")]
    children: Option<u32>,
    #[schemars(description = "One of: round-trip, one-way. Default: round-trip")]
    trip: Option<String>,
    #[schemars(description = "Minimum hotel star rating, 1-5. Default: 3")]
    min_stars: Option<u8>,
    #[schemars(description = "Board type: RO, BB, HB, FB or AI. Omit for any")]
    board: Option<String>,
    #[schemars(description = "Budget per person. Default: 700")]
    budget: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct FlightsRealtimeArgs {
    #[schemars(description = "Departure airport IATA code, exactly 3 uppercase letters. Example: EMA")]
    origin: String,
    #[schemars(description = "Arrival airport IATA code, exactly 3 uppercase letters. Example: ALC")]
    destination: String,
    #[schemars(description = "Departure date in YYYY-MM-DD format. Default: 30 days from today")]
    date: Option<String>,
    #[schemars(description = "Adult passengers. Default: 1")]
    adults: Option<u32>,
    #[schemars(description = "Currency code. Default: GBP")]
    currency: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AirportsSearchArgs {
    #[schemars(description = "Text matched against code, name, city and country. Empty returns all airports")]
    query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct OpenUrlArgs {
    #[schemars(description = "URL to open. Must start with http:// or https://")]
    url: String,
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
        Err(e) => tool_error(format!("failed to encode result: {e}")),
    }
}

fn build_params(args: DealsSearchArgs) -> Result<SearchParams, DealError> {
    let mut params = SearchParams::default();
    if let Some(origin) = args.origin {
        params.origin = origin.trim().to_uppercase();
    }
    if let Some(destination) = args.destination {
        params.destination = destination.trim().to_uppercase();
    }
    if let Some(date) = args.date {
        params.departure_date = query::parse_date(&date)?;
    }
    if let Some(trip) = args.trip {
        params.trip = TripType::from_str_loose(&trip)?;
    }
    if let Some(board) = args.board {
        params.board = Some(BoardType::from_str_loose(&board)?);
    }
    params.nights = args.nights.unwrap_or(params.nights);
    params.adults = args.adults.unwrap_or(params.adults);
    params.children = args.children.unwrap_or(params.children);
    params.min_stars = args.min_stars.unwrap_or(params.min_stars);
    params.budget_per_person = args.budget.unwrap_or(params.budget_per_person);
    params.validate()?;
    Ok(params)
}

#[derive(Clone)]
pub struct DealsMcp {
    resolver: Resolver,
    board: Arc<DealBoard>,
    tool_router: ToolRouter<Self>,
}

impl DealsMcp {
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            board: Arc::new(DealBoard::new()),
            tool_router: Self::tool_router(),
        }
    }

    pub fn board(&self) -> &DealBoard {
        &self.board
    }

    /// Resolves the latest listing for this call. Concurrent calls each get
    /// their own outcome; the board only keeps the newest.
    pub async fn latest(&self, enhanced: bool) -> Resolved {
        let resolver = &self.resolver;
        self.board
            .track(async move {
                if enhanced {
                    resolver.enhanced().await
                } else {
                    resolver.latest().await
                }
            })
            .await
    }

    pub async fn search(&self, params: &SearchParams) -> Resolved {
        self.board.track(self.resolver.search(params)).await
    }
}

#[tool_router]
impl DealsMcp {
    #[tool(
        description = "Fetch the latest travel deals (flight plus optional hotel, with per-person and total prices) as JSON. Falls back to a results snapshot and then to clearly marked sample data (source: \"sample\") when the backend is unreachable."
    )]
    async fn deals_latest(
        &self,
        Parameters(args): Parameters<DealsLatestArgs>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&self.latest(args.enhanced.unwrap_or(false)).await)
    }

    #[tool(
        description = "Search travel deals by budget per person, minimum hotel stars and departure date. Origin and destination are accepted but the backend does not filter on them. Returns JSON with a source field: live, snapshot, sample or unavailable."
    )]
    async fn deals_search(
        &self,
        Parameters(args): Parameters<DealsSearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let params = match build_params(args) {
            Ok(p) => p,
            Err(e) => return tool_error(e.to_string()),
        };
        json_result(&self.search(&params).await)
    }

    #[tool(
        description = "Live flight lookup for one route and date. Returns JSON flights with airline, times, duration, stops and price. Falls back to sample flights (source: \"sample\") when the backend fails."
    )]
    async fn flights_realtime(
        &self,
        Parameters(args): Parameters<FlightsRealtimeArgs>,
    ) -> Result<CallToolResult, McpError> {
        let mut params = SearchParams {
            origin: args.origin.trim().to_uppercase(),
            destination: args.destination.trim().to_uppercase(),
            adults: args.adults.unwrap_or(1),
            ..SearchParams::default()
        };
        if let Some(currency) = args.currency {
            params.currency = currency.to_uppercase();
        }
        if let Some(date) = args.date {
            match query::parse_date(&date) {
                Ok(d) => params.departure_date = d,
                Err(e) => return tool_error(e.to_string()),
            }
        }
        let realtime = params.to_realtime_query();
        if let Err(e) = realtime.validate() {
            return tool_error(e.to_string());
        }
        json_result(&self.resolver.realtime(&realtime).await)
    }

    #[tool(
        description = "Search the built-in airport directory by IATA code, airport name, city or country (case-insensitive substring). Returns JSON records."
    )]
    async fn airports_search(
        &self,
        Parameters(args): Parameters<AirportsSearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        let matches = airports::search(args.query.as_deref().unwrap_or(""));
        json_result(&matches)
    }

    #[tool(description = "Open a URL, such as a deal's booking link, in the default web browser.")]
    async fn open_url(
        &self,
        Parameters(args): Parameters<OpenUrlArgs>,
    ) -> Result<CallToolResult, McpError> {
        if !args.url.starts_with("http://") && !args.url.starts_with("https://") {
            return tool_error("URL must start with http:// or https://");
        }

        match open::that(&args.url) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Opened: {}",
                args.url
            ))])),
            Err(e) => tool_error(format!("failed to open browser: {e}")),
        }
    }
}

#[tool_handler]
impl ServerHandler for DealsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "constellation".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Travel deals tool. Use deals_latest or deals_search for flight+hotel deals, flights_realtime for a live route lookup, airports_search to find IATA codes, and open_url to open a booking link. Results with source \"sample\" are illustrative, not real offers.".into(),
            ),
        }
    }
}

pub async fn run(resolver: Resolver) -> Result<(), Box<dyn std::error::Error>> {
    let service = DealsMcp::new(resolver)
        .serve(rmcp::transport::stdio())
        .await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Results;
    use crate::resolve::Source;

    fn empty_args() -> DealsSearchArgs {
        DealsSearchArgs {
            origin: None,
            destination: None,
            date: None,
            nights: None,
            adults: None,
            children: None,
            trip: None,
            min_stars: None,
            board: None,
            budget: None,
        }
    }

    #[test]
    fn build_params_uses_form_defaults() {
        let params = build_params(empty_args()).unwrap();
        assert_eq!(params.origin, "EMA");
        assert_eq!(params.destination, "ALC");
        assert_eq!(params.adults, 2);
        assert_eq!(params.budget_per_person, 700);
        assert_eq!(params.trip, TripType::RoundTrip);
    }

    #[test]
    fn build_params_uppercases_airports() {
        let mut args = empty_args();
        args.origin = Some("man".into());
        args.destination = Some(" bcn ".into());
        args.board = Some("ai".into());
        let params = build_params(args).unwrap();
        assert_eq!(params.origin, "MAN");
        assert_eq!(params.destination, "BCN");
        assert_eq!(params.board, Some(BoardType::AllInclusive));
    }

    #[test]
    fn empty_outcome_still_reports_its_source() {
        let resolved = Resolved {
            source: Source::Unavailable,
            results: Results::empty(),
        };
        let result = json_result(&resolved).unwrap();
        let encoded = serde_json::to_string(&result).unwrap();
        assert!(encoded.contains("unavailable"));
        assert_ne!(result.is_error, Some(true));
    }

    #[test]
    fn build_params_rejects_bad_stars() {
        let mut args = empty_args();
        args.min_stars = Some(7);
        assert!(build_params(args).is_err());
    }
}
