use std::process;
use std::time::Duration;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use constellation::airports;
use constellation::board::DealBoard;
use constellation::config::ApiConfig;
use constellation::error::DealError;
use constellation::fetch::DealClient;
use constellation::model::Results;
use constellation::query::{self, BoardType, CabinClass, SearchParams, TripType};
use constellation::resolve::{FallbackPolicy, Resolved, Resolver};
use constellation::table;

#[derive(Parser)]
#[command(
    name = "constellation",
    about = "Browse flight and hotel travel deals from the terminal",
    version,
    after_help = "\
Examples:
  constellation deals
  constellation search -d 2026-09-15 --budget 600 --min-stars 4
  constellation flights -f EMA -t ALC -d 2026-09-15 --adults 2
  constellation airports london
  constellation --host myname.github.io deals --json --pretty"
)]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct BackendArgs {
    #[arg(
        long,
        global = true,
        default_value = "localhost",
        value_name = "HOSTNAME",
        help = "Host the client runs under (selects development or production backend)",
        long_help = "Host name the client is served from. *.github.io and *.onrender.com select \
            the production backend; every other host selects the local development backend."
    )]
    host: String,

    #[arg(long, global = true, value_name = "URL", help = "Override the backend base URL")]
    base_url: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "PATH|URL",
        help = "Results snapshot (results/latest.json) used when the backend is unavailable"
    )]
    snapshot: Option<String>,

    #[arg(long, global = true, help = "Do not contact the live backend")]
    offline: bool,

    #[arg(
        long,
        global = true,
        help = "Show no deals instead of sample data when every source fails"
    )]
    no_sample: bool,

    #[arg(long, global = true, value_name = "SECS", help = "Request timeout")]
    timeout: Option<u64>,

    #[arg(long, global = true, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(short, long, global = true, help = "Log fetch diagnostics to stderr")]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(about = "Show the latest deals")]
    Deals(DealsArgs),
    #[command(
        about = "Search deals by budget, hotel stars and departure date",
        long_about = "Search deals by budget per person, minimum hotel stars and departure date.\n\
            Origin and destination are accepted but the backend does not filter on them.",
        after_help = "\
Examples:
  Defaults:     constellation search
  Budget:       constellation search --budget 500 --min-stars 4
  Dated:        constellation search -f MAN -t PMI -d 2026-07-01 --nights 10
  JSON output:  constellation search --json --pretty"
    )]
    Search(SearchArgs),
    #[command(about = "Live flight lookup for one route and date")]
    Flights(FlightsArgs),
    #[command(about = "Search the airport directory")]
    Airports(AirportsArgs),
    #[command(about = "Check the backend health endpoint")]
    Health,
    #[command(about = "Start MCP server for AI agents (stdio transport)")]
    Mcp,
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(long, value_name = "N", help = "Show only the N cheapest deals per person")]
    top: Option<usize>,

    #[arg(long, help = "One-line-per-deal output")]
    compact: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[arg(long, help = "Open the first deal's booking link in the browser")]
    open: bool,
}

impl OutputArgs {
    fn is_json(&self) -> bool {
        self.json || self.pretty
    }
}

#[derive(clap::Args)]
struct DealsArgs {
    #[arg(long, help = "Use the enhanced listing (booking links, date checks)")]
    enhanced: bool,

    #[arg(long, default_value = "GBP", value_name = "CODE", help = "Display currency")]
    currency: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct SearchArgs {
    #[arg(short, long, value_name = "IATA", help = "Departure airport code [default: EMA]")]
    from: Option<String>,

    #[arg(short, long, value_name = "IATA", help = "Arrival airport code [default: ALC]")]
    to: Option<String>,

    #[arg(
        short,
        long,
        value_name = "YYYY-MM-DD",
        help = "Departure date [default: 30 days from today]"
    )]
    date: Option<String>,

    #[arg(long, default_value = "7", value_name = "N", help = "Trip length in nights")]
    nights: u32,

    #[arg(long, default_value = "2", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of child passengers")]
    children: u32,

    #[arg(
        long,
        default_value = "economy",
        value_name = "CLASS",
        help = "Cabin class [economy, premium-economy, business, first]"
    )]
    cabin: String,

    #[arg(
        long,
        default_value = "round-trip",
        value_name = "TYPE",
        help = "Trip type [round-trip, one-way]"
    )]
    trip: String,

    #[arg(long, help = "Flights only, no hotel")]
    no_hotel: bool,

    #[arg(long, default_value = "3", value_name = "N", help = "Minimum hotel stars (1-5)")]
    min_stars: u8,

    #[arg(long, value_name = "BOARD", help = "Board type [RO, BB, HB, FB, AI]")]
    board: Option<String>,

    #[arg(long, default_value = "700", value_name = "N", help = "Budget per person")]
    budget: u32,

    #[arg(long, default_value = "GBP", value_name = "CODE", help = "Currency code")]
    currency: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(clap::Args)]
struct FlightsArgs {
    #[arg(short, long, value_name = "IATA", help = "Departure airport code")]
    from: String,

    #[arg(short, long, value_name = "IATA", help = "Arrival airport code")]
    to: String,

    #[arg(
        short,
        long,
        value_name = "YYYY-MM-DD",
        help = "Departure date [default: 30 days from today]"
    )]
    date: Option<String>,

    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "GBP", value_name = "CODE", help = "Currency code")]
    currency: String,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct AirportsArgs {
    #[arg(value_name = "QUERY", help = "Code, name, city or country (blank lists all)")]
    query: Option<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("constellation=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn error_code(err: &DealError) -> i32 {
    if err.is_user_error() {
        2
    } else {
        3
    }
}

fn die(err: &DealError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    encoded.unwrap_or_else(|e| die(&DealError::Decode(e.to_string()), true))
}

fn build_resolver(args: &BackendArgs) -> Result<Resolver, DealError> {
    let mut config = ApiConfig::for_host(&args.host).with_proxy(args.proxy.clone());
    if let Some(ref base_url) = args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let policy = if args.no_sample {
        FallbackPolicy::Empty
    } else {
        FallbackPolicy::Sample
    };

    Ok(Resolver::new(DealClient::new(config)?)
        .with_snapshot(args.snapshot.clone())
        .with_policy(policy)
        .offline(args.offline))
}

fn apply_top(results: &mut Results, n: usize) {
    results
        .deals
        .sort_by(|a, b| {
            let a = a.per_person.unwrap_or(f64::MAX);
            let b = b.per_person.unwrap_or(f64::MAX);
            a.total_cmp(&b)
        });
    results.deals.truncate(n);
}

fn open_first_link(results: &Results) {
    let link = results
        .deals
        .iter()
        .take(table::MAX_DISPLAYED_DEALS)
        .find_map(|deal| deal.booking_links().next());
    match link {
        Some(link) => {
            eprintln!("Opening: {}", link.url);
            if let Err(e) = open::that(&link.url) {
                warn!(error = %e, "failed to open browser");
            }
        }
        None => eprintln!("No booking links on these deals."),
    }
}

async fn show_deals<F>(fetch: F, output: &OutputArgs, currency: &str)
where
    F: std::future::Future<Output = Resolved>,
{
    let board = DealBoard::new();
    let resolved = board
        .track(async {
            let mut resolved = fetch.await;
            if let Some(n) = output.top {
                apply_top(&mut resolved.results, n);
            }
            resolved
        })
        .await;

    if output.is_json() {
        println!("{}", to_json(&resolved, output.pretty));
    } else {
        println!("{}", table::render_view(&board.view(), currency, output.compact));
    }

    if output.open {
        open_first_link(&resolved.results);
    }
}

fn build_search_params(args: &SearchArgs) -> Result<SearchParams, DealError> {
    let mut params = SearchParams::default();
    if let Some(ref from) = args.from {
        params.origin = from.trim().to_uppercase();
    }
    if let Some(ref to) = args.to {
        params.destination = to.trim().to_uppercase();
    }
    if let Some(ref date) = args.date {
        params.departure_date = query::parse_date(date)?;
    }
    params.nights = args.nights;
    params.adults = args.adults;
    params.children = args.children;
    params.cabin = CabinClass::from_str_loose(&args.cabin)?;
    params.trip = TripType::from_str_loose(&args.trip)?;
    params.include_hotel = !args.no_hotel;
    params.min_stars = args.min_stars;
    params.board = args
        .board
        .as_deref()
        .map(BoardType::from_str_loose)
        .transpose()?;
    params.budget_per_person = args.budget;
    params.currency = args.currency.to_uppercase();
    params.validate()?;
    Ok(params)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.backend.verbose);

    if let Commands::Airports(ref args) = cli.command {
        let matches = airports::search(args.query.as_deref().unwrap_or(""));
        if args.json {
            println!("{}", to_json(&matches, false));
        } else if matches.is_empty() {
            println!("No airports found.");
        } else {
            println!("{}", table::render_airports(&matches));
        }
        return;
    }

    let resolver = match build_resolver(&cli.backend) {
        Ok(r) => r,
        Err(e) => die(&e, false),
    };

    match cli.command {
        Commands::Airports(_) => {}
        Commands::Mcp => {
            if let Err(e) = constellation::mcp::run(resolver).await {
                eprintln!("error: MCP server failed: {e}");
                process::exit(3);
            }
        }
        Commands::Health => match resolver.client().try_health().await {
            Ok(health) => println!(
                "{} ({}) — {}",
                resolver.client().config().base_url,
                health.status,
                health.timestamp.unwrap_or_default()
            ),
            Err(e) => die(&e, false),
        },
        Commands::Deals(args) => {
            let currency = args.currency.to_uppercase();
            if args.enhanced {
                show_deals(resolver.enhanced(), &args.output, &currency).await;
            } else {
                show_deals(resolver.latest(), &args.output, &currency).await;
            }
        }
        Commands::Search(args) => {
            let json_mode = args.output.is_json();
            let params = match build_search_params(&args) {
                Ok(p) => p,
                Err(e) => die(&e, json_mode),
            };
            eprintln!("searching: {}", params.summary());
            eprintln!(
                "note: origin/destination filtering not available — results are not limited to {} → {}",
                params.origin, params.destination
            );
            show_deals(resolver.search(&params), &args.output, &params.currency).await;
        }
        Commands::Flights(args) => {
            let json_mode = args.json || args.pretty;
            let mut params = SearchParams {
                origin: args.from.trim().to_uppercase(),
                destination: args.to.trim().to_uppercase(),
                adults: args.adults,
                currency: args.currency.to_uppercase(),
                ..SearchParams::default()
            };
            if let Some(ref date) = args.date {
                params.departure_date = match query::parse_date(date) {
                    Ok(d) => d,
                    Err(e) => die(&e, json_mode),
                };
            }
            let realtime = params.to_realtime_query();
            if let Err(e) = realtime.validate() {
                die(&e, json_mode);
            }

            let resolved = resolver.realtime(&realtime).await;
            if json_mode {
                println!("{}", to_json(&resolved, args.pretty));
            } else if resolved.flights.is_empty() {
                println!("No flights found.");
            } else {
                if let Some(text) = table::banner(resolved.source) {
                    println!("{text}");
                }
                println!("{}", table::render_flights(&resolved.flights, &realtime.currency));
            }
        }
    }
}
