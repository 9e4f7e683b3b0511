use serde::Serialize;
use tracing::info;

use crate::fallback;
use crate::fetch::DealClient;
use crate::model::{RealtimeFlight, Results};
use crate::query::{RealtimeQuery, SearchParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Live,
    Snapshot,
    Sample,
    Unavailable,
}

impl Source {
    pub fn is_sample(self) -> bool {
        self == Self::Sample
    }
}

/// What to show once every real source has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    #[default]
    Sample,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolved {
    pub source: Source,
    pub results: Results,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFlights {
    pub source: Source,
    pub flights: Vec<RealtimeFlight>,
}

/// Walks live backend, then snapshot, then the fallback policy. Never fails.
#[derive(Clone)]
pub struct Resolver {
    client: DealClient,
    snapshot: Option<String>,
    policy: FallbackPolicy,
    offline: bool,
}

impl Resolver {
    pub fn new(client: DealClient) -> Self {
        Self {
            client,
            snapshot: None,
            policy: FallbackPolicy::default(),
            offline: false,
        }
    }

    pub fn with_snapshot(mut self, snapshot: Option<String>) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip the live backend and go straight to the snapshot.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn client(&self) -> &DealClient {
        &self.client
    }

    pub async fn latest(&self) -> Resolved {
        let live = if self.offline {
            None
        } else {
            self.client.fetch_latest().await
        };
        self.settle(live).await
    }

    pub async fn enhanced(&self) -> Resolved {
        let live = if self.offline {
            None
        } else {
            self.client.fetch_enhanced().await
        };
        self.settle(live).await
    }

    pub async fn search(&self, params: &SearchParams) -> Resolved {
        let live = if self.offline {
            None
        } else {
            self.client.fetch_deals(params).await
        };
        self.settle(live).await
    }

    pub async fn realtime(&self, query: &RealtimeQuery) -> ResolvedFlights {
        if !self.offline {
            if let Some(flights) = self.client.fetch_realtime_flights(query).await {
                return ResolvedFlights {
                    source: Source::Live,
                    flights,
                };
            }
        }
        match self.policy {
            FallbackPolicy::Sample => {
                info!("realtime search unavailable, using sample flights");
                ResolvedFlights {
                    source: Source::Sample,
                    flights: fallback::sample_realtime_flights(query),
                }
            }
            FallbackPolicy::Empty => ResolvedFlights {
                source: Source::Unavailable,
                flights: Vec::new(),
            },
        }
    }

    async fn settle(&self, live: Option<Results>) -> Resolved {
        if let Some(results) = live {
            return Resolved {
                source: Source::Live,
                results,
            };
        }

        if let Some(ref location) = self.snapshot {
            if let Some(results) = self.client.fetch_snapshot(location).await {
                return Resolved {
                    source: Source::Snapshot,
                    results,
                };
            }
        }

        match self.policy {
            FallbackPolicy::Sample => {
                info!("no live or snapshot results, using sample deals");
                Resolved {
                    source: Source::Sample,
                    results: fallback::sample_results(),
                }
            }
            FallbackPolicy::Empty => Resolved {
                source: Source::Unavailable,
                results: Results::empty(),
            },
        }
    }
}
