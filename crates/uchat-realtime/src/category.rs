//! Realtime categories and their lookup rules

use serde::Serialize;

/// Realtime-data category a message may ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Weather,
    News,
    Sports,
    Stocks,
    Crypto,
    Fuel,
    Agriculture,
    Minerals,
    Environment,
    Health,
    Events,
    Travel,
    ExtremeWeather,
    Education,
    Search,
}

/// How a category turns a message into data
#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    /// Weather provider for the extracted location, search summary as fallback
    Weather,
    /// Web search with the given query and result reduction
    Search { query: QueryRule, extract: Extract },
}

/// How the search query is built
#[derive(Debug, Clone, Copy)]
pub enum QueryRule {
    /// Filler-stripped message, optionally prefixed; `default` when nothing remains
    Stripped {
        prefix: Option<&'static str>,
        default: &'static str,
    },
    /// Fixed template with `{location}` substituted
    Located { template: &'static str },
}

/// How a search response is reduced to one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Direct answer, answer-box snippet, else first organic snippet
    Answer,
    /// Titles of the top organic results
    Headlines,
}

/// One row of the category table
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    pub lookup: Lookup,
}

const fn answer(default: &'static str) -> Lookup {
    Lookup::Search {
        query: QueryRule::Stripped { prefix: None, default },
        extract: Extract::Answer,
    }
}

const fn located(template: &'static str) -> Lookup {
    Lookup::Search {
        query: QueryRule::Located { template },
        extract: Extract::Answer,
    }
}

/// Category table in declaration order, which is also snippet order
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: Category::Weather,
        label: "Weather",
        keywords: &["weather", "climate", "temperature", "forecast", "humidity"],
        lookup: Lookup::Weather,
    },
    CategorySpec {
        category: Category::News,
        label: "News",
        keywords: &["news", "headline", "headlines", "breaking"],
        lookup: Lookup::Search {
            query: QueryRule::Stripped {
                prefix: None,
                default: "latest news",
            },
            extract: Extract::Headlines,
        },
    },
    CategorySpec {
        category: Category::Sports,
        label: "Sports",
        keywords: &["sports", "sport", "cricket", "tournament", "match score", "live score"],
        lookup: Lookup::Search {
            query: QueryRule::Stripped {
                prefix: Some("sports news"),
                default: "sports news",
            },
            extract: Extract::Headlines,
        },
    },
    CategorySpec {
        category: Category::Stocks,
        label: "Stock market",
        keywords: &["stock", "stocks", "share price", "sensex", "nifty", "nasdaq", "stock market"],
        lookup: answer("stock market today"),
    },
    CategorySpec {
        category: Category::Crypto,
        label: "Crypto",
        keywords: &["crypto", "cryptocurrency", "bitcoin", "ethereum", "btc"],
        lookup: answer("cryptocurrency prices today"),
    },
    CategorySpec {
        category: Category::Fuel,
        label: "Fuel price",
        keywords: &["petrol", "diesel", "fuel"],
        lookup: located("petrol price in {location} today"),
    },
    CategorySpec {
        category: Category::Agriculture,
        label: "Agriculture",
        keywords: &["agriculture", "crop", "crops", "farming", "mandi", "harvest"],
        lookup: answer("agriculture commodity prices today"),
    },
    CategorySpec {
        category: Category::Minerals,
        label: "Metals & minerals",
        keywords: &[
            "gold price",
            "silver price",
            "gold rate",
            "mineral",
            "minerals",
            "mining",
            "copper",
        ],
        lookup: answer("gold silver price today"),
    },
    CategorySpec {
        category: Category::Environment,
        label: "Environment",
        keywords: &["air quality", "aqi", "pollution"],
        lookup: located("air quality in {location} today"),
    },
    CategorySpec {
        category: Category::Health,
        label: "Health",
        keywords: &["health", "outbreak", "disease", "pandemic", "virus"],
        lookup: answer("health news today"),
    },
    CategorySpec {
        category: Category::Events,
        label: "Events",
        keywords: &["event", "events", "concert", "festival"],
        lookup: located("events in {location} this week"),
    },
    CategorySpec {
        category: Category::Travel,
        label: "Travel",
        keywords: &["flight", "flights", "train status", "travel advisory", "visa", "airport"],
        lookup: answer("travel advisory updates"),
    },
    CategorySpec {
        category: Category::ExtremeWeather,
        label: "Severe weather",
        keywords: &[
            "cyclone",
            "hurricane",
            "flood",
            "floods",
            "earthquake",
            "storm",
            "heatwave",
            "tsunami",
        ],
        lookup: located("extreme weather alerts in {location}"),
    },
    CategorySpec {
        category: Category::Education,
        label: "Education",
        keywords: &["exam", "exams", "admission", "admissions", "scholarship", "board results"],
        lookup: answer("education news today"),
    },
    CategorySpec {
        category: Category::Search,
        label: "Web search",
        keywords: &["search for", "look up", "google"],
        lookup: answer("trending topics today"),
    },
];

impl Category {
    /// Table row for this category
    pub const fn spec(self) -> &'static CategorySpec {
        // rows are declared in discriminant order
        &CATEGORIES[self as usize]
    }

    pub const fn label(self) -> &'static str {
        self.spec().label
    }
}
