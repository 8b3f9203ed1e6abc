use rand::seq::SliceRandom;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

pub const FALLBACK_QUOTES: [(&str, &str); 8] = [
    ("The only way to do great work is to love what you do.", "Steve Jobs"),
    ("In the middle of difficulty lies opportunity.", "Albert Einstein"),
    (
        "What lies behind us and what lies before us are tiny matters compared to what lies within us.",
        "Ralph Waldo Emerson",
    ),
    (
        "The greatest glory in living lies not in never falling, but in rising every time we fall.",
        "Nelson Mandela",
    ),
    ("Believe you can and you're halfway there.", "Theodore Roosevelt"),
    ("Happiness is not something ready made. It comes from your own actions.", "Dalai Lama"),
    ("The mind is everything. What you think you become.", "Buddha"),
    ("Peace comes from within. Do not seek it without.", "Buddha"),
];

#[derive(Debug, Deserialize)]
struct QuotesPayload {
    quotes: Vec<RemoteQuote>,
}

#[derive(Debug, Deserialize)]
struct RemoteQuote {
    quote: String,
    author: String,
}

#[derive(Clone)]
pub struct QuoteProvider {
    client: Client,
    url: String,
}

impl QuoteProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
            warn!("failed to build quote client, using defaults: {err}");
            Client::new()
        });

        Self {
            client,
            url: url.into(),
        }
    }

    /// One attempt against the quote API; any failure yields a built-in quote.
    pub async fn fetch_quote(&self) -> Quote {
        match self.request().await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                warn!(url = %self.url, "quote API returned no quotes, using fallback");
                fallback_quote()
            }
            Err(err) => {
                warn!(url = %self.url, "quote fetch failed, using fallback: {err}");
                fallback_quote()
            }
        }
    }

    async fn request(&self) -> Result<Option<Quote>, reqwest::Error> {
        let payload = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<QuotesPayload>()
            .await?;
        Ok(pick_quote(payload.quotes))
    }
}

fn pick_quote(quotes: Vec<RemoteQuote>) -> Option<Quote> {
    quotes.choose(&mut rand::thread_rng()).map(|remote| Quote {
        text: remote.quote.clone(),
        author: remote.author.clone(),
    })
}

pub fn fallback_quote() -> Quote {
    let (text, author) = FALLBACK_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0]);
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}
