//! DaData adapter (company suggestions by tax id).
//!
//! Uses the `findById/party` endpoint; only the first suggestion is used.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use innbot_core::{
    errors::Error,
    lookup::{LookupOutcome, Party, PartyLookup},
    Result,
};

#[derive(Clone, Debug)]
pub struct DadataClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    data: PartyData,
}

#[derive(Debug, Deserialize)]
struct PartyData {
    inn: Option<String>,
    name: Option<PartyName>,
    address: Option<PartyAddress>,
}

#[derive(Debug, Deserialize)]
struct PartyName {
    full_with_opf: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PartyAddress {
    value: Option<String>,
}

impl DadataClient {
    /// `base_url` is the suggestions API root, e.g.
    /// `https://suggestions.dadata.ru/suggestions/api/4_1/rs`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/findById/party", self.base_url)
    }
}

#[async_trait]
impl PartyLookup for DadataClient {
    async fn find_party(&self, inn: &str) -> Result<LookupOutcome> {
        let resp = self
            .http
            .post(self.endpoint())
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&json!({ "query": inn }))
            .send()
            .await
            .map_err(|e| Error::Lookup(format!("dadata request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Lookup(format!(
                "dadata findById/party failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: SuggestResponse = resp
            .json()
            .await
            .map_err(|e| Error::Lookup(format!("dadata json error: {e}")))?;

        tracing::debug!(inn, suggestions = parsed.suggestions.len(), "dadata response");

        Ok(best_match(inn, parsed))
    }
}

fn best_match(inn: &str, resp: SuggestResponse) -> LookupOutcome {
    let Some(first) = resp.suggestions.into_iter().next() else {
        return LookupOutcome::NotFound(inn.to_string());
    };

    let data = first.data;
    LookupOutcome::Found(Party {
        inn: data.inn.unwrap_or_else(|| inn.to_string()),
        name: data.name.and_then(|n| n.full_with_opf),
        address: data.address.and_then(|a| a.value),
    })
}
