//! Tool for recent company news with sentiment labels

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, optional_number, required_str};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde_json::{Value, json};
use tracing::warn;

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::NewsArticle;
use crate::error::{ResearchError, Result};

/// Articles returned when no limit is given
pub const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 50;

/// Recent headlines from the Alpha Vantage news feed
pub struct CompanyNewsTool {
    sources: DataSources,
}

impl CompanyNewsTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn headlines(&self, symbol: &str, limit: usize) -> Result<Value> {
        let client = self.sources.alpha_vantage()?;
        let articles: Vec<Value> = client
            .news(symbol, limit)
            .await?
            .into_iter()
            .take(limit)
            .map(article_json)
            .collect();

        Ok(json!({
            "symbol": symbol,
            "articles": articles,
        }))
    }
}

fn article_json(article: NewsArticle) -> Value {
    json!({
        "headline": article.title,
        "summary": article.summary,
        "sentiment": article
            .overall_sentiment_label
            .map_or_else(|| "neutral".to_string(), |s| s.to_ascii_lowercase()),
        "date": publication_date(&article.time_published),
        "source": article.source,
        "url": article.url,
    })
}

/// Requested article count, clamped to `1..=MAX_LIMIT`
fn article_limit(params: &Value) -> Result<usize> {
    let Some(limit) = optional_number(params, "limit").map_err(ResearchError::InvalidArgument)? else {
        return Ok(DEFAULT_LIMIT);
    };
    if limit.fract() != 0.0 {
        return Err(ResearchError::InvalidArgument(format!(
            "'limit' must be a whole number, got {limit}"
        )));
    }
    Ok(limit.clamp(1.0, MAX_LIMIT as f64) as usize)
}

/// `2024-01-15` from `20240115T120000`
fn publication_date(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S")
        .map_or_else(|_| raw.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}

#[async_trait]
impl Tool for CompanyNewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        let limit = match article_limit(&params) {
            Ok(limit) => limit,
            Err(e) => return Ok(error_payload(e)),
        };

        Ok(self.headlines(&symbol, limit).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Company news unavailable");
            error_payload(e)
        }))
    }

    fn name(&self) -> &'static str {
        "get_company_news"
    }

    fn description(&self) -> &'static str {
        "Fetch recent news articles for a company with headline, summary, sentiment, \
         date and source."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": symbol_property(),
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of articles",
                    "default": DEFAULT_LIMIT
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{empty_sources, sources_with_server};
    use wiremock::matchers::query_param;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_publication_date() {
        assert_eq!(publication_date("20240115T120000"), "2024-01-15");
        assert_eq!(publication_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_article_limit_spellings() {
        assert_eq!(article_limit(&json!({})).unwrap(), DEFAULT_LIMIT);
        assert_eq!(article_limit(&json!({"limit": 3})).unwrap(), 3);
        assert_eq!(article_limit(&json!({"limit": 3.0})).unwrap(), 3);
        assert_eq!(article_limit(&json!({"limit": "3"})).unwrap(), 3);
        assert_eq!(article_limit(&json!({"limit": 0})).unwrap(), 1);
        assert_eq!(article_limit(&json!({"limit": 500})).unwrap(), MAX_LIMIT);
        assert!(article_limit(&json!({"limit": 2.5})).is_err());
        assert!(article_limit(&json!({"limit": "a few"})).is_err());
    }

    #[tokio::test]
    async fn test_bad_limit_is_error_payload() {
        let server = MockServer::start().await;
        let tool = CompanyNewsTool::new(sources_with_server(vec![], &server));
        let result = tool
            .execute(json!({"symbol": "TSLA", "limit": "a few"}))
            .await
            .unwrap();
        assert!(result["error"].as_str().unwrap().contains("limit"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_without_key_is_error_payload() {
        let tool = CompanyNewsTool::new(empty_sources());
        let result = tool.execute(json!({"symbol": "TSLA"})).await.unwrap();
        assert!(result.get("error").is_some());
    }

    #[tokio::test]
    async fn test_articles_are_reshaped() {
        let server = MockServer::start().await;
        Mock::given(query_param("function", "NEWS_SENTIMENT"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "feed": [
                    {
                        "title": "Tesla deliveries beat estimates",
                        "url": "https://example.com/tsla-1",
                        "time_published": "20240402T133000",
                        "summary": "Q1 deliveries came in above consensus.",
                        "source": "Bloomberg",
                        "overall_sentiment_label": "Bullish"
                    },
                    {
                        "title": "Analysts split on margins",
                        "url": "https://example.com/tsla-2",
                        "time_published": "20240401T090000",
                        "summary": "Price cuts weigh on margins.",
                        "source": "Reuters"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let tool = CompanyNewsTool::new(sources_with_server(vec![], &server));
        let result = tool
            .execute(json!({"symbol": "TSLA", "limit": "2"}))
            .await
            .unwrap();

        let articles = result["articles"].as_array().unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0]["headline"], "Tesla deliveries beat estimates");
        assert_eq!(articles[0]["sentiment"], "bullish");
        assert_eq!(articles[0]["date"], "2024-04-02");
        assert_eq!(articles[1]["sentiment"], "neutral");
        assert_eq!(articles[1]["source"], "Reuters");
    }
}
