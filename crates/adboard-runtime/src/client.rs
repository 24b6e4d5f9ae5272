//! HTTP access to the reporting service.

use std::future::Future;

use adboard_types::{AppDirectoryEntry, DateRange, ReportRow, decode_apps, decode_report};
use url::Url;

use crate::config::Config;
use crate::{Error, Result};

const USER_AGENT: &str = concat!("adboard/", env!("CARGO_PKG_VERSION"));

/// Source of report rows and the app directory.
///
/// The two fetches are independent: the directory takes no range and the
/// store issues both concurrently.
pub trait ReportApi: Send + Sync + 'static {
    fn fetch_report(
        &self,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<ReportRow>>> + Send;

    fn fetch_apps(&self) -> impl Future<Output = Result<Vec<AppDirectoryEntry>>> + Send;
}

/// `ReportApi` over `GET {base}/report` and `GET {base}/apps`
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpReportApi {
    pub fn new(base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL '{}' cannot have endpoint paths",
                base_url
            )));
        }
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }
        url
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<Vec<u8>> {
        let response = self.client.get(url.clone()).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

impl ReportApi for HttpReportApi {
    #[tracing::instrument(skip_all, fields(range = %range))]
    async fn fetch_report(&self, range: DateRange) -> Result<Vec<ReportRow>> {
        let query = [
            ("startDate", range.start().to_string()),
            ("endDate", range.end().to_string()),
        ];
        let body = self.get(self.endpoint("report"), &query).await?;
        let rows = decode_report(&body)?;
        tracing::debug!(rows = rows.len(), "report fetched");
        Ok(rows)
    }

    #[tracing::instrument(skip_all)]
    async fn fetch_apps(&self) -> Result<Vec<AppDirectoryEntry>> {
        let body = self.get(self.endpoint("apps"), &[]).await?;
        let apps = decode_apps(&body)?;
        tracing::debug!(apps = apps.len(), "app directory fetched");
        Ok(apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpReportApi {
        HttpReportApi::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_appends_to_base_path() {
        assert_eq!(
            api("http://example.com/v3/dummy").endpoint("report").as_str(),
            "http://example.com/v3/dummy/report"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        assert_eq!(
            api("http://example.com/v3/dummy/").endpoint("apps").as_str(),
            "http://example.com/v3/dummy/apps"
        );
        assert_eq!(
            api("http://example.com").endpoint("apps").as_str(),
            "http://example.com/apps"
        );
    }

    #[test]
    fn test_rejects_cannot_be_a_base_url() {
        let err = HttpReportApi::new(Url::parse("mailto:ops@example.com").unwrap()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
