//! [Elpriset just nu](https://www.elprisetjustnu.se/elpris-api) client.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    api::{FetchError, ParseError, PriceProvider, client},
    core::{
        day::{DayError, PriceDay},
        region::Region,
    },
    prelude::*,
    quantity::rate::KilowattHourRate,
};

pub const DEFAULT_BASE_URL: &str = "https://www.elprisetjustnu.se";

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(base_url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url })
    }

    fn url(&self, on: NaiveDate, region: Region) -> String {
        format!(
            "{}/api/v1/prices/{}_SE{}.json",
            self.base_url.as_str().trim_end_matches('/'),
            on.format("%Y/%m-%d"),
            region.code(),
        )
    }
}

#[async_trait]
impl PriceProvider for Api {
    #[instrument(skip_all, fields(on = %on, region = %region))]
    async fn fetch(&self, on: NaiveDate, region: Region) -> Result<PriceDay, FetchError> {
        let url = self.url(on, region);
        info!(%url, "fetching…");
        let response = self.client.get(&url).send().await.map_err(FetchError::Network)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "request failed");
            return Err(FetchError::Upstream { status });
        }
        let body = response.bytes().await.map_err(FetchError::Network)?;
        let entries = serde_json::from_slice::<Vec<PriceEntry>>(&body).map_err(ParseError::from)?;
        info!(n_entries = entries.len(), "fetched");
        Ok(PriceEntry::try_into_day(entries, on, region).map_err(ParseError::from)?)
    }
}

#[derive(Deserialize)]
struct PriceEntry {
    #[serde(rename = "SEK_per_kWh")]
    rate: KilowattHourRate,

    #[serde(default)]
    time_start: Option<DateTime<FixedOffset>>,

    #[serde(default)]
    time_end: Option<DateTime<FixedOffset>>,
}

impl PriceEntry {
    /// Timestamped entries are grouped by hour, otherwise the order is trusted.
    fn try_into_day(
        entries: Vec<Self>,
        on: NaiveDate,
        region: Region,
    ) -> Result<PriceDay, DayError> {
        let timestamped = entries
            .iter()
            .map(|entry| Some((entry.time_start?, entry.time_end?, entry.rate)))
            .collect::<Option<Vec<_>>>();
        match timestamped {
            Some(rates) => PriceDay::try_from_rates(on, region, rates),
            None => {
                warn!("timestamps are missing, relying on the order");
                PriceDay::try_from_hourly(on, region, entries.into_iter().map(|entry| entry.rate))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, Timelike};
    use itertools::Itertools;
    use reqwest::StatusCode;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn hourly_body(rate: impl Fn(u32) -> f64) -> String {
        let entries = (0..24)
            .map(|hour| {
                let rate = rate(hour);
                // language=json
                format!(
                    r#"{{
                        "SEK_per_kWh": {rate},
                        "EUR_per_kWh": {eur},
                        "EXR": 11.0,
                        "time_start": "2026-10-19T{hour:02}:00:00+02:00",
                        "time_end": "2026-10-19T{hour:02}:59:59+02:00"
                    }}"#,
                    eur = rate / 11.0,
                )
            })
            .join(",");
        format!("[{entries}]")
    }

    fn api(server: &mockito::Server) -> Api {
        Api::new(server.url().parse().unwrap()).unwrap()
    }

    #[test]
    fn test_url() -> Result {
        let api = Api::new(DEFAULT_BASE_URL.parse()?)?;
        assert_eq!(
            api.url(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), Region::Se4),
            "https://www.elprisetjustnu.se/api/v1/prices/2026/01-05_SE4.json"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_ok() -> Result {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/prices/2026/10-19_SE3.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(hourly_body(|hour| f64::from(hour) / 10.0))
            .create_async()
            .await;

        let day = api(&server).fetch(date(), Region::Se3).await?;

        mock.assert_async().await;
        assert_eq!(day.date, date());
        assert_eq!(day.region, Region::Se3);
        assert_eq!(day.len(), 24);
        assert_eq!(day[18].rate, KilowattHourRate(1.8));
        assert_eq!(day[0].interval.start, "2026-10-19T00:00:00+02:00".parse::<DateTime<Local>>()?);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_without_timestamps() -> Result {
        let mut server = mockito::Server::new_async().await;
        let body = (0..24).map(|hour| format!(r#"{{"SEK_per_kWh": {hour}}}"#)).join(",");
        let body = format!("[{body}]");
        let _mock = server
            .mock("GET", "/api/v1/prices/2026/10-19_SE1.json")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let day = api(&server).fetch(date(), Region::Se1).await?;

        assert_eq!(day[7].rate, KilowattHourRate(7.0));
        assert_eq!(day[7].interval.start.hour(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/prices/2026/10-19_SE2.json")
            .with_status(404)
            .create_async()
            .await;

        let error = api(&server).fetch(date(), Region::Se2).await.unwrap_err();

        assert!(matches!(error, FetchError::Upstream { status: StatusCode::NOT_FOUND }));
    }

    #[tokio::test]
    async fn test_fetch_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/prices/2026/10-19_SE3.json")
            .with_status(200)
            .with_body(r#"[{"EUR_per_kWh": 0.05}]"#)
            .create_async()
            .await;

        let error = api(&server).fetch(date(), Region::Se3).await.unwrap_err();

        assert!(matches!(error, FetchError::Parse(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn test_fetch_partial_day() {
        let mut server = mockito::Server::new_async().await;
        let body = (0..12).map(|hour| format!(r#"{{"SEK_per_kWh": {hour}}}"#)).join(",");
        let body = format!("[{body}]");
        let _mock = server
            .mock("GET", "/api/v1/prices/2026/10-19_SE3.json")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let error = api(&server).fetch(date(), Region::Se3).await.unwrap_err();

        assert!(matches!(
            error,
            FetchError::Parse(ParseError::Day(DayError::WrongNumberOfHours { actual: 12 }))
        ));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() -> Result {
        let api = Api::new("http://127.0.0.1:9".parse()?)?;
        let error = api.fetch(date(), Region::Se3).await.unwrap_err();
        assert!(matches!(error, FetchError::Network(_)));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "makes the API request"]
    async fn test_fetch_today_live() -> Result {
        let now = Local::now();
        let day = Api::new(DEFAULT_BASE_URL.parse()?)?.fetch_today(now, Region::Se3).await?;
        assert_eq!(day.date, now.date_naive());
        assert!(day.iter().is_sorted_by_key(|price| price.interval.start));
        Ok(())
    }
}
