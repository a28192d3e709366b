use std::fmt::Display;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use color_eyre::eyre::eyre;

use crate::api::{HotelApi, Identified, Page, PageRequest};
use crate::ui::components::table::{ActionSet, Column, Record};

/// A record type that gets its own list screen.
///
/// Implementors describe how the record is laid out in the table and how it
/// is fetched and deleted through the [`HotelApi`].
#[async_trait]
pub trait Resource: Record + Identified + Display + Clone + Send + Sync + 'static {
    /// Plural name, used for the tab and table title.
    const NAME: &'static str;
    const SINGULAR: &'static str;

    fn columns() -> Vec<Column<Self>>;

    /// Row menu entries this screen offers.
    fn actions() -> ActionSet;

    /// Whether changing the page size jumps back to page 1.
    fn reset_page_on_size_change() -> bool {
        false
    }

    /// Label/value pairs for the details dialog.
    fn details(&self) -> Vec<(String, String)>;

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>>;

    async fn delete(api: &dyn HotelApi, id: &str) -> color_eyre::Result<String> {
        _ = api;
        Err(eyre!("{} {id} cannot be deleted", Self::SINGULAR))
    }
}

/// `MM/DD/YYYY`, or a dash when the date is missing.
pub fn short_date(date: Option<&DateTime<Utc>>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%m/%d/%Y").to_string())
}

pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn or_dash(value: Option<impl Display>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn field(label: &str, value: impl Display) -> (String, String) {
    (label.to_string(), value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_short_date() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(short_date(Some(&date)), "05/01/2024");
        assert_eq!(short_date(None), "-");
    }

    #[test]
    fn test_money_and_dash() {
        assert_eq!(money(360.0), "$360.00");
        assert_eq!(or_dash(None::<u32>), "-");
        assert_eq!(or_dash(Some("nora")), "nora");
    }
}
