use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::{WrapErr, eyre};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use super::model::{Ad, Booking, Facility, Identified, Room, User};
use super::{HotelApi, Page, PageRequest};
use crate::config::DataConfig;

const SAMPLE: &str = include_str!("../../fixtures/hotel.json");

/// Every collection the fixture store serves.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub ads: Vec<Ad>,
}

impl Dataset {
    /// The sample data bundled with the binary.
    pub fn sample() -> color_eyre::Result<Self> {
        serde_json::from_str(SAMPLE).wrap_err("Bundled sample data is invalid")
    }

    pub fn from_path(path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read fixtures from {}", path.display()))?;
        serde_json::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse fixtures in {}", path.display()))
    }
}

/// In-memory [`HotelApi`] with simulated latency.
pub struct FixtureApi {
    store: RwLock<Dataset>,
    latency: Duration,
}

impl FixtureApi {
    pub fn new(dataset: Dataset, latency: Duration) -> Self {
        Self {
            store: RwLock::new(dataset),
            latency,
        }
    }

    pub fn from_config(config: &DataConfig) -> color_eyre::Result<Self> {
        let dataset = match &config.fixtures {
            Some(path) => Dataset::from_path(path)?,
            None => Dataset::sample()?,
        };
        debug!(
            rooms = dataset.rooms.len(),
            users = dataset.users.len(),
            bookings = dataset.bookings.len(),
            facilities = dataset.facilities.len(),
            ads = dataset.ads.len(),
            "Loaded fixture dataset"
        );
        Ok(Self::new(dataset, Duration::from_millis(config.latency_ms)))
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn remove_by_id<T: Identified>(
    items: &mut Vec<T>,
    kind: &str,
    id: &str,
) -> color_eyre::Result<String> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| eyre!("{kind} {id} not found"))?;
    items.remove(index);
    debug!(kind, id, "Deleted fixture record");
    Ok(format!("{kind} deleted successfully"))
}

/// Slice out one page. A page past the end is empty but keeps the total.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let total_count = u32::try_from(items.len()).unwrap_or(u32::MAX);
    let page_items = items
        .iter()
        .skip(request.offset())
        .take(request.size.get() as usize)
        .cloned()
        .collect();
    Page {
        items: page_items,
        total_count,
    }
}

#[async_trait]
impl HotelApi for FixtureApi {
    async fn rooms(&self, request: PageRequest) -> color_eyre::Result<Page<Room>> {
        self.delay().await;
        Ok(paginate(&self.store.read().await.rooms, request))
    }

    async fn users(&self, request: PageRequest) -> color_eyre::Result<Page<User>> {
        self.delay().await;
        Ok(paginate(&self.store.read().await.users, request))
    }

    async fn bookings(&self, request: PageRequest) -> color_eyre::Result<Page<Booking>> {
        self.delay().await;
        Ok(paginate(&self.store.read().await.bookings, request))
    }

    async fn facilities(&self, request: PageRequest) -> color_eyre::Result<Page<Facility>> {
        self.delay().await;
        Ok(paginate(&self.store.read().await.facilities, request))
    }

    async fn ads(&self, request: PageRequest) -> color_eyre::Result<Page<Ad>> {
        self.delay().await;
        Ok(paginate(&self.store.read().await.ads, request))
    }

    async fn delete_room(&self, id: &str) -> color_eyre::Result<String> {
        self.delay().await;
        remove_by_id(&mut self.store.write().await.rooms, "Room", id)
    }

    async fn delete_booking(&self, id: &str) -> color_eyre::Result<String> {
        self.delay().await;
        remove_by_id(&mut self.store.write().await.bookings, "Booking", id)
    }

    async fn delete_facility(&self, id: &str) -> color_eyre::Result<String> {
        self.delay().await;
        remove_by_id(&mut self.store.write().await.facilities, "Facility", id)
    }

    async fn delete_ad(&self, id: &str) -> color_eyre::Result<String> {
        self.delay().await;
        remove_by_id(&mut self.store.write().await.ads, "Ad", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::table::pagination::page_size;

    fn api() -> FixtureApi {
        FixtureApi::new(Dataset::sample().unwrap(), Duration::ZERO)
    }

    #[test]
    fn test_sample_has_every_collection() {
        let data = Dataset::sample().unwrap();
        assert_eq!(data.rooms.len(), 12);
        assert!(!data.users.is_empty());
        assert!(!data.bookings.is_empty());
        assert!(!data.facilities.is_empty());
        assert!(!data.ads.is_empty());
    }

    #[test]
    fn test_paginate_last_and_past_end() {
        let items: Vec<u32> = (1..=12).collect();

        let last = paginate(&items, PageRequest::new(3, page_size(5)));
        assert_eq!(last.items, vec![11, 12]);
        assert_eq!(last.total_count, 12);

        let past = paginate(&items, PageRequest::new(4, page_size(5)));
        assert!(past.items.is_empty());
        assert_eq!(past.total_count, 12);

        let empty = paginate::<u32>(&[], PageRequest::new(1, page_size(5)));
        assert_eq!(empty.total_count, 0);
    }

    #[tokio::test]
    async fn test_rooms_page() {
        let page = api().rooms(PageRequest::new(1, page_size(5))).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.total_count, 12);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let api = api();
        let first = api.rooms(PageRequest::new(1, page_size(5))).await.unwrap();
        let id = first.items[0].id.clone();

        let message = api.delete_room(&id).await.unwrap();
        assert_eq!(message, "Room deleted successfully");

        let after = api.rooms(PageRequest::new(1, page_size(5))).await.unwrap();
        assert_eq!(after.total_count, 11);
        assert!(after.items.iter().all(|room| room.id != id));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_fails() {
        let err = api().delete_ad("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Ad missing not found");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let api = FixtureApi::new(Dataset::default(), Duration::from_millis(150));
        let started = tokio::time::Instant::now();
        api.users(PageRequest::new(1, page_size(5))).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(150));
    }
}
