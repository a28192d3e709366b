//! Booking API seam.
//!
//! Screens talk to the service only through [`HotelApi`]. The bundled
//! [`FixtureApi`] serves an in-memory dataset with simulated latency.

mod fixture;
pub mod model;

use std::num::NonZeroU32;

use async_trait::async_trait;

pub use fixture::{Dataset, FixtureApi};
pub use model::{Ad, Booking, Facility, FacilityRef, Identified, Room, RoomRef, User, UserRef};

/// One page of a listing request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: NonZeroU32,
}

impl PageRequest {
    pub const fn new(page: u32, size: NonZeroU32) -> Self {
        Self { page, size }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.size.get());
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }
}

/// A page of results plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u32,
}

#[async_trait]
pub trait HotelApi: Send + Sync {
    async fn rooms(&self, request: PageRequest) -> color_eyre::Result<Page<Room>>;
    async fn users(&self, request: PageRequest) -> color_eyre::Result<Page<User>>;
    async fn bookings(&self, request: PageRequest) -> color_eyre::Result<Page<Booking>>;
    async fn facilities(&self, request: PageRequest) -> color_eyre::Result<Page<Facility>>;
    async fn ads(&self, request: PageRequest) -> color_eyre::Result<Page<Ad>>;

    /// Each delete returns the service's confirmation message.
    async fn delete_room(&self, id: &str) -> color_eyre::Result<String>;
    async fn delete_booking(&self, id: &str) -> color_eyre::Result<String>;
    async fn delete_facility(&self, id: &str) -> color_eyre::Result<String>;
    async fn delete_ad(&self, id: &str) -> color_eyre::Result<String>;
}
