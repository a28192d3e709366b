//! The admin console's list screens.
//!
//! Every screen is a [`ListScreen`] over one [`Resource`]. The resource
//! modules only describe columns, menu entries and API calls.

mod ads;
mod bookings;
pub mod command;
mod facilities;
pub mod list;
pub mod resource;
mod rooms;
mod users;

use std::num::NonZeroU32;
use std::sync::Arc;

use clap::ValueEnum;
use tokio::sync::mpsc::UnboundedSender;

pub use list::{ListMsg, ListScreen};
pub use resource::Resource;

use crate::api::{Ad, Booking, Facility, HotelApi, Room, User};
use crate::config::{KeyResolver, TableConfig};
use crate::core::{AppMessage, Screen};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScreenKind {
    #[default]
    Rooms,
    Users,
    Bookings,
    Facilities,
    Ads,
}

impl ScreenKind {
    /// Tab order.
    pub const ALL: [Self; 5] = [
        Self::Rooms,
        Self::Users,
        Self::Bookings,
        Self::Facilities,
        Self::Ads,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Rooms => Room::NAME,
            Self::Users => User::NAME,
            Self::Bookings => Booking::NAME,
            Self::Facilities => Facility::NAME,
            Self::Ads => Ad::NAME,
        }
    }
}

/// Paging settings handed to each list screen.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page_sizes: Vec<NonZeroU32>,
    pub default_page_size: NonZeroU32,
    /// `None` keeps the resource's own default.
    pub reset_page_on_size_change: Option<bool>,
}

impl From<&TableConfig> for ListOptions {
    fn from(config: &TableConfig) -> Self {
        Self {
            page_sizes: config.page_sizes.clone(),
            default_page_size: config.default_page_size,
            reset_page_on_size_change: config.reset_page_on_size_change,
        }
    }
}

/// All screens in [`ScreenKind::ALL`] order.
pub fn build_screens(
    api: &Arc<dyn HotelApi>,
    app_tx: &UnboundedSender<AppMessage>,
    resolver: &Arc<KeyResolver>,
    options: &ListOptions,
) -> Vec<Box<dyn Screen>> {
    ScreenKind::ALL
        .into_iter()
        .map(|kind| -> Box<dyn Screen> {
            let api = api.clone();
            let app_tx = app_tx.clone();
            let resolver = resolver.clone();
            match kind {
                ScreenKind::Rooms => Box::new(ListScreen::<Room>::new(api, app_tx, resolver, options)),
                ScreenKind::Users => Box::new(ListScreen::<User>::new(api, app_tx, resolver, options)),
                ScreenKind::Bookings => {
                    Box::new(ListScreen::<Booking>::new(api, app_tx, resolver, options))
                }
                ScreenKind::Facilities => {
                    Box::new(ListScreen::<Facility>::new(api, app_tx, resolver, options))
                }
                ScreenKind::Ads => Box::new(ListScreen::<Ad>::new(api, app_tx, resolver, options)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Dataset, FixtureApi};
    use crate::ui::components::table::RowAction;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[test]
    fn test_screens_follow_tab_order() {
        let api: Arc<dyn HotelApi> =
            Arc::new(FixtureApi::new(Dataset::default(), Duration::ZERO));
        let (tx, _rx) = mpsc::unbounded_channel();
        let screens = build_screens(
            &api,
            &tx,
            &Arc::new(KeyResolver::default()),
            &ListOptions::from(&TableConfig::default()),
        );

        let titles: Vec<_> = screens.iter().map(|s| s.title()).collect();
        let labels: Vec<_> = ScreenKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(titles, labels);
        assert_eq!(ScreenKind::Facilities.index(), 3);
    }

    #[test]
    fn test_resource_actions() {
        assert!(!User::actions().contains(RowAction::Edit));
        assert!(!User::actions().contains(RowAction::Delete));
        assert!(!Booking::actions().contains(RowAction::Edit));
        assert!(Booking::actions().contains(RowAction::Delete));
        assert_eq!(Room::actions().entries(), RowAction::ALL.to_vec());
        assert!(User::reset_page_on_size_change());
        assert!(!Room::reset_page_on_size_change());
    }
}
