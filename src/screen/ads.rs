use async_trait::async_trait;
use ratatui::layout::Alignment;

use super::resource::{Resource, field, or_dash, short_date};
use crate::api::{Ad, HotelApi, Page, PageRequest};
use crate::ui::components::table::{ActionSet, Column, RowAction};

fn room_number(ad: &Ad) -> String {
    or_dash(ad.room.as_ref().map(|room| &room.room_number))
}

/// Whole-dollar price as the ads list shows it.
fn price(ad: &Ad) -> String {
    or_dash(ad.room.as_ref().and_then(|room| room.price).map(|p| format!("${p}")))
}

fn capacity(ad: &Ad) -> String {
    or_dash(ad.room.as_ref().and_then(|room| room.capacity))
}

fn created_by(ad: &Ad) -> String {
    or_dash(ad.created_by.as_ref().map(|user| &user.user_name))
}

#[async_trait]
impl Resource for Ad {
    const NAME: &'static str = "Ads";
    const SINGULAR: &'static str = "Ad";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("roomNumber", "Room Number").render(room_number),
            Column::new("price", "Price")
                .align(Alignment::Right)
                .render(price),
            Column::new("capacity", "Capacity")
                .align(Alignment::Center)
                .render(capacity),
            Column::new("createdBy", "Created By").render(created_by),
            Column::new("createdAt", "Created At")
                .align(Alignment::Center)
                .render(|ad: &Self| short_date(ad.created_at.as_ref())),
        ]
    }

    fn actions() -> ActionSet {
        [RowAction::View, RowAction::Edit, RowAction::Delete]
            .into_iter()
            .collect()
    }

    fn details(&self) -> Vec<(String, String)> {
        vec![
            field("ID", &self.id),
            field("Room", room_number(self)),
            field("Price", price(self)),
            field("Capacity", capacity(self)),
            field("Active", if self.is_active { "yes" } else { "no" }),
            field("Created By", created_by(self)),
            field("Created At", short_date(self.created_at.as_ref())),
        ]
    }

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>> {
        api.ads(request).await
    }

    async fn delete(api: &dyn HotelApi, id: &str) -> color_eyre::Result<String> {
        api.delete_ad(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RoomRef;

    #[test]
    fn test_room_fields_come_from_reference() {
        let mut ad = Ad {
            id: "ad1".to_string(),
            is_active: true,
            room: Some(RoomRef {
                id: "r1".to_string(),
                room_number: "B-102".to_string(),
                price: Some(150.0),
                capacity: Some(3),
            }),
            created_by: None,
            created_at: None,
        };
        assert_eq!(room_number(&ad), "B-102");
        assert_eq!(price(&ad), "$150");
        assert_eq!(capacity(&ad), "3");
        assert_eq!(created_by(&ad), "-");

        ad.room = None;
        assert_eq!(price(&ad), "-");
    }
}
