use async_trait::async_trait;
use ratatui::layout::{Alignment, Constraint};

use super::resource::{Resource, field, money, or_dash, short_date};
use crate::api::{HotelApi, Page, PageRequest, Room};
use crate::ui::components::table::{ActionSet, Column, RowAction};

/// Last path segment of an image URL.
fn image_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

fn facility_names(room: &Room) -> String {
    if room.facilities.is_empty() {
        return "-".to_string();
    }
    room.facilities
        .iter()
        .map(|facility| facility.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl Resource for Room {
    const NAME: &'static str = "Rooms";
    const SINGULAR: &'static str = "Room";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("roomNumber", "Room Number").width(Constraint::Length(12)),
            Column::new("image", "Image").render(|room: &Self| {
                room.images
                    .first()
                    .map_or("-", |url| image_name(url))
                    .to_string()
            }),
            Column::new("price", "Price")
                .align(Alignment::Right)
                .render(|room: &Self| money(room.price)),
            Column::new("discount", "Discount")
                .align(Alignment::Center)
                .render(|room: &Self| or_dash(room.discount)),
            Column::new("capacity", "Capacity").align(Alignment::Center),
            Column::new("facilities", "Facilities")
                .width(Constraint::Fill(2))
                .render(facility_names),
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
            field("Room Number", &self.room_number),
            field("Price", money(self.price)),
            field("Discount", or_dash(self.discount)),
            field("Capacity", self.capacity),
            field("Facilities", facility_names(self)),
            field("Images", self.images.len()),
            field(
                "Created By",
                or_dash(self.created_by.as_ref().map(|u| &u.user_name)),
            ),
            field("Created At", short_date(self.created_at.as_ref())),
        ]
    }

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>> {
        api.rooms(request).await
    }

    async fn delete(api: &dyn HotelApi, id: &str) -> color_eyre::Result<String> {
        api.delete_room(id).await
    }
}
