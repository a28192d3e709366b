use async_trait::async_trait;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;

use super::resource::{Resource, field, money, or_dash, short_date};
use crate::api::{Booking, HotelApi, Page, PageRequest};
use crate::ui::components::table::{ActionSet, Column, RowAction};

/// Pending bookings still need attention, so they stand out.
fn status_style(status: &str) -> Style {
    match status {
        "pending" => Style::default().add_modifier(Modifier::BOLD),
        "completed" => Style::default(),
        _ => Style::default().add_modifier(Modifier::DIM),
    }
}

fn user_name(booking: &Booking) -> String {
    or_dash(booking.user.as_ref().map(|user| &user.user_name))
}

fn room_number(booking: &Booking) -> String {
    or_dash(booking.room.as_ref().map(|room| &room.room_number))
}

#[async_trait]
impl Resource for Booking {
    const NAME: &'static str = "Bookings";
    const SINGULAR: &'static str = "Booking";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("status", "Room Status").render(|booking: &Self| {
                Line::styled(booking.status.clone(), status_style(&booking.status))
            }),
            Column::new("totalPrice", "Total Price")
                .align(Alignment::Right)
                .render(|booking: &Self| money(booking.total_price)),
            Column::new("startDate", "Start Date")
                .align(Alignment::Center)
                .render(|booking: &Self| short_date(Some(&booking.start_date))),
            Column::new("endDate", "End Date")
                .align(Alignment::Center)
                .render(|booking: &Self| short_date(Some(&booking.end_date))),
            Column::new("userName", "User").render(user_name),
            Column::new("room", "Room").render(room_number),
        ]
    }

    fn actions() -> ActionSet {
        ActionSet::empty()
            .with(RowAction::View)
            .with(RowAction::Delete)
    }

    fn details(&self) -> Vec<(String, String)> {
        vec![
            field("ID", &self.id),
            field("Status", &self.status),
            field("Total Price", money(self.total_price)),
            field("Start Date", short_date(Some(&self.start_date))),
            field("End Date", short_date(Some(&self.end_date))),
            field("User", user_name(self)),
            field("Room", room_number(self)),
            field("Booked At", short_date(self.created_at.as_ref())),
        ]
    }

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>> {
        api.bookings(request).await
    }

    async fn delete(api: &dyn HotelApi, id: &str) -> color_eyre::Result<String> {
        api.delete_booking(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Dataset;

    #[test]
    fn test_missing_references_show_dash() {
        let bookings = Dataset::sample().unwrap().bookings;
        let orphan = bookings
            .iter()
            .find(|booking| booking.user.is_none())
            .unwrap();
        assert_eq!(user_name(orphan), "-");

        let roomless = bookings
            .iter()
            .find(|booking| booking.room.is_none())
            .unwrap();
        assert_eq!(room_number(roomless), "-");
        assert_eq!(roomless.details()[6], ("Room".to_string(), "-".to_string()));
    }
}
