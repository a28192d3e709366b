use async_trait::async_trait;
use ratatui::layout::Alignment;

use super::resource::{Resource, field, or_dash, short_date};
use crate::api::{Facility, HotelApi, Page, PageRequest};
use crate::ui::components::table::{ActionSet, Column, RowAction};

fn created_by(facility: &Facility) -> String {
    or_dash(facility.created_by.as_ref().map(|user| &user.user_name))
}

#[async_trait]
impl Resource for Facility {
    const NAME: &'static str = "Facilities";
    const SINGULAR: &'static str = "Facility";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Name").align(Alignment::Center),
            Column::new("createdBy", "Created By")
                .align(Alignment::Center)
                .render(created_by),
            Column::new("createdAt", "Created At")
                .align(Alignment::Center)
                .render(|facility: &Self| short_date(facility.created_at.as_ref())),
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
            field("Name", &self.name),
            field("Created By", created_by(self)),
            field("Created At", short_date(self.created_at.as_ref())),
        ]
    }

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>> {
        api.facilities(request).await
    }

    async fn delete(api: &dyn HotelApi, id: &str) -> color_eyre::Result<String> {
        api.delete_facility(id).await
    }
}
