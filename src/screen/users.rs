use async_trait::async_trait;
use ratatui::layout::Alignment;

use super::resource::{Resource, field, or_dash};
use crate::api::{HotelApi, Page, PageRequest, User};
use crate::ui::components::table::{ActionSet, Column, RowAction};

/// Numbers are stored without their leading zero.
fn phone(user: &User) -> String {
    or_dash(user.phone_number.map(|n| format!("0{n}")))
}

#[async_trait]
impl Resource for User {
    const NAME: &'static str = "Users";
    const SINGULAR: &'static str = "User";

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("userName", "Name").align(Alignment::Center),
            Column::new("profileImage", "Profile")
                .align(Alignment::Center)
                .render(|user: &Self| if user.profile_image.is_some() { "▣" } else { "-" }),
            Column::new("email", "Email")
                .align(Alignment::Center)
                .width(ratatui::layout::Constraint::Fill(2)),
            Column::new("phoneNumber", "Phone")
                .align(Alignment::Center)
                .render(phone),
            Column::new("country", "Country")
                .align(Alignment::Center)
                .render(|user: &Self| or_dash(user.country.as_deref())),
            Column::new("role", "Role").align(Alignment::Center),
        ]
    }

    fn actions() -> ActionSet {
        ActionSet::empty().with(RowAction::View)
    }

    fn reset_page_on_size_change() -> bool {
        true
    }

    fn details(&self) -> Vec<(String, String)> {
        vec![
            field("ID", &self.id),
            field("Name", &self.user_name),
            field("Email", &self.email),
            field("Phone", phone(self)),
            field("Country", or_dash(self.country.as_deref())),
            field("Role", &self.role),
            field("Verified", if self.verified { "yes" } else { "no" }),
            field("Profile Image", or_dash(self.profile_image.as_deref())),
        ]
    }

    async fn fetch(api: &dyn HotelApi, request: PageRequest) -> color_eyre::Result<Page<Self>> {
        api.users(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Dataset;

    #[test]
    fn test_phone_restores_leading_zero() {
        let mut user = Dataset::sample().unwrap().users.remove(0);
        assert_eq!(phone(&user), "01012345678");

        user.phone_number = None;
        assert_eq!(phone(&user), "-");
    }

    #[test]
    fn test_every_column_is_centered() {
        assert!(
            User::columns()
                .iter()
                .all(|column| column.alignment() == Some(Alignment::Center))
        );
    }
}
