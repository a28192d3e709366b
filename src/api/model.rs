//! Records served by the booking API.
//!
//! Field names follow the API's JSON payloads (`_id`, camelCase), so a dump
//! of the real service can be used as a fixture file.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ui::components::table::Record;

/// Records addressed by the API's `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

identified!(Room, User, Booking, Facility, Ad);

fn opt<T: ToString>(value: Option<&T>) -> Option<String> {
    value.map(ToString::to_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub room_number: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub room_number: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    #[serde(default)]
    pub discount: Option<f64>,
    pub capacity: u32,
    #[serde(default)]
    pub facilities: Vec<FacilityRef>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room {}", self.room_number)
    }
}

impl Record for Room {
    fn field(&self, id: &str) -> Option<String> {
        match id {
            "_id" => Some(self.id.clone()),
            "roomNumber" => Some(self.room_number.clone()),
            "price" => Some(self.price.to_string()),
            "discount" => opt(self.discount.as_ref()),
            "capacity" => Some(self.capacity.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<u64>,
    #[serde(default)]
    pub country: Option<String>,
    pub role: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub verified: bool,
}

impl Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user {}", self.user_name)
    }
}

impl Record for User {
    fn field(&self, id: &str) -> Option<String> {
        match id {
            "_id" => Some(self.id.clone()),
            "userName" => Some(self.user_name.clone()),
            "email" => Some(self.email.clone()),
            "phoneNumber" => opt(self.phone_number.as_ref()),
            "country" => self.country.clone(),
            "role" => Some(self.role.clone()),
            "profileImage" => self.profile_image.clone(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_price: f64,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub room: Option<RoomRef>,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.room {
            Some(room) => write!(f, "booking for room {}", room.room_number),
            None => write!(f, "booking {}", self.id),
        }
    }
}

impl Record for Booking {
    fn field(&self, id: &str) -> Option<String> {
        match id {
            "_id" => Some(self.id.clone()),
            "status" => Some(self.status.clone()),
            "totalPrice" => Some(self.total_price.to_string()),
            "startDate" => Some(self.start_date.to_rfc3339()),
            "endDate" => Some(self.end_date.to_rfc3339()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "facility {}", self.name)
    }
}

impl Record for Facility {
    fn field(&self, id: &str) -> Option<String> {
        match id {
            "_id" => Some(self.id.clone()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub room: Option<RoomRef>,
    #[serde(default)]
    pub created_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Display for Ad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.room {
            Some(room) => write!(f, "ad for room {}", room.room_number),
            None => write!(f, "ad {}", self.id),
        }
    }
}

impl Record for Ad {
    fn field(&self, id: &str) -> Option<String> {
        match id {
            "_id" => Some(self.id.clone()),
            "isActive" => Some(self.is_active.to_string()),
            _ => None,
        }
    }
}
