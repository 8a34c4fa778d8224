//! The in-progress booking edited across wizard steps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Mutable booking record owned by one wizard session.
///
/// Selection fields stay `None` until the guest picks them; contact fields
/// start empty (or pre-filled from the signed-in user).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub hotel_id: Option<DbId>,
    pub room_id: Option<DbId>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

/// Guest contact details entered on step 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl BookingDraft {
    /// A fresh draft with the guest's name and email pre-filled.
    pub fn prefilled(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// Choose a hotel. Any previously picked room is dropped.
    pub fn select_hotel(&mut self, hotel_id: DbId) {
        self.hotel_id = Some(hotel_id);
        self.room_id = None;
    }

    pub fn select_room(&mut self, room_id: DbId) {
        self.room_id = Some(room_id);
    }

    pub fn set_dates(&mut self, check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) {
        self.check_in = check_in;
        self.check_out = check_out;
    }

    pub fn set_contact(&mut self, contact: ContactDetails) {
        self.name = contact.name;
        self.phone = contact.phone;
        self.email = contact.email;
        self.notes = contact.notes;
    }
}
