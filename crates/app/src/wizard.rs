//! Wizard Controller: drives the four-step booking flow and submits the
//! reviewed draft to the backend.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use staydesk_core::booking::{Booking, BookingStatus};
use staydesk_core::catalog::Catalog;
use staydesk_core::draft::{BookingDraft, ContactDetails};
use staydesk_core::error::{CoreError, StepError};
use staydesk_core::types::DbId;
use staydesk_core::wizard::{
    booking_total, compute_summary, nights_between, validate_step, BookingSummary, Wizard,
    WizardStep,
};
use staydesk_provider::{BookingProvider, BookingRequest};
use uuid::Uuid;

use crate::error::{submission_error, AppResult};
use crate::ledger::BookingLedger;
use crate::session::SessionStore;

pub struct WizardController {
    wizard: Wizard,
    provider: Arc<dyn BookingProvider>,
}

impl WizardController {
    pub fn new(provider: Arc<dyn BookingProvider>) -> Self {
        Self {
            wizard: Wizard::default(),
            provider,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn draft(&self) -> &BookingDraft {
        self.wizard.draft()
    }

    /// Begin a new booking on the first step, pre-filling the guest's name
    /// and email from the signed-in user.
    pub fn start(&mut self, session: &SessionStore) {
        self.wizard.reset(fresh_draft(session));
        tracing::debug!("Booking wizard started");
    }

    pub fn select_hotel(&mut self, catalog: &Catalog, hotel_id: DbId) -> Result<(), CoreError> {
        if catalog.hotel(hotel_id).is_none() {
            return Err(CoreError::Validation(format!(
                "Hotel {hotel_id} does not exist"
            )));
        }
        self.wizard.draft_mut().select_hotel(hotel_id);
        Ok(())
    }

    /// Pick a room of the selected hotel. Only available rooms qualify.
    pub fn select_room(&mut self, catalog: &Catalog, room_id: DbId) -> Result<(), CoreError> {
        let hotel_id = self.draft().hotel_id.ok_or(StepError::MissingHotel)?;
        catalog.bookable_room(hotel_id, room_id)?;
        self.wizard.draft_mut().select_room(room_id);
        Ok(())
    }

    pub fn set_dates(&mut self, check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) {
        self.wizard.draft_mut().set_dates(check_in, check_out);
    }

    pub fn set_contact(&mut self, contact: ContactDetails) {
        self.wizard.draft_mut().set_contact(contact);
    }

    /// Validate the current step and move forward.
    pub fn advance(&mut self) -> Result<WizardStep, StepError> {
        let from = self.wizard.step();
        match self.wizard.advance() {
            Ok(to) => {
                tracing::debug!(from = from.label(), to = to.label(), "Wizard advanced");
                Ok(to)
            }
            Err(e) => {
                tracing::debug!(step = from.label(), error = %e, "Wizard step rejected");
                Err(e)
            }
        }
    }

    pub fn retreat(&mut self) -> WizardStep {
        let step = self.wizard.retreat();
        tracing::debug!(step = step.label(), "Wizard went back");
        step
    }

    pub fn summary(&self, catalog: &Catalog) -> BookingSummary {
        compute_summary(self.draft(), catalog)
    }

    /// Send the reviewed draft to the backend and record the booking.
    ///
    /// Any failure leaves the draft, the step and the ledger untouched. On
    /// success the wizard starts over with a fresh pre-filled draft.
    pub async fn submit(
        &mut self,
        session: &SessionStore,
        catalog: &Catalog,
        ledger: &BookingLedger,
    ) -> AppResult<Booking> {
        let user = session.require_user()?;
        let step = self.wizard.step();
        if step != WizardStep::Review {
            return Err(CoreError::NotReviewed {
                step: step.to_number(),
            }
            .into());
        }

        let draft = self.wizard.draft();
        for step in [
            WizardStep::SelectHotel,
            WizardStep::SelectRoomAndDates,
            WizardStep::GuestDetails,
        ] {
            validate_step(step, draft)?;
        }
        let (Some(hotel_id), Some(room_id), Some(check_in), Some(check_out)) =
            (draft.hotel_id, draft.room_id, draft.check_in, draft.check_out)
        else {
            return Err(CoreError::from(StepError::MissingRoomOrDates).into());
        };
        let room = catalog.bookable_room(hotel_id, room_id)?;
        let nights = nights_between(check_in, check_out);
        let total = booking_total(room.price, nights);

        let request = BookingRequest {
            room_id,
            guest_name: draft.name.trim().to_string(),
            check_in,
            check_out,
        };
        let receipt = self.provider.create_booking(&request).await.map_err(|e| {
            tracing::warn!(user_id = %user.id, room_id, error = %e, "Booking rejected by backend");
            submission_error(e)
        })?;

        let booking = Booking {
            id: Uuid::now_v7().to_string(),
            backend_id: receipt.id,
            user_id: user.id,
            hotel_id,
            room_id,
            check_in,
            check_out,
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            email: draft.email.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            total,
            nights,
        };
        let booking = ledger.add(&booking).await?;

        tracing::info!(
            booking_id = %booking.id,
            backend_id = booking.backend_id.as_deref().unwrap_or("-"),
            user_id = %booking.user_id,
            hotel_id,
            room_id,
            nights,
            total,
            "Booking confirmed"
        );
        self.wizard.reset(fresh_draft(session));
        Ok(booking)
    }
}

fn fresh_draft(session: &SessionStore) -> BookingDraft {
    session.current().map_or_else(BookingDraft::default, |user| {
        BookingDraft::prefilled(&user.full_name, &user.email)
    })
}
