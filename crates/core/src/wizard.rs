//! Booking wizard steps, per-step validation and the price summary.
//!
//! The wizard walks a [`BookingDraft`] through four ordered steps. It only
//! moves forward when the current step validates, and moves back
//! unconditionally. Submission itself needs I/O and lives in the app crate;
//! this module answers "may we move on?" and "what will it cost?".

use chrono::NaiveDate;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::draft::BookingDraft;
use crate::error::StepError;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four steps of the booking wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectHotel,
    SelectRoomAndDates,
    GuestDetails,
    Review,
}

/// Number of the last step.
pub const MAX_STEP: u8 = 4;

impl WizardStep {
    /// Every step in order.
    pub const ALL: [WizardStep; 4] = [
        Self::SelectHotel,
        Self::SelectRoomAndDates,
        Self::GuestDetails,
        Self::Review,
    ];

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::SelectHotel => 1,
            Self::SelectRoomAndDates => 2,
            Self::GuestDetails => 3,
            Self::Review => 4,
        }
    }

    /// Heading shown above the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::SelectHotel => "Select Hotel",
            Self::SelectRoomAndDates => "Room & Dates",
            Self::GuestDetails => "Guest Details",
            Self::Review => "Review & Confirm",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::SelectHotel => Self::SelectRoomAndDates,
            Self::SelectRoomAndDates => Self::GuestDetails,
            Self::GuestDetails | Self::Review => Self::Review,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Self::SelectHotel | Self::SelectRoomAndDates => Self::SelectHotel,
            Self::GuestDetails => Self::SelectRoomAndDates,
            Self::Review => Self::GuestDetails,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check that `draft` satisfies the rule for `step`.
///
/// The review step has no rule of its own; reaching it implies the earlier
/// steps passed.
pub fn validate_step(step: WizardStep, draft: &BookingDraft) -> Result<(), StepError> {
    match step {
        WizardStep::SelectHotel => {
            if draft.hotel_id.is_none() {
                return Err(StepError::MissingHotel);
            }
        }
        WizardStep::SelectRoomAndDates => {
            let (Some(_), Some(check_in), Some(check_out)) =
                (draft.room_id, draft.check_in, draft.check_out)
            else {
                return Err(StepError::MissingRoomOrDates);
            };
            if check_in >= check_out {
                return Err(StepError::InvalidDateRange);
            }
        }
        WizardStep::GuestDetails => {
            let blank = |s: &str| s.trim().is_empty();
            if blank(&draft.name) || blank(&draft.phone) || blank(&draft.email) {
                return Err(StepError::MissingContactFields);
            }
        }
        WizardStep::Review => {}
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Wizard state
// ---------------------------------------------------------------------------

/// Current step plus the draft being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    step: WizardStep,
    draft: BookingDraft,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(BookingDraft::default())
    }
}

impl Wizard {
    pub fn new(draft: BookingDraft) -> Self {
        Self {
            step: WizardStep::SelectHotel,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    /// Validate the current step and move to the next one.
    ///
    /// On failure the step is left untouched and the rule's error is
    /// returned as is. Advancing from the review step is a no-op.
    pub fn advance(&mut self) -> Result<WizardStep, StepError> {
        validate_step(self.step, &self.draft)?;
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Move one step back, never below the first step.
    pub fn retreat(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Start over with `draft` on the first step.
    pub fn reset(&mut self, draft: BookingDraft) {
        self.step = WizardStep::SelectHotel;
        self.draft = draft;
    }
}

// ---------------------------------------------------------------------------
// Price summary
// ---------------------------------------------------------------------------

/// Shown in place of a hotel or room that cannot be resolved.
pub const PLACEHOLDER: &str = "-";

/// What the review step displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub hotel_name: String,
    pub room_type: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: i64,
    pub total: i64,
}

/// Whole nights between two dates, or 0 when the range is empty or inverted.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(0)
}

/// Price for `nights` at `nightly_price`.
pub fn booking_total(nightly_price: i64, nights: i64) -> i64 {
    nightly_price.saturating_mul(nights)
}

/// Derive the review summary from the draft and the current catalog.
///
/// Never fails: an unknown hotel or room renders as [`PLACEHOLDER`] with a
/// price of 0, and missing dates give 0 nights.
pub fn compute_summary(draft: &BookingDraft, catalog: &Catalog) -> BookingSummary {
    let hotel = draft.hotel_id.and_then(|id| catalog.hotel(id));
    let room = draft.room_id.and_then(|id| catalog.room(id));

    let nights = match (draft.check_in, draft.check_out) {
        (Some(check_in), Some(check_out)) => nights_between(check_in, check_out),
        _ => 0,
    };
    let price = room.map_or(0, |r| r.price);

    BookingSummary {
        hotel_name: hotel.map_or_else(|| PLACEHOLDER.to_string(), |h| h.name.clone()),
        room_type: room.map_or_else(|| PLACEHOLDER.to_string(), |r| r.room_type.clone()),
        check_in: draft.check_in,
        check_out: draft.check_out,
        nights,
        total: booking_total(price, nights),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
