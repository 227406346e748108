//! Trip creation form state machine.
//!
//! Collects the creation fields, validates required fields on submit, and
//! emits exactly one create action per submission. On success the form
//! resets and a best-effort `new_trip` announcement is emitted; the
//! announcement outcome never feeds back into form state.

use haulage_core::{FieldErrors, NewTrip, VehicleType, parse_pickup_time};

use crate::{AppAction, state::Feedback};

const REQUIRED_MSG: &str = "This field is required.";
const BAD_TIME_MSG: &str = "Enter a valid date and time as YYYY-MM-DDTHH:MM.";

/// Form fields in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    /// Pickup address.
    PickupLocation,
    /// Dropoff address.
    DropoffLocation,
    /// Pickup time, minute precision.
    PickupTime,
    /// Contact number at the dropoff.
    ContactNumber,
    /// What is being hauled.
    LoadDescription,
    /// Vehicle class selector.
    Vehicle,
}

impl CreateField {
    /// Fields in display order.
    pub const ALL: [Self; 6] = [
        Self::PickupLocation,
        Self::DropoffLocation,
        Self::PickupTime,
        Self::ContactNumber,
        Self::LoadDescription,
        Self::Vehicle,
    ];

    /// Wire name, matching the creation payload and server error maps.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::PickupLocation => "pickup_location",
            Self::DropoffLocation => "dropoff_location",
            Self::PickupTime => "pickup_time",
            Self::ContactNumber => "dropoff_contact_number",
            Self::LoadDescription => "load_description",
            Self::Vehicle => "vehicle_type",
        }
    }

    /// Label for rendering.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PickupLocation => "Pickup location",
            Self::DropoffLocation => "Dropoff location",
            Self::PickupTime => "Pickup time",
            Self::ContactNumber => "Dropoff contact number",
            Self::LoadDescription => "Load description",
            Self::Vehicle => "Vehicle type",
        }
    }

    fn next(self) -> Self {
        let index = Self::ALL.iter().position(|field| *field == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|field| *field == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Trip creation form state machine.
///
/// The in-flight draft doubles as the submitting flag and as the payload
/// for the announcement once the server acknowledges.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pickup_location: String,
    dropoff_location: String,
    pickup_time: String,
    dropoff_contact_number: String,
    load_description: String,
    /// Index into [`VehicleType::ALL`].
    vehicle: usize,
    focus: CreateField,
    in_flight: Option<NewTrip>,
    feedback: Option<Feedback>,
    field_errors: FieldErrors,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateForm {
    /// Empty form focused on the first field.
    pub fn new() -> Self {
        Self {
            pickup_location: String::new(),
            dropoff_location: String::new(),
            pickup_time: String::new(),
            dropoff_contact_number: String::new(),
            load_description: String::new(),
            vehicle: 0,
            focus: CreateField::PickupLocation,
            in_flight: None,
            feedback: None,
            field_errors: FieldErrors::new(),
        }
    }

    /// Move focus to the next field.
    pub fn focus_next(&mut self) -> Vec<AppAction> {
        self.focus = self.focus.next();
        vec![AppAction::Render]
    }

    /// Move focus to the previous field.
    pub fn focus_prev(&mut self) -> Vec<AppAction> {
        self.focus = self.focus.prev();
        vec![AppAction::Render]
    }

    /// Append a character to the focused field. Ignored on the vehicle
    /// selector.
    pub fn input_char(&mut self, c: char) -> Vec<AppAction> {
        let focus = self.focus;
        if let Some(buffer) = self.buffer_mut(focus) {
            buffer.push(c);
        }
        vec![AppAction::Render]
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) -> Vec<AppAction> {
        let focus = self.focus;
        if let Some(buffer) = self.buffer_mut(focus) {
            buffer.pop();
        }
        vec![AppAction::Render]
    }

    /// Cycle the vehicle selector forward. Only acts while it has focus.
    pub fn vehicle_next(&mut self) -> Vec<AppAction> {
        if self.focus == CreateField::Vehicle {
            self.vehicle = (self.vehicle + 1) % VehicleType::ALL.len();
        }
        vec![AppAction::Render]
    }

    /// Cycle the vehicle selector backward. Only acts while it has focus.
    pub fn vehicle_prev(&mut self) -> Vec<AppAction> {
        if self.focus == CreateField::Vehicle {
            let len = VehicleType::ALL.len();
            self.vehicle = (self.vehicle + len - 1) % len;
        }
        vec![AppAction::Render]
    }

    /// Submit the form.
    ///
    /// Required-field validation only; a validation miss produces per-field
    /// errors and no request. A valid form emits exactly one create action
    /// carrying exactly the entered values.
    pub fn submit(&mut self) -> Vec<AppAction> {
        if self.in_flight.is_some() {
            return vec![];
        }

        let mut errors = FieldErrors::new();
        for field in [
            CreateField::PickupLocation,
            CreateField::DropoffLocation,
            CreateField::PickupTime,
            CreateField::ContactNumber,
            CreateField::LoadDescription,
        ] {
            if self.value(field).trim().is_empty() {
                errors.insert(field.key().to_string(), vec![REQUIRED_MSG.to_string()]);
            }
        }

        let pickup_time = match parse_pickup_time(&self.pickup_time) {
            Ok(time) => Some(time),
            Err(_) => {
                if !self.pickup_time.trim().is_empty() {
                    errors.insert(
                        CreateField::PickupTime.key().to_string(),
                        vec![BAD_TIME_MSG.to_string()],
                    );
                }
                None
            },
        };

        if !errors.is_empty() {
            self.field_errors = errors;
            return vec![AppAction::Render];
        }
        let Some(pickup_time) = pickup_time else {
            return vec![AppAction::Render];
        };

        let draft = NewTrip {
            pickup_location: self.pickup_location.clone(),
            dropoff_location: self.dropoff_location.clone(),
            pickup_time,
            dropoff_contact_number: self.dropoff_contact_number.clone(),
            load_description: self.load_description.clone(),
            vehicle_type: self.vehicle_type(),
        };

        self.in_flight = Some(draft.clone());
        self.field_errors.clear();
        self.feedback = None;
        vec![AppAction::SubmitCreate { draft }, AppAction::Render]
    }

    /// The server acknowledged the creation. Every field resets and the
    /// submitted draft goes out as a best-effort announcement.
    pub fn on_created(&mut self) -> Vec<AppAction> {
        let Some(draft) = self.in_flight.take() else {
            return vec![AppAction::Render];
        };
        self.reset_fields();
        self.feedback = Some(Feedback::success("Trip created successfully!"));
        vec![AppAction::Announce { draft }, AppAction::Render]
    }

    /// Creation failed. Entered values stay intact.
    pub fn on_create_failed(&mut self, field_errors: FieldErrors) -> Vec<AppAction> {
        self.in_flight = None;
        self.field_errors = field_errors;
        self.feedback = Some(Feedback::error("Failed to create trip. Please try again."));
        vec![AppAction::Render]
    }

    fn reset_fields(&mut self) {
        self.pickup_location.clear();
        self.dropoff_location.clear();
        self.pickup_time.clear();
        self.dropoff_contact_number.clear();
        self.load_description.clear();
        self.vehicle = 0;
        self.focus = CreateField::PickupLocation;
        self.field_errors.clear();
    }

    fn buffer_mut(&mut self, field: CreateField) -> Option<&mut String> {
        match field {
            CreateField::PickupLocation => Some(&mut self.pickup_location),
            CreateField::DropoffLocation => Some(&mut self.dropoff_location),
            CreateField::PickupTime => Some(&mut self.pickup_time),
            CreateField::ContactNumber => Some(&mut self.dropoff_contact_number),
            CreateField::LoadDescription => Some(&mut self.load_description),
            CreateField::Vehicle => None,
        }
    }

    /// Field with input focus.
    pub fn focus(&self) -> CreateField {
        self.focus
    }

    /// Rendered value of a field. The vehicle selector shows its label.
    pub fn value(&self, field: CreateField) -> &str {
        match field {
            CreateField::PickupLocation => &self.pickup_location,
            CreateField::DropoffLocation => &self.dropoff_location,
            CreateField::PickupTime => &self.pickup_time,
            CreateField::ContactNumber => &self.dropoff_contact_number,
            CreateField::LoadDescription => &self.load_description,
            CreateField::Vehicle => self.vehicle_type().label(),
        }
    }

    /// Currently selected vehicle class.
    pub fn vehicle_type(&self) -> VehicleType {
        VehicleType::ALL[self.vehicle % VehicleType::ALL.len()]
    }

    /// Whether a creation is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current feedback banner.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Validation errors for one field.
    pub fn errors_for(&self, field: CreateField) -> &[String] {
        self.field_errors.get(field.key()).map_or(&[], Vec::as_slice)
    }

    /// All current field errors.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }
}
