//! Form buffers owned by the open modal.
//!
//! Forms only collect and pre-filter input. Validation happens in the domain
//! layer when the form is submitted to the catalog store.

use crate::domain::{ItemId, ItemMetadata, RentalItem, RentalPeriod, RentalRequest};
use crate::reminder::Reminder;

/// Access code prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub code: String,
    /// Inline message after a rejected attempt.
    pub error: Option<String>,
}

impl LoginForm {
    pub fn input_char(&mut self, c: char) {
        self.code.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.code.pop();
    }

    /// The code as drawn on screen.
    #[must_use]
    pub fn masked(&self) -> String {
        "*".repeat(self.code.chars().count())
    }
}

/// Field with focus in the rent form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentField {
    #[default]
    Name,
    Contact,
    PeriodAck,
    NoticeAck,
}

impl RentField {
    const ORDER: [Self; 4] = [Self::Name, Self::Contact, Self::PeriodAck, Self::NoticeAck];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|field| *field == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Rental request for one item.
///
/// Submission requires a name, a contact number and both acknowledgements:
/// the rental period and the return-notice policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentForm {
    pub item_id: ItemId,
    pub item_name: String,
    pub rental_days: i64,
    pub name: String,
    /// Digits only; other characters are dropped as they are typed.
    pub contact: String,
    pub period_acknowledged: bool,
    pub notice_acknowledged: bool,
    pub focus: RentField,
    pub error: Option<String>,
}

impl RentForm {
    #[must_use]
    pub fn new(item: &RentalItem, period: RentalPeriod) -> Self {
        Self {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            rental_days: period.as_days(),
            name: String::new(),
            contact: String::new(),
            period_acknowledged: false,
            notice_acknowledged: false,
            focus: RentField::Name,
            error: None,
        }
    }

    /// Types into the focused field. Space toggles an acknowledgement.
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            RentField::Name => self.name.push(c),
            RentField::Contact => {
                if c.is_ascii_digit() {
                    self.contact.push(c);
                }
            }
            RentField::PeriodAck => {
                if c == ' ' {
                    self.period_acknowledged = !self.period_acknowledged;
                }
            }
            RentField::NoticeAck => {
                if c == ' ' {
                    self.notice_acknowledged = !self.notice_acknowledged;
                }
            }
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.focus {
            RentField::Name => {
                self.name.pop();
            }
            RentField::Contact => {
                self.contact.pop();
            }
            RentField::PeriodAck | RentField::NoticeAck => {}
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// True once every field is filled and both boxes are ticked.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.contact.is_empty()
            && self.period_acknowledged
            && self.notice_acknowledged
    }

    #[must_use]
    pub fn request(&self) -> RentalRequest {
        RentalRequest::new(self.name.as_str(), self.contact.as_str())
    }
}

/// What an edit form saves into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Existing(ItemId),
    /// Registers a new item on save.
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Name,
    Category,
    Description,
}

impl EditField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Category,
            Self::Category => Self::Description,
            Self::Description => Self::Name,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Category => Self::Name,
            Self::Description => Self::Category,
        }
    }
}

/// Metadata editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub target: EditTarget,
    pub name: String,
    pub category: String,
    pub description: String,
    pub focus: EditField,
    pub error: Option<String>,
}

impl EditForm {
    /// Pre-filled with the item's current metadata.
    #[must_use]
    pub fn for_item(item: &RentalItem) -> Self {
        Self {
            target: EditTarget::Existing(item.id.clone()),
            name: item.name.clone(),
            category: item.category.clone(),
            description: item.description.clone(),
            focus: EditField::Name,
            error: None,
        }
    }

    /// Empty form that registers a new item.
    #[must_use]
    pub const fn new_item() -> Self {
        Self {
            target: EditTarget::New,
            name: String::new(),
            category: String::new(),
            description: String::new(),
            focus: EditField::Name,
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            EditField::Name => &mut self.name,
            EditField::Category => &mut self.category,
            EditField::Description => &mut self.description,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.focused_mut().push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    #[must_use]
    pub fn metadata(&self) -> ItemMetadata {
        ItemMetadata {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

/// Progress of a reminder shown in the reminder modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderStatus {
    /// A generation request is in flight.
    Composing,
    Ready(Reminder),
}

/// Content of the reminder modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderView {
    pub item_id: ItemId,
    pub item_name: String,
    pub renter_name: String,
    pub status: ReminderStatus,
}

impl ReminderView {
    /// Text available for copying, empty while composing.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.status {
            ReminderStatus::Composing => "",
            ReminderStatus::Ready(reminder) => reminder.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::available_item;

    #[test]
    fn rent_form_filters_contact_and_requires_acknowledgements() {
        let item = available_item("t1", "Tent", "Outdoor", "4-person");
        let mut form = RentForm::new(&item, RentalPeriod::default());

        for c in "Kim".chars() {
            form.input_char(c);
        }
        form.next_field();
        for c in "010-1111-2222".chars() {
            form.input_char(c);
        }
        assert_eq!(form.contact, "01011112222");
        assert!(!form.can_submit());

        form.next_field();
        form.input_char(' ');
        assert!(!form.can_submit());
        form.next_field();
        form.input_char(' ');
        assert!(form.can_submit());

        form.input_char(' ');
        assert!(!form.can_submit());
    }

    #[test]
    fn rent_fields_wrap() {
        assert_eq!(RentField::NoticeAck.next(), RentField::Name);
        assert_eq!(RentField::Name.prev(), RentField::NoticeAck);
    }

    #[test]
    fn edit_form_types_into_focused_field() {
        let mut form = EditForm::new_item();
        form.input_char('K');
        form.next_field();
        form.input_char('O');
        form.backspace();
        form.input_char('S');
        assert_eq!(form.metadata().name, "K");
        assert_eq!(form.metadata().category, "S");
        assert_eq!(form.target, EditTarget::New);
    }

    #[test]
    fn login_code_is_masked() {
        let mut form = LoginForm::default();
        for c in "2026".chars() {
            form.input_char(c);
        }
        assert_eq!(form.masked(), "****");
    }
}
