//! Reminder text for renters.
//!
//! [`ReminderComposer`] produces three kinds of text from a
//! [`ReminderRequest`]:
//!
//! - a prompt for the external generator
//! - a deterministic fallback used whenever generation fails
//! - the organization-signed notice used by the template strategy
//!
//! [`ReminderComposer::resolve`] folds a generation outcome into a
//! [`Reminder`]; it never fails.

use super::generator::GenerationError;
use crate::domain::RentalItem;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::str::FromStr;

/// Default cap on generated text, in characters.
pub const DEFAULT_MAX_CHARS: usize = 150;

/// Signature used when no organization is configured.
pub const DEFAULT_ORGANIZATION: &str = "the rental desk";

/// Language of reminder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Ko,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "ko" | "korean" => Ok(Self::Ko),
            other => Err(format!("unknown language '{other}', expected 'en' or 'ko'")),
        }
    }
}

/// How the admin "notify" action produces its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderStrategy {
    /// Static organization-signed notice. No network.
    #[default]
    Template,
    /// Ask the generator, fall back to the local template on failure.
    Generated,
}

impl FromStr for ReminderStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(Self::Template),
            "generated" => Ok(Self::Generated),
            other => Err(format!("unknown reminder strategy '{other}', expected 'template' or 'generated'")),
        }
    }
}

/// The four inputs every reminder is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub renter_name: String,
    pub item_name: String,
    pub expected_return_date: DateTime<Utc>,
    pub is_overdue: bool,
}

impl ReminderRequest {
    /// Builds a request for a rented item. `None` if the item is available.
    #[must_use]
    pub fn from_item(item: &RentalItem, now: DateTime<Utc>) -> Option<Self> {
        item.renter().map(|renter| Self {
            renter_name: renter.name.clone(),
            item_name: item.name.clone(),
            expected_return_date: renter.expected_return_date,
            is_overdue: item.is_overdue(now),
        })
    }
}

/// A composed reminder. Every variant carries displayable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reminder {
    /// Text returned by the generation endpoint.
    Generated(String),
    /// Local template used after a failed or skipped generation.
    Fallback(String),
    /// Organization-signed notice of the template strategy.
    Notice(String),
}

impl Reminder {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) | Self::Fallback(text) | Self::Notice(text) => text,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Locale-aware reminder text builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderComposer {
    pub locale: Locale,
    /// Offset used when printing dates.
    pub offset: FixedOffset,
    /// Signature of the static notice.
    pub organization: String,
    pub max_chars: usize,
}

impl Default for ReminderComposer {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            offset: Utc.fix(),
            organization: DEFAULT_ORGANIZATION.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl ReminderComposer {
    #[must_use]
    pub fn new(locale: Locale, offset: FixedOffset, organization: impl Into<String>) -> Self {
        Self {
            locale,
            offset,
            organization: organization.into(),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Formats a date in the configured offset: `2026-10-22` or `2026. 10. 22.`.
    #[must_use]
    pub fn format_date(&self, date: DateTime<Utc>) -> String {
        let local = date.with_timezone(&self.offset);
        match self.locale {
            Locale::En => local.format("%Y-%m-%d").to_string(),
            Locale::Ko => local.format("%Y. %-m. %-d.").to_string(),
        }
    }

    /// Natural-language instruction for the generator.
    #[must_use]
    pub fn prompt(&self, request: &ReminderRequest, today: DateTime<Utc>) -> String {
        let due = self.format_date(request.expected_return_date);
        let today = self.format_date(today);
        let max = self.max_chars;

        match self.locale {
            Locale::En => {
                let mut prompt = format!(
                    "Renter name: {}, rented item: \"{}\", expected return date: {due}, today's date: {today}. \
                     Using this information, write a short, polite and professional reminder message \
                     (English, at most {max} characters including spaces) to send to the renter.",
                    request.renter_name, request.item_name
                );
                if request.is_overdue {
                    prompt.push_str(
                        " The return date has passed (overdue). Firmly but politely ask for the item to be returned immediately.",
                    );
                } else {
                    prompt.push_str(" Write it as a friendly reminder that the return date is approaching.");
                }
                prompt
            }
            Locale::Ko => {
                let mut prompt = format!(
                    "대여자 이름: {}, 대여 물품: \"{}\", 반납 예정일: {due}, 오늘 날짜: {today}. \
                     이 정보를 바탕으로 대여자에게 보낼 정중하고 전문적인 짧은 알림 메시지(한국어, 공백 포함 {max}자 이내)를 작성해주세요.",
                    request.renter_name, request.item_name
                );
                if request.is_overdue {
                    prompt.push_str(" 현재 반납 기한이 지났습니다(연체). 즉시 반납해달라는 내용을 단호하지만 정중하게 포함해주세요.");
                } else {
                    prompt.push_str(" 반납일이 다가오고 있음을 친절하게 알려주는 리마인더 메시지로 작성해주세요.");
                }
                prompt
            }
        }
    }

    /// Deterministic local reminder.
    #[must_use]
    pub fn fallback(&self, request: &ReminderRequest) -> String {
        let due = self.format_date(request.expected_return_date);
        match self.locale {
            Locale::En => format!(
                "{}, the return date for your rented {} is {due}. Please return it.",
                request.renter_name, request.item_name
            ),
            Locale::Ko => format!(
                "{}님, 대여하신 {}의 반납일은 {due}입니다. 반납 부탁드립니다.",
                request.renter_name, request.item_name
            ),
        }
    }

    /// Static notice signed by the organization.
    ///
    /// The text of [`ReminderComposer::notice_reminder`].
    #[must_use]
    pub fn notice(&self, request: &ReminderRequest) -> String {
        let due = self.format_date(request.expected_return_date);
        let org = &self.organization;
        let renter = &request.renter_name;
        let item = &request.item_name;

        match (self.locale, request.is_overdue) {
            (Locale::En, true) => format!(
                "Hello {renter}, this is {org}. Your rented item '{item}' was due on {due} and is now overdue. \
                 Please return it and contact the desk afterwards. Thank you."
            ),
            (Locale::En, false) => format!(
                "Hello {renter}, this is {org}. A reminder that your rented item '{item}' is due back on {due}. Thank you."
            ),
            (Locale::Ko, true) => format!(
                "안녕하세요! {renter}님. {org}입니다. 물품대여사업 반납 연체 물품('{item}')이 있어 안내드립니다. \
                 반납 후 담당자에게 연락 부탁드립니다. 감사합니다."
            ),
            (Locale::Ko, false) => format!(
                "안녕하세요! {renter}님. {org}입니다. 대여하신 물품('{item}')의 반납일은 {due}입니다. 감사합니다."
            ),
        }
    }

    /// The template-strategy reminder, tagged [`Reminder::Notice`].
    #[must_use]
    pub fn notice_reminder(&self, request: &ReminderRequest) -> Reminder {
        Reminder::Notice(self.notice(request))
    }

    /// Turns a generation outcome into a reminder, substituting the fallback
    /// on any failure.
    #[must_use]
    pub fn resolve(&self, request: &ReminderRequest, outcome: Result<String, GenerationError>) -> Reminder {
        match outcome {
            Ok(text) if !text.trim().is_empty() => Reminder::Generated(text.trim().to_string()),
            Ok(_) => {
                tracing::debug!("generated reminder was blank, using fallback");
                Reminder::Fallback(self.fallback(request))
            }
            Err(err) => {
                tracing::debug!(error = %err, "reminder generation failed, using fallback");
                Reminder::Fallback(self.fallback(request))
            }
        }
    }
}
