//! Account and profile data model.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::fields;
use crate::domain::form::{FieldValue, FormRecord};

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier is not a canonical UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserIdError> {
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Which side of the marketplace an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Woman founder seeking investment.
    Entrepreneur,
    /// Investor browsing projects.
    Investor,
}

impl Role {
    /// Lower-case name used in logs and labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entrepreneur => "entrepreneur",
            Self::Investor => "investor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed-in account as returned by the authentication handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Account identifier.
    pub id: UserId,
    /// Login email.
    pub email: String,
    /// Name shown in the navigation bar.
    pub display_name: String,
    /// Marketplace side.
    pub role: Role,
}

/// Investment ticket range, kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSize {
    /// Lower bound.
    pub min: String,
    /// Upper bound.
    pub max: String,
}

impl TicketSize {
    fn to_field_value(&self) -> FieldValue {
        let values: BTreeMap<String, FieldValue> = [
            ("min".to_owned(), FieldValue::from(self.min.as_str())),
            ("max".to_owned(), FieldValue::from(self.max.as_str())),
        ]
        .into_iter()
        .collect();
        FieldValue::Record(values)
    }

    fn from_field_value(value: &FieldValue) -> Self {
        let bound = |key: &str| {
            value
                .as_record()
                .and_then(|values| values.get(key))
                .and_then(FieldValue::as_text)
                .unwrap_or_default()
                .to_owned()
        };
        Self {
            min: bound("min"),
            max: bound("max"),
        }
    }
}

/// Full editable profile backing the settings screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    pub id: UserId,
    /// Marketplace side.
    pub role: Role,
    /// Login email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Phone number.
    pub phone: String,
    /// Short biography.
    pub bio: String,
    /// Country selection.
    pub country: String,
    /// City of residence.
    pub city: String,
    /// Shared-drive link to the profile picture.
    pub profile_image: String,
    /// Venture or firm name.
    pub company_name: String,
    /// Business sector.
    pub industry: String,
    /// Business maturity stage.
    pub business_stage: String,
    /// Company website.
    pub website: String,
    /// Business description.
    pub description: String,
    /// Investor contact details.
    pub contact_info: String,
    /// Sectors an investor funds.
    pub investment_focus: Vec<String>,
    /// Ticket size range.
    pub ticket_size: TicketSize,
    /// Two-factor authentication toggle.
    pub two_factor_enabled: bool,
    /// Email notification toggle.
    pub email_notifications: bool,
    /// Push notification toggle.
    pub push_notifications: bool,
    /// Weekly digest toggle.
    pub weekly_digest: bool,
    /// Who may see the profile.
    pub profile_visibility: String,
    /// Whether the email is shown on the profile.
    pub show_email: bool,
}

impl UserProfile {
    /// Empty profile for a freshly registered account.
    #[must_use]
    pub fn for_account(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            role: account.role,
            email: account.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            bio: String::new(),
            country: String::new(),
            city: String::new(),
            profile_image: String::new(),
            company_name: String::new(),
            industry: String::new(),
            business_stage: String::new(),
            website: String::new(),
            description: String::new(),
            contact_info: String::new(),
            investment_focus: Vec::new(),
            ticket_size: TicketSize::default(),
            two_factor_enabled: false,
            email_notifications: true,
            push_notifications: true,
            weekly_digest: false,
            profile_visibility: "public".to_owned(),
            show_email: false,
        }
    }

    /// Account view of the profile.
    #[must_use]
    pub fn account(&self) -> Account {
        let display_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned();
        Account {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: if display_name.is_empty() {
                self.company_name.clone()
            } else {
                display_name
            },
            role: self.role,
        }
    }

    /// Field values used to pre-seed the settings form.
    #[must_use]
    pub fn form_seed(&self) -> Vec<(&'static str, FieldValue)> {
        let text = |value: &String| FieldValue::from(value.as_str());
        vec![
            (fields::FIRST_NAME.name(), text(&self.first_name)),
            (fields::LAST_NAME.name(), text(&self.last_name)),
            (fields::EMAIL.name(), text(&self.email)),
            (fields::PHONE.name(), text(&self.phone)),
            (fields::BIO.name(), text(&self.bio)),
            (fields::COUNTRY.name(), text(&self.country)),
            (fields::CITY.name(), text(&self.city)),
            (fields::PROFILE_IMAGE.name(), text(&self.profile_image)),
            (fields::COMPANY_NAME.name(), text(&self.company_name)),
            (fields::INDUSTRY.name(), text(&self.industry)),
            (fields::BUSINESS_STAGE.name(), text(&self.business_stage)),
            (fields::WEBSITE.name(), text(&self.website)),
            (fields::DESCRIPTION.name(), text(&self.description)),
            (fields::CONTACT_INFO.name(), text(&self.contact_info)),
            (
                fields::INVESTMENT_FOCUS.name(),
                FieldValue::List(self.investment_focus.clone()),
            ),
            (fields::TICKET_SIZE.name(), self.ticket_size.to_field_value()),
            (
                fields::TWO_FACTOR_ENABLED.name(),
                FieldValue::Flag(self.two_factor_enabled),
            ),
            (
                fields::EMAIL_NOTIFICATIONS.name(),
                FieldValue::Flag(self.email_notifications),
            ),
            (
                fields::PUSH_NOTIFICATIONS.name(),
                FieldValue::Flag(self.push_notifications),
            ),
            (fields::WEEKLY_DIGEST.name(), FieldValue::Flag(self.weekly_digest)),
            (
                fields::PROFILE_VISIBILITY.name(),
                text(&self.profile_visibility),
            ),
            (fields::SHOW_EMAIL.name(), FieldValue::Flag(self.show_email)),
        ]
    }

    /// Merge the values of a projected settings record into the profile.
    ///
    /// Password fields are not part of the profile and are ignored here.
    pub fn apply(&mut self, values: &FormRecord) {
        for (name, value) in values.iter() {
            let text = || value.as_text().unwrap_or_default().to_owned();
            let flag = || value.as_flag().unwrap_or_default();
            match name {
                "firstName" => self.first_name = text(),
                "lastName" => self.last_name = text(),
                "email" => self.email = text(),
                "phone" => self.phone = text(),
                "bio" => self.bio = text(),
                "country" => self.country = text(),
                "city" => self.city = text(),
                "profileImage" => self.profile_image = text(),
                "companyName" => self.company_name = text(),
                "industry" => self.industry = text(),
                "businessStage" => self.business_stage = text(),
                "website" => self.website = text(),
                "description" => self.description = text(),
                "contactInfo" => self.contact_info = text(),
                "investmentFocus" => {
                    self.investment_focus = value.as_list().unwrap_or_default().to_vec();
                }
                "ticketSize" => self.ticket_size = TicketSize::from_field_value(value),
                "twoFactorEnabled" => self.two_factor_enabled = flag(),
                "emailNotifications" => self.email_notifications = flag(),
                "pushNotifications" => self.push_notifications = flag(),
                "weeklyDigest" => self.weekly_digest = flag(),
                "profileVisibility" => self.profile_visibility = text(),
                "showEmail" => self.show_email = flag(),
                _ => {}
            }
        }
    }
}
