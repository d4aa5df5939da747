//! Profile-settings form: one tab per settings section.

use serde::Serialize;

use crate::domain::fields::{
    BIO, BUSINESS_STAGE, CITY, COMPANY_NAME, CONFIRM_PASSWORD, CONTACT_INFO, COUNTRY,
    CURRENT_PASSWORD, DESCRIPTION, EMAIL, EMAIL_NOTIFICATIONS, FIRST_NAME, INDUSTRY,
    INVESTMENT_FOCUS, LAST_NAME, NEW_PASSWORD, PHONE, PROFILE_IMAGE, PROFILE_VISIBILITY,
    PUSH_NOTIFICATIONS, SHOW_EMAIL, TICKET_SIZE, TWO_FACTOR_ENABLED, WEBSITE, WEEKLY_DIGEST,
};
use crate::domain::form::{Field, FieldRule, FormMode, FormRecord, PASSWORD_MIN, Rule};

/// Values accepted for `profileVisibility`.
pub const PROFILE_VISIBILITIES: &[&str] = &["public", "investors", "private"];

const PROFILE_FIELDS: &[Field] = &[
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    PHONE,
    BIO,
    COUNTRY,
    CITY,
    PROFILE_IMAGE,
];
const BUSINESS_FIELDS: &[Field] = &[COMPANY_NAME, INDUSTRY, BUSINESS_STAGE, WEBSITE, DESCRIPTION];
const INVESTMENT_FIELDS: &[Field] = &[CONTACT_INFO, INVESTMENT_FOCUS, TICKET_SIZE];
const SECURITY_FIELDS: &[Field] = &[
    CURRENT_PASSWORD,
    NEW_PASSWORD,
    CONFIRM_PASSWORD,
    TWO_FACTOR_ENABLED,
];
const NOTIFICATION_FIELDS: &[Field] = &[EMAIL_NOTIFICATIONS, PUSH_NOTIFICATIONS, WEEKLY_DIGEST];
const PRIVACY_FIELDS: &[Field] = &[PROFILE_VISIBILITY, SHOW_EMAIL];

const PROFILE_RULES: &[FieldRule] = &[
    FieldRule::new(FIRST_NAME, &[Rule::Required]),
    FieldRule::new(LAST_NAME, &[Rule::Required]),
    FieldRule::new(EMAIL, &[Rule::Required, Rule::Email]),
    FieldRule::new(COUNTRY, &[Rule::Selected]),
    FieldRule::new(CITY, &[Rule::Required]),
    FieldRule::new(PROFILE_IMAGE, &[Rule::SharedImageLink]),
];
const BUSINESS_RULES: &[FieldRule] = &[FieldRule::new(COMPANY_NAME, &[Rule::Required])];
const INVESTMENT_RULES: &[FieldRule] = &[FieldRule::new(CONTACT_INFO, &[Rule::Required])];
const SECURITY_RULES: &[FieldRule] = &[
    FieldRule::new(CURRENT_PASSWORD, &[Rule::NonEmpty]),
    FieldRule::new(
        NEW_PASSWORD,
        &[Rule::NonEmpty, Rule::MinLength(PASSWORD_MIN)],
    ),
    FieldRule::new(CONFIRM_PASSWORD, &[Rule::SameAs(NEW_PASSWORD)]),
];
const PRIVACY_RULES: &[FieldRule] = &[FieldRule::new(
    PROFILE_VISIBILITY,
    &[Rule::OneOf(PROFILE_VISIBILITIES)],
)];

const SECURITY_TRANSIENT: &[Field] = &[CURRENT_PASSWORD, NEW_PASSWORD, CONFIRM_PASSWORD];

/// Discriminator of the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsTab {
    /// Personal details.
    Profile,
    /// Venture details.
    Business,
    /// Investment preferences.
    Investment,
    /// Password and two-factor settings.
    Security,
    /// Notification toggles.
    Notifications,
    /// Visibility settings.
    Privacy,
}

/// Update sent to the settings handler: the tab and its projected values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsPatch {
    /// Tab the values belong to.
    pub tab: SettingsTab,
    /// Values of that tab's fields only.
    pub fields: FormRecord,
}

impl FormMode for SettingsTab {
    type Payload = SettingsPatch;

    const ALL: &'static [Self] = &[
        Self::Profile,
        Self::Business,
        Self::Investment,
        Self::Security,
        Self::Notifications,
        Self::Privacy,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Business => "business",
            Self::Investment => "investment",
            Self::Security => "security",
            Self::Notifications => "notifications",
            Self::Privacy => "privacy",
        }
    }

    fn fields(self) -> &'static [Field] {
        match self {
            Self::Profile => PROFILE_FIELDS,
            Self::Business => BUSINESS_FIELDS,
            Self::Investment => INVESTMENT_FIELDS,
            Self::Security => SECURITY_FIELDS,
            Self::Notifications => NOTIFICATION_FIELDS,
            Self::Privacy => PRIVACY_FIELDS,
        }
    }

    fn ruleset(self) -> &'static [FieldRule] {
        match self {
            Self::Profile => PROFILE_RULES,
            Self::Business => BUSINESS_RULES,
            Self::Investment => INVESTMENT_RULES,
            Self::Security => SECURITY_RULES,
            Self::Notifications => &[],
            Self::Privacy => PRIVACY_RULES,
        }
    }

    fn transient_fields(self) -> &'static [Field] {
        match self {
            Self::Security => SECURITY_TRANSIENT,
            _ => &[],
        }
    }

    fn payload(self, projected: &FormRecord) -> SettingsPatch {
        SettingsPatch {
            tab: self,
            fields: projected.clone(),
        }
    }
}
