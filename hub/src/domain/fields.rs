//! Field catalogue shared by the authentication and settings forms.
//!
//! Names match the keys the hub's screens exchange, so a JSON object of
//! field values can be replayed into a form unchanged.

use crate::domain::form::Field;

/// Account email address.
pub const EMAIL: Field = Field::text("email", "Email");
/// Account password.
pub const PASSWORD: Field = Field::text("password", "Password");
/// Given name.
pub const FIRST_NAME: Field = Field::text("firstName", "First name");
/// Family name.
pub const LAST_NAME: Field = Field::text("lastName", "Last name");
/// Self-declared gender.
pub const GENDER: Field = Field::text("gender", "Gender");
/// Country selection.
pub const COUNTRY: Field = Field::text("country", "Country");
/// City of residence.
pub const CITY: Field = Field::text("city", "City");
/// Shared-drive link to a profile picture.
pub const PROFILE_IMAGE: Field = Field::text("profileImage", "Profile image");
/// Investor firm or entrepreneur venture name.
pub const COMPANY_NAME: Field = Field::text("companyName", "Company name");
/// Investor contact details.
pub const CONTACT_INFO: Field = Field::text("contactInfo", "Contact information");
/// Phone number.
pub const PHONE: Field = Field::text("phone", "Phone");
/// Short biography.
pub const BIO: Field = Field::text("bio", "Bio");
/// Business sector.
pub const INDUSTRY: Field = Field::text("industry", "Industry");
/// Business maturity stage.
pub const BUSINESS_STAGE: Field = Field::text("businessStage", "Business stage");
/// Company website.
pub const WEBSITE: Field = Field::text("website", "Website");
/// Business description.
pub const DESCRIPTION: Field = Field::text("description", "Description");
/// Sectors an investor funds.
pub const INVESTMENT_FOCUS: Field = Field::list("investmentFocus", "Investment focus");
/// Ticket size range with `min` and `max` entries.
pub const TICKET_SIZE: Field = Field::record("ticketSize", "Ticket size");
/// Password being replaced.
pub const CURRENT_PASSWORD: Field = Field::text("currentPassword", "Current password");
/// Replacement password.
pub const NEW_PASSWORD: Field = Field::text("newPassword", "New password");
/// Replacement password, typed again.
pub const CONFIRM_PASSWORD: Field = Field::text("confirmPassword", "Password confirmation");
/// Two-factor authentication toggle.
pub const TWO_FACTOR_ENABLED: Field = Field::flag("twoFactorEnabled", "Two-factor authentication");
/// Email notification toggle.
pub const EMAIL_NOTIFICATIONS: Field = Field::flag("emailNotifications", "Email notifications");
/// Push notification toggle.
pub const PUSH_NOTIFICATIONS: Field = Field::flag("pushNotifications", "Push notifications");
/// Weekly digest toggle.
pub const WEEKLY_DIGEST: Field = Field::flag("weeklyDigest", "Weekly digest");
/// Who may see the profile.
pub const PROFILE_VISIBILITY: Field = Field::text("profileVisibility", "Profile visibility");
/// Whether the email address is shown on the profile.
pub const SHOW_EMAIL: Field = Field::flag("showEmail", "Show email");
