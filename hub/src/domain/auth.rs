//! Authentication form: login and role-specific registration.
//!
//! Each mode carries only its own fields, and the payload built for the
//! handler is a per-mode type, so an investor registration has no slot for
//! entrepreneur-only fields.

use field_rules::SharedImageLink;
use zeroize::Zeroizing;

use crate::domain::account::Role;
use crate::domain::fields::{
    CITY, COMPANY_NAME, CONTACT_INFO, COUNTRY, EMAIL, FIRST_NAME, GENDER, LAST_NAME, PASSWORD,
    PROFILE_IMAGE,
};
use crate::domain::form::{Field, FieldRule, FormMode, FormRecord, PASSWORD_MIN, Rule};

/// Only value accepted for `gender` on entrepreneur registration.
pub const ENTREPRENEUR_GENDER: &str = "female";

const LOGIN_FIELDS: &[Field] = &[EMAIL, PASSWORD];

const ENTREPRENEUR_FIELDS: &[Field] = &[
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    PASSWORD,
    GENDER,
    COUNTRY,
    CITY,
    PROFILE_IMAGE,
];

const INVESTOR_FIELDS: &[Field] = &[
    COMPANY_NAME,
    CONTACT_INFO,
    EMAIL,
    PASSWORD,
    GENDER,
    COUNTRY,
    CITY,
    PROFILE_IMAGE,
];

const EMAIL_RULE: FieldRule = FieldRule::new(EMAIL, &[Rule::Required, Rule::Email]);
const PASSWORD_RULE: FieldRule =
    FieldRule::new(PASSWORD, &[Rule::NonEmpty, Rule::MinLength(PASSWORD_MIN)]);

const LOGIN_RULES: &[FieldRule] = &[EMAIL_RULE, PASSWORD_RULE];

const ENTREPRENEUR_RULES: &[FieldRule] = &[
    EMAIL_RULE,
    PASSWORD_RULE,
    FieldRule::new(FIRST_NAME, &[Rule::Required]),
    FieldRule::new(LAST_NAME, &[Rule::Required]),
    FieldRule::new(GENDER, &[Rule::Exactly(ENTREPRENEUR_GENDER)]),
    FieldRule::new(COUNTRY, &[Rule::Selected]),
    FieldRule::new(CITY, &[Rule::Required]),
    FieldRule::new(PROFILE_IMAGE, &[Rule::SharedImageLink]),
];

// Investors declare a gender but it is not checked.
const INVESTOR_RULES: &[FieldRule] = &[
    EMAIL_RULE,
    PASSWORD_RULE,
    FieldRule::new(COMPANY_NAME, &[Rule::Required]),
    FieldRule::new(CONTACT_INFO, &[Rule::Required]),
    FieldRule::new(COUNTRY, &[Rule::Selected]),
    FieldRule::new(CITY, &[Rule::Required]),
    FieldRule::new(PROFILE_IMAGE, &[Rule::SharedImageLink]),
];

const TRANSIENT_FIELDS: &[Field] = &[PASSWORD];

/// Discriminator of the authentication form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    /// Sign in with email and password.
    Login,
    /// Create an account for the given role.
    Register(Role),
}

/// Login payload.
///
/// ## Invariants
/// - `email` is trimmed.
/// - `password` keeps caller-provided whitespace and is zeroed on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from already validated inputs.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Details shared by both registration payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationBasics {
    /// Login credentials for the new account.
    pub credentials: LoginCredentials,
    /// Country selection.
    pub country: String,
    /// City, trimmed.
    pub city: String,
    /// Optional profile picture link.
    pub profile_image: Option<SharedImageLink>,
}

/// Entrepreneur registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrepreneurRegistration {
    /// Shared registration details.
    pub basics: RegistrationBasics,
    /// Given name, trimmed.
    pub first_name: String,
    /// Family name, trimmed.
    pub last_name: String,
}

/// Investor registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestorRegistration {
    /// Shared registration details.
    pub basics: RegistrationBasics,
    /// Firm name, trimmed.
    pub company_name: String,
    /// Contact details, trimmed.
    pub contact_info: String,
    /// Declared gender, passed through unchecked.
    pub gender: String,
}

/// Registration payload for either role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// New entrepreneur account.
    Entrepreneur(EntrepreneurRegistration),
    /// New investor account.
    Investor(InvestorRegistration),
}

impl Registration {
    /// Role of the account being created.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Entrepreneur(_) => Role::Entrepreneur,
            Self::Investor(_) => Role::Investor,
        }
    }

    /// Shared registration details.
    #[must_use]
    pub fn basics(&self) -> &RegistrationBasics {
        match self {
            Self::Entrepreneur(registration) => &registration.basics,
            Self::Investor(registration) => &registration.basics,
        }
    }

    /// Name shown for the new account.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Entrepreneur(registration) => {
                format!("{} {}", registration.first_name, registration.last_name)
            }
            Self::Investor(registration) => registration.company_name.clone(),
        }
    }
}

/// Payload handed to the authentication handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPayload {
    /// Sign in.
    Login(LoginCredentials),
    /// Create an account.
    Register(Registration),
}

fn trimmed(record: &FormRecord, field: Field) -> String {
    record.text(field).trim().to_owned()
}

fn basics(record: &FormRecord) -> RegistrationBasics {
    RegistrationBasics {
        credentials: LoginCredentials::new(record.text(EMAIL), record.text(PASSWORD)),
        country: record.text(COUNTRY).to_owned(),
        city: trimmed(record, CITY),
        profile_image: SharedImageLink::parse(record.text(PROFILE_IMAGE)).ok(),
    }
}

impl FormMode for AuthMode {
    type Payload = AuthPayload;

    const ALL: &'static [Self] = &[
        Self::Login,
        Self::Register(Role::Entrepreneur),
        Self::Register(Role::Investor),
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register(Role::Entrepreneur) => "register:entrepreneur",
            Self::Register(Role::Investor) => "register:investor",
        }
    }

    fn fields(self) -> &'static [Field] {
        match self {
            Self::Login => LOGIN_FIELDS,
            Self::Register(Role::Entrepreneur) => ENTREPRENEUR_FIELDS,
            Self::Register(Role::Investor) => INVESTOR_FIELDS,
        }
    }

    fn ruleset(self) -> &'static [FieldRule] {
        match self {
            Self::Login => LOGIN_RULES,
            Self::Register(Role::Entrepreneur) => ENTREPRENEUR_RULES,
            Self::Register(Role::Investor) => INVESTOR_RULES,
        }
    }

    fn transient_fields(self) -> &'static [Field] {
        TRANSIENT_FIELDS
    }

    fn payload(self, projected: &FormRecord) -> AuthPayload {
        match self {
            Self::Login => AuthPayload::Login(LoginCredentials::new(
                projected.text(EMAIL),
                projected.text(PASSWORD),
            )),
            Self::Register(Role::Entrepreneur) => {
                AuthPayload::Register(Registration::Entrepreneur(EntrepreneurRegistration {
                    basics: basics(projected),
                    first_name: trimmed(projected, FIRST_NAME),
                    last_name: trimmed(projected, LAST_NAME),
                }))
            }
            Self::Register(Role::Investor) => {
                AuthPayload::Register(Registration::Investor(InvestorRegistration {
                    basics: basics(projected),
                    company_name: trimmed(projected, COMPANY_NAME),
                    contact_info: trimmed(projected, CONTACT_INFO),
                    gender: projected.text(GENDER).to_owned(),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for auth mode projections and rulesets.
    use super::*;
    use crate::domain::form::FormController;
    use rstest::{fixture, rstest};

    fn fill(form: &mut FormController<AuthMode>, values: &[(&str, &str)]) {
        for (name, value) in values {
            form.set_field(name, *value).expect("known text field");
        }
    }

    #[fixture]
    fn entrepreneur_form() -> FormController<AuthMode> {
        let mut form = FormController::new(AuthMode::Register(Role::Entrepreneur));
        fill(
            &mut form,
            &[
                ("firstName", "Amina"),
                ("lastName", "Okafor"),
                ("email", "amina@example.com"),
                ("password", "s3cret!"),
                ("gender", "female"),
                ("country", "Nigeria"),
                ("city", "Lagos"),
            ],
        );
        form
    }

    #[rstest]
    fn entrepreneur_form_is_valid(entrepreneur_form: FormController<AuthMode>) {
        let outcome = entrepreneur_form.validate(AuthMode::Register(Role::Entrepreneur));
        assert!(outcome.is_valid(), "{:?}", outcome.errors());
    }

    #[rstest]
    fn entrepreneur_gender_must_be_female(mut entrepreneur_form: FormController<AuthMode>) {
        entrepreneur_form.set_field("gender", "male").expect("text");
        let outcome = entrepreneur_form.validate(AuthMode::Register(Role::Entrepreneur));
        assert_eq!(outcome.errors().fields().collect::<Vec<_>>(), vec!["gender"]);
    }

    #[rstest]
    fn investor_gender_is_not_checked() {
        let mut form = FormController::new(AuthMode::Register(Role::Investor));
        fill(
            &mut form,
            &[
                ("companyName", "Baobab Capital"),
                ("contactInfo", "+254 700 000000"),
                ("email", "fund@example.com"),
                ("password", "s3cret!"),
                ("gender", "male"),
                ("country", "Kenya"),
                ("city", "Nairobi"),
            ],
        );
        assert!(form.validate(AuthMode::Register(Role::Investor)).is_valid());
    }

    #[rstest]
    fn investor_extract_excludes_entrepreneur_fields(
        entrepreneur_form: FormController<AuthMode>,
    ) {
        let projected = entrepreneur_form.extract(AuthMode::Register(Role::Investor));
        assert!(!projected.contains("firstName"));
        assert!(!projected.contains("lastName"));
        assert!(projected.contains("companyName"));
    }

    #[rstest]
    fn login_extract_is_email_and_password(entrepreneur_form: FormController<AuthMode>) {
        let projected = entrepreneur_form.extract(AuthMode::Login);
        assert_eq!(
            projected.names().collect::<Vec<_>>(),
            vec!["email", "password"]
        );
    }

    #[rstest]
    fn whitespace_password_is_kept_verbatim() {
        let mut form = FormController::new(AuthMode::Login);
        fill(&mut form, &[("email", "amina@example.com"), ("password", "      ")]);

        let outcome = form.validate(AuthMode::Login);
        assert!(outcome.is_valid(), "{:?}", outcome.errors());
        let AuthPayload::Login(credentials) = AuthMode::Login.payload(&form.extract(AuthMode::Login))
        else {
            panic!("expected a login payload");
        };
        assert_eq!(credentials.password(), "      ");
    }

    #[rstest]
    fn registration_payload_trims_and_parses_link(
        mut entrepreneur_form: FormController<AuthMode>,
    ) {
        entrepreneur_form.set_field("city", "  Lagos  ").expect("text");
        entrepreneur_form
            .set_field("profileImage", "https://drive.google.com/file/d/abc/view")
            .expect("text");
        let mode = AuthMode::Register(Role::Entrepreneur);
        let payload = mode.payload(&entrepreneur_form.extract(mode));
        let registration = match payload {
            AuthPayload::Register(Registration::Entrepreneur(registration)) => registration,
            other => panic!("expected an entrepreneur registration, got {other:?}"),
        };
        assert_eq!(registration.basics.city, "Lagos");
        assert_eq!(
            registration
                .basics
                .profile_image
                .as_ref()
                .map(SharedImageLink::file_id),
            Some("abc")
        );
        assert_eq!(registration.basics.credentials.email(), "amina@example.com");
    }
}
