//! Regression coverage for the form controller's edit and submit paths.

use std::time::Duration;

use async_trait::async_trait;

use super::*;
use crate::domain::ports::{AuthService, MockAuthService};
use crate::domain::{Account, AuthMode, AuthPayload, LoginCredentials, Registration, Role, UserId};
use rstest::{fixture, rstest};

/// Authenticator whose calls never complete.
struct StalledAuthService;

#[async_trait]
impl AuthService for StalledAuthService {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<Account, Error> {
        std::future::pending().await
    }

    async fn register(&self, _registration: &Registration) -> Result<Account, Error> {
        std::future::pending().await
    }
}

fn account(email: &str) -> Account {
    Account {
        id: UserId::random(),
        email: email.to_owned(),
        display_name: "Grace".to_owned(),
        role: Role::Entrepreneur,
    }
}

fn fill(form: &mut FormController<AuthMode>, values: &[(&str, &str)]) {
    for (name, value) in values {
        form.set_field(name, *value).expect("known text field");
    }
}

#[fixture]
fn login_form() -> FormController<AuthMode> {
    let mut form = FormController::new(AuthMode::Login);
    fill(
        &mut form,
        &[("email", "grace@example.com"), ("password", "s3cret!")],
    );
    form
}

fn accepting_service(times: usize) -> MockAuthService {
    let mut service = MockAuthService::new();
    service
        .expect_login()
        .times(times)
        .returning(|credentials| Ok(account(credentials.email())));
    service
}

#[rstest]
fn set_field_rejects_unknown_names() {
    let mut form = FormController::new(AuthMode::Login);
    let err = form.set_field("nickname", "g").expect_err("unknown field");
    assert_eq!(
        err,
        FormError::UnknownField {
            name: "nickname".to_owned()
        }
    );
}

#[rstest]
fn set_field_rejects_wrong_kind() {
    let mut form = FormController::new(AuthMode::Login);
    let err = form.set_field("email", true).expect_err("flag into text field");
    assert!(matches!(err, FormError::KindMismatch { field: "email", .. }));
    assert_eq!(form.record().text(crate::domain::fields::EMAIL), "");
}

#[rstest]
#[tokio::test]
async fn editing_clears_only_that_fields_error() {
    let mut form = FormController::new(AuthMode::Login);
    fill(&mut form, &[("email", "bob@example"), ("password", "123")]);
    let service = accepting_service(0);

    let blocked = form.submit(&service).await.expect_err("invalid form");
    let SubmitBlocked::Invalid { errors } = blocked else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
    assert_eq!(
        errors.get("password"),
        Some("Password must be at least 6 characters")
    );

    form.set_field("email", "bob@example.com").expect("text");
    assert!(!form.errors().contains("email"));
    assert_eq!(
        form.errors().get("password"),
        Some("Password must be at least 6 characters")
    );
}

#[rstest]
#[case(1)]
#[case(3)]
#[tokio::test]
async fn invalid_submits_never_reach_the_handler(#[case] attempts: usize) {
    let mut form = FormController::new(AuthMode::Login);
    let service = accepting_service(0);
    for _ in 0..attempts {
        let blocked = form.submit(&service).await.expect_err("blank form");
        assert!(matches!(blocked, SubmitBlocked::Invalid { .. }));
    }
    assert_eq!(form.errors().len(), 2);
    assert!(!form.is_submitting());
}

#[rstest]
#[tokio::test]
async fn successful_submit_wipes_password_only(mut login_form: FormController<AuthMode>) {
    let service = accepting_service(1);
    let outcome = login_form.submit(&service).await.expect("valid form");

    let SubmitOutcome::Completed(signed_in) = outcome else {
        panic!("expected completion");
    };
    assert_eq!(signed_in.email, "grace@example.com");
    assert_eq!(login_form.record().text(crate::domain::fields::EMAIL), "grace@example.com");
    assert_eq!(login_form.record().text(crate::domain::fields::PASSWORD), "");
    assert!(login_form.errors().is_empty());
    assert!(login_form.banner().is_none());
}

#[rstest]
fn second_begin_submit_is_rejected_while_in_flight(mut login_form: FormController<AuthMode>) {
    let _pending = login_form.begin_submit().expect("first submission starts");
    assert!(login_form.is_submitting());
    assert_eq!(
        login_form.begin_submit().expect_err("second submission blocked"),
        SubmitBlocked::InFlight
    );
}

#[rstest]
#[tokio::test]
async fn edits_during_flight_do_not_reach_the_handler(mut login_form: FormController<AuthMode>) {
    let mut service = MockAuthService::new();
    service
        .expect_login()
        .withf(|credentials| credentials.email() == "grace@example.com")
        .times(1)
        .returning(|credentials| Ok(account(credentials.email())));

    let pending = login_form.begin_submit().expect("valid form");
    login_form
        .set_field("email", "someone-else@example.com")
        .expect("edits allowed while in flight");
    let result = pending.dispatch(&service).await;
    let outcome = login_form.finish(pending, result);

    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert_eq!(
        login_form.record().text(crate::domain::fields::EMAIL),
        "someone-else@example.com"
    );
}

#[rstest]
#[tokio::test]
async fn handler_failure_keeps_values_and_raises_banner(
    mut login_form: FormController<AuthMode>,
) {
    let mut service = MockAuthService::new();
    service
        .expect_login()
        .times(1)
        .returning(|_| Err(Error::unauthorized("Invalid email or password")));

    let outcome = login_form.submit(&service).await.expect("valid form");

    let SubmitOutcome::Failed(err) = outcome else {
        panic!("expected handler failure");
    };
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert!(err.trace_id().is_some(), "error built inside the trace scope");
    assert_eq!(login_form.record().text(crate::domain::fields::PASSWORD), "s3cret!");
    assert!(login_form.errors().is_empty());
    let banner = login_form.banner().expect("banner raised");
    assert_eq!(banner.message(), "Invalid email or password");
    assert!(login_form.can_resubmit());
    assert!(!login_form.is_submitting());
}

#[rstest]
#[tokio::test]
async fn resubmit_replays_the_failed_snapshot(mut login_form: FormController<AuthMode>) {
    let mut failing = MockAuthService::new();
    failing
        .expect_login()
        .returning(|_| Err(Error::service_unavailable("network unreachable")));
    login_form.submit(&failing).await.expect("valid form");

    login_form.set_field("email", "").expect("text");
    let mut recovering = MockAuthService::new();
    recovering
        .expect_login()
        .withf(|credentials| credentials.email() == "grace@example.com")
        .times(1)
        .returning(|credentials| Ok(account(credentials.email())));

    let outcome = login_form.resubmit(&recovering).await.expect("retry allowed");
    assert!(matches!(outcome, SubmitOutcome::Completed(_)));
    assert!(login_form.banner().is_none());
    assert_eq!(
        login_form.resubmit(&recovering).await.expect_err("nothing left"),
        SubmitBlocked::NothingToRetry
    );
}

#[rstest]
fn reset_abandons_outstanding_submission(mut login_form: FormController<AuthMode>) {
    let pending = login_form.begin_submit().expect("valid form");
    login_form.reset();

    let outcome = login_form.finish(pending, Ok(account("grace@example.com")));
    assert_eq!(outcome, SubmitOutcome::Abandoned);
    assert_eq!(login_form.record().text(crate::domain::fields::EMAIL), "");
    assert!(!login_form.is_submitting());
    assert!(login_form.banner().is_none());
}

#[rstest]
fn switching_modes_keeps_entered_values() {
    let mut form = FormController::new(AuthMode::Register(Role::Entrepreneur));
    fill(
        &mut form,
        &[("firstName", "Amina"), ("email", "amina@example.com")],
    );

    let previous = form.select_mode(AuthMode::Login);
    assert_eq!(previous, AuthMode::Register(Role::Entrepreneur));
    form.select_mode(AuthMode::Register(Role::Entrepreneur));

    assert_eq!(form.record().text(crate::domain::fields::FIRST_NAME), "Amina");
    assert_eq!(form.record().text(crate::domain::fields::EMAIL), "amina@example.com");
}

#[rstest]
fn validation_follows_the_active_mode() {
    let mut form = FormController::new(AuthMode::Register(Role::Investor));
    fill(
        &mut form,
        &[("email", "fund@example.com"), ("password", "s3cret!")],
    );

    let blocked = form.begin_submit().expect_err("investor fields missing");
    assert!(matches!(blocked, SubmitBlocked::Invalid { .. }));
    assert!(form.errors().contains("companyName"));

    form.select_mode(AuthMode::Login);
    let pending = form.begin_submit().expect("login fields valid");
    assert!(matches!(pending.payload(), AuthPayload::Login(_)));
    assert_eq!(pending.projected().len(), 2);
}

#[rstest]
fn dismissing_banner_keeps_retry(mut login_form: FormController<AuthMode>) {
    let pending = login_form.begin_submit().expect("valid form");
    let outcome: SubmitOutcome<Account> =
        login_form.finish(pending, Err(Error::conflict("already registered")));
    assert!(matches!(outcome, SubmitOutcome::Failed(_)));

    login_form.dismiss_banner();
    assert!(login_form.banner().is_none());
    assert!(login_form.can_resubmit());
}

#[rstest]
#[tokio::test]
async fn timed_out_submit_releases_the_form(mut login_form: FormController<AuthMode>) {
    let before = login_form.record().clone();

    let elapsed =
        tokio::time::timeout(Duration::from_millis(10), login_form.submit(&StalledAuthService))
            .await;

    assert!(elapsed.is_err(), "handler never answers");
    assert!(!login_form.is_submitting());
    assert_eq!(login_form.record(), &before);
    assert!(login_form.banner().is_none());
    let pending = login_form.begin_submit().expect("form accepts a new submission");
    assert_eq!(pending.mode(), AuthMode::Login);
}

#[rstest]
fn abandon_frees_the_slot_and_keeps_state(mut login_form: FormController<AuthMode>) {
    let before = login_form.record().clone();
    let pending = login_form.begin_submit().expect("valid form");

    login_form.abandon(pending);

    assert!(!login_form.is_submitting());
    assert_eq!(login_form.record(), &before);
    assert!(!login_form.can_resubmit());
    assert!(login_form.begin_submit().is_ok());
}

#[rstest]
fn abandoning_a_stale_submission_leaves_the_current_one(
    mut login_form: FormController<AuthMode>,
) {
    let stale = login_form.begin_submit().expect("valid form");
    login_form.reset();
    fill(
        &mut login_form,
        &[("email", "grace@example.com"), ("password", "s3cret!")],
    );
    let _current = login_form.begin_submit().expect("fresh submission");

    login_form.abandon(stale);

    assert!(login_form.is_submitting());
}

#[rstest]
fn switching_back_restores_that_modes_errors() {
    let investor = AuthMode::Register(Role::Investor);
    let mut form = FormController::new(investor);
    fill(
        &mut form,
        &[("email", "fund@example.com"), ("password", "s3cret!")],
    );
    let blocked = form.begin_submit().expect_err("investor fields missing");
    assert!(matches!(blocked, SubmitBlocked::Invalid { .. }));
    let errors_before = form.errors().clone();

    form.select_mode(AuthMode::Login);
    form.select_mode(investor);

    assert_eq!(form.errors(), &errors_before);
    assert!(form.errors().contains("companyName"));
    assert!(form.errors().contains("contactInfo"));
}
