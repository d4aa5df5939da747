//! Settings tabs: seeding from a stored profile, per-tab payloads and the
//! security tab's password rotation.

use std::time::Duration;

use hub::domain::form::{FieldValue, FormController, SubmitBlocked, SubmitOutcome};
use hub::domain::ports::FixtureProfileSettingsService;
use hub::domain::{Account, ErrorCode, Role, SettingsPatch, SettingsTab, UserId, UserProfile};
use hub::test_support::RecordingHandler;
use rstest::{fixture, rstest};

const CURRENT_PASSWORD: &str = "old-pass";

#[fixture]
fn profile() -> UserProfile {
    let account = Account {
        id: UserId::random(),
        email: "ngozi@example.com".to_owned(),
        display_name: "Ngozi Eze".to_owned(),
        role: Role::Entrepreneur,
    };
    let mut profile = UserProfile::for_account(&account);
    profile.first_name = "Ngozi".to_owned();
    profile.last_name = "Eze".to_owned();
    profile.country = "Nigeria".to_owned();
    profile.city = "Enugu".to_owned();
    profile
}

fn seeded(profile: &UserProfile, tab: SettingsTab) -> FormController<SettingsTab> {
    FormController::seeded(tab, profile.form_seed()).expect("profile seeds the settings form")
}

#[rstest]
#[tokio::test]
async fn switching_tabs_submits_only_the_active_tab(profile: UserProfile) {
    let mut form = seeded(&profile, SettingsTab::Profile);
    form.set_field("bio", "Founder of a solar co-op").expect("text");
    form.select_mode(SettingsTab::Notifications);
    form.set_field("weeklyDigest", true).expect("flag");
    let handler: RecordingHandler<SettingsPatch, UserProfile> =
        RecordingHandler::new([Ok(profile.clone())]);

    form.submit(&handler).await.expect("notifications tab valid");

    let payloads = handler.payloads();
    let patch = payloads.first().expect("one call");
    assert_eq!(patch.tab, SettingsTab::Notifications);
    assert_eq!(
        patch.fields.names().collect::<Vec<_>>(),
        vec!["emailNotifications", "pushNotifications", "weeklyDigest"]
    );
    assert!(patch.fields.flag(hub::domain::fields::WEEKLY_DIGEST));

    form.select_mode(SettingsTab::Profile);
    assert_eq!(
        form.record().get("bio"),
        Some(&FieldValue::from("Founder of a solar co-op"))
    );
}

#[rstest]
#[case("friends-only", false)]
#[case("investors", true)]
#[tokio::test]
async fn privacy_visibility_is_restricted(
    profile: UserProfile,
    #[case] visibility: &str,
    #[case] accepted: bool,
) {
    let mut form = seeded(&profile, SettingsTab::Privacy);
    form.set_field("profileVisibility", visibility).expect("text");
    let handler: RecordingHandler<SettingsPatch, UserProfile> =
        RecordingHandler::new([Ok(profile.clone())]);

    let result = form.submit(&handler).await;

    assert_eq!(result.is_ok(), accepted);
    assert_eq!(handler.calls(), usize::from(accepted));
}

#[rstest]
#[tokio::test]
async fn security_tab_rotates_password_and_clears_inputs(profile: UserProfile) {
    let service =
        FixtureProfileSettingsService::new(profile.clone(), CURRENT_PASSWORD, Duration::ZERO);
    let mut form = seeded(&profile, SettingsTab::Security);
    for (name, value) in [
        ("currentPassword", CURRENT_PASSWORD),
        ("newPassword", "n3w-pass"),
        ("confirmPassword", "n3w-pass"),
    ] {
        form.set_field(name, value).expect("text");
    }
    form.set_field("twoFactorEnabled", true).expect("flag");

    let outcome = form.submit(&service).await.expect("security tab valid");

    assert!(matches!(outcome, SubmitOutcome::Completed(ref saved) if saved.two_factor_enabled));
    for name in ["currentPassword", "newPassword", "confirmPassword"] {
        assert_eq!(form.record().get(name), Some(&FieldValue::from("")));
    }
    assert_eq!(form.record().get("twoFactorEnabled"), Some(&FieldValue::Flag(true)));
}

#[rstest]
#[tokio::test]
async fn wrong_current_password_raises_banner(profile: UserProfile) {
    let service =
        FixtureProfileSettingsService::new(profile.clone(), CURRENT_PASSWORD, Duration::ZERO);
    let mut form = seeded(&profile, SettingsTab::Security);
    for (name, value) in [
        ("currentPassword", "guess"),
        ("newPassword", "n3w-pass"),
        ("confirmPassword", "n3w-pass"),
    ] {
        form.set_field(name, value).expect("text");
    }

    let outcome = form.submit(&service).await.expect("security tab valid");

    assert!(matches!(outcome, SubmitOutcome::Failed(_)));
    assert!(form.errors().is_empty());
    assert_eq!(
        form.banner().map(hub::domain::form::Banner::code),
        Some(ErrorCode::Unauthorized)
    );
    assert_eq!(form.record().get("newPassword"), Some(&FieldValue::from("n3w-pass")));
}

#[rstest]
#[tokio::test]
async fn mismatched_confirmation_blocks_submit(profile: UserProfile) {
    let mut form = seeded(&profile, SettingsTab::Security);
    for (name, value) in [
        ("currentPassword", CURRENT_PASSWORD),
        ("newPassword", "n3w-pass"),
        ("confirmPassword", "other"),
    ] {
        form.set_field(name, value).expect("text");
    }
    let handler: RecordingHandler<SettingsPatch, UserProfile> = RecordingHandler::new([]);

    let blocked = form.submit(&handler).await.expect_err("confirmation differs");

    assert!(
        matches!(blocked, SubmitBlocked::Invalid { ref errors } if errors.contains("confirmPassword"))
    );
    assert_eq!(handler.calls(), 0);
}

#[rstest]
#[tokio::test]
async fn profile_tab_persists_through_fixture(profile: UserProfile) {
    let service =
        FixtureProfileSettingsService::new(profile.clone(), CURRENT_PASSWORD, Duration::ZERO);
    let mut form = seeded(&profile, SettingsTab::Profile);
    form.set_field("city", "Abuja").expect("text");
    form.set_field("phone", "+234 800 000 0000").expect("text");

    form.submit(&service).await.expect("profile tab valid");

    let stored = service.profile();
    assert_eq!(stored.city, "Abuja");
    assert_eq!(stored.phone, "+234 800 000 0000");
    assert_eq!(stored.account().display_name, "Ngozi Eze");
}
