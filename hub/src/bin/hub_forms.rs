//! Drive the hub's forms from the command line against the fixture handlers.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use ortho_config::OrthoConfig;
use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use serde::Serialize;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hub::config::HubSettings;
use hub::domain::form::{FieldValue, FormController, FormMode, SubmitBlocked, SubmitOutcome};
use hub::domain::ports::{
    DEMO_PASSWORD, FixtureAuthService, FixtureProfileSettingsService, InMemorySessionCache,
    SessionCache, SubmitHandler,
};
use hub::domain::{AuthMode, AuthSession, Role, SettingsTab, UserProfile};
use hub::outbound::JsonFileSessionCache;

/// `hub-forms` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "hub-forms",
    about = "Fill and submit WomenConnect Hub forms against local fixtures",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in or register.
    Auth {
        /// Form mode to submit.
        #[arg(long, value_enum, default_value_t = AuthModeArg::Login)]
        mode: AuthModeArg,
        /// Field values as a JSON object, e.g. `{"email":"a@b.co"}`.
        #[arg(long, value_name = "json", value_parser = parse_values)]
        values: FieldValues,
    },
    /// Save one tab of the signed-in user's settings.
    ///
    /// The settings store is rebuilt from the cached account on every run, so
    /// saved tabs are not kept between invocations. The security tab accepts
    /// the demo account's password as the current password.
    Settings {
        /// Settings tab to submit.
        #[arg(long, value_enum)]
        tab: TabArg,
        /// Field values as a JSON object, merged over the stored profile.
        #[arg(long, value_name = "json", value_parser = parse_values)]
        values: FieldValues,
    },
    /// Show the cached session.
    Whoami,
    /// Clear the cached session.
    Logout,
}

type FieldValues = BTreeMap<String, FieldValue>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AuthModeArg {
    Login,
    Entrepreneur,
    Investor,
}

impl From<AuthModeArg> for AuthMode {
    fn from(value: AuthModeArg) -> Self {
        match value {
            AuthModeArg::Login => Self::Login,
            AuthModeArg::Entrepreneur => Self::Register(Role::Entrepreneur),
            AuthModeArg::Investor => Self::Register(Role::Investor),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TabArg {
    Profile,
    Business,
    Investment,
    Security,
    Notifications,
    Privacy,
}

impl From<TabArg> for SettingsTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Profile => Self::Profile,
            TabArg::Business => Self::Business,
            TabArg::Investment => Self::Investment,
            TabArg::Security => Self::Security,
            TabArg::Notifications => Self::Notifications,
            TabArg::Privacy => Self::Privacy,
        }
    }
}

fn parse_values(raw: &str) -> Result<FieldValues, String> {
    serde_json::from_str(raw).map_err(|error| format!("values must be a JSON object: {error}"))
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = HubSettings::load_from_iter([OsString::from("hub-forms")])
        .map_err(|error| eyre!("load configuration: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;

    match settings.session_dir.clone() {
        Some(dir) => {
            let cache = JsonFileSessionCache::open(&dir)
                .wrap_err_with(|| format!("open session directory {}", dir.display()))?;
            runtime.block_on(run(args.command, &settings, Arc::new(cache)))
        }
        None => runtime.block_on(run(
            args.command,
            &settings,
            Arc::new(InMemorySessionCache::default()),
        )),
    }
}

async fn run<C: SessionCache + 'static>(
    command: Command,
    settings: &HubSettings,
    cache: Arc<C>,
) -> Result<()> {
    let mut auth = FixtureAuthService::new(settings.mock_latency());
    if settings.seed_demo_account() {
        auth = auth.with_demo_account();
    }
    let session = AuthSession::new(Arc::new(auth), cache);

    match command {
        Command::Auth { mode, values } => {
            let mode = AuthMode::from(mode);
            let form = fill(FormController::new(mode), &values)?;
            submit(form, &session).await
        }
        Command::Settings { tab, values } => {
            let Some(account) = session.restore()? else {
                bail!("not signed in; run `hub-forms auth` first");
            };
            let profile = UserProfile::for_account(&account);
            let service = FixtureProfileSettingsService::new(
                profile.clone(),
                DEMO_PASSWORD,
                settings.mock_latency(),
            );
            let form = fill(
                FormController::seeded(SettingsTab::from(tab), profile.form_seed())?,
                &values,
            )?;
            submit(form, &service).await
        }
        Command::Whoami => {
            match session.restore()? {
                Some(account) => print_json("account", &account)?,
                None => println!("signed out"),
            }
            Ok(())
        }
        Command::Logout => {
            session.logout()?;
            println!("signed out");
            Ok(())
        }
    }
}

fn fill<M: FormMode>(mut form: FormController<M>, values: &FieldValues) -> Result<FormController<M>> {
    for (name, value) in values {
        form.set_field(name, value.clone())?;
    }
    Ok(form)
}

async fn submit<M, H>(mut form: FormController<M>, handler: &H) -> Result<()>
where
    M: FormMode,
    H: SubmitHandler<M::Payload> + ?Sized,
    H::Output: Serialize,
{
    let mode = form.mode();
    info!(mode = mode.label(), "submitting form");
    match form.submit(handler).await {
        Ok(SubmitOutcome::Completed(output)) => print_json("completed", &output),
        Ok(SubmitOutcome::Failed(error)) => {
            if let Some(banner) = form.banner() {
                print_json("failed", banner)?;
            }
            Err(eyre!(error))
        }
        Ok(SubmitOutcome::Abandoned) => bail!("submission abandoned"),
        Err(SubmitBlocked::Invalid { errors }) => {
            print_json("invalid", &errors)?;
            bail!("{} field(s) failed validation", errors.len())
        }
        Err(blocked) => Err(eyre!(blocked)),
    }
}

fn print_json<T: Serialize + ?Sized>(label: &str, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("render output")?;
    println!("{label}: {rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Argument parsing coverage for `hub-forms`.
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[rstest]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[rstest]
    fn settings_help_states_fixture_limits() {
        let command = CliArgs::command();
        let help = command
            .find_subcommand("settings")
            .and_then(clap::Command::get_long_about)
            .map(ToString::to_string)
            .expect("settings has long help");
        assert!(help.contains("not kept between invocations"));
        assert!(help.contains("demo account's password"));
    }

    #[rstest]
    fn values_must_be_a_json_object() {
        let parsed = CliArgs::try_parse_from([
            "hub-forms",
            "auth",
            "--mode",
            "entrepreneur",
            "--values",
            r#"{"email":"a@b.co","password":"s3cret!"}"#,
        ])
        .expect("valid arguments");
        let Command::Auth { mode, values } = parsed.command else {
            panic!("expected the auth subcommand");
        };
        assert!(matches!(mode, AuthModeArg::Entrepreneur));
        assert_eq!(values.get("email"), Some(&FieldValue::from("a@b.co")));

        let rejected =
            CliArgs::try_parse_from(["hub-forms", "auth", "--values", "[1, 2]"]);
        assert!(rejected.is_err());
    }
}
