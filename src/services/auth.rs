use anyhow::{Context, Result};
use std::{
    io::{stdout, Write},
    path::PathBuf,
};
use tracing::info;

use crate::settings::SettingsStore;
use beeline_api::{
    client::{
        error::ClientError,
        session::{session_file_name, SessionOptions},
        BeelineWebClient,
    },
    types::{Login, Password},
};

pub trait CredentialsProvider {
    fn read_password(&self) -> Result<Password>;
}
pub struct StdinCredentialsProvider;
impl CredentialsProvider for StdinCredentialsProvider {
    fn read_password(&self) -> Result<Password> {
        print!("\nEnter your password (hidden): ");
        let _ = stdout().flush();
        let password = Password::new(&rpassword::read_password()?)?;
        println!();
        Ok(password)
    }
}

pub trait ClientFactory {
    fn new_client(&self, options: SessionOptions) -> Result<BeelineWebClient>;
}
pub struct DefaultClientFactory;
impl ClientFactory for DefaultClientFactory {
    fn new_client(&self, options: SessionOptions) -> Result<BeelineWebClient> {
        beeline_api::get_client(options).context("Failed to build the HTTP client")
    }
}

/// What the command line asked for, before settings are applied.
#[derive(Debug, Default)]
pub struct LoginRequest {
    pub login: Option<Login>,
    pub password: Option<Password>,
    pub persist_session: bool,
}

pub enum LoginOutcome {
    /// No login given on the command line nor in the settings.
    NotConfigured,
    SignedIn {
        login: Login,
        client: BeelineWebClient,
    },
    /// The portal refused the credentials or the saved session.
    Rejected { login: Login, error: ClientError },
}

pub struct AuthService<'a> {
    settings_store: &'a dyn SettingsStore,
    credentials_provider: Box<dyn CredentialsProvider>,
    client_factory: Box<dyn ClientFactory>,
    /// Where session files go, the working directory when `None`.
    session_dir: Option<PathBuf>,
}

impl<'a> AuthService<'a> {
    pub fn new(
        settings_store: &'a dyn SettingsStore,
        credentials_provider: Box<dyn CredentialsProvider>,
        client_factory: Box<dyn ClientFactory>,
        session_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            settings_store,
            credentials_provider,
            client_factory,
            session_dir,
        }
    }

    pub fn with_defaults(settings_store: &'a dyn SettingsStore, session_dir: Option<PathBuf>) -> Self {
        Self::new(
            settings_store,
            Box::new(StdinCredentialsProvider),
            Box::new(DefaultClientFactory),
            session_dir,
        )
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome> {
        let settings = self.settings_store.load()?;

        let login = match request.login {
            Some(login) => login,
            None => match settings.login.as_deref() {
                Some(login) => Login::new(login).context("Invalid login in settings")?,
                None => return Ok(LoginOutcome::NotConfigured),
            },
        };

        let persist = request.persist_session || settings.persist_session;
        let options = SessionOptions {
            persist,
            cache_path: self
                .session_dir
                .as_ref()
                .map(|dir| dir.join(session_file_name(&login))),
        };
        if persist {
            info!("The session will be saved and reused, the password is ignored while it stays valid");
        }

        let password = match (request.password, settings.password.as_deref()) {
            (Some(password), _) => password,
            (None, Some(password)) => Password::new(password).context("Invalid password in settings")?,
            (None, None) => self.credentials_provider.read_password()?,
        };

        let mut client = self.client_factory.new_client(options)?;
        match client.authenticate(&login, &password).await {
            Ok(()) => {
                info!("Login successful ✅");
                Ok(LoginOutcome::SignedIn { login, client })
            }
            Err(error @ ClientError::Authentication(_)) => {
                Ok(LoginOutcome::Rejected { login, error })
            }
            Err(e) => Err(e).context("Could not sign in to the portal"),
        }
    }
}
