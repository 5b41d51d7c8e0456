pub mod account;
pub mod config;
pub mod cookies;
pub mod error;
pub mod session;

use regex::Regex;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, COOKIE, LOCATION, USER_AGENT},
    Method, StatusCode,
};
use tracing::{debug, info, trace, warn};

use self::{
    config::ClientConfig,
    cookies::CookieJar,
    error::{ClientError, Result},
    session::SessionOptions,
};
use crate::{
    constants::{
        DEFAULT_REDIRECTS, INDEX_PATH, LOGIN_FIELD, LOGIN_FORM, LOGIN_PATH, PASSWORD_FIELD,
        ROOT_PATH, STATELESS_VIEW_STATE, VIEW_STATE_PATTERN, VIEW_STATE_VALUE_PATTERN,
    },
    types::{Login, Password},
};

lazy_static::lazy_static! {
    static ref VIEW_STATE_REGEX: Regex = Regex::new(VIEW_STATE_PATTERN)
        .expect("Failed to compile view state regex");
    static ref VIEW_STATE_VALUE_REGEX: Regex = Regex::new(VIEW_STATE_VALUE_PATTERN)
        .expect("Failed to compile view state value regex");
}

pub struct BeelineWebClient {
    /// The client used to make requests to the portal. Redirects are followed by hand.
    client: reqwest::Client,
    /// Portal location.
    config: ClientConfig,
    /// Whether and where the cookie jar is saved between runs.
    options: SessionOptions,
    /// Cookies sent with every request and updated from every response.
    cookies: CookieJar,
    /// JSF view state of the last authenticated page, required by every form submission.
    /// Only ever holds a usable (non `stateless`) token.
    view_state: Option<String>,
}

impl BeelineWebClient {
    pub fn new(config: ClientConfig, options: SessionOptions) -> Result<BeelineWebClient> {
        Ok(BeelineWebClient {
            client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()?,
            config,
            options,
            cookies: CookieJar::new(),
            view_state: None,
        })
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn view_state(&self) -> Option<&str> {
        self.view_state.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.view_state.is_some()
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36",
            ),
        );

        headers
    }

    /// Send a request to the portal and return the body of the final response.
    ///
    /// # Arguments
    ///
    /// * `method` - `GET` or `POST`. POST params are sent url-encoded, GET ones are ignored.
    /// * `path` - Path on the portal, e.g. `/login.xhtml`.
    /// * `params` - Form fields.
    /// * `redirects` - How many `302` responses may be followed, always with a GET.
    ///
    /// # Returns
    ///
    /// The body of the `200` response. Any other status, including a `302`
    /// once the redirect budget is spent, is an error.
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        redirects: u8,
    ) -> Result<String> {
        let mut method = method;
        let mut path = path.to_string();
        let mut params = params;
        let mut redirects = redirects;

        loop {
            let mut req = self
                .client
                .request(method.clone(), self.config.url(&path))
                .headers(self.get_headers());
            if let Some(cookie) = self.cookies.to_header() {
                req = req.header(COOKIE, cookie);
            }
            if method == Method::POST {
                req = req.header(ACCEPT, "text/plain").form(params);
            }

            let res = req.send().await?;
            let status = res.status();
            self.cookies.merge_headers(res.headers());
            let location = res
                .headers()
                .get(LOCATION)
                .map(|value| value.to_str().map(str::to_string));
            let body = res.text().await?;
            debug!("{} {} -> {}", method, path, status);

            if status == StatusCode::FOUND && redirects > 0 {
                let location = match location {
                    Some(Ok(location)) => location,
                    Some(Err(_)) => {
                        return Err(ClientError::InvalidRedirect(
                            "non UTF-8 Location header".to_string(),
                        ))
                    }
                    None => {
                        return Err(ClientError::InvalidRedirect(
                            "missing Location header".to_string(),
                        ))
                    }
                };
                path = self.config.redirect_path(&location)?;
                method = Method::GET;
                params = &[];
                redirects -= 1;
                continue;
            }

            if status != StatusCode::OK {
                return Err(ClientError::UnexpectedStatus(status.as_u16()));
            }

            return Ok(body);
        }
    }

    /// Sign in, reusing the saved session when persistence is enabled.
    pub async fn authenticate(&mut self, login: &Login, password: &Password) -> Result<()> {
        let cached = self
            .options
            .session_path(login)
            .and_then(|path| session::load_jar(&path));
        self.authenticate_with(login, password, cached).await
    }

    /// Sign in to the portal.
    ///
    /// With a cached jar, the account page is loaded once without following
    /// redirects: a usable view state there means the session is still valid
    /// and the credentials are not submitted. Otherwise the login form is posted.
    ///
    /// # Arguments
    ///
    /// * `login` - The portal login.
    /// * `password` - The password in plaintext.
    /// * `cached` - Cookies of a previous session, if any.
    ///
    /// # Returns
    ///
    /// Nothing if the client holds a usable view state, an error otherwise.
    pub async fn authenticate_with(
        &mut self,
        login: &Login,
        password: &Password,
        cached: Option<CookieJar>,
    ) -> Result<()> {
        self.view_state = None;
        self.cookies = CookieJar::new();

        if let Some(jar) = cached {
            self.cookies = jar;
            match self.resume_session().await {
                Ok(view_state) => {
                    info!("Reusing saved session for {}", login);
                    self.view_state = Some(view_state);
                }
                Err(e) => {
                    debug!("Saved session rejected: {}", e);
                    self.cookies = CookieJar::new();
                }
            }
        }

        if self.view_state.is_none() {
            // Seeds the cookies the login form expects
            self.request(Method::GET, ROOT_PATH, &[], DEFAULT_REDIRECTS)
                .await?;

            let mut form: Vec<(&str, &str)> = LOGIN_FORM.to_vec();
            form.push((LOGIN_FIELD, login.as_ref()));
            form.push((PASSWORD_FIELD, password.as_ref()));
            let res = self
                .request(Method::POST, LOGIN_PATH, &form, DEFAULT_REDIRECTS)
                .await?;

            self.view_state = Some(extract_view_state(&res)?);
            info!("Signed in as {}", login);
        }

        if let Some(path) = self.options.session_path(login) {
            if let Err(e) = session::save_jar(&path, &self.cookies) {
                warn!("Could not save session to {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    async fn resume_session(&mut self) -> Result<String> {
        let res = self.request(Method::GET, INDEX_PATH, &[], 0).await?;
        extract_view_state(&res)
    }
}

/// Extract the JSF view state from a page.
///
/// The token is the `value` attribute of the hidden input with id
/// `j_id1:javax.faces.ViewState:0`. A missing input, or the `stateless`
/// placeholder served to anonymous visitors, means the sign in failed.
pub fn extract_view_state(res: &str) -> Result<String> {
    let input = VIEW_STATE_REGEX
        .captures(res)
        .and_then(|c| c.name("input"))
        .map(|m| m.as_str())
        .ok_or_else(|| {
            trace!("{}", res);
            ClientError::Authentication("no view state in the portal response".to_string())
        })?;

    let view_state = VIEW_STATE_VALUE_REGEX
        .captures(input)
        .and_then(|c| c.name("value"))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            ClientError::Authentication("view state input has no value".to_string())
        })?;

    if view_state == STATELESS_VIEW_STATE {
        return Err(ClientError::Authentication(
            "the portal did not open a session, check your login and password".to_string(),
        ));
    }

    Ok(view_state)
}
