//! Pages and navigation
//!
//! The page controller ties the session store, the backend client, the auth
//! flow, and the view engine together. Opening a page always runs the same
//! ordered steps: session check (with a possible redirect to the login
//! view), nav-link rendering, then the page's own data fetch. The original
//! ran these from independent load listeners in no particular order.

use std::sync::Arc;

use crate::auth::{AuthFlow, LoginForm, LoginOutcome, RegisterForm, RegisterOutcome};
use crate::client::{Backend, PageQuery};
use crate::config::Config;
use crate::models::{Profile, Session};
use crate::store::{create_store, SessionStore};
use crate::view::{
    build_cards, nav_link, LoginPage, RecipesPage, ViewEngine, RECIPES_STATUS_ERROR,
};

/// The client's views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Recipes,
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Login => write!(f, "login"),
            Route::Recipes => write!(f, "recipes"),
        }
    }
}

/// Where a page load ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested route
    Stay,
    /// Render this route instead
    To(Route),
}

/// Decide where a page load lands.
///
/// Without a valid session every route except the login view redirects to
/// it; the route comparison is exact, so there is no way for an unrelated
/// location to be mistaken for the login view. A valid session stays put
/// and logs a welcome.
pub fn page_load(route: Route, store: &dyn SessionStore) -> Navigation {
    match store.read() {
        Some(session) if session.is_valid() => {
            tracing::info!("Welcome, {}", session.username);
            Navigation::Stay
        }
        _ => {
            if route == Route::Login {
                Navigation::Stay
            } else {
                tracing::debug!(%route, "no valid session, redirecting to login");
                Navigation::To(Route::Login)
            }
        }
    }
}

/// A rendered page plus where it came from
#[derive(Debug)]
pub struct PageOutput {
    /// The route that was actually rendered
    pub route: Route,
    /// Whether the requested route was abandoned for a redirect
    pub redirected: bool,
    pub html: String,
}

/// The wired-up client application
pub struct App {
    backend: Arc<dyn Backend>,
    store: Arc<dyn SessionStore>,
    auth: AuthFlow,
    view: ViewEngine,
    base_url: String,
    page_size: u64,
}

impl App {
    /// Wire an application from explicit parts
    pub fn new(
        backend: Arc<dyn Backend>,
        store: Arc<dyn SessionStore>,
        base_url: String,
        page_size: u64,
    ) -> anyhow::Result<Self> {
        let auth = AuthFlow::new(backend.clone(), store.clone());
        let view = ViewEngine::new()?;
        Ok(Self {
            backend,
            store,
            auth,
            view,
            base_url,
            page_size,
        })
    }

    /// Wire an application from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let backend = Arc::new(crate::client::HttpBackend::new(&config.backend)?);
        let store = create_store(&config.session);
        Self::new(
            backend,
            store,
            config.backend.base_url.trim_end_matches('/').to_string(),
            config.list.page_size,
        )
    }

    /// The stored session, if any
    pub fn current_session(&self) -> Option<Session> {
        self.store.read()
    }

    /// Open a route with page-load semantics: session check, possible
    /// redirect to the login view, then render.
    pub async fn open(&self, route: Route) -> anyhow::Result<PageOutput> {
        match page_load(route, self.store.as_ref()) {
            Navigation::Stay => self.render(route, false).await,
            Navigation::To(target) => self.render(target, true).await,
        }
    }

    async fn render(&self, route: Route, redirected: bool) -> anyhow::Result<PageOutput> {
        match route {
            Route::Login => {
                let page = LoginPage::new(self.nav());
                Ok(PageOutput {
                    route,
                    redirected,
                    html: self.view.render_login(&page)?,
                })
            }
            Route::Recipes => {
                let query = PageQuery {
                    size: self.page_size,
                    page: 1,
                };
                self.recipes_page(query, redirected).await
            }
        }
    }

    /// Fetch one page of recipes and render the list view.
    ///
    /// The nav link renders from the session read before the fetch, so its
    /// content never depends on how the fetch goes. A failed fetch keeps
    /// the page with zero cards and a status line instead of failing
    /// silently.
    pub async fn open_recipes(&self, query: PageQuery) -> anyhow::Result<PageOutput> {
        match page_load(Route::Recipes, self.store.as_ref()) {
            Navigation::Stay => self.recipes_page(query, false).await,
            Navigation::To(target) => self.render(target, true).await,
        }
    }

    async fn recipes_page(&self, query: PageQuery, redirected: bool) -> anyhow::Result<PageOutput> {
        let nav = self.nav();

        let (cards, status) = match self.backend.list_recipes(query).await {
            Ok(list) => {
                tracing::info!(count = list.recipes.len(), "recipes fetched");
                (build_cards(&list.recipes), None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to fetch recipes");
                (Vec::new(), Some(RECIPES_STATUS_ERROR.to_string()))
            }
        };

        let page = RecipesPage { nav, cards, status };
        Ok(PageOutput {
            route: Route::Recipes,
            redirected,
            html: self.view.render_recipes(&page)?,
        })
    }

    /// Submit the login form. Success navigates to the recipes view;
    /// every failure re-renders the login view with the matching error
    /// element populated.
    pub async fn submit_login(&self, form: &LoginForm) -> anyhow::Result<PageOutput> {
        match self.auth.submit(form).await {
            LoginOutcome::LoggedIn(_) => {
                let query = PageQuery {
                    size: self.page_size,
                    page: 1,
                };
                self.recipes_page(query, false).await
            }
            LoginOutcome::Rejected(err) => {
                let mut page = LoginPage::new(self.nav());
                page.email = form.email.clone();
                match err.field {
                    crate::auth::Field::Email => page.email_error = Some(err.message.to_string()),
                    _ => page.password_error = Some(err.message.to_string()),
                }
                Ok(PageOutput {
                    route: Route::Login,
                    redirected: false,
                    html: self.view.render_login(&page)?,
                })
            }
            LoginOutcome::Failed { message } => {
                let mut page = LoginPage::new(self.nav());
                page.email = form.email.clone();
                page.login_error = Some(message);
                Ok(PageOutput {
                    route: Route::Login,
                    redirected: false,
                    html: self.view.render_login(&page)?,
                })
            }
            LoginOutcome::InFlight => {
                let mut page = LoginPage::new(self.nav());
                page.email = form.email.clone();
                page.login_error = Some("A login request is already in progress.".to_string());
                Ok(PageOutput {
                    route: Route::Login,
                    redirected: false,
                    html: self.view.render_login(&page)?,
                })
            }
        }
    }

    /// Submit the registration form
    pub async fn register(&self, form: &RegisterForm) -> RegisterOutcome {
        self.auth.register(form).await
    }

    /// Fetch the logged-in user's profile
    pub async fn profile(&self) -> anyhow::Result<Profile> {
        let session = self
            .current_session()
            .filter(Session::is_valid)
            .ok_or_else(|| anyhow::anyhow!("not logged in; run the login command first"))?;

        let profile = self
            .backend
            .get_profile(&session.user_id, Some(&session.token))
            .await?;
        Ok(profile)
    }

    fn nav(&self) -> crate::view::NavLink {
        nav_link(&self.base_url, self.store.read().as_ref())
    }
}
