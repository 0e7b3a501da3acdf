//! One handler per CLI command. Each runs the route guard, drives a page and
//! returns what the page rendered underneath the navbar.

use crate::app::App;
use crate::pages::events::render_event_card;
use crate::pages::{EventsPage, Loadable, LoginMode, LoginPage, Navbar, OrdersPage, PurchasePage};
use crate::routes::{guard, Guard, Route};
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub body: String,
    pub success: bool,
}

fn frame(app: &App, body: String, success: bool) -> Rendered {
    let snapshot = app.session().snapshot();
    let mut out = Navbar::render(&snapshot);
    out.push_str("\n\n");
    if snapshot.expired {
        out.push_str("Your session has expired. Please log in again.\n\n");
    }
    out.push_str(&body);
    Rendered { body: out, success }
}

/// The application start: rehydrates the user from a stored token.
pub async fn mount(app: &App) -> SessionSnapshot {
    app.session().load().await
}

fn enter(app: &App, route: Route) -> Result<Route, Rendered> {
    match guard(route, &app.session().snapshot()) {
        Guard::Render(route) => Ok(route),
        Guard::Redirect(to) => Err(frame(
            app,
            format!("Please log in to continue ({}).\n", to.path()),
            false,
        )),
        Guard::Pending => Err(frame(app, "Loading session...\n".to_string(), false)),
    }
}

pub async fn events(app: &App, page: Option<u32>, page_size: u32) -> Rendered {
    let mut view = EventsPage::new();
    match page {
        Some(page) => view.load_page(app.events(), page, page_size).await,
        None => view.load(app.events()).await,
    }
    let success = view.events().error().is_none();
    frame(app, view.render(), success)
}

pub async fn event_detail(app: &App, id: &str) -> Rendered {
    let route = match enter(app, Route::EventDetail(id.to_string())) {
        Ok(route) => route,
        Err(rendered) => return rendered,
    };
    tracing::debug!(path = %route.path(), "Showing event");

    match app.events().get_event_by_id(id).await {
        Ok(event) => frame(app, render_event_card(&event), true),
        Err(e) => frame(app, format!("Error: {}\n", e.public_message()), false),
    }
}

pub async fn login(app: &App, email: &str, password: &str, mode: LoginMode) -> Rendered {
    let mut view = LoginPage::new(mode);
    view.set_credentials(email, password);
    let next = view.submit(app.session()).await;

    let mut body = view.render();
    if let Some(route) = &next {
        body.push_str(&format!("Continue at {}\n", route.path()));
    }
    frame(app, body, next.is_some())
}

pub fn logout(app: &App) -> Rendered {
    match app.session().logout() {
        Ok(()) => frame(app, "You have been logged out.\n".to_string(), true),
        Err(e) => frame(app, format!("Logout failed: {}\n", e.public_message()), false),
    }
}

pub fn whoami(app: &App) -> Rendered {
    let body = match app.session().user() {
        Some(user) => format!("{} <{}> ({})\n", user.name, user.email, user.role.as_str()),
        None => "Not logged in.\n".to_string(),
    };
    frame(app, body, true)
}

pub async fn purchase(app: &App, event_id: Option<String>, quantity: u32) -> Rendered {
    let route = Route::Purchase {
        event_id: event_id.clone(),
    };
    if let Err(rendered) = enter(app, route) {
        return rendered;
    }

    let mut view = PurchasePage::with_selection(event_id);
    view.load_events(app.events()).await;
    view.set_quantity(quantity);
    let succeeded = view.submit(app.tickets(), app.events()).await;

    let user = app.session().user();
    frame(app, view.render(user.as_ref()), succeeded)
}

pub async fn orders(app: &App) -> Rendered {
    if let Err(rendered) = enter(app, Route::Orders) {
        return rendered;
    }

    let mut view = OrdersPage::new();
    view.load(app.tickets()).await;
    let success = matches!(view.orders(), Loadable::Loaded(_));
    frame(app, view.render(), success)
}
