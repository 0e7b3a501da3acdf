use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Events,
    EventDetail(String),
    Purchase { event_id: Option<String> },
    Orders,
    Login,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Events => "/events".to_string(),
            Route::EventDetail(id) => format!("/events/{id}"),
            Route::Purchase { event_id: None } => "/purchase".to_string(),
            Route::Purchase { event_id: Some(id) } => format!("/purchase?event={id}"),
            Route::Orders => "/orders".to_string(),
            Route::Login => "/login".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["events"] => Some(Route::Events),
            ["events", id] => Some(Route::EventDetail((*id).to_string())),
            ["purchase"] => {
                let event_id = query
                    .into_iter()
                    .flat_map(|q| q.split('&'))
                    .find_map(|pair| pair.strip_prefix("event="))
                    .filter(|id| !id.is_empty())
                    .map(str::to_string);
                Some(Route::Purchase { event_id })
            }
            ["orders"] => Some(Route::Orders),
            ["login"] => Some(Route::Login),
            _ => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Purchase { .. } | Route::Orders)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    Render(Route),
    Redirect(Route),
    /// The session is still loading; nothing to decide yet.
    Pending,
}

/// Lets public routes through and sends unauthenticated visitors of
/// protected routes to the login page.
pub fn guard(route: Route, session: &SessionSnapshot) -> Guard {
    if !route.is_protected() {
        return Guard::Render(route);
    }
    if session.is_loading {
        return Guard::Pending;
    }
    if session.is_authenticated() {
        Guard::Render(route)
    } else {
        tracing::debug!(path = %route.path(), "Redirecting to login");
        Guard::Redirect(Route::Login)
    }
}
