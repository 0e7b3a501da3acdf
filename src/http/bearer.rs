use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Request, Response, StatusCode,
};
use tower::{Layer, Service};

use crate::session::Session;

/// Attaches the stored token as a bearer credential to every request and
/// expires the session when the API rejects that credential with a 401.
#[derive(Clone)]
pub struct BearerAuthLayer {
    session: Session,
}

impl BearerAuthLayer {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl<S> Layer<S> for BearerAuthLayer {
    type Service = BearerAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BearerAuthService {
            inner,
            session: self.session.clone(),
        }
    }
}

#[derive(Clone)]
pub struct BearerAuthService<S> {
    inner: S,
    session: Session,
}

impl<S> Service<Request> for BearerAuthService<S>
where
    S: Service<Request, Response = Response>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BearerAuthFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        let mut token_attached = false;

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    request.headers_mut().insert(AUTHORIZATION, value);
                    token_attached = true;
                }
                Err(_) => {
                    tracing::warn!("Stored token is not a valid header value, sending request without it");
                }
            }
        }

        BearerAuthFuture {
            future: self.inner.call(request),
            session: self.session.clone(),
            token_attached,
        }
    }
}

#[pin_project::pin_project]
pub struct BearerAuthFuture<F> {
    #[pin]
    future: F,
    session: Session,
    token_attached: bool,
}

impl<F, E> Future for BearerAuthFuture<F>
where
    F: Future<Output = Result<Response, E>>,
{
    type Output = Result<Response, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => {
                // Only a rejected credential ends the session; a 401 on an
                // anonymous request is just a failed call.
                if *this.token_attached && response.status() == StatusCode::UNAUTHORIZED {
                    tracing::warn!(url = %response.url(), "Token rejected, clearing session");
                    this.session.expire();
                }
                Poll::Ready(Ok(response))
            }
            Poll::Ready(Err(e)) => Poll::Ready(Err(e)),
            Poll::Pending => Poll::Pending,
        }
    }
}
