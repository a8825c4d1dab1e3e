//! Access guard for authenticated routes.
//!
//! Handlers that take an [`Authenticated`] argument only run once the
//! presented session token has been verified; everything else is answered
//! with `401 not authorized` before the handler body executes.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::account_service::NOT_AUTHORIZED;
use crate::domain::{Error, UserId};
use crate::inbound::http::session::presented_token;
use crate::inbound::http::state::HttpState;

/// Identity of the caller, proven by a valid session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(UserId);

impl Authenticated {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = presented_token(req);
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let Some(token) = token else {
                debug!("request without session token");
                return Err(Error::unauthorized(NOT_AUTHORIZED).into());
            };
            let user_id = state.accounts.resolve_session(&token).await?;
            Ok(Self(user_id))
        })
    }
}
