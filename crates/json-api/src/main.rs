//! Eatsight JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use eatsight_app::context::AppContext;

use crate::{config::ServerConfig, state::State};

mod auth;
mod config;
mod extensions;
mod healthcheck;
mod logging;
mod menu;
mod orders;
mod payments;
mod restaurants;
mod reviews;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;
mod vouchers;

/// Routes that require a bearer token.
fn api_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(Router::with_path("vouchers").post(orders::apply_voucher::handler)),
                ),
        )
        .push(
            Router::with_path("vouchers")
                .get(vouchers::index::handler)
                .push(Router::with_path("mine").get(vouchers::mine::handler))
                .push(Router::with_path("{voucher}/redeem").post(vouchers::redeem::handler)),
        )
        .push(
            Router::with_path("payments")
                .get(payments::index::handler)
                .post(payments::create::handler)
                .push(
                    Router::with_path("{payment}")
                        .get(payments::get::handler)
                        .push(Router::with_path("status").get(payments::status::handler))
                        .push(
                            Router::with_path("qr-code")
                                .get(payments::qr_code::handler)
                                .push(
                                    Router::with_path("share")
                                        .post(payments::share_qr_code::handler),
                                ),
                        ),
                ),
        )
        .push(
            Router::with_path("payment-methods")
                .get(payments::methods::index::handler)
                .post(payments::methods::create::handler),
        )
        .push(
            Router::with_path("restaurants")
                .get(restaurants::index::handler)
                .push(
                    Router::with_path("{restaurant}")
                        .push(Router::with_path("tables").get(restaurants::tables::handler))
                        .push(Router::with_path("menu-items").get(menu::index::handler))
                        .push(
                            Router::with_path("reviews")
                                .get(reviews::index::handler)
                                .post(reviews::create::handler),
                        ),
                ),
        )
        .push(Router::with_path("menu-items/{item}").get(menu::get::handler))
}

/// Eatsight JSON API Server entry point
#[tokio::main]
pub async fn main() {
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(e) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {e}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        config.payments.payments_config(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::new(app, config.payments.watch_options())))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(api_router());

    let doc = OpenApi::new("Eatsight API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
}
