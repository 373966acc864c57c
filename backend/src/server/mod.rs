//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::configure;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use backend::outbound::token::{JwtHandler, JwtProperties};
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    #[fixture]
    fn config() -> ServerConfig {
        let tokens = JwtHandler::new(&JwtProperties {
            token_type: "JWT".to_owned(),
            issuer: "diary-backend".to_owned(),
            member_claim: "memberId".to_owned(),
            secret_key: Zeroizing::new("k".repeat(32)),
        })
        .expect("valid jwt settings");
        ServerConfig::new("127.0.0.1:0".parse().expect("addr"), Arc::new(tokens))
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(config: ServerConfig) {
        let health_state = web::Data::new(HealthState::new());
        let _server = create_server(health_state.clone(), config).expect("server binds");
        assert!(health_state.is_ready());
    }

    #[rstest]
    #[actix_web::test]
    async fn in_memory_app_serves_probes_and_api(config: ServerConfig) {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let app = test::init_service(build_app(AppDependencies {
            health_state,
            http_state: build_http_state(&config),
        }))
        .await;

        let ready = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready.status(), StatusCode::OK);
        assert!(ready.headers().contains_key("trace-id"));

        let me = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/members/me").to_request(),
        )
        .await;
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }
}
