use actix_csp::core::{CspConfig, PolicyMap};
use actix_csp::middleware::{csp_middleware, csp_route_header, csp_route_header_with};
use actix_web::{test, web, App, HttpResponse};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn ok_handler() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

async fn handler_with_own_csp() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("content-security-policy", "default-src 'self'"))
        .body("ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn global_middleware_sets_header_when_absent() {
        init_logging();
        let config = CspConfig::default();
        let app = test::init_service(
            App::new()
                .wrap(csp_middleware(config))
                .route("/", web::get().to(ok_handler)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .expect("CSP header missing")
                .to_str()
                .unwrap(),
            "default-src 'self'; report-uri /csp_report"
        );
    }

    #[actix_web::test]
    async fn global_middleware_preserves_existing_header() {
        init_logging();
        let config = CspConfig::new(PolicyMap::from_pairs([("default-src", "'none'")]));
        let app = test::init_service(
            App::new()
                .wrap(csp_middleware(config))
                .route("/", web::get().to(handler_with_own_csp)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        // First write wins: the handler's value survives.
        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap(),
            "default-src 'self'"
        );
    }

    #[actix_web::test]
    async fn route_middleware_overwrites_existing_header() {
        let config = CspConfig::new(PolicyMap::from_pairs([("default-src", "'none'")]));
        let app = test::init_service(
            App::new().service(
                web::resource("/")
                    .wrap(csp_route_header(config))
                    .route(web::get().to(handler_with_own_csp)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap(),
            "default-src 'none'"
        );
    }

    #[actix_web::test]
    async fn route_override_end_to_end() {
        let config = CspConfig::default();
        let map = PolicyMap::from_pairs([("default-src", "'none'"), ("script-src", "'self'")]);
        let app = test::init_service(
            App::new().service(
                web::resource("/")
                    .wrap(csp_route_header_with(config, map))
                    .route(web::get().to(ok_handler)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap(),
            "default-src 'none'; script-src 'self'"
        );

        let body = test::read_body(resp).await;
        assert_eq!(body, "ok");
    }

    #[actix_web::test]
    async fn route_middleware_resolves_defaults_at_call_time() {
        let config = CspConfig::new(PolicyMap::from_pairs([("default-src", "'self'")]));
        let app = test::init_service(
            App::new().service(
                web::resource("/")
                    .wrap(csp_route_header(config.clone()))
                    .route(web::get().to(ok_handler)),
            ),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap(),
            "default-src 'self'"
        );

        // Updating the shared defaults is visible to the already-wrapped route.
        config.set_defaults(PolicyMap::from_pairs([("img-src", "'self'")]));

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .unwrap()
                .to_str()
                .unwrap(),
            "img-src 'self'"
        );
    }

    #[actix_web::test]
    async fn report_only_map_emits_report_only_header() {
        let config = CspConfig::new(PolicyMap::from_pairs([
            ("default-src", "'self'"),
            ("report-only", "true"),
        ]));
        let app = test::init_service(
            App::new()
                .wrap(csp_middleware(config))
                .route("/", web::get().to(ok_handler)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(resp.headers().get("content-security-policy").is_none());
        assert_eq!(
            resp.headers()
                .get("content-security-policy-report-only")
                .unwrap()
                .to_str()
                .unwrap(),
            "default-src 'self'"
        );
    }

    #[actix_web::test]
    async fn all_empty_policy_emits_empty_header_value() {
        let config = CspConfig::new(PolicyMap::from_pairs([("default-src", ""), ("img-src", "")]));
        let app = test::init_service(
            App::new()
                .wrap(csp_middleware(config))
                .route("/", web::get().to(ok_handler)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(
            resp.headers()
                .get("content-security-policy")
                .expect("header should be present even when empty")
                .to_str()
                .unwrap(),
            ""
        );
    }
}
