// End-to-end: HTTP request -> response cache -> aggregation -> mock upstream.

#[cfg(test)]
mod test {

    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::routing::post;
    use axum::Router;
    use http::StatusCode;
    use serde_json::{json, Value};
    use tokio::task::JoinHandle;

    use crate::cache::roster_cache::RosterCache;
    use crate::config::roster::TargetMember;
    use crate::server::server::{router, AppState};
    use crate::tests::common::{
        build_aggregator, build_reqwest_client, member_list_router, roster_ab, spawn_axum,
        test_config, token_router,
    };
    use crate::ServiceConfig;

    async fn spawn_service(
        config: &ServiceConfig,
        roster: Vec<TargetMember>,
    ) -> (JoinHandle<()>, SocketAddr) {
        let aggregator = build_aggregator(config, roster);
        let state = AppState::new(aggregator, RosterCache::new(config.cache_ttl_seconds));
        spawn_axum(router(state)).await
    }

    #[tokio::test]
    async fn points_route_returns_success_envelope_and_caches() {
        let list_hits = Arc::new(AtomicUsize::new(0));
        let (token_h, token_addr) =
            spawn_axum(token_router(Arc::new(AtomicUsize::new(0)), 3600)).await;
        let (member_h, member_addr) = spawn_axum(member_list_router(
            json!({"code": 200, "data": [{"uid": "u1", "point_amount": 100}]}),
            list_hits.clone(),
        ))
        .await;

        let config = test_config(
            Some(format!("http://{}/oauth/token", token_addr)),
            format!("http://{}", member_addr),
        );
        let (service_h, service_addr) = spawn_service(&config, roster_ab()).await;

        let client = build_reqwest_client();
        let url = format!("http://{}/public-specific-member-points", service_addr);

        let response = client.get(&url).send().await.expect("request");
        assert_eq!(response.status(), StatusCode::OK.as_u16());
        let body: Value = response.json().await.expect("json body");
        assert_eq!(
            body,
            json!({
                "success": true,
                "data": [
                    {"display_name": "A", "points": 100},
                    {"display_name": "B", "points": "unavailable"}
                ],
                "message": "member points loaded successfully"
            })
        );

        let again: Value = client
            .get(&url)
            .send()
            .await
            .expect("second request")
            .json()
            .await
            .expect("json body");
        assert_eq!(again, body);
        assert_eq!(
            list_hits.load(Ordering::SeqCst),
            1,
            "second request served from cache, upstream untouched"
        );

        token_h.abort();
        member_h.abort();
        service_h.abort();
    }

    #[tokio::test]
    async fn auth_failure_surfaces_as_500_error_envelope() {
        let failing_token = Router::new().route(
            "/oauth/token",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "token service down") }),
        );
        let (token_h, token_addr) = spawn_axum(failing_token).await;

        let config = test_config(
            Some(format!("http://{}/oauth/token", token_addr)),
            "http://127.0.0.1:1".into(),
        );
        let (service_h, service_addr) = spawn_service(&config, roster_ab()).await;

        let response = build_reqwest_client()
            .get(format!(
                "http://{}/public-specific-member-points",
                service_addr
            ))
            .send()
            .await
            .expect("request");

        assert_eq!(response.status().as_u16(), 500);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("member points"));
        assert!(body["details"].as_str().is_some());

        token_h.abort();
        service_h.abort();
    }

    #[tokio::test]
    async fn root_route_answers_for_liveness() {
        let config = test_config(None, "http://127.0.0.1:1".into());
        let (service_h, service_addr) = spawn_service(&config, roster_ab()).await;

        let response = build_reqwest_client()
            .get(format!("http://{}/", service_addr))
            .send()
            .await
            .expect("request");

        assert_eq!(response.status().as_u16(), 200);
        assert!(response.text().await.unwrap().contains("running"));

        service_h.abort();
    }
}
