//! Process-wide default configuration.
//!
//! Lives in its own test binary because the default can only be set once per
//! process.

mod common;

use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use z_stripe_client::{default_config, init, ClientError, Config, PlanClient, StripeClient};

use common::{config_for, plan_json, API_KEY};

#[tokio::test]
async fn init_sets_the_default_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/plans/gold"))
        .and(basic_auth(API_KEY, ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(plan_json("gold", 2000)))
        .expect(2)
        .mount(&server)
        .await;

    init(config_for(&server)).unwrap();
    assert_eq!(default_config().unwrap().api_key, API_KEY);

    let err = init(Config::new("sk_test_other").unwrap()).unwrap_err();
    assert!(matches!(err, ClientError::Configuration(_)));
    assert_eq!(default_config().unwrap().api_key, API_KEY);

    let plan = PlanClient::from_default()
        .unwrap()
        .get("gold", None)
        .await
        .unwrap();
    assert_eq!(plan.id, "gold");

    let plan = StripeClient::from_default()
        .unwrap()
        .plans()
        .get("gold", None)
        .await
        .unwrap();
    assert_eq!(plan.amount, 2000);
}
