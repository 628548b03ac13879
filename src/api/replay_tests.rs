//! Tests for canned responses.

use serde_json::json;

use super::{HttpClient, HttpError, HttpRequest, ReplayClient, ReplayTable};
use crate::network::{RouteTable, detect_current_ip};

fn sample() -> ReplayTable {
    serde_json::from_value(json!({
        "domains": {"data": [{"id": 1, "domain": "d1.com"}]},
        "/bin/ip": "default via 1.2.3.1 dev eth0\n1.2.3.0/23 dev eth0 src 1.2.3.5\n",
        "/bin/hostname": "test-router\n",
    }))
    .unwrap()
}

fn request(url: &str) -> HttpRequest {
    HttpRequest::get(url::Url::parse(url).unwrap())
}

mod table {
    use super::*;

    #[test]
    fn exact_key_matches() {
        assert!(sample().get("domains").is_some());
    }

    #[test]
    fn program_path_matches_by_basename() {
        let table = sample();

        assert!(table.get("ip").is_some());
        assert_eq!(table.hostname().as_deref(), Some("test-router"));
    }

    #[test]
    fn unknown_key_is_none() {
        assert!(sample().get("records").is_none());
    }

    #[test]
    fn text_renders_objects_as_json() {
        let text = sample().text("domains").unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["data"][0]["domain"], "d1.com");
    }

    #[test]
    fn routes_serve_canned_table() {
        let routes = sample().routes();

        assert!(routes.dump().unwrap().starts_with("default"));
        assert_eq!(detect_current_ip(&routes), Some("1.2.3.5".parse().unwrap()));
    }

    #[test]
    fn missing_routes_mean_unknown_ip() {
        let table = ReplayTable::from_entries([("domains", json!({}))]);

        assert_eq!(detect_current_ip(&table.routes()), None);
    }
}

mod client {
    use super::*;

    #[tokio::test]
    async fn serves_entry_for_last_path_segment() {
        let client = ReplayClient::new(sample());

        let response = client
            .request(request("https://api.linode.com/v4/domains?page=1"))
            .await
            .unwrap();

        assert!(response.is_success());
        assert!(response.text().contains("d1.com"));
    }

    #[tokio::test]
    async fn missing_entry_fails_without_network() {
        let client = ReplayClient::new(sample());

        let result = client
            .request(request("https://api.linode.com/v4/domains/1/records"))
            .await;

        assert!(matches!(result, Err(HttpError::NoReplay { key }) if key == "records"));
    }
}
