//! Tests for the transport value types.

use serde_json::json;

use super::{HttpError, HttpRequest, HttpResponse};

fn url(s: &str) -> url::Url {
    url::Url::parse(s).unwrap()
}

mod request {
    use super::*;

    #[test]
    fn get_has_no_body() {
        let req = HttpRequest::get(url("https://api.linode.com/v4/domains"));

        assert_eq!(req.method, http::Method::GET);
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn put_json_serializes_compactly() {
        let req = HttpRequest::put_json(
            url("https://api.linode.com/v4/domains/1/records/3"),
            &json!({"target": "1.2.3.5"}),
        );

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.body.as_deref(), Some(br#"{"target":"1.2.3.5"}"#.as_slice()));
    }

    #[test]
    fn repeated_header_keeps_both_values() {
        let req = HttpRequest::get(url("https://example.com/"))
            .with_header(http::header::ACCEPT, http::HeaderValue::from_static("text/html"))
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn query_params_are_encoded() {
        let params = [
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "a b".to_string()),
        ];

        let req = HttpRequest::get(url("https://example.com/v4/domains")).with_query(&params);

        assert_eq!(req.url.query(), Some("page=2&q=a+b"));
    }

    #[test]
    fn no_params_leave_url_alone() {
        let req = HttpRequest::get(url("https://example.com/v4/domains")).with_query(&[]);

        assert_eq!(req.url.as_str(), "https://example.com/v4/domains");
    }

    #[test]
    fn resource_is_last_path_segment() {
        let listing = HttpRequest::get(url("https://api.linode.com/v4/domains/1/records?page=2"));
        let record = HttpRequest::put_json(
            url("https://api.linode.com/v4/domains/1/records/3"),
            &json!({}),
        );
        let trailing = HttpRequest::get(url("https://api.linode.com/v4/domains/"));

        assert_eq!(listing.resource(), "records");
        assert_eq!(record.resource(), "3");
        assert_eq!(trailing.resource(), "domains");
    }
}

mod response {
    use super::*;

    #[test]
    fn ok_is_success() {
        let resp = HttpResponse::ok(b"{}".to_vec());

        assert!(resp.is_success());
        assert_eq!(resp.text(), "{}");
    }

    #[test]
    fn error_statuses_are_not_success() {
        for status in [
            http::StatusCode::UNAUTHORIZED,
            http::StatusCode::NOT_FOUND,
            http::StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let resp = HttpResponse::new(status, http::HeaderMap::new(), vec![]);
            assert!(!resp.is_success(), "{status} must not count as success");
        }
    }

    #[test]
    fn whitespace_body_is_blank() {
        assert!(HttpResponse::ok(b" \n".to_vec()).is_blank());
        assert!(HttpResponse::ok(Vec::new()).is_blank());
        assert!(!HttpResponse::ok(b"{}".to_vec()).is_blank());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let resp = HttpResponse::ok(vec![b'o', b'k', 0xFF]);

        assert_eq!(resp.text(), "ok\u{FFFD}");
    }
}

mod error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_keeps_source() {
        let error = HttpError::Connection(Box::new(std::io::Error::other("network unavailable")));

        assert!(error.to_string().starts_with("Connection error"));
        assert_eq!(error.source().unwrap().to_string(), "network unavailable");
    }

    #[test]
    fn no_replay_names_the_key() {
        let error = HttpError::NoReplay {
            key: "records".to_string(),
        };

        assert_eq!(error.to_string(), "No canned response for 'records'");
    }
}
