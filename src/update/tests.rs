//! Tests for the scheduled update run.

use std::net::Ipv4Addr;
use std::path::Path;

use serde_json::json;
use tempfile::{TempDir, tempdir};

use super::{UpdateError, UpdateOutcome, Updater};
use crate::api::mock::MockClient;
use crate::api::{ApiError, HttpResponse, LinodeClient};
use crate::config::{CommitMode, ConfigError};
use crate::event_log::EventLog;
use crate::network::StaticRoutes;
use crate::state::mock::MemoryLastIp;
use crate::time::tests::MockClock;

const TOKEN: &str = "1234567890123456789012345678901234567890123456789012345678901234";

const ROUTES: &str = "\
default via 192.168.0.1 dev eth0
192.168.0.0/24 dev eth0 proto kernel scope link src 1.2.3.5
10.0.0.0/8 dev wg0 proto kernel scope link src 10.1.1.1 linkdown
";

const CURRENT: Ipv4Addr = Ipv4Addr::new(1, 2, 3, 5);

struct Fixture {
    dir: TempDir,
    mock: MockClient,
    store: MemoryLastIp,
}

impl Fixture {
    fn new(store: MemoryLastIp) -> Self {
        Self {
            dir: tempdir().unwrap(),
            mock: MockClient::default(),
            store,
        }
    }

    fn with_mock(mut self, mock: MockClient) -> Self {
        self.mock = mock;
        self
    }

    fn log_path(&self) -> std::path::PathBuf {
        self.dir.path().join("messages")
    }

    fn log_text(&self) -> String {
        std::fs::read_to_string(self.log_path()).unwrap_or_default()
    }

    fn updater(
        &self,
        routes: &str,
        commit: CommitMode,
        persist: bool,
    ) -> Updater<&MockClient, StaticRoutes, &MemoryLastIp, MockClock> {
        let client = LinodeClient::new(&self.mock, TOKEN, commit).unwrap();
        let log =
            EventLog::new(self.log_path(), "test-router").with_clock(MockClock::new(1_700_000_000));
        Updater::new(client, StaticRoutes::new(routes), &self.store, log, persist)
    }
}

fn records(list: &[&str]) -> Vec<String> {
    list.iter().map(|r| (*r).to_string()).collect()
}

fn settings_path() -> &'static Path {
    Path::new("/cfg/linode-ddns.json")
}

mod preconditions {
    use super::*;

    #[tokio::test]
    async fn missing_records_fail_before_anything_else() {
        let fx = Fixture::new(MemoryLastIp::empty());

        let err = fx
            .updater(ROUTES, CommitMode::Commit, true)
            .run(&[], settings_path())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UpdateError::Config(ConfigError::MissingRecords { .. })
        ));
        assert_eq!(
            err.to_string(),
            "Records not configured in /cfg/linode-ddns.json"
        );
        assert!(fx.mock.captured().is_empty());
        assert!(fx.store.saved().is_empty());
    }

    #[tokio::test]
    async fn undetectable_ip_does_nothing() {
        let fx = Fixture::new(MemoryLastIp::empty());

        let outcome = fx
            .updater("", CommitMode::Commit, true)
            .run(&records(&["1/records/3"]), settings_path())
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Undetected);
        assert!(fx.mock.captured().is_empty());
        assert!(fx.store.saved().is_empty());
        assert!(!fx.log_path().exists());
    }

    #[tokio::test]
    async fn unchanged_ip_does_nothing() {
        let fx = Fixture::new(MemoryLastIp::with_ip(CURRENT));

        let outcome = fx
            .updater(ROUTES, CommitMode::Commit, true)
            .run(&records(&["1/records/3"]), settings_path())
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged(CURRENT));
        assert!(fx.mock.captured().is_empty());
        assert!(fx.store.saved().is_empty());
        assert!(!fx.log_path().exists());
    }
}

mod simulate {
    use super::*;

    #[tokio::test]
    async fn describes_each_put_in_order() {
        let fx = Fixture::new(MemoryLastIp::with_ip(Ipv4Addr::new(1, 2, 3, 4)));

        let outcome = fx
            .updater(ROUTES, CommitMode::Simulate, false)
            .run(&records(&["1/records/3", "2/records/4"]), settings_path())
            .await
            .unwrap();

        let UpdateOutcome::Updated(report) = outcome else {
            panic!("expected an update, got {outcome:?}");
        };
        assert_eq!(report.ip, CURRENT);
        assert_eq!(
            report.notices,
            [
                r#"Would PUT domains/1/records/3 {"target":"1.2.3.5"}"#,
                r#"Would PUT domains/2/records/4 {"target":"1.2.3.5"}"#,
            ]
        );
        assert!(fx.mock.captured().is_empty());
    }

    #[tokio::test]
    async fn logs_would_be_updated_and_keeps_last_ip() {
        let fx = Fixture::new(MemoryLastIp::empty());

        fx.updater(ROUTES, CommitMode::Simulate, false)
            .run(&records(&["1/records/3"]), settings_path())
            .await
            .unwrap();

        assert!(
            fx.log_text()
                .trim_end()
                .ends_with("test-router linode-ddns: Home IP would be updated to 1.2.3.5")
        );
        assert!(fx.store.saved().is_empty());
    }

    #[tokio::test]
    async fn forced_save_writes_last_ip() {
        let fx = Fixture::new(MemoryLastIp::empty());

        fx.updater(ROUTES, CommitMode::Simulate, true)
            .run(&records(&["1/records/3", "2/records/4"]), settings_path())
            .await
            .unwrap();

        assert_eq!(
            fx.store.saved(),
            [(CURRENT, "1/records/3 2/records/4".to_string())]
        );
    }
}

mod commit {
    use super::*;

    #[tokio::test]
    async fn puts_target_to_every_record() {
        let fx = Fixture::new(MemoryLastIp::empty());

        let outcome = fx
            .updater(ROUTES, CommitMode::Commit, true)
            .run(&records(&["1/records/3", "2/records/4"]), settings_path())
            .await
            .unwrap();

        let requests = fx.mock.captured();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, http::Method::PUT);
        assert_eq!(
            requests[0].url.as_str(),
            "https://api.linode.com/v4/domains/1/records/3"
        );
        assert_eq!(
            requests[1].url.as_str(),
            "https://api.linode.com/v4/domains/2/records/4"
        );
        let body: serde_json::Value =
            serde_json::from_slice(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"target": "1.2.3.5"}));

        let UpdateOutcome::Updated(report) = outcome else {
            panic!("expected an update, got {outcome:?}");
        };
        assert!(report.notices.is_empty());
        assert_eq!(report.to_string(), "Home IP updated to 1.2.3.5");
        assert!(fx.log_text().contains("linode-ddns: Home IP updated to 1.2.3.5"));
        assert_eq!(
            fx.store.saved(),
            [(CURRENT, "1/records/3 2/records/4".to_string())]
        );
    }

    #[tokio::test]
    async fn duplicate_records_are_each_updated() {
        let fx = Fixture::new(MemoryLastIp::empty());

        fx.updater(ROUTES, CommitMode::Commit, true)
            .run(&records(&["1/records/3", "1/records/3"]), settings_path())
            .await
            .unwrap();

        assert_eq!(fx.mock.captured().len(), 2);
    }

    #[tokio::test]
    async fn failed_put_stops_the_run() {
        let fx = Fixture::new(MemoryLastIp::empty()).with_mock(MockClient::new(vec![
            Ok(HttpResponse::ok(b"{}".to_vec())),
            Ok(HttpResponse::new(
                http::StatusCode::INTERNAL_SERVER_ERROR,
                http::HeaderMap::new(),
                b"{}".to_vec(),
            )),
        ]));

        let err = fx
            .updater(ROUTES, CommitMode::Commit, true)
            .run(
                &records(&["1/records/3", "2/records/4", "2/records/5"]),
                settings_path(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::Api(ApiError::Status { .. })));
        assert_eq!(fx.mock.captured().len(), 2);
        assert!(fx.store.saved().is_empty());
        assert!(!fx.log_path().exists());
    }
}
