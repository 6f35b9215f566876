use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use rulesync::models::{BundleConfig, RuleSource};
use rulesync::utils::RuleFetcher;
use rulesync::{SyncError, SyncEvent, SyncOptions, SyncSettings, SyncSummary, Syncer};
use tempfile::tempdir;

/// In-memory upstream that records every URL it is asked for
struct MapFetcher {
    bodies: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl MapFetcher {
    fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            requested: RefCell::new(Vec::new()),
        }
    }

    fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl RuleFetcher for MapFetcher {
    fn fetch_text(&self, url: &str) -> rulesync::Result<String> {
        self.requested.borrow_mut().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| SyncError::Config(format!("no upstream for {}", url)))
    }
}

fn settings() -> SyncSettings {
    SyncSettings {
        local_rules: vec!["rules/whitelist_direct.list".to_string()],
        bundle: BundleConfig {
            path: "rules/google-gemini.list".to_string(),
            label: "Google + Gemini bundle".to_string(),
            members: vec![
                "mem://google".to_string(),
                "mem://gemini".to_string(),
                "mem://fcm".to_string(),
            ],
        },
        sources: vec![
            RuleSource::new("rules/telegram.list", "mem://telegram", "Upstream telegram"),
            RuleSource::new("rules/gemini_ip.list", "", "Manual"),
            RuleSource::new("rules/youtube.list", "mem://youtube", "Upstream youtube"),
        ],
        ..SyncSettings::default()
    }
}

fn upstream() -> MapFetcher {
    MapFetcher::new(&[
        (
            "mem://google",
            "# NAME: Google\nDOMAIN-SUFFIX,example.com\nDOMAIN-KEYWORD,google\n",
        ),
        (
            "mem://gemini",
            "[Rule]\nDOMAIN-SUFFIX,example.com\nDOMAIN,www.google.com\n",
        ),
        ("mem://fcm", "; fcm\nDOMAIN-KEYWORD,googleapis\nIP-CIDR,8.8.8.0/24\n"),
        ("mem://telegram", "# Telegram\nIP-CIDR,91.108.4.0/22,no-resolve\n"),
        ("mem://youtube", "DOMAIN-SUFFIX,youtube.com\n"),
    ])
}

fn no_pull() -> SyncOptions {
    SyncOptions { pull: false }
}

#[test]
fn test_end_to_end_bundle() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();
    let syncer = Syncer::new(&settings, &fetcher, dir.path());

    syncer.run(no_pull(), |_| {}).unwrap();

    let bundle = fs::read_to_string(dir.path().join("rules/google-gemini.list")).unwrap();
    let mut lines = bundle.lines();
    assert_eq!(lines.next(), Some("# Google + Gemini bundle"));
    assert!(lines.next().unwrap().starts_with("# Generated: "));
    assert_eq!(
        lines.collect::<Vec<_>>(),
        vec![
            "DOMAIN-KEYWORD,google",
            "DOMAIN-SUFFIX,example.com",
            "IP-CIDR,8.8.8.0/24",
        ]
    );
}

#[test]
fn test_sources_written_verbatim() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();

    Syncer::new(&settings, &fetcher, dir.path())
        .run(no_pull(), |_| {})
        .unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("rules/telegram.list")).unwrap(),
        "# Telegram\nIP-CIDR,91.108.4.0/22,no-resolve\n"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("rules/youtube.list")).unwrap(),
        "DOMAIN-SUFFIX,youtube.com\n"
    );
}

#[test]
fn test_status_events_in_order() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();
    let mut events = Vec::new();

    let summary = Syncer::new(&settings, &fetcher, dir.path())
        .run(no_pull(), |event| events.push(event.to_string()))
        .unwrap();

    assert_eq!(
        events,
        vec![
            "Skipping rules/whitelist_direct.list: local manual list",
            "Updated rules/google-gemini.list (Google + Gemini bundle)",
            "Updated rules/telegram.list (Upstream telegram)",
            "Skipping rules/gemini_ip.list: missing URL",
            "Updated rules/youtube.list (Upstream youtube)",
        ]
    );
    assert_eq!(
        summary,
        SyncSummary {
            updated: 3,
            unchanged: 0,
            skipped: 2
        }
    );
}

#[test]
fn test_second_run_reports_no_changes() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();
    let syncer = Syncer::new(&settings, &fetcher, dir.path());

    syncer.run(no_pull(), |_| {}).unwrap();
    let telegram = fs::read(dir.path().join("rules/telegram.list")).unwrap();

    let mut events = Vec::new();
    let summary = syncer.run(no_pull(), |event| events.push(event.clone())).unwrap();

    assert_eq!(summary.updated, 0);
    assert_eq!(summary.unchanged, 3);
    assert!(events.contains(&SyncEvent::Unchanged {
        path: "rules/google-gemini.list".to_string()
    }));
    assert_eq!(
        fs::read(dir.path().join("rules/telegram.list")).unwrap(),
        telegram
    );
}

#[test]
fn test_missing_url_never_fetched_or_written() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();

    Syncer::new(&settings, &fetcher, dir.path())
        .run(no_pull(), |_| {})
        .unwrap();

    assert!(!dir.path().join("rules/gemini_ip.list").exists());
    assert_eq!(
        fetcher.requested(),
        vec![
            "mem://google",
            "mem://gemini",
            "mem://fcm",
            "mem://telegram",
            "mem://youtube",
        ]
    );
}

#[test]
fn test_local_lists_left_untouched() {
    let dir = tempdir().unwrap();
    let local = dir.path().join("rules/whitelist_direct.list");
    fs::create_dir_all(local.parent().unwrap()).unwrap();
    fs::write(&local, "DOMAIN-SUFFIX,local.example\n").unwrap();

    let settings = settings();
    let fetcher = upstream();
    Syncer::new(&settings, &fetcher, dir.path())
        .run(no_pull(), |_| {})
        .unwrap();

    assert_eq!(
        fs::read_to_string(&local).unwrap(),
        "DOMAIN-SUFFIX,local.example\n"
    );
}

#[test]
fn test_fetch_failure_aborts_remaining_sources() {
    let dir = tempdir().unwrap();
    let mut settings = settings();
    settings.sources[0] = RuleSource::new("rules/telegram.list", "mem://offline", "Offline");
    let fetcher = upstream();
    let mut events = Vec::new();

    let result = Syncer::new(&settings, &fetcher, dir.path())
        .run(no_pull(), |event| events.push(event.clone()));

    assert!(result.is_err());
    assert_eq!(events.len(), 2);
    assert!(dir.path().join("rules/google-gemini.list").exists());
    assert!(!dir.path().join("rules/telegram.list").exists());
    assert!(!dir.path().join("rules/youtube.list").exists());
    assert!(!fetcher.requested().contains(&"mem://youtube".to_string()));
}

#[test]
fn test_bundle_failure_aborts_before_sources() {
    let dir = tempdir().unwrap();
    let mut settings = settings();
    settings.bundle.members.push("mem://offline".to_string());
    let fetcher = upstream();

    let result = Syncer::new(&settings, &fetcher, dir.path()).run(no_pull(), |_| {});

    assert!(result.is_err());
    assert!(!dir.path().join("rules/google-gemini.list").exists());
    assert!(!dir.path().join("rules/telegram.list").exists());
}

#[test]
fn test_pull_skipped_outside_repository() {
    let dir = tempdir().unwrap();
    let settings = settings();
    let fetcher = upstream();
    let mut events = Vec::new();

    Syncer::new(&settings, &fetcher, dir.path())
        .run(SyncOptions::default(), |event| events.push(event.clone()))
        .unwrap();

    assert_eq!(events[0], SyncEvent::PullSkipped);
}
