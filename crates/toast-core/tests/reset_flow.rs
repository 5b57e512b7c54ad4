use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use toast_core::{
    BrowsingContext, BrowsingContexts, BrowsingData, Config, ContentSettings, CookieRecord,
    CookieStore, DataKinds, HostApis, Message, Origin, PermissionState, PermissionType,
    ResetError, ResetLevel, ResetPayload, ResetRequest, Scope, SiteResetter,
};

/// Browser double with a cookie jar, content settings and call counters
#[derive(Default)]
struct FakeBrowser {
    active_url: Mutex<Option<String>>,
    cookies: Mutex<Vec<CookieRecord>>,
    rules: Mutex<HashMap<(String, PermissionType), PermissionState>>,
    data_removals: Mutex<Vec<(String, DataKinds)>>,
    cookie_calls: AtomicUsize,
    data_calls: AtomicUsize,
    permission_calls: AtomicUsize,
}

impl FakeBrowser {
    fn on(url: &str) -> Arc<Self> {
        let browser = FakeBrowser::default();
        *browser.active_url.lock() = Some(url.to_string());
        Arc::new(browser)
    }

    fn set_cookie(&self, name: &str, domain: &str, path: &str) {
        self.cookies
            .lock()
            .push(CookieRecord::new(name, domain, path));
    }

    fn host_calls(&self) -> usize {
        self.cookie_calls.load(Ordering::SeqCst)
            + self.data_calls.load(Ordering::SeqCst)
            + self.permission_calls.load(Ordering::SeqCst)
    }
}

fn host_of(url: &str) -> String {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    rest.split('/').next().unwrap_or(rest).to_string()
}

#[async_trait]
impl BrowsingContexts for FakeBrowser {
    async fn active_context(&self) -> Option<BrowsingContext> {
        self.active_url.lock().clone().map(|url| BrowsingContext {
            id: "tab-1".to_string(),
            url: Some(url),
        })
    }
}

#[async_trait]
impl CookieStore for FakeBrowser {
    async fn get_all(&self, url: &str) -> toast_cookies::Result<Vec<CookieRecord>> {
        self.cookie_calls.fetch_add(1, Ordering::SeqCst);
        // Suspend like a real host call so concurrent resets can interleave
        tokio::task::yield_now().await;
        let host = host_of(url);
        Ok(self
            .cookies
            .lock()
            .iter()
            .filter(|c| {
                let bare = c.bare_domain();
                host == bare || (c.domain.starts_with('.') && host.ends_with(&format!(".{}", bare)))
            })
            .cloned()
            .collect())
    }

    async fn remove(
        &self,
        url: &str,
        name: &str,
        _store_id: Option<&str>,
    ) -> toast_cookies::Result<bool> {
        self.cookie_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let host = host_of(url);
        let mut cookies = self.cookies.lock();
        let len = cookies.len();
        cookies.retain(|c| !(c.name == name && c.bare_domain() == host));
        Ok(cookies.len() < len)
    }
}

#[async_trait]
impl BrowsingData for FakeBrowser {
    async fn remove(&self, origin: &Origin, kinds: &DataKinds) -> toast_privacy::Result<()> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);
        self.data_removals.lock().push((origin.to_string(), *kinds));
        Ok(())
    }
}

#[async_trait]
impl ContentSettings for FakeBrowser {
    async fn set(
        &self,
        permission: PermissionType,
        pattern: &str,
        state: PermissionState,
    ) -> toast_privacy::Result<()> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        self.rules
            .lock()
            .insert((pattern.to_string(), permission), state);
        Ok(())
    }
}

fn resetter(browser: &Arc<FakeBrowser>) -> SiteResetter {
    resetter_with(browser, Config::default())
}

fn resetter_with(browser: &Arc<FakeBrowser>, config: Config) -> SiteResetter {
    SiteResetter::new(
        config,
        HostApis {
            contexts: browser.clone(),
            cookies: browser.clone(),
            browsing_data: browser.clone(),
            content_settings: browser.clone(),
        },
    )
}

#[tokio::test]
async fn unsupported_page_touches_nothing() {
    let browser = FakeBrowser::on("chrome://settings");
    browser.set_cookie("sid", ".example.com", "/");
    let resetter = resetter(&browser);

    let request =
        ResetRequest::with_level("chrome://settings/privacy", Scope::Family, ResetLevel::Dark);
    let result = resetter.reset(&request).await;

    assert!(matches!(result, Err(ResetError::UnsupportedUrl(_))));
    assert_eq!(browser.cookie_calls.load(Ordering::SeqCst), 0);
    assert_eq!(browser.data_calls.load(Ordering::SeqCst), 0);
    assert_eq!(browser.permission_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn all_flags_off_reports_nothing_ran() {
    let browser = FakeBrowser::on("https://example.com/");
    browser.set_cookie("sid", "example.com", "/");
    let resetter = resetter(&browser);

    let report = resetter
        .reset(&ResetRequest::new("https://example.com/", Scope::Family))
        .await
        .unwrap();

    assert!(!report.cookies.ran);
    assert_eq!(report.cookies.before, 0);
    assert_eq!(report.cookies.cleared, 0);
    assert!(!report.storage.ran && !report.storage.cleared);
    assert!(!report.service_workers.ran && !report.service_workers.cleared);
    assert!(!report.permissions.ran && !report.permissions.reset);
    assert_eq!(browser.host_calls(), 0);
    assert_eq!(browser.cookies.lock().len(), 1);
}

#[tokio::test]
async fn family_dark_reset() {
    let browser = FakeBrowser::on("https://mail.proton.me/u/0/inbox");
    browser.set_cookie("session", ".proton.me", "/");
    browser.set_cookie("login_state", ".proton.me", "/login");
    browser.set_cookie("mail_ui", "mail.proton.me", "/");
    browser.set_cookie("other", "example.com", "/");
    browser.rules.lock().insert(
        ("https://mail.proton.me/*".to_string(), PermissionType::Notifications),
        PermissionState::Allow,
    );
    let resetter = resetter(&browser);

    let report = resetter
        .reset_active(ResetPayload::from_level(ResetLevel::Dark, Scope::Family))
        .await
        .unwrap();

    assert_eq!(report.origin_touched, "https://mail.proton.me");
    assert_eq!(report.hostname, "mail.proton.me");
    assert_eq!(report.scope_used, Scope::Family);
    assert_eq!(report.cookies.before, 2 * 6 + 1);
    assert_eq!(report.cookies.cleared, 3);
    assert!(report.cookies.cleared <= report.cookies.before);
    assert!(report.storage.cleared);
    assert!(report.service_workers.cleared);
    assert!(report.permissions.reset);

    let remaining: Vec<String> = browser.cookies.lock().iter().map(|c| c.name.clone()).collect();
    assert_eq!(remaining, vec!["other".to_string()]);

    let removals = browser.data_removals.lock();
    assert_eq!(removals.len(), 6);
    assert!(removals
        .iter()
        .all(|(_, kinds)| kinds.local_storage && kinds.service_workers));

    assert_eq!(
        browser
            .rules
            .lock()
            .get(&("https://mail.proton.me/*".to_string(), PermissionType::Notifications)),
        Some(&PermissionState::Ask)
    );
    assert_eq!(browser.rules.lock().len(), 6 * 4);
}

#[tokio::test]
async fn second_reset_finds_no_cookies() {
    let browser = FakeBrowser::on("https://example.com/");
    browser.set_cookie("a", "example.com", "/");
    browser.set_cookie("b", ".example.com", "/account");
    let resetter = resetter(&browser);

    let request =
        ResetRequest::new("https://www.example.com/", Scope::Family).with_cookies(true);

    let first = resetter.reset(&request).await.unwrap();
    assert_eq!(first.cookies.cleared, 2);

    let second = resetter.reset(&request).await.unwrap();
    assert_eq!(second.cookies.before, 0);
    assert_eq!(second.cookies.cleared, 0);
}

#[tokio::test]
async fn message_bridge_round_trip() {
    let browser = FakeBrowser::on("https://www.example.com/cart");
    browser.set_cookie("cart", "www.example.com", "/");
    let resetter = resetter(&browser);

    let reply = resetter
        .handle_json(r#"{"type":"RESET_NOW","payload":{"scope":"origin","wipeCookies":true,"wipeSW":true}}"#)
        .await
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&reply).unwrap();

    assert_eq!(json["ok"], true);
    assert_eq!(json["scopeUsed"], "origin");
    assert_eq!(json["cookies"]["cleared"], 1);
    assert_eq!(json["serviceWorkers"]["ran"], true);
    assert_eq!(json["storage"]["ran"], false);
    assert_eq!(json["permissions"]["ran"], false);

    let ignored = resetter
        .handle_json(r#"{"type":"PING"}"#)
        .await
        .unwrap();
    assert!(ignored.is_none());
}

#[tokio::test]
async fn message_bridge_reports_failures() {
    let browser = FakeBrowser::on("chrome-extension://abcdef/popup.html");
    let resetter = resetter(&browser);

    let response = resetter
        .handle_message(Message::reset_now(ResetPayload::from_level(
            ResetLevel::Dark,
            Scope::Origin,
        )))
        .await
        .unwrap();

    assert!(!response.ok);
    assert!(response.report.is_none());
    assert!(response.error.unwrap().starts_with("Unsupported URL"));
    assert_eq!(browser.host_calls(), 0);

    let idle = Arc::new(FakeBrowser::default());
    let response = resetter_with(&idle, Config::default())
        .handle_message(Message::reset_now(ResetPayload::default()))
        .await
        .unwrap();
    assert_eq!(response.error.as_deref(), Some("No active tab"));
}

#[tokio::test]
async fn foreign_messages_are_ignored_whatever_their_payload() {
    let browser = FakeBrowser::on("https://example.com/");
    let resetter = resetter(&browser);

    for raw in [
        r#"{"type":"GET_SETTINGS","payload":"x"}"#,
        r#"{"type":"SAVE_SETTINGS","payload":{"scope":42}}"#,
    ] {
        assert_eq!(resetter.handle_json(raw).await.unwrap(), None, "{}", raw);
    }
    assert_eq!(browser.host_calls(), 0);
}

#[tokio::test]
async fn malformed_reset_payload_is_answered_with_failure() {
    let browser = FakeBrowser::on("https://example.com/");
    browser.set_cookie("sid", ".example.com", "/");
    let resetter = resetter(&browser);

    let reply = resetter
        .handle_json(r#"{"type":"RESET_NOW","payload":{"scope":"subdomains","wipeCookies":true}}"#)
        .await
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&reply).unwrap();

    assert_eq!(json["ok"], false);
    assert!(json["error"].as_str().unwrap().contains("subdomains"));
    assert_eq!(browser.host_calls(), 0);
    assert_eq!(browser.cookies.lock().len(), 1);
}

#[tokio::test]
async fn missing_payload_uses_configured_scope() {
    let browser = FakeBrowser::on("https://app.example.com/");
    let config = Config {
        default_scope: Scope::Family,
        ..Default::default()
    };
    let resetter = resetter_with(&browser, config);

    let reply = resetter
        .handle_json(r#"{"type":"RESET_NOW"}"#)
        .await
        .unwrap()
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&reply).unwrap();

    assert_eq!(json["ok"], true);
    assert_eq!(json["scopeUsed"], "family");
    assert_eq!(json["cookies"]["ran"], false);
    assert_eq!(browser.host_calls(), 0);
}

#[tokio::test]
async fn keyboard_shortcut_runs_family_dark_reset() {
    let browser = FakeBrowser::on("https://auth.example.com/sso");
    browser.set_cookie("sso", ".example.com", "/");
    let resetter = resetter(&browser);

    assert!(resetter.run_command("reset-current-site").await);
    assert!(browser.cookies.lock().is_empty());
    assert_eq!(browser.data_removals.lock().len(), 6);
    assert_eq!(browser.rules.lock().len(), 6 * 4);

    assert!(!resetter.run_command("open-popup").await);
}

#[tokio::test]
async fn keyboard_shortcut_swallows_errors() {
    let browser = FakeBrowser::on("about:blank");
    let resetter = resetter(&browser);

    assert!(resetter.run_command("reset-current-site").await);
    assert_eq!(browser.host_calls(), 0);
}

fn five_cookie_site() -> Arc<FakeBrowser> {
    let browser = FakeBrowser::on("https://example.com/");
    for i in 0..5 {
        browser.set_cookie(&format!("c{}", i), ".example.com", "/");
    }
    browser
}

#[tokio::test]
async fn concurrent_resets_of_one_site_run_one_after_another() {
    let browser = five_cookie_site();
    let resetter = resetter(&browser);

    let request = ResetRequest::new("https://example.com/", Scope::Family).with_cookies(true);
    let (a, b) = tokio::join!(resetter.reset(&request), resetter.reset(&request));
    let (a, b) = (a.unwrap(), b.unwrap());

    // One run sees and clears every cookie, the other starts on an empty jar
    assert_ne!(a.cookies.before == 0, b.cookies.before == 0);
    let (first, second) = if a.cookies.before > 0 { (a, b) } else { (b, a) };
    assert_eq!(first.cookies.before, 5 * 6);
    assert_eq!(first.cookies.cleared, 5);
    assert_eq!(first.cookies.failed, 0);
    assert_eq!(second.cookies.unique, 0);
    assert_eq!(second.cookies.cleared, 0);
    assert!(browser.cookies.lock().is_empty());
}

#[tokio::test]
async fn unserialized_resets_of_one_site_overlap() {
    let browser = five_cookie_site();
    let config = Config {
        serialize_same_site: false,
        ..Default::default()
    };
    let resetter = resetter_with(&browser, config);

    let request = ResetRequest::new("https://example.com/", Scope::Family).with_cookies(true);
    let (a, b) = tokio::join!(resetter.reset(&request), resetter.reset(&request));
    let (a, b) = (a.unwrap(), b.unwrap());

    // Both runs enumerate the full jar and race on every removal
    assert_eq!(a.cookies.before, 5 * 6);
    assert_eq!(b.cookies.before, 5 * 6);
    assert_eq!(a.cookies.cleared + b.cookies.cleared, 5);
    assert_eq!(a.cookies.failed + b.cookies.failed, 5);
    assert!(browser.cookies.lock().is_empty());
}
