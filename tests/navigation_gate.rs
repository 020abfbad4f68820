use chat_shell::{
    is_allowed_host, is_web_url, should_open_externally, Allowlist, Decision, NavigationEvent,
    NavigationGate,
};
use url::Url;

fn gate() -> NavigationGate {
    NavigationGate::new(Allowlist::default())
}

#[test]
fn chat_home_stays_in_app() {
    assert!(!gate().should_open_externally("https://chatgpt.com/"));
}

#[test]
fn auth_subdomain_stays_in_app() {
    assert!(!gate().should_open_externally("https://auth.openai.com/login"));
}

#[test]
fn unknown_site_goes_external() {
    assert!(gate().should_open_externally("https://evil.com/phish"));
}

#[test]
fn plain_http_goes_external_even_when_allowlisted() {
    assert!(gate().should_open_externally("http://chatgpt.com/"));
}

#[test]
fn lookalike_domain_goes_external() {
    assert!(gate().should_open_externally("https://notchatgpt.com/"));
    assert!(gate().should_open_externally("https://evilchatgpt.com/"));
}

#[test]
fn blob_upload_url_stays_in_app() {
    assert!(!gate().should_open_externally("blob:https://chatgpt.com/abcd-1234"));
}

#[test]
fn every_entry_and_its_subdomains_are_allowed() {
    let list = Allowlist::default();
    for entry in list.entries() {
        assert!(is_allowed_host(&format!("https://{entry}/"), &list));
        assert!(is_allowed_host(&format!("https://sub.{entry}/x"), &list));
        assert!(!is_allowed_host(&format!("https://evil{entry}/"), &list));
        assert!(!is_allowed_host(&format!("http://{entry}/"), &list));
    }
}

#[test]
fn malformed_strings_are_neither_allowed_nor_redirected() {
    let list = Allowlist::default();
    assert!(!is_allowed_host("not a url", &list));
    assert!(!should_open_externally("not a url", &list));
}

#[test]
fn non_web_schemes_are_never_redirected() {
    let list = Allowlist::default();
    for url in [
        "mailto:support@evil.com",
        "blob:https://evil.com/1",
        "file:///home/user/upload.png",
    ] {
        assert!(!is_web_url(&Url::parse(url).unwrap()), "{url}");
        assert!(!should_open_externally(url, &list), "{url}");
    }
}

#[test]
fn decisions_are_repeatable_across_threads() {
    let gate = gate();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let gate = gate.clone();
            std::thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        let url = if i % 2 == 0 {
                            "https://chatgpt.com/c/1"
                        } else {
                            "https://evil.com/"
                        };
                        gate.decide(url, NavigationEvent::Redirect)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let decisions = handle.join().unwrap();
        for (i, decision) in decisions.into_iter().enumerate() {
            let expected = if i % 2 == 0 {
                Decision::AllowInPlace
            } else {
                Decision::DenyAndRedirectExternal
            };
            assert_eq!(decision, expected);
        }
    }
}
