use regadmin::{
    provision_page, MemoryOptions, MemoryPages, NewPage, OptionsStore, PageSpec, PageStatus,
    PageStore,
};
use serde_json::json;

fn signup_spec() -> PageSpec {
    PageSpec {
        slug: "signup".to_string(),
        option: Some("regadmin_signup_page".to_string()),
        title: "Sign Up".to_string(),
        content: String::new(),
        parent: 0,
    }
}

fn new_page(slug: &str, content: &str) -> NewPage {
    NewPage {
        slug: slug.to_string(),
        title: slug.to_string(),
        content: content.to_string(),
        parent: 0,
    }
}

#[test]
fn provisioning_twice_creates_one_page() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let spec = signup_spec();

    let first = provision_page(&pages, &options, &spec).expect("provision");
    let second = provision_page(&pages, &options, &spec).expect("provision");

    assert_eq!(first, second);
    assert_eq!(pages.count(), 1);
    assert_eq!(
        options.get("regadmin_signup_page").expect("option"),
        Some(json!(first))
    );
}

#[test]
fn reuses_live_page_matching_slug() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let existing = pages.insert(new_page("signup", ""), PageStatus::Publish);

    let id = provision_page(&pages, &options, &signup_spec()).expect("provision");

    assert_eq!(id, existing);
    assert_eq!(pages.count(), 1);
    assert_eq!(
        options.get("regadmin_signup_page").expect("option"),
        Some(json!(existing))
    );
}

#[test]
fn content_fragment_takes_precedence_over_slug() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let existing = pages.insert(
        new_page("legacy-signup", "intro [registration_form] outro"),
        PageStatus::Publish,
    );

    let mut spec = signup_spec();
    spec.content = "[registration_form]".to_string();

    let id = provision_page(&pages, &options, &spec).expect("provision");
    assert_eq!(id, existing);
    assert_eq!(pages.count(), 1);
}

#[test]
fn trashed_page_is_restored_not_duplicated() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let trashed = pages.insert(new_page("signup", ""), PageStatus::Trash);

    let id = provision_page(&pages, &options, &signup_spec()).expect("provision");

    assert_eq!(id, trashed);
    assert_eq!(pages.count(), 1);
    let record = pages.page(id).expect("page").expect("record");
    assert_eq!(record.status, PageStatus::Publish);
}

#[test]
fn stale_option_pointing_nowhere_is_ignored() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    options
        .set("regadmin_signup_page", json!(999))
        .expect("seed option");

    let id = provision_page(&pages, &options, &signup_spec()).expect("provision");

    assert_eq!(pages.count(), 1);
    assert_eq!(
        options.get("regadmin_signup_page").expect("option"),
        Some(json!(id))
    );
}

#[test]
fn option_pointing_at_trashed_page_falls_through_to_restore() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let trashed = pages.insert(new_page("signup", ""), PageStatus::Trash);
    options
        .set("regadmin_signup_page", json!(trashed))
        .expect("seed option");

    let id = provision_page(&pages, &options, &signup_spec()).expect("provision");

    assert_eq!(id, trashed);
    let record = pages.page(id).expect("page").expect("record");
    assert_eq!(record.status, PageStatus::Publish);
}

#[test]
fn created_page_fields_are_sanitized() {
    let pages = MemoryPages::new();
    let options = MemoryOptions::new();
    let spec = PageSpec {
        slug: "  signup  ".to_string(),
        option: None,
        title: " Sign\tUp \u{7}".to_string(),
        content: String::new(),
        parent: 0,
    };

    let id = provision_page(&pages, &options, &spec).expect("provision");
    let record = pages.page(id).expect("page").expect("record");
    assert_eq!(record.slug, "signup");
    assert_eq!(record.title, "Sign Up");
    assert_eq!(record.status, PageStatus::Publish);
}
