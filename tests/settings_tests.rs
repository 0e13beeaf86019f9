use regadmin::{
    format_setting_data, get_option, update_form_settings, FormSettingsStore, MemoryFormSettings,
    MemoryOptions, OptionsStore, SettingEntry,
};
use serde_json::json;

#[test]
fn repeated_names_group_into_arrays() {
    let submitted = vec![
        SettingEntry::new("colors", json!("red")),
        SettingEntry::new("label", json!("Join")),
        SettingEntry::new("colors", json!("blue")),
        SettingEntry::new("colors", json!("green")),
    ];

    let grouped = format_setting_data(&submitted);
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[0].name, "colors");
    assert_eq!(grouped[0].value, json!(["red", "blue", "green"]));
    assert_eq!(grouped[1].name, "label");
    assert_eq!(grouped[1].value, json!("Join"));
}

#[test]
fn single_values_stay_scalar() {
    let submitted = vec![SettingEntry::new("label", json!("Join"))];
    let grouped = format_setting_data(&submitted);
    assert_eq!(grouped[0].value, json!("Join"));
}

#[test]
fn update_strips_array_suffix_from_names() {
    let store = MemoryFormSettings::new();
    let submitted = vec![
        SettingEntry::new("colors[]", json!("red")),
        SettingEntry::new("colors[]", json!("blue")),
    ];
    let known = vec!["colors".to_string()];

    update_form_settings(&store, 7, &submitted, &known).expect("update settings");
    assert_eq!(store.setting(7, "colors").expect("read"), Some(json!(["red", "blue"])));
}

#[test]
fn unsubmitted_known_field_resets_to_empty() {
    let store = MemoryFormSettings::new();
    let submitted = vec![SettingEntry::new("label", json!("Join"))];
    let known = vec!["label".to_string(), "redirect_url".to_string()];

    update_form_settings(&store, 7, &submitted, &known).expect("update settings");
    assert_eq!(store.setting(7, "label").expect("read"), Some(json!("Join")));
    assert_eq!(store.setting(7, "redirect_url").expect("read"), Some(json!("")));
}

#[test]
fn string_values_are_sanitized_on_update() {
    let store = MemoryFormSettings::new();
    let submitted = vec![
        SettingEntry::new("label", json!("  Join\tnow ")),
        SettingEntry::new("tags[]", json!(" a ")),
        SettingEntry::new("tags[]", json!(" b ")),
    ];
    let known = vec!["label".to_string(), "tags".to_string()];

    update_form_settings(&store, 7, &submitted, &known).expect("update settings");
    assert_eq!(store.setting(7, "label").expect("read"), Some(json!("Join now")));
    assert_eq!(store.setting(7, "tags").expect("read"), Some(json!(["a", "b"])));
}

#[test]
fn get_option_falls_back_to_default() {
    let options = MemoryOptions::new();
    options.set("existing", json!("stored")).expect("seed");

    assert_eq!(
        get_option(&options, "existing", json!("fallback")).expect("read"),
        json!("stored")
    );
    assert_eq!(
        get_option(&options, "missing", json!("fallback")).expect("read"),
        json!("fallback")
    );
    assert!(get_option(&options, "", json!("fallback")).is_err());
}
