use switchkey::headless::{HeadlessRegistry, InputSourceEntry};
use switchkey::{ActivationError, Icon, InputSourceRegistry, InputSources};

const US: &str = "com.apple.keylayout.US";
const PINYIN: &str = "com.apple.inputmethod.SCIM.ITABC";

fn flag() -> Icon {
    let mut rgba = [255, 0, 0, 255].repeat(2);
    rgba[4..8].copy_from_slice(&[0, 0, 255, 255]);
    Icon::from_rgba(rgba, 2, 1).unwrap()
}

fn registry() -> HeadlessRegistry {
    HeadlessRegistry::new(InputSourceEntry::new(US, "U.S."))
        .with_entry(InputSourceEntry::new(PINYIN, "Pinyin - Simplified").with_icon(flag()))
}

#[test]
fn current_is_always_present() {
    let sources = InputSources::with_registry(registry());
    assert_eq!(sources.current().id(), US);
}

#[test]
fn lookup_returns_matching_identifier() {
    let sources = InputSources::with_registry(registry());
    for id in [US, PINYIN] {
        let source = sources.lookup(id).unwrap();
        assert_eq!(source.id(), id);
    }
}

#[test]
fn lookup_by_known_id() {
    let sources = InputSources::with_registry(registry());
    let us = sources.lookup("com.apple.keylayout.US").unwrap();
    assert_eq!(us.id(), "com.apple.keylayout.US");
    assert_eq!(us.display_name(), "U.S.");
}

#[test]
fn lookup_of_unknown_id_is_absent() {
    let sources = InputSources::with_registry(registry());
    assert!(sources.lookup("nonexistent.id").is_none());
    assert!(sources.lookup("").is_none());
    // Identifiers are matched exactly.
    assert!(sources.lookup("COM.APPLE.KEYLAYOUT.US").is_none());
}

#[test]
fn identifier_is_stable() {
    let registry = registry();
    let source = registry.lookup(PINYIN).unwrap();
    let first = source.id().clone();
    registry.set_display_name(PINYIN, "拼音 - 简体");
    registry.set_icon(PINYIN, None);
    assert_eq!(source.id(), &first);
    assert_eq!(source.clone().id(), &first);
}

#[test]
fn metadata_is_repeatable_without_registry_changes() {
    let source = registry().lookup(PINYIN).unwrap();
    assert_eq!(source.display_name(), source.display_name());
    assert_eq!(source.icon(), source.icon());
    assert!(source.icon().is_some());
}

#[test]
fn metadata_follows_registry_changes() {
    let registry = registry();
    let source = registry.lookup(PINYIN).unwrap();
    assert!(!source.icon().unwrap().can_template());

    registry.set_display_name(PINYIN, "拼音 - 简体");
    let glyph = Icon::from_rgba([0, 0, 0, 255].to_vec(), 1, 1).unwrap();
    registry.set_icon(PINYIN, Some(glyph.clone()));

    assert_eq!(source.display_name(), "拼音 - 简体");
    assert_eq!(source.icon(), Some(glyph));
}

#[test]
fn self_activation_is_idempotent() {
    let sources = InputSources::with_registry(registry());
    let before = sources.current();
    sources.activate(&sources.current()).unwrap();
    assert_eq!(sources.current(), before);
}

#[test]
fn activation_changes_current() {
    let sources = InputSources::with_registry(registry());
    let pinyin = sources.lookup(PINYIN).unwrap();
    sources.activate(&pinyin).unwrap();
    assert_eq!(sources.current().id(), pinyin.id());
    assert_eq!(sources.current().display_name(), "Pinyin - Simplified");
}

#[test]
fn activation_is_forwarded_without_validation() {
    let registry = registry();
    let sources = InputSources::with_registry(registry.clone());
    let pinyin = sources.lookup(PINYIN).unwrap();
    registry.remove(PINYIN);

    // The stale handle still reaches the registry, which reports the missing entry.
    let err = sources.activate(&pinyin).unwrap_err();
    assert!(matches!(err, ActivationError::NotFound(ref id) if id == PINYIN));
    assert_eq!(registry.activation_count(), 1);
    assert_eq!(sources.current().id(), US);
}

#[test]
fn denied_activation_leaves_current_untouched() {
    let registry = registry();
    registry.deny_activation(PINYIN, true);
    let sources = InputSources::with_registry(registry);
    let pinyin = sources.lookup(PINYIN).unwrap();
    let err = sources.activate(&pinyin).unwrap_err();
    assert_eq!(err.to_string(), format!("activation of input source `{PINYIN}` was denied"));
    assert_eq!(sources.current().id(), US);
}

#[test]
fn handles_from_different_queries_are_equal() {
    let sources = InputSources::with_registry(registry());
    assert_eq!(sources.current(), sources.lookup(US).unwrap());
    assert_ne!(sources.current(), sources.lookup(PINYIN).unwrap());
}

#[test]
fn registry_is_injected() {
    let sources = InputSources::with_registry(registry());
    assert_eq!(sources.registry().current().id(), US);
    assert!(format!("{sources:?}").contains("HeadlessRegistry"));
}
