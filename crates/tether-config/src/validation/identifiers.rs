//! JavaScript identifier checks for receiver and marker names.

use regex::Regex;
use std::sync::LazyLock;

use crate::schema::BridgeConfig;

/// A single identifier: `receivedMessageFromReactNative`, `$bridge`, `_rx`.
static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// A dotted member path: `window.bridge.receive`.
static MEMBER_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// True for a single JavaScript identifier.
pub fn is_js_identifier(name: &str) -> bool {
    IDENT_RE.is_match(name)
}

/// True for a dotted path of identifiers.
pub fn is_js_member_path(name: &str) -> bool {
    MEMBER_PATH_RE.is_match(name)
}

/// Validate every configured name.
pub(crate) fn validate_names(errors: &mut Vec<String>, config: &BridgeConfig) {
    if !is_js_member_path(&config.receiver.name) {
        errors.push(format!(
            "receiver.name = {:?} is not a valid JavaScript member path",
            config.receiver.name
        ));
    }
    check_identifier(
        errors,
        "detection.message_handler",
        &config.detection.message_handler,
    );
    check_identifier(
        errors,
        "detection.post_message_marker",
        &config.detection.post_message_marker,
    );
}

fn check_identifier(errors: &mut Vec<String>, field: &str, value: &str) {
    if !is_js_identifier(value) {
        errors.push(format!(
            "{field} = {value:?} is not a valid JavaScript identifier"
        ));
    }
}
