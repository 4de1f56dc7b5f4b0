//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Tether Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[receiver]
# Page-side function the host calls to deliver a message.
# name = "receivedMessageFromReactNative"

[detection]
# window.webkit.messageHandlers.<message_handler>
# message_handler = "reactNative"
# window.<post_message_marker>
# post_message_marker = "originalPostMessage"

[responder]
# injection = "evaluate_javascript"   # evaluate_javascript, inject_javascript

[dispatch]
# parse_policy = "lenient"            # lenient, strict
# max_payload_bytes = 4194304         # 0 disables the limit

[logging]
# level = "info"                      # trace, debug, info, warn, error
"##
    .to_string()
}
