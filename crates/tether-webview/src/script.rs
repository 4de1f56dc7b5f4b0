//! JavaScript generation for the host side of the bridge.
//!
//! The host talks to the page by evaluating scripts, so everything that
//! crosses in that direction is embedded in script text. Payloads go into a
//! single-quoted string literal and are escaped here; names come from a
//! validated [`BridgeConfig`].

use tether_config::BridgeConfig;

/// Quote `s` as a single-quoted JavaScript string literal.
///
/// Escapes the backslash, the quote, line terminators (including U+2028 and
/// U+2029) and all other control characters.
pub fn js_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Script calling the page receiver with `message` as its only argument.
pub fn receiver_call_script(receiver: &str, message: &str) -> String {
    format!("{receiver}({})", js_single_quoted(message))
}

/// Recover the message from a script built by [`receiver_call_script`].
///
/// Returns `None` for any other script shape.
pub fn extract_receiver_argument(script: &str, receiver: &str) -> Option<String> {
    let inner = script
        .trim()
        .trim_end_matches(';')
        .strip_prefix(receiver)?
        .strip_prefix('(')?
        .strip_suffix(')')?;
    unquote_single(inner)
}

fn unquote_single(literal: &str) -> Option<String> {
    let body = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'x' => out.push(hex_char(&mut chars, 2)?),
                'u' => out.push(hex_char(&mut chars, 4)?),
                other => out.push(other),
            },
            // An unescaped quote would have ended the literal early.
            '\'' => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn hex_char(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
}

/// Page initialization script for a Rust host built on `window.ipc`.
///
/// Installs both detection markers and routes `window.postMessage` (and the
/// webkit message handler) to `window.ipc.postMessage`, so a page written for
/// a React Native host runs unchanged.
pub fn host_init_script(config: &BridgeConfig) -> String {
    let handler = &config.detection.message_handler;
    let marker = &config.detection.post_message_marker;
    format!(
        r#"
(function() {{
    if (!window.ipc || typeof window.ipc.postMessage !== 'function') {{
        return;
    }}
    var forward = function(msg) {{
        window.ipc.postMessage(typeof msg === 'string' ? msg : JSON.stringify(msg));
    }};
    window.webkit = window.webkit || {{}};
    window.webkit.messageHandlers = window.webkit.messageHandlers || {{}};
    window.webkit.messageHandlers.{handler} = {{ postMessage: forward }};
    window.{marker} = window.postMessage;
    window.postMessage = forward;
}})();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_plain_text() {
        assert_eq!(js_single_quoted("abc"), "'abc'");
    }

    #[test]
    fn escapes_quote_and_backslash() {
        assert_eq!(js_single_quoted(r#"it's"#), r#"'it\'s'"#);
        assert_eq!(js_single_quoted(r#"a\"b"#), r#"'a\\"b'"#);
    }

    #[test]
    fn escapes_line_terminators() {
        assert_eq!(js_single_quoted("a\nb\rc"), r"'a\nb\rc'");
        assert_eq!(js_single_quoted("\u{2028}\u{2029}"), r"'\u2028\u2029'");
        assert_eq!(js_single_quoted("\u{1}"), r"'\x01'");
    }

    #[test]
    fn receiver_call_shape() {
        let script = receiver_call_script("receivedMessageFromReactNative", r#"{"a":1}"#);
        assert_eq!(script, r#"receivedMessageFromReactNative('{"a":1}')"#);
    }

    #[test]
    fn extract_inverts_call_for_hostile_payloads() {
        let payloads = [
            r#"{"event":"e","data":"');alert(1);//"}"#,
            r#"{"event":"e","data":"back\\slash \"quoted\""}"#,
            "line\nbreak\u{2028}sep\ttab\u{7}",
            "",
        ];
        for payload in payloads {
            let script = receiver_call_script("rx", payload);
            assert_eq!(
                extract_receiver_argument(&script, "rx").as_deref(),
                Some(payload)
            );
        }
    }

    #[test]
    fn extract_rejects_other_scripts() {
        assert_eq!(extract_receiver_argument("other('x')", "rx"), None);
        assert_eq!(extract_receiver_argument("rx(x)", "rx"), None);
        assert_eq!(extract_receiver_argument("rx('a'b')", "rx"), None);
        assert_eq!(extract_receiver_argument("rx('\\x4')", "rx"), None);
    }

    #[test]
    fn extract_rejects_signed_hex_escapes() {
        assert_eq!(extract_receiver_argument(r"rx('\x+1')", "rx"), None);
        assert_eq!(extract_receiver_argument(r"rx('\u+041')", "rx"), None);
        assert_eq!(
            extract_receiver_argument(r"rx('\x41B')", "rx").as_deref(),
            Some("AB")
        );
    }

    #[test]
    fn extract_tolerates_trailing_semicolon() {
        assert_eq!(
            extract_receiver_argument("rx('ok');", "rx").as_deref(),
            Some("ok")
        );
    }

    #[test]
    fn init_script_uses_configured_names() {
        let mut config = BridgeConfig::default();
        config.detection.message_handler = "tether".into();
        let script = host_init_script(&config);
        assert!(script.contains("window.webkit.messageHandlers.tether ="));
        assert!(script.contains("window.originalPostMessage = window.postMessage;"));
        assert!(script.contains("window.ipc.postMessage"));
    }
}
