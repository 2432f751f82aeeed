//! Parsers for OS command output.
//!
//! `netsh wlan show interfaces` prints one `Key : Value` pair per line.  The
//! SSID line has to be told apart from the BSSID line (both contain "SSID"),
//! and on newer Windows builds from the "AP BSSID" line as well:
//!
//! ```text
//!     Name                   : Wi-Fi
//!     State                  : connected
//!     SSID                   : Example_WIFI
//!     AP BSSID               : aa:bb:cc:dd:ee:ff
//! ```
//!
//! Only the key is matched, so the parser keeps working with localised output
//! as long as the key itself is not translated (it is not, on the Windows
//! builds seen so far).

/// Returns the trimmed text after the first `delimiter` on the first line that
/// contains `marker` but not `exclude`.
///
/// Returns `None` when no line qualifies, the line has no delimiter, or the
/// value is empty.
pub fn find_marked_value(text: &str, marker: &str, exclude: &str, delimiter: char) -> Option<String> {
    let line = text
        .lines()
        .find(|line| line.contains(marker) && !line.contains(exclude))?;
    let (_, value) = line.split_once(delimiter)?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Extracts the associated network name from `netsh wlan show interfaces`.
pub fn parse_current_ssid(netsh_output: &str) -> Option<String> {
    find_marked_value(netsh_output, "SSID", "BSSID", ':')
}

/// Returns `true` if `ping` output contains an echo reply.
///
/// Reply lines carry a TTL (`Reply from 8.8.8.8: bytes=32 time=14ms TTL=117`
/// on Windows, `64 bytes from 8.8.8.8: icmp_seq=1 ttl=117` elsewhere).
/// "Destination host unreachable" replies do not, which matters because
/// Windows `ping` exits with status 0 for those.
pub fn ping_reply_received(ping_output: &str) -> bool {
    ping_output
        .lines()
        .any(|line| line.to_ascii_lowercase().contains("ttl="))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_ssid_extracts_value() {
        let text = "    SSID                   : Example_WIFI\n";
        assert_eq!(parse_current_ssid(text), Some("Example_WIFI".to_string()));
    }

    #[test]
    fn test_parse_current_ssid_skips_bssid_line_listed_first() {
        // Arrange: BSSID appears before SSID
        let text = "BSSID : aa:bb:cc:dd:ee:ff\nSSID : Example_WIFI\n";

        // Act / Assert
        assert_eq!(parse_current_ssid(text), Some("Example_WIFI".to_string()));
    }

    #[test]
    fn test_parse_current_ssid_returns_none_without_ssid_line() {
        let text = "    Name  : Wi-Fi\n    State : disconnected\n";
        assert_eq!(parse_current_ssid(text), None);
    }

    #[test]
    fn test_parse_current_ssid_returns_none_for_empty_value() {
        assert_eq!(parse_current_ssid("SSID : \n"), None);
    }

    #[test]
    fn test_parse_current_ssid_keeps_colons_inside_value() {
        assert_eq!(
            parse_current_ssid("SSID : Cafe: Guest\n"),
            Some("Cafe: Guest".to_string())
        );
    }

    #[test]
    fn test_find_marked_value_requires_delimiter() {
        assert_eq!(find_marked_value("SSID Example_WIFI", "SSID", "BSSID", ':'), None);
    }

    #[test]
    fn test_find_marked_value_uses_first_qualifying_line() {
        let text = "key = one\nkey = two\n";
        assert_eq!(
            find_marked_value(text, "key", "nothing", '='),
            Some("one".to_string())
        );
    }

    #[test]
    fn test_ping_reply_received_detects_windows_reply() {
        let text = "Reply from 8.8.8.8: bytes=32 time=14ms TTL=117\n";
        assert!(ping_reply_received(text));
    }

    #[test]
    fn test_ping_reply_received_detects_unix_reply() {
        let text = "64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=14.2 ms\n";
        assert!(ping_reply_received(text));
    }

    #[test]
    fn test_ping_reply_received_rejects_unreachable() {
        let text = "Reply from 192.168.0.1: Destination host unreachable.\n";
        assert!(!ping_reply_received(text));
    }

    #[test]
    fn test_ping_reply_received_rejects_timeout() {
        assert!(!ping_reply_received("Request timed out.\n"));
    }
}
