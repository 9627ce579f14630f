//! Property tests for request paths and query values.

use podwire_bindings::{
    Connection,
    pods::{self, InspectOptions, StopOptions},
};
use proptest::prelude::*;

fn is_escaped_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => match bytes.get(i + 1..i + 3) {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            },
            b if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') => i += 1,
            _ => return false,
        }
    }
    true
}

proptest! {
    #[test]
    fn pod_name_stays_in_one_path_segment(name in ".{1,24}") {
        let conn = Connection::new("http://d");
        let request = pods::inspect(&conn, &name, &InspectOptions::new()).unwrap();

        let segment = request
            .path()
            .strip_prefix("/pods/")
            .and_then(|rest| rest.strip_suffix("/json"))
            .unwrap();
        prop_assert!(is_escaped_segment(segment), "{}", segment);
    }

    #[test]
    fn any_stop_timeout_is_sent_verbatim(seconds in any::<i32>()) {
        let conn = Connection::new("http://d");
        let mut opts = StopOptions::new();
        opts.set_timeout(seconds);

        let request = pods::stop(&conn, "web", &opts).unwrap();
        prop_assert_eq!(request.uri(), format!("/pods/web/stop?t={seconds}"));
    }
}
