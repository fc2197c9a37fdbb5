//! HTTP span helpers.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub(super) struct RequestSpanName {
    pub(super) otel_path: String,
    pub(super) otel_span_name: String,
}

pub(super) fn request_span_name(method: &str, path: &str) -> RequestSpanName {
    let otel_path = normalise_path_for_span_name(path);
    let otel_span_name = format!("{method} {otel_path}");

    RequestSpanName {
        otel_path,
        otel_span_name,
    }
}

fn normalise_path_for_span_name(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut normalised = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            normalised.push('/');
        }

        if Uuid::parse_str(segment).is_ok() {
            normalised.push_str("{uuid}");
        } else {
            normalised.push_str(segment);
        }
    }

    normalised
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_uuids_collapse_into_a_placeholder() {
        let names = request_span_name("GET", "/orders/0192f0c4-a1b2-7c3d-8e4f-5a6b7c8d9e0f");

        assert_eq!(names.otel_path, "/orders/{uuid}");
        assert_eq!(names.otel_span_name, "GET /orders/{uuid}");
    }

    #[test]
    fn static_paths_are_unchanged() {
        assert_eq!(request_span_name("POST", "/orders/add").otel_path, "/orders/add");
        assert_eq!(request_span_name("GET", "/").otel_path, "/");
    }
}
