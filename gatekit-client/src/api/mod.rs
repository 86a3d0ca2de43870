//! Typed API clients
//!
//! Thin wrappers over the transport for the endpoints the evaluator
//! consumes: role definitions (schema) and role assignments (facts).

mod role_assignments;
mod roles;

pub use role_assignments::RoleAssignmentsApi;
pub use roles::RolesApi;

use url::Url;

/// Append non-empty query parameters to a URL.
///
/// Empty and absent values are omitted entirely, matching the server's
/// treatment of filters. An unparseable base is returned untouched.
pub(crate) fn with_query(base: &str, params: &[(&str, Option<String>)]) -> String {
    let present: Vec<(&str, &String)> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v))
        })
        .collect();

    if present.is_empty() {
        return base.to_string();
    }

    let Ok(mut url) = Url::parse(base) else {
        return base.to_string();
    };

    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in present {
            pairs.append_pair(key, value);
        }
    }

    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_omitted() {
        let url = with_query(
            "https://api.example.com/v1/roles",
            &[
                ("user", Some("u1".to_string())),
                ("tenant", Some(String::new())),
                ("role", None),
            ],
        );
        assert_eq!(url, "https://api.example.com/v1/roles?user=u1");
    }

    #[test]
    fn no_params_leaves_url_untouched() {
        let url = with_query("https://api.example.com/v1/roles", &[("user", None)]);
        assert_eq!(url, "https://api.example.com/v1/roles");
    }

    #[test]
    fn values_are_percent_encoded() {
        let url = with_query(
            "https://api.example.com/v1/roles",
            &[("search", Some("a b".to_string()))],
        );
        assert_eq!(url, "https://api.example.com/v1/roles?search=a+b");
    }
}
