//! Central configuration for the github_login crate

use std::sync::LazyLock;

/// Route prefix under which the authentication endpoints are mounted
///
/// The login and callback routes are nested below this prefix, so with the
/// default the full callback path is `/api/auth/callback/github`.
/// Default: "/api/auth"
pub static AUTH_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/api/auth".to_string()));

#[cfg(test)]
mod tests {
    use std::env;

    #[test]
    fn test_auth_route_prefix_default() {
        // We can't re-initialize the LazyLock once it's been read, but we can
        // test the same logic it uses
        let original_value = env::var("AUTH_ROUTE_PREFIX").ok();

        unsafe {
            env::remove_var("AUTH_ROUTE_PREFIX");
        }

        let prefix = env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/api/auth".to_string());
        assert_eq!(prefix, "/api/auth");

        if let Some(value) = original_value {
            unsafe {
                env::set_var("AUTH_ROUTE_PREFIX", value);
            }
        }
    }

    #[test]
    fn test_auth_route_prefix_custom() {
        let original_value = env::var("AUTH_ROUTE_PREFIX").ok();

        unsafe {
            env::set_var("AUTH_ROUTE_PREFIX", "/custom/auth");
        }

        let prefix = env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/api/auth".to_string());
        assert_eq!(prefix, "/custom/auth");

        unsafe {
            if let Some(value) = original_value {
                env::set_var("AUTH_ROUTE_PREFIX", value);
            } else {
                env::remove_var("AUTH_ROUTE_PREFIX");
            }
        }
    }
}
