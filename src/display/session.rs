//! Principal display formatting

use crate::auth::Principal;

/// Format the signed-in principal, or a hint to sign in
pub fn format_principal(principal: Option<&Principal>) -> String {
    match principal {
        Some(p) => {
            let mut output = format!("Signed in as {}\n", p.label());
            if let Some(email) = &p.email {
                output.push_str(&format!("  Email:    {}\n", email));
            }
            output.push_str(&format!("  Provider: {}\n", p.provider));
            output.push_str(&format!("  User ID:  {}\n", p.id));
            output
        }
        None => "Not signed in. Run `cashly login` or `cashly signup`.\n".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out() {
        assert!(format_principal(None).starts_with("Not signed in"));
    }

    #[test]
    fn test_signed_in() {
        let principal = Principal {
            id: "u1".into(),
            email: Some("ada@example.com".into()),
            display_name: None,
            provider: "password".into(),
        };
        let output = format_principal(Some(&principal));
        assert!(output.starts_with("Signed in as ada@example.com"));
        assert!(output.contains("Provider: password"));
    }
}
