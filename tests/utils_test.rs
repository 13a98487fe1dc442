use monthlify::management::TokenManager;
use monthlify::spotify::auth::Credentials;
use monthlify::types::Token;
use monthlify::utils::*;

// Helper function to create a token obtained at `obtained_at`
fn create_test_token(obtained_at: u64, expires_in: u64) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: "user-library-read".to_string(),
        expires_in,
        obtained_at,
    }
}

fn create_test_credentials() -> Credentials {
    Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
        token_url: "http://127.0.0.1:9/api/token".to_string(),
        redirect_uri: "http://127.0.0.1:5000/callback".to_string(),
    }
}

#[test]
fn test_generate_state_token() {
    let state = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    assert_ne!(state, generate_state_token());
}

#[test]
fn test_callback_bind_address() {
    assert_eq!(
        callback_bind_address("http://127.0.0.1:5000/callback").unwrap(),
        "127.0.0.1:5000"
    );

    // Port falls back to the scheme default
    assert_eq!(
        callback_bind_address("http://localhost/callback").unwrap(),
        "localhost:80"
    );
}

#[test]
fn test_callback_bind_address_invalid() {
    assert!(callback_bind_address("not a url").is_err());
    assert!(callback_bind_address("").is_err());
}

#[test]
fn test_token_expiry_margin() {
    let manager = TokenManager::new(create_test_token(1_000, 3_600), create_test_credentials());

    // Valid well before expiry
    assert!(!manager.is_expired_at(1_000));
    assert!(!manager.is_expired_at(4_359));

    // Refreshed within four minutes of expiry and afterwards
    assert!(manager.is_expired_at(4_360));
    assert!(manager.is_expired_at(10_000));
}

#[test]
fn test_token_expiry_short_lived() {
    // Lifetime shorter than the margin counts as expired right away
    let manager = TokenManager::new(create_test_token(1_000, 60), create_test_credentials());
    assert!(manager.is_expired_at(1_000));
}
