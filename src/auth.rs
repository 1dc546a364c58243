//! Client identity: credentialed user, guest, or nobody.
//!
//! [`AuthContext`] keeps the in-memory [`AuthState`] and the two persisted
//! slots in step. It is built once at startup and handed to whatever needs
//! to gate access, sign requests or compare turn owners.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::AuthError;
use crate::storage::Storage;
use crate::types::{AuthState, Claims, GUEST_KEY, TOKEN_KEY};

/// Lenient base64url: padding optional, stray trailing bits ignored.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode the claims carried by a bearer token.
///
/// Only the payload segment is read. The signature is not verified; the
/// issuing backend remains the authority on validity.
pub fn decode_token(token: &str) -> Result<Claims, AuthError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    }

    let payload = PAYLOAD_ENGINE
        .decode(parts[1])
        .map_err(|e| AuthError::InvalidToken(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("payload is not valid claims: {}", e)))
}

pub struct AuthContext<S> {
    storage: S,
    state: AuthState,
}

impl<S: Storage> AuthContext<S> {
    /// Rebuild the identity from persisted storage.
    ///
    /// Only the token slot is read. A stored token that no longer decodes is
    /// cleared. A stored guest id is picked up by [`Self::resume_guest`].
    pub fn restore(storage: S) -> Result<Self, AuthError> {
        let state = match storage.get_non_empty(TOKEN_KEY)? {
            Some(token) => match decode_token(&token) {
                Ok(claims) => AuthState::Authenticated { token, claims },
                Err(e) => {
                    tracing::warn!("Discarding stored token: {}", e);
                    storage.remove(TOKEN_KEY)?;
                    AuthState::Anonymous
                }
            },
            None => AuthState::Anonymous,
        };

        tracing::info!("Session restored as {}", state);
        Ok(Self { storage, state })
    }

    pub fn login(&mut self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode_token(token)?;
        self.storage.set(TOKEN_KEY, token)?;

        tracing::info!("Logged in as {}", claims.sub);
        self.state = AuthState::Authenticated {
            token: token.to_string(),
            claims: claims.clone(),
        };
        Ok(claims)
    }

    /// Drop the credential. The guest slot is left as it is.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.storage.remove(TOKEN_KEY)?;
        self.state = AuthState::Anonymous;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Act as a guest. A persisted token is kept and wins again on the next restore.
    pub fn enter_as_guest(&mut self, guest_id: &str) -> Result<(), AuthError> {
        self.storage.set(GUEST_KEY, guest_id)?;
        self.state = AuthState::Guest {
            guest_id: guest_id.to_string(),
        };
        tracing::info!("Entered as guest {}", guest_id);
        Ok(())
    }

    /// Act as the guest stored by an earlier visit, if there is one.
    pub fn resume_guest(&mut self) -> Result<bool, AuthError> {
        let Some(guest_id) = self.storage.get_non_empty(GUEST_KEY)? else {
            return Ok(false);
        };

        tracing::info!("Resumed guest {}", guest_id);
        self.state = AuthState::Guest { guest_id };
        Ok(true)
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether protected views may be shown.
    pub fn has_access(&self) -> bool {
        !matches!(self.state, AuthState::Anonymous)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id()
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            AuthState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Value for the `Authorization` header of outgoing requests.
    pub fn authorization_header(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    pub fn is_current_turn(&self, turn_user_id: &str) -> bool {
        self.active_id() == Some(turn_user_id)
    }

    pub fn is_owner(&self, creator_id: &str) -> bool {
        self.active_id() == Some(creator_id)
    }
}
