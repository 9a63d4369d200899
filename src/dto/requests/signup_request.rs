use zeroize::{Zeroize, ZeroizeOnDrop};

pub const USERNAME_PREFIX: &str = "user";
pub const EMAIL_PREFIX: &str = "u";
pub const EMAIL_DOMAIN: &str = "@example.com";
pub const SIGNUP_PASSWORD: &str = "P@ssw0rd!";

/// Body of one signup POST. Built per iteration, serialized, then dropped.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    serde_derive::Serialize,
    serde_derive::Deserialize,
    Zeroize,
    ZeroizeOnDrop,
)]
pub struct SignupPayload {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl SignupPayload {
    pub fn for_virtual_user(vu: u64) -> Self {
        SignupPayload {
            username: format!("{USERNAME_PREFIX}{vu}"),
            password: SIGNUP_PASSWORD.to_owned(),
            email: format!("{EMAIL_PREFIX}{vu}{EMAIL_DOMAIN}"),
        }
    }

    pub fn to_json_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
