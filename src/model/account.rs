use super::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered customer or administrator holding a stored balance.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](actor_framework::ResourceActor); see
/// [`account_actor`](crate::account_actor) for the hooks and the ledger actions that
/// move the balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    /// Stored lower-cased; unique across accounts.
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    /// Minor currency units.
    pub balance: u64,
    #[serde(flatten)]
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Optional contact details shown on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
}

impl Profile {
    /// Overwrites the fields that are set in `patch`.
    pub fn merge(&mut self, patch: Profile) {
        let Profile {
            image,
            phone,
            country,
            city,
            street,
            house,
        } = patch;
        for (slot, value) in [
            (&mut self.image, image),
            (&mut self.phone, phone),
            (&mut self.country, country),
            (&mut self.city, city),
            (&mut self.street, street),
            (&mut self.house, house),
        ] {
            if value.is_some() {
                *slot = value;
            }
        }
    }
}

/// Payload for creating an account. The password arrives already hashed.
#[derive(Clone)]
pub struct AccountCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl fmt::Debug for AccountCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// Partial update of an account. `None` leaves a field unchanged.
#[derive(Clone, Default)]
pub struct AccountUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
    pub profile: Option<Profile>,
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field(
                "password_hash",
                &self.password_hash.as_ref().map(|_| "<redacted>"),
            )
            .field("is_admin", &self.is_admin)
            .field("profile", &self.profile)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let account = Account {
            id: AccountId(1),
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_admin: false,
            balance: 1000,
            profile: Profile {
                city: Some("Lisbon".into()),
                ..Profile::default()
            },
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["id"], "account_1");
        assert_eq!(json["isAdmin"], false);
        assert_eq!(json["city"], "Lisbon");
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let create = AccountCreate {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            is_admin: false,
        };
        assert!(!format!("{create:?}").contains("secret"));

        let update = AccountUpdate {
            password_hash: Some("$argon2id$secret".into()),
            ..AccountUpdate::default()
        };
        assert!(!format!("{update:?}").contains("secret"));
    }

    #[test]
    fn test_profile_merge_keeps_unset_fields() {
        let mut profile = Profile {
            phone: Some("123".into()),
            city: Some("Porto".into()),
            ..Profile::default()
        };
        profile.merge(Profile {
            city: Some("Lisbon".into()),
            ..Profile::default()
        });
        assert_eq!(profile.phone.as_deref(), Some("123"));
        assert_eq!(profile.city.as_deref(), Some("Lisbon"));
    }
}
