//! `Co-authored-by:` trailer formatting.

use serde::{Deserialize, Deserializer, Serialize};

/// Domain GitHub uses for private-email noreply addresses.
pub const NOREPLY_DOMAIN: &str = "users.noreply.github.com";

/// Identity metadata for one GitHub user, as selected by the lookup query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub database_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub login: String,
}

impl UserRecord {
    /// The display name, falling back to the login.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.login)
    }

    /// The public email, or the noreply address GitHub attributes commits to.
    pub fn display_email(&self) -> String {
        match non_empty(self.email.as_deref()) {
            Some(email) => email.to_string(),
            None => format!("{}+{}@{}", self.database_id, self.login, NOREPLY_DOMAIN),
        }
    }
}

/// `databaseId` is a nullable `Int` in the schema; null reads as 0.
fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Formats users as commit-message trailers.
pub struct AttributionFormatter;

impl AttributionFormatter {
    /// One trailer line, including its terminating newline.
    pub fn format(user: &UserRecord) -> String {
        format!(
            "Co-authored-by: {} <{}>\n",
            user.display_name(),
            user.display_email()
        )
    }

    /// Trailers for every user, in the given order.
    pub fn format_all<'a, I>(users: I) -> String
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        users.into_iter().map(Self::format).collect()
    }
}
