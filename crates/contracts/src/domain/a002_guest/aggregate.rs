use serde::{Deserialize, Serialize};

crate::integer_id!(
    /// Идентификатор гостя
    GuestId
);

/// Guest record as returned by `/api/guests` and `/api/guests/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub guest_id: GuestId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

fn or_dash(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => "-",
    }
}

impl Guest {
    /// Suggestion text, e.g. `Ann Lee | ann@example.com | 0771234567`.
    ///
    /// The search box matches a picked suggestion back to its guest by this
    /// exact string.
    pub fn suggestion_label(&self) -> String {
        format!(
            "{} | {} | {}",
            self.full_name,
            or_dash(&self.email),
            or_dash(&self.contact_number)
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestsResponse {
    #[serde(default)]
    pub guests: Vec<Guest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_label() {
        let guest: Guest = serde_json::from_str(
            r#"{"guestId":7,"fullName":"Ann Lee","email":"ann@example.com","contactNumber":""}"#,
        )
        .unwrap();
        assert_eq!(guest.suggestion_label(), "Ann Lee | ann@example.com | -");
    }
}
