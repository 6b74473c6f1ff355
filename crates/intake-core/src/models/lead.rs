//! The lead record relayed to the downstream workflow webhook.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// One finished registration.
///
/// Built once at submit time and handed to a [`crate::LeadSink`]; never
/// stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_front_url: Option<String>,
    pub id_back_url: Option<String>,
    pub has_biometric: bool,
    #[serde(serialize_with = "serialize_iso8601_millis")]
    pub submitted_at: DateTime<Utc>,
}

/// Millisecond precision with a `Z` suffix, e.g. `2025-03-01T09:30:00.000Z`.
fn serialize_iso8601_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_with_webhook_field_names() {
        let lead = Lead {
            full_name: "Dana Cohen".to_string(),
            phone: "0501234567".to_string(),
            email: None,
            id_front_url: Some("https://blob/id-front-123-dana.png".to_string()),
            id_back_url: None,
            has_biometric: false,
            submitted_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        };

        let value = serde_json::to_value(&lead).unwrap();
        assert_eq!(
            value,
            json!({
                "fullName": "Dana Cohen",
                "phone": "0501234567",
                "email": null,
                "idFrontUrl": "https://blob/id-front-123-dana.png",
                "idBackUrl": null,
                "hasBiometric": false,
                "submittedAt": "2025-03-01T09:30:00.000Z"
            })
        );
    }

    #[test]
    fn deserializes_submitted_at() {
        let lead: Lead = serde_json::from_value(json!({
            "fullName": "A",
            "phone": "1",
            "email": "a@example.com",
            "idFrontUrl": "u",
            "idBackUrl": "v",
            "hasBiometric": true,
            "submittedAt": "2025-03-01T09:30:00.250Z"
        }))
        .unwrap();
        assert_eq!(lead.submitted_at.timestamp_subsec_millis(), 250);
        assert!(lead.has_biometric);
    }
}
