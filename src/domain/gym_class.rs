use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GymClass {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub trainer_id: Uuid,
    pub capacity: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_schedule", skip_on_field_errors = false))]
pub struct CreateClassRequest {
    #[validate(length(min = 1, max = 200, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to the caller when omitted.
    pub trainer_id: Option<Uuid>,
    #[validate(range(min = 1, message = "capacity must be at least 1"))]
    pub capacity: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[validate(range(min = 0.0, max = 1_000_000.0, message = "price must be between 0 and 1000000"))]
    pub price: f64,
}

fn validate_schedule(request: &CreateClassRequest) -> Result<(), ValidationError> {
    if request.end_time <= request.start_time {
        let mut error = ValidationError::new("schedule");
        error.message = Some("end_time must be after start_time".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn request(capacity: i32, length: Duration) -> CreateClassRequest {
        let start = Utc::now() + Duration::days(1);
        CreateClassRequest {
            name: "Morning Yoga".to_string(),
            description: String::new(),
            trainer_id: None,
            capacity,
            start_time: start,
            end_time: start + length,
            price: 15.0,
        }
    }

    #[test]
    fn test_valid_class_passes() {
        assert!(request(12, Duration::hours(1)).validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let errors = request(0, Duration::hours(1)).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("capacity"));
    }

    #[test]
    fn test_oversized_price_rejected() {
        let mut class = request(5, Duration::hours(1));
        class.price = 1e17;
        let errors = class.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_end_before_start_rejected() {
        assert!(request(5, Duration::hours(-1)).validate().is_err());
    }

    #[test]
    fn test_times_parse_from_rfc3339() {
        let request: CreateClassRequest = serde_json::from_str(
            r#"{
                "name": "Spin",
                "capacity": 2,
                "start_time": "2024-12-20T10:00:00Z",
                "end_time": "2024-12-20T11:00:00Z",
                "price": 50.0
            }"#,
        )
        .unwrap();

        assert_eq!(request.description, "");
        assert!(request.trainer_id.is_none());
        assert_eq!(request.end_time - request.start_time, Duration::hours(1));
    }
}
