use mongodb::bson::oid::ObjectId;

use crate::utils::error::AppError;

/// Parse a primary-key-shaped string, reclassifying the driver's parse error
/// as a client-facing validation fault.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::Validation("Invalid movie ID format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_id() {
        assert!(parse_object_id("507f1f77bcf86cd799439011").is_ok());
    }

    #[test]
    fn test_invalid_object_ids() {
        for id in ["abc", "", "507f1f77bcf86cd79943901", "zzzf1f77bcf86cd799439011"] {
            match parse_object_id(id) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid movie ID format"),
                other => panic!("expected validation error for {:?}, got {:?}", id, other),
            }
        }
    }
}
