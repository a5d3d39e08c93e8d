//! Fabric capacity management and pipeline execution.

use reqwest::StatusCode;

use crate::clients::fabric::{FabricCapacity, PipelineRequest, PipelineResponse};
use crate::clients::FabricClient;
use crate::services::ServiceError;

#[derive(Debug, Clone)]
pub struct FabricService {
    fabric: FabricClient,
}

impl FabricService {
    pub fn new(fabric: FabricClient) -> Self {
        Self { fabric }
    }

    /// List all capacity names in the configured resource group.
    pub async fn list_capacities(&self) -> Result<Vec<String>, ServiceError> {
        tracing::info!("Fetching all Fabric capacities");
        let capacities = self.fabric.list_capacities().await?;
        tracing::debug!(count = capacities.len(), "Retrieved capacities");
        Ok(capacities)
    }

    /// Fetch one capacity by name.
    pub async fn get_capacity(
        &self,
        capacity_name: &str,
    ) -> Result<Option<FabricCapacity>, ServiceError> {
        if capacity_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Capacity name cannot be null or empty".to_string(),
            ));
        }
        tracing::info!(capacity_name = %capacity_name, "Fetching Fabric capacity");
        let capacity = self.fabric.get_capacity(capacity_name).await?;
        if capacity.is_none() {
            tracing::warn!(capacity_name = %capacity_name, "Capacity not found");
        }
        Ok(capacity)
    }

    /// Delete one capacity by name.
    pub async fn delete_capacity(&self, capacity_name: &str) -> Result<(), ServiceError> {
        if capacity_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Capacity name cannot be null or empty".to_string(),
            ));
        }
        tracing::info!(capacity_name = %capacity_name, "Deleting Fabric capacity");
        self.fabric.delete_capacity(capacity_name).await?;
        tracing::info!(capacity_name = %capacity_name, "Capacity deleted");
        Ok(())
    }

    /// Queue one pipeline run. All four parameters are validated before
    /// any downstream call is attempted.
    pub async fn execute_pipeline(
        &self,
        requesting_user: &str,
        user_id: &str,
        from_date_utc: &str,
        to_date_utc: &str,
        correlation_id: &str,
    ) -> Result<(StatusCode, PipelineResponse), ServiceError> {
        tracing::info!(correlation_id = %correlation_id, user_id = %user_id, "Executing Fabric pipeline");

        validate_pipeline_parameters(requesting_user, user_id, from_date_utc, to_date_utc)?;

        let request = PipelineRequest {
            requesting_user: requesting_user.to_string(),
            user_id: user_id.to_string(),
            from_date_utc: from_date_utc.to_string(),
            to_date_utc: to_date_utc.to_string(),
        };

        let (status, response) = self.fabric.run_pipeline(&request, correlation_id).await?;

        if status.is_success() {
            tracing::info!(
                run_id = response.run_id.as_deref().unwrap_or("unknown"),
                correlation_id = %correlation_id,
                "Pipeline execution queued"
            );
        }

        Ok((status, response))
    }
}

fn validate_pipeline_parameters(
    requesting_user: &str,
    user_id: &str,
    from_date_utc: &str,
    to_date_utc: &str,
) -> Result<(), ServiceError> {
    if requesting_user.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Requesting user email cannot be null or empty".to_string(),
        ));
    }
    if user_id.trim().is_empty() {
        return Err(ServiceError::Validation(
            "User ID cannot be null or empty".to_string(),
        ));
    }
    if !is_valid_date_format(from_date_utc) {
        return Err(ServiceError::Validation(
            "Invalid from_dateutc format. Expected YYYY-MM-DD".to_string(),
        ));
    }
    if !is_valid_date_format(to_date_utc) {
        return Err(ServiceError::Validation(
            "Invalid to_dateutc format. Expected YYYY-MM-DD".to_string(),
        ));
    }
    Ok(())
}

/// Shape check only (`YYYY-MM-DD`); calendar validity is the pipeline's
/// concern.
fn is_valid_date_format(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_like_dates() {
        assert!(is_valid_date_format("2024-01-01"));
        assert!(is_valid_date_format("1999-12-31"));
    }

    #[test]
    fn rejects_reordered_and_malformed_dates() {
        assert!(!is_valid_date_format("01-01-2024"));
        assert!(!is_valid_date_format("2024/01/01"));
        assert!(!is_valid_date_format("2024-1-1"));
        assert!(!is_valid_date_format("2024-01-01T00:00:00"));
        assert!(!is_valid_date_format(""));
    }

    #[test]
    fn blank_parameters_fail_validation() {
        let err =
            validate_pipeline_parameters("", "u-1", "2024-01-01", "2024-01-31").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("Requesting user")));

        let err = validate_pipeline_parameters("a@b", "  ", "2024-01-01", "2024-01-31")
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("User ID")));
    }

    #[test]
    fn malformed_dates_fail_validation() {
        let err =
            validate_pipeline_parameters("a@b", "u-1", "01-01-2024", "2024-01-31").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("from_dateutc")));

        let err =
            validate_pipeline_parameters("a@b", "u-1", "2024-01-01", "31-01-2024").unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m.contains("to_dateutc")));
    }
}
