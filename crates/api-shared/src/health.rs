use crate::dto::HealthRes;

/// Health check shared by every binary exposing the API.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance.
    pub fn check_health() -> HealthRes {
        HealthRes {
            status: "ok".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_ok() {
        let res = HealthService::check_health();
        assert_eq!(res.status, "ok");
    }
}
