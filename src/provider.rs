use aws_sdk_ec2::types::{Filter, Instance, Tag};
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// A compute instance returned by a provider query. Read-only: every field is
/// sourced from the provider response, missing tags become empty strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub instance_id: String,
    pub private_ip: Option<String>,
    pub environment: String,
    pub role: String,
    pub profile: String,
    pub instance_type: String,
    pub state: String,
    pub launch_time: Option<DateTime<Utc>>,
}

impl Candidate {
    /// `role` alone, or `role/profile` when a profile tag is present.
    pub fn role_profile(&self) -> String {
        if self.profile.is_empty() {
            self.role.clone()
        } else {
            format!("{}/{}", self.role, self.profile)
        }
    }

    fn from_instance(instance: &Instance) -> Self {
        Candidate {
            name: tag_value(instance.tags(), "Name"),
            instance_id: instance.instance_id().unwrap_or_default().to_string(),
            private_ip: instance.private_ip_address().map(|ip| ip.to_string()),
            environment: tag_value(instance.tags(), "environment"),
            role: tag_value(instance.tags(), "role"),
            profile: tag_value(instance.tags(), "profile"),
            instance_type: instance
                .instance_type()
                .map(|t| t.as_str())
                .unwrap_or_default()
                .to_string(),
            state: instance
                .state()
                .and_then(|s| s.name())
                .map(|n| n.as_str())
                .unwrap_or_default()
                .to_string(),
            launch_time: instance
                .launch_time()
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos())),
        }
    }
}

fn tag_value(tags: &[Tag], key: &str) -> String {
    tags.iter()
        .find(|tag| tag.key() == Some(key))
        .and_then(|tag| tag.value())
        .unwrap_or_default()
        .to_string()
}

/// The provider-query capability: list instances matching a filter set within
/// one environment scope. The resolver is generic over this so tests can run
/// against canned fixtures.
#[allow(async_fn_in_trait)]
pub trait InstanceProvider {
    async fn query(&self, environment: &str, filters: Vec<Filter>) -> Result<Vec<Candidate>>;
}

/// Queries EC2 with one profile-scoped client per environment. Credentials
/// are validated with STS before the first query on a connection, because
/// profile resolution alone never fails eagerly.
pub struct Ec2Provider;

impl Ec2Provider {
    async fn connect(&self, environment: &str) -> Result<aws_sdk_ec2::Client> {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .profile_name(environment)
            .load()
            .await;

        let sts_client = aws_sdk_sts::Client::new(&config);
        sts_client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| Error::ProviderConnection {
                environment: environment.to_string(),
                message: e.to_string(),
            })?;

        Ok(aws_sdk_ec2::Client::new(&config))
    }
}

impl InstanceProvider for Ec2Provider {
    async fn query(&self, environment: &str, filters: Vec<Filter>) -> Result<Vec<Candidate>> {
        let client = self.connect(environment).await?;

        let response = client
            .describe_instances()
            .set_filters(Some(filters))
            .send()
            .await
            .map_err(|e| Error::ProviderQuery {
                environment: environment.to_string(),
                message: e.to_string(),
            })?;

        // Reservations group instances arbitrarily; flatten in provider order.
        let mut candidates = Vec::new();
        for reservation in response.reservations() {
            for instance in reservation.instances() {
                candidates.push(Candidate::from_instance(instance));
            }
        }

        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_profile_joins_with_slash() {
        let mut candidate = candidate_fixture();
        candidate.role = "appserver".into();
        candidate.profile = "php72".into();
        assert_eq!(candidate.role_profile(), "appserver/php72");
    }

    #[test]
    fn role_profile_omits_empty_profile() {
        let mut candidate = candidate_fixture();
        candidate.role = "appserver".into();
        candidate.profile = String::new();
        assert_eq!(candidate.role_profile(), "appserver");
    }

    #[test]
    fn missing_tags_map_to_empty_strings() {
        let tags = [Tag::builder().key("Name").value("web-1").build()];
        assert_eq!(tag_value(&tags, "Name"), "web-1");
        assert_eq!(tag_value(&tags, "role"), "");
    }

    fn candidate_fixture() -> Candidate {
        Candidate {
            name: "web-1".into(),
            instance_id: "i-0123456789abcdef0".into(),
            private_ip: Some("10.0.0.1".into()),
            environment: "dev".into(),
            role: "appserver".into(),
            profile: String::new(),
            instance_type: "t3.medium".into(),
            state: "running".into(),
            launch_time: None,
        }
    }
}
