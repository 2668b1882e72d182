use colored::Colorize;

use crate::error::{Error, Result};
use crate::filter;
use crate::provider::{Candidate, InstanceProvider};

/// Searches environments in priority order and returns the first match.
///
/// The loop short-circuits: once an environment yields a candidate, later
/// environments are never queried. Connection or query failures abort the
/// whole resolution; there is no skip-and-continue.
pub async fn resolve_by_instance_id<P: InstanceProvider>(
    provider: &P,
    environments: &[&str],
    instance_id: &str,
) -> Result<Candidate> {
    let filters = filter::instance_id_filters(instance_id);

    for environment in environments {
        let mut matches = provider.query(environment, filters.clone()).await?;
        if !matches.is_empty() {
            // Instance IDs are unique, so multiple matches mean the filter
            // caught something unexpected; surface it but keep going.
            if matches.len() > 1 {
                eprintln!(
                    "{} instance ID {} matched {} instances in '{}', using the first",
                    "[WARNING]".yellow().bold(),
                    instance_id,
                    matches.len(),
                    environment
                );
            }
            return Ok(matches.swap_remove(0));
        }
    }

    Err(Error::NotFound)
}

/// Queries a single environment for every instance matching the role filter
/// (and profile filter when given), in provider-returned order.
pub async fn resolve_by_role_profile<P: InstanceProvider>(
    provider: &P,
    environment: &str,
    role: &str,
    profile: &str,
) -> Result<Vec<Candidate>> {
    let filters = filter::role_profile_filters(role, profile);
    let candidates = provider.query(environment, filters).await?;

    if candidates.is_empty() {
        return Err(Error::NotFound);
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::Filter;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FakeProvider {
        matches: HashMap<String, Vec<Candidate>>,
        failing: Option<String>,
        queried: RefCell<Vec<String>>,
    }

    impl FakeProvider {
        fn new() -> Self {
            FakeProvider {
                matches: HashMap::new(),
                failing: None,
                queried: RefCell::new(Vec::new()),
            }
        }

        fn with_match(mut self, environment: &str, candidate: Candidate) -> Self {
            self.matches
                .entry(environment.to_string())
                .or_default()
                .push(candidate);
            self
        }

        fn failing_in(mut self, environment: &str) -> Self {
            self.failing = Some(environment.to_string());
            self
        }

        fn queried(&self) -> Vec<String> {
            self.queried.borrow().clone()
        }
    }

    impl InstanceProvider for FakeProvider {
        async fn query(&self, environment: &str, _filters: Vec<Filter>) -> Result<Vec<Candidate>> {
            self.queried.borrow_mut().push(environment.to_string());
            if self.failing.as_deref() == Some(environment) {
                return Err(Error::ProviderQuery {
                    environment: environment.to_string(),
                    message: "request expired".into(),
                });
            }
            Ok(self.matches.get(environment).cloned().unwrap_or_default())
        }
    }

    fn candidate(instance_id: &str) -> Candidate {
        Candidate {
            name: "web-1".into(),
            instance_id: instance_id.into(),
            private_ip: Some("10.0.0.1".into()),
            environment: String::new(),
            role: "appserver".into(),
            profile: String::new(),
            instance_type: "t3.medium".into(),
            state: "running".into(),
            launch_time: None,
        }
    }

    const ENVIRONMENTS: &[&str] = &["prod", "dev", "stg", "sandbox"];

    #[tokio::test]
    async fn id_search_stops_at_first_matching_environment() {
        let provider = FakeProvider::new().with_match("stg", candidate("i-0123456789abcdef0"));

        let found = resolve_by_instance_id(&provider, ENVIRONMENTS, "i-0123456789abcdef0")
            .await
            .unwrap();

        assert_eq!(found.instance_id, "i-0123456789abcdef0");
        // prod and dev are searched first, sandbox never.
        assert_eq!(provider.queried(), ["prod", "dev", "stg"]);
    }

    #[tokio::test]
    async fn id_search_exhausting_all_environments_is_not_found() {
        let provider = FakeProvider::new();

        let err = resolve_by_instance_id(&provider, ENVIRONMENTS, "i-0123456789abcdef0")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound));
        assert_eq!(provider.queried(), ["prod", "dev", "stg", "sandbox"]);
    }

    #[tokio::test]
    async fn id_search_aborts_on_query_failure() {
        let provider = FakeProvider::new()
            .failing_in("dev")
            .with_match("stg", candidate("i-0123456789abcdef0"));

        let err = resolve_by_instance_id(&provider, ENVIRONMENTS, "i-0123456789abcdef0")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ProviderQuery { .. }));
        // stg is never reached once dev fails.
        assert_eq!(provider.queried(), ["prod", "dev"]);
    }

    #[tokio::test]
    async fn id_search_uses_first_of_multiple_matches() {
        let provider = FakeProvider::new()
            .with_match("prod", candidate("i-aaa"))
            .with_match("prod", candidate("i-bbb"));

        let found = resolve_by_instance_id(&provider, ENVIRONMENTS, "i-aaa")
            .await
            .unwrap();

        assert_eq!(found.instance_id, "i-aaa");
    }

    #[tokio::test]
    async fn role_search_queries_exactly_one_environment() {
        let provider = FakeProvider::new()
            .with_match("dev", candidate("i-aaa"))
            .with_match("dev", candidate("i-bbb"));

        let found = resolve_by_role_profile(&provider, "dev", "appserver", "")
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(provider.queried(), ["dev"]);
    }

    #[tokio::test]
    async fn role_search_with_no_matches_is_not_found() {
        let provider = FakeProvider::new();

        let err = resolve_by_role_profile(&provider, "dev", "appserver", "")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NotFound));
    }
}
