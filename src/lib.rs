//! Resolve an EC2 instance from loose selection criteria and hand off to an
//! interactive ssh session.
//!
//! The pipeline runs Dispatcher -> Filter Builder -> Resolver -> Presenter ->
//! (Selector) -> Session Launcher, with the provider query, the list picker,
//! and the session spawner injected as capabilities so the whole flow can be
//! driven by tests.

pub mod criteria;
pub mod error;
pub mod filter;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod select;
pub mod session;

use criteria::SelectionCriteria;
use error::{Error, Result};
use provider::InstanceProvider;
use select::Picker;
use session::SessionLauncher;

/// One lookup, one handoff. Identifier mode auto-selects its sole match and
/// prints the detail view; role/profile mode always disambiguates
/// interactively, even for a single candidate.
pub async fn run<P, K, S>(
    criteria: &SelectionCriteria,
    provider: &P,
    picker: &K,
    session: &S,
    environments: &[&str],
) -> Result<()>
where
    P: InstanceProvider,
    K: Picker,
    S: SessionLauncher,
{
    match criteria {
        SelectionCriteria::ByInstanceId { instance_id } => {
            let candidate =
                resolver::resolve_by_instance_id(provider, environments, instance_id).await?;
            print!("{}", render::render_candidate_detail(&candidate)?);

            let address = candidate
                .private_ip
                .as_deref()
                .ok_or_else(|| Error::AddressUnavailable(candidate.instance_id.clone()))?;
            session.open(address)
        }
        SelectionCriteria::ByRoleProfile {
            environment,
            role,
            profile,
        } => {
            let candidates =
                resolver::resolve_by_role_profile(provider, environment, role, profile).await?;
            let set = render::render_candidate_set(&candidates);

            // Two leading spaces so the label lines up over the list items.
            let label = format!("  {}", set.header());
            let index = picker.pick(&label, set.rows())?;

            let address = set.addresses[index]
                .clone()
                .ok_or_else(|| Error::AddressUnavailable(candidates[index].instance_id.clone()))?;
            session.open(&address)
        }
    }
}
