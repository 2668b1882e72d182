use crate::error::{Error, Result};

/// EC2 instance IDs all share this prefix; a single argument carrying it is
/// treated as an ID lookup rather than an environment name.
pub const INSTANCE_ID_PREFIX: &str = "i-";

/// What the operator asked to connect to, classified once from the positional
/// arguments and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCriteria {
    ByInstanceId {
        instance_id: String,
    },
    ByRoleProfile {
        environment: String,
        role: String,
        /// Empty means "no profile constraint".
        profile: String,
    },
}

impl SelectionCriteria {
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [id] if id.starts_with(INSTANCE_ID_PREFIX) => Ok(SelectionCriteria::ByInstanceId {
                instance_id: id.clone(),
            }),
            [environment, role] => Ok(SelectionCriteria::ByRoleProfile {
                environment: environment.clone(),
                role: role.clone(),
                profile: String::new(),
            }),
            [environment, role, profile] => Ok(SelectionCriteria::ByRoleProfile {
                environment: environment.clone(),
                role: role.clone(),
                profile: profile.clone(),
            }),
            _ => Err(Error::InvalidCommand),
        }
    }
}
