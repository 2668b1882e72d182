use aws_sdk_ec2::types::Filter;

/// Exact match on the provider's native instance-id field.
pub fn instance_id_filters(instance_id: &str) -> Vec<Filter> {
    vec![Filter::builder()
        .name("instance-id")
        .values(instance_id)
        .build()]
}

/// Substring match on the role tag, plus an exact profile-tag match when a
/// profile was given. The wildcard wrap is unconditional: operators rarely
/// know the exact stored role string.
pub fn role_profile_filters(role: &str, profile: &str) -> Vec<Filter> {
    let mut filters = vec![Filter::builder()
        .name("tag:role")
        .values(format!("*{role}*"))
        .build()];

    if !profile.is_empty() {
        filters.push(
            Filter::builder()
                .name("tag:profile")
                .values(profile)
                .build(),
        );
    }

    filters
}
