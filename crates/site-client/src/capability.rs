//! The single role check behind every mutating control.

use crate::model::AccountRole;

/// Who is using the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Anonymous visitor.
    #[default]
    Guest,
    /// Read-only walkthrough of the dashboard; holds no credential.
    Demo,
    /// Signed-in administrator.
    Admin,
}

impl From<AccountRole> for Role {
    fn from(role: AccountRole) -> Self {
        match role {
            AccountRole::Admin => Self::Admin,
            AccountRole::Demo => Self::Demo,
        }
    }
}

/// What a session may do.
///
/// # Examples
/// ```
/// use site_client::{Capability, Role};
///
/// assert!(Capability::for_role(Role::Admin).can_edit());
/// assert!(Capability::for_role(Role::Demo).can_open_dashboard());
/// assert!(!Capability::for_role(Role::Demo).can_edit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Public pages only.
    PublicOnly,
    /// May open the dashboard but every control is disabled.
    ReadOnlyDashboard,
    /// Full editing.
    Edit,
}

impl Capability {
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Guest => Self::PublicOnly,
            Role::Demo => Self::ReadOnlyDashboard,
            Role::Admin => Self::Edit,
        }
    }

    #[must_use]
    pub const fn can_edit(self) -> bool {
        matches!(self, Self::Edit)
    }

    #[must_use]
    pub const fn can_open_dashboard(self) -> bool {
        !matches!(self, Self::PublicOnly)
    }

    /// Whether the dashboard should show the read-only demo banner.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::ReadOnlyDashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Guest, false, false, false)]
    #[case(Role::Demo, false, true, true)]
    #[case(Role::Admin, true, true, false)]
    fn roles_map_to_capabilities(
        #[case] role: Role,
        #[case] edit: bool,
        #[case] dashboard: bool,
        #[case] banner: bool,
    ) {
        let capability = Capability::for_role(role);
        assert_eq!(capability.can_edit(), edit);
        assert_eq!(capability.can_open_dashboard(), dashboard);
        assert_eq!(capability.is_read_only(), banner);
    }
}
