use super::*;

impl AccessPolicy {
    /// Returns the roles a role subsumes directly, as written in the table.
    #[must_use]
    pub fn direct_inherited_roles(&self, role: Role) -> BTreeSet<Role> {
        self.direct_inheritance
            .get(&role)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns every role a role subsumes, directly or transitively.
    #[must_use]
    pub fn inherited_roles(&self, role: Role) -> BTreeSet<Role> {
        self.inherited_roles.get(&role).cloned().unwrap_or_default()
    }

    /// Returns the permissions declared on the role itself.
    #[must_use]
    pub fn declared_permissions(&self, role: Role) -> BTreeSet<Permission> {
        self.declared_permissions
            .get(&role)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns own plus inherited permissions. Unconfigured roles resolve to nothing.
    #[must_use]
    pub fn all_permissions(&self, role: Role) -> BTreeSet<Permission> {
        self.resolved_permissions
            .get(&role)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolves permissions for a stored role tag; unknown tags resolve to nothing.
    #[must_use]
    pub fn all_permissions_for_tag(&self, role_tag: &str) -> BTreeSet<Permission> {
        role_tag
            .parse::<Role>()
            .map(|role| self.all_permissions(role))
            .unwrap_or_default()
    }

    /// Returns whether the role holds the wildcard or exactly this permission.
    #[must_use]
    pub fn has_permission(&self, role: Role, permission: &str) -> bool {
        self.resolved_permissions
            .get(&role)
            .is_some_and(|permissions| {
                permissions.contains(WILDCARD_PERMISSION) || permissions.contains(permission)
            })
    }

    /// Checks the `{action}:{resource_type}` permission for a role.
    #[must_use]
    pub fn can_access_resource(&self, role: Role, resource_type: &str, action: &str) -> bool {
        Permission::for_action(action, resource_type)
            .is_ok_and(|permission| self.has_permission(role, permission.as_str()))
    }

    /// Returns the union of resolved permissions over every held role.
    #[must_use]
    pub fn subject_permissions(&self, subject: &AccessSubject) -> BTreeSet<Permission> {
        subject
            .roles()
            .iter()
            .filter_map(|role| self.resolved_permissions.get(role))
            .flatten()
            .cloned()
            .collect()
    }

    /// Returns whether any held role resolves the permission.
    #[must_use]
    pub fn subject_has_permission(&self, subject: &AccessSubject, permission: &str) -> bool {
        subject
            .roles()
            .iter()
            .any(|role| self.has_permission(*role, permission))
    }

    /// Returns whether any held role resolves the wildcard.
    #[must_use]
    pub fn holds_wildcard(&self, subject: &AccessSubject) -> bool {
        subject.roles().iter().any(|role| {
            self.resolved_permissions
                .get(role)
                .is_some_and(|permissions| permissions.contains(WILDCARD_PERMISSION))
        })
    }
}

/// Finds one cycle in the subsumption graph, returned as a closed path.
pub(super) fn find_cycle(edges: &BTreeMap<Role, BTreeSet<Role>>) -> Option<Vec<Role>> {
    let mut finished = BTreeSet::new();
    for start in edges.keys() {
        let mut path = Vec::new();
        if let Some(cycle) = visit(*start, edges, &mut path, &mut finished) {
            return Some(cycle);
        }
    }

    None
}

fn visit(
    role: Role,
    edges: &BTreeMap<Role, BTreeSet<Role>>,
    path: &mut Vec<Role>,
    finished: &mut BTreeSet<Role>,
) -> Option<Vec<Role>> {
    if finished.contains(&role) {
        return None;
    }

    if let Some(position) = path.iter().position(|visited| *visited == role) {
        let mut cycle = path.split_off(position);
        cycle.push(role);
        return Some(cycle);
    }

    path.push(role);
    if let Some(inherited) = edges.get(&role) {
        for next in inherited {
            if let Some(cycle) = visit(*next, edges, path, finished) {
                return Some(cycle);
            }
        }
    }
    path.pop();
    finished.insert(role);

    None
}

/// Collects every role reachable from `role`, excluding `role` itself.
/// Expects an acyclic graph; the visited set still guarantees termination.
pub(super) fn transitive_closure(
    role: Role,
    edges: &BTreeMap<Role, BTreeSet<Role>>,
) -> BTreeSet<Role> {
    let mut closure = BTreeSet::new();
    let mut pending: Vec<Role> = edges.get(&role).into_iter().flatten().copied().collect();

    while let Some(next) = pending.pop() {
        if next != role && closure.insert(next) {
            pending.extend(edges.get(&next).into_iter().flatten().copied());
        }
    }

    closure
}
