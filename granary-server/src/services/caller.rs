use granary_api::UserRole;

/// The already authorized identity performing an operation. Only recorded in
/// logs, never checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i32,
    pub role: UserRole,
}

impl Caller {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Identity used by internal jobs such as the collection pipeline.
    pub fn system() -> Self {
        Self {
            user_id: 0,
            role: UserRole::Admin,
        }
    }
}

impl std::fmt::Display for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.user_id, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_role() {
        assert_eq!(Caller::new(7, UserRole::Operator).to_string(), "7/operator");
        assert_eq!(Caller::system().to_string(), "0/admin");
    }
}
