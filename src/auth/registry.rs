//! 内置演示账号

use crate::models::{role::Role, user::Identity};
use once_cell::sync::Lazy;

static BUILTIN_IDENTITIES: Lazy<Vec<Identity>> = Lazy::new(|| {
    vec![
        Identity::new("1", "Super Admin", "super@example.com", Role::SuperAdmin),
        Identity::new("2", "TP Admin", "tpadmin@example.com", Role::TpAdmin),
        Identity::new("3", "TP Operation", "tpop@example.com", Role::TpOperation),
        Identity::new("4", "TP SITE", "tpsite@example.com", Role::TpSite),
        Identity::new("5", "MCMC Admin", "mcmcadmin@example.com", Role::McmcAdmin),
        Identity::new("6", "MCMC Operation", "mcmcop@example.com", Role::McmcOperation),
    ]
});

/// 可登录的固定账号集合
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    identities: Vec<Identity>,
}

impl IdentityRegistry {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// 每个角色一个账号
    pub fn builtin() -> Self {
        Self::new(BUILTIN_IDENTITIES.clone())
    }

    /// 按邮箱查找（忽略大小写）
    pub fn find_by_email(&self, email: &str) -> Option<&Identity> {
        let email = email.trim().to_lowercase();
        self.identities
            .iter()
            .find(|identity| identity.email.to_lowercase() == email)
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
