use fxgen_hir::Visibility;
use serde::{Deserialize, Serialize};

/// Requested access level of a generated member.
///
/// `None` suppresses generation for the whole annotation occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    #[default]
    Public,
    Protected,
    Package,
    Private,
    None,
}

impl AccessLevel {
    pub fn visibility(self) -> Option<Visibility> {
        match self {
            AccessLevel::Public => Some(Visibility::Public),
            AccessLevel::Protected => Some(Visibility::Protected),
            AccessLevel::Package => Some(Visibility::Package),
            AccessLevel::Private => Some(Visibility::Private),
            AccessLevel::None => None,
        }
    }
}
