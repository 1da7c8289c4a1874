//! Menu error taxonomy.

/// Failure of a tree mutation or navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuError {
    /// Node pool or child list is full.
    OutOfMemory,
    /// The child is already attached (to this or another parent).
    DuplicateChild,
    /// The child is not among the parent's children.
    NotFound,
    /// Refusing to delete the root or the active node.
    Protected,
    /// The operation would create, or has found, a cycle.
    CycleDetected,
    /// The display lock was not acquired in time.
    LockTimeout,
    /// Already at a node without a parent.
    NoParent,
    /// The active node has no children to enter.
    NoChildren,
    /// The handle refers to a freed node.
    StaleNode,
}

#[cfg(feature = "std")]
impl std::error::Error for MenuError {}

impl core::fmt::Display for MenuError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfMemory => write!(f, "menu node storage exhausted"),
            Self::DuplicateChild => write!(f, "child already attached"),
            Self::NotFound => write!(f, "child not found"),
            Self::Protected => write!(f, "node is protected"),
            Self::CycleDetected => write!(f, "cycle detected in menu tree"),
            Self::LockTimeout => write!(f, "display lock timeout"),
            Self::NoParent => write!(f, "node has no parent"),
            Self::NoChildren => write!(f, "node has no children"),
            Self::StaleNode => write!(f, "stale node handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MenuError;

    #[test]
    fn display_strings_are_distinct() {
        let all = [
            MenuError::OutOfMemory,
            MenuError::DuplicateChild,
            MenuError::NotFound,
            MenuError::Protected,
            MenuError::CycleDetected,
            MenuError::LockTimeout,
            MenuError::NoParent,
            MenuError::NoChildren,
            MenuError::StaleNode,
        ];
        let rendered: Vec<String> = all.iter().map(ToString::to_string).collect();
        for (i, a) in rendered.iter().enumerate() {
            for b in rendered.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
